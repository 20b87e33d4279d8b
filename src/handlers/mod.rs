pub mod get_context;
pub mod get_preference;
pub mod memory_resource;
pub mod tools;
pub mod update_preference;

use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

use crate::config::ServerConfig;
use crate::memory::MemoryError;
use crate::protocol::{
    GetPreferenceParams, InitializeParams, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
    ResourceReadParams, ToolCallParams, ToolResult, UpdatePreferenceParams,
};
use crate::schema::validate_value;

/// Dispatch a JSON-RPC request to the appropriate handler.
///
/// Returns `None` for notifications (no response required).
pub async fn dispatch(
    req: &JsonRpcRequest,
    config: &ServerConfig,
) -> Option<JsonRpcResponse> {
    debug!(method = %req.method, "dispatch");

    match req.method.as_str() {
        "initialize" => {
            if let Ok(params) = parse_params::<InitializeParams>(req) {
                let client = params.client_info.as_ref();
                info!(
                    client = client.and_then(|c| c.name.as_deref()).unwrap_or("unknown"),
                    client_version = client.and_then(|c| c.version.as_deref()).unwrap_or("unknown"),
                    requested = params.protocol_version.as_deref().unwrap_or("unspecified"),
                    "initialize"
                );
            }

            let result = serde_json::json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {
                    "tools": {},
                    "resources": {}
                },
                "serverInfo": {
                    "name": "mip-server",
                    "version": env!("CARGO_PKG_VERSION")
                }
            });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "notifications/initialized" => None,

        "ping" => Some(JsonRpcResponse::success(req.id.clone(), serde_json::json!({}))),

        "tools/list" => {
            let result = serde_json::json!({ "tools": tools::definitions(config.locale) });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "tools/call" => {
            let params: ToolCallParams = match parse_params(req) {
                Ok(p) => p,
                Err(err) => return Some(JsonRpcResponse::error(req.id.clone(), err)),
            };

            match dispatch_tool_call(&params, config).await {
                Ok(tool_result) => {
                    let result_json = serde_json::to_value(&tool_result)
                        .expect("ToolResult must serialize to JSON Value");
                    Some(JsonRpcResponse::success(req.id.clone(), result_json))
                }
                Err(err) => Some(JsonRpcResponse::error(req.id.clone(), err)),
            }
        }

        "resources/list" => {
            let descriptor = memory_resource::descriptor(config.locale);
            let result = serde_json::json!({ "resources": [descriptor] });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "resources/read" => {
            let params: ResourceReadParams = match parse_params(req) {
                Ok(p) => p,
                Err(err) => return Some(JsonRpcResponse::error(req.id.clone(), err)),
            };

            if params.uri != memory_resource::MEMORY_URI {
                return Some(JsonRpcResponse::error(
                    req.id.clone(),
                    JsonRpcError::invalid_params(format!("Resource not found: {}", params.uri)),
                ));
            }

            match memory_resource::read(config).await {
                Ok(result) => {
                    let result_json = serde_json::to_value(&result)
                        .expect("ReadResourceResult must serialize to JSON Value");
                    Some(JsonRpcResponse::success(req.id.clone(), result_json))
                }
                Err(err) => Some(JsonRpcResponse::error(req.id.clone(), store_failure(err))),
            }
        }

        _ => {
            // Unknown notifications are ignored, unknown requests are errors.
            if req.id.is_none() {
                return None;
            }
            Some(JsonRpcResponse::error(
                req.id.clone(),
                JsonRpcError::method_not_found(&req.method),
            ))
        }
    }
}

/// Run a `tools/call` request.
///
/// Arguments are checked against the tool's input schema first, so a bad
/// section never reaches the memory store. Store failures become JSON-RPC
/// internal errors; everything else is a [`ToolResult`].
pub async fn dispatch_tool_call(
    params: &ToolCallParams,
    config: &ServerConfig,
) -> Result<ToolResult, JsonRpcError> {
    let Some(schema) = tools::input_schema(&params.name, config.locale) else {
        return Err(JsonRpcError::invalid_params(format!(
            "Unknown tool: {}",
            params.name
        )));
    };

    let arguments = params
        .arguments
        .clone()
        .unwrap_or_else(|| serde_json::json!({}));

    if let Err(e) = validate_value(&schema, &arguments) {
        warn!(tool = %params.name, "rejected arguments: {e}");
        return Err(JsonRpcError::invalid_params(format!(
            "Invalid arguments for {}: {e}",
            params.name
        )));
    }

    let outcome = match params.name.as_str() {
        tools::GET_CONTEXT => get_context::handle(config).await,

        tools::GET_PREFERENCE => {
            let args: GetPreferenceParams = parse_arguments(&params.name, arguments)?;
            get_preference::handle(args, config).await
        }

        tools::UPDATE_PREFERENCE => {
            let args: UpdatePreferenceParams = parse_arguments(&params.name, arguments)?;
            if !args.value.is_writable() {
                return Err(JsonRpcError::invalid_params(format!(
                    "Invalid arguments for {}: value must be a string, number, boolean or list of strings",
                    params.name
                )));
            }
            update_preference::handle(args, config).await
        }

        _ => {
            return Err(JsonRpcError::invalid_params(format!(
                "Unknown tool: {}",
                params.name
            )))
        }
    };

    outcome.map_err(store_failure)
}

fn store_failure(err: MemoryError) -> JsonRpcError {
    error!("memory store failure: {err}");
    err.into()
}

fn parse_params<T: DeserializeOwned>(req: &JsonRpcRequest) -> Result<T, JsonRpcError> {
    match &req.params {
        Some(v) => serde_json::from_value(v.clone()).map_err(|e| {
            JsonRpcError::invalid_params(format!("Invalid {} params: {e}", req.method))
        }),
        None => Err(JsonRpcError::invalid_params(format!(
            "Missing params for {}",
            req.method
        ))),
    }
}

fn parse_arguments<T: DeserializeOwned>(
    tool: &str,
    arguments: serde_json::Value,
) -> Result<T, JsonRpcError> {
    serde_json::from_value(arguments)
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid arguments for {tool}: {e}")))
}
