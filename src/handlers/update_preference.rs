use serde_json::Value;
use tracing::info;

use crate::config::ServerConfig;
use crate::memory::MemoryError;
use crate::protocol::{ToolResult, UpdatePreferenceParams};

/// Handle a `mip_update_preference` tool call.
///
/// Read, set, rewrite the whole file. The section is created if the document
/// does not have it yet.
pub async fn handle(
    params: UpdatePreferenceParams,
    config: &ServerConfig,
) -> Result<ToolResult, MemoryError> {
    let store = config.store();
    let mut document = store.read()?;

    let new_value = Value::from(params.value.clone());
    let old_value = document.set(params.section, &params.key, params.value);
    store.write(&document)?;

    info!(section = %params.section, key = %params.key, "preference updated");

    Ok(ToolResult::text(config.locale.updated(
        params.section,
        &params.key,
        &render(old_value.as_ref()),
        &render(Some(&new_value)),
    )))
}

/// Compact JSON, `undefined` when there was no previous value.
fn render(value: Option<&Value>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "undefined".to_string(),
    }
}
