pub mod request;
pub mod response;

pub use request::{
    GetPreferenceParams, InitializeParams, JsonRpcRequest, ResourceReadParams, RpcId,
    ToolCallParams, UpdatePreferenceParams,
};
pub use response::{
    JsonRpcError, JsonRpcResponse, McpError, McpErrorCode, McpErrorResponse, ReadResourceResult,
    ResourceContents, ResourceDescriptor, ToolResult, ToolResultContent,
};
