use crate::config::ServerConfig;
use crate::memory::{format_prompt, MemoryError};
use crate::protocol::ToolResult;

/// Handle a `mip_get_context` tool call.
pub async fn handle(config: &ServerConfig) -> Result<ToolResult, MemoryError> {
    let document = config.store().read()?;
    Ok(ToolResult::text(format_prompt(&document, config.locale)))
}
