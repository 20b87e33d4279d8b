use serde::Serialize;
use serde_json::Value;

use crate::config::ServerConfig;
use crate::memory::{MemoryError, Section};
use crate::protocol::{GetPreferenceParams, ToolResult};

#[derive(Debug, Serialize)]
struct PreferenceEntry<'a> {
    section: Section,
    key: &'a str,
    value: &'a Value,
}

/// Handle a `mip_get_preference` tool call.
///
/// A missing section or key is a normal outcome: it comes back as a tool
/// result flagged `isError`, not as a protocol fault.
pub async fn handle(
    params: GetPreferenceParams,
    config: &ServerConfig,
) -> Result<ToolResult, MemoryError> {
    let document = config.store().read()?;

    let Some(value) = document.get(params.section, &params.key) else {
        return Ok(ToolResult::error(
            config.locale.not_found(params.section, &params.key),
        ));
    };

    let entry = PreferenceEntry {
        section: params.section,
        key: &params.key,
        value,
    };
    let text = serde_json::to_string_pretty(&entry).map_err(MemoryError::Serialize)?;
    Ok(ToolResult::text(text))
}
