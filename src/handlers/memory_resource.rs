use crate::config::ServerConfig;
use crate::memory::{MemoryError, PromptLocale};
use crate::protocol::{ReadResourceResult, ResourceContents, ResourceDescriptor};

pub const MEMORY_URI: &str = "mip://memory";
pub const MEMORY_NAME: &str = "user-memory";
const MIME_JSON: &str = "application/json";

/// The single resource advertised by `resources/list`.
pub fn descriptor(locale: PromptLocale) -> ResourceDescriptor {
    let description = match locale {
        PromptLocale::Zh => "用户的 MIP 记忆文件 (~/.mip/memory.json)",
        PromptLocale::En => "The user's MIP memory file (~/.mip/memory.json)",
    };

    ResourceDescriptor {
        uri: MEMORY_URI.into(),
        name: MEMORY_NAME.into(),
        description: description.into(),
        mime_type: MIME_JSON.into(),
    }
}

/// Read the whole memory document as pretty JSON.
pub async fn read(config: &ServerConfig) -> Result<ReadResourceResult, MemoryError> {
    let document = config.store().read()?;
    let text = serde_json::to_string_pretty(&document).map_err(MemoryError::Serialize)?;

    Ok(ReadResourceResult {
        contents: vec![ResourceContents {
            uri: MEMORY_URI.into(),
            mime_type: MIME_JSON.into(),
            text,
        }],
    })
}
