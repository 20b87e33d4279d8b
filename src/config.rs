use std::path::PathBuf;

use clap::Parser;

use crate::memory::{MemoryStore, PromptLocale};

/// Directory under the user's home holding the memory file.
const MIP_DIR: &str = ".mip";
const MIP_FILE: &str = "memory.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot determine home directory; set MIP_MEMORY_FILE or pass --memory-file")]
    NoHomeDir,
}

/// Command-line flags, each with an environment fallback.
#[derive(Debug, Parser)]
#[command(name = "mip-mcp-server", version, about = "MCP server for the MIP memory file")]
pub struct Cli {
    /// Path to the memory document (default: ~/.mip/memory.json)
    #[arg(long, env = "MIP_MEMORY_FILE")]
    pub memory_file: Option<PathBuf>,

    /// Label language for mip_get_context output (zh or en)
    #[arg(long, env = "MIP_PROMPT_LANGUAGE", default_value = "zh")]
    pub language: PromptLocale,

    /// Log filter written to stderr (e.g. "warn", "debug")
    #[arg(long, env = "MIP_LOG", default_value = "warn")]
    pub log_level: String,
}

/// Server configuration seen by the handlers.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub memory_path: PathBuf,
    pub locale: PromptLocale,
}

impl ServerConfig {
    /// Resolve the configuration from parsed flags.
    ///
    /// - `--memory-file` / `MIP_MEMORY_FILE` wins when set
    /// - otherwise `<home>/.mip/memory.json`
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let memory_path = match &cli.memory_file {
            Some(path) => path.clone(),
            None => default_memory_path()?,
        };

        Ok(Self {
            memory_path,
            locale: cli.language,
        })
    }

    pub fn store(&self) -> MemoryStore {
        MemoryStore::new(&self.memory_path)
    }
}

/// `<home>/.mip/memory.json`
pub fn default_memory_path() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(MIP_DIR).join(MIP_FILE))
        .ok_or(ConfigError::NoHomeDir)
}
