use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::debug;

use super::document::MemoryDocument;

#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    #[error("cannot read memory file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("memory file {} is not a valid memory document: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot write memory file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot serialize memory document: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// File-backed store for the single memory document.
///
/// Every call goes to disk. Writes are neither locked nor atomic.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    path: PathBuf,
}

impl MemoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the document. A missing file yields the default skeleton and is
    /// not created.
    pub fn read(&self) -> Result<MemoryDocument, MemoryError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "memory file absent, using skeleton");
                return Ok(MemoryDocument::default());
            }
            Err(source) => {
                return Err(MemoryError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&text).map_err(|source| MemoryError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrite the file with the whole document as 2-space indented JSON.
    pub fn write(&self, document: &MemoryDocument) -> Result<(), MemoryError> {
        let text = serde_json::to_string_pretty(document).map_err(MemoryError::Serialize)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| MemoryError::Write {
                path: self.path.clone(),
                source,
            })?;
        }

        std::fs::write(&self.path, text).map_err(|source| MemoryError::Write {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), "memory file written");
        Ok(())
    }
}
