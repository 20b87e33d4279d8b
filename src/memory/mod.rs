//! The MIP memory document: model, file store and prompt rendering.

pub mod document;
pub mod prompt;
pub mod store;

pub use document::{MemoryDocument, PreferenceValue, Section, SectionMap, DEFAULT_VERSION};
pub use prompt::{format_prompt, PromptLocale};
pub use store::{MemoryError, MemoryStore};
