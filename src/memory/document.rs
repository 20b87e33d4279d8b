use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// Version tag written into a fresh memory document.
pub const DEFAULT_VERSION: &str = "0.1.0";

/// One section of the memory document: an ordered JSON object.
pub type SectionMap = Map<String, Value>;

/// The persisted MIP memory document.
///
/// Sections are kept as `Option` so that a section missing from the file stays
/// missing after an unrelated update. A section that is present must be an
/// object; `null` is rejected like any other non-object. Unknown top-level
/// fields ride along in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryDocument {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(
        default,
        deserialize_with = "present_section",
        skip_serializing_if = "Option::is_none"
    )]
    pub identity: Option<SectionMap>,
    #[serde(
        default,
        deserialize_with = "present_section",
        skip_serializing_if = "Option::is_none"
    )]
    pub preferences: Option<SectionMap>,
    #[serde(
        default,
        deserialize_with = "present_section",
        skip_serializing_if = "Option::is_none"
    )]
    pub custom: Option<SectionMap>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

/// Absent keys fall back to `None` through `default`; a key that is present
/// has to hold an object.
fn present_section<'de, D>(deserializer: D) -> Result<Option<SectionMap>, D::Error>
where
    D: Deserializer<'de>,
{
    SectionMap::deserialize(deserializer).map(Some)
}

impl Default for MemoryDocument {
    /// The skeleton used when no memory file exists yet.
    fn default() -> Self {
        Self {
            version: default_version(),
            identity: Some(Map::new()),
            preferences: Some(Map::new()),
            custom: Some(Map::new()),
            extra: Map::new(),
        }
    }
}

impl MemoryDocument {
    pub fn section(&self, section: Section) -> Option<&SectionMap> {
        match section {
            Section::Identity => self.identity.as_ref(),
            Section::Preferences => self.preferences.as_ref(),
            Section::Custom => self.custom.as_ref(),
        }
    }

    /// Mutable access to a section, creating an empty one if it is absent.
    pub fn section_mut(&mut self, section: Section) -> &mut SectionMap {
        let slot = match section {
            Section::Identity => &mut self.identity,
            Section::Preferences => &mut self.preferences,
            Section::Custom => &mut self.custom,
        };
        slot.get_or_insert_with(Map::new)
    }

    pub fn get(&self, section: Section, key: &str) -> Option<&Value> {
        self.section(section).and_then(|s| s.get(key))
    }

    /// Set `section.key`, returning the previous value if there was one.
    pub fn set(&mut self, section: Section, key: &str, value: PreferenceValue) -> Option<Value> {
        self.section_mut(section).insert(key.to_string(), value.into())
    }
}

/// The three top-level mappings of the memory document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Identity,
    Preferences,
    Custom,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Preferences => "preferences",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value stored under a section key.
///
/// The first four arms are the shapes the update tool accepts. `Other` keeps
/// anything else a hand-edited file may hold so it can be shown rather than
/// dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreferenceValue {
    Bool(bool),
    Number(Number),
    Text(String),
    List(Vec<String>),
    Other(Value),
}

impl PreferenceValue {
    /// Classify a raw JSON value.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => Self::Number(n.clone()),
            Value::String(s) => Self::Text(s.clone()),
            Value::Array(items) if items.iter().all(Value::is_string) => Self::List(
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect(),
            ),
            other => Self::Other(other.clone()),
        }
    }

    /// Whether this is one of the shapes the update tool is allowed to write.
    pub fn is_writable(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Null, `false`, zero, `""` and `[]` count as "not set".
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Bool(b) => !b,
            Self::Number(n) => n.as_f64() == Some(0.0),
            Self::Text(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Other(v) => v.is_null(),
        }
    }

    /// Human-facing rendering used by the prompt formatter.
    pub fn display(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::List(items) => items.join(", "),
            Self::Other(v) => v.to_string(),
        }
    }
}

impl From<PreferenceValue> for Value {
    fn from(value: PreferenceValue) -> Self {
        match value {
            PreferenceValue::Bool(b) => Value::Bool(b),
            PreferenceValue::Number(n) => Value::Number(n),
            PreferenceValue::Text(s) => Value::String(s),
            PreferenceValue::List(items) => {
                Value::Array(items.into_iter().map(Value::String).collect())
            }
            PreferenceValue::Other(v) => v,
        }
    }
}

impl From<&str> for PreferenceValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}
