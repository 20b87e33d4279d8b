//! Tool catalogue advertised by `tools/list`.
//!
//! The input schemas double as the argument validator for `tools/call`, so
//! what a client is told and what the server enforces cannot drift apart.

use serde_json::{json, Value};

use crate::memory::PromptLocale;

pub const GET_CONTEXT: &str = "mip_get_context";
pub const GET_PREFERENCE: &str = "mip_get_preference";
pub const UPDATE_PREFERENCE: &str = "mip_update_preference";

struct ToolTexts {
    get_context: &'static str,
    get_preference: &'static str,
    update_preference: &'static str,
    query_section: &'static str,
    query_key: &'static str,
    update_section: &'static str,
    update_key: &'static str,
    update_value: &'static str,
}

static ZH: ToolTexts = ToolTexts {
    get_context: "获取用户的 MIP 记忆，格式化为可注入 System Prompt 的文本",
    get_preference: "查询用户的某个具体偏好",
    update_preference: "更新用户的某个偏好 (需要用户确认)",
    query_section: "查询的记忆分区",
    query_key: "要查询的键名",
    update_section: "要更新的记忆分区",
    update_key: "要更新的键名",
    update_value: "新的值",
};

static EN: ToolTexts = ToolTexts {
    get_context: "Get the user's MIP memory formatted as text ready to inject into a system prompt",
    get_preference: "Look up a single user preference",
    update_preference: "Update a single user preference (ask the user to confirm first)",
    query_section: "Memory section to query",
    query_key: "Key to look up within the section",
    update_section: "Memory section to update",
    update_key: "Key to set within the section",
    update_value: "New value",
};

fn texts(locale: PromptLocale) -> &'static ToolTexts {
    match locale {
        PromptLocale::Zh => &ZH,
        PromptLocale::En => &EN,
    }
}

fn section_schema(description: &str) -> Value {
    json!({
        "type": "string",
        "enum": ["identity", "preferences", "custom"],
        "description": description
    })
}

/// JSON Schema for a tool's arguments, or `None` for an unknown tool.
pub fn input_schema(name: &str, locale: PromptLocale) -> Option<Value> {
    let t = texts(locale);
    let schema = match name {
        GET_CONTEXT => json!({
            "type": "object",
            "properties": {}
        }),
        GET_PREFERENCE => json!({
            "type": "object",
            "required": ["section", "key"],
            "properties": {
                "section": section_schema(t.query_section),
                "key": {
                    "type": "string",
                    "description": t.query_key
                }
            }
        }),
        UPDATE_PREFERENCE => json!({
            "type": "object",
            "required": ["section", "key", "value"],
            "properties": {
                "section": section_schema(t.update_section),
                "key": {
                    "type": "string",
                    "description": t.update_key
                },
                "value": {
                    "description": t.update_value,
                    "anyOf": [
                        { "type": "string" },
                        { "type": "number" },
                        { "type": "boolean" },
                        { "type": "array", "items": { "type": "string" } }
                    ]
                }
            }
        }),
        _ => return None,
    };
    Some(schema)
}

/// Entries of the `tools/list` result.
pub fn definitions(locale: PromptLocale) -> Vec<Value> {
    let t = texts(locale);
    [
        (GET_CONTEXT, t.get_context),
        (GET_PREFERENCE, t.get_preference),
        (UPDATE_PREFERENCE, t.update_preference),
    ]
    .into_iter()
    .filter_map(|(name, description)| {
        input_schema(name, locale).map(|schema| {
            json!({
                "name": name,
                "description": description,
                "inputSchema": schema
            })
        })
    })
    .collect()
}
