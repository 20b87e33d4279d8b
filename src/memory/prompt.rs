use std::fmt;
use std::str::FromStr;

use super::document::{MemoryDocument, PreferenceValue, Section, SectionMap};

/// Language of the system-prompt block and of the tool and resource texts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PromptLocale {
    #[default]
    Zh,
    En,
}

impl PromptLocale {
    fn labels(&self) -> &'static Labels {
        match self {
            Self::Zh => &ZH,
            Self::En => &EN,
        }
    }

    /// Tool text for a lookup that found nothing.
    pub fn not_found(&self, section: Section, key: &str) -> String {
        match self {
            Self::Zh => format!("未找到: {section}.{key}"),
            Self::En => format!("Not found: {section}.{key}"),
        }
    }

    /// Tool text confirming an update; `old` and `new` are already rendered.
    pub fn updated(&self, section: Section, key: &str, old: &str, new: &str) -> String {
        match self {
            Self::Zh => format!("已更新 {section}.{key}: {old} → {new}"),
            Self::En => format!("Updated {section}.{key}: {old} → {new}"),
        }
    }
}

impl fmt::Display for PromptLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Zh => "zh",
            Self::En => "en",
        })
    }
}

impl FromStr for PromptLocale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zh" | "zh-cn" | "cn" => Ok(Self::Zh),
            "en" | "en-us" => Ok(Self::En),
            other => Err(format!("unsupported prompt language: {other} (expected zh or en)")),
        }
    }
}

struct Labels {
    header: &'static str,
    identity: [(&'static str, &'static str); 6],
    preferences: [(&'static str, &'static str); 5],
}

static ZH: Labels = Labels {
    header: "## 关于此用户 (来自 MIP)",
    identity: [
        ("name", "姓名"),
        ("role", "职业"),
        ("industry", "行业"),
        ("language", "语言"),
        ("timezone", "时区"),
        ("tech_stack", "技术栈"),
    ],
    preferences: [
        ("response_style", "回复风格"),
        ("formality", "正式程度"),
        ("explanation_depth", "解释深度"),
        ("code_comments_language", "代码注释语言"),
        ("variable_names_language", "变量命名语言"),
    ],
};

static EN: Labels = Labels {
    header: "## About this user (from MIP)",
    identity: [
        ("name", "Name"),
        ("role", "Role"),
        ("industry", "Industry"),
        ("language", "Language"),
        ("timezone", "Timezone"),
        ("tech_stack", "Tech stack"),
    ],
    preferences: [
        ("response_style", "Response style"),
        ("formality", "Formality"),
        ("explanation_depth", "Explanation depth"),
        ("code_comments_language", "Code comments language"),
        ("variable_names_language", "Variable names language"),
    ],
};

/// Render the memory document as a block of lines for a model's system prompt.
///
/// Known identity and preference keys are emitted in a fixed order, custom
/// entries in the document's own order. The header is always present.
pub fn format_prompt(document: &MemoryDocument, locale: PromptLocale) -> String {
    let labels = locale.labels();
    let mut lines = vec![labels.header.to_string()];

    if let Some(identity) = &document.identity {
        push_known(&mut lines, identity, &labels.identity);
    }
    if let Some(preferences) = &document.preferences {
        push_known(&mut lines, preferences, &labels.preferences);
    }
    if let Some(custom) = &document.custom {
        for (key, value) in custom {
            let value = PreferenceValue::from_json(value);
            lines.push(format!("- {key}: {}", value.display()));
        }
    }

    lines.join("\n")
}

fn push_known(lines: &mut Vec<String>, section: &SectionMap, fields: &[(&str, &str)]) {
    for (key, label) in fields {
        let Some(raw) = section.get(*key) else {
            continue;
        };
        let value = PreferenceValue::from_json(raw);
        if value.is_blank() {
            continue;
        }
        lines.push(format!("- {label}: {}", value.display()));
    }
}
