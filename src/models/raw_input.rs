//! Raw form input
//!
//! Field values exactly as a form hands them over, before parsing.

use serde::{Deserialize, Serialize};

/// A raw field value: missing, already numeric, or free text
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawInput {
    #[default]
    Missing,
    Number(f64),
    Text(String),
}

impl RawInput {
    /// Text view of the value, used when echoing a draft back to a form
    pub fn as_text(&self) -> String {
        match self {
            RawInput::Missing => String::new(),
            RawInput::Number(n) => n.to_string(),
            RawInput::Text(s) => s.clone(),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, RawInput::Missing)
    }
}

impl From<f64> for RawInput {
    fn from(n: f64) -> Self {
        RawInput::Number(n)
    }
}

impl From<&str> for RawInput {
    fn from(s: &str) -> Self {
        RawInput::Text(s.to_string())
    }
}

impl From<String> for RawInput {
    fn from(s: String) -> Self {
        RawInput::Text(s)
    }
}

impl From<serde_json::Value> for RawInput {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => n.as_f64().map(RawInput::Number).unwrap_or_default(),
            serde_json::Value::String(s) => RawInput::Text(s),
            _ => RawInput::Missing,
        }
    }
}
