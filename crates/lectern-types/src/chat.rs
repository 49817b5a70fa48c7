//! Chat gateway types: demo variants and the structured key-phrase reply.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of key phrases the model is asked to return.
pub const KEY_PHRASE_COUNT: usize = 3;

/// Prompt-shaping strategy selected by the `demo` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DemoVariant {
    /// Wrap the user prompt in a single instruction template.
    #[default]
    Demo01,
    /// Send a system instruction plus the raw prompt as a separate message.
    Demo02,
}

impl DemoVariant {
    /// Parse a query value, falling back to [`DemoVariant::Demo01`] for
    /// anything unrecognised (including a missing value).
    pub fn from_query(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }
}

impl fmt::Display for DemoVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemoVariant::Demo01 => write!(f, "Demo01"),
            DemoVariant::Demo02 => write!(f, "Demo02"),
        }
    }
}

impl FromStr for DemoVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "demo01" => Ok(DemoVariant::Demo01),
            "2" | "demo02" => Ok(DemoVariant::Demo02),
            other => Err(format!("invalid demo variant: '{other}'")),
        }
    }
}

/// Structured reply of the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct KeyPhrases {
    pub phrases: Vec<String>,
}

impl KeyPhrases {
    /// True when the reply holds exactly [`KEY_PHRASE_COUNT`] non-blank phrases.
    pub fn is_complete(&self) -> bool {
        self.phrases.len() == KEY_PHRASE_COUNT
            && self.phrases.iter().all(|p| !p.trim().is_empty())
    }

    /// JSON schema of this type for strict structured output.
    pub fn json_schema() -> serde_json::Value {
        let schema = schemars::schema_for!(KeyPhrases);
        let mut value = serde_json::to_value(schema).unwrap_or_default();
        if let Some(obj) = value.as_object_mut() {
            obj.remove("$schema");
        }
        add_additional_properties_false(&mut value);
        value
    }
}

/// Recursively set `additionalProperties: false` on every object schema.
///
/// Strict structured output rejects schemas that leave it open.
pub fn add_additional_properties_false(schema: &mut serde_json::Value) {
    match schema {
        serde_json::Value::Object(map) => {
            let is_object = map
                .get("type")
                .map(|t| t == "object" || t.as_array().is_some_and(|a| a.iter().any(|v| v == "object")))
                .unwrap_or(false);
            if is_object {
                map.insert(
                    "additionalProperties".to_string(),
                    serde_json::Value::Bool(false),
                );
            }
            for (_, child) in map.iter_mut() {
                add_additional_properties_false(child);
            }
        }
        serde_json::Value::Array(items) => {
            for child in items {
                add_additional_properties_false(child);
            }
        }
        _ => {}
    }
}
