//! Hugging Face Inference API wire types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request body for a text-generation model.
#[derive(Debug, Serialize)]
pub struct TextGenerationRequest {
    pub inputs: String,
    pub parameters: TextGenerationParameters,
}

#[derive(Debug, Serialize)]
pub struct TextGenerationParameters {
    pub max_new_tokens: u32,
    pub temperature: f64,
    pub return_full_text: bool,
}

/// Response body, whose shape depends on the model and task.
///
/// Variants are tried in order: a JSON array, a JSON object, then any other
/// JSON value.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TextGenerationResponse {
    List(Vec<Value>),
    Object(Map<String, Value>),
    Other(Value),
}

impl TextGenerationResponse {
    /// Extract the generated text, trimmed of surrounding whitespace.
    ///
    /// - non-empty list: `generated_text` of the first element, or `""`
    /// - object: its `generated_text`, or the whole object as compact JSON
    /// - anything else (including `[]`): the value as compact JSON
    pub fn into_text(self) -> String {
        let text = match self {
            TextGenerationResponse::List(items) if !items.is_empty() => items[0]
                .get("generated_text")
                .map(render)
                .unwrap_or_default(),
            TextGenerationResponse::List(items) => render(&Value::Array(items)),
            TextGenerationResponse::Object(map) => match map.get("generated_text") {
                Some(text) => render(text),
                None => render(&Value::Object(map)),
            },
            TextGenerationResponse::Other(value) => render(&value),
        };
        text.trim().to_string()
    }
}

/// Strings render as their contents, everything else as compact JSON.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
