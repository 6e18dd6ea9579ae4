//! Response record and codec error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Placeholder reasoning used in fallback records.
pub const FALLBACK_REASONING: &str = "No reasoning block";

/// Placeholder summary used in fallback records.
pub const FALLBACK_SUMMARY: &str = "No summary block";

/// JSON shape the provider is asked to produce, sent alongside the
/// establish-session instructions.
pub const RESPONSE_SCHEMA_HINT: &str = r#"{
  "type": "object",
  "required": ["reasoning", "summary", "content"],
  "properties": {
    "reasoning": { "type": "string", "description": "Step-by-step reasoning, in Markdown." },
    "summary": { "type": "string", "description": "Plain-text summary of the request and the answer." },
    "content": { "type": "string", "description": "The complete answer, in Markdown." }
  }
}"#;

/// The validated three-part reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ResponseWire")]
pub struct Response {
    /// Reasoning behind the answer (older replies call it `think`)
    pub reasoning: String,
    /// Plain-text summary; this is what history replays use
    pub summary: String,
    /// The answer itself
    pub content: String,
}

/// Decoding shape of [`Response`]. `think` is only consulted when
/// `reasoning` is absent, so a reply carrying both is still accepted.
#[derive(Deserialize)]
struct ResponseWire {
    #[serde(default)]
    reasoning: Option<String>,
    #[serde(default)]
    think: Option<String>,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    content: String,
}

impl From<ResponseWire> for Response {
    fn from(wire: ResponseWire) -> Self {
        Self {
            reasoning: wire.reasoning.or(wire.think).unwrap_or_default(),
            summary: wire.summary,
            content: wire.content,
        }
    }
}

impl Response {
    /// The record returned whenever parsing fails: placeholders plus the
    /// untouched raw input.
    pub fn fallback(raw: &str) -> Self {
        Self {
            reasoning: FALLBACK_REASONING.to_string(),
            summary: FALLBACK_SUMMARY.to_string(),
            content: raw.to_string(),
        }
    }

    pub fn field(&self, field: ResponseField) -> &str {
        match field {
            ResponseField::Reasoning => &self.reasoning,
            ResponseField::Summary => &self.summary,
            ResponseField::Content => &self.content,
        }
    }

    /// Encodes the record in the wire shape the codec accepts.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// The three required fields, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseField {
    Reasoning,
    Summary,
    Content,
}

impl ResponseField {
    pub const ALL: [ResponseField; 3] = [Self::Reasoning, Self::Summary, Self::Content];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reasoning => "reasoning",
            Self::Summary => "summary",
            Self::Content => "content",
        }
    }
}

impl fmt::Display for ResponseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a reply could not be turned into a [`Response`].
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseError {
    #[error("input string is empty or whitespace-only")]
    EmptyInput,

    #[error("failed to parse JSON: {0}")]
    Parse(String),

    #[error("{0} field is empty or missing")]
    EmptyField(ResponseField),
}

impl ResponseError {
    /// Malformed structure (including empty input).
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::EmptyInput | Self::Parse(_))
    }

    /// Well-formed structure with a required field left blank.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyField(_))
    }

    pub fn field(&self) -> Option<ResponseField> {
        match self {
            Self::EmptyField(field) => Some(*field),
            _ => None,
        }
    }
}
