//! Structured parsing of sanitized provider output.
//!
//! Parsing is all-or-nothing: a payload either deserializes into the expected
//! shape or the whole operation fails with a tagged `FormatError`. Malformed
//! provider output never reaches persistence and never degrades to a default.

use serde::de::DeserializeOwned;
use thiserror::Error;

use super::sanitize_response;

/// Tagged parse failure: syntactically broken JSON vs. well-formed JSON that
/// violates the expected shape.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("response is not valid JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    #[error("response JSON does not match the expected shape: {0}")]
    Schema(String),
}

/// Sanitizes `raw` and parses it strictly into `T`.
///
/// Two stages so the error tag is honest: a `serde_json::Value` parse catches
/// syntax failures, the typed conversion catches shape violations.
pub fn parse_structured<T: DeserializeOwned>(raw: &str) -> Result<T, FormatError> {
    let text = sanitize_response(raw);
    let value: serde_json::Value = serde_json::from_str(text).map_err(FormatError::Syntax)?;
    serde_json::from_value(value).map_err(|e| FormatError::Schema(e.to_string()))
}
