//! Single-field extraction from a task definition document.
//!
//! Formats one field of `taskDefinition` as text suitable for shell
//! consumption. `tags` is the exception: it lives at the document root.

use serde_json::Value;
use taskdef_common::constants::{
    JSON_ARRAY_FIELDS, JSON_OBJECT_FIELDS, ROOT_TAGS_FIELD, STRING_LIST_FIELDS,
};
use taskdef_common::error::{Result, TaskDefError};

/// How a field's value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldFormat {
    /// Items trimmed and joined with single spaces.
    StringList,
    /// Compact JSON, `[]` when absent.
    JsonArray,
    /// Compact JSON, `{}` when absent.
    JsonObject,
    /// Strings raw, everything else as JSON text; empty when absent.
    Scalar,
}

impl FieldFormat {
    fn of(field: &str) -> Self {
        if STRING_LIST_FIELDS.contains(&field) {
            Self::StringList
        } else if JSON_ARRAY_FIELDS.contains(&field) {
            Self::JsonArray
        } else if JSON_OBJECT_FIELDS.contains(&field) {
            Self::JsonObject
        } else {
            Self::Scalar
        }
    }

    const fn default_text(self) -> &'static str {
        match self {
            Self::JsonArray => "[]",
            Self::JsonObject => "{}",
            Self::StringList | Self::Scalar => "",
        }
    }

    fn render(self, value: &Value) -> Result<String> {
        match (self, value) {
            (Self::StringList, Value::Array(items)) => Ok(items
                .iter()
                .map(|item| scalar_text(item).trim().to_owned())
                .collect::<Vec<_>>()
                .join(" ")),
            (Self::JsonArray | Self::JsonObject, _) => Ok(serde_json::to_string(value)?),
            (Self::StringList | Self::Scalar, _) => Ok(scalar_text(value)),
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Returns the named field of a task definition document as text.
///
/// # Errors
///
/// Returns [`TaskDefError::MalformedDescriptor`] if `document` is not JSON
/// or has no `taskDefinition` object.
pub fn extract_field(document: &str, field: &str) -> Result<String> {
    let root: Value =
        serde_json::from_str(document).map_err(|e| TaskDefError::malformed(e.to_string()))?;
    let task_definition = root
        .get("taskDefinition")
        .filter(|value| value.is_object())
        .ok_or_else(|| TaskDefError::malformed("missing `taskDefinition` object"))?;

    let format = FieldFormat::of(field);
    let source = if field == ROOT_TAGS_FIELD {
        &root
    } else {
        task_definition
    };
    tracing::debug!(field, ?format, "extracting task definition field");

    match source.get(field) {
        Some(value) => format.render(value),
        None => Ok(format.default_text().to_owned()),
    }
}
