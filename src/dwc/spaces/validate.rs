//! Workspace identifier and label validation

use log::warn;
use serde_json::Value;

use crate::config::validation::{
    MAX_SPACE_ID_LEN, MAX_SPACE_LABEL_LEN, RESERVED_PREFIXES, RESERVED_WORDS,
};
use crate::error::{DwcError, Result};

/// Normalize a requested workspace name into a technical identifier
///
/// Spaces become underscores, letters are upper-cased and anything outside
/// `[A-Z0-9_]` is dropped. The result must be 1..=20 characters, must not
/// start with a reserved prefix and must not be a reserved word.
pub fn validate_space_id(requested: &str) -> Result<String> {
    let id: String = requested
        .replace(' ', "_")
        .to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();

    if id.is_empty() {
        return Err(DwcError::InvalidInput(format!(
            "workspace name '{}' has no valid characters",
            requested
        )));
    }

    if id.len() > MAX_SPACE_ID_LEN {
        return Err(DwcError::InvalidInput(format!(
            "workspace name '{}' is longer than {} characters",
            id, MAX_SPACE_ID_LEN
        )));
    }

    if let Some(prefix) = RESERVED_PREFIXES.iter().find(|p| id.starts_with(*p)) {
        return Err(DwcError::InvalidInput(format!(
            "workspace name '{}' starts with reserved prefix '{}'",
            id, prefix
        )));
    }

    if RESERVED_WORDS.contains(&id.as_str()) {
        return Err(DwcError::InvalidInput(format!(
            "workspace name '{}' is a reserved word",
            id
        )));
    }

    Ok(id)
}

/// Pick the label for a workspace
///
/// A missing or non-string label falls back to the workspace name; a long
/// label is cut to 30 characters.
pub fn validate_space_label(space_name: &str, label: Option<&Value>) -> String {
    let label = match label {
        Some(Value::String(text)) => text.as_str(),
        Some(other) => {
            warn!(
                "Label {} of workspace {} is not text - using the workspace name",
                other, space_name
            );
            space_name
        }
        None => space_name,
    };

    if label.chars().count() > MAX_SPACE_LABEL_LEN {
        let truncated: String = label.chars().take(MAX_SPACE_LABEL_LEN).collect();
        warn!(
            "Label of workspace {} truncated to {} characters: {}",
            space_name, MAX_SPACE_LABEL_LEN, truncated
        );
        truncated
    } else {
        label.to_string()
    }
}
