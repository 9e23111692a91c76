//! Form helpers shared by visitor forms and admin panels

use thiserror::Error;

/// Client-side form validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{} is required", capitalize(.0))]
    Required(&'static str),

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("New passwords do not match")]
    PasswordMismatch,

    #[error("Please select a file to upload")]
    MissingFile,

    #[error("Nothing to update")]
    NothingToUpdate,
}

fn capitalize(field: &str) -> String {
    let field = field.replace('_', " ");
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Whether a form creates a new record or edits an existing one
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Edit(String),
}

impl FormMode {
    pub fn is_edit(&self) -> bool {
        matches!(self, FormMode::Edit(_))
    }

    pub fn editing_id(&self) -> Option<&str> {
        match self {
            FormMode::Edit(id) => Some(id),
            FormMode::Create => None,
        }
    }
}

/// Trimmed value of a required field
pub fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, FormError> {
    let value = value.trim();
    if value.is_empty() {
        Err(FormError::Required(field))
    } else {
        Ok(value)
    }
}

/// Trimmed value of an optional field, `None` when blank
pub fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Trimmed value when it differs from the original; a cleared field
/// comes back as an empty string
pub fn changed(value: &str, original: &str) -> Option<String> {
    let value = value.trim();
    (value != original.trim()).then(|| value.to_string())
}

/// Split comma separated tag text.
///
/// Segments are trimmed and empty ones dropped; duplicates are kept.
pub fn split_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Tag list as editable text
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}
