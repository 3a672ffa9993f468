use thiserror::Error;

use crate::types::Kind;

#[derive(Debug, Error)]
pub enum BindError {
    #[error("Pointer expected, got a {kind} passed by value")]
    NotAPointer { kind: Kind },

    #[error("Pointer to struct expected, got a pointer to {kind}")]
    NotAStructPointer { kind: Kind },

    #[error("Flag tag only allowed alongside a config key tag: field={field} flag={flag}")]
    FlagTagRequiresConfigTag {
        field: &'static str,
        flag: &'static str,
    },

    #[error("Flag registry is required for a field with a flag tag: field={field}")]
    FlagRegistryRequired { field: &'static str },

    #[error("Flag not found: field={field} flag={flag}")]
    FlagNotFound {
        field: &'static str,
        flag: &'static str,
    },

    #[error("Unsupported sequence element: field={field} kind={kind}")]
    UnsupportedSliceElement { field: &'static str, kind: Kind },

    #[error("Not implemented: field={field} kind={kind}")]
    NotImplemented { field: &'static str, kind: Kind },

    #[error("Unsupported field type: field={field} kind={kind}")]
    UnsupportedFieldType { field: &'static str, kind: Kind },

    #[error("Value {value} for '{key}' does not fit in {kind}: field={field}")]
    IntegerOverflow {
        field: &'static str,
        key: &'static str,
        value: String,
        kind: Kind,
    },

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(#[from] confique::Error),
}

impl BindError {
    /// The struct field the error is about, if it concerns a single field.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            BindError::FlagTagRequiresConfigTag { field, .. }
            | BindError::FlagRegistryRequired { field }
            | BindError::FlagNotFound { field, .. }
            | BindError::UnsupportedSliceElement { field, .. }
            | BindError::NotImplemented { field, .. }
            | BindError::UnsupportedFieldType { field, .. }
            | BindError::IntegerOverflow { field, .. } => Some(*field),
            BindError::NotAPointer { .. }
            | BindError::NotAStructPointer { .. }
            | BindError::InvalidValue { .. }
            | BindError::Config(_) => None,
        }
    }
}
