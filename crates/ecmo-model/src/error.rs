use thiserror::Error;

use crate::enums::EcmoMode;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EcmoError {
    /// A field is outside the range the calculator accepts.
    #[error("invalid {field}: {message}")]
    Validation { field: &'static str, message: String },
    /// A category label that has no entry in the scoring table.
    #[error("unknown {kind} category: {value:?}")]
    UnknownCategory { kind: &'static str, value: String },
    /// Mode-specific observations do not match the patient's ECMO mode.
    #[error("observations are for {found} ECMO but the patient is on {expected}")]
    ModeMismatch { expected: EcmoMode, found: EcmoMode },
}

impl EcmoError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn unknown(kind: &'static str, value: &str) -> Self {
        Self::UnknownCategory {
            kind,
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EcmoError>;
