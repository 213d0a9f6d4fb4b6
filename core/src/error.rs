use serde::Serialize;
use thiserror::Error;

use crate::steps::WizardStep;

/// A validation failure attached to one draft field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Canonical field name (see [`crate::fields::name`])
    pub field: &'static str,
    /// Human-readable description of what is missing or wrong
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Everything the wizard itself can refuse to do.
///
/// Local conditions (`Validation`, `StepAccessDenied`, `Busy`, field errors)
/// are recovered in place — the UI shows the message and the draft is left
/// untouched. Collaborator failures wrap the port error types and carry the
/// collaborator's message verbatim; the attempt is terminal and the user
/// re-initiates, never an automatic retry.
#[derive(Debug, Error)]
pub enum WizardError {
    /// Step requirements not met — forward navigation halted.
    #[error("step '{step}' is not complete: {summary}")]
    Validation {
        step: WizardStep,
        summary: String,
        errors: Vec<FieldError>,
    },
    /// Attempt to jump past the first incomplete step in linear mode.
    #[error("complete the '{required}' step before jumping to '{requested}'")]
    StepAccessDenied {
        requested: WizardStep,
        required: WizardStep,
    },
    /// The operation is already in flight; duplicate triggers are rejected,
    /// never queued.
    #[error("{operation} is already in progress")]
    Busy { operation: &'static str },
    /// Field name outside the draft schema.
    #[error("unknown draft field '{name}'")]
    UnknownField { name: String },
    /// Value that cannot be parsed into the field's declared type.
    #[error("invalid value for '{field}': {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },
    #[error(transparent)]
    Profile(#[from] ProfileStoreError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Failure talking to the profile backend (fetch/create/update).
#[derive(Debug, Error)]
pub enum ProfileStoreError {
    /// The backend rejected the request; `message` is its own wording.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("{0}")]
    Connection(String),
    #[error("{0}")]
    Decode(String),
}

/// Failure from the document-parsing service (unsupported format,
/// unreadable content, transport trouble).
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("{0}")]
    Connection(String),
    #[error("{0}")]
    Decode(String),
}

/// Failure from the smart-search enrichment service.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("{0}")]
    Connection(String),
    #[error("{0}")]
    Decode(String),
}

/// Failure reading or writing the local draft snapshot.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct SnapshotError(pub String);

impl WizardError {
    /// Whether this error is recovered locally (inline message, no
    /// collaborator involved).
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            WizardError::Validation { .. }
                | WizardError::StepAccessDenied { .. }
                | WizardError::Busy { .. }
                | WizardError::UnknownField { .. }
                | WizardError::InvalidValue { .. }
        )
    }
}
