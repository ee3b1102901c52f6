//! Error types for the quote form and photo upload

use crate::state::FieldId;
use thiserror::Error;

/// Reasons a quote request fails validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in the field: {0}")]
    MissingField(FieldId),
    #[error("Please select a cleaning type.")]
    NoCleaningType,
    #[error("Please enter a valid email.")]
    InvalidEmail,
}

/// A field-change event that cannot be applied
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{field} does not accept a {given} value")]
    WrongKind {
        field: FieldId,
        given: &'static str,
    },
    #[error("{value:?} is not an option for {field}")]
    UnknownOption { field: FieldId, value: String },
}

/// Failure reported by the quote submission side effect
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct SubmitError(pub String);

/// Reasons a submit request is refused or fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("A quote request is already being sent")]
    InFlight,
    #[error("The form is not being edited")]
    NotEditing,
    #[error("An error occurred while sending your request. Please try again. ({0})")]
    Submit(#[from] SubmitError),
}

/// Failure of a photo upload round trip
#[derive(Debug, Error)]
pub enum UploadError {
    /// The endpoint answered with a non-success status
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("unexpected response: {0}")]
    Decode(String),
    /// The background upload task died before reporting
    #[error("upload interrupted: {0}")]
    Interrupted(String),
}
