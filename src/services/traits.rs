//! Trait abstraction for the suspending operations to enable mocking in tests

use crate::error::{SubmitError, UploadError};
use crate::state::{FormState, PhotoFile, UploadReceipt};
use async_trait::async_trait;

/// Delivers a completed quote request
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteSubmitter: Send + Sync {
    /// Send the full form as the request payload.
    ///
    /// Retries are user-initiated and may deliver the same form twice.
    async fn submit(&self, form: &FormState) -> Result<(), SubmitError>;
}

/// Transfers staged photos to the upload endpoint
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PhotoUploader: Send + Sync {
    /// Upload every file in one request
    async fn upload(&self, files: Vec<PhotoFile>) -> Result<UploadReceipt, UploadError>;
}
