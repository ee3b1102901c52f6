//! Side-effect services behind the quote form and photo uploader
//!
//! - `submitter`: quote request submission (simulated)
//! - `upload_client`: multipart photo upload over HTTP

mod submitter;
mod traits;
mod upload_client;

pub use submitter::SimulatedSubmitter;
pub use traits::{PhotoUploader, QuoteSubmitter};
pub use upload_client::HttpPhotoUploader;

#[cfg(test)]
pub use traits::{MockPhotoUploader, MockQuoteSubmitter};
