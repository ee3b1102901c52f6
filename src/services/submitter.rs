//! Simulated quote submission

use super::traits::QuoteSubmitter;
use crate::error::SubmitError;
use crate::state::FormState;
use async_trait::async_trait;
use std::time::Duration;

/// Waits for a fixed delay and reports success. Nothing is persisted.
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    delay: Duration,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl QuoteSubmitter for SimulatedSubmitter {
    async fn submit(&self, form: &FormState) -> Result<(), SubmitError> {
        tokio::time::sleep(self.delay).await;

        let payload =
            serde_json::to_string(form).map_err(|e| SubmitError(format!("encode failed: {e}")))?;
        tracing::info!(%payload, "quote request submitted");
        Ok(())
    }
}
