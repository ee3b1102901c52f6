//! Quote form lifecycle: editing, submitting, acknowledged

use super::forms::{ChangeOutcome, FieldId, FieldValue, FormState};
use crate::error::{FieldError, QuoteError, SubmitError};
use crate::services::QuoteSubmitter;
use chrono::{DateTime, Utc};

/// Areas the customer is asked to photograph after submitting
pub const REQUIRED_PHOTOS: &[&str] = &[
    "bedrooms",
    "bathrooms",
    "bathtubs",
    "living room",
    "dining area",
    "kitchen",
    "any other areas you would like cleaned",
];

/// Shown after a successful submission until the user starts over
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acknowledgment {
    pub contact_email: String,
    pub required_photos: &'static [&'static str],
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Editing,
    Submitting,
    Acknowledged(Acknowledgment),
}

/// Owns the form record and drives it through the submission lifecycle
#[derive(Debug, Clone)]
pub struct QuoteController {
    form: FormState,
    phase: Phase,
    contact_email: String,
    /// Error notice from the last failed submission
    notice: Option<String>,
}

impl QuoteController {
    pub fn new(contact_email: impl Into<String>) -> Self {
        Self {
            form: FormState::default(),
            phase: Phase::Editing,
            contact_email: contact_email.into(),
            notice: None,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.phase, Phase::Editing)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, Phase::Submitting)
    }

    pub fn acknowledgment(&self) -> Option<&Acknowledgment> {
        match &self.phase {
            Phase::Acknowledged(ack) => Some(ack),
            _ => None,
        }
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Route a widget value change into the form. Ignored unless editing.
    pub fn on_field_change(
        &mut self,
        field: FieldId,
        value: impl Into<FieldValue>,
    ) -> Result<ChangeOutcome, FieldError> {
        if !self.is_editing() {
            tracing::debug!(%field, "field change ignored outside editing");
            return Ok(ChangeOutcome::Ignored);
        }
        let outcome = self.form.apply(field, value.into())?;
        if outcome == ChangeOutcome::Blocked {
            tracing::debug!(%field, "change blocked while deep cleaning is selected");
        }
        Ok(outcome)
    }

    /// Validate and enter `Submitting`, returning the payload to send
    pub fn begin_submit(&mut self) -> Result<FormState, QuoteError> {
        match self.phase {
            Phase::Submitting => return Err(QuoteError::InFlight),
            Phase::Acknowledged(_) => return Err(QuoteError::NotEditing),
            Phase::Editing => {}
        }

        self.form.validate()?;
        self.phase = Phase::Submitting;
        self.notice = None;
        Ok(self.form.clone())
    }

    /// Settle the submission started by `begin_submit`
    pub fn finish_submit(&mut self, outcome: Result<(), SubmitError>) {
        if !self.is_submitting() {
            tracing::warn!("submission result arrived while not submitting");
            return;
        }

        match outcome {
            Ok(()) => {
                tracing::info!("quote request acknowledged");
                self.phase = Phase::Acknowledged(Acknowledgment {
                    contact_email: self.contact_email.clone(),
                    required_photos: REQUIRED_PHOTOS,
                    submitted_at: Utc::now(),
                });
            }
            Err(err) => {
                tracing::error!(error = %err, "quote submission failed");
                self.notice = Some(QuoteError::Submit(err).to_string());
                self.phase = Phase::Editing;
            }
        }
    }

    /// Validate, send, and wait for the outcome.
    ///
    /// The TUI runs the two halves on either side of a spawned task instead.
    #[allow(dead_code)]
    pub async fn submit(&mut self, submitter: &dyn QuoteSubmitter) -> Result<(), QuoteError> {
        let payload = self.begin_submit()?;
        let outcome = submitter.submit(&payload).await;
        let result = outcome.clone().map_err(QuoteError::from);
        self.finish_submit(outcome);
        result
    }

    /// Leave the acknowledgment and start a fresh form.
    ///
    /// Returns false when there is nothing to reset.
    pub fn reset(&mut self) -> bool {
        if self.acknowledgment().is_none() {
            return false;
        }
        self.form = FormState::default();
        self.phase = Phase::Editing;
        self.notice = None;
        true
    }
}
