//! Contact form state
//!
//! Three free-text fields and a submitting flag - the only mutable state
//! on the page outside animation. Submission is simulated: required-field
//! validation, a fixed delay, then the fields clear and the control
//! re-enables. Nothing is sent anywhere and nothing persists.

use std::time::Duration;

use verve_core::{event_types, StateTransitions};

/// Submission control state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormState {
    Idle,
    /// Submit control disabled while the simulated delay runs
    Submitting,
}

impl StateTransitions for FormState {
    fn on_event(&self, event: u32) -> Option<Self> {
        match (self, event) {
            (FormState::Idle, event_types::SUBMIT) => Some(FormState::Submitting),
            (FormState::Submitting, event_types::SUBMIT_DONE) => Some(FormState::Idle),
            _ => None,
        }
    }
}

/// What a submission attempt did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Delay elapsed, fields cleared, control re-enabled
    Sent,
    /// Required-field validation failed; the delay never ran
    MissingField(&'static str),
    /// A submission is already in flight
    AlreadySubmitting,
}

/// The contact form: name, email, message, and a submitting flag
#[derive(Debug)]
pub struct ContactForm {
    name: String,
    email: String,
    message: String,
    state: FormState,
    simulated_delay: Duration,
}

impl ContactForm {
    /// Empty form with the production 2s simulated delay
    pub fn new() -> Self {
        Self::with_delay(Duration::from_secs(2))
    }

    pub fn with_delay(simulated_delay: Duration) -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            message: String::new(),
            state: FormState::Idle,
            simulated_delay,
        }
    }

    // Keystroke mutations

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
    }

    pub fn set_message(&mut self, value: impl Into<String>) {
        self.message = value.into();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the submit control is disabled
    pub fn is_submitting(&self) -> bool {
        self.state == FormState::Submitting
    }

    fn missing_field(&self) -> Option<&'static str> {
        if self.name.trim().is_empty() {
            Some("name")
        } else if self.email.trim().is_empty() {
            Some("email")
        } else if self.message.trim().is_empty() {
            Some("message")
        } else {
            None
        }
    }

    /// Validate and disable the submit control
    ///
    /// Returns the simulated delay to wait out, or the rejection outcome.
    /// An empty required field rejects immediately - the delay only runs
    /// for a complete form.
    pub fn begin_submit(&mut self) -> std::result::Result<Duration, SubmitOutcome> {
        if self.is_submitting() {
            return Err(SubmitOutcome::AlreadySubmitting);
        }
        if let Some(field) = self.missing_field() {
            tracing::debug!(field, "submission rejected by required-field validation");
            return Err(SubmitOutcome::MissingField(field));
        }

        self.state.apply(event_types::SUBMIT);
        Ok(self.simulated_delay)
    }

    /// Clear every field and re-enable the control after the delay
    pub fn finish_submit(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
        self.state.apply(event_types::SUBMIT_DONE);
        tracing::debug!("simulated submission complete; form reset");
    }

    /// Full submission: validate, wait the simulated delay, reset
    pub async fn submit(&mut self) -> SubmitOutcome {
        let delay = match self.begin_submit() {
            Ok(delay) => delay,
            Err(outcome) => return outcome,
        };
        tokio::time::sleep(delay).await;
        self.finish_submit();
        SubmitOutcome::Sent
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> ContactForm {
        let mut form = ContactForm::new();
        form.set_name("Ada");
        form.set_email("ada@example.com");
        form.set_message("Hello there");
        form
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_submit_clears_and_reenables() {
        let mut form = filled_form();
        let before = tokio::time::Instant::now();

        let outcome = form.submit().await;
        assert_eq!(outcome, SubmitOutcome::Sent);

        // The simulated delay actually elapsed
        assert_eq!(before.elapsed(), Duration::from_secs(2));

        assert_eq!(form.name(), "");
        assert_eq!(form.email(), "");
        assert_eq!(form.message(), "");
        assert!(!form.is_submitting());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_field_never_reaches_delay() {
        let mut form = filled_form();
        form.set_email("");

        let before = tokio::time::Instant::now();
        let outcome = form.submit().await;

        assert_eq!(outcome, SubmitOutcome::MissingField("email"));
        assert_eq!(before.elapsed(), Duration::ZERO);

        // Other fields untouched
        assert_eq!(form.name(), "Ada");
        assert!(!form.is_submitting());
    }

    #[tokio::test(start_paused = true)]
    async fn test_whitespace_only_field_rejected() {
        let mut form = filled_form();
        form.set_message("   ");
        assert_eq!(form.submit().await, SubmitOutcome::MissingField("message"));
    }

    #[test]
    fn test_control_disabled_between_begin_and_finish() {
        let mut form = filled_form();

        let delay = form.begin_submit().expect("complete form must begin");
        assert_eq!(delay, Duration::from_secs(2));
        assert!(form.is_submitting());

        // A second attempt while in flight is refused
        assert_eq!(form.begin_submit(), Err(SubmitOutcome::AlreadySubmitting));

        form.finish_submit();
        assert!(!form.is_submitting());
        assert_eq!(form.name(), "");
    }
}
