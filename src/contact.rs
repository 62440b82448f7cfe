pub const SENDING_LABEL: &str = "Sending...";
pub const SENT_MESSAGE: &str = "Message sent successfully!";
pub const FAILED_MESSAGE: &str = "Error sending message";
pub const ACCEPT_JSON: &str = "application/json";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    Failed,
}

impl SubmitOutcome {
    /// Network errors and non-2xx statuses are the same failure to the user.
    pub fn from_response(ok_status: Option<bool>) -> Self {
        match ok_status {
            Some(true) => Self::Sent,
            Some(false) | None => Self::Failed,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Sent => SENT_MESSAGE,
            Self::Failed => FAILED_MESSAGE,
        }
    }

    pub fn clears_form(self) -> bool {
        matches!(self, Self::Sent)
    }
}

/// Label and enabled state of the form's submit control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitControl {
    original_label: String,
    label: String,
    disabled: bool,
}

impl SubmitControl {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            original_label: label.clone(),
            label,
            disabled: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn begin(&mut self) {
        self.label = SENDING_LABEL.to_string();
        self.disabled = true;
    }

    /// Restores the control whatever the outcome.
    pub fn finish(&mut self) {
        self.label = self.original_label.clone();
        self.disabled = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_disables_and_shows_progress() {
        let mut control = SubmitControl::new("Send Message");
        control.begin();

        assert!(control.is_disabled());
        assert_eq!(control.label(), SENDING_LABEL);
    }

    #[test]
    fn rejected_submission_restores_control_and_keeps_fields() {
        let mut control = SubmitControl::new("Send Message");
        control.begin();

        let outcome = SubmitOutcome::from_response(Some(false));
        control.finish();
        assert_eq!(outcome, SubmitOutcome::Failed);
        assert!(!outcome.clears_form());
        assert_eq!(outcome.message(), FAILED_MESSAGE);
        assert!(!control.is_disabled());
        assert_eq!(control.label(), "Send Message");
    }

    #[test]
    fn network_error_is_a_failure() {
        assert_eq!(SubmitOutcome::from_response(None), SubmitOutcome::Failed);
    }

    #[test]
    fn accepted_submission_clears_fields_and_reenables() {
        let mut control = SubmitControl::new("Send");
        control.begin();

        let outcome = SubmitOutcome::from_response(Some(true));
        control.finish();
        assert!(outcome.clears_form());
        assert_eq!(outcome.message(), SENT_MESSAGE);
        assert!(!control.is_disabled());
        assert_eq!(control.label(), "Send");
    }

    #[test]
    fn finishing_twice_keeps_the_original_label() {
        let mut control = SubmitControl::new("Send Message");
        control.begin();
        control.finish();
        control.finish();

        assert_eq!(control, SubmitControl::new("Send Message"));
    }
}
