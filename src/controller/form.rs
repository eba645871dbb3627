use crate::error::{SiteError, SiteResult};

/// Simulated round trip before the outcome is known
pub const SUBMIT_DELAY_MS: i32 = 1500;
/// Share of simulated submissions that fail
pub const FAILURE_RATE: f64 = 0.1;

pub const SENDING_LABEL: &str = "Sending...";

pub const MESSAGE_SLIDE_IN_MS: i32 = 100;
pub const MESSAGE_VISIBLE_MS: i32 = 5000;
pub const MESSAGE_SLIDE_OUT_MS: i32 = 300;

const SUCCESS_TEXT: &str =
    "Thank you! Your message has been sent successfully. We'll get back to you soon.";
const ERROR_TEXT: &str =
    "Sorry, there was an error sending your message. Please try again or call us directly.";

/// Decide a simulated submission from a uniform roll in [0, 1)
pub fn simulate_outcome(roll: f64) -> SiteResult<()> {
    if roll > FAILURE_RATE {
        Ok(())
    } else {
        Err(SiteError::SubmissionFailed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

/// Toast shown after a submission settles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMessage {
    pub kind: MessageKind,
    pub text: &'static str,
}

impl FormMessage {
    pub fn for_outcome(outcome: &SiteResult<()>) -> Self {
        match outcome {
            Ok(()) => Self { kind: MessageKind::Success, text: SUCCESS_TEXT },
            Err(_) => Self { kind: MessageKind::Error, text: ERROR_TEXT },
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self.kind {
            MessageKind::Success => "form-message form-message--success",
            MessageKind::Error => "form-message form-message--error",
        }
    }

    pub fn background(&self) -> &'static str {
        match self.kind {
            MessageKind::Success => "#10b981",
            MessageKind::Error => "#ef4444",
        }
    }

    /// Inline styles for the toast, starting off-screen to the right
    pub fn styles(&self) -> [(&'static str, &'static str); 13] {
        [
            ("position", "fixed"),
            ("top", "100px"),
            ("right", "20px"),
            ("padding", "15px 20px"),
            ("border-radius", "8px"),
            ("color", "white"),
            ("font-weight", "500"),
            ("z-index", "9999"),
            ("max-width", "400px"),
            ("box-shadow", "0 4px 12px rgba(0,0,0,0.15)"),
            ("background", self.background()),
            ("transform", "translateX(100%)"),
            ("transition", "transform 0.3s ease-in-out"),
        ]
    }
}

/// Submit button lifecycle: label swap while a submission is in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitButton {
    Idle,
    Sending { original_label: String },
}

impl SubmitButton {
    /// Enter the sending state, returning the label to display
    pub fn begin(&mut self, current_label: String) -> &'static str {
        *self = SubmitButton::Sending { original_label: current_label };
        SENDING_LABEL
    }

    /// Leave the sending state, returning the label to restore
    pub fn finish(&mut self) -> Option<String> {
        match std::mem::replace(self, SubmitButton::Idle) {
            SubmitButton::Sending { original_label } => Some(original_label),
            SubmitButton::Idle => None,
        }
    }

    pub fn is_sending(&self) -> bool {
        matches!(self, SubmitButton::Sending { .. })
    }
}
