pub const ACTIVE_TOUCH_CLASS: &str = "active-touch";
/// How long the highlight lingers after the finger lifts
pub const HIGHLIGHT_LINGER_MS: f64 = 2000.0;

/// `active-touch` highlight on the logo, timed by frame deltas
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TouchHighlight {
    active: bool,
    remaining_ms: Option<f64>,
}

impl TouchHighlight {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Show the highlight and cancel any pending removal
    pub fn press(&mut self) {
        self.active = true;
        self.remaining_ms = None;
    }

    /// Schedule removal after the linger period
    pub fn release(&mut self) {
        if self.active {
            self.remaining_ms = Some(HIGHLIGHT_LINGER_MS);
        }
    }

    /// Press and immediately schedule removal (desktop click)
    pub fn flash(&mut self) {
        self.press();
        self.release();
    }

    /// Count down; returns true when the highlight was just removed
    pub fn advance(&mut self, delta_ms: f64) -> bool {
        let Some(remaining) = self.remaining_ms.as_mut() else {
            return false;
        };
        *remaining -= delta_ms;
        if *remaining <= 0.0 {
            self.active = false;
            self.remaining_ms = None;
            return true;
        }
        false
    }
}
