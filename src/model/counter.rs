/// Increments from zero to the target
pub const COUNTER_STEPS: f64 = 50.0;
pub const COUNTER_INTERVAL_MS: i32 = 40;

/// Text that describes availability rather than a count
const NON_COUNTABLE: &str = "24/7";

/// Count-up animation for a statistic such as "500+" or "98%"
#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    target: u64,
    suffix: String,
    current: f64,
    increment: f64,
    finished: bool,
}

impl CounterAnimation {
    /// Split `text` into a numeric target and a suffix.
    ///
    /// Returns `None` for text that should keep its original value.
    pub fn parse(text: &str) -> Option<Self> {
        if text.contains(NON_COUNTABLE) {
            return None;
        }
        let digits: String = text.chars().filter(char::is_ascii_digit).collect();
        let target: u64 = digits.parse().ok()?;
        let suffix: String = text.chars().filter(|c| !c.is_ascii_digit()).collect();

        Some(Self {
            target,
            suffix,
            current: 0.0,
            increment: target as f64 / COUNTER_STEPS,
            finished: false,
        })
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance one interval and return the text to display
    pub fn step(&mut self) -> String {
        self.current += self.increment;
        if self.current >= self.target as f64 {
            self.finished = true;
            format!("{}{}", self.target, self.suffix)
        } else {
            format!("{}{}", self.current.floor() as u64, self.suffix)
        }
    }
}
