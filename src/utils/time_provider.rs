use chrono::{DateTime, Duration, Utc};

///
/// An overridable clock - used for tests.
///
/// Lockout windows and reset-code expiry are all evaluated against this clock, so
/// tests can time-travel rather than sleep.
///
#[derive(Debug)]
pub struct TimeProvider {
    fixed: Option<DateTime<Utc>>
}

impl TimeProvider {
    pub fn default() -> Self {
        TimeProvider { fixed: None }
    }

    pub fn now(&self) -> DateTime<Utc> {
        match self.fixed {
            Some(fixed) => fixed,
            None => Utc::now()
        }
    }

    pub fn fix(&mut self, fixed: Option<DateTime<Utc>>) {
        self.fixed = fixed;
    }

    ///
    /// Move a fixed clock forward. Has no effect unless the clock is fixed.
    ///
    pub fn advance(&mut self, duration: Duration) {
        if let Some(fixed) = self.fixed {
            self.fixed = Some(fixed + duration);
        }
    }
}
