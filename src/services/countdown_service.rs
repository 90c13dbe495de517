use chrono::Utc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Active { remaining_secs: i64 },
    Expired,
}

impl CountdownState {
    /// `HH:MM:SS` remaining, or the literal `EXPIRED`.
    pub fn label(&self) -> String {
        match self {
            CountdownState::Expired => "EXPIRED".to_string(),
            CountdownState::Active { remaining_secs } => {
                let hours = remaining_secs / 3600;
                let minutes = (remaining_secs % 3600) / 60;
                let seconds = remaining_secs % 60;
                format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
            }
        }
    }
}

/// Countdown toward a payload's `exp`. The Active -> Expired transition is
/// one-way for the lifetime of the value, even if the clock moves backwards;
/// a fresh decode is needed for a fresh countdown.
#[derive(Debug, Clone)]
pub struct PaymentCountdown {
    exp: i64,
    expired: bool,
}

impl PaymentCountdown {
    pub fn new(exp: i64) -> Self {
        Self {
            exp,
            expired: false,
        }
    }

    pub fn tick(&mut self, now: i64) -> CountdownState {
        if self.expired || now >= self.exp {
            self.expired = true;
            return CountdownState::Expired;
        }
        CountdownState::Active {
            remaining_secs: self.exp - now,
        }
    }

    pub fn tick_now(&mut self) -> CountdownState {
        self.tick(Utc::now().timestamp())
    }
}
