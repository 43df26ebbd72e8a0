/// Clock capability injected into the scheduler and the birthday service
use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;

/// Source of the current time in the bot's configured timezone
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Tz>;

    fn current_month(&self) -> u32 {
        self.now().month()
    }

    fn current_day(&self) -> u32 {
        self.now().day()
    }
}

/// Wall clock in a fixed timezone
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    timezone: Tz,
}

impl SystemClock {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.timezone)
    }
}

/// Clock pinned to a single instant
#[cfg(test)]
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub DateTime<Tz>);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Tz> {
        self.0
    }
}
