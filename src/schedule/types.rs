use chrono::{DateTime, NaiveTime, TimeDelta};
use chrono_tz::Tz;
use std::time::Duration;

use crate::utils::timezone::local_datetime;

/// Interval between two daily checks
pub fn daily_interval() -> TimeDelta {
    TimeDelta::hours(24)
}

/// Trigger state of the daily scheduler
///
/// `next_fire_at` only ever moves forward by whole 24 hour steps, so wake-up
/// jitter never accumulates. Missed days are not caught up one by one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerSchedule {
    reference_now: DateTime<Tz>,
    next_fire_at: DateTime<Tz>,
}

impl TriggerSchedule {
    /// Today's trigger time, or tomorrow's when it is not strictly in the future
    pub fn new(now: DateTime<Tz>, trigger_time: NaiveTime) -> Self {
        let mut next_fire_at = local_datetime(&now.timezone(), now.date_naive(), trigger_time);
        if next_fire_at <= now {
            next_fire_at += daily_interval();
        }

        Self {
            reference_now: now,
            next_fire_at,
        }
    }

    pub fn reference_now(&self) -> DateTime<Tz> {
        self.reference_now
    }

    pub fn next_fire_at(&self) -> DateTime<Tz> {
        self.next_fire_at
    }

    /// Time left until the next trigger (zero when already due)
    pub fn wait_duration(&self, now: DateTime<Tz>) -> Duration {
        (self.next_fire_at - now).to_std().unwrap_or(Duration::ZERO)
    }

    /// Arm the next trigger exactly 24 hours after the previous one
    pub fn advance(&mut self) {
        self.next_fire_at += daily_interval();
    }

    /// Drop triggers dated before `now`'s local day. Afterwards the next
    /// trigger is today's (possibly still ahead) or a later one, so a late
    /// wake-up never runs a check for a past date. Returns how many were dropped.
    pub fn skip_missed(&mut self, now: DateTime<Tz>) -> u32 {
        let mut skipped = 0;
        while self.next_fire_at.date_naive() < now.date_naive() {
            self.next_fire_at += daily_interval();
            skipped += 1;
        }
        skipped
    }
}
