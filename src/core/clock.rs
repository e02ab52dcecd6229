//! Wall-clock access behind a trait so hour-dependent behaviour is testable.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use std::sync::Mutex;

pub trait Clock: Send + Sync {
    /// Current local wall time.
    fn now(&self) -> NaiveDateTime;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock pinned to a settable instant.
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// A fixed weekday at `hour:minute`.
    pub fn at(hour: u32, minute: u32) -> Self {
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap_or_default();
        let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default();
        Self::new(date.and_time(time))
    }

    pub fn set(&self, now: NaiveDateTime) {
        if let Ok(mut guard) = self.now.lock() {
            *guard = now;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        match self.now.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
