use std::sync::{Arc, PoisonError, RwLock};

use kernel::interface::clock::Clock;
use time::{Date, Duration, OffsetDateTime};

/// Calendar date in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Date {
        OffsetDateTime::now_utc().date()
    }
}

/// A clock that only moves when told to. Clones share the same date.
#[derive(Debug, Clone)]
pub struct FixedClock(Arc<RwLock<Date>>);

impl FixedClock {
    pub fn new(today: Date) -> Self {
        Self(Arc::new(RwLock::new(today)))
    }

    pub fn set(&self, today: Date) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = today;
    }

    pub fn advance(&self, days: i64) {
        let mut today = self.0.write().unwrap_or_else(PoisonError::into_inner);
        *today = today.saturating_add(Duration::days(days));
    }
}

impl Clock for FixedClock {
    fn today(&self) -> Date {
        *self.0.read().unwrap_or_else(PoisonError::into_inner)
    }
}
