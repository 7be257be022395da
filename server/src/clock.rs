use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use shared::Day;

/// Source of "today" for the service. The engine itself never reads the
/// clock.
pub trait Clock: Send + Sync {
    fn today(&self) -> Day;

    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Day {
        shared::local_today()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a day. Every call to `now` moves one second forward so
/// creation order stays observable.
#[derive(Debug)]
pub struct FixedClock {
    today: RwLock<Day>,
    ticks: AtomicI64,
}

impl FixedClock {
    pub fn new(today: Day) -> Self {
        Self {
            today: RwLock::new(today),
            ticks: AtomicI64::new(0),
        }
    }

    pub fn set_today(&self, today: Day) {
        *self.today.write().unwrap_or_else(|e| e.into_inner()) = today;
    }
}

impl Clock for FixedClock {
    fn today(&self) -> Day {
        *self.today.read().unwrap_or_else(|e| e.into_inner())
    }

    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::Relaxed);
        self.today().and_time(Default::default()).and_utc() + Duration::seconds(tick)
    }
}
