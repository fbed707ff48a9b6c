//! Deterministic clocks for integration tests.

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::atomic::{AtomicI64, Ordering};

/// Clock that advances by a fixed step on every reading.
///
/// A zero step yields the same instant forever, which forces identifier
/// tie-breaks in ordering tests.
#[derive(Debug)]
pub struct SteppingClock {
    start: DateTime<Utc>,
    step: Duration,
    ticks: AtomicI64,
}

impl SteppingClock {
    /// Creates a clock whose first reading is `start`.
    pub const fn new(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            start,
            step,
            ticks: AtomicI64::new(0),
        }
    }

    /// Creates a clock starting at 2024-03-07 08:05 UTC, stepping one minute.
    pub fn per_minute() -> Self {
        Self::new(board_epoch(), Duration::minutes(1))
    }

    /// Creates a clock that always reads 2024-03-07 08:05 UTC.
    pub fn frozen() -> Self {
        Self::new(board_epoch(), Duration::zero())
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        let offset = i32::try_from(tick).map_or(self.step, |count| self.step * count);
        self.start + offset
    }
}

/// First instant handed out by the test clocks.
pub fn board_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 7, 8, 5, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}
