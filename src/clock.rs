use std::cell::Cell;
use std::sync::LazyLock;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

pub static START_TIME: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Source of the nanosecond timestamps fed to a window.
pub trait Clock {
    fn now_nanos(&self) -> u64;
}

/// Wall clock, nanoseconds since the UNIX epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline(always)]
    fn now_nanos(&self) -> u64 {
        // A clock set before 1970 reads as the epoch.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }
}

/// Monotonic clock, nanoseconds since the first time any `MonotonicClock`
/// was read in this process.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    #[inline(always)]
    fn now_nanos(&self) -> u64 {
        START_TIME.elapsed().as_nanos() as u64
    }
}

/// Synthetic clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_nanos: u64) -> Self {
        Self {
            now: Cell::new(start_nanos),
        }
    }

    pub fn set(&self, nanos: u64) {
        self.now.set(nanos);
    }

    pub fn advance(&self, nanos: u64) -> u64 {
        let now = self.now.get().saturating_add(nanos);
        self.now.set(now);
        now
    }
}

impl Clock for ManualClock {
    fn now_nanos(&self) -> u64 {
        self.now.get()
    }
}
