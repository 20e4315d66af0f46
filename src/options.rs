use std::time::Duration;

/// Shape of a [`SlidingWindow`](crate::SlidingWindow).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowOptions {
    /// Requested span. The realized span is rounded up to a whole number of
    /// nanoseconds per bucket.
    pub period: Duration,
    /// Number of buckets in the ring. Never changes after construction.
    pub buckets: usize,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(60),
            buckets: 60,
        }
    }
}
