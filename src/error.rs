use thiserror::Error;

/// Reasons a [`SlidingWindow`](crate::SlidingWindow) cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WindowError {
    #[error("bucket count must be greater than 0")]
    ZeroBuckets,
    #[error("period must be greater than 0")]
    ZeroPeriod,
    #[error("period of {period_nanos}ns over {buckets} buckets does not fit in u64 nanoseconds")]
    PeriodOverflow { period_nanos: u128, buckets: usize },
}
