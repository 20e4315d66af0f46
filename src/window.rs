use crate::bucket::{Bucket, BucketView};
use crate::error::WindowError;
use crate::options::WindowOptions;
use bytemuck::{Pod, Zeroable};
use spdlog::debug;
use std::time::Duration;

/// Point-in-time aggregate of a whole window.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct WindowStats {
    pub count: u64,
    pub sum: f64,
    /// NaN when `count == 0`.
    pub average: f64,
    /// `+inf` when the window is empty.
    pub min: f64,
    /// `-inf` when the window is empty.
    pub max: f64,
}

/// Rolling count/sum/average/min/max over the most recent `period`.
///
/// Time is split into `bucket_count` buckets of `ceil(period / bucket_count)`
/// nanoseconds each, stored in a ring indexed by `sequence % bucket_count`,
/// where `sequence = now / bucket_duration`. Every operation that takes a
/// `now` first rotates the ring, resetting any bucket whose sequence number
/// is behind the one its slot should hold at `now`.
///
/// Timestamps are nanosecond tick counts chosen by the caller; the window
/// never reads a clock. It is not synchronized: wrap it in a mutex or keep
/// it on a single owning thread.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    bucket_nanos: u64,
    period_nanos: u64,
    buckets: Box<[Bucket]>,
    total_sum: f64,
    total_count: u64,
    late_samples: u64,
}

impl SlidingWindow {
    /// Creates a window covering at least `period` with `bucket_count` buckets.
    ///
    /// # Panics
    /// If `bucket_count` or `period` is zero, or the rounded period does not
    /// fit in `u64` nanoseconds. Use [`SlidingWindow::try_new`] to handle these.
    pub fn new(period: Duration, bucket_count: usize) -> Self {
        assert!(bucket_count > 0, "bucket_count must be greater than 0");
        match Self::try_new(period, bucket_count) {
            Ok(window) => window,
            Err(e) => panic!("invalid sliding window: {e}"),
        }
    }

    pub fn try_new(period: Duration, bucket_count: usize) -> Result<Self, WindowError> {
        if bucket_count == 0 {
            return Err(WindowError::ZeroBuckets);
        }
        if period.is_zero() {
            return Err(WindowError::ZeroPeriod);
        }

        let overflow = WindowError::PeriodOverflow {
            period_nanos: period.as_nanos(),
            buckets: bucket_count,
        };
        let requested = u64::try_from(period.as_nanos()).map_err(|_| overflow)?;
        let buckets = bucket_count as u64;
        let bucket_nanos = requested.div_ceil(buckets);
        let period_nanos = bucket_nanos.checked_mul(buckets).ok_or(overflow)?;

        Ok(Self {
            bucket_nanos,
            period_nanos,
            buckets: vec![Bucket::EMPTY; bucket_count].into_boxed_slice(),
            total_sum: 0.0,
            total_count: 0,
            late_samples: 0,
        })
    }

    pub fn with_options(options: WindowOptions) -> Result<Self, WindowError> {
        Self::try_new(options.period, options.buckets)
    }

    #[inline(always)]
    fn slot_of(&self, sequence: u64) -> usize {
        (sequence % self.buckets.len() as u64) as usize
    }

    /// Rotates the ring up to `now` and returns the sequence number `now`
    /// falls into.
    ///
    /// Walks backwards from the target slot, resetting stale buckets, and
    /// stops at the first bucket that is already current. Steady traffic
    /// touches one or two buckets; a jump of a full period or more touches
    /// all of them.
    pub fn advance(&mut self, now: u64) -> u64 {
        let target_seq = now / self.bucket_nanos;
        let len = self.buckets.len();
        let target_slot = self.slot_of(target_seq);

        let mut expected_seq = target_seq;
        for step in 0..len {
            let slot = (target_slot + len - step) % len;
            let bucket = &mut self.buckets[slot];
            if bucket.sequence_number >= expected_seq {
                return target_seq;
            }

            self.total_sum -= bucket.sum;
            self.total_count -= bucket.count;
            bucket.reset(expected_seq);
            // expected_seq > sequence_number >= 0 here, so this cannot underflow.
            expected_seq -= 1;
        }

        // Every bucket was stale: the window is empty, drop accumulated drift.
        if self.total_sum != 0.0 {
            debug!(
                "full rotation at sequence {}, discarding residual sum {}",
                target_seq, self.total_sum
            );
        }
        self.total_sum = 0.0;
        target_seq
    }

    /// Expires stale buckets without recording a sample.
    #[inline]
    pub fn touch(&mut self, now: u64) {
        self.advance(now);
    }

    /// Folds `value` into the bucket `now` falls into.
    ///
    /// Samples older than the oldest bucket the ring holds for `now` are
    /// dropped silently; [`SlidingWindow::late_samples`] counts them.
    pub fn add_sample(&mut self, now: u64, value: f64) {
        let target_seq = self.advance(now);
        let slot = self.slot_of(target_seq);
        let bucket = &mut self.buckets[slot];
        if bucket.sequence_number != target_seq {
            self.late_samples += 1;
            debug!(
                "dropping late sample {} at sequence {}, slot holds {}",
                value, target_seq, bucket.sequence_number
            );
            return;
        }

        bucket.fold(value);
        self.total_sum += value;
        self.total_count += 1;
    }

    pub fn count(&self) -> u64 {
        self.total_count
    }

    pub fn sum(&self) -> f64 {
        self.total_sum
    }

    /// NaN when the window holds no samples.
    pub fn average(&self) -> f64 {
        self.total_sum / self.total_count as f64
    }

    /// Smallest sample across all buckets, `+inf` when empty.
    pub fn min(&self) -> f64 {
        self.buckets
            .iter()
            .fold(f64::INFINITY, |acc, bucket| acc.min(bucket.min))
    }

    /// Largest sample across all buckets, `-inf` when empty.
    pub fn max(&self) -> f64 {
        self.buckets
            .iter()
            .fold(f64::NEG_INFINITY, |acc, bucket| acc.max(bucket.max))
    }

    /// The realized span, `bucket_duration * bucket_count`.
    pub fn period(&self) -> Duration {
        Duration::from_nanos(self.period_nanos)
    }

    pub fn bucket_duration(&self) -> Duration {
        Duration::from_nanos(self.bucket_nanos)
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of samples discarded because they arrived behind the window.
    pub fn late_samples(&self) -> u64 {
        self.late_samples
    }

    /// Left fold over the buckets in ring order.
    pub fn reduce<A>(&self, initial: A, mut combine: impl FnMut(A, BucketView) -> A) -> A {
        self.buckets
            .iter()
            .fold(initial, |acc, bucket| combine(acc, bucket.view()))
    }

    pub fn stats(&self) -> WindowStats {
        WindowStats {
            count: self.total_count,
            sum: self.total_sum,
            average: self.average(),
            min: self.min(),
            max: self.max(),
        }
    }

    /// Sum of the bucket sums, computed from scratch.
    pub fn recompute_sum(&self) -> f64 {
        self.buckets.iter().map(|bucket| bucket.sum).sum()
    }

    /// Replaces the running sum with [`SlidingWindow::recompute_sum`],
    /// discarding any rounding error picked up by incremental updates.
    pub fn resync_sum(&mut self) {
        self.total_sum = self.recompute_sum();
    }

    pub(crate) fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }
}
