use bytemuck::{Pod, Zeroable};

/// One slot of the ring: the aggregate of every sample whose timestamp fell
/// into the bucket-duration-wide interval numbered `sequence_number`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Bucket {
    pub(crate) sequence_number: u64,
    pub(crate) sum: f64,
    pub(crate) count: u64,
    pub(crate) min: f64,
    pub(crate) max: f64,
}

impl Bucket {
    pub(crate) const EMPTY: Bucket = Bucket {
        sequence_number: 0,
        sum: 0.0,
        count: 0,
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };

    #[inline(always)]
    pub(crate) fn reset(&mut self, sequence_number: u64) {
        *self = Bucket {
            sequence_number,
            ..Self::EMPTY
        };
    }

    #[inline(always)]
    pub(crate) fn fold(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    #[inline(always)]
    pub(crate) fn view(&self) -> BucketView {
        BucketView {
            sum: self.sum,
            count: self.count,
            min: self.min,
            max: self.max,
        }
    }
}

/// Read-only aggregate of a single bucket, as handed to
/// [`SlidingWindow::reduce`](crate::SlidingWindow::reduce).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct BucketView {
    pub sum: f64,
    pub count: u64,
    /// `+inf` when the bucket is empty.
    pub min: f64,
    /// `-inf` when the bucket is empty.
    pub max: f64,
}

impl BucketView {
    /// Mean of the bucket's samples, NaN when it holds none.
    #[inline(always)]
    pub fn average(&self) -> f64 {
        self.sum / self.count as f64
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[cfg(test)]
mod bucket_tests {
    use super::*;

    #[test]
    fn test_fold_and_reset() {
        let mut bucket = Bucket::EMPTY;
        bucket.fold(3.0);
        bucket.fold(-1.5);
        bucket.fold(7.0);

        let view = bucket.view();
        assert_eq!(view.count, 3);
        assert_eq!(view.sum, 8.5);
        assert_eq!(view.min, -1.5);
        assert_eq!(view.max, 7.0);

        bucket.reset(42);
        assert_eq!(bucket.sequence_number, 42);
        assert!(bucket.view().is_empty());
        assert_eq!(bucket.min, f64::INFINITY);
        assert_eq!(bucket.max, f64::NEG_INFINITY);
    }

    #[test]
    fn test_empty_view_average_is_nan() {
        assert!(Bucket::EMPTY.view().average().is_nan());
    }

    #[test]
    fn test_view_is_plain_bytes() {
        let mut bucket = Bucket::EMPTY;
        bucket.fold(2.0);
        let view = bucket.view();
        let bytes = bytemuck::bytes_of(&view);
        assert_eq!(bytes.len(), 32);
        let back: BucketView = bytemuck::pod_read_unaligned(bytes);
        assert_eq!(back, view);
    }
}
