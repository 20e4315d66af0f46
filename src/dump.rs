use crate::bucket::Bucket;
use crate::window::SlidingWindow;
use std::fmt::{self, Display, Formatter, Write};

impl SlidingWindow {
    /// Writes the full internal state, one field per line, each line
    /// starting with `prefix`. Buckets are listed in ring order.
    ///
    /// Meant for debugging and test assertions, not as a stable format.
    pub fn dump(&self, prefix: &str, out: &mut impl Write) -> fmt::Result {
        writeln!(out, "{prefix}Period Per Bucket: {:?}", self.bucket_duration())?;
        writeln!(out, "{prefix}Period: {:?}", self.period())?;
        let bucket_prefix = format!("{prefix}\t");
        for (i, bucket) in self.buckets().iter().enumerate() {
            writeln!(out, "{prefix}Buckets[{i}]:")?;
            dump_bucket(bucket, &bucket_prefix, &mut *out)?;
        }
        writeln!(out, "{prefix}Total Sum: {}", self.sum())?;
        writeln!(out, "{prefix}Total Count: {}", self.count())
    }

    pub fn dump_to_string(&self, prefix: &str) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.dump(prefix, &mut out);
        out
    }
}

fn dump_bucket(bucket: &Bucket, prefix: &str, out: &mut impl Write) -> fmt::Result {
    writeln!(out, "{prefix}Number: {}", bucket.sequence_number)?;
    writeln!(out, "{prefix}Sum: {}", bucket.sum)?;
    writeln!(out, "{prefix}Count: {}", bucket.count)?;
    writeln!(out, "{prefix}Min: {}", bucket.min)?;
    writeln!(out, "{prefix}Max: {}", bucket.max)
}

impl Display for SlidingWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.dump("", f)
    }
}
