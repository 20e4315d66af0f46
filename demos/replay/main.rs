use clap::Parser;
use roda_window::{SlidingWindow, WindowOptions, WindowReporter};
use spdlog::prelude::*;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::time::Duration;

/// Replays `<timestamp_ns> <value>` lines through a sliding window.
#[derive(Parser)]
struct Args {
    /// Input file; stdin when omitted.
    #[arg(long)]
    file: Option<PathBuf>,
    /// Window span in milliseconds.
    #[arg(long, default_value_t = 60_000)]
    period_ms: u64,
    #[arg(long, default_value_t = 60)]
    buckets: usize,
    /// Minimum spacing between report lines, in milliseconds.
    #[arg(long, default_value_t = 10_000)]
    report_ms: u64,
}

fn parse_line(line: &str) -> Option<(u64, f64)> {
    let mut fields = line.split_whitespace();
    let now = fields.next()?.parse().ok()?;
    let value = fields.next()?.parse().ok()?;
    Some((now, value))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut window = SlidingWindow::with_options(WindowOptions {
        period: Duration::from_millis(args.period_ms),
        buckets: args.buckets,
    })?;
    let mut reporter = WindowReporter::new("replay", Duration::from_millis(args.report_ms));

    info!(
        "[Replay] Window of {:?} in {} buckets of {:?}",
        window.period(),
        window.bucket_count(),
        window.bucket_duration()
    );

    let input: Box<dyn BufRead> = match &args.file {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut last_now = 0;
    let mut skipped = 0u64;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((now, value)) = parse_line(&line) else {
            skipped += 1;
            warn!("[Replay] Skipping malformed line: {:?}", line);
            continue;
        };
        window.add_sample(now, value);
        reporter.maybe_report(now, &window);
        last_now = last_now.max(now);
    }

    window.touch(last_now);
    info!(
        "[Replay] Done. late samples: {}, malformed lines: {}",
        window.late_samples(),
        skipped
    );
    print!("{}", window.dump_to_string(""));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("1000 2.5"), Some((1000, 2.5)));
        assert_eq!(parse_line("  7\t-1 extra"), Some((7, -1.0)));
        assert_eq!(parse_line("abc 1"), None);
        assert_eq!(parse_line("12"), None);
    }
}
