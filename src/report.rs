use crate::window::{SlidingWindow, WindowStats};
use spdlog::info;
use std::time::Duration;

/// Logs a window's stats at most once per interval.
///
/// The reporter is polled with the same timestamps the window is fed, so it
/// runs on synthetic clocks as well as real ones.
pub struct WindowReporter {
    name: String,
    interval_nanos: u64,
    last_report: Option<u64>,
    last_stats: Option<WindowStats>,
}

impl WindowReporter {
    pub fn new(name: impl Into<String>, interval: Duration) -> Self {
        assert!(!interval.is_zero(), "interval must be greater than 0");
        Self {
            name: name.into(),
            interval_nanos: interval.as_nanos().min(u64::MAX as u128) as u64,
            last_report: None,
            last_stats: None,
        }
    }

    /// Emits one line if the interval has elapsed since the last one.
    /// Returns whether a line was emitted.
    pub fn maybe_report(&mut self, now: u64, window: &SlidingWindow) -> bool {
        if let Some(last) = self.last_report
            && now.saturating_sub(last) < self.interval_nanos
        {
            return false;
        }

        let stats = window.stats();
        info!("[{}] {}", self.name, format_stats(&stats));
        self.last_report = Some(now);
        self.last_stats = Some(stats);
        true
    }

    /// Stats carried by the most recent line.
    pub fn last_stats(&self) -> Option<WindowStats> {
        self.last_stats
    }
}

pub fn format_stats(stats: &WindowStats) -> String {
    if stats.count == 0 {
        return "No samples in window".into();
    }

    format!(
        "count={}, sum={}, avg={}, min={}, max={}",
        format_count(stats.count as f64),
        format_count(stats.sum),
        format_count(stats.average),
        format_count(stats.min),
        format_count(stats.max),
    )
}

fn format_count(val: f64) -> String {
    let (sign, abs) = if val < 0.0 { ("-", -val) } else { ("", val) };
    if abs < 1000.0 {
        if abs == abs.floor() {
            format!("{}{:.0}", sign, abs)
        } else {
            format!("{}{:.2}", sign, abs)
        }
    } else if abs < 1_000_000.0 {
        format!("{}{:.2}k", sign, abs / 1000.0)
    } else if abs < 1_000_000_000.0 {
        format!("{}{:.2}m", sign, abs / 1_000_000.0)
    } else if abs < 1_000_000_000_000.0 {
        format!("{}{:.2}b", sign, abs / 1_000_000_000.0)
    } else {
        format!("{}{:.2}t", sign, abs / 1_000_000_000_000.0)
    }
}
