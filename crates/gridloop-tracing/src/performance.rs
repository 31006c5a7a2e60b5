//! Performance-focused tracing utilities.
//!
//! Provides an RAII span that measures wall-clock duration and logs it on
//! drop, with optional threshold filtering so hot paths stay quiet unless
//! they are actually slow.

use std::time::Instant;

/// RAII guard that measures span duration and conditionally logs based on threshold.
///
/// The span is timed when created and logged when dropped, but only if the
/// duration exceeds the optional threshold.
///
/// # Example
///
/// ```rust
/// use gridloop_tracing::performance::PerformanceSpan;
///
/// {
///     let _span = PerformanceSpan::new("grid_launch", Some(1000));
///     // ... operation code ...
/// } // Span logged only if duration > 1000μs
/// ```
pub struct PerformanceSpan {
    name: String,
    threshold_us: Option<u64>,
    start: Instant,
}

impl PerformanceSpan {
    /// Create a new performance span with optional threshold filtering.
    ///
    /// `threshold_us` is the minimum duration in microseconds to log;
    /// `None` always logs.
    pub fn new(name: impl Into<String>, threshold_us: Option<u64>) -> Self {
        Self {
            name: name.into(),
            threshold_us,
            start: Instant::now(),
        }
    }

    /// Elapsed time since span creation, in microseconds.
    pub fn elapsed_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }
}

impl Drop for PerformanceSpan {
    fn drop(&mut self) {
        let duration_us = self.elapsed_us();
        if let Some(threshold) = self.threshold_us {
            if duration_us < threshold {
                return;
            }
        }
        tracing::debug!(
            name = %self.name,
            duration_us = duration_us,
            "perf_span_complete"
        );
    }
}
