//! Iteration-domain segments.

use std::fmt;
use std::ops::Range;

/// A half-open index range `[begin, end)`.
///
/// Immutable once constructed; the engine borrows it read-only for the
/// duration of one launch, and every lane may read it concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    begin: i64,
    end: i64,
}

impl Segment {
    /// Create a segment over `[begin, end)`.
    pub const fn new(begin: i64, end: i64) -> Self {
        Self { begin, end }
    }

    /// First index of the segment.
    pub const fn begin(&self) -> i64 {
        self.begin
    }

    /// One past the last index.
    pub const fn end(&self) -> i64 {
        self.end
    }

    /// Number of indices, zero when `end <= begin`.
    pub const fn len(&self) -> i64 {
        if self.end > self.begin {
            self.end - self.begin
        } else {
            0
        }
    }

    /// Whether the segment holds no indices.
    pub const fn is_empty(&self) -> bool {
        self.end <= self.begin
    }
}

impl From<Range<i64>> for Segment {
    fn from(r: Range<i64>) -> Self {
        Self::new(r.start, r.end)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.begin, self.end)
    }
}
