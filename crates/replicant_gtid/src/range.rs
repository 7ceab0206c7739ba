//! Inclusive transaction number ranges.

use crate::error::{parse_number, GtidError, GtidResult};
use std::fmt;
use std::str::FromStr;

/// An inclusive range of transaction numbers, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GtidRange {
    start: u64,
    end: u64,
}

impl GtidRange {
    /// Creates a range.
    ///
    /// # Errors
    ///
    /// Returns [`GtidError::InvertedRange`] if `start > end`.
    pub fn new(start: u64, end: u64) -> GtidResult<Self> {
        if start > end {
            return Err(GtidError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a range holding a single number.
    #[must_use]
    pub const fn single(n: u64) -> Self {
        Self { start: n, end: n }
    }

    /// First number of the range.
    #[must_use]
    pub const fn start(&self) -> u64 {
        self.start
    }

    /// Last number of the range.
    #[must_use]
    pub const fn end(&self) -> u64 {
        self.end
    }

    /// Number of transactions in the range, saturating at `u64::MAX`.
    #[must_use]
    pub const fn len(&self) -> u64 {
        (self.end - self.start).saturating_add(1)
    }

    /// Always `false`; a range holds at least one number.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Returns `true` if `n` lies in the range.
    #[must_use]
    pub const fn contains(&self, n: u64) -> bool {
        self.start <= n && n <= self.end
    }

    /// Returns `true` if every number of `other` lies in this range.
    #[must_use]
    pub const fn covers(&self, other: &GtidRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl fmt::Display for GtidRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

impl FromStr for GtidRange {
    type Err = GtidError;

    /// Parses `n` or `lo-hi`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut bounds = s.split('-');
        let start = bounds.next().unwrap_or_default();
        let end = bounds.next();
        if bounds.next().is_some() || start.trim().is_empty() {
            return Err(GtidError::malformed_range(s));
        }
        let start = parse_number(start)?;
        match end {
            None => Ok(Self::single(start)),
            Some(end) if end.trim().is_empty() => Err(GtidError::malformed_range(s)),
            Some(end) => Self::new(start, parse_number(end)?),
        }
    }
}

/// Brings `ranges` into normal form: sorted, disjoint and non-adjacent.
///
/// Ranges are sorted by `(start, end)` and folded left to right; the next
/// range is merged into the accumulator when it starts at or before
/// `accumulator.end + 1`.
#[must_use]
pub fn normalize(mut ranges: Vec<GtidRange>) -> Vec<GtidRange> {
    ranges.sort_unstable();
    let mut out: Vec<GtidRange> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match out.last_mut() {
            Some(acc) if range.start <= acc.end.saturating_add(1) => {
                acc.end = acc.end.max(range.end);
            }
            _ => out.push(range),
        }
    }
    out
}

/// Returns `true` if `ranges` is in normal form.
#[must_use]
pub fn is_normalized(ranges: &[GtidRange]) -> bool {
    ranges
        .windows(2)
        .all(|w| w[0].end.saturating_add(1) < w[1].start)
}
