//! Byte spans into expression text.

use std::fmt;

/// Half-open byte range into the parsed text.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Create a new span.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Create from a byte range, saturating at `u32::MAX`.
    ///
    /// Clause text longer than 4GB only loses diagnostic precision.
    #[inline]
    pub fn from_range(range: std::ops::Range<usize>) -> Self {
        Span {
            start: u32::try_from(range.start).unwrap_or(u32::MAX),
            end: u32::try_from(range.end).unwrap_or(u32::MAX),
        }
    }

    /// Zero-width span at `pos`.
    #[inline]
    pub fn point(pos: usize) -> Self {
        Self::from_range(pos..pos)
    }

    /// Length in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` for a zero-width span.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `other` starts exactly where `self` ends.
    #[inline]
    pub const fn touches(&self, other: Span) -> bool {
        self.end == other.start
    }

    /// Smallest span covering both.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
