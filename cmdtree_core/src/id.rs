// Copyright 2026 the Cmdtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Command identity and half-open id ranges.

use core::fmt;

/// The position of a single command in the captured stream.
///
/// Ids are dense and 0-based; the hierarchy only relies on their total order.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(pub u64);

impl Id {
    /// Returns the raw index.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the id `n` positions after this one, saturating at
    /// `u64::MAX`.
    #[inline]
    #[must_use]
    pub const fn offset(self, n: u64) -> Self {
        Self(self.0.saturating_add(n))
    }

    /// Returns the id `n` positions after this one, or `None` on overflow.
    #[inline]
    #[must_use]
    pub const fn checked_offset(self, n: u64) -> Option<Self> {
        match self.0.checked_add(n) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl From<u64> for Id {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.0)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A half-open interval `[start, end)` of command ids.
///
/// A range with `start == end` is empty: it is valid everywhere and contains
/// nothing. Constructors never produce `start > end`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Range {
    /// First id in the range.
    pub start: Id,
    /// One past the last id in the range.
    pub end: Id,
}

impl Range {
    /// The empty range at id 0.
    pub const EMPTY: Self = Self {
        start: Id(0),
        end: Id(0),
    };

    /// Creates the range `[start, end)`.
    ///
    /// If `end < start` the range is collapsed to empty at `start`.
    #[inline]
    #[must_use]
    pub const fn new(start: u64, end: u64) -> Self {
        let end = if end < start { start } else { end };
        Self {
            start: Id(start),
            end: Id(end),
        }
    }

    /// Creates the empty range positioned at `at`.
    #[inline]
    #[must_use]
    pub const fn empty_at(at: Id) -> Self {
        Self { start: at, end: at }
    }

    /// Number of ids in the range.
    #[inline]
    #[must_use]
    pub const fn len(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// Returns `true` if the range holds no ids.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.end.0 <= self.start.0
    }

    /// Returns `true` if `id` lies in `[start, end)`.
    #[inline]
    #[must_use]
    pub const fn contains(self, id: Id) -> bool {
        self.start.0 <= id.0 && id.0 < self.end.0
    }

    /// Returns `true` if every id of `other` lies in this range.
    ///
    /// An empty `other` is contained when its position lies in
    /// `[start, end]`.
    #[inline]
    #[must_use]
    pub const fn contains_range(self, other: Self) -> bool {
        self.start.0 <= other.start.0 && other.end.0 <= self.end.0
    }

    /// Returns `true` if the two ranges share at least one id.
    #[inline]
    #[must_use]
    pub const fn overlaps(self, other: Self) -> bool {
        self.start.0 < other.end.0 && other.start.0 < self.end.0
    }

    /// Returns the ids common to both ranges, or `None` if they are disjoint.
    #[must_use]
    pub fn intersection(self, other: Self) -> Option<Self> {
        self.overlaps(other).then(|| Self {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        })
    }

    /// Clamps `id` into the range.
    ///
    /// Ids below `start` map to `start`, ids at or past `end` map to the last
    /// id. An empty range clamps everything to `start`.
    #[inline]
    #[must_use]
    pub const fn clamp(self, id: Id) -> Id {
        if self.is_empty() || id.0 < self.start.0 {
            self.start
        } else if id.0 >= self.end.0 {
            Id(self.end.0 - 1)
        } else {
            id
        }
    }

    /// First id of the range, if any.
    #[inline]
    #[must_use]
    pub const fn first(self) -> Option<Id> {
        if self.is_empty() {
            None
        } else {
            Some(self.start)
        }
    }

    /// Last id of the range, if any.
    #[inline]
    #[must_use]
    pub const fn last(self) -> Option<Id> {
        if self.is_empty() {
            None
        } else {
            Some(Id(self.end.0 - 1))
        }
    }

    /// Splits the range after `n` ids.
    ///
    /// `n == 0` returns `(empty, self)` and `n >= len` returns
    /// `(self, empty)`. Both halves are positioned so that
    /// `head.end == tail.start`.
    #[must_use]
    pub const fn split(self, n: u64) -> (Self, Self) {
        if n >= self.len() {
            (self, Self::empty_at(self.end))
        } else {
            let mid = Id(self.start.0 + n);
            (
                Self {
                    start: self.start,
                    end: mid,
                },
                Self {
                    start: mid,
                    end: self.end,
                },
            )
        }
    }

    /// Index of `id` relative to `start`.
    #[inline]
    #[must_use]
    pub(crate) const fn offset_of(self, id: Id) -> u64 {
        id.0 - self.start.0
    }
}

impl fmt::Debug for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Range[{}..{})", self.start.0, self.end.0)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{})", self.start.0, self.end.0)
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;

    #[test]
    fn offset_never_wraps() {
        assert_eq!(Id(3).offset(4), Id(7));
        assert_eq!(Id(u64::MAX).offset(1), Id(u64::MAX));
        assert_eq!(Id(u64::MAX - 1).checked_offset(1), Some(Id(u64::MAX)));
        assert_eq!(Id(u64::MAX).checked_offset(1), None);
    }

    #[test]
    fn new_collapses_inverted_bounds() {
        let r = Range::new(10, 4);
        assert!(r.is_empty(), "inverted range should be empty");
        assert_eq!(r.start, Id(10));
        assert_eq!(r.len(), 0);
    }

    #[test]
    fn empty_range_contains_nothing() {
        let r = Range::new(5, 5);
        assert!(!r.contains(Id(5)), "empty range must not contain its start");
        assert_eq!(r.first(), None);
        assert_eq!(r.last(), None);
        assert_eq!(r.clamp(Id(100)), Id(5));
    }

    #[test]
    fn contains_is_half_open() {
        let r = Range::new(10, 20);
        assert!(r.contains(Id(10)), "start is inside");
        assert!(r.contains(Id(19)), "last is inside");
        assert!(!r.contains(Id(20)), "end is outside");
        assert!(!r.contains(Id(9)), "before start is outside");
    }

    #[test]
    fn clamp_maps_into_range() {
        let r = Range::new(10, 20);
        assert_eq!(r.clamp(Id(0)), Id(10));
        assert_eq!(r.clamp(Id(15)), Id(15));
        assert_eq!(r.clamp(Id(20)), Id(19));
        assert_eq!(r.clamp(Id(u64::MAX)), Id(19));
    }

    #[test]
    fn first_and_last() {
        let r = Range::new(3, 7);
        assert_eq!(r.first(), Some(Id(3)));
        assert_eq!(r.last(), Some(Id(6)));
    }

    #[test]
    fn split_in_the_middle() {
        let (a, b) = Range::new(10, 20).split(3);
        assert_eq!(a, Range::new(10, 13));
        assert_eq!(b, Range::new(13, 20));
    }

    #[test]
    fn split_at_edges() {
        let r = Range::new(10, 20);
        let (a, b) = r.split(0);
        assert!(a.is_empty(), "n == 0 gives an empty head");
        assert_eq!(b, r);

        let (a, b) = r.split(10);
        assert_eq!(a, r);
        assert!(b.is_empty(), "n == len gives an empty tail");

        let (a, b) = r.split(99);
        assert_eq!(a, r);
        assert_eq!(b, Range::empty_at(Id(20)));
    }

    #[test]
    fn overlap_and_intersection() {
        let a = Range::new(0, 10);
        let b = Range::new(5, 15);
        let c = Range::new(10, 20);
        assert!(a.overlaps(b), "a and b share 5..10");
        assert!(!a.overlaps(c), "touching ranges do not overlap");
        assert_eq!(a.intersection(b), Some(Range::new(5, 10)));
        assert_eq!(a.intersection(c), None);
        assert!(Range::new(0, 20).contains_range(b), "b is inside 0..20");
        assert!(!a.contains_range(b), "b sticks out of a");
    }

    #[test]
    fn display_format() {
        assert_eq!(format!("{}", Range::new(1, 4)), "[1..4)");
        assert_eq!(format!("{:?}", Id(7)), "Id(7)");
    }
}
