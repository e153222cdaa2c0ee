// Copyright 2026 the Cmdtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered child-list algorithms.
//!
//! Every child list in the hierarchy is sorted by ascending start bound and
//! free of overlaps. The helpers here search and splice such lists through
//! the [`Bounded`] trait, so the builder's group-only lists and the finished
//! tree's span lists share one implementation. Splicing is `O(n)` in the
//! list length.

use alloc::format;
use alloc::vec::Vec;
use core::ops;

use crate::group::Group;
use crate::id::{Id, Range};
use crate::span::Span;

/// Anything that occupies an interval of ids.
pub trait Bounded {
    /// The ids covered.
    fn bounds(&self) -> Range;
}

impl Bounded for Range {
    fn bounds(&self) -> Range {
        *self
    }
}

impl Bounded for Span {
    fn bounds(&self) -> Range {
        Self::bounds(self)
    }
}

impl Bounded for Group {
    fn bounds(&self) -> Range {
        self.range()
    }
}

/// Returns the index range of the items that intersect `range`.
///
/// An empty `range` intersects the item that contains its position, if any.
/// A non-empty `range` also intersects empty items positioned at its start,
/// so a scope declared after a marker at its start adopts the marker just as
/// the marker would nest into the scope.
/// When nothing intersects, the returned range is empty and its start is the
/// position at which an item with these bounds keeps the list ordered.
#[must_use]
pub fn intersecting<T: Bounded>(items: &[T], range: Range) -> ops::Range<usize> {
    let (first, probe) = if range.is_empty() {
        (
            items.partition_point(|s| s.bounds().end <= range.start),
            Id(range.start.get().saturating_add(1)),
        )
    } else {
        (
            items.partition_point(|s| {
                let b = s.bounds();
                b.end < range.start || (b.end == range.start && !b.is_empty())
            }),
            range.end,
        )
    };
    let count = items[first..].partition_point(|s| s.bounds().start < probe);
    first..first + count
}

/// Returns the index of the item containing `id`, if any.
#[must_use]
pub fn position_of<T: Bounded>(items: &[T], id: Id) -> Option<usize> {
    let i = items.partition_point(|s| s.bounds().end <= id);
    items.get(i).filter(|s| s.bounds().contains(id)).map(|_| i)
}

/// Replaces `items[hits]` with the single item built from the removed ones,
/// preserving their order.
pub fn wrap<T>(items: &mut Vec<T>, hits: ops::Range<usize>, make: impl FnOnce(Vec<T>) -> T) {
    let at = hits.start;
    let wrapped: Vec<T> = items.drain(hits).collect();
    items.insert(at, make(wrapped));
}

/// Partitions `spans` into synthetic groups holding at most `max` items each.
///
/// Runs that straddle a bucket boundary are split; nested groups always move
/// whole. Buckets are named `"{label} 1"`, `"{label} 2"`, ... in order.
#[must_use]
pub fn bucket(spans: Vec<Span>, max: u64, label: &str) -> Vec<Span> {
    let mut out = Vec::new();
    let mut current: Vec<Span> = Vec::new();
    let mut count = 0;
    for span in spans {
        let mut rest = Some(span);
        while let Some(s) = rest.take() {
            let (head, tail) = s.split(max - count);
            count += head.item_count();
            current.push(head);
            rest = tail;
            if count >= max {
                let n = out.len() + 1;
                out.push(seal(core::mem::take(&mut current), n, label));
                count = 0;
            }
        }
    }
    if !current.is_empty() {
        let n = out.len() + 1;
        out.push(seal(current, n, label));
    }
    out
}

fn seal(spans: Vec<Span>, n: usize, label: &str) -> Span {
    let range = match (spans.first(), spans.last()) {
        (Some(first), Some(last)) => Range {
            start: first.bounds().start,
            end: last.bounds().end,
        },
        _ => Range::EMPTY,
    };
    Span::Group(Group::from_parts(format!("{label} {n}"), range, spans))
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn ranges(bounds: &[(u64, u64)]) -> Vec<Range> {
        bounds.iter().map(|&(s, e)| Range::new(s, e)).collect()
    }

    #[test]
    fn intersecting_finds_overlaps() {
        let items = ranges(&[(100, 200), (300, 400), (500, 600)]);
        assert_eq!(intersecting(&items, Range::new(150, 350)), 0..2);
        assert_eq!(intersecting(&items, Range::new(0, 1000)), 0..3);
        assert_eq!(intersecting(&items, Range::new(350, 360)), 1..2);
    }

    #[test]
    fn intersecting_gap_gives_insertion_point() {
        let items = ranges(&[(100, 200), (300, 400)]);
        assert_eq!(intersecting(&items, Range::new(0, 100)), 0..0);
        assert_eq!(intersecting(&items, Range::new(200, 300)), 1..1);
        assert_eq!(intersecting(&items, Range::new(400, 500)), 2..2);
    }

    #[test]
    fn intersecting_empty_query() {
        let items = ranges(&[(100, 200), (300, 400)]);
        assert_eq!(intersecting(&items, Range::new(150, 150)), 0..1);
        assert_eq!(intersecting(&items, Range::new(200, 200)), 1..1);
        assert_eq!(intersecting(&items, Range::new(100, 100)), 0..1);
    }

    #[test]
    fn intersecting_adopts_empty_item_at_start() {
        let items = ranges(&[(50, 100), (100, 100), (200, 200)]);
        assert_eq!(intersecting(&items, Range::new(100, 200)), 1..2);
        assert_eq!(intersecting(&items, Range::new(100, 100)), 2..2);
        assert_eq!(intersecting(&items, Range::new(150, 250)), 2..3);
    }

    #[test]
    fn intersecting_empty_query_at_max() {
        let items = ranges(&[(0, u64::MAX)]);
        let at_end = Range::new(u64::MAX, u64::MAX);
        assert_eq!(intersecting(&items, at_end), 1..1);
        assert_eq!(intersecting(&[] as &[Range], at_end), 0..0);
    }

    #[test]
    fn position_of_finds_container() {
        let items = ranges(&[(100, 200), (300, 400)]);
        assert_eq!(position_of(&items, Id(150)), Some(0));
        assert_eq!(position_of(&items, Id(300)), Some(1));
        assert_eq!(position_of(&items, Id(250)), None);
        assert_eq!(position_of(&items, Id(999)), None);
    }

    #[test]
    fn wrap_replaces_hits() {
        let mut items = vec![1, 2, 3, 4];
        wrap(&mut items, 1..3, |w| w.iter().sum());
        assert_eq!(items, vec![1, 5, 4]);
    }

    #[test]
    fn bucket_splits_runs() {
        let spans = vec![Span::Range(Range::new(0, 10))];
        let out = bucket(spans, 4, "Sub Group");
        assert_eq!(out.len(), 3);
        let names: Vec<_> = out.iter().filter_map(|s| s.as_group()).map(Group::name).collect();
        assert_eq!(names, vec!["Sub Group 1", "Sub Group 2", "Sub Group 3"]);
        assert_eq!(out[0].bounds(), Range::new(0, 4));
        assert_eq!(out[2].bounds(), Range::new(8, 10));
    }
}
