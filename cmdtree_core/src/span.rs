// Copyright 2026 the Cmdtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Children of a group: runs of commands and nested groups.
//!
//! A [`Span`] is one entry of a group's ordered child list. A
//! [`Span::Range`] is a run of plain commands, each of which is individually
//! addressable, so it exposes `len()` items. A [`Span::Group`] is a nested
//! scope that counts as a single browsable item to its parent.

use core::fmt;

use crate::group::Group;
use crate::id::{Id, Range};

/// One entry of a [`Group`]'s ordered child list.
#[derive(Clone, PartialEq, Eq)]
pub enum Span {
    /// A run of consecutive commands.
    Range(Range),
    /// A nested group.
    Group(Group),
}

impl Span {
    /// The id interval covered by this span.
    #[must_use]
    pub fn bounds(&self) -> Range {
        match self {
            Self::Range(r) => *r,
            Self::Group(g) => g.range(),
        }
    }

    /// Number of items this span contributes to its parent's flat index.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        match self {
            Self::Range(r) => r.len(),
            Self::Group(_) => 1,
        }
    }

    /// Returns the `i`-th item of this span, or `None` if `i` is out of range.
    #[must_use]
    pub fn item_at(&self, i: u64) -> Option<GroupOrId<'_>> {
        match self {
            Self::Range(r) => (i < r.len()).then(|| GroupOrId::Id(r.start.offset(i))),
            Self::Group(g) => (i == 0).then_some(GroupOrId::Group(g)),
        }
    }

    /// Returns the item index of `id` within this span.
    ///
    /// `id` must lie inside [`bounds`](Self::bounds). A nested group is a
    /// single item, so every id inside it maps to 0.
    #[must_use]
    pub fn item_index_of(&self, id: Id) -> u64 {
        match self {
            Self::Range(r) => r.offset_of(id),
            Self::Group(_) => 0,
        }
    }

    /// Splits this span after `n` items.
    ///
    /// A range splits as [`Range::split`]; an empty remainder is returned as
    /// `None`. A group never splits: the whole group is returned as the head.
    #[must_use]
    pub fn split(self, n: u64) -> (Self, Option<Self>) {
        match self {
            Self::Range(r) => {
                let (head, tail) = r.split(n);
                (Self::Range(head), (!tail.is_empty()).then_some(Self::Range(tail)))
            }
            Self::Group(g) => (Self::Group(g), None),
        }
    }

    /// Returns the nested group, if this span is one.
    #[must_use]
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Self::Group(g) => Some(g),
            Self::Range(_) => None,
        }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range(r) => write!(f, "{r:?}"),
            Self::Group(g) => write!(f, "{g:?}"),
        }
    }
}

/// An item obtained by indexing into a [`Group`].
///
/// Consumers receive read-only views: a borrowed child group or the id of a
/// single command.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum GroupOrId<'a> {
    /// A direct child group.
    Group(&'a Group),
    /// A single command.
    Id(Id),
}

impl<'a> GroupOrId<'a> {
    /// The ids covered by this item.
    #[must_use]
    pub fn bounds(&self) -> Range {
        match self {
            Self::Group(g) => g.range(),
            Self::Id(id) => Range {
                start: *id,
                end: id.offset(1),
            },
        }
    }

    /// Returns the group, if this item is one.
    #[must_use]
    pub fn as_group(&self) -> Option<&'a Group> {
        match self {
            Self::Group(g) => Some(g),
            Self::Id(_) => None,
        }
    }

    /// Returns the command id, if this item is one.
    #[must_use]
    pub fn as_id(&self) -> Option<Id> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Group(_) => None,
        }
    }
}

impl fmt::Debug for GroupOrId<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group(g) => write!(f, "Group('{}' {})", g.name(), g.range()),
            Self::Id(id) => write!(f, "{id:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_span_items() {
        let s = Span::Range(Range::new(10, 13));
        assert_eq!(s.item_count(), 3);
        assert_eq!(s.item_at(0), Some(GroupOrId::Id(Id(10))));
        assert_eq!(s.item_at(2), Some(GroupOrId::Id(Id(12))));
        assert_eq!(s.item_at(3), None);
        assert_eq!(s.item_index_of(Id(12)), 2);
    }

    #[test]
    fn range_span_split() {
        let (head, tail) = Span::Range(Range::new(0, 10)).split(4);
        assert_eq!(head, Span::Range(Range::new(0, 4)));
        assert_eq!(tail, Some(Span::Range(Range::new(4, 10))));

        let (head, tail) = Span::Range(Range::new(0, 10)).split(10);
        assert_eq!(head, Span::Range(Range::new(0, 10)));
        assert_eq!(tail, None);
    }

    #[test]
    fn id_item_bounds() {
        assert_eq!(GroupOrId::Id(Id(4)).bounds(), Range::new(4, 5));
        assert_eq!(GroupOrId::Id(Id(4)).as_id(), Some(Id(4)));
        assert!(GroupOrId::Id(Id(4)).as_group().is_none(), "an id is not a group");
    }
}
