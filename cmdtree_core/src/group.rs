// Copyright 2026 the Cmdtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The finished, read-only group tree.
//!
//! Items of a [`Group`] are addressed by *flat index*: the 0-based position
//! among the group's direct children, where every command of a leaf run is
//! one item and every nested group is one item regardless of its size.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::id::{Id, Range};
use crate::span::{GroupOrId, Span};
use crate::spans;

/// A named scope with an ordered, non-overlapping list of child spans.
///
/// Produced by [`GroupBuilder::add_atoms`](crate::GroupBuilder::add_atoms).
/// Child spans are sorted by start bound and lie inside [`range`](Self::range).
#[derive(Clone, PartialEq, Eq)]
pub struct Group {
    name: String,
    range: Range,
    spans: Vec<Span>,
}

/// Location of a flat index inside a span list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Position {
    /// Index into the span list.
    pub(crate) span: usize,
    /// Item offset within that span.
    pub(crate) offset: u64,
    /// Flat index of the item.
    pub(crate) index: u64,
}

impl Group {
    pub(crate) fn from_parts(name: String, range: Range, spans: Vec<Span>) -> Self {
        Self { name, range, spans }
    }

    /// Name of this group.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bounds of this group.
    #[must_use]
    pub fn range(&self) -> Range {
        self.range
    }

    /// Direct child spans in ascending order.
    #[must_use]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Number of direct items.
    ///
    /// A nested group counts as one item regardless of its size.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.spans.iter().map(Span::item_count).sum()
    }

    /// Number of items visible when the groups accepted by `expanded` are
    /// shown inline.
    ///
    /// A child group contributes 1 when `expanded` rejects it, or its own
    /// deep count when `expanded` accepts it. Leaf runs always contribute
    /// their length.
    #[must_use]
    pub fn deep_count(&self, mut expanded: impl FnMut(&Self) -> bool) -> u64 {
        self.deep_count_with(&mut expanded)
    }

    fn deep_count_with<P: FnMut(&Self) -> bool>(&self, expanded: &mut P) -> u64 {
        let mut count = 0;
        for span in &self.spans {
            count += match span {
                Span::Group(g) if expanded(g) => g.deep_count_with(&mut *expanded),
                Span::Group(_) => 1,
                Span::Range(r) => r.len(),
            };
        }
        count
    }

    /// Returns the `i`-th direct item, or `None` if `i >= count()`.
    #[must_use]
    pub fn index(&self, i: u64) -> Option<GroupOrId<'_>> {
        let pos = self.locate(i)?;
        self.spans[pos.span].item_at(pos.offset)
    }

    /// Returns the flat index of the direct item holding `id`.
    ///
    /// Ids inside a nested group resolve to that group's index. Returns
    /// `None` if no direct child covers `id`.
    #[must_use]
    pub fn index_of(&self, id: Id) -> Option<u64> {
        let mut base = 0;
        for span in &self.spans {
            if span.bounds().contains(id) {
                return Some(base + span.item_index_of(id));
            }
            base += span.item_count();
        }
        None
    }

    /// Returns the flat index of `item` if it is a direct item of this group.
    ///
    /// Groups are matched by identity, so a structurally equal group
    /// elsewhere in the tree is not found.
    #[must_use]
    pub fn index_of_item(&self, item: GroupOrId<'_>) -> Option<u64> {
        match item {
            GroupOrId::Id(id) => self
                .index_of(id)
                .filter(|&i| self.index(i) == Some(GroupOrId::Id(id))),
            GroupOrId::Group(g) => {
                let mut base = 0;
                for span in &self.spans {
                    if let Span::Group(child) = span
                        && core::ptr::eq(child, g)
                    {
                        return Some(base);
                    }
                    base += span.item_count();
                }
                None
            }
        }
    }

    /// Returns the path of flat indices leading to the deepest item that
    /// holds `id`.
    ///
    /// The last element addresses a command when `id` lies in a leaf run, or
    /// the innermost group whose direct children do not cover `id`.
    #[must_use]
    pub fn path_of(&self, id: Id) -> Option<Vec<u64>> {
        let mut path = Vec::new();
        let mut group = self;
        loop {
            let i = group.index_of(id)?;
            path.push(i);
            match group.index(i) {
                Some(GroupOrId::Group(child)) if child.index_of(id).is_some() => group = child,
                _ => return Some(path),
            }
        }
    }

    /// Returns the item addressed by `path`, or `None` if the path leaves the
    /// tree.
    ///
    /// An empty path addresses nothing; the root is not an item of itself.
    #[must_use]
    pub fn item_at(&self, path: &[u64]) -> Option<GroupOrId<'_>> {
        let (&last, parents) = path.split_last()?;
        let mut group = self;
        for &i in parents {
            group = group.index(i)?.as_group()?;
        }
        group.index(last)
    }

    /// Finds the span and offset holding flat index `i`.
    pub(crate) fn locate(&self, i: u64) -> Option<Position> {
        let mut base = 0;
        for (span, s) in self.spans.iter().enumerate() {
            let c = s.item_count();
            if i < base + c {
                return Some(Position {
                    span,
                    offset: i - base,
                    index: i,
                });
            }
            base += c;
        }
        None
    }

    /// Returns the direct child span containing `id`, if any.
    #[must_use]
    pub fn span_containing(&self, id: Id) -> Option<&Span> {
        spans::position_of(&self.spans, id).map(|i| &self.spans[i])
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Group('{}' {}) ", self.name, self.range)?;
        f.debug_list().entries(&self.spans).finish()
    }
}
