// Copyright 2026 the Cmdtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-phase construction of a group tree.
//!
//! A [`GroupBuilder`] holds only named groups. Scopes are declared with
//! [`add_group`](GroupBuilder::add_group) in any order: nesting is inferred
//! from interval containment, so parents may be declared before or after
//! their children. [`add_atoms`](GroupBuilder::add_atoms) consumes the builder
//! and fills every gap with leaf runs, producing a read-only [`Group`]. Since
//! the builder is gone afterwards, no group can be declared on a filled tree.

use alloc::string::String;
use alloc::vec::Vec;

use crate::config::FillConfig;
use crate::error::GroupError;
use crate::group::Group;
use crate::id::{Id, Range};
use crate::span::Span;
use crate::spans::{self, Bounded};
use crate::trace::{
    AtomsFilledEvent, GroupInsertedEvent, OverlapRejectedEvent, Placement, SubGroupsEvent, Tracer,
};

/// A group under construction.
///
/// Child lists are kept sorted by start bound, non-overlapping and inside
/// the parent's range after every successful [`add_group`](Self::add_group).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupBuilder {
    name: String,
    range: Range,
    groups: Vec<Self>,
}

impl Bounded for GroupBuilder {
    fn bounds(&self) -> Range {
        self.range
    }
}

impl GroupBuilder {
    /// Creates a root group covering `range` with no children.
    #[must_use]
    pub fn new(name: impl Into<String>, range: Range) -> Self {
        Self {
            name: name.into(),
            range,
            groups: Vec::new(),
        }
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

    /// Direct child groups declared so far, in ascending order.
    #[must_use]
    pub fn groups(&self) -> &[Self] {
        &self.groups
    }

    /// Declares the named scope `[start, end)`.
    ///
    /// The scope is placed by containment: inside the existing group that
    /// fully contains it (equal bounds nest), around the existing groups it
    /// fully contains, or between siblings when it touches none.
    ///
    /// # Errors
    ///
    /// Returns [`GroupError::Overlap`] if the scope partially overlaps an
    /// existing group, [`GroupError::OutOfBounds`] if it does not lie inside
    /// this group's range and [`GroupError::InvalidRange`] if
    /// `start > end`. The builder is unchanged on error.
    pub fn add_group(
        &mut self,
        start: u64,
        end: u64,
        name: impl Into<String>,
    ) -> Result<(), GroupError> {
        self.add_group_traced(start, end, name, &mut Tracer::none())
    }

    /// Like [`add_group`](Self::add_group), reporting placement decisions to
    /// `tracer`.
    ///
    /// # Errors
    ///
    /// See [`add_group`](Self::add_group).
    pub fn add_group_traced(
        &mut self,
        start: u64,
        end: u64,
        name: impl Into<String>,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), GroupError> {
        let name = name.into();
        if start > end {
            return Err(GroupError::InvalidRange { name, start, end });
        }
        let range = Range::new(start, end);
        if !self.range.contains_range(range) {
            return Err(GroupError::OutOfBounds {
                name,
                range,
                parent: self.name.clone(),
                parent_range: self.range,
            });
        }
        self.insert(name, range, 0, tracer)
    }

    fn insert(
        &mut self,
        name: String,
        range: Range,
        depth: usize,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), GroupError> {
        let hits = spans::intersecting(&self.groups, range);
        if hits.is_empty() {
            tracer.group_inserted(&GroupInsertedEvent {
                name: &name,
                range,
                depth,
                placement: Placement::Leaf,
            });
            self.groups.insert(hits.start, Self::new(name, range));
            return Ok(());
        }

        let first = &self.groups[hits.start];
        let last = &self.groups[hits.end - 1];
        let last_id = range.last().unwrap_or(range.start);
        let start_in = first.range.contains(range.start);
        let end_in = last.range.contains(last_id);

        if hits.len() == 1 && start_in && end_in {
            tracer.group_inserted(&GroupInsertedEvent {
                name: &name,
                range,
                depth,
                placement: Placement::Nested,
            });
            return self.groups[hits.start].insert(name, range, depth + 1, tracer);
        }

        let conflict = if start_in && range.start != first.range.start {
            Some(first)
        } else if end_in && range.end != last.range.end {
            Some(last)
        } else {
            None
        };
        if let Some(existing) = conflict {
            tracer.overlap_rejected(&OverlapRejectedEvent {
                name: &name,
                range,
                existing: &existing.name,
                existing_range: existing.range,
                depth,
            });
            return Err(GroupError::Overlap {
                existing: existing.name.clone(),
                existing_range: existing.range,
                name,
                range,
            });
        }

        tracer.group_inserted(&GroupInsertedEvent {
            name: &name,
            range,
            depth,
            placement: Placement::Wrapped {
                wrapped: hits.len(),
            },
        });
        spans::wrap(&mut self.groups, hits, |groups| Self {
            name,
            range,
            groups,
        });
        Ok(())
    }

    /// Seals the tree, filling every gap with runs of accepted ids.
    ///
    /// Ids for which `predicate` returns `false` are left out, and each
    /// maximal run of consecutive accepted ids becomes one leaf span. If
    /// `max_children` is non-zero, every level exposing more items than that
    /// is partitioned into synthetic `"Sub Group N"` groups.
    #[must_use]
    pub fn add_atoms(self, mut predicate: impl FnMut(Id) -> bool, max_children: u64) -> Group {
        self.finish(
            &mut predicate,
            FillConfig::bounded(max_children),
            &mut Tracer::none(),
        )
    }

    /// Like [`add_atoms`](Self::add_atoms) with a full [`FillConfig`],
    /// reporting each filled and bucketed level to `tracer`.
    #[must_use]
    pub fn finish<P: FnMut(Id) -> bool>(
        self,
        predicate: &mut P,
        config: FillConfig,
        tracer: &mut Tracer<'_>,
    ) -> Group {
        self.fill(predicate, &config, tracer, 0)
    }

    fn fill<P: FnMut(Id) -> bool>(
        self,
        predicate: &mut P,
        config: &FillConfig,
        tracer: &mut Tracer<'_>,
        depth: usize,
    ) -> Group {
        let Self {
            name,
            range,
            groups,
        } = self;
        let mut out = Vec::with_capacity(groups.len() * 2 + 1);
        let mut cursor = range.start;
        let mut accepted = 0;
        let mut leaf_spans = 0;
        for child in groups {
            let (n, runs) = scan_runs(cursor, child.range.start, &mut *predicate, &mut out);
            accepted += n;
            leaf_spans += runs;
            cursor = cursor.max(child.range.end);
            out.push(Span::Group(child.fill(&mut *predicate, config, tracer, depth + 1)));
        }
        let (n, runs) = scan_runs(cursor, range.end, &mut *predicate, &mut out);
        accepted += n;
        leaf_spans += runs;

        tracer.atoms_filled(&AtomsFilledEvent {
            name: &name,
            range,
            depth,
            leaf_spans,
            accepted,
        });

        if let Some(max) = config.fan_out() {
            let items = count_items(&out);
            while count_items(&out) > max {
                out = spans::bucket(out, max, config.sub_group_label);
            }
            if items > max {
                tracer.sub_groups_created(&SubGroupsEvent {
                    name: &name,
                    range,
                    depth,
                    items,
                    groups: count_items(&out),
                    max_children: max,
                });
            }
        }

        Group::from_parts(name, range, out)
    }
}

fn count_items(spans: &[Span]) -> u64 {
    spans.iter().map(Span::item_count).sum()
}

/// Appends a leaf span for every maximal run of accepted ids in `[from, to)`.
///
/// Returns the number of accepted ids and the number of runs emitted.
fn scan_runs<P: FnMut(Id) -> bool>(
    from: Id,
    to: Id,
    predicate: &mut P,
    out: &mut Vec<Span>,
) -> (u64, usize) {
    let mut accepted = 0;
    let mut runs = 0;
    let mut run_start = None;
    let mut id = from;
    while id < to {
        if predicate(id) {
            accepted += 1;
            run_start.get_or_insert(id);
        } else if let Some(start) = run_start.take() {
            out.push(Span::Range(Range { start, end: id }));
            runs += 1;
        }
        id = id.offset(1);
    }
    if let Some(start) = run_start {
        out.push(Span::Range(Range { start, end: to }));
        runs += 1;
    }
    (accepted, runs)
}
