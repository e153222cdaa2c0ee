// Copyright 2026 the Cmdtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for tree construction.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! builder calls while groups are declared and gaps are filled. All method
//! bodies default to no-ops, so implementing only the events you care about
//! is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! [`BuildStats`] is a ready-made sink that tallies events into counters.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use crate::id::Range;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// How [`add_group`](crate::GroupBuilder::add_group) placed a new group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Inserted between existing siblings without touching them.
    Leaf,
    /// Inserted below an existing group that fully contains it.
    Nested,
    /// Inserted in place of existing groups, which became its children.
    Wrapped {
        /// Number of existing groups moved under the new one.
        wrapped: usize,
    },
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a group declaration is accepted.
///
/// For nested placements one event is emitted per level descended, with the
/// final event carrying the level the group landed at.
#[derive(Clone, Copy, Debug)]
pub struct GroupInsertedEvent<'a> {
    /// Name of the new group.
    pub name: &'a str,
    /// Bounds of the new group.
    pub range: Range,
    /// Depth of the level being modified (0 is the root's child list).
    pub depth: usize,
    /// How the group was placed at this level.
    pub placement: Placement,
}

/// Emitted when a group declaration is rejected for partial overlap.
#[derive(Clone, Copy, Debug)]
pub struct OverlapRejectedEvent<'a> {
    /// Name of the rejected group.
    pub name: &'a str,
    /// Bounds of the rejected group.
    pub range: Range,
    /// Name of the group it collides with.
    pub existing: &'a str,
    /// Bounds of the group it collides with.
    pub existing_range: Range,
    /// Depth at which the collision was found.
    pub depth: usize,
}

/// Emitted once per group after its gaps have been filled.
#[derive(Clone, Copy, Debug)]
pub struct AtomsFilledEvent<'a> {
    /// Name of the group.
    pub name: &'a str,
    /// Bounds of the group.
    pub range: Range,
    /// Depth of the group (0 is the root).
    pub depth: usize,
    /// Number of leaf runs emitted directly under the group.
    pub leaf_spans: usize,
    /// Number of ids accepted by the predicate directly under the group.
    pub accepted: u64,
}

/// Emitted when a level is re-bucketed into synthetic groups.
#[derive(Clone, Copy, Debug)]
pub struct SubGroupsEvent<'a> {
    /// Name of the group whose children were bucketed.
    pub name: &'a str,
    /// Bounds of that group.
    pub range: Range,
    /// Depth of that group (0 is the root).
    pub depth: usize,
    /// Direct item count before bucketing.
    pub items: u64,
    /// Direct item count after bucketing.
    pub groups: u64,
    /// The fan-out bound that was applied.
    pub max_children: u64,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the builder.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a group declaration is accepted at a level.
    fn on_group_inserted(&mut self, e: &GroupInsertedEvent<'_>) {
        _ = e;
    }

    /// Called when a group declaration is rejected.
    fn on_overlap_rejected(&mut self, e: &OverlapRejectedEvent<'_>) {
        _ = e;
    }

    /// Called after a group's gaps have been filled.
    fn on_atoms_filled(&mut self, e: &AtomsFilledEvent<'_>) {
        _ = e;
    }

    /// Called after a level has been bucketed into synthetic groups.
    fn on_sub_groups_created(&mut self, e: &SubGroupsEvent<'_>) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// BuildStats
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that counts construction events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Groups inserted as plain siblings.
    pub inserted: u64,
    /// Levels descended while nesting groups.
    pub nested: u64,
    /// Groups that wrapped existing siblings.
    pub wrapping: u64,
    /// Declarations rejected for overlap.
    pub rejected: u64,
    /// Leaf runs emitted across the tree.
    pub leaf_spans: u64,
    /// Ids accepted by the predicate across the tree.
    pub accepted: u64,
    /// Synthetic groups created by bucketing.
    pub sub_groups: u64,
}

impl TraceSink for BuildStats {
    fn on_group_inserted(&mut self, e: &GroupInsertedEvent<'_>) {
        match e.placement {
            Placement::Leaf => self.inserted += 1,
            Placement::Nested => self.nested += 1,
            Placement::Wrapped { .. } => self.wrapping += 1,
        }
    }

    fn on_overlap_rejected(&mut self, e: &OverlapRejectedEvent<'_>) {
        _ = e;
        self.rejected += 1;
    }

    fn on_atoms_filled(&mut self, e: &AtomsFilledEvent<'_>) {
        let runs = u64::try_from(e.leaf_spans).unwrap_or(u64::MAX);
        self.leaf_spans = self.leaf_spans.saturating_add(runs);
        self.accepted += e.accepted;
    }

    fn on_sub_groups_created(&mut self, e: &SubGroupsEvent<'_>) {
        self.sub_groups += e.groups;
    }
}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`GroupInsertedEvent`].
    #[inline]
    pub fn group_inserted(&mut self, e: &GroupInsertedEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_group_inserted(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`OverlapRejectedEvent`].
    #[inline]
    pub fn overlap_rejected(&mut self, e: &OverlapRejectedEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_overlap_rejected(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`AtomsFilledEvent`].
    #[inline]
    pub fn atoms_filled(&mut self, e: &AtomsFilledEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_atoms_filled(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SubGroupsEvent`].
    #[inline]
    pub fn sub_groups_created(&mut self, e: &SubGroupsEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_sub_groups_created(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
