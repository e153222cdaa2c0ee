// Copyright 2026 the Cmdtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Group/span hierarchy for browsing captured graphics command streams.
//!
//! `cmdtree_core` turns a flat, linearly ordered stream of command indices
//! into a navigable tree of named groups (frames, draw-call clusters, user
//! marker scopes) that a UI can page through without materializing a flat
//! list. It is `no_std` compatible (with `alloc`).
//!
//! # Architecture
//!
//! A tree is built in two phases. The producer declares structural scopes on
//! a [`GroupBuilder`] in any order, then seals it by filling the gaps with
//! leaf command runs:
//!
//! ```text
//!   GroupBuilder::new(name, range)
//!       │
//!       ▼
//!   add_group(start, end, name)  ×N   (nest / wrap / reject overlap)
//!       │
//!       ▼
//!   add_atoms(predicate, max_children) ──► Group
//!                                            │
//!                 ┌──────────────────────────┘
//!                 ▼
//!   index / index_of / count / deep_count
//!   iter_from / iter_back_from / traversal(direction, path)
//! ```
//!
//! **[`id`]**: The [`Id`] of a single command and the half-open [`Range`]
//! interval type with its interval algebra.
//!
//! **[`span`]**: [`Span`], the closed sum of "run of commands" and "nested
//! group", plus [`GroupOrId`], the result of indexing into a group.
//!
//! **[`spans`]**: Ordered-list search and splice helpers shared by group
//! insertion and gap filling.
//!
//! **[`builder`]**: [`GroupBuilder`], the mutable construction phase.
//!
//! **[`group`]**: [`Group`], the finished read-only tree with flat indexing
//! and counting.
//!
//! **[`traverse`]**: Direct-child iterators and the resumable depth-first
//! [`Traversal`](traverse::Traversal).
//!
//! **[`config`]**: [`FillConfig`] for the fan-out bound applied by
//! [`GroupBuilder::add_atoms`].
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! build instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod builder;
pub mod config;
pub mod error;
pub mod group;
pub mod id;
pub mod span;
pub mod spans;
pub mod trace;
pub mod traverse;

pub use builder::GroupBuilder;
pub use config::FillConfig;
pub use error::GroupError;
pub use group::Group;
pub use id::{Id, Range};
pub use span::{GroupOrId, Span};
pub use traverse::{Direction, Traversal, TraversalNode};
