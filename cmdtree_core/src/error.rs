// Copyright 2026 the Cmdtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported while declaring groups.

use alloc::string::String;
use core::fmt;

use crate::id::Range;

/// Errors from [`GroupBuilder::add_group`](crate::GroupBuilder::add_group).
///
/// Every variant is reported before the tree is touched, so the builder is
/// unchanged and the caller may skip the declaration or abort the import.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GroupError {
    /// The new group partially overlaps an existing group without nesting
    /// inside it or wrapping it.
    Overlap {
        /// Name of the rejected group.
        name: String,
        /// Bounds of the rejected group.
        range: Range,
        /// Name of the existing group it collides with.
        existing: String,
        /// Bounds of the existing group.
        existing_range: Range,
    },
    /// The new group does not lie inside the root group's range.
    OutOfBounds {
        /// Name of the rejected group.
        name: String,
        /// Bounds of the rejected group.
        range: Range,
        /// Name of the root group.
        parent: String,
        /// Bounds of the root group.
        parent_range: Range,
    },
    /// The group was declared with `start > end`.
    InvalidRange {
        /// Name of the rejected group.
        name: String,
        /// Raw start bound as given.
        start: u64,
        /// Raw end bound as given.
        end: u64,
    },
}

impl GroupError {
    /// Name of the group whose declaration failed.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Overlap { name, .. }
            | Self::OutOfBounds { name, .. }
            | Self::InvalidRange { name, .. } => name,
        }
    }
}

impl fmt::Display for GroupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overlap {
                name,
                range,
                existing,
                existing_range,
            } => write!(
                f,
                "new group '{name}' {range} overlaps with existing group '{existing}' {existing_range}"
            ),
            Self::OutOfBounds {
                name,
                range,
                parent,
                parent_range,
            } => write!(
                f,
                "new group '{name}' {range} lies outside group '{parent}' {parent_range}"
            ),
            Self::InvalidRange { name, start, end } => {
                write!(f, "group '{name}' has start {start} past end {end}")
            }
        }
    }
}

impl core::error::Error for GroupError {}
