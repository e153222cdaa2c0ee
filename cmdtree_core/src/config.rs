// Copyright 2026 the Cmdtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gap-filling configuration.

/// Controls how [`GroupBuilder::finish`](crate::GroupBuilder::finish) buckets
/// oversized levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FillConfig {
    /// Maximum number of direct items any group may expose, or 0 for no
    /// bound.
    ///
    /// Levels that exceed the bound are partitioned into synthetic groups of
    /// at most `max_children` items each. A bound of 1 is treated as 2.
    pub max_children: u64,
    /// Name prefix for synthetic groups. The `n`-th synthetic group at a
    /// level is named `"{sub_group_label} {n}"`, counting from 1.
    pub sub_group_label: &'static str,
}

impl FillConfig {
    /// Fills gaps without bucketing.
    pub const UNBOUNDED: Self = Self {
        max_children: 0,
        sub_group_label: "Sub Group",
    };

    /// Fills gaps and buckets every level to at most `max_children` items.
    #[must_use]
    pub const fn bounded(max_children: u64) -> Self {
        Self {
            max_children,
            ..Self::UNBOUNDED
        }
    }

    /// The bound actually enforced, or `None` when unbounded.
    #[must_use]
    pub const fn fan_out(&self) -> Option<u64> {
        match self.max_children {
            0 => None,
            1 => Some(2),
            n => Some(n),
        }
    }
}

impl Default for FillConfig {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_out_bounds() {
        assert_eq!(FillConfig::UNBOUNDED.fan_out(), None);
        assert_eq!(FillConfig::bounded(1).fan_out(), Some(2));
        assert_eq!(FillConfig::bounded(45).fan_out(), Some(45));
        assert_eq!(FillConfig::bounded(45).sub_group_label, "Sub Group");
    }
}
