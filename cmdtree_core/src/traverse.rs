// Copyright 2026 the Cmdtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree traversal utilities.
//!
//! [`Children`] and [`ChildrenRev`] walk the direct items of one group.
//! [`Traversal`] walks the whole tree depth-first from an arbitrary *path*,
//! a sequence of per-level flat indices such as the one carried by every
//! [`TraversalNode`]. A UI keeps the path of the first row on screen and
//! resumes from it on the next scroll, in either direction, without walking
//! from the root.
//!
//! # Visit order
//!
//! Forward traversal is pre-order: a group, then its descendants, then its
//! following siblings. Backward traversal is the exact mirror: following
//! siblings first, a group's descendants in reverse, then the group itself.
//! For any node `n`, the backward sequence starting at `n` is the forward
//! sequence from the start of the tree up to `n`, reversed.

use alloc::vec::Vec;
use core::ops::ControlFlow;

use crate::group::{Group, Position};
use crate::span::GroupOrId;

/// Direction of a traversal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Pre-order, towards higher ids.
    #[default]
    Forward,
    /// Mirrored pre-order, towards lower ids.
    Backward,
}

/// An iterator over the direct items of a group, in ascending order.
///
/// Created by [`Group::iter_from`] and [`Group::children`].
#[derive(Clone, Debug)]
pub struct Children<'a> {
    group: &'a Group,
    next: Option<Position>,
}

impl<'a> Children<'a> {
    pub(crate) fn new(group: &'a Group, from: u64) -> Self {
        Self {
            group,
            next: group.locate(from),
        }
    }
}

impl<'a> Iterator for Children<'a> {
    type Item = (u64, GroupOrId<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let pos = self.next?;
        let spans = self.group.spans();
        let item = spans[pos.span].item_at(pos.offset)?;
        let mut following = Position {
            span: pos.span,
            offset: pos.offset + 1,
            index: pos.index + 1,
        };
        while following.span < spans.len() && following.offset >= spans[following.span].item_count()
        {
            following.span += 1;
            following.offset = 0;
        }
        self.next = (following.span < spans.len()).then_some(following);
        Some((pos.index, item))
    }
}

/// An iterator over the direct items of a group, in descending order.
///
/// Created by [`Group::iter_back_from`].
#[derive(Clone, Debug)]
pub struct ChildrenRev<'a> {
    group: &'a Group,
    next: Option<Position>,
}

impl<'a> ChildrenRev<'a> {
    /// Starts at flat index `from`, or at the last item if `from` is past the
    /// end.
    pub(crate) fn new(group: &'a Group, from: u64) -> Self {
        let from = from.min(group.count().saturating_sub(1));
        Self {
            group,
            next: group.locate(from),
        }
    }

    /// Yields the items strictly before flat index `before`.
    fn before(group: &'a Group, before: u64) -> Self {
        match before.checked_sub(1) {
            Some(from) => Self::new(group, from),
            None => Self { group, next: None },
        }
    }
}

impl<'a> Iterator for ChildrenRev<'a> {
    type Item = (u64, GroupOrId<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let pos = self.next?;
        let spans = self.group.spans();
        let item = spans[pos.span].item_at(pos.offset)?;
        self.next = if pos.offset > 0 {
            Some(Position {
                span: pos.span,
                offset: pos.offset - 1,
                index: pos.index - 1,
            })
        } else {
            spans[..pos.span]
                .iter()
                .rposition(|s| s.item_count() > 0)
                .map(|span| Position {
                    span,
                    offset: spans[span].item_count() - 1,
                    index: pos.index - 1,
                })
        };
        Some((pos.index, item))
    }
}

/// A node produced by a [`Traversal`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraversalNode<'a> {
    /// Flat index at each level from the root down to this node.
    pub path: Vec<u64>,
    /// The node itself.
    pub item: GroupOrId<'a>,
}

#[derive(Clone, Debug)]
enum Cursor<'a> {
    Forward(Children<'a>),
    Backward(ChildrenRev<'a>),
}

impl<'a> Iterator for Cursor<'a> {
    type Item = (u64, GroupOrId<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Forward(c) => c.next(),
            Self::Backward(c) => c.next(),
        }
    }
}

#[derive(Clone, Debug)]
struct Frame<'a> {
    group: &'a Group,
    cursor: Cursor<'a>,
}

/// A lazy, resumable depth-first walk over a group tree.
///
/// Created by [`Group::traversal`]. The root itself is never yielded. The
/// node addressed by the start path is always yielded first; an empty start
/// path begins at the first node (forward) or the last node (backward). A
/// start path that leaves the tree yields nothing.
///
/// Each traversal owns its cursor state, so any number of them may run over
/// the same tree at once.
#[derive(Clone, Debug)]
pub struct Traversal<'a> {
    direction: Direction,
    frames: Vec<Frame<'a>>,
    path: Vec<u64>,
    pending: Option<TraversalNode<'a>>,
}

impl<'a> Traversal<'a> {
    pub(crate) fn new(root: &'a Group, direction: Direction, start: &[u64]) -> Self {
        let mut t = Self {
            direction,
            frames: Vec::with_capacity(start.len().max(1) + 1),
            path: Vec::with_capacity(start.len()),
            pending: None,
        };
        let Some((&last, parents)) = start.split_last() else {
            let cursor = match direction {
                Direction::Forward => Cursor::Forward(Children::new(root, 0)),
                Direction::Backward => Cursor::Backward(ChildrenRev::new(root, u64::MAX)),
            };
            t.frames.push(Frame {
                group: root,
                cursor,
            });
            return t;
        };

        let mut group = root;
        for &i in parents {
            let Some(GroupOrId::Group(child)) = group.index(i) else {
                t.frames.clear();
                return t;
            };
            let cursor = match direction {
                Direction::Forward => Cursor::Forward(Children::new(group, i + 1)),
                Direction::Backward => Cursor::Backward(ChildrenRev::before(group, i)),
            };
            t.frames.push(Frame { group, cursor });
            t.path.push(i);
            group = child;
        }

        let Some(item) = group.index(last) else {
            t.frames.clear();
            return t;
        };
        match direction {
            Direction::Forward => t.frames.push(Frame {
                group,
                cursor: Cursor::Forward(Children::new(group, last)),
            }),
            Direction::Backward => {
                t.frames.push(Frame {
                    group,
                    cursor: Cursor::Backward(ChildrenRev::before(group, last)),
                });
                t.pending = Some(TraversalNode {
                    path: start.to_vec(),
                    item,
                });
            }
        }
        t
    }

    /// The direction this traversal walks in.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl<'a> Iterator for Traversal<'a> {
    type Item = TraversalNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(node) = self.pending.take() {
            return Some(node);
        }
        loop {
            let depth = self.frames.len().checked_sub(1)?;
            let frame = self.frames.last_mut()?;
            match frame.cursor.next() {
                Some((i, item)) => {
                    self.path.truncate(depth);
                    self.path.push(i);
                    match (item, self.direction) {
                        (GroupOrId::Group(g), Direction::Forward) => {
                            self.frames.push(Frame {
                                group: g,
                                cursor: Cursor::Forward(Children::new(g, 0)),
                            });
                        }
                        (GroupOrId::Group(g), Direction::Backward) => {
                            self.frames.push(Frame {
                                group: g,
                                cursor: Cursor::Backward(ChildrenRev::new(g, u64::MAX)),
                            });
                            continue;
                        }
                        (GroupOrId::Id(_), _) => {}
                    }
                    return Some(TraversalNode {
                        path: self.path.clone(),
                        item,
                    });
                }
                None => {
                    let done = self.frames.pop()?;
                    if self.direction == Direction::Backward && depth > 0 {
                        self.path.truncate(depth);
                        return Some(TraversalNode {
                            path: self.path.clone(),
                            item: GroupOrId::Group(done.group),
                        });
                    }
                }
            }
        }
    }
}

impl Group {
    /// Returns an iterator over all direct items, in ascending order.
    #[must_use]
    pub fn children(&self) -> Children<'_> {
        Children::new(self, 0)
    }

    /// Returns an iterator over the direct items from flat index `from`
    /// upwards. Empty if `from >= count()`.
    #[must_use]
    pub fn iter_from(&self, from: u64) -> Children<'_> {
        Children::new(self, from)
    }

    /// Returns an iterator over the direct items from flat index `from` down
    /// to 0.
    ///
    /// A `from` past the end starts at the last item, so paging up from
    /// beyond the end still lands on the tail.
    #[must_use]
    pub fn iter_back_from(&self, from: u64) -> ChildrenRev<'_> {
        ChildrenRev::new(self, from)
    }

    /// Calls `visit` with each direct item from flat index `from` upwards.
    ///
    /// Stops at the first [`ControlFlow::Break`] and returns it unchanged.
    pub fn iterate_forwards<B>(
        &self,
        from: u64,
        mut visit: impl FnMut(u64, GroupOrId<'_>) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        for (i, item) in self.iter_from(from) {
            if let ControlFlow::Break(b) = visit(i, item) {
                return ControlFlow::Break(b);
            }
        }
        ControlFlow::Continue(())
    }

    /// Calls `visit` with each direct item from flat index `from` down to 0.
    ///
    /// Stops at the first [`ControlFlow::Break`] and returns it unchanged.
    pub fn iterate_backwards<B>(
        &self,
        from: u64,
        mut visit: impl FnMut(u64, GroupOrId<'_>) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        for (i, item) in self.iter_back_from(from) {
            if let ControlFlow::Break(b) = visit(i, item) {
                return ControlFlow::Break(b);
            }
        }
        ControlFlow::Continue(())
    }

    /// Returns a lazy depth-first walk over the whole tree starting at the
    /// node addressed by `start`.
    #[must_use]
    pub fn traversal(&self, direction: Direction, start: &[u64]) -> Traversal<'_> {
        Traversal::new(self, direction, start)
    }

    /// Calls `visit` with the path and item of every node of
    /// [`traversal`](Self::traversal).
    ///
    /// Stops at the first [`ControlFlow::Break`] and returns it unchanged.
    pub fn traverse<B>(
        &self,
        direction: Direction,
        start: &[u64],
        mut visit: impl FnMut(&[u64], GroupOrId<'_>) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        for node in self.traversal(direction, start) {
            if let ControlFlow::Break(b) = visit(&node.path, node.item) {
                return ControlFlow::Break(b);
            }
        }
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;

    use super::*;
    use crate::builder::GroupBuilder;
    use crate::id::{Id, Range};

    /// ```text
    /// root [0..10)
    ///   0        id 0
    ///   1        A [1..6)
    ///   1.0        id 1
    ///   1.1        B [2..4)
    ///   1.1.0        id 2
    ///   1.1.1        id 3
    ///   1.2        id 4
    ///   1.3        id 5
    ///   2        id 6
    ///   3        C [7..9)
    ///   3.0        id 7
    ///   3.1        id 8
    ///   4        id 9
    /// ```
    fn sample() -> Group {
        let mut b = GroupBuilder::new("root", Range::new(0, 10));
        b.add_group(2, 4, "B").unwrap();
        b.add_group(7, 9, "C").unwrap();
        b.add_group(1, 6, "A").unwrap();
        b.add_atoms(|_| true, 0)
    }

    fn label(item: GroupOrId<'_>) -> String {
        match item {
            GroupOrId::Group(g) => g.name().into(),
            GroupOrId::Id(id) => alloc::format!("{}", id.get()),
        }
    }

    fn labels(t: Traversal<'_>) -> Vec<String> {
        t.map(|n| label(n.item)).collect()
    }

    const PRE_ORDER: [&str; 13] = [
        "0", "A", "1", "B", "2", "3", "4", "5", "6", "C", "7", "8", "9",
    ];

    #[test]
    fn children_yield_every_item() {
        let g = sample();
        let items: Vec<_> = g.children().map(|(i, item)| (i, label(item))).collect();
        assert_eq!(items.len() as u64, g.count());
        let expected: Vec<_> = ["0", "A", "6", "C", "9"]
            .iter()
            .enumerate()
            .map(|(i, s)| (i as u64, String::from(*s)))
            .collect();
        assert_eq!(items, expected);
    }

    #[test]
    fn count_matches_forward_pass() {
        let g = sample();
        let mut seen = 0;
        let _ = g.iterate_forwards(0, |_, _| {
            seen += 1;
            ControlFlow::<()>::Continue(())
        });
        assert_eq!(seen, g.count());
    }

    #[test]
    fn iter_from_and_back_from() {
        let g = GroupBuilder::new("root", Range::new(0, 10)).add_atoms(|id| id.get() != 4, 0);
        let fwd: Vec<_> = g.iter_from(3).map(|(i, it)| (i, it.as_id())).collect();
        assert_eq!(
            fwd,
            vec![
                (3, Some(Id(3))),
                (4, Some(Id(5))),
                (5, Some(Id(6))),
                (6, Some(Id(7))),
                (7, Some(Id(8))),
                (8, Some(Id(9)))
            ]
        );
        let back: Vec<_> = g.iter_back_from(5).map(|(i, it)| (i, it.as_id())).collect();
        assert_eq!(
            back,
            vec![
                (5, Some(Id(6))),
                (4, Some(Id(5))),
                (3, Some(Id(3))),
                (2, Some(Id(2))),
                (1, Some(Id(1))),
                (0, Some(Id(0)))
            ]
        );
    }

    #[test]
    fn out_of_range_starts() {
        let g = sample();
        assert_eq!(g.iter_from(g.count()).count(), 0);
        let back: Vec<_> = g.iter_back_from(1000).map(|(i, _)| i).collect();
        assert_eq!(back, vec![4, 3, 2, 1, 0]);
        let empty = GroupBuilder::new("empty", Range::new(0, 0)).add_atoms(|_| true, 0);
        assert_eq!(empty.iter_back_from(0).count(), 0);
        assert_eq!(empty.traversal(Direction::Backward, &[]).count(), 0);
    }

    #[test]
    fn iterate_propagates_break() {
        let g = sample();
        let found = g.iterate_forwards(0, |i, item| match item {
            GroupOrId::Group(c) if c.name() == "C" => ControlFlow::Break(i),
            _ => ControlFlow::Continue(()),
        });
        assert_eq!(found, ControlFlow::Break(3));

        let mut visited = Vec::new();
        let stopped = g.iterate_backwards(4, |i, _| {
            visited.push(i);
            if i == 2 {
                ControlFlow::Break("stop")
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(stopped, ControlFlow::Break("stop"));
        assert_eq!(visited, vec![4, 3, 2]);
    }

    #[test]
    fn forward_from_root_is_pre_order() {
        let g = sample();
        assert_eq!(labels(g.traversal(Direction::Forward, &[])), PRE_ORDER);
    }

    #[test]
    fn forward_paths() {
        let g = sample();
        let paths: Vec<_> = g
            .traversal(Direction::Forward, &[])
            .map(|n| n.path)
            .collect();
        assert_eq!(
            paths,
            vec![
                vec![0],
                vec![1],
                vec![1, 0],
                vec![1, 1],
                vec![1, 1, 0],
                vec![1, 1, 1],
                vec![1, 2],
                vec![1, 3],
                vec![2],
                vec![3],
                vec![3, 0],
                vec![3, 1],
                vec![4],
            ]
        );
        for n in g.traversal(Direction::Forward, &[]) {
            assert_eq!(g.item_at(&n.path), Some(n.item), "path {:?}", n.path);
        }
    }

    #[test]
    fn backward_from_end_is_mirrored() {
        let g = sample();
        let mut expected: Vec<_> = PRE_ORDER.to_vec();
        expected.reverse();
        assert_eq!(labels(g.traversal(Direction::Backward, &[])), expected);
    }

    #[test]
    fn forward_resumes_mid_tree() {
        let g = sample();
        assert_eq!(
            labels(g.traversal(Direction::Forward, &[1, 1, 1])),
            ["3", "4", "5", "6", "C", "7", "8", "9"]
        );
        assert_eq!(
            labels(g.traversal(Direction::Forward, &[1, 1])),
            ["B", "2", "3", "4", "5", "6", "C", "7", "8", "9"]
        );
        assert_eq!(labels(g.traversal(Direction::Forward, &[4])), ["9"]);
    }

    #[test]
    fn backward_resumes_mid_tree() {
        let g = sample();
        assert_eq!(
            labels(g.traversal(Direction::Backward, &[1, 1, 1])),
            ["3", "2", "B", "1", "A", "0"]
        );
        assert_eq!(
            labels(g.traversal(Direction::Backward, &[1, 1])),
            ["B", "1", "A", "0"]
        );
        assert_eq!(
            labels(g.traversal(Direction::Backward, &[3])),
            ["C", "6", "5", "4", "3", "2", "B", "1", "A", "0"]
        );
    }

    #[test]
    fn backward_paths_address_items() {
        let g = sample();
        for n in g.traversal(Direction::Backward, &[]) {
            assert_eq!(g.item_at(&n.path), Some(n.item), "path {:?}", n.path);
        }
    }

    #[test]
    fn traversal_symmetry_from_every_node() {
        let g = sample();
        let forward: Vec<_> = g.traversal(Direction::Forward, &[]).collect();
        for (k, node) in forward.iter().enumerate() {
            let from_here: Vec<_> = g.traversal(Direction::Forward, &node.path).collect();
            assert_eq!(from_here, &forward[k..], "forward from {:?}", node.path);

            let back: Vec<_> = g.traversal(Direction::Backward, &node.path).collect();
            let mut expected = forward[..=k].to_vec();
            expected.reverse();
            assert_eq!(back, expected, "backward from {:?}", node.path);
        }
    }

    #[test]
    fn invalid_start_paths_yield_nothing() {
        let g = sample();
        assert_eq!(g.traversal(Direction::Forward, &[5]).count(), 0);
        assert_eq!(g.traversal(Direction::Backward, &[5]).count(), 0);
        assert_eq!(g.traversal(Direction::Forward, &[0, 0]).count(), 0);
        assert_eq!(g.traversal(Direction::Forward, &[1, 9]).count(), 0);
    }

    #[test]
    fn traverse_callback_stops_early() {
        let g = sample();
        let mut seen = Vec::new();
        let r = g.traverse(Direction::Forward, &[1], |path, item| {
            seen.push(label(item));
            if path == [1, 1] {
                ControlFlow::Break(path.to_vec())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(r, ControlFlow::Break(vec![1, 1]));
        assert_eq!(seen, ["A", "1", "B"]);
    }

    #[test]
    fn traversal_over_bucketed_tree_visits_every_id() {
        let g = GroupBuilder::new("root", Range::new(0, 700)).add_atoms(|_| true, 45);
        let ids: Vec<_> = g
            .traversal(Direction::Forward, &[])
            .filter_map(|n| n.item.as_id())
            .collect();
        assert_eq!(ids.len(), 700);
        assert!(
            ids.windows(2).all(|w| w[0] < w[1]),
            "ids must ascend in pre-order"
        );
        let groups = g
            .traversal(Direction::Backward, &[])
            .filter(|n| n.item.as_group().is_some())
            .count();
        assert_eq!(groups, 16);
    }
}
