// Copyright 2026 the Cmdtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per
//! construction event to a [`Write`](std::io::Write) destination (default:
//! stderr). [`write_tree`] dumps a finished hierarchy with one line per span.

use std::io::{self, Write};

use cmdtree_core::trace::{
    AtomsFilledEvent, GroupInsertedEvent, OverlapRejectedEvent, Placement, SubGroupsEvent,
    TraceSink,
};
use cmdtree_core::{Group, Span};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn indent(depth: usize) -> usize {
    depth * 2
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_group_inserted(&mut self, e: &GroupInsertedEvent<'_>) {
        let how = match e.placement {
            Placement::Leaf => "leaf".to_owned(),
            Placement::Nested => "descend".to_owned(),
            Placement::Wrapped { wrapped } => format!("wrap {wrapped}"),
        };
        let _ = writeln!(
            self.writer,
            "{:w$}[group:{how}] '{}' {} depth={}",
            "",
            e.name,
            e.range,
            e.depth,
            w = indent(e.depth),
        );
    }

    fn on_overlap_rejected(&mut self, e: &OverlapRejectedEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "{:w$}[group:reject] '{}' {} overlaps '{}' {}",
            "",
            e.name,
            e.range,
            e.existing,
            e.existing_range,
            w = indent(e.depth),
        );
    }

    fn on_atoms_filled(&mut self, e: &AtomsFilledEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "{:w$}[fill] '{}' {} runs={} accepted={}/{}",
            "",
            e.name,
            e.range,
            e.leaf_spans,
            e.accepted,
            e.range.len(),
            w = indent(e.depth),
        );
    }

    fn on_sub_groups_created(&mut self, e: &SubGroupsEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "{:w$}[bucket] '{}' {} items={} -> {} (max {})",
            "",
            e.name,
            e.range,
            e.items,
            e.groups,
            e.max_children,
            w = indent(e.depth),
        );
    }
}

/// Writes `group` and its descendants, one line per span.
///
/// Groups print their name, bounds and direct item count; leaf runs print
/// their bounds and length. Children are indented two spaces per level.
/// Levels below `max_depth` are elided with a single `...` line.
///
/// # Errors
///
/// Propagates any error from `writer`.
pub fn write_tree(group: &Group, max_depth: usize, writer: &mut dyn Write) -> io::Result<()> {
    writeln!(writer, "{} {} ({} items)", group.name(), group.range(), group.count())?;
    write_spans(group, 1, max_depth, writer)
}

fn write_spans(
    group: &Group,
    depth: usize,
    max_depth: usize,
    writer: &mut dyn Write,
) -> io::Result<()> {
    let w = indent(depth);
    if depth > max_depth {
        if !group.spans().is_empty() {
            writeln!(writer, "{:w$}...", "")?;
        }
        return Ok(());
    }
    for span in group.spans() {
        match span {
            Span::Range(r) => writeln!(writer, "{:w$}{r} x{}", "", r.len())?,
            Span::Group(g) => {
                writeln!(
                    writer,
                    "{:w$}{} {} ({} items)",
                    "",
                    g.name(),
                    g.range(),
                    g.count()
                )?;
                write_spans(g, depth + 1, max_depth, writer)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdtree_core::trace::Tracer;
    use cmdtree_core::{FillConfig, GroupBuilder, Range};

    #[test]
    fn pretty_print_insert_and_reject() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        {
            let mut tracer = Tracer::new(&mut sink);
            let mut b = GroupBuilder::new("root", Range::new(0, 1000));
            b.add_group_traced(100, 200, "frame 1", &mut tracer).unwrap();
            let err = b.add_group_traced(150, 250, "bad", &mut tracer);
            assert!(err.is_err(), "partial overlap must be rejected");
        }
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.contains("[group:leaf] 'frame 1'"), "got: {output}");
        assert!(output.contains("[group:reject] 'bad'"), "got: {output}");
    }

    #[test]
    fn pretty_print_fill_and_bucket() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        {
            let mut tracer = Tracer::new(&mut sink);
            let _ = GroupBuilder::new("root", Range::new(0, 100)).finish(
                &mut |_| true,
                FillConfig::bounded(10),
                &mut tracer,
            );
        }
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.contains("[fill] 'root'"), "got: {output}");
        assert!(output.contains("[bucket] 'root'"), "got: {output}");
        assert!(output.contains("-> 10 (max 10)"), "got: {output}");
    }

    #[test]
    fn write_tree_indents_children() {
        let mut b = GroupBuilder::new("root", Range::new(0, 10));
        b.add_group(2, 5, "draw pass").unwrap();
        let g = b.add_atoms(|_| true, 0);

        let mut out = Vec::new();
        write_tree(&g, usize::MAX, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "root [0..10) (3 items)",
                "  [0..2) x2",
                "  draw pass [2..5) (1 items)",
                "    [2..5) x3",
                "  [5..10) x5",
            ]
        );
    }

    #[test]
    fn write_tree_elides_deep_levels() {
        let mut b = GroupBuilder::new("root", Range::new(0, 10));
        b.add_group(2, 5, "draw pass").unwrap();
        let g = b.add_atoms(|_| true, 0);

        let mut out = Vec::new();
        write_tree(&g, 1, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("    ...\n"), "got: {text}");
        assert!(!text.contains("[2..5) x3"), "got: {text}");
    }
}
