// Copyright 2026 the Cmdtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] writes a finished [`Group`] tree as [Chrome Trace Event
//! Format][spec] JSON. Command ids stand in for time: every group and every
//! leaf run becomes a complete (`"X"`) event whose `ts` is its first id and
//! whose `dur` is its length, so the viewer's flame chart shows the hierarchy
//! laid out along the command stream.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use cmdtree_core::{Group, Span};

/// Exports `root` and its descendants as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
/// Events are emitted in pre-order, with the root first.
///
/// # Errors
///
/// Propagates any serialization or I/O error from `writer`.
pub fn export(root: &Group, writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();
    push_group(root, 0, &mut events);
    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn push_group(group: &Group, depth: usize, events: &mut Vec<Value>) {
    let range = group.range();
    events.push(json!({
        "ph": "X",
        "name": group.name(),
        "cat": "Group",
        "ts": range.start.get(),
        "dur": range.len(),
        "pid": 0,
        "tid": 0,
        "args": {
            "depth": depth,
            "items": group.count(),
        }
    }));
    for span in group.spans() {
        match span {
            Span::Group(g) => push_group(g, depth + 1, events),
            Span::Range(r) => events.push(json!({
                "ph": "X",
                "name": format!("{r}"),
                "cat": "Commands",
                "ts": r.start.get(),
                "dur": r.len(),
                "pid": 0,
                "tid": 0,
                "args": {
                    "depth": depth + 1,
                    "commands": r.len(),
                }
            })),
        }
    }
}
