// Copyright 2026 the Cmdtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and Chrome trace export for cmdtree diagnostics.
//!
//! This crate provides development tooling on top of `cmdtree_core`:
//!
//! - [`pretty::PrettyPrintSink`]: a [`TraceSink`](cmdtree_core::trace::TraceSink)
//!   writing one line per construction event.
//! - [`pretty::write_tree`]: an indented dump of a finished [`Group`](cmdtree_core::Group).
//! - [`chrome::export`]: writes a finished tree as Chrome Trace Event Format
//!   JSON, with command ids on the time axis.

pub mod chrome;
pub mod pretty;
