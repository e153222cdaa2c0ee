// Copyright 2026 the Cmdtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Indexes a synthetic capture and pages through it the way a command list
//! view would.
//!
//! Three frames of commands are declared as nested frame and render-pass
//! groups while a [`PrettyPrintSink`](cmdtree_debug::pretty::PrettyPrintSink)
//! and a [`BuildStats`] observe construction. The tree is then sealed with a
//! state-change filter and a fan-out bound, dumped, paged through forwards and
//! backwards, and exported as a Chrome trace JSON file.

use std::fs::File;
use std::io::BufWriter;

use cmdtree_core::trace::{
    AtomsFilledEvent, BuildStats, GroupInsertedEvent, OverlapRejectedEvent, SubGroupsEvent,
    TraceSink, Tracer,
};
use cmdtree_core::{Direction, FillConfig, GroupBuilder, GroupOrId, Id, Range};

use cmdtree_debug::pretty::PrettyPrintSink;

const FRAME_COUNT: u64 = 3;
const PASSES_PER_FRAME: u64 = 2;
const DRAWS_PER_PASS: u64 = 12;
/// Rows shown per page by the simulated list view.
const PAGE: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cmd {
    BeginFrame,
    BeginPass,
    SetState,
    Draw,
    EndPass,
    Present,
}

/// Forwards every event to two sinks.
struct Tee<'a> {
    a: &'a mut dyn TraceSink,
    b: &'a mut dyn TraceSink,
}

impl TraceSink for Tee<'_> {
    fn on_group_inserted(&mut self, e: &GroupInsertedEvent<'_>) {
        self.a.on_group_inserted(e);
        self.b.on_group_inserted(e);
    }

    fn on_overlap_rejected(&mut self, e: &OverlapRejectedEvent<'_>) {
        self.a.on_overlap_rejected(e);
        self.b.on_overlap_rejected(e);
    }

    fn on_atoms_filled(&mut self, e: &AtomsFilledEvent<'_>) {
        self.a.on_atoms_filled(e);
        self.b.on_atoms_filled(e);
    }

    fn on_sub_groups_created(&mut self, e: &SubGroupsEvent<'_>) {
        self.a.on_sub_groups_created(e);
        self.b.on_sub_groups_created(e);
    }
}

/// A declared scope, recorded while the capture is synthesized.
struct Scope {
    start: u64,
    end: u64,
    name: String,
}

fn main() {
    // -- synthesize capture ------------------------------------------------
    let mut cmds = Vec::new();
    let mut scopes = Vec::new();
    for frame in 0..FRAME_COUNT {
        let frame_start = cmds.len() as u64;
        cmds.push(Cmd::BeginFrame);
        for pass in 0..PASSES_PER_FRAME {
            let pass_start = cmds.len() as u64;
            cmds.push(Cmd::BeginPass);
            for draw in 0..DRAWS_PER_PASS {
                if draw % 4 == 0 {
                    cmds.push(Cmd::SetState);
                }
                cmds.push(Cmd::Draw);
            }
            cmds.push(Cmd::EndPass);
            scopes.push(Scope {
                start: pass_start,
                end: cmds.len() as u64,
                name: format!("Render Pass {pass}"),
            });
        }
        cmds.push(Cmd::Present);
        scopes.push(Scope {
            start: frame_start,
            end: cmds.len() as u64,
            name: format!("Frame {}", frame + 1),
        });
    }
    // A marker that straddles two passes, as a misbehaving capture might record.
    let (start, end) = (scopes[0].start + 3, scopes[1].start + 3);
    scopes.push(Scope {
        start,
        end,
        name: "Debug Marker".into(),
    });

    // -- sinks -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let mut stats = BuildStats::default();

    // -- build -------------------------------------------------------------
    let capture = Range::new(0, cmds.len() as u64);
    let mut builder = GroupBuilder::new("Capture", capture);
    let tree = {
        let mut tee = Tee {
            a: &mut pretty,
            b: &mut stats,
        };
        let mut tracer = Tracer::new(&mut tee);
        for scope in scopes {
            if let Err(e) = builder.add_group_traced(scope.start, scope.end, scope.name, &mut tracer)
            {
                println!("skipped: {e}");
            }
        }
        // Hide state changes from the list.
        let mut listed = |id: Id| {
            usize::try_from(id.get())
                .ok()
                .and_then(|i| cmds.get(i))
                .is_some_and(|&cmd| cmd != Cmd::SetState)
        };
        builder.finish(&mut listed, FillConfig::bounded(10), &mut tracer)
    };
    println!("{stats:#?}");

    // -- dump --------------------------------------------------------------
    let mut stdout = std::io::stdout();
    cmdtree_debug::pretty::write_tree(&tree, 2, &mut stdout).expect("failed to write tree");

    // -- page through ------------------------------------------------------
    let mut top: Vec<u64> = Vec::new();
    for page in 0..3 {
        let rows: Vec<_> = tree
            .traversal(Direction::Forward, &top)
            .skip(usize::from(page > 0))
            .take(PAGE)
            .collect();
        println!("-- page {page} --");
        for row in &rows {
            print_row(&row.path, row.item);
        }
        match rows.last() {
            Some(last) => top.clone_from(&last.path),
            None => break,
        }
    }
    println!("-- back up --");
    for row in tree.traversal(Direction::Backward, &top).take(PAGE) {
        print_row(&row.path, row.item);
    }

    if let Some(path) = tree.path_of(Id(40)) {
        println!("command 40 is at {path:?}");
    }

    // -- export Chrome trace -----------------------------------------------
    let path = "cmdtree.json";
    let file = File::create(path).expect("failed to create cmdtree.json");
    let mut writer = BufWriter::new(file);
    cmdtree_debug::chrome::export(&tree, &mut writer).expect("failed to write Chrome trace");

    println!("Wrote {path} ({} commands)", capture.len());
}

fn print_row(path: &[u64], item: GroupOrId<'_>) {
    let indent = (path.len() - 1) * 2;
    match item {
        GroupOrId::Group(g) => println!("{:indent$}{} {}", "", g.name(), g.range()),
        GroupOrId::Id(id) => println!("{:indent$}{id}", ""),
    }
}
