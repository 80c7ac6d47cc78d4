//! Tree interpreter (spec §4.1/§6): the engine's single public entry point.
//!
//! `interpret` reaps completed background children once (C9), then
//! recursively evaluates the tree via `eval`. `eval` dispatches each node
//! kind to its owning component and writes `state.last_status` at every
//! node on the way back up (spec §4.1 post-step, §4.8): it never reaps
//! itself, so a nested `Pipe`/`Subcmd`/`SepBg` fork never races a
//! synchronous `wait` the way reaping at every recursion level would (spec
//! §9 design note).

use crate::ast::Node;
use crate::control;
use crate::pipeline;
use crate::reaper;
use crate::simple;
use crate::state::ShellState;
use crate::subshell;

/// Interpret one top-level command tree against `state`, returning its exit
/// status. `state.last_status` is updated to match before returning, so the
/// next call sees it via the synthesized `?` overlay.
pub fn interpret(node: &Node, state: &mut ShellState) -> i32 {
    reaper::reap_all();
    eval(node, state)
}

pub(crate) fn eval(node: &Node, state: &mut ShellState) -> i32 {
    let status = match node {
        Node::Simple(cmd) => simple::run(cmd, state),
        Node::Pipe { left, right } => pipeline::run(left, right, state),
        Node::SepAnd { left, right } => control::and(left, right, state),
        Node::SepOr { left, right } => control::or(left, right, state),
        Node::SepEnd { left, right } => control::seq(left, right.as_deref(), state),
        Node::SepBg { left, right } => control::background(left, right.as_deref(), state),
        Node::Subcmd(inner) => subshell::run(inner, state),
    };
    state.last_status = status;
    status
}
