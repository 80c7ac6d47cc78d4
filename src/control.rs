//! Control-flow composer (spec §4.4/C6).

use nix::unistd::{ForkResult, fork};

use crate::ast::Node;
use crate::error::{self, ShellError};
use crate::interpreter::eval;
use crate::state::ShellState;

/// `left && right`: short-circuit AND. Result is whichever side actually
/// ran last.
pub fn and(left: &Node, right: &Node, state: &mut ShellState) -> i32 {
    let left_status = eval(left, state);
    if left_status == 0 { eval(right, state) } else { left_status }
}

/// `left || right`: short-circuit OR.
pub fn or(left: &Node, right: &Node, state: &mut ShellState) -> i32 {
    let left_status = eval(left, state);
    if left_status != 0 { eval(right, state) } else { left_status }
}

/// `left ; right`: unconditional sequence. `left`'s status is discarded;
/// if `right` is absent, `left`'s status is what's surfaced (spec §9 open
/// question, resolved by following the source: the former).
pub fn seq(left: &Node, right: Option<&Node>, state: &mut ShellState) -> i32 {
    let left_status = eval(left, state);
    match right {
        Some(right) => eval(right, state),
        None => left_status,
    }
}

/// `left &` (optionally followed by `right` run synchronously). Forks a
/// child that interprets `left` and exits with its status; the parent
/// never waits for it (spec §4.4): it's picked up later by the reaper
/// (C9, spec §4.9).
pub fn background(left: &Node, right: Option<&Node>, state: &mut ShellState) -> i32 {
    // SAFETY: single-threaded; the child only evaluates `left` and exits.
    match unsafe { fork() } {
        Ok(ForkResult::Child) => {
            let status = eval(left, state);
            std::process::exit(status.clamp(0, 255));
        }
        Ok(ForkResult::Parent { child }) => {
            eprintln!("Backgrounded: {child}");
        }
        Err(e) => return error::report(&ShellError::Fork(std::io::Error::from(e))),
    }

    match right {
        Some(right) => eval(right, state),
        None => 0,
    }
}
