//! Pipeline executor (spec §4.3/C5).
//!
//! Built generically over `Node`, not just a single external program:
//! each stage of `left | right` is forked and *recursively interpreted*
//! rather than exec'd directly, because a stage can itself be an
//! arbitrary pipeline, control-flow chain, builtin, or subshell: spec
//! only requires binary composition because parsing is left-associative
//! (an N-stage pipeline is nested `Pipe` nodes). Grounded on
//! `marchese29-ShipShell`'s `exec_pipeline_stage`/`run_pipeline`, which
//! forks each stage of a heterogeneous pipeline for the identical reason;
//! the teacher itself never needs this because it only ever pipes
//! external programs.

use std::os::fd::AsRawFd;

use nix::sys::wait::waitpid;
use nix::unistd::{ForkResult, Pid, dup2, fork, pipe};

use crate::ast::Node;
use crate::error::{self, ShellError};
use crate::interpreter;
use crate::state::ShellState;
use crate::status;

/// Run `left | right`. Returns the right stage's status: no `pipefail`,
/// rightmost-stage semantics (spec §4.3 step 5).
pub fn run(left: &Node, right: &Node, state: &mut ShellState) -> i32 {
    let (read_end, write_end) = match pipe() {
        Ok(ends) => ends,
        Err(e) => return error::report(&ShellError::Pipe(std::io::Error::from(e))),
    };

    // SAFETY: single-threaded at this point in the process's life; the
    // child only touches its own descriptor table before exec/exit.
    let left_pid = match unsafe { fork() } {
        Ok(ForkResult::Child) => {
            // SAFETY: `dup2` onto our own fd 1 only touches this freshly
            // forked process's descriptor table.
            let _ = dup2(write_end.as_raw_fd(), 1);
            drop(read_end);
            drop(write_end);
            let status = interpreter::eval(left, state);
            std::process::exit(status.clamp(0, 255));
        }
        Ok(ForkResult::Parent { child }) => child,
        Err(e) => return error::report(&ShellError::Fork(std::io::Error::from(e))),
    };

    // SAFETY: same as the left fork above.
    let right_pid = match unsafe { fork() } {
        Ok(ForkResult::Child) => {
            let _ = dup2(read_end.as_raw_fd(), 0);
            drop(read_end);
            drop(write_end);
            let status = interpreter::eval(right, state);
            std::process::exit(status.clamp(0, 255));
        }
        Ok(ForkResult::Parent { child }) => child,
        Err(e) => {
            // Left stage is already running; let it discover there's no
            // reader (it'll take SIGPIPE once the pipe buffer fills) and
            // reap it so it doesn't become a zombie, then report the
            // pipe-stage failure.
            drop(read_end);
            drop(write_end);
            let _ = waitpid(left_pid, None);
            return error::report(&ShellError::Fork(std::io::Error::from(e)));
        }
    };

    // Both pipe ends must be closed in the parent before waiting, or the
    // right stage may never see EOF on stdin (spec §4.3 step 4).
    drop(read_end);
    drop(write_end);

    let left_status = wait_for(left_pid);
    let right_status = wait_for(right_pid);

    let _ = left_status;
    right_status
}

fn wait_for(pid: Pid) -> i32 {
    match waitpid(pid, None) {
        Ok(wait_status) => status::from_wait_status(wait_status).unwrap_or(1),
        Err(e) => error::report(&ShellError::Wait(std::io::Error::from(e))),
    }
}
