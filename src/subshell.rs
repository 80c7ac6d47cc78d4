//! Subshell executor (spec §4.5/C7).
//!
//! `( body )` forks, applies `locals` and redirections only inside the
//! child, recursively interprets `body`, and exits with its status. The
//! parent waits synchronously: unlike a backgrounded node, a subshell's
//! result is needed immediately by whatever composed it (spec §4.5).

use nix::sys::wait::waitpid;
use nix::unistd::{ForkResult, fork};

use crate::ast::Subshell;
use crate::error::{self, ShellError};
use crate::interpreter;
use crate::redirect;
use crate::state::ShellState;
use crate::status;

pub fn run(node: &Subshell, state: &mut ShellState) -> i32 {
    // SAFETY: single-threaded; the child only mutates its own environment
    // and fds before recursively evaluating and exiting.
    match unsafe { fork() } {
        Ok(ForkResult::Child) => {
            // SAFETY: this process has just forked and is single-threaded;
            // no other thread can observe the environment mid-mutation.
            for (key, value) in crate::env::overlay_pairs(&node.locals, state.last_status) {
                unsafe { std::env::set_var(key, value) };
            }
            if let Err(e) = redirect::apply_in_process(&node.from, &node.to) {
                std::process::exit(error::report(&e));
            }
            let status = interpreter::eval(&node.body, state);
            std::process::exit(status.clamp(0, 255));
        }
        Ok(ForkResult::Parent { child }) => match waitpid(child, None) {
            Ok(wait_status) => status::from_wait_status(wait_status).unwrap_or(1),
            Err(e) => error::report(&ShellError::Wait(std::io::Error::from(e))),
        },
        Err(e) => error::report(&ShellError::Fork(std::io::Error::from(e))),
    }
}
