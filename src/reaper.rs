//! Background-child reaper (spec §4.9/C9).
//!
//! Called once, at the top of [`crate::interpreter::interpret`], never from
//! inside `eval`'s recursion: reaping mid-recursion could steal a pid a
//! pipeline or subshell stage is about to `waitpid` on synchronously (spec
//! §9 design note). `waitpid(-1, WNOHANG)` only ever observes children this
//! process itself forked, so it can't reach across to anyone else's.

use nix::sys::wait::{WaitPidFlag, WaitStatus, waitpid};
use nix::unistd::Pid;

use crate::status;

pub fn reap_all() {
    loop {
        match waitpid(Pid::from_raw(-1), Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::StillAlive) => break,
            Ok(wait_status) => {
                if let (Some(pid), Some(code)) = (wait_status.pid(), status::from_wait_status(wait_status)) {
                    eprintln!("Completed: {pid} ({code})");
                }
            }
            Err(nix::errno::Errno::ECHILD) => break,
            Err(e) => {
                eprintln!("nodesh: reap: {e}");
                break;
            }
        }
    }
}
