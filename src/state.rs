//! Interpreter-owned state threaded through every call to [`interpret`]
//! (spec §9 design notes).
//!
//! [`interpret`]: crate::interpreter::interpret

use crate::dirstack::DirectoryStack;

/// Everything the engine needs across calls, besides the command tree
/// itself: the directory stack (C1) and the last-observed exit status
/// (C8). Both are owned here rather than behind a process-wide global, so
/// that constructing a fresh `ShellState` gives a hermetic engine instance
/// for tests (spec §9).
pub struct ShellState {
    pub dirstack: DirectoryStack,
    /// Last-observed exit status. Spec §3.3 models this as a process-wide
    /// `?` environment entry; per the §9 design note this crate keeps it as
    /// a plain field and synthesizes the `?` environment variable only when
    /// spawning a child (see `crate::env::overlay`), which is behaviorally
    /// indistinguishable from the env-based approach without the races that
    /// come from mutating the real process environment from a shell that
    /// might one day run on more than one thread.
    pub last_status: i32,
}

impl ShellState {
    pub fn new() -> Self {
        ShellState {
            dirstack: DirectoryStack::new(),
            last_status: 0,
        }
    }
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new()
    }
}
