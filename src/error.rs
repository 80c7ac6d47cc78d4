//! Typed errors for the interpreter's internal fallible paths (spec §7,
//! §9 "three-valued built-in return" note).
//!
//! `ShellError` never crosses the public `interpret` boundary: every
//! component converts its `Result<_, ShellError>` into a plain exit code
//! via [`report`] before returning. This keeps the contract in spec §6
//! (`interpret(node) -> integer status`) exact while still giving internal
//! code `?`-propagation instead of hand-rolled sentinel checks.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("fork failed: {0}")]
    Fork(#[source] io::Error),

    #[error("failed to create pipe: {0}")]
    Pipe(#[source] io::Error),

    #[error("waitpid failed: {0}")]
    Wait(#[source] io::Error),

    #[error("{path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to duplicate descriptor: {0}")]
    Dup(#[source] io::Error),

    #[error("command not found: {0}: {1}")]
    NotFound(String, #[source] io::Error),

    #[error("{program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    Usage(String),

    #[error("unknown node kind: {0}")]
    UnknownNode(String),
}

impl ShellError {
    /// Maps this error onto a `[0, 255]` exit status per spec §3.4/§4.2/§7
    /// and the worked example in §8 (E8): usage errors are always `1`;
    /// every other failure (including exec failure, e.g. "command not
    /// found") reports the underlying `errno` clamped into range, not a
    /// conventional shell sentinel.
    pub fn exit_code(&self) -> i32 {
        match self {
            ShellError::Usage(_) => 1,
            ShellError::UnknownNode(_) => 1,
            ShellError::NotFound(_, e) => errno_of(e),
            ShellError::Fork(e)
            | ShellError::Pipe(e)
            | ShellError::Wait(e)
            | ShellError::Dup(e) => errno_of(e),
            ShellError::Open { source, .. } => errno_of(source),
            ShellError::Spawn { source, .. } => errno_of(source),
        }
    }
}

fn errno_of(e: &io::Error) -> i32 {
    e.raw_os_error().unwrap_or(1).clamp(0, 255)
}

/// Prints the spec-mandated `nodesh: ...` diagnostic to stderr and returns
/// the exit code the caller should propagate. One call site for the
/// "every failure is diagnosed and converted to a status" policy in §7.
pub fn report(err: &ShellError) -> i32 {
    eprintln!("nodesh: {err}");
    err.exit_code()
}
