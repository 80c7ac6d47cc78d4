//! Exit-status encoding (spec §3.4): normal exit keeps the low 8 bits:
//! signaled termination maps to `128 + signal`.

/// Convert a `std::process::ExitStatus` (external commands spawned via
/// `std::process::Command`, spec §4.2) into the engine's status encoding.
pub fn from_exit_status(status: std::process::ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

/// Convert a `nix::sys::wait::WaitStatus` (raw-forked pipeline/subshell/
/// background children, spec §4.3/§4.4/§4.5/§4.9) into the engine's status
/// encoding. `None` means the status doesn't represent termination (e.g.
/// `Stopped`/`Continued`): callers only call this once a child is known
/// to have exited or been killed by a signal.
#[cfg(unix)]
pub fn from_wait_status(status: nix::sys::wait::WaitStatus) -> Option<i32> {
    use nix::sys::wait::WaitStatus;
    match status {
        WaitStatus::Exited(_, code) => Some(code),
        WaitStatus::Signaled(_, signal, _) => Some(128 + signal as i32),
        _ => None,
    }
}
