//! Built-in dispatcher (spec §4.7/C2).
//!
//! Built-ins run in the current process: they must, since their entire
//! purpose (`cd`, `pushd`, `popd`) is to mutate state that only matters if
//! it survives in the parent. They never fork and never consume `locals`
//! or redirections (spec §4.7).

use std::io::Write;

use crate::dirstack::DirectoryStack;

/// Three-valued dispatch result (spec §9 design note): the source this
/// spec was distilled from used a sentinel `-1` for "not a builtin";
/// `NotBuiltin` makes that distinction a type instead of a magic number.
pub enum BuiltinOutcome {
    NotBuiltin,
    Handled(i32),
}

/// Dispatch `argv` to a builtin if it names one (spec: `cd`/`pushd`/`popd`
/// only: this engine has no `echo`/`export`/history/job-control builtins,
/// those are out of scope per spec §1).
pub fn dispatch(
    argv: &[String],
    dirstack: &mut DirectoryStack,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> BuiltinOutcome {
    match argv[0].as_str() {
        "cd" => BuiltinOutcome::Handled(builtin_cd(&argv[1..], stderr)),
        "pushd" => BuiltinOutcome::Handled(builtin_pushd(&argv[1..], dirstack, stdout, stderr)),
        "popd" => BuiltinOutcome::Handled(builtin_popd(&argv[1..], dirstack, stdout, stderr)),
        _ => BuiltinOutcome::NotBuiltin,
    }
}

fn builtin_cd(args: &[String], stderr: &mut dyn Write) -> i32 {
    let target = match args {
        [] => match std::env::var("HOME") {
            Ok(home) => home,
            Err(_) => {
                let _ = writeln!(stderr, "cd: HOME not set");
                return 1;
            }
        },
        [dir] => dir.clone(),
        _ => {
            let _ = writeln!(stderr, "cd: too many arguments");
            return 1;
        }
    };

    match std::env::set_current_dir(&target) {
        Ok(()) => 0,
        Err(e) => {
            let _ = writeln!(stderr, "cd: {target}: {e}");
            errno_of(&e)
        }
    }
}

fn builtin_pushd(args: &[String], dirstack: &mut DirectoryStack, stdout: &mut dyn Write, stderr: &mut dyn Write) -> i32 {
    let dir = match args {
        [dir] => dir,
        _ => {
            let _ = writeln!(stderr, "pushd: usage: pushd dir");
            return 1;
        }
    };

    let prev = match std::env::current_dir() {
        Ok(path) => path,
        Err(e) => {
            let _ = writeln!(stderr, "pushd: {e}");
            return errno_of(&e);
        }
    };

    if let Err(e) = std::env::set_current_dir(dir) {
        let _ = writeln!(stderr, "pushd: {dir}: {e}");
        return errno_of(&e);
    }

    dirstack.push(prev.display().to_string());

    let cwd = std::env::current_dir().map(|p| p.display().to_string()).unwrap_or_default();
    let rest = dirstack.render_top_to_bottom();
    if rest.is_empty() {
        let _ = writeln!(stdout, "{cwd}");
    } else {
        let _ = writeln!(stdout, "{cwd} {rest}");
    }
    0
}

fn builtin_popd(args: &[String], dirstack: &mut DirectoryStack, stdout: &mut dyn Write, stderr: &mut dyn Write) -> i32 {
    if !args.is_empty() {
        let _ = writeln!(stderr, "popd: too many arguments");
        return 1;
    }

    let Some(target) = dirstack.pop() else {
        let _ = writeln!(stderr, "popd: directory stack empty");
        return 1;
    };

    let mut status = 0;
    if let Err(e) = std::env::set_current_dir(&target) {
        let _ = writeln!(stderr, "popd: {target}: {e}");
        status = errno_of(&e);
    }

    let cwd = std::env::current_dir().map(|p| p.display().to_string()).unwrap_or(target);
    let rest = dirstack.render_top_to_bottom();
    if rest.is_empty() {
        let _ = writeln!(stdout, "{cwd}");
    } else {
        let _ = writeln!(stdout, "{cwd} {rest}");
    }
    status
}

fn errno_of(e: &std::io::Error) -> i32 {
    e.raw_os_error().unwrap_or(1).clamp(0, 255)
}
