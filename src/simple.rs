//! Simple command executor (spec §4.2/C4).

use std::process::Command;

use crate::ast::SimpleCommand;
use crate::builtins::{self, BuiltinOutcome};
use crate::env;
use crate::error::{self, ShellError};
use crate::redirect;
use crate::state::ShellState;
use crate::status;

/// Run a `Simple` node: dispatch to a builtin if `argv[0]` names one,
/// otherwise fork+exec the external program with `locals` and redirections
/// applied only to the child (spec §4.2).
pub fn run(cmd: &SimpleCommand, state: &mut ShellState) -> i32 {
    match builtins::dispatch(
        &cmd.argv,
        &mut state.dirstack,
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    ) {
        BuiltinOutcome::Handled(code) => return code,
        BuiltinOutcome::NotBuiltin => {}
    }

    match run_external(cmd, state.last_status) {
        Ok(code) => code,
        Err(err) => error::report(&err),
    }
}

fn run_external(cmd: &SimpleCommand, last_status: i32) -> Result<i32, ShellError> {
    let mut command = Command::new(&cmd.argv[0]);
    command.args(&cmd.argv[1..]);
    env::overlay(&mut command, &cmd.locals, last_status);
    redirect::apply_to_command(&mut command, &cmd.from, &cmd.to)?;

    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(source) => {
            if source.kind() == std::io::ErrorKind::NotFound {
                return Err(ShellError::NotFound(cmd.argv[0].clone(), source));
            }
            return Err(ShellError::Spawn { program: cmd.argv[0].clone(), source });
        }
    };

    let exit_status = child.wait().map_err(ShellError::Wait)?;
    Ok(status::from_exit_status(exit_status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{FromRedirect, ToRedirect};

    fn argv(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exit_status_propagates() {
        let mut state = ShellState::new();
        let cmd = SimpleCommand::new(argv(&["true"]));
        assert_eq!(run(&cmd, &mut state), 0);

        let cmd = SimpleCommand::new(argv(&["false"]));
        assert_eq!(run(&cmd, &mut state), 1);
    }

    #[test]
    fn missing_program_reports_errno_not_a_shell_sentinel() {
        let mut state = ShellState::new();
        let cmd = SimpleCommand::new(argv(&["definitely-not-a-real-program-xyz"]));
        assert_eq!(run(&cmd, &mut state), 2); // ENOENT, per spec §8 E8
    }

    #[test]
    fn locals_are_not_applied_to_the_parent() {
        let mut state = ShellState::new();
        let cmd = SimpleCommand::new(argv(&["true"])).with_locals(vec![(
            "NODESH_TEST_LOCAL_ONLY".to_string(),
            "1".to_string(),
        )]);
        run(&cmd, &mut state);
        assert!(std::env::var("NODESH_TEST_LOCAL_ONLY").is_err());
    }

    #[test]
    fn redirection_writes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut state = ShellState::new();
        let cmd = SimpleCommand::new(argv(&["echo", "hello"]))
            .with_to(ToRedirect::Out(path.to_str().unwrap().to_string()));
        assert_eq!(run(&cmd, &mut state), 0);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
    }

    #[test]
    fn here_doc_feeds_stdin() {
        let mut state = ShellState::new();
        let dir = tempfile::tempdir().unwrap();
        let out_path = dir.path().join("cat_out.txt");
        let cmd = SimpleCommand::new(argv(&["cat"]))
            .with_from(FromRedirect::InHere("abc\n".to_string()))
            .with_to(ToRedirect::Out(out_path.to_str().unwrap().to_string()));
        assert_eq!(run(&cmd, &mut state), 0);
        assert_eq!(std::fs::read_to_string(&out_path).unwrap(), "abc\n");
    }
}
