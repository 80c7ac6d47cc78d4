//! End-to-end tests driving the engine directly through `Node` trees and
//! `interpret`, independent of the demo binary's line parsing.

use nodesh::{FromRedirect, Node, ShellState, SimpleCommand, Subshell, ToRedirect, interpret};

fn cmd(words: &[&str]) -> Node {
    Node::Simple(SimpleCommand::new(words.iter().map(|s| s.to_string()).collect()))
}

#[test]
fn simple_command_status_fidelity() {
    let mut state = ShellState::new();
    assert_eq!(interpret(&cmd(&["true"]), &mut state), 0);
    assert_eq!(interpret(&cmd(&["false"]), &mut state), 1);
    assert_eq!(interpret(&cmd(&["sh", "-c", "exit 42"]), &mut state), 42);
}

#[test]
fn missing_program_reports_errno_not_a_shell_sentinel() {
    let mut state = ShellState::new();
    assert_eq!(interpret(&cmd(&["definitely-not-a-real-program-xyz"]), &mut state), 2); // ENOENT, per spec §8 E8
}

#[test]
fn and_or_short_circuit_laws() {
    let mut state = ShellState::new();
    assert_eq!(interpret(&Node::and(cmd(&["true"]), cmd(&["false"])), &mut state), 1);
    assert_eq!(interpret(&Node::and(cmd(&["false"]), cmd(&["true"])), &mut state), 1);
    assert_eq!(interpret(&Node::or(cmd(&["true"]), cmd(&["false"])), &mut state), 0);
    assert_eq!(interpret(&Node::or(cmd(&["false"]), cmd(&["true"])), &mut state), 0);
}

#[test]
fn sequence_surfaces_rightmost_status_when_present() {
    let mut state = ShellState::new();
    let tree = Node::seq(cmd(&["false"]), Some(cmd(&["true"])));
    assert_eq!(interpret(&tree, &mut state), 0);
}

#[test]
fn sequence_surfaces_left_status_when_right_absent() {
    let mut state = ShellState::new();
    let tree = Node::seq(cmd(&["false"]), None);
    assert_eq!(interpret(&tree, &mut state), 1);
}

#[test]
fn pipeline_reports_rightmost_stage_status_not_pipefail() {
    let mut state = ShellState::new();
    let tree = Node::pipe(cmd(&["false"]), cmd(&["true"]));
    assert_eq!(interpret(&tree, &mut state), 0);

    let tree = Node::pipe(cmd(&["true"]), cmd(&["false"]));
    assert_eq!(interpret(&tree, &mut state), 1);
}

#[test]
fn pipeline_carries_data_between_stages() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("piped.txt");
    let mut state = ShellState::new();
    let right = Node::Simple(
        SimpleCommand::new(vec!["cat".to_string()]).with_to(ToRedirect::Out(out.to_str().unwrap().to_string())),
    );
    let tree = Node::pipe(cmd(&["echo", "through-the-pipe"]), right);
    assert_eq!(interpret(&tree, &mut state), 0);
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "through-the-pipe\n");
}

#[test]
fn locals_never_leak_into_the_parent_process_environment() {
    let mut state = ShellState::new();
    let node = Node::Simple(
        SimpleCommand::new(vec!["sh".to_string(), "-c".to_string(), "exit 0".to_string()])
            .with_locals(vec![("NODESH_ENGINE_TEST_LOCAL".to_string(), "1".to_string())]),
    );
    interpret(&node, &mut state);
    assert!(std::env::var("NODESH_ENGINE_TEST_LOCAL").is_err());
}

#[test]
fn subshell_isolates_directory_changes_from_the_parent() {
    let start = std::env::current_dir().unwrap();
    let mut state = ShellState::new();
    let tmp = std::env::temp_dir();

    let body = Node::Simple(SimpleCommand::new(vec![
        "sh".to_string(),
        "-c".to_string(),
        format!("cd {} && exit 7", tmp.display()),
    ]));
    let tree = Node::subshell(Subshell::new(body));
    assert_eq!(interpret(&tree, &mut state), 7);
    assert_eq!(std::env::current_dir().unwrap(), start);
}

#[test]
fn here_document_feeds_exact_body_as_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("here.txt");
    let mut state = ShellState::new();
    let node = Node::Simple(
        SimpleCommand::new(vec!["cat".to_string()])
            .with_from(FromRedirect::InHere("one\ntwo\n".to_string()))
            .with_to(ToRedirect::Out(out.to_str().unwrap().to_string())),
    );
    assert_eq!(interpret(&node, &mut state), 0);
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "one\ntwo\n");
}

#[test]
fn directory_stack_round_trips_through_builtins() {
    let mut state = ShellState::new();
    let start = std::env::current_dir().unwrap();
    let tmp = std::env::temp_dir();

    let pushd = Node::Simple(SimpleCommand::new(vec![
        "pushd".to_string(),
        tmp.to_str().unwrap().to_string(),
    ]));
    assert_eq!(interpret(&pushd, &mut state), 0);
    assert!(!state.dirstack.is_empty());

    let popd = Node::Simple(SimpleCommand::new(vec!["popd".to_string()]));
    assert_eq!(interpret(&popd, &mut state), 0);
    assert!(state.dirstack.is_empty());
    assert_eq!(std::env::current_dir().unwrap(), start);
}

#[test]
fn background_node_does_not_block_the_caller() {
    let mut state = ShellState::new();
    let slow = Node::Simple(SimpleCommand::new(vec![
        "sh".to_string(),
        "-c".to_string(),
        "sleep 0.2".to_string(),
    ]));
    let tree = Node::background(slow, None);
    let started = std::time::Instant::now();
    let status = interpret(&tree, &mut state);
    assert_eq!(status, 0);
    assert!(started.elapsed() < std::time::Duration::from_millis(150));
}
