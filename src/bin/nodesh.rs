//! Thin interactive front end for the `nodesh` engine (spec §10.1
//! ambient-stack note: the engine itself never reads a line of input).
//!
//! Parsing here is deliberately minimal: whitespace-split words and a
//! `|` pipe separator, no quoting, no here-docs, no redirections. A real
//! front end would hand the engine's [`Node`] contract a tree built by a
//! proper lexer/parser; this binary exists only to exercise the engine
//! end to end.

use std::io::{self, Write};

use nodesh::{Node, ShellState, SimpleCommand, interpret};

fn main() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut state = ShellState::new();

    loop {
        print!("nodesh> ");
        if stdout.flush().is_err() {
            break;
        }

        let mut input = String::new();
        match stdin.read_line(&mut input) {
            Ok(0) => {
                println!("\nGoodbye!");
                break;
            }
            Ok(_) => {
                let trimmed = input.trim();
                if trimmed.is_empty() {
                    continue;
                }

                match parse_line(trimmed) {
                    Some(node) => {
                        let status = interpret(&node, &mut state);
                        state.last_status = status;
                    }
                    None => continue,
                }
            }
            Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
            Err(error) => {
                eprintln!("nodesh: error reading input: {error}");
                break;
            }
        }
    }

    std::process::exit(state.last_status);
}

/// Build a `Node` from one line: `|`-separated stages of whitespace-split
/// words, with a trailing bare `&` backgrounding the whole line.
fn parse_line(line: &str) -> Option<Node> {
    let (line, background) = match line.strip_suffix('&') {
        Some(rest) => (rest.trim_end(), true),
        None => (line, false),
    };

    let mut stages = line.split('|').map(|stage| {
        let argv: Vec<String> = stage.split_whitespace().map(str::to_string).collect();
        argv
    });

    let first = stages.next()?;
    if first.is_empty() {
        return None;
    }
    let mut node = Node::Simple(SimpleCommand::new(first));

    for argv in stages {
        if argv.is_empty() {
            return None;
        }
        node = Node::pipe(node, Node::Simple(SimpleCommand::new(argv)));
    }

    if background {
        node = Node::background(node, None);
    }

    Some(node)
}
