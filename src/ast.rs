//! The command tree consumed from the parser (spec §3.1).
//!
//! `Node` is the fixed contract between the engine and whatever external
//! component builds the tree (lexer/parser, not part of this crate). The
//! engine only ever reads a `Node`; it never mutates one.

/// Input-side redirection carried by [`Simple`](Node::Simple) and
/// [`Subcmd`](Node::Subcmd) nodes. Generalizes the spec's `fromType`/
/// `fromFile` pair into a single sum type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FromRedirect {
    /// No input redirection.
    None,
    /// `< path`: read stdin from `path`.
    In(String),
    /// `<< body`: feed `body` as stdin, followed by EOF.
    InHere(String),
}

/// Output-side redirection carried by [`Simple`](Node::Simple) and
/// [`Subcmd`](Node::Subcmd) nodes. Generalizes the spec's `toType`/`toFile`
/// pair into a single sum type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToRedirect {
    /// No output redirection.
    None,
    /// `> path`: truncate and write stdout to `path`.
    Out(String),
    /// `>> path`: append stdout to `path`.
    OutAppend(String),
    /// `&> path`: truncate and write both stdout and stderr to `path`.
    OutErr(String),
}

/// A program invocation: `argv[0]` is the program name, `argv[1..]` its
/// arguments. `locals` are environment overlays visible only to this
/// invocation (spec §4.2 step 2: never applied to the parent).
#[derive(Debug, Clone)]
pub struct SimpleCommand {
    pub argv: Vec<String>,
    pub locals: Vec<(String, String)>,
    pub from: FromRedirect,
    pub to: ToRedirect,
}

impl SimpleCommand {
    /// Builds a `Simple` invocation with no locals and no redirections.
    /// `argv` must be non-empty (spec §3.1 invariant); violating that is a
    /// contract bug in the caller, not a runtime condition the engine
    /// handles gracefully, so it panics rather than returning a status.
    pub fn new(argv: Vec<String>) -> Self {
        assert!(!argv.is_empty(), "Simple node requires argc >= 1");
        SimpleCommand {
            argv,
            locals: Vec::new(),
            from: FromRedirect::None,
            to: ToRedirect::None,
        }
    }

    pub fn with_locals(mut self, locals: Vec<(String, String)>) -> Self {
        self.locals = locals;
        self
    }

    pub fn with_from(mut self, from: FromRedirect) -> Self {
        self.from = from;
        self
    }

    pub fn with_to(mut self, to: ToRedirect) -> Self {
        self.to = to;
        self
    }
}

/// An isolated subshell body plus the locals/redirections that apply to it
/// before it runs (spec §4.5).
#[derive(Debug)]
pub struct Subshell {
    pub body: Box<Node>,
    pub locals: Vec<(String, String)>,
    pub from: FromRedirect,
    pub to: ToRedirect,
}

impl Subshell {
    pub fn new(body: Node) -> Self {
        Subshell {
            body: Box::new(body),
            locals: Vec::new(),
            from: FromRedirect::None,
            to: ToRedirect::None,
        }
    }

    pub fn with_locals(mut self, locals: Vec<(String, String)>) -> Self {
        self.locals = locals;
        self
    }

    pub fn with_from(mut self, from: FromRedirect) -> Self {
        self.from = from;
        self
    }

    pub fn with_to(mut self, to: ToRedirect) -> Self {
        self.to = to;
        self
    }
}

/// A parsed command node (spec §3.1). Kept as a single tagged enum rather
/// than a struct with optional fields: each variant only carries the data
/// its kind can actually have, so an invalid combination (e.g. a `Pipe`
/// with redirections) is simply unrepresentable.
#[derive(Debug)]
pub enum Node {
    /// A program invocation with its argument vector.
    Simple(SimpleCommand),
    /// `left | right`: an anonymous pipe joins the two children.
    Pipe { left: Box<Node>, right: Box<Node> },
    /// `left && right`: short-circuit AND.
    SepAnd { left: Box<Node>, right: Box<Node> },
    /// `left || right`: short-circuit OR.
    SepOr { left: Box<Node>, right: Box<Node> },
    /// `left ; right`: unconditional sequence. `right` is optional so a
    /// trailing bare `left ;` is representable.
    SepEnd { left: Box<Node>, right: Option<Box<Node>> },
    /// `left &` (optionally followed by `right` run synchronously after
    /// backgrounding `left`).
    SepBg { left: Box<Node>, right: Option<Box<Node>> },
    /// `( left )`: run `left` in an isolated subshell.
    Subcmd(Subshell),
}

impl Node {
    pub fn pipe(left: Node, right: Node) -> Self {
        Node::Pipe { left: Box::new(left), right: Box::new(right) }
    }

    pub fn and(left: Node, right: Node) -> Self {
        Node::SepAnd { left: Box::new(left), right: Box::new(right) }
    }

    pub fn or(left: Node, right: Node) -> Self {
        Node::SepOr { left: Box::new(left), right: Box::new(right) }
    }

    pub fn seq(left: Node, right: Option<Node>) -> Self {
        Node::SepEnd { left: Box::new(left), right: right.map(Box::new) }
    }

    pub fn background(left: Node, right: Option<Node>) -> Self {
        Node::SepBg { left: Box::new(left), right: right.map(Box::new) }
    }

    pub fn subshell(inner: Subshell) -> Self {
        Node::Subcmd(inner)
    }
}
