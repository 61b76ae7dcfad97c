use std::fmt;

/// One whitespace-delimited word of a source line.
pub type Token = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// `number n`, `->bool p`
    Declaration,
    /// `assign 5 to n`
    Assignment,
    /// `read n`
    Read,
    /// `write n`
    Write,
    /// Block header (`if ...`, loop header) or the reserved `as ...` form
    Directive,
}

impl StatementKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Declaration => "declaration",
            Self::Assignment => "assignment",
            Self::Read => "read",
            Self::Write => "write",
            Self::Directive => "directive",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// Tab-indented body line as opposed to a top-level line
    pub subordinate: bool,
    pub kind: StatementKind,
    pub tokens: Vec<Token>,
    /// 1-based line in the source file
    pub line: usize,
}

impl Statement {
    pub fn first_token(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }

    pub fn is_header(&self) -> bool {
        !self.subordinate && self.kind == StatementKind::Directive
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {:<11}  {}",
            u8::from(self.subordinate),
            self.kind.name(),
            self.tokens.join(" ")
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Simple,
    Conditional,
    Iteration,
}

impl BlockKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Conditional => "conditional",
            Self::Iteration => "iteration",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    /// For conditional and iteration blocks the first statement is the header.
    pub statements: Vec<Statement>,
}

impl Block {
    pub fn new(kind: BlockKind) -> Self {
        Self { kind, statements: Vec::new() }
    }

    pub fn header(&self) -> Option<&Statement> {
        match self.kind {
            BlockKind::Simple => None,
            BlockKind::Conditional | BlockKind::Iteration => self.statements.first(),
        }
    }

    pub fn body(&self) -> &[Statement] {
        match self.kind {
            BlockKind::Simple => &self.statements,
            BlockKind::Conditional | BlockKind::Iteration => {
                self.statements.get(1..).unwrap_or(&[])
            }
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.kind.name())?;
        for statement in &self.statements {
            writeln!(f, "{}", statement)?;
        }
        Ok(())
    }
}
