use crate::error::UpError;
use crate::ir::ast::{Block, BlockKind, Statement, StatementKind, Token};
use crate::literal;

use super::console::Console;
use super::environment::Environment;
use super::expr::{self, eval_bool};
use super::value::{Value, VarKind};

const ASSIGN: &str = "assign";
const TO: &str = "to";
const RESERVED_DIRECTIVE: &str = "as";
const IF: &str = "if";

/// Runs blocks in order against one environment. The first error halts
/// execution and is handed back to the caller.
pub struct Executor<'c, C: Console + ?Sized> {
    env: Environment,
    console: &'c mut C,
    verbose: bool,
}

impl<'c, C: Console + ?Sized> Executor<'c, C> {
    pub fn new(console: &'c mut C) -> Self {
        Self {
            env: Environment::new(),
            console,
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    pub fn into_environment(self) -> Environment {
        self.env
    }

    pub fn run(&mut self, blocks: &[Block]) -> Result<(), UpError> {
        let result = blocks.iter().try_for_each(|block| self.run_block(block));
        let flushed = self.console.flush();
        result?;
        flushed?;
        Ok(())
    }

    pub fn run_block(&mut self, block: &Block) -> Result<(), UpError> {
        if self.verbose {
            eprintln!("trace: enter {} block", block.kind.name());
        }
        match (block.kind, block.header()) {
            (BlockKind::Simple, _) => self.run_body(block.body()),
            (BlockKind::Conditional, Some(header)) => {
                if header.first_token() != Some(IF) {
                    return Err(UpError::syntax(
                        header.line,
                        format!("a conditional block starts with '{} <condition>'", IF),
                    ));
                }
                let condition = self.header_condition(header)?;
                if self.check(condition, header.line)? {
                    self.run_body(block.body())?;
                }
                Ok(())
            }
            (BlockKind::Iteration, Some(header)) => {
                let condition = self.header_condition(header)?;
                while self.check(condition, header.line)? {
                    self.run_body(block.body())?;
                }
                Ok(())
            }
            (_, None) => Ok(()),
        }
    }

    fn run_body(&mut self, statements: &[Statement]) -> Result<(), UpError> {
        statements.iter().try_for_each(|statement| self.execute(statement))
    }

    /// Tokens of the header's condition: everything after the `if` or loop word.
    fn header_condition<'s>(&self, header: &'s Statement) -> Result<&'s [Token], UpError> {
        match header.tokens.split_first() {
            Some((word, _)) if word == RESERVED_DIRECTIVE => Err(UpError::Unsupported {
                line: header.line,
                message: "the 'as' directive is reserved".to_string(),
            }),
            Some((_, condition)) if !condition.is_empty() => Ok(condition),
            _ => Err(UpError::syntax(header.line, "block header without a condition")),
        }
    }

    fn check(&self, condition: &[Token], line: usize) -> Result<bool, UpError> {
        let holds = eval_bool(&self.env, condition, line)?;
        if self.verbose {
            eprintln!("trace: line {}: '{}' is {}", line, condition.join(" "), holds);
        }
        Ok(holds)
    }

    pub fn execute(&mut self, statement: &Statement) -> Result<(), UpError> {
        if self.verbose {
            eprintln!("trace: line {}: {}", statement.line, statement);
        }
        match statement.kind {
            StatementKind::Declaration => declare(&mut self.env, statement),
            StatementKind::Assignment => assign(&mut self.env, statement),
            StatementKind::Read => {
                let name = operand_of(statement, "read")?;
                read(&mut self.env, &mut *self.console, name, statement.line)
            }
            StatementKind::Write => {
                let name = operand_of(statement, "write")?;
                write(&self.env, &mut *self.console, name, statement.line)
            }
            StatementKind::Directive => Err(UpError::Unsupported {
                line: statement.line,
                message: format!("nested directive '{}'", statement.tokens.join(" ")),
            }),
        }
    }
}

/// `<type keyword> <name>`
pub fn declare(env: &mut Environment, statement: &Statement) -> Result<(), UpError> {
    let line = statement.line;
    let [keyword, name] = statement.tokens.as_slice() else {
        return Err(UpError::syntax(line, "a declaration is '<type> <name>'"));
    };
    let kind = VarKind::from_keyword(keyword)
        .ok_or_else(|| UpError::syntax(line, format!("unknown type '{}'", keyword)))?;
    env.declare(name, kind, line)
}

/// `<expression...> assign to <name>` or `assign <expression...> to <name>`.
/// The target must already be declared.
pub fn assign(env: &mut Environment, statement: &Statement) -> Result<(), UpError> {
    let line = statement.line;
    let (expression, target) = split_assignment(&statement.tokens)
        .ok_or_else(|| UpError::syntax(line, "an assignment is 'assign <value> to <name>'"))?;

    let kind = env.kind_of(target).ok_or_else(|| {
        UpError::compile(line, format!("assignment to undeclared variable '{}'", target))
    })?;
    let value = expr::eval_assigned(env, kind.referent(), expression, line)?;
    env.store(target, value, line)
}

fn split_assignment(tokens: &[Token]) -> Option<(&[Token], &str)> {
    let (target, rest) = tokens.split_last()?;
    let (to, rest) = rest.split_last()?;
    if to != TO {
        return None;
    }
    let expression = match rest {
        [expression @ .., marker] if marker == ASSIGN && !expression.is_empty() => expression,
        [first, expression @ ..] if first == ASSIGN && !expression.is_empty() => expression,
        _ => return None,
    };
    Some((expression, target.as_str()))
}

pub fn write<C: Console + ?Sized>(
    env: &Environment,
    console: &mut C,
    name: &str,
    line: usize,
) -> Result<(), UpError> {
    let value = env.load(name, line)?;
    console.write(&value.to_string())?;
    Ok(())
}

pub fn read<C: Console + ?Sized>(
    env: &mut Environment,
    console: &mut C,
    name: &str,
    line: usize,
) -> Result<(), UpError> {
    let kind = env.kind_of(name).ok_or_else(|| UpError::UndeclaredName {
        line,
        name: name.to_string(),
    })?;
    if kind.is_reference() {
        return Err(UpError::Unsupported {
            line,
            message: format!("cannot read into reference '{}'", name),
        });
    }

    let input = match kind {
        VarKind::Line => console.read_line()?,
        _ => console.read_token()?,
    };
    let input = input.ok_or_else(|| UpError::Parse {
        line,
        message: format!("input ended before a value for '{}'", name),
    })?;
    let value = parse_input(kind, &input).ok_or_else(|| UpError::Parse {
        line,
        message: format!("'{}' is not a valid {}", input, kind),
    })?;
    env.store(name, value, line)
}

fn parse_input(kind: VarKind, input: &str) -> Option<Value> {
    match kind {
        VarKind::Number => literal::numeric_literal(input).map(Value::Number),
        VarKind::Symbol => {
            let mut chars = input.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(Value::Symbol(c)),
                _ => None,
            }
        }
        VarKind::Bool => expr::parse_bool(input).map(Value::Bool),
        VarKind::Line => Some(Value::Line(input.to_string())),
        _ => None,
    }
}

/// The single operand of `read <name>` / `write <name>`.
fn operand_of<'s>(statement: &'s Statement, keyword: &str) -> Result<&'s str, UpError> {
    match statement.tokens.as_slice() {
        [word, name] if word == keyword => Ok(name.as_str()),
        _ => Err(UpError::syntax(
            statement.line,
            format!("expected '{} <name>'", keyword),
        )),
    }
}
