//! Interpreter for UP, a small line-structured teaching language.
//!
//! Source lines are classified into statements, statements are grouped into
//! simple, conditional and iteration blocks, and the blocks are executed
//! against a flat environment of typed variables.

pub mod error;
pub mod ir;
pub mod literal;
pub mod parser;
pub mod runtime;
pub mod source;

use error::UpError;
use runtime::{Console, Environment, Executor};

/// Parses and runs a whole program. Returns the final environment, or the
/// first error, which ends the run.
///
/// ```
/// use up_lang::{interpret, runtime::StreamConsole};
///
/// let mut console = StreamConsole::memory("41\n");
/// let source = "number n\nread n\nwrite n";
/// interpret(source, &mut console, false).unwrap();
/// assert_eq!(console.output(), "41");
/// ```
pub fn interpret<C: Console + ?Sized>(
    source: &str,
    console: &mut C,
    verbose: bool,
) -> Result<Environment, UpError> {
    let blocks = parser::parse(source);
    let mut executor = Executor::new(console).with_verbose(verbose);
    executor.run(&blocks)?;
    Ok(executor.into_environment())
}
