pub mod ast;
pub mod errors;
mod expression;
pub mod interpreter;

use std::io::Write;

use ast::Environment;
use errors::Result;

pub use errors::{ErrorKind, InterpreterError};
pub use interpreter::{run, Interpreter};

/// Tokenizes and runs a complete program, writing `echo` output to `output`.
///
/// Output written before an error is left in place.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn run_source<W: Write>(source: &str, output: W) -> Result<Environment> {
    let tokens = minphp_lexer::tokenize(source)?;
    tracing::debug!(tokens = tokens.len(), "tokenized program");
    run(&tokens, output)
}
