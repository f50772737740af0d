use std::io::Write;

use tracing::{debug, trace};

use crate::ast::{Environment, Token};
use crate::errors::{InterpreterError, Result};

/// Runs a tokenized program and returns the final environment.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn run<W: Write>(tokens: &[Token], output: W) -> Result<Environment> {
    let mut env = Environment::new();
    let mut interpreter = Interpreter::new(tokens, output);
    interpreter.run_program(&mut env)?;
    debug!(bindings = env.len(), "program finished");
    Ok(env)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatementStart {
    For,
    If,
    Echo,
    Expression,
}

impl StatementStart {
    fn of(token: &Token) -> Option<Self> {
        match token {
            Token::For => Some(StatementStart::For),
            Token::If => Some(StatementStart::If),
            Token::Echo => Some(StatementStart::Echo),
            token if token.is_term() => Some(StatementStart::Expression),
            _ => None,
        }
    }
}

/// Handlers take an `active` flag; inactive ones consume their syntax
/// without side effects.
pub struct Interpreter<'t, W> {
    pub(crate) tokens: &'t [Token],
    pub(crate) position: usize,
    output: W,
}

impl<'t, W: Write> Interpreter<'t, W> {
    pub fn new(tokens: &'t [Token], output: W) -> Self {
        Interpreter {
            tokens,
            position: 0,
            output,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn run_program(&mut self, env: &mut Environment) -> Result<()> {
        self.expect_word(&Token::OpenTag)?;
        self.run_statements(env, true)?;
        if self.position < self.tokens.len() {
            return Err(self.syntax_error("a statement"));
        }
        self.output.flush()?;
        Ok(())
    }

    /// Stops on the first token that cannot start a statement.
    pub fn run_statements(&mut self, env: &mut Environment, active: bool) -> Result<()> {
        loop {
            match self.peek().and_then(StatementStart::of) {
                Some(StatementStart::For) => self.run_for_statement(env, active)?,
                Some(StatementStart::If) => self.run_if_statement(env, active)?,
                Some(StatementStart::Echo) => self.run_echo_statement(env, active)?,
                Some(StatementStart::Expression) => self.run_expression_statement(env, active)?,
                None => return Ok(()),
            }
        }
    }

    fn run_for_statement(&mut self, env: &mut Environment, active: bool) -> Result<()> {
        self.expect_word(&Token::For)?;
        self.expect_word(&Token::LeftParen)?;
        self.calculate_expression(env, active)?;
        self.expect_word(&Token::Semicolon)?;

        let condition_position = self.position;
        let mut iterations = 0usize;
        loop {
            let value = self.calculate_expression(env, active)?;
            // An inactive loop only needs one syntactic pass.
            let proceed = active && value.is_truthy();
            self.expect_word(&Token::Semicolon)?;

            let update_position = self.position;
            self.calculate_expression(env, false)?;
            self.expect_word(&Token::RightParen)?;
            self.expect_word(&Token::LeftBrace)?;
            self.run_statements(env, proceed)?;
            self.expect_word(&Token::RightBrace)?;

            if !proceed {
                break;
            }

            self.position = update_position;
            self.calculate_expression(env, active)?;
            self.position = condition_position;
            iterations += 1;
            trace!(iterations, "for loop rewinds to condition");
        }

        trace!(iterations, active, "for loop finished");
        Ok(())
    }

    /// Also handles each `elseif` of the chain, recursively.
    fn run_if_statement(&mut self, env: &mut Environment, active: bool) -> Result<()> {
        self.position += 1; // skip `if` or `elseif`
        self.expect_word(&Token::LeftParen)?;
        let value = self.calculate_expression(env, active)?;
        let condition = active && value.is_truthy();
        self.expect_word(&Token::RightParen)?;

        self.expect_word(&Token::LeftBrace)?;
        self.run_statements(env, condition)?;
        self.expect_word(&Token::RightBrace)?;

        match self.peek() {
            Some(Token::ElseIf) => self.run_if_statement(env, active && !condition),
            Some(Token::Else) => {
                self.position += 1; // skip `else`
                self.expect_word(&Token::LeftBrace)?;
                self.run_statements(env, active && !condition)?;
                self.expect_word(&Token::RightBrace)
            }
            _ => Ok(()),
        }
    }

    fn run_echo_statement(&mut self, env: &mut Environment, active: bool) -> Result<()> {
        self.expect_word(&Token::Echo)?;
        let value = self.calculate_expression(env, active)?;
        if active {
            write!(self.output, "{}", value)?;
        }
        self.expect_word(&Token::Semicolon)
    }

    fn run_expression_statement(&mut self, env: &mut Environment, active: bool) -> Result<()> {
        self.calculate_expression(env, active)?;
        self.expect_word(&Token::Semicolon)
    }

    // --- Cursor helpers ---

    pub(crate) fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.position)
    }

    pub fn expect_word(&mut self, expected: &Token) -> Result<()> {
        if self.peek() == Some(expected) {
            self.position += 1;
            Ok(())
        } else {
            Err(self.syntax_error(&format!("`{}`", expected)))
        }
    }

    pub(crate) fn syntax_error(&self, expected: &str) -> InterpreterError {
        let found = match self.peek() {
            Some(token) => format!("`{}`", token),
            None => "end of input".to_string(),
        };
        InterpreterError::Syntax {
            expected: expected.to_string(),
            found,
            position: self.position,
        }
    }
}
