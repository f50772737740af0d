use minphp_lexer::LexError;
use thiserror::Error;

pub type Result<T, E = InterpreterError> = std::result::Result<T, E>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lex,
    Syntax,
    UnboundVariable,
    Type,
    Arithmetic,
    Io,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Lex => "LexError",
            ErrorKind::Syntax => "SyntaxError",
            ErrorKind::UnboundVariable => "UnboundVariable",
            ErrorKind::Type => "TypeError",
            ErrorKind::Arithmetic => "ArithmeticError",
            ErrorKind::Io => "IoError",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every way a run can fail. None of these are recoverable: the first one
/// raised ends the run.
#[derive(Debug, Error)]
pub enum InterpreterError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("expected {expected} at token {position}, found {found}")]
    Syntax {
        expected: String,
        found: String,
        position: usize,
    },
    #[error("undefined variable ${name}{}", token_suffix(.position))]
    UnboundVariable {
        name: String,
        position: Option<usize>,
    },
    #[error("{message} at token {position}")]
    Type { message: String, position: usize },
    #[error("{message} at token {position}")]
    Arithmetic { message: String, position: usize },
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

fn token_suffix(position: &Option<usize>) -> String {
    match position {
        Some(position) => format!(" at token {}", position),
        None => String::new(),
    }
}

impl InterpreterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InterpreterError::Lex(_) => ErrorKind::Lex,
            InterpreterError::Syntax { .. } => ErrorKind::Syntax,
            InterpreterError::UnboundVariable { .. } => ErrorKind::UnboundVariable,
            InterpreterError::Type { .. } => ErrorKind::Type,
            InterpreterError::Arithmetic { .. } => ErrorKind::Arithmetic,
            InterpreterError::Io(_) => ErrorKind::Io,
        }
    }

    /// Token index the error refers to. Lexical errors carry a byte offset
    /// instead, available through the wrapped `LexError`.
    pub fn position(&self) -> Option<usize> {
        match self {
            InterpreterError::Syntax { position, .. }
            | InterpreterError::Type { position, .. }
            | InterpreterError::Arithmetic { position, .. } => Some(*position),
            InterpreterError::UnboundVariable { position, .. } => *position,
            InterpreterError::Lex(_) | InterpreterError::Io(_) => None,
        }
    }

    /// Attaches a token index to an error raised away from the cursor.
    pub(crate) fn at_token(self, token: usize) -> Self {
        match self {
            InterpreterError::UnboundVariable {
                name,
                position: None,
            } => InterpreterError::UnboundVariable {
                name,
                position: Some(token),
            },
            other => other,
        }
    }

    pub(crate) fn type_error(message: impl Into<String>, position: usize) -> Self {
        InterpreterError::Type {
            message: message.into(),
            position,
        }
    }

    pub(crate) fn arithmetic(message: impl Into<String>, position: usize) -> Self {
        InterpreterError::Arithmetic {
            message: message.into(),
            position,
        }
    }
}
