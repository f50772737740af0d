//! Core token definitions for the minphp scripting subset.
//!
//! This crate contains the flat token vocabulary that is shared between the
//! lexer and the interpreter. Programs are never turned into a tree: the
//! interpreter walks the token sequence directly, so `Token` is the only
//! syntactic structure in the toolchain.

use std::fmt;

// --- Tokens ---

/// A single lexical unit of a program.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// The `<?php` marker opening the executable part of a program.
    OpenTag,

    // Punctuation
    LessEqual,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Semicolon,
    Modulo,
    Increment,
    StrictEqual,
    Assign,

    // Keywords
    Echo,
    For,
    If,
    ElseIf,
    Else,

    // Terms
    Int(i64),
    /// A string literal with escapes already applied.
    Str(String),
    /// A `$name` reference; the name is stored without the sigil.
    Variable(String),
}

impl Token {
    /// Looks up an alphabetic word. Only the five statement keywords exist.
    pub fn keyword(word: &str) -> Option<Token> {
        match word {
            "echo" => Some(Token::Echo),
            "for" => Some(Token::For),
            "if" => Some(Token::If),
            "elseif" => Some(Token::ElseIf),
            "else" => Some(Token::Else),
            _ => None,
        }
    }

    /// Whether this token can stand as an operand of an expression.
    pub fn is_term(&self) -> bool {
        matches!(self, Token::Int(_) | Token::Str(_) | Token::Variable(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::OpenTag => write!(f, "<?php"),
            Token::LessEqual => write!(f, "<="),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::LeftBrace => write!(f, "{{"),
            Token::RightBrace => write!(f, "}}"),
            Token::Semicolon => write!(f, ";"),
            Token::Modulo => write!(f, "%"),
            Token::Increment => write!(f, "++"),
            Token::StrictEqual => write!(f, "==="),
            Token::Assign => write!(f, "="),
            Token::Echo => write!(f, "echo"),
            Token::For => write!(f, "for"),
            Token::If => write!(f, "if"),
            Token::ElseIf => write!(f, "elseif"),
            Token::Else => write!(f, "else"),
            Token::Int(n) => write!(f, "{}", n),
            Token::Str(s) => write!(f, "{:?}", s),
            Token::Variable(name) => write!(f, "${}", name),
        }
    }
}
