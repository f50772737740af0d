//! Tokenizer for the minphp scripting subset.
//!
//! This crate turns raw program text into the flat `Token` sequence defined
//! in `minphp_ast`. Scanning is driven by the lead character of each token
//! and never backtracks.
//!
//! Some tokens are recognized by their lead characters and then skipped at a
//! fixed width without inspecting the rest: `+` always consumes two
//! characters, `==` consumes three, and any `<` not followed by `=` is taken
//! as the five character `<?php` marker. A skip that runs past the end of
//! input is an error.

mod cursor;

use cursor::Cursor;
use minphp_ast::Token;
use thiserror::Error;

/// Width of the `<?php` open marker.
const OPEN_TAG_WIDTH: usize = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unterminated string literal starting at byte {0}")]
    UnterminatedString(usize),
    #[error("dangling escape in string literal starting at byte {0}")]
    DanglingEscape(usize),
    #[error("unknown word `{word}` at byte {offset}")]
    UnknownWord { word: String, offset: usize },
    #[error("unexpected character {ch:?} at byte {offset}")]
    UnexpectedCharacter { ch: char, offset: usize },
    #[error("integer literal {digits} at byte {offset} does not fit in 64 bits")]
    IntegerOverflow { digits: String, offset: usize },
    #[error("input ends inside `{token}` starting at byte {offset}")]
    UnexpectedEndOfInput { token: Token, offset: usize },
}

impl LexError {
    /// Byte offset in the source where the error was detected.
    pub fn offset(&self) -> usize {
        match self {
            LexError::UnterminatedString(offset) | LexError::DanglingEscape(offset) => *offset,
            LexError::UnknownWord { offset, .. }
            | LexError::UnexpectedCharacter { offset, .. }
            | LexError::IntegerOverflow { offset, .. }
            | LexError::UnexpectedEndOfInput { offset, .. } => *offset,
        }
    }
}

pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut cursor = Cursor::new(source);
    let mut tokens = Vec::new();

    while let Some(first) = cursor.current() {
        let start = cursor.pos();
        let token = match first {
            '<' => {
                if cursor.peek() == Some('=') {
                    skip(&mut cursor, 2, Token::LessEqual)?
                } else {
                    skip(&mut cursor, OPEN_TAG_WIDTH, Token::OpenTag)?
                }
            }
            '(' => single(&mut cursor, Token::LeftParen),
            ')' => single(&mut cursor, Token::RightParen),
            '{' => single(&mut cursor, Token::LeftBrace),
            '}' => single(&mut cursor, Token::RightBrace),
            ';' => single(&mut cursor, Token::Semicolon),
            '%' => single(&mut cursor, Token::Modulo),
            '+' => skip(&mut cursor, 2, Token::Increment)?,
            '=' => {
                if cursor.peek() == Some('=') {
                    skip(&mut cursor, 3, Token::StrictEqual)?
                } else {
                    single(&mut cursor, Token::Assign)
                }
            }
            '$' => {
                cursor.advance();
                let name = cursor.eat_while(|c| c.is_ascii_alphabetic());
                Token::Variable(name.to_string())
            }
            '"' => lex_string(&mut cursor)?,
            c if is_space(c) => {
                cursor.advance();
                continue;
            }
            c if c.is_ascii_digit() => {
                let digits = cursor.eat_while(|c| c.is_ascii_digit());
                let value = digits.parse::<i64>().map_err(|_| LexError::IntegerOverflow {
                    digits: digits.to_string(),
                    offset: start,
                })?;
                Token::Int(value)
            }
            c if c.is_ascii_alphabetic() => {
                let word = cursor.eat_while(|c| c.is_ascii_alphabetic());
                Token::keyword(word).ok_or_else(|| LexError::UnknownWord {
                    word: word.to_string(),
                    offset: start,
                })?
            }
            other => {
                return Err(LexError::UnexpectedCharacter {
                    ch: other,
                    offset: start,
                })
            }
        };
        tokens.push(token);
    }

    Ok(tokens)
}

fn single(cursor: &mut Cursor<'_>, token: Token) -> Token {
    cursor.advance();
    token
}

fn skip(cursor: &mut Cursor<'_>, width: usize, token: Token) -> Result<Token, LexError> {
    let offset = cursor.pos();
    if cursor.advance_n(width) {
        Ok(token)
    } else {
        Err(LexError::UnexpectedEndOfInput { token, offset })
    }
}

/// Whitespace as the C `isspace` family sees it: ASCII space, `\t`, `\n`,
/// `\r`, form feed and vertical tab.
fn is_space(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0b'
}

/// Scans a double-quoted literal. `\n` becomes a newline, a backslash before
/// any other character yields that character.
fn lex_string(cursor: &mut Cursor<'_>) -> Result<Token, LexError> {
    let start = cursor.pos();
    cursor.advance(); // opening quote
    let mut text = String::new();

    loop {
        match cursor.current() {
            None => return Err(LexError::UnterminatedString(start)),
            Some('"') => {
                cursor.advance();
                return Ok(Token::Str(text));
            }
            Some('\\') => {
                cursor.advance();
                match cursor.current() {
                    None => return Err(LexError::DanglingEscape(start)),
                    Some('n') => text.push('\n'),
                    Some(c) => text.push(c),
                }
                cursor.advance();
            }
            Some(c) => {
                text.push(c);
                cursor.advance();
            }
        }
    }
}
