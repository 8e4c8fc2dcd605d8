//! SGF (Smart Game Format) tokenizer.
//!
//! Turns raw game-record text into a flat list of [`Token`]s. Whitespace
//! between tokens is skipped. The list always ends with either
//! [`Token::EndOfInput`] or [`Token::Invalid`]; tokenizing never fails with
//! an error value.
//!
//! Every token prints back in its raw SGF form, so concatenating the
//! `Display` output of a valid input's tokens reproduces the input minus the
//! whitespace between tokens.
//!
//! ## Example
//!
//! ```
//! use go_rules::sgf::{Token, tokenize};
//!
//! let tokens = tokenize("(;FF[4])");
//! assert_eq!(tokens[2], Token::PropIdent("FF".into()));
//! assert_eq!(tokens.last(), Some(&Token::EndOfInput));
//! ```

use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    OpenParen,
    CloseParen,
    Semicolon,
    /// Property identifier, a run of upper-case ASCII letters
    PropIdent(String),
    /// Property value without its brackets, escapes resolved
    PropValue(String),
    /// The whole input was consumed without errors.
    EndOfInput,
    /// No token could be matched starting at byte `offset`.
    Invalid { offset: usize },
}

impl Token {
    /// `true` for the tokens that end a token list.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Token::EndOfInput | Token::Invalid { .. })
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::OpenParen => f.write_str("("),
            Token::CloseParen => f.write_str(")"),
            Token::Semicolon => f.write_str(";"),
            Token::PropIdent(name) => f.write_str(name),
            Token::PropValue(content) => {
                let escaped = content.replace('\\', "\\\\").replace(']', "\\]");
                write!(f, "[{escaped}]")
            }
            Token::EndOfInput | Token::Invalid { .. } => Ok(()),
        }
    }
}

/// Split `text` into SGF tokens.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    loop {
        let Some((start, ch)) = chars.next() else {
            tokens.push(Token::EndOfInput);
            break;
        };

        let token = match ch {
            '(' => Token::OpenParen,
            ')' => Token::CloseParen,
            ';' => Token::Semicolon,
            '[' => match prop_value(&mut chars) {
                Some(content) => Token::PropValue(content),
                None => Token::Invalid { offset: start },
            },
            c if c.is_whitespace() => continue,
            c if c.is_ascii_uppercase() => match prop_ident(c, &mut chars) {
                Some(name) => Token::PropIdent(name),
                None => Token::Invalid { offset: start },
            },
            _ => Token::Invalid { offset: start },
        };

        let stop = token.is_terminal();
        tokens.push(token);
        if stop {
            break;
        }
    }
    tokens
}

/// Read the rest of a bracketed value. Only `\\` and `\]` are valid escapes.
fn prop_value(chars: &mut Peekable<CharIndices<'_>>) -> Option<String> {
    let mut content = String::new();
    let mut escaped = false;
    loop {
        let (_, c) = chars.next()?;
        match c {
            '\\' | ']' if escaped => {
                content.push(c);
                escaped = false;
            }
            '\\' => escaped = true,
            ']' => return Some(content),
            _ if escaped => return None,
            _ => content.push(c),
        }
    }
}

/// Read an identifier. It must be followed by something; an identifier
/// running into the end of input is invalid.
fn prop_ident(first: char, chars: &mut Peekable<CharIndices<'_>>) -> Option<String> {
    let mut name = String::from(first);
    loop {
        let &(_, c) = chars.peek()?;
        if !c.is_ascii_uppercase() {
            return Some(name);
        }
        name.push(c);
        chars.next();
    }
}
