use std::fmt;

use thiserror::Error;

use super::lexer::TokenType;

pub type Result<T> = std::result::Result<T, Error>;

/// Anything that can report where in the input it currently is.
pub trait CodePosition {
    fn location(&self) -> (u32, u16);
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LexicalErrorKind {
    UnexpectedCharacter(char),
    UnterminatedString,
}

impl fmt::Display for LexicalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexicalErrorKind::UnexpectedCharacter(c) => write!(f, "unexpected character {:?}", c),
            LexicalErrorKind::UnterminatedString => write!(f, "unterminated quoted string"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("lexical error at {line}:{col}: {kind}")]
    Lexical {
        line: u32,
        col: u16,
        kind: LexicalErrorKind,
    },

    #[error("syntax error at {line}:{col}: expected {expected}, found {found}")]
    Syntax {
        line: u32,
        col: u16,
        found: TokenType,
        expected: &'static str,
    },

    #[error("invalid boolean {value:?} for option '{key}'")]
    Coercion { key: String, value: String },

    #[error("malformed map line {line}: expected two whitespace-separated fields, got {content:?}")]
    MapFormat { line: usize, content: String },

    #[error("failed to read input")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn lexical<S: CodePosition>(state: &S, kind: LexicalErrorKind) -> Error {
        let (line, col) = state.location();
        Error::Lexical { line, col, kind }
    }

    pub fn syntax<S: CodePosition>(state: &S, found: TokenType, expected: &'static str) -> Error {
        let (line, col) = state.location();
        Error::Syntax {
            line,
            col,
            found,
            expected,
        }
    }

    pub fn location(&self) -> Option<(u32, u16)> {
        match self {
            Error::Lexical { line, col, .. } | Error::Syntax { line, col, .. } => {
                Some((*line, *col))
            }
            _ => None,
        }
    }
}
