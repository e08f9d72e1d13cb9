use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use log::trace;

use super::error::{CodePosition, Error, LexicalErrorKind, Result};

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum TokenType {
    EndOfInput,
    Identifier(String),
    QuotedString(String),
    OpenBrace,
    CloseBrace,
    Equals,
    Semicolon,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::EndOfInput => write!(f, "end of input"),
            TokenType::Identifier(s) => write!(f, "identifier '{}'", s),
            TokenType::QuotedString(s) => write!(f, "string {:?}", s),
            TokenType::OpenBrace => write!(f, "'{{'"),
            TokenType::CloseBrace => write!(f, "'}}'"),
            TokenType::Equals => write!(f, "'='"),
            TokenType::Semicolon => write!(f, "';'"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    pub token_type: TokenType,
    pub line: u32,
    pub col: u16,
}

impl Token {
    pub fn new(line: u32, col: u16, ty: TokenType) -> Token {
        Token {
            line,
            col,
            token_type: ty,
        }
    }
}

/// Pull-model tokenizer over the Rspamd configuration dialect.
///
/// Tokens are produced one at a time by [`Lexer::next_token`]. A single
/// token can be handed back with [`Lexer::unread`] so the parser can peek
/// for optional terminators.
pub struct Lexer<'a> {
    line: u32,
    col: u16,
    input: Peekable<Chars<'a>>,
    force_next: Option<Token>,
}

impl CodePosition for Lexer<'_> {
    fn location(&self) -> (u32, u16) {
        (self.line, self.col)
    }
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Lexer<'a> {
        Lexer {
            line: 1,
            col: 0,
            input: input.chars().peekable(),
            force_next: None,
        }
    }

    pub fn next_token(&mut self) -> Result<Token> {
        if let Some(t) = self.force_next.take() {
            return Ok(t);
        }
        loop {
            let c = match self.next_char() {
                Some(c) => c,
                None => return Ok(Token::new(self.line, self.col, TokenType::EndOfInput)),
            };
            let (line, col) = self.location();
            let token_type = match c {
                '#' => {
                    self.skip_line();
                    continue;
                }
                c if c.is_whitespace() => continue,
                '{' => TokenType::OpenBrace,
                '}' => TokenType::CloseBrace,
                '=' => TokenType::Equals,
                ';' => TokenType::Semicolon,
                '"' => TokenType::QuotedString(self.read_string()?),
                c if is_ident_start(c) => TokenType::Identifier(self.read_ident(c)),
                c => {
                    return Err(Error::lexical(
                        &*self,
                        LexicalErrorKind::UnexpectedCharacter(c),
                    ))
                }
            };
            trace!("token {} at {}:{}", token_type, line, col);
            return Ok(Token::new(line, col, token_type));
        }
    }

    /// Pushes a token back; the next call to `next_token` returns it.
    ///
    /// Only one token of lookahead is kept. Calling `unread` twice without
    /// a `next_token` in between is a caller bug: debug builds panic and
    /// release builds keep only the most recent token.
    pub fn unread(&mut self, token: Token) {
        debug_assert!(self.force_next.is_none(), "lexer lookahead slot already taken");
        self.force_next = Some(token);
    }

    fn next_char(&mut self) -> Option<char> {
        let c = self.input.next()?;
        if c == '\n' {
            self.line += 1;
            self.col = 0;
        } else {
            self.col = self.col.saturating_add(1);
        }
        Some(c)
    }

    // EOF inside a comment just ends the comment.
    fn skip_line(&mut self) {
        while let Some(c) = self.next_char() {
            if c == '\n' {
                break;
            }
        }
    }

    fn read_string(&mut self) -> Result<String> {
        let mut tmp = String::new();
        loop {
            match self.next_char() {
                Some('"') => return Ok(tmp),
                Some('\\') => match self.next_char() {
                    Some(escaped) => tmp.push(escaped),
                    None => return Err(Error::lexical(&*self, LexicalErrorKind::UnterminatedString)),
                },
                Some(c) => tmp.push(c),
                None => return Err(Error::lexical(&*self, LexicalErrorKind::UnterminatedString)),
            }
        }
    }

    fn read_ident(&mut self, first: char) -> String {
        let mut tmp = String::new();
        tmp.push(first);
        while let Some(&c) = self.input.peek() {
            if !is_ident_part(c) {
                break;
            }
            tmp.push(c);
            self.next_char();
        }
        tmp
    }
}

// Bare absolute paths start with '/', so it opens an identifier as well.
fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || matches!(c, '_' | '$' | '/')
}

fn is_ident_part(c: char) -> bool {
    c.is_alphabetic() || c.is_ascii_digit() || matches!(c, '_' | '-' | '.' | '/' | '$')
}

/// Tokenizes the whole input, stopping before the end-of-input token.
pub fn run(input: &str) -> Result<Vec<Token>> {
    let mut lexer = Lexer::new(input);
    let mut tokens = vec![];
    loop {
        let token = lexer.next_token()?;
        if token.token_type == TokenType::EndOfInput {
            break;
        }
        tokens.push(token);
    }
    Ok(tokens)
}
