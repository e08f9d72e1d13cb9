use log::debug;

use super::config::{AssignmentMap, DomainBlockMap, ParsedConfig};
use super::error::{CodePosition, Error, Result};
use super::lexer::{Lexer, Token, TokenType};

/// The one reserved word of the dialect: at top level it always opens a
/// domain block.
const DOMAIN_KEYWORD: &str = "domain";

struct ParseState<'a> {
    lexer: Lexer<'a>,
    last_token: Option<Token>,
}

impl CodePosition for ParseState<'_> {
    fn location(&self) -> (u32, u16) {
        match self.last_token {
            Some(ref t) => (t.line, t.col),
            None => (0, 0),
        }
    }
}

pub fn run(input: &str) -> Result<ParsedConfig> {
    let mut state = ParseState {
        lexer: Lexer::new(input),
        last_token: None,
    };

    let mut assignments = AssignmentMap::new();
    let mut domains = DomainBlockMap::new();
    loop {
        let token = next(&mut state)?;
        match token.token_type {
            TokenType::EndOfInput => break,
            TokenType::Identifier(ref name) if name == DOMAIN_KEYWORD => {
                parse_domain_block(&mut state, &mut domains)?;
            }
            TokenType::Identifier(key) => {
                let value = parse_assignment_tail(&mut state)?;
                assignments.insert(key, value);
            }
            other => return fail(&state, other, "option name"),
        }
    }

    debug!(
        "parsed {} assignments and {} domain blocks",
        assignments.len(),
        domains.len()
    );
    Ok(ParsedConfig::new(assignments, domains))
}

// `domain` has already been consumed.
fn parse_domain_block(state: &mut ParseState, domains: &mut DomainBlockMap) -> Result<()> {
    expect(state, TokenType::OpenBrace, "'{' after 'domain'")?;
    loop {
        let token = next(state)?;
        match token.token_type {
            TokenType::CloseBrace => {
                try_consume(state, TokenType::Semicolon)?;
                return Ok(());
            }
            TokenType::Identifier(label) | TokenType::QuotedString(label) => {
                expect(state, TokenType::OpenBrace, "'{' after domain label")?;
                let rule = parse_domain_entry(state)?;
                if domains.insert(label.clone(), rule).is_some() {
                    debug!("domain block '{}' replaces an earlier block", label);
                }
            }
            other => return fail(state, other, "domain label or '}'"),
        }
    }
}

// The label and its '{' have already been consumed.
fn parse_domain_entry(state: &mut ParseState) -> Result<AssignmentMap> {
    let mut rule = AssignmentMap::new();
    loop {
        let token = next(state)?;
        match token.token_type {
            TokenType::CloseBrace => {
                try_consume(state, TokenType::Semicolon)?;
                return Ok(rule);
            }
            TokenType::Identifier(key) => {
                let value = parse_assignment_tail(state)?;
                rule.insert(key, value);
            }
            other => return fail(state, other, "option name or '}'"),
        }
    }
}

// Parses `= value ;?` once the key has been read.
fn parse_assignment_tail(state: &mut ParseState) -> Result<String> {
    expect(state, TokenType::Equals, "'='")?;
    let value = parse_value(state)?;
    try_consume(state, TokenType::Semicolon)?;
    Ok(value)
}

fn parse_value(state: &mut ParseState) -> Result<String> {
    let token = next(state)?;
    match token.token_type {
        TokenType::Identifier(s) | TokenType::QuotedString(s) => Ok(s),
        other => fail(state, other, "value"),
    }
}

fn expect(state: &mut ParseState, ty: TokenType, expected: &'static str) -> Result<()> {
    let token = next(state)?;
    if token.token_type != ty {
        return fail(state, token.token_type, expected);
    }
    Ok(())
}

/// Consumes the next token if it has type `ty`, otherwise leaves it for
/// the next read.
fn try_consume(state: &mut ParseState, ty: TokenType) -> Result<bool> {
    let token = state.lexer.next_token()?;
    if token.token_type == ty {
        state.last_token = Some(token);
        return Ok(true);
    }
    state.lexer.unread(token);
    Ok(false)
}

fn next(state: &mut ParseState) -> Result<Token> {
    let token = state.lexer.next_token()?;
    state.last_token = Some(token.clone());
    Ok(token)
}

fn fail<T>(state: &ParseState, found: TokenType, expected: &'static str) -> Result<T> {
    Err(Error::syntax(state, found, expected))
}
