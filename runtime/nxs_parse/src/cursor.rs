//! Token cursor for navigating the token stream.
//!
//! Provides index-based peek/consume with unlimited lookahead. The cursor
//! never owns tokens; it walks the slice the lexer produced.

use crate::error::ParseError;
use nxs_ir::{Token, TokenKind};

/// Cursor over a token slice.
pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Cursor { tokens, pos: 0 }
    }

    /// Current position in the token stream.
    ///
    /// Compared before and after a statement parse to guarantee progress.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// The current token, if any remain.
    #[inline]
    pub fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    /// The token `n` positions ahead of current.
    #[inline]
    pub fn peek_n(&self, n: usize) -> Option<&'a Token> {
        self.tokens.get(self.pos + n)
    }

    /// Consume and return the current token.
    #[inline]
    pub fn advance(&mut self) -> Option<&'a Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    /// Returns `true` if the current token is the operator `op`.
    #[inline]
    pub fn check_op(&self, op: &str) -> bool {
        self.current().is_some_and(|t| t.is_op(op))
    }

    /// Returns `true` if the current token is the keyword `kw`.
    #[inline]
    pub fn check_keyword(&self, kw: &str) -> bool {
        self.current().is_some_and(|t| t.is_keyword(kw))
    }

    /// Consume the current token if it is the operator `op`.
    pub fn eat_op(&mut self, op: &str) -> bool {
        if self.check_op(op) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume an operator token or fail.
    pub fn expect_op(&mut self, op: &str) -> Result<(), ParseError> {
        if self.eat_op(op) {
            Ok(())
        } else {
            Err(ParseError::new(format!("expected `{op}`"), self.pos))
        }
    }

    /// Consume an identifier token or fail, returning its text.
    pub fn expect_ident(&mut self) -> Result<String, ParseError> {
        match self.current() {
            Some(t) if t.kind == TokenKind::Ident => {
                self.pos += 1;
                Ok(t.text.clone())
            }
            _ => Err(ParseError::new("expected identifier", self.pos)),
        }
    }
}
