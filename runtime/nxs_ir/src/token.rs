//! Token types for the Nexus lexer.

use std::fmt;

/// A single token produced by the lexer.
///
/// Tokens are immutable: produced once, consumed in order by the parser.
/// `text` holds the token's payload — the cooked content for strings, the
/// raw spelling for numbers (multiple `.` are forwarded as-is and resolved
/// at parse time), and the full captured subtree text for tags.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            kind,
            text: text.into(),
        }
    }

    /// Returns `true` if this is the keyword `kw`.
    #[inline]
    pub fn is_keyword(&self, kw: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == kw
    }

    /// Returns `true` if this is the operator or punctuation `op`.
    #[inline]
    pub fn is_op(&self, op: &str) -> bool {
        self.kind == TokenKind::Op && self.text == op
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?})", self.kind, self.text)
    }
}

/// Token kinds for Nexus source.
///
/// The set is deliberately small: the grammar's structure lives in the
/// parser, and nested markup is captured whole as a single [`Tag`] token
/// whose structural interpretation is deferred to the materializer.
///
/// [`Tag`]: TokenKind::Tag
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Quoted string literal (text is the cooked content, quotes removed).
    Str,
    /// Numeric literal (text is the raw spelling, including any sign).
    Num,
    /// Identifier.
    Ident,
    /// Reserved word (`var`, `func`, `if`, `context`, ...).
    Keyword,
    /// Operator or punctuation.
    Op,
    /// A captured markup subtree, from the opening `<` through the
    /// matching close of the outermost tag.
    Tag,
}
