//! Tokenizer for the Nexus runtime.
//!
//! Converts raw `.nxs` source, a hybrid of markup and script, into a flat
//! token sequence in a single left-to-right scan. Nested markup is captured
//! whole by a depth-tracking tag scanner so that one `Tag` token spans an
//! entire subtree.
//!
//! The tokenizer is total: it never reports an error. Unterminated strings
//! and tags run to end of input, and bytes matching no rule are skipped
//! (with a `tracing` note). This mirrors the best-effort contract of the
//! rest of the runtime.

mod cursor;
mod keywords;
mod tag;

pub use cursor::Cursor;

use nxs_ir::{Token, TokenKind};
use tracing::debug;

/// Two-character operators, checked before single-character punctuation.
const TWO_CHAR_OPS: &[&str] = &["==", "!=", "<=", ">=", "&&", "||", "++", "--", "=>"];

/// Single-character operators and punctuation.
const SINGLE_CHAR_OPS: &[u8] = b"@(){}[],;:.=+-*/<>!&|?%#~";

/// Tokenize Nexus source into an ordered token sequence.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut cur = Cursor::new(source);
    let mut tokens = Vec::new();

    while !cur.is_eof() {
        let b = cur.current();

        // Whitespace
        if b.is_ascii_whitespace() {
            cur.eat_while(|b| b.is_ascii_whitespace());
            continue;
        }

        // Line comments
        if b == b'/' && cur.peek() == b'/' {
            cur.eat_until_newline_or_eof();
            continue;
        }

        // Strings
        if b == b'"' || b == b'\'' {
            tokens.push(scan_string(&mut cur, b));
            continue;
        }

        // Numbers. A leading `-` counts only when a digit follows, which
        // keeps `x - 1` from lexing `-1`; `x-1` still does (the grammar has
        // no subtraction, so the ambiguity is resolved in favor of signs).
        if b.is_ascii_digit() || (b == b'-' && cur.peek().is_ascii_digit()) {
            tokens.push(scan_number(&mut cur));
            continue;
        }

        // Tag subtrees
        if tag::at_tag_start(&cur) {
            let raw = tag::scan_tag(&mut cur);
            tokens.push(Token::new(TokenKind::Tag, raw));
            continue;
        }

        // Identifiers and keywords
        if b.is_ascii_alphabetic() || b == b'_' {
            let start = cur.pos();
            cur.eat_while(|b| b.is_ascii_alphanumeric() || b == b'_');
            let text = cur.slice_from(start);
            let kind = if keywords::is_keyword(text) {
                TokenKind::Keyword
            } else {
                TokenKind::Ident
            };
            tokens.push(Token::new(kind, text));
            continue;
        }

        // Two-character operators
        if let Some(op) = match_two_char_op(&cur) {
            cur.advance();
            cur.advance();
            tokens.push(Token::new(TokenKind::Op, op));
            continue;
        }

        // Single-character punctuation
        if SINGLE_CHAR_OPS.contains(&b) {
            cur.advance();
            tokens.push(Token::new(TokenKind::Op, (b as char).to_string()));
            continue;
        }

        // Unrecognized byte: skipped, never fatal.
        debug!(byte = b, pos = cur.pos(), "skipping unrecognized byte");
        cur.advance();
    }

    tokens
}

fn match_two_char_op(cur: &Cursor) -> Option<&'static str> {
    let pair = [cur.current(), cur.peek()];
    TWO_CHAR_OPS
        .iter()
        .find(|op| op.as_bytes() == pair)
        .copied()
}

/// Scan a quoted string. `\` escapes take the next character literally;
/// an unterminated string runs to end of input without error.
fn scan_string(cur: &mut Cursor, quote: u8) -> Token {
    cur.advance(); // opening quote
    let mut bytes = Vec::new();
    while !cur.is_eof() && cur.current() != quote {
        if cur.current() == b'\\' {
            cur.advance();
            if !cur.is_eof() {
                bytes.push(cur.current());
                cur.advance();
            }
        } else {
            bytes.push(cur.current());
            cur.advance();
        }
    }
    cur.advance(); // closing quote (no-op at EOF)
    Token::new(TokenKind::Str, String::from_utf8_lossy(&bytes).into_owned())
}

/// Scan a numeric literal as raw text.
///
/// Multiple `.` are accepted and forwarded as-is; the parser resolves the
/// longest valid prefix, so `1.2.3` evaluates as `1.2`.
fn scan_number(cur: &mut Cursor) -> Token {
    let start = cur.pos();
    if cur.current() == b'-' {
        cur.advance();
    }
    cur.eat_while(|b| b.is_ascii_digit() || b == b'.');
    Token::new(TokenKind::Num, cur.slice_from(start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src).into_iter().map(|t| t.kind).collect()
    }

    fn texts(src: &str) -> Vec<String> {
        tokenize(src).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn var_decl_tokens() {
        let toks = tokenize("var count = 0");
        assert_eq!(
            toks,
            vec![
                Token::new(TokenKind::Keyword, "var"),
                Token::new(TokenKind::Ident, "count"),
                Token::new(TokenKind::Op, "="),
                Token::new(TokenKind::Num, "0"),
            ]
        );
    }

    #[test]
    fn whitespace_and_comments_are_skipped() {
        assert_eq!(texts("  x\t// trailing\n  y"), vec!["x", "y"]);
        assert_eq!(texts("// only a comment"), Vec::<String>::new());
    }

    #[test]
    fn double_quoted_string_is_cooked() {
        assert_eq!(tokenize(r#""hi there""#), vec![Token::new(TokenKind::Str, "hi there")]);
    }

    #[test]
    fn single_quoted_string_is_cooked() {
        assert_eq!(tokenize("'ok'"), vec![Token::new(TokenKind::Str, "ok")]);
    }

    #[test]
    fn escape_takes_next_char_literally() {
        assert_eq!(texts(r#""a\"b""#), vec!["a\"b"]);
        // `\n` is the literal letter n, not a newline.
        assert_eq!(texts(r#""a\nb""#), vec!["anb"]);
    }

    #[test]
    fn unterminated_string_runs_to_eof() {
        assert_eq!(tokenize("\"never closed"), vec![Token::new(TokenKind::Str, "never closed")]);
    }

    #[test]
    fn negative_number_requires_adjacent_digit() {
        assert_eq!(texts("-5"), vec!["-5"]);
        // `- 5` is an operator then a number.
        assert_eq!(
            kinds("- 5"),
            vec![TokenKind::Op, TokenKind::Num]
        );
    }

    #[test]
    fn malformed_decimal_is_forwarded_raw() {
        assert_eq!(tokenize("1.2.3"), vec![Token::new(TokenKind::Num, "1.2.3")]);
    }

    #[test]
    fn nested_tag_is_one_token() {
        let toks = tokenize("<card><view>hi</view></card>");
        assert_eq!(toks.len(), 1);
        assert_eq!(toks[0].kind, TokenKind::Tag);
        assert_eq!(toks[0].text, "<card><view>hi</view></card>");
    }

    #[test]
    fn tag_token_then_script_tokens() {
        let toks = tokenize("<btn @click=\"go()\">Go</btn>\nvar x = 1");
        assert_eq!(
            toks.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![
                TokenKind::Tag,
                TokenKind::Keyword,
                TokenKind::Ident,
                TokenKind::Op,
                TokenKind::Num,
            ]
        );
        assert_eq!(toks[0].text, "<btn @click=\"go()\">Go</btn>");
    }

    #[test]
    fn less_than_is_an_operator_not_a_tag() {
        assert_eq!(
            tokenize("x <= 3"),
            vec![
                Token::new(TokenKind::Ident, "x"),
                Token::new(TokenKind::Op, "<="),
                Token::new(TokenKind::Num, "3"),
            ]
        );
    }

    #[test]
    fn two_char_ops_win_over_single() {
        assert_eq!(texts("== != <= >= && || ++ -- => ="), vec![
            "==", "!=", "<=", ">=", "&&", "||", "++", "--", "=>", "=",
        ]);
    }

    #[test]
    fn at_sign_is_an_operator() {
        assert_eq!(tokenize("@"), vec![Token::new(TokenKind::Op, "@")]);
    }

    #[test]
    fn unrecognized_bytes_are_skipped_silently() {
        // `$` and `` ` `` match no rule and are dropped without error.
        assert_eq!(texts("x $ ` y"), vec!["x", "y"]);
    }

    #[test]
    fn keywords_are_reclassified() {
        assert_eq!(
            kinds("context ui"),
            vec![TokenKind::Keyword, TokenKind::Ident]
        );
    }

    mod properties {
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn tokenize_never_panics(src in ".{0,256}") {
                let _ = super::super::tokenize(&src);
            }

            #[test]
            fn tokens_never_contain_whitespace_kinds(
                src in "[a-z_ ]{0,64}"
            ) {
                for tok in super::super::tokenize(&src) {
                    prop_assert!(!tok.text.contains(' '));
                }
            }
        }
    }
}
