//! Keyword recognition.
//!
//! Identifiers are scanned first and reclassified here; membership in the
//! fixed reserved set turns an `Ident` token into a `Keyword` token.
//! Several reserved words (`for`, `while`, `reaction`, `pool`, `gate`,
//! `return`) have no statement form yet — they are reserved so source
//! using them fails per-statement instead of silently binding variables.

/// Returns `true` if `text` is a reserved word.
///
/// Length-bucketed first-pass filter: all keywords are 2-8 chars.
#[inline]
pub(crate) fn is_keyword(text: &str) -> bool {
    let len = text.len();
    if !(2..=8).contains(&len) {
        return false;
    }
    match len {
        2 => text == "if",
        3 => matches!(text, "var" | "let" | "for"),
        4 => matches!(text, "func" | "else" | "true" | "null" | "gate" | "pool"),
        5 => matches!(text, "const" | "while" | "false"),
        6 => text == "return",
        7 => text == "context",
        8 => matches!(text, "reaction"),
        _ => false,
    }
}
