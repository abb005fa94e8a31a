//! Lenient numeric literal conversion.
//!
//! The lexer forwards numeric spellings raw, including malformed ones like
//! `1.2.3`. Conversion takes the longest valid prefix, so `1.2.3` becomes
//! `1.2` and a bare `-` becomes `0`. This matches the forgiving host
//! coercion the runtime's semantics are defined against.

/// Convert a raw numeric spelling to `f64` using its longest valid prefix.
pub(crate) fn float_prefix(text: &str) -> f64 {
    let bytes = text.as_bytes();
    let mut end = 0;

    if bytes.first() == Some(&b'-') {
        end = 1;
    }
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac = end + 1;
        while frac < bytes.len() && bytes[frac].is_ascii_digit() {
            frac += 1;
        }
        // Keep the dot only if at least one fraction digit follows.
        if frac > end + 1 {
            end = frac;
        }
    }

    text[..end].parse().unwrap_or(0.0)
}
