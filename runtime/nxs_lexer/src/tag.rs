//! Depth-tracking scanner for markup tag subtrees.
//!
//! A `<` followed by a letter or `/` starts a tag capture. The scanner
//! accumulates raw text while tracking nesting depth: an opening tag that
//! is not self-closing (`<tag .../>`) increments depth, a closing tag
//! (`</tag>`) decrements it, and scanning stops at the `>` that returns
//! depth to zero. One token therefore captures an entire nested subtree
//! as opaque text, leaving structural interpretation to the materializer.
//!
//! An unterminated tag runs to end of input, like an unterminated string.

use crate::cursor::Cursor;

/// Returns `true` if the byte at the cursor starts a tag capture.
///
/// Requires `<` followed by an ASCII letter (opening tag) or `/` (stray
/// closing tag). `<=` and bare comparisons fall through to the operator
/// rules.
#[inline]
pub(crate) fn at_tag_start(cur: &Cursor) -> bool {
    cur.current() == b'<' && (cur.peek().is_ascii_alphabetic() || cur.peek() == b'/')
}

/// Scan one complete tag subtree, returning its raw text.
///
/// The cursor must be positioned at the opening `<`.
pub(crate) fn scan_tag(cur: &mut Cursor) -> String {
    let start = cur.pos();
    let mut depth = 0usize;

    loop {
        // Invariant at the top of each iteration: cursor is at a `<`.
        let closing = cur.peek() == b'/';
        cur.advance();

        // Find the end of this tag segment.
        let mut last_before_gt = 0u8;
        while !cur.is_eof() && cur.current() != b'>' {
            last_before_gt = cur.current();
            cur.advance();
        }
        if cur.is_eof() {
            break;
        }
        cur.advance(); // consume '>'

        let self_closing = last_before_gt == b'/';
        if closing {
            depth = depth.saturating_sub(1);
        } else if !self_closing {
            depth += 1;
        }
        if depth == 0 {
            break;
        }

        // Consume child text up to the next tag segment.
        while !cur.is_eof() && cur.current() != b'<' {
            cur.advance();
        }
        if cur.is_eof() {
            break;
        }
    }

    cur.slice(start, cur.pos()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn capture(src: &str) -> String {
        let mut cur = Cursor::new(src);
        scan_tag(&mut cur)
    }

    #[test]
    fn simple_tag_pair_is_one_capture() {
        assert_eq!(capture("<btn>Go</btn> rest"), "<btn>Go</btn>");
    }

    #[test]
    fn self_closing_tag_stops_at_its_gt() {
        assert_eq!(capture("<input @bind=\"name\" /> x = 1"), "<input @bind=\"name\" />");
    }

    #[test]
    fn nested_two_levels_spans_outer_close() {
        // The whole subtree from `<card` through `</card>` is one capture.
        let src = "<card><view>hello</view></card> var x = 1";
        assert_eq!(capture(src), "<card><view>hello</view></card>");
    }

    #[test]
    fn siblings_after_close_are_not_captured() {
        let src = "<view>a</view><view>b</view>";
        assert_eq!(capture(src), "<view>a</view>");
    }

    #[test]
    fn unterminated_tag_runs_to_end_of_input() {
        assert_eq!(capture("<view>never closed"), "<view>never closed");
    }

    #[test]
    fn attributes_are_kept_verbatim() {
        let src = "<btn @click=\"go()\">Go</btn>";
        assert_eq!(capture(src), src);
    }

    #[test]
    fn tag_start_requires_letter_or_slash() {
        assert!(at_tag_start(&Cursor::new("<view>")));
        assert!(at_tag_start(&Cursor::new("</view>")));
        assert!(!at_tag_start(&Cursor::new("<= 3")));
        assert!(!at_tag_start(&Cursor::new("< 3")));
        assert!(!at_tag_start(&Cursor::new("x")));
    }
}
