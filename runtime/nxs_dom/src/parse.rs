//! Structural parser for rewritten component markup.
//!
//! Builds presentation nodes from a markup fragment with the same lenient,
//! never-failing posture as the rest of the pipeline: unterminated tags run
//! to end of input, stray close tags pop nothing below the mount point, and
//! malformed attribute syntax degrades to whatever was scanned. Whitespace
//! between elements is dropped.

use crate::tree::{NodeId, Tree};
use nxs_lexer::Cursor;

/// Tags that never take children in host markup.
const VOID_TAGS: &[&str] = &["input", "br", "hr", "img"];

fn is_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

/// Parse `markup` into nodes appended under `parent`. Returns the
/// top-level nodes created, in document order.
pub fn parse_fragment(tree: &mut Tree, parent: NodeId, markup: &str) -> Vec<NodeId> {
    let mut cur = Cursor::new(markup);
    // Open-element stack; index 0 is the attachment point and never pops.
    let mut stack: Vec<NodeId> = vec![parent];
    let mut roots = Vec::new();

    while !cur.is_eof() {
        if cur.current() == b'<' && cur.peek() == b'/' {
            // Close tag: any `</...>` closes the innermost open element.
            while !cur.is_eof() && cur.current() != b'>' {
                cur.advance();
            }
            if !cur.is_eof() {
                cur.advance();
            }
            if stack.len() > 1 {
                stack.pop();
            }
            continue;
        }

        if cur.current() == b'<' && is_name_start(cur.peek()) {
            cur.advance();
            let start = cur.pos();
            cur.eat_while(is_name_byte);
            let tag = cur.slice_from(start).to_string();
            let node = tree.create_element(&tag);
            let self_closing = parse_attrs(tree, node, &mut cur);

            let top = *stack.last().unwrap_or(&parent);
            tree.append_child(top, node);
            if stack.len() == 1 {
                roots.push(node);
            }
            if !self_closing && !VOID_TAGS.contains(&tag.as_str()) {
                stack.push(node);
            }
            continue;
        }

        // Text run (a stray `<` is swallowed into the text).
        let start = cur.pos();
        cur.advance();
        cur.eat_while(|b| b != b'<');
        let text = cur.slice_from(start).trim();
        if !text.is_empty() {
            let t = tree.create_text(text);
            let top = *stack.last().unwrap_or(&parent);
            tree.append_child(top, t);
            if stack.len() == 1 {
                roots.push(t);
            }
        }
    }

    roots
}

/// Scan attributes up to the closing `>`. Returns `true` for `/>`.
fn parse_attrs(tree: &mut Tree, node: NodeId, cur: &mut Cursor) -> bool {
    loop {
        cur.eat_while(|b| b.is_ascii_whitespace());
        match cur.current() {
            0 => return false,
            b'>' => {
                cur.advance();
                return false;
            }
            b'/' if cur.peek() == b'>' => {
                cur.advance();
                cur.advance();
                return true;
            }
            _ => {}
        }

        let start = cur.pos();
        cur.eat_while(|b| {
            !b.is_ascii_whitespace() && b != b'=' && b != b'>' && b != b'/' && b != 0
        });
        let name = cur.slice_from(start).to_string();
        if name.is_empty() {
            // Stray byte; skip it so the scan always progresses.
            cur.advance();
            continue;
        }

        cur.eat_while(|b| b.is_ascii_whitespace());
        let value = if cur.current() == b'=' {
            cur.advance();
            cur.eat_while(|b| b.is_ascii_whitespace());
            let quote = cur.current();
            if quote == b'"' || quote == b'\'' {
                cur.advance();
                let vstart = cur.pos();
                cur.eat_while(|b| b != quote);
                let v = cur.slice_from(vstart).to_string();
                if !cur.is_eof() {
                    cur.advance();
                }
                v
            } else {
                let vstart = cur.pos();
                cur.eat_while(|b| !b.is_ascii_whitespace() && b != b'>' && b != 0);
                cur.slice_from(vstart).to_string()
            }
        } else {
            String::new()
        };
        tree.set_attr(node, &name, &value);
    }
}
