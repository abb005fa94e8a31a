//! Byte cursor over source text.
//!
//! The lexer scans left to right with a single cursor. Reads past the end
//! return `0x00`, which no scanning rule matches, so the per-rule loops
//! terminate at EOF without explicit bounds checks at every call site.

/// Cursor over a source byte slice.
///
/// The cursor is [`Copy`], enabling cheap position snapshots.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Cursor {
            src: source.as_bytes(),
            pos: 0,
        }
    }

    /// Returns the byte at the current position, or `0` at EOF.
    #[inline]
    pub fn current(&self) -> u8 {
        self.src.get(self.pos).copied().unwrap_or(0)
    }

    /// Returns the byte one position ahead, or `0` past the end.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.src.get(self.pos + 1).copied().unwrap_or(0)
    }

    /// Returns the byte `n` positions ahead, or `0` past the end.
    #[inline]
    pub fn peek_n(&self, n: usize) -> u8 {
        self.src.get(self.pos + n).copied().unwrap_or(0)
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Advance while `pred` holds for the current byte.
    ///
    /// `pred(0)` must return `false` (true for every byte-class predicate
    /// the lexer uses), so the loop terminates at EOF.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while pred(self.current()) && !self.is_eof() {
            self.pos += 1;
        }
    }

    /// Advance to the next `\n` or EOF. Used to skip `//` comment bodies.
    pub fn eat_until_newline_or_eof(&mut self) {
        match memchr::memchr(b'\n', &self.src[self.pos.min(self.src.len())..]) {
            Some(offset) => self.pos += offset,
            None => self.pos = self.src.len(),
        }
    }

    /// Extract a source substring.
    ///
    /// `start..end` must lie on UTF-8 character boundaries; this holds for
    /// boundaries produced by the scanning rules, which only split around
    /// ASCII delimiters.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        debug_assert!(start <= end && end <= self.src.len());
        std::str::from_utf8(&self.src[start..end]).unwrap_or("")
    }

    /// Extract a substring from `start` to the current position.
    pub fn slice_from(&self, start: usize) -> &'a str {
        self.slice(start, self.pos)
    }
}
