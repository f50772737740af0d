/// Character cursor over source text, tracking a byte offset.
///
/// The position always sits on a `char` boundary, so slicing the source at
/// `pos()` never panics.
pub(crate) struct Cursor<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Cursor { source, pos: 0 }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// The character under the cursor, or `None` at end of input.
    pub(crate) fn current(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    /// The character after the current one.
    pub(crate) fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().nth(1)
    }

    pub(crate) fn advance(&mut self) {
        if let Some(c) = self.current() {
            self.pos += c.len_utf8();
        }
    }

    /// Skips `n` characters. Returns false if the input ran out first, with
    /// the cursor left at end of input.
    pub(crate) fn advance_n(&mut self, n: usize) -> bool {
        for _ in 0..n {
            if self.is_eof() {
                return false;
            }
            self.advance();
        }
        true
    }

    /// Consumes the maximal run of characters matching `pred` and returns it.
    pub(crate) fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.current() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.source[start..self.pos]
    }
}
