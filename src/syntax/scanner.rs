//! Character scanner over escaped text
//!
//! Grammars are written against raw characters (`<`, `"`, `&`), but the
//! spans they produce must index the escaped text. The scanner decodes the
//! five references on the fly and reports positions as escaped byte offsets.

use super::escape::decode_reference;
use super::highlights::{HighlightSpan, TokenKind};

/// Cursor over a bounded region of escaped text.
#[derive(Debug, Clone, Copy)]
pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
    end: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            end: text.len(),
        }
    }

    /// A scanner starting at the cursor and stopping at `end`
    pub fn until(&self, end: usize) -> Self {
        Self {
            text: self.text,
            pos: self.pos,
            end: end.clamp(self.pos, self.end),
        }
    }

    /// Current escaped byte offset
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Exclusive upper bound of this scanner
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Restore a previously observed position
    #[inline]
    pub fn reset(&mut self, pos: usize) {
        self.pos = pos.min(self.end);
    }

    /// Escaped text between two offsets
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.text[start..end]
    }

    /// Decode the character at `pos`, returning it with its escaped width.
    fn decode_at(&self, pos: usize) -> Option<(char, usize)> {
        if pos >= self.end {
            return None;
        }
        let rest = &self.text[pos..self.end];
        if let Some((ch, len)) = decode_reference(rest) {
            return Some((ch, len));
        }
        rest.chars().next().map(|ch| (ch, ch.len_utf8()))
    }

    /// Peek at the current decoded character
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.decode_at(self.pos).map(|(ch, _)| ch)
    }

    /// Peek `n` decoded characters ahead (0 = current)
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        let mut pos = self.pos;
        for _ in 0..n {
            let (_, width) = self.decode_at(pos)?;
            pos += width;
        }
        self.decode_at(pos).map(|(ch, _)| ch)
    }

    /// Advance by one decoded character
    #[inline]
    pub fn bump(&mut self) -> Option<char> {
        let (ch, width) = self.decode_at(self.pos)?;
        self.pos += width;
        Some(ch)
    }

    /// Whether the decoded text at the cursor starts with `raw`
    pub fn starts_with(&self, raw: &str) -> bool {
        self.matches_at(self.pos, raw, false)
    }

    /// Case-insensitive (ASCII) variant of [`Scanner::starts_with`]
    pub fn starts_with_ignore_case(&self, raw: &str) -> bool {
        self.matches_at(self.pos, raw, true)
    }

    fn matches_at(&self, mut pos: usize, raw: &str, ignore_case: bool) -> bool {
        for expected in raw.chars() {
            match self.decode_at(pos) {
                Some((ch, width)) => {
                    let equal = if ignore_case {
                        ch.eq_ignore_ascii_case(&expected)
                    } else {
                        ch == expected
                    };
                    if !equal {
                        return false;
                    }
                    pos += width;
                }
                None => return false,
            }
        }
        true
    }

    /// Consume `raw` if the cursor starts with it
    pub fn eat(&mut self, raw: &str) -> bool {
        if self.starts_with(raw) {
            for _ in raw.chars() {
                self.bump();
            }
            true
        } else {
            false
        }
    }

    /// Like [`Scanner::eat`], ignoring ASCII case
    pub fn eat_ignore_case(&mut self, raw: &str) -> bool {
        if !self.starts_with_ignore_case(raw) {
            return false;
        }
        for _ in raw.chars() {
            self.bump();
        }
        true
    }

    /// Consume characters while `pred` holds, returning how many were eaten
    pub fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) -> usize {
        let mut count = 0;
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.bump();
            count += 1;
        }
        count
    }

    /// Escaped offset of the next occurrence of `raw` at or after the cursor
    pub fn find(&self, raw: &str) -> Option<usize> {
        self.find_with(raw, false)
    }

    /// Case-insensitive (ASCII) variant of [`Scanner::find`]
    pub fn find_ignore_case(&self, raw: &str) -> Option<usize> {
        self.find_with(raw, true)
    }

    fn find_with(&self, raw: &str, ignore_case: bool) -> Option<usize> {
        let mut pos = self.pos;
        while pos < self.end {
            if self.matches_at(pos, raw, ignore_case) {
                return Some(pos);
            }
            let (_, width) = self.decode_at(pos)?;
            pos += width;
        }
        None
    }

    /// Escaped offset just past the end of the next occurrence of `raw`
    pub fn find_end(&self, raw: &str) -> Option<usize> {
        let start = self.find(raw)?;
        let mut probe = *self;
        probe.reset(start);
        probe.eat(raw);
        Some(probe.pos())
    }
}

/// Collects spans in order, merging adjacent plain text.
#[derive(Debug, Default)]
pub struct SpanSink {
    spans: Vec<HighlightSpan>,
}

impl SpanSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `start..end` as `kind`. Empty spans are dropped.
    pub fn push(&mut self, kind: TokenKind, start: usize, end: usize) {
        if start >= end {
            return;
        }
        if kind == TokenKind::Plain {
            if let Some(last) = self.spans.last_mut() {
                if last.kind == TokenKind::Plain && last.end == start {
                    last.end = end;
                    return;
                }
            }
        }
        self.spans.push(HighlightSpan { start, end, kind });
    }

    /// Record everything from `start` up to the scanner's position
    #[inline]
    pub fn push_to(&mut self, kind: TokenKind, start: usize, scanner: &Scanner<'_>) {
        self.push(kind, start, scanner.pos());
    }

    /// Consume one character as plain text (guaranteed forward progress)
    pub fn plain_char(&mut self, scanner: &mut Scanner<'_>) {
        let start = scanner.pos();
        scanner.bump();
        self.push_to(TokenKind::Plain, start, scanner);
    }

    /// Consume `raw` as a single token of `kind`; returns false if absent
    pub fn eat_as(&mut self, kind: TokenKind, scanner: &mut Scanner<'_>, raw: &str) -> bool {
        let start = scanner.pos();
        if scanner.eat(raw) {
            self.push_to(kind, start, scanner);
            true
        } else {
            false
        }
    }

    /// Consume whitespace as plain text
    pub fn whitespace(&mut self, scanner: &mut Scanner<'_>) -> usize {
        let start = scanner.pos();
        let eaten = scanner.eat_while(char::is_whitespace);
        self.push_to(TokenKind::Plain, start, scanner);
        eaten
    }

    pub fn into_spans(self) -> Vec<HighlightSpan> {
        self.spans
    }
}
