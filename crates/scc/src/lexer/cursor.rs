//! Byte cursor over the source text.
//!
//! Tracks the current offset together with the line and column of that offset. Every
//! consumed byte goes through [`Cursor::bump`], so line/column bookkeeping cannot drift
//! from the offset regardless of which scanner is advancing.
//!
//! A cursor may be bounded to a sub-range of the source. The function scanner uses this
//! to re-tokenize an argument list without letting any scanner run past its `)`.

use crate::common::Span;

/// Value returned by the peek methods at (or past) the cursor's end.
pub const EOF_BYTE: u8 = b'\0';

/// Line/column position of a byte offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub offset: usize,
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone)]
pub struct Cursor<'s> {
    source: &'s str,
    pos: usize,
    end: usize,
    line: u32,
    column: u32,
}

impl<'s> Cursor<'s> {
    /// Cursor over the whole of `source`, at line 1, column 0
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            pos: 0,
            end: source.len(),
            line: 1,
            column: 0,
        }
    }

    /// Cursor over `from.offset..end`, starting at the location `from`
    pub fn bounded(source: &'s str, from: Location, end: usize) -> Self {
        debug_assert!(from.offset <= end && end <= source.len());
        Self {
            source,
            pos: from.offset,
            end,
            line: from.line,
            column: from.column,
        }
    }

    pub fn source(&self) -> &'s str {
        self.source
    }

    pub fn offset(&self) -> usize {
        self.pos
    }

    pub fn location(&self) -> Location {
        Location {
            offset: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.end
    }

    /// Current byte, or [`EOF_BYTE`] at the end
    pub fn first(&self) -> u8 {
        self.peek(0)
    }

    /// Byte after the current one, or [`EOF_BYTE`]
    pub fn second(&self) -> u8 {
        self.peek(1)
    }

    pub fn peek(&self, n: usize) -> u8 {
        let at = self.pos + n;
        if at < self.end {
            self.source.as_bytes()[at]
        } else {
            EOF_BYTE
        }
    }

    /// Unconsumed input up to the cursor's end
    pub fn rest(&self) -> &'s str {
        &self.source[self.pos..self.end]
    }

    /// Span from `start` to the current offset
    pub fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.pos)
    }

    /// Consume one byte. A newline moves to column 0 of the next line.
    pub fn bump(&mut self) -> Option<u8> {
        if self.is_eof() {
            return None;
        }
        let byte = self.source.as_bytes()[self.pos];
        self.pos += 1;
        if byte == b'\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(byte)
    }

    /// Consume `n` bytes, stopping early at the end
    pub fn bump_n(&mut self, n: usize) {
        for _ in 0..n {
            if self.bump().is_none() {
                break;
            }
        }
    }

    /// Consume bytes while `predicate` holds
    pub fn eat_while(&mut self, mut predicate: impl FnMut(u8) -> bool) {
        while !self.is_eof() && predicate(self.first()) {
            self.bump();
        }
    }
}
