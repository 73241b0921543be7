//! Hand-written scanner: dispatch loop, comments, identifiers and punctuation

use tracing::{debug, trace};

use super::cursor::Cursor;
use super::literal;
use super::sink::TokenBuffer;
use super::token::{
    Delimiter, Operator, Token, TokenKind, Word, is_identifier_continue, is_identifier_start,
    is_punctuation,
};
use super::{LexerConfig, Lookahead};
use crate::common::{CompileError, CompileResult, ScanError, Span};

/// Output of a completed scan
#[derive(Debug, Clone, PartialEq)]
pub struct Lexed {
    /// Every emitted token, ending with exactly one [`TokenKind::Eof`]
    pub tokens: Vec<Token>,
    /// Recoverable errors, in the order they were found
    pub diagnostics: Vec<ScanError>,
}

/// State of one scan: the token sink, collected diagnostics and the current
/// argument-list nesting depth.
pub(crate) struct Scanner<'a> {
    pub(super) source: &'a str,
    pub(super) config: &'a LexerConfig,
    pub(super) sink: TokenBuffer,
    pub(super) diagnostics: Vec<ScanError>,
    pub(super) depth: usize,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(source: &'a str, config: &'a LexerConfig) -> CompileResult<Self> {
        Ok(Self {
            source,
            config,
            sink: TokenBuffer::with_capacity(config.initial_capacity)?,
            diagnostics: Vec::new(),
            depth: 0,
        })
    }

    /// Scan the whole source and terminate the sequence with an end-of-file token
    pub(crate) fn run(mut self) -> CompileResult<Lexed> {
        let mut cursor = Cursor::new(self.source);
        self.scan_all(&mut cursor)?;

        let end = cursor.location();
        let eof = Token::new(TokenKind::Eof, Span::point(end.offset), end.line, end.column);
        let tokens = self.sink.finish(eof)?;

        debug!(
            tokens = tokens.len(),
            diagnostics = self.diagnostics.len(),
            lines = end.line,
            "scan finished"
        );
        Ok(Lexed {
            tokens,
            diagnostics: self.diagnostics,
        })
    }

    pub(super) fn scan_all(&mut self, cursor: &mut Cursor<'a>) -> CompileResult<()> {
        while !cursor.is_eof() {
            self.scan_unit(cursor)?;
        }
        Ok(())
    }

    /// Consume one lexical unit, or one whitespace byte or comment, emitting at most
    /// one token of its own.
    fn scan_unit(&mut self, cursor: &mut Cursor<'a>) -> CompileResult<()> {
        match cursor.first() {
            b' ' | b'\t' | b'\n' => {
                cursor.bump();
                Ok(())
            }
            b'/' if cursor.second() == b'/' => {
                skip_line_comment(cursor);
                Ok(())
            }
            b'/' if cursor.second() == b'*' => {
                let start = cursor.offset();
                if skip_block_comment(cursor) {
                    Ok(())
                } else {
                    Err(CompileError::UnterminatedComment {
                        span: cursor.span_from(start),
                    })
                }
            }
            b'0'..=b'9' => {
                let token = literal::number(cursor);
                self.emit(token)
            }
            b'.' if cursor.second().is_ascii_digit() => {
                let token = literal::leading_dot_float(cursor);
                self.emit(token)
            }
            b'"' => {
                let result = literal::string_literal(cursor);
                self.accept(result)
            }
            b'\'' => {
                let result = literal::char_literal(cursor);
                self.accept(result)
            }
            b if is_identifier_start(b) => self.identifier(cursor),
            b if is_punctuation(b) => self.punctuation(cursor),
            byte => {
                trace!(offset = cursor.offset(), byte, "skipping unrecognized byte");
                cursor.bump();
                Ok(())
            }
        }
    }

    /// Identifier run, classified as keyword, bool literal or identifier, unless a `[`
    /// or `(` follows and turns it into an array or function form.
    fn identifier(&mut self, cursor: &mut Cursor<'a>) -> CompileResult<()> {
        let start = cursor.location();
        cursor.eat_while(is_identifier_continue);
        let span = cursor.span_from(start.offset);
        let word = Word::classify(&self.source[span.range()]).unwrap_or(Word::Identifier);

        if let Some(gap) = self.gap_before(cursor, b'[') {
            cursor.bump_n(gap);
            return self.array_form(cursor, start);
        }

        let is_keyword = matches!(word, Word::Keyword(_));
        if !is_keyword {
            if let Some(gap) = self.gap_before(cursor, b'(') {
                cursor.bump_n(gap);
                return self.function_form(cursor, start);
            }
        }

        let kind = match word {
            Word::Keyword(keyword) => TokenKind::Keyword(keyword),
            Word::Bool => TokenKind::BoolLiteral,
            Word::Identifier => TokenKind::Identifier,
        };
        self.emit(Token::new(kind, span, start.line, start.column))
    }

    /// Number of blanks between the cursor and `target`, if `target` is close enough to
    /// count as attached to the identifier just scanned.
    fn gap_before(&self, cursor: &Cursor<'a>, target: u8) -> Option<usize> {
        match self.config.lookahead {
            Lookahead::SingleSpace => {
                if cursor.first() == target {
                    Some(0)
                } else if cursor.first() == b' ' && cursor.second() == target {
                    Some(1)
                } else {
                    None
                }
            }
            Lookahead::Blanks => {
                let mut gap = 0;
                while matches!(cursor.peek(gap), b' ' | b'\t') {
                    gap += 1;
                }
                (cursor.peek(gap) == target).then_some(gap)
            }
        }
    }

    /// Delimiter, or the longest operator starting at the cursor
    fn punctuation(&mut self, cursor: &mut Cursor<'a>) -> CompileResult<()> {
        let start = cursor.location();

        let (kind, len) = if let Some(delimiter) = Delimiter::from_byte(cursor.first()) {
            (TokenKind::Delimiter(delimiter), 1)
        } else if let Some((operator, len)) = Operator::longest_prefix(cursor.rest()) {
            (TokenKind::Operator(operator), len)
        } else {
            cursor.bump();
            return Ok(());
        };

        cursor.bump_n(len);
        self.emit(Token::new(
            kind,
            cursor.span_from(start.offset),
            start.line,
            start.column,
        ))
    }

    pub(super) fn emit(&mut self, token: Token) -> CompileResult<()> {
        self.sink.push(token)
    }

    pub(super) fn report(&mut self, error: ScanError) {
        debug!(span = ?error.span(), "{error}");
        self.diagnostics.push(error);
    }

    fn accept(&mut self, result: Result<Token, ScanError>) -> CompileResult<()> {
        match result {
            Ok(token) => self.emit(token),
            Err(error) => {
                self.report(error);
                Ok(())
            }
        }
    }
}

/// Skip `//` up to and including the newline
pub(super) fn skip_line_comment(cursor: &mut Cursor<'_>) {
    cursor.eat_while(|b| b != b'\n');
    cursor.bump();
}

/// Skip `/* ... */`. Returns `false` if the input ends before `*/`.
pub(super) fn skip_block_comment(cursor: &mut Cursor<'_>) -> bool {
    cursor.bump_n(2);
    loop {
        if cursor.is_eof() {
            return false;
        }
        if cursor.first() == b'*' && cursor.second() == b'/' {
            cursor.bump_n(2);
            return true;
        }
        cursor.bump();
    }
}
