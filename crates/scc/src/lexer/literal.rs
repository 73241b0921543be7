//! Number, character and string literal scanners

use super::cursor::Cursor;
use super::token::{Token, TokenKind};
use crate::common::{ScanError, Span};

/// Scan an integer literal, switching to a float literal at the first `.`.
///
/// The cursor must be on a digit.
pub fn number(cursor: &mut Cursor<'_>) -> Token {
    let start = cursor.location();
    let mut value: i32 = 0;

    while cursor.first().is_ascii_digit() {
        let digit = i32::from(cursor.first() - b'0');
        value = value.wrapping_mul(10).wrapping_add(digit);
        cursor.bump();
    }

    if cursor.first() == b'.' {
        return float_tail(cursor, start.offset, start.line, start.column);
    }

    Token::new(
        TokenKind::IntLiteral,
        cursor.span_from(start.offset),
        start.line,
        start.column,
    )
    .with_value(f64::from(value))
}

/// Scan a float written with a leading dot, e.g. `.5`.
///
/// The cursor must be on a `.` that is followed by a digit.
pub fn leading_dot_float(cursor: &mut Cursor<'_>) -> Token {
    let start = cursor.location();
    float_tail(cursor, start.offset, start.line, start.column)
}

/// Consume the `.`, the fractional digits and an optional `f`/`F` suffix
fn float_tail(cursor: &mut Cursor<'_>, start: usize, line: u32, column: u32) -> Token {
    debug_assert_eq!(cursor.first(), b'.');
    cursor.bump();
    cursor.eat_while(|b| b.is_ascii_digit());
    if matches!(cursor.first(), b'f' | b'F') {
        cursor.bump();
    }

    let span = cursor.span_from(start);
    let digits = span_text(cursor, span).trim_end_matches(['f', 'F']);
    // At least one digit sits on one side of the dot, which `f32::from_str` accepts.
    let value = digits.parse::<f32>().map_or(0.0, f64::from);

    Token::new(TokenKind::FloatLiteral, span, line, column).with_value(value)
}

/// Scan a `'...'` literal. The cursor must be on the opening quote.
pub fn char_literal(cursor: &mut Cursor<'_>) -> Result<Token, ScanError> {
    quoted(cursor, TokenKind::CharLiteral)
        .map_err(|span| ScanError::UnterminatedChar { span })
}

/// Scan a `"..."` literal. The cursor must be on the opening quote.
pub fn string_literal(cursor: &mut Cursor<'_>) -> Result<Token, ScanError> {
    quoted(cursor, TokenKind::StringLiteral)
        .map_err(|span| ScanError::UnterminatedString { span })
}

/// Consume a quoted run, quotes included. On a missing closing quote the cursor is
/// left at the end and the consumed span is returned as the error.
fn quoted(cursor: &mut Cursor<'_>, kind: TokenKind) -> Result<Token, Span> {
    let start = cursor.location();
    let closed = skip_quoted(cursor);
    let span = cursor.span_from(start.offset);
    if closed {
        Ok(Token::new(kind, span, start.line, start.column))
    } else {
        Err(span)
    }
}

/// Step over a literal opened by the quote under the cursor. A backslash protects the
/// byte after it. Returns `false` if the input ends before the closing quote.
pub(crate) fn skip_quoted(cursor: &mut Cursor<'_>) -> bool {
    let Some(quote) = cursor.bump() else {
        return false;
    };
    loop {
        match cursor.bump() {
            None => return false,
            Some(b'\\') => {
                cursor.bump();
            }
            Some(b) if b == quote => return true,
            Some(_) => {}
        }
    }
}

fn span_text<'s>(cursor: &Cursor<'s>, span: Span) -> &'s str {
    &cursor.source()[span.range()]
}
