//! Array and function forms.
//!
//! Both scanners match balanced delimiters starting at the `[` or `(` that follows an
//! identifier. Quoted literals and comments are stepped over while matching, so a
//! `)` inside `"a)b"` does not close an argument list.

use tracing::trace;

use super::cursor::{Cursor, Location};
use super::literal::skip_quoted;
use super::scanner::{Scanner, skip_block_comment, skip_line_comment};
use super::token::{Delimiter, Token, TokenKind};
use crate::common::{CompileResult, ScanError, Span};

impl<'a> Scanner<'a> {
    /// `name[..]` with any further `[..]` groups, as one token.
    ///
    /// The cursor is on the first `[`. Spaces between groups are absorbed; spaces after
    /// the last group are consumed but stay outside the token's span.
    pub(super) fn array_form(
        &mut self,
        cursor: &mut Cursor<'a>,
        start: Location,
    ) -> CompileResult<()> {
        loop {
            let Some(close) = match_delimiters(cursor, b'[', b']') else {
                self.report(ScanError::UnclosedSubscript {
                    span: cursor.span_from(start.offset),
                });
                return Ok(());
            };

            cursor.eat_while(|b| b == b' ');
            if cursor.first() != b'[' {
                let span = Span::new(start.offset, close + 1);
                trace!(?span, "array form");
                return self.emit(Token::new(
                    TokenKind::ArrayForm,
                    span,
                    start.line,
                    start.column,
                ));
            }
        }
    }

    /// `name(args)` as one token, preceded by its `(` and by the tokens of `args`.
    ///
    /// The cursor is on the `(`. The argument text is scanned again as ordinary input, so
    /// it is covered both by its own tokens and by the function form's span.
    pub(super) fn function_form(
        &mut self,
        cursor: &mut Cursor<'a>,
        start: Location,
    ) -> CompileResult<()> {
        let open = cursor.location();
        self.emit(Token::new(
            TokenKind::Delimiter(Delimiter::LParen),
            Span::new(open.offset, open.offset + 1),
            open.line,
            open.column,
        ))?;

        let Some(close) = match_delimiters(cursor, b'(', b')') else {
            self.report(ScanError::UnclosedArguments {
                span: cursor.span_from(start.offset),
            });
            return Ok(());
        };
        let span = Span::new(start.offset, close + 1);

        if self.depth >= self.config.max_nesting {
            self.report(ScanError::NestingTooDeep {
                span,
                limit: self.config.max_nesting,
            });
        } else {
            let args = Location {
                offset: open.offset + 1,
                line: open.line,
                column: open.column + 1,
            };
            let mut inner = Cursor::bounded(self.source, args, close);
            self.depth += 1;
            let scanned = self.scan_all(&mut inner);
            self.depth -= 1;
            scanned?;
        }

        cursor.eat_while(|b| b == b' ');
        trace!(?span, depth = self.depth, "function form");
        self.emit(Token::new(TokenKind::FunctionForm, span, start.line, start.column))
    }
}

/// Walk from the `open` byte under the cursor to its matching `close`, consuming both.
///
/// Returns the offset of the matching `close`, or `None` (with the cursor at the end)
/// if the input runs out first, including inside a literal or comment.
fn match_delimiters(cursor: &mut Cursor<'_>, open: u8, close: u8) -> Option<usize> {
    let mut depth = 0usize;
    loop {
        if cursor.is_eof() {
            return None;
        }
        match cursor.first() {
            b'"' | b'\'' => {
                if !skip_quoted(cursor) {
                    return None;
                }
                continue;
            }
            b'/' if cursor.second() == b'/' => {
                skip_line_comment(cursor);
                continue;
            }
            b'/' if cursor.second() == b'*' => {
                if !skip_block_comment(cursor) {
                    return None;
                }
                continue;
            }
            b if b == open => depth += 1,
            b if b == close => {
                depth -= 1;
                if depth == 0 {
                    let at = cursor.offset();
                    cursor.bump();
                    return Some(at);
                }
            }
            _ => {}
        }
        cursor.bump();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::token::{Keyword, Operator};
    use crate::lexer::{LexerConfig, Lexed, Lookahead};
    use pretty_assertions::assert_eq;

    fn lex_with(source: &str, config: &LexerConfig) -> Lexed {
        Scanner::new(source, config).unwrap().run().unwrap()
    }

    fn lex(source: &str) -> Lexed {
        lex_with(source, &LexerConfig::default())
    }

    fn texts(source: &str, lexed: &Lexed) -> Vec<(TokenKind, String)> {
        lexed
            .tokens
            .iter()
            .map(|t| (t.kind, t.text(source).to_string()))
            .collect()
    }

    fn tok(kind: TokenKind, text: &str) -> (TokenKind, String) {
        (kind, text.to_string())
    }

    #[test]
    fn test_function_definition() {
        let source = "int add(int a, int b) { return a+b; }";
        let lexed = lex(source);
        assert_eq!(
            texts(source, &lexed),
            vec![
                tok(TokenKind::Keyword(Keyword::Int), "int"),
                tok(TokenKind::Delimiter(Delimiter::LParen), "("),
                tok(TokenKind::Keyword(Keyword::Int), "int"),
                tok(TokenKind::Identifier, "a"),
                tok(TokenKind::Delimiter(Delimiter::Comma), ","),
                tok(TokenKind::Keyword(Keyword::Int), "int"),
                tok(TokenKind::Identifier, "b"),
                tok(TokenKind::FunctionForm, "add(int a, int b)"),
                tok(TokenKind::Delimiter(Delimiter::LBrace), "{"),
                tok(TokenKind::Keyword(Keyword::Return), "return"),
                tok(TokenKind::Identifier, "a"),
                tok(TokenKind::Operator(Operator::Plus), "+"),
                tok(TokenKind::Identifier, "b"),
                tok(TokenKind::Delimiter(Delimiter::Semi), ";"),
                tok(TokenKind::Delimiter(Delimiter::RBrace), "}"),
                tok(TokenKind::Eof, ""),
            ]
        );
        assert!(lexed.diagnostics.is_empty());
    }

    #[test]
    fn test_argument_tokens_lie_inside_function_form() {
        let source = "x = max(a, 2);";
        let lexed = lex(source);
        let form = lexed
            .tokens
            .iter()
            .find(|t| t.kind == TokenKind::FunctionForm)
            .unwrap();
        assert_eq!(form.text(source), "max(a, 2)");
        assert_eq!((form.line, form.column), (1, 4));

        let inner: Vec<_> = lexed
            .tokens
            .iter()
            .filter(|t| t.kind != TokenKind::FunctionForm && form.span.contains(t.span))
            .map(|t| t.text(source))
            .collect();
        assert_eq!(inner, vec!["(", "a", ",", "2"]);
    }

    #[test]
    fn test_argument_positions() {
        let source = "f(\n  a,\n  b)";
        let lexed = lex(source);
        let positions: Vec<_> = lexed
            .tokens
            .iter()
            .map(|t| (t.text(source).to_string(), t.line, t.column))
            .collect();
        assert_eq!(
            positions,
            vec![
                ("(".to_string(), 1, 1),
                ("a".to_string(), 2, 2),
                (",".to_string(), 2, 3),
                ("b".to_string(), 3, 2),
                (source.to_string(), 1, 0),
                (String::new(), 3, 4),
            ]
        );
    }

    #[test]
    fn test_paren_inside_string_does_not_close_call() {
        let source = r#"f("a)b") + 1"#;
        let lexed = lex(source);
        assert_eq!(
            texts(source, &lexed),
            vec![
                tok(TokenKind::Delimiter(Delimiter::LParen), "("),
                tok(TokenKind::StringLiteral, r#""a)b""#),
                tok(TokenKind::FunctionForm, r#"f("a)b")"#),
                tok(TokenKind::Operator(Operator::Plus), "+"),
                tok(TokenKind::IntLiteral, "1"),
                tok(TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn test_paren_inside_char_does_not_close_call() {
        let source = r"put(')', '\'')";
        let lexed = lex(source);
        let form = lexed.tokens[lexed.tokens.len() - 2];
        assert_eq!(form.kind, TokenKind::FunctionForm);
        assert_eq!(form.text(source), source);
    }

    #[test]
    fn test_nested_calls() {
        let source = "f(g(x), y)";
        let lexed = lex(source);
        assert_eq!(
            texts(source, &lexed),
            vec![
                tok(TokenKind::Delimiter(Delimiter::LParen), "("),
                tok(TokenKind::Delimiter(Delimiter::LParen), "("),
                tok(TokenKind::Identifier, "x"),
                tok(TokenKind::FunctionForm, "g(x)"),
                tok(TokenKind::Delimiter(Delimiter::Comma), ","),
                tok(TokenKind::Identifier, "y"),
                tok(TokenKind::FunctionForm, "f(g(x), y)"),
                tok(TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn test_empty_argument_list() {
        let source = "int main () {}";
        let lexed = lex(source);
        assert_eq!(
            texts(source, &lexed),
            vec![
                tok(TokenKind::Keyword(Keyword::Int), "int"),
                tok(TokenKind::Delimiter(Delimiter::LParen), "("),
                tok(TokenKind::FunctionForm, "main ()"),
                tok(TokenKind::Delimiter(Delimiter::LBrace), "{"),
                tok(TokenKind::Delimiter(Delimiter::RBrace), "}"),
                tok(TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn test_unclosed_call_is_recoverable() {
        let source = "f(a, \"b)\"";
        let lexed = lex(source);
        assert_eq!(
            lexed.diagnostics,
            vec![ScanError::UnclosedArguments { span: Span::new(0, source.len()) }]
        );
        assert_eq!(
            texts(source, &lexed),
            vec![
                tok(TokenKind::Delimiter(Delimiter::LParen), "("),
                tok(TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn test_open_comment_in_arguments_is_recoverable() {
        let source = "f(a /* x";
        let lexed = lex(source);
        assert_eq!(
            lexed.diagnostics,
            vec![ScanError::UnclosedArguments { span: Span::new(0, source.len()) }]
        );
        let got: Vec<_> = lexed.tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            got,
            vec![TokenKind::Delimiter(Delimiter::LParen), TokenKind::Eof]
        );
    }

    #[test]
    fn test_open_comment_in_subscript_is_recoverable() {
        let source = "a[1 /* ]";
        let lexed = lex(source);
        assert_eq!(
            lexed.diagnostics,
            vec![ScanError::UnclosedSubscript { span: Span::new(0, source.len()) }]
        );
        assert_eq!(lexed.tokens.len(), 1);
    }

    #[test]
    fn test_nesting_limit() {
        let config = LexerConfig {
            max_nesting: 1,
            ..LexerConfig::default()
        };
        let source = "f(g(h(x)))";
        let lexed = lex_with(source, &config);
        assert_eq!(
            lexed.diagnostics,
            vec![ScanError::NestingTooDeep { span: Span::new(2, 9), limit: 1 }]
        );
        assert_eq!(
            texts(source, &lexed),
            vec![
                tok(TokenKind::Delimiter(Delimiter::LParen), "("),
                tok(TokenKind::Delimiter(Delimiter::LParen), "("),
                tok(TokenKind::FunctionForm, "g(h(x))"),
                tok(TokenKind::FunctionForm, "f(g(h(x)))"),
                tok(TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn test_array_declaration() {
        let source = "int arr[10];";
        let lexed = lex(source);
        assert_eq!(
            texts(source, &lexed),
            vec![
                tok(TokenKind::Keyword(Keyword::Int), "int"),
                tok(TokenKind::ArrayForm, "arr[10]"),
                tok(TokenKind::Delimiter(Delimiter::Semi), ";"),
                tok(TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn test_multi_dimensional_array() {
        let source = "grid[2][3] = m [i] [j+1] ;";
        let lexed = lex(source);
        assert_eq!(
            texts(source, &lexed),
            vec![
                tok(TokenKind::ArrayForm, "grid[2][3]"),
                tok(TokenKind::Operator(Operator::Eq), "="),
                tok(TokenKind::ArrayForm, "m [i] [j+1]"),
                tok(TokenKind::Delimiter(Delimiter::Semi), ";"),
                tok(TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn test_nested_subscript() {
        let source = "a[b[0]]";
        let lexed = lex(source);
        assert_eq!(lexed.tokens.len(), 2);
        assert_eq!(lexed.tokens[0].text(source), "a[b[0]]");
    }

    #[test]
    fn test_unclosed_subscript_is_recoverable() {
        let source = "buf[3";
        let lexed = lex(source);
        assert_eq!(
            lexed.diagnostics,
            vec![ScanError::UnclosedSubscript { span: Span::new(0, 5) }]
        );
        assert_eq!(lexed.tokens.len(), 1);
    }

    #[test]
    fn test_single_space_lookahead() {
        let source = "f  (x) a  [1]";
        let lexed = lex(source);
        let got: Vec<_> = lexed.tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            got,
            vec![
                TokenKind::Identifier,
                TokenKind::Delimiter(Delimiter::LParen),
                TokenKind::Identifier,
                TokenKind::Delimiter(Delimiter::RParen),
                TokenKind::Identifier,
                TokenKind::Delimiter(Delimiter::LBracket),
                TokenKind::IntLiteral,
                TokenKind::Delimiter(Delimiter::RBracket),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_blank_lookahead() {
        let config = LexerConfig {
            lookahead: Lookahead::Blanks,
            ..LexerConfig::default()
        };
        let source = "f \t (x) a  [1]\nb\n[2]";
        let lexed = lex_with(source, &config);
        let got: Vec<_> = lexed
            .tokens
            .iter()
            .filter(|t| t.kind != TokenKind::Delimiter(Delimiter::LParen))
            .map(|t| (t.kind, t.text(source)))
            .collect();
        assert_eq!(
            got,
            vec![
                (TokenKind::Identifier, "x"),
                (TokenKind::FunctionForm, "f \t (x)"),
                (TokenKind::ArrayForm, "a  [1]"),
                (TokenKind::Identifier, "b"),
                (TokenKind::Delimiter(Delimiter::LBracket), "["),
                (TokenKind::IntLiteral, "2"),
                (TokenKind::Delimiter(Delimiter::RBracket), "]"),
                (TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn test_keyword_before_bracket_becomes_array() {
        let source = "int [4]";
        let lexed = lex(source);
        assert_eq!(lexed.tokens[0].kind, TokenKind::ArrayForm);
        assert_eq!(lexed.tokens[0].text(source), "int [4]");
    }

    #[test]
    fn test_bool_before_paren_is_function() {
        let source = "true(1)";
        let lexed = lex(source);
        let got: Vec<_> = lexed.tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            got,
            vec![
                TokenKind::Delimiter(Delimiter::LParen),
                TokenKind::IntLiteral,
                TokenKind::FunctionForm,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comment_inside_arguments() {
        let source = "f(a /* ) */, b)";
        let lexed = lex(source);
        let got: Vec<_> = lexed.tokens.iter().map(|t| t.text(source)).collect();
        assert_eq!(got, vec!["(", "a", ",", "b", source, ""]);
    }
}
