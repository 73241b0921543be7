//! Scan result handed to the parser: the source together with its tokens

use std::fmt::Write as _;

use super::token::Token;
use super::{Lexed, Lexer, LexerConfig};
use crate::common::{CompileResult, ScanError, SourceBuffer};

/// A source buffer and the tokens scanned from it.
///
/// Tokens only hold spans, so the two are kept (and dropped) together.
#[derive(Debug, Clone)]
pub struct TokenStream {
    source: SourceBuffer,
    tokens: Vec<Token>,
    diagnostics: Vec<ScanError>,
}

impl TokenStream {
    /// Scan `source` to completion
    pub fn lex(source: SourceBuffer, config: &LexerConfig) -> CompileResult<Self> {
        let Lexed {
            tokens,
            diagnostics,
        } = Lexer::with_config(source.text(), config.clone()).tokenize_all()?;
        Ok(Self {
            source,
            tokens,
            diagnostics,
        })
    }

    pub fn source(&self) -> &SourceBuffer {
        &self.source
    }

    /// All tokens, ending with the end-of-file token
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn diagnostics(&self) -> &[ScanError] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Never true for a completed scan, which always holds the end-of-file token
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The lexeme of `token`
    pub fn text(&self, token: &Token) -> &str {
        self.source.slice(token.span)
    }

    pub fn cursor(&self) -> TokenCursor<'_> {
        TokenCursor::new(&self.tokens)
    }

    /// One line per token: position, category, lexeme and numeric value
    pub fn dump(&self) -> String {
        let mut output = String::new();
        for token in &self.tokens {
            let _ = write!(
                output,
                "{:>4}:{:<4} {:<14} {:?}",
                token.line,
                token.column,
                token.kind.name(),
                self.text(token)
            );
            if let Some(value) = token.value {
                let _ = write!(output, " = {value}");
            }
            output.push('\n');
        }
        output
    }

    pub fn into_parts(self) -> (SourceBuffer, Vec<Token>, Vec<ScanError>) {
        (self.source, self.tokens, self.diagnostics)
    }
}

/// Index-based walk over a token slice, for the parser
#[derive(Debug, Clone)]
pub struct TokenCursor<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> TokenCursor<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Past the last token, or on the end-of-file token
    pub fn is_at_end(&self) -> bool {
        self.tokens.get(self.pos).is_none_or(Token::is_eof)
    }

    /// Token at the current position
    pub fn current(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    /// Consume the current token and return it
    pub fn advance(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    /// Token after the current one, clamped to the last token
    pub fn peek_next(&self) -> Option<&'t Token> {
        self.tokens
            .get(self.pos + 1)
            .or_else(|| self.tokens.last())
    }
}

impl<'t> Iterator for TokenCursor<'t> {
    type Item = &'t Token;

    /// Yields tokens up to, but not including, the end-of-file token
    fn next(&mut self) -> Option<Self::Item> {
        if self.is_at_end() {
            None
        } else {
            self.advance()
        }
    }
}
