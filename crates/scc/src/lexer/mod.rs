//! Lexer module for tokenizing S-C source code
//!
//! The scanner is hand-written: besides ordinary tokens it recognises `name(args)` and
//! `name[dims]` as composite tokens, which needs balanced-delimiter lookahead that a
//! table-driven lexer cannot express. Keyword and operator tables are `logos` enums.

mod cursor;
mod literal;
mod scanner;
mod sink;
mod stream;
mod structural;
mod token;

pub use scanner::Lexed;
pub use sink::{DEFAULT_CAPACITY, TokenBuffer};
pub use stream::{TokenCursor, TokenStream};
pub use token::{Delimiter, Keyword, Operator, Token, TokenKind};

use crate::common::CompileResult;
use scanner::Scanner;

/// How far an identifier may be from a following `(` or `[` and still form a function
/// or array token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lookahead {
    /// `f(` or `f (`: at most one space
    #[default]
    SingleSpace,
    /// Any run of spaces and tabs, but never a line break
    Blanks,
}

/// Configuration options for a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerConfig {
    /// Capacity the token buffer starts with before doubling
    pub initial_capacity: usize,
    /// Deepest argument list whose contents are still tokenized
    pub max_nesting: usize,
    pub lookahead: Lookahead,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            max_nesting: 128,
            lookahead: Lookahead::default(),
        }
    }
}

/// Lexer for S-C source code
pub struct Lexer<'a> {
    source: &'a str,
    config: LexerConfig,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code
    pub fn new(source: &'a str) -> Self {
        Self::with_config(source, LexerConfig::default())
    }

    pub fn with_config(source: &'a str, config: LexerConfig) -> Self {
        Self { source, config }
    }

    /// Tokenize the entire source.
    ///
    /// Fails only on fatal errors; recoverable problems are returned in
    /// [`Lexed::diagnostics`].
    pub fn tokenize_all(self) -> CompileResult<Lexed> {
        Scanner::new(self.source, &self.config)?.run()
    }
}
