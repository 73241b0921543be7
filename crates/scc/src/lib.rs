//! SC Compiler - front end for S-C, a restricted subset of C
//!
//! This library turns S-C source text into a token stream for the parser.
//!
//! ## Architecture
//!
//! The crate is organized into:
//! - **Lexer** (`lexer/`): hand-written scanner, token types and the token stream
//! - **Driver** (`driver/`): reading a source file and running the scan
//! - **Common** (`common/`): shared infrastructure (errors, spans, source buffers)

pub mod common;
pub mod driver;
pub mod lexer;

// Re-exports for convenience
pub use common::{CompileError, CompileResult, DiagnosticReporter, ScanError, SourceBuffer, Span};
pub use driver::lex_file;
pub use lexer::{Lexer, LexerConfig, Lookahead, Token, TokenKind, TokenStream};
