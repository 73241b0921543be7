//! Common infrastructure shared by the lexer, the driver and the CLI

mod error;
mod source;
mod span;

pub use error::{CompileError, CompileResult, DiagnosticReporter, ScanError};
pub use source::SourceBuffer;
pub use span::Span;
