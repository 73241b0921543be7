//! Error types and diagnostic reporting

use std::io;
use std::path::PathBuf;

use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use thiserror::Error;

use super::Span;

/// Fatal error: the scan is aborted and no token stream is produced.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is empty", path.display())]
    EmptySource { path: PathBuf },

    #[error("out of memory reserving room for {requested} {what}")]
    OutOfMemory { what: &'static str, requested: usize },

    #[error("unterminated comment at {span:?}")]
    UnterminatedComment { span: Span },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl CompileError {
    pub fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    pub fn out_of_memory(what: &'static str, requested: usize) -> Self {
        Self::OutOfMemory { what, requested }
    }

    /// Source location of the error, if it has one
    pub fn span(&self) -> Option<Span> {
        match self {
            CompileError::UnterminatedComment { span } => Some(*span),
            _ => None,
        }
    }
}

pub type CompileResult<T> = Result<T, CompileError>;

/// Recoverable scan error: the offending lexical unit produces no token and scanning
/// continues after it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("unterminated string literal")]
    UnterminatedString { span: Span },

    #[error("unterminated character literal")]
    UnterminatedChar { span: Span },

    #[error("array subscript is never closed")]
    UnclosedSubscript { span: Span },

    #[error("argument list is never closed")]
    UnclosedArguments { span: Span },

    #[error("arguments nested deeper than {limit} levels are not tokenized")]
    NestingTooDeep { span: Span, limit: usize },
}

impl ScanError {
    pub fn span(&self) -> Span {
        match self {
            ScanError::UnterminatedString { span }
            | ScanError::UnterminatedChar { span }
            | ScanError::UnclosedSubscript { span }
            | ScanError::UnclosedArguments { span }
            | ScanError::NestingTooDeep { span, .. } => *span,
        }
    }
}

/// Diagnostic reporter for pretty error output
pub struct DiagnosticReporter {
    files: SimpleFiles<String, String>,
    writer: StandardStream,
    config: term::Config,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self::with_color(ColorChoice::Auto)
    }

    pub fn with_color(choice: ColorChoice) -> Self {
        Self {
            files: SimpleFiles::new(),
            writer: StandardStream::stderr(choice),
            config: term::Config::default(),
        }
    }

    pub fn add_file(&mut self, name: impl Into<String>, source: impl Into<String>) -> usize {
        self.files.add(name.into(), source.into())
    }

    /// Render a fatal error. Errors without a location (or without a registered file)
    /// are printed as a bare message.
    pub fn report_error(&self, file_id: Option<usize>, error: &CompileError) {
        let diagnostic = match (file_id, error) {
            (Some(file_id), CompileError::UnterminatedComment { span }) => Diagnostic::error()
                .with_message("Lexer error")
                .with_labels(vec![
                    Label::primary(file_id, span.range())
                        .with_message("comment is never closed with `*/`"),
                ]),
            (_, CompileError::Io(err)) => {
                Diagnostic::error().with_message(format!("IO error: {err}"))
            }
            (_, other) => Diagnostic::error().with_message(other.to_string()),
        };

        self.emit(&diagnostic);
    }

    /// Render a recoverable scan error as a warning
    pub fn report_warning(&self, file_id: usize, error: &ScanError) {
        let note = match error {
            ScanError::UnterminatedString { .. } | ScanError::UnterminatedChar { .. } => {
                "no closing quote before end of input"
            }
            ScanError::UnclosedSubscript { .. } => "no matching `]` before end of input",
            ScanError::UnclosedArguments { .. } => "no matching `)` before end of input",
            ScanError::NestingTooDeep { .. } => "arguments kept only as part of the call",
        };
        let diagnostic = Diagnostic::warning()
            .with_message(error.to_string())
            .with_labels(vec![Label::primary(file_id, error.span().range()).with_message(note)]);

        self.emit(&diagnostic);
    }

    fn emit(&self, diagnostic: &Diagnostic<usize>) {
        let _ = term::emit(&mut self.writer.lock(), &self.config, &self.files, diagnostic);
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_error_span() {
        let err = ScanError::NestingTooDeep {
            span: Span::new(3, 9),
            limit: 4,
        };
        assert_eq!(err.span(), Span::new(3, 9));
        assert_eq!(
            err.to_string(),
            "arguments nested deeper than 4 levels are not tokenized"
        );
    }

    #[test]
    fn test_compile_error_messages() {
        let err = CompileError::EmptySource {
            path: PathBuf::from("main.sc"),
        };
        assert_eq!(err.to_string(), "main.sc is empty");
        assert_eq!(err.span(), None);

        let err = CompileError::UnterminatedComment {
            span: Span::new(4, 12),
        };
        assert_eq!(err.span(), Some(Span::new(4, 12)));
    }
}
