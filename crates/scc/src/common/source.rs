//! Owned source text for a single scan

use super::Span;

/// The full contents of one input file.
///
/// Tokens refer into the buffer by [`Span`] only, so the buffer must be kept alive for
/// as long as any token produced from it is in use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBuffer {
    name: String,
    text: String,
}

impl SourceBuffer {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The text covered by `span`.
    ///
    /// Lexer spans always start and end next to ASCII bytes, so they fall on character
    /// boundaries.
    pub fn slice(&self, span: Span) -> &str {
        &self.text[span.range()]
    }
}
