//! Append-only token storage

use super::token::{Token, TokenKind};
use crate::common::{CompileError, CompileResult};

/// Capacity of a fresh token buffer
pub const DEFAULT_CAPACITY: usize = 128;

/// Growable token sequence that doubles its capacity when full.
///
/// Growth goes through `try_reserve_exact`, so running out of memory surfaces as a
/// fatal [`CompileError::OutOfMemory`] instead of aborting the process.
#[derive(Debug)]
pub struct TokenBuffer {
    tokens: Vec<Token>,
}

impl TokenBuffer {
    pub fn with_capacity(capacity: usize) -> CompileResult<Self> {
        let capacity = capacity.max(1);
        let mut tokens = Vec::new();
        tokens
            .try_reserve_exact(capacity)
            .map_err(|_| CompileError::out_of_memory("tokens", capacity))?;
        Ok(Self { tokens })
    }

    pub fn push(&mut self, token: Token) -> CompileResult<()> {
        debug_assert!(
            token.is_eof() || !token.span.is_empty(),
            "empty span for {:?}",
            token.kind
        );
        if self.tokens.len() == self.tokens.capacity() {
            let additional = self.tokens.capacity();
            self.tokens
                .try_reserve_exact(additional)
                .map_err(|_| CompileError::out_of_memory("tokens", additional * 2))?;
        }
        self.tokens.push(token);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.tokens.capacity()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Append the end-of-file marker and hand over the tokens
    pub fn finish(mut self, eof: Token) -> CompileResult<Vec<Token>> {
        debug_assert!(matches!(eof.kind, TokenKind::Eof));
        self.push(eof)?;
        Ok(self.tokens)
    }
}
