//! File entry point: read a source file and scan it

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

use crate::common::{CompileError, CompileResult, SourceBuffer};
use crate::lexer::{LexerConfig, TokenStream};

/// Read `path` into memory.
///
/// The whole file is reserved up front, so a file too large to hold is reported as
/// [`CompileError::OutOfMemory`] rather than aborting. Bytes that are not valid UTF-8
/// are replaced, never rejected.
pub fn read_source(path: &Path) -> CompileResult<SourceBuffer> {
    let mut file = File::open(path).map_err(|e| CompileError::open(path, e))?;
    let size = file.metadata().map_err(|e| CompileError::open(path, e))?.len() as usize;
    if size == 0 {
        return Err(CompileError::EmptySource {
            path: path.to_path_buf(),
        });
    }

    let mut bytes = Vec::new();
    bytes
        .try_reserve_exact(size)
        .map_err(|_| CompileError::out_of_memory("source bytes", size))?;
    file.read_to_end(&mut bytes)?;
    if bytes.is_empty() {
        return Err(CompileError::EmptySource {
            path: path.to_path_buf(),
        });
    }

    // Invalid bytes become U+FFFD, which the scanner skips like any unknown byte.
    let text = String::from_utf8(bytes).unwrap_or_else(|e| {
        warn!(file = %path.display(), at = e.utf8_error().valid_up_to(), "source is not valid UTF-8");
        String::from_utf8_lossy(e.as_bytes()).into_owned()
    });

    Ok(SourceBuffer::new(path.display().to_string(), text))
}

/// Read and scan `path`
pub fn lex_file(path: &Path, config: &LexerConfig) -> CompileResult<TokenStream> {
    let source = read_source(path)?;
    debug!(file = source.name(), bytes = source.len(), "scanning");
    TokenStream::lex(source, config)
}
