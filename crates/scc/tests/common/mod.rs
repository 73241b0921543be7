//! Helpers shared by the integration tests

#![allow(dead_code)]

use pretty_assertions::assert_eq;
use sc_compiler::{Token, TokenKind};

/// Tokens that are not nested inside a function form
pub fn top_level(tokens: &[Token]) -> Vec<Token> {
    tokens
        .iter()
        .filter(|t| {
            !tokens.iter().any(|outer| {
                outer.kind == TokenKind::FunctionForm && outer.span != t.span && outer.span.contains(t.span)
            })
        })
        .copied()
        .collect()
}

/// Panics unless `gap` is made only of whitespace and comments
pub fn assert_trivia(gap: &str) {
    let mut rest = gap;
    while !rest.is_empty() {
        if let Some(stripped) = rest.strip_prefix([' ', '\t', '\n']) {
            rest = stripped;
        } else if rest.starts_with("//") {
            rest = rest.find('\n').map_or("", |i| &rest[i + 1..]);
        } else if rest.starts_with("/*") {
            let close = rest.find("*/").expect("closed comment");
            rest = &rest[close + 2..];
        } else {
            panic!("unexpected text between tokens: {gap:?}");
        }
    }
}

/// Top-level tokens plus the trivia between them rebuild the whole source
pub fn assert_reconstructs(source: &str, tokens: &[Token]) {
    let mut rebuilt = String::new();
    let mut offset = 0;
    for token in top_level(tokens) {
        assert!(token.span.start >= offset, "overlapping token {token:?}");
        let gap = &source[offset..token.span.start];
        assert_trivia(gap);
        rebuilt.push_str(gap);
        rebuilt.push_str(token.text(source));
        offset = token.span.end;
    }
    assert_eq!(rebuilt, source);
}
