//! Token definitions for the S-C lexer

use crate::common::Span;
use logos::Logos;

/// Token with source location.
///
/// The lexeme is not stored; resolve `span` against the source it was scanned from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// Numeric value, set for integer and float literals only
    pub value: Option<f64>,
    /// 1-based line of the first character
    pub line: u32,
    /// 0-based column of the first character
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span, line: u32, column: u32) -> Self {
        Self {
            kind,
            span,
            value: None,
            line,
            column,
        }
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    /// The lexeme of this token within `source`
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.span.range()]
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

/// All token kinds produced by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    IntLiteral,
    FloatLiteral,
    CharLiteral,
    StringLiteral,
    BoolLiteral,
    Identifier,
    /// `name(args)`: a whole call or declaration head, emitted after its argument sub-tokens
    FunctionForm,
    /// `name[dim]...`: an identifier with every subscript that follows it
    ArrayForm,
    Keyword(Keyword),
    Operator(Operator),
    Delimiter(Delimiter),
    Eof,
}

impl TokenKind {
    /// Upper-case category name, e.g. `INT_LITERAL`
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::IntLiteral => "INT_LITERAL",
            TokenKind::FloatLiteral => "FLOAT_LITERAL",
            TokenKind::CharLiteral => "CHAR_LITERAL",
            TokenKind::StringLiteral => "STR_LITERAL",
            TokenKind::BoolLiteral => "BOOL_LITERAL",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::FunctionForm => "FUNCTION",
            TokenKind::ArrayForm => "ARRAY",
            TokenKind::Keyword(_) => "KEYWORD",
            TokenKind::Operator(_) => "OPERATOR",
            TokenKind::Delimiter(_) => "DELIMITER",
            TokenKind::Eof => "END_OF_FILE",
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::IntLiteral
                | TokenKind::FloatLiteral
                | TokenKind::CharLiteral
                | TokenKind::StringLiteral
                | TokenKind::BoolLiteral
        )
    }
}

/// Reserved words of S-C
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Int,
    Float,
    Char,
    Bool,
    Void,
    If,
    Else,
    For,
    While,
    Break,
    Continue,
    Return,
    Const,
    Static,
    Nullptr,
    Null,
}

/// Classification of an identifier-shaped run.
///
/// Keyword tokens win over the identifier regex when both match the whole run.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Word {
    #[token("int", |_| Keyword::Int)]
    #[token("float", |_| Keyword::Float)]
    #[token("char", |_| Keyword::Char)]
    #[token("bool", |_| Keyword::Bool)]
    #[token("void", |_| Keyword::Void)]
    #[token("if", |_| Keyword::If)]
    #[token("else", |_| Keyword::Else)]
    #[token("for", |_| Keyword::For)]
    #[token("while", |_| Keyword::While)]
    #[token("break", |_| Keyword::Break)]
    #[token("continue", |_| Keyword::Continue)]
    #[token("return", |_| Keyword::Return)]
    #[token("const", |_| Keyword::Const)]
    #[token("static", |_| Keyword::Static)]
    #[token("nullptr", |_| Keyword::Nullptr)]
    #[token("NULL", |_| Keyword::Null)]
    Keyword(Keyword),

    #[token("true")]
    #[token("false")]
    Bool,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,
}

impl Word {
    /// Classify a complete identifier run. Returns `None` if `run` is not a single word.
    pub(crate) fn classify(run: &str) -> Option<Word> {
        let mut lex = Word::lexer(run);
        match lex.next() {
            Some(Ok(word)) if lex.span().end == run.len() => Some(word),
            _ => None,
        }
    }
}

/// Operators, matched longest-first
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    // Three characters
    #[token("<<=")]
    LtLtEq,
    #[token(">>=")]
    GtGtEq,

    // Two characters
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("&=")]
    AmpEq,
    #[token("|=")]
    PipeEq,
    #[token("^=")]
    CaretEq,
    #[token("<<")]
    LtLt,
    #[token(">>")]
    GtGt,
    #[token("->")]
    Arrow,

    // One character
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("!")]
    Bang,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,
    #[token(".")]
    Dot,
}

impl Operator {
    /// Longest operator at the start of `input`, with its byte length
    pub fn longest_prefix(input: &str) -> Option<(Operator, usize)> {
        let mut lex = Operator::lexer(input);
        match lex.next() {
            Some(Ok(op)) => Some((op, lex.span().end)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::LtLtEq => "<<=",
            Operator::GtGtEq => ">>=",
            Operator::EqEq => "==",
            Operator::NotEq => "!=",
            Operator::LtEq => "<=",
            Operator::GtEq => ">=",
            Operator::AmpAmp => "&&",
            Operator::PipePipe => "||",
            Operator::PlusPlus => "++",
            Operator::MinusMinus => "--",
            Operator::PlusEq => "+=",
            Operator::MinusEq => "-=",
            Operator::StarEq => "*=",
            Operator::SlashEq => "/=",
            Operator::PercentEq => "%=",
            Operator::AmpEq => "&=",
            Operator::PipeEq => "|=",
            Operator::CaretEq => "^=",
            Operator::LtLt => "<<",
            Operator::GtGt => ">>",
            Operator::Arrow => "->",
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Star => "*",
            Operator::Slash => "/",
            Operator::Percent => "%",
            Operator::Eq => "=",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Bang => "!",
            Operator::Amp => "&",
            Operator::Pipe => "|",
            Operator::Caret => "^",
            Operator::Tilde => "~",
            Operator::Dot => ".",
        }
    }
}

/// Single-character punctuation that is never part of an operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semi,
    Comma,
}

impl Delimiter {
    pub fn from_byte(byte: u8) -> Option<Delimiter> {
        match byte {
            b'(' => Some(Delimiter::LParen),
            b')' => Some(Delimiter::RParen),
            b'{' => Some(Delimiter::LBrace),
            b'}' => Some(Delimiter::RBrace),
            b'[' => Some(Delimiter::LBracket),
            b']' => Some(Delimiter::RBracket),
            b';' => Some(Delimiter::Semi),
            b',' => Some(Delimiter::Comma),
            _ => None,
        }
    }
}

/// Bytes that start an operator or a delimiter
pub(crate) fn is_punctuation(byte: u8) -> bool {
    matches!(
        byte,
        b'+' | b'-'
            | b'*'
            | b'/'
            | b'%'
            | b'='
            | b'<'
            | b'>'
            | b'!'
            | b'&'
            | b'|'
            | b'~'
            | b'^'
            | b'.'
    ) || Delimiter::from_byte(byte).is_some()
}

pub(crate) fn is_identifier_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

pub(crate) fn is_identifier_continue(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}
