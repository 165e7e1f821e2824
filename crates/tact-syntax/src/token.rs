//! Token types and source span tracking for the Tact expression lexer.

use crate::ast::NumberBase;
use std::fmt;

/// A span in the source code, tracking byte offsets and line/column.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed, in characters not bytes).
    pub column: u32,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Placeholder span for nodes that were not read from source.
    pub fn dummy() -> Self {
        Self::default()
    }

    /// Merge two spans into one that covers both.
    pub fn merge(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            line: self.line.min(other.line),
            column: if self.line <= other.line {
                self.column
            } else {
                other.column
            },
        }
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Words that can never be used as identifiers.
///
/// `true` and `false` are keywords too but they lex to their own literal tokens.
pub const RESERVED_WORDS: &[&str] = &[
    "fun",
    "let",
    "return",
    "receive",
    "extend",
    "external",
    "native",
    "primitive",
    "public",
    "null",
    "if",
    "else",
    "while",
    "repeat",
    "do",
    "until",
    "try",
    "catch",
    "foreach",
    "as",
    "map",
    "mutates",
    "extends",
    "import",
    "with",
    "trait",
    "initOf",
    "override",
    "abstract",
    "virtual",
    "inline",
    "const",
];

/// Check whether `word` is reserved and therefore not a valid identifier.
pub fn is_reserved(word: &str) -> bool {
    matches!(word, "true" | "false") || RESERVED_WORDS.contains(&word)
}

/// The kind of token.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // === Expression keywords ===
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
    /// `initOf`
    InitOf,
    /// Any other reserved word. These only appear in statements and
    /// declarations, so the expression parser rejects them.
    Reserved(&'static str),

    // === Punctuation ===
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `.`
    Dot,
    /// `?`
    Question,
    /// `=`
    Assign,

    // === Arithmetic operators ===
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,

    // === Comparison operators ===
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,

    // === Logical and bitwise operators ===
    /// `!`
    Bang,
    /// `!!`
    BangBang,
    /// `~`
    Tilde,
    /// `&&`
    AmpAmp,
    /// `||`
    PipePipe,
    /// `&`
    Amp,
    /// `|`
    Pipe,
    /// `^`
    Caret,
    /// `<<`
    Shl,
    /// `>>`
    Shr,

    // === Literals ===
    /// Integer literal: base and its digits with `_` separators removed.
    Number(NumberBase, std::string::String),
    /// String literal (without quotes, escapes resolved)
    StringLit(std::string::String),
    /// Identifier
    Ident(std::string::String),

    // === Comments ===
    /// `// ...` or `/* ... */`
    Comment(std::string::String),

    // === Special ===
    /// End of file
    Eof,
    /// Lexer error
    Error(std::string::String),
}

impl TokenKind {
    /// Check if this token is a keyword.
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::True
                | TokenKind::False
                | TokenKind::Null
                | TokenKind::InitOf
                | TokenKind::Reserved(_)
        )
    }

    /// Get the keyword for a given identifier, if any.
    pub fn keyword(ident: &str) -> Option<TokenKind> {
        Some(match ident {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            "initOf" => TokenKind::InitOf,
            _ => {
                let word = RESERVED_WORDS.iter().copied().find(|w| *w == ident)?;
                TokenKind::Reserved(word)
            }
        })
    }

    /// Check if this is a trivia token (comment).
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Comment(_))
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::True => write!(f, "true"),
            TokenKind::False => write!(f, "false"),
            TokenKind::Null => write!(f, "null"),
            TokenKind::InitOf => write!(f, "initOf"),
            TokenKind::Reserved(word) => write!(f, "{}", word),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::LBrace => write!(f, "{{"),
            TokenKind::RBrace => write!(f, "}}"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Colon => write!(f, ":"),
            TokenKind::Dot => write!(f, "."),
            TokenKind::Question => write!(f, "?"),
            TokenKind::Assign => write!(f, "="),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::Percent => write!(f, "%"),
            TokenKind::Eq => write!(f, "=="),
            TokenKind::Ne => write!(f, "!="),
            TokenKind::Lt => write!(f, "<"),
            TokenKind::Le => write!(f, "<="),
            TokenKind::Gt => write!(f, ">"),
            TokenKind::Ge => write!(f, ">="),
            TokenKind::Bang => write!(f, "!"),
            TokenKind::BangBang => write!(f, "!!"),
            TokenKind::Tilde => write!(f, "~"),
            TokenKind::AmpAmp => write!(f, "&&"),
            TokenKind::PipePipe => write!(f, "||"),
            TokenKind::Amp => write!(f, "&"),
            TokenKind::Pipe => write!(f, "|"),
            TokenKind::Caret => write!(f, "^"),
            TokenKind::Shl => write!(f, "<<"),
            TokenKind::Shr => write!(f, ">>"),
            TokenKind::Number(base, digits) => write!(f, "{}{}", base.prefix(), digits),
            TokenKind::StringLit(s) => write!(f, "\"{}\"", s),
            TokenKind::Ident(s) => write!(f, "{}", s),
            TokenKind::Comment(s) => write!(f, "// {}", s),
            TokenKind::Eof => write!(f, "EOF"),
            TokenKind::Error(msg) => write!(f, "ERROR: {}", msg),
        }
    }
}

/// A token with its span in the source code.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The span in the source code.
    pub span: Span,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Check if this is the end of file.
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Check if this is an error token.
    pub fn is_error(&self) -> bool {
        matches!(self.kind, TokenKind::Error(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_merge() {
        let s1 = Span::new(0, 5, 1, 1);
        let s2 = Span::new(10, 15, 1, 11);
        let merged = s1.merge(s2);
        assert_eq!(merged.start, 0);
        assert_eq!(merged.end, 15);
        assert_eq!(merged.len(), 15);
    }

    #[test]
    fn test_dummy_span_is_empty() {
        assert!(Span::dummy().is_empty());
    }

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(TokenKind::keyword("initOf"), Some(TokenKind::InitOf));
        assert_eq!(TokenKind::keyword("null"), Some(TokenKind::Null));
        assert_eq!(TokenKind::keyword("fun"), Some(TokenKind::Reserved("fun")));
        assert_eq!(TokenKind::keyword("Fun"), None);
        assert_eq!(TokenKind::keyword("foo"), None);
    }

    #[test]
    fn test_is_keyword() {
        assert!(TokenKind::InitOf.is_keyword());
        assert!(TokenKind::Reserved("while").is_keyword());
        assert!(!TokenKind::LParen.is_keyword());
        assert!(!TokenKind::Ident("x".to_string()).is_keyword());
    }

    #[test]
    fn test_reserved_words() {
        assert!(is_reserved("true"));
        assert!(is_reserved("mutates"));
        assert!(!is_reserved("Mutates"));
        assert!(!is_reserved("self"));
    }
}
