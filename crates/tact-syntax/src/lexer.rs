//! Lexer for Tact expressions.
//!
//! Converts source text into a stream of tokens.

use crate::ast::NumberBase;
use crate::token::{Span, Token, TokenKind};
use std::str::Chars;

/// Lexer for Tact source code.
pub struct Lexer<'a> {
    /// Source text being lexed.
    source: &'a str,
    /// Character iterator.
    chars: Chars<'a>,
    /// Current byte position.
    pos: usize,
    /// Current line number (1-indexed).
    line: u32,
    /// Current column number (1-indexed).
    column: u32,
    /// Start position of current token.
    token_start: usize,
    /// Start line of current token.
    token_start_line: u32,
    /// Start column of current token.
    token_start_column: u32,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars(),
            pos: 0,
            line: 1,
            column: 1,
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
        }
    }

    /// Tokenize the entire source, returning all tokens including EOF.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        self.mark_token_start();

        let Some(c) = self.peek() else {
            return self.make_token(TokenKind::Eof);
        };

        if c == '/' && self.peek_next() == Some('/') {
            return self.lex_comment();
        }

        if c == '/' && self.peek_next() == Some('*') {
            return self.lex_multiline_comment();
        }

        if c == '"' {
            return self.lex_string();
        }

        if c.is_ascii_digit() {
            return self.lex_number();
        }

        if c.is_ascii_alphabetic() || c == '_' {
            return self.lex_identifier();
        }

        self.lex_operator_or_punctuation()
    }

    /// Skip whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Mark the start of a new token.
    fn mark_token_start(&mut self) {
        self.token_start = self.pos;
        self.token_start_line = self.line;
        self.token_start_column = self.column;
    }

    /// Peek at the current character without consuming it.
    fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    /// Peek at the next character (after current) without consuming.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.chars.clone();
        chars.next();
        chars.next()
    }

    /// Advance to the next character, returning the current one.
    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consume the current character if it equals `expected`.
    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Create a token with the current span.
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(
            kind,
            Span::new(
                self.token_start,
                self.pos,
                self.token_start_line,
                self.token_start_column,
            ),
        )
    }

    /// Get the text of the current token.
    fn token_text(&self) -> &'a str {
        &self.source[self.token_start..self.pos]
    }

    /// Lex a single-line comment.
    fn lex_comment(&mut self) -> Token {
        // Skip //
        self.advance();
        self.advance();

        if self.peek() == Some(' ') {
            self.advance();
        }

        let content_start = self.pos;
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }

        let content = self.source[content_start..self.pos].to_string();
        self.make_token(TokenKind::Comment(content))
    }

    /// Lex a multi-line comment. Tact block comments do not nest.
    fn lex_multiline_comment(&mut self) -> Token {
        // Skip /*
        self.advance();
        self.advance();

        let content_start = self.pos;
        loop {
            match self.peek() {
                None => {
                    return self.make_token(TokenKind::Error(
                        "unterminated multi-line comment".to_string(),
                    ));
                }
                Some('*') if self.peek_next() == Some('/') => {
                    self.advance();
                    self.advance();
                    break;
                }
                Some(_) => {
                    self.advance();
                }
            }
        }

        let content = self.source[content_start..self.pos - 2].to_string();
        self.make_token(TokenKind::Comment(content))
    }

    /// Lex a string literal.
    fn lex_string(&mut self) -> Token {
        // Skip opening quote
        self.advance();

        let mut content = String::new();
        loop {
            match self.peek() {
                None | Some('\n') => {
                    return self
                        .make_token(TokenKind::Error("unterminated string literal".to_string()));
                }
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    match self.advance() {
                        Some('n') => content.push('\n'),
                        Some('t') => content.push('\t'),
                        Some('r') => content.push('\r'),
                        Some('\\') => content.push('\\'),
                        Some('"') => content.push('"'),
                        Some('u') => match self.lex_unicode_escape() {
                            Ok(c) => content.push(c),
                            Err(msg) => return self.make_token(TokenKind::Error(msg)),
                        },
                        Some(c) => {
                            return self.make_token(TokenKind::Error(format!(
                                "invalid escape sequence: \\{}",
                                c
                            )));
                        }
                        None => {
                            return self.make_token(TokenKind::Error(
                                "unterminated string literal".to_string(),
                            ));
                        }
                    }
                }
                Some(c) => {
                    content.push(c);
                    self.advance();
                }
            }
        }

        self.make_token(TokenKind::StringLit(content))
    }

    /// Lex the `{XXXX}` part of a `\u{XXXX}` escape.
    fn lex_unicode_escape(&mut self) -> Result<char, String> {
        if !self.eat('{') {
            return Err("expected `{` after \\u".to_string());
        }
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
            self.advance();
        }
        let hex = &self.source[start..self.pos];
        if !self.eat('}') {
            return Err("unterminated unicode escape".to_string());
        }
        u32::from_str_radix(hex, 16)
            .ok()
            .filter(|_| (1..=6).contains(&hex.len()))
            .and_then(char::from_u32)
            .ok_or_else(|| format!("invalid unicode escape: \\u{{{}}}", hex))
    }

    /// Lex an integer literal: `0x..`, `0o..`, `0b..`, or decimal, with `_`
    /// allowed between digits.
    fn lex_number(&mut self) -> Token {
        let base = if self.peek() == Some('0') {
            match self.peek_next() {
                Some('x' | 'X') => NumberBase::Hex,
                Some('o' | 'O') => NumberBase::Oct,
                Some('b' | 'B') => NumberBase::Bin,
                _ => NumberBase::Dec,
            }
        } else {
            NumberBase::Dec
        };
        if base != NumberBase::Dec {
            self.advance();
            self.advance();
        }

        let mut digits = String::new();
        let mut last_was_separator = false;
        while let Some(c) = self.peek() {
            if c == '_' {
                if digits.is_empty() || last_was_separator {
                    break;
                }
                last_was_separator = true;
            } else if c.is_ascii_alphanumeric() {
                if !c.is_digit(base.radix()) {
                    self.advance();
                    return self.make_token(TokenKind::Error(format!(
                        "invalid digit in number literal: {}",
                        self.token_text()
                    )));
                }
                digits.push(c);
                last_was_separator = false;
            } else {
                break;
            }
            self.advance();
        }

        if digits.is_empty() || last_was_separator {
            return self.make_token(TokenKind::Error(format!(
                "malformed number literal: {}",
                self.token_text()
            )));
        }
        self.make_token(TokenKind::Number(base, digits))
    }

    /// Lex an identifier or keyword.
    fn lex_identifier(&mut self) -> Token {
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }

        let text = self.token_text();

        if let Some(keyword) = TokenKind::keyword(text) {
            self.make_token(keyword)
        } else {
            self.make_token(TokenKind::Ident(text.to_string()))
        }
    }

    /// Lex an operator or punctuation.
    fn lex_operator_or_punctuation(&mut self) -> Token {
        let Some(c) = self.advance() else {
            return self.make_token(TokenKind::Eof);
        };

        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            '.' => TokenKind::Dot,
            '?' => TokenKind::Question,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '~' => TokenKind::Tilde,
            '^' => TokenKind::Caret,
            '=' => {
                if self.eat('=') {
                    TokenKind::Eq
                } else {
                    TokenKind::Assign
                }
            }
            '!' => {
                if self.eat('=') {
                    TokenKind::Ne
                } else if self.eat('!') {
                    TokenKind::BangBang
                } else {
                    TokenKind::Bang
                }
            }
            '<' => {
                if self.eat('=') {
                    TokenKind::Le
                } else if self.eat('<') {
                    TokenKind::Shl
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                if self.eat('=') {
                    TokenKind::Ge
                } else if self.eat('>') {
                    TokenKind::Shr
                } else {
                    TokenKind::Gt
                }
            }
            '&' => {
                if self.eat('&') {
                    TokenKind::AmpAmp
                } else {
                    TokenKind::Amp
                }
            }
            '|' => {
                if self.eat('|') {
                    TokenKind::PipePipe
                } else {
                    TokenKind::Pipe
                }
            }
            _ => TokenKind::Error(format!("unexpected character: {}", c)),
        };
        self.make_token(kind)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.is_eof() {
            None
        } else {
            Some(token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn num(base: NumberBase, digits: &str) -> TokenKind {
        TokenKind::Number(base, digits.to_string())
    }

    #[test]
    fn test_empty() {
        assert_eq!(lex(""), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_whitespace() {
        assert_eq!(lex("   \n\t  "), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            lex("true false null initOf let"),
            vec![
                TokenKind::True,
                TokenKind::False,
                TokenKind::Null,
                TokenKind::InitOf,
                TokenKind::Reserved("let"),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(
            lex("foo Bar_9 _private"),
            vec![
                TokenKind::Ident("foo".to_string()),
                TokenKind::Ident("Bar_9".to_string()),
                TokenKind::Ident("_private".to_string()),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            lex("0 42 1_000 0x1F 0o17 0b101"),
            vec![
                num(NumberBase::Dec, "0"),
                num(NumberBase::Dec, "42"),
                num(NumberBase::Dec, "1000"),
                num(NumberBase::Hex, "1F"),
                num(NumberBase::Oct, "17"),
                num(NumberBase::Bin, "101"),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_malformed_numbers() {
        assert!(matches!(lex("0x")[0], TokenKind::Error(_)));
        assert!(matches!(lex("0b102")[0], TokenKind::Error(_)));
        assert!(matches!(lex("1__0")[0], TokenKind::Error(_)));
        assert!(matches!(lex("12ab")[0], TokenKind::Error(_)));
    }

    #[test]
    fn test_number_then_dot() {
        assert_eq!(
            lex("1.Foo"),
            vec![
                num(NumberBase::Dec, "1"),
                TokenKind::Dot,
                TokenKind::Ident("Foo".to_string()),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_strings() {
        assert_eq!(
            lex(r#""hello" "world""#),
            vec![
                TokenKind::StringLit("hello".to_string()),
                TokenKind::StringLit("world".to_string()),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            lex(r#""line1\nline2" "tab\there" "quote\"end" "\u{41}""#),
            vec![
                TokenKind::StringLit("line1\nline2".to_string()),
                TokenKind::StringLit("tab\there".to_string()),
                TokenKind::StringLit("quote\"end".to_string()),
                TokenKind::StringLit("A".to_string()),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_bad_escape() {
        assert!(matches!(lex(r#""\q""#)[0], TokenKind::Error(_)));
        assert!(matches!(lex(r#""\u{}""#)[0], TokenKind::Error(_)));
        assert!(matches!(lex("\"open")[0], TokenKind::Error(_)));
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            lex("+ - * / % == != < <= > >= << >> & && | || ^ ! !! ~"),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::Eq,
                TokenKind::Ne,
                TokenKind::Lt,
                TokenKind::Le,
                TokenKind::Gt,
                TokenKind::Ge,
                TokenKind::Shl,
                TokenKind::Shr,
                TokenKind::Amp,
                TokenKind::AmpAmp,
                TokenKind::Pipe,
                TokenKind::PipePipe,
                TokenKind::Caret,
                TokenKind::Bang,
                TokenKind::BangBang,
                TokenKind::Tilde,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_bang_runs() {
        assert_eq!(
            lex("!!!x"),
            vec![
                TokenKind::BangBang,
                TokenKind::Bang,
                TokenKind::Ident("x".to_string()),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            lex("( ) { } , : . ? ="),
            vec![
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Comma,
                TokenKind::Colon,
                TokenKind::Dot,
                TokenKind::Question,
                TokenKind::Assign,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            lex("foo // comment\nbar /* block */ baz"),
            vec![
                TokenKind::Ident("foo".to_string()),
                TokenKind::Comment("comment".to_string()),
                TokenKind::Ident("bar".to_string()),
                TokenKind::Comment(" block ".to_string()),
                TokenKind::Ident("baz".to_string()),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_span_tracking() {
        let tokens = Lexer::new("foo bar").tokenize();
        assert_eq!(tokens[0].span.line, 1);
        assert_eq!(tokens[0].span.column, 1);
        assert_eq!(tokens[1].span.line, 1);
        assert_eq!(tokens[1].span.column, 5);
    }

    #[test]
    fn test_span_multiline() {
        let tokens = Lexer::new("foo\nbar").tokenize();
        assert_eq!(tokens[0].span.line, 1);
        assert_eq!(tokens[1].span.line, 2);
        assert_eq!(tokens[1].span.column, 1);
    }

    #[test]
    fn test_error_recovery() {
        let tokens = lex("foo @ bar");
        assert!(matches!(tokens[1], TokenKind::Error(_)));
        assert_eq!(tokens[2], TokenKind::Ident("bar".to_string()));

        // Statement terminators are not part of the expression language.
        let tokens = lex("foo; bar");
        assert!(matches!(tokens[1], TokenKind::Error(_)));
    }
}
