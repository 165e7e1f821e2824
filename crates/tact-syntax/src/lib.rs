//! Lexer, parser, AST, and renderer for Tact expressions.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod pretty;
pub mod token;

pub use ast::*;
pub use lexer::Lexer;
pub use parser::{parse_expression, ParseError, ParseResult, Parser};
pub use pretty::{expr_precedence, pretty_print_expr};
pub use token::{is_reserved, Span, Token, TokenKind, RESERVED_WORDS};
