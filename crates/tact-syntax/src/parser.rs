//! Recursive descent parser for Tact expressions.

use crate::ast::*;
use crate::lexer::Lexer;
use crate::token::{Span, Token, TokenKind};
use thiserror::Error;

/// Nesting limit for parenthesized and prefix expressions.
const MAX_NESTING: usize = 100;

/// Parser error.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unexpected token at {span}: expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },
    #[error("unexpected end of input at {span}: expected {expected}")]
    UnexpectedEof { expected: String, span: Span },
    #[error("invalid syntax at {span}: {message}")]
    InvalidSyntax { message: String, span: Span },
}

impl ParseError {
    /// Get the source span where this error occurred.
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. } => *span,
            ParseError::UnexpectedEof { span, .. } => *span,
            ParseError::InvalidSyntax { span, .. } => *span,
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Parser for Tact expressions.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Next node id to hand out. Id 0 is reserved for generated nodes.
    next_id: u32,
    /// Current recursion depth, bounded by `MAX_NESTING`.
    nesting: usize,
}

impl Parser {
    /// Create a new parser from source text.
    pub fn new(source: &str) -> Self {
        let tokens: Vec<_> = Lexer::new(source)
            .tokenize()
            .into_iter()
            .filter(|t| !t.kind.is_trivia())
            .collect();
        Self {
            tokens,
            pos: 0,
            next_id: NodeId::GENERATED.0 + 1,
            nesting: 0,
        }
    }

    /// Parse the whole input as a single expression.
    pub fn parse_expression(&mut self) -> ParseResult<Expr> {
        let expr = self.parse_expr()?;
        if !self.is_at_end() {
            return Err(self.unexpected("end of input"));
        }
        Ok(expr)
    }

    // === Expression parsing with precedence climbing ===

    fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.enter()?;
        let expr = self.parse_conditional();
        self.nesting -= 1;
        expr
    }

    /// `cond ? then : else`. Condition and then-branch sit at `||` level, the
    /// else-branch is itself a conditional, so `?:` nests to the right.
    fn parse_conditional(&mut self) -> ParseResult<Expr> {
        let condition = self.parse_binary(prec::OR)?;
        if !self.match_token(TokenKind::Question) {
            return Ok(condition);
        }
        let then_branch = self.parse_binary(prec::OR)?;
        self.expect(TokenKind::Colon)?;
        let else_branch = self.parse_expr()?;
        let span = condition.span().merge(else_branch.span());
        Ok(self.node(
            ExprKind::Conditional {
                condition: Box::new(condition),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
            span,
        ))
    }

    fn parse_binary(&mut self, min_prec: u8) -> ParseResult<Expr> {
        let mut left = self.parse_prefix()?;

        while let Some(op) = self.peek_binop() {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }

            self.advance(); // consume operator

            // Left-associative: the right operand must bind strictly tighter.
            let right = self.parse_binary(prec + 1)?;

            let span = left.span().merge(right.span());
            left = self.node(
                ExprKind::OpBinary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }

        Ok(left)
    }

    fn peek_binop(&self) -> Option<BinaryOp> {
        match self.peek_kind() {
            TokenKind::PipePipe => Some(BinaryOp::Or),
            TokenKind::AmpAmp => Some(BinaryOp::And),
            TokenKind::Pipe => Some(BinaryOp::BitOr),
            TokenKind::Caret => Some(BinaryOp::BitXor),
            TokenKind::Amp => Some(BinaryOp::BitAnd),
            TokenKind::Eq => Some(BinaryOp::Eq),
            TokenKind::Ne => Some(BinaryOp::Ne),
            TokenKind::Lt => Some(BinaryOp::Lt),
            TokenKind::Le => Some(BinaryOp::Le),
            TokenKind::Gt => Some(BinaryOp::Gt),
            TokenKind::Ge => Some(BinaryOp::Ge),
            TokenKind::Shl => Some(BinaryOp::Shl),
            TokenKind::Shr => Some(BinaryOp::Shr),
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Percent => Some(BinaryOp::Mod),
            _ => None,
        }
    }

    fn parse_prefix(&mut self) -> ParseResult<Expr> {
        let start = self.current_span();

        let ops: &[UnaryOp] = match self.peek_kind() {
            TokenKind::Plus => &[UnaryOp::Plus],
            TokenKind::Minus => &[UnaryOp::Neg],
            TokenKind::Bang => &[UnaryOp::Not],
            TokenKind::Tilde => &[UnaryOp::BitNot],
            // In prefix position `!!` is two logical nots.
            TokenKind::BangBang => &[UnaryOp::Not, UnaryOp::Not],
            _ => return self.parse_postfix(),
        };
        self.advance();

        self.enter()?;
        let operand = self.parse_prefix();
        self.nesting -= 1;

        let mut expr = operand?;
        for &op in ops {
            let span = start.merge(expr.span());
            expr = self.node(
                ExprKind::OpUnary {
                    op,
                    operand: Box::new(expr),
                },
                span,
            );
        }
        Ok(expr)
    }

    fn parse_postfix(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_primary()?;

        loop {
            if self.match_token(TokenKind::BangBang) {
                let span = expr.span().merge(self.prev_span());
                expr = self.node(
                    ExprKind::OpUnary {
                        op: UnaryOp::NotNull,
                        operand: Box::new(expr),
                    },
                    span,
                );
            } else if self.match_token(TokenKind::Dot) {
                let name = self.parse_ident()?;
                if self.check(TokenKind::LParen) {
                    let args = self.parse_call_args()?;
                    let span = expr.span().merge(self.prev_span());
                    expr = self.node(
                        ExprKind::MethodCall {
                            receiver: Box::new(expr),
                            method: name,
                            args,
                        },
                        span,
                    );
                } else {
                    let span = expr.span().merge(name.span());
                    expr = self.node(
                        ExprKind::FieldAccess {
                            aggregate: Box::new(expr),
                            field: name,
                        },
                        span,
                    );
                }
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Parse `( args )`, allowing a trailing comma.
    fn parse_call_args(&mut self) -> ParseResult<Vec<Expr>> {
        self.expect(TokenKind::LParen)?;
        let mut args = Vec::new();
        while !self.check(TokenKind::RParen) {
            args.push(self.parse_expr()?);
            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen)?;
        Ok(args)
    }

    /// Parse `{ field: value, ... }`, allowing a trailing comma and the
    /// `{ field }` shorthand for `{ field: field }`.
    fn parse_struct_fields(&mut self) -> ParseResult<Vec<StructFieldInitializer>> {
        self.expect(TokenKind::LBrace)?;
        let mut fields = Vec::new();
        while !self.check(TokenKind::RBrace) {
            let field = self.parse_ident()?;
            let initializer = if self.match_token(TokenKind::Colon) {
                self.parse_expr()?
            } else {
                let text = field.node.clone();
                self.node(ExprKind::Id(text), field.span())
            };
            let span = field.span().merge(initializer.span());
            fields.push(self.node(FieldInit { field, initializer }, span));
            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBrace)?;
        Ok(fields)
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let start = self.current_span();

        match self.peek_kind() {
            TokenKind::True => {
                self.advance();
                Ok(self.node(ExprKind::Boolean(true), start))
            }
            TokenKind::False => {
                self.advance();
                Ok(self.node(ExprKind::Boolean(false), start))
            }
            TokenKind::Null => {
                self.advance();
                Ok(self.node(ExprKind::Null, start))
            }
            TokenKind::Number(base, digits) => {
                self.advance();
                let number = Number::new(base, &digits).ok_or_else(|| {
                    ParseError::InvalidSyntax {
                        message: format!("invalid number literal: {}{}", base.prefix(), digits),
                        span: start,
                    }
                })?;
                Ok(self.node(ExprKind::Number(number), start))
            }
            TokenKind::StringLit(s) => {
                self.advance();
                Ok(self.node(ExprKind::String(s), start))
            }
            TokenKind::InitOf => {
                self.advance();
                let contract = self.parse_ident()?;
                let args = self.parse_call_args()?;
                let span = start.merge(self.prev_span());
                Ok(self.node(ExprKind::InitOf { contract, args }, span))
            }
            TokenKind::Ident(_) => {
                let name = self.parse_ident()?;
                if self.check(TokenKind::LParen) {
                    let args = self.parse_call_args()?;
                    let span = start.merge(self.prev_span());
                    Ok(self.node(
                        ExprKind::StaticCall {
                            function: name,
                            args,
                        },
                        span,
                    ))
                } else if self.check(TokenKind::LBrace) {
                    let args = self.parse_struct_fields()?;
                    let span = start.merge(self.prev_span());
                    Ok(self.node(ExprKind::StructInstance { ty: name, args }, span))
                } else {
                    Ok(Node::new(ExprKind::Id(name.node), name.meta))
                }
            }
            TokenKind::LParen => {
                // Parentheses only group; they leave no trace in the tree.
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    // === Helper methods ===

    fn parse_ident(&mut self) -> ParseResult<Ident> {
        let span = self.current_span();
        match self.peek_kind() {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(self.node(name, span))
            }
            TokenKind::Reserved(word) => Err(ParseError::InvalidSyntax {
                message: format!("reserved word `{}` cannot be used as an identifier", word),
                span,
            }),
            _ => Err(self.unexpected("identifier")),
        }
    }

    /// Wrap a payload with a fresh id and the given span.
    fn node<T>(&mut self, node: T, span: Span) -> Node<T> {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        Node::new(node, NodeMeta::new(id, span))
    }

    fn enter(&mut self) -> ParseResult<()> {
        if self.nesting >= MAX_NESTING {
            return Err(ParseError::InvalidSyntax {
                message: "expression nested too deeply".to_string(),
                span: self.current_span(),
            });
        }
        self.nesting += 1;
        Ok(())
    }

    /// Error for the current token when `expected` was wanted.
    fn unexpected(&self, expected: &str) -> ParseError {
        let span = self.current_span();
        match self.peek_kind() {
            TokenKind::Eof => ParseError::UnexpectedEof {
                expected: expected.to_string(),
                span,
            },
            TokenKind::Error(message) => ParseError::InvalidSyntax { message, span },
            found => ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: found.to_string(),
                span,
            },
        }
    }

    fn peek(&self) -> &Token {
        // The token stream always ends with EOF, and `advance` never moves past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_kind(&self) -> TokenKind {
        self.peek().kind.clone()
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }

    fn prev_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::dummy()
        }
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek_kind(), TokenKind::Eof)
    }

    fn check(&self, kind: TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(&kind)
    }

    fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    fn expect(&mut self, kind: TokenKind) -> ParseResult<()> {
        if self.check(kind.clone()) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(&format!("`{}`", kind)))
        }
    }
}

/// Parse source text holding exactly one expression.
pub fn parse_expression(source: &str) -> ParseResult<Expr> {
    Parser::new(source).parse_expression()
}
