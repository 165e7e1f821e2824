//! Generators for expressions with sub-expressions.
//!
//! Each generator takes the strategy for its children, already bound to one
//! level less of depth budget, so composing them never recurses.

use crate::complete::complete;
use proptest::prelude::*;
use tact_syntax::{
    BinaryOp, Expr, ExprKind, FieldInit, Ident, StructFieldInitializer, UnaryOp,
};

fn args(sub: BoxedStrategy<Expr>, max_args: usize) -> impl Strategy<Value = Vec<Expr>> {
    prop::collection::vec(sub, 0..=max_args)
}

pub fn op_unary(sub: BoxedStrategy<Expr>) -> BoxedStrategy<Expr> {
    (prop::sample::select(UnaryOp::ALL.to_vec()), sub)
        .prop_map(|(op, operand)| {
            complete(ExprKind::OpUnary {
                op,
                operand: Box::new(operand),
            })
        })
        .boxed()
}

pub fn op_binary(sub: BoxedStrategy<Expr>) -> BoxedStrategy<Expr> {
    (
        prop::sample::select(BinaryOp::ALL.to_vec()),
        sub.clone(),
        sub,
    )
        .prop_map(|(op, left, right)| {
            complete(ExprKind::OpBinary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            })
        })
        .boxed()
}

pub fn conditional(sub: BoxedStrategy<Expr>) -> BoxedStrategy<Expr> {
    (sub.clone(), sub.clone(), sub)
        .prop_map(|(condition, then_branch, else_branch)| {
            complete(ExprKind::Conditional {
                condition: Box::new(condition),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            })
        })
        .boxed()
}

pub fn field_access(sub: BoxedStrategy<Expr>, ident: BoxedStrategy<Ident>) -> BoxedStrategy<Expr> {
    (sub, ident)
        .prop_map(|(aggregate, field)| {
            complete(ExprKind::FieldAccess {
                aggregate: Box::new(aggregate),
                field,
            })
        })
        .boxed()
}

pub fn method_call(
    sub: BoxedStrategy<Expr>,
    ident: BoxedStrategy<Ident>,
    max_args: usize,
) -> BoxedStrategy<Expr> {
    (sub.clone(), ident, args(sub, max_args))
        .prop_map(|(receiver, method, args)| {
            complete(ExprKind::MethodCall {
                receiver: Box::new(receiver),
                method,
                args,
            })
        })
        .boxed()
}

pub fn static_call(
    sub: BoxedStrategy<Expr>,
    ident: BoxedStrategy<Ident>,
    max_args: usize,
) -> BoxedStrategy<Expr> {
    (ident, args(sub, max_args))
        .prop_map(|(function, args)| complete(ExprKind::StaticCall { function, args }))
        .boxed()
}

/// `initOf Contract(args)`.
pub fn init_of(
    sub: BoxedStrategy<Expr>,
    ident: BoxedStrategy<Ident>,
    max_args: usize,
) -> BoxedStrategy<Expr> {
    (ident, args(sub, max_args))
        .prop_map(|(contract, args)| complete(ExprKind::InitOf { contract, args }))
        .boxed()
}

pub fn field_initializer(
    sub: BoxedStrategy<Expr>,
    ident: BoxedStrategy<Ident>,
) -> BoxedStrategy<StructFieldInitializer> {
    (ident, sub)
        .prop_map(|(field, initializer)| complete(FieldInit { field, initializer }))
        .boxed()
}

pub fn struct_instance(
    sub: BoxedStrategy<Expr>,
    ident: BoxedStrategy<Ident>,
    max_args: usize,
) -> BoxedStrategy<Expr> {
    let fields = prop::collection::vec(field_initializer(sub, ident.clone()), 0..=max_args);
    (ident, fields)
        .prop_map(|(ty, args)| complete(ExprKind::StructInstance { ty, args }))
        .boxed()
}

/// The composite generators that produce expressions, in a fixed order.
///
/// Bare identifiers are not generated; names only appear inside the
/// composites that carry them.
pub fn all(
    sub: BoxedStrategy<Expr>,
    ident: BoxedStrategy<Ident>,
    max_args: usize,
) -> Vec<BoxedStrategy<Expr>> {
    vec![
        op_unary(sub.clone()),
        op_binary(sub.clone()),
        conditional(sub.clone()),
        field_access(sub.clone(), ident.clone()),
        method_call(sub.clone(), ident.clone(), max_args),
        static_call(sub.clone(), ident.clone(), max_args),
        init_of(sub.clone(), ident.clone(), max_args),
        struct_instance(sub, ident, max_args),
    ]
}
