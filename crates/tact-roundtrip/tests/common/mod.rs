#![allow(dead_code)]

use proptest::prelude::*;
use tact_roundtrip::{ExprGenerator, GeneratorSettings};
use tact_syntax::{Expr, ExprKind, NodeMeta};

pub fn exprs(max_depth: usize) -> BoxedStrategy<Expr> {
    ExprGenerator::new(max_depth, GeneratorSettings::default())
        .expect("valid generator settings")
        .strategy()
}

/// Every expression in the tree, preorder.
pub fn subexprs(expr: &Expr) -> Vec<&Expr> {
    let mut out = Vec::new();
    collect(expr, &mut out);
    out
}

fn collect<'a>(expr: &'a Expr, out: &mut Vec<&'a Expr>) {
    out.push(expr);
    match &expr.node {
        ExprKind::Number(_)
        | ExprKind::Boolean(_)
        | ExprKind::Null
        | ExprKind::String(_)
        | ExprKind::Id(_) => {}
        ExprKind::OpUnary { operand, .. } => collect(operand, out),
        ExprKind::OpBinary { left, right, .. } => {
            collect(left, out);
            collect(right, out);
        }
        ExprKind::Conditional {
            condition,
            then_branch,
            else_branch,
        } => {
            collect(condition, out);
            collect(then_branch, out);
            collect(else_branch, out);
        }
        ExprKind::InitOf { args, .. } | ExprKind::StaticCall { args, .. } => {
            args.iter().for_each(|a| collect(a, out));
        }
        ExprKind::MethodCall { receiver, args, .. } => {
            collect(receiver, out);
            args.iter().for_each(|a| collect(a, out));
        }
        ExprKind::FieldAccess { aggregate, .. } => collect(aggregate, out),
        ExprKind::StructInstance { args, .. } => {
            args.iter().for_each(|a| collect(&a.node.initializer, out));
        }
    }
}

/// Identifier nodes carried directly by `expr`, with their metadata.
pub fn names(expr: &Expr) -> Vec<(&str, NodeMeta)> {
    match &expr.node {
        ExprKind::InitOf { contract: id, .. }
        | ExprKind::StaticCall { function: id, .. }
        | ExprKind::MethodCall { method: id, .. }
        | ExprKind::FieldAccess { field: id, .. } => vec![(id.node.as_str(), id.meta)],
        ExprKind::StructInstance { ty, args } => std::iter::once((ty.node.as_str(), ty.meta))
            .chain(args.iter().map(|a| (a.node.field.node.as_str(), a.node.field.meta)))
            .collect(),
        _ => Vec::new(),
    }
}
