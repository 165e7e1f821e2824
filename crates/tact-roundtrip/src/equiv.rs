//! Structural equality of syntax trees.
//!
//! Two trees are structurally equal when their semantic payloads match at
//! every node. Node ids and source locations are never looked at, so a
//! generated tree can be compared against one produced by the parser.

use tact_syntax::{BinaryOp, ExprKind, FieldInit, Node, Number, UnaryOp};

/// Equality that ignores node metadata.
pub trait StructuralEq {
    fn structurally_eq(&self, other: &Self) -> bool;
}

impl<T: StructuralEq> StructuralEq for Node<T> {
    fn structurally_eq(&self, other: &Self) -> bool {
        self.node.structurally_eq(&other.node)
    }
}

impl<T: StructuralEq + ?Sized> StructuralEq for Box<T> {
    fn structurally_eq(&self, other: &Self) -> bool {
        (**self).structurally_eq(&**other)
    }
}

impl<T: StructuralEq> StructuralEq for [T] {
    fn structurally_eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.structurally_eq(b))
    }
}

impl<T: StructuralEq> StructuralEq for Vec<T> {
    fn structurally_eq(&self, other: &Self) -> bool {
        self.as_slice().structurally_eq(other.as_slice())
    }
}

macro_rules! impl_structural_eq_via_eq {
    ($($ty:ty),* $(,)?) => {
        $(
            impl StructuralEq for $ty {
                fn structurally_eq(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

impl_structural_eq_via_eq!(String, bool, Number, UnaryOp, BinaryOp);

impl StructuralEq for FieldInit {
    fn structurally_eq(&self, other: &Self) -> bool {
        self.field.structurally_eq(&other.field)
            && self.initializer.structurally_eq(&other.initializer)
    }
}

impl StructuralEq for ExprKind {
    fn structurally_eq(&self, other: &Self) -> bool {
        match self {
            ExprKind::Number(a) => matches!(other, ExprKind::Number(b) if a.structurally_eq(b)),
            ExprKind::Boolean(a) => matches!(other, ExprKind::Boolean(b) if a == b),
            ExprKind::Null => matches!(other, ExprKind::Null),
            ExprKind::String(a) => matches!(other, ExprKind::String(b) if a == b),
            ExprKind::Id(a) => matches!(other, ExprKind::Id(b) if a == b),
            ExprKind::OpUnary { op, operand } => match other {
                ExprKind::OpUnary {
                    op: op2,
                    operand: operand2,
                } => op == op2 && operand.structurally_eq(operand2),
                _ => false,
            },
            ExprKind::OpBinary { op, left, right } => match other {
                ExprKind::OpBinary {
                    op: op2,
                    left: left2,
                    right: right2,
                } => op == op2 && left.structurally_eq(left2) && right.structurally_eq(right2),
                _ => false,
            },
            ExprKind::Conditional {
                condition,
                then_branch,
                else_branch,
            } => match other {
                ExprKind::Conditional {
                    condition: condition2,
                    then_branch: then2,
                    else_branch: else2,
                } => {
                    condition.structurally_eq(condition2)
                        && then_branch.structurally_eq(then2)
                        && else_branch.structurally_eq(else2)
                }
                _ => false,
            },
            ExprKind::InitOf { contract, args } => match other {
                ExprKind::InitOf {
                    contract: contract2,
                    args: args2,
                } => contract.structurally_eq(contract2) && args.structurally_eq(args2),
                _ => false,
            },
            ExprKind::MethodCall {
                receiver,
                method,
                args,
            } => match other {
                ExprKind::MethodCall {
                    receiver: receiver2,
                    method: method2,
                    args: args2,
                } => {
                    receiver.structurally_eq(receiver2)
                        && method.structurally_eq(method2)
                        && args.structurally_eq(args2)
                }
                _ => false,
            },
            ExprKind::FieldAccess { aggregate, field } => match other {
                ExprKind::FieldAccess {
                    aggregate: aggregate2,
                    field: field2,
                } => aggregate.structurally_eq(aggregate2) && field.structurally_eq(field2),
                _ => false,
            },
            ExprKind::StaticCall { function, args } => match other {
                ExprKind::StaticCall {
                    function: function2,
                    args: args2,
                } => function.structurally_eq(function2) && args.structurally_eq(args2),
                _ => false,
            },
            ExprKind::StructInstance { ty, args } => match other {
                ExprKind::StructInstance {
                    ty: ty2,
                    args: args2,
                } => ty.structurally_eq(ty2) && args.structurally_eq(args2),
                _ => false,
            },
        }
    }
}
