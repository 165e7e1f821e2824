//! Abstract syntax tree for Tact expressions.
//!
//! Every node is a [`Node`]: the semantic payload in `node` and the
//! non-semantic metadata (identity and source location) in `meta`. Code that
//! compares trees only ever looks at `node`.

use crate::token::Span;
use std::fmt;

/// Identity of a syntax node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel id carried by nodes that were built rather than parsed.
    pub const GENERATED: NodeId = NodeId(0);
}

/// Non-semantic node metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeMeta {
    pub id: NodeId,
    pub loc: Span,
}

impl NodeMeta {
    pub fn new(id: NodeId, loc: Span) -> Self {
        Self { id, loc }
    }

    /// Metadata for a node that has no source: sentinel id, dummy span.
    pub fn generated() -> Self {
        Self {
            id: NodeId::GENERATED,
            loc: Span::dummy(),
        }
    }
}

/// A syntax node with its metadata envelope.
#[derive(Debug, Clone)]
pub struct Node<T> {
    /// Semantic payload.
    pub node: T,
    /// Identity and location.
    pub meta: NodeMeta,
}

impl<T> Node<T> {
    pub fn new(node: T, meta: NodeMeta) -> Self {
        Self { node, meta }
    }

    pub fn span(&self) -> Span {
        self.meta.loc
    }
}

/// An expression.
pub type Expr = Node<ExprKind>;

/// An identifier used as a name (field, method, function, contract, type).
pub type Ident = Node<String>;

/// A `field: initializer` entry of a struct instance.
pub type StructFieldInitializer = Node<FieldInit>;

/// Payload of a [`StructFieldInitializer`].
#[derive(Debug, Clone)]
pub struct FieldInit {
    pub field: Ident,
    pub initializer: Expr,
}

/// The kind of expression.
#[derive(Debug, Clone)]
pub enum ExprKind {
    /// Integer literal (always non-negative).
    Number(Number),
    /// `true` / `false`.
    Boolean(bool),
    /// `null`.
    Null,
    /// String literal.
    String(String),
    /// Bare identifier.
    Id(String),

    /// Prefix or postfix unary operation.
    OpUnary { op: UnaryOp, operand: Box<Expr> },
    /// Binary operation.
    OpBinary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `condition ? then_branch : else_branch`.
    Conditional {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },

    /// `initOf Contract(args)`.
    InitOf { contract: Ident, args: Vec<Expr> },
    /// `receiver.method(args)`.
    MethodCall {
        receiver: Box<Expr>,
        method: Ident,
        args: Vec<Expr>,
    },
    /// `aggregate.field`.
    FieldAccess { aggregate: Box<Expr>, field: Ident },
    /// `function(args)`.
    StaticCall { function: Ident, args: Vec<Expr> },
    /// `Type { field: value, ... }`.
    StructInstance {
        ty: Ident,
        args: Vec<StructFieldInitializer>,
    },
}

impl ExprKind {
    /// Short tag naming the variant, used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            ExprKind::Number(_) => "number",
            ExprKind::Boolean(_) => "boolean",
            ExprKind::Null => "null",
            ExprKind::String(_) => "string",
            ExprKind::Id(_) => "id",
            ExprKind::OpUnary { .. } => "op_unary",
            ExprKind::OpBinary { .. } => "op_binary",
            ExprKind::Conditional { .. } => "conditional",
            ExprKind::InitOf { .. } => "init_of",
            ExprKind::MethodCall { .. } => "method_call",
            ExprKind::FieldAccess { .. } => "field_access",
            ExprKind::StaticCall { .. } => "static_call",
            ExprKind::StructInstance { .. } => "struct_instance",
        }
    }

    /// Literal kinds have no sub-expressions.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            ExprKind::Number(_) | ExprKind::Boolean(_) | ExprKind::Null | ExprKind::String(_)
        )
    }
}

impl Expr {
    /// Nesting depth counted in expressions: a leaf has depth 1.
    ///
    /// Identifiers and struct field initializers are not expressions and do
    /// not add a level.
    pub fn depth(&self) -> usize {
        let children = match &self.node {
            ExprKind::Number(_)
            | ExprKind::Boolean(_)
            | ExprKind::Null
            | ExprKind::String(_)
            | ExprKind::Id(_) => 0,
            ExprKind::OpUnary { operand, .. } => operand.depth(),
            ExprKind::OpBinary { left, right, .. } => left.depth().max(right.depth()),
            ExprKind::Conditional {
                condition,
                then_branch,
                else_branch,
            } => condition
                .depth()
                .max(then_branch.depth())
                .max(else_branch.depth()),
            ExprKind::InitOf { args, .. } | ExprKind::StaticCall { args, .. } => {
                max_depth(args.iter())
            }
            ExprKind::MethodCall { receiver, args, .. } => {
                receiver.depth().max(max_depth(args.iter()))
            }
            ExprKind::FieldAccess { aggregate, .. } => aggregate.depth(),
            ExprKind::StructInstance { args, .. } => {
                max_depth(args.iter().map(|a| &a.node.initializer))
            }
        };
        children + 1
    }
}

fn max_depth<'a>(exprs: impl Iterator<Item = &'a Expr>) -> usize {
    exprs.map(Expr::depth).max().unwrap_or(0)
}

/// Display base of an integer literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberBase {
    Bin,
    Oct,
    Dec,
    Hex,
}

impl NumberBase {
    pub const ALL: [NumberBase; 4] = [
        NumberBase::Bin,
        NumberBase::Oct,
        NumberBase::Dec,
        NumberBase::Hex,
    ];

    pub fn radix(self) -> u32 {
        match self {
            NumberBase::Bin => 2,
            NumberBase::Oct => 8,
            NumberBase::Dec => 10,
            NumberBase::Hex => 16,
        }
    }

    /// Source prefix (`0b`, `0o`, `0x`, or nothing for decimal).
    pub fn prefix(self) -> &'static str {
        match self {
            NumberBase::Bin => "0b",
            NumberBase::Oct => "0o",
            NumberBase::Dec => "",
            NumberBase::Hex => "0x",
        }
    }
}

/// An arbitrary-precision, non-negative integer literal.
///
/// The magnitude is kept as a canonical digit string in the literal's own
/// base: lowercase, no separators, no leading zeros (`"0"` for zero). Two
/// numbers with the same base are numerically equal iff their digits are.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Number {
    base: NumberBase,
    digits: String,
}

impl Number {
    /// Build a number from digits in `base`. Returns `None` if `digits` is
    /// empty or holds a character that is not a digit of `base`.
    pub fn new(base: NumberBase, digits: &str) -> Option<Self> {
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(base.radix())) {
            return None;
        }
        let trimmed = digits.trim_start_matches('0');
        let digits = if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_ascii_lowercase()
        };
        Some(Self { base, digits })
    }

    pub fn from_u128(base: NumberBase, value: u128) -> Self {
        let digits = match base {
            NumberBase::Bin => format!("{:b}", value),
            NumberBase::Oct => format!("{:o}", value),
            NumberBase::Dec => format!("{}", value),
            NumberBase::Hex => format!("{:x}", value),
        };
        Self { base, digits }
    }

    pub fn base(&self) -> NumberBase {
        self.base
    }

    /// Canonical digits, without the base prefix.
    pub fn digits(&self) -> &str {
        &self.digits
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base.prefix(), self.digits)
    }
}

/// Unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `+x`
    Plus,
    /// `-x`
    Neg,
    /// `!x`
    Not,
    /// `x!!` (non-null assertion)
    NotNull,
    /// `~x`
    BitNot,
}

impl UnaryOp {
    pub const ALL: [UnaryOp; 5] = [
        UnaryOp::Plus,
        UnaryOp::Neg,
        UnaryOp::Not,
        UnaryOp::NotNull,
        UnaryOp::BitNot,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
            UnaryOp::NotNull => "!!",
            UnaryOp::BitNot => "~",
        }
    }

    /// `!!` follows its operand; every other unary operator precedes it.
    pub fn is_postfix(self) -> bool {
        matches!(self, UnaryOp::NotNull)
    }
}

/// Binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
    Eq,

    // Logical
    And,
    Or,

    // Bitwise
    Shl,
    Shr,
    BitAnd,
    BitOr,
    BitXor,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 18] = [
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Ne,
        BinaryOp::Gt,
        BinaryOp::Lt,
        BinaryOp::Ge,
        BinaryOp::Le,
        BinaryOp::Eq,
        BinaryOp::And,
        BinaryOp::Or,
        BinaryOp::Mod,
        BinaryOp::Shl,
        BinaryOp::Shr,
        BinaryOp::BitAnd,
        BinaryOp::BitOr,
        BinaryOp::BitXor,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Ne => "!=",
            BinaryOp::Gt => ">",
            BinaryOp::Lt => "<",
            BinaryOp::Ge => ">=",
            BinaryOp::Le => "<=",
            BinaryOp::Eq => "==",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
        }
    }

    /// Get the precedence of this operator (higher = binds tighter).
    ///
    /// All binary operators are left-associative.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Or => prec::OR,
            BinaryOp::And => 3,
            BinaryOp::BitOr => 4,
            BinaryOp::BitXor => 5,
            BinaryOp::BitAnd => 6,
            BinaryOp::Eq | BinaryOp::Ne => 7,
            BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => 8,
            BinaryOp::Shl | BinaryOp::Shr => 9,
            BinaryOp::Add | BinaryOp::Sub => 10,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => 11,
        }
    }
}

/// Precedence levels shared by the parser and the renderer.
pub mod prec {
    /// `c ? t : e`
    pub const CONDITIONAL: u8 = 1;
    /// `||`, the loosest binary operator.
    pub const OR: u8 = 2;
    /// Prefix `+ - ! ~`.
    pub const PREFIX: u8 = 12;
    /// Postfix `!!`, field access, method call.
    pub const POSTFIX: u8 = 13;
    /// Literals, identifiers, calls, struct instances, parentheses.
    pub const PRIMARY: u8 = 14;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(kind: ExprKind) -> Expr {
        Node::new(kind, NodeMeta::generated())
    }

    #[test]
    fn test_binop_precedence() {
        assert!(BinaryOp::Mul.precedence() > BinaryOp::Add.precedence());
        assert!(BinaryOp::Add.precedence() > BinaryOp::Shl.precedence());
        assert!(BinaryOp::Shl.precedence() > BinaryOp::Lt.precedence());
        assert!(BinaryOp::Lt.precedence() > BinaryOp::Eq.precedence());
        assert!(BinaryOp::Eq.precedence() > BinaryOp::BitAnd.precedence());
        assert!(BinaryOp::BitAnd.precedence() > BinaryOp::BitXor.precedence());
        assert!(BinaryOp::BitXor.precedence() > BinaryOp::BitOr.precedence());
        assert!(BinaryOp::BitOr.precedence() > BinaryOp::And.precedence());
        assert!(BinaryOp::And.precedence() > BinaryOp::Or.precedence());
        assert!(BinaryOp::Or.precedence() > prec::CONDITIONAL);
        assert!(prec::PREFIX > BinaryOp::Mul.precedence());
    }

    #[test]
    fn test_number_canonical_digits() {
        let n = Number::new(NumberBase::Hex, "00FF").unwrap();
        assert_eq!(n.digits(), "ff");
        assert_eq!(n.to_string(), "0xff");

        let zero = Number::new(NumberBase::Bin, "000").unwrap();
        assert_eq!(zero.digits(), "0");

        assert!(Number::new(NumberBase::Oct, "8").is_none());
        assert!(Number::new(NumberBase::Dec, "").is_none());
    }

    #[test]
    fn test_number_beyond_u128() {
        let digits = "1".repeat(60);
        let n = Number::new(NumberBase::Dec, &digits).unwrap();
        assert_eq!(n.digits(), digits);
        assert_eq!(n.to_string(), digits);
    }

    #[test]
    fn test_number_from_u128() {
        assert_eq!(Number::from_u128(NumberBase::Bin, 5).to_string(), "0b101");
        assert_eq!(Number::from_u128(NumberBase::Oct, 8).to_string(), "0o10");
        assert_eq!(Number::from_u128(NumberBase::Dec, 0).to_string(), "0");
    }

    #[test]
    fn test_depth() {
        let one = || leaf(ExprKind::Number(Number::from_u128(NumberBase::Dec, 1)));
        assert_eq!(one().depth(), 1);

        let sum = leaf(ExprKind::OpBinary {
            op: BinaryOp::Add,
            left: Box::new(one()),
            right: Box::new(leaf(ExprKind::OpUnary {
                op: UnaryOp::Neg,
                operand: Box::new(one()),
            })),
        });
        assert_eq!(sum.depth(), 3);

        let instance = leaf(ExprKind::StructInstance {
            ty: Node::new("P".to_string(), NodeMeta::generated()),
            args: vec![Node::new(
                FieldInit {
                    field: Node::new("X".to_string(), NodeMeta::generated()),
                    initializer: one(),
                },
                NodeMeta::generated(),
            )],
        });
        assert_eq!(instance.depth(), 2);

        let empty_call = leaf(ExprKind::StaticCall {
            function: Node::new("F".to_string(), NodeMeta::generated()),
            args: vec![],
        });
        assert_eq!(empty_call.depth(), 1);
    }

    #[test]
    fn test_operator_tables() {
        assert_eq!(BinaryOp::ALL.len(), 18);
        assert!(UnaryOp::NotNull.is_postfix());
        assert!(UnaryOp::ALL.iter().filter(|op| op.is_postfix()).count() == 1);
    }
}
