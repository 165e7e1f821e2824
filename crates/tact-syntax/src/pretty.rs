//! Canonical renderer for Tact expressions.
//!
//! The output is deterministic and re-parses to the same tree: parentheses
//! are emitted exactly where operator precedence would otherwise regroup the
//! operands, and nowhere else.

use crate::ast::*;
use std::fmt::Write;

/// Pretty print an expression to a string.
pub fn pretty_print_expr(expr: &Expr) -> String {
    let mut printer = PrettyPrinter::new();
    printer.print_expr(expr);
    printer.output
}

/// Binding strength of the operator at the root of `expr`.
pub fn expr_precedence(expr: &Expr) -> u8 {
    match &expr.node {
        ExprKind::Conditional { .. } => prec::CONDITIONAL,
        ExprKind::OpBinary { op, .. } => op.precedence(),
        ExprKind::OpUnary { op, .. } if op.is_postfix() => prec::POSTFIX,
        ExprKind::OpUnary { .. } => prec::PREFIX,
        ExprKind::FieldAccess { .. } | ExprKind::MethodCall { .. } => prec::POSTFIX,
        ExprKind::Number(_)
        | ExprKind::Boolean(_)
        | ExprKind::Null
        | ExprKind::String(_)
        | ExprKind::Id(_)
        | ExprKind::InitOf { .. }
        | ExprKind::StaticCall { .. }
        | ExprKind::StructInstance { .. } => prec::PRIMARY,
    }
}

struct PrettyPrinter {
    output: String,
}

impl PrettyPrinter {
    fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    /// Print `expr`, parenthesized if it binds looser than `min_prec`.
    fn print_operand(&mut self, expr: &Expr, min_prec: u8) {
        if expr_precedence(expr) < min_prec {
            self.write("(");
            self.print_expr(expr);
            self.write(")");
        } else {
            self.print_expr(expr);
        }
    }

    fn print_expr(&mut self, expr: &Expr) {
        match &expr.node {
            ExprKind::Number(n) => {
                let _ = write!(self.output, "{}", n);
            }
            ExprKind::Boolean(b) => {
                self.write(if *b { "true" } else { "false" });
            }
            ExprKind::Null => self.write("null"),
            ExprKind::String(s) => self.print_string(s),
            ExprKind::Id(name) => self.write(name),
            ExprKind::OpUnary { op, operand } => {
                if op.is_postfix() {
                    self.print_operand(operand, prec::POSTFIX);
                    self.write(op.symbol());
                } else {
                    self.write(op.symbol());
                    self.print_operand(operand, prec::PREFIX);
                }
            }
            ExprKind::OpBinary { op, left, right } => {
                let p = op.precedence();
                self.print_operand(left, p);
                self.write(" ");
                self.write(op.symbol());
                self.write(" ");
                self.print_operand(right, p + 1);
            }
            ExprKind::Conditional {
                condition,
                then_branch,
                else_branch,
            } => {
                self.print_operand(condition, prec::OR);
                self.write(" ? ");
                self.print_operand(then_branch, prec::OR);
                self.write(" : ");
                self.print_operand(else_branch, prec::CONDITIONAL);
            }
            ExprKind::InitOf { contract, args } => {
                self.write("initOf ");
                self.write(&contract.node);
                self.print_args(args);
            }
            ExprKind::MethodCall {
                receiver,
                method,
                args,
            } => {
                self.print_operand(receiver, prec::POSTFIX);
                self.write(".");
                self.write(&method.node);
                self.print_args(args);
            }
            ExprKind::FieldAccess { aggregate, field } => {
                self.print_operand(aggregate, prec::POSTFIX);
                self.write(".");
                self.write(&field.node);
            }
            ExprKind::StaticCall { function, args } => {
                self.write(&function.node);
                self.print_args(args);
            }
            ExprKind::StructInstance { ty, args } => {
                self.write(&ty.node);
                if args.is_empty() {
                    self.write(" {}");
                    return;
                }
                self.write(" { ");
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.write(&arg.node.field.node);
                    self.write(": ");
                    self.print_expr(&arg.node.initializer);
                }
                self.write(" }");
            }
        }
    }

    fn print_args(&mut self, args: &[Expr]) {
        self.write("(");
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.print_expr(arg);
        }
        self.write(")");
    }

    fn print_string(&mut self, s: &str) {
        self.write("\"");
        for c in s.chars() {
            match c {
                '"' => self.write("\\\""),
                '\\' => self.write("\\\\"),
                '\n' => self.write("\\n"),
                '\t' => self.write("\\t"),
                '\r' => self.write("\\r"),
                c if c.is_control() => {
                    let _ = write!(self.output, "\\u{{{:x}}}", c as u32);
                }
                c => self.output.push(c),
            }
        }
        self.write("\"");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expression;

    fn roundtrip(source: &str) -> String {
        let expr = parse_expression(source).unwrap();
        pretty_print_expr(&expr)
    }

    #[test]
    fn test_pretty_print_simple() {
        assert_eq!(roundtrip("1+2"), "1 + 2");
        assert_eq!(roundtrip("0X1F"), "0x1f");
        assert_eq!(roundtrip("0b0011"), "0b11");
        assert_eq!(roundtrip("true  &&  null"), "true && null");
    }

    #[test]
    fn test_pretty_print_drops_redundant_parens() {
        assert_eq!(roundtrip("(1 + 2) + (3)"), "1 + 2 + 3");
        assert_eq!(roundtrip("(A * B) + C"), "A * B + C");
    }

    #[test]
    fn test_pretty_print_keeps_needed_parens() {
        assert_eq!(roundtrip("1 + (2 + 3)"), "1 + (2 + 3)");
        assert_eq!(roundtrip("(A + B) * C"), "(A + B) * C");
        assert_eq!(roundtrip("(A || B) && C"), "(A || B) && C");
        assert_eq!(roundtrip("-(A + B)"), "-(A + B)");
        assert_eq!(roundtrip("(-A).F"), "(-A).F");
        assert_eq!(roundtrip("(!A)!!"), "(!A)!!");
        assert_eq!(roundtrip("(A ? B : C).M()"), "(A ? B : C).M()");
    }

    #[test]
    fn test_pretty_print_conditional() {
        assert_eq!(roundtrip("A ? X.M() : Y.F"), "A ? X.M() : Y.F");
        assert_eq!(roundtrip("(A ? B : C) ? D : E"), "(A ? B : C) ? D : E");
        assert_eq!(roundtrip("A ? (B ? C : D) : E"), "A ? (B ? C : D) : E");
        assert_eq!(roundtrip("A ? B : (C ? D : E)"), "A ? B : C ? D : E");
    }

    #[test]
    fn test_pretty_print_unary_runs() {
        assert_eq!(roundtrip("- - A"), "--A");
        assert_eq!(roundtrip("!!A"), "!!A");
        assert_eq!(roundtrip("A!!!!"), "A!!!!");
        assert_eq!(roundtrip("A - -B"), "A - -B");
    }

    #[test]
    fn test_pretty_print_calls_and_structs() {
        assert_eq!(roundtrip("initOf C( 1 ,2 )"), "initOf C(1, 2)");
        assert_eq!(roundtrip("F()"), "F()");
        assert_eq!(roundtrip("P{X:1,Y:F(),}"), "P { X: 1, Y: F() }");
        assert_eq!(roundtrip("P{}"), "P {}");
        assert_eq!(roundtrip("P {}.M(A)!!"), "P {}.M(A)!!");
    }

    #[test]
    fn test_pretty_print_strings() {
        assert_eq!(roundtrip(r#""Abc""#), r#""Abc""#);
        assert_eq!(roundtrip(r#""a\"b\\c\n""#), r#""a\"b\\c\n""#);
        assert_eq!(roundtrip(r#""\u{7}""#), r#""\u{7}""#);
    }

    #[test]
    fn test_pretty_print_idempotent() {
        for source in [
            "1 + 2 * 3 << 4 >> 5 & 6 ^ 7 | 8 == 9 != 10 < 11 <= 12 > 13 >= 14 && 15 || 16",
            "~-+!A.B(C, D ? E : F)!!.G",
            "initOf C(P { X: Y.Z }, 0o17 % 0b1 / 3)",
        ] {
            let once = roundtrip(source);
            assert_eq!(roundtrip(&once), once);
        }
    }
}
