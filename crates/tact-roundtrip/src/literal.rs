//! Leaf generators: numbers, booleans, null, strings and identifiers.

use crate::complete::complete;
use crate::error::GeneratorError;
use proptest::prelude::*;
use proptest::strategy::Union;
use tact_syntax::{is_reserved, Expr, ExprKind, Ident, Number, NumberBase};

/// Pattern for identifier text and for generated string literals.
pub const IDENT_PATTERN: &str = "[A-Z][A-Za-z0-9_]{0,15}";

/// Strategy for identifier text that is never a reserved word.
pub fn ident_text() -> Result<BoxedStrategy<String>, GeneratorError> {
    let strategy = proptest::string::string_regex(IDENT_PATTERN).map_err(|source| {
        GeneratorError::Pattern {
            pattern: IDENT_PATTERN,
            source,
        }
    })?;
    Ok(strategy
        .prop_filter("reserved word", |s| !is_reserved(s))
        .boxed())
}

/// Identifier nodes for field, method, function, contract and type names.
pub fn ident(text: BoxedStrategy<String>) -> BoxedStrategy<Ident> {
    text.prop_map(complete).boxed()
}

/// Non-negative integer in a random base with up to `max_digits` digits.
pub fn number(max_digits: usize) -> BoxedStrategy<Expr> {
    let max_digits = max_digits.max(1);
    prop::sample::select(NumberBase::ALL.to_vec())
        .prop_flat_map(move |base| {
            let radix = base.radix();
            prop::collection::vec(0..radix, 1..=max_digits).prop_filter_map(
                "digit outside base",
                move |values| {
                    let digits: String = values
                        .into_iter()
                        .filter_map(|d| char::from_digit(d, radix))
                        .collect();
                    Number::new(base, &digits)
                },
            )
        })
        .prop_map(|n| complete(ExprKind::Number(n)))
        .boxed()
}

pub fn boolean() -> BoxedStrategy<Expr> {
    any::<bool>()
        .prop_map(|b| complete(ExprKind::Boolean(b)))
        .boxed()
}

pub fn null() -> BoxedStrategy<Expr> {
    Just(complete(ExprKind::Null)).boxed()
}

/// String literals restricted to identifier-like text.
pub fn string(text: BoxedStrategy<String>) -> BoxedStrategy<Expr> {
    text.prop_map(|s| complete(ExprKind::String(s))).boxed()
}

/// Uniform choice among the four literal kinds.
pub fn literal(text: BoxedStrategy<String>, max_digits: usize) -> BoxedStrategy<Expr> {
    Union::new(vec![number(max_digits), boolean(), null(), string(text)]).boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::strategy::ValueTree;
    use proptest::test_runner::TestRunner;

    fn sample<T: std::fmt::Debug>(strategy: &BoxedStrategy<T>, n: usize) -> Vec<T> {
        let mut runner = TestRunner::deterministic();
        (0..n)
            .map(|_| strategy.new_tree(&mut runner).unwrap().current())
            .collect()
    }

    #[test]
    fn test_ident_text_shape() {
        let text = ident_text().unwrap();
        for s in sample(&text, 200) {
            assert!(s.starts_with(|c: char| c.is_ascii_uppercase()), "{s}");
            assert!(s.len() <= 16, "{s}");
            assert!(s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
            assert!(!is_reserved(&s));
        }
    }

    #[test]
    fn test_number_digits_are_canonical() {
        for expr in sample(&number(40), 200) {
            let ExprKind::Number(n) = &expr.node else {
                panic!("expected number, got {}", expr.node.name());
            };
            let digits = n.digits();
            assert!(!digits.is_empty() && digits.len() <= 40);
            assert!(digits == "0" || !digits.starts_with('0'));
            assert!(digits.chars().all(|c| c.is_digit(n.base().radix())));
            assert_eq!(digits, digits.to_ascii_lowercase());
        }
    }

    #[test]
    fn test_literal_only_leaves() {
        let lit = literal(ident_text().unwrap(), 8);
        for expr in sample(&lit, 200) {
            assert!(expr.node.is_literal());
            assert_eq!(expr.depth(), 1);
        }
    }
}
