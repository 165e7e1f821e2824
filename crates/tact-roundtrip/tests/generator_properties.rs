mod common;

use common::{exprs, names, subexprs};
use proptest::prelude::*;
use tact_roundtrip::{ExprGenerator, GeneratorError, GeneratorSettings, StructuralEq};
use tact_syntax::{is_reserved, ExprKind, NodeId, NodeMeta};

fn is_ident_text(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn depth_never_exceeds_budget(
        (budget, expr) in (1usize..=6).prop_flat_map(|d| (Just(d), exprs(d)))
    ) {
        prop_assert!(expr.depth() <= budget, "depth {} > budget {}", expr.depth(), budget);
    }

    #[test]
    fn depth_one_yields_only_literals(expr in exprs(1)) {
        prop_assert!(expr.node.is_literal(), "got {}", expr.node.name());
    }

    #[test]
    fn generated_nodes_carry_sentinel_metadata(expr in exprs(4)) {
        for e in subexprs(&expr) {
            prop_assert_eq!(e.meta, NodeMeta::generated());
            for (_, meta) in names(e) {
                prop_assert_eq!(meta.id, NodeId::GENERATED);
            }
        }
    }

    #[test]
    fn names_match_identifier_shape(expr in exprs(4)) {
        for e in subexprs(&expr) {
            for (name, _) in names(e) {
                prop_assert!(is_ident_text(name), "bad identifier {:?}", name);
                prop_assert!(!is_reserved(name), "reserved identifier {:?}", name);
            }
            if let ExprKind::String(s) = &e.node {
                prop_assert!(is_ident_text(s), "bad string literal {:?}", s);
            }
        }
    }

    #[test]
    fn no_bare_identifiers_are_generated(expr in exprs(4)) {
        prop_assert!(subexprs(&expr).iter().all(|e| !matches!(e.node, ExprKind::Id(_))));
    }

    #[test]
    fn comparator_is_reflexive(expr in exprs(4)) {
        prop_assert!(expr.structurally_eq(&expr));
        prop_assert!(expr.structurally_eq(&expr.clone()));
    }
}

#[test]
fn zero_depth_is_a_configuration_error() {
    let err = ExprGenerator::new(0, GeneratorSettings::default()).err();
    assert!(matches!(err, Some(GeneratorError::InvalidDepth { depth: 0 })));
}

#[test]
fn zero_max_args_only_builds_empty_lists() {
    use proptest::strategy::ValueTree;
    use proptest::test_runner::TestRunner;

    let settings = GeneratorSettings {
        max_args: 0,
        ..GeneratorSettings::default()
    };
    let strategy = ExprGenerator::new(3, settings).unwrap().strategy();
    let mut runner = TestRunner::deterministic();
    for _ in 0..200 {
        let expr = strategy.new_tree(&mut runner).unwrap().current();
        for e in subexprs(&expr) {
            match &e.node {
                ExprKind::InitOf { args, .. }
                | ExprKind::StaticCall { args, .. }
                | ExprKind::MethodCall { args, .. } => assert!(args.is_empty()),
                ExprKind::StructInstance { args, .. } => assert!(args.is_empty()),
                _ => {}
            }
        }
    }
}
