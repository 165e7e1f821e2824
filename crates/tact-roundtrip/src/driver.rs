//! Round-trip property driver.
//!
//! One trial renders a tree, parses the rendering, renders the result again
//! and checks that both renderings agree and that the re-parsed tree is
//! structurally equal to the original.

use crate::equiv::StructuralEq;
use crate::error::{HarnessError, HarnessResult, RoundtripFailure};
use crate::generator::{ExprGenerator, GeneratorSettings};
use proptest::test_runner::{Config, RngAlgorithm, TestCaseError, TestError, TestRng, TestRunner};
use std::fmt;
use tact_syntax::{parse_expression, pretty_print_expr, Expr, ParseError};
use tracing::{debug, info};

/// The parser and renderer under test.
pub trait Frontend {
    fn render(&self, expr: &Expr) -> String;
    fn parse(&self, source: &str) -> Result<Expr, ParseError>;
}

/// Frontend backed by `tact-syntax`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TactFrontend;

impl Frontend for TactFrontend {
    fn render(&self, expr: &Expr) -> String {
        pretty_print_expr(expr)
    }

    fn parse(&self, source: &str) -> Result<Expr, ParseError> {
        parse_expression(source)
    }
}

/// Configuration for a harness run.
#[derive(Debug, Clone)]
pub struct RoundtripConfig {
    /// Number of trials.
    pub cases: u32,
    /// Depth budget of generated trees.
    pub max_depth: usize,
    /// Longest argument or field list.
    pub max_args: usize,
    /// Seed for the deterministic RNG.
    pub seed: u64,
}

impl Default for RoundtripConfig {
    fn default() -> Self {
        Self {
            cases: 1000,
            max_depth: 4,
            max_args: 4,
            seed: 0,
        }
    }
}

impl RoundtripConfig {
    pub fn generator_settings(&self) -> GeneratorSettings {
        GeneratorSettings {
            max_args: self.max_args,
            ..GeneratorSettings::default()
        }
    }
}

/// A failing tree after shrinking, with what went wrong.
#[derive(Debug)]
pub struct Counterexample {
    pub expr: Expr,
    pub rendered: String,
    pub failure: RoundtripFailure,
}

impl fmt::Display for Counterexample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.failure.kind(), self.failure)
    }
}

/// Outcome of a run in which every trial passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub cases: u32,
    pub seed: u64,
}

/// Run a single round-trip trial on `expr`.
pub fn check_roundtrip<F: Frontend + ?Sized>(
    frontend: &F,
    expr: &Expr,
) -> Result<(), RoundtripFailure> {
    let first = frontend.render(expr);
    let reparsed = frontend
        .parse(&first)
        .map_err(|error| RoundtripFailure::Unparseable {
            rendered: first.clone(),
            error,
        })?;
    let second = frontend.render(&reparsed);
    if first != second {
        return Err(RoundtripFailure::NotIdempotent { first, second });
    }
    if !expr.structurally_eq(&reparsed) {
        return Err(RoundtripFailure::StructuralMismatch {
            rendered: first,
            reparsed: Box::new(reparsed),
        });
    }
    Ok(())
}

/// Drive `config.cases` trials against `frontend`.
///
/// The RNG is seeded from `config.seed` and failure persistence is off, so
/// the same configuration always samples the same trees.
pub fn run<F: Frontend + ?Sized>(frontend: &F, config: &RoundtripConfig) -> HarnessResult<RunSummary> {
    let generator = ExprGenerator::new(config.max_depth, config.generator_settings())?;
    let strategy = generator.strategy();

    info!(
        cases = config.cases,
        max_depth = config.max_depth,
        max_args = config.max_args,
        seed = config.seed,
        "starting round-trip run"
    );

    let mut runner = TestRunner::new_with_rng(
        Config {
            cases: config.cases,
            failure_persistence: None,
            ..Config::default()
        },
        TestRng::from_seed(RngAlgorithm::ChaCha, &seed_bytes(config.seed)),
    );

    let result = runner.run(&strategy, |expr| {
        check_roundtrip(frontend, &expr).map_err(|failure| TestCaseError::fail(failure.to_string()))
    });

    match result {
        Ok(()) => {
            info!(cases = config.cases, "all round-trip trials passed");
            Ok(RunSummary {
                cases: config.cases,
                seed: config.seed,
            })
        }
        Err(TestError::Fail(reason, expr)) => {
            let rendered = frontend.render(&expr);
            let failure = match check_roundtrip(frontend, &expr) {
                Err(failure) => failure,
                Ok(()) => {
                    return Err(HarnessError::Aborted {
                        reason: format!("counterexample did not reproduce: {}", reason),
                    })
                }
            };
            info!(kind = failure.kind(), rendered = %rendered, "round-trip failed");
            debug!(tree = ?expr, "shrunk counterexample");
            Err(HarnessError::Counterexample(Box::new(Counterexample {
                expr,
                rendered,
                failure,
            })))
        }
        Err(TestError::Abort(reason)) => Err(HarnessError::Aborted {
            reason: reason.to_string(),
        }),
    }
}

/// ChaCha wants a 32-byte seed; the low 8 bytes carry `seed`.
fn seed_bytes(seed: u64) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    bytes[..8].copy_from_slice(&seed.to_le_bytes());
    bytes
}
