//! Error types for the round-trip harness.

use crate::driver::Counterexample;
use tact_syntax::{Expr, ParseError};
use thiserror::Error;

/// Errors raised while building the expression generator.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("invalid generator depth {depth}: must be at least 1")]
    InvalidDepth { depth: usize },

    #[error("invalid identifier pattern `{pattern}`: {source}")]
    Pattern {
        pattern: &'static str,
        #[source]
        source: proptest::string::Error,
    },
}

/// Why a single round-trip trial failed.
#[derive(Debug, Error)]
pub enum RoundtripFailure {
    #[error("rendered expression does not parse: {error}\n  rendered: {rendered}")]
    Unparseable { rendered: String, error: ParseError },

    #[error("rendering is not idempotent\n  first:  {first}\n  second: {second}")]
    NotIdempotent { first: String, second: String },

    #[error("re-parsed tree differs from the original\n  rendered: {rendered}")]
    StructuralMismatch { rendered: String, reparsed: Box<Expr> },
}

impl RoundtripFailure {
    /// Short tag for reports and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RoundtripFailure::Unparseable { .. } => "unparseable",
            RoundtripFailure::NotIdempotent { .. } => "not_idempotent",
            RoundtripFailure::StructuralMismatch { .. } => "structural_mismatch",
        }
    }
}

/// Errors for a whole harness run.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("generator error: {0}")]
    Generator(#[from] GeneratorError),

    #[error("round-trip counterexample found: {0}")]
    Counterexample(Box<Counterexample>),

    #[error("test runner aborted: {reason}")]
    Aborted { reason: String },
}

pub type HarnessResult<T> = Result<T, HarnessError>;
