//! Randomized render/parse round-trip harness for Tact expressions.
//!
//! Random expression trees come from a depth-bounded [`ExprGenerator`]. Each
//! tree is rendered, re-parsed and rendered again by a [`Frontend`], and the
//! results are checked with [`StructuralEq`], which ignores node ids and
//! source locations.

pub mod complete;
pub mod composite;
pub mod driver;
pub mod equiv;
pub mod error;
pub mod generator;
pub mod literal;

pub use complete::complete;
pub use driver::{
    check_roundtrip, run, Counterexample, Frontend, RoundtripConfig, RunSummary, TactFrontend,
};
pub use equiv::StructuralEq;
pub use error::{GeneratorError, HarnessError, HarnessResult, RoundtripFailure};
pub use generator::{ExprGenerator, GeneratorSettings};
