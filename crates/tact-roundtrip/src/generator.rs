//! Depth-bounded expression generator.
//!
//! The grammar is self-referential, so the generator is an explicit table of
//! strategies indexed by depth budget and built bottom-up: level 1 holds only
//! literals, level `d` chooses uniformly between a literal and a composite
//! whose children come from level `d - 1`. Each level is built once and
//! shared by every composite of the level above.

use crate::composite;
use crate::error::GeneratorError;
use crate::literal::{ident, ident_text, literal};
use proptest::prelude::*;
use proptest::strategy::Union;
use tact_syntax::Expr;
use tracing::debug;

/// Tunables for the shape of generated trees.
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    /// Longest argument or field list.
    pub max_args: usize,
    /// Most digits in a number literal.
    pub max_number_digits: usize,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            max_args: 4,
            max_number_digits: 40,
        }
    }
}

/// Expression strategies for every depth budget up to a maximum.
pub struct ExprGenerator {
    levels: Vec<BoxedStrategy<Expr>>,
}

impl ExprGenerator {
    pub fn new(max_depth: usize, settings: GeneratorSettings) -> Result<Self, GeneratorError> {
        if max_depth == 0 {
            return Err(GeneratorError::InvalidDepth { depth: max_depth });
        }

        let text = ident_text()?;
        let names = ident(text.clone());
        let leaf = literal(text, settings.max_number_digits);

        let mut levels = Vec::with_capacity(max_depth);
        let mut current = leaf.clone();
        levels.push(current.clone());
        for _ in 1..max_depth {
            let mut arms = vec![leaf.clone()];
            arms.extend(composite::all(current, names.clone(), settings.max_args));
            current = Union::new(arms).boxed();
            levels.push(current.clone());
        }
        debug!(
            max_depth,
            max_args = settings.max_args,
            "built expression generator"
        );

        Ok(Self { levels })
    }

    /// Largest depth budget this generator was built for.
    pub fn max_depth(&self) -> usize {
        self.levels.len()
    }

    /// Strategy for trees of depth at most `depth`, if within the table.
    pub fn at_depth(&self, depth: usize) -> Option<BoxedStrategy<Expr>> {
        self.levels.get(depth.checked_sub(1)?).cloned()
    }

    /// Strategy for trees at the full depth budget.
    pub fn strategy(&self) -> BoxedStrategy<Expr> {
        let top = self.levels.len() - 1;
        self.levels[top].clone()
    }
}
