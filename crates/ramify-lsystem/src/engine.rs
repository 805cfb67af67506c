//! [`LSystem`] — the two-phase grammar engine.
//!
//! ## Build protocol
//!
//! 1. **Expansion** — [`LSystem::expand`] rewrites the axiom for N
//!    generations: every character maps through its [`ExpansionRule`] and the
//!    results concatenate. A character with no registered rule is a fatal
//!    configuration error. The result is cached as the final string.
//! 2. **Interpretation** — [`LSystem::interpret`] walks the final string
//!    left-to-right exactly once. Each character's [`DrawingRule`] selects an
//!    action via the weighted draw-per-candidate walk; a selected action is
//!    handed to the caller's `apply` callback together with the [`Walker`]
//!    (live turtle + save/restore stack). A fallthrough is a silent no-op.
//!
//! The pass is strictly linear and single-threaded: turtle state is mutated
//! sequentially and stack operations are order-dependent, so there is no
//! parallelism opportunity and no suspension point. A build either runs to
//! completion or surfaces an error before any output is published.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::error::LSystemError;
use crate::rules::{DrawingRule, ExpansionRule};
use crate::sampler::UniformSource;
use crate::turtle::{Turtle, TurtleStack};

// ─────────────────────────────────────────────
// Walker
// ─────────────────────────────────────────────

/// The engine's single mutable resource: exactly one live [`Turtle`] plus
/// the snapshot stack. Interpretation callbacks receive `&mut Walker` and
/// bracket sub-structures through [`save`](Walker::save) /
/// [`restore`](Walker::restore).
#[derive(Debug)]
pub struct Walker {
    turtle: Turtle,
    stack: TurtleStack,
}

impl Walker {
    fn new() -> Self {
        Self {
            turtle: Turtle::canonical(),
            stack: TurtleStack::new(),
        }
    }

    pub fn turtle(&self) -> &Turtle {
        &self.turtle
    }

    pub fn turtle_mut(&mut self) -> &mut Turtle {
        &mut self.turtle
    }

    /// Push a snapshot of the live turtle.
    pub fn save(&mut self) {
        self.stack.push(&self.turtle);
    }

    /// Replace the live turtle wholesale with the most recent snapshot.
    pub fn restore(&mut self) -> Result<(), LSystemError> {
        self.turtle = self.stack.pop()?;
        Ok(())
    }

    /// Number of snapshots currently saved. Zero after a balanced walk.
    pub fn saved(&self) -> usize {
        self.stack.len()
    }
}

impl Default for Walker {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────
// Engine
// ─────────────────────────────────────────────

/// Grammar engine over action payload `A`.
///
/// Holds the axiom, the symbol→rule tables for both phases, the cached
/// final string, and the [`Walker`]. One instance drives one build.
#[derive(Debug)]
pub struct LSystem<A> {
    axiom: String,
    expansion_rules: HashMap<char, ExpansionRule>,
    drawing_rules: HashMap<char, DrawingRule<A>>,
    final_string: String,
    walker: Walker,
}

impl<A> LSystem<A> {
    pub fn new(axiom: impl Into<String>) -> Self {
        Self {
            axiom: axiom.into(),
            expansion_rules: HashMap::new(),
            drawing_rules: HashMap::new(),
            final_string: String::new(),
            walker: Walker::new(),
        }
    }

    pub fn add_expansion_rule(&mut self, symbol: char, rule: ExpansionRule) {
        self.expansion_rules.insert(symbol, rule);
    }

    pub fn add_drawing_rule(&mut self, symbol: char, rule: DrawingRule<A>) {
        self.drawing_rules.insert(symbol, rule);
    }

    pub fn axiom(&self) -> &str {
        &self.axiom
    }

    /// The fully expanded string cached by the last [`expand`](Self::expand).
    pub fn final_string(&self) -> &str {
        &self.final_string
    }

    pub fn walker(&self) -> &Walker {
        &self.walker
    }

    /// Rewriting phase: map the axiom through the expansion rules for
    /// `generations` rounds and cache the result.
    ///
    /// A symbol without a rule surfaces [`LSystemError::UnknownSymbol`]; a
    /// selection fallthrough contributes the empty replacement (the symbol
    /// vanishes from the next generation).
    pub fn expand(
        &mut self,
        generations: u32,
        src: &mut dyn UniformSource,
    ) -> Result<&str, LSystemError> {
        let mut current = self.axiom.clone();
        for generation in 1..=generations {
            let mut next = String::with_capacity(current.len() * 2);
            for symbol in current.chars() {
                let rule = self
                    .expansion_rules
                    .get(&symbol)
                    .ok_or(LSystemError::UnknownSymbol(symbol))?;
                if let Some(replacement) = rule.select(src) {
                    next.push_str(replacement);
                }
            }
            debug!(generation, len = next.len(), "expanded");
            current = next;
        }
        self.final_string = current;
        Ok(&self.final_string)
    }

    /// Interpretation phase: single pass over the cached final string.
    ///
    /// For every selected action, `apply` runs with the action, the walker,
    /// and the draw source (spawn policies take their own draws). Errors
    /// from `apply` — typically [`LSystemError::EmptyStack`] on unbalanced
    /// brackets — abort the pass.
    pub fn interpret<F>(
        &mut self,
        src: &mut dyn UniformSource,
        mut apply: F,
    ) -> Result<(), LSystemError>
    where
        F: FnMut(&A, &mut Walker, &mut dyn UniformSource) -> Result<(), LSystemError>,
    {
        for symbol in self.final_string.chars() {
            let rule = self
                .drawing_rules
                .get(&symbol)
                .ok_or(LSystemError::UnknownSymbol(symbol))?;
            match rule.select(src) {
                Some(action) => apply(action, &mut self.walker, src)?,
                None => trace!(%symbol, "no action selected"),
            }
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
