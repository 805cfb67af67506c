//! Weighted rule tables for expansion and interpretation.
//!
//! A [`WeightedRule`] maps candidate payloads to probability weights, in
//! insertion order. [`ExpansionRule`] carries replacement strings,
//! [`DrawingRule`] carries interpretation actions — same selection algorithm,
//! different payload.
//!
//! ## Selection algorithm
//!
//! ```text
//! cumulative = 0
//! for (candidate, weight) in insertion order:
//!     draw = next uniform draw          # fresh draw PER candidate
//!     cumulative += weight
//!     if draw < cumulative: return candidate
//! return none
//! ```
//!
//! This is deliberately **not** a textbook CDF sampler: one independent draw
//! is taken per candidate, so an early low-weight candidate can beat a later
//! high-weight one, and the no-match fallthrough is reachable even when the
//! weights sum to 1. Fallthrough is defined behavior — "no expansion" during
//! rewriting (the symbol vanishes), "no action" during interpretation — and
//! the generated shapes depend on these skewed frequencies. Do not replace
//! it with a single-draw sampler.

use serde::{Deserialize, Serialize};

use crate::sampler::UniformSource;

/// Weighted candidate set for one grammar symbol.
///
/// Weights need not sum to 1; unassigned probability mass silently yields
/// the fallthrough outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedRule<T> {
    choices: Vec<(T, f32)>,
}

/// Weighted replacement strings for one symbol during the rewriting phase.
pub type ExpansionRule = WeightedRule<String>;

/// Weighted interpretation actions for one symbol during the drawing phase.
pub type DrawingRule<A> = WeightedRule<A>;

impl<T> WeightedRule<T> {
    /// Empty rule: always falls through.
    pub fn new() -> Self {
        Self { choices: Vec::new() }
    }

    /// Single candidate with weight 1.0 — selected on every draw in `[0, 1)`.
    pub fn single(candidate: T) -> Self {
        Self::new().with(candidate, 1.0)
    }

    /// Append a candidate. Insertion order is the selection order.
    pub fn with(mut self, candidate: T, weight: f32) -> Self {
        self.choices.push((candidate, weight));
        self
    }

    /// Run the draw-per-candidate walk. `None` means fallthrough.
    pub fn select(&self, src: &mut dyn UniformSource) -> Option<&T> {
        let mut cumulative = 0.0_f32;
        for (candidate, weight) in &self.choices {
            let draw = src.draw();
            cumulative += weight;
            if draw < cumulative {
                return Some(candidate);
            }
        }
        None
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}

impl<T> Default for WeightedRule<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpansionRule {
    /// Identity rule: the symbol rewrites to itself.
    pub fn identity(symbol: char) -> Self {
        Self::single(symbol.to_string())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::Constant;

    /// Replays a scripted draw sequence, then repeats the last value.
    struct Script(Vec<f32>, usize);

    impl UniformSource for Script {
        fn draw(&mut self) -> f32 {
            let i = self.1.min(self.0.len() - 1);
            self.1 += 1;
            self.0[i]
        }
    }

    fn trunk_rule() -> ExpansionRule {
        ExpansionRule::new()
            .with("F".into(), 0.7)
            .with("FF".into(), 0.25)
            .with("Fg".into(), 0.05)
    }

    #[test]
    fn single_rule_is_deterministic() {
        let rule = ExpansionRule::single("AB".into());
        for draw in [0.0, 0.5, 0.99] {
            assert_eq!(rule.select(&mut Constant(draw)), Some(&"AB".to_string()));
        }
    }

    #[test]
    fn zero_draw_selects_first_candidate() {
        let rule = trunk_rule();
        assert_eq!(rule.select(&mut Constant(0.0)), Some(&"F".to_string()));
    }

    #[test]
    fn mid_draw_still_selects_first_candidate() {
        // 0.5 < 0.7 on the very first test — the walk never reaches "FF".
        let rule = trunk_rule();
        assert_eq!(rule.select(&mut Constant(0.5)), Some(&"F".to_string()));
    }

    #[test]
    fn high_draw_walks_to_last_candidate() {
        let rule = trunk_rule();
        assert_eq!(rule.select(&mut Constant(0.96)), Some(&"Fg".to_string()));
    }

    #[test]
    fn boundary_is_strictly_exclusive() {
        // draw == cumulative weight must NOT select (strict `<`).
        let rule = ExpansionRule::new().with("X".into(), 0.3);
        assert_eq!(rule.select(&mut Constant(0.3)), None);
    }

    #[test]
    fn unassigned_mass_falls_through() {
        let rule = ExpansionRule::new().with("X".into(), 0.3);
        assert_eq!(rule.select(&mut Constant(0.5)), None);
    }

    #[test]
    fn empty_rule_always_falls_through() {
        let rule: ExpansionRule = WeightedRule::new();
        assert_eq!(rule.select(&mut Constant(0.0)), None);
    }

    #[test]
    fn each_candidate_gets_a_fresh_draw() {
        // First draw (0.95) rejects "A"; the SECOND draw (0.6) accepts "B"
        // against cumulative 0.9. A single-draw CDF sampler would reject
        // both — selecting "B" here proves the per-candidate re-roll.
        let rule = ExpansionRule::new().with("A".into(), 0.5).with("B".into(), 0.4);
        let mut src = Script(vec![0.95, 0.6], 0);
        assert_eq!(rule.select(&mut src), Some(&"B".to_string()));
    }

    #[test]
    fn identity_rule_round_trips_symbol() {
        let rule = ExpansionRule::identity('[');
        assert_eq!(rule.select(&mut Constant(0.0)), Some(&"[".to_string()));
    }
}
