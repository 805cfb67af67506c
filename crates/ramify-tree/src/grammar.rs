//! Symbol alphabet and rule tables for the tree grammar.
//!
//! The tables ARE the domain configuration: a [`Grammar`] is plain data
//! (serializable, substitutable), wired into an engine only at build time.
//! Alternate grammars plug into [`crate::Tree::with_grammar`] without
//! touching any interpretation code.
//!
//! ## Built-in alphabet
//!
//! | Symbol  | Expansion                          | Interpretation            |
//! |---------|------------------------------------|---------------------------|
//! | `F`     | `F` 0.7 / `FF` 0.25 / `Fg` 0.05    | draw segment, advance     |
//! | `A`     | `F[ugFfAv]cfXg[bfgFAO]Xv`          | draw segment, advance     |
//! | `X`     | `[uugv][bfgv][fcgv]`               | draw segment, advance     |
//! | `r u f` | identity                           | + rotate right/up/forward |
//! | `a b c` | identity                           | − rotate right/up/forward |
//! | `[` `]` | identity                           | save / restore turtle     |
//! | `v`     | identity                           | spawn leaf cluster        |
//! | `g`     | identity                           | random three-axis rotate  |
//! | `O`     | identity                           | spawn fruit               |

use serde::{Deserialize, Serialize};

use ramify_lsystem::{Axis, DrawingRule, ExpansionRule, LSystem};

/// The fixed, finite set of interpretation operations. Tagged variants
/// instead of opaque callbacks keep the rule tables serializable and let
/// the interpreter match exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreeAction {
    /// Record the current transform (segment start pose), then advance.
    DrawSegment,
    /// Depth-scaled, jittered rotation about one frame axis.
    Rotate { axis: Axis, positive: bool },
    /// Independent jittered rotations on all three axes at once.
    RandomRotate,
    /// Push the turtle; maybe flip the leaf flag; deepen the branch.
    Save,
    /// Pop the stack, replacing the live turtle wholesale.
    Restore,
    /// Depth-gated cluster of 1–6 jittered leaves, fanned downward.
    SpawnLeaves,
    /// Depth-gated single fruit, probability scaled by density · wisteria.
    SpawnFruit,
}

/// A complete grammar: axiom plus per-symbol rule tables for both phases,
/// in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grammar {
    pub axiom: String,
    pub expansions: Vec<(char, ExpansionRule)>,
    pub drawings: Vec<(char, DrawingRule<TreeAction>)>,
}

impl Grammar {
    /// The built-in fruiting-tree grammar (trunk, branch whorls, leaf
    /// clusters, fruit).
    pub fn fruiting_tree() -> Self {
        let mut expansions = vec![
            (
                'F',
                ExpansionRule::new()
                    .with("F".into(), 0.7)
                    .with("FF".into(), 0.25)
                    .with("Fg".into(), 0.05),
            ),
            ('A', ExpansionRule::single("F[ugFfAv]cfXg[bfgFAO]Xv".into())),
            ('X', ExpansionRule::single("[uugv][bfgv][fcgv]".into())),
        ];
        for symbol in "[]rufabcvgO".chars() {
            expansions.push((symbol, ExpansionRule::identity(symbol)));
        }

        let drawings = vec![
            ('F', DrawingRule::single(TreeAction::DrawSegment)),
            ('A', DrawingRule::single(TreeAction::DrawSegment)),
            ('X', DrawingRule::single(TreeAction::DrawSegment)),
            ('[', DrawingRule::single(TreeAction::Save)),
            (']', DrawingRule::single(TreeAction::Restore)),
            ('r', DrawingRule::single(TreeAction::Rotate { axis: Axis::Right, positive: true })),
            ('u', DrawingRule::single(TreeAction::Rotate { axis: Axis::Up, positive: true })),
            ('f', DrawingRule::single(TreeAction::Rotate { axis: Axis::Forward, positive: true })),
            ('a', DrawingRule::single(TreeAction::Rotate { axis: Axis::Right, positive: false })),
            ('b', DrawingRule::single(TreeAction::Rotate { axis: Axis::Up, positive: false })),
            ('c', DrawingRule::single(TreeAction::Rotate { axis: Axis::Forward, positive: false })),
            ('v', DrawingRule::single(TreeAction::SpawnLeaves)),
            ('g', DrawingRule::single(TreeAction::RandomRotate)),
            ('O', DrawingRule::single(TreeAction::SpawnFruit)),
        ];

        Self {
            axiom: "FFFAFA".into(),
            expansions,
            drawings,
        }
    }

    /// Wire the tables into a fresh engine.
    pub fn into_system(self) -> LSystem<TreeAction> {
        let mut system = LSystem::new(self.axiom);
        for (symbol, rule) in self.expansions {
            system.add_expansion_rule(symbol, rule);
        }
        for (symbol, rule) in self.drawings {
            system.add_drawing_rule(symbol, rule);
        }
        system
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
