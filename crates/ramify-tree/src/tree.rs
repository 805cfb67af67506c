//! [`Tree`] — build orchestration and interpretation policies.
//!
//! ## Build protocol
//!
//! 1. Expand the grammar's axiom for the configured generation count.
//! 2. Walk the final string once, applying each selected [`TreeAction`] to
//!    the engine's walker and appending transforms to the output lists.
//! 3. Hand back a [`TreeSkeleton`] — or nothing at all on a fatal error
//!    (no partial transform lists are ever published).
//!
//! One `Tree` instance drives exactly one build; [`Tree::build`] consumes
//! it. A host reacting to a parameter change constructs a fresh instance
//! and reruns the whole build.

use glam::{Mat4, Vec4};
use tracing::info;

use ramify_lsystem::{LSystem, LSystemError, Turtle, UniformSource, Walker};

use crate::config::TreeConfig;
use crate::grammar::{Grammar, TreeAction};

/// Distance the turtle advances per trunk/branch segment.
const SEGMENT_LENGTH: f32 = 0.7;
/// Downward step between leaves in a cluster, fanning them out spatially.
const FAN_STEP: f32 = 0.6;
/// Additive jitter range (degrees) on the ± rotation symbols.
const ROTATION_JITTER: f32 = 4.0;
/// Per-axis magnitude scale for the random-rotation symbol.
const RANDOM_ROTATION_SCALE: f32 = 4.3;
/// Chance an eligible leaf symbol spawns a cluster.
const LEAF_PROBABILITY: f32 = 0.8;
/// Cluster size is `1 + floor(draw · LEAF_COUNT_RANGE)`, i.e. 1–6 leaves.
const LEAF_COUNT_RANGE: f32 = 6.0;
/// Chance the save symbol flips the leaf-growth flag on the live turtle.
const LEAF_FLIP_PROBABILITY: f32 = 0.5;
/// Per-axis jitter scale for leaf/fruit orientation. Radians, not degrees —
/// the wide sweep is what scatters organ orientations across the sphere.
const ORGAN_JITTER_SCALE: f32 = 10.0;

/// Output of one build: three ordered, append-only lists of composed
/// (translation · rotation · scale) transforms, consumed as opaque
/// instance buffers by the rendering collaborator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeSkeleton {
    pub branches: Vec<Mat4>,
    pub leaves: Vec<Mat4>,
    pub fruit: Vec<Mat4>,
}

/// The concrete structure generator: a grammar wired into an engine plus
/// the build configuration.
#[derive(Debug)]
pub struct Tree {
    system: LSystem<TreeAction>,
    config: TreeConfig,
}

impl Tree {
    /// Generator over the built-in fruiting-tree grammar.
    pub fn new(config: TreeConfig) -> Self {
        Self::with_grammar(config, Grammar::fruiting_tree())
    }

    /// Generator over a substituted grammar.
    pub fn with_grammar(config: TreeConfig, grammar: Grammar) -> Self {
        Self {
            system: grammar.into_system(),
            config: config.sanitized(),
        }
    }

    /// Run one full build: expand, then interpret. Consumes the generator —
    /// regeneration means a new instance.
    pub fn build(mut self, src: &mut dyn UniformSource) -> Result<TreeSkeleton, LSystemError> {
        self.system.expand(self.config.generations, src)?;

        let config = self.config;
        let mut skeleton = TreeSkeleton::default();
        self.system
            .interpret(src, |action, walker, src| {
                apply(action, walker, src, &config, &mut skeleton)
            })?;

        info!(
            branches = skeleton.branches.len(),
            leaves = skeleton.leaves.len(),
            fruit = skeleton.fruit.len(),
            "tree built"
        );
        Ok(skeleton)
    }
}

// ─────────────────────────────────────────────
// Interpretation policies
// ─────────────────────────────────────────────

fn apply(
    action: &TreeAction,
    walker: &mut Walker,
    src: &mut dyn UniformSource,
    config: &TreeConfig,
    out: &mut TreeSkeleton,
) -> Result<(), LSystemError> {
    match action {
        TreeAction::DrawSegment => {
            // Capture the segment's START pose before advancing.
            let transform = walker.turtle().transform_matrix();
            if walker.turtle().growing_leaves {
                out.leaves.push(transform);
            }
            out.branches.push(transform);

            let turtle = walker.turtle_mut();
            turtle.move_forward(SEGMENT_LENGTH);
            turtle.bump_trunk_depth();
        }

        TreeAction::Rotate { axis, positive } => {
            let turtle = walker.turtle_mut();
            // Deeper branches bend less per symbol.
            let base = config.branch_angle / (0.5 * turtle.depth() as f32);
            if *positive {
                turtle.rotate_about(*axis, base + ROTATION_JITTER * src.draw());
            } else {
                turtle.rotate_about(*axis, -(base - ROTATION_JITTER * src.draw()));
            }
        }

        TreeAction::RandomRotate => {
            let cap = (walker.turtle().depth() as f32).min(config.branch_angle);
            let mut angles = [0.0_f32; 3];
            for angle in &mut angles {
                let sign = if src.draw() < 0.5 { 1.0 } else { -1.0 };
                *angle = sign * RANDOM_ROTATION_SCALE * src.draw() * cap;
            }
            let turtle = walker.turtle_mut();
            turtle.rotate_right(angles[0]);
            turtle.rotate_up(angles[1]);
            turtle.rotate_forward(angles[2]);
        }

        TreeAction::Save => {
            walker.save();
            // Draw unconditionally: the stream stays aligned even when the
            // depth gate blocks the flip.
            let flip = src.draw() < LEAF_FLIP_PROBABILITY;
            let turtle = walker.turtle_mut();
            if flip && turtle.depth() > config.min_organ_depth {
                turtle.growing_leaves = true;
            }
            turtle.bump_depth();
            turtle.reset_trunk_depth();
        }

        TreeAction::Restore => walker.restore()?,

        TreeAction::SpawnLeaves => spawn_leaves(walker, src, config, out),

        TreeAction::SpawnFruit => spawn_fruit(walker, src, config, out),
    }
    Ok(())
}

/// Depth-gated leaf cluster: 1–6 leaves, each with an independent jitter
/// rotation on top of the turtle's orientation, fanned out by a short
/// downward walk between spawns.
fn spawn_leaves(
    walker: &mut Walker,
    src: &mut dyn UniformSource,
    config: &TreeConfig,
    out: &mut TreeSkeleton,
) {
    if walker.turtle().depth() < config.min_organ_depth {
        return;
    }
    if src.draw() >= LEAF_PROBABILITY {
        return;
    }

    let count = 1 + (LEAF_COUNT_RANGE * src.draw()).floor() as usize;
    for leaf in 0..count {
        let jitter = organ_jitter(src, (leaf + 1) as f32);
        let turtle = walker.turtle_mut();
        out.leaves
            .push(turtle.translation_matrix() * turtle.rotation_matrix() * jitter);
        fan_downward(turtle);
    }
}

/// Depth-gated single fruit; probability scales with the configured
/// density and the wisteria blend.
fn spawn_fruit(
    walker: &mut Walker,
    src: &mut dyn UniformSource,
    config: &TreeConfig,
    out: &mut TreeSkeleton,
) {
    if walker.turtle().depth() < config.min_organ_depth {
        return;
    }
    let probability = config.fruit_density * config.wisteria / 10.0;
    if src.draw() < probability {
        let jitter = organ_jitter(src, 1.0);
        let turtle = walker.turtle();
        out.fruit
            .push(turtle.translation_matrix() * turtle.rotation_matrix() * jitter);
    }
}

/// Independent jitter rotation per axis, `draw · 10 · scale` radians each.
fn organ_jitter(src: &mut dyn UniformSource, scale: f32) -> Mat4 {
    Mat4::from_rotation_x(src.draw() * ORGAN_JITTER_SCALE * scale)
        * Mat4::from_rotation_y(src.draw() * ORGAN_JITTER_SCALE * scale)
        * Mat4::from_rotation_z(src.draw() * ORGAN_JITTER_SCALE * scale)
}

/// Walk two short steps straight down, temporarily overriding the heading.
fn fan_downward(turtle: &mut Turtle) {
    let heading = turtle.forward;
    turtle.forward = Vec4::new(0.0, -1.0, 0.0, 0.0);
    for _ in 0..2 {
        turtle.move_forward(FAN_STEP);
    }
    turtle.forward = heading;
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ramify_lsystem::{Axis, Constant, DrawingRule, ExpansionRule};

    /// Grammar whose axiom survives expansion verbatim (identity rules),
    /// for driving individual actions through a real build.
    fn literal_grammar(axiom: &str, drawings: Vec<(char, DrawingRule<TreeAction>)>) -> Grammar {
        let expansions = axiom
            .chars()
            .map(|c| (c, ExpansionRule::identity(c)))
            .collect();
        Grammar {
            axiom: axiom.into(),
            expansions,
            drawings,
        }
    }

    fn organ_drawings() -> Vec<(char, DrawingRule<TreeAction>)> {
        vec![
            ('F', DrawingRule::single(TreeAction::DrawSegment)),
            ('[', DrawingRule::single(TreeAction::Save)),
            (']', DrawingRule::single(TreeAction::Restore)),
            ('v', DrawingRule::single(TreeAction::SpawnLeaves)),
            ('O', DrawingRule::single(TreeAction::SpawnFruit)),
        ]
    }

    #[test]
    fn segment_records_start_pose_before_advancing() {
        let grammar = literal_grammar("F", organ_drawings());
        let tree = Tree::with_grammar(TreeConfig::default(), grammar);
        let skeleton = tree.build(&mut Constant(0.0)).unwrap();

        assert_eq!(skeleton.branches.len(), 1);
        // The transform was captured at the origin, not after the move.
        let translation = skeleton.branches[0].w_axis;
        assert_eq!(translation, Vec4::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn leaves_never_spawn_below_the_depth_gate() {
        // Depth is 1 at the root; a draw of 0.0 would otherwise always pass
        // the probability check.
        let grammar = literal_grammar("v", organ_drawings());
        let tree = Tree::with_grammar(TreeConfig::default(), grammar);
        let skeleton = tree.build(&mut Constant(0.0)).unwrap();
        assert!(skeleton.leaves.is_empty());
    }

    #[test]
    fn fruit_never_spawns_below_the_depth_gate() {
        let config = TreeConfig {
            wisteria: 1.0,
            fruit_density: 10.0, // probability 1.0 — only the gate blocks
            ..Default::default()
        };
        let grammar = literal_grammar("O", organ_drawings());
        let skeleton = Tree::with_grammar(config, grammar)
            .build(&mut Constant(0.0))
            .unwrap();
        assert!(skeleton.fruit.is_empty());
    }

    #[test]
    fn fruit_spawns_once_past_the_depth_gate() {
        // Six saves raise depth from 1 to 7, past the default gate of 6.
        let config = TreeConfig {
            wisteria: 1.0,
            fruit_density: 10.0,
            ..Default::default()
        };
        let grammar = literal_grammar("[[[[[[O", organ_drawings());
        let skeleton = Tree::with_grammar(config, grammar)
            .build(&mut Constant(0.0))
            .unwrap();
        assert_eq!(skeleton.fruit.len(), 1, "exactly one fruit per visit");
        assert!(skeleton.branches.is_empty());
    }

    #[test]
    fn leaf_cluster_count_follows_the_draw() {
        // Draw 0.0: passes the 0.8 probability check, count = 1 + ⌊0⌋ = 1.
        let grammar = literal_grammar("[[[[[[v", organ_drawings());
        let skeleton = Tree::with_grammar(TreeConfig::default(), grammar)
            .build(&mut Constant(0.0))
            .unwrap();
        assert_eq!(skeleton.leaves.len(), 1);
    }

    #[test]
    fn zero_wisteria_means_no_fruit() {
        let grammar = literal_grammar("[[[[[[O", organ_drawings());
        let skeleton = Tree::with_grammar(TreeConfig::default(), grammar)
            .build(&mut Constant(0.0))
            .unwrap();
        assert!(skeleton.fruit.is_empty(), "probability 0 must never fire");
    }

    #[test]
    fn growing_leaves_duplicates_segments_into_leaf_list() {
        // Seven saves: the 7th flips the flag (depth 7 > gate 6, draw 0.0
        // beats the 0.5 flip probability). The following segment lands in
        // both lists.
        let grammar = literal_grammar("[[[[[[[F", organ_drawings());
        let skeleton = Tree::with_grammar(TreeConfig::default(), grammar)
            .build(&mut Constant(0.0))
            .unwrap();
        assert_eq!(skeleton.branches.len(), 1);
        assert_eq!(skeleton.leaves.len(), 1);
        assert_eq!(skeleton.branches[0], skeleton.leaves[0]);
    }

    #[test]
    fn restore_rewinds_branch_position() {
        let drawings = vec![
            ('F', DrawingRule::single(TreeAction::DrawSegment)),
            ('[', DrawingRule::single(TreeAction::Save)),
            (']', DrawingRule::single(TreeAction::Restore)),
            ('u', DrawingRule::single(TreeAction::Rotate { axis: Axis::Up, positive: true })),
        ];
        // Segment 2 (inside brackets) and segment 3 start from the same
        // place: restore rewinds the advance made inside the brackets.
        let grammar = literal_grammar("F[F]F", drawings);
        let skeleton = Tree::with_grammar(TreeConfig::default(), grammar)
            .build(&mut Constant(0.0))
            .unwrap();
        assert_eq!(skeleton.branches.len(), 3);
        let w1 = skeleton.branches[1].w_axis;
        let w2 = skeleton.branches[2].w_axis;
        assert_eq!(w1.truncate(), w2.truncate());
    }

    #[test]
    fn unbalanced_restore_aborts_without_output() {
        let grammar = literal_grammar("F]", organ_drawings());
        let err = Tree::with_grammar(TreeConfig::default(), grammar)
            .build(&mut Constant(0.0))
            .unwrap_err();
        assert_eq!(err, LSystemError::EmptyStack);
    }

    #[test]
    fn fan_downward_restores_the_heading() {
        let mut turtle = Turtle::canonical();
        turtle.rotate_right(30.0);
        let heading = turtle.forward;
        fan_downward(&mut turtle);
        assert_eq!(turtle.forward, heading);
        // Two steps of 0.6 straight down.
        assert!((turtle.position.y - (-2.0 * FAN_STEP)).abs() < 1e-5);
    }
}
