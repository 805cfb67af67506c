//! 3D turtle: a positioned, oriented frame used to interpret symbols as
//! spatial actions, plus the LIFO snapshot stack that gives branching
//! structures their save/restore semantics.
//!
//! ## Frame convention
//!
//! The turtle carries three direction vectors (homogeneous, `w = 0`):
//! `forward`, `right`, `up`. Each rotation spins the **other two** vectors
//! about the named axis and re-normalizes them:
//!
//! ```text
//! rotate_up(θ)      : right, forward  ← spin about up
//! rotate_right(θ)   : forward, up     ← spin about right
//! rotate_forward(θ) : right, up       ← spin about forward
//! ```
//!
//! This two-vectors-per-axis convention keeps the frame orthonormal without
//! a full re-orthogonalization step, and must be preserved exactly.
//!
//! ## Rendered transform
//!
//! [`Turtle::transform_matrix`] composes translation · rotation · scale,
//! where the rotation is derived from the angle between the canonical up
//! axis `(0, 1, 0)` and the current `forward` — NOT from the right/up
//! vectors. Roll about `forward` is therefore absent from the rendered
//! transform; the generated shapes depend on it, so it is contract, not a
//! bug. When `forward` is parallel to the canonical axis the cross product
//! degenerates and the rotation collapses to identity.

use glam::{Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::error::LSystemError;

/// Local frame axis names, used by interpretation actions to pick which
/// rotation a symbol applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Right,
    Up,
    Forward,
}

/// A single 3D pose (position + orthonormal frame) plus the procedural
/// bookkeeping the structure generator reads: branch nesting depth, the
/// trunk-segment counter, and the leaf-growth flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Turtle {
    /// Homogeneous position, `w = 1`.
    pub position: Vec4,
    /// Heading, `w = 0`. Unit length while mutated through rotations only.
    pub forward: Vec4,
    pub right: Vec4,
    pub up: Vec4,
    /// Once set, stays with this turtle and the live branch it walks;
    /// snapshots drop it, so restoring never leaks it back to an ancestor.
    pub growing_leaves: bool,
    depth: u32,
    trunk_depth: f32,
}

impl Turtle {
    pub fn new(position: Vec4, forward: Vec4, right: Vec4, up: Vec4, depth: u32) -> Self {
        Self {
            position,
            forward,
            right,
            up,
            growing_leaves: false,
            depth,
            trunk_depth: 0.0,
        }
    }

    /// Root turtle: origin, canonical basis (forward = +Y, right = +X,
    /// up = +Z), depth 1.
    pub fn canonical() -> Self {
        Self::new(
            Vec4::new(0.0, 0.0, 0.0, 1.0),
            Vec4::new(0.0, 1.0, 0.0, 0.0),
            Vec4::new(1.0, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            1,
        )
    }

    /// Branch-nesting depth. Starts at 1, only ever increments.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Forward moves since the last branch save point.
    pub fn trunk_depth(&self) -> f32 {
        self.trunk_depth
    }

    /// `depth += 1`. The increment is fixed regardless of context.
    pub fn bump_depth(&mut self) {
        self.depth += 1;
    }

    /// `trunk_depth += 1`, one tick per forward move.
    pub fn bump_trunk_depth(&mut self) {
        self.trunk_depth += 1.0;
    }

    pub fn reset_trunk_depth(&mut self) {
        self.trunk_depth = 0.0;
    }

    /// Translate along `forward`. The frame itself is untouched.
    pub fn move_forward(&mut self, distance: f32) {
        self.position += distance * self.forward;
        self.position.w = 1.0;
    }

    /// Spin `forward` and `up` about `right`.
    pub fn rotate_right(&mut self, angle_deg: f32) {
        let rot = Mat4::from_axis_angle(self.right.truncate().normalize(), angle_deg.to_radians());
        self.forward = (rot * self.forward).normalize();
        self.up = (rot * self.up).normalize();
    }

    /// Spin `right` and `forward` about `up`.
    pub fn rotate_up(&mut self, angle_deg: f32) {
        let rot = Mat4::from_axis_angle(self.up.truncate().normalize(), angle_deg.to_radians());
        self.right = (rot * self.right).normalize();
        self.forward = (rot * self.forward).normalize();
    }

    /// Spin `right` and `up` about `forward`.
    pub fn rotate_forward(&mut self, angle_deg: f32) {
        let rot = Mat4::from_axis_angle(self.forward.truncate().normalize(), angle_deg.to_radians());
        self.right = (rot * self.right).normalize();
        self.up = (rot * self.up).normalize();
    }

    /// Dispatch one of the three axis rotations.
    pub fn rotate_about(&mut self, axis: Axis, angle_deg: f32) {
        match axis {
            Axis::Right => self.rotate_right(angle_deg),
            Axis::Up => self.rotate_up(angle_deg),
            Axis::Forward => self.rotate_forward(angle_deg),
        }
    }

    /// Deep copy of position, frame and depth. The trunk counter resets to 0
    /// and `growing_leaves` to false — bookkeeping does not survive a save.
    pub fn snapshot(&self) -> Turtle {
        Turtle::new(self.position, self.forward, self.right, self.up, self.depth)
    }

    pub fn translation_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position.truncate())
    }

    /// Rotation from the canonical up axis `(0, 1, 0)` toward `forward`:
    /// axis = canonical × forward, θ = acos of their normalized dot. Falls
    /// back to identity when the axis degenerates (forward ∥ ±Y).
    pub fn rotation_matrix(&self) -> Mat4 {
        let canonical = Vec3::Y;
        let forward = self.forward.truncate();
        let axis = canonical.cross(forward);
        if axis.length_squared() < 1e-12 {
            return Mat4::IDENTITY;
        }
        let cos = canonical.dot(forward) / (canonical.length() * forward.length());
        let theta = cos.clamp(-1.0, 1.0).acos();
        Mat4::from_axis_angle(axis.normalize(), theta)
    }

    /// Non-uniform scale `(1/depth, 1, 1/depth)` — deeper branches thin out.
    pub fn scale_matrix(&self) -> Mat4 {
        let thin = 1.0 / self.depth as f32;
        Mat4::from_scale(Vec3::new(thin, 1.0, thin))
    }

    /// Composed translation · rotation · scale for the current pose.
    pub fn transform_matrix(&self) -> Mat4 {
        self.translation_matrix() * self.rotation_matrix() * self.scale_matrix()
    }
}

// ─────────────────────────────────────────────
// Stack
// ─────────────────────────────────────────────

/// LIFO stack of turtle snapshots, each independently owned — no aliasing
/// with the live turtle is ever possible. Popping on empty surfaces
/// [`LSystemError::EmptyStack`]: grammar authors must balance brackets.
#[derive(Debug, Default)]
pub struct TurtleStack {
    stack: Vec<Turtle>,
}

impl TurtleStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a deep copy of `turtle` (via [`Turtle::snapshot`]).
    pub fn push(&mut self, turtle: &Turtle) {
        self.stack.push(turtle.snapshot());
    }

    /// Remove and return the most recent snapshot.
    pub fn pop(&mut self) -> Result<Turtle, LSystemError> {
        self.stack.pop().ok_or(LSystemError::EmptyStack)
    }

    /// Borrow the most recent snapshot without removing it.
    pub fn peek(&self) -> Result<&Turtle, LSystemError> {
        self.stack.last().ok_or(LSystemError::EmptyStack)
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
