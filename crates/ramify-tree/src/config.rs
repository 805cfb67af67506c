//! Build parameters consumed from a host (GUI slider bindings, presets).

use serde::{Deserialize, Serialize};

/// Configuration for one tree build.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Expansion generations. Practical range 1–20. Default: `9`.
    pub generations: u32,

    /// Maximum per-symbol branch rotation in degrees, scaled down with
    /// recursion depth (`angle / (0.5 · depth)` per rotation symbol).
    /// Practical range 20–70. Default: `30.0`.
    pub branch_angle: f32,

    /// Age/wisteria-style blend in `[0, 1]`; scales fruit probability.
    /// Default: `0.0`.
    pub wisteria: f32,

    /// Fruit density scalar, `≥ 0`. Fruit spawn probability is
    /// `fruit_density · wisteria / 10`. Default: `1.0`.
    pub fruit_density: f32,

    /// Minimum recursion depth before leaves and fruit may spawn (the
    /// depth gate). Below it, spawn probability is forced to zero.
    /// Default: `6`.
    pub min_organ_depth: u32,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            generations: 9,
            branch_angle: 30.0,
            wisteria: 0.0,
            fruit_density: 1.0,
            min_organ_depth: 6,
        }
    }
}

impl TreeConfig {
    /// Clamp host-supplied values into their documented ranges.
    pub fn sanitized(self) -> Self {
        Self {
            generations: self.generations.max(1),
            branch_angle: self.branch_angle.max(0.0),
            wisteria: self.wisteria.clamp(0.0, 1.0),
            fruit_density: self.fruit_density.max(0.0),
            min_organ_depth: self.min_organ_depth,
        }
    }
}
