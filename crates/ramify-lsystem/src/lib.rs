//! `ramify-lsystem` — stochastic L-system rewriting + 3D turtle interpretation.
//!
//! ## Crate structure
//!
//! | Module      | Responsibility                                              |
//! |-------------|-------------------------------------------------------------|
//! | [`engine`]  | [`LSystem`] expansion/interpretation phases + [`Walker`]    |
//! | [`rules`]   | [`WeightedRule`] draw-per-candidate weighted selection      |
//! | [`sampler`] | [`UniformSource`] injectable uniform-draw stream            |
//! | [`turtle`]  | [`Turtle`] pose/frame state machine + [`TurtleStack`]       |
//!
//! ## Quick start
//!
//! ```rust
//! use ramify_lsystem::{Constant, ExpansionRule, LSystem};
//!
//! let mut system: LSystem<()> = LSystem::new("A");
//! system.add_expansion_rule('A', ExpansionRule::single("AB".into()));
//! system.add_expansion_rule('B', ExpansionRule::identity('B'));
//!
//! let out = system.expand(2, &mut Constant(0.0)).unwrap();
//! assert_eq!(out, "ABB");
//! ```
//!
//! The engine is single-threaded and synchronous: one call to
//! [`LSystem::expand`] followed by one call to [`LSystem::interpret`] is an
//! atomic build. There is no incremental re-expansion — a host that wants to
//! regenerate discards the instance and starts over.

pub mod engine;
pub mod error;
pub mod rules;
pub mod sampler;
pub mod turtle;

// ── Engine ────────────────────────────────────────────────────────────────────
pub use engine::{LSystem, Walker};

// ── Errors ────────────────────────────────────────────────────────────────────
pub use error::LSystemError;

// ── Rules ─────────────────────────────────────────────────────────────────────
pub use rules::{DrawingRule, ExpansionRule, WeightedRule};

// ── Sampler ───────────────────────────────────────────────────────────────────
pub use sampler::{Constant, RngSource, UniformSource};

// ── Turtle ────────────────────────────────────────────────────────────────────
pub use turtle::{Axis, Turtle, TurtleStack};
