//! `ramify-tree` — concrete branching-structure generator over
//! [`ramify_lsystem`].
//!
//! ## Crate structure
//!
//! | Module      | Responsibility                                             |
//! |-------------|------------------------------------------------------------|
//! | [`config`]  | [`TreeConfig`] — generations, angles, densities, gating    |
//! | [`grammar`] | [`TreeAction`], [`Grammar`] symbol tables (data, not code) |
//! | [`tree`]    | [`Tree`] build orchestration → [`TreeSkeleton`] output     |
//!
//! ## Quick start
//!
//! ```rust
//! use ramify_tree::{RngSource, Tree, TreeConfig};
//!
//! let tree = Tree::new(TreeConfig { generations: 5, ..Default::default() });
//! let skeleton = tree.build(&mut RngSource::seeded(42)).unwrap();
//! println!(
//!     "segments={} leaves={} fruit={}",
//!     skeleton.branches.len(),
//!     skeleton.leaves.len(),
//!     skeleton.fruit.len()
//! );
//! ```
//!
//! The output is three ordered lists of 4×4 transforms (branch segments,
//! leaf instances, fruit instances) — the sole interface handed to a
//! rendering collaborator. Rendering itself, cameras, meshes and GUI
//! binding live outside this crate.

pub mod config;
pub mod grammar;
pub mod tree;

pub use config::TreeConfig;
pub use grammar::{Grammar, TreeAction};
pub use tree::{Tree, TreeSkeleton};

// Engine types a host needs to drive a build.
pub use ramify_lsystem::{Axis, Constant, LSystemError, RngSource, UniformSource};
