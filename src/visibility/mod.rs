//! Fog of war: per-player visibility and line of sight

pub mod engine;
pub mod fog;

pub use engine::{line_of_sight, SightSource, VisibilityEngine};
pub use fog::{FogDiff, FogEntry, FogMap, VisibilityState};
