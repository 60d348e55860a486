//! Pathfinding: A* paths, movement ranges and occupancy rules

pub mod astar;
pub mod policy;
pub mod reachable;

pub use astar::{MovePlan, Path, Pathfinder};
pub use policy::MovePolicy;
