//! Terrain cost model: movement legality, step costs and sight blocking
//!
//! The table is data. `TerrainCostModel::standard()` and
//! `data/terrain_rules.toml` describe the same rules.

pub mod cost;
pub mod kinds;
pub mod loader;
pub mod model;

pub use cost::{Cost, InvalidPoints, MovePoints, StepCost};
pub use kinds::{Domain, ResourceKind, Terrain, UnitClass};
pub use loader::RulesError;
pub use model::{ClassRule, RuleCost, TerrainCostModel, TerrainRule};
