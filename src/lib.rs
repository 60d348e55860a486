//! Hex Realm - hex-grid spatial engine for turn-based strategy
//!
//! Cube coordinates, a data-driven terrain cost model, fog of war and
//! terrain-aware pathfinding, tied together by `MapState`.

pub mod core;
pub mod hex;
pub mod map;
pub mod pathfinding;
pub mod terrain;
pub mod visibility;

pub use crate::core::{EngineConfig, EngineError, Result};
pub use crate::hex::{HexCoord, HexDirection};
pub use crate::map::{MapState, Tile, TileGrid, TileLookup};
pub use crate::pathfinding::{MovePlan, Path, Pathfinder};
pub use crate::terrain::{Cost, MovePoints, Terrain, TerrainCostModel, UnitClass};
pub use crate::visibility::{FogMap, SightSource, VisibilityEngine, VisibilityState};
