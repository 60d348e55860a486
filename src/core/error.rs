use thiserror::Error;

use crate::core::types::{PlayerId, UnitId};
use crate::hex::HexCoord;
use crate::terrain::{MovePoints, RulesError, Terrain, UnitClass};

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid cube coordinate ({q}, {r}, {s}): components must sum to zero")]
    InvalidCoordinate { q: i32, r: i32, s: i32 },

    #[error("Malformed coordinate: {0}")]
    MalformedCoordinate(String),

    #[error("Unit not found: {0:?}")]
    UnitNotFound(UnitId),

    #[error("Tile not on map: {0}")]
    TileNotFound(HexCoord),

    #[error("Tile {coord} is blocked for {player}")]
    TileOccupied { coord: HexCoord, player: PlayerId },

    #[error("{class:?} cannot enter {terrain:?}")]
    CannotEnter { class: UnitClass, terrain: Terrain },

    #[error("No path from {from} to {to}")]
    Unreachable { from: HexCoord, to: HexCoord },

    #[error("Move costs {required} but only {available} movement remains")]
    InsufficientMovement {
        required: MovePoints,
        available: MovePoints,
    },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Rules error: {0}")]
    Rules(#[from] RulesError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
