//! Engine configuration with documented constants
//!
//! Everything the map layer needs that is not part of the terrain rules
//! table lives here. Rules (costs, sight blocking) are loaded separately.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};
use crate::terrain::MovePoints;

/// Largest sight or territory radius accepted by `validate`
pub const MAX_RADIUS: u32 = 20;

/// Configuration for the map layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === VISIBILITY ===
    /// Sight radius of an ordinary unit (hexes)
    pub unit_sight_radius: u32,

    /// Extra sight radius for scout-class units
    pub scout_sight_bonus: u32,

    /// Sight radius of a city (hexes)
    pub city_sight_radius: u32,

    // === TERRITORY ===
    /// Radius of tiles claimed when a city is founded
    ///
    /// Tiles already owned by another city keep their owner.
    pub city_territory_radius: u32,

    // === MOVEMENT ===
    /// Whether two units of the same player may share a tile
    pub allow_stacking: bool,

    /// Whether enemy units block movement through their tile
    ///
    /// Enemy cities always block.
    pub enemy_units_block: bool,

    /// Movement points given to a unit spawned without an explicit budget
    pub default_unit_movement: MovePoints,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            unit_sight_radius: 2,
            scout_sight_bonus: 1,
            city_sight_radius: 3,
            city_territory_radius: 2,
            allow_stacking: false,
            enemy_units_block: true,
            default_unit_movement: MovePoints::whole(2),
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; missing keys take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig =
            toml::from_str(content).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let scout_radius = self.unit_sight_radius + self.scout_sight_bonus;
        if scout_radius > MAX_RADIUS || self.city_sight_radius > MAX_RADIUS {
            return Err(EngineError::InvalidConfig(format!(
                "sight radius must be <= {} (unit+scout {}, city {})",
                MAX_RADIUS, scout_radius, self.city_sight_radius
            )));
        }

        if self.city_territory_radius > MAX_RADIUS {
            return Err(EngineError::InvalidConfig(format!(
                "city_territory_radius ({}) must be <= {}",
                self.city_territory_radius, MAX_RADIUS
            )));
        }

        if self.default_unit_movement == MovePoints::ZERO {
            return Err(EngineError::InvalidConfig(
                "default_unit_movement must be positive".into(),
            ));
        }

        Ok(())
    }
}
