//! Which occupied tiles a mover may pass through

use crate::core::config::EngineConfig;
use crate::core::types::PlayerId;
use crate::map::tile::Occupant;

/// Occupancy rules for one moving player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovePolicy {
    /// The mover; `None` ignores occupants entirely
    pub player: Option<PlayerId>,
    pub allow_stacking: bool,
    pub enemy_units_block: bool,
}

impl Default for MovePolicy {
    fn default() -> Self {
        Self::ignoring_occupants()
    }
}

impl MovePolicy {
    pub fn for_player(player: PlayerId, config: &EngineConfig) -> Self {
        Self {
            player: Some(player),
            allow_stacking: config.allow_stacking,
            enemy_units_block: config.enemy_units_block,
        }
    }

    /// Terrain-only movement
    pub fn ignoring_occupants() -> Self {
        Self {
            player: None,
            allow_stacking: true,
            enemy_units_block: false,
        }
    }

    /// Does `occupant` stop the mover from entering its tile?
    ///
    /// Enemy cities always block. Own cities never do.
    pub fn blocks(&self, occupant: &Occupant) -> bool {
        let Some(player) = self.player else {
            return false;
        };

        if occupant.owner != player {
            if occupant.city.is_some() {
                return true;
            }
            return self.enemy_units_block && !occupant.units.is_empty();
        }

        !self.allow_stacking && !occupant.units.is_empty()
    }
}
