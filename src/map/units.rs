//! Units and cities placed on the map

use serde::{Deserialize, Serialize};

use crate::core::types::{CityId, PlayerId, UnitId};
use crate::hex::HexCoord;
use crate::terrain::{MovePoints, UnitClass};

/// Engine view of a unit for movement queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementUnit {
    pub coord: HexCoord,
    pub budget: MovePoints,
    pub unit_class: UnitClass,
}

/// A game unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub owner: PlayerId,
    pub class: UnitClass,
    pub position: HexCoord,
    /// Movement left this turn
    pub movement: MovePoints,
    pub max_movement: MovePoints,
    pub sight: u32,
}

impl Unit {
    pub fn new(
        owner: PlayerId,
        class: UnitClass,
        position: HexCoord,
        max_movement: MovePoints,
        sight: u32,
    ) -> Self {
        Self {
            id: UnitId::new(),
            owner,
            class,
            position,
            movement: max_movement,
            max_movement,
            sight,
        }
    }

    pub fn mover(&self) -> MovementUnit {
        MovementUnit {
            coord: self.position,
            budget: self.movement,
            unit_class: self.class,
        }
    }

    pub fn reset_movement(&mut self) {
        self.movement = self.max_movement;
    }
}

/// A founded city
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub owner: PlayerId,
    pub name: String,
    pub position: HexCoord,
}

impl City {
    pub fn new(owner: PlayerId, name: impl Into<String>, position: HexCoord) -> Self {
        Self {
            id: CityId::new(),
            owner,
            name: name.into(),
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_unit_starts_with_full_movement() {
        let unit = Unit::new(
            PlayerId::new(1),
            UnitClass::Scout,
            HexCoord::new(2, -1),
            MovePoints::whole(3),
            3,
        );
        assert_eq!(unit.movement, MovePoints::whole(3));
        let mover = unit.mover();
        assert_eq!(mover.coord, HexCoord::new(2, -1));
        assert_eq!(mover.unit_class, UnitClass::Scout);
    }

    #[test]
    fn test_reset_movement() {
        let mut unit = Unit::new(
            PlayerId::new(1),
            UnitClass::Land,
            HexCoord::ORIGIN,
            MovePoints::whole(2),
            2,
        );
        unit.movement = MovePoints::ZERO;
        unit.reset_movement();
        assert_eq!(unit.movement, MovePoints::whole(2));
    }
}
