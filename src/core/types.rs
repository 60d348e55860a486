//! Core identifiers shared by the map, units and fog of war

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (human or AI faction)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player-{}", self.0)
    }
}

/// Unique identifier for units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub Uuid);

impl UnitId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UnitId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for cities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CityId(pub Uuid);

impl CityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CityId {
    fn default() -> Self {
        Self::new()
    }
}

/// Game turn counter
pub type Turn = u32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_equality() {
        let a = PlayerId(1);
        let b = PlayerId(1);
        let c = PlayerId(2);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_player_id_ordering() {
        let mut ids = vec![PlayerId(3), PlayerId(1), PlayerId(2)];
        ids.sort();
        assert_eq!(ids, vec![PlayerId(1), PlayerId(2), PlayerId(3)]);
    }

    #[test]
    fn test_unit_ids_unique() {
        assert_ne!(UnitId::new(), UnitId::new());
        assert_ne!(CityId::new(), CityId::new());
    }

    #[test]
    fn test_player_display() {
        assert_eq!(PlayerId(7).to_string(), "player-7");
    }
}
