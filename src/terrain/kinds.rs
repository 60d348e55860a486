//! Terrain, unit class and resource kinds

use serde::{Deserialize, Serialize};

/// Terrain kind of a tile
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    #[default]
    Plains,
    Grassland,
    Desert,
    Tundra,
    Snow,
    Hills,
    Forest,
    Jungle,
    Marsh,
    River,
    Mountain,
    Ocean,
    Coast,
    Lake,
}

impl Terrain {
    pub const ALL: [Terrain; 14] = [
        Terrain::Plains,
        Terrain::Grassland,
        Terrain::Desert,
        Terrain::Tundra,
        Terrain::Snow,
        Terrain::Hills,
        Terrain::Forest,
        Terrain::Jungle,
        Terrain::Marsh,
        Terrain::River,
        Terrain::Mountain,
        Terrain::Ocean,
        Terrain::Coast,
        Terrain::Lake,
    ];

    /// Single-character glyph for text dumps
    pub fn glyph(&self) -> char {
        match self {
            Terrain::Plains => '.',
            Terrain::Grassland => ',',
            Terrain::Desert => ':',
            Terrain::Tundra => '_',
            Terrain::Snow => '*',
            Terrain::Hills => 'n',
            Terrain::Forest => 'f',
            Terrain::Jungle => 'j',
            Terrain::Marsh => '%',
            Terrain::River => '=',
            Terrain::Mountain => '^',
            Terrain::Ocean => '~',
            Terrain::Coast => '-',
            Terrain::Lake => 'o',
        }
    }
}

/// Movement class of a unit
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum UnitClass {
    #[default]
    Land,
    Scout,
    Heavy,
    Naval,
    Amphibious,
    Flying,
}

impl UnitClass {
    pub const ALL: [UnitClass; 6] = [
        UnitClass::Land,
        UnitClass::Scout,
        UnitClass::Heavy,
        UnitClass::Naval,
        UnitClass::Amphibious,
        UnitClass::Flying,
    ];
}

/// Which side of the land/water divide a unit class may stand on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    #[default]
    Land,
    Water,
    Any,
}

impl Domain {
    /// Does this domain admit a tile with the given water flag?
    pub fn admits(&self, water: bool) -> bool {
        match self {
            Domain::Land => !water,
            Domain::Water => water,
            Domain::Any => true,
        }
    }
}

/// Strategic or bonus resource on a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Iron,
    Horses,
    Coal,
    Oil,
    Wheat,
    Cattle,
    Sheep,
    Gold,
    Silver,
    Gems,
    Marble,
    Fish,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_admits() {
        assert!(Domain::Land.admits(false));
        assert!(!Domain::Land.admits(true));
        assert!(Domain::Water.admits(true));
        assert!(!Domain::Water.admits(false));
        assert!(Domain::Any.admits(true) && Domain::Any.admits(false));
    }

    #[test]
    fn test_terrain_serde_names() {
        assert_eq!(serde_json::to_string(&Terrain::Grassland).unwrap(), "\"grassland\"");
        let parsed: UnitClass = serde_json::from_str("\"amphibious\"").unwrap();
        assert_eq!(parsed, UnitClass::Amphibious);
    }

    #[test]
    fn test_glyphs_unique() {
        let mut glyphs: Vec<char> = Terrain::ALL.iter().map(|t| t.glyph()).collect();
        glyphs.sort();
        glyphs.dedup();
        assert_eq!(glyphs.len(), Terrain::ALL.len());
    }
}
