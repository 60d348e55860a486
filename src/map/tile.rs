//! Tiles and the tile lookup capability
//!
//! Engines never own tiles. They read them through `TileLookup`, which
//! `TileGrid` and plain hash maps implement.

use std::collections::HashMap;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{CityId, PlayerId, UnitId};
use crate::hex::HexCoord;
use crate::terrain::{ResourceKind, Terrain};

/// Who stands on a tile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupant {
    pub owner: PlayerId,
    /// Units on the tile, in arrival order
    pub units: Vec<UnitId>,
    pub city: Option<CityId>,
}

impl Occupant {
    pub fn unit(owner: PlayerId, unit: UnitId) -> Self {
        Self {
            owner,
            units: vec![unit],
            city: None,
        }
    }

    pub fn city(owner: PlayerId, city: CityId) -> Self {
        Self {
            owner,
            units: Vec::new(),
            city: Some(city),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty() && self.city.is_none()
    }
}

/// One hex of the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub coord: HexCoord,
    pub terrain: Terrain,
    pub resource: Option<ResourceKind>,
    pub occupant: Option<Occupant>,
    /// Territory owner, set when a city claims the tile
    pub owner: Option<PlayerId>,
}

impl Tile {
    pub fn new(coord: HexCoord, terrain: Terrain) -> Self {
        Self {
            coord,
            terrain,
            resource: None,
            occupant: None,
            owner: None,
        }
    }

    pub fn with_resource(mut self, resource: ResourceKind) -> Self {
        self.resource = Some(resource);
        self
    }
}

/// Read-only `coord -> Tile` capability handed to the engines
pub trait TileLookup {
    fn tile(&self, coord: HexCoord) -> Option<&Tile>;

    fn contains(&self, coord: HexCoord) -> bool {
        self.tile(coord).is_some()
    }
}

impl TileLookup for AHashMap<HexCoord, Tile> {
    fn tile(&self, coord: HexCoord) -> Option<&Tile> {
        self.get(&coord)
    }
}

impl TileLookup for HashMap<HexCoord, Tile> {
    fn tile(&self, coord: HexCoord) -> Option<&Tile> {
        self.get(&coord)
    }
}

impl<T: TileLookup + ?Sized> TileLookup for &T {
    fn tile(&self, coord: HexCoord) -> Option<&Tile> {
        (**self).tile(coord)
    }
}

/// Map storage: at most one tile per coordinate
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileGrid {
    tiles: AHashMap<HexCoord, Tile>,
}

impl TileGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hexagon of `radius` around the origin, all one terrain
    pub fn hexagon(radius: u32, terrain: Terrain) -> Self {
        let mut grid = Self::new();
        for coord in HexCoord::ORIGIN.range(radius) {
            grid.insert(Tile::new(coord, terrain));
        }
        grid
    }

    /// `width` x `height` rectangle in odd-row offset layout
    ///
    /// Row `row`, column `col` maps to axial `(col - row / 2, row)`.
    pub fn rectangle(width: u32, height: u32, terrain: Terrain) -> Self {
        let mut grid = Self::new();
        for coord in rectangle_coords(width, height) {
            grid.insert(Tile::new(coord, terrain));
        }
        grid
    }

    /// Insert a tile, replacing any tile at the same coordinate
    pub fn insert(&mut self, tile: Tile) -> Option<Tile> {
        self.tiles.insert(tile.coord, tile)
    }

    pub fn get(&self, coord: HexCoord) -> Option<&Tile> {
        self.tiles.get(&coord)
    }

    pub fn get_mut(&mut self, coord: HexCoord) -> Option<&mut Tile> {
        self.tiles.get_mut(&coord)
    }

    /// Change terrain in place; returns false when the tile does not exist
    pub fn set_terrain(&mut self, coord: HexCoord, terrain: Terrain) -> bool {
        match self.tiles.get_mut(&coord) {
            Some(tile) => {
                tile.terrain = terrain;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// All coordinates, sorted
    pub fn coords(&self) -> Vec<HexCoord> {
        let mut coords: Vec<HexCoord> = self.tiles.keys().copied().collect();
        coords.sort();
        coords
    }

    /// All tiles, sorted by coordinate
    pub fn sorted_tiles(&self) -> Vec<&Tile> {
        let mut tiles: Vec<&Tile> = self.tiles.values().collect();
        tiles.sort_by_key(|tile| tile.coord);
        tiles
    }
}

impl TileLookup for TileGrid {
    fn tile(&self, coord: HexCoord) -> Option<&Tile> {
        self.tiles.get(&coord)
    }
}

impl FromIterator<Tile> for TileGrid {
    fn from_iter<I: IntoIterator<Item = Tile>>(iter: I) -> Self {
        let mut grid = TileGrid::new();
        for tile in iter {
            grid.insert(tile);
        }
        grid
    }
}

/// Offset (col, row) of an axial coordinate in odd-row layout
pub fn offset_of(coord: HexCoord) -> (i32, i32) {
    let row = coord.r();
    (coord.q() + row.div_euclid(2), row)
}

/// Axial coordinates of a `width` x `height` odd-row rectangle, row-major
pub fn rectangle_coords(width: u32, height: u32) -> Vec<HexCoord> {
    let mut coords = Vec::with_capacity((width * height) as usize);
    for row in 0..height as i32 {
        for col in 0..width as i32 {
            coords.push(HexCoord::new(col - row.div_euclid(2), row));
        }
    }
    coords
}
