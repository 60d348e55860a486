//! Seeded map generation
//!
//! Terrain is drawn per tile from a weighted table for the map type,
//! open ocean touching land becomes coast, then a share of the land gets
//! resources. Start positions are picked by score with a minimum spacing.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use ordered_float::OrderedFloat;
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};
use crate::hex::HexCoord;
use crate::map::tile::{offset_of, rectangle_coords, Tile, TileGrid, TileLookup};
use crate::terrain::{ResourceKind, Terrain, TerrainCostModel, UnitClass};

/// Overall land/water layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapType {
    #[default]
    Continental,
    Pangaea,
    Archipelago,
}

impl fmt::Display for MapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MapType::Continental => "continental",
            MapType::Pangaea => "pangaea",
            MapType::Archipelago => "archipelago",
        };
        f.write_str(name)
    }
}

impl FromStr for MapType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "continental" => Ok(MapType::Continental),
            "pangaea" => Ok(MapType::Pangaea),
            "archipelago" => Ok(MapType::Archipelago),
            other => Err(EngineError::InvalidConfig(format!("unknown map type {other:?}"))),
        }
    }
}

/// Parameters for `generate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapGenConfig {
    pub width: u32,
    pub height: u32,
    pub map_type: MapType,
    pub seed: u64,
    /// Fraction of land tiles that receive a resource
    pub resource_share: f64,
}

impl Default for MapGenConfig {
    fn default() -> Self {
        Self {
            width: 24,
            height: 16,
            map_type: MapType::Continental,
            seed: 42,
            resource_share: 0.1,
        }
    }
}

impl MapGenConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::InvalidConfig(format!(
                "map size {}x{} must be non-empty",
                self.width, self.height
            )));
        }
        if !(0.0..=1.0).contains(&self.resource_share) {
            return Err(EngineError::InvalidConfig(format!(
                "resource_share {} must be within 0..=1",
                self.resource_share
            )));
        }
        Ok(())
    }
}

/// Terrain weights (percent) for each map type
pub fn terrain_distribution(map_type: MapType) -> &'static [(Terrain, u32)] {
    match map_type {
        MapType::Continental => &[
            (Terrain::Plains, 30),
            (Terrain::Grassland, 20),
            (Terrain::Hills, 10),
            (Terrain::Forest, 15),
            (Terrain::Mountain, 5),
            (Terrain::Desert, 5),
            (Terrain::Ocean, 15),
        ],
        MapType::Pangaea => &[
            (Terrain::Plains, 35),
            (Terrain::Grassland, 25),
            (Terrain::Hills, 10),
            (Terrain::Forest, 15),
            (Terrain::Mountain, 5),
            (Terrain::Desert, 5),
            (Terrain::Ocean, 5),
        ],
        MapType::Archipelago => &[
            (Terrain::Plains, 20),
            (Terrain::Grassland, 15),
            (Terrain::Hills, 5),
            (Terrain::Forest, 10),
            (Terrain::Mountain, 5),
            (Terrain::Desert, 5),
            (Terrain::Ocean, 40),
        ],
    }
}

/// Resources that can appear on `terrain`
pub fn resources_for(terrain: Terrain) -> &'static [ResourceKind] {
    use ResourceKind::*;
    match terrain {
        Terrain::Plains => &[Horses, Wheat, Cattle],
        Terrain::Grassland => &[Cattle, Sheep, Wheat],
        Terrain::Hills => &[Iron, Gold, Silver, Gems, Marble],
        Terrain::Forest => &[Iron, Horses],
        Terrain::Mountain => &[Iron, Gold, Silver],
        Terrain::Desert => &[Oil, Iron],
        Terrain::Coast => &[Coal, Fish],
        Terrain::Lake => &[Fish],
        _ => &[],
    }
}

/// Most copies of `resource` placed on one map
pub fn resource_cap(resource: ResourceKind) -> u32 {
    match resource {
        ResourceKind::Iron => 5,
        ResourceKind::Horses => 4,
        ResourceKind::Wheat => 6,
        ResourceKind::Cattle => 5,
        ResourceKind::Sheep => 4,
        ResourceKind::Gold => 3,
        ResourceKind::Silver => 3,
        ResourceKind::Gems => 2,
        ResourceKind::Marble => 2,
        ResourceKind::Oil => 3,
        ResourceKind::Coal => 3,
        ResourceKind::Fish => 3,
    }
}

/// Ocean and mountain tiles never hold resources or start positions
fn is_open_land(terrain: Terrain) -> bool {
    !matches!(terrain, Terrain::Ocean | Terrain::Mountain)
}

/// Generate a `width` x `height` odd-row map
pub fn generate(config: &MapGenConfig, rules: &TerrainCostModel) -> Result<TileGrid> {
    config.validate()?;

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let table = terrain_distribution(config.map_type);
    let weights = WeightedIndex::new(table.iter().map(|(_, weight)| *weight))
        .map_err(|e| EngineError::InvalidConfig(e.to_string()))?;

    let mut grid: TileGrid = rectangle_coords(config.width, config.height)
        .into_iter()
        .map(|coord| Tile::new(coord, table[weights.sample(&mut rng)].0))
        .collect();

    shore_up(&mut grid, rules);
    place_resources(&mut grid, config.resource_share, &mut rng);

    tracing::debug!(
        width = config.width,
        height = config.height,
        map_type = %config.map_type,
        seed = config.seed,
        "map generated"
    );
    Ok(grid)
}

/// Ocean next to dry land becomes coast
fn shore_up(grid: &mut TileGrid, rules: &TerrainCostModel) {
    let is_water = |terrain: Terrain| rules.terrain_rule(terrain).is_some_and(|rule| rule.water);

    let shore: Vec<HexCoord> = grid
        .sorted_tiles()
        .into_iter()
        .filter(|tile| tile.terrain == Terrain::Ocean)
        .filter(|tile| {
            tile.coord
                .neighbors()
                .iter()
                .any(|n| grid.tile(*n).is_some_and(|t| !is_water(t.terrain)))
        })
        .map(|tile| tile.coord)
        .collect();

    for coord in shore {
        grid.set_terrain(coord, Terrain::Coast);
    }
}

fn place_resources(grid: &mut TileGrid, share: f64, rng: &mut ChaCha8Rng) {
    let mut land: Vec<HexCoord> = grid
        .sorted_tiles()
        .into_iter()
        .filter(|tile| is_open_land(tile.terrain))
        .map(|tile| tile.coord)
        .collect();

    let target = (land.len() as f64 * share) as usize;
    land.shuffle(rng);

    let mut placed: BTreeMap<ResourceKind, u32> = BTreeMap::new();
    for coord in land.into_iter().take(target) {
        let Some(tile) = grid.get_mut(coord) else {
            continue;
        };
        let available: Vec<ResourceKind> = resources_for(tile.terrain)
            .iter()
            .copied()
            .filter(|r| placed.get(r).copied().unwrap_or(0) < resource_cap(*r))
            .collect();
        if let Some(resource) = available.choose(rng) {
            tile.resource = Some(*resource);
            *placed.entry(*resource).or_insert(0) += 1;
        }
    }
}

/// Middle hex of the grid's offset bounding box and half its larger side
fn grid_center(grid: &TileGrid) -> (HexCoord, f64) {
    let offsets: Vec<(i32, i32)> = grid.coords().into_iter().map(offset_of).collect();
    let (Some(min_col), Some(max_col)) = (
        offsets.iter().map(|(c, _)| *c).min(),
        offsets.iter().map(|(c, _)| *c).max(),
    ) else {
        return (HexCoord::ORIGIN, 1.0);
    };
    let min_row = offsets.iter().map(|(_, r)| *r).min().unwrap_or(0);
    let max_row = offsets.iter().map(|(_, r)| *r).max().unwrap_or(0);

    let col = (min_col + max_col).div_euclid(2);
    let row = (min_row + max_row).div_euclid(2);
    let span = (max_col - min_col + 1).max(max_row - min_row + 1);
    (
        HexCoord::new(col - row.div_euclid(2), row),
        (f64::from(span) / 2.0).max(1.0),
    )
}

/// How good `tile` is as a starting spot; higher is better
///
/// Ocean and mountain score zero. Grassland and plains, a resource and
/// closeness to `center` all add.
pub fn start_position_score(tile: &Tile, center: HexCoord, max_distance: f64) -> f64 {
    if !is_open_land(tile.terrain) {
        return 0.0;
    }

    let mut score = 1.0;
    if matches!(tile.terrain, Terrain::Grassland | Terrain::Plains) {
        score += 0.5;
    }
    if tile.resource.is_some() {
        score += 0.3;
    }
    let distance = f64::from(tile.coord.distance(&center));
    score += (1.0 - distance / max_distance) * 0.3;
    score
}

/// Pick up to `count` start positions at least `min_distance` from `taken`
/// and from each other
///
/// When too few tiles qualify the spacing shrinks one step at a time
/// down to 1. Ties in score go to the smaller coordinate.
pub fn find_start_positions(
    grid: &TileGrid,
    rules: &TerrainCostModel,
    taken: &[HexCoord],
    count: usize,
    min_distance: u32,
) -> Vec<HexCoord> {
    let (center, max_distance) = grid_center(grid);

    let mut candidates: Vec<(OrderedFloat<f64>, HexCoord)> = grid
        .sorted_tiles()
        .into_iter()
        .filter(|tile| is_open_land(tile.terrain))
        .filter(|tile| rules.can_enter(tile.terrain, UnitClass::Land))
        .filter(|tile| tile.occupant.is_none() && !taken.contains(&tile.coord))
        .map(|tile| {
            (
                OrderedFloat(start_position_score(tile, center, max_distance)),
                tile.coord,
            )
        })
        .collect();
    candidates.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

    let mut chosen: Vec<HexCoord> = Vec::new();
    let mut spacing = min_distance.max(1);
    loop {
        for (_, coord) in &candidates {
            if chosen.len() == count {
                break;
            }
            let clear = taken
                .iter()
                .chain(chosen.iter())
                .all(|other| other.distance(coord) >= spacing);
            if clear {
                chosen.push(*coord);
            }
        }

        if chosen.len() >= count || spacing <= 1 {
            break;
        }
        spacing -= 1;
        tracing::debug!(spacing, found = chosen.len(), "relaxing start spacing");
    }

    chosen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(map_type: MapType, seed: u64) -> MapGenConfig {
        MapGenConfig {
            width: 20,
            height: 14,
            map_type,
            seed,
            resource_share: 0.1,
        }
    }

    #[test]
    fn test_same_seed_same_map() {
        let rules = TerrainCostModel::standard();
        let a = generate(&config(MapType::Continental, 7), &rules).unwrap();
        let b = generate(&config(MapType::Continental, 7), &rules).unwrap();
        assert_eq!(a.sorted_tiles(), b.sorted_tiles());
        assert_eq!(a.len(), 20 * 14);
    }

    #[test]
    fn test_archipelago_is_wetter() {
        let rules = TerrainCostModel::standard();
        let water = |grid: &TileGrid| {
            grid.iter()
                .filter(|t| matches!(t.terrain, Terrain::Ocean | Terrain::Coast))
                .count()
        };
        let islands = generate(&config(MapType::Archipelago, 3), &rules).unwrap();
        let pangaea = generate(&config(MapType::Pangaea, 3), &rules).unwrap();
        assert!(water(&islands) > water(&pangaea));
    }

    #[test]
    fn test_resources_respect_terrain_and_caps() {
        let rules = TerrainCostModel::standard();
        let mut cfg = config(MapType::Pangaea, 11);
        cfg.width = 40;
        cfg.height = 30;
        cfg.resource_share = 0.5;
        let grid = generate(&cfg, &rules).unwrap();

        let mut counts = BTreeMap::new();
        for tile in grid.iter() {
            if let Some(resource) = tile.resource {
                assert!(resources_for(tile.terrain).contains(&resource));
                *counts.entry(resource).or_insert(0u32) += 1;
            }
        }
        assert!(!counts.is_empty());
        for (resource, count) in counts {
            assert!(count <= resource_cap(resource), "{resource:?} placed {count} times");
        }
    }

    #[test]
    fn test_coast_borders_land() {
        let rules = TerrainCostModel::standard();
        let grid = generate(&config(MapType::Archipelago, 5), &rules).unwrap();
        for tile in grid.iter().filter(|t| t.terrain == Terrain::Coast) {
            let touches_land = tile.coord.neighbors().iter().any(|n| {
                grid.get(*n)
                    .is_some_and(|t| !matches!(t.terrain, Terrain::Ocean | Terrain::Coast))
            });
            assert!(touches_land, "coast at {} has no land neighbor", tile.coord);
        }
    }

    #[test]
    fn test_invalid_config() {
        let rules = TerrainCostModel::standard();
        let mut cfg = MapGenConfig::default();
        cfg.width = 0;
        assert!(generate(&cfg, &rules).is_err());
        cfg.width = 4;
        cfg.resource_share = 1.5;
        assert!(generate(&cfg, &rules).is_err());
    }

    #[test]
    fn test_map_type_from_str() {
        assert_eq!("Pangaea".parse::<MapType>().unwrap(), MapType::Pangaea);
        assert!("swamp".parse::<MapType>().is_err());
        assert_eq!(MapType::Archipelago.to_string(), "archipelago");
    }

    #[test]
    fn test_score_prefers_center_grassland() {
        let center = HexCoord::ORIGIN;
        let near = Tile::new(HexCoord::new(1, 0), Terrain::Grassland);
        let far = Tile::new(HexCoord::new(6, 0), Terrain::Grassland);
        let hill = Tile::new(HexCoord::new(1, 0), Terrain::Hills);
        let sea = Tile::new(HexCoord::ORIGIN, Terrain::Ocean);

        let score = |t: &Tile| start_position_score(t, center, 6.0);
        assert!(score(&near) > score(&far));
        assert!(score(&near) > score(&hill));
        assert_eq!(score(&sea), 0.0);
    }

    #[test]
    fn test_start_positions_spaced() {
        let rules = TerrainCostModel::standard();
        let grid = TileGrid::rectangle(20, 20, Terrain::Plains);
        let starts = find_start_positions(&grid, &rules, &[], 4, 6);
        assert_eq!(starts.len(), 4);
        for (i, a) in starts.iter().enumerate() {
            for b in &starts[i + 1..] {
                assert!(a.distance(b) >= 6);
            }
        }
    }

    #[test]
    fn test_start_positions_relax_spacing() {
        let rules = TerrainCostModel::standard();
        let grid = TileGrid::hexagon(1, Terrain::Plains);
        let starts = find_start_positions(&grid, &rules, &[HexCoord::ORIGIN], 3, 5);
        assert_eq!(starts.len(), 3);
        assert!(!starts.contains(&HexCoord::ORIGIN));
    }

    #[test]
    fn test_start_positions_skip_water_and_mountains() {
        let rules = TerrainCostModel::standard();
        let mut grid = TileGrid::hexagon(2, Terrain::Ocean);
        grid.set_terrain(HexCoord::new(2, 0), Terrain::Desert);
        grid.set_terrain(HexCoord::new(-2, 0), Terrain::Mountain);
        let starts = find_start_positions(&grid, &rules, &[], 3, 2);
        assert_eq!(starts, vec![HexCoord::new(2, 0)]);
    }
}
