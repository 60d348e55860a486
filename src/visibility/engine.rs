//! Line of sight and fog recomputation
//!
//! A source always sees its own hex and the six around it. Farther hexes
//! need a clear line: no sight-blocking terrain strictly between the
//! source and the target. A blocking hex is itself visible; what lies
//! behind it is not.

use std::collections::VecDeque;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::hex::HexCoord;
use crate::map::tile::TileLookup;
use crate::terrain::TerrainCostModel;
use crate::visibility::fog::FogMap;

/// Something that sees: a unit or a city
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SightSource {
    pub origin: HexCoord,
    pub radius: u32,
}

impl SightSource {
    pub fn new(origin: HexCoord, radius: u32) -> Self {
        Self { origin, radius }
    }
}

/// Is the line from `from` to `to` clear of sight-blocking terrain?
///
/// Both endpoints are ignored. Hexes missing from the lookup do not block.
pub fn line_of_sight<L: TileLookup + ?Sized>(
    from: HexCoord,
    to: HexCoord,
    lookup: &L,
    model: &TerrainCostModel,
) -> bool {
    let line = from.line_to(&to);
    if line.len() <= 2 {
        return true;
    }

    line[1..line.len() - 1].iter().all(|coord| {
        lookup
            .tile(*coord)
            .map_or(true, |tile| !model.blocks_sight(tile.terrain))
    })
}

/// Computes what a player's sources can see
pub struct VisibilityEngine<'a, L: TileLookup + ?Sized> {
    lookup: &'a L,
    model: &'a TerrainCostModel,
}

impl<'a, L: TileLookup + ?Sized> VisibilityEngine<'a, L> {
    pub fn new(lookup: &'a L, model: &'a TerrainCostModel) -> Self {
        Self { lookup, model }
    }

    /// Hexes visible from one source, sorted
    ///
    /// Breadth-first over hexes on the map up to `radius` hops. Empty when
    /// the origin is not on the map.
    pub fn visible_from(&self, source: &SightSource) -> Vec<HexCoord> {
        if !self.lookup.contains(source.origin) {
            return Vec::new();
        }

        let mut discovered: AHashSet<HexCoord> = AHashSet::new();
        let mut queue = VecDeque::new();
        let mut visible = Vec::new();

        discovered.insert(source.origin);
        queue.push_back((source.origin, 0u32));

        while let Some((coord, depth)) = queue.pop_front() {
            if depth <= 1 || line_of_sight(source.origin, coord, self.lookup, self.model) {
                visible.push(coord);
            }

            if depth == source.radius {
                continue;
            }
            for neighbor in coord.neighbors() {
                if !self.lookup.contains(neighbor) || !discovered.insert(neighbor) {
                    continue;
                }
                queue.push_back((neighbor, depth + 1));
            }
        }

        visible.sort();
        visible
    }

    /// Union of what every source sees, sorted and deduplicated
    ///
    /// Sources standing off the map are skipped.
    pub fn visible_set(&self, sources: &[SightSource]) -> Vec<HexCoord> {
        let mut seen: AHashSet<HexCoord> = AHashSet::new();
        for source in sources {
            if !self.lookup.contains(source.origin) {
                tracing::warn!(origin = %source.origin, "sight source is not on the map, skipping");
                continue;
            }
            seen.extend(self.visible_from(source));
        }
        let mut coords: Vec<HexCoord> = seen.into_iter().collect();
        coords.sort();
        coords
    }

    /// New fog state from `previous` and the current sources
    ///
    /// Visible hexes no source covers any more fade to `Explored`;
    /// explored hexes never return to `Unexplored`.
    pub fn recompute(&self, sources: &[SightSource], previous: &FogMap) -> FogMap {
        let mut fog = previous.clone();
        fog.fade_visible();
        for coord in self.visible_set(sources) {
            fog.mark_visible(coord);
        }
        tracing::debug!(
            sources = sources.len(),
            visible = fog.visible_count(),
            explored = fog.explored_count(),
            "visibility recomputed"
        );
        fog
    }
}
