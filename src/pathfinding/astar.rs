//! A* pathfinding over hex tiles
//!
//! Respects the terrain rules table and the occupancy policy. Costs are
//! exact fixed-point sums, and equal f-scores pop in insertion order so the
//! result never depends on hash iteration.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::hex::HexCoord;
use crate::map::tile::TileLookup;
use crate::map::units::MovementUnit;
use crate::pathfinding::policy::MovePolicy;
use crate::terrain::{Cost, MovePoints, TerrainCostModel, UnitClass};

/// Ordered hexes from start to goal inclusive, with the cost of entering
/// every hex after the first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    steps: Vec<HexCoord>,
    cost: Cost,
}

impl Path {
    /// The "no path" result: no steps, infinite cost
    pub fn unreachable() -> Self {
        Self {
            steps: Vec::new(),
            cost: Cost::Infinite,
        }
    }

    pub fn steps(&self) -> &[HexCoord] {
        &self.steps
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn destination(&self) -> Option<HexCoord> {
        self.steps.last().copied()
    }

    pub fn into_steps(self) -> Vec<HexCoord> {
        self.steps
    }
}

/// A proposed move for one unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovePlan {
    pub path: Path,
    pub total_cost: Cost,
    /// True when the whole path fits in the unit's remaining budget
    pub possible_in_turn: bool,
}

/// Node in the A* open set
#[derive(Debug, Clone, Copy)]
struct OpenNode {
    coord: HexCoord,
    g_cost: MovePoints,
    f_cost: MovePoints,
    seq: u64,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap; earlier insertion wins ties
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Path and range queries over a tile lookup
///
/// Holds only borrowed inputs; every query is a pure function of them.
pub struct Pathfinder<'a, L: TileLookup + ?Sized> {
    pub(crate) lookup: &'a L,
    pub(crate) model: &'a TerrainCostModel,
    pub(crate) policy: MovePolicy,
}

impl<'a, L: TileLookup + ?Sized> Pathfinder<'a, L> {
    /// Terrain-only pathfinder; occupants are ignored until a policy is set
    pub fn new(lookup: &'a L, model: &'a TerrainCostModel) -> Self {
        Self {
            lookup,
            model,
            policy: MovePolicy::ignoring_occupants(),
        }
    }

    pub fn with_policy(mut self, policy: MovePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &MovePolicy {
        &self.policy
    }

    /// Cost for `class` to enter `coord`, or `None` if it may not
    ///
    /// Missing tiles, impassable or unlisted terrain and blocking
    /// occupants all refuse entry.
    pub fn entry_cost(&self, coord: HexCoord, class: UnitClass) -> Option<MovePoints> {
        let tile = self.lookup.tile(coord)?;
        if let Some(occupant) = &tile.occupant {
            if self.policy.blocks(occupant) {
                return None;
            }
        }
        self.model.step_cost(tile.terrain, class).points()
    }

    /// Cheapest path from `start` to `goal`
    ///
    /// Returns `Path::unreachable()` when the goal cannot be reached.
    pub fn find_path(&self, start: HexCoord, goal: HexCoord, class: UnitClass) -> Path {
        if start == goal {
            return Path {
                steps: vec![start],
                cost: Cost::Finite(MovePoints::ZERO),
            };
        }

        if self.entry_cost(goal, class).is_none() {
            return Path::unreachable();
        }

        let step_floor = self.model.min_step_cost(class);
        let heuristic = |coord: HexCoord| step_floor.times(coord.distance(&goal));

        let mut open_set = BinaryHeap::new();
        let mut came_from: AHashMap<HexCoord, HexCoord> = AHashMap::new();
        let mut g_scores: AHashMap<HexCoord, MovePoints> = AHashMap::new();
        let mut closed: AHashSet<HexCoord> = AHashSet::new();
        let mut seq = 0u64;

        g_scores.insert(start, MovePoints::ZERO);
        open_set.push(OpenNode {
            coord: start,
            g_cost: MovePoints::ZERO,
            f_cost: heuristic(start),
            seq,
        });

        while let Some(current) = open_set.pop() {
            if current.coord == goal {
                return Path {
                    steps: reconstruct_path(&came_from, goal),
                    cost: Cost::Finite(current.g_cost),
                };
            }

            // Stale entry left behind by a later improvement
            if !closed.insert(current.coord) {
                continue;
            }

            for neighbor in current.coord.neighbors() {
                if closed.contains(&neighbor) {
                    continue;
                }
                let Some(step) = self.entry_cost(neighbor, class) else {
                    continue;
                };

                let tentative_g = current.g_cost + step;
                let improves = g_scores
                    .get(&neighbor)
                    .map_or(true, |known| tentative_g < *known);

                if improves {
                    came_from.insert(neighbor, current.coord);
                    g_scores.insert(neighbor, tentative_g);
                    seq += 1;
                    open_set.push(OpenNode {
                        coord: neighbor,
                        g_cost: tentative_g,
                        f_cost: tentative_g + heuristic(neighbor),
                        seq,
                    });
                }
            }
        }

        Path::unreachable()
    }

    /// Re-price an arbitrary sequence of hexes
    ///
    /// The first hex is free. Returns `Infinite` for an empty sequence, a
    /// gap between non-adjacent hexes or any hex that cannot be entered.
    pub fn path_cost(&self, path: &[HexCoord], class: UnitClass) -> Cost {
        if path.is_empty() {
            return Cost::Infinite;
        }

        let mut total = MovePoints::ZERO;
        for pair in path.windows(2) {
            if !pair[0].is_neighbor(&pair[1]) {
                return Cost::Infinite;
            }
            match self.entry_cost(pair[1], class) {
                Some(step) => total += step,
                None => return Cost::Infinite,
            }
        }
        Cost::Finite(total)
    }

    /// Best path for `unit` to `goal`, and whether it fits this turn
    pub fn plan_move(&self, unit: &MovementUnit, goal: HexCoord) -> MovePlan {
        let path = self.find_path(unit.coord, goal, unit.unit_class);
        let total_cost = path.cost();
        MovePlan {
            possible_in_turn: total_cost.within(unit.budget),
            total_cost,
            path,
        }
    }
}

/// Walk `came_from` back from `goal`
fn reconstruct_path(came_from: &AHashMap<HexCoord, HexCoord>, goal: HexCoord) -> Vec<HexCoord> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}
