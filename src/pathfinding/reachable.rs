//! Movement range: every hex reachable within a budget

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use ahash::AHashMap;

use crate::hex::HexCoord;
use crate::map::tile::TileLookup;
use crate::pathfinding::astar::Pathfinder;
use crate::terrain::{MovePoints, UnitClass};

impl<'a, L: TileLookup + ?Sized> Pathfinder<'a, L> {
    /// Minimal cost to every hex reachable from `start` within `budget`
    ///
    /// Uniform-cost search. `start` itself is not in the result.
    pub fn reachable_set(
        &self,
        start: HexCoord,
        budget: MovePoints,
        class: UnitClass,
    ) -> BTreeMap<HexCoord, MovePoints> {
        let mut best: AHashMap<HexCoord, MovePoints> = AHashMap::new();
        let mut frontier = BinaryHeap::new();

        best.insert(start, MovePoints::ZERO);
        frontier.push(Reverse((MovePoints::ZERO, start)));

        while let Some(Reverse((cost, coord))) = frontier.pop() {
            if best.get(&coord).is_some_and(|known| cost > *known) {
                continue;
            }

            for neighbor in coord.neighbors() {
                let Some(step) = self.entry_cost(neighbor, class) else {
                    continue;
                };
                let Some(next) = cost.checked_add(step) else {
                    continue;
                };
                if next > budget {
                    continue;
                }
                if best.get(&neighbor).map_or(true, |known| next < *known) {
                    best.insert(neighbor, next);
                    frontier.push(Reverse((next, neighbor)));
                }
            }
        }

        best.remove(&start);
        best.into_iter().collect()
    }

    /// Can `goal` be reached from `start` this turn?
    pub fn possible_in_turn(
        &self,
        start: HexCoord,
        goal: HexCoord,
        budget: MovePoints,
        class: UnitClass,
    ) -> bool {
        start == goal || self.reachable_set(start, budget, class).contains_key(&goal)
    }
}
