//! Per-player fog of war state
//!
//! A tile never seen is `Unexplored`; once seen it is at least `Explored`
//! forever after.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::hex::HexCoord;

/// Visibility state for a hex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityState {
    /// Never seen
    #[default]
    Unexplored,
    /// Seen before, not currently
    Explored,
    /// Seen right now
    Visible,
}

impl VisibilityState {
    /// `Visible` counts as explored
    pub fn is_explored(&self) -> bool {
        !matches!(self, VisibilityState::Unexplored)
    }
}

/// One exported fog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FogEntry {
    pub coord: HexCoord,
    pub state: VisibilityState,
}

/// Fog of war for one player
///
/// Coordinates not stored are `Unexplored`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<FogEntry>", into = "Vec<FogEntry>")]
pub struct FogMap {
    states: AHashMap<HexCoord, VisibilityState>,
}

/// What changed between two fog maps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FogDiff {
    /// Visible now, not visible before
    pub revealed: Vec<HexCoord>,
    /// Visible before, not visible now
    pub hidden: Vec<HexCoord>,
}

impl FogDiff {
    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty() && self.hidden.is_empty()
    }
}

impl FogMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, coord: HexCoord) -> VisibilityState {
        self.states.get(&coord).copied().unwrap_or_default()
    }

    pub fn is_visible(&self, coord: HexCoord) -> bool {
        self.state(coord) == VisibilityState::Visible
    }

    pub fn is_explored(&self, coord: HexCoord) -> bool {
        self.state(coord).is_explored()
    }

    /// Mark the starting footprint of a player's sources as visible
    pub fn reveal_footprint(&mut self, coords: impl IntoIterator<Item = HexCoord>) {
        for coord in coords {
            self.mark_visible(coord);
        }
    }

    pub(crate) fn mark_visible(&mut self, coord: HexCoord) {
        self.states.insert(coord, VisibilityState::Visible);
    }

    /// Turn every `Visible` tile into `Explored`
    pub(crate) fn fade_visible(&mut self) {
        for state in self.states.values_mut() {
            if *state == VisibilityState::Visible {
                *state = VisibilityState::Explored;
            }
        }
    }

    /// Currently visible coordinates, sorted
    pub fn visible_sorted(&self) -> Vec<HexCoord> {
        self.sorted_where(|state| state == VisibilityState::Visible)
    }

    /// Explored coordinates (visible included), sorted
    pub fn explored_sorted(&self) -> Vec<HexCoord> {
        self.sorted_where(|state| state.is_explored())
    }

    pub fn visible_count(&self) -> usize {
        self.states
            .values()
            .filter(|state| **state == VisibilityState::Visible)
            .count()
    }

    pub fn explored_count(&self) -> usize {
        self.states.values().filter(|state| state.is_explored()).count()
    }

    /// Changes from `previous` to `self`
    pub fn diff(&self, previous: &FogMap) -> FogDiff {
        let revealed = self.sorted_where_coord(|coord, state| {
            state == VisibilityState::Visible && !previous.is_visible(coord)
        });
        let hidden = previous.sorted_where_coord(|coord, state| {
            state == VisibilityState::Visible && !self.is_visible(coord)
        });
        FogDiff { revealed, hidden }
    }

    /// Every stored entry, sorted by coordinate
    pub fn to_sorted(&self) -> Vec<FogEntry> {
        let mut entries: Vec<FogEntry> = self
            .states
            .iter()
            .map(|(coord, state)| FogEntry {
                coord: *coord,
                state: *state,
            })
            .collect();
        entries.sort_by_key(|entry| entry.coord);
        entries
    }

    fn sorted_where(&self, keep: impl Fn(VisibilityState) -> bool) -> Vec<HexCoord> {
        self.sorted_where_coord(|_, state| keep(state))
    }

    fn sorted_where_coord(&self, keep: impl Fn(HexCoord, VisibilityState) -> bool) -> Vec<HexCoord> {
        let mut coords: Vec<HexCoord> = self
            .states
            .iter()
            .filter(|(coord, state)| keep(**coord, **state))
            .map(|(coord, _)| *coord)
            .collect();
        coords.sort();
        coords
    }
}

impl From<Vec<FogEntry>> for FogMap {
    fn from(entries: Vec<FogEntry>) -> Self {
        let states = entries
            .into_iter()
            .filter(|entry| entry.state != VisibilityState::Unexplored)
            .map(|entry| (entry.coord, entry.state))
            .collect();
        Self { states }
    }
}

impl From<FogMap> for Vec<FogEntry> {
    fn from(fog: FogMap) -> Self {
        fog.to_sorted()
    }
}
