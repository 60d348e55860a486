//! Authoritative map state
//!
//! Owns tiles, units, cities and per-player fog. Commands mutate state
//! and then re-run visibility for the affected players; the engines
//! themselves stay pure and only borrow the grid.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::core::config::EngineConfig;
use crate::core::error::{EngineError, Result};
use crate::core::types::{CityId, PlayerId, Turn, UnitId};
use crate::hex::HexCoord;
use crate::map::tile::{Occupant, Tile, TileGrid};
use crate::map::units::{City, Unit};
use crate::pathfinding::{MovePlan, MovePolicy, Pathfinder};
use crate::terrain::{MovePoints, TerrainCostModel, UnitClass};
use crate::visibility::{FogDiff, FogMap, SightSource, VisibilityEngine, VisibilityState};

/// Serializable view of the whole map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSnapshot {
    pub turn: Turn,
    pub tiles: Vec<Tile>,
    pub units: Vec<Unit>,
    pub cities: Vec<City>,
    pub fog: Vec<PlayerFog>,
}

/// One player's fog inside a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerFog {
    pub player: PlayerId,
    pub fog: FogMap,
}

/// The map and everything on it
#[derive(Debug, Clone)]
pub struct MapState {
    grid: TileGrid,
    rules: TerrainCostModel,
    config: EngineConfig,
    units: BTreeMap<UnitId, Unit>,
    cities: BTreeMap<CityId, City>,
    fog: BTreeMap<PlayerId, FogMap>,
    turn: Turn,
}

impl MapState {
    pub fn new(grid: TileGrid, rules: TerrainCostModel, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            grid,
            rules,
            config,
            units: BTreeMap::new(),
            cities: BTreeMap::new(),
            fog: BTreeMap::new(),
            turn: 1,
        })
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn rules(&self) -> &TerrainCostModel {
        &self.rules
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn tile(&self, coord: HexCoord) -> Option<&Tile> {
        self.grid.get(coord)
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    pub fn units_of(&self, player: PlayerId) -> impl Iterator<Item = &Unit> {
        self.units.values().filter(move |unit| unit.owner == player)
    }

    pub fn city(&self, id: CityId) -> Option<&City> {
        self.cities.get(&id)
    }

    pub fn cities(&self) -> impl Iterator<Item = &City> {
        self.cities.values()
    }

    /// Every player that owns something or has fog state, sorted
    pub fn players(&self) -> Vec<PlayerId> {
        let mut players: BTreeSet<PlayerId> = self.fog.keys().copied().collect();
        players.extend(self.units.values().map(|unit| unit.owner));
        players.extend(self.cities.values().map(|city| city.owner));
        players.into_iter().collect()
    }

    fn unit_or_err(&self, id: UnitId) -> Result<&Unit> {
        self.units.get(&id).ok_or(EngineError::UnitNotFound(id))
    }

    /// Place a new unit with the configured movement and sight
    pub fn spawn_unit(&mut self, owner: PlayerId, class: UnitClass, at: HexCoord) -> Result<UnitId> {
        let tile = self.grid.get(at).ok_or(EngineError::TileNotFound(at))?;
        if !self.rules.can_enter(tile.terrain, class) {
            return Err(EngineError::CannotEnter {
                class,
                terrain: tile.terrain,
            });
        }
        if let Some(occupant) = &tile.occupant {
            let policy = MovePolicy::for_player(owner, &self.config);
            if occupant.owner != owner || policy.blocks(occupant) {
                return Err(EngineError::TileOccupied {
                    coord: at,
                    player: occupant.owner,
                });
            }
        }

        let mut sight = self.config.unit_sight_radius;
        if class == UnitClass::Scout {
            sight += self.config.scout_sight_bonus;
        }
        let unit = Unit::new(owner, class, at, self.config.default_unit_movement, sight);
        let id = unit.id;

        self.occupy(at, owner, id);
        self.units.insert(id, unit);
        tracing::info!(unit = ?id, %owner, ?class, at = %at, "unit spawned");

        self.refresh_visibility(owner);
        Ok(id)
    }

    /// Found a city and claim unowned tiles within the territory radius
    pub fn found_city(
        &mut self,
        owner: PlayerId,
        name: impl Into<String>,
        at: HexCoord,
    ) -> Result<CityId> {
        let tile = self.grid.get(at).ok_or(EngineError::TileNotFound(at))?;
        if !self.rules.can_enter(tile.terrain, UnitClass::Land) {
            return Err(EngineError::CannotEnter {
                class: UnitClass::Land,
                terrain: tile.terrain,
            });
        }
        if let Some(holder) = tile.owner.filter(|holder| *holder != owner) {
            return Err(EngineError::TileOccupied {
                coord: at,
                player: holder,
            });
        }
        if let Some(occupant) = &tile.occupant {
            if occupant.owner != owner || occupant.city.is_some() {
                return Err(EngineError::TileOccupied {
                    coord: at,
                    player: occupant.owner,
                });
            }
        }

        let city = City::new(owner, name, at);
        let id = city.id;

        if let Some(tile) = self.grid.get_mut(at) {
            match &mut tile.occupant {
                Some(occupant) => occupant.city = Some(id),
                None => tile.occupant = Some(Occupant::city(owner, id)),
            }
        }

        let mut claimed = 0usize;
        for coord in at.range(self.config.city_territory_radius) {
            if let Some(tile) = self.grid.get_mut(coord) {
                if tile.owner.is_none() {
                    tile.owner = Some(owner);
                    claimed += 1;
                }
            }
        }

        tracing::info!(city = %city.name, %owner, at = %at, claimed, "city founded");
        self.cities.insert(id, city);
        self.refresh_visibility(owner);
        Ok(id)
    }

    /// Sight sources for `player`: every unit, then every city
    pub fn sight_sources_for(&self, player: PlayerId) -> Vec<SightSource> {
        let units = self
            .units_of(player)
            .map(|unit| SightSource::new(unit.position, unit.sight));
        let cities = self
            .cities
            .values()
            .filter(|city| city.owner == player)
            .map(|city| SightSource::new(city.position, self.config.city_sight_radius));
        units.chain(cities).collect()
    }

    /// Re-run visibility for one player and store the result
    pub fn refresh_visibility(&mut self, player: PlayerId) -> FogDiff {
        let sources = self.sight_sources_for(player);
        let previous = self.fog.get(&player).cloned().unwrap_or_default();
        let fog = VisibilityEngine::new(&self.grid, &self.rules).recompute(&sources, &previous);
        let diff = fog.diff(&previous);
        self.fog.insert(player, fog);
        diff
    }

    pub fn refresh_all_visibility(&mut self) {
        for player in self.players() {
            self.refresh_visibility(player);
        }
    }

    pub fn fog_for(&self, player: PlayerId) -> Option<&FogMap> {
        self.fog.get(&player)
    }

    /// Visibility of every tile on the map for `player`
    pub fn visibility_for(&self, player: PlayerId) -> BTreeMap<HexCoord, VisibilityState> {
        let fog = self.fog.get(&player);
        self.grid
            .coords()
            .into_iter()
            .map(|coord| (coord, fog.map(|f| f.state(coord)).unwrap_or_default()))
            .collect()
    }

    /// Pathfinder applying `player`'s occupancy rules
    pub fn pathfinder_for(&self, player: PlayerId) -> Pathfinder<'_, TileGrid> {
        Pathfinder::new(&self.grid, &self.rules)
            .with_policy(MovePolicy::for_player(player, &self.config))
    }

    pub fn plan_move(&self, unit: UnitId, goal: HexCoord) -> Result<MovePlan> {
        let unit = self.unit_or_err(unit)?;
        Ok(self.pathfinder_for(unit.owner).plan_move(&unit.mover(), goal))
    }

    /// Where `unit` can still go this turn, with the cost of each hex
    pub fn reachable_for(&self, unit: UnitId) -> Result<BTreeMap<HexCoord, MovePoints>> {
        let unit = self.unit_or_err(unit)?;
        Ok(self
            .pathfinder_for(unit.owner)
            .reachable_set(unit.position, unit.movement, unit.class))
    }

    /// Move `unit` to `goal` along the cheapest path
    pub fn move_unit(&mut self, unit_id: UnitId, goal: HexCoord) -> Result<MovePlan> {
        let unit = self.unit_or_err(unit_id)?;
        let (owner, from, available) = (unit.owner, unit.position, unit.movement);

        let plan = self.plan_move(unit_id, goal)?;
        if plan.path.is_empty() {
            return Err(EngineError::Unreachable { from, to: goal });
        }
        if !plan.possible_in_turn {
            return Err(EngineError::InsufficientMovement {
                required: plan.total_cost.points().unwrap_or(MovePoints::ZERO),
                available,
            });
        }
        if goal == from {
            return Ok(plan);
        }
        if let Some(occupant) = self.grid.get(goal).and_then(|t| t.occupant.as_ref()) {
            if occupant.owner != owner {
                return Err(EngineError::TileOccupied {
                    coord: goal,
                    player: occupant.owner,
                });
            }
        }

        self.vacate(from, unit_id);
        self.occupy(goal, owner, unit_id);

        let spent = plan.total_cost.points().unwrap_or(MovePoints::ZERO);
        if let Some(unit) = self.units.get_mut(&unit_id) {
            unit.position = goal;
            unit.movement = unit.movement.saturating_sub(spent);
        }
        tracing::info!(unit = ?unit_id, from = %from, to = %goal, cost = %spent, "unit moved");

        self.refresh_visibility(owner);
        Ok(plan)
    }

    /// Reset movement, advance the turn and re-run visibility for everyone
    pub fn end_turn(&mut self) -> Turn {
        for unit in self.units.values_mut() {
            unit.reset_movement();
        }
        self.turn += 1;
        self.refresh_all_visibility();
        tracing::info!(turn = self.turn, "turn started");
        self.turn
    }

    pub fn snapshot(&self) -> MapSnapshot {
        MapSnapshot {
            turn: self.turn,
            tiles: self.grid.sorted_tiles().into_iter().cloned().collect(),
            units: self.units.values().cloned().collect(),
            cities: self.cities.values().cloned().collect(),
            fog: self
                .fog
                .iter()
                .map(|(player, fog)| PlayerFog {
                    player: *player,
                    fog: fog.clone(),
                })
                .collect(),
        }
    }

    pub fn snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    fn occupy(&mut self, at: HexCoord, owner: PlayerId, unit: UnitId) {
        if let Some(tile) = self.grid.get_mut(at) {
            match &mut tile.occupant {
                Some(occupant) => occupant.units.push(unit),
                None => tile.occupant = Some(Occupant::unit(owner, unit)),
            }
        }
    }

    fn vacate(&mut self, at: HexCoord, unit: UnitId) {
        if let Some(tile) = self.grid.get_mut(at) {
            if let Some(occupant) = &mut tile.occupant {
                occupant.units.retain(|id| *id != unit);
                if occupant.is_empty() {
                    tile.occupant = None;
                }
            }
        }
    }
}
