//! Terrain cost model
//!
//! Maps (terrain, unit class) to a step cost and terrain to sight blocking.
//! Resolution order for a pair:
//!
//! 1. terrain or class missing from the table -> `Unlisted`
//! 2. sparse `(class, terrain)` override, if any
//! 3. class domain gate (land classes stay off water and vice versa)
//! 4. class flat cost (e.g. flying), if any
//! 5. base terrain cost

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::terrain::cost::{Cost, MovePoints, StepCost};
use crate::terrain::kinds::{Domain, Terrain, UnitClass};

/// Entry cost as written in a rules table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCost {
    Points(MovePoints),
    Impassable,
}

impl From<RuleCost> for StepCost {
    fn from(cost: RuleCost) -> Self {
        match cost {
            RuleCost::Points(points) => StepCost::Enter(points),
            RuleCost::Impassable => StepCost::Impassable,
        }
    }
}

/// Base rule for one terrain kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainRule {
    pub cost: RuleCost,
    pub blocks_sight: bool,
    pub water: bool,
}

impl TerrainRule {
    pub fn new(cost: RuleCost) -> Self {
        Self {
            cost,
            blocks_sight: false,
            water: false,
        }
    }

    pub fn blocking_sight(mut self) -> Self {
        self.blocks_sight = true;
        self
    }

    pub fn water(mut self) -> Self {
        self.water = true;
        self
    }
}

/// Rule for one unit class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassRule {
    pub domain: Domain,
    /// Ignore terrain cost and pay this for every enterable tile
    pub flat_cost: Option<MovePoints>,
}

impl ClassRule {
    pub fn new(domain: Domain) -> Self {
        Self {
            domain,
            flat_cost: None,
        }
    }

    pub fn with_flat_cost(mut self, cost: MovePoints) -> Self {
        self.flat_cost = Some(cost);
        self
    }
}

/// The terrain/unit rules table
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TerrainCostModel {
    terrain: AHashMap<Terrain, TerrainRule>,
    classes: AHashMap<UnitClass, ClassRule>,
    overrides: AHashMap<(UnitClass, Terrain), RuleCost>,
}

impl TerrainCostModel {
    /// An empty table: every pair is `Unlisted`
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in rules
    pub fn standard() -> Self {
        let one = RuleCost::Points(MovePoints::ONE);
        let two = RuleCost::Points(MovePoints::whole(2));
        let three = RuleCost::Points(MovePoints::whole(3));

        let mut model = Self::new();

        for terrain in [Terrain::Plains, Terrain::Grassland, Terrain::Desert, Terrain::Tundra] {
            model.set_terrain(terrain, TerrainRule::new(one));
        }
        model.set_terrain(Terrain::Snow, TerrainRule::new(two));
        model.set_terrain(Terrain::River, TerrainRule::new(two));
        model.set_terrain(Terrain::Marsh, TerrainRule::new(three));
        for terrain in [Terrain::Hills, Terrain::Forest, Terrain::Jungle] {
            model.set_terrain(terrain, TerrainRule::new(two).blocking_sight());
        }
        model.set_terrain(
            Terrain::Mountain,
            TerrainRule::new(RuleCost::Impassable).blocking_sight(),
        );
        for terrain in [Terrain::Ocean, Terrain::Coast, Terrain::Lake] {
            model.set_terrain(terrain, TerrainRule::new(RuleCost::Impassable).water());
        }

        model.set_class(UnitClass::Land, ClassRule::new(Domain::Land));
        model.set_class(UnitClass::Scout, ClassRule::new(Domain::Land));
        model.set_class(UnitClass::Heavy, ClassRule::new(Domain::Land));
        model.set_class(UnitClass::Naval, ClassRule::new(Domain::Water));
        model.set_class(UnitClass::Amphibious, ClassRule::new(Domain::Any));
        model.set_class(
            UnitClass::Flying,
            ClassRule::new(Domain::Any).with_flat_cost(MovePoints::ONE),
        );

        for terrain in [Terrain::Forest, Terrain::Jungle] {
            model.set_override(UnitClass::Scout, terrain, one);
            model.set_override(UnitClass::Heavy, terrain, three);
        }
        for terrain in [Terrain::Ocean, Terrain::Coast, Terrain::Lake] {
            model.set_override(UnitClass::Naval, terrain, one);
        }
        model.set_override(UnitClass::Amphibious, Terrain::Coast, one);
        model.set_override(UnitClass::Amphibious, Terrain::Lake, one);
        model.set_override(UnitClass::Amphibious, Terrain::Ocean, two);

        model
    }

    pub fn set_terrain(&mut self, terrain: Terrain, rule: TerrainRule) {
        self.terrain.insert(terrain, rule);
    }

    pub fn set_class(&mut self, class: UnitClass, rule: ClassRule) {
        self.classes.insert(class, rule);
    }

    /// Returns the previous override for the pair, if any
    pub fn set_override(
        &mut self,
        class: UnitClass,
        terrain: Terrain,
        cost: RuleCost,
    ) -> Option<RuleCost> {
        self.overrides.insert((class, terrain), cost)
    }

    pub fn terrain_rule(&self, terrain: Terrain) -> Option<&TerrainRule> {
        self.terrain.get(&terrain)
    }

    pub fn class_rule(&self, class: UnitClass) -> Option<&ClassRule> {
        self.classes.get(&class)
    }

    pub fn override_for(&self, class: UnitClass, terrain: Terrain) -> Option<RuleCost> {
        self.overrides.get(&(class, terrain)).copied()
    }

    /// Full lookup for a pair, distinguishing "impassable" from "missing"
    pub fn step_cost(&self, terrain: Terrain, class: UnitClass) -> StepCost {
        let (Some(rule), Some(class_rule)) = (self.terrain.get(&terrain), self.classes.get(&class))
        else {
            return StepCost::Unlisted;
        };

        if let Some(cost) = self.overrides.get(&(class, terrain)) {
            return (*cost).into();
        }

        if !class_rule.domain.admits(rule.water) {
            return StepCost::Impassable;
        }

        if let Some(flat) = class_rule.flat_cost {
            return StepCost::Enter(flat);
        }

        rule.cost.into()
    }

    /// Can a unit of `class` stand on `terrain`?
    pub fn can_enter(&self, terrain: Terrain, class: UnitClass) -> bool {
        self.step_cost(terrain, class).is_enterable()
    }

    /// Cost of entering `terrain`; `Infinite` when it cannot be entered
    pub fn movement_cost(&self, terrain: Terrain, class: UnitClass) -> Cost {
        self.step_cost(terrain, class).as_cost()
    }

    /// Does `terrain` block line of sight? Unlisted terrain does not.
    pub fn blocks_sight(&self, terrain: Terrain) -> bool {
        self.terrain.get(&terrain).is_some_and(|rule| rule.blocks_sight)
    }

    /// Cheapest enterable step for `class`, used to keep A*'s heuristic admissible.
    ///
    /// Falls back to one point when the class can enter nothing.
    pub fn min_step_cost(&self, class: UnitClass) -> MovePoints {
        Terrain::ALL
            .iter()
            .filter_map(|terrain| self.step_cost(*terrain, class).points())
            .min()
            .unwrap_or(MovePoints::ONE)
    }

    /// Every (class, terrain) pair the table does not cover, sorted
    pub fn gaps(&self) -> Vec<(UnitClass, Terrain)> {
        let mut gaps = Vec::new();
        for class in UnitClass::ALL {
            for terrain in Terrain::ALL {
                if self.step_cost(terrain, class) == StepCost::Unlisted {
                    gaps.push((class, terrain));
                }
            }
        }
        gaps
    }

    /// Overrides as a sorted list, for stable exports
    pub fn overrides(&self) -> Vec<(UnitClass, Terrain, RuleCost)> {
        let mut list: Vec<_> = self
            .overrides
            .iter()
            .map(|((class, terrain), cost)| (*class, *terrain, *cost))
            .collect();
        list.sort_by_key(|(class, terrain, _)| (*class, *terrain));
        list
    }
}
