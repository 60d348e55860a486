//! Load terrain rules from TOML
//!
//! ```toml
//! [terrain.forest]
//! cost = 2
//! blocks_sight = true
//!
//! [terrain.ocean]
//! cost = "impassable"
//! water = true
//!
//! [class.flying]
//! domain = "any"
//! flat_cost = 1
//!
//! [[override]]
//! unit = "scout"
//! terrain = "forest"
//! cost = 1
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::de::value::{Error as ValueError, StrDeserializer};
use serde::de::{DeserializeOwned, IntoDeserializer};
use serde::Deserialize;
use thiserror::Error;

use crate::terrain::cost::MovePoints;
use crate::terrain::kinds::{Domain, Terrain, UnitClass};
use crate::terrain::model::{ClassRule, RuleCost, TerrainCostModel, TerrainRule};

/// Errors from loading a rules table
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("TOML parse error: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("{context}: {value} is not a valid cost")]
    InvalidCost { context: String, value: f64 },

    #[error("{context}: unknown cost keyword {keyword:?} (expected \"impassable\")")]
    UnknownKeyword { context: String, keyword: String },

    #[error("Unknown {kind} name {name:?}")]
    UnknownName { kind: &'static str, name: String },

    #[error("Duplicate override for {unit:?} on {terrain:?}")]
    DuplicateOverride { unit: UnitClass, terrain: Terrain },
}

/// TOML representation of a rules file
#[derive(Debug, Deserialize)]
struct RulesFile {
    #[serde(default)]
    terrain: BTreeMap<String, TomlTerrain>,
    #[serde(default)]
    class: BTreeMap<String, TomlClass>,
    #[serde(default, rename = "override")]
    overrides: Vec<TomlOverride>,
}

#[derive(Debug, Deserialize)]
struct TomlTerrain {
    cost: TomlCost,
    #[serde(default)]
    blocks_sight: bool,
    #[serde(default)]
    water: bool,
}

#[derive(Debug, Deserialize)]
struct TomlClass {
    #[serde(default)]
    domain: Domain,
    flat_cost: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TomlOverride {
    unit: UnitClass,
    terrain: Terrain,
    cost: TomlCost,
}

/// A number of points or a keyword
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TomlCost {
    Points(f64),
    Keyword(String),
}

impl TomlCost {
    fn into_rule_cost(self, context: &str) -> Result<RuleCost, RulesError> {
        match self {
            TomlCost::Points(value) => Ok(RuleCost::Points(points(value, context)?)),
            TomlCost::Keyword(keyword) if keyword.eq_ignore_ascii_case("impassable") => {
                Ok(RuleCost::Impassable)
            }
            TomlCost::Keyword(keyword) => Err(RulesError::UnknownKeyword {
                context: context.to_string(),
                keyword,
            }),
        }
    }
}

/// Resolve a table key like `forest` to its enum variant
fn parse_name<T: DeserializeOwned>(name: &str, kind: &'static str) -> Result<T, RulesError> {
    let deserializer: StrDeserializer<'_, ValueError> = name.into_deserializer();
    T::deserialize(deserializer).map_err(|_| RulesError::UnknownName {
        kind,
        name: name.to_string(),
    })
}

fn points(value: f64, context: &str) -> Result<MovePoints, RulesError> {
    MovePoints::from_f64(value).map_err(|_| RulesError::InvalidCost {
        context: context.to_string(),
        value,
    })
}

impl TerrainCostModel {
    /// Load a rules table from a TOML file
    pub fn load_file(path: &Path) -> Result<Self, RulesError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a rules table from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, RulesError> {
        let file: RulesFile = toml::from_str(content)?;
        let mut model = TerrainCostModel::new();

        for (name, entry) in file.terrain {
            let terrain: Terrain = parse_name(&name, "terrain")?;
            let context = format!("terrain.{:?}", terrain);
            let rule = TerrainRule {
                cost: entry.cost.into_rule_cost(&context)?,
                blocks_sight: entry.blocks_sight,
                water: entry.water,
            };
            model.set_terrain(terrain, rule);
        }

        for (name, entry) in file.class {
            let class: UnitClass = parse_name(&name, "unit class")?;
            let context = format!("class.{:?}", class);
            let mut rule = ClassRule::new(entry.domain);
            if let Some(flat) = entry.flat_cost {
                rule = rule.with_flat_cost(points(flat, &context)?);
            }
            model.set_class(class, rule);
        }

        for entry in file.overrides {
            let context = format!("override {:?}/{:?}", entry.unit, entry.terrain);
            let cost = entry.cost.into_rule_cost(&context)?;
            if model.set_override(entry.unit, entry.terrain, cost).is_some() {
                return Err(RulesError::DuplicateOverride {
                    unit: entry.unit,
                    terrain: entry.terrain,
                });
            }
        }

        let gaps = model.gaps();
        if !gaps.is_empty() {
            tracing::warn!(count = gaps.len(), "terrain rules leave pairs unlisted");
        }

        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::cost::{Cost, StepCost};

    const SHIPPED_RULES: &str = include_str!("../../data/terrain_rules.toml");

    #[test]
    fn test_shipped_rules_match_standard() {
        let loaded = TerrainCostModel::from_toml_str(SHIPPED_RULES).unwrap();
        assert_eq!(loaded, TerrainCostModel::standard());
    }

    #[test]
    fn test_fractional_cost() {
        let content = r#"
            [terrain.marsh]
            cost = 1.5

            [class.land]
            domain = "land"
        "#;
        let model = TerrainCostModel::from_toml_str(content).unwrap();
        assert_eq!(
            model.movement_cost(Terrain::Marsh, UnitClass::Land),
            Cost::Finite(MovePoints::from_hundredths(150))
        );
        assert_eq!(model.step_cost(Terrain::Plains, UnitClass::Land), StepCost::Unlisted);
    }

    #[test]
    fn test_unknown_keyword() {
        let content = r#"
            [terrain.plains]
            cost = "cheap"
        "#;
        let err = TerrainCostModel::from_toml_str(content).unwrap_err();
        assert!(matches!(err, RulesError::UnknownKeyword { .. }));
    }

    #[test]
    fn test_negative_cost_rejected() {
        let content = r#"
            [terrain.plains]
            cost = -1
        "#;
        let err = TerrainCostModel::from_toml_str(content).unwrap_err();
        assert!(matches!(err, RulesError::InvalidCost { .. }));
    }

    #[test]
    fn test_duplicate_override_rejected() {
        let content = r#"
            [[override]]
            unit = "scout"
            terrain = "forest"
            cost = 1

            [[override]]
            unit = "scout"
            terrain = "forest"
            cost = 2
        "#;
        let err = TerrainCostModel::from_toml_str(content).unwrap_err();
        assert!(matches!(
            err,
            RulesError::DuplicateOverride {
                unit: UnitClass::Scout,
                terrain: Terrain::Forest
            }
        ));
    }

    #[test]
    fn test_unknown_terrain_name() {
        let content = r#"
            [terrain.lava]
            cost = 1
        "#;
        let err = TerrainCostModel::from_toml_str(content).unwrap_err();
        assert!(matches!(err, RulesError::UnknownName { kind: "terrain", .. }));
    }

    #[test]
    fn test_unknown_override_unit_is_parse_error() {
        let content = r#"
            [[override]]
            unit = "dragon"
            terrain = "forest"
            cost = 1
        "#;
        let err = TerrainCostModel::from_toml_str(content).unwrap_err();
        assert!(matches!(err, RulesError::ParseError(_)));
    }
}
