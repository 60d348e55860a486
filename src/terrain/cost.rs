//! Fixed-point movement costs
//!
//! Costs like 1.5 are stored in hundredths so A* and Dijkstra compare exact
//! integers.

use std::fmt;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Movement points, stored as hundredths of a point
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(into = "f64", try_from = "f64")]
pub struct MovePoints(u32);

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0} is not a valid movement cost (must be finite and >= 0)")]
pub struct InvalidPoints(pub f64);

impl MovePoints {
    pub const SCALE: u32 = 100;
    pub const ZERO: MovePoints = MovePoints(0);
    pub const ONE: MovePoints = MovePoints(Self::SCALE);

    pub const fn whole(points: u32) -> Self {
        Self(points * Self::SCALE)
    }

    pub const fn from_hundredths(hundredths: u32) -> Self {
        Self(hundredths)
    }

    pub const fn hundredths(&self) -> u32 {
        self.0
    }

    /// Convert from a decimal value, rounding to the nearest hundredth
    pub fn from_f64(value: f64) -> Result<Self, InvalidPoints> {
        let scaled = (value * f64::from(Self::SCALE)).round();
        if !value.is_finite() || value < 0.0 || scaled > f64::from(u32::MAX) {
            return Err(InvalidPoints(value));
        }
        Ok(Self(scaled as u32))
    }

    pub fn as_f64(&self) -> f64 {
        f64::from(self.0) / f64::from(Self::SCALE)
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    /// `self * factor`, saturating
    pub fn times(self, factor: u32) -> Self {
        Self(self.0.saturating_mul(factor))
    }
}

impl Add for MovePoints {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for MovePoints {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl From<MovePoints> for f64 {
    fn from(points: MovePoints) -> f64 {
        points.as_f64()
    }
}

impl TryFrom<f64> for MovePoints {
    type Error = InvalidPoints;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        MovePoints::from_f64(value)
    }
}

impl fmt::Display for MovePoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / Self::SCALE;
        let frac = self.0 % Self::SCALE;
        if frac == 0 {
            write!(f, "{}", whole)
        } else if frac % 10 == 0 {
            write!(f, "{}.{}", whole, frac / 10)
        } else {
            write!(f, "{}.{:02}", whole, frac)
        }
    }
}

/// Total cost of a path or a step: finite points or unreachable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cost {
    Finite(MovePoints),
    Infinite,
}

impl Cost {
    pub fn is_finite(&self) -> bool {
        matches!(self, Cost::Finite(_))
    }

    pub fn points(&self) -> Option<MovePoints> {
        match self {
            Cost::Finite(points) => Some(*points),
            Cost::Infinite => None,
        }
    }

    /// True when the cost fits within `budget`
    pub fn within(&self, budget: MovePoints) -> bool {
        matches!(self, Cost::Finite(points) if *points <= budget)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cost::Finite(points) => write!(f, "{}", points),
            Cost::Infinite => write!(f, "inf"),
        }
    }
}

/// Result of looking up one (terrain, unit class) pair in the rules table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepCost {
    /// Entering costs this many points
    Enter(MovePoints),
    /// The table says this class may not enter
    Impassable,
    /// The table has no entry for the pair; treated as impassable
    Unlisted,
}

impl StepCost {
    pub fn is_enterable(&self) -> bool {
        matches!(self, StepCost::Enter(_))
    }

    pub fn points(&self) -> Option<MovePoints> {
        match self {
            StepCost::Enter(points) => Some(*points),
            StepCost::Impassable | StepCost::Unlisted => None,
        }
    }

    pub fn as_cost(&self) -> Cost {
        self.points().map_or(Cost::Infinite, Cost::Finite)
    }
}
