//! Cube hex coordinates
//!
//! A coordinate is the triple (q, r, s) with `q + r + s == 0`. The triple is
//! only constructible through checked constructors, so every `HexCoord` in
//! circulation satisfies the invariant.

use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::EngineError;
use crate::hex::direction::HexDirection;

/// Cube hex coordinate
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(try_from = "CubeRepr")]
pub struct HexCoord {
    q: i32,
    r: i32,
    s: i32,
}

/// Wire shape used to validate deserialized coordinates
#[derive(Deserialize)]
struct CubeRepr {
    q: i32,
    r: i32,
    s: i32,
}

impl TryFrom<CubeRepr> for HexCoord {
    type Error = EngineError;

    fn try_from(raw: CubeRepr) -> Result<Self, Self::Error> {
        HexCoord::try_from_cube(raw.q, raw.r, raw.s)
    }
}

impl HexCoord {
    pub const ORIGIN: HexCoord = HexCoord { q: 0, r: 0, s: 0 };

    /// Build from axial (q, r); s is derived
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r, s: -q - r }
    }

    /// Build from all three cube components.
    ///
    /// Panics if the components do not sum to zero.
    pub fn from_cube(q: i32, r: i32, s: i32) -> Self {
        assert!(
            q + r + s == 0,
            "cube coordinate ({}, {}, {}) violates q + r + s == 0",
            q,
            r,
            s
        );
        Self { q, r, s }
    }

    /// Checked variant of `from_cube` for untrusted input
    pub fn try_from_cube(q: i32, r: i32, s: i32) -> Result<Self, EngineError> {
        if q + r + s != 0 {
            return Err(EngineError::InvalidCoordinate { q, r, s });
        }
        Ok(Self { q, r, s })
    }

    pub const fn q(&self) -> i32 {
        self.q
    }

    pub const fn r(&self) -> i32 {
        self.r
    }

    pub const fn s(&self) -> i32 {
        self.s
    }

    /// Hex distance: the largest absolute component difference
    pub fn distance(&self, other: &Self) -> u32 {
        let dq = (self.q - other.q).unsigned_abs();
        let dr = (self.r - other.r).unsigned_abs();
        let ds = (self.s - other.s).unsigned_abs();
        dq.max(dr).max(ds)
    }

    /// The adjacent hex in `direction`
    pub fn neighbor(&self, direction: HexDirection) -> Self {
        *self + direction.offset()
    }

    /// All 6 adjacent hexes, in `HexDirection::ALL` order (clockwise from east)
    pub fn neighbors(&self) -> [HexCoord; 6] {
        HexDirection::ALL.map(|direction| self.neighbor(direction))
    }

    pub fn is_neighbor(&self, other: &Self) -> bool {
        self.distance(other) == 1
    }

    /// Hexes at exactly `radius`, clockwise, starting from the north-west corner.
    ///
    /// `radius == 0` yields just the center.
    pub fn ring(&self, radius: u32) -> Vec<HexCoord> {
        if radius == 0 {
            return vec![*self];
        }

        let steps = radius as i32;
        let mut results = Vec::with_capacity(6 * radius as usize);
        let mut hex = *self + HexDirection::NorthWest.offset() * steps;
        for direction in HexDirection::ALL {
            for _ in 0..steps {
                results.push(hex);
                hex = hex.neighbor(direction);
            }
        }
        results
    }

    /// All hexes within `radius` (inclusive), q-major order
    pub fn range(&self, radius: u32) -> Vec<HexCoord> {
        let n = radius as i32;
        let mut results = Vec::with_capacity(hex_count(radius));
        for dq in -n..=n {
            for dr in (-n).max(-dq - n)..=n.min(-dq + n) {
                results.push(HexCoord::new(self.q + dq, self.r + dr));
            }
        }
        results
    }

    /// Center followed by rings 1..=radius
    pub fn spiral(&self, radius: u32) -> Vec<HexCoord> {
        let mut results = Vec::with_capacity(hex_count(radius));
        for ring in 0..=radius {
            results.extend(self.ring(ring));
        }
        results
    }

    /// Linear interpolation toward `other` in fractional cube space
    pub fn lerp(&self, other: &Self, t: f64) -> FractionalHex {
        let a = FractionalHex::from(*self);
        let b = FractionalHex::from(*other);
        FractionalHex {
            q: a.q + (b.q - a.q) * t,
            r: a.r + (b.r - a.r) * t,
            s: a.s + (b.s - a.s) * t,
        }
    }

    /// Hexes on the line from self to other, both ends included.
    ///
    /// Length is always `distance + 1` and consecutive entries are adjacent.
    pub fn line_to(&self, other: &Self) -> Vec<HexCoord> {
        let n = self.distance(other);
        if n == 0 {
            return vec![*self];
        }

        let mut results = Vec::with_capacity(n as usize + 1);
        for i in 0..=n {
            let t = f64::from(i) / f64::from(n);
            results.push(self.lerp(other, t).round());
        }
        results
    }

    /// Direction of the first step from self toward `other`.
    ///
    /// Ties resolve to the earliest direction in clockwise order.
    pub fn direction_to(&self, other: &Self) -> Option<HexDirection> {
        if self == other {
            return None;
        }
        HexDirection::ALL
            .into_iter()
            .min_by_key(|direction| self.neighbor(*direction).distance(other))
    }
}

/// Number of hexes within `radius` of a center
pub fn hex_count(radius: u32) -> usize {
    let n = radius as usize;
    3 * n * (n + 1) + 1
}

impl Add for HexCoord {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            q: self.q + rhs.q,
            r: self.r + rhs.r,
            s: self.s + rhs.s,
        }
    }
}

impl Sub for HexCoord {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            q: self.q - rhs.q,
            r: self.r - rhs.r,
            s: self.s - rhs.s,
        }
    }
}

impl Mul<i32> for HexCoord {
    type Output = Self;
    fn mul(self, k: i32) -> Self {
        Self {
            q: self.q * k,
            r: self.r * k,
            s: self.s * k,
        }
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.q, self.r, self.s)
    }
}

impl FromStr for HexCoord {
    type Err = EngineError;

    /// Parses `"q,r,s"` (or axial `"q,r"`)
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let parts = input
            .split(',')
            .map(|part| part.trim().parse::<i32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| EngineError::MalformedCoordinate(format!("{}: {}", input, e)))?;

        match parts.as_slice() {
            [q, r] => Ok(HexCoord::new(*q, *r)),
            [q, r, s] => HexCoord::try_from_cube(*q, *r, *s),
            _ => Err(EngineError::MalformedCoordinate(input.to_string())),
        }
    }
}

/// Fractional cube coordinate, produced by interpolation or pixel picking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractionalHex {
    pub q: f64,
    pub r: f64,
    pub s: f64,
}

impl FractionalHex {
    pub fn new(q: f64, r: f64) -> Self {
        Self { q, r, s: -q - r }
    }

    /// Round to the nearest hex.
    ///
    /// The component with the largest rounding error is rebuilt from the
    /// other two, so the result always sums to zero.
    pub fn round(&self) -> HexCoord {
        let mut rq = self.q.round();
        let mut rr = self.r.round();
        let mut rs = self.s.round();

        let q_diff = (rq - self.q).abs();
        let r_diff = (rr - self.r).abs();
        let s_diff = (rs - self.s).abs();

        if q_diff > r_diff && q_diff > s_diff {
            rq = -rr - rs;
        } else if r_diff > s_diff {
            rr = -rq - rs;
        } else {
            rs = -rq - rr;
        }

        HexCoord::from_cube(rq as i32, rr as i32, rs as i32)
    }
}

impl From<HexCoord> for FractionalHex {
    fn from(hex: HexCoord) -> Self {
        Self {
            q: f64::from(hex.q),
            r: f64::from(hex.r),
            s: f64::from(hex.s),
        }
    }
}
