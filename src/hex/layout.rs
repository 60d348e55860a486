//! Flat-top hex <-> pixel conversion
//!
//! Minimal affine math so hosts can pick tiles under the cursor.

use serde::{Deserialize, Serialize};

use crate::hex::coord::{FractionalHex, HexCoord};

const SQRT_3: f64 = 1.732_050_807_568_877_2;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Hex size (center to corner) and the pixel position of hex (0,0,0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub size: f64,
    pub origin: Point,
}

impl Layout {
    pub fn new(size: f64, origin: Point) -> Self {
        Self { size, origin }
    }

    /// Center of `hex` in pixels
    pub fn hex_to_pixel(&self, hex: HexCoord) -> Point {
        let q = f64::from(hex.q());
        let r = f64::from(hex.r());
        let x = self.size * (1.5 * q);
        let y = self.size * (SQRT_3 / 2.0 * q + SQRT_3 * r);
        Point::new(x + self.origin.x, y + self.origin.y)
    }

    /// Hex containing `point`
    pub fn pixel_to_hex(&self, point: Point) -> HexCoord {
        let x = point.x - self.origin.x;
        let y = point.y - self.origin.y;
        let q = (2.0 / 3.0 * x) / self.size;
        let r = (-1.0 / 3.0 * x + SQRT_3 / 3.0 * y) / self.size;
        FractionalHex::new(q, r).round()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_maps_to_origin() {
        let layout = Layout::new(10.0, Point::new(100.0, 50.0));
        assert_eq!(layout.hex_to_pixel(HexCoord::ORIGIN), Point::new(100.0, 50.0));
    }

    #[test]
    fn test_pixel_round_trip_on_centers() {
        let layout = Layout::new(24.0, Point::new(5.0, -3.0));
        for hex in HexCoord::ORIGIN.range(4) {
            assert_eq!(layout.pixel_to_hex(layout.hex_to_pixel(hex)), hex);
        }
    }

    #[test]
    fn test_point_near_center_picks_hex() {
        let layout = Layout::new(20.0, Point::default());
        let hex = HexCoord::new(2, -1);
        let center = layout.hex_to_pixel(hex);
        let nudged = Point::new(center.x + 4.0, center.y - 3.0);
        assert_eq!(layout.pixel_to_hex(nudged), hex);
    }
}
