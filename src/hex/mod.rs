//! Hex coordinate system (cube coordinates)
//!
//! Pure arithmetic with no knowledge of terrain or game rules.

pub mod coord;
pub mod direction;
pub mod layout;

pub use coord::{hex_count, FractionalHex, HexCoord};
pub use direction::HexDirection;
pub use layout::{Layout, Point};
