//! The map: tiles, units, cities, generation and the state that ties
//! them to the engines

pub mod mapgen;
pub mod state;
pub mod tile;
pub mod units;

pub use mapgen::{find_start_positions, generate, MapGenConfig, MapType};
pub use state::{MapSnapshot, MapState, PlayerFog};
pub use tile::{Occupant, Tile, TileGrid, TileLookup};
pub use units::{City, MovementUnit, Unit};
