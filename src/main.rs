//! Hex Realm - headless demo
//!
//! Generates a seeded map, places a capital, a settler and a scout for each
//! player, then walks the scouts outward for a number of turns and prints
//! the first player's fog of war.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hex_realm::core::types::PlayerId;
use hex_realm::map::{find_start_positions, generate, MapGenConfig, MapState, MapType};
use hex_realm::{EngineConfig, HexCoord, Result, TerrainCostModel, UnitClass, VisibilityState};

/// Generate a hex map and run a few turns of scouting
#[derive(Parser, Debug)]
#[command(name = "hex-realm")]
#[command(about = "Generate a hex map and print fog of war after a few scouting turns")]
struct Args {
    /// Map width in hexes
    #[arg(long, default_value_t = 32)]
    width: u32,

    /// Map height in hexes
    #[arg(long, default_value_t = 20)]
    height: u32,

    /// continental, pangaea or archipelago
    #[arg(long, default_value = "continental")]
    map_type: MapType,

    /// Random seed for deterministic maps
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of players
    #[arg(long, default_value_t = 2)]
    players: usize,

    /// Turns to simulate
    #[arg(long, default_value_t = 5)]
    turns: u32,

    /// Terrain rules TOML (defaults to the built-in table)
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Engine config TOML
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the final snapshot as JSON instead of a map
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hex_realm=info")),
        )
        .init();

    let args = Args::parse();

    let rules = match &args.rules {
        Some(path) => TerrainCostModel::load_file(path)?,
        None => TerrainCostModel::standard(),
    };
    let config = match &args.config {
        Some(path) => EngineConfig::load_file(path)?,
        None => EngineConfig::default(),
    };

    let gen = MapGenConfig {
        width: args.width,
        height: args.height,
        map_type: args.map_type,
        seed: args.seed,
        ..MapGenConfig::default()
    };
    let grid = generate(&gen, &rules)?;
    let min_distance = args.width.max(args.height) / 3;
    let starts = find_start_positions(&grid, &rules, &[], args.players, min_distance);
    if starts.len() < args.players {
        tracing::warn!(
            wanted = args.players,
            found = starts.len(),
            "not enough start positions"
        );
    }

    let mut state = MapState::new(grid, rules, config)?;
    let mut scouts = Vec::new();
    for (index, start) in starts.iter().enumerate() {
        let player = PlayerId::new(index as u32 + 1);
        state.found_city(player, format!("Capital {}", index + 1), *start)?;
        state.spawn_unit(player, UnitClass::Land, *start)?;

        let scout_spot = start
            .neighbors()
            .into_iter()
            .find(|n| state.spawn_unit(player, UnitClass::Scout, *n).is_ok());
        match scout_spot {
            Some(_) => scouts.push((player, *start)),
            None => tracing::warn!(%player, "no room for a scout next to the capital"),
        }
    }

    for _ in 0..args.turns {
        for (player, home) in &scouts {
            let ids: Vec<_> = state
                .units_of(*player)
                .filter(|u| u.class == UnitClass::Scout)
                .map(|u| u.id)
                .collect();
            for id in ids {
                let reach = state.reachable_for(id)?;
                // Farthest reachable hex from home, smallest coordinate on ties
                let target = reach
                    .keys()
                    .copied()
                    .max_by_key(|c| (c.distance(home), std::cmp::Reverse(*c)));
                if let Some(target) = target {
                    if let Err(err) = state.move_unit(id, target) {
                        tracing::debug!(%err, "scout stayed put");
                    }
                }
            }
        }
        state.end_turn();
    }

    if args.json {
        println!("{}", state.snapshot_json()?);
        return Ok(());
    }

    let viewer = PlayerId::new(1);
    println!("Turn {} - fog of war for {}", state.turn(), viewer);
    println!("{}", render_fog(&state, viewer, args.width, args.height));
    if let Some(fog) = state.fog_for(viewer) {
        println!(
            "visible: {}  explored: {}  tiles: {}",
            fog.visible_count(),
            fog.explored_count(),
            state.grid().len()
        );
    }
    Ok(())
}

/// ASCII map: blank for unexplored, terrain for explored, markers for
/// visible cities and units
fn render_fog(state: &MapState, player: PlayerId, width: u32, height: u32) -> String {
    let visibility = state.visibility_for(player);
    let mut out = String::new();
    for row in 0..height as i32 {
        if row % 2 == 1 {
            out.push(' ');
        }
        for col in 0..width as i32 {
            let coord = HexCoord::new(col - row.div_euclid(2), row);
            let glyph = match (state.tile(coord), visibility.get(&coord)) {
                (Some(tile), Some(VisibilityState::Visible)) => match &tile.occupant {
                    Some(occ) if occ.city.is_some() => '@',
                    Some(occ) if occ.owner == player => 'U',
                    Some(_) => 'E',
                    None => tile.terrain.glyph(),
                },
                (Some(tile), Some(VisibilityState::Explored)) => tile.terrain.glyph(),
                _ => ' ',
            };
            out.push(glyph);
            out.push(' ');
        }
        out.push('\n');
    }
    out
}
