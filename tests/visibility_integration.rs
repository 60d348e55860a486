//! Fog of war over sequences of moving sources

use hex_realm::visibility::FogDiff;
use hex_realm::{
    FogMap, HexCoord, SightSource, Terrain, TerrainCostModel, TileGrid, TileLookup,
    VisibilityEngine, VisibilityState,
};
use proptest::prelude::*;

const RADIUS: u32 = 5;

/// Hexagon of plains with a sprinkling of forest and mountain
fn broken_country(blockers: &[(i32, i32, bool)]) -> TileGrid {
    let mut grid = TileGrid::hexagon(RADIUS, Terrain::Plains);
    for &(q, r, mountain) in blockers {
        let terrain = if mountain {
            Terrain::Mountain
        } else {
            Terrain::Forest
        };
        grid.set_terrain(HexCoord::new(q, r), terrain);
    }
    grid
}

fn on_map_coord() -> impl Strategy<Value = HexCoord> {
    let r = RADIUS as i32;
    (-r..=r, -r..=r)
        .prop_map(|(q, r)| HexCoord::new(q, r))
        .prop_filter("inside hexagon", |c| c.distance(&HexCoord::ORIGIN) <= RADIUS)
}

fn blockers() -> impl Strategy<Value = Vec<(i32, i32, bool)>> {
    let r = RADIUS as i32;
    prop::collection::vec((-r..=r, -r..=r, any::<bool>()), 0..20)
}

fn sources() -> impl Strategy<Value = Vec<SightSource>> {
    prop::collection::vec(
        (on_map_coord(), 0u32..=3).prop_map(|(c, radius)| SightSource::new(c, radius)),
        0..4,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn explored_set_only_grows(
        blockers in blockers(),
        steps in prop::collection::vec(sources(), 1..6),
    ) {
        let grid = broken_country(&blockers);
        let model = TerrainCostModel::standard();
        let engine = VisibilityEngine::new(&grid, &model);

        let mut fog = FogMap::new();
        for step in &steps {
            let next = engine.recompute(step, &fog);

            for coord in fog.explored_sorted() {
                prop_assert!(next.is_explored(coord));
            }
            for coord in next.visible_sorted() {
                prop_assert!(next.is_explored(coord));
                prop_assert!(grid.contains(coord));
            }
            prop_assert_eq!(next.visible_sorted(), engine.visible_set(step));
            fog = next;
        }
    }

    #[test]
    fn source_sees_itself_and_neighbors(
        blockers in blockers(),
        origin in on_map_coord(),
        radius in 1u32..=3,
    ) {
        let grid = broken_country(&blockers);
        let model = TerrainCostModel::standard();
        let engine = VisibilityEngine::new(&grid, &model);

        let seen = engine.visible_from(&SightSource::new(origin, radius));
        prop_assert!(seen.contains(&origin));
        for neighbor in origin.neighbors() {
            prop_assert_eq!(seen.contains(&neighbor), grid.contains(neighbor));
        }
        for coord in &seen {
            prop_assert!(coord.distance(&origin) <= radius);
        }
    }

    #[test]
    fn recompute_is_deterministic(blockers in blockers(), step in sources()) {
        let model = TerrainCostModel::standard();
        let first = broken_country(&blockers);
        let second = broken_country(&blockers);

        let a = VisibilityEngine::new(&first, &model).recompute(&step, &FogMap::new());
        let b = VisibilityEngine::new(&second, &model).recompute(&step, &FogMap::new());
        prop_assert_eq!(a.to_sorted(), b.to_sorted());
    }
}

#[test]
fn test_forest_ring_hides_the_outside() {
    let mut grid = TileGrid::hexagon(RADIUS, Terrain::Plains);
    for coord in HexCoord::ORIGIN.ring(2) {
        grid.set_terrain(coord, Terrain::Forest);
    }
    let model = TerrainCostModel::standard();
    let engine = VisibilityEngine::new(&grid, &model);

    let seen = engine.visible_from(&SightSource::new(HexCoord::ORIGIN, 4));

    // Inner plains and the forest ring itself, nothing beyond
    assert_eq!(seen.len(), 19);
    assert!(seen.iter().all(|c| c.distance(&HexCoord::ORIGIN) <= 2));
}

#[test]
fn test_zero_radius_sees_only_origin() {
    let grid = TileGrid::hexagon(2, Terrain::Plains);
    let model = TerrainCostModel::standard();
    let engine = VisibilityEngine::new(&grid, &model);

    let seen = engine.visible_from(&SightSource::new(HexCoord::new(1, 0), 0));
    assert_eq!(seen, vec![HexCoord::new(1, 0)]);
}

#[test]
fn test_off_map_source_is_skipped() {
    let grid = TileGrid::hexagon(2, Terrain::Plains);
    let model = TerrainCostModel::standard();
    let engine = VisibilityEngine::new(&grid, &model);

    let sources = [
        SightSource::new(HexCoord::new(10, 0), 3),
        SightSource::new(HexCoord::ORIGIN, 1),
    ];
    let fog = engine.recompute(&sources, &FogMap::new());
    assert_eq!(fog.visible_count(), 7);
    assert_eq!(fog.state(HexCoord::new(10, 0)), VisibilityState::Unexplored);
}

#[test]
fn test_walking_source_leaves_explored_trail() {
    let grid = TileGrid::hexagon(RADIUS, Terrain::Plains);
    let model = TerrainCostModel::standard();
    let engine = VisibilityEngine::new(&grid, &model);

    let first = engine.recompute(&[SightSource::new(HexCoord::new(-3, 0), 1)], &FogMap::new());
    let second = engine.recompute(&[SightSource::new(HexCoord::new(3, 0), 1)], &first);

    assert_eq!(second.state(HexCoord::new(-3, 0)), VisibilityState::Explored);
    assert_eq!(second.state(HexCoord::new(3, 0)), VisibilityState::Visible);
    assert_eq!(second.state(HexCoord::ORIGIN), VisibilityState::Unexplored);
    assert_eq!(second.explored_count(), 14);

    let FogDiff { revealed, hidden } = second.diff(&first);
    assert_eq!(revealed.len(), 7);
    assert_eq!(hidden.len(), 7);
    assert!(hidden.contains(&HexCoord::new(-3, 0)));
    assert!(revealed.windows(2).all(|w| w[0] < w[1]));

    // Nothing moves, nothing changes
    let third = engine.recompute(&[SightSource::new(HexCoord::new(3, 0), 1)], &second);
    assert!(third.diff(&second).is_empty());
}

#[test]
fn test_fog_serializes_as_sorted_list() {
    let grid = TileGrid::hexagon(1, Terrain::Plains);
    let model = TerrainCostModel::standard();
    let engine = VisibilityEngine::new(&grid, &model);

    let fog = engine.recompute(&[SightSource::new(HexCoord::ORIGIN, 1)], &FogMap::new());
    let json = serde_json::to_string(&fog).unwrap();
    let back: FogMap = serde_json::from_str(&json).unwrap();

    assert_eq!(back, fog);
    assert_eq!(serde_json::to_string(&back).unwrap(), json);
}
