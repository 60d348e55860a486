//! Property tests for cube coordinate arithmetic

use std::collections::BTreeSet;

use hex_realm::hex::{hex_count, FractionalHex, HexCoord, HexDirection, Layout, Point};
use proptest::prelude::*;

fn coord() -> impl Strategy<Value = HexCoord> {
    (-50i32..=50, -50i32..=50).prop_map(|(q, r)| HexCoord::new(q, r))
}

fn zero_sum(c: &HexCoord) -> bool {
    c.q() + c.r() + c.s() == 0
}

proptest! {
    #[test]
    fn distance_identity_and_symmetry(a in coord(), b in coord()) {
        prop_assert_eq!(a.distance(&a), 0);
        prop_assert_eq!(a.distance(&b), b.distance(&a));
    }

    #[test]
    fn distance_triangle_inequality(a in coord(), b in coord(), c in coord()) {
        prop_assert!(a.distance(&b) <= a.distance(&c) + c.distance(&b));
    }

    #[test]
    fn neighbors_are_mutual(h in coord()) {
        for n in h.neighbors() {
            prop_assert!(zero_sum(&n));
            prop_assert_eq!(h.distance(&n), 1);
            prop_assert!(n.neighbors().contains(&h));
        }
    }

    #[test]
    fn neighbor_order_is_clockwise_from_east(h in coord()) {
        let neighbors = h.neighbors();
        prop_assert_eq!(neighbors[0], h + HexCoord::from_cube(1, 0, -1));
        for (i, dir) in HexDirection::ALL.iter().enumerate() {
            prop_assert_eq!(neighbors[i], h.neighbor(*dir));
            prop_assert_eq!(h.neighbor(*dir).neighbor(dir.opposite()), h);
        }
    }

    #[test]
    fn ring_has_exact_distance(h in coord(), radius in 0u32..8) {
        let ring = h.ring(radius);
        let expected = if radius == 0 { 1 } else { 6 * radius as usize };
        prop_assert_eq!(ring.len(), expected);
        for c in &ring {
            prop_assert!(zero_sum(c));
            prop_assert_eq!(c.distance(&h), radius);
        }
        let unique: BTreeSet<_> = ring.iter().collect();
        prop_assert_eq!(unique.len(), ring.len());
    }

    #[test]
    fn range_equals_union_of_rings(h in coord(), radius in 0u32..7) {
        let range: BTreeSet<HexCoord> = h.range(radius).into_iter().collect();
        let mut rings = BTreeSet::new();
        let mut total = 0;
        for r in 0..=radius {
            let ring = h.ring(r);
            total += ring.len();
            rings.extend(ring);
        }
        prop_assert_eq!(total, rings.len());
        prop_assert_eq!(range.len(), hex_count(radius));
        prop_assert_eq!(&range, &rings);

        let spiral: BTreeSet<HexCoord> = h.spiral(radius).into_iter().collect();
        prop_assert_eq!(spiral, rings);
    }

    #[test]
    fn distance_matches_graph_distance(a in coord(), dq in -4i32..=4, dr in -4i32..=4) {
        // Breadth-first hop count agrees with the closed form
        let b = a + HexCoord::new(dq, dr);
        let mut frontier = vec![a];
        let mut seen: BTreeSet<HexCoord> = frontier.iter().copied().collect();
        let mut hops = 0;
        while !seen.contains(&b) {
            hops += 1;
            let mut next = Vec::new();
            for c in &frontier {
                for n in c.neighbors() {
                    if seen.insert(n) {
                        next.push(n);
                    }
                }
            }
            frontier = next;
        }
        prop_assert_eq!(a.distance(&b), hops);
    }

    #[test]
    fn rounding_preserves_zero_sum(q in -100.0f64..100.0, r in -100.0f64..100.0) {
        let rounded = FractionalHex::new(q, r).round();
        prop_assert!(zero_sum(&rounded));
        // The rounded hex is the nearest one or ties with it
        prop_assert!((f64::from(rounded.q()) - q).abs() <= 1.0);
        prop_assert!((f64::from(rounded.r()) - r).abs() <= 1.0);
    }

    #[test]
    fn rounding_integers_is_identity(h in coord()) {
        prop_assert_eq!(FractionalHex::from(h).round(), h);
    }

    #[test]
    fn line_is_contiguous(a in coord(), b in coord()) {
        let line = a.line_to(&b);
        prop_assert_eq!(line.len() as u32, a.distance(&b) + 1);
        prop_assert_eq!(line.first(), Some(&a));
        prop_assert_eq!(line.last(), Some(&b));
        for pair in line.windows(2) {
            prop_assert!(zero_sum(&pair[1]));
            prop_assert_eq!(pair[0].distance(&pair[1]), 1);
        }
    }

    #[test]
    fn display_parse_round_trip(h in coord()) {
        let parsed: HexCoord = h.to_string().parse().unwrap();
        prop_assert_eq!(parsed, h);
    }

    #[test]
    fn pixel_round_trip(h in coord()) {
        let layout = Layout::new(24.0, Point::new(100.0, 50.0));
        prop_assert_eq!(layout.pixel_to_hex(layout.hex_to_pixel(h)), h);
    }
}

#[test]
fn test_rejects_non_zero_sum() {
    assert!(HexCoord::try_from_cube(1, 1, 1).is_err());
    assert!("1,1,1".parse::<HexCoord>().is_err());
    let result = std::panic::catch_unwind(|| HexCoord::from_cube(2, 0, 0));
    assert!(result.is_err());
}

#[test]
fn test_deserialize_validates() {
    assert!(serde_json::from_str::<HexCoord>(r#"{"q":1,"r":-1,"s":0}"#).is_ok());
    assert!(serde_json::from_str::<HexCoord>(r#"{"q":1,"r":1,"s":0}"#).is_err());
}
