//! Ray-casting point-in-polygon tests and boundary classification.

use geo_types::Coord;

use super::boundary::BoundarySet;

/// Ray-casting containment test against a single exterior ring.
///
/// The ring closes implicitly: the last vertex connects back to the first.
/// An edge whose endpoints share a latitude can never satisfy the strict
/// `(yi > lat) != (yj > lat)` crossing test, so horizontal edges at exactly
/// the query latitude are skipped instead of dividing by zero. Points
/// landing exactly on a vertex get whatever the crossing count says; the
/// result is deterministic but not specified either way.
///
/// Degenerate rings (fewer than three vertices) never contain anything.
pub fn point_in_ring(lon: f64, lat: f64, ring: &[Coord<f64>]) -> bool {
    if ring.is_empty() {
        return false;
    }

    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let Coord { x: xi, y: yi } = ring[i];
        let Coord { x: xj, y: yj } = ring[j];
        if (yi > lat) != (yj > lat) && lon < (xj - xi) * (lat - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

impl BoundarySet {
    /// Name of the first boundary, in insertion order, containing the point.
    ///
    /// A boundary contains the point if any of its exterior rings does.
    /// Boundaries are not guaranteed disjoint: a point inside several of
    /// them always resolves to the earliest-inserted one, never the
    /// smallest or any other priority. `None` means the point is outside
    /// every tracked boundary.
    pub fn classify(&self, lon: f64, lat: f64) -> Option<&str> {
        self.iter()
            .find(|(_, rings)| rings.iter().any(|ring| point_in_ring(lon, lat, ring)))
            .map(|(name, _)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wkt::Ring;

    fn ring(coords: &[(f64, f64)]) -> Ring {
        coords.iter().map(|&(x, y)| Coord { x, y }).collect()
    }

    fn unit_square() -> Ring {
        ring(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)])
    }

    #[test]
    fn test_unit_square() {
        let sq = unit_square();
        assert!(point_in_ring(0.5, 0.5, &sq));
        assert!(!point_in_ring(2.0, 2.0, &sq));
        assert!(!point_in_ring(-0.5, 0.5, &sq));
    }

    #[test]
    fn test_horizontal_edge_at_query_latitude() {
        // Bottom edge lies exactly at lat 0; must not panic or divide by zero.
        let sq = unit_square();
        let _ = point_in_ring(0.5, 0.0, &sq);
        let _ = point_in_ring(-1.0, 0.0, &sq);
        let _ = point_in_ring(0.5, 1.0, &sq);
    }

    #[test]
    fn test_degenerate_rings() {
        assert!(!point_in_ring(0.5, 0.5, &ring(&[])));
        assert!(!point_in_ring(0.5, 0.5, &ring(&[(0.0, 0.0)])));
        assert!(!point_in_ring(0.5, 0.5, &ring(&[(0.0, 0.0), (1.0, 1.0)])));
    }

    #[test]
    fn test_concave_ring() {
        // U-shape: the notch at the top center is outside.
        let u = ring(&[
            (0.0, 0.0),
            (3.0, 0.0),
            (3.0, 3.0),
            (2.0, 3.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 3.0),
            (0.0, 3.0),
        ]);
        assert!(point_in_ring(0.5, 2.0, &u));
        assert!(point_in_ring(2.5, 2.0, &u));
        assert!(!point_in_ring(1.5, 2.0, &u));
        assert!(point_in_ring(1.5, 0.5, &u));
    }

    #[test]
    fn test_classify_first_match_wins() {
        // A and B both contain (0.5, 0.5); A was inserted first.
        let mut set = BoundarySet::new();
        set.insert("A", vec![unit_square()]);
        set.insert(
            "B",
            vec![ring(&[(-1.0, -1.0), (-1.0, 2.0), (2.0, 2.0), (2.0, -1.0)])],
        );

        assert_eq!(set.classify(0.5, 0.5), Some("A"));
        // Inside B only.
        assert_eq!(set.classify(1.5, 1.5), Some("B"));
        // Outside both.
        assert_eq!(set.classify(5.0, 5.0), None);
    }

    #[test]
    fn test_classify_ors_across_polygon_parts() {
        let mut set = BoundarySet::new();
        set.insert(
            "split",
            vec![
                unit_square(),
                ring(&[(10.0, 10.0), (10.0, 11.0), (11.0, 11.0), (11.0, 10.0)]),
            ],
        );
        assert_eq!(set.classify(10.5, 10.5), Some("split"));
        assert_eq!(set.classify(0.5, 0.5), Some("split"));
        assert_eq!(set.classify(5.0, 5.0), None);
    }
}
