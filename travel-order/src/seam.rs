//! Seam placement: which vertex of a closed contour printing starts at.
//!
//! The seam is where the nozzle begins and ends a contour, so it leaves a
//! small visible mark. The policies trade travel distance against where that
//! mark ends up.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Polygon};

/// Seam placement policy for closed contours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeamType {
    /// Start at the vertex closest to the nozzle.
    #[default]
    #[serde(alias = "nearest")]
    Shortest,
    /// Start at a uniformly random vertex.
    Random,
    /// Start at the vertex farthest from the front (highest y), hiding
    /// the seam at the back of the print.
    #[serde(alias = "hidden", alias = "rear")]
    Back,
}

impl SeamType {
    /// Get policy name as string.
    pub fn name(&self) -> &'static str {
        match self {
            SeamType::Shortest => "shortest",
            SeamType::Random => "random",
            SeamType::Back => "back",
        }
    }

    /// Parse policy from string.
    pub fn from_name(name: &str) -> Option<SeamType> {
        match name.to_lowercase().as_str() {
            "shortest" | "nearest" => Some(SeamType::Shortest),
            "random" | "rand" => Some(SeamType::Random),
            "back" | "hidden" | "rear" => Some(SeamType::Back),
            _ => None,
        }
    }

    /// All available policies.
    pub fn all() -> &'static [SeamType] {
        &[SeamType::Shortest, SeamType::Random, SeamType::Back]
    }

    /// Whether the chosen vertex depends on where the nozzle currently is.
    pub fn depends_on_position(&self) -> bool {
        matches!(self, SeamType::Shortest)
    }

    /// Seam vertex of `polygon` under this policy, with the nozzle at `from`.
    pub fn vertex<R: Rng>(&self, polygon: &Polygon, from: Point, rng: &mut R) -> usize {
        match self {
            SeamType::Shortest => closest_vertex(polygon, from),
            SeamType::Random => random_vertex(polygon, rng),
            SeamType::Back => back_vertex(polygon),
        }
    }
}

/// Index of the vertex closest to `from`. Ties go to the lowest index.
pub fn closest_vertex(polygon: &Polygon, from: Point) -> usize {
    polygon
        .points
        .iter()
        .enumerate()
        .min_by_key(|(_, p)| p.distance_squared(&from))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Index of the vertex with the highest y. Ties go to the lowest index.
pub fn back_vertex(polygon: &Polygon) -> usize {
    let mut best = 0;
    for (i, p) in polygon.points.iter().enumerate().skip(1) {
        if p.y > polygon.points[best].y {
            best = i;
        }
    }
    best
}

/// Uniformly random vertex index.
pub fn random_vertex<R: Rng>(polygon: &Polygon, rng: &mut R) -> usize {
    if polygon.len() <= 1 {
        return 0;
    }
    rng.random_range(0..polygon.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn square_at(cx: i64, cy: i64, half: i64) -> Polygon {
        Polygon::from_coords(&[
            (cx - half, cy - half),
            (cx + half, cy - half),
            (cx + half, cy + half),
            (cx - half, cy + half),
        ])
    }

    #[test]
    fn closest_vertex_picks_nearest() {
        let poly = square_at(0, 0, 10);
        assert_eq!(closest_vertex(&poly, Point::new(100, 100)), 2);
        assert_eq!(closest_vertex(&poly, Point::new(-100, 100)), 3);
    }

    #[test]
    fn closest_vertex_ties_go_to_lowest_index() {
        let poly = square_at(0, 0, 10);
        assert_eq!(closest_vertex(&poly, Point::new(0, 0)), 0);
    }

    #[test]
    fn back_vertex_picks_highest_y() {
        let poly = Polygon::from_coords(&[(0, 0), (5, 7), (10, 3), (2, 7)]);
        assert_eq!(back_vertex(&poly), 1);
    }

    #[test]
    fn degenerate_polygons_resolve_to_zero() {
        let empty = Polygon::default();
        let single = Polygon::from_coords(&[(3, 3)]);
        let mut rng = StdRng::seed_from_u64(7);

        for poly in [&empty, &single] {
            assert_eq!(closest_vertex(poly, Point::new(1, 1)), 0);
            assert_eq!(back_vertex(poly), 0);
            assert_eq!(random_vertex(poly, &mut rng), 0);
        }
    }

    #[test]
    fn random_vertex_in_bounds_and_reproducible() {
        let poly = square_at(0, 0, 10);
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let ia = random_vertex(&poly, &mut a);
            assert!(ia < poly.len());
            assert_eq!(ia, random_vertex(&poly, &mut b));
        }
    }

    #[test]
    fn random_vertex_reaches_every_vertex() {
        let poly = square_at(0, 0, 10);
        let mut seen = [false; 4];
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            seen[random_vertex(&poly, &mut rng)] = true;
        }
        assert_eq!(seen, [true; 4], "every vertex should be picked for some seed");
    }

    #[test]
    fn only_shortest_depends_on_position() {
        let poly = square_at(0, 0, 10);
        let mut rng = StdRng::seed_from_u64(3);

        assert!(SeamType::Shortest.depends_on_position());
        assert!(!SeamType::Random.depends_on_position());
        assert!(!SeamType::Back.depends_on_position());

        assert_eq!(SeamType::Shortest.vertex(&poly, Point::new(100, 100), &mut rng), 2);
        assert_eq!(SeamType::Shortest.vertex(&poly, Point::new(-100, -100), &mut rng), 0);
        assert_eq!(SeamType::Back.vertex(&poly, Point::new(-100, -100), &mut rng), 2);
    }

    #[test]
    fn seam_parsing() {
        assert_eq!(SeamType::from_name("shortest"), Some(SeamType::Shortest));
        assert_eq!(SeamType::from_name("HIDDEN"), Some(SeamType::Back));
        assert_eq!(SeamType::from_name("rand"), Some(SeamType::Random));
        assert_eq!(SeamType::from_name("sharpest"), None);
        for seam in SeamType::all() {
            assert_eq!(SeamType::from_name(seam.name()), Some(*seam));
        }
    }
}
