//! Travel evaluation shared by the part and line optimizers.
//!
//! The order in which shapes are printed decides how far the nozzle moves
//! without extruding. These helpers measure that distance for a given
//! visit order and per-shape start index, so optimized and unoptimized
//! orders can be compared.
//!
//! ## Algorithms
//!
//! - **Parts**: greedy nearest neighbor with seam placement, see
//!   [`PartOrderOptimizer`](crate::PartOrderOptimizer)
//! - **Lines**: spatial clustering, then nearest neighbor over clusters,
//!   see [`LineOrderOptimizer`](crate::LineOrderOptimizer)

use crate::geometry::{Point, Polygon};

/// Identity visit order with every shape starting at index 0.
///
/// This is the "document order" baseline an optimized order is measured
/// against.
pub fn document_order(n: usize) -> (Vec<usize>, Vec<usize>) {
    ((0..n).collect(), vec![0; n])
}

/// Total travel for a closed-contour order.
///
/// A closed contour is left at the vertex it was entered at, so each shape
/// contributes a single move from the current position to its start vertex.
/// Empty polygons are skipped.
pub fn part_travel_distance<P: AsRef<Polygon>>(
    start: Point,
    polygons: &[P],
    order: &[usize],
    starts: &[usize],
) -> f64 {
    let mut position = start;
    let mut total = 0.0;

    for &idx in order {
        let polygon = polygons[idx].as_ref();
        if polygon.is_empty() {
            continue;
        }
        let entry = polygon[starts[idx]];
        total += position.distance(&entry);
        position = entry;
    }

    total
}

/// Total travel for an open-polyline order.
///
/// Each line is entered at `starts[idx]` (its first or last point) and
/// left at the opposite end.
pub fn line_travel_distance<P: AsRef<Polygon>>(
    start: Point,
    lines: &[P],
    order: &[usize],
    starts: &[usize],
) -> f64 {
    let mut position = start;
    let mut total = 0.0;

    for &idx in order {
        let line = lines[idx].as_ref();
        let Some((first, last)) = line.endpoints() else {
            continue;
        };
        let (entry, exit) = if starts[idx] == 0 { (first, last) } else { (last, first) };
        total += position.distance(&entry);
        position = exit;
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_order_is_identity() {
        let (order, starts) = document_order(4);
        assert_eq!(order, vec![0, 1, 2, 3]);
        assert_eq!(starts, vec![0, 0, 0, 0]);
    }

    #[test]
    fn part_travel_returns_to_seam() {
        let polygons = vec![
            Polygon::from_coords(&[(0, 3), (10, 3), (10, 10)]),
            Polygon::from_coords(&[(0, 13), (5, 13)]),
        ];
        let travel = part_travel_distance(Point::new(0, -1), &polygons, &[0, 1], &[0, 0]);
        // (0,-1) -> (0,3) = 4, then (0,3) -> (0,13) = 10
        assert!((travel - 14.0).abs() < 1e-9);
    }

    #[test]
    fn line_travel_leaves_at_far_end() {
        let lines = vec![
            Polygon::from_coords(&[(0, 0), (10, 0)]),
            Polygon::from_coords(&[(10, 5), (0, 5)]),
        ];
        let forward = line_travel_distance(Point::new(0, 0), &lines, &[0, 1], &[0, 0]);
        assert!((forward - 5.0).abs() < 1e-9);

        let reversed = line_travel_distance(Point::new(0, 0), &lines, &[0, 1], &[0, 1]);
        // Exit (10,0), enter the second line at (0,5)
        assert!((reversed - (100.0f64 + 25.0).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn empty_shapes_cost_nothing() {
        let lines = vec![Polygon::default(), Polygon::default()];
        assert_eq!(line_travel_distance(Point::new(3, 4), &lines, &[1, 0], &[0, 0]), 0.0);
        assert_eq!(part_travel_distance(Point::new(3, 4), &lines, &[1, 0], &[0, 0]), 0.0);
    }
}
