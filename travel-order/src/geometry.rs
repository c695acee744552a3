//! Core geometry types for travel-order.
//!
//! ## Rust Lesson #3: Integer Coordinates
//!
//! Toolpath coordinates are stored as `i64` micrometres instead of `f64`
//! millimetres. Integer math is exact, so two distances that are equal on
//! paper compare equal in code too, which keeps every tie-break in the
//! optimizers deterministic.
//!
//! The `#[derive(...)]` macro auto-generates common functionality:
//! - `Copy` = can copy implicitly (small stack values only)
//! - `Eq` + `Hash` = usable as a `HashMap` key
//! - `Serialize` + `Deserialize` = readable from config files

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Fixed-precision coordinate, in micrometres.
pub type Coord = i64;

/// Number of coordinate units per millimetre.
pub const SCALING_FACTOR: f64 = 1000.0;

/// Convert millimetres to coordinate units, rounding to the nearest unit.
#[inline]
pub fn scale(mm: f64) -> Coord {
    (mm * SCALING_FACTOR).round() as Coord
}

/// Convert coordinate units back to millimetres.
#[inline]
pub fn unscale(value: Coord) -> f64 {
    value as f64 / SCALING_FACTOR
}

/// A 2D point with integer coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: Coord,
    pub y: Coord,
}

/// An ordered sequence of points.
///
/// The same type serves both optimizers: the part optimizer reads it as a
/// closed contour (last point connects back to the first), the line
/// optimizer as an open polyline with two free ends.
///
/// ## Rust Lesson #4: Ownership & Borrowing
///
/// A `Polygons` container OWNS its point data. The optimizers only hold
/// `&Polygon` borrows, so the compiler guarantees the container outlives
/// them and stays unmodified while an optimizer is alive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Polygon {
    pub points: Vec<Point>,
}

/// Caller-owned collection of shapes.
pub type Polygons = Vec<Polygon>;

impl Point {
    #[inline]
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    /// Create a point from millimetre coordinates.
    #[inline]
    pub fn from_mm(x: f64, y: f64) -> Self {
        Self::new(scale(x), scale(y))
    }

    /// Squared distance to another point.
    ///
    /// Exact for coordinates with `|c| < 2^62`. Beyond that the result
    /// saturates at `i128::MAX`.
    #[inline]
    pub fn distance_squared(&self, other: &Point) -> i128 {
        let dx = other.x as i128 - self.x as i128;
        let dy = other.y as i128 - self.y as i128;
        dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy))
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Build a polygon from `(x, y)` pairs in coordinate units.
    pub fn from_coords(coords: &[(Coord, Coord)]) -> Self {
        Self::new(coords.iter().map(|&(x, y)| Point::new(x, y)).collect())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    #[inline]
    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// The two free ends of the polyline, `None` for an empty polygon.
    ///
    /// A single-point polygon has both ends at that point.
    #[inline]
    pub fn endpoints(&self) -> Option<(Point, Point)> {
        Some((self.first()?, self.last()?))
    }

    /// Index of the last point, i.e. the start index when the polyline
    /// is printed backwards. 0 for empty polygons.
    #[inline]
    pub fn reversed_start(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

impl std::ops::Index<usize> for Polygon {
    type Output = Point;

    fn index(&self, index: usize) -> &Point {
        &self.points[index]
    }
}

impl AsRef<Polygon> for Polygon {
    fn as_ref(&self) -> &Polygon {
        self
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_round_trips_millimetres() {
        assert_eq!(scale(1.5), 1500);
        assert_eq!(scale(-0.0004), 0);
        assert!((unscale(2500) - 2.5).abs() < 1e-9);
    }

    #[test]
    fn distance_is_exact_for_integer_points() {
        let a = Point::new(0, 0);
        let b = Point::new(3, 4);
        assert_eq!(a.distance_squared(&b), 25);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn distance_squared_does_not_overflow() {
        let a = Point::new(i64::MIN / 4, i64::MIN / 4);
        let b = Point::new(i64::MAX / 4, i64::MAX / 4);
        assert!(a.distance_squared(&b) > 0);
    }

    #[test]
    fn distance_squared_saturates_at_extremes() {
        let a = Point::new(i64::MIN, i64::MIN);
        let b = Point::new(i64::MAX, i64::MAX);
        assert_eq!(a.distance_squared(&b), i128::MAX);
        assert_eq!(b.distance_squared(&a), i128::MAX);
    }

    #[test]
    fn point_arithmetic() {
        let a = Point::new(10, 20);
        let b = Point::new(1, 2);
        assert_eq!(a + b, Point::new(11, 22));
        assert_eq!(a - b, Point::new(9, 18));
    }

    #[test]
    fn endpoints_of_degenerate_polygons() {
        assert_eq!(Polygon::default().endpoints(), None);
        assert_eq!(Polygon::default().reversed_start(), 0);

        let single = Polygon::from_coords(&[(5, 5)]);
        assert_eq!(single.endpoints(), Some((Point::new(5, 5), Point::new(5, 5))));
        assert_eq!(single.reversed_start(), 0);

        let line = Polygon::from_coords(&[(0, 0), (1, 0), (2, 0)]);
        assert_eq!(line.endpoints(), Some((Point::new(0, 0), Point::new(2, 0))));
        assert_eq!(line.reversed_start(), 2);
    }
}
