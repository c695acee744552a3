//! Part order optimization: which closed contour to print next, and where
//! to start printing it.
//!
//! Parts per layer are few, so a plain O(n²) nearest-neighbor search over
//! all remaining parts is cheap enough. Each step costs O(m) in the size
//! of the polygons being scanned for their seam vertex.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::geometry::{Point, Polygon};
use crate::order::part_travel_distance;
use crate::seam::SeamType;

/// Orders closed polygons to minimize travel, picking a seam per polygon.
///
/// ```
/// use travel_order::{PartOrderOptimizer, Point, Polygon, SeamType};
///
/// let parts = vec![
///     Polygon::from_coords(&[(100, 0), (110, 0), (110, 10)]),
///     Polygon::from_coords(&[(10, 0), (20, 0), (20, 10)]),
/// ];
/// let mut optimizer = PartOrderOptimizer::new(Point::new(0, 0), SeamType::Shortest);
/// optimizer.add_polygons(&parts);
/// optimizer.optimize();
///
/// assert_eq!(optimizer.visit_order(), &[1, 0]);
/// assert_eq!(optimizer.start_index_per_shape(), &[0, 0]);
/// ```
#[derive(Debug, Clone)]
pub struct PartOrderOptimizer<'a> {
    seam_type: SeamType,
    start_point: Point,
    seed: u64,
    polygons: Vec<&'a Polygon>,
    start_index_per_shape: Vec<usize>,
    visit_order: Vec<usize>,
}

impl<'a> PartOrderOptimizer<'a> {
    /// `start_point` is where the nozzle is before the layer starts.
    pub fn new(start_point: Point, seam_type: SeamType) -> Self {
        Self {
            seam_type,
            start_point,
            seed: 0,
            polygons: Vec::new(),
            start_index_per_shape: Vec::new(),
            visit_order: Vec::new(),
        }
    }

    /// Seed for the [`SeamType::Random`] policy.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn add_polygon(&mut self, polygon: &'a Polygon) {
        self.polygons.push(polygon);
    }

    pub fn add_polygons(&mut self, polygons: &'a [Polygon]) {
        self.polygons.extend(polygons.iter());
    }

    pub fn start_point(&self) -> Point {
        self.start_point
    }

    pub fn seam_type(&self) -> SeamType {
        self.seam_type
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// The optimized order, as indices in insertion order.
    pub fn visit_order(&self) -> &[usize] {
        &self.visit_order
    }

    /// `polygons[i][start_index_per_shape()[i]]` is where polygon `i` starts.
    pub fn start_index_per_shape(&self) -> &[usize] {
        &self.start_index_per_shape
    }

    /// Travel distance of the last computed order.
    pub fn travel_distance(&self) -> f64 {
        part_travel_distance(
            self.start_point,
            &self.polygons,
            &self.visit_order,
            &self.start_index_per_shape,
        )
    }

    /// Compute [`visit_order`](Self::visit_order) and
    /// [`start_index_per_shape`](Self::start_index_per_shape).
    ///
    /// The random source is reseeded on every call, so repeated calls
    /// produce identical results.
    pub fn optimize(&mut self) {
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.optimize_with_rng(&mut rng);
    }

    /// Same as [`optimize`](Self::optimize), drawing random seams from `rng`.
    pub fn optimize_with_rng<R: Rng>(&mut self, rng: &mut R) {
        let n = self.polygons.len();

        let seam = self.seam_type;
        let mut position = self.start_point;

        // Position-independent seams only need computing once.
        let fixed_starts: Option<Vec<usize>> = if seam.depends_on_position() {
            None
        } else {
            Some(self.polygons.iter().map(|p| seam.vertex(p, position, &mut *rng)).collect())
        };

        self.start_index_per_shape = vec![0; n];
        self.visit_order = Vec::with_capacity(n);

        let mut visited = vec![false; n];

        for _ in 0..n {
            // (poly_idx, start_idx, distance²); strict `<` keeps the lowest index on ties
            let mut best: Option<(usize, usize, i128)> = None;

            for (poly_idx, polygon) in self.polygons.iter().enumerate() {
                if visited[poly_idx] {
                    continue;
                }

                let start_idx = match &fixed_starts {
                    Some(starts) => starts[poly_idx],
                    None => seam.vertex(polygon, position, &mut *rng),
                };
                let dist = polygon
                    .points
                    .get(start_idx)
                    .map_or(0, |p| p.distance_squared(&position));

                if best.is_none_or(|(_, _, best_dist)| dist < best_dist) {
                    best = Some((poly_idx, start_idx, dist));
                }
            }

            let Some((poly_idx, start_idx, _)) = best else {
                break;
            };

            visited[poly_idx] = true;
            self.visit_order.push(poly_idx);
            self.start_index_per_shape[poly_idx] = start_idx;
            if let Some(&p) = self.polygons[poly_idx].points.get(start_idx) {
                position = p;
            }
        }

        log::debug!(
            "ordered {} parts ({} seam), travel {:.3}",
            n,
            self.seam_type.name(),
            self.travel_distance()
        );
    }
}
