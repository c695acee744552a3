//! Line order optimization for open polylines such as infill lines.
//!
//! Lines are first grouped into clusters of end-to-end neighbors (see
//! [`cluster`](crate::cluster)), then the clusters are ordered with the same
//! greedy nearest-neighbor walk the part optimizer uses. Each cluster can be
//! entered from either of its two extreme ends.
//!
//! `cluster_grid_size` trades speed for quality: a larger value merges more
//! lines per cluster, so fewer units are left for the O(n²) ordering stage.
//! A smaller value gives more, smaller clusters, and the optimizer falls back
//! to nearly plain line-by-line nearest neighbor.

use crate::cluster::{Cluster, ClusterStats, cluster_lines};
use crate::geometry::{Coord, Point, Polygon};
use crate::order::line_travel_distance;

/// Orders open polylines to minimize travel, choosing an entry end per line.
///
/// ```
/// use travel_order::{LineOrderOptimizer, Point, Polygon};
///
/// let lines = vec![
///     Polygon::from_coords(&[(0, 10), (100, 10)]),
///     Polygon::from_coords(&[(0, 0), (100, 0)]),
/// ];
/// let mut optimizer = LineOrderOptimizer::new(Point::new(0, 0), 20);
/// optimizer.add_lines(&lines);
/// optimizer.optimize();
///
/// assert_eq!(optimizer.visit_order(), &[1, 0]);
/// // The second line is printed backwards, starting at its last point
/// assert_eq!(optimizer.start_index_per_shape(), &[1, 0]);
/// ```
#[derive(Debug, Clone)]
pub struct LineOrderOptimizer<'a> {
    /// The size of the grid cells used to cluster lines.
    cluster_grid_size: Coord,
    start_point: Point,
    lines: Vec<&'a Polygon>,
    start_index_per_shape: Vec<usize>,
    visit_order: Vec<usize>,
    cluster_stats: Option<ClusterStats>,
}

impl<'a> LineOrderOptimizer<'a> {
    /// `cluster_grid_size` is the largest gap between two line ends that
    /// still puts the lines in the same cluster.
    pub fn new(start_point: Point, cluster_grid_size: Coord) -> Self {
        Self {
            cluster_grid_size,
            start_point,
            lines: Vec::new(),
            start_index_per_shape: Vec::new(),
            visit_order: Vec::new(),
            cluster_stats: None,
        }
    }

    pub fn add_line(&mut self, line: &'a Polygon) {
        self.lines.push(line);
    }

    pub fn add_lines(&mut self, lines: &'a [Polygon]) {
        self.lines.extend(lines.iter());
    }

    pub fn start_point(&self) -> Point {
        self.start_point
    }

    pub fn cluster_grid_size(&self) -> Coord {
        self.cluster_grid_size
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn visit_order(&self) -> &[usize] {
        &self.visit_order
    }

    /// `lines[i][start_index_per_shape()[i]]` is where line `i` starts.
    /// Always either 0 or the index of the line's last point.
    pub fn start_index_per_shape(&self) -> &[usize] {
        &self.start_index_per_shape
    }

    /// Clustering statistics of the last [`optimize`](Self::optimize) run.
    pub fn cluster_stats(&self) -> Option<&ClusterStats> {
        self.cluster_stats.as_ref()
    }

    /// Travel distance of the last computed order.
    pub fn travel_distance(&self) -> f64 {
        line_travel_distance(
            self.start_point,
            &self.lines,
            &self.visit_order,
            &self.start_index_per_shape,
        )
    }

    /// Group the lines into clusters of end-to-end neighbors.
    pub fn cluster(&self) -> Vec<Cluster> {
        cluster_lines(&self.lines, self.cluster_grid_size)
    }

    /// Compute [`visit_order`](Self::visit_order) and
    /// [`start_index_per_shape`](Self::start_index_per_shape).
    pub fn optimize(&mut self) {
        let n = self.lines.len();
        let clusters = self.cluster();

        self.start_index_per_shape = vec![0; n];
        self.visit_order = Vec::with_capacity(n);

        let ends: Vec<Option<(Point, Point)>> = clusters.iter().map(|c| self.cluster_ends(c)).collect();
        let mut visited = vec![false; clusters.len()];
        let mut position = self.start_point;

        for _ in 0..clusters.len() {
            // (distance², cluster_idx, enter_from_tail); tuple order gives the tie-breaks
            let mut best: Option<(i128, usize, bool)> = None;

            for (cluster_idx, extremes) in ends.iter().enumerate() {
                if visited[cluster_idx] {
                    continue;
                }

                let candidate = match *extremes {
                    Some((head, tail)) => {
                        let to_head = head.distance_squared(&position);
                        let to_tail = tail.distance_squared(&position);
                        if to_tail < to_head {
                            (to_tail, cluster_idx, true)
                        } else {
                            (to_head, cluster_idx, false)
                        }
                    }
                    None => (0, cluster_idx, false),
                };

                if best.is_none_or(|b| candidate < b) {
                    best = Some(candidate);
                }
            }

            let Some((_, cluster_idx, from_tail)) = best else {
                break;
            };
            visited[cluster_idx] = true;

            if let Some(exit) = self.emit_cluster(&clusters[cluster_idx], from_tail) {
                position = exit;
            }
        }

        let stats = ClusterStats::from_clusters(&clusters);
        log::debug!(
            "ordered {} lines in {} clusters (avg {:.1}, max {}), travel {:.3}",
            n,
            stats.clusters,
            stats.avg_cluster_size,
            stats.max_cluster_size,
            self.travel_distance()
        );
        self.cluster_stats = Some(stats);
    }

    /// Entry point of the first line and exit point of the last line of a
    /// cluster, walking it forward. `None` if the cluster has no points.
    fn cluster_ends(&self, cluster: &Cluster) -> Option<(Point, Point)> {
        let head = cluster.iter().find_map(|e| self.entry_exit(e.line, e.reversed));
        let tail = cluster.iter().rev().find_map(|e| self.entry_exit(e.line, e.reversed));

        head.zip(tail).map(|((entry, _), (_, exit))| (entry, exit))
    }

    /// Entry and exit point of a line in the given direction.
    fn entry_exit(&self, line: usize, reversed: bool) -> Option<(Point, Point)> {
        let (first, last) = self.lines[line].endpoints()?;
        Some(if reversed { (last, first) } else { (first, last) })
    }

    /// Append a cluster's lines to the visit order, walking it backwards
    /// (and flipping every line) when entered from the tail.
    ///
    /// Returns where the nozzle ends up, if the cluster has any points.
    fn emit_cluster(&mut self, cluster: &Cluster, from_tail: bool) -> Option<Point> {
        let mut exit = None;

        if from_tail {
            for e in cluster.iter().rev() {
                exit = self.push_line(e.line, !e.reversed).or(exit);
            }
        } else {
            for e in cluster {
                exit = self.push_line(e.line, e.reversed).or(exit);
            }
        }

        exit
    }

    /// Append one line to the visit order and return its exit point.
    fn push_line(&mut self, line: usize, reversed: bool) -> Option<Point> {
        self.visit_order.push(line);
        self.start_index_per_shape[line] = if reversed {
            self.lines[line].reversed_start()
        } else {
            0
        };
        self.entry_exit(line, reversed).map(|(_, exit)| exit)
    }
}
