//! Line clustering - group spatially adjacent lines into chains.
//!
//! Nearest-neighbor ordering over every single infill line is O(n²), which
//! gets expensive on dense layers. Clustering first walks short hops between
//! lines whose ends almost touch, so the ordering stage only has to deal with
//! whole chains.

use std::collections::HashMap;

use crate::geometry::{Coord, Point, Polygon};
use crate::math::square;

/// One line in a cluster, with the direction it is traversed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterEntry {
    /// Index of the line in the optimizer's input.
    pub line: usize,
    /// Printed from its last point to its first.
    pub reversed: bool,
}

/// Ordered chain of lines whose consecutive ends are within the grid size
/// of each other.
pub type Cluster = Vec<ClusterEntry>;

/// Spatial hash of line endpoints: grid cell -> list of (line_index, is_first_point).
type EndpointGrid = HashMap<(i64, i64), Vec<(usize, bool)>>;

/// Convert a point to a grid cell coordinate.
#[inline]
fn point_to_cell(p: Point, cell_size: Coord) -> (i64, i64) {
    (p.x.div_euclid(cell_size), p.y.div_euclid(cell_size))
}

/// Partition `lines` into clusters.
///
/// # Algorithm
///
/// 1. Hash the endpoints of all lines into cells of `grid_size`
/// 2. Seed a cluster with the lowest unclustered line, traversed forward
/// 3. Append the nearest unclustered line that has an end within
///    `grid_size` of the cluster's trailing end, oriented so that end is
///    entered first
/// 4. When nothing is in reach, close the cluster and go to 2
///
/// Lines without points never join a cluster; each ends up alone.
///
/// # Performance
///
/// Each extension only looks at the 3×3 cells around the trailing end, so
/// clustering is close to linear unless many endpoints pile into a cell.
pub fn cluster_lines<P: AsRef<Polygon>>(lines: &[P], grid_size: Coord) -> Vec<Cluster> {
    if lines.is_empty() {
        return Vec::new();
    }

    let cell_size = grid_size.max(1);
    let reach_sq = square(grid_size.max(0) as i128);

    let mut grid: EndpointGrid = HashMap::new();
    for (i, line) in lines.iter().enumerate() {
        if let Some((first, last)) = line.as_ref().endpoints() {
            grid.entry(point_to_cell(first, cell_size)).or_default().push((i, true));
            grid.entry(point_to_cell(last, cell_size)).or_default().push((i, false));
        }
    }

    let mut used = vec![false; lines.len()];
    let mut clusters = Vec::new();

    for seed in 0..lines.len() {
        if used[seed] {
            continue;
        }
        used[seed] = true;

        let mut cluster = vec![ClusterEntry { line: seed, reversed: false }];

        if let Some((_, mut trailing)) = lines[seed].as_ref().endpoints() {
            while let Some((next, reversed)) =
                find_nearest_neighbor(trailing, lines, &grid, &used, cell_size, reach_sq)
            {
                used[next] = true;
                cluster.push(ClusterEntry { line: next, reversed });

                if let Some((first, last)) = lines[next].as_ref().endpoints() {
                    trailing = if reversed { first } else { last };
                }
            }
        }

        clusters.push(cluster);
    }

    log::debug!(
        "clustered {} lines into {} clusters (grid {})",
        lines.len(),
        clusters.len(),
        grid_size
    );

    clusters
}

/// Find the unused line with an endpoint nearest to `from`, within reach.
///
/// Returns the line index and whether it has to be reversed (i.e. its last
/// point is the one that connects). Ties go to the lower line index, then
/// to the first point.
fn find_nearest_neighbor<P: AsRef<Polygon>>(
    from: Point,
    lines: &[P],
    grid: &EndpointGrid,
    used: &[bool],
    cell_size: Coord,
    reach_sq: i128,
) -> Option<(usize, bool)> {
    let cell = point_to_cell(from, cell_size);

    // (distance², line, reversed)
    let mut best: Option<(i128, usize, bool)> = None;

    // Check this cell and all 8 neighbors (endpoints might be in adjacent cells)
    for dx in -1..=1 {
        for dy in -1..=1 {
            let Some(candidates) = grid.get(&(cell.0.saturating_add(dx), cell.1.saturating_add(dy))) else {
                continue;
            };

            for &(line_idx, is_first) in candidates {
                if used[line_idx] {
                    continue;
                }
                let line = lines[line_idx].as_ref();
                let end = if is_first { line.first() } else { line.last() };
                let Some(end) = end else {
                    continue;
                };

                let dist_sq = end.distance_squared(&from);
                if dist_sq > reach_sq {
                    continue;
                }

                let key = (dist_sq, line_idx, !is_first);
                if best.is_none_or(|b| key < b) {
                    best = Some(key);
                }
            }
        }
    }

    best.map(|(_, line, reversed)| (line, reversed))
}

/// Statistics about a clustering result.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterStats {
    /// Number of input lines
    pub input_lines: usize,
    /// Number of clusters
    pub clusters: usize,
    /// Average lines per cluster
    pub avg_cluster_size: f64,
    /// Largest cluster (lines)
    pub max_cluster_size: usize,
    /// Reduction ratio (1.0 - clusters/lines)
    pub reduction_ratio: f64,
}

impl ClusterStats {
    pub fn from_clusters(clusters: &[Cluster]) -> Self {
        let input_lines: usize = clusters.iter().map(|c| c.len()).sum();
        let count = clusters.len();

        Self {
            input_lines,
            clusters: count,
            avg_cluster_size: if count > 0 {
                input_lines as f64 / count as f64
            } else {
                0.0
            },
            max_cluster_size: clusters.iter().map(|c| c.len()).max().unwrap_or(0),
            reduction_ratio: if input_lines > 0 {
                1.0 - (count as f64 / input_lines as f64)
            } else {
                0.0
            },
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x1: i64, y1: i64, x2: i64, y2: i64) -> Polygon {
        Polygon::from_coords(&[(x1, y1), (x2, y2)])
    }

    fn entry(line: usize, reversed: bool) -> ClusterEntry {
        ClusterEntry { line, reversed }
    }

    #[test]
    fn cluster_empty() {
        let lines: Vec<Polygon> = Vec::new();
        assert!(cluster_lines(&lines, 10).is_empty());
    }

    #[test]
    fn cluster_single_line() {
        let lines = vec![line(0, 0, 10, 10)];
        assert_eq!(cluster_lines(&lines, 10), vec![vec![entry(0, false)]]);
    }

    #[test]
    fn cluster_follows_trailing_end() {
        let lines = vec![
            line(0, 0, 100, 0),
            line(100, 5, 0, 5),
            line(0, 10, 100, 10),
        ];
        let clusters = cluster_lines(&lines, 10);
        assert_eq!(clusters, vec![vec![entry(0, false), entry(1, false), entry(2, false)]]);
    }

    #[test]
    fn cluster_reverses_lines_to_connect() {
        // Second line is stored pointing away from the first line's end
        let lines = vec![line(0, 0, 100, 0), line(0, 5, 100, 5)];
        let clusters = cluster_lines(&lines, 10);
        assert_eq!(clusters, vec![vec![entry(0, false), entry(1, true)]]);
    }

    #[test]
    fn cluster_picks_nearest_candidate() {
        let lines = vec![
            line(0, 0, 100, 0),
            line(100, 8, 0, 8),   // 8 away
            line(100, 3, 0, 3),   // 3 away
        ];
        let clusters = cluster_lines(&lines, 10);
        assert_eq!(clusters[0][1], entry(2, false));
    }

    #[test]
    fn cluster_respects_grid_size() {
        let lines = vec![line(0, 0, 100, 0), line(100, 50, 0, 50)];

        assert_eq!(cluster_lines(&lines, 50).len(), 1);
        assert_eq!(cluster_lines(&lines, 49).len(), 2);
    }

    #[test]
    fn cluster_only_extends_forward() {
        // Line 1 ends where line 0 starts, but clusters only grow at the trailing end
        let lines = vec![line(0, 0, 100, 0), line(-100, 0, -1, 0)];
        let clusters = cluster_lines(&lines, 10);
        assert_eq!(clusters, vec![vec![entry(0, false)], vec![entry(1, false)]]);
    }

    #[test]
    fn cluster_zero_grid_joins_coincident_ends_only() {
        let lines = vec![line(0, 0, 10, 0), line(10, 0, 20, 0), line(21, 0, 30, 0)];
        let clusters = cluster_lines(&lines, 0);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0], vec![entry(0, false), entry(1, false)]);
    }

    #[test]
    fn cluster_negative_coordinates() {
        let lines = vec![line(-50, -50, -10, -10), line(-9, -9, 30, 30)];
        let clusters = cluster_lines(&lines, 5);
        assert_eq!(clusters.len(), 1);
    }

    #[test]
    fn cluster_near_coordinate_limits() {
        // Endpoints in the last grid row; the neighbor cell lookup must not overflow
        let (far, top) = (i64::MAX - 10, i64::MAX);
        let lines = vec![line(far - 20, top, far - 5, top), line(far - 3, top, far, top)];
        let clusters = cluster_lines(&lines, 1);
        assert_eq!(clusters.len(), 2);
        assert_eq!(cluster_lines(&lines, 5), vec![vec![entry(0, false), entry(1, false)]]);
    }

    #[test]
    fn empty_lines_stay_alone() {
        let lines = vec![
            line(0, 0, 10, 0),
            Polygon::default(),
            line(10, 1, 20, 1),
        ];
        let clusters = cluster_lines(&lines, 5);
        assert_eq!(clusters, vec![
            vec![entry(0, false), entry(2, false)],
            vec![entry(1, false)],
        ]);
    }

    #[test]
    fn cluster_stats() {
        let lines = vec![
            line(0, 0, 10, 0),
            line(10, 0, 20, 0),
            line(500, 500, 510, 510),
        ];
        let clusters = cluster_lines(&lines, 2);
        let stats = ClusterStats::from_clusters(&clusters);

        assert_eq!(stats.input_lines, 3);
        assert_eq!(stats.clusters, 2);
        assert_eq!(stats.max_cluster_size, 2);
        assert!(stats.reduction_ratio > 0.3);
    }
}
