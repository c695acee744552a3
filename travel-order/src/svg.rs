//! SVG input - extract part outlines and open lines from SVG files.
//!
//! Uses usvg for complete SVG resolution (CSS, transforms, etc.)
//! then walks the tree and turns every subpath into a point sequence.
//! Closed subpaths become parts, open ones become lines.
//!
//! SVG user units are read as millimetres and scaled to coordinate units.
//!
//! ## Curve Flattening
//!
//! SVG paths contain Bézier curves (cubic and quadratic). These are
//! "flattened" into line segments with lyon_geom at a fixed tolerance.

use lyon_geom::{CubicBezierSegment, QuadraticBezierSegment, point};
use usvg::tiny_skia_path::PathSegment;

use crate::error::{OrderError, Result};
use crate::geometry::{Point, Polygon, Polygons};

/// Tolerance for curve flattening, in SVG units.
const CURVE_TOLERANCE: f32 = 0.1;

/// Paths found in an SVG document, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SvgPaths {
    /// Closed subpaths (rects, circles, paths ending in `Z`)
    pub parts: Polygons,
    /// Open subpaths (lines, polylines, unclosed paths)
    pub lines: Polygons,
}

impl SvgPaths {
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty() && self.lines.is_empty()
    }
}

/// Extract all paths from an SVG document.
pub fn extract_paths_from_svg(svg_content: &str) -> Result<SvgPaths> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg_content, &options)
        .map_err(|e| OrderError::Svg(e.to_string()))?;

    let mut paths = SvgPaths::default();
    extract_from_group(tree.root(), &mut paths);

    log::debug!(
        "extracted {} parts and {} lines from SVG",
        paths.parts.len(),
        paths.lines.len()
    );

    if paths.is_empty() {
        Err(OrderError::NoPaths)
    } else {
        Ok(paths)
    }
}

fn extract_from_group(group: &usvg::Group, paths: &mut SvgPaths) {
    for child in group.children() {
        match child {
            usvg::Node::Group(group) => extract_from_group(group, paths),
            usvg::Node::Path(path) => extract_from_path(path, paths),
            // Ignore text, images, etc.
            _ => {}
        }
    }
}

/// Points of one subpath while it is being collected.
#[derive(Default)]
struct Subpath {
    points: Vec<(f32, f32)>,
    closed: bool,
}

impl Subpath {
    fn finish(self, paths: &mut SvgPaths) {
        let mut points: Vec<Point> = self
            .points
            .iter()
            .map(|&(x, y)| Point::from_mm(x as f64, y as f64))
            .collect();
        points.dedup();

        if self.closed {
            // The closing segment is implicit for parts
            if points.len() > 1 && points.first() == points.last() {
                points.pop();
            }
            if points.len() >= 3 {
                paths.parts.push(Polygon::new(points));
            }
        } else if points.len() >= 2 {
            paths.lines.push(Polygon::new(points));
        }
    }

    fn last(&self) -> Option<(f32, f32)> {
        self.points.last().copied()
    }
}

fn extract_from_path(path: &usvg::Path, paths: &mut SvgPaths) {
    // Path data is in local coordinates; bring it into document space
    let Some(data) = path.data().clone().transform(path.abs_transform()) else {
        log::debug!("skipping path '{}': degenerate transform", path.id());
        return;
    };

    let mut current = Subpath::default();

    for segment in data.segments() {
        match segment {
            PathSegment::MoveTo(p) => {
                std::mem::take(&mut current).finish(paths);
                current.points.push((p.x, p.y));
            }
            PathSegment::LineTo(p) => {
                current.points.push((p.x, p.y));
            }
            PathSegment::QuadTo(ctrl, p) => {
                if let Some((lx, ly)) = current.last() {
                    let curve = QuadraticBezierSegment {
                        from: point(lx, ly),
                        ctrl: point(ctrl.x, ctrl.y),
                        to: point(p.x, p.y),
                    };
                    curve.for_each_flattened(CURVE_TOLERANCE, &mut |segment| {
                        current.points.push((segment.to.x, segment.to.y));
                    });
                } else {
                    current.points.push((p.x, p.y));
                }
            }
            PathSegment::CubicTo(ctrl1, ctrl2, p) => {
                if let Some((lx, ly)) = current.last() {
                    let curve = CubicBezierSegment {
                        from: point(lx, ly),
                        ctrl1: point(ctrl1.x, ctrl1.y),
                        ctrl2: point(ctrl2.x, ctrl2.y),
                        to: point(p.x, p.y),
                    };
                    curve.for_each_flattened(CURVE_TOLERANCE, &mut |segment| {
                        current.points.push((segment.to.x, segment.to.y));
                    });
                } else {
                    current.points.push((p.x, p.y));
                }
            }
            PathSegment::Close => {
                current.closed = true;
            }
        }
    }

    current.finish(paths);
}

// ============================================================================
// TESTS
// ============================================================================
