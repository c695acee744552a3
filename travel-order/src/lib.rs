//! # travel-order
//!
//! Visit order and start points for the shapes of one print layer.
//!
//! Between two shapes the nozzle travels without printing. This library
//! picks the order in which shapes are printed, and where each one starts,
//! so that this travel stays short:
//!
//! - [`PartOrderOptimizer`] orders closed contours and picks a seam vertex
//!   per contour
//! - [`LineOrderOptimizer`] orders open lines (e.g. infill) and picks which
//!   end each line is entered from, clustering neighboring lines first
//!
//! Both are greedy nearest-neighbor heuristics: fast and deterministic, but
//! not an exact traveling-salesman solution.
//!
//! ## Rust Lesson #7: Modules
//!
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level

pub mod cluster;
pub mod config;
pub mod error;
pub mod geometry;
pub mod line_order;
pub mod math;
pub mod order;
pub mod part_order;
pub mod seam;
pub mod svg;

// Re-export common types at crate root for convenience.
pub use cluster::{Cluster, ClusterEntry, ClusterStats, cluster_lines};
pub use config::OrderConfig;
pub use error::{OrderError, Result};
pub use geometry::{Coord, Point, Polygon, Polygons, scale, unscale};
pub use line_order::LineOrderOptimizer;
pub use order::{document_order, line_travel_distance, part_travel_distance};
pub use part_order::PartOrderOptimizer;
pub use seam::SeamType;
pub use svg::{SvgPaths, extract_paths_from_svg};
