//! Lines command implementation.

use std::time::Instant;

use travel_order::{Result, document_order, line_travel_distance, unscale};

use super::common::{JsonClusters, JsonOrder, JsonTravel, OrderArgs, load_paths, write_output};

/// Execute the lines command.
pub fn cmd_lines(args: &OrderArgs) -> Result<()> {
    let paths = load_paths(&args.input)?;
    let lines = &paths.lines;
    log::info!(
        "Loaded {} lines ({} closed paths ignored)",
        lines.len(),
        paths.parts.len()
    );

    let start = Instant::now();
    let mut optimizer = args.config.line_optimizer();
    optimizer.add_lines(lines);
    optimizer.optimize();
    log::info!(
        "Ordered {} lines with {:.3} mm clustering in {:?}",
        lines.len(),
        unscale(args.config.cluster_grid_size),
        start.elapsed()
    );

    let (doc_order, doc_starts) = document_order(lines.len());
    let doc_travel = line_travel_distance(args.config.start, lines, &doc_order, &doc_starts);

    let clusters = optimizer.cluster_stats().map(|stats| JsonClusters {
        count: stats.clusters,
        avg_size: stats.avg_cluster_size,
        max_size: stats.max_cluster_size,
    });

    let result = JsonOrder {
        kind: "lines",
        shapes: lines.len(),
        visit_order: optimizer.visit_order().to_vec(),
        start_index_per_shape: optimizer.start_index_per_shape().to_vec(),
        travel: JsonTravel::from_units(doc_travel, optimizer.travel_distance()),
        clusters,
    };

    write_output(&result, args.format, args.output.as_deref())
}

pub fn print_usage() {
    eprintln!("Usage: travel-order lines <input.svg> [options]");
    eprintln!();
    eprintln!("Orders the open paths of an SVG and picks an entry end for each.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output <file>     Output file (default: stdout)");
    eprintln!("  -f, --format <fmt>      Output format: text, json (default: text)");
    eprintln!("  --json                  Shorthand for --format json");
    eprintln!("  --start <x,y>           Nozzle start position in mm (default: 0,0)");
    eprintln!("  --grid <mm>             Cluster grid size in mm (default: 2)");
    eprintln!("  --config <file.yaml>    Load settings from a YAML file");
}
