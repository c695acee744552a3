//! Parts command implementation.

use std::time::Instant;

use travel_order::{Result, document_order, part_travel_distance};

use super::common::{JsonOrder, JsonTravel, OrderArgs, load_paths, write_output};

/// Execute the parts command.
pub fn cmd_parts(args: &OrderArgs) -> Result<()> {
    let paths = load_paths(&args.input)?;
    let parts = &paths.parts;
    log::info!(
        "Loaded {} parts ({} open lines ignored)",
        parts.len(),
        paths.lines.len()
    );

    let start = Instant::now();
    let mut optimizer = args.config.part_optimizer();
    optimizer.add_polygons(parts);
    optimizer.optimize();
    log::info!(
        "Ordered {} parts with {} seams in {:?}",
        parts.len(),
        args.config.seam.name(),
        start.elapsed()
    );

    let (doc_order, doc_starts) = document_order(parts.len());
    let doc_travel = part_travel_distance(args.config.start, parts, &doc_order, &doc_starts);

    let result = JsonOrder {
        kind: "parts",
        shapes: parts.len(),
        visit_order: optimizer.visit_order().to_vec(),
        start_index_per_shape: optimizer.start_index_per_shape().to_vec(),
        travel: JsonTravel::from_units(doc_travel, optimizer.travel_distance()),
        clusters: None,
    };

    write_output(&result, args.format, args.output.as_deref())
}

pub fn print_usage() {
    eprintln!("Usage: travel-order parts <input.svg> [options]");
    eprintln!();
    eprintln!("Orders the closed paths of an SVG and picks a seam vertex for each.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output <file>     Output file (default: stdout)");
    eprintln!("  -f, --format <fmt>      Output format: text, json (default: text)");
    eprintln!("  --json                  Shorthand for --format json");
    eprintln!("  --start <x,y>           Nozzle start position in mm (default: 0,0)");
    eprintln!("  --seam <type>           Seam placement: shortest, random, back (default: shortest)");
    eprintln!("  --seed <n>              Seed for random seams (default: 0)");
    eprintln!("  --config <file.yaml>    Load settings from a YAML file");
}
