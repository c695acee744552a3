//! Benchmark command implementation.

use std::time::Instant;

use travel_order::geometry::SCALING_FACTOR;
use travel_order::{LineOrderOptimizer, Result, scale};

use super::common::{OrderArgs, load_paths};

/// Grid sizes compared by the benchmark, in mm.
const GRID_SIZES_MM: [f64; 5] = [0.0, 0.5, 1.0, 2.0, 5.0];

/// Execute the benchmark command.
///
/// Orders the SVG's open lines once per grid size to show the
/// speed/travel trade-off of clustering.
pub fn cmd_benchmark(args: &OrderArgs) -> Result<()> {
    let start_load = Instant::now();
    let paths = load_paths(&args.input)?;
    println!("Loaded {} lines in {:?}", paths.lines.len(), start_load.elapsed());

    println!();
    println!("═══════════════════════════════════════════════");
    println!("  LINE ORDER BENCHMARK: {} lines", paths.lines.len());
    println!("═══════════════════════════════════════════════");

    for grid_mm in GRID_SIZES_MM {
        let start = Instant::now();
        let mut optimizer = LineOrderOptimizer::new(args.config.start, scale(grid_mm));
        optimizer.add_lines(&paths.lines);
        optimizer.optimize();
        let elapsed = start.elapsed();

        let clusters = optimizer.cluster_stats().map_or(0, |s| s.clusters);
        println!(
            "  grid {:>4.1} mm | clusters {:>6} | travel {:>10.1} mm | Time {:.2} ms",
            grid_mm,
            clusters,
            optimizer.travel_distance() / SCALING_FACTOR,
            elapsed.as_secs_f64() * 1000.0
        );
    }
    println!("═══════════════════════════════════════════════");

    Ok(())
}

pub fn print_usage() {
    eprintln!("Usage: travel-order benchmark <input.svg> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --start <x,y>           Nozzle start position in mm (default: 0,0)");
    eprintln!();
    eprintln!("Benchmarks line ordering across cluster grid sizes.");
}
