//! Shared helpers for CLI commands: option parsing, input loading and
//! result output.

use std::fs;
use std::io::{self, Read};

use serde::Serialize;

use travel_order::{
    OrderConfig, Point, Result, SeamType, SvgPaths, extract_paths_from_svg, geometry::SCALING_FACTOR,
    scale,
};

/// Output format options.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Options shared by the ordering commands.
#[derive(Debug)]
pub struct OrderArgs {
    pub input: String,
    pub output: Option<String>,
    pub format: OutputFormat,
    pub config: OrderConfig,
}

/// Parse the options of an ordering command.
///
/// Exits the process on malformed options, after printing `usage`.
pub fn parse_order_args(args: &[String], usage: fn()) -> Option<OrderArgs> {
    let mut input: Option<&str> = None;
    let mut output: Option<&str> = None;
    let mut format = OutputFormat::Text;
    let mut config_path: Option<&str> = None;

    // Command-line values win over the config file, so they are applied last
    let mut start: Option<Point> = None;
    let mut seam: Option<SeamType> = None;
    let mut seed: Option<u64> = None;
    let mut grid_mm: Option<f64> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                i += 1;
                if i < args.len() {
                    output = Some(args[i].as_str());
                }
            }
            "-f" | "--format" => {
                i += 1;
                if i < args.len() {
                    format = match args[i].to_lowercase().as_str() {
                        "json" => OutputFormat::Json,
                        "text" => OutputFormat::Text,
                        other => fail(&format!("Unknown format: {}. Use 'text' or 'json'.", other), usage),
                    };
                }
            }
            "--json" => {
                format = OutputFormat::Json;
            }
            "--config" => {
                i += 1;
                if i < args.len() {
                    config_path = Some(args[i].as_str());
                }
            }
            "--start" => {
                i += 1;
                if i < args.len() {
                    start = Some(parse_point(&args[i]).unwrap_or_else(|| {
                        fail(&format!("Invalid start point: {}. Use 'x,y' in mm.", args[i]), usage)
                    }));
                }
            }
            "--seam" => {
                i += 1;
                if i < args.len() {
                    seam = Some(SeamType::from_name(&args[i]).unwrap_or_else(|| {
                        fail(&format!("Unknown seam type: {}. Use 'shortest', 'random' or 'back'.", args[i]), usage)
                    }));
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    seed = Some(args[i].parse().unwrap_or_else(|_| {
                        fail(&format!("Invalid seed: {}", args[i]), usage)
                    }));
                }
            }
            "--grid" => {
                i += 1;
                if i < args.len() {
                    grid_mm = Some(args[i].parse().unwrap_or_else(|_| {
                        fail(&format!("Invalid grid size: {}", args[i]), usage)
                    }));
                }
            }
            "-h" | "--help" => {
                usage();
                return None;
            }
            "-" => {
                if input.is_none() {
                    input = Some("-");
                }
            }
            path if !path.starts_with('-') => {
                if input.is_none() {
                    input = Some(path);
                }
            }
            unknown => {
                log::warn!("Unknown option: {}", unknown);
            }
        }
        i += 1;
    }

    let input = input.unwrap_or_else(|| fail("SVG file required (use '-' for stdin)", usage));

    let mut config = match config_path {
        Some(path) => OrderConfig::load(path).unwrap_or_else(|e| {
            log::error!("Failed to load config {}: {}", path, e);
            std::process::exit(1);
        }),
        None => OrderConfig::default(),
    };
    if let Some(start) = start {
        config.start = start;
    }
    if let Some(seam) = seam {
        config.seam = seam;
    }
    if let Some(seed) = seed {
        config.seed = seed;
    }
    if let Some(grid_mm) = grid_mm {
        config = config.with_grid_mm(grid_mm);
    }
    if let Err(e) = config.validate() {
        fail(&e.to_string(), usage);
    }

    Some(OrderArgs {
        input: input.to_string(),
        output: output.map(str::to_string),
        format,
        config,
    })
}

fn fail(message: &str, usage: fn()) -> ! {
    log::error!("{}", message);
    usage();
    std::process::exit(1);
}

/// Parse `x,y` in millimetres.
pub fn parse_point(text: &str) -> Option<Point> {
    let (x, y) = text.split_once(',')?;
    let x: f64 = x.trim().parse().ok()?;
    let y: f64 = y.trim().parse().ok()?;
    Some(Point::new(scale(x), scale(y)))
}

/// Read and parse the SVG input, `-` meaning stdin.
pub fn load_paths(input: &str) -> Result<SvgPaths> {
    let content = if input == "-" {
        log::info!("Reading SVG from stdin...");
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        log::info!("Loading: {}", input);
        fs::read_to_string(input)?
    };

    extract_paths_from_svg(&content)
}

/// Travel before and after optimization, in mm.
#[derive(Serialize, Debug)]
pub struct JsonTravel {
    pub document: f64,
    pub optimized: f64,
}

impl JsonTravel {
    /// Convert travel distances in coordinate units to millimetres.
    pub fn from_units(document: f64, optimized: f64) -> Self {
        Self {
            document: document / SCALING_FACTOR,
            optimized: optimized / SCALING_FACTOR,
        }
    }

    pub fn reduction_percent(&self) -> f64 {
        if self.document > 0.0 {
            ((self.document - self.optimized) / self.document * 100.0).max(0.0)
        } else {
            0.0
        }
    }
}

/// Clustering summary for line ordering output.
#[derive(Serialize, Debug)]
pub struct JsonClusters {
    pub count: usize,
    pub avg_size: f64,
    pub max_size: usize,
}

/// Ordering result in JSON output format.
#[derive(Serialize, Debug)]
pub struct JsonOrder {
    pub kind: &'static str,
    pub shapes: usize,
    pub visit_order: Vec<usize>,
    pub start_index_per_shape: Vec<usize>,
    pub travel: JsonTravel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clusters: Option<JsonClusters>,
}

impl JsonOrder {
    /// Human-readable summary, one fact per line.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        text.push_str(&format!("{} {}\n", self.shapes, self.kind));
        text.push_str(&format!("order: {}\n", join(&self.visit_order)));
        text.push_str(&format!("starts: {}\n", join(&self.start_index_per_shape)));
        if let Some(clusters) = &self.clusters {
            text.push_str(&format!(
                "clusters: {} (avg {:.1}, max {})\n",
                clusters.count, clusters.avg_size, clusters.max_size
            ));
        }
        text.push_str(&format!(
            "travel: {:.3} mm -> {:.3} mm ({:.0}% reduction)",
            self.travel.document,
            self.travel.optimized,
            self.travel.reduction_percent()
        ));
        text
    }
}

fn join(values: &[usize]) -> String {
    values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(" ")
}

/// Render and write the result to the output file or stdout.
pub fn write_output(result: &JsonOrder, format: OutputFormat, output: Option<&str>) -> Result<()> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string(result).map_err(io::Error::other)?,
        OutputFormat::Text => result.to_text(),
    };

    match output {
        Some("-") | None => {
            println!("{}", rendered);
        }
        Some(path) => {
            fs::write(path, &rendered)?;
            log::info!("Wrote: {}", path);
        }
    }
    Ok(())
}
