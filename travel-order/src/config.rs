//! Optimizer configuration.
//!
//! Settings can come from a YAML file; anything left out falls back to its
//! default.
//!
//! ```yaml
//! start: { x: 0, y: 0 }
//! seam: back
//! seed: 7
//! cluster_grid_size: 2000
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{OrderError, Result};
use crate::geometry::{Coord, Point, scale};
use crate::line_order::LineOrderOptimizer;
use crate::part_order::PartOrderOptimizer;
use crate::seam::SeamType;

/// Default cluster grid size: 2mm.
pub const DEFAULT_CLUSTER_GRID_SIZE: Coord = 2000;

/// Settings shared by the part and line optimizers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderConfig {
    /// Nozzle position before the layer starts, in coordinate units
    pub start: Point,
    /// Seam placement for closed contours
    pub seam: SeamType,
    /// Seed for the random seam policy
    pub seed: u64,
    /// Largest gap between line ends that still clusters them, in coordinate units
    pub cluster_grid_size: Coord,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            start: Point::new(0, 0),
            seam: SeamType::Shortest,
            seed: 0,
            cluster_grid_size: DEFAULT_CLUSTER_GRID_SIZE,
        }
    }
}

impl OrderConfig {
    /// Load a configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate a YAML configuration.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: OrderConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the cluster grid size from millimetres.
    pub fn with_grid_mm(mut self, mm: f64) -> Self {
        self.cluster_grid_size = scale(mm);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.cluster_grid_size < 0 {
            return Err(OrderError::InvalidConfig(format!(
                "cluster_grid_size must not be negative, got {}",
                self.cluster_grid_size
            )));
        }
        Ok(())
    }

    /// A part optimizer with these settings.
    pub fn part_optimizer<'a>(&self) -> PartOrderOptimizer<'a> {
        PartOrderOptimizer::new(self.start, self.seam).with_seed(self.seed)
    }

    /// A line optimizer with these settings.
    pub fn line_optimizer<'a>(&self) -> LineOrderOptimizer<'a> {
        LineOrderOptimizer::new(self.start, self.cluster_grid_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_gives_defaults() {
        let config = OrderConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, OrderConfig::default());
    }

    #[test]
    fn full_yaml_parses() {
        let yaml = r#"
start: { x: 1500, y: -200 }
seam: hidden
seed: 7
cluster_grid_size: 500
"#;
        let config = OrderConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.start, Point::new(1500, -200));
        assert_eq!(config.seam, SeamType::Back);
        assert_eq!(config.seed, 7);
        assert_eq!(config.cluster_grid_size, 500);
    }

    #[test]
    fn negative_grid_is_rejected() {
        let result = OrderConfig::from_yaml_str("cluster_grid_size: -1");
        assert!(matches!(result, Err(OrderError::InvalidConfig(_))));
    }

    #[test]
    fn unknown_seam_is_a_parse_error() {
        let result = OrderConfig::from_yaml_str("seam: sharpest");
        assert!(matches!(result, Err(OrderError::Config(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = OrderConfig::load("/nonexistent/travel-order.yaml");
        assert!(matches!(result, Err(OrderError::Io(_))));
    }

    #[test]
    fn builds_configured_optimizers() {
        let config = OrderConfig {
            start: Point::new(5, 5),
            seam: SeamType::Random,
            seed: 3,
            cluster_grid_size: 10,
        };
        let parts = config.part_optimizer();
        assert_eq!(parts.start_point(), Point::new(5, 5));
        assert_eq!(parts.seam_type(), SeamType::Random);

        let lines = config.line_optimizer();
        assert_eq!(lines.cluster_grid_size(), 10);
        assert_eq!(OrderConfig::default().with_grid_mm(0.5).cluster_grid_size, 500);
    }
}
