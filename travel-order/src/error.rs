//! Error types for travel-order.
//!
//! The optimizers themselves never fail; these errors come from the outer
//! surfaces that load configuration and input geometry.

use thiserror::Error;

/// Result type alias for travel-order operations.
pub type Result<T> = std::result::Result<T, OrderError>;

/// Errors that can occur while loading configuration or input paths.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Reading a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed.
    #[error("Configuration parse error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// Configuration parsed but holds an unusable value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// SVG input could not be parsed.
    #[error("SVG parse error: {0}")]
    Svg(String),

    /// The input contained no usable paths.
    #[error("No paths found in input")]
    NoPaths,
}
