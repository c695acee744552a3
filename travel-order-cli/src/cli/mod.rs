//! CLI command implementations.
//!
//! This module contains the implementations for the various CLI subcommands:
//! - `parts` - Order closed paths and place seams
//! - `lines` - Order open paths, clustering neighbors first
//! - `benchmark` - Compare line ordering across cluster grid sizes

pub mod benchmark;
pub mod common;
pub mod lines;
pub mod parts;

pub use benchmark::cmd_benchmark;
pub use common::parse_order_args;
pub use lines::cmd_lines;
pub use parts::cmd_parts;
