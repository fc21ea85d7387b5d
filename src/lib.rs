pub mod color;
pub mod config;
pub mod edge_grid;
pub mod engine;
pub mod error;
pub mod snapshot;

// Re-export key types for easier use by dependent crates
pub use color::ColorTable;
pub use config::{GridConfig, OutputConfig, PercolationConfig, SweepConfig};
pub use edge_grid::{Direction, EdgeGrid};
pub use engine::ConnectivityEngine;
pub use error::PercolationError;
pub use snapshot::Snapshot;
