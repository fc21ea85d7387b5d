use thiserror::Error;

/// Errors surfaced by grid construction and the connectivity engine.
///
/// Every failure is synchronous and leaves the engine state untouched: a
/// rejected probability keeps the previous assignment, a rejected coordinate
/// query has no side effects at all.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PercolationError {
    #[error("invalid grid dimensions {width}x{height}: both must be at least 1")]
    InvalidDimension { width: u32, height: u32 },

    #[error("probability {0} is outside [0, 1]")]
    InvalidProbability(f64),

    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfRange {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}
