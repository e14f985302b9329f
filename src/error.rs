//! Error types for alignment construction and evaluation.

use thiserror::Error;

/// Errors reported by segment validation and alignment evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlignmentError {
    /// A segment parameter or call argument violates its contract.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A station or local distance queried outside the valid range.
    #[error("station {station} outside range [{min}, {max}]")]
    OutOfRange { station: f64, min: f64, max: f64 },

    /// A formula denominator degenerated where a finite value is required.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),
}
