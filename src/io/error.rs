//! Error types for grid construction and hash analysis

use std::fmt;
use std::path::PathBuf;

/// Main error type for fallible crate operations
///
/// Grid CRUD and the hash functions are total; errors only arise when
/// validating construction parameters and running the analysis tool.
#[derive(Debug)]
pub enum GridError {
    /// Cell size is negative, NaN or infinite
    InvalidCellSize {
        /// Rejected cell size
        value: f64,
    },

    /// Analysis parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Measured collision ratio is above the accepted budget
    CollisionBudgetExceeded {
        /// Name of the sampled workload
        workload: &'static str,
        /// Observed collision ratio
        ratio: f64,
        /// Largest acceptable ratio
        budget: f64,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCellSize { value } => {
                write!(
                    f,
                    "Invalid cell size {value}: must be finite and non-negative"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::CollisionBudgetExceeded {
                workload,
                ratio,
                budget,
            } => {
                write!(
                    f,
                    "Collision ratio {:.4}% for {workload} exceeds budget {:.4}%",
                    ratio * 100.0,
                    budget * 100.0
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for crate results
pub type Result<T> = std::result::Result<T, GridError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> GridError {
    GridError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a file system error for a specific path and operation
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> GridError {
    GridError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
