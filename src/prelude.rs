use std::fmt;

/// Error type for rust_ffnn
#[derive(Debug, PartialEq, Clone)]
pub enum Error {
    /// Indicates a runtime shape is incompatible with a matrix's declared extents.
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// Indicates an element access outside of a matrix's extents.
    IndexOutOfRange {
        row: usize,
        col: usize,
        dim: (usize, usize),
    },
    /// Indicates a flat slice whose length doesn't match what the operation needs.
    LengthMismatch { expected: usize, found: usize },
    /// Indicates bounds that can't describe a uniform distribution.
    InvalidRange { min: f64, max: f64 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ShapeMismatch { expected, found } => write!(
                f,
                "shape mismatch: expected {}x{}, found {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
            Error::IndexOutOfRange { row, col, dim } => write!(
                f,
                "index (r{row}, c{col}) out of range for {}x{} matrix",
                dim.0, dim.1
            ),
            Error::LengthMismatch { expected, found } => {
                write!(f, "length mismatch: expected {expected}, found {found}")
            }
            Error::InvalidRange { min, max } => write!(f, "invalid range [{min}, {max}]"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
