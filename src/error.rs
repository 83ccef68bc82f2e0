use std::error;
use std::fmt;

/// Error to represent malformed field data or an unsupported kernel
/// request. Numeric degeneracies (zero cell distance or volume) are not
/// errors; they propagate through the operators as IEEE inf or nan.
#[derive(Debug)]
pub enum Error {
    /// An array initializer whose length disagrees with the mesh cell count.
    DimensionMismatch { expected: usize, got: usize },

    /// A value whose shape disagrees with the cells it is being assigned to.
    TypeMismatch { expected: usize, got: usize },

    /// A kernel was requested for an array rank the loop generator does not
    /// support.
    UnsupportedKernelShape(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        use Error::*;

        match self {
            DimensionMismatch { expected, got } => {
                writeln!(fmt, "array length {} does not match cell count {}", got, expected)
            }
            TypeMismatch { expected, got } => {
                writeln!(fmt, "value of length {} is not a scalar or an array of length {}", got, expected)
            }
            UnsupportedKernelShape(rank) => {
                writeln!(fmt, "no kernel for rank-{} arrays (supported ranks are 1 to 3)", rank)
            }
        }
    }
}

impl error::Error for Error {}
