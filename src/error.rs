//! Error types shared by every transform and by the host boundary

use thiserror::Error;

/// Result type for transform operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to the caller instead of panicking
#[derive(Error, Debug)]
pub enum Error {
    /// A transform of zero points was requested
    #[error("cannot transform an empty input")]
    EmptyInput,

    /// The input buffer does not have the length the transform needs
    #[error("wrong length of input, expected {expected}, got {actual}")]
    InputLength { expected: usize, actual: usize },

    /// The result holder does not have the length the transform produces
    #[error("wrong length of output, expected {expected}, got {actual}")]
    OutputLength { expected: usize, actual: usize },

    /// The scratch buffer is too small for the plan
    #[error("scratch buffer of length {actual} is too small, need at least {expected}")]
    ScratchLength { expected: usize, actual: usize },

    /// Column-major data that cannot be split into whole columns
    #[error("input of length {len} cannot be split into columns of {nrow} rows")]
    Shape { len: usize, nrow: usize },

    /// A host dimension attribute that is neither absent nor two-dimensional
    #[error("expected a vector or a matrix, got {0} dimensions")]
    Dimensions(usize),

    /// A host dimension attribute that disagrees with the data length
    #[error("dimensions {dim:?} do not match data of length {len}")]
    DimensionMismatch { dim: Vec<usize>, len: usize },

    /// An integer flag from the host outside of its accepted range
    #[error("unsupported value {value} for {flag}")]
    InvalidFlag { flag: &'static str, value: i32 },

    /// Host data of a type the operation cannot coerce
    #[error("expected {expected} data, got {actual}")]
    DataType {
        expected: &'static str,
        actual: &'static str,
    },

    /// Interleaved `(re, im)` data with a dangling value
    #[error("interleaved complex data must have an even number of values, got {0}")]
    OddInterleaved(usize),

    /// Error reported by the real-valued FFT engine
    #[error(transparent)]
    Engine(#[from] realfft::FftError),
}

pub(crate) fn check_len(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(Error::InputLength { expected, actual });
    }
    Ok(())
}

pub(crate) fn check_output_len(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(Error::OutputLength { expected, actual });
    }
    Ok(())
}
