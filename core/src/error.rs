/// Errors produced while building or solving a variational calculation.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A user supplied value was out of range or malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The number of widths doesn't match the size of the basis.
    #[error("basis has {expected} functions but {found} widths were supplied")]
    DimensionMismatch { expected: usize, found: usize },
    /// The overlap matrix could not be factorized or has a non-positive eigenvalue.
    #[error("overlap matrix is not positive definite")]
    NotPositiveDefinite,
    /// The objective returned NaN or an infinity at a point the minimizer had to keep.
    #[error("objective function returned a non-finite value ({value})")]
    NonFiniteObjective { value: f64 },
    /// The simplex collapsed or blew up.
    #[error("simplex became degenerate")]
    DegenerateSimplex,
}

pub type Result<T> = std::result::Result<T, Error>;
