use thiserror::Error;

/// Errors that can occur when constructing or operating on a [`Matrix`].
///
/// [`Matrix`]: crate::Matrix
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MatrixError {
    /// No matrix data was provided.
    #[error("matrix not provided")]
    Missing,

    /// Dimensions are zero or otherwise unusable.
    #[error("cannot create a {rows}x{cols} matrix")]
    Initialization { rows: usize, cols: usize },

    /// A row's length differs from the first row's.
    #[error("row {row} has {found} columns, expected {expected}")]
    VaryingSize {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Row counts differ in an element-wise operation.
    #[error("row counts differ: {left} vs {right}")]
    RowMismatch { left: usize, right: usize },

    /// Column counts differ in an element-wise operation.
    #[error("column counts differ: {left} vs {right}")]
    ColMismatch { left: usize, right: usize },

    /// Shapes are incompatible for the requested operation.
    #[error("incompatible shapes {left_rows}x{left_cols} and {right_rows}x{right_cols}")]
    SizeMismatch {
        left_rows: usize,
        left_cols: usize,
        right_rows: usize,
        right_cols: usize,
    },

    /// The matrix is singular; no pivot of usable magnitude was found.
    #[error("matrix is singular")]
    Singular,
}

impl MatrixError {
    /// The stable error code for this failure, for catalog lookup.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Missing => "matrix.missing",
            Self::Initialization { .. } => "matrix.initialization.incorrect",
            Self::VaryingSize { .. } => "matrix.varying.size",
            Self::RowMismatch { .. } => "size.mismatch.rows",
            Self::ColMismatch { .. } => "size.mismatch.cols",
            Self::SizeMismatch { .. } => "size.mismatch",
            Self::Singular => "decomposition",
        }
    }
}
