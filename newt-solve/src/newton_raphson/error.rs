use std::error::Error as StdError;

use thiserror::Error;

use newt_core::matrix::MatrixError;

/// Errors that can occur during a Newton-Raphson run.
#[derive(Debug, Error)]
pub enum Error {
    /// The system is not square.
    #[error("system has {equations} equations but {variables} unknowns")]
    VariableMismatch { equations: usize, variables: usize },

    /// The config failed validation.
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: &'static str },

    /// The Jacobian is singular at the current point; the run aborts.
    #[error("jacobian is singular at the current point")]
    Singular,

    /// An equation failed to evaluate.
    #[error("failed to evaluate equation {index}")]
    Eval {
        index: usize,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// A matrix operation failed outside of inversion.
    #[error("matrix operation failed")]
    Matrix(#[source] MatrixError),

    /// The iteration limit was reached before the residual change settled.
    #[error("no convergence after {iters} iterations")]
    NoConvergence { iters: usize },
}

impl Error {
    /// The stable error code for this failure, for catalog lookup.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::VariableMismatch { .. } => "variable.mismatch",
            Self::InvalidConfig { .. } => "solver.config.invalid",
            Self::Singular => "decomposition",
            Self::Eval { .. } => "expression.evaluation",
            Self::Matrix(source) => source.code(),
            Self::NoConvergence { .. } => "no.convergence",
        }
    }
}
