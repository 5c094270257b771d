use std::error::Error as StdError;

use thiserror::Error;

use newt_core::equation::EquationSetError;

use crate::{newton_raphson, preprocess::PreprocessError};

/// Errors that can occur while classifying or solving a system.
#[derive(Debug, Error)]
pub enum SolveError {
    /// Fewer equations than unknowns; no solve is attempted.
    #[error("the system is under-determined: {equations} equations for {variables} unknowns")]
    UnderDetermined { equations: usize, variables: usize },

    /// Every attempted equation subset left some dropped equation
    /// unsatisfied.
    #[error("no equation subset satisfied the full system after {attempts} attempts")]
    NoSolution { attempts: usize },

    /// A dropped equation failed to evaluate during verification.
    #[error("failed to evaluate dropped equation {index} during verification")]
    Verify {
        index: usize,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// Equation input failed to normalize.
    #[error(transparent)]
    Set(#[from] EquationSetError),

    /// Over-determined reduction failed.
    #[error(transparent)]
    Preprocess(#[from] PreprocessError),

    /// A Newton-Raphson run failed. Note that a singular Jacobian arrives
    /// here directly: unlike a failed verification, it is not retried.
    #[error(transparent)]
    Newton(#[from] newton_raphson::Error),
}

impl SolveError {
    /// The stable error code for this failure, for catalog lookup.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnderDetermined { .. } => "under.determined.system",
            Self::NoSolution { .. } => "overdetermined.no.solution",
            Self::Verify { .. } => "expression.evaluation",
            Self::Set(source) => source.code(),
            Self::Preprocess(source) => source.code(),
            Self::Newton(source) => source.code(),
        }
    }
}
