use std::error::Error as StdError;

use thiserror::Error;

/// Errors that can occur while normalizing equation input.
#[derive(Debug, Error)]
pub enum EquationSetError {
    /// A raw equation string contained more than one `=`.
    #[error("equation `{text}` contains more than one `=`")]
    IncorrectFormat { text: String },

    /// After filtering, no equation referenced any variable.
    #[error("no unknown variables found in the equations")]
    NoVariables,

    /// The expression parser rejected one side of an equation.
    #[error("failed to parse `{text}`")]
    Parse {
        text: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl EquationSetError {
    /// The stable error code for this failure, for catalog lookup.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::IncorrectFormat { .. } => "equation.incorrect.format",
            Self::NoVariables => "no.variables",
            Self::Parse { .. } => "expression.parse",
        }
    }
}
