//! The expression capability consumed by the solver.
//!
//! The core never inspects how an expression is represented; it only needs
//! to evaluate one at a point and ask which variables it references. Both
//! sides of that contract live here as traits, implemented elsewhere (see
//! the `newt-expr` crate for the `evalexpr`-backed implementation).

use std::collections::HashMap;

/// Variable name to value bindings used for evaluation.
pub type Bindings = HashMap<String, f64>;

/// An opaque scalar expression: an evaluator plus a variable-name reporter.
pub trait Expression {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates the expression with the given variable bindings.
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails, e.g. a referenced variable is
    /// missing from `bindings`.
    fn evaluate(&self, bindings: &Bindings) -> Result<f64, Self::Error>;

    /// The variables the expression references, ordered by first appearance
    /// and de-duplicated.
    fn variables(&self) -> Vec<String>;
}

/// Parses expression text into an [`Expression`].
pub trait ExpressionParser {
    type Expr: Expression;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Parses one side of an equation.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid expression.
    fn parse(&self, text: &str) -> Result<Self::Expr, Self::Error>;
}
