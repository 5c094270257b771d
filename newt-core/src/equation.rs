//! Equations and the variable registry derived from them.
//!
//! Raw input arrives in several shapes (equation strings with or without an
//! `=`, pre-parsed expression pairs, bare expressions) and is normalized
//! here into a single `lhs = rhs` form. [`EquationSet`] also derives the
//! ordered, de-duplicated list of unknown variables that fixes the index
//! mapping used by every column vector of variable values downstream.

mod error;

pub use error::EquationSetError;

use crate::expression::{Bindings, Expression, ExpressionParser};

/// One equation in any of the accepted input shapes.
#[derive(Debug, Clone)]
pub enum EquationInput<E> {
    /// Equation text, either `lhs = rhs` or a bare expression meaning
    /// `expr = 0`.
    Raw(String),
    /// An already-parsed `lhs = rhs` pair.
    Parsed(E, E),
    /// An already-parsed expression meaning `expr = 0`.
    Bare(E),
}

impl<E> From<&str> for EquationInput<E> {
    fn from(text: &str) -> Self {
        Self::Raw(text.to_string())
    }
}

impl<E> From<String> for EquationInput<E> {
    fn from(text: String) -> Self {
        Self::Raw(text)
    }
}

/// A normalized equation: `lhs = rhs`.
#[derive(Debug, Clone)]
pub struct Equation<E> {
    pub lhs: E,
    pub rhs: E,
}

impl<E: Expression> Equation<E> {
    /// Creates an equation from two parsed sides.
    pub fn new(lhs: E, rhs: E) -> Self {
        Self { lhs, rhs }
    }

    /// Evaluates `lhs - rhs` at the given point.
    ///
    /// # Errors
    ///
    /// Returns an error if either side fails to evaluate.
    pub fn residual(&self, bindings: &Bindings) -> Result<f64, E::Error> {
        Ok(self.lhs.evaluate(bindings)? - self.rhs.evaluate(bindings)?)
    }

    /// The variables referenced by either side, ordered by first appearance
    /// (lhs before rhs) and de-duplicated.
    #[must_use]
    pub fn variables(&self) -> Vec<String> {
        let mut names = self.lhs.variables();
        for name in self.rhs.variables() {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// True if neither side references a variable.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.lhs.variables().is_empty() && self.rhs.variables().is_empty()
    }
}

/// An ordered sequence of normalized equations plus the variable registry.
#[derive(Debug, Clone)]
pub struct EquationSet<E> {
    equations: Vec<Equation<E>>,
    variables: Vec<String>,
}

impl<E: Expression> EquationSet<E> {
    /// Normalizes a sequence of equation inputs.
    ///
    /// Equations referencing no variable (constant identities such as
    /// `2 = 2`) are dropped. The variable registry is built by scanning the
    /// surviving equations in input order, appending first-seen names from
    /// the lhs and then the rhs.
    ///
    /// # Errors
    ///
    /// Returns `IncorrectFormat` if a raw string contains more than one `=`,
    /// `Parse` if the parser rejects a side, and `NoVariables` if the
    /// registry is empty after filtering.
    pub fn from_inputs<P, I>(inputs: I, parser: &P) -> Result<Self, EquationSetError>
    where
        P: ExpressionParser<Expr = E>,
        I: IntoIterator<Item = EquationInput<E>>,
    {
        let mut equations = Vec::new();
        let mut variables: Vec<String> = Vec::new();

        for input in inputs {
            let equation = match input {
                EquationInput::Raw(text) => match text.matches('=').count() {
                    0 => Equation::new(parse_side(parser, &text)?, parse_side(parser, "0")?),
                    1 => {
                        // Count is checked above, so the split cannot fail.
                        let (lhs, rhs) = text.split_once('=').unwrap_or((text.as_str(), "0"));
                        Equation::new(parse_side(parser, lhs)?, parse_side(parser, rhs)?)
                    }
                    _ => return Err(EquationSetError::IncorrectFormat { text }),
                },
                EquationInput::Parsed(lhs, rhs) => Equation::new(lhs, rhs),
                EquationInput::Bare(lhs) => Equation::new(lhs, parse_side(parser, "0")?),
            };

            if equation.is_constant() {
                continue;
            }

            for name in equation.variables() {
                if !variables.contains(&name) {
                    variables.push(name);
                }
            }
            equations.push(equation);
        }

        if variables.is_empty() {
            return Err(EquationSetError::NoVariables);
        }

        Ok(Self {
            equations,
            variables,
        })
    }

    /// The normalized equations, in input order.
    #[must_use]
    pub fn equations(&self) -> &[Equation<E>] {
        &self.equations
    }

    /// The variable registry: ordered, de-duplicated names. Registry order
    /// defines the row index of each variable in solution vectors.
    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Number of equations after normalization.
    #[must_use]
    pub fn len(&self) -> usize {
        self.equations.len()
    }

    /// True if normalization dropped every equation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.equations.is_empty()
    }

    /// Consumes the set, yielding the equations and the registry.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Equation<E>>, Vec<String>) {
        (self.equations, self.variables)
    }
}

fn parse_side<P: ExpressionParser>(parser: &P, text: &str) -> Result<P::Expr, EquationSetError> {
    parser.parse(text).map_err(|source| EquationSetError::Parse {
        text: text.to_string(),
        source: Box::new(source),
    })
}
