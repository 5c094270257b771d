use newt_core::{expression::Bindings, matrix::Matrix};

/// An accepted solution to the system.
#[derive(Debug, Clone)]
pub struct Solution {
    variables: Vec<String>,
    values: Matrix,
    iterations: usize,
    excluded: Vec<usize>,
}

impl Solution {
    pub(crate) fn new(
        variables: Vec<String>,
        values: Matrix,
        iterations: usize,
        excluded: Vec<usize>,
    ) -> Self {
        Self {
            variables,
            values,
            iterations,
            excluded,
        }
    }

    /// The unknown variables, in registry order.
    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// The solved values as a column vector; row `i` belongs to
    /// `variables()[i]`.
    #[must_use]
    pub fn values(&self) -> &Matrix {
        &self.values
    }

    /// The solved value of one variable, if it exists in the system.
    #[must_use]
    pub fn value_of(&self, name: &str) -> Option<f64> {
        self.variables
            .iter()
            .position(|variable| variable == name)
            .map(|row| self.values.get(row, 0))
    }

    /// Name-to-value bindings for re-evaluating expressions at the solution.
    #[must_use]
    pub fn bindings(&self) -> Bindings {
        self.variables
            .iter()
            .enumerate()
            .map(|(row, name)| (name.clone(), self.values.get(row, 0)))
            .collect()
    }

    /// Iterations taken by the accepted Newton-Raphson run.
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Indices of the equations excluded as redundant before solving, in
    /// ascending order. Empty for a square system.
    #[must_use]
    pub fn excluded_equations(&self) -> &[usize] {
        &self.excluded
    }
}
