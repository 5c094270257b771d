//! Newton-Raphson iteration for square systems.
//!
//! Each run starts from a random point, builds the residual vector and a
//! forward-difference Jacobian, and steps with `X = X - inv(J) * F(X)` until the
//! residual vector stops changing. The Jacobian is estimated numerically
//! (no symbolic differentiation), and an entry is only computed when the
//! variable actually appears in the equation, so sparse systems skip most
//! of the evaluation work.

mod config;
mod error;
mod solution;

pub use config::Config;
pub use error::Error;
pub use solution::Run;

use log::{debug, trace};
use rand::{rngs::StdRng, Rng, SeedableRng};

use newt_core::{
    equation::Equation,
    expression::{Bindings, Expression},
    matrix::{Matrix, MatrixError},
};

/// Solves a square system of equations by Newton-Raphson iteration.
///
/// The equation slice and variable registry are borrowed from the caller;
/// each [`solve`](NewtonRaphson::solve) call is one independent run.
pub struct NewtonRaphson<'a, E> {
    equations: &'a [Equation<E>],
    variables: &'a [String],
    config: Config,
}

impl<'a, E: Expression> NewtonRaphson<'a, E> {
    /// Creates a solver with the default [`Config`].
    pub fn new(equations: &'a [Equation<E>], variables: &'a [String]) -> Self {
        Self::with_config(equations, variables, Config::default())
    }

    /// Creates a solver with an explicit [`Config`].
    pub fn with_config(
        equations: &'a [Equation<E>],
        variables: &'a [String],
        config: Config,
    ) -> Self {
        Self {
            equations,
            variables,
            config,
        }
    }

    /// Runs the iteration to convergence.
    ///
    /// # Errors
    ///
    /// Returns `VariableMismatch` if the system is not square, `Singular` if
    /// the Jacobian cannot be inverted at some point, `Eval` if an equation
    /// fails to evaluate, and `NoConvergence` if the residual change does
    /// not settle within `config.max_iters` iterations.
    pub fn solve(&self) -> Result<Run, Error> {
        self.config
            .validate()
            .map_err(|reason| Error::InvalidConfig { reason })?;

        if self.equations.len() != self.variables.len() {
            return Err(Error::VariableMismatch {
                equations: self.equations.len(),
                variables: self.variables.len(),
            });
        }

        let equation_variables: Vec<Vec<String>> =
            self.equations.iter().map(Equation::variables).collect();

        let mut x = self.initial_point()?;
        debug!("starting point {:?}", x.as_slice());

        let mut f_x = self.functional_value(&x)?;
        let mut iterations = 0;

        loop {
            if iterations == self.config.max_iters {
                return Err(Error::NoConvergence { iters: iterations });
            }
            iterations += 1;

            let jacobian = self.jacobian(&x, &f_x, &equation_variables)?;
            let inverse = jacobian.inv().map_err(|err| match err {
                MatrixError::Singular => Error::Singular,
                other => Error::Matrix(other),
            })?;

            let step = inverse.mul(&f_x).map_err(Error::Matrix)?;
            let x_new = x.sub(&step).map_err(Error::Matrix)?;
            let f_x_new = self.functional_value(&x_new)?;

            let change = max_change(&f_x_new, &f_x).map_err(Error::Matrix)?;
            trace!("iteration {iterations}: residual change {change:e}");

            x = x_new;
            f_x = f_x_new;

            if change <= self.config.stopping_criterion {
                break;
            }
        }

        x.round_to(self.config.precision);
        debug!(
            "converged after {} iterations: {:?}",
            iterations,
            x.as_slice()
        );

        Ok(Run {
            point: x,
            iterations,
        })
    }

    /// Draws the starting point uniformly from the configured range.
    fn initial_point(&self) -> Result<Matrix, Error> {
        let mut point = Matrix::new(self.variables.len(), 1, 0.0).map_err(Error::Matrix)?;
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        for row in 0..self.variables.len() {
            let value = self.config.initial_offset + self.config.initial_span * rng.gen::<f64>();
            point.set(row, 0, value);
        }

        Ok(point)
    }

    fn bindings(&self, x: &Matrix) -> Bindings {
        self.variables
            .iter()
            .enumerate()
            .map(|(row, name)| (name.clone(), x.get(row, 0)))
            .collect()
    }

    /// The residual vector: row `i` holds `lhs_i(X) - rhs_i(X)`.
    fn functional_value(&self, x: &Matrix) -> Result<Matrix, Error> {
        let bindings = self.bindings(x);
        let mut values = Matrix::new(self.equations.len(), 1, 0.0).map_err(Error::Matrix)?;

        for (index, equation) in self.equations.iter().enumerate() {
            let value = equation.residual(&bindings).map_err(|source| Error::Eval {
                index,
                source: Box::new(source),
            })?;
            values.set(index, 0, value);
        }

        Ok(values)
    }

    /// Forward-difference Jacobian at `x`, given the residuals `f_x` there.
    ///
    /// Entries for variables absent from an equation stay at the zero fill.
    fn jacobian(
        &self,
        x: &Matrix,
        f_x: &Matrix,
        equation_variables: &[Vec<String>],
    ) -> Result<Matrix, Error> {
        let n = self.variables.len();
        let mut jacobian = Matrix::square(n, 0.0).map_err(Error::Matrix)?;
        let epsilon = self.config.epsilon;

        for (col, name) in self.variables.iter().enumerate() {
            let mut bindings = self.bindings(x);
            bindings.insert(name.clone(), x.get(col, 0) + epsilon);

            for (row, equation) in self.equations.iter().enumerate() {
                if !equation_variables[row].iter().any(|v| v == name) {
                    continue;
                }

                let shifted = equation.residual(&bindings).map_err(|source| Error::Eval {
                    index: row,
                    source: Box::new(source),
                })?;
                jacobian.set(row, col, (shifted - f_x.get(row, 0)) / epsilon);
            }
        }

        Ok(jacobian)
    }
}

/// Maximum absolute component-wise change between two residual vectors.
fn max_change(new: &Matrix, old: &Matrix) -> Result<f64, MatrixError> {
    let diff = new.sub(old)?;
    let mut change = 0.0f64;
    for row in 0..diff.rows() {
        change = change.max(diff.get(row, 0).abs());
    }
    Ok(change)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use newt_core::equation::{EquationInput, EquationSet};
    use newt_expr::{EvalexprParser, ParsedExpression};

    fn set(texts: &[&str]) -> EquationSet<ParsedExpression> {
        let inputs: Vec<EquationInput<ParsedExpression>> =
            texts.iter().map(|t| EquationInput::from(*t)).collect();
        EquationSet::from_inputs(inputs, &EvalexprParser).expect("valid equations")
    }

    fn seeded(seed: u64) -> Config {
        Config {
            seed: Some(seed),
            ..Config::default()
        }
    }

    #[test]
    fn solves_linear_system_exactly() {
        let set = set(&["x + y = 3", "x - y = 1"]);
        let solver = NewtonRaphson::with_config(set.equations(), set.variables(), seeded(1));

        let run = solver.solve().expect("should converge");

        assert_relative_eq!(run.point.get(0, 0), 2.0, epsilon = 1e-9);
        assert_relative_eq!(run.point.get(1, 0), 1.0, epsilon = 1e-9);
        assert!(run.iterations <= 3);
    }

    #[test]
    fn solves_nonlinear_equation_to_a_root() {
        let set = set(&["x^2 = 4"]);
        let solver = NewtonRaphson::with_config(set.equations(), set.variables(), seeded(7));

        let run = solver.solve().expect("should converge");
        let x = run.point.get(0, 0);

        // The start point is in [0, 1), so iteration stays on the positive
        // branch and lands on the positive root.
        assert_relative_eq!(x, 2.0, epsilon = 1e-3);
        assert!((x * x - 4.0).abs() < 1e-3);
    }

    #[test]
    fn same_seed_reproduces_the_run() {
        let set = set(&["x^2 = 4"]);
        let first = NewtonRaphson::with_config(set.equations(), set.variables(), seeded(42))
            .solve()
            .expect("should converge");
        let second = NewtonRaphson::with_config(set.equations(), set.variables(), seeded(42))
            .solve()
            .expect("should converge");

        assert_eq!(first.point, second.point);
        assert_eq!(first.iterations, second.iterations);
    }

    #[test]
    fn rejects_non_square_system() {
        let set = set(&["x + y = 3"]);
        let solver = NewtonRaphson::new(set.equations(), set.variables());

        let err = solver.solve().expect_err("one equation, two unknowns");
        assert!(matches!(
            err,
            Error::VariableMismatch {
                equations: 1,
                variables: 2
            }
        ));
        assert_eq!(err.code(), "variable.mismatch");
    }

    #[test]
    fn singular_jacobian_aborts_the_run() {
        // Parallel lines: both rows of the Jacobian are [1, 1].
        let set = set(&["x + y = 1", "x + y = 2"]);
        let solver = NewtonRaphson::with_config(set.equations(), set.variables(), seeded(3));

        let err = solver.solve().expect_err("jacobian is singular");
        assert!(matches!(err, Error::Singular));
        assert_eq!(err.code(), "decomposition");
    }

    #[test]
    fn iteration_limit_fails_with_no_convergence() {
        // Starting around x = 1000, halving toward the root takes far more
        // than two iterations.
        let config = Config {
            initial_offset: 1000.0,
            max_iters: 2,
            seed: Some(5),
            ..Config::default()
        };
        let set = set(&["x^2 = 4"]);
        let solver = NewtonRaphson::with_config(set.equations(), set.variables(), config);

        let err = solver.solve().expect_err("two iterations cannot suffice");
        assert!(matches!(err, Error::NoConvergence { iters: 2 }));
        assert_eq!(err.code(), "no.convergence");
    }

    #[test]
    fn jacobian_approximates_analytic_partials() {
        let set = set(&["x^2 + y = 5", "x * y = 6"]);
        let solver = NewtonRaphson::new(set.equations(), set.variables());

        let mut x = Matrix::new(2, 1, 0.0).expect("valid shape");
        x.set(0, 0, 2.0);
        x.set(1, 0, 3.0);

        let equation_variables: Vec<Vec<String>> =
            set.equations().iter().map(Equation::variables).collect();
        let f_x = solver.functional_value(&x).expect("evaluates");
        let jacobian = solver
            .jacobian(&x, &f_x, &equation_variables)
            .expect("evaluates");

        // Analytic Jacobian at (2, 3): [[2x, 1], [y, x]] = [[4, 1], [3, 2]].
        assert_relative_eq!(jacobian.get(0, 0), 4.0, epsilon = 1e-4);
        assert_relative_eq!(jacobian.get(0, 1), 1.0, epsilon = 1e-4);
        assert_relative_eq!(jacobian.get(1, 0), 3.0, epsilon = 1e-4);
        assert_relative_eq!(jacobian.get(1, 1), 2.0, epsilon = 1e-4);
    }

    #[test]
    fn jacobian_skips_absent_variables() {
        let set = set(&["x = 1", "y = 2"]);
        let solver = NewtonRaphson::new(set.equations(), set.variables());

        let x = Matrix::new(2, 1, 0.5).expect("valid shape");
        let equation_variables: Vec<Vec<String>> =
            set.equations().iter().map(Equation::variables).collect();
        let f_x = solver.functional_value(&x).expect("evaluates");
        let jacobian = solver
            .jacobian(&x, &f_x, &equation_variables)
            .expect("evaluates");

        // Off-diagonal entries are never touched and keep the zero fill.
        assert_eq!(jacobian.get(0, 1), 0.0);
        assert_eq!(jacobian.get(1, 0), 0.0);
    }
}
