//! System classification and the preprocess/solve/verify retry loop.
//!
//! [`System`] owns the normalized equations and variable registry for one
//! solve; nothing is shared between instances, so independent systems can
//! be solved side by side. A square system goes straight to
//! Newton-Raphson. An over-determined system is reduced to a square one by
//! [`preprocess::reduce`], solved, and the solution checked against every
//! dropped equation; a failed check shifts the scan start and tries a
//! different drop-set, up to `variables / 2` attempts.

mod error;
mod solution;

pub use error::SolveError;
pub use solution::Solution;

use log::debug;

use newt_core::{
    equation::{Equation, EquationInput, EquationSet},
    expression::{Bindings, Expression, ExpressionParser},
    matrix::Matrix,
};

use crate::{
    newton_raphson::{Config, NewtonRaphson},
    preprocess,
};

/// Dropped equations must hold to this tolerance at the accepted solution.
/// Distinct from the Jacobian's forward-difference step.
const VERIFY_TOLERANCE: f64 = 1e-5;

/// A system of equations ready to classify and solve.
#[derive(Debug)]
pub struct System<E> {
    equations: Vec<Equation<E>>,
    variables: Vec<String>,
    config: Config,
}

impl<E: Expression + Clone> System<E> {
    /// Creates a system from a normalized equation set.
    pub fn new(set: EquationSet<E>) -> Self {
        let (equations, variables) = set.into_parts();
        Self {
            equations,
            variables,
            config: Config::default(),
        }
    }

    /// Normalizes raw equation inputs and creates the system.
    ///
    /// # Errors
    ///
    /// Returns any [`EquationSet`] normalization failure as
    /// `SolveError::Set`.
    pub fn from_inputs<P, I>(inputs: I, parser: &P) -> Result<Self, SolveError>
    where
        P: ExpressionParser<Expr = E>,
        I: IntoIterator<Item = EquationInput<E>>,
    {
        Ok(Self::new(EquationSet::from_inputs(inputs, parser)?))
    }

    /// Replaces the solver configuration.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// The normalized equations, in input order.
    #[must_use]
    pub fn equations(&self) -> &[Equation<E>] {
        &self.equations
    }

    /// The variable registry, in first-appearance order.
    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Classifies the system and drives it to a solution.
    ///
    /// # Errors
    ///
    /// Returns `UnderDetermined` without attempting a solve when unknowns
    /// outnumber equations, `NoSolution` when the over-determined retry
    /// budget is exhausted, and any Newton-Raphson failure as-is. In
    /// particular a singular Jacobian aborts immediately rather than
    /// retrying with a different drop-set.
    pub fn solve(&self) -> Result<Solution, SolveError> {
        let equations = self.equations.len();
        let unknowns = self.variables.len();

        if equations < unknowns {
            return Err(SolveError::UnderDetermined {
                equations,
                variables: unknowns,
            });
        }

        if equations == unknowns {
            debug!("square system: {equations} equations, {unknowns} unknowns");
            let run =
                NewtonRaphson::with_config(&self.equations, &self.variables, self.config).solve()?;
            return Ok(Solution::new(
                self.variables.clone(),
                run.point,
                run.iterations,
                Vec::new(),
            ));
        }

        let max_attempts = unknowns / 2;
        debug!(
            "over-determined system: {equations} equations, {unknowns} unknowns, \
             budget {max_attempts} attempts"
        );

        let mut start = 0;
        let mut attempts = 0;
        loop {
            let mut reduced = self.equations.clone();
            let excluded = preprocess::reduce(&mut reduced, unknowns, start)?;
            debug!("attempt {}: excluding equations {excluded:?}", attempts + 1);

            let run = NewtonRaphson::with_config(&reduced, &self.variables, self.config).solve()?;
            attempts += 1;

            if self.verify(&excluded, &run.point)? {
                return Ok(Solution::new(
                    self.variables.clone(),
                    run.point,
                    run.iterations,
                    excluded,
                ));
            }

            if attempts >= max_attempts {
                return Err(SolveError::NoSolution { attempts });
            }

            // Shift the scan so the next attempt keeps a different subset.
            start = excluded.last().copied().unwrap_or(0);
        }
    }

    /// Checks the dropped equations at the solution point.
    fn verify(&self, excluded: &[usize], point: &Matrix) -> Result<bool, SolveError> {
        let bindings: Bindings = self
            .variables
            .iter()
            .enumerate()
            .map(|(row, name)| (name.clone(), point.get(row, 0)))
            .collect();

        for &index in excluded {
            let residual =
                self.equations[index]
                    .residual(&bindings)
                    .map_err(|source| SolveError::Verify {
                        index,
                        source: Box::new(source),
                    })?;

            if residual.abs() > VERIFY_TOLERANCE {
                debug!("dropped equation {index} unsatisfied: residual {residual:e}");
                return Ok(false);
            }
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use newt_core::equation::EquationSetError;
    use newt_expr::{EvalexprParser, ParsedExpression};

    use crate::newton_raphson;

    fn system(texts: &[&str]) -> System<ParsedExpression> {
        let inputs: Vec<EquationInput<ParsedExpression>> =
            texts.iter().map(|t| EquationInput::from(*t)).collect();
        System::from_inputs(inputs, &EvalexprParser)
            .expect("valid equations")
            .with_config(Config {
                seed: Some(11),
                ..Config::default()
            })
    }

    #[test]
    fn solves_square_system_directly() {
        let solution = system(&["x + y = 3", "x - y = 1"])
            .solve()
            .expect("consistent square system");

        assert_eq!(solution.variables(), ["x", "y"]);
        assert_relative_eq!(solution.value_of("x").expect("known"), 2.0, epsilon = 1e-9);
        assert_relative_eq!(solution.value_of("y").expect("known"), 1.0, epsilon = 1e-9);
        assert!(solution.excluded_equations().is_empty());
        assert!(solution.value_of("z").is_none());
    }

    #[test]
    fn duplicate_equation_yields_the_square_solution() {
        let square = system(&["x + y = 3", "x - y = 1"])
            .solve()
            .expect("square system");
        let padded = system(&["x + y = 3", "x + y = 3", "x - y = 1"])
            .solve()
            .expect("duplicate is redundant");

        assert_eq!(padded.excluded_equations(), [1]);
        assert_relative_eq!(
            padded.value_of("x").expect("known"),
            square.value_of("x").expect("known"),
            epsilon = 1e-9
        );
        assert_relative_eq!(
            padded.value_of("y").expect("known"),
            square.value_of("y").expect("known"),
            epsilon = 1e-9
        );
    }

    #[test]
    fn under_determined_system_fails_without_solving() {
        let err = system(&["x + y = 3"]).solve().expect_err("too few equations");

        assert!(matches!(
            err,
            SolveError::UnderDetermined {
                equations: 1,
                variables: 2
            }
        ));
        assert_eq!(err.code(), "under.determined.system");
    }

    #[test]
    fn contradictory_equation_exhausts_the_attempt_budget() {
        // Consistent values are w=1, x=2, y=3, but z=9 contradicts the sum
        // equation; every drop-set leaves the contradiction in place.
        let err = system(&[
            "w + x + y + z = 10",
            "w = 1",
            "x = 2",
            "y = 3",
            "z = 9",
        ])
        .solve()
        .expect_err("no subset satisfies the rest");

        assert!(matches!(err, SolveError::NoSolution { attempts: 2 }));
        assert_eq!(err.code(), "overdetermined.no.solution");
    }

    #[test]
    fn singular_jacobian_is_not_retried() {
        // Equations 0 and 1 are parallel; the first drop-set keeps both, so
        // the Newton run hits a singular Jacobian and the orchestrator
        // propagates it immediately even though retry budget remains.
        let err = system(&[
            "w + x + y + z = 10",
            "w + x + y + z = 11",
            "w = 1",
            "x = 2",
            "y = 3",
        ])
        .solve()
        .expect_err("singular Jacobian aborts");

        assert!(matches!(
            err,
            SolveError::Newton(newton_raphson::Error::Singular)
        ));
        assert_eq!(err.code(), "decomposition");
    }

    #[test]
    fn normalization_failures_surface_from_construction() {
        let inputs: Vec<EquationInput<ParsedExpression>> = vec![EquationInput::from("x = y = 1")];
        let err = System::from_inputs(inputs, &EvalexprParser).expect_err("two equals signs");

        assert!(matches!(
            err,
            SolveError::Set(EquationSetError::IncorrectFormat { .. })
        ));
        assert_eq!(err.code(), "equation.incorrect.format");
    }

    #[test]
    fn solution_bindings_reproduce_the_point() {
        let solution = system(&["x + y = 3", "x - y = 1"])
            .solve()
            .expect("consistent square system");

        let bindings = solution.bindings();
        assert_relative_eq!(bindings["x"], 2.0, epsilon = 1e-9);
        assert_relative_eq!(bindings["y"], 1.0, epsilon = 1e-9);
    }
}
