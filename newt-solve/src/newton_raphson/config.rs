/// Configuration for the Newton-Raphson solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Forward-difference step for Jacobian estimation.
    pub epsilon: f64,
    /// Iteration stops once the maximum component-wise change in the
    /// residual vector falls to this value or below.
    pub stopping_criterion: f64,
    /// Iteration limit; exceeding it fails with `Error::NoConvergence`.
    pub max_iters: usize,
    /// Decimal digits the converged point is rounded to.
    pub precision: u32,
    /// Lower bound of the random starting-point range.
    pub initial_offset: f64,
    /// Width of the random starting-point range.
    pub initial_span: f64,
    /// Seed for the starting-point draw; `None` uses entropy, so multi-root
    /// systems may converge to different roots across runs.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            epsilon: 1e-6,
            stopping_criterion: 1e-3,
            max_iters: 100,
            precision: 12,
            initial_offset: 0.0,
            initial_span: 1.0,
            seed: None,
        }
    }
}

impl Config {
    /// Validates the numeric fields.
    ///
    /// # Errors
    ///
    /// Returns an error if a step, tolerance, or range field is non-finite
    /// or out of range.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err("epsilon must be finite and positive");
        }
        if !self.stopping_criterion.is_finite() || self.stopping_criterion <= 0.0 {
            return Err("stopping_criterion must be finite and positive");
        }
        if !self.initial_offset.is_finite() {
            return Err("initial_offset must be finite");
        }
        if !self.initial_span.is_finite() || self.initial_span <= 0.0 {
            return Err("initial_span must be finite and positive");
        }
        Ok(())
    }
}
