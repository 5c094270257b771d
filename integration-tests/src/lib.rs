//! Shared helpers for the end-to-end solver tests.

use newt_core::equation::EquationInput;
use newt_expr::{EvalexprParser, ParsedExpression};
use newt_solve::{newton_raphson::Config, System};

/// Builds a system from equation strings with a seeded configuration, so
/// every test run draws the same starting point.
pub fn seeded_system(texts: &[&str], seed: u64) -> System<ParsedExpression> {
    let inputs: Vec<EquationInput<ParsedExpression>> =
        texts.iter().map(|t| EquationInput::from(*t)).collect();

    System::from_inputs(inputs, &EvalexprParser)
        .expect("valid equations")
        .with_config(Config {
            seed: Some(seed),
            ..Config::default()
        })
}
