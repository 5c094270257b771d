//! Interactive demo: solve a system of equations from the command line.
//!
//! # Usage
//!
//! ```text
//! cargo run --example solve -- "x + y = 3" "x - y = 1"
//! cargo run --example solve -- "x^2 + y^2 = 10" "x - y = 4"
//! cargo run --example solve
//! ```
//!
//! Each argument is one equation. With no arguments a built-in demo system
//! is solved. Set `RUST_LOG=debug` to watch the iteration trace.

use std::{env, error::Error};

use newt_core::{equation::EquationInput, messages};
use newt_expr::{EvalexprParser, ParsedExpression};
use newt_solve::System;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let lines = if args.is_empty() {
        vec!["x + y = 3".to_string(), "x - y = 1".to_string()]
    } else {
        args
    };

    // Skip blank lines and lines without an `=`, the way the original web
    // form filtered its textarea input.
    let inputs: Vec<EquationInput<ParsedExpression>> = lines
        .iter()
        .filter(|line| !line.trim().is_empty() && line.contains('='))
        .map(|line| EquationInput::from(line.as_str()))
        .collect();

    let system = match System::from_inputs(inputs, &EvalexprParser) {
        Ok(system) => system,
        Err(err) => return Err(describe(&err.to_string(), err.code()).into()),
    };

    println!("Equations:");
    for line in &lines {
        println!("  {line}");
    }
    println!("Params - {:?}", system.variables());

    match system.solve() {
        Ok(solution) => {
            println!("Solutions:");
            for (row, name) in solution.variables().iter().enumerate() {
                println!("  {name} = {}", solution.values().get(row, 0));
            }
            if !solution.excluded_equations().is_empty() {
                println!(
                    "(equations {:?} were treated as redundant and verified)",
                    solution.excluded_equations()
                );
            }
            Ok(())
        }
        Err(err) => Err(describe(&err.to_string(), err.code()).into()),
    }
}

fn describe(detail: &str, code: &str) -> String {
    let catalog = messages::lookup(code);
    if catalog.is_empty() {
        detail.to_string()
    } else {
        format!("{catalog} ({detail})")
    }
}
