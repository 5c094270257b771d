//! Demo of the dense matrix engine: random matrices through the four
//! operations the solver relies on.
//!
//! # Usage
//!
//! ```text
//! cargo run --example matrices
//! cargo run --example matrices -- 3
//! ```

use std::{env, error::Error};

use rand::Rng;

use newt_core::{matrix::Matrix, messages};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let size = env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(5);

    let mut rng = rand::thread_rng();
    let a = random_matrix(size, &mut rng)?;
    let b = random_matrix(size, &mut rng)?;

    print_matrix("Matrix A", &a);
    print_matrix("Matrix B", &b);
    print_matrix("A + B", &a.add(&b)?);
    print_matrix("A - B", &a.sub(&b)?);
    print_matrix("A * B", &a.mul(&b)?);

    match a.inv() {
        Ok(inverse) => print_matrix("inv(A)", &inverse),
        Err(err) => println!("inv(A): {}", messages::lookup(err.code())),
    }

    Ok(())
}

fn random_matrix(size: usize, rng: &mut impl Rng) -> Result<Matrix, Box<dyn Error>> {
    let mut matrix = Matrix::square(size, 0.0)?;
    for i in 0..size {
        for j in 0..size {
            matrix.set(i, j, rng.gen::<f64>() * 10.0 - 5.0);
        }
    }
    Ok(matrix)
}

fn print_matrix(title: &str, matrix: &Matrix) {
    println!("{title}:");
    for i in 0..matrix.rows() {
        let row: Vec<String> = (0..matrix.cols())
            .map(|j| format!("{:9.4}", matrix.get(i, j)))
            .collect();
        println!("  [{}]", row.join(", "));
    }
}
