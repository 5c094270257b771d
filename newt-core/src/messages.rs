//! Static error-message catalog.
//!
//! Every error in the workspace carries a stable dotted code (see the
//! `code()` method on each error enum); this module maps a code to its
//! display text. The catalog is purely cosmetic and is never consulted by
//! control flow.

/// Returns the display text for an error code, or `""` if the code is not
/// in the catalog.
#[must_use]
pub fn lookup(code: &str) -> &'static str {
    match code {
        "decomposition" => "Singular Matrix provided",
        "matrix.missing" => "Matrix not provided",
        "matrix.initialization.incorrect" => {
            "Wrong initialization parameters used for Matrix initialization"
        }
        "matrix.varying.size" => "Number of columns in each row are changing",
        "size.mismatch" => "Matrix sizes do not match",
        "size.mismatch.rows" => "Rows do not match",
        "size.mismatch.cols" => "Columns do not match",
        "equation.incorrect.format" => "Equations provided in an incorrect format",
        "variable.mismatch" => "Number of equations does not match the number of unknowns",
        "no.variables" => "No unknown variables found in the equations",
        "inconsistent.system" => "Not enough redundant equations to reduce the system",
        "under.determined.system" => "Fewer equations than unknown variables",
        "overdetermined.no.solution" => {
            "No solution satisfies the full over-determined system"
        }
        "no.convergence" => "Solver did not converge within the iteration limit",
        _ => "",
    }
}
