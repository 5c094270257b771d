//! Over-determined system reduction.
//!
//! When a system has more equations than unknowns, a square subsystem is
//! carved out by discarding equations that bring no new variable into the
//! scan. Which equations look redundant depends on where the scan starts,
//! so the orchestrator rotates the start index between attempts.

use thiserror::Error;

use newt_core::{equation::Equation, expression::Expression};

/// Errors that can occur while reducing an over-determined system.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PreprocessError {
    /// Fewer redundant equations were found than must be removed. By the
    /// pigeonhole principle this cannot happen when equations outnumber
    /// variables; the guard stays anyway.
    #[error("not enough redundant equations to reduce the system")]
    Inconsistent,
}

impl PreprocessError {
    /// The stable error code for this failure, for catalog lookup.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Inconsistent => "inconsistent.system",
        }
    }
}

/// Removes redundant equations in place until the system is square.
///
/// Scans the list circularly starting at `start`, wrapping through every
/// equation exactly once. An equation whose variables are all already
/// covered by previously scanned equations is a removal candidate; any
/// other equation adds its variables to the covered set and is kept.
///
/// When the scan starts at index 0 and finds more candidates than needed,
/// candidates referencing fewer distinct variables are preferred for
/// removal (stable ascending sort by variable count). This tie-break is
/// deliberate: it changes which equations get dropped and therefore which
/// solution path is taken.
///
/// Returns the removed indices (relative to the original list) in
/// ascending order.
///
/// # Errors
///
/// Returns `PreprocessError::Inconsistent` if fewer candidates were found
/// than equations must be removed.
pub fn reduce<E: Expression>(
    equations: &mut Vec<Equation<E>>,
    variable_count: usize,
    start: usize,
) -> Result<Vec<usize>, PreprocessError> {
    let total = equations.len();
    let excess = total.saturating_sub(variable_count);

    let mut covered: Vec<String> = Vec::new();
    let mut candidates: Vec<usize> = Vec::new();
    let mut variable_counts = vec![0usize; total];

    let mut index = start;
    for _ in 0..total {
        if index == total {
            index = 0;
        }

        let names = equations[index].variables();
        variable_counts[index] = names.len();

        let mut redundant = true;
        for name in names {
            if !covered.contains(&name) {
                redundant = false;
                covered.push(name);
            }
        }

        if redundant {
            candidates.push(index);
        }
        index += 1;
    }

    if candidates.len() < excess {
        return Err(PreprocessError::Inconsistent);
    }

    if start == 0 && candidates.len() > excess {
        candidates.sort_by_key(|&index| variable_counts[index]);
    }

    candidates.truncate(excess);
    candidates.sort_unstable();

    for &index in candidates.iter().rev() {
        equations.remove(index);
    }

    Ok(candidates)
}
