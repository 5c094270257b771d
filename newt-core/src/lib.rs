//! Core types for the newt equation-solving workspace.
//!
//! This crate defines the foundations the solver crates build on:
//!
//! - [`Matrix`] — a small dense 2-D container with arithmetic and inversion
//! - [`Expression`], [`ExpressionParser`] — the expression capability the
//!   solver consumes without inspecting its representation
//! - [`Equation`], [`EquationInput`], [`EquationSet`] — normalized equations
//!   and the ordered variable registry derived from them
//! - [`messages`] — the static error-message catalog keyed by error code

pub mod equation;
pub mod expression;
pub mod matrix;
pub mod messages;

pub use equation::{Equation, EquationInput, EquationSet, EquationSetError};
pub use expression::{Bindings, Expression, ExpressionParser};
pub use matrix::{Matrix, MatrixError};
