/// Evaluator state, statement dispatch and the operation walk.
///
/// Contains the constant, variable and function tables, the configuration
/// knobs and the explicit commit step.
pub mod core;

/// The reusable value stack.
pub mod stack;

/// Binary operator evaluation.
///
/// Arithmetic, exponentiation, shifts and the bitwise logical family.
pub mod binary;

/// Unary operator evaluation, prefix and postfix.
pub mod unary;

/// Boolean statements.
///
/// Evaluates both sides as arithmetic and compares them.
pub mod comparison;

/// Shared helpers: angle conversion, result checks and parameter bindings.
pub mod utils;

/// Function calls.
///
/// The native function table and its implementations, and calls to
/// user-defined functions.
pub mod function;

pub use self::core::{AngleUnit, EvalOutcome, EvalResult, Evaluator, Settings};
