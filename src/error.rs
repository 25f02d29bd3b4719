/// Lexer and parser diagnostics.
///
/// Diagnostics describe malformed input. They never abort lexing or parsing:
/// both always run to completion and append zero or more diagnostics to a
/// list the caller inspects before trusting the parsed expression.
pub mod diagnostic;
/// Evaluation errors.
///
/// Contains the error kinds the evaluator can return, such as division by
/// zero, undefined names, out-of-domain trigonometric calls and numeric
/// overflow. Each error carries the span of the operation that raised it.
pub mod eval_error;

pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use eval_error::{EvalError, EvalErrorKind};
