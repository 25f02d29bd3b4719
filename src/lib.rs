//! # tcalc
//!
//! tcalc is the evaluation core of a scientific calculator written in Rust.
//! It reads Unicode input, parses it with precedence climbing into postfix
//! operation sequences and evaluates them on arbitrary-precision complex
//! numbers, with variables, user-defined functions and configurable angle
//! units.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::Expression,
    interpreter::{
        evaluator::{EvalOutcome, Evaluator},
        lexer::{Lexer, LexerOptions},
        parser::Parser,
        value::number::DEFAULT_PRECISION,
    },
};

/// Defines the parsed form of calculator input.
///
/// This module declares source spans, operators, the postfix `Operation`
/// sequence and the four statement forms the parser produces and the
/// evaluator consumes.
pub mod ast;
/// Provides the diagnostic and evaluation error types.
///
/// Lexing and parsing never fail; they record diagnostics. Evaluation
/// returns a `Result` whose error names the failing operation's span.
pub mod error;
/// The calculator pipeline.
///
/// Source reader, lexer, parser, number type and evaluator, in the order
/// data flows through them.
pub mod interpreter;
/// General utilities shared by the pipeline stages.
pub mod util;

/// Evaluates every statement in `source` in a fresh session and returns the
/// outcome of the last one.
///
/// Results are committed as they are produced, so later statements see the
/// variables, functions and `Ans` bound by earlier ones. Empty statements
/// are skipped.
///
/// # Errors
/// Returns the first diagnostic if the input is malformed, otherwise the
/// first evaluation error.
///
/// # Examples
/// ```
/// use tcalc::calculate;
///
/// let result = calculate("x = 4: f(y) = y^2: f(x) + 1").unwrap();
/// assert_eq!(result.map(|outcome| outcome.to_string()).as_deref(), Some("17"));
///
/// // `x` is never defined.
/// assert!(calculate("x + 1").is_err());
/// ```
pub fn calculate(source: &str) -> Result<Option<EvalOutcome>, Box<dyn std::error::Error>> {
    let mut evaluator = Evaluator::new(DEFAULT_PRECISION);
    let mut parser = Parser::new(Lexer::new(source, LexerOptions::default()), DEFAULT_PRECISION);
    let statements = parser.parse_all();
    if let Some(diagnostic) = parser.diagnostics().first() {
        return Err(Box::new(diagnostic.clone()));
    }

    let mut last = None;
    for statement in statements.iter().filter(|statement| !is_blank(statement)) {
        let outcome = evaluator.evaluate(statement)?;
        evaluator.commit_result(outcome.clone());
        last = Some(outcome);
    }
    Ok(last)
}

/// Whether a statement has no content, as produced by a trailing separator.
#[must_use]
pub fn is_blank(statement: &Expression) -> bool {
    matches!(statement, Expression::Arithmetic(expr) if expr.is_empty())
}
