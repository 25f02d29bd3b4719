/// Parser state and the statement loop.
///
/// Holds the lexer, the current and lookahead tokens, and the helpers shared
/// by the other parser modules.
pub mod core;

/// Precedence climbing over binary operators.
///
/// Emits operations in postfix order, inserting implicit multiplication
/// between adjacent terms and attaching superscript exponents and postfix
/// operators to the term before them.
pub mod binary;

/// Primary terms and prefix operators.
///
/// Handles literals, variable references, function calls, parenthesized
/// groups and superscript exponent runs.
pub mod unary;

/// Top-level statement classification.
///
/// Decides whether a statement is plain arithmetic, an assignment, a
/// function definition or a comparison.
pub mod statement;

pub use self::core::{Parser, parse_single};
