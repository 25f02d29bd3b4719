/// The source reader walks raw input one code point at a time.
///
/// It tolerates malformed UTF-8, tracks the start of the token being read
/// and hands out token text together with its byte span.
pub mod source;
/// The lexer module tokenizes calculator input.
///
/// The lexer reads code points from the source reader and produces tokens:
/// decimal, hexadecimal and binary literals, superscript exponents,
/// identifiers, keywords, operators and separators.
///
/// # Responsibilities
/// - Classifies characters by Unicode general category.
/// - Honors the configured decimal and argument separators.
/// - Records diagnostics for malformed input and keeps going.
pub mod lexer;
/// The parser module turns tokens into postfix operation sequences.
///
/// Precedence climbing resolves operator binding while parsing, so every
/// arithmetic expression comes out as a flat sequence of operations. The
/// statement level tells arithmetic, assignments, function definitions and
/// comparisons apart.
///
/// # Responsibilities
/// - Resolves precedence, associativity and implicit multiplication.
/// - Attaches source spans to every operation.
/// - Reports syntax problems as diagnostics without stopping.
pub mod parser;
/// The value module defines the calculator's number type.
pub mod value;
/// The evaluator module runs operation sequences on a value stack.
///
/// # Responsibilities
/// - Holds constants, variables and user-defined functions.
/// - Applies operators and native functions with domain checks.
/// - Returns evaluation errors carrying the span of the failing operation.
pub mod evaluator;
