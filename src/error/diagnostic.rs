use std::fmt;

use crate::ast::SourceSpan;

/// The kinds of problems the lexer and parser report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// The input contained a byte sequence that is not valid UTF-8.
    BadCharacter,
    /// A numeric literal was malformed, e.g. `1.2.3` or `0x` without digits.
    InvalidNumberLiteral,
    /// A character that starts no known token.
    InvalidSymbol,
    /// The parser found a token that cannot appear at this position.
    UnexpectedToken,
}

impl DiagnosticKind {
    /// Returns the snake_case name of the kind.
    ///
    /// # Example
    /// ```
    /// use tcalc::error::DiagnosticKind;
    ///
    /// assert_eq!(DiagnosticKind::UnexpectedToken.name(), "unexpected_token");
    /// ```
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BadCharacter => "bad_character",
            Self::InvalidNumberLiteral => "invalid_number_literal",
            Self::InvalidSymbol => "invalid_symbol",
            Self::UnexpectedToken => "unexpected_token",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A recoverable problem found while lexing or parsing.
///
/// `arguments` holds auxiliary text for message formatting by the caller, for
/// example the kind name of an unexpected token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// What went wrong.
    pub kind:      DiagnosticKind,
    /// Where it went wrong.
    pub span:      SourceSpan,
    /// Extra message arguments.
    pub arguments: Vec<String>,
}

impl Diagnostic {
    /// Creates a diagnostic without arguments.
    #[must_use]
    pub const fn new(kind: DiagnosticKind, span: SourceSpan) -> Self {
        Self { kind,
               span,
               arguments: Vec::new() }
    }

    /// Creates a diagnostic with message arguments.
    #[must_use]
    pub const fn with_arguments(kind: DiagnosticKind,
                                span: SourceSpan,
                                arguments: Vec<String>)
                                -> Self {
        Self { kind,
               span,
               arguments }
    }
}

/// Renders `kind at start..end`, followed by the arguments in parentheses
/// when there are any.
///
/// # Example
/// ```
/// use tcalc::{
///     ast::SourceSpan,
///     error::{Diagnostic, DiagnosticKind},
/// };
///
/// let diagnostic = Diagnostic::with_arguments(DiagnosticKind::UnexpectedToken,
///                                             SourceSpan::new(3, 4),
///                                             vec!["close_parenthesis".to_string()]);
/// assert_eq!(diagnostic.to_string(),
///            "unexpected_token at 3..4 (close_parenthesis)");
/// ```
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}..{}", self.kind, self.span.start, self.span.end)?;
        if !self.arguments.is_empty() {
            write!(f, " ({})", self.arguments.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}
