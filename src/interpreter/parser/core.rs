use std::mem;

use crate::{
    ast::Expression,
    error::{Diagnostic, DiagnosticKind},
    interpreter::lexer::{Lexer, LexerOptions, Token, TokenKind},
};

/// Deepest operand nesting a statement may reach. Groups, prefix operators,
/// call arguments and right operands each add a level.
pub const MAX_NESTING: usize = 256;

/// Turns the token stream of a [`Lexer`] into [`Expression`]s.
///
/// The parser owns its lexer and buffers exactly two tokens: the current one
/// and one of lookahead. Parsing never fails; problems are recorded as
/// diagnostics in the lexer's list and parsing continues with a best-effort
/// result. Check [`Parser::diagnostics`] before trusting an expression.
///
/// # Example
/// ```
/// use tcalc::interpreter::{
///     lexer::{Lexer, LexerOptions},
///     parser::Parser,
/// };
///
/// let mut parser = Parser::new(Lexer::new("x = 2: 2x", LexerOptions::default()), 64);
/// let statements = parser.parse_all();
/// assert_eq!(statements.len(), 2);
/// assert!(parser.diagnostics().is_empty());
/// ```
#[derive(Debug)]
pub struct Parser {
    lexer:     Lexer,
    current:   Token,
    lookahead: Token,
    precision: u32,
    depth:     usize,
}

impl Parser {
    /// Creates a parser that materializes literals at `precision` bits.
    pub fn new(mut lexer: Lexer, precision: u32) -> Self {
        let current = lexer.next_token();
        let lookahead = lexer.next_token();
        Self { lexer,
               current,
               lookahead,
               precision,
               depth: 0 }
    }

    /// Diagnostics raised by the lexer and the parser, in the order found.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.lexer.diagnostics()
    }

    #[must_use]
    pub const fn precision(&self) -> u32 {
        self.precision
    }

    /// Gives back the lexer, with every diagnostic recorded so far.
    #[must_use]
    pub fn into_lexer(self) -> Lexer {
        self.lexer
    }

    /// Parses statements until the end of input.
    ///
    /// Always returns at least one expression; empty input yields one empty
    /// arithmetic expression.
    pub fn parse_all(&mut self) -> Vec<Expression> {
        let mut expressions = Vec::new();
        loop {
            expressions.push(self.parse_expression());
            if self.current.kind == TokenKind::EndOfFile {
                return expressions;
            }
        }
    }

    pub(in crate::interpreter::parser) const fn current(&self) -> &Token {
        &self.current
    }

    pub(in crate::interpreter::parser) const fn peek(&self) -> &Token {
        &self.lookahead
    }

    /// Shifts the lookahead into the current slot and returns the token that
    /// was current.
    pub(in crate::interpreter::parser) fn forward(&mut self) -> Token {
        let next = self.lexer.next_token();
        let lookahead = mem::replace(&mut self.lookahead, next);
        mem::replace(&mut self.current, lookahead)
    }

    pub(in crate::interpreter::parser) fn report(&mut self, diagnostic: Diagnostic) {
        self.lexer.push_diagnostic(diagnostic);
    }

    /// Records an `unexpected_token` diagnostic naming the token's kind.
    pub(in crate::interpreter::parser) fn unexpected_token(&mut self, token: &Token) {
        self.report(Diagnostic::with_arguments(DiagnosticKind::UnexpectedToken,
                                               token.span,
                                               vec![token.kind.name().to_string()]));
    }

    /// Steps one operand level deeper.
    ///
    /// Past [`MAX_NESTING`] the current token is reported, the rest of the
    /// statement is skipped and `false` is returned; the caller must then
    /// return without parsing. Every `true` must be paired with
    /// [`Parser::leave_nesting`].
    pub(in crate::interpreter::parser) fn enter_nesting(&mut self) -> bool {
        if self.depth >= MAX_NESTING {
            let token = self.current.clone();
            self.unexpected_token(&token);
            while !self.current.kind.ends_statement() {
                self.forward();
            }
            return false;
        }
        self.depth += 1;
        true
    }

    pub(in crate::interpreter::parser) fn leave_nesting(&mut self) {
        self.depth -= 1;
    }

    /// Requires the statement to end here, then steps past the terminator.
    pub(in crate::interpreter::parser) fn expect_end(&mut self) {
        if !self.current.kind.ends_statement() {
            let token = self.current.clone();
            self.unexpected_token(&token);
        }
        self.forward();
    }
}

/// Parses the first statement of `input`.
///
/// The parser is returned alongside the expression so the caller can inspect
/// its diagnostics or keep parsing.
///
/// # Example
/// ```
/// use tcalc::{ast::Expression, interpreter::{lexer::LexerOptions, parser::parse_single}};
///
/// let (parser, expression) = parse_single("f(x) = x^2", LexerOptions::default(), 64);
/// assert!(parser.diagnostics().is_empty());
/// assert!(matches!(expression, Expression::FunctionDefinition(_)));
/// ```
pub fn parse_single(input: &str, options: LexerOptions, precision: u32) -> (Parser, Expression) {
    let mut parser = Parser::new(Lexer::new(input, options), precision);
    let expression = parser.parse_expression();
    (parser, expression)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser(input: &str) -> Parser {
        Parser::new(Lexer::new(input, LexerOptions::default()), 64)
    }

    #[test]
    fn forward_shifts_lookahead() {
        let mut parser = parser("1+2");
        assert_eq!(parser.current().kind, TokenKind::NumericLiteral);
        assert_eq!(parser.peek().kind, TokenKind::Plus);
        let previous = parser.forward();
        assert_eq!(previous.text, "1");
        assert_eq!(parser.current().kind, TokenKind::Plus);
        assert_eq!(parser.peek().text, "2");
    }

    #[test]
    fn splits_statements_on_separators() {
        let mut parser = parser("1\n2:3");
        assert_eq!(parser.parse_all().len(), 3);
        assert!(parser.diagnostics().is_empty());
    }

    #[test]
    fn trailing_separator_yields_empty_statement() {
        let mut parser = parser("1\n");
        let statements = parser.parse_all();
        assert_eq!(statements.len(), 2);
        assert!(matches!(&statements[1], Expression::Arithmetic(expr) if expr.is_empty()));
    }

    #[test]
    fn nesting_is_capped() {
        let mut deep = parser(&format!("{}1\n2", "(".repeat(MAX_NESTING + 10)));
        let statements = deep.parse_all();
        assert_eq!(statements.len(), 2);
        assert_eq!(deep.diagnostics().len(), 1);
        let diagnostic = &deep.diagnostics()[0];
        assert_eq!(diagnostic.kind, DiagnosticKind::UnexpectedToken);
        assert_eq!(diagnostic.arguments, vec!["open_parenthesis".to_string()]);
        assert_eq!(diagnostic.span.start, MAX_NESTING);
        assert_eq!(deep.depth, 0);

        let mut shallow = parser(&format!("{}1)", "(".repeat(MAX_NESTING - 1)));
        shallow.parse_all();
        assert!(shallow.diagnostics().is_empty());
    }

    #[test]
    fn garbage_after_statement_is_unexpected() {
        let mut parser = parser("1)");
        parser.parse_all();
        let diagnostic = &parser.diagnostics()[0];
        assert_eq!(diagnostic.kind, DiagnosticKind::UnexpectedToken);
        assert_eq!(diagnostic.arguments, vec!["close_parenthesis".to_string()]);
        assert_eq!(diagnostic.to_string(), "unexpected_token at 1..2 (close_parenthesis)");
    }
}
