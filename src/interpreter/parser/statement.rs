use tracing::debug;

use crate::{
    ast::{
        ArithmeticExpression, AssignmentExpression, BooleanExpression, ComparisonKind,
        Expression, FunctionDefinition, Operation, SourceSpan,
    },
    interpreter::{lexer::TokenKind, parser::core::Parser},
};

/// Maps a statement delimiter to the comparison it spells.
const fn comparison(kind: TokenKind) -> Option<ComparisonKind> {
    match kind {
        TokenKind::Equal => Some(ComparisonKind::Equal),
        TokenKind::Equality => Some(ComparisonKind::Equality),
        TokenKind::NotEqual => Some(ComparisonKind::NotEqual),
        TokenKind::LessThan => Some(ComparisonKind::Less),
        TokenKind::LessOrEqual => Some(ComparisonKind::LessOrEqual),
        TokenKind::GreaterThan => Some(ComparisonKind::Greater),
        TokenKind::GreaterOrEqual => Some(ComparisonKind::GreaterOrEqual),
        _ => None,
    }
}

/// `N` variable references followed by a call of arity `N`: the shape of
/// `f(x, y)` when parsed as arithmetic.
fn definition_signature(operations: &[Operation]) -> Option<(&str, Vec<String>)> {
    let (last, parameters) = operations.split_last()?;
    let Operation::Call { name, arity, .. } = last else {
        return None;
    };
    if *arity != parameters.len() {
        return None;
    }
    let names = parameters.iter()
                          .map(|op| match op {
                              Operation::Variable { name, .. } => Some(name.clone()),
                              _ => None,
                          })
                          .collect::<Option<Vec<_>>>()?;
    Some((name, names))
}

impl Parser {
    /// Parses one statement through its terminating separator or the end of
    /// input.
    ///
    /// The left-hand side is parsed as arithmetic first; the token after it
    /// decides what the statement is:
    /// - `=` after a lone variable is an assignment;
    /// - `=` after `f(x, y)` where every argument is a bare name is a function
    ///   definition;
    /// - any other `=`, and `==`, `!=`, `<`, `<=`, `>`, `>=`, make a
    ///   comparison with a freshly parsed right-hand side;
    /// - anything else must end the statement.
    ///
    /// # Example
    /// ```
    /// use tcalc::{
    ///     ast::{ComparisonKind, Expression},
    ///     interpreter::{lexer::LexerOptions, parser::parse_single},
    /// };
    ///
    /// let (_, expression) = parse_single("2x <= 4", LexerOptions::default(), 64);
    /// let Expression::Boolean(boolean) = expression else { unreachable!() };
    /// assert_eq!(boolean.kind, ComparisonKind::LessOrEqual);
    /// ```
    pub fn parse_expression(&mut self) -> Expression {
        let start = self.current().span.start;
        let mut lhs = Vec::new();
        if !self.current().kind.ends_statement() {
            self.parse_arithmetic(&mut lhs, -1, false);
        }
        let lhs_end = self.current().span.start;
        let lhs = ArithmeticExpression { operations: lhs,
                                         span:       SourceSpan::new(start, lhs_end), };

        let delimiter = comparison(self.current().kind).filter(|_| !lhs.is_empty());
        let expression = match delimiter {
            Some(ComparisonKind::Equal) => self.parse_equal(lhs),
            Some(kind) => {
                self.forward();
                self.parse_boolean(lhs, kind)
            },
            None => {
                self.expect_end();
                Expression::Arithmetic(lhs)
            },
        };

        debug!(target: "tcalc::parser",
               kind = expression.kind_name(),
               span = %expression.span(),
               diagnostics = self.diagnostics().len(),
               "parsed statement");
        expression
    }

    /// Resolves a statement whose left-hand side is followed by `=`.
    fn parse_equal(&mut self, lhs: ArithmeticExpression) -> Expression {
        self.forward();
        if let [Operation::Variable { name, .. }] = lhs.operations.as_slice() {
            let target = name.clone();
            let value = self.parse_rhs();
            let span = lhs.span.to(value.span);
            return Expression::Assignment(AssignmentExpression { target,
                                                                 value,
                                                                 span });
        }
        if let Some((name, parameters)) = definition_signature(&lhs.operations) {
            let name = name.to_string();
            let body = self.parse_rhs();
            let span = lhs.span.to(body.span);
            return Expression::FunctionDefinition(FunctionDefinition { name,
                                                                       parameters,
                                                                       body,
                                                                       span });
        }
        self.parse_boolean(lhs, ComparisonKind::Equal)
    }

    fn parse_boolean(&mut self, lhs: ArithmeticExpression, kind: ComparisonKind) -> Expression {
        let rhs = self.parse_rhs();
        let span = lhs.span.to(rhs.span);
        Expression::Boolean(BooleanExpression { lhs,
                                                rhs,
                                                kind,
                                                span })
    }

    /// Parses the arithmetic right of a statement delimiter, then requires
    /// the statement to end.
    fn parse_rhs(&mut self) -> ArithmeticExpression {
        let start = self.current().span.start;
        let mut operations = Vec::new();
        self.parse_arithmetic(&mut operations, -1, false);
        let span = SourceSpan::new(start, self.current().span.start);
        self.expect_end();
        ArithmeticExpression { operations, span }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::{ComparisonKind, Expression, SourceSpan},
        error::DiagnosticKind,
        interpreter::{lexer::LexerOptions, parser::parse_single},
    };

    fn parse(input: &str) -> Expression {
        let (parser, expression) = parse_single(input, LexerOptions::default(), 64);
        assert!(parser.diagnostics().is_empty(), "{:?}", parser.diagnostics());
        expression
    }

    #[test]
    fn assignment() {
        let Expression::Assignment(assignment) = parse("x = 2+3") else {
            panic!("not an assignment");
        };
        assert_eq!(assignment.target, "x");
        assert_eq!(assignment.value.to_string(), "(2)@4-5 (3)@6-7 [plus]@5-6");
        assert_eq!(assignment.value.span, SourceSpan::new(4, 7));
        assert_eq!(assignment.span, SourceSpan::new(0, 7));
    }

    #[test]
    fn function_definition() {
        let Expression::FunctionDefinition(definition) = parse("f(x, y) = x*y") else {
            panic!("not a definition");
        };
        assert_eq!(definition.name, "f");
        assert_eq!(definition.parameters, ["x", "y"]);
        assert_eq!(definition.body.operations.len(), 3);

        let Expression::FunctionDefinition(definition) = parse("g() = 4") else {
            panic!("not a definition");
        };
        assert!(definition.parameters.is_empty());
    }

    #[test]
    fn malformed_assignment_becomes_equal_comparison() {
        let Expression::Boolean(boolean) = parse("2x = 4") else {
            panic!("not boolean");
        };
        assert_eq!(boolean.kind, ComparisonKind::Equal);

        let Expression::Boolean(boolean) = parse("f(2) = 4") else {
            panic!("not boolean");
        };
        assert_eq!(boolean.kind, ComparisonKind::Equal);
    }

    #[test]
    fn comparisons() {
        for (input, kind) in [("1 == 1", ComparisonKind::Equality),
                              ("1 != 2", ComparisonKind::NotEqual),
                              ("1 ≠ 2", ComparisonKind::NotEqual),
                              ("1 < 2", ComparisonKind::Less),
                              ("1 <= 2", ComparisonKind::LessOrEqual),
                              ("1 > 2", ComparisonKind::Greater),
                              ("1 ≥ 2", ComparisonKind::GreaterOrEqual)]
        {
            let Expression::Boolean(boolean) = parse(input) else {
                panic!("{input} is not boolean");
            };
            assert_eq!(boolean.kind, kind, "{input}");
        }
    }

    #[test]
    fn chained_comparison_is_unexpected() {
        let (parser, _) = parse_single("1 < 2 < 3", LexerOptions::default(), 64);
        let diagnostic = &parser.diagnostics()[0];
        assert_eq!(diagnostic.kind, DiagnosticKind::UnexpectedToken);
        assert_eq!(diagnostic.arguments, ["less_than".to_string()]);
    }

    #[test]
    fn empty_statement() {
        let Expression::Arithmetic(expr) = parse("") else {
            panic!("not arithmetic");
        };
        assert!(expr.is_empty());
    }
}
