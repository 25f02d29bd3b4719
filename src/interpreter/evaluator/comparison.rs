use std::cmp::Ordering;

use tracing::trace;

use crate::{
    ast::{BooleanExpression, ComparisonKind},
    error::EvalErrorKind,
    interpreter::evaluator::core::{EvalResult, Evaluator},
};

impl Evaluator {
    /// Evaluates both sides of a comparison and compares them.
    ///
    /// `=`, `==` and `!=` compare the full complex values. The ordering
    /// comparisons look at real parts only and reject a side with a
    /// non-zero imaginary part.
    ///
    /// # Errors
    /// Any error of either side, or `complex_inequality` at the span of the
    /// non-real side of an ordering comparison.
    ///
    /// # Example
    /// ```
    /// use tcalc::interpreter::{
    ///     evaluator::{EvalOutcome, Evaluator},
    ///     lexer::LexerOptions,
    ///     parser::parse_single,
    /// };
    ///
    /// let mut evaluator = Evaluator::new(64);
    /// let (_, statement) = parse_single("2^3 >= 8", LexerOptions::default(), 64);
    /// assert_eq!(evaluator.evaluate(&statement), Ok(EvalOutcome::Boolean(true)));
    /// ```
    pub fn evaluate_boolean(&mut self, expr: &BooleanExpression) -> EvalResult<bool> {
        let lhs = self.evaluate_arithmetic(&expr.lhs)?;
        let rhs = self.evaluate_arithmetic(&expr.rhs)?;

        let result = if expr.kind.is_ordering() {
            if !lhs.is_real() {
                return Err(EvalErrorKind::ComplexInequality.at(expr.lhs.span));
            }
            if !rhs.is_real() {
                return Err(EvalErrorKind::ComplexInequality.at(expr.rhs.span));
            }
            let ordering = lhs.real_cmp(&rhs);
            match expr.kind {
                ComparisonKind::Less => ordering == Some(Ordering::Less),
                ComparisonKind::LessOrEqual => {
                    matches!(ordering, Some(Ordering::Less | Ordering::Equal))
                },
                ComparisonKind::Greater => ordering == Some(Ordering::Greater),
                _ => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
            }
        } else if expr.kind == ComparisonKind::NotEqual {
            lhs != rhs
        } else {
            lhs == rhs
        };
        trace!(target: "tcalc::evaluator", kind = expr.kind.name(), result, "compare");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::Expression,
        error::EvalErrorKind,
        interpreter::{
            evaluator::{EvalOutcome, Evaluator},
            lexer::LexerOptions,
            parser::parse_single,
        },
    };

    fn compare(input: &str) -> Result<bool, EvalErrorKind> {
        let mut evaluator = Evaluator::new(64);
        let (_, statement) = parse_single(input, LexerOptions::default(), 64);
        assert!(matches!(statement, Expression::Boolean(_)), "{input}");
        match evaluator.evaluate(&statement) {
            Ok(EvalOutcome::Boolean(value)) => Ok(value),
            Ok(other) => panic!("{input} gave {other}"),
            Err(error) => Err(error.kind),
        }
    }

    #[test]
    fn orderings() {
        assert_eq!(compare("1 < 2"), Ok(true));
        assert_eq!(compare("2 < 2"), Ok(false));
        assert_eq!(compare("2 <= 2"), Ok(true));
        assert_eq!(compare("3 > 2"), Ok(true));
        assert_eq!(compare("2 >= 3"), Ok(false));
        assert_eq!(compare("2 ≥ 2"), Ok(true));
        assert_eq!(compare("-1 ≤ -2"), Ok(false));
    }

    #[test]
    fn equalities_compare_complex_values() {
        assert_eq!(compare("2+3 == 5"), Ok(true));
        assert_eq!(compare("1+2i == 1+2i"), Ok(true));
        assert_eq!(compare("1+2i != 1-2i"), Ok(true));
        assert_eq!(compare("4 ≠ 4"), Ok(false));
    }

    #[test]
    fn bare_equal_compares() {
        assert_eq!(compare("1+1 = 2"), Ok(true));
        assert_eq!(compare("2x = 3"), Err(EvalErrorKind::UndefinedVariable));
    }

    #[test]
    fn complex_sides_cannot_be_ordered() {
        let mut evaluator = Evaluator::new(64);
        let (_, statement) = parse_single("1 < 2i", LexerOptions::default(), 64);
        let error = evaluator.evaluate(&statement).unwrap_err();
        assert_eq!(error.kind, EvalErrorKind::ComplexInequality);
        assert_eq!(error.span.start, 4);

        assert_eq!(compare("i > 0"), Err(EvalErrorKind::ComplexInequality));
    }
}
