use crate::{
    ast::{BinaryOperator, Operation, SourceSpan, UNARY_PRECEDENCE, UnaryOperator},
    interpreter::{lexer::TokenKind, parser::core::Parser},
};

/// Maps a token to the binary operator it spells, if any.
#[must_use]
pub const fn binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    Some(match kind {
             TokenKind::Plus => BinaryOperator::Add,
             TokenKind::Minus => BinaryOperator::Sub,
             TokenKind::Multiply => BinaryOperator::Mul,
             TokenKind::Divide => BinaryOperator::Div,
             TokenKind::Exponentiate => BinaryOperator::Pow,
             TokenKind::LeftShift => BinaryOperator::LeftShift,
             TokenKind::RightShift => BinaryOperator::RightShift,
             TokenKind::BinaryAnd => BinaryOperator::And,
             TokenKind::BinaryNand => BinaryOperator::Nand,
             TokenKind::BinaryOr => BinaryOperator::Or,
             TokenKind::BinaryNor => BinaryOperator::Nor,
             TokenKind::BinaryXor => BinaryOperator::Xor,
             TokenKind::BinaryXnor => BinaryOperator::Xnor,
             _ => return None,
         })
}

/// Maps a token to the prefix operator it spells, if any.
#[must_use]
pub const fn prefix_operator(kind: TokenKind) -> Option<UnaryOperator> {
    match kind {
        TokenKind::Minus => Some(UnaryOperator::Negate),
        TokenKind::Plus => Some(UnaryOperator::Plus),
        TokenKind::Radical => Some(UnaryOperator::Radical),
        TokenKind::BinaryNot => Some(UnaryOperator::Not),
        _ => None,
    }
}

/// Maps a token to the postfix operator it spells, if any.
#[must_use]
pub const fn postfix_operator(kind: TokenKind) -> Option<UnaryOperator> {
    match kind {
        TokenKind::Percent => Some(UnaryOperator::Percent),
        TokenKind::Factorial => Some(UnaryOperator::Factorial),
        TokenKind::Deg => Some(UnaryOperator::Degrees),
        TokenKind::Rad => Some(UnaryOperator::Radians),
        TokenKind::Grad => Some(UnaryOperator::Gradians),
        _ => None,
    }
}

/// Tokens that begin a new term when they directly follow another one.
const fn starts_implicit_term(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::Identifier | TokenKind::OpenParenthesis)
    || kind.is_number()
    || prefix_operator(kind).is_some()
}

const fn is_superscript(kind: TokenKind) -> bool {
    matches!(kind,
             TokenKind::SuperscriptLiteral | TokenKind::SuperscriptPlus | TokenKind::SuperscriptMinus)
}

/// Whether an operator of `precedence` must be left to the enclosing call.
const fn yields_to_enclosing(precedence: i32, enclosing: i32, enclosing_right_assoc: bool) -> bool {
    if enclosing_right_assoc {
        precedence < enclosing
    } else {
        precedence <= enclosing
    }
}

impl Parser {
    /// Parses an arithmetic expression, appending its operations in postfix
    /// order to `operations`.
    ///
    /// This is precedence climbing: the call consumes operators that bind
    /// tighter than `enclosing_precedence` and returns at the first one that
    /// does not. A right-associative enclosing operator also accepts operators
    /// of its own precedence, which is how `2^3^2` groups as `2^(3^2)`.
    ///
    /// Besides explicit operators the loop handles:
    /// - a term that directly follows another, joined by an implicit multiply
    ///   with an empty span (`2x`, `3(4+5)`, `2sin(x)`);
    /// - a superscript run, raised onto everything parsed so far (`x²`);
    /// - the postfix operators `%`, `!`, `deg`, `rad` and `grad`.
    ///
    /// # Parameters
    /// - `operations`: Output buffer shared by the whole statement.
    /// - `enclosing_precedence`: Precedence of the operator whose operand is
    ///   being parsed, `-1` at the top.
    /// - `enclosing_right_assoc`: Whether that operator is right-associative.
    ///
    /// Operands nested deeper than
    /// [`MAX_NESTING`](crate::interpreter::parser::core::MAX_NESTING) end the
    /// statement with an `unexpected_token` diagnostic.
    pub fn parse_arithmetic(&mut self,
                            operations: &mut Vec<Operation>,
                            enclosing_precedence: i32,
                            enclosing_right_assoc: bool) {
        if self.enter_nesting() {
            self.parse_operand_chain(operations, enclosing_precedence, enclosing_right_assoc);
            self.leave_nesting();
        }
    }

    fn parse_operand_chain(&mut self,
                           operations: &mut Vec<Operation>,
                           enclosing_precedence: i32,
                           enclosing_right_assoc: bool) {
        if let Some(op) = prefix_operator(self.current().kind) {
            let token = self.forward();
            self.parse_arithmetic(operations, UNARY_PRECEDENCE, false);
            operations.push(Operation::Unary { op,
                                               span: token.span });
        } else {
            self.parse_primary_term(operations);
        }

        loop {
            let kind = self.current().kind;
            let (op, span) = if let Some(op) = binary_operator(kind) {
                if yields_to_enclosing(op.precedence(), enclosing_precedence, enclosing_right_assoc) {
                    return;
                }
                (op, self.forward().span)
            } else if starts_implicit_term(kind) {
                let op = BinaryOperator::Mul;
                if yields_to_enclosing(op.precedence(), enclosing_precedence, enclosing_right_assoc) {
                    return;
                }
                (op, SourceSpan::empty_at(self.current().span.start))
            } else if is_superscript(kind) {
                let span = SourceSpan::empty_at(self.current().span.start);
                self.parse_superscript(operations);
                operations.push(Operation::Binary { op: BinaryOperator::Pow,
                                                    span });
                continue;
            } else if let Some(op) = postfix_operator(kind) {
                let span = self.forward().span;
                operations.push(Operation::Unary { op, span });
                continue;
            } else {
                return;
            };

            self.parse_arithmetic(operations, op.precedence(), op.is_right_associative());
            operations.push(Operation::Binary { op, span });
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::{Expression, Operation},
        interpreter::{lexer::LexerOptions, parser::parse_single},
    };

    /// Renders the postfix operations of a plain arithmetic statement.
    fn postfix(input: &str) -> String {
        let (parser, expression) = parse_single(input, LexerOptions::default(), 64);
        assert!(parser.diagnostics().is_empty(), "{:?}", parser.diagnostics());
        let Expression::Arithmetic(expr) = expression else {
            panic!("not arithmetic: {expression:?}");
        };
        expr.operations
            .iter()
            .map(|op| match op {
                Operation::Literal { value, .. } => value.to_string(),
                Operation::Variable { name, .. } => name.clone(),
                Operation::Binary { op, .. } => op.name().to_string(),
                Operation::Unary { op, .. } => format!("u{}", op.name()),
                Operation::Call { name, arity, .. } => format!("{name}/{arity}"),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn precedence_levels() {
        assert_eq!(postfix("2+3^2*4"), "2 3 2 exponentiate 4 multiply plus");
        assert_eq!(postfix("1-2-3"), "1 2 minus 3 minus");
        assert_eq!(postfix("8/4/2"), "8 4 divide 2 divide");
        assert_eq!(postfix("1+2<<3"), "1 2 3 left_shift plus");
    }

    #[test]
    fn exponent_is_right_associative() {
        assert_eq!(postfix("2^3^2"), "2 3 2 exponentiate exponentiate");
    }

    #[test]
    fn prefix_operators_bind_below_exponent() {
        assert_eq!(postfix("-2^2"), "2 2 exponentiate uminus");
        assert_eq!(postfix("-2*3"), "2 uminus 3 multiply");
        assert_eq!(postfix("√4+1"), "4 uradical 1 plus");
        assert_eq!(postfix("NOT 5 AND 3"), "5 ubinary_not 3 binary_and");
    }

    #[test]
    fn implicit_multiplication() {
        assert_eq!(postfix("2x"), "2 x multiply");
        assert_eq!(postfix("2(3+4)"), "2 3 4 plus multiply");
        assert_eq!(postfix("2sin(30)"), "2 30 sin/1 multiply");
        assert_eq!(postfix("2x^2"), "2 x 2 exponentiate multiply");
        assert_eq!(postfix("3√4"), "3 4 uradical multiply");
    }

    #[test]
    fn superscripts_raise_the_preceding_term() {
        assert_eq!(postfix("x²"), "x 2 exponentiate");
        assert_eq!(postfix("2+3²"), "2 3 2 exponentiate plus");
        assert_eq!(postfix("x²⁺¹"), "x 2 1 plus exponentiate");
        assert_eq!(postfix("x⁻¹"), "x 1 uminus exponentiate");
    }

    #[test]
    fn postfix_operators() {
        assert_eq!(postfix("3!"), "3 ufactorial");
        assert_eq!(postfix("50%"), "50 upercent");
        assert_eq!(postfix("-3!"), "3 ufactorial uminus");
        assert_eq!(postfix("90deg+1"), "90 udeg 1 plus");
    }

    #[test]
    fn deep_operator_chains_are_cut_off() {
        let input = format!("{}1", "-".repeat(100_000));
        let (parser, _) = parse_single(&input, LexerOptions::default(), 64);
        assert_eq!(parser.diagnostics().len(), 1);
        assert_eq!(parser.diagnostics()[0].arguments, vec!["minus".to_string()]);

        let input = format!("2{}", "^2".repeat(100_000));
        let (parser, _) = parse_single(&input, LexerOptions::default(), 64);
        assert_eq!(parser.diagnostics().len(), 1);

        assert_eq!(postfix("--3"), "3 uminus uminus");
    }

    #[test]
    fn implicit_multiply_has_empty_span() {
        let (_, expression) = parse_single("2x", LexerOptions::default(), 64);
        let Expression::Arithmetic(expr) = expression else {
            panic!("not arithmetic");
        };
        assert_eq!(expr.to_string(), "(2)@0-1 (x)@1-2 [multiply]@1-1");
    }
}
