use crate::{
    ast::{BinaryOperator, Operation, UnaryOperator},
    error::{Diagnostic, DiagnosticKind},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::Parser,
        value::number::Number,
    },
    util::unicode::to_inline_number,
};

impl Parser {
    /// Parses one primary term: a literal, a variable, a call or a
    /// parenthesized group.
    ///
    /// A missing `)` is tolerated silently. Any other token is reported as
    /// unexpected and skipped, so the caller always makes progress.
    pub(in crate::interpreter::parser) fn parse_primary_term(&mut self,
                                                             operations: &mut Vec<Operation>) {
        match self.current().kind {
            TokenKind::Identifier if self.peek().kind == TokenKind::OpenParenthesis => {
                self.parse_function(operations);
            },
            TokenKind::Identifier => {
                let token = self.forward();
                operations.push(Operation::Variable { name: token.text,
                                                      span: token.span, });
            },
            TokenKind::NumericLiteral | TokenKind::HexLiteral | TokenKind::BinaryLiteral => {
                let token = self.forward();
                let value = self.literal_value(&token, &token.text);
                operations.push(Operation::Literal { value,
                                                     span: token.span });
            },
            TokenKind::OpenParenthesis => {
                self.forward();
                self.parse_arithmetic(operations, -1, false);
                if self.current().kind == TokenKind::CloseParenthesis {
                    self.forward();
                }
            },
            _ => {
                let token = self.forward();
                self.unexpected_token(&token);
            },
        }
    }

    /// Parses `name(arg, ...)` with the name as the current token.
    ///
    /// `name()` is a call with arity 0. Like the group form, a missing `)` is
    /// tolerated.
    fn parse_function(&mut self, operations: &mut Vec<Operation>) {
        let name = self.forward();
        self.forward();

        let mut arity = 0;
        if self.current().kind == TokenKind::CloseParenthesis {
            self.forward();
        } else {
            loop {
                self.parse_arithmetic(operations, -1, false);
                arity += 1;
                if self.current().kind != TokenKind::ArgumentSeparator {
                    break;
                }
                self.forward();
            }
            if self.current().kind == TokenKind::CloseParenthesis {
                self.forward();
            }
        }

        operations.push(Operation::Call { name: name.text,
                                          arity,
                                          span: name.span });
    }

    /// Materializes a literal token at the parser's precision.
    ///
    /// `text` is the literal spelled with inline characters, which differs
    /// from the token text only for superscripts. Text MPFR cannot read is
    /// reported as `invalid_number_literal` and becomes zero.
    fn literal_value(&mut self, token: &Token, text: &str) -> Number {
        let mut value = Number::new(self.precision());
        let parsed = match token.kind {
            TokenKind::HexLiteral => value.set_hexadecimal(text),
            TokenKind::BinaryLiteral => value.set_binary(text),
            _ if text == "i" => {
                value = Number::from_parts(self.precision(), 0, 1);
                Ok(())
            },
            _ if text.ends_with('i') => value.set_imaginary(text),
            _ => value.set_real(text),
        };
        if parsed.is_err() {
            self.report(Diagnostic::new(DiagnosticKind::InvalidNumberLiteral, token.span));
        }
        value
    }

    /// Parses a superscript exponent run such as `²`, `⁻¹` or `²⁺¹`.
    ///
    /// `⁺` and `⁻` act as prefix operators before a superscript literal and
    /// as addition and subtraction between two of them. The run is a
    /// complete expression; the caller raises the preceding term to it.
    pub(in crate::interpreter::parser) fn parse_superscript(&mut self,
                                                            operations: &mut Vec<Operation>) {
        self.parse_superscript_term(operations);
        loop {
            let op = match self.current().kind {
                TokenKind::SuperscriptPlus => BinaryOperator::Add,
                TokenKind::SuperscriptMinus => BinaryOperator::Sub,
                _ => return,
            };
            let span = self.forward().span;
            self.parse_superscript_term(operations);
            operations.push(Operation::Binary { op, span });
        }
    }

    fn parse_superscript_term(&mut self, operations: &mut Vec<Operation>) {
        if self.current().kind == TokenKind::SuperscriptLiteral {
            self.parse_superscript_number(operations);
            return;
        }
        let token = self.forward();
        let op = match token.kind {
            TokenKind::SuperscriptPlus => UnaryOperator::Plus,
            TokenKind::SuperscriptMinus => UnaryOperator::Negate,
            _ => {
                self.unexpected_token(&token);
                return;
            },
        };
        self.parse_superscript_number(operations);
        operations.push(Operation::Unary { op,
                                           span: token.span });
    }

    fn parse_superscript_number(&mut self, operations: &mut Vec<Operation>) {
        if self.current().kind != TokenKind::SuperscriptLiteral {
            let token = self.current().clone();
            self.unexpected_token(&token);
            return;
        }
        let token = self.forward();
        let value = if let Some(inline) = to_inline_number(&token.text) {
            self.literal_value(&token, &inline)
        } else {
            self.report(Diagnostic::new(DiagnosticKind::InvalidNumberLiteral, token.span));
            Number::new(self.precision())
        };
        operations.push(Operation::Literal { value,
                                             span: token.span });
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::{Expression, Operation},
        error::DiagnosticKind,
        interpreter::{lexer::LexerOptions, parser::parse_single},
    };

    fn operations(input: &str) -> Vec<Operation> {
        let (_, expression) = parse_single(input, LexerOptions::default(), 64);
        match expression {
            Expression::Arithmetic(expr) => expr.operations,
            other => panic!("not arithmetic: {other:?}"),
        }
    }

    #[test]
    fn literal_forms() {
        let rendered: Vec<String> =
            operations("0x1F+0b101+2.5e1+3i+i").iter()
                                               .filter_map(|op| match op {
                                                   Operation::Literal { value, .. } => Some(value.to_string()),
                                                   _ => None,
                                               })
                                               .collect();
        assert_eq!(rendered, ["31", "5", "25", "0+3i", "0+1i"]);
    }

    #[test]
    fn function_calls_count_arguments() {
        let ops = operations("log(8, 2) + f()");
        assert!(matches!(&ops[2], Operation::Call { name, arity: 2, .. } if name == "log"));
        assert!(matches!(&ops[3], Operation::Call { name, arity: 0, .. } if name == "f"));
    }

    #[test]
    fn missing_close_parenthesis_is_tolerated() {
        let (parser, expression) = parse_single("2*(3+4", LexerOptions::default(), 64);
        assert!(parser.diagnostics().is_empty());
        assert_eq!(expression.span().end, 6);

        let (parser, _) = parse_single("sqrt(4", LexerOptions::default(), 64);
        assert!(parser.diagnostics().is_empty());
    }

    #[test]
    fn european_arguments() {
        let (parser, expression) = parse_single("root(2,5; 3)", LexerOptions::european(), 64);
        assert!(parser.diagnostics().is_empty());
        let Expression::Arithmetic(expr) = expression else {
            panic!("not arithmetic");
        };
        assert_eq!(expr.operations[0].to_string(), "(2.5)@5-8");
        assert!(matches!(&expr.operations[2], Operation::Call { arity: 2, .. }));
    }

    #[test]
    fn missing_operand_reports_the_token() {
        let (parser, _) = parse_single("2*", LexerOptions::default(), 64);
        let diagnostic = &parser.diagnostics()[0];
        assert_eq!(diagnostic.kind, DiagnosticKind::UnexpectedToken);
        assert_eq!(diagnostic.arguments, vec!["end_of_file".to_string()]);
    }

    #[test]
    fn superscript_imaginary_exponent() {
        let ops = operations("2ⁱ");
        assert_eq!(ops[1].to_string(), "(0+1i)@1-4");
    }
}
