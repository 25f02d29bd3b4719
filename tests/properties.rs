use proptest::prelude::*;
use tcalc::interpreter::{
    evaluator::Evaluator,
    lexer::{Lexer, LexerOptions, Token, TokenKind},
    parser::Parser,
};

fn arithmetic() -> impl Strategy<Value = String> {
    let operand = prop_oneof![(0u32..1000).prop_map(|n| n.to_string()),
                              Just("x".to_string()),
                              Just("π".to_string()),
                              Just("2i".to_string())];
    let operator = prop::sample::select(vec!["+", "-", "*", "/", "(", ")"]);
    (operand.clone(), prop::collection::vec((operator, operand), 0..6)).prop_map(|(first, rest)| {
        let mut text = first;
        for (op, operand) in rest {
            text.push_str(op);
            text.push_str(&operand);
        }
        text
    })
}

proptest! {
    #[test]
    fn lexer_ends_with_exactly_one_eof(input in prop::collection::vec(any::<u8>(), 0..64)) {
        let tokens: Vec<Token> = Lexer::new(input.clone(), LexerOptions::default()).collect();
        let ends = tokens.iter().filter(|t| t.kind == TokenKind::EndOfFile).count();
        prop_assert_eq!(ends, 1);
        prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::EndOfFile));
        prop_assert!(tokens.len() <= input.len() + 1);
    }

    #[test]
    fn token_text_matches_its_span(input in "\\PC{0,40}") {
        let mut previous_end = 0;
        for token in Lexer::new(input.as_str(), LexerOptions::default()) {
            prop_assert!(token.span.start >= previous_end);
            prop_assert_eq!(input.get(token.span.start..token.span.end), Some(token.text.as_str()));
            previous_end = token.span.end;
        }
    }

    #[test]
    fn evaluation_is_idempotent(input in arithmetic()) {
        let mut evaluator = Evaluator::new(64);
        let mut parser = Parser::new(Lexer::new("x = 3", LexerOptions::default()), 64);
        let outcome = evaluator.evaluate(&parser.parse_expression()).unwrap();
        evaluator.commit_result(outcome);

        let mut parser = Parser::new(Lexer::new(input.as_str(), LexerOptions::default()), 64);
        let statement = parser.parse_expression();
        let first = evaluator.evaluate(&statement);
        let second = evaluator.evaluate(&statement);
        prop_assert_eq!(first, second);
    }
}
