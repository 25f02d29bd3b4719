use std::fmt;

use logos::Logos;
use tracing::{debug, trace};

use crate::{
    ast::SourceSpan,
    error::{Diagnostic, DiagnosticKind},
    interpreter::source::{SourceChar, SourceReader},
    util::unicode::{
        SUPERSCRIPT_EXPONENT_LOWER, SUPERSCRIPT_EXPONENT_UPPER, SUPERSCRIPT_IMAGINARY,
        SUPERSCRIPT_MINUS, SUPERSCRIPT_PLUS, is_decimal_digit, is_hex_digit, is_letter,
        is_superscript_digit, is_whitespace,
    },
};

/// The kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Malformed input; a diagnostic was recorded alongside it.
    Bad,
    EndOfFile,

    /// Decimal literal, optionally with exponent and `i` suffix, or the word
    /// `i` on its own.
    NumericLiteral,
    /// A run of superscript digits such as `²` or `¹ᵉ⁻³`.
    SuperscriptLiteral,
    HexLiteral,
    BinaryLiteral,
    Identifier,

    Plus,
    SuperscriptPlus,
    Minus,
    SuperscriptMinus,
    Multiply,
    Divide,
    Exponentiate,
    OpenParenthesis,
    CloseParenthesis,
    Radical,
    Percent,
    Factorial,
    LeftShift,
    RightShift,
    GreaterThan,
    GreaterOrEqual,
    LessThan,
    LessOrEqual,
    Equal,
    Equality,
    NotEqual,
    BinaryNand,
    BinaryNor,
    BinaryXnor,
    BinaryAnd,
    BinaryOr,
    BinaryXor,
    BinaryNot,
    Deg,
    Rad,
    Grad,

    /// `,` in standard mode, `;` in European mode.
    ArgumentSeparator,
    /// Newline or `:`.
    ExpressionSeparator,
}

impl TokenKind {
    /// Returns the snake_case name of the kind, used as a diagnostic argument.
    ///
    /// # Example
    /// ```
    /// use tcalc::interpreter::lexer::TokenKind;
    ///
    /// assert_eq!(TokenKind::CloseParenthesis.name(), "close_parenthesis");
    /// ```
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bad => "bad",
            Self::EndOfFile => "end_of_file",
            Self::NumericLiteral => "numeric_literal",
            Self::SuperscriptLiteral => "superscript_literal",
            Self::HexLiteral => "hex_literal",
            Self::BinaryLiteral => "binary_literal",
            Self::Identifier => "identifier",
            Self::Plus => "plus",
            Self::SuperscriptPlus => "superscript_plus",
            Self::Minus => "minus",
            Self::SuperscriptMinus => "superscript_minus",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Exponentiate => "exponentiate",
            Self::OpenParenthesis => "open_parenthesis",
            Self::CloseParenthesis => "close_parenthesis",
            Self::Radical => "radical",
            Self::Percent => "percent",
            Self::Factorial => "factorial",
            Self::LeftShift => "left_shift",
            Self::RightShift => "right_shift",
            Self::GreaterThan => "greater_than",
            Self::GreaterOrEqual => "greater_or_equal",
            Self::LessThan => "less_than",
            Self::LessOrEqual => "less_or_equal",
            Self::Equal => "equal",
            Self::Equality => "equality",
            Self::NotEqual => "not_equal",
            Self::BinaryNand => "binary_nand",
            Self::BinaryNor => "binary_nor",
            Self::BinaryXnor => "binary_xnor",
            Self::BinaryAnd => "binary_and",
            Self::BinaryOr => "binary_or",
            Self::BinaryXor => "binary_xor",
            Self::BinaryNot => "binary_not",
            Self::Deg => "deg",
            Self::Rad => "rad",
            Self::Grad => "grad",
            Self::ArgumentSeparator => "argument_separator",
            Self::ExpressionSeparator => "expression_separator",
        }
    }

    /// Literal kinds that the parser turns into a number.
    #[must_use]
    pub const fn is_number(self) -> bool {
        matches!(self,
                 Self::NumericLiteral | Self::HexLiteral | Self::BinaryLiteral)
    }

    /// Kinds that end a statement.
    #[must_use]
    pub const fn ends_statement(self) -> bool {
        matches!(self, Self::EndOfFile | Self::ExpressionSeparator)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A lexical token: its kind, the exact source text and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: SourceSpan,
}

impl Token {
    /// Debug rendering `(start-end): kind "text"`. Separators and the end of
    /// file omit the text.
    ///
    /// # Example
    /// ```
    /// use tcalc::interpreter::lexer::{Lexer, LexerOptions};
    ///
    /// let mut lexer = Lexer::new("12+x", LexerOptions::default());
    /// assert_eq!(lexer.next_token().format(), "(0-2): numeric_literal \"12\"");
    /// ```
    #[must_use]
    pub fn format(&self) -> String {
        if self.kind.ends_statement() {
            format!("({}): {}", self.span, self.kind)
        } else {
            format!("({}): {} \"{}\"", self.span, self.kind, self.text)
        }
    }
}

/// Operator and punctuation spellings, longest match first.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Symbol {
    #[token("+")]
    Plus,
    #[token("⁺")]
    SuperscriptPlus,
    #[token("-")]
    Minus,
    #[token("⁻")]
    SuperscriptMinus,
    #[token("*")]
    #[token("×")]
    #[token("⋅")]
    Multiply,
    #[token("/")]
    #[token("÷")]
    Divide,
    #[token("^")]
    Exponentiate,
    #[token("(")]
    OpenParenthesis,
    #[token(")")]
    CloseParenthesis,
    #[token("√")]
    Radical,
    #[token("%")]
    Percent,
    #[token("!")]
    Factorial,
    #[token("!=")]
    #[token("≠")]
    NotEqual,
    #[token(">")]
    GreaterThan,
    #[token(">>")]
    RightShift,
    #[token(">=")]
    #[token("≥")]
    GreaterOrEqual,
    #[token("<")]
    LessThan,
    #[token("<<")]
    LeftShift,
    #[token("<=")]
    #[token("≤")]
    LessOrEqual,
    #[token("=")]
    Equal,
    #[token("==")]
    Equality,
    #[token("\n")]
    #[token(":")]
    ExpressionSeparator,
}

impl Symbol {
    const fn kind(self) -> TokenKind {
        match self {
            Self::Plus => TokenKind::Plus,
            Self::SuperscriptPlus => TokenKind::SuperscriptPlus,
            Self::Minus => TokenKind::Minus,
            Self::SuperscriptMinus => TokenKind::SuperscriptMinus,
            Self::Multiply => TokenKind::Multiply,
            Self::Divide => TokenKind::Divide,
            Self::Exponentiate => TokenKind::Exponentiate,
            Self::OpenParenthesis => TokenKind::OpenParenthesis,
            Self::CloseParenthesis => TokenKind::CloseParenthesis,
            Self::Radical => TokenKind::Radical,
            Self::Percent => TokenKind::Percent,
            Self::Factorial => TokenKind::Factorial,
            Self::NotEqual => TokenKind::NotEqual,
            Self::GreaterThan => TokenKind::GreaterThan,
            Self::RightShift => TokenKind::RightShift,
            Self::GreaterOrEqual => TokenKind::GreaterOrEqual,
            Self::LessThan => TokenKind::LessThan,
            Self::LeftShift => TokenKind::LeftShift,
            Self::LessOrEqual => TokenKind::LessOrEqual,
            Self::Equal => TokenKind::Equal,
            Self::Equality => TokenKind::Equality,
            Self::ExpressionSeparator => TokenKind::ExpressionSeparator,
        }
    }
}

/// Reserved words. Matched against a complete word only.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    #[token("NAND")]
    Nand,
    #[token("NOR")]
    Nor,
    #[token("XNOR")]
    Xnor,
    #[token("AND")]
    And,
    #[token("OR")]
    Or,
    #[token("XOR")]
    Xor,
    #[token("NOT")]
    Not,
    #[token("deg")]
    Deg,
    #[token("rad")]
    Rad,
    #[token("grad")]
    Grad,
    #[token("i")]
    Imaginary,
    #[token("ⁱ")]
    SuperscriptImaginary,
}

impl Keyword {
    /// Looks up `word`, which must match a keyword in full.
    fn lookup(word: &str) -> Option<TokenKind> {
        let mut lexer = Self::lexer(word);
        let keyword = lexer.next()?.ok()?;
        if lexer.span().end != word.len() {
            return None;
        }
        Some(match keyword {
                 Self::Nand => TokenKind::BinaryNand,
                 Self::Nor => TokenKind::BinaryNor,
                 Self::Xnor => TokenKind::BinaryXnor,
                 Self::And => TokenKind::BinaryAnd,
                 Self::Or => TokenKind::BinaryOr,
                 Self::Xor => TokenKind::BinaryXor,
                 Self::Not => TokenKind::BinaryNot,
                 Self::Deg => TokenKind::Deg,
                 Self::Rad => TokenKind::Rad,
                 Self::Grad => TokenKind::Grad,
                 Self::Imaginary => TokenKind::NumericLiteral,
                 Self::SuperscriptImaginary => TokenKind::SuperscriptLiteral,
             })
    }
}

/// Decimal and argument separator convention.
///
/// The two characters are chosen as a pair: with `comma_argument_separator`
/// the decimal point is `.` and arguments are separated by `,`; otherwise
/// (the European convention) the decimal point is `,` and arguments are
/// separated by `;`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerOptions {
    pub comma_argument_separator: bool,
}

impl LexerOptions {
    /// `,` decimal point and `;` between arguments.
    #[must_use]
    pub const fn european() -> Self {
        Self { comma_argument_separator: false }
    }

    #[must_use]
    pub const fn decimal_separator(self) -> char {
        if self.comma_argument_separator { '.' } else { ',' }
    }

    #[must_use]
    pub const fn argument_separator(self) -> char {
        if self.comma_argument_separator { ',' } else { ';' }
    }
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self { comma_argument_separator: true }
    }
}

/// Turns input text into tokens, one at a time.
///
/// [`Lexer::next_token`] never fails: malformed input produces a
/// [`TokenKind::Bad`] token and a diagnostic. Once the end of input is
/// reached every further call returns another end-of-file token. Iterating
/// the lexer yields each token up to and including the first end of file.
///
/// # Example
/// ```
/// use tcalc::interpreter::lexer::{Lexer, LexerOptions, TokenKind};
///
/// let kinds: Vec<TokenKind> = Lexer::new("2x²", LexerOptions::default()).map(|t| t.kind)
///                                                                       .collect();
/// assert_eq!(kinds,
///            [TokenKind::NumericLiteral,
///             TokenKind::Identifier,
///             TokenKind::SuperscriptLiteral,
///             TokenKind::EndOfFile]);
/// ```
#[derive(Debug, Clone)]
pub struct Lexer {
    reader:      SourceReader,
    options:     LexerOptions,
    diagnostics: Vec<Diagnostic>,
    reached_end: bool,
}

impl Lexer {
    /// Creates a lexer over `input`, which may contain malformed UTF-8.
    pub fn new(input: impl Into<Vec<u8>>, options: LexerOptions) -> Self {
        Self { reader: SourceReader::new(input),
               options,
               diagnostics: Vec::new(),
               reached_end: false }
    }

    #[must_use]
    pub const fn options(&self) -> LexerOptions {
        self.options
    }

    /// Diagnostics recorded so far, in input order.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Appends a diagnostic raised by a later stage.
    pub fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        debug!(target: "tcalc::lexer", %diagnostic, "diagnostic");
        self.diagnostics.push(diagnostic);
    }

    /// Whether an end-of-file token has been produced.
    #[must_use]
    pub const fn reached_end(&self) -> bool {
        self.reached_end
    }

    /// Returns the next token.
    pub fn next_token(&mut self) -> Token {
        while self.reader
                  .peek()
                  .and_then(SourceChar::as_char)
                  .is_some_and(is_whitespace)
        {
            self.reader.forward();
        }
        self.reader.discard_token();

        let token = match self.reader.forward() {
            None => self.bad(DiagnosticKind::BadCharacter),
            Some(SourceChar::EndOfFile) => {
                self.reached_end = true;
                self.flush(TokenKind::EndOfFile)
            },
            Some(SourceChar::Char(c)) if is_decimal_digit(c) => self.lex_number(c),
            Some(SourceChar::Char(c)) if is_superscript_digit(c) => self.lex_superscript_number(),
            Some(SourceChar::Char(c)) if is_letter(c) => self.lex_word(),
            Some(SourceChar::Char(c)) => self.lex_symbol(c),
        };
        trace!(target: "tcalc::lexer", kind = token.kind.name(), span = %token.span, text = %token.text, "token");
        token
    }

    fn flush(&mut self, kind: TokenKind) -> Token {
        let (span, text) = self.reader.flush();
        Token { kind, text, span }
    }

    /// Flushes the current text as a bad token and records why.
    fn bad(&mut self, reason: DiagnosticKind) -> Token {
        let token = self.flush(TokenKind::Bad);
        self.push_diagnostic(Diagnostic::new(reason, token.span));
        token
    }

    fn peek_char(&self) -> Option<char> {
        self.reader.peek().and_then(SourceChar::as_char)
    }

    fn lex_number(&mut self, first: char) -> Token {
        match (first, self.peek_char()) {
            ('0', Some('b')) => self.lex_radix_number(TokenKind::BinaryLiteral, |c| matches!(c, '0' | '1')),
            ('0', Some('x')) => self.lex_radix_number(TokenKind::HexLiteral, is_hex_digit),
            _ => self.lex_decimal_number(),
        }
    }

    /// Reads the prefix letter and a run of digits or `_`. A prefix with no
    /// run after it is malformed.
    fn lex_radix_number(&mut self, kind: TokenKind, is_digit: fn(char) -> bool) -> Token {
        self.reader.forward();
        let mut read_any = false;
        while self.peek_char()
                  .is_some_and(|c| is_digit(c) || c == '_')
        {
            self.reader.forward();
            read_any = true;
        }
        if read_any {
            self.flush(kind)
        } else {
            self.bad(DiagnosticKind::InvalidNumberLiteral)
        }
    }

    fn lex_decimal_number(&mut self) -> Token {
        let decimal_separator = self.options.decimal_separator();
        let mut reading_decimal = false;
        let mut reading_exponent = false;
        loop {
            match self.peek_char() {
                Some(c) if is_decimal_digit(c) || c == '_' => {
                    self.reader.forward();
                },
                Some(c) if c == decimal_separator => {
                    self.reader.forward();
                    if reading_decimal || reading_exponent {
                        return self.bad(DiagnosticKind::InvalidNumberLiteral);
                    }
                    reading_decimal = true;
                },
                Some('e' | 'E') if !reading_exponent && self.start_exponent(false) => {
                    reading_exponent = true;
                },
                Some('i') => {
                    self.reader.forward();
                    return self.flush(TokenKind::NumericLiteral);
                },
                _ => return self.flush(TokenKind::NumericLiteral),
            }
        }
    }

    fn lex_superscript_number(&mut self) -> Token {
        let mut reading_exponent = false;
        loop {
            match self.peek_char() {
                Some(c) if is_superscript_digit(c) => {
                    self.reader.forward();
                },
                Some(SUPERSCRIPT_EXPONENT_LOWER | SUPERSCRIPT_EXPONENT_UPPER)
                    if !reading_exponent && self.start_exponent(true) =>
                {
                    reading_exponent = true;
                },
                Some(SUPERSCRIPT_IMAGINARY) => {
                    self.reader.forward();
                    return self.flush(TokenKind::SuperscriptLiteral);
                },
                _ => return self.flush(TokenKind::SuperscriptLiteral),
            }
        }
    }

    /// Consumes an exponent marker when a digit follows it, optionally after
    /// one sign. Returns `false` and consumes nothing otherwise, which ends the
    /// literal before the marker.
    fn start_exponent(&mut self, superscript: bool) -> bool {
        let (plus, minus) = if superscript {
            (SUPERSCRIPT_PLUS, SUPERSCRIPT_MINUS)
        } else {
            ('+', '-')
        };
        let is_digit = |c: char| {
            if superscript {
                is_superscript_digit(c)
            } else {
                is_decimal_digit(c)
            }
        };
        match self.reader.peek_many(3).as_slice() {
            [_, sign, digit] if (*sign == plus || *sign == minus) && is_digit(*digit) => {
                self.reader.forward_many(3);
                true
            },
            [_, digit, ..] if is_digit(*digit) => {
                self.reader.forward_many(2);
                true
            },
            _ => false,
        }
    }

    fn lex_word(&mut self) -> Token {
        while self.peek_char()
                  .is_some_and(|c| (is_letter(c) || is_decimal_digit(c)) && !is_superscript_digit(c))
        {
            self.reader.forward();
        }
        let (span, text) = self.reader.flush();
        let kind = Keyword::lookup(&text).unwrap_or(TokenKind::Identifier);
        Token { kind, text, span }
    }

    fn lex_symbol(&mut self, first: char) -> Token {
        if first == self.options.argument_separator() {
            return self.flush(TokenKind::ArgumentSeparator);
        }

        let mut candidate = String::from(first);
        if let Some(next) = self.peek_char() {
            candidate.push(next);
        }
        let mut symbols = Symbol::lexer(&candidate);
        let Some(Ok(symbol)) = symbols.next() else {
            return self.bad(DiagnosticKind::InvalidSymbol);
        };
        if symbols.span().end > first.len_utf8() {
            self.reader.forward();
        }
        self.flush(symbol.kind())
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.reached_end {
            return None;
        }
        Some(self.next_token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Vec<(TokenKind, String)> {
        Lexer::new(input, LexerOptions::default()).map(|t| (t.kind, t.text))
                                                  .collect()
    }

    fn kinds(input: &str) -> Vec<TokenKind> {
        lex(input).into_iter().map(|(kind, _)| kind).collect()
    }

    #[test]
    fn skips_whitespace_but_not_newlines() {
        assert_eq!(lex(" 1 \t+\u{00A0}2\n"),
                   vec![(TokenKind::NumericLiteral, "1".to_string()),
                        (TokenKind::Plus, "+".to_string()),
                        (TokenKind::NumericLiteral, "2".to_string()),
                        (TokenKind::ExpressionSeparator, "\n".to_string()),
                        (TokenKind::EndOfFile, String::new())]);
    }

    #[test]
    fn decimal_literals() {
        assert_eq!(lex("1_000.25e+3i")[0],
                   (TokenKind::NumericLiteral, "1_000.25e+3i".to_string()));
        assert_eq!(lex("2E5")[0], (TokenKind::NumericLiteral, "2E5".to_string()));
    }

    #[test]
    fn exponent_marker_needs_a_digit() {
        assert_eq!(lex("2e"),
                   vec![(TokenKind::NumericLiteral, "2".to_string()),
                        (TokenKind::Identifier, "e".to_string()),
                        (TokenKind::EndOfFile, String::new())]);
        assert_eq!(kinds("3e+x"),
                   [TokenKind::NumericLiteral,
                    TokenKind::Identifier,
                    TokenKind::Plus,
                    TokenKind::Identifier,
                    TokenKind::EndOfFile]);
    }

    #[test]
    fn second_decimal_separator_is_invalid() {
        let mut lexer = Lexer::new("1.2.3", LexerOptions::default());
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::Bad);
        assert_eq!(token.text, "1.2.");
        assert_eq!(lexer.diagnostics()[0].kind, DiagnosticKind::InvalidNumberLiteral);
    }

    #[test]
    fn radix_literals() {
        assert_eq!(lex("0b1_01")[0], (TokenKind::BinaryLiteral, "0b1_01".to_string()));
        assert_eq!(lex("0xfF")[0], (TokenKind::HexLiteral, "0xfF".to_string()));

        let mut lexer = Lexer::new("0x", LexerOptions::default());
        assert_eq!(lexer.next_token().kind, TokenKind::Bad);
        assert_eq!(lexer.diagnostics()[0].kind, DiagnosticKind::InvalidNumberLiteral);
    }

    #[test]
    fn superscript_literals() {
        assert_eq!(lex("x²³")[1], (TokenKind::SuperscriptLiteral, "²³".to_string()));
        assert_eq!(lex("x¹ᵉ⁻³")[1], (TokenKind::SuperscriptLiteral, "¹ᵉ⁻³".to_string()));
        assert_eq!(kinds("x²⁺¹"),
                   [TokenKind::Identifier,
                    TokenKind::SuperscriptLiteral,
                    TokenKind::SuperscriptPlus,
                    TokenKind::SuperscriptLiteral,
                    TokenKind::EndOfFile]);
        assert_eq!(kinds("xⁱ"),
                   [TokenKind::Identifier, TokenKind::EndOfFile]);
        assert_eq!(kinds("2ⁱ"),
                   [TokenKind::NumericLiteral,
                    TokenKind::SuperscriptLiteral,
                    TokenKind::EndOfFile]);
    }

    #[test]
    fn words_stop_before_superscripts() {
        assert_eq!(lex("abc2²")[0], (TokenKind::Identifier, "abc2".to_string()));
    }

    #[test]
    fn keywords() {
        assert_eq!(kinds("NAND NOR XNOR AND OR XOR NOT deg rad grad i"),
                   [TokenKind::BinaryNand,
                    TokenKind::BinaryNor,
                    TokenKind::BinaryXnor,
                    TokenKind::BinaryAnd,
                    TokenKind::BinaryOr,
                    TokenKind::BinaryXor,
                    TokenKind::BinaryNot,
                    TokenKind::Deg,
                    TokenKind::Rad,
                    TokenKind::Grad,
                    TokenKind::NumericLiteral,
                    TokenKind::EndOfFile]);
        assert_eq!(kinds("ANDY degree"),
                   [TokenKind::Identifier, TokenKind::Identifier, TokenKind::EndOfFile]);
    }

    #[test]
    fn symbols() {
        assert_eq!(kinds("+-*×⋅/÷^()√%!"),
                   [TokenKind::Plus,
                    TokenKind::Minus,
                    TokenKind::Multiply,
                    TokenKind::Multiply,
                    TokenKind::Multiply,
                    TokenKind::Divide,
                    TokenKind::Divide,
                    TokenKind::Exponentiate,
                    TokenKind::OpenParenthesis,
                    TokenKind::CloseParenthesis,
                    TokenKind::Radical,
                    TokenKind::Percent,
                    TokenKind::Factorial,
                    TokenKind::EndOfFile]);
        assert_eq!(kinds("!= ≠ > >> >= ≥ < << <= ≤ = == :"),
                   [TokenKind::NotEqual,
                    TokenKind::NotEqual,
                    TokenKind::GreaterThan,
                    TokenKind::RightShift,
                    TokenKind::GreaterOrEqual,
                    TokenKind::GreaterOrEqual,
                    TokenKind::LessThan,
                    TokenKind::LeftShift,
                    TokenKind::LessOrEqual,
                    TokenKind::LessOrEqual,
                    TokenKind::Equal,
                    TokenKind::Equality,
                    TokenKind::ExpressionSeparator,
                    TokenKind::EndOfFile]);
    }

    #[test]
    fn separators_follow_the_convention() {
        assert_eq!(kinds("1,5"),
                   [TokenKind::NumericLiteral,
                    TokenKind::ArgumentSeparator,
                    TokenKind::NumericLiteral,
                    TokenKind::EndOfFile]);

        let european: Vec<(TokenKind, String)> =
            Lexer::new("1,5;2", LexerOptions::european()).map(|t| (t.kind, t.text))
                                                         .collect();
        assert_eq!(european,
                   vec![(TokenKind::NumericLiteral, "1,5".to_string()),
                        (TokenKind::ArgumentSeparator, ";".to_string()),
                        (TokenKind::NumericLiteral, "2".to_string()),
                        (TokenKind::EndOfFile, String::new())]);
    }

    #[test]
    fn unknown_symbols_and_bytes_are_reported() {
        let mut lexer = Lexer::new(&b"#\xFF"[..], LexerOptions::default());
        assert_eq!(lexer.next_token().kind, TokenKind::Bad);
        assert_eq!(lexer.next_token().kind, TokenKind::Bad);
        assert_eq!(lexer.next_token().kind, TokenKind::EndOfFile);
        let found: Vec<DiagnosticKind> = lexer.diagnostics().iter().map(|d| d.kind).collect();
        assert_eq!(found,
                   [DiagnosticKind::InvalidSymbol, DiagnosticKind::BadCharacter]);
    }

    #[test]
    fn end_of_file_repeats() {
        let mut lexer = Lexer::new("", LexerOptions::default());
        assert_eq!(lexer.next_token().kind, TokenKind::EndOfFile);
        assert_eq!(lexer.next_token().kind, TokenKind::EndOfFile);
        assert!(lexer.next().is_none());
    }

    #[test]
    fn spans_are_byte_offsets() {
        let tokens: Vec<Token> = Lexer::new("√π", LexerOptions::default()).collect();
        assert_eq!(tokens[0].span, SourceSpan::new(0, 3));
        assert_eq!(tokens[1].span, SourceSpan::new(3, 5));
        assert_eq!(tokens[1].format(), "(3-5): identifier \"π\"");
    }
}
