use std::fmt;

use crate::interpreter::value::number::Number;

/// A half-open `[start, end)` byte range into the input text.
///
/// Spans are produced by the source reader when a token is flushed and are
/// carried unchanged through tokens, operations and evaluation errors.
///
/// # Example
/// ```
/// use tcalc::ast::SourceSpan;
///
/// let span = SourceSpan::new(2, 5);
/// assert_eq!(span.len(), 3);
/// assert_eq!(span.to_string(), "2-5");
/// assert!(SourceSpan::empty_at(4).is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SourceSpan {
    /// Offset of the first byte.
    pub start: usize,
    /// Offset one past the last byte.
    pub end:   usize,
}

impl SourceSpan {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Zero-width span at `offset`, used for synthesized operations such as
    /// implicit multiplication.
    #[must_use]
    pub const fn empty_at(offset: usize) -> Self {
        Self { start: offset,
               end:   offset, }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Returns the span covering `self` through `other`.
    #[must_use]
    pub const fn to(self, other: Self) -> Self {
        Self { start: self.start,
               end:   other.end, }
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Binary operators that can appear in an arithmetic expression.
///
/// Comparison operators are not listed here: they only ever delimit a whole
/// statement and are represented by [`ComparisonKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`, `×`, `⋅` and implicit multiplication.
    Mul,
    /// `/`, `÷`
    Div,
    /// `^` and superscript exponents.
    Pow,
    /// `<<`
    LeftShift,
    /// `>>`
    RightShift,
    /// `AND`
    And,
    /// `NAND`
    Nand,
    /// `OR`
    Or,
    /// `NOR`
    Nor,
    /// `XOR`
    Xor,
    /// `XNOR`
    Xnor,
}

/// Binding power shared by every prefix operator.
pub const UNARY_PRECEDENCE: i32 = 4;

impl BinaryOperator {
    /// Returns the binding power of the operator; higher binds tighter.
    ///
    /// # Example
    /// ```
    /// use tcalc::ast::BinaryOperator;
    ///
    /// assert!(BinaryOperator::Pow.precedence() > BinaryOperator::Mul.precedence());
    /// assert!(BinaryOperator::Mul.precedence() > BinaryOperator::Add.precedence());
    /// ```
    #[must_use]
    pub const fn precedence(self) -> i32 {
        match self {
            Self::Pow => 5,
            Self::LeftShift
            | Self::RightShift
            | Self::And
            | Self::Nand
            | Self::Or
            | Self::Nor
            | Self::Xor
            | Self::Xnor => 3,
            Self::Mul | Self::Div => 2,
            Self::Add | Self::Sub => 1,
        }
    }

    /// Only exponentiation groups to the right.
    #[must_use]
    pub const fn is_right_associative(self) -> bool {
        matches!(self, Self::Pow)
    }

    /// The snake_case name of the token kind the operator was read from.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "plus",
            Self::Sub => "minus",
            Self::Mul => "multiply",
            Self::Div => "divide",
            Self::Pow => "exponentiate",
            Self::LeftShift => "left_shift",
            Self::RightShift => "right_shift",
            Self::And => "binary_and",
            Self::Nand => "binary_nand",
            Self::Or => "binary_or",
            Self::Nor => "binary_nor",
            Self::Xor => "binary_xor",
            Self::Xnor => "binary_xnor",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Operators applied to a single operand, in prefix or postfix position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// Prefix `-`.
    Negate,
    /// Prefix `+`.
    Plus,
    /// Prefix `√`.
    Radical,
    /// Prefix `NOT`.
    Not,
    /// Postfix `%`.
    Percent,
    /// Postfix `!`.
    Factorial,
    /// Postfix `deg`.
    Degrees,
    /// Postfix `rad`.
    Radians,
    /// Postfix `grad`.
    Gradians,
}

impl UnaryOperator {
    #[must_use]
    pub const fn is_postfix(self) -> bool {
        matches!(self,
                 Self::Percent | Self::Factorial | Self::Degrees | Self::Radians | Self::Gradians)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Negate => "minus",
            Self::Plus => "plus",
            Self::Radical => "radical",
            Self::Not => "binary_not",
            Self::Percent => "percent",
            Self::Factorial => "factorial",
            Self::Degrees => "deg",
            Self::Radians => "rad",
            Self::Gradians => "grad",
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The delimiter of a boolean statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonKind {
    /// A bare `=` that did not form an assignment or a definition.
    Equal,
    /// `==`
    Equality,
    /// `!=`, `≠`
    NotEqual,
    /// `<`
    Less,
    /// `<=`, `≤`
    LessOrEqual,
    /// `>`
    Greater,
    /// `>=`, `≥`
    GreaterOrEqual,
}

impl ComparisonKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Equality => "equality",
            Self::NotEqual => "not_equal",
            Self::Less => "less_than",
            Self::LessOrEqual => "less_or_equal",
            Self::Greater => "greater_than",
            Self::GreaterOrEqual => "greater_or_equal",
        }
    }

    /// Returns `true` for the kinds that order their operands and therefore
    /// need both sides to be real.
    #[must_use]
    pub const fn is_ordering(self) -> bool {
        matches!(self,
                 Self::Less | Self::LessOrEqual | Self::Greater | Self::GreaterOrEqual)
    }
}

/// One element of a flattened postfix program.
///
/// Precedence and grouping have already been resolved by the parser, so a
/// sequence of operations is evaluated by a single left-to-right walk over a
/// value stack.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Pops two values and pushes their combination.
    Binary {
        /// The operator to apply.
        op:   BinaryOperator,
        /// Where the operator was written; empty for implicit multiplication.
        span: SourceSpan,
    },
    /// Replaces the top of the stack.
    Unary {
        /// The operator to apply.
        op:   UnaryOperator,
        /// Where the operator was written.
        span: SourceSpan,
    },
    /// Pushes a number materialized at parse time.
    Literal {
        /// The parsed value.
        value: Number,
        /// Where the literal was written.
        span:  SourceSpan,
    },
    /// Pushes the value bound to a name.
    Variable {
        /// The referenced name.
        name: String,
        /// Where the name was written.
        span: SourceSpan,
    },
    /// Pops `arity` arguments and pushes the result of a function.
    Call {
        /// The called function.
        name:  String,
        /// Number of arguments written at the call site.
        arity: usize,
        /// Where the function name was written.
        span:  SourceSpan,
    },
}

impl Operation {
    /// Returns the source span of the operation.
    #[must_use]
    pub const fn span(&self) -> SourceSpan {
        match self {
            Self::Binary { span, .. }
            | Self::Unary { span, .. }
            | Self::Literal { span, .. }
            | Self::Variable { span, .. }
            | Self::Call { span, .. } => *span,
        }
    }
}

/// Debug rendering of one operation.
///
/// # Example
/// ```
/// use tcalc::ast::{BinaryOperator, Operation, SourceSpan};
///
/// let op = Operation::Binary { op:   BinaryOperator::Add,
///                              span: SourceSpan::new(1, 2), };
/// assert_eq!(op.to_string(), "[plus]@1-2");
///
/// let call = Operation::Call { name:  "log".to_string(),
///                              arity: 2,
///                              span:  SourceSpan::new(0, 3), };
/// assert_eq!(call.to_string(), "[log/2]@0-3");
/// ```
impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary { op, span } => write!(f, "[{op}]@{span}"),
            Self::Unary { op, span } => write!(f, "[unary {op}]@{span}"),
            Self::Literal { value, span } => write!(f, "({value})@{span}"),
            Self::Variable { name, span } => write!(f, "({name})@{span}"),
            Self::Call { name, arity, span } => write!(f, "[{name}/{arity}]@{span}"),
        }
    }
}

/// A postfix operation sequence and the span of the text it was parsed from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArithmeticExpression {
    /// Operations in evaluation order.
    pub operations: Vec<Operation>,
    /// Span of the whole expression.
    pub span:       SourceSpan,
}

impl ArithmeticExpression {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl fmt::Display for ArithmeticExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, op) in self.operations.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{op}")?;
        }
        Ok(())
    }
}

/// `name = expression`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpression {
    /// The variable being bound.
    pub target: String,
    /// The right-hand side.
    pub value:  ArithmeticExpression,
    /// Span of the whole statement.
    pub span:   SourceSpan,
}

/// `name(p1, p2, ...) = body`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDefinition {
    /// The function being defined.
    pub name:       String,
    /// Parameter names in declaration order.
    pub parameters: Vec<String>,
    /// The body, evaluated with the parameters bound.
    pub body:       ArithmeticExpression,
    /// Span of the whole statement.
    pub span:       SourceSpan,
}

/// `lhs <comparison> rhs`
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanExpression {
    pub lhs:  ArithmeticExpression,
    pub rhs:  ArithmeticExpression,
    pub kind: ComparisonKind,
    /// Span of the whole statement.
    pub span: SourceSpan,
}

/// One parsed top-level statement.
///
/// Produced once per statement by the parser and never modified afterwards.
/// The evaluator dispatches on the variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A plain arithmetic expression.
    Arithmetic(ArithmeticExpression),
    /// A variable assignment.
    Assignment(AssignmentExpression),
    /// A user function definition.
    FunctionDefinition(FunctionDefinition),
    /// A comparison between two arithmetic expressions.
    Boolean(BooleanExpression),
}

impl Expression {
    /// Returns the span of the entire statement.
    #[must_use]
    pub const fn span(&self) -> SourceSpan {
        match self {
            Self::Arithmetic(expr) => expr.span,
            Self::Assignment(expr) => expr.span,
            Self::FunctionDefinition(expr) => expr.span,
            Self::Boolean(expr) => expr.span,
        }
    }

    /// A short name of the statement form, used in logging.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Arithmetic(_) => "arithmetic",
            Self::Assignment(_) => "assignment",
            Self::FunctionDefinition(_) => "function_definition",
            Self::Boolean(_) => "boolean",
        }
    }
}
