use std::{collections::HashMap, fmt, mem};

use tracing::debug;

use crate::{
    ast::{ArithmeticExpression, AssignmentExpression, Expression, FunctionDefinition, Operation},
    error::{EvalError, EvalErrorKind},
    interpreter::{
        evaluator::{
            binary::apply_binary,
            function::core::{NativeFn, native_table},
            stack::EvalStack,
            unary::apply_unary,
            utils::{Bindings, check_value},
        },
        value::{
            format::{DEFAULT_DIGITS, NumberFormat},
            number::{DEFAULT_PRECISION, Number},
        },
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// [`EvalError`] carrying the span of the failing operation.
pub type EvalResult<T> = Result<T, EvalError>;

/// Name the result of a bare arithmetic statement is committed under.
pub const ANSWER_VARIABLE: &str = "Ans";

/// Unit used for trigonometric arguments and inverse trigonometric results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
    Gradians,
}

/// The configuration a native function sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Bit precision of every value the evaluator produces.
    pub precision:    u32,
    pub angle_unit:   AngleUnit,
    /// When off, any non-real intermediate value is an error.
    pub complex_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { precision:    DEFAULT_PRECISION,
               angle_unit:   AngleUnit::Degrees,
               complex_mode: true, }
    }
}

/// The successful result of evaluating one statement.
///
/// Nothing is stored until the outcome is handed to
/// [`Evaluator::commit_result`].
#[derive(Debug, Clone, PartialEq)]
pub enum EvalOutcome {
    /// A bare arithmetic statement.
    Number(Number),
    /// A comparison.
    Boolean(bool),
    /// `name = value`
    Assignment {
        name:  String,
        value: Number,
    },
    /// `name(params) = body`, checked but not yet registered.
    Definition(FunctionDefinition),
}

impl EvalOutcome {
    /// Renders the outcome for display with the given number style.
    ///
    /// # Example
    /// ```
    /// use tcalc::interpreter::{
    ///     evaluator::EvalOutcome,
    ///     value::{format::NumberFormat, number::Number},
    /// };
    ///
    /// let outcome = EvalOutcome::Assignment { name:  "x".to_string(),
    ///                                         value: Number::from_parts(64, 5, 0), };
    /// assert_eq!(outcome.render(NumberFormat::Fixed, 2), "x = 5.00");
    /// assert_eq!(EvalOutcome::Boolean(true).to_string(), "true");
    /// ```
    #[must_use]
    pub fn render(&self, style: NumberFormat, digits: usize) -> String {
        match self {
            Self::Number(value) => value.format(style, digits),
            Self::Boolean(value) => value.to_string(),
            Self::Assignment { name, value } => format!("{name} = {}", value.format(style, digits)),
            Self::Definition(definition) => {
                format!("{}({}) defined", definition.name, definition.parameters.join(", "))
            },
        }
    }
}

impl fmt::Display for EvalOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(NumberFormat::General, DEFAULT_DIGITS))
    }
}

/// Evaluates parsed statements against a session's tables.
///
/// Holds the constants (`pi`, `π`, `tau`, `τ`, `e`), the variables, the
/// native function table and the user-defined functions. Evaluation reads
/// the tables but never writes them; [`Evaluator::commit_result`] is the only
/// way to bind a result, so a caller can preview a statement without
/// changing the session.
///
/// The value stack is kept between calls so its slots are reused.
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
/// let (_, statement) = parse_single("x = 5", LexerOptions::default(), 64);
/// let outcome = evaluator.evaluate(&statement).unwrap();
/// evaluator.commit_result(outcome);
///
/// let (_, statement) = parse_single("x + 1", LexerOptions::default(), 64);
/// let outcome = evaluator.evaluate(&statement).unwrap();
/// assert_eq!(outcome.to_string(), "6");
/// ```
#[derive(Debug)]
pub struct Evaluator {
    pub(super) settings:  Settings,
    pub(super) constants: HashMap<String, Number>,
    pub(super) variables: HashMap<String, Number>,
    /// Native overloads by name, each with its arity.
    pub(super) natives:   HashMap<&'static str, Vec<(usize, NativeFn)>>,
    pub(super) functions: HashMap<String, FunctionDefinition>,
    stack:                EvalStack,
}

impl Evaluator {
    /// Creates an evaluator computing at `precision` bits, in degrees, with
    /// complex results allowed.
    #[must_use]
    pub fn new(precision: u32) -> Self {
        let constants = [("pi", Number::pi(precision)),
                         ("π", Number::pi(precision)),
                         ("tau", Number::tau(precision)),
                         ("τ", Number::tau(precision)),
                         ("e", Number::e(precision))].into_iter()
                                                     .map(|(name, value)| (name.to_string(), value))
                                                     .collect();
        Self { settings: Settings { precision,
                                    ..Settings::default() },
               constants,
               variables: HashMap::new(),
               natives: native_table(),
               functions: HashMap::new(),
               stack: EvalStack::new(precision) }
    }

    #[must_use]
    pub const fn precision(&self) -> u32 {
        self.settings.precision
    }

    #[must_use]
    pub const fn angle_unit(&self) -> AngleUnit {
        self.settings.angle_unit
    }

    pub const fn set_angle_unit(&mut self, unit: AngleUnit) {
        self.settings.angle_unit = unit;
    }

    #[must_use]
    pub const fn complex_mode(&self) -> bool {
        self.settings.complex_mode
    }

    pub const fn set_complex_mode(&mut self, enabled: bool) {
        self.settings.complex_mode = enabled;
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The committed value of a variable.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Number> {
        self.variables.get(name)
    }

    /// The value of a constant.
    #[must_use]
    pub fn constant(&self, name: &str) -> Option<&Number> {
        self.constants.get(name)
    }

    /// A committed user-defined function.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&FunctionDefinition> {
        self.functions.get(name)
    }

    /// Whether `name` is a native function.
    #[must_use]
    pub fn is_native(&self, name: &str) -> bool {
        self.natives.contains_key(name)
    }

    /// Evaluates one statement without changing any table.
    ///
    /// # Returns
    /// - `Number` for arithmetic;
    /// - `Boolean` for comparisons;
    /// - `Assignment` with the evaluated right-hand side;
    /// - `Definition` for a function definition whose name is free.
    ///
    /// # Errors
    /// The first evaluation error, with the span of the operation that
    /// raised it.
    pub fn evaluate(&mut self, expression: &Expression) -> EvalResult<EvalOutcome> {
        debug!(target: "tcalc::evaluator",
               kind = expression.kind_name(),
               span = %expression.span(),
               "evaluate");
        let outcome = match expression {
            Expression::Arithmetic(expr) => self.evaluate_arithmetic(expr).map(EvalOutcome::Number),
            Expression::Boolean(expr) => self.evaluate_boolean(expr).map(EvalOutcome::Boolean),
            Expression::Assignment(expr) => self.evaluate_assignment(expr),
            Expression::FunctionDefinition(definition) => self.evaluate_definition(definition),
        };
        if let Err(error) = &outcome {
            debug!(target: "tcalc::evaluator", %error, "evaluation failed");
        }
        outcome
    }

    /// Folds an outcome into the session.
    ///
    /// Numbers become `Ans`, assignments bind their variable, definitions
    /// register their function. Booleans leave the session unchanged.
    pub fn commit_result(&mut self, outcome: EvalOutcome) {
        match outcome {
            EvalOutcome::Number(value) => {
                debug!(target: "tcalc::evaluator", name = ANSWER_VARIABLE, %value, "commit");
                self.variables.insert(ANSWER_VARIABLE.to_string(), value);
            },
            EvalOutcome::Assignment { name, value } => {
                debug!(target: "tcalc::evaluator", %name, %value, "commit");
                self.variables.insert(name, value);
            },
            EvalOutcome::Definition(definition) => {
                debug!(target: "tcalc::evaluator",
                       name = %definition.name,
                       arity = definition.parameters.len(),
                       "commit function");
                self.functions.insert(definition.name.clone(), definition);
            },
            EvalOutcome::Boolean(_) => {},
        }
    }

    /// Evaluates an arithmetic expression to a single number.
    ///
    /// # Errors
    /// Any evaluation error; `invalid_program` when the operations do not
    /// leave exactly one value.
    pub fn evaluate_arithmetic(&mut self, expr: &ArithmeticExpression) -> EvalResult<Number> {
        let mut stack = mem::replace(&mut self.stack, EvalStack::new(self.settings.precision));
        stack.clear();
        let result = self.run(&mut stack, expr, Bindings::default(), 0)
                         .and_then(|()| {
                             stack.top()
                                  .cloned()
                                  .ok_or_else(|| EvalErrorKind::InvalidProgram.at(expr.span))
                         });
        stack.clear();
        self.stack = stack;
        result
    }

    /// Evaluates the right-hand side of an assignment.
    ///
    /// # Errors
    /// `assign_to_constant` when the target is a constant, otherwise any
    /// error of the right-hand side.
    pub fn evaluate_assignment(&mut self, expr: &AssignmentExpression) -> EvalResult<EvalOutcome> {
        if self.constants.contains_key(&expr.target) {
            return Err(EvalErrorKind::AssignToConstant.at(expr.span));
        }
        let value = self.evaluate_arithmetic(&expr.value)?;
        Ok(EvalOutcome::Assignment { name: expr.target.clone(),
                                     value })
    }

    /// Checks that a definition does not shadow a native function or a
    /// constant.
    ///
    /// # Errors
    /// `redefine_builtin` at the span of the definition.
    pub fn evaluate_definition(&self, definition: &FunctionDefinition) -> EvalResult<EvalOutcome> {
        if self.is_native(&definition.name) || self.constants.contains_key(&definition.name) {
            return Err(EvalErrorKind::RedefineBuiltin.at(definition.span));
        }
        Ok(EvalOutcome::Definition(definition.clone()))
    }

    /// Looks a name up in the parameters, then the constants, then the
    /// variables.
    fn lookup<'a>(&'a self, name: &str, bindings: Bindings<'a>) -> Option<&'a Number> {
        bindings.get(name)
                .or_else(|| self.constants.get(name))
                .or_else(|| self.variables.get(name))
    }

    /// Walks `expr` on top of `stack`, leaving exactly one new value.
    ///
    /// Operators only see values pushed by this walk: a function body cannot
    /// consume its caller's operands.
    ///
    /// # Parameters
    /// - `stack`: The shared value stack.
    /// - `expr`: The operations to run.
    /// - `bindings`: Parameters of the user function being evaluated.
    /// - `depth`: Number of user function calls currently active.
    pub(in crate::interpreter::evaluator) fn run(&self,
                                                 stack: &mut EvalStack,
                                                 expr: &ArithmeticExpression,
                                                 bindings: Bindings<'_>,
                                                 depth: usize)
                                                 -> EvalResult<()> {
        let base = stack.len();
        for operation in &expr.operations {
            let span = operation.span();
            match operation {
                Operation::Literal { value, .. } => stack.push(value),
                Operation::Variable { name, .. } => {
                    let value = self.lookup(name, bindings)
                                    .ok_or_else(|| EvalErrorKind::UndefinedVariable.at(span))?;
                    stack.push(value);
                },
                Operation::Binary { op, .. } => {
                    if stack.len() < base + 2 {
                        return Err(EvalErrorKind::InvalidProgram.at(span));
                    }
                    let (lhs, rhs) = stack.top_two_mut()
                                          .ok_or_else(|| EvalErrorKind::InvalidProgram.at(span))?;
                    apply_binary(*op, lhs, rhs).map_err(|kind| kind.at(span))?;
                    stack.truncate(stack.len() - 1);
                },
                Operation::Unary { op, .. } => {
                    if stack.len() <= base {
                        return Err(EvalErrorKind::InvalidProgram.at(span));
                    }
                    let operand = stack.top_mut()
                                       .ok_or_else(|| EvalErrorKind::InvalidProgram.at(span))?;
                    apply_unary(*op, operand, &self.settings).map_err(|kind| kind.at(span))?;
                },
                Operation::Call { name, arity, .. } => {
                    if stack.len() < base + arity {
                        return Err(EvalErrorKind::InvalidProgram.at(span));
                    }
                    self.call(stack, name, *arity, depth)
                        .map_err(|kind| kind.at(span))?;
                },
            }
            if let Some(top) = stack.top() {
                check_value(top, &self.settings).map_err(|kind| kind.at(span))?;
            }
        }
        if stack.len() != base + 1 {
            return Err(EvalErrorKind::InvalidProgram.at(expr.span));
        }
        Ok(())
    }
}
