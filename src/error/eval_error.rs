use std::fmt;

use crate::ast::SourceSpan;

/// Every way the evaluation of one statement can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvalErrorKind {
    /// The operation sequence left the stack in an impossible state.
    InvalidProgram,
    /// Division by an exact zero.
    DivideByZero,
    /// Logarithm of zero.
    LogZero,
    /// Logarithm with a base of zero or one.
    LogBase,
    /// A name that is neither a constant nor a variable.
    UndefinedVariable,
    /// A call to a function that does not exist.
    UndefinedFunction,
    /// A call whose argument count matches no overload.
    BadArity,
    /// An ordering comparison with a non-real operand.
    ComplexInequality,
    /// `0^0`
    ZeroPowZero,
    /// The zeroth root of a value.
    ZeroRoot,
    /// Assignment to `pi`, `e` or another constant.
    AssignToConstant,
    /// A complex value was produced while complex mode is off.
    RealModeComplexResult,
    /// A value became infinite.
    Overflow,
    /// A value became NaN.
    NanError,
    OutOfTanDomain,
    OutOfSecDomain,
    OutOfCscDomain,
    OutOfCotDomain,
    OutOfAsecDomain,
    OutOfAcscDomain,
    OutOfAcotDomain,
    /// A bitwise operator, shift or factorial was applied to a non-integer.
    NonIntegerOperand,
    /// A bitwise operator, shift or factorial was applied to a complex value.
    NonRealOperand,
    /// A function definition tried to replace a native function or constant.
    RedefineBuiltin,
    /// User function calls nested too deeply.
    RecursionLimit,
}

impl EvalErrorKind {
    /// Returns the snake_case name of the kind.
    ///
    /// # Example
    /// ```
    /// use tcalc::error::EvalErrorKind;
    ///
    /// assert_eq!(EvalErrorKind::DivideByZero.name(), "divide_by_zero");
    /// assert_eq!(EvalErrorKind::OutOfTanDomain.name(), "out_of_tan_domain");
    /// ```
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::InvalidProgram => "invalid_program",
            Self::DivideByZero => "divide_by_zero",
            Self::LogZero => "log_zero",
            Self::LogBase => "log_base",
            Self::UndefinedVariable => "undefined_variable",
            Self::UndefinedFunction => "undefined_function",
            Self::BadArity => "bad_arity",
            Self::ComplexInequality => "complex_inequality",
            Self::ZeroPowZero => "zero_pow_zero",
            Self::ZeroRoot => "zero_root",
            Self::AssignToConstant => "assign_to_constant",
            Self::RealModeComplexResult => "real_mode_complex_result",
            Self::Overflow => "overflow",
            Self::NanError => "nan_error",
            Self::OutOfTanDomain => "out_of_tan_domain",
            Self::OutOfSecDomain => "out_of_sec_domain",
            Self::OutOfCscDomain => "out_of_csc_domain",
            Self::OutOfCotDomain => "out_of_cot_domain",
            Self::OutOfAsecDomain => "out_of_asec_domain",
            Self::OutOfAcscDomain => "out_of_acsc_domain",
            Self::OutOfAcotDomain => "out_of_acot_domain",
            Self::NonIntegerOperand => "non_integer_operand",
            Self::NonRealOperand => "non_real_operand",
            Self::RedefineBuiltin => "redefine_builtin",
            Self::RecursionLimit => "recursion_limit",
        }
    }

    /// A short human readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidProgram => "malformed operation sequence",
            Self::DivideByZero => "division by zero",
            Self::LogZero => "logarithm of zero",
            Self::LogBase => "logarithm base must not be 0 or 1",
            Self::UndefinedVariable => "undefined variable",
            Self::UndefinedFunction => "undefined function",
            Self::BadArity => "wrong number of arguments",
            Self::ComplexInequality => "complex numbers cannot be ordered",
            Self::ZeroPowZero => "zero to the power of zero",
            Self::ZeroRoot => "zeroth root",
            Self::AssignToConstant => "cannot assign to a constant",
            Self::RealModeComplexResult => "complex result in real mode",
            Self::Overflow => "overflow",
            Self::NanError => "result is not a number",
            Self::OutOfTanDomain => "argument outside the domain of tan",
            Self::OutOfSecDomain => "argument outside the domain of sec",
            Self::OutOfCscDomain => "argument outside the domain of csc",
            Self::OutOfCotDomain => "argument outside the domain of cot",
            Self::OutOfAsecDomain => "argument outside the domain of asec",
            Self::OutOfAcscDomain => "argument outside the domain of acsc",
            Self::OutOfAcotDomain => "argument outside the domain of acot",
            Self::NonIntegerOperand => "operand must be an integer",
            Self::NonRealOperand => "operand must be real",
            Self::RedefineBuiltin => "cannot redefine a built-in name",
            Self::RecursionLimit => "function calls nested too deeply",
        }
    }

    /// Attaches a source span, producing a complete error.
    #[must_use]
    pub const fn at(self, span: SourceSpan) -> EvalError {
        EvalError { kind: self, span }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An evaluation failure and the span of the operation that triggered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalError {
    /// What went wrong.
    pub kind: EvalErrorKind,
    /// Where it went wrong.
    pub span: SourceSpan,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,
               "{} at {}..{}: {}",
               self.kind.name(),
               self.span.start,
               self.span.end,
               self.kind.description())
    }
}

impl std::error::Error for EvalError {}
