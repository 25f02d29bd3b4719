use crate::{
    error::EvalErrorKind,
    interpreter::{
        evaluator::{core::Settings, function::core::single},
        value::number::Number,
    },
};

/// Defines a one-argument native that applies a `Number` method in place.
///
/// The generated function accepts exactly one argument and never fails on
/// its own; out-of-range results are caught by the evaluator's value check.
///
/// # Example
/// ```
/// use tcalc::interpreter::{
///     evaluator::{Settings, function::builtin::exp},
///     value::number::Number,
/// };
///
/// let mut args = [Number::new(64)];
/// exp(&mut args, &Settings::default()).unwrap();
/// assert_eq!(args[0].string(), "1");
/// ```
macro_rules! in_place_builtin {
    ($fname:ident, $method:ident) => {
        pub fn $fname(args: &mut [Number], _: &Settings) -> Result<(), EvalErrorKind> {
            single(args)?.$method();
            Ok(())
        }
    };
}

in_place_builtin!(exp, exp_mut);
in_place_builtin!(abs, abs_mut);
in_place_builtin!(sinh, sinh_mut);
in_place_builtin!(cosh, cosh_mut);
in_place_builtin!(tanh, tanh_mut);
in_place_builtin!(asinh, asinh_mut);
in_place_builtin!(acosh, acosh_mut);
in_place_builtin!(atanh, atanh_mut);
