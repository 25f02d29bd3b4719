use crate::{
    error::EvalErrorKind,
    interpreter::{
        evaluator::{
            core::Settings,
            function::core::{pair, single},
        },
        value::number::Number,
    },
};

/// Base-10 logarithm.
///
/// # Errors
/// `LogZero` for zero.
pub fn log10(args: &mut [Number], _: &Settings) -> Result<(), EvalErrorKind> {
    let x = single(args)?;
    if x.is_zero() {
        return Err(EvalErrorKind::LogZero);
    }
    x.log10_mut();
    Ok(())
}

/// Natural logarithm.
///
/// # Errors
/// `LogZero` for zero.
pub fn ln(args: &mut [Number], _: &Settings) -> Result<(), EvalErrorKind> {
    let x = single(args)?;
    if x.is_zero() {
        return Err(EvalErrorKind::LogZero);
    }
    x.ln_mut();
    Ok(())
}

/// `log(x, base)` as `ln(x) / ln(base)`.
///
/// # Errors
/// - `LogBase` when the base is 0 or 1.
/// - `LogZero` when `x` is zero.
///
/// # Example
/// ```
/// use tcalc::interpreter::{
///     evaluator::{Settings, function::log::log_base},
///     value::number::Number,
/// };
///
/// let mut args = [Number::from_parts(64, 8, 0), Number::from_parts(64, 2, 0)];
/// log_base(&mut args, &Settings::default()).unwrap();
/// assert_eq!(args[0].string(), "3");
/// ```
pub fn log_base(args: &mut [Number], _: &Settings) -> Result<(), EvalErrorKind> {
    let (x, base) = pair(args)?;
    if base.is_zero() || base.is_one() {
        return Err(EvalErrorKind::LogBase);
    }
    if x.is_zero() {
        return Err(EvalErrorKind::LogZero);
    }
    base.ln_mut();
    x.ln_mut();
    *x /= &*base;
    Ok(())
}
