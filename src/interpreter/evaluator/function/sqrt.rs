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

/// Principal square root. Negative reals give an imaginary result.
pub fn sqrt(args: &mut [Number], _: &Settings) -> Result<(), EvalErrorKind> {
    single(args)?.sqrt_mut();
    Ok(())
}

/// Cube root; the cube root of a negative real is real.
pub fn cbrt(args: &mut [Number], _: &Settings) -> Result<(), EvalErrorKind> {
    let x = single(args)?;
    let three = Number::from_parts(x.precision(), 3, 0);
    x.nth_root_mut(&three);
    Ok(())
}

/// `root(x, n)`: the `n`th root of `x`.
///
/// # Errors
/// `ZeroRoot` when `n` is zero.
///
/// # Example
/// ```
/// use tcalc::interpreter::{
///     evaluator::{Settings, function::sqrt::root},
///     value::number::Number,
/// };
///
/// let mut args = [Number::from_parts(64, 81, 0), Number::from_parts(64, 4, 0)];
/// root(&mut args, &Settings::default()).unwrap();
/// assert_eq!(args[0].string(), "3");
/// ```
pub fn root(args: &mut [Number], _: &Settings) -> Result<(), EvalErrorKind> {
    let (x, n) = pair(args)?;
    if n.is_zero() {
        return Err(EvalErrorKind::ZeroRoot);
    }
    x.nth_root_mut(n);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_root_of_negative_is_real() {
        let mut args = [Number::from_parts(64, -27, 0)];
        cbrt(&mut args, &Settings::default()).unwrap();
        assert_eq!(args[0].string(), "-3");
    }

    #[test]
    fn zeroth_root_is_rejected() {
        let mut args = [Number::from_parts(64, 5, 0), Number::new(64)];
        assert_eq!(root(&mut args, &Settings::default()), Err(EvalErrorKind::ZeroRoot));
    }

    #[test]
    fn square_root_of_negative_is_imaginary() {
        let mut args = [Number::from_parts(64, -9, 0)];
        sqrt(&mut args, &Settings::default()).unwrap();
        assert_eq!(args[0].string(), "0+3i");
    }
}
