use crate::{
    error::EvalErrorKind,
    interpreter::{
        evaluator::{
            core::{AngleUnit, Settings},
            function::core::single,
            utils::convert_angle,
        },
        value::number::Number,
    },
};

fn to_radians(x: &mut Number, settings: &Settings) {
    convert_angle(x, settings.angle_unit, AngleUnit::Radians);
}

fn from_radians(x: &mut Number, settings: &Settings) {
    convert_angle(x, AngleUnit::Radians, settings.angle_unit);
}

pub fn sin(args: &mut [Number], settings: &Settings) -> Result<(), EvalErrorKind> {
    let x = single(args)?;
    to_radians(x, settings);
    x.sin_mut();
    Ok(())
}

pub fn cos(args: &mut [Number], settings: &Settings) -> Result<(), EvalErrorKind> {
    let x = single(args)?;
    to_radians(x, settings);
    x.cos_mut();
    Ok(())
}

/// # Errors
/// `OutOfTanDomain` where the cosine is zero.
pub fn tan(args: &mut [Number], settings: &Settings) -> Result<(), EvalErrorKind> {
    let x = single(args)?;
    to_radians(x, settings);
    let mut cos = x.clone();
    cos.cos_mut();
    if cos.is_zero() {
        return Err(EvalErrorKind::OutOfTanDomain);
    }
    x.tan_mut();
    Ok(())
}

/// `1 / cos(x)`
///
/// # Errors
/// `OutOfSecDomain` where the cosine is zero.
pub fn sec(args: &mut [Number], settings: &Settings) -> Result<(), EvalErrorKind> {
    let x = single(args)?;
    to_radians(x, settings);
    x.cos_mut();
    if x.is_zero() {
        return Err(EvalErrorKind::OutOfSecDomain);
    }
    x.recip_mut();
    Ok(())
}

/// `1 / sin(x)`
///
/// # Errors
/// `OutOfCscDomain` where the sine is zero.
pub fn csc(args: &mut [Number], settings: &Settings) -> Result<(), EvalErrorKind> {
    let x = single(args)?;
    to_radians(x, settings);
    x.sin_mut();
    if x.is_zero() {
        return Err(EvalErrorKind::OutOfCscDomain);
    }
    x.recip_mut();
    Ok(())
}

/// `cos(x) / sin(x)`, exactly zero where the cosine is.
///
/// # Errors
/// `OutOfCotDomain` where the sine is zero or the quotient is not finite.
pub fn cot(args: &mut [Number], settings: &Settings) -> Result<(), EvalErrorKind> {
    let x = single(args)?;
    to_radians(x, settings);
    let mut sin = x.clone();
    sin.sin_mut();
    if sin.is_zero() {
        return Err(EvalErrorKind::OutOfCotDomain);
    }
    x.cos_mut();
    *x /= &sin;
    if !x.is_finite() {
        return Err(EvalErrorKind::OutOfCotDomain);
    }
    Ok(())
}

pub fn asin(args: &mut [Number], settings: &Settings) -> Result<(), EvalErrorKind> {
    let x = single(args)?;
    x.asin_mut();
    from_radians(x, settings);
    Ok(())
}

pub fn acos(args: &mut [Number], settings: &Settings) -> Result<(), EvalErrorKind> {
    let x = single(args)?;
    x.acos_mut();
    from_radians(x, settings);
    Ok(())
}

pub fn atan(args: &mut [Number], settings: &Settings) -> Result<(), EvalErrorKind> {
    let x = single(args)?;
    x.atan_mut();
    from_radians(x, settings);
    Ok(())
}

/// Applies an inverse function to the reciprocal of the argument.
fn inverse_of_reciprocal(args: &mut [Number],
                         settings: &Settings,
                         inverse: fn(&mut Number),
                         undefined: EvalErrorKind)
                         -> Result<(), EvalErrorKind> {
    let x = single(args)?;
    if x.is_zero() {
        return Err(undefined);
    }
    x.recip_mut();
    inverse(x);
    from_radians(x, settings);
    Ok(())
}

/// `acos(1 / x)`
///
/// # Errors
/// `OutOfAsecDomain` for zero.
pub fn asec(args: &mut [Number], settings: &Settings) -> Result<(), EvalErrorKind> {
    inverse_of_reciprocal(args, settings, Number::acos_mut, EvalErrorKind::OutOfAsecDomain)
}

/// `asin(1 / x)`
///
/// # Errors
/// `OutOfAcscDomain` for zero.
pub fn acsc(args: &mut [Number], settings: &Settings) -> Result<(), EvalErrorKind> {
    inverse_of_reciprocal(args, settings, Number::asin_mut, EvalErrorKind::OutOfAcscDomain)
}

/// `atan(1 / x)`
///
/// # Errors
/// `OutOfAcotDomain` for zero.
pub fn acot(args: &mut [Number], settings: &Settings) -> Result<(), EvalErrorKind> {
    inverse_of_reciprocal(args, settings, Number::atan_mut, EvalErrorKind::OutOfAcotDomain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::evaluator::function::core::NativeFn;

    fn degrees(func: NativeFn, angle: i32) -> Result<Number, EvalErrorKind> {
        let mut args = [Number::from_parts(64, angle, 0)];
        func(&mut args, &Settings::default())?;
        let [value] = args;
        Ok(value)
    }

    #[test]
    fn exact_values_at_quarter_turns() {
        assert_eq!(degrees(sin, 180).map(|v| v.string()), Ok("0".to_string()));
        assert_eq!(degrees(cos, 90).map(|v| v.string()), Ok("0".to_string()));
        assert_eq!(degrees(tan, 45).map(|v| v.string()), Ok("1".to_string()));
        assert_eq!(degrees(cot, 90).map(|v| v.string()), Ok("0".to_string()));
    }

    #[test]
    fn domain_errors() {
        assert_eq!(degrees(tan, 90).err(), Some(EvalErrorKind::OutOfTanDomain));
        assert_eq!(degrees(tan, -270).err(), Some(EvalErrorKind::OutOfTanDomain));
        assert_eq!(degrees(sec, 90).err(), Some(EvalErrorKind::OutOfSecDomain));
        assert_eq!(degrees(csc, 0).err(), Some(EvalErrorKind::OutOfCscDomain));
        assert_eq!(degrees(cot, 180).err(), Some(EvalErrorKind::OutOfCotDomain));
        assert_eq!(degrees(asec, 0).err(), Some(EvalErrorKind::OutOfAsecDomain));
        assert_eq!(degrees(acsc, 0).err(), Some(EvalErrorKind::OutOfAcscDomain));
        assert_eq!(degrees(acot, 0).err(), Some(EvalErrorKind::OutOfAcotDomain));
    }

    #[test]
    fn inverse_results_use_the_configured_unit() {
        let value = degrees(asin, 1).unwrap();
        assert_eq!(value.string(), "90");
        let value = degrees(asec, 1).unwrap();
        assert_eq!(value.string(), "0");

        let settings = Settings { angle_unit: AngleUnit::Gradians,
                                  ..Settings::default() };
        let mut args = [Number::from_parts(64, 1, 0)];
        atan(&mut args, &settings).unwrap();
        assert_eq!(args[0].string(), "50");
    }

    #[test]
    fn huge_radian_arguments_stay_in_domain() {
        let settings = Settings { angle_unit: AngleUnit::Radians,
                                  ..Settings::default() };
        let mut args = [Number::from_parts(64, 1, 0)];
        args[0].mul_u32(1_000_000_000);
        args[0].mul_u32(1_000_000_000);
        args[0].mul_u32(100);
        assert_eq!(tan(&mut args, &settings), Ok(()));
        assert!(!args[0].is_zero());
    }

    #[test]
    fn radians_are_passed_through() {
        let settings = Settings { angle_unit: AngleUnit::Radians,
                                  ..Settings::default() };
        let mut args = [Number::pi(64)];
        cos(&mut args, &settings).unwrap();
        assert_eq!(args[0].string(), "-1");
    }
}
