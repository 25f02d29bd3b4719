use crate::{
    error::EvalErrorKind,
    interpreter::{
        evaluator::core::{AngleUnit, Settings},
        value::number::Number,
    },
};

/// Rescales an angle from one unit to another.
///
/// The value is first divided by the size of a half turn in `from` (180,
/// π or 200) and then multiplied by the half turn in `to`.
///
/// # Example
/// ```
/// use tcalc::interpreter::{
///     evaluator::{AngleUnit, utils::convert_angle},
///     value::number::Number,
/// };
///
/// let mut angle = Number::from_parts(64, 90, 0);
/// convert_angle(&mut angle, AngleUnit::Degrees, AngleUnit::Gradians);
/// assert_eq!(angle.string(), "100");
/// ```
pub fn convert_angle(value: &mut Number, from: AngleUnit, to: AngleUnit) {
    if from == to {
        return;
    }
    match from {
        AngleUnit::Degrees => value.div_u32(180),
        AngleUnit::Radians => *value /= &Number::pi(value.precision()),
        AngleUnit::Gradians => value.div_u32(200),
    }
    match to {
        AngleUnit::Degrees => value.mul_u32(180),
        AngleUnit::Radians => *value *= &Number::pi(value.precision()),
        AngleUnit::Gradians => value.mul_u32(200),
    }
}

/// Validates a freshly produced value.
///
/// # Errors
/// - `RealModeComplexResult` for a non-real value while complex mode is off.
/// - `Overflow` for an infinite part.
/// - `NanError` for a NaN part.
pub fn check_value(value: &Number, settings: &Settings) -> Result<(), EvalErrorKind> {
    if !settings.complex_mode && !value.is_real() {
        return Err(EvalErrorKind::RealModeComplexResult);
    }
    if value.is_infinite() {
        return Err(EvalErrorKind::Overflow);
    }
    if value.is_nan() {
        return Err(EvalErrorKind::NanError);
    }
    Ok(())
}

/// Parameter values visible while a user function body runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bindings<'a> {
    names:  &'a [String],
    values: &'a [Number],
}

impl<'a> Bindings<'a> {
    #[must_use]
    pub const fn new(names: &'a [String], values: &'a [Number]) -> Self {
        Self { names, values }
    }

    /// The value bound to `name`. Later parameters win over earlier ones of
    /// the same name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a Number> {
        self.names
            .iter()
            .zip(self.values)
            .rev()
            .find_map(|(param, value)| (param == name).then_some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_between_units() {
        let mut angle = Number::from_parts(64, 200, 0);
        convert_angle(&mut angle, AngleUnit::Gradians, AngleUnit::Degrees);
        assert_eq!(angle.string(), "180");

        let mut angle = Number::from_parts(64, 180, 0);
        convert_angle(&mut angle, AngleUnit::Degrees, AngleUnit::Radians);
        assert_eq!(angle, Number::pi(64));
    }

    #[test]
    fn rejects_complex_in_real_mode() {
        let settings = Settings { complex_mode: false,
                                  ..Settings::default() };
        let value = Number::from_parts(64, 0, 1);
        assert_eq!(check_value(&value, &settings), Err(EvalErrorKind::RealModeComplexResult));
        assert_eq!(check_value(&value, &Settings::default()), Ok(()));
    }

    #[test]
    fn rejects_nan() {
        let mut value = Number::from_parts(64, -2, 0);
        value.factorial_mut().unwrap();
        assert!(value.is_nan());
        assert_eq!(check_value(&value, &Settings::default()), Err(EvalErrorKind::NanError));
    }

    #[test]
    fn bindings_lookup() {
        let names = ["x".to_string(), "y".to_string()];
        let values = [Number::from_parts(64, 1, 0), Number::from_parts(64, 2, 0)];
        let bindings = Bindings::new(&names, &values);
        assert_eq!(bindings.get("y").map(Number::string).as_deref(), Some("2"));
        assert!(bindings.get("z").is_none());
        assert!(Bindings::default().get("x").is_none());
    }
}
