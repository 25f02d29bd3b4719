use crate::{
    ast::UnaryOperator,
    error::EvalErrorKind,
    interpreter::{
        evaluator::{
            core::{AngleUnit, Settings},
            utils::convert_angle,
        },
        value::number::Number,
    },
};

/// Applies a unary operator to the top of the stack in place.
///
/// Supported operators:
/// - `Negate`, `Plus`: sign change and identity.
/// - `Radical`: principal square root, so a negative operand gives an
///   imaginary result.
/// - `Not`: bitwise complement of an integer.
/// - `Percent`: division by 100.
/// - `Factorial`: `Γ(x + 1)` for real `x`.
/// - `Degrees`, `Radians`, `Gradians`: converts from the named unit into the
///   configured one.
///
/// # Parameters
/// - `op`: Unary operator.
/// - `operand`: The value to update.
/// - `settings`: Supplies the configured angle unit.
///
/// # Errors
/// `NonRealOperand` or `NonIntegerOperand` for `NOT` and `!` outside their
/// domain.
///
/// # Example
/// ```
/// use tcalc::{
///     ast::UnaryOperator,
///     interpreter::{
///         evaluator::{Settings, unary::apply_unary},
///         value::number::Number,
///     },
/// };
///
/// let settings = Settings::default();
/// let mut x = Number::from_parts(64, 4, 0);
/// apply_unary(UnaryOperator::Factorial, &mut x, &settings).unwrap();
/// assert_eq!(x.string(), "24");
///
/// apply_unary(UnaryOperator::Percent, &mut x, &settings).unwrap();
/// assert_eq!(x.string(), "0.24");
/// ```
pub fn apply_unary(op: UnaryOperator,
                   operand: &mut Number,
                   settings: &Settings)
                   -> Result<(), EvalErrorKind> {
    match op {
        UnaryOperator::Negate => operand.negate_mut(),
        UnaryOperator::Plus => {},
        UnaryOperator::Radical => operand.sqrt_mut(),
        UnaryOperator::Not => {
            let integer = operand.to_integer()?;
            operand.set_integer(&!integer);
        },
        UnaryOperator::Percent => operand.div_u32(100),
        UnaryOperator::Factorial => operand.factorial_mut()?,
        UnaryOperator::Degrees => convert_angle(operand, AngleUnit::Degrees, settings.angle_unit),
        UnaryOperator::Radians => convert_angle(operand, AngleUnit::Radians, settings.angle_unit),
        UnaryOperator::Gradians => convert_angle(operand, AngleUnit::Gradians, settings.angle_unit),
    }
    Ok(())
}
