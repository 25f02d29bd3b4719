use std::cmp::Ordering;

use rug::Integer;

use crate::{ast::BinaryOperator, error::EvalErrorKind, interpreter::value::number::Number};

/// Largest left shift, in bits, that is evaluated.
pub const SHIFT_LIMIT: u32 = 1 << 16;

/// Combines the two topmost stack values, leaving the result in `lhs`.
///
/// Arithmetic operators work on complex values. Shifts and the logical
/// family require real integers and use two's-complement semantics on
/// arbitrary-precision integers.
///
/// # Parameters
/// - `op`: The operator.
/// - `lhs`: Left operand, overwritten with the result.
/// - `rhs`: Right operand.
///
/// # Errors
/// - `DivideByZero` for a zero divisor.
/// - `ZeroPowZero` for `0^0`.
/// - `NonRealOperand`, `NonIntegerOperand` for shifts and logical
///   operators outside their domain.
/// - `Overflow` for a left shift beyond [`SHIFT_LIMIT`] bits.
///
/// # Example
/// ```
/// use tcalc::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::apply_binary, value::number::Number},
/// };
///
/// let mut lhs = Number::from_parts(64, 12, 0);
/// let rhs = Number::from_parts(64, 10, 0);
/// apply_binary(BinaryOperator::Xor, &mut lhs, &rhs).unwrap();
/// assert_eq!(lhs.string(), "6");
/// ```
pub fn apply_binary(op: BinaryOperator, lhs: &mut Number, rhs: &Number) -> Result<(), EvalErrorKind> {
    match op {
        BinaryOperator::Add => *lhs += rhs,
        BinaryOperator::Sub => *lhs -= rhs,
        BinaryOperator::Mul => *lhs *= rhs,
        BinaryOperator::Div => {
            if rhs.is_zero() {
                return Err(EvalErrorKind::DivideByZero);
            }
            *lhs /= rhs;
        },
        BinaryOperator::Pow => {
            if lhs.is_zero() && rhs.is_zero() {
                return Err(EvalErrorKind::ZeroPowZero);
            }
            lhs.pow_mut(rhs);
        },
        BinaryOperator::LeftShift | BinaryOperator::RightShift => {
            let value = lhs.to_integer()?;
            let amount = rhs.to_integer()?;
            let shifted = shift(value, &amount, op == BinaryOperator::LeftShift)?;
            lhs.set_integer(&shifted);
        },
        BinaryOperator::And
        | BinaryOperator::Nand
        | BinaryOperator::Or
        | BinaryOperator::Nor
        | BinaryOperator::Xor
        | BinaryOperator::Xnor => {
            let a = lhs.to_integer()?;
            let b = rhs.to_integer()?;
            let result = match op {
                BinaryOperator::And => a & b,
                BinaryOperator::Nand => !(a & b),
                BinaryOperator::Or => a | b,
                BinaryOperator::Nor => !(a | b),
                BinaryOperator::Xor => a ^ b,
                _ => !(a ^ b),
            };
            lhs.set_integer(&result);
        },
    }
    Ok(())
}

/// Shifts `value` by `amount` bits; a negative amount shifts the other way.
fn shift(value: Integer, amount: &Integer, left: bool) -> Result<Integer, EvalErrorKind> {
    let left = left != (amount.cmp0() == Ordering::Less);
    let magnitude = amount.clone().abs();
    if left {
        let bits = magnitude.to_u32()
                            .filter(|&bits| bits <= SHIFT_LIMIT)
                            .ok_or(EvalErrorKind::Overflow)?;
        Ok(value << bits)
    } else {
        // Past the highest set bit only the sign remains.
        let bits = magnitude.to_u32()
                            .unwrap_or(u32::MAX)
                            .min(value.significant_bits().saturating_add(1));
        Ok(value >> bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(op: BinaryOperator, lhs: i32, rhs: i32) -> Result<String, EvalErrorKind> {
        let mut value = Number::from_parts(64, lhs, 0);
        apply_binary(op, &mut value, &Number::from_parts(64, rhs, 0))?;
        Ok(value.string())
    }

    #[test]
    fn arithmetic() {
        assert_eq!(apply(BinaryOperator::Add, 2, 3), Ok("5".to_string()));
        assert_eq!(apply(BinaryOperator::Sub, 2, 3), Ok("-1".to_string()));
        assert_eq!(apply(BinaryOperator::Mul, -4, 3), Ok("-12".to_string()));
        assert_eq!(apply(BinaryOperator::Div, 1, 4), Ok("0.25".to_string()));
        assert_eq!(apply(BinaryOperator::Pow, 2, 10), Ok("1024".to_string()));
        assert_eq!(apply(BinaryOperator::Pow, 0, 3), Ok("0".to_string()));
    }

    #[test]
    fn arithmetic_guards() {
        assert_eq!(apply(BinaryOperator::Div, 1, 0), Err(EvalErrorKind::DivideByZero));
        assert_eq!(apply(BinaryOperator::Pow, 0, 0), Err(EvalErrorKind::ZeroPowZero));
    }

    #[test]
    fn complex_operands() {
        let mut i = Number::from_parts(64, 0, 1);
        let other = i.clone();
        apply_binary(BinaryOperator::Mul, &mut i, &other).unwrap();
        assert_eq!(i.string(), "-1");
    }

    #[test]
    fn shifts() {
        assert_eq!(apply(BinaryOperator::LeftShift, 1, 4), Ok("16".to_string()));
        assert_eq!(apply(BinaryOperator::RightShift, 16, 2), Ok("4".to_string()));
        assert_eq!(apply(BinaryOperator::LeftShift, 8, -2), Ok("2".to_string()));
        assert_eq!(apply(BinaryOperator::RightShift, -8, 1), Ok("-4".to_string()));
        assert_eq!(apply(BinaryOperator::RightShift, -8, 1000), Ok("-1".to_string()));
        assert_eq!(apply(BinaryOperator::RightShift, 8, i32::MAX), Ok("0".to_string()));
        assert_eq!(apply(BinaryOperator::LeftShift, 1, i32::MAX), Err(EvalErrorKind::Overflow));
    }

    #[test]
    fn logical_family() {
        assert_eq!(apply(BinaryOperator::And, 6, 3), Ok("2".to_string()));
        assert_eq!(apply(BinaryOperator::Nand, 6, 3), Ok("-3".to_string()));
        assert_eq!(apply(BinaryOperator::Or, 6, 3), Ok("7".to_string()));
        assert_eq!(apply(BinaryOperator::Nor, 6, 3), Ok("-8".to_string()));
        assert_eq!(apply(BinaryOperator::Xor, 6, 3), Ok("5".to_string()));
        assert_eq!(apply(BinaryOperator::Xnor, 6, 3), Ok("-6".to_string()));
    }

    #[test]
    fn integer_operators_reject_other_values() {
        let mut half = Number::from_parts(64, 1, 0);
        half.div_u32(2);
        let one = Number::from_parts(64, 1, 0);
        assert_eq!(apply_binary(BinaryOperator::And, &mut half, &one),
                   Err(EvalErrorKind::NonIntegerOperand));

        let mut i = Number::from_parts(64, 0, 1);
        assert_eq!(apply_binary(BinaryOperator::LeftShift, &mut i, &one),
                   Err(EvalErrorKind::NonRealOperand));
    }
}
