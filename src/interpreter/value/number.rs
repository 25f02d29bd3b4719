use std::{cmp::Ordering, fmt, ops};

use rug::{
    Assign, Complex, Float, Integer,
    float::{Constant, ParseFloatError},
    ops::{NegAssign, PowAssign},
};

use crate::{
    error::EvalErrorKind,
    interpreter::value::format::{DEFAULT_DIGITS, NumberFormat, format_float},
};

/// Precision in bits used when the caller does not pick one.
pub const DEFAULT_PRECISION: u32 = 64;

/// An arbitrary-precision complex number.
///
/// The bit precision is fixed when the number is created; assigning another
/// number into it rounds to that precision. Mutating operations follow rug's
/// `*_mut` convention and operate in place, so a value stack can be reused
/// without reallocating its limbs.
///
/// Equality compares both parts. Ordering is defined on the real part only;
/// callers must check [`Number::is_real`] before ordering two values.
///
/// # Example
/// ```
/// use tcalc::interpreter::value::number::Number;
///
/// let mut x = Number::new(64);
/// x.set_real("2").unwrap();
/// let mut y = Number::new(64);
/// y.set_imaginary("3i").unwrap();
/// x += &y;
/// assert_eq!(x.string(), "2+3i");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Number {
    value: Complex,
}

/// Normalizes literal text for MPFR: drops digit separators and the
/// imaginary suffix, and turns either decimal point into `.`. A point not
/// followed by a digit gets a `0` so `1.` and `1.e3` parse.
fn literal_digits(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 1);
    let mut chars = text.chars().filter(|c| !matches!(c, '_' | '\'' | 'i')).peekable();
    while let Some(c) = chars.next() {
        if c == ',' || c == '.' {
            out.push('.');
            if !chars.peek().is_some_and(char::is_ascii_digit) {
                out.push('0');
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Strips a two character radix prefix such as `0x`.
fn without_prefix(text: &str) -> &str {
    text.get(2..).unwrap_or_default()
}

impl Number {
    /// Creates zero at the given precision, clamped to what MPFR supports.
    #[must_use]
    pub fn new(precision: u32) -> Self {
        let precision = precision.clamp(rug::float::prec_min(), rug::float::prec_max());
        Self { value: Complex::new(precision) }
    }

    /// Creates `real + imaginary·i` from small integers.
    ///
    /// # Example
    /// ```
    /// use tcalc::interpreter::value::number::Number;
    ///
    /// assert_eq!(Number::from_parts(64, 1, -2).string(), "1-2i");
    /// ```
    #[must_use]
    pub fn from_parts(precision: u32, real: i32, imaginary: i32) -> Self {
        let mut number = Self::new(precision);
        number.value.assign((real, imaginary));
        number
    }

    /// π rounded to `precision` bits.
    #[must_use]
    pub fn pi(precision: u32) -> Self {
        let mut number = Self::new(precision);
        number.value
              .mut_real()
              .assign(Constant::Pi);
        number
    }

    /// τ = 2π.
    #[must_use]
    pub fn tau(precision: u32) -> Self {
        let mut number = Self::pi(precision);
        number.value *= 2_u32;
        number
    }

    /// Euler's number.
    #[must_use]
    pub fn e(precision: u32) -> Self {
        let mut number = Self::new(precision);
        let real = number.value.mut_real();
        real.assign(1);
        real.exp_mut();
        number
    }

    #[must_use]
    pub fn precision(&self) -> u32 {
        self.value.prec().0
    }

    /// Copies `other` into `self`, keeping the precision of `self`.
    pub fn set(&mut self, other: &Self) {
        self.value.assign(&other.value);
    }

    pub fn set_zero(&mut self) {
        self.value.assign(0);
    }

    /// Replaces the value with an integer, rounding to the precision.
    pub fn set_integer(&mut self, integer: &Integer) {
        self.value.assign(integer);
    }

    /// Sets the real part from decimal literal text such as `1_000.5e-3`.
    ///
    /// `_` and `'` separators and a trailing `i` are ignored; either `,` or
    /// `.` is accepted as the decimal point.
    pub fn set_real(&mut self, text: &str) -> Result<(), ParseFloatError> {
        let parsed = Float::parse(literal_digits(text))?;
        self.value.mut_real().assign(parsed);
        Ok(())
    }

    /// Sets the imaginary part from decimal literal text such as `2.5i`.
    pub fn set_imaginary(&mut self, text: &str) -> Result<(), ParseFloatError> {
        let parsed = Float::parse(literal_digits(text))?;
        self.value.mut_imag().assign(parsed);
        Ok(())
    }

    /// Sets the real part from a `0b` literal.
    pub fn set_binary(&mut self, text: &str) -> Result<(), ParseFloatError> {
        let parsed = Float::parse_radix(literal_digits(without_prefix(text)), 2)?;
        self.value.mut_real().assign(parsed);
        Ok(())
    }

    /// Sets the real part from a `0x` literal.
    pub fn set_hexadecimal(&mut self, text: &str) -> Result<(), ParseFloatError> {
        let parsed = Float::parse_radix(literal_digits(without_prefix(text)), 16)?;
        self.value.mut_real().assign(parsed);
        Ok(())
    }

    /// The real part, rounded to `f64`.
    #[must_use]
    pub fn real_f64(&self) -> f64 {
        self.value.real().to_f64()
    }

    /// The imaginary part, rounded to `f64`.
    #[must_use]
    pub fn imaginary_f64(&self) -> f64 {
        self.value.imag().to_f64()
    }

    /// Returns `true` when the imaginary part is zero.
    #[must_use]
    pub fn is_real(&self) -> bool {
        self.value.imag().is_zero()
    }

    /// Returns `true` for real numbers without a fractional part.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.is_real() && self.value.real().is_integer()
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.value.real().is_zero() && self.is_real()
    }

    #[must_use]
    pub fn is_one(&self) -> bool {
        *self.value.real() == 1 && self.is_real()
    }

    /// Both parts are neither infinite nor NaN.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.value.real().is_finite() && self.value.imag().is_finite()
    }

    #[must_use]
    pub fn is_nan(&self) -> bool {
        self.value.real().is_nan() || self.value.imag().is_nan()
    }

    #[must_use]
    pub fn is_infinite(&self) -> bool {
        !self.is_nan() && (self.value.real().is_infinite() || self.value.imag().is_infinite())
    }

    /// Compares the real parts. `None` when either is NaN.
    #[must_use]
    pub fn real_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.real().partial_cmp(other.value.real())
    }

    /// Converts a real integer value into an arbitrary-precision integer.
    ///
    /// # Errors
    /// - `NonRealOperand` when the imaginary part is non-zero.
    /// - `NonIntegerOperand` when the real part has a fractional part or is
    ///   not finite.
    pub fn to_integer(&self) -> Result<Integer, EvalErrorKind> {
        if !self.is_real() {
            return Err(EvalErrorKind::NonRealOperand);
        }
        if !self.value.real().is_integer() {
            return Err(EvalErrorKind::NonIntegerOperand);
        }
        self.value
            .real()
            .to_integer()
            .ok_or(EvalErrorKind::NonIntegerOperand)
    }

    /// Negates in place. Zero stays zero instead of becoming `-0`.
    pub fn negate_mut(&mut self) {
        if !self.is_zero() {
            self.value.neg_assign();
        }
    }

    /// Raises `self` to `exponent` using the principal branch.
    pub fn pow_mut(&mut self, exponent: &Self) {
        self.value.pow_assign(&exponent.value);
    }

    pub fn mul_u32(&mut self, factor: u32) {
        self.value *= factor;
    }

    pub fn div_u32(&mut self, divisor: u32) {
        self.value /= divisor;
    }

    pub fn sqrt_mut(&mut self) {
        self.value.sqrt_mut();
    }

    /// Replaces `self` with its `n`th root.
    ///
    /// Real roots of real values stay real where they exist, so the cube
    /// root of `-8` is `-2` rather than the principal complex root. Other
    /// cases use `self^(1/n)`.
    ///
    /// # Example
    /// ```
    /// use tcalc::interpreter::value::number::Number;
    ///
    /// let mut x = Number::from_parts(64, -8, 0);
    /// x.nth_root_mut(&Number::from_parts(64, 3, 0));
    /// assert_eq!(x.string(), "-2");
    /// ```
    pub fn nth_root_mut(&mut self, n: &Self) {
        if self.is_real()
           && let Ok(order) = n.to_integer()
           && let Some(order) = order.to_u32()
           && order > 0
           && (order % 2 == 1 || !self.value.real().is_sign_negative())
        {
            self.value.mut_real().root_mut(order);
            return;
        }
        let mut exponent = n.value.clone();
        exponent.recip_mut();
        self.value.pow_assign(&exponent);
    }

    pub fn exp_mut(&mut self) {
        self.value.exp_mut();
    }

    /// Natural logarithm (principal branch).
    pub fn ln_mut(&mut self) {
        self.value.ln_mut();
    }

    pub fn log10_mut(&mut self) {
        self.value.log10_mut();
    }

    /// Replaces `self` with its modulus.
    pub fn abs_mut(&mut self) {
        self.value.abs_mut();
    }

    pub fn recip_mut(&mut self) {
        self.value.recip_mut();
    }

    /// `self / π`, used to snap trigonometric results at exact multiples.
    fn pi_multiple(&self) -> Self {
        let mut k = self.clone();
        k /= &Self::pi(self.precision());
        k
    }

    /// Whether `k` is an integer small enough for that to mean something.
    /// Past half the precision the quotient has too few fractional bits left
    /// and would be an integer for almost any argument.
    fn is_exact_multiple(k: &Self) -> bool {
        if !k.is_integer() {
            return false;
        }
        let limit = i32::try_from(k.precision() / 2).unwrap_or(i32::MAX);
        k.value.real().get_exp().is_none_or(|exp| exp <= limit)
    }

    /// Sine of an angle in radians. Exactly zero when `self / π` is a
    /// moderate integer.
    pub fn sin_mut(&mut self) {
        if Self::is_exact_multiple(&self.pi_multiple()) {
            self.set_zero();
        } else {
            self.value.sin_mut();
        }
    }

    /// Cosine of an angle in radians. Exactly zero when `self / π - 1/2` is
    /// a moderate integer.
    pub fn cos_mut(&mut self) {
        let mut k = self.pi_multiple();
        *k.value.mut_real() -= 0.5;
        if Self::is_exact_multiple(&k) {
            self.set_zero();
        } else {
            self.value.cos_mut();
        }
    }

    /// Tangent of an angle in radians. Exactly zero when `self / π` is a
    /// moderate integer.
    pub fn tan_mut(&mut self) {
        if Self::is_exact_multiple(&self.pi_multiple()) {
            self.set_zero();
        } else {
            self.value.tan_mut();
        }
    }

    pub fn asin_mut(&mut self) {
        self.value.asin_mut();
    }

    pub fn acos_mut(&mut self) {
        self.value.acos_mut();
    }

    pub fn atan_mut(&mut self) {
        self.value.atan_mut();
    }

    pub fn sinh_mut(&mut self) {
        self.value.sinh_mut();
    }

    pub fn cosh_mut(&mut self) {
        self.value.cosh_mut();
    }

    pub fn tanh_mut(&mut self) {
        self.value.tanh_mut();
    }

    pub fn asinh_mut(&mut self) {
        self.value.asinh_mut();
    }

    pub fn acosh_mut(&mut self) {
        self.value.acosh_mut();
    }

    pub fn atanh_mut(&mut self) {
        self.value.atanh_mut();
    }

    /// `x!` as `Γ(x + 1)`, defined for real `x`.
    ///
    /// # Errors
    /// `NonRealOperand` when `self` has an imaginary part.
    pub fn factorial_mut(&mut self) -> Result<(), EvalErrorKind> {
        if !self.is_real() {
            return Err(EvalErrorKind::NonRealOperand);
        }
        let real = self.value.mut_real();
        *real += 1;
        real.gamma_mut();
        Ok(())
    }

    /// Canonical rendering: `%.18g` of the real part, followed by the signed
    /// imaginary part and `i` when it is non-zero.
    ///
    /// # Example
    /// ```
    /// use tcalc::interpreter::value::number::Number;
    ///
    /// let mut x = Number::from_parts(64, 1, 0);
    /// x.div_u32(2);
    /// assert_eq!(x.string(), "0.5");
    /// ```
    #[must_use]
    pub fn string(&self) -> String {
        self.format(NumberFormat::General, DEFAULT_DIGITS)
    }

    /// Renders the number in the given style.
    ///
    /// # Parameters
    /// - `style`: General, fixed or scientific notation.
    /// - `digits`: Significant digits for `General`, places after the point
    ///   for the other styles.
    #[must_use]
    pub fn format(&self, style: NumberFormat, digits: usize) -> String {
        let real = format_float(self.value.real(), style, digits);
        if self.is_real() {
            return real;
        }
        let imaginary = format_float(self.value.imag(), style, digits);
        if imaginary.starts_with('-') {
            format!("{real}{imaginary}i")
        } else {
            format!("{real}+{imaginary}i")
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.string())
    }
}

impl ops::AddAssign<&Self> for Number {
    fn add_assign(&mut self, rhs: &Self) {
        self.value += &rhs.value;
    }
}

impl ops::SubAssign<&Self> for Number {
    fn sub_assign(&mut self, rhs: &Self) {
        self.value -= &rhs.value;
    }
}

impl ops::MulAssign<&Self> for Number {
    fn mul_assign(&mut self, rhs: &Self) {
        self.value *= &rhs.value;
    }
}

impl ops::DivAssign<&Self> for Number {
    fn div_assign(&mut self, rhs: &Self) {
        self.value /= &rhs.value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn real(text: &str) -> Number {
        let mut number = Number::new(DEFAULT_PRECISION);
        number.set_real(text).unwrap();
        number
    }

    #[test]
    fn parses_decimal_literals() {
        assert_eq!(real("1_000").string(), "1000");
        assert_eq!(real("2,5").string(), "2.5");
        assert_eq!(real("1.").string(), "1");
        assert_eq!(real("1.5e3").string(), "1500");
        assert_eq!(real("25E-1").string(), "2.5");
    }

    #[test]
    fn parses_radix_literals() {
        let mut number = Number::new(DEFAULT_PRECISION);
        number.set_binary("0b1010_1010").unwrap();
        assert_eq!(number.string(), "170");
        number.set_hexadecimal("0xFF").unwrap();
        assert_eq!(number.string(), "255");
        assert!(number.set_hexadecimal("0x").is_err());
    }

    #[test]
    fn imaginary_literals_set_only_the_imaginary_part() {
        let mut number = real("3");
        number.set_imaginary("2i").unwrap();
        assert_eq!(number.string(), "3+2i");
        number.negate_mut();
        assert_eq!(number.string(), "-3-2i");
    }

    #[test]
    fn negating_zero_keeps_positive_zero() {
        let mut zero = Number::new(DEFAULT_PRECISION);
        zero.negate_mut();
        assert_eq!(zero.string(), "0");
        assert!(zero.is_zero());
    }

    #[test]
    fn arithmetic_in_place() {
        let mut x = real("2");
        x += &real("2");
        assert_eq!(x.string(), "4");
        x -= &real("6");
        x /= &real("4");
        assert_eq!(x.string(), "-0.5");
        x *= &real("-8");
        x.pow_mut(&real("3"));
        assert_eq!(x.string(), "64");
    }

    #[test]
    fn square_root_of_negative_is_imaginary() {
        let mut x = real("-4");
        x.sqrt_mut();
        assert!(!x.is_real());
        assert_eq!(x.string(), "0+2i");
    }

    #[test]
    fn even_root_of_negative_is_complex() {
        let mut x = real("-1");
        x.nth_root_mut(&real("4"));
        assert!(!x.is_real());
    }

    #[test]
    fn trig_snaps_to_exact_zero() {
        let mut x = Number::pi(DEFAULT_PRECISION);
        x.sin_mut();
        assert!(x.is_zero());

        let mut x = Number::pi(DEFAULT_PRECISION);
        x.div_u32(2);
        x.cos_mut();
        assert!(x.is_zero());

        let mut x = Number::tau(DEFAULT_PRECISION);
        x.tan_mut();
        assert!(x.is_zero());
    }

    #[test]
    fn huge_arguments_are_not_snapped() {
        let mut x = real("1e20");
        x.sin_mut();
        assert!(!x.is_zero());

        let mut x = real("1e20");
        x.cos_mut();
        assert!(!x.is_zero());

        let mut x = real("-1e30");
        x.tan_mut();
        assert!(!x.is_zero());

        let mut x = Number::pi(DEFAULT_PRECISION);
        x.mul_u32(1024);
        x.sin_mut();
        assert!(x.is_zero());
    }

    #[test]
    fn constants() {
        assert_eq!(Number::pi(DEFAULT_PRECISION).string(), "3.14159265358979324");
        assert_eq!(Number::e(DEFAULT_PRECISION).string(), "2.71828182845904524");
        assert_eq!(Number::tau(DEFAULT_PRECISION).string(), "6.28318530717958648");
    }

    #[test]
    fn factorial_uses_gamma() {
        let mut x = real("5");
        x.factorial_mut().unwrap();
        assert_eq!(x.string(), "120");

        let mut x = Number::from_parts(DEFAULT_PRECISION, 1, 1);
        assert_eq!(x.factorial_mut(), Err(EvalErrorKind::NonRealOperand));
    }

    #[test]
    fn integer_conversion() {
        assert_eq!(real("42").to_integer(), Ok(Integer::from(42)));
        assert_eq!(real("4.5").to_integer(), Err(EvalErrorKind::NonIntegerOperand));
    }

    #[test]
    fn ordering_uses_real_part() {
        assert_eq!(real("1").real_cmp(&real("2")), Some(Ordering::Less));
        assert_eq!(real("2").real_cmp(&real("2")), Some(Ordering::Equal));
    }
}
