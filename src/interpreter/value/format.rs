use rug::Float;

/// Significant digits used by [`crate::interpreter::value::number::Number::string`].
pub const DEFAULT_DIGITS: usize = 18;

/// Largest digit count [`format_float`] honours; bigger requests are clamped.
pub const MAX_DIGITS: usize = 1000;

/// Rendering styles for numbers.
///
/// - `General` follows C's `%g`: positional notation unless the decimal
///   exponent is below -4 or at least the digit count, trailing zeros removed.
/// - `Fixed` follows `%f`: `digits` places after the decimal point.
/// - `Scientific` follows `%e`: one leading digit and `digits` places after
///   the point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberFormat {
    #[default]
    General,
    Fixed,
    Scientific,
}

/// A finite, non-zero float as `0.d1d2d3... × 10^exponent`.
struct Decimal {
    negative: bool,
    digits:   Vec<u8>,
    exponent: i64,
}

impl Decimal {
    /// Splits rug's decimal rendering (`-1.2345e-7`, `1234.5`) into sign,
    /// digit string and adjusted exponent.
    ///
    /// rug cannot render fewer than two digits, so a single significant digit
    /// is taken from the full rendering. Rounding a two-digit rendering again
    /// would carry twice (`0.2496` to `0.25` to `0.3`).
    fn from_float(value: &Float, significant: Option<usize>) -> Self {
        let raw = value.to_string_radix(10, significant.filter(|&n| n >= 2));
        let bytes = raw.as_bytes();
        let negative = bytes.first() == Some(&b'-');
        let start = usize::from(negative);
        let marker = bytes.iter().position(|&b| b == b'e' || b == b'@');
        let end = marker.unwrap_or(bytes.len());
        let raw_exponent: i64 = marker.and_then(|pos| raw[pos + 1..].trim_matches('@').parse().ok())
                                      .unwrap_or(0);

        let mut digits = Vec::with_capacity(end - start);
        let mut point = None;
        for &byte in &bytes[start..end] {
            if byte == b'.' {
                point = Some(digits.len());
            } else {
                digits.push(byte);
            }
        }
        let integer_digits = point.unwrap_or(digits.len());
        let mut exponent = raw_exponent + i64::try_from(integer_digits).unwrap_or(i64::MAX);

        let leading = digits.iter().take_while(|&&b| b == b'0').count();
        if leading == digits.len() {
            digits = vec![b'0'];
            exponent = 1;
        } else {
            digits.drain(..leading);
            exponent -= i64::try_from(leading).unwrap_or(0);
        }

        let mut decimal = Self { negative,
                                 digits,
                                 exponent };
        if let Some(n) = significant {
            decimal.round_to(i64::try_from(n).unwrap_or(i64::MAX));
        }
        decimal
    }

    /// Keeps the first `keep` digits, rounding half up on the next one.
    /// A negative `keep` rounds everything away.
    fn round_to(&mut self, keep: i64) {
        let Ok(keep) = usize::try_from(keep) else {
            self.digits = vec![b'0'];
            return;
        };
        if keep >= self.digits.len() {
            return;
        }
        let round_up = self.digits[keep] >= b'5';
        self.digits.truncate(keep);
        if !round_up {
            if self.digits.is_empty() {
                self.digits.push(b'0');
            }
            return;
        }
        for digit in self.digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                return;
            }
        }
        self.digits.insert(0, b'1');
        self.exponent += 1;
    }

    fn is_zero(&self) -> bool {
        self.digits.iter().all(|&b| b == b'0')
    }

    fn digit_at(&self, index: i64) -> char {
        usize::try_from(index).ok()
                              .and_then(|i| self.digits.get(i))
                              .map_or('0', |&b| char::from(b))
    }

    fn sign(&self) -> &'static str {
        if self.negative && !self.is_zero() { "-" } else { "" }
    }

    /// Positional rendering with `decimals` places after the point.
    fn positional(&self, decimals: i64) -> String {
        let mut out = String::from(self.sign());
        if self.exponent <= 0 {
            out.push('0');
        } else {
            for index in 0..self.exponent {
                out.push(self.digit_at(index));
            }
        }
        if decimals > 0 {
            out.push('.');
            for index in self.exponent..self.exponent + decimals {
                out.push(self.digit_at(index));
            }
        }
        out
    }

    /// `d.ddd` with `decimals` places, then `e±XX`.
    fn scientific(&self, decimals: i64) -> String {
        let mut out = String::from(self.sign());
        out.push(self.digit_at(0));
        if decimals > 0 {
            out.push('.');
            for index in 1..=decimals {
                out.push(self.digit_at(index));
            }
        }
        let exponent = self.exponent - 1;
        let sign = if exponent < 0 { '-' } else { '+' };
        out.push_str(&format!("e{sign}{:02}", exponent.unsigned_abs()));
        out
    }
}

/// Removes trailing zeros after a decimal point, and the point itself when
/// nothing remains after it. Any exponent suffix is preserved.
fn strip_trailing_zeros(text: &str) -> String {
    let (mantissa, exponent) = text.find('e')
                                   .map_or((text, ""), |pos| text.split_at(pos));
    if !mantissa.contains('.') {
        return text.to_string();
    }
    let trimmed = mantissa.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed}{exponent}")
}

fn format_zero(style: NumberFormat, digits: usize) -> String {
    let zeros = "0".repeat(digits);
    match style {
        NumberFormat::General => "0".to_string(),
        NumberFormat::Fixed if digits == 0 => "0".to_string(),
        NumberFormat::Fixed => format!("0.{zeros}"),
        NumberFormat::Scientific if digits == 0 => "0e+00".to_string(),
        NumberFormat::Scientific => format!("0.{zeros}e+00"),
    }
}

/// Renders one real float in the requested style.
///
/// Zero is always rendered without a sign. Infinities render as `inf` or
/// `-inf` and NaN as `nan`.
///
/// # Parameters
/// - `value`: The float to render.
/// - `style`: General, fixed or scientific notation.
/// - `digits`: Significant digits for `General`, places after the point
///   otherwise. Clamped to [`MAX_DIGITS`].
///
/// # Example
/// ```
/// use rug::Float;
/// use tcalc::interpreter::value::format::{NumberFormat, format_float};
///
/// let half = Float::with_val(64, 0.5);
/// assert_eq!(format_float(&half, NumberFormat::General, 18), "0.5");
/// assert_eq!(format_float(&half, NumberFormat::Fixed, 3), "0.500");
/// assert_eq!(format_float(&half, NumberFormat::Scientific, 2), "5.00e-01");
///
/// let big = Float::with_val(64, 1e20);
/// assert_eq!(format_float(&big, NumberFormat::General, 18), "1e+20");
/// ```
#[must_use]
pub fn format_float(value: &Float, style: NumberFormat, digits: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_negative() { "-inf" } else { "inf" }.to_string();
    }
    let digits = digits.min(MAX_DIGITS);
    if value.is_zero() {
        return format_zero(style, digits);
    }
    let places = i64::try_from(digits).unwrap_or(i64::MAX);
    match style {
        NumberFormat::General => {
            let precision = digits.max(1);
            let decimal = Decimal::from_float(value, Some(precision));
            let exponent = decimal.exponent - 1;
            let precision = i64::try_from(precision).unwrap_or(i64::MAX);
            if exponent < -4 || exponent >= precision {
                strip_trailing_zeros(&decimal.scientific(precision - 1))
            } else {
                strip_trailing_zeros(&decimal.positional(precision - 1 - exponent))
            }
        },
        NumberFormat::Fixed => {
            let mut decimal = Decimal::from_float(value, None);
            decimal.round_to(decimal.exponent + places);
            if decimal.is_zero() {
                return format_zero(style, digits);
            }
            decimal.positional(places)
        },
        NumberFormat::Scientific => {
            let decimal = Decimal::from_float(value, Some(digits + 1));
            decimal.scientific(places)
        },
    }
}
