use unicode_general_category::{GeneralCategory, get_general_category};

/// Superscript exponent marker (`ᵉ`) accepted in superscript literals.
pub const SUPERSCRIPT_EXPONENT_LOWER: char = 'ᵉ';
/// Superscript exponent marker (`ᴱ`) accepted in superscript literals.
pub const SUPERSCRIPT_EXPONENT_UPPER: char = 'ᴱ';
/// Superscript imaginary unit suffix.
pub const SUPERSCRIPT_IMAGINARY: char = 'ⁱ';
/// Superscript plus sign.
pub const SUPERSCRIPT_PLUS: char = '⁺';
/// Superscript minus sign.
pub const SUPERSCRIPT_MINUS: char = '⁻';

/// Returns `true` for characters skipped between tokens.
///
/// Tab is not in the space separator category, and neither is the line feed,
/// which is an expression separator.
#[must_use]
pub fn is_whitespace(c: char) -> bool {
    c == '\t' || get_general_category(c) == GeneralCategory::SpaceSeparator
}

/// Returns `true` for characters that may start or continue a word.
///
/// Covers every letter category, connector punctuation (`_`) and the "other
/// number" category (vulgar fractions, circled digits and the like).
#[must_use]
pub fn is_letter(c: char) -> bool {
    matches!(get_general_category(c),
             GeneralCategory::UppercaseLetter
             | GeneralCategory::LowercaseLetter
             | GeneralCategory::TitlecaseLetter
             | GeneralCategory::ModifierLetter
             | GeneralCategory::OtherLetter
             | GeneralCategory::ConnectorPunctuation
             | GeneralCategory::OtherNumber)
}

/// ASCII decimal digit.
#[must_use]
pub const fn is_decimal_digit(c: char) -> bool {
    c.is_ascii_digit()
}

#[must_use]
pub const fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

/// Returns `true` for the ten superscript digits `⁰¹²³⁴⁵⁶⁷⁸⁹`.
///
/// These are category `No`, so [`is_letter`] also accepts them; callers that
/// read words must test this first.
#[must_use]
pub const fn is_superscript_digit(c: char) -> bool {
    matches!(c, '⁰' | '¹' | '²' | '³' | '⁴' | '⁵' | '⁶' | '⁷' | '⁸' | '⁹')
}

/// Maps one character of the superscript number alphabet to its inline form.
///
/// # Example
/// ```
/// use tcalc::util::unicode::superscript_to_inline;
///
/// assert_eq!(superscript_to_inline('²'), Some('2'));
/// assert_eq!(superscript_to_inline('ⁱ'), Some('i'));
/// assert_eq!(superscript_to_inline('x'), None);
/// ```
#[must_use]
pub const fn superscript_to_inline(c: char) -> Option<char> {
    let inline = match c {
        '⁰' => '0',
        '¹' => '1',
        '²' => '2',
        '³' => '3',
        '⁴' => '4',
        '⁵' => '5',
        '⁶' => '6',
        '⁷' => '7',
        '⁸' => '8',
        '⁹' => '9',
        SUPERSCRIPT_PLUS => '+',
        SUPERSCRIPT_MINUS => '-',
        SUPERSCRIPT_EXPONENT_LOWER | SUPERSCRIPT_EXPONENT_UPPER => 'e',
        SUPERSCRIPT_IMAGINARY => 'i',
        _ => return None,
    };
    Some(inline)
}

/// Rewrites a superscript literal such as `¹ᵉ⁻³` into its inline spelling
/// (`1e-3`). Characters outside the superscript alphabet yield `None`.
#[must_use]
pub fn to_inline_number(superscript: &str) -> Option<String> {
    superscript.chars().map(superscript_to_inline).collect()
}
