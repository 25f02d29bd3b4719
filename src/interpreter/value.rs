/// Arbitrary-precision complex numbers.
///
/// Defines `Number`, a wrapper over an MPC complex value with a fixed bit
/// precision. Provides literal parsing in three radixes, in-place arithmetic,
/// transcendental functions with exact zeros at multiples of π, and the
/// canonical string rendering.
pub mod number;
/// Decimal rendering of numbers.
///
/// Implements general (`%g`), fixed (`%f`) and scientific (`%e`) notation on
/// top of rug's digit generation.
pub mod format;
