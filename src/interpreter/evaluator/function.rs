/// The native function table and call dispatch.
///
/// Resolves a call by name and arity to a native overload or a user-defined
/// function.
pub mod core;

/// Simple one-argument natives: `exp`, `abs` and the hyperbolic family.
pub mod builtin;

/// Logarithms: `log` with one or two arguments, and `ln`.
pub mod log;

/// Roots: `sqrt`, `cbrt` and `root`.
pub mod sqrt;

/// Trigonometric functions and their inverses, in the configured angle unit.
pub mod trig;
