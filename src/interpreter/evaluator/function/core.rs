use std::collections::HashMap;

use tracing::trace;

use crate::{
    error::EvalErrorKind,
    interpreter::{
        evaluator::{
            core::{Evaluator, Settings},
            function::{builtin, log, sqrt, trig},
            stack::EvalStack,
            utils::Bindings,
        },
        value::number::Number,
    },
};

/// Type alias for native function handlers.
///
/// A native receives its arguments as the top slice of the value stack and
/// writes its result into the first slot. The evaluator then drops the rest.
pub type NativeFn = fn(&mut [Number], &Settings) -> Result<(), EvalErrorKind>;

/// Maximum number of nested user function calls.
pub const RECURSION_LIMIT: usize = 256;

/// Defines native functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - the number of arguments of this overload,
/// - a function pointer implementing it.
///
/// A name may appear once per arity.
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: usize,
            func:  NativeFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of all native functions, one entry per overload.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "sqrt"  => { arity: 1, func: sqrt::sqrt },
    "cbrt"  => { arity: 1, func: sqrt::cbrt },
    "root"  => { arity: 2, func: sqrt::root },
    "exp"   => { arity: 1, func: builtin::exp },
    "abs"   => { arity: 1, func: builtin::abs },
    "log"   => { arity: 1, func: log::log10 },
    "log"   => { arity: 2, func: log::log_base },
    "ln"    => { arity: 1, func: log::ln },
    "sin"   => { arity: 1, func: trig::sin },
    "cos"   => { arity: 1, func: trig::cos },
    "tan"   => { arity: 1, func: trig::tan },
    "sec"   => { arity: 1, func: trig::sec },
    "csc"   => { arity: 1, func: trig::csc },
    "cot"   => { arity: 1, func: trig::cot },
    "asin"  => { arity: 1, func: trig::asin },
    "acos"  => { arity: 1, func: trig::acos },
    "atan"  => { arity: 1, func: trig::atan },
    "asec"  => { arity: 1, func: trig::asec },
    "acsc"  => { arity: 1, func: trig::acsc },
    "acot"  => { arity: 1, func: trig::acot },
    "sinh"  => { arity: 1, func: builtin::sinh },
    "cosh"  => { arity: 1, func: builtin::cosh },
    "tanh"  => { arity: 1, func: builtin::tanh },
    "asinh" => { arity: 1, func: builtin::asinh },
    "acosh" => { arity: 1, func: builtin::acosh },
    "atanh" => { arity: 1, func: builtin::atanh },
}

/// Groups the static table by name.
#[must_use]
pub fn native_table() -> HashMap<&'static str, Vec<(usize, NativeFn)>> {
    let mut table: HashMap<&'static str, Vec<(usize, NativeFn)>> = HashMap::new();
    for def in BUILTIN_TABLE {
        table.entry(def.name)
             .or_default()
             .push((def.arity, def.func));
    }
    table
}

/// The only argument of a one-argument native.
pub(in crate::interpreter::evaluator) fn single(args: &mut [Number])
                                                -> Result<&mut Number, EvalErrorKind> {
    match args {
        [x] => Ok(x),
        _ => Err(EvalErrorKind::InvalidProgram),
    }
}

/// Both arguments of a two-argument native.
pub(in crate::interpreter::evaluator) fn pair(args: &mut [Number])
                                              -> Result<(&mut Number, &mut Number), EvalErrorKind> {
    match args {
        [x, y] => Ok((x, y)),
        _ => Err(EvalErrorKind::InvalidProgram),
    }
}

impl Evaluator {
    /// Calls `name` with the top `arity` values of `stack` and leaves the
    /// result in their place.
    ///
    /// Native functions are tried first. A user-defined function runs its
    /// body on the same stack with the arguments bound to its parameters;
    /// the parameters shadow constants and variables of the same name.
    ///
    /// # Errors
    /// - `UndefinedFunction` when no native or user function has the name.
    /// - `BadArity` when none of its overloads takes `arity` arguments.
    /// - `RecursionLimit` past [`RECURSION_LIMIT`] nested user calls.
    /// - Any error raised by the function itself.
    pub(in crate::interpreter::evaluator) fn call(&self,
                                                  stack: &mut EvalStack,
                                                  name: &str,
                                                  arity: usize,
                                                  depth: usize)
                                                  -> Result<(), EvalErrorKind> {
        let base = stack.len()
                        .checked_sub(arity)
                        .ok_or(EvalErrorKind::InvalidProgram)?;

        if let Some(overloads) = self.natives.get(name) {
            let (_, func) = overloads.iter()
                                     .find(|(n, _)| *n == arity)
                                     .ok_or(EvalErrorKind::BadArity)?;
            trace!(target: "tcalc::evaluator", name, arity, "native call");
            func(stack.above_mut(base), &self.settings)?;
            stack.truncate(base + 1);
            return Ok(());
        }

        let definition = self.functions
                             .get(name)
                             .ok_or(EvalErrorKind::UndefinedFunction)?;
        if definition.parameters.len() != arity {
            return Err(EvalErrorKind::BadArity);
        }
        if depth >= RECURSION_LIMIT {
            return Err(EvalErrorKind::RecursionLimit);
        }
        trace!(target: "tcalc::evaluator", name, arity, depth, "user call");

        let arguments = stack.above_mut(base).to_vec();
        stack.truncate(base);
        self.run(stack,
                 &definition.body,
                 Bindings::new(&definition.parameters, &arguments),
                 depth + 1)
            .map_err(|error| error.kind)
    }
}
