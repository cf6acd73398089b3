use std::{rc::Rc, time::Instant};

use crate::{
    ast::{DeclaredType, FunctionDecl},
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Type alias for built-in function handlers.
///
/// A built-in receives the evaluated, already type-checked arguments through
/// a [`NativeCall`].
pub type NativeFn = fn(&NativeCall<'_>) -> EvalResult<Value>;

/// The declared type of a built-in parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    /// The argument must match this type (or be `null`).
    Typed(DeclaredType),
    /// Any argument is accepted.
    Any,
}

/// Describes a built-in function.
#[derive(Debug)]
pub struct NativeFunction {
    /// The global name the built-in is bound to.
    pub name:   &'static str,
    /// Parameter types; the length is the arity.
    pub params: &'static [ParamType],
    /// The implementation.
    pub func:   NativeFn,
}

/// Everything a built-in may look at while running.
#[derive(Debug)]
pub struct NativeCall<'a> {
    /// The evaluated arguments.
    pub args:    &'a [Value],
    /// Line of the call, for error reporting.
    pub line:    usize,
    /// When the interpreter was created; `clock()` is relative to it.
    pub started: Instant,
}

/// A function value.
///
/// User functions share their declaration with the syntax tree. Built-ins
/// point into the static table of native functions.
#[derive(Debug)]
pub enum Callable {
    /// A built-in function.
    Native(&'static NativeFunction),
    /// A function declared in the program.
    User(Rc<FunctionDecl>),
}

impl Callable {
    /// Returns the name the function was declared with.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Native(native) => native.name,
            Self::User(decl) => &decl.name.lexeme,
        }
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        match self {
            Self::Native(native) => native.params.len(),
            Self::User(decl) => decl.params.len(),
        }
    }

    /// Returns the declared types of all parameters, in order.
    ///
    /// # Example
    /// ```
    /// use chonker::{
    ///     ast::DeclaredType,
    ///     interpreter::{
    ///         evaluator::core::EvalResult,
    ///         value::{
    ///             callable::{Callable, NativeCall, NativeFunction, ParamType},
    ///             core::Value,
    ///         },
    ///     },
    /// };
    ///
    /// fn second(call: &NativeCall<'_>) -> EvalResult<Value> {
    ///     Ok(call.args[1].clone())
    /// }
    ///
    /// static SECOND: NativeFunction =
    ///     NativeFunction { name:   "second",
    ///                      params: &[ParamType::Typed(DeclaredType::List), ParamType::Any],
    ///                      func:   second, };
    ///
    /// let second = Callable::Native(&SECOND);
    /// assert_eq!(second.arity(), 2);
    /// assert_eq!(second.param_types(),
    ///            vec![ParamType::Typed(DeclaredType::List), ParamType::Any]);
    /// ```
    #[must_use]
    pub fn param_types(&self) -> Vec<ParamType> {
        match self {
            Self::Native(native) => native.params.to_vec(),
            Self::User(decl) => decl.params.iter().map(|param| ParamType::Typed(param.ty)).collect(),
        }
    }
}

impl std::fmt::Display for Callable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Native(native) => write!(f, "<native fn {}>", native.name),
            Self::User(decl) => write!(f, "<fn {}>", decl.name.lexeme),
        }
    }
}
