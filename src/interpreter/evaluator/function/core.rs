use std::{io::Write, rc::Rc};

use crate::{
    ast::{DeclaredType, Expr, FunctionDecl},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Flow, Interpreter},
            environment::{Binding, Scope},
            function::{list, round, time},
        },
        lexer::Token,
        value::{
            callable::{Callable, NativeCall, NativeFunction, ParamType},
            core::Value,
        },
    },
};

/// The most user function calls that may be running at once.
///
/// Hosts running deep programs should give the interpreter thread a stack
/// large enough for this many nested calls.
pub const MAX_CALL_DEPTH: usize = 2_000;

/// Defines built-in functions by generating their lookup table.
///
/// Each entry provides:
/// - a string name,
/// - the declared parameter types, whose count is the arity,
/// - a function pointer implementing the built-in.
///
/// The macro produces `NATIVE_TABLE`, the static table the interpreter binds
/// into its globals.
macro_rules! native_functions {
    (
        $(
            $name:literal => {
                params: [$($param:expr),* $(,)?],
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        pub(crate) static NATIVE_TABLE: &[NativeFunction] = &[
            $(
                NativeFunction { name: $name, params: &[$($param),*], func: $func },
            )*
        ];
    };
}

native_functions! {
    "clock"  => { params: [], func: time::clock },
    "sleep"  => { params: [ParamType::Typed(DeclaredType::Number)], func: time::sleep },
    "round"  => { params: [ParamType::Typed(DeclaredType::Number)], func: round::round },
    "count"  => { params: [ParamType::Typed(DeclaredType::List)], func: list::count },
    "add"    => { params: [ParamType::Typed(DeclaredType::List), ParamType::Any], func: list::add },
    "remove" => { params: [ParamType::Typed(DeclaredType::List),
                           ParamType::Typed(DeclaredType::Number)], func: list::remove },
}

impl<W: Write> Interpreter<W> {
    /// Evaluates a function call.
    ///
    /// The callee is evaluated first, then every argument from left to right.
    /// The callee must be a function, the argument count must match its
    /// arity and every argument must match its parameter type.
    ///
    /// # Parameters
    /// - `callee`: Expression producing the function.
    /// - `paren`: The closing parenthesis, for error reporting.
    /// - `arguments`: Argument expressions.
    ///
    /// # Returns
    /// The function result: the returned value, `null` for a non-void
    /// function that returns nothing, or `void`.
    ///
    /// # Errors
    /// - `NotCallable` if the callee is not a function.
    /// - `ArityMismatch` for the wrong number of arguments.
    /// - `ArgumentTypeMismatch` for an argument of the wrong type.
    /// - `CallDepthExceeded` when [`MAX_CALL_DEPTH`] user calls are already
    ///   running.
    /// - Any error raised by the function itself.
    pub(crate) fn eval_call(&mut self,
                            callee: &Expr,
                            paren: &Token,
                            arguments: &[Expr])
                            -> EvalResult<Value> {
        let callee = self.evaluate(callee)?;
        let args = arguments.iter()
                            .map(|argument| self.evaluate(argument))
                            .collect::<EvalResult<Vec<_>>>()?;

        let Value::Callable(callable) = callee else {
            return Err(RuntimeError::NotCallable { lexeme: paren.lexeme.clone(),
                                                   line:   paren.line, });
        };

        if args.len() != callable.arity() {
            return Err(RuntimeError::ArityMismatch { expected: callable.arity(),
                                                     found:    args.len(),
                                                     lexeme:   paren.lexeme.clone(),
                                                     line:     paren.line, });
        }

        for (position, (arg, param)) in args.iter().zip(callable.param_types()).enumerate() {
            if let ParamType::Typed(expected) = param
               && !arg.matches(expected)
            {
                return Err(RuntimeError::ArgumentTypeMismatch { callee: callable.name().to_string(),
                                                                position: position + 1,
                                                                expected,
                                                                found: arg.type_name(),
                                                                line: paren.line });
            }
        }

        tracing::trace!(function = callable.name(), arguments = args.len(), "calling function");

        match callable.as_ref() {
            Callable::Native(native) => (native.func)(&NativeCall { args:    &args,
                                                                    line:    paren.line,
                                                                    started: self.started, }),
            Callable::User(decl) => self.call_user_function(decl, args, paren.line),
        }
    }

    /// Executes a user-defined function.
    ///
    /// Parameters are bound by position in a new call frame whose only
    /// parent is the global scope. The frame is dropped on every way out of
    /// the call.
    ///
    /// # Errors
    /// - `CallDepthExceeded` if the call would nest too deeply.
    /// - `AlreadyDeclared` for a repeated parameter name.
    /// - `ReturnTypeMismatch` if the returned value does not match the
    ///   declared return type, or a `void` function returns a value.
    /// - `UnexpectedBreak` if a `break` escapes the function body.
    fn call_user_function(&mut self,
                          decl: &Rc<FunctionDecl>,
                          args: Vec<Value>,
                          line: usize)
                          -> EvalResult<Value> {
        if self.environment.call_depth() >= MAX_CALL_DEPTH {
            tracing::debug!(function = %decl.name.lexeme, "call depth limit reached");
            return Err(RuntimeError::CallDepthExceeded { callee: decl.name.lexeme.clone(),
                                                         limit: MAX_CALL_DEPTH,
                                                         line });
        }

        let mut parameters = Scope::default();
        for (param, value) in decl.params.iter().zip(args) {
            parameters.define(&param.name.lexeme,
                              Binding { ty: param.ty,
                                        value },
                              param.name.line)?;
        }

        self.environment.push_frame(parameters);
        let result = self.execute_statements(&decl.body);
        self.environment.pop_frame();

        match result? {
            Flow::Normal | Flow::Return { value: None, .. } => {
                Ok(if decl.return_type == DeclaredType::Void { Value::Void } else { Value::Null })
            },
            Flow::Return { value: Some(value),
                           line, } => {
                if decl.return_type == DeclaredType::Void || !value.matches(decl.return_type) {
                    return Err(RuntimeError::ReturnTypeMismatch { callee: decl.name.lexeme.clone(),
                                                                  expected: decl.return_type,
                                                                  found: value.type_name(),
                                                                  line });
                }
                Ok(value)
            },
            Flow::Break { line } => Err(RuntimeError::UnexpectedBreak { line }),
        }
    }
}
