use std::{thread, time::Duration};

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::{callable::NativeCall, core::Value}},
    util::num::f64_to_u64_checked,
};

/// Returns the seconds elapsed since the interpreter was created.
///
/// # Example
/// ```
/// use std::time::Instant;
///
/// use chonker::interpreter::{
///     evaluator::function::time::clock,
///     value::{callable::NativeCall, core::Value},
/// };
///
/// let call = NativeCall { args:    &[],
///                         line:    1,
///                         started: Instant::now(), };
///
/// let Value::Number(seconds) = clock(&call).unwrap() else { panic!("clock returns a number") };
/// assert!(seconds >= 0.0);
/// ```
pub fn clock(call: &NativeCall<'_>) -> EvalResult<Value> {
    Ok(Value::Number(call.started.elapsed().as_secs_f64()))
}

/// Blocks the interpreter for a whole number of milliseconds.
///
/// Returns `null`.
///
/// # Errors
/// Returns a native error if the argument is fractional, negative or not
/// finite.
pub fn sleep(call: &NativeCall<'_>) -> EvalResult<Value> {
    let millis = match call.args.first() {
        Some(Value::Number(n)) => *n,
        _ => return Ok(Value::Null),
    };

    let message = if millis < 0.0 {
        "Function sleep expected a non-negative number of milliseconds"
    } else {
        "Function sleep expected an integer. Round your number with round() if needed"
    };
    let millis = f64_to_u64_checked(millis,
                                    RuntimeError::Native { function: "sleep",
                                                           message:  message.to_string(),
                                                           line:     call.line, })?;

    thread::sleep(Duration::from_millis(millis));
    Ok(Value::Null)
}
