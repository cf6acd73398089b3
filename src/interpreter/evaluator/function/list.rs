use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{callable::NativeCall, core::Value},
    },
    util::num::{f64_to_usize_checked, usize_to_f64_checked},
};

/// Returns the number of elements in a list.
///
/// # Errors
/// Returns a native error if the list is `null`.
pub fn count(call: &NativeCall<'_>) -> EvalResult<Value> {
    let length = target_list(call, "count")?.borrow().len();
    let length = usize_to_f64_checked(length,
                                      RuntimeError::Native { function: "count",
                                                             message:  "List is too long to count".to_string(),
                                                             line:     call.line, })?;
    Ok(Value::Number(length))
}

/// Appends a value to a list in place. Returns `null`.
///
/// Every binding holding the list observes the new element.
///
/// # Errors
/// Returns a native error if the list is `null`.
pub fn add(call: &NativeCall<'_>) -> EvalResult<Value> {
    let list = target_list(call, "add")?;
    let element = call.args.get(1).cloned().unwrap_or(Value::Null);

    list.borrow_mut().push(element);
    Ok(Value::Null)
}

/// Removes the element at an index from a list in place. Returns `null`.
///
/// # Errors
/// Returns a native error if the list is `null`, or if the index is not a
/// whole number inside the list.
pub fn remove(call: &NativeCall<'_>) -> EvalResult<Value> {
    let list = target_list(call, "remove")?;
    let mut elements = list.borrow_mut();
    let length = elements.len();

    let index = match call.args.get(1) {
        Some(Value::Number(n)) => *n,
        _ => return Err(native_error("remove", "Function remove expected an index", call.line)),
    };

    let out_of_bounds =
        native_error("remove",
                     &format!("Index {} out of bounds for list of length {length}", Value::Number(index)),
                     call.line);
    match f64_to_usize_checked(index, ()) {
        Ok(position) if position < length => {
            elements.remove(position);
            Ok(Value::Null)
        },
        _ => Err(out_of_bounds),
    }
}

/// Returns the list passed as the first argument.
fn target_list<'a>(call: &'a NativeCall<'_>,
                   function: &'static str)
                   -> EvalResult<&'a std::rc::Rc<std::cell::RefCell<Vec<Value>>>> {
    call.args
        .first()
        .and_then(Value::as_list)
        .ok_or_else(|| native_error(function, &format!("Function {function} expected a list"), call.line))
}

fn native_error(function: &'static str, message: &str, line: usize) -> RuntimeError {
    RuntimeError::Native { function,
                           message: message.to_string(),
                           line }
}
