/// Function calls and the built-in table.
///
/// Checks callee, arity and argument types, then dispatches to a built-in or
/// runs a user function in its own call frame.
pub mod core;

/// The `clock` and `sleep` built-ins.
pub mod time;

/// The list built-ins `count`, `add` and `remove`.
pub mod list;

/// The `round` built-in.
pub mod round;
