/// Callable values.
///
/// Defines `Callable`, the runtime representation of user functions and
/// built-ins, together with the descriptor and call frame used by built-ins.
pub mod callable;

/// The runtime value type.
///
/// Declares `Value`, its truthiness and equality rules, type checks against
/// declared types and the text form used by `print` and `puts`.
pub mod core;
