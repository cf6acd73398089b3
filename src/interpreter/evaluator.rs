/// Core evaluation logic and the interpreter entry points.
///
/// Contains the `Interpreter`, the `Flow` signal used by `break` and
/// `return`, expression dispatch, variable access and subscripts.
pub mod core;

/// Scopes and call frames.
///
/// Typed bindings, the global scope and the per-call stacks of block scopes.
pub mod environment;

/// Statement execution.
///
/// Runs declarations, blocks, conditionals, loops, switches and print
/// statements, and propagates `break` and `return`.
pub mod statement;

/// Binary operator evaluation logic.
///
/// Handles arithmetic, string concatenation, comparisons, equality,
/// sequencing and the short-circuiting logical operators.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation and logical NOT.
pub mod unary;

/// Utility functions for evaluation.
pub mod utils;

/// Function evaluation.
///
/// Handles user-defined and built-in function calls, argument checking, and
/// return value computation.
pub mod function;
