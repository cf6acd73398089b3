/// Operand evaluation and arithmetic.
///
/// Evaluates both operands left to right and routes the operator. Addition
/// also concatenates strings.
pub mod core;

/// Ordering and equality comparisons.
pub mod comparison;

/// Short-circuiting `&&` and `||`.
pub mod logic;
