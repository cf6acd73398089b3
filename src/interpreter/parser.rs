/// Entry points of the parser.
///
/// Holds the top-level driver with its error recovery, and the root of
/// expression parsing.
pub mod core;

/// Unary operator parsing.
///
/// Handles prefix operators, calls, subscripts and primary expressions such
/// as literals, variables, groups and list literals.
pub mod unary;

/// Binary operator parsing.
///
/// Implements the precedence ladder from assignment down to multiplication,
/// including the ternary operator and the short-circuiting logical operators.
pub mod binary;

/// Block parsing.
///
/// Parses braced sequences of declarations.
pub mod block;

/// Utility functions for the parser.
///
/// Provides token matching helpers, comma-separated lists and recovery after
/// errors.
pub mod utils;

/// Statement parsing.
///
/// Implements declarations, print statements, conditionals, loops, function
/// declarations and the `return` and `break` statements.
pub mod statement;

/// Desugaring of `for` and `switch`.
///
/// Both constructs are rewritten at parse time into trees built from `while`,
/// blocks and `if` chains, so the evaluator never sees them.
pub mod desugar;
