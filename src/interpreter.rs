/// The evaluator module executes the syntax tree.
///
/// The evaluator walks statements and expressions directly, manages the
/// scope chain, enforces declared types at every binding, assignment, call
/// and return, and provides the built-in functions.
///
/// # Responsibilities
/// - Executes statements and evaluates expressions.
/// - Carries `break` and `return` out of nested statements.
/// - Reports runtime errors such as type mismatches, unknown names, division
///   by zero or bad subscripts.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a vector of tokens, each
/// carrying its kind, its source text, its literal value and its line. The
/// vector always ends with an end-of-file token.
///
/// # Responsibilities
/// - Recognizes operators, keywords, identifiers, numbers and strings.
/// - Skips whitespace and both comment styles while counting lines.
/// - Reports lexical errors for stray characters, single `&` or `|`, and
///   unterminated strings.
pub mod lexer;
/// The parser module builds the syntax tree from tokens.
///
/// A recursive-descent parser that produces statements and expressions,
/// rewriting `for` loops and `switch` statements into simpler constructs on
/// the way.
///
/// # Responsibilities
/// - Converts tokens into statements and expressions.
/// - Validates the grammar, reporting errors with line and lexeme.
/// - Recovers after an error so that later errors are reported too.
pub mod parser;
/// The value module defines the runtime data types.
///
/// Declares the values a program manipulates (numbers, strings, booleans,
/// `null`, `void`, lists and functions) together with truthiness, equality,
/// type checks and their printed form.
pub mod value;
