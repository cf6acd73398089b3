//! # chonker
//!
//! chonker is a small, statically typed scripting language with a
//! tree-walking interpreter written in Rust. Programs declare typed
//! variables, define typed functions, loop with `while`, `for` and `switch`,
//! and work with heterogeneous lists.
//!
//! Source text flows through three stages: the lexer turns it into tokens,
//! the parser turns tokens into a syntax tree and the evaluator runs that
//! tree directly.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::Write;

use crate::{error::Error, interpreter::evaluator::core::Interpreter};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Stmt` enums and related types that
/// represent the syntactic structure of a program as a tree. The tree is
/// built by the parser and executed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Keeps source tokens on the nodes that can fail, for error reporting.
/// - Defines the declared types attached to variables and functions.
pub mod ast;
/// Provides unified error types for every stage.
///
/// This module defines all errors that can be raised while lexing, parsing
/// or evaluating code, and the wrapping `Error` that renders them as the
/// diagnostics printed by the command line tool.
///
/// # Responsibilities
/// - Defines one error enum per stage, one variant per failure mode.
/// - Attaches line numbers and offending lexemes.
/// - Renders diagnostics tagged with the stage that raised them.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation and the value
/// representation to provide a complete runtime for programs.
///
/// # Responsibilities
/// - Coordinates the lexer, parser, evaluator and value types.
/// - Provides entry points for parsing and running programs.
/// - Manages the flow of data and errors between stages.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// # Responsibilities
/// - Safely convert between `f64` and the integer types used for list
///   indices, lengths and durations, without silent data loss.
pub mod util;

/// Runs a program and writes its output to `out`.
///
/// The source is scanned, parsed and interpreted by a fresh interpreter.
/// Nothing is executed unless scanning and parsing succeed.
///
/// # Errors
/// Returns every lexing error, or every parse error, or the runtime error
/// that stopped the program.
///
/// # Examples
/// ```
/// use chonker::run;
///
/// let mut out = Vec::new();
/// run("number x = 21; puts x * 2;", &mut out).unwrap();
/// assert_eq!(out, b"42\n");
///
/// // Unknown variable: the program fails at runtime.
/// let errors = run("puts y;", &mut Vec::new()).unwrap_err();
/// assert_eq!(errors.len(), 1);
/// assert!(errors[0].to_string().starts_with("Interpreter error:"));
/// ```
pub fn run<W: Write>(source: &str, out: W) -> Result<(), Vec<Error>> {
    Interpreter::new(out).run_source(source)
}
