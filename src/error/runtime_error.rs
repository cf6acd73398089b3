use crate::{ast::DeclaredType, error::Stage};

#[derive(Debug, thiserror::Error)]
/// Represents all errors that can occur during evaluation and runtime.
pub enum RuntimeError {
    /// Tried to use an undefined variable.
    #[error("Unknown variable '{name}'")]
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Declared a name that already exists in the current scope.
    #[error("Tried to declare '{name}', but it already exists")]
    AlreadyDeclared {
        /// The name being declared.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A declaration whose initializer has the wrong type.
    #[error("Cannot initialize '{name}' of type {expected} with a value of type {found}")]
    DeclarationTypeMismatch {
        /// The variable name.
        name:     String,
        /// The declared type.
        expected: DeclaredType,
        /// The runtime type of the initializer.
        found:    &'static str,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// An assignment whose value has the wrong type.
    #[error("Cannot assign a value of type {found} to '{name}' of type {expected}")]
    AssignmentTypeMismatch {
        /// The variable name.
        name:     String,
        /// The declared type of the binding.
        expected: DeclaredType,
        /// The runtime type of the value.
        found:    &'static str,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A call argument whose value has the wrong type.
    #[error("Argument {position} of '{callee}' expects {expected} but got {found}")]
    ArgumentTypeMismatch {
        /// Name of the called function.
        callee:   String,
        /// One-based position of the argument.
        position: usize,
        /// The declared parameter type.
        expected: DeclaredType,
        /// The runtime type of the argument.
        found:    &'static str,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A returned value that does not match the declared return type.
    #[error("Function '{callee}' must return {expected} but returned {found}")]
    ReturnTypeMismatch {
        /// Name of the function.
        callee:   String,
        /// The declared return type.
        expected: DeclaredType,
        /// The runtime type of the returned value.
        found:    &'static str,
        /// The line of the `return` keyword.
        line:     usize,
    },
    /// A unary operator applied to a non-number.
    #[error("Operand must be a number")]
    OperandMustBeNumber {
        /// The operator lexeme.
        operator: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// An arithmetic or comparison operator applied to non-numbers.
    #[error("Both operands should be numbers")]
    OperandsMustBeNumbers {
        /// The operator lexeme.
        operator: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// `+` applied to anything but two numbers or two strings.
    #[error("Operands have to be either both numbers or strings")]
    InvalidAddition {
        /// The operator lexeme.
        operator: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Division by exactly zero.
    #[error("Attempt to divide by zero")]
    DivisionByZero {
        /// The operator lexeme.
        operator: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Called a value that is not a function.
    #[error("Can only call functions")]
    NotCallable {
        /// The lexeme of the call parenthesis.
        lexeme: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// The wrong number of arguments was supplied to a function.
    #[error("Expected {expected} arguments but got {found}")]
    ArityMismatch {
        /// Number of declared parameters.
        expected: usize,
        /// Number of supplied arguments.
        found:    usize,
        /// The lexeme of the call parenthesis.
        lexeme:   String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Subscripted a value that is not a list.
    #[error("Only lists can be subscripted")]
    NotAList {
        /// The lexeme of the subscript bracket.
        lexeme: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// A subscript that is not a whole number.
    #[error("List index must be a whole number, got {index}")]
    InvalidIndex {
        /// The rendered index value.
        index:  String,
        /// The lexeme of the subscript bracket.
        lexeme: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// Tried to access a list element outside the allowed bounds.
    #[error("Index {index} out of bounds for list of length {length}")]
    IndexOutOfBounds {
        /// The rendered index value.
        index:  String,
        /// The length of the list.
        length: usize,
        /// The lexeme of the subscript bracket.
        lexeme: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// A `return` outside of any function call.
    #[error("Unexpected return statement")]
    UnexpectedReturn {
        /// The line of the `return` keyword.
        line: usize,
    },
    /// A `break` outside of any loop.
    #[error("Unexpected break statement")]
    UnexpectedBreak {
        /// The line of the `break` keyword.
        line: usize,
    },
    /// A call nested deeper than the interpreter allows.
    #[error("Maximum call depth of {limit} exceeded")]
    CallDepthExceeded {
        /// Name of the function whose call was refused.
        callee: String,
        /// The maximum number of nested calls.
        limit:  usize,
        /// The source line of the call.
        line:   usize,
    },
    /// A built-in function rejected its arguments.
    #[error("{message}")]
    Native {
        /// Name of the built-in.
        function: &'static str,
        /// What went wrong.
        message:  String,
        /// The source line of the call.
        line:     usize,
    },
    /// Program output could not be written.
    #[error("Failed to write program output: {source}")]
    Output {
        /// The underlying I/O failure.
        source: std::io::Error,
        /// The source line of the print statement.
        line:   usize,
    },
}

impl RuntimeError {
    /// Returns the stage reported in diagnostics.
    ///
    /// Built-in failures are reported as `Native Function` errors and host
    /// output failures as `Internal` errors.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        match self {
            Self::Native { .. } => Stage::NativeFunction,
            Self::Output { .. } => Stage::Internal,
            _ => Stage::Interpreter,
        }
    }

    /// Returns the source line of the error.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnknownVariable { line, .. }
            | Self::AlreadyDeclared { line, .. }
            | Self::DeclarationTypeMismatch { line, .. }
            | Self::AssignmentTypeMismatch { line, .. }
            | Self::ArgumentTypeMismatch { line, .. }
            | Self::ReturnTypeMismatch { line, .. }
            | Self::OperandMustBeNumber { line, .. }
            | Self::OperandsMustBeNumbers { line, .. }
            | Self::InvalidAddition { line, .. }
            | Self::DivisionByZero { line, .. }
            | Self::NotCallable { line, .. }
            | Self::ArityMismatch { line, .. }
            | Self::NotAList { line, .. }
            | Self::InvalidIndex { line, .. }
            | Self::IndexOutOfBounds { line, .. }
            | Self::UnexpectedReturn { line }
            | Self::UnexpectedBreak { line }
            | Self::CallDepthExceeded { line, .. }
            | Self::Native { line, .. }
            | Self::Output { line, .. } => *line,
        }
    }

    /// Returns the lexeme the error is attached to, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        match self {
            Self::UnknownVariable { name, .. }
            | Self::AlreadyDeclared { name, .. }
            | Self::DeclarationTypeMismatch { name, .. }
            | Self::AssignmentTypeMismatch { name, .. } => Some(name),
            Self::OperandMustBeNumber { operator, .. }
            | Self::OperandsMustBeNumbers { operator, .. }
            | Self::InvalidAddition { operator, .. }
            | Self::DivisionByZero { operator, .. } => Some(operator),
            Self::NotCallable { lexeme, .. }
            | Self::ArityMismatch { lexeme, .. }
            | Self::NotAList { lexeme, .. }
            | Self::InvalidIndex { lexeme, .. }
            | Self::IndexOutOfBounds { lexeme, .. } => Some(lexeme),
            Self::ArgumentTypeMismatch { callee, .. }
            | Self::ReturnTypeMismatch { callee, .. }
            | Self::CallDepthExceeded { callee, .. } => Some(callee),
            Self::UnexpectedReturn { .. } => Some("return"),
            Self::UnexpectedBreak { .. } => Some("break"),
            Self::Native { function, .. } => Some(function),
            Self::Output { .. } => None,
        }
    }
}
