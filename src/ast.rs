use std::rc::Rc;

use crate::interpreter::lexer::Token;

/// Represents a literal value in the language.
///
/// `Literal` covers the constants that can appear directly in source code:
/// numbers, strings, booleans and `null`. Lexer tokens carry a `Literal` for
/// `NUMBER` and `STRING`, and the parser wraps them into [`Expr::Literal`].
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A double precision number literal, such as `42` or `3.5`.
    Number(f64),
    /// A string literal with its surrounding quotes removed.
    Str(Rc<str>),
    /// `true` or `false`.
    Bool(bool),
    /// The explicit `null` value.
    Null,
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::Str(Rc::from(value))
    }
}

/// The static type attached to every binding.
///
/// A binding keeps its declared type for its whole lifetime; assignments,
/// arguments and return values are checked against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclaredType {
    /// `number`
    Number,
    /// `string`
    String,
    /// `bool`
    Bool,
    /// `list`
    List,
    /// `void`, only valid as a function return type.
    Void,
    /// Used internally when a function name is bound.
    Callable,
}

impl std::fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Bool => "bool",
            Self::List => "list",
            Self::Void => "void",
            Self::Callable => "callable",
        };
        write!(f, "{name}")
    }
}

/// A binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Subtract,
    /// Multiplication (`*`)
    Multiply,
    /// Division (`/`)
    Divide,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Sequencing (`,`): evaluates both sides and yields the right one.
    Sequence,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Sequence => ",",
        };
        write!(f, "{operator}")
    }
}

/// A short-circuiting logical operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogicalOperator {
    /// `&&` (or `and`)
    And,
    /// `||` (or `or`)
    Or,
}

/// A prefix operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Numeric negation (`-x`).
    Negate,
    /// Logical not over truthiness (`!x`).
    Not,
}

/// An abstract syntax tree node representing an expression.
///
/// Every node that can fail at runtime keeps the token it was parsed from so
/// that diagnostics can report a line and a lexeme.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A constant value.
    Literal(Literal),
    /// Reference to a binding by name.
    Variable {
        /// The identifier token.
        name: Token,
    },
    /// Assignment to an existing binding; yields the assigned value.
    Assign {
        /// The identifier token of the target.
        name:  Token,
        /// The new value.
        value: Box<Self>,
    },
    /// A parenthesized expression.
    Grouped(Box<Self>),
    /// A prefix operation.
    Unary {
        /// The operator.
        op:       UnaryOperator,
        /// The operator token.
        operator: Token,
        /// The operand.
        right:    Box<Self>,
    },
    /// An arithmetic, comparison or sequencing operation.
    Binary {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        op:       BinaryOperator,
        /// The operator token.
        operator: Token,
        /// Right operand.
        right:    Box<Self>,
    },
    /// A short-circuiting `&&` or `||`.
    Logical {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        op:       LogicalOperator,
        /// The operator token.
        operator: Token,
        /// Right operand, evaluated only when needed.
        right:    Box<Self>,
    },
    /// `condition ? then_branch : else_branch`
    Ternary {
        /// The condition, tested for truthiness.
        condition:   Box<Self>,
        /// Value when the condition is truthy.
        then_branch: Box<Self>,
        /// Value when the condition is falsy.
        else_branch: Box<Self>,
    },
    /// A call such as `add(1, 2)`.
    Call {
        /// Expression producing the callable.
        callee:    Box<Self>,
        /// The closing parenthesis, used for diagnostics.
        paren:     Token,
        /// Arguments, evaluated left to right.
        arguments: Vec<Self>,
    },
    /// Element access such as `xs[0]`.
    Subscript {
        /// Expression producing the list.
        list:    Box<Self>,
        /// Expression producing the index.
        index:   Box<Self>,
        /// The opening bracket, used for diagnostics.
        bracket: Token,
    },
    /// A list literal such as `[1, "two", false]`.
    List {
        /// The element expressions, evaluated once at construction.
        elements: Vec<Self>,
        /// The opening bracket.
        bracket:  Token,
    },
}

impl Expr {
    /// Returns the best source line known for this expression.
    ///
    /// ## Example
    /// ```
    /// use chonker::{ast::Expr, interpreter::lexer::scan};
    ///
    /// let tokens = scan("\n\nanswer").unwrap();
    /// let expr = Expr::Variable { name: tokens[0].clone() };
    ///
    /// assert_eq!(expr.line_number(), Some(3));
    /// ```
    #[must_use]
    pub fn line_number(&self) -> Option<usize> {
        match self {
            Self::Literal(_) => None,
            Self::Variable { name } | Self::Assign { name, .. } => Some(name.line),
            Self::Unary { operator, .. }
            | Self::Binary { operator, .. }
            | Self::Logical { operator, .. } => Some(operator.line),
            Self::Call { paren, .. } => Some(paren.line),
            Self::Subscript { bracket, .. } | Self::List { bracket, .. } => Some(bracket.line),
            Self::Grouped(inner) => inner.line_number(),
            Self::Ternary { condition,
                            then_branch,
                            else_branch, } => condition.line_number()
                                                       .or_else(|| then_branch.line_number())
                                                       .or_else(|| else_branch.line_number()),
        }
    }
}

/// A typed function parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// The parameter name token.
    pub name: Token,
    /// The declared parameter type.
    pub ty:   DeclaredType,
}

/// A user-defined function declaration.
///
/// Declarations are shared between the AST and every callable value created
/// from them, hence the `Rc` in [`Stmt::Function`].
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// The function name token.
    pub name:        Token,
    /// The declared return type, possibly `void`.
    pub return_type: DeclaredType,
    /// Parameters in declaration order.
    pub params:      Vec<Param>,
    /// The body statements, executed in the parameter scope.
    pub body:        Vec<Stmt>,
}

/// An abstract syntax tree node representing a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// An expression evaluated for its side effects.
    Expression(Expr),
    /// `print expr;` (no newline) or `puts expr;` (newline).
    Print {
        /// The value to print.
        expr:    Expr,
        /// Whether a line terminator follows the value.
        newline: bool,
    },
    /// A typed variable declaration.
    Var {
        /// The variable name token.
        name:        Token,
        /// The declared type, one of `number`, `string`, `bool`, `list`.
        ty:          DeclaredType,
        /// The initializer; the parser substitutes a default when omitted.
        initializer: Expr,
    },
    /// A braced block with its own scope.
    Block(Vec<Self>),
    /// `if (condition) then_branch else else_branch`
    If {
        /// The condition, tested for truthiness.
        condition:   Expr,
        /// Executed when the condition is truthy.
        then_branch: Box<Self>,
        /// Executed when the condition is falsy.
        else_branch: Option<Box<Self>>,
    },
    /// `while (condition) body`
    While {
        /// The loop condition, tested before every iteration.
        condition: Expr,
        /// The loop body.
        body:      Box<Self>,
    },
    /// A switch whose case conditions are already comparisons against the
    /// subject. The parser lowers switches to `If` chains, so this variant is
    /// only produced by code that builds trees directly.
    Switch {
        /// `(condition, body)` pairs in source order.
        cases:   Vec<(Expr, Self)>,
        /// Executed when no case matches.
        default: Option<Box<Self>>,
    },
    /// A function declaration.
    Function(Rc<FunctionDecl>),
    /// `return value?;`
    Return {
        /// The `return` keyword, used for diagnostics.
        keyword: Token,
        /// The returned value; `None` for a void return.
        value:   Option<Expr>,
    },
    /// `break;`
    Break {
        /// The `break` keyword, used for diagnostics.
        keyword: Token,
    },
}
