use std::{cell::RefCell, rc::Rc};

use crate::{
    ast::{DeclaredType, Literal},
    interpreter::value::callable::Callable,
};

/// Represents a runtime value in the interpreter.
///
/// This enum models all the values that can be stored in bindings, passed to
/// functions and printed. Lists and callables are reference types: copying a
/// `Value` shares them.
#[derive(Debug, Clone)]
pub enum Value {
    /// A numeric value (double precision floating-point).
    Number(f64),
    /// An immutable string.
    Str(Rc<str>),
    /// A boolean value (`true` or `false`).
    Bool(bool),
    /// The explicit `null` value.
    Null,
    /// The result of calling a `void` function. Cannot be written in source.
    Void,
    /// A mutable, heterogeneous list shared by every binding that holds it.
    List(Rc<RefCell<Vec<Self>>>),
    /// A user function or built-in.
    Callable(Rc<Callable>),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(Rc::from(v))
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::List(Rc::new(RefCell::new(v)))
    }
}

impl From<&Literal> for Value {
    fn from(lit: &Literal) -> Self {
        match lit {
            Literal::Number(n) => Self::Number(*n),
            Literal::Str(s) => Self::Str(Rc::clone(s)),
            Literal::Bool(b) => Self::Bool(*b),
            Literal::Null => Self::Null,
        }
    }
}

impl PartialEq for Value {
    /// Primitives compare by value; lists and callables compare by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Null, Self::Null) | (Self::Void, Self::Void) => true,
            (Self::List(a), Self::List(b)) => Rc::ptr_eq(a, b),
            (Self::Callable(a), Self::Callable(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Value {
    /// Returns the truthiness of the value.
    ///
    /// `null` and `false` are falsy; every other value, including `0` and the
    /// empty string, is truthy.
    ///
    /// # Example
    /// ```
    /// use chonker::interpreter::value::core::Value;
    ///
    /// assert!(Value::Number(0.0).is_truthy());
    /// assert!(Value::from("").is_truthy());
    /// assert!(!Value::Null.is_truthy());
    /// assert!(!Value::Bool(false).is_truthy());
    /// ```
    #[must_use]
    pub const fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            _ => true,
        }
    }

    /// Returns the name of the value's runtime type, as used in diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Str(_) => "string",
            Self::Bool(_) => "bool",
            Self::Null => "null",
            Self::Void => "void",
            Self::List(_) => "list",
            Self::Callable(_) => "callable",
        }
    }

    /// Checks whether the value may be stored under the declared type.
    ///
    /// Each value kind matches its own type. `null` matches every type
    /// except `void`, and nothing else matches `void`.
    ///
    /// # Example
    /// ```
    /// use chonker::{ast::DeclaredType, interpreter::value::core::Value};
    ///
    /// assert!(Value::Number(1.0).matches(DeclaredType::Number));
    /// assert!(Value::Null.matches(DeclaredType::String));
    /// assert!(!Value::from("1").matches(DeclaredType::Number));
    /// assert!(!Value::Null.matches(DeclaredType::Void));
    /// ```
    #[must_use]
    pub const fn matches(&self, ty: DeclaredType) -> bool {
        matches!((self, ty),
                 (Self::Number(_), DeclaredType::Number)
                 | (Self::Str(_), DeclaredType::String)
                 | (Self::Bool(_), DeclaredType::Bool)
                 | (Self::List(_), DeclaredType::List)
                 | (Self::Callable(_), DeclaredType::Callable))
        || matches!(self, Self::Null) && !matches!(ty, DeclaredType::Void)
    }

    /// Returns the number if the value is one.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the shared list if the value is one.
    #[must_use]
    pub const fn as_list(&self) -> Option<&Rc<RefCell<Vec<Self>>>> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    /// Writes the text printed by `print` and `puts`.
    ///
    /// Integral numbers have no fractional part (`3.0` prints as `3`), lists
    /// print as `list` and the absence of a value prints as `null` or `void`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) if n.is_infinite() => {
                write!(f, "{}", if n.is_sign_positive() { "Infinity" } else { "-Infinity" })
            },
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Null => write!(f, "null"),
            Self::Void => write!(f, "void"),
            Self::List(_) => write!(f, "list"),
            Self::Callable(c) => write!(f, "{c}"),
        }
    }
}
