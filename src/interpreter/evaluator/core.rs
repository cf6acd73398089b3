use std::{io::Write, rc::Rc, time::Instant};

use crate::{
    ast::{DeclaredType, Expr, Stmt},
    error::{Error, RuntimeError},
    interpreter::{
        evaluator::{
            environment::{Binding, Environment},
            function::core::NATIVE_TABLE,
            utils::subscript_index,
        },
        lexer::{Token, scan},
        parser::core::parse_program,
        value::{callable::Callable, core::Value},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// How a statement finished.
///
/// `break` and `return` unwind through enclosing statements as values of this
/// type: loops consume `Break`, function calls consume `Return`.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// The statement ran to completion.
    Normal,
    /// A `break` is looking for its loop.
    Break {
        /// Line of the `break` keyword.
        line: usize,
    },
    /// A `return` is looking for its function.
    Return {
        /// The returned value; `None` for a bare `return;`.
        value: Option<Value>,
        /// Line of the `return` keyword.
        line:  usize,
    },
}

/// The tree-walking interpreter.
///
/// Holds the scopes of the running program and the sink that receives
/// everything written by `print` and `puts`.
///
/// ## Usage
///
/// An `Interpreter` is created once and can run any number of programs;
/// bindings made by one program stay visible to the next, which is what the
/// interactive prompt relies on.
///
/// ```
/// use chonker::interpreter::evaluator::core::Interpreter;
///
/// let mut interpreter = Interpreter::new(Vec::new());
/// interpreter.run_source("number x = 20;").unwrap();
/// interpreter.run_source("puts x + 1;").unwrap();
///
/// assert_eq!(interpreter.into_output(), b"21\n");
/// ```
pub struct Interpreter<W: Write> {
    pub(crate) out:         W,
    pub(crate) environment: Environment,
    pub(crate) started:     Instant,
}

impl<W: Write> Interpreter<W> {
    /// Creates an interpreter writing program output to `out`.
    ///
    /// The global scope starts out holding the built-in functions.
    #[must_use]
    pub fn new(out: W) -> Self {
        let mut environment = Environment::default();
        for native in NATIVE_TABLE {
            environment.define_global(native.name,
                                      Binding { ty:    DeclaredType::Callable,
                                                value: Value::Callable(Rc::new(Callable::Native(native))), });
        }

        Self { out,
               environment,
               started: Instant::now() }
    }

    /// Scans, parses and runs `source`.
    ///
    /// # Errors
    /// Returns every lexing error, or every parse error, or the first runtime
    /// error. Nothing runs unless the whole source scanned and parsed
    /// cleanly.
    pub fn run_source(&mut self, source: &str) -> Result<(), Vec<Error>> {
        let tokens = scan(source)?;
        let program = parse_program(&tokens)?;
        self.interpret(&program).map_err(|e| vec![e])
    }

    /// Runs a parsed program.
    ///
    /// A `break` outside of any loop or a `return` outside of any function
    /// is reported as an error. Output is flushed when the program ends,
    /// whether or not it succeeded.
    ///
    /// # Errors
    /// Returns the first runtime error; execution stops there.
    pub fn interpret(&mut self, program: &[Stmt]) -> Result<(), Error> {
        tracing::debug!(statements = program.len(), "interpreting program");

        let result = self.run_top_level(program);
        let flushed = self.out.flush();

        if let Err(error) = &result {
            tracing::debug!(%error, "program failed");
        }
        result?;
        flushed.map_err(|source| RuntimeError::Output { source, line: 0 })?;

        tracing::debug!("program finished");
        Ok(())
    }

    fn run_top_level(&mut self, program: &[Stmt]) -> EvalResult<()> {
        for statement in program {
            match self.execute(statement)? {
                Flow::Normal => {},
                Flow::Break { line } => return Err(RuntimeError::UnexpectedBreak { line }),
                Flow::Return { line, .. } => return Err(RuntimeError::UnexpectedReturn { line }),
            }
        }
        Ok(())
    }

    /// Consumes the interpreter and returns its output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. Operands are
    /// always evaluated left to right.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// The value of the expression.
    ///
    /// # Example
    /// ```
    /// use chonker::{
    ///     ast::{Expr, Literal},
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let mut interpreter = Interpreter::new(std::io::sink());
    /// let expr = Expr::Grouped(Box::new(Expr::Literal(Literal::from(4.0))));
    ///
    /// assert_eq!(interpreter.evaluate(&expr).unwrap(), Value::Number(4.0));
    /// ```
    pub fn evaluate(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal(literal) => Ok(Value::from(literal)),
            Expr::Variable { name } => self.eval_variable(name),
            Expr::Assign { name, value } => self.eval_assign(name, value),
            Expr::Grouped(inner) => self.evaluate(inner),
            Expr::Unary { op, operator, right } => self.eval_unary(*op, operator, right),
            Expr::Binary { left,
                           op,
                           operator,
                           right, } => self.eval_binary(left, *op, operator, right),
            Expr::Logical { left, op, right, .. } => self.eval_logical(left, *op, right),
            Expr::Ternary { condition,
                            then_branch,
                            else_branch, } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.evaluate(then_branch)
                } else {
                    self.evaluate(else_branch)
                }
            },
            Expr::Call { callee,
                         paren,
                         arguments, } => self.eval_call(callee, paren, arguments),
            Expr::Subscript { list, index, bracket } => self.eval_subscript(list, index, bracket),
            Expr::List { elements, .. } => {
                let values = elements.iter()
                                     .map(|element| self.evaluate(element))
                                     .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::from(values))
            },
        }
    }

    /// Looks a variable up through the scope chain.
    ///
    /// # Errors
    /// Returns `UnknownVariable` if no enclosing scope binds the name.
    fn eval_variable(&self, name: &Token) -> EvalResult<Value> {
        self.environment
            .get(&name.lexeme)
            .map(|binding| binding.value.clone())
            .ok_or_else(|| RuntimeError::UnknownVariable { name: name.lexeme.clone(),
                                                           line: name.line, })
    }

    /// Assigns to an existing binding and yields the assigned value.
    ///
    /// The binding keeps its declared type; the new value must match it.
    ///
    /// # Errors
    /// - `UnknownVariable` if the name is not bound.
    /// - `AssignmentTypeMismatch` if the value does not match the declared
    ///   type.
    fn eval_assign(&mut self, name: &Token, value: &Expr) -> EvalResult<Value> {
        let value = self.evaluate(value)?;

        let binding = self.environment
                          .get_mut(&name.lexeme)
                          .ok_or_else(|| RuntimeError::UnknownVariable { name: name.lexeme.clone(),
                                                                         line: name.line, })?;

        if !value.matches(binding.ty) {
            return Err(RuntimeError::AssignmentTypeMismatch { name:     name.lexeme.clone(),
                                                              expected: binding.ty,
                                                              found:    value.type_name(),
                                                              line:     name.line, });
        }

        binding.value = value.clone();
        Ok(value)
    }

    /// Reads one element of a list.
    ///
    /// # Errors
    /// - `NotAList` if the subscripted value is not a list.
    /// - `InvalidIndex` or `IndexOutOfBounds` for a bad index.
    fn eval_subscript(&mut self, list: &Expr, index: &Expr, bracket: &Token) -> EvalResult<Value> {
        let list = self.evaluate(list)?;
        let index = self.evaluate(index)?;

        let Some(elements) = list.as_list() else {
            return Err(RuntimeError::NotAList { lexeme: bracket.lexeme.clone(),
                                                line:   bracket.line, });
        };

        let elements = elements.borrow();
        let position = subscript_index(&index, elements.len(), bracket)?;
        Ok(elements[position].clone())
    }
}
