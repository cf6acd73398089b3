use std::{io::Write, rc::Rc};

use crate::{
    ast::{DeclaredType, Expr, FunctionDecl, Stmt},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Flow, Interpreter},
            environment::Binding,
        },
        lexer::Token,
        value::{callable::Callable, core::Value},
    },
};

impl<W: Write> Interpreter<W> {
    /// Executes a single statement.
    ///
    /// # Parameters
    /// - `statement`: Statement to execute.
    ///
    /// # Returns
    /// `Flow::Normal` when the statement completed, or the `break`/`return`
    /// that is still unwinding.
    ///
    /// # Errors
    /// Propagates the first runtime error raised while executing.
    pub fn execute(&mut self, statement: &Stmt) -> EvalResult<Flow> {
        match statement {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(Flow::Normal)
            },
            Stmt::Print { expr, newline } => {
                self.execute_print(expr, *newline)?;
                Ok(Flow::Normal)
            },
            Stmt::Var { name,
                        ty,
                        initializer, } => {
                self.execute_var(name, *ty, initializer)?;
                Ok(Flow::Normal)
            },
            Stmt::Block(statements) => self.execute_block(statements),
            Stmt::If { condition,
                       then_branch,
                       else_branch, } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            },
            Stmt::While { condition, body } => self.execute_while(condition, body),
            Stmt::Switch { cases, default } => {
                for (condition, body) in cases {
                    if self.evaluate(condition)?.is_truthy() {
                        return self.execute(body);
                    }
                }
                default.as_ref().map_or(Ok(Flow::Normal), |body| self.execute(body))
            },
            Stmt::Function(decl) => {
                self.execute_function(decl)?;
                Ok(Flow::Normal)
            },
            Stmt::Return { keyword, value } => {
                let value = value.as_ref().map(|expr| self.evaluate(expr)).transpose()?;
                Ok(Flow::Return { value,
                                  line: keyword.line })
            },
            Stmt::Break { keyword } => Ok(Flow::Break { line: keyword.line }),
        }
    }

    /// Executes statements in a fresh block scope.
    ///
    /// The scope is closed again on every way out of the block: normal
    /// completion, `break`, `return` and errors.
    ///
    /// # Errors
    /// Propagates the first runtime error raised inside the block.
    pub fn execute_block(&mut self, statements: &[Stmt]) -> EvalResult<Flow> {
        self.environment.push_scope();
        let result = self.execute_statements(statements);
        self.environment.pop_scope();
        result
    }

    /// Executes statements in the current scope until one of them does not
    /// complete normally.
    pub(crate) fn execute_statements(&mut self, statements: &[Stmt]) -> EvalResult<Flow> {
        for statement in statements {
            match self.execute(statement)? {
                Flow::Normal => {},
                unwinding => return Ok(unwinding),
            }
        }
        Ok(Flow::Normal)
    }

    /// Writes the text form of a value, followed by a newline for `puts`.
    fn execute_print(&mut self, expr: &Expr, newline: bool) -> EvalResult<()> {
        let value = self.evaluate(expr)?;
        let line = expr.line_number().unwrap_or_default();

        let written = if newline {
            writeln!(self.out, "{value}")
        } else {
            write!(self.out, "{value}")
        };
        written.map_err(|source| RuntimeError::Output { source, line })
    }

    /// Declares a variable in the innermost scope.
    ///
    /// # Errors
    /// - `DeclarationTypeMismatch` if the initializer does not match the
    ///   declared type.
    /// - `AlreadyDeclared` if the scope already binds the name.
    fn execute_var(&mut self, name: &Token, ty: DeclaredType, initializer: &Expr) -> EvalResult<()> {
        let value = self.evaluate(initializer)?;

        if !value.matches(ty) {
            return Err(RuntimeError::DeclarationTypeMismatch { name: name.lexeme.clone(),
                                                               expected: ty,
                                                               found: value.type_name(),
                                                               line: name.line });
        }

        self.environment.define(&name.lexeme, Binding { ty, value }, name.line)
    }

    /// Runs a loop until its condition is falsy or its body breaks.
    ///
    /// A `return` inside the body leaves the loop and keeps unwinding.
    fn execute_while(&mut self, condition: &Expr, body: &Stmt) -> EvalResult<Flow> {
        let mut iteration = 0_usize;

        while self.evaluate(condition)?.is_truthy() {
            iteration += 1;
            tracing::trace!(iteration, "loop iteration");

            match self.execute(body)? {
                Flow::Normal => {},
                Flow::Break { .. } => break,
                flow @ Flow::Return { .. } => return Ok(flow),
            }
        }

        Ok(Flow::Normal)
    }

    /// Binds a function declaration to its name in the innermost scope.
    fn execute_function(&mut self, decl: &Rc<FunctionDecl>) -> EvalResult<()> {
        let value = Value::Callable(Rc::new(Callable::User(Rc::clone(decl))));

        self.environment.define(&decl.name.lexeme,
                                Binding { ty: DeclaredType::Callable,
                                          value },
                                decl.name.line)
    }
}
