use crate::{
    ast::{Expr, Statement},
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::Value,
    },
};

impl Interpreter {
    /// Executes a single statement.
    ///
    /// - Declarations bind a name in the current scope, to `null` when no
    ///   initializer is given. `let` and `const` behave the same.
    /// - `if` runs its `then` branch when the condition is truthy, otherwise
    ///   the `else` branch if there is one.
    /// - Blocks run in a fresh child scope.
    /// - Expression statements are evaluated and their value discarded.
    ///
    /// # Errors
    /// Any [`RuntimeError`](crate::error::RuntimeError) raised by the
    /// statement's expressions.
    pub fn execute(&mut self, statement: &Statement) -> EvalResult<()> {
        tracing::trace!(line = statement.line_number(), "executing statement");

        match statement {
            Statement::Expression { expr, .. } => self.eval(expr).map(drop),
            Statement::VariableDeclaration { name, initializer, .. } => {
                self.execute_declaration(name, initializer.as_ref())
            },
            Statement::If { condition,
                            then_branch,
                            else_branch,
                            .. } => {
                if self.eval(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(())
                }
            },
            Statement::Block { statements, .. } => self.execute_block(statements),
        }
    }

    fn execute_declaration(&mut self, name: &str, initializer: Option<&Expr>) -> EvalResult<()> {
        let value = match initializer {
            Some(expr) => self.eval(expr)?,
            None => Value::Null,
        };
        self.environment_mut().define(name, value);
        Ok(())
    }

    /// Runs `statements` in a new child scope.
    ///
    /// The enclosing scope is made current again before returning, whether the
    /// block finished or stopped on an error.
    fn execute_block(&mut self, statements: &[Statement]) -> EvalResult<()> {
        self.environment_mut().push_scope();
        let outcome = statements.iter().try_for_each(|statement| self.execute(statement));
        self.environment_mut().pop_scope();
        outcome
    }
}
