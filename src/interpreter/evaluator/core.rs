use serde::Serialize;

use crate::{
    ast::{Expr, Statement},
    error::RuntimeError,
    interpreter::{
        environment::{Environment, EnvironmentSnapshot},
        value::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Message reported when every statement ran to completion.
pub const SUCCESS_MESSAGE: &str = "Program executed successfully.";

/// Outcome of running a program.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionResult {
    /// Whether every statement ran without a runtime error.
    pub succeeded:         bool,
    /// [`SUCCESS_MESSAGE`] or the runtime error's message.
    pub message:           String,
    /// Bindings visible once execution stopped, successful or not.
    pub final_environment: EnvironmentSnapshot,
    /// The error that stopped execution, if any.
    #[serde(skip)]
    pub error:             Option<RuntimeError>,
}

/// Tree-walking interpreter.
///
/// Owns a single [`Environment`] whose global scope is created once and never
/// replaced, so bindings persist across successive calls to
/// [`interpret`](Self::interpret).
///
/// ## Usage
///
/// ```
/// use minijs::{
///     error::Diagnostic,
///     interpreter::{evaluator::core::Interpreter, lexer::tokenize, parser::parse},
/// };
///
/// let mut diagnostics: Vec<Diagnostic> = Vec::new();
/// let tokens = tokenize("let s = \"a\" + 1;", &mut diagnostics);
/// let program = parse(&tokens, &mut diagnostics);
///
/// let mut interpreter = Interpreter::new();
/// let result = interpreter.interpret(&program);
///
/// assert!(result.succeeded);
/// assert_eq!(result.final_environment.variable("s"), Some("\"a1\""));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    environment: Environment,
}

impl Interpreter {
    /// Creates an interpreter with an empty global scope.
    #[must_use]
    pub fn new() -> Self {
        Self { environment: Environment::new() }
    }

    /// The live environment, for inspection between runs.
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Executes `statements` in order.
    ///
    /// The first runtime error stops execution; effects of the statements
    /// that already ran are kept and show up in the final environment.
    ///
    /// # Parameters
    /// - `statements`: The program to run.
    ///
    /// # Returns
    /// An [`ExecutionResult`] describing the outcome. This never fails; a
    /// runtime error is reported through the result instead.
    pub fn interpret(&mut self, statements: &[Statement]) -> ExecutionResult {
        let outcome = statements.iter().try_for_each(|statement| self.execute(statement));

        match outcome {
            Ok(()) => {
                tracing::debug!(statements = statements.len(), "program executed");
                ExecutionResult { succeeded:         true,
                                  message:           SUCCESS_MESSAGE.to_string(),
                                  final_environment: self.environment.snapshot(),
                                  error:             None, }
            },
            Err(error) => {
                tracing::debug!(%error, "program aborted");
                ExecutionResult { succeeded:         false,
                                  message:           error.to_string(),
                                  final_environment: self.environment.snapshot(),
                                  error:             Some(error), }
            },
        }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The evaluator
    /// dispatches on the expression variant: literals, groupings, variables,
    /// assignments, unary, binary and logical operations.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// The value of the expression.
    ///
    /// # Errors
    /// Any [`RuntimeError`] raised while evaluating `expr` or its operands.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Grouping { inner, .. } => self.eval(inner),
            Expr::Variable { name, line } => self.eval_variable(name, *line),
            Expr::Assign { name, value, line } => self.eval_assign(name, value, *line),
            Expr::Unary { operator,
                          operand,
                          line, } => {
                let operand = self.eval(operand)?;
                Self::eval_unary(*operator, &operand, *line)
            },
            Expr::Binary { left,
                           operator,
                           right,
                           line, } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Self::eval_binary(*operator, &left, &right, *line)
            },
            Expr::Logical { left,
                            operator,
                            right,
                            .. } => self.eval_logical(left, *operator, right),
        }
    }

    /// Reads a variable, searching from the current scope outward.
    ///
    /// # Errors
    /// `UndefinedVariable` if no scope binds `name`.
    fn eval_variable(&self, name: &str, line: usize) -> EvalResult<Value> {
        self.environment
            .get(name)
            .cloned()
            .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_string(),
                                                             line })
    }

    /// Assigns to the nearest existing binding of `name`.
    ///
    /// # Returns
    /// The assigned value.
    ///
    /// # Errors
    /// `UndefinedVariable` if `name` was never declared. The value expression
    /// is evaluated first, so its own errors take precedence.
    fn eval_assign(&mut self, name: &str, value: &Expr, line: usize) -> EvalResult<Value> {
        let value = self.eval(value)?;
        self.environment
            .assign(name, value.clone())
            .map_err(|_| RuntimeError::UndefinedVariable { name: name.to_string(),
                                                           line })?;
        Ok(value)
    }

    pub(crate) const fn environment_mut(&mut self) -> &mut Environment {
        &mut self.environment
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::interpreter::{lexer::tokenize, parser::parse};

    fn run(interpreter: &mut Interpreter, source: &str) -> ExecutionResult {
        let mut diagnostics: Vec<crate::error::Diagnostic> = Vec::new();
        let tokens = tokenize(source, &mut diagnostics);
        let program = parse(&tokens, &mut diagnostics);
        assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics:?}");
        interpreter.interpret(&program)
    }

    #[test]
    fn empty_program_succeeds() {
        let result = Interpreter::new().interpret(&[]);
        assert!(result.succeeded);
        assert_eq!(result.message, SUCCESS_MESSAGE);
        assert!(result.final_environment.variables.is_empty());
    }

    #[test]
    fn bindings_persist_between_runs() {
        let mut interpreter = Interpreter::new();
        run(&mut interpreter, "let x = 1;");
        let result = run(&mut interpreter, "x = x + 1;");
        assert!(result.succeeded);
        assert_eq!(interpreter.environment().get("x"), Some(&Value::Number(2.0)));
    }

    #[test]
    fn reading_undefined_variable_fails() {
        let result = run(&mut Interpreter::new(), "let a = 1;\nlet b = a + c;");
        assert!(!result.succeeded);
        assert_eq!(result.message, "Error on line 2: Undefined variable 'c'.");
        assert_eq!(result.error,
                   Some(RuntimeError::UndefinedVariable { name: "c".to_string(),
                                                          line: 2, }));
        assert_eq!(result.final_environment.variable("a"), Some("1"));
        assert_eq!(result.final_environment.variable("b"), None);
    }

    #[test]
    fn assignment_to_undeclared_name_creates_nothing() {
        let result = run(&mut Interpreter::new(), "x = 1;");
        assert!(!result.succeeded);
        assert_eq!(result.message, "Error on line 1: Undefined variable 'x'.");
        assert!(result.final_environment.variables.is_empty());
        assert!(result.final_environment.enclosing.is_none());
    }

    #[test]
    fn assignment_evaluates_to_assigned_value() {
        let result = run(&mut Interpreter::new(), "let a; let b; a = b = \"v\";");
        assert_eq!(result.final_environment.variable("a"), Some("\"v\""));
        assert_eq!(result.final_environment.variable("b"), Some("\"v\""));
    }

    #[test]
    fn failure_keeps_earlier_effects() {
        let result = run(&mut Interpreter::new(), "let x = 1; x = 2; x = x / 0; x = 3;");
        assert!(!result.succeeded);
        assert_eq!(result.message, "Error on line 1: Division by zero.");
        assert_eq!(result.final_environment.variable("x"), Some("2"));
    }

    #[test]
    fn result_serializes_without_error_field() {
        let result = run(&mut Interpreter::new(), "let n;");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["succeeded"], true);
        assert_eq!(json["final_environment"]["variables"]["n"], "null");
        assert!(json.get("error").is_none());
    }
}
