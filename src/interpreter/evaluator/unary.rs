use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::Value,
    },
};

impl Interpreter {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Negate`: numeric negation; any other operand is an error.
    /// - `Not`: the negated truthiness of any value.
    ///
    /// # Parameters
    /// - `op`: Unary operator.
    /// - `value`: Input value.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The computed `Value` wrapped in `EvalResult`.
    ///
    /// # Example
    /// ```
    /// use minijs::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::Value},
    /// };
    ///
    /// let v = Interpreter::eval_unary(UnaryOperator::Negate, &Value::Number(5.0), 1).unwrap();
    /// assert_eq!(v, Value::Number(-5.0));
    ///
    /// let v = Interpreter::eval_unary(UnaryOperator::Not, &Value::from(""), 1).unwrap();
    /// assert_eq!(v, Value::Bool(true));
    ///
    /// assert!(Interpreter::eval_unary(UnaryOperator::Negate, &Value::from("5"), 1).is_err());
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value, line: usize) -> EvalResult<Value> {
        match op {
            UnaryOperator::Negate => value.as_number()
                                          .map(|n| Value::Number(-n))
                                          .ok_or(RuntimeError::ExpectedNumber { line }),
            UnaryOperator::Not => Ok(Value::Bool(!value.is_truthy())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negating_non_numbers_fails() {
        for value in [Value::Null, Value::Bool(true), Value::from("1")] {
            assert_eq!(Interpreter::eval_unary(UnaryOperator::Negate, &value, 4),
                       Err(RuntimeError::ExpectedNumber { line: 4 }));
        }
    }

    #[test]
    fn not_follows_truthiness() {
        let not = |v: Value| Interpreter::eval_unary(UnaryOperator::Not, &v, 1);
        assert_eq!(not(Value::Null), Ok(Value::Bool(true)));
        assert_eq!(not(Value::Number(0.0)), Ok(Value::Bool(true)));
        assert_eq!(not(Value::from("0")), Ok(Value::Bool(false)));
        assert_eq!(not(Value::Number(-1.0)), Ok(Value::Bool(false)));
    }

    #[test]
    fn error_message_names_the_line() {
        let error = Interpreter::eval_unary(UnaryOperator::Negate, &Value::Null, 7).unwrap_err();
        assert_eq!(error.to_string(), "Error on line 7: Operand must be a number.");
    }
}
