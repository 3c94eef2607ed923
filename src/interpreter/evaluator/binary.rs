use crate::{
    ast::{BinaryOperator, Expr, LogicalOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::Value,
    },
};

impl Interpreter {
    /// Evaluates a binary operation on two already evaluated operands.
    ///
    /// - `+` adds two numbers. If either operand is a string, the other one is
    ///   converted to its text form and the two are concatenated. Any other
    ///   combination is an error.
    /// - `-`, `*` and `/` require two numbers; dividing by zero is an error.
    /// - `<`, `<=`, `>` and `>=` require two numbers.
    /// - `==` and `!=` accept anything and never convert between kinds.
    ///
    /// # Parameters
    /// - `op`: Binary operator.
    /// - `left`, `right`: Operand values.
    /// - `line`: Line number for error reporting.
    ///
    /// # Example
    /// ```
    /// use minijs::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::Value},
    /// };
    ///
    /// let sum = Interpreter::eval_binary(BinaryOperator::Add,
    ///                                    &Value::from("a"),
    ///                                    &Value::Number(1.0),
    ///                                    1).unwrap();
    /// assert_eq!(sum, Value::from("a1"));
    ///
    /// let eq = Interpreter::eval_binary(BinaryOperator::Equal,
    ///                                   &Value::Number(1.0),
    ///                                   &Value::from("1"),
    ///                                   1).unwrap();
    /// assert_eq!(eq, Value::Bool(false));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        use BinaryOperator::{
            Add, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Sub,
        };

        match op {
            Add => Self::eval_add(left, right, line),
            Equal => Ok(Value::Bool(left.is_equal(right))),
            NotEqual => Ok(Value::Bool(!left.is_equal(right))),
            Sub | Mul | Div | Less | Greater | LessEqual | GreaterEqual => {
                let (Some(a), Some(b)) = (left.as_number(), right.as_number()) else {
                    return Err(RuntimeError::ExpectedNumbers { operator: op,
                                                               line });
                };
                Ok(match op {
                    Sub => Value::Number(a - b),
                    Mul => Value::Number(a * b),
                    Div if b == 0.0 => return Err(RuntimeError::DivisionByZero { line }),
                    Div => Value::Number(a / b),
                    Less => Value::Bool(a < b),
                    Greater => Value::Bool(a > b),
                    LessEqual => Value::Bool(a <= b),
                    _ => Value::Bool(a >= b),
                })
            },
        }
    }

    fn eval_add(left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
        match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::String(_), _) | (_, Value::String(_)) => {
                Ok(Value::String(format!("{left}{right}")))
            },
            _ => Err(RuntimeError::ExpectedNumbersOrStrings { line }),
        }
    }

    /// Evaluates `&&` or `||` with short-circuiting.
    ///
    /// The left operand is always evaluated. `||` returns it when truthy and
    /// `&&` returns it when falsy; otherwise the right operand is evaluated and
    /// returned. The result is an operand value, not a boolean.
    ///
    /// # Errors
    /// Any error from evaluating an operand that had to be evaluated.
    pub(crate) fn eval_logical(&mut self,
                               left: &Expr,
                               op: LogicalOperator,
                               right: &Expr)
                               -> EvalResult<Value> {
        let left = self.eval(left)?;
        let decided = match op {
            LogicalOperator::Or => left.is_truthy(),
            LogicalOperator::And => !left.is_truthy(),
        };

        if decided { Ok(left) } else { self.eval(right) }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::interpreter::{lexer::tokenize, parser::parse};

    fn binary(op: BinaryOperator, left: impl Into<Value>, right: impl Into<Value>) -> EvalResult<Value> {
        Interpreter::eval_binary(op, &left.into(), &right.into(), 1)
    }

    fn eval_source(source: &str) -> EvalResult<Value> {
        let mut diagnostics: Vec<crate::error::Diagnostic> = Vec::new();
        let tokens = tokenize(source, &mut diagnostics);
        let program = parse(&tokens, &mut diagnostics);
        let mut interpreter = Interpreter::new();
        match program.as_slice() {
            [crate::ast::Statement::Expression { expr, .. }] => interpreter.eval(expr),
            other => panic!("expected one expression statement, got {other:?}"),
        }
    }

    #[test]
    fn arithmetic_on_numbers() {
        assert_eq!(binary(BinaryOperator::Add, 2.0, 3.0), Ok(Value::Number(5.0)));
        assert_eq!(binary(BinaryOperator::Sub, 2.0, 3.0), Ok(Value::Number(-1.0)));
        assert_eq!(binary(BinaryOperator::Mul, 2.5, 4.0), Ok(Value::Number(10.0)));
        assert_eq!(binary(BinaryOperator::Div, 1.0, 4.0), Ok(Value::Number(0.25)));
    }

    #[test]
    fn division_by_zero_fails() {
        assert_eq!(binary(BinaryOperator::Div, 1.0, 0.0),
                   Err(RuntimeError::DivisionByZero { line: 1 }));
        assert_eq!(binary(BinaryOperator::Div, 0.0, -0.0),
                   Err(RuntimeError::DivisionByZero { line: 1 }));
    }

    #[test]
    fn plus_concatenates_when_either_side_is_a_string() {
        assert_eq!(binary(BinaryOperator::Add, "a", 1.0), Ok(Value::from("a1")));
        assert_eq!(binary(BinaryOperator::Add, 2.5, "b"), Ok(Value::from("2.5b")));
        assert_eq!(binary(BinaryOperator::Add, "x", true), Ok(Value::from("xtrue")));
        assert_eq!(binary(BinaryOperator::Add, Value::Null, "!"), Ok(Value::from("null!")));
    }

    #[test]
    fn plus_rejects_other_combinations() {
        assert_eq!(binary(BinaryOperator::Add, true, 1.0),
                   Err(RuntimeError::ExpectedNumbersOrStrings { line: 1 }));
        assert_eq!(binary(BinaryOperator::Add, Value::Null, Value::Null),
                   Err(RuntimeError::ExpectedNumbersOrStrings { line: 1 }));
    }

    #[test]
    fn arithmetic_and_ordering_require_numbers() {
        for op in [BinaryOperator::Sub,
                   BinaryOperator::Mul,
                   BinaryOperator::Div,
                   BinaryOperator::Less,
                   BinaryOperator::GreaterEqual]
        {
            let error = binary(op, "1", 1.0).unwrap_err();
            assert_eq!(error.to_string(), "Error on line 1: Operands must be numbers.");
        }
    }

    #[test]
    fn comparisons() {
        assert_eq!(binary(BinaryOperator::Less, 1.0, 2.0), Ok(Value::Bool(true)));
        assert_eq!(binary(BinaryOperator::LessEqual, 2.0, 2.0), Ok(Value::Bool(true)));
        assert_eq!(binary(BinaryOperator::Greater, 1.0, 2.0), Ok(Value::Bool(false)));
        assert_eq!(binary(BinaryOperator::GreaterEqual, 3.0, 2.0), Ok(Value::Bool(true)));
    }

    #[test]
    fn equality_is_narrow() {
        assert_eq!(binary(BinaryOperator::Equal, Value::Null, Value::Null), Ok(Value::Bool(true)));
        assert_eq!(binary(BinaryOperator::Equal, Value::Null, 0.0), Ok(Value::Bool(false)));
        assert_eq!(binary(BinaryOperator::NotEqual, 1.0, "1"), Ok(Value::Bool(true)));
        assert_eq!(binary(BinaryOperator::Equal, "a", "a"), Ok(Value::Bool(true)));
    }

    #[test]
    fn logical_operators_return_deciding_operand() {
        assert_eq!(eval_source("0 || \"fallback\";"), Ok(Value::from("fallback")));
        assert_eq!(eval_source("\"first\" || 2;"), Ok(Value::from("first")));
        assert_eq!(eval_source("\"\" && 2;"), Ok(Value::from("")));
        assert_eq!(eval_source("1 && 2;"), Ok(Value::Number(2.0)));
    }

    #[test]
    fn logical_operators_short_circuit() {
        assert_eq!(eval_source("1 || missing;"), Ok(Value::Number(1.0)));
        assert_eq!(eval_source("0 && missing;"), Ok(Value::Number(0.0)));
        assert!(eval_source("1 && missing;").is_err());
    }

    #[test]
    fn operands_evaluate_left_to_right() {
        assert_eq!(eval_source("first + second;"),
                   Err(RuntimeError::UndefinedVariable { name: "first".to_string(),
                                                         line: 1, }));
    }
}
