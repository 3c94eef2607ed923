use thiserror::Error;

use crate::ast::BinaryOperator;

/// Represents all errors that can occur during evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Read of, or assignment to, a name with no binding in any enclosing
    /// scope.
    #[error("Error on line {line}: Undefined variable '{name}'.")]
    UndefinedVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Unary minus applied to something other than a number.
    #[error("Error on line {line}: Operand must be a number.")]
    ExpectedNumber {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Arithmetic or comparison with a non-numeric operand.
    #[error("Error on line {line}: Operands must be numbers.")]
    ExpectedNumbers {
        /// The operator that was applied.
        operator: BinaryOperator,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// `+` with neither two numbers nor at least one string.
    #[error("Error on line {line}: Operands must be numbers or strings.")]
    ExpectedNumbersOrStrings {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted division by zero.
    #[error("Error on line {line}: Division by zero.")]
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl RuntimeError {
    /// The source line where the error occurred.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UndefinedVariable { line, .. }
            | Self::ExpectedNumber { line }
            | Self::ExpectedNumbers { line, .. }
            | Self::ExpectedNumbersOrStrings { line }
            | Self::DivisionByZero { line } => *line,
        }
    }
}
