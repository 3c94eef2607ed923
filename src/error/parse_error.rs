use thiserror::Error;

/// Represents all errors that can occur during parsing.
///
/// Messages name the offending token the same way for every variant:
/// `at 'lexeme'` for a real token and `at end` once the input is exhausted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Found a token other than the one the grammar requires.
    #[error("Error on line {line} at '{lexeme}': {message}")]
    UnexpectedToken {
        /// The lexeme of the token encountered.
        lexeme:  String,
        /// What the parser expected instead.
        message: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Reached the end of input while the grammar still required a token.
    #[error("Error on line {line} at end: {message}")]
    UnexpectedEndOfInput {
        /// What the parser expected instead.
        message: String,
        /// The source line of the last token.
        line:    usize,
    },
    /// The left-hand side of `=` is not a plain variable.
    #[error("Error on line {line} at '=': Invalid assignment target.")]
    InvalidAssignmentTarget {
        /// The source line of the `=` token.
        line: usize,
    },
    /// Statements or expressions nested deeper than the configured maximum.
    #[error("Error on line {line}: Nesting too deep (maximum is {max}).")]
    NestingTooDeep {
        /// The configured maximum depth.
        max:  usize,
        /// The source line where the limit was hit.
        line: usize,
    },
}

impl ParseError {
    /// The source line where the error occurred.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnexpectedToken { line, .. }
            | Self::UnexpectedEndOfInput { line, .. }
            | Self::InvalidAssignmentTarget { line }
            | Self::NestingTooDeep { line, .. } => *line,
        }
    }
}
