use thiserror::Error;

/// Represents all errors that can occur during lexing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A character that does not start any token.
    #[error("Error on line {line}: Unexpected character '{lexeme}'.")]
    UnexpectedCharacter {
        /// The rejected input.
        lexeme: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// A string literal whose closing quote never appears.
    #[error("Error on line {line}: Unterminated string.")]
    UnterminatedString {
        /// The source line where the string starts.
        line: usize,
    },
}

impl LexError {
    /// The source line where the error occurred.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { line, .. } | Self::UnterminatedString { line } => *line,
        }
    }
}
