use serde::Serialize;

use crate::error::{LexError, ParseError, RuntimeError};

/// The pipeline stage a problem was detected in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Tokenization.
    Lex,
    /// AST construction.
    Parse,
    /// Evaluation.
    Runtime,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lex => write!(f, "lex"),
            Self::Parse => write!(f, "parse"),
            Self::Runtime => write!(f, "runtime"),
        }
    }
}

/// A single reported problem, detached from the error type that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Where in the pipeline the problem was found.
    pub phase:   Phase,
    /// The source line the problem refers to.
    pub line:    usize,
    /// The full, human readable message.
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.phase, self.message)
    }
}

impl From<LexError> for Diagnostic {
    fn from(error: LexError) -> Self {
        Self { phase:   Phase::Lex,
               line:    error.line(),
               message: error.to_string(), }
    }
}

impl From<ParseError> for Diagnostic {
    fn from(error: ParseError) -> Self {
        Self { phase:   Phase::Parse,
               line:    error.line(),
               message: error.to_string(), }
    }
}

impl From<&RuntimeError> for Diagnostic {
    fn from(error: &RuntimeError) -> Self {
        Self { phase:   Phase::Runtime,
               line:    error.line(),
               message: error.to_string(), }
    }
}

/// Receives the diagnostics produced while lexing and parsing.
///
/// Neither phase aborts on a reported diagnostic; the sink decides what to do
/// with it.
///
/// # Example
/// ```
/// use minijs::{error::Diagnostic, interpreter::lexer::tokenize};
///
/// let mut diagnostics: Vec<Diagnostic> = Vec::new();
/// let tokens = tokenize("let a = 1 # 2;", &mut diagnostics);
///
/// assert_eq!(diagnostics.len(), 1);
/// assert_eq!(tokens.len(), 7);
/// ```
pub trait DiagnosticSink {
    /// Records one diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// A sink that logs every diagnostic through `tracing` before handing it on.
#[derive(Debug, Default)]
pub struct Traced<S> {
    inner: S,
}

impl<S: DiagnosticSink> Traced<S> {
    /// Wraps `inner`.
    pub const fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Returns the wrapped sink.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: DiagnosticSink> DiagnosticSink for Traced<S> {
    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(phase = %diagnostic.phase, line = diagnostic.line, "{}", diagnostic.message);
        self.inner.report(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn runtime_errors_become_runtime_diagnostics() {
        let error = RuntimeError::DivisionByZero { line: 3 };
        assert_eq!(Diagnostic::from(&error),
                   Diagnostic { phase:   Phase::Runtime,
                                line:    3,
                                message: "Error on line 3: Division by zero.".to_string(), });
    }

    #[test]
    fn display_prefixes_the_phase() {
        let diagnostic = Diagnostic::from(ParseError::NestingTooDeep { max: 4, line: 2 });
        assert_eq!(diagnostic.to_string(),
                   "[parse] Error on line 2: Nesting too deep (maximum is 4).");
    }
}
