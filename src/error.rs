/// Diagnostic records and sinks.
///
/// The lexer and parser never stop at the first problem. Instead they report
/// each one as a [`Diagnostic`] into a [`DiagnosticSink`] chosen by the caller
/// and keep going.
pub mod diagnostic;
/// Lexing errors.
///
/// Unexpected characters and unterminated string literals. Both are reported
/// and scanning resumes right after the rejected input.
pub mod lex_error;
/// Parsing errors.
///
/// Defines the syntax errors detected while building the AST: missing
/// delimiters, missing expressions, invalid assignment targets and excessive
/// nesting.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation. Any of them
/// aborts the remainder of the program.
pub mod runtime_error;

pub use diagnostic::{Diagnostic, DiagnosticSink, Phase, Traced};
pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
