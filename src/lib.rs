//! # minijs
//!
//! minijs is a small JavaScript-flavoured scripting language written in Rust.
//! It tokenizes, parses and executes programs made of `let`/`const`
//! declarations, `if`/`else` statements, blocks and expressions over numbers,
//! strings, booleans and `null`.
//!
//! Every phase reports what it finds instead of stopping at the first problem,
//! and [`run`] returns the output of all of them at once: tokens, syntax tree,
//! diagnostics and the final state of the program's variables.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use serde::Serialize;

use crate::{
    ast::Statement,
    error::{Diagnostic, Phase, Traced},
    interpreter::{
        evaluator::core::{ExecutionResult, Interpreter},
        lexer::{Token, tokenize},
        parser::{ParseOptions, parse_with},
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums that represent the
/// syntactic structure of source code as a tree. The AST is built by the
/// parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source lines to AST nodes for error reporting.
/// - Serializes trees with each node tagged by its kind.
pub mod ast;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// This module defines all errors that can be raised while running code,
/// together with the diagnostic records the lexer and parser report through.
///
/// # Responsibilities
/// - Defines one error enum per phase, each carrying its source line.
/// - Converts errors into phase-tagged diagnostics.
/// - Provides diagnostic sinks, including one that logs through `tracing`.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations and scoping to provide a complete runtime for source code.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, environment
///   and value types.
/// - Provides entry points for each phase on its own.
pub mod interpreter;

/// Settings for a full pipeline run.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Parser limits.
    pub parse:                   ParseOptions,
    /// Execute the statements that did parse even if the parser reported
    /// errors.
    pub execute_on_syntax_error: bool,
}

/// The first problem that kept a run from succeeding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    /// The phase the problem was found in.
    pub phase:   Phase,
    /// The problem's message.
    pub message: String,
}

/// Everything a pipeline run produced.
///
/// Tokens and statements are always filled in with whatever the lexer and
/// parser produced, whether or not the program later ran.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// Tokens produced by the lexer, ending with end-of-input.
    pub tokens:      Vec<Token>,
    /// Statements produced by the parser.
    #[serde(rename = "ast")]
    pub statements:  Vec<Statement>,
    /// Lexer and parser diagnostics in the order they were reported.
    pub diagnostics: Vec<Diagnostic>,
    /// Outcome of executing the program; `None` if it was not executed.
    pub execution:   Option<ExecutionResult>,
    /// The first unresolved failure, if any.
    pub failure:     Option<Failure>,
}

impl RunReport {
    /// True if nothing went wrong in any phase.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.failure.is_none()
    }

    /// The line to show as the program's output: the success message or the
    /// failure that stopped the run.
    #[must_use]
    pub fn output(&self) -> &str {
        match (&self.failure, &self.execution) {
            (Some(failure), _) => &failure.message,
            (None, Some(execution)) => &execution.message,
            (None, None) => "",
        }
    }
}

/// Runs `source` through every phase with default options.
///
/// # Examples
/// ```
/// use minijs::run;
///
/// let report = run("let x = 10;\nlet y = 5;\nif (x > y) { x = x + y; }");
/// assert!(report.succeeded());
///
/// let globals = &report.execution.unwrap().final_environment;
/// assert_eq!(globals.variable("x"), Some("15"));
///
/// // A syntax error stops the program from running.
/// let report = run("let = 1;");
/// assert!(!report.succeeded());
/// assert!(report.execution.is_none());
/// ```
#[must_use]
pub fn run(source: &str) -> RunReport {
    run_with(source, &RunOptions::default())
}

/// Runs `source` through every phase.
///
/// Lexing and parsing always complete, collecting diagnostics. The program is
/// executed unless the parser reported an error and
/// [`RunOptions::execute_on_syntax_error`] is not set; lexer diagnostics alone
/// never prevent execution. Each run uses a fresh [`Interpreter`], so runs
/// share no state.
///
/// The reported failure is the first parser diagnostic if there is one, then
/// the runtime error if execution stopped on one, then the first lexer
/// diagnostic.
#[must_use]
pub fn run_with(source: &str, options: &RunOptions) -> RunReport {
    let mut sink = Traced::new(Vec::<Diagnostic>::new());
    let tokens = tokenize(source, &mut sink);
    let statements = parse_with(&tokens, options.parse, &mut sink);
    let diagnostics = sink.into_inner();

    let syntax_error = diagnostics.iter().find(|d| d.phase == Phase::Parse);

    let execution = if syntax_error.is_none() || options.execute_on_syntax_error {
        Some(Interpreter::new().interpret(&statements))
    } else {
        tracing::debug!("skipping execution after syntax errors");
        None
    };

    let runtime_error = execution.as_ref()
                                 .and_then(|e| e.error.as_ref())
                                 .map(Diagnostic::from);

    let failure = syntax_error.or(runtime_error.as_ref())
                              .or_else(|| diagnostics.first())
                              .map(failure_from);

    RunReport { tokens,
                statements,
                diagnostics,
                execution,
                failure }
}

fn failure_from(diagnostic: &Diagnostic) -> Failure {
    Failure { phase:   diagnostic.phase,
              message: diagnostic.message.clone(), }
}
