/// Binary operator evaluation logic.
///
/// Handles arithmetic, string concatenation, ordering comparisons and
/// equality, plus the short-circuiting logical operators.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation and logical NOT.
pub mod unary;

/// Core evaluation logic and interpreter state.
///
/// Contains the main expression evaluator, the interpreter that owns the
/// global environment, and the result reported after running a program.
pub mod core;

/// Statement execution.
///
/// Runs declarations, conditionals, blocks and expression statements,
/// entering and leaving scopes as blocks are executed.
pub mod statement;
