/// The environment module stores variable bindings by scope.
///
/// Scopes form a chain from the innermost block out to the global scope.
/// Declarations always bind in the innermost scope, while lookups and
/// assignments search outward.
///
/// # Responsibilities
/// - Defines the scope arena and the `ScopeId` links between scopes.
/// - Reports assignments to names that were never declared.
/// - Produces display snapshots of the scope chain.
pub mod environment;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, executes statements in order, evaluates
/// expressions and manages variable state. It is the core execution engine of
/// the interpreter.
///
/// # Responsibilities
/// - Evaluates every expression and statement kind.
/// - Opens and closes block scopes.
/// - Reports runtime errors such as undefined variables or division by zero.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as numbers,
/// strings, identifiers, operators, delimiters, and keywords. This is the first
/// stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with kind, lexeme and
///   source line.
/// - Decodes numeric and string literals.
/// - Reports lexical errors without stopping.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// an AST that represents the syntactic structure of expressions and
/// statements.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Reports syntax errors with location info and recovers from them.
/// - Bounds how deeply input may nest.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// Values are numbers, strings, booleans and `null`. This module defines how
/// they print, how they convert to booleans and when two of them are equal.
pub mod value;
