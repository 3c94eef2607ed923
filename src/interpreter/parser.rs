use crate::{
    ast::Statement,
    error::{Diagnostic, DiagnosticSink},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{core::Parser, statement::parse_declaration},
    },
};

/// Core parsing machinery.
///
/// Holds the token cursor, the nesting guard, error construction and
/// panic-mode recovery shared by every grammar rule.
pub mod core;

/// Unary operator and primary expression parsing.
///
/// Handles prefix `-` and `!`, literals, variable references and
/// parenthesized groupings.
pub mod unary;

/// Binary operator parsing.
///
/// Implements every left-associative precedence level from logical or down to
/// multiplication, plus right-associative assignment.
pub mod binary;

/// Statement parsing.
///
/// Declarations, `if` statements, blocks and expression statements, including
/// recovery at each declaration boundary.
pub mod statement;

/// Default limit on nested statements and expressions.
///
/// Statements, expressions, prefix operators, assignment right-hand sides and
/// every operator of a chain each count as one level. A parenthesis level is
/// the most expensive of these to parse, and this many of them fit on a
/// thread with the default 2 MiB stack.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Tunable parser limits.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest nesting of statements and expressions accepted before
    /// reporting an error.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}

/// Parses a token sequence into a program using the default options.
///
/// See [`parse_with`].
///
/// # Example
/// ```
/// use minijs::{
///     error::Diagnostic,
///     interpreter::{lexer::tokenize, parser::parse},
/// };
///
/// let mut diagnostics: Vec<Diagnostic> = Vec::new();
/// let tokens = tokenize("let = 5; let y = 2;", &mut diagnostics);
/// let program = parse(&tokens, &mut diagnostics);
///
/// assert_eq!(program.len(), 1);
/// assert_eq!(diagnostics.len(), 1);
/// ```
pub fn parse(tokens: &[Token], sink: &mut dyn DiagnosticSink) -> Vec<Statement> {
    parse_with(tokens, ParseOptions::default(), sink)
}

/// Parses a token sequence into a program.
///
/// Grammar: `program := declaration* EOF`
///
/// Parsing never gives up. A malformed declaration is reported to `sink`, the
/// parser skips to the next likely declaration start and carries on, so the
/// result holds every statement that parsed. A sequence missing its final
/// end-of-input token is treated as if it had one.
///
/// # Parameters
/// - `tokens`: Tokens produced by the lexer.
/// - `options`: Parser limits.
/// - `sink`: Receives one diagnostic per syntax error.
///
/// # Returns
/// The top-level statements in source order.
pub fn parse_with(tokens: &[Token], options: ParseOptions, sink: &mut dyn DiagnosticSink) -> Vec<Statement> {
    let terminated;
    let tokens = if tokens.last().is_some_and(|t| t.kind == TokenKind::Eof) {
        tokens
    } else {
        let line = tokens.last().map_or(1, |t| t.line);
        terminated = tokens.iter()
                           .cloned()
                           .chain(std::iter::once(Token::eof(line)))
                           .collect::<Vec<_>>();
        &terminated
    };

    let mut parser = Parser::new(tokens, options);
    let mut statements = Vec::new();
    while !parser.is_at_end() {
        if let Some(statement) = parse_declaration(&mut parser) {
            statements.push(statement);
        }
    }

    let errors = parser.into_errors();
    tracing::debug!(statements = statements.len(), errors = errors.len(), "parsed program");
    for error in errors {
        sink.report(Diagnostic::from(error));
    }

    statements
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        ast::{BinaryOperator, DeclarationKind, Expr, LogicalOperator, UnaryOperator},
        interpreter::lexer::tokenize,
    };

    fn parse_source(source: &str) -> (Vec<Statement>, Vec<Diagnostic>) {
        parse_source_with(source, ParseOptions::default())
    }

    fn parse_source_with(source: &str, options: ParseOptions) -> (Vec<Statement>, Vec<Diagnostic>) {
        let mut diagnostics = Vec::new();
        let tokens = tokenize(source, &mut diagnostics);
        let program = parse_with(&tokens, options, &mut diagnostics);
        (program, diagnostics)
    }

    fn messages(diagnostics: &[Diagnostic]) -> Vec<&str> {
        diagnostics.iter().map(|d| d.message.as_str()).collect()
    }

    fn single_expr(source: &str) -> Expr {
        let (program, diagnostics) = parse_source(source);
        assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics:?}");
        match program.as_slice() {
            [Statement::Expression { expr, .. }] => expr.clone(),
            other => panic!("expected one expression statement, got {other:?}"),
        }
    }

    fn number(n: f64) -> Expr {
        Expr::Literal { value: n.into(),
                        line:  1, }
    }

    fn variable(name: &str) -> Expr {
        Expr::Variable { name: name.to_string(),
                         line: 1, }
    }

    fn binary(left: Expr, operator: BinaryOperator, right: Expr) -> Expr {
        Expr::Binary { left: Box::new(left),
                       operator,
                       right: Box::new(right),
                       line: 1 }
    }

    #[test]
    fn empty_program() {
        let (program, diagnostics) = parse_source("");
        assert!(program.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn missing_eof_is_tolerated() {
        let tokens = vec![Token { kind:    TokenKind::Number,
                                  lexeme:  "1".to_string(),
                                  literal: Some(crate::interpreter::lexer::Literal::Number(1.0)),
                                  line:    1, },
                          Token::new(TokenKind::Semicolon, ";", 1)];
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let program = parse(&tokens, &mut diagnostics);
        assert_eq!(program.len(), 1);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn variable_declarations() {
        let (program, _) = parse_source("let x = 10;\nconst y;");
        assert_eq!(program,
                   vec![Statement::VariableDeclaration { name:        "x".to_string(),
                                                         kind:        DeclarationKind::Let,
                                                         initializer: Some(number(10.0)),
                                                         line:        1, },
                        Statement::VariableDeclaration { name:        "y".to_string(),
                                                         kind:        DeclarationKind::Const,
                                                         initializer: None,
                                                         line:        2, }]);
    }

    #[test]
    fn precedence_multiplication_binds_tighter() {
        assert_eq!(single_expr("1 + 2 * 3;"),
                   binary(number(1.0),
                          BinaryOperator::Add,
                          binary(number(2.0), BinaryOperator::Mul, number(3.0))));
    }

    #[test]
    fn binary_levels_fold_left() {
        assert_eq!(single_expr("1 - 2 - 3;"),
                   binary(binary(number(1.0), BinaryOperator::Sub, number(2.0)),
                          BinaryOperator::Sub,
                          number(3.0)));
    }

    #[test]
    fn comparison_binds_tighter_than_equality() {
        assert_eq!(single_expr("a < b == b > a;"),
                   binary(binary(variable("a"), BinaryOperator::Less, variable("b")),
                          BinaryOperator::Equal,
                          binary(variable("b"), BinaryOperator::Greater, variable("a"))));
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let expr = single_expr("a || b && c;");
        let Expr::Logical { operator, right, .. } = expr else {
            panic!("expected logical expression");
        };
        assert_eq!(operator, LogicalOperator::Or);
        assert!(matches!(*right, Expr::Logical { operator: LogicalOperator::And, .. }));
    }

    #[test]
    fn assignment_is_right_associative() {
        let expr = single_expr("a = b = 3;");
        assert_eq!(expr,
                   Expr::Assign { name:  "a".to_string(),
                                  value: Box::new(Expr::Assign { name:  "b".to_string(),
                                                                 value: Box::new(number(3.0)),
                                                                 line:  1, }),
                                  line:  1, });
    }

    #[test]
    fn unary_operators_nest() {
        assert_eq!(single_expr("!-x;"),
                   Expr::Unary { operator: UnaryOperator::Not,
                                 operand:  Box::new(Expr::Unary { operator: UnaryOperator::Negate,
                                                                  operand:  Box::new(variable("x")),
                                                                  line:     1, }),
                                 line:     1, });
    }

    #[test]
    fn grouping_overrides_precedence() {
        assert_eq!(single_expr("(1 + 2) * 3;"),
                   binary(Expr::Grouping { inner: Box::new(binary(number(1.0),
                                                                  BinaryOperator::Add,
                                                                  number(2.0))),
                                           line:  1, },
                          BinaryOperator::Mul,
                          number(3.0)));
    }

    #[test]
    fn if_else_with_blocks() {
        let (program, diagnostics) = parse_source("if (x > y) {\n  x = 1;\n} else y = 2;");
        assert!(diagnostics.is_empty());
        let [Statement::If { then_branch, else_branch, line, .. }] = program.as_slice() else {
            panic!("expected a single if statement");
        };
        assert_eq!(*line, 1);
        assert!(matches!(**then_branch, Statement::Block { ref statements, .. } if statements.len() == 1));
        assert!(matches!(else_branch.as_deref(), Some(Statement::Expression { line: 3, .. })));
    }

    #[test]
    fn dangling_else_binds_to_nearest_if() {
        let (program, _) = parse_source("if (a) if (b) x; else y;");
        let [Statement::If { then_branch, else_branch, .. }] = program.as_slice() else {
            panic!("expected a single if statement");
        };
        assert!(else_branch.is_none());
        assert!(matches!(**then_branch, Statement::If { else_branch: Some(_), .. }));
    }

    #[test]
    fn invalid_assignment_target_keeps_left_expression() {
        let (program, diagnostics) = parse_source("1 = 2;");
        assert_eq!(messages(&diagnostics),
                   vec!["Error on line 1 at '=': Invalid assignment target."]);
        assert_eq!(program,
                   vec![Statement::Expression { expr: number(1.0),
                                                line: 1, }]);
    }

    #[test]
    fn recovery_skips_to_next_declaration() {
        let (program, diagnostics) = parse_source("let = 5; let y = 2;");
        assert_eq!(messages(&diagnostics),
                   vec!["Error on line 1 at '=': Expected variable name."]);
        assert!(matches!(program.as_slice(),
                         [Statement::VariableDeclaration { name, .. }] if name == "y"));
    }

    #[test]
    fn recovery_inside_blocks() {
        let (program, diagnostics) = parse_source("{\n  let a = ;\n  let b = 1;\n}\nlet c = 2;");
        assert_eq!(messages(&diagnostics),
                   vec!["Error on line 2 at ';': Expected expression."]);
        assert_eq!(program.len(), 2);
        let Statement::Block { statements, .. } = &program[0] else {
            panic!("expected a block");
        };
        assert_eq!(statements.len(), 1);
    }

    #[test]
    fn missing_semicolon_at_end_of_input() {
        let (program, diagnostics) = parse_source("let x = 1");
        assert!(program.is_empty());
        assert_eq!(messages(&diagnostics),
                   vec!["Error on line 1 at end: Expected ';' after variable declaration."]);
    }

    #[test]
    fn unclosed_block_is_reported_at_end() {
        let (_, diagnostics) = parse_source("{ let x = 1;\n");
        assert_eq!(messages(&diagnostics),
                   vec!["Error on line 2 at end: Expected '}' after block."]);
    }

    #[test]
    fn every_broken_declaration_is_reported() {
        let (program, diagnostics) = parse_source("let 1;\nlet x = 2;\nif x) {}\nlet z = (3;\nz;");
        assert_eq!(diagnostics.iter().map(|d| d.line).collect::<Vec<_>>(), vec![1, 3, 4]);
        assert_eq!(program.len(), 2);
    }

    #[test]
    fn nesting_limit_is_reported_and_recovered() {
        let options = ParseOptions { max_depth: 8 };
        let (program, diagnostics) = parse_source_with("((((((((((1))))))))));\nlet ok = 1;", options);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message,
                   "Error on line 1: Nesting too deep (maximum is 8).");
        assert!(matches!(program.as_slice(),
                         [Statement::VariableDeclaration { name, .. }] if name == "ok"));
    }

    #[test]
    fn long_operator_chains_are_cut_off_at_the_limit() {
        for operator in ["+", "*", "<", "==", "&&", "||"] {
            let source = format!("let s = 1{};", format!(" {operator} 1").repeat(100_000));
            let (program, diagnostics) = parse_source(&source);
            assert!(program.is_empty(), "{operator} chain should not parse");
            assert_eq!(messages(&diagnostics),
                       vec![format!("Error on line 1: Nesting too deep (maximum is {DEFAULT_MAX_DEPTH}).")],
                       "{operator} chain");
        }
    }

    #[test]
    fn operator_chain_at_the_limit_is_accepted() {
        // The initializer expression takes one level, every `+` another.
        let source = format!("let s = 1{};", " + 1".repeat(DEFAULT_MAX_DEPTH - 1));
        let (program, diagnostics) = parse_source(&source);
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        assert_eq!(program.len(), 1);

        let source = format!("let s = 1{};", " + 1".repeat(DEFAULT_MAX_DEPTH));
        let (_, diagnostics) = parse_source(&source);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn chains_inside_a_nested_expression_share_its_budget() {
        let options = ParseOptions { max_depth: 8 };
        let (_, diagnostics) = parse_source_with("(((1 + 1 + 1 + 1 + 1)));", options);
        assert_eq!(messages(&diagnostics),
                   vec!["Error on line 1: Nesting too deep (maximum is 8)."]);

        let (_, diagnostics) = parse_source_with("(((1 + 1 + 1 + 1)));", options);
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
    }

    #[test]
    fn nesting_within_the_limit_is_accepted() {
        let options = ParseOptions { max_depth: 8 };
        let (program, diagnostics) = parse_source_with("{ { -(-1); } }", options);
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        assert_eq!(program.len(), 1);
    }
}
