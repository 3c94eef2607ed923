use crate::{
    ast::{BinaryOperator, Expr, LogicalOperator},
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::{
            core::{ParseResult, Parser},
            unary::parse_unary,
        },
    },
};

/// A precedence level's next-tighter rule.
type Rule = fn(&mut Parser) -> ParseResult<Expr>;

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the lowest
/// precedence level, assignment, and recursively descends through the
/// precedence hierarchy. Every entry counts as one nesting level, so deeply
/// parenthesized input is bounded.
///
/// Grammar: `expression := assignment`
///
/// # Parameters
/// - `parser`: Parser positioned at the first token of the expression.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression(parser: &mut Parser) -> ParseResult<Expr> {
    parser.nested(parse_assignment)
}

/// Parses an assignment.
///
/// Assignment is right-associative: `a = b = 1` assigns `1` to `b` and then
/// to `a`. The left-hand side must be a plain variable. Anything else is
/// reported as an invalid assignment target, the right-hand side is
/// discarded and the left expression is returned as-is so parsing continues
/// undisturbed.
///
/// Grammar: `assignment := logical_or ("=" assignment)?`
///
/// # Returns
/// An [`Expr::Assign`] or the plain `logical_or` expression.
fn parse_assignment(parser: &mut Parser) -> ParseResult<Expr> {
    let expr = parse_logical_or(parser)?;

    let Some(equals) = parser.match_any(&[TokenKind::Assign]) else {
        return Ok(expr);
    };
    let value = parser.nested(parse_assignment)?;

    match expr {
        Expr::Variable { name, line } => Ok(Expr::Assign { name,
                                                           value: Box::new(value),
                                                           line }),
        other => {
            parser.report(ParseError::InvalidAssignmentTarget { line: equals.line });
            Ok(other)
        },
    }
}

/// Parses logical OR expressions.
///
/// Grammar: `logical_or := logical_and ("||" logical_and)*`
fn parse_logical_or(parser: &mut Parser) -> ParseResult<Expr> {
    parse_logical(parser, TokenKind::Or, LogicalOperator::Or, parse_logical_and)
}

/// Parses logical AND expressions.
///
/// Grammar: `logical_and := equality ("&&" equality)*`
fn parse_logical_and(parser: &mut Parser) -> ParseResult<Expr> {
    parse_logical(parser, TokenKind::And, LogicalOperator::And, parse_equality)
}

/// Folds one logical level. Like [`parse_binary`], every operator counts as a
/// nesting level.
fn parse_logical(parser: &mut Parser,
                 kind: TokenKind,
                 operator: LogicalOperator,
                 next: Rule)
                 -> ParseResult<Expr> {
    parser.scoped(|parser| {
              let mut left = next(parser)?;
              while let Some(token) = parser.match_any(&[kind]) {
                  parser.descend()?;
                  let right = next(parser)?;
                  left = Expr::Logical { left: Box::new(left),
                                         operator,
                                         right: Box::new(right),
                                         line: token.line };
              }
              Ok(left)
          })
}

/// Parses equality expressions.
///
/// Grammar: `equality := comparison (("==" | "!=") comparison)*`
fn parse_equality(parser: &mut Parser) -> ParseResult<Expr> {
    parse_binary(parser, &[TokenKind::Equal, TokenKind::NotEqual], parse_comparison)
}

/// Parses ordering comparisons.
///
/// Grammar: `comparison := term ((">" | ">=" | "<" | "<=") term)*`
fn parse_comparison(parser: &mut Parser) -> ParseResult<Expr> {
    parse_binary(parser,
                 &[TokenKind::Greater,
                   TokenKind::GreaterEqual,
                   TokenKind::Less,
                   TokenKind::LessEqual],
                 parse_term)
}

/// Parses addition and subtraction expressions.
///
/// Grammar: `term := factor (("+" | "-") factor)*`
fn parse_term(parser: &mut Parser) -> ParseResult<Expr> {
    parse_binary(parser, &[TokenKind::Plus, TokenKind::Minus], parse_factor)
}

/// Parses multiplication and division expressions.
///
/// Grammar: `factor := unary (("*" | "/") unary)*`
fn parse_factor(parser: &mut Parser) -> ParseResult<Expr> {
    parse_binary(parser, &[TokenKind::Multiply, TokenKind::Divide], parse_unary)
}

/// Folds one left-associative precedence level.
///
/// # Parameters
/// - `parser`: Parser positioned at the level's first operand.
/// - `kinds`: Operator tokens accepted at this level.
/// - `next`: Rule for the operands, one level tighter.
///
/// Each operator folded in counts as one nesting level, so the depth of the
/// left-leaning tree stays within the parser's limit.
///
/// # Returns
/// A left-leaning [`Expr::Binary`] tree, or the single operand when no
/// operator follows it.
fn parse_binary(parser: &mut Parser, kinds: &[TokenKind], next: Rule) -> ParseResult<Expr> {
    parser.scoped(|parser| {
              let mut left = next(parser)?;
              while let Some(token) = parser.match_any(kinds)
                    && let Some(operator) = token_to_binary_operator(token.kind)
              {
                  parser.descend()?;
                  let right = next(parser)?;
                  left = Expr::Binary { left: Box::new(left),
                                        operator,
                                        right: Box::new(right),
                                        line: token.line };
              }
              Ok(left)
          })
}

/// Maps an operator token to the binary operator it spells.
pub(crate) const fn token_to_binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Sub),
        TokenKind::Multiply => Some(BinaryOperator::Mul),
        TokenKind::Divide => Some(BinaryOperator::Div),
        TokenKind::Less => Some(BinaryOperator::Less),
        TokenKind::Greater => Some(BinaryOperator::Greater),
        TokenKind::LessEqual => Some(BinaryOperator::LessEqual),
        TokenKind::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        TokenKind::Equal => Some(BinaryOperator::Equal),
        TokenKind::NotEqual => Some(BinaryOperator::NotEqual),
        _ => None,
    }
}
