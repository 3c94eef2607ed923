use crate::{
    ast::{Expr, LiteralValue, UnaryOperator},
    interpreter::{
        lexer::{Literal, TokenKind},
        parser::{
            binary::parse_expression,
            core::{ParseResult, Parser},
        },
    },
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-`  (numeric negation)
/// - `!`  (logical not)
///
/// Unary operators are right-associative, so an input like `!-x` is parsed as
/// `!( -x )`. Each prefix operator counts as one nesting level.
///
/// Grammar:
/// ```text
///     unary := ("-" | "!") unary
///            | primary
/// ```
/// # Parameters
/// - `parser`: Parser with the cursor on the operator or operand.
///
/// # Returns
/// An [`Expr::Unary`] or a primary expression.
pub(crate) fn parse_unary(parser: &mut Parser) -> ParseResult<Expr> {
    if let Some(token) = parser.match_any(&[TokenKind::Not, TokenKind::Minus]) {
        let operator = if token.kind == TokenKind::Not {
            UnaryOperator::Not
        } else {
            UnaryOperator::Negate
        };
        let operand = parser.nested(parse_unary)?;
        Ok(Expr::Unary { operator,
                         operand: Box::new(operand),
                         line: token.line })
    } else {
        parse_primary(parser)
    }
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar:
/// - number and string literals
/// - variable references
/// - parenthesized expressions
///
/// Grammar:
/// ```text
///     primary := NUMBER | STRING | IDENTIFIER | "(" expression ")"
/// ```
///
/// # Errors
/// - `UnexpectedToken` or `UnexpectedEndOfInput` with "Expected expression."
///   if no primary expression starts here.
/// - `UnexpectedToken` if a grouping is not closed.
pub(crate) fn parse_primary(parser: &mut Parser) -> ParseResult<Expr> {
    let token = parser.peek();

    match token.kind {
        TokenKind::Number | TokenKind::String => {
            parser.advance();
            let value = match &token.literal {
                Some(Literal::Number(n)) => LiteralValue::Number(*n),
                Some(Literal::String(s)) => LiteralValue::String(s.clone()),
                None => return Err(parser.error_at(token, "Expected expression.")),
            };
            Ok(Expr::Literal { value,
                               line: token.line })
        },
        TokenKind::Identifier => {
            parser.advance();
            Ok(Expr::Variable { name: token.lexeme.clone(),
                                line: token.line, })
        },
        TokenKind::LeftParen => {
            parser.advance();
            let inner = parse_expression(parser)?;
            parser.consume(TokenKind::RightParen, "Expected ')' after expression.")?;
            Ok(Expr::Grouping { inner: Box::new(inner),
                                line:  token.line, })
        },
        _ => Err(parser.error_at(token, "Expected expression.")),
    }
}
