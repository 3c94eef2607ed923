use crate::{
    ast::{DeclarationKind, Statement},
    interpreter::{
        lexer::TokenKind,
        parser::{
            binary::parse_expression,
            core::{ParseResult, Parser},
        },
    },
};

/// Parses one declaration, recovering from any syntax error inside it.
///
/// Grammar: `declaration := ("let" | "const") variable_declaration |
/// statement`
///
/// On failure the error is recorded, the parser synchronizes to the next
/// likely declaration start and `None` is returned. This is the only place
/// errors are caught, so recovery behaves the same at the top level and inside
/// blocks.
///
/// # Parameters
/// - `parser`: Parser positioned at the start of a declaration.
///
/// # Returns
/// The parsed statement, or `None` if it had to be skipped.
pub fn parse_declaration(parser: &mut Parser) -> Option<Statement> {
    let result = if let Some(keyword) = parser.match_any(&[TokenKind::Let, TokenKind::Const]) {
        let kind = if keyword.kind == TokenKind::Const {
            DeclarationKind::Const
        } else {
            DeclarationKind::Let
        };
        parse_variable_declaration(parser, kind, keyword.line)
    } else {
        parse_statement(parser)
    };

    match result {
        Ok(statement) => Some(statement),
        Err(error) => {
            tracing::trace!(%error, "synchronizing after syntax error");
            parser.report(error);
            parser.synchronize();
            None
        },
    }
}

/// Parses the remainder of a variable declaration after its keyword.
///
/// Grammar: `variable_declaration := IDENTIFIER ("=" expression)? ";"`
///
/// # Parameters
/// - `parser`: Parser positioned after `let` or `const`.
/// - `kind`: Which keyword introduced the declaration.
/// - `line`: Line number of the keyword.
///
/// # Returns
/// A [`Statement::VariableDeclaration`]; the initializer is `None` when
/// omitted.
///
/// # Errors
/// - `UnexpectedToken` if the name or the closing `;` is missing.
/// - Propagates any errors from the initializer expression.
fn parse_variable_declaration(parser: &mut Parser,
                              kind: DeclarationKind,
                              line: usize)
                              -> ParseResult<Statement> {
    let name = parser.consume(TokenKind::Identifier, "Expected variable name.")?
                     .lexeme
                     .clone();

    let initializer = if parser.match_any(&[TokenKind::Assign]).is_some() {
        Some(parse_expression(parser)?)
    } else {
        None
    };

    parser.consume(TokenKind::Semicolon, "Expected ';' after variable declaration.")?;

    Ok(Statement::VariableDeclaration { name,
                                        kind,
                                        initializer,
                                        line })
}

/// Parses a single statement.
///
/// A statement may be one of:
/// - an `if` statement,
/// - a block,
/// - an expression followed by `;`.
///
/// Each statement counts as one nesting level.
///
/// # Errors
/// - `NestingTooDeep` if statements nest past the configured limit.
/// - Propagates any errors from the statement's parts.
pub fn parse_statement(parser: &mut Parser) -> ParseResult<Statement> {
    parser.nested(|parser| {
              if let Some(keyword) = parser.match_any(&[TokenKind::If]) {
                  parse_if(parser, keyword.line)
              } else if let Some(brace) = parser.match_any(&[TokenKind::LeftBrace]) {
                  Ok(Statement::Block { statements: parse_block(parser)?,
                                        line:       brace.line, })
              } else {
                  parse_expression_statement(parser)
              }
          })
}

/// Parses an `if` statement with an optional `else` branch.
///
/// Syntax:
/// ```text
///     if "(" <condition> ")" <statement> ("else" <statement>)?
/// ```
/// An `else` always belongs to the nearest preceding `if`.
///
/// # Parameters
/// - `parser`: Parser positioned after the `if` keyword.
/// - `line`: Line number of the `if` token.
///
/// # Errors
/// - `UnexpectedToken` if either parenthesis is missing.
/// - Propagates any errors from the condition or branches.
fn parse_if(parser: &mut Parser, line: usize) -> ParseResult<Statement> {
    parser.consume(TokenKind::LeftParen, "Expected '(' after 'if'.")?;
    let condition = parse_expression(parser)?;
    parser.consume(TokenKind::RightParen, "Expected ')' after if condition.")?;

    let then_branch = Box::new(parse_statement(parser)?);
    let else_branch = if parser.match_any(&[TokenKind::Else]).is_some() {
        Some(Box::new(parse_statement(parser)?))
    } else {
        None
    };

    Ok(Statement::If { condition,
                       then_branch,
                       else_branch,
                       line })
}

/// Parses the declarations of a block up to and including its closing `}`.
///
/// Malformed declarations inside the block are recovered individually.
///
/// # Errors
/// `UnexpectedEndOfInput` if the input ends before the closing brace.
fn parse_block(parser: &mut Parser) -> ParseResult<Vec<Statement>> {
    let mut statements = Vec::new();

    while !parser.check(TokenKind::RightBrace) && !parser.is_at_end() {
        if let Some(statement) = parse_declaration(parser) {
            statements.push(statement);
        }
    }

    parser.consume(TokenKind::RightBrace, "Expected '}' after block.")?;
    Ok(statements)
}

/// Parses an expression used as a statement.
///
/// The statement's source line is that of the expression.
fn parse_expression_statement(parser: &mut Parser) -> ParseResult<Statement> {
    let expr = parse_expression(parser)?;
    parser.consume(TokenKind::Semicolon, "Expected ';' after expression.")?;

    Ok(Statement::Expression { line: expr.line_number(),
                               expr })
}
