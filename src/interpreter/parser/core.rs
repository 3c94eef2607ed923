use crate::{
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::ParseOptions,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Cursor over a token sequence that ends with [`TokenKind::Eof`].
///
/// Besides the position, the parser tracks how deeply the current rule is
/// nested and collects the errors reported by recovered declarations.
#[derive(Debug)]
pub struct Parser<'a> {
    tokens:  &'a [Token],
    current: usize,
    depth:   usize,
    options: ParseOptions,
    errors:  Vec<ParseError>,
}

impl<'a> Parser<'a> {
    /// Creates a parser positioned at the first token.
    ///
    /// `tokens` must be non-empty and end with an end-of-input token.
    pub const fn new(tokens: &'a [Token], options: ParseOptions) -> Self {
        Self { tokens,
               current: 0,
               depth: 0,
               options,
               errors: Vec::new() }
    }

    /// Returns the token under the cursor without consuming it.
    pub fn peek(&self) -> &'a Token {
        let tokens = self.tokens;
        &tokens[self.current.min(tokens.len().saturating_sub(1))]
    }

    /// Returns the most recently consumed token.
    pub fn previous(&self) -> Option<&'a Token> {
        let tokens = self.tokens;
        self.current.checked_sub(1).and_then(|i| tokens.get(i))
    }

    /// True once the cursor rests on the end-of-input token.
    pub fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    /// True if the next token has kind `kind`.
    pub fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Consumes and returns the next token. The end-of-input token is never
    /// consumed.
    pub fn advance(&mut self) -> &'a Token {
        let token = self.peek();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    /// Consumes the next token if its kind is one of `kinds`.
    pub fn match_any(&mut self, kinds: &[TokenKind]) -> Option<&'a Token> {
        if kinds.contains(&self.peek().kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Consumes a token of kind `kind` or fails with `message`.
    ///
    /// # Errors
    /// A [`ParseError`] naming the token found instead.
    pub fn consume(&mut self, kind: TokenKind, message: &str) -> ParseResult<&'a Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_at(self.peek(), message))
        }
    }

    /// Builds an error located at `token`.
    ///
    /// The end-of-input token is described as `at end`, any other token by its
    /// lexeme.
    pub fn error_at(&self, token: &Token, message: &str) -> ParseError {
        if token.kind == TokenKind::Eof {
            ParseError::UnexpectedEndOfInput { message: message.to_string(),
                                               line:    token.line, }
        } else {
            ParseError::UnexpectedToken { lexeme:  token.lexeme.clone(),
                                          message: message.to_string(),
                                          line:    token.line, }
        }
    }

    /// Records an error without interrupting the current rule.
    pub fn report(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    /// Runs `rule` one nesting level deeper.
    ///
    /// # Errors
    /// [`ParseError::NestingTooDeep`] if the configured limit would be
    /// exceeded; otherwise whatever `rule` returns.
    pub fn nested<T>(&mut self, rule: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        self.scoped(|parser| {
                parser.descend()?;
                rule(parser)
            })
    }

    /// Enters one more nesting level. The level stays entered until the
    /// enclosing [`scoped`](Self::scoped) call returns.
    ///
    /// Operator chains call this once per operator, since every fold adds a
    /// level to the tree even though the parser itself does not recurse.
    ///
    /// # Errors
    /// [`ParseError::NestingTooDeep`] if the configured limit is reached.
    pub fn descend(&mut self) -> ParseResult<()> {
        if self.depth >= self.options.max_depth {
            return Err(ParseError::NestingTooDeep { max:  self.options.max_depth,
                                                    line: self.peek().line, });
        }
        self.depth += 1;
        Ok(())
    }

    /// Runs `rule`, then restores the nesting depth to what it was before,
    /// however many levels `rule` entered and whether or not it failed.
    pub fn scoped<T>(&mut self, rule: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        let depth = self.depth;
        let result = rule(self);
        self.depth = depth;
        result
    }

    /// Panic-mode recovery.
    ///
    /// Skips at least one token, then stops after a `;` or before a token that
    /// can start a new declaration.
    pub fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().is_some_and(|t| t.kind == TokenKind::Semicolon) {
                return;
            }
            if matches!(self.peek().kind,
                        TokenKind::Let | TokenKind::Const | TokenKind::If | TokenKind::Else)
            {
                return;
            }
            self.advance();
        }
    }

    /// Consumes the parser, returning every error reported so far.
    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }
}
