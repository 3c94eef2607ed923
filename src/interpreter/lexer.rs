use logos::Logos;
use serde::Serialize;

use crate::error::{DiagnosticSink, LexError};

/// Raw token produced by `logos`, before it is turned into a [`Token`].
///
/// Whitespace, comments and the lone `&`/`|` characters are skipped here, so
/// only meaningful input reaches the conversion step.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(skip r"[ \t\r]+")]
enum RawToken {
    /// Numeric literal tokens, such as `3` or `3.14`.
    #[regex(r"[0-9]+(\.[0-9]+)?", parse_number)]
    Number(f64),
    /// A complete string literal; the callback strips the quotes.
    #[regex(r#""[^"]*""#, parse_string, allow_greedy = true)]
    String(String),
    /// An opening quote with no closing quote before the end of input.
    #[regex(r#""[^"]*"#, count_newlines, allow_greedy = true)]
    UnterminatedString,
    /// Identifier tokens; keywords are resolved afterwards.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,
    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// `\n`
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// `&` and `|` on their own are not operators and are dropped silently.
    #[token("&", logos::skip)]
    #[token("|", logos::skip)]
    Stray,
    /// `&&`
    #[token("&&")]
    AndAnd,
    /// `||`
    #[token("||")]
    OrOr,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `=`
    #[token("=")]
    Equals,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!`
    #[token("!")]
    Bang,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `;`
    #[token(";")]
    Semicolon,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Debug)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line: 1 }
    }
}

fn parse_number(lex: &logos::Lexer<RawToken>) -> Option<f64> {
    lex.slice().parse().ok()
}

fn parse_string(lex: &mut logos::Lexer<RawToken>) -> String {
    count_newlines(lex);
    let slice = lex.slice();
    slice[1..slice.len() - 1].to_string()
}

fn count_newlines(lex: &mut logos::Lexer<RawToken>) {
    lex.extras.line += lex.slice().matches('\n').count();
}

/// The kind of a [`Token`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    /// `let`
    Let,
    /// `const`
    Const,
    /// `if`
    If,
    /// `else`
    Else,
    /// A variable name.
    Identifier,
    /// A numeric literal.
    Number,
    /// A string literal.
    String,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `=`
    Assign,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `&&`
    And,
    /// `||`
    Or,
    /// `!`
    Not,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `;`
    Semicolon,
    /// End of input. Always the last token of a sequence.
    Eof,
}

impl TokenKind {
    /// Looks up the keyword spelled by `word`, if any.
    #[must_use]
    pub fn keyword(word: &str) -> Option<Self> {
        match word {
            "let" => Some(Self::Let),
            "const" => Some(Self::Const),
            "if" => Some(Self::If),
            "else" => Some(Self::Else),
            _ => None,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Let => "LET",
            Self::Const => "CONST",
            Self::If => "IF",
            Self::Else => "ELSE",
            Self::Identifier => "IDENTIFIER",
            Self::Number => "NUMBER",
            Self::String => "STRING",
            Self::Plus => "PLUS",
            Self::Minus => "MINUS",
            Self::Multiply => "MULTIPLY",
            Self::Divide => "DIVIDE",
            Self::Assign => "ASSIGN",
            Self::Equal => "EQUAL",
            Self::NotEqual => "NOT_EQUAL",
            Self::Greater => "GREATER",
            Self::GreaterEqual => "GREATER_EQUAL",
            Self::Less => "LESS",
            Self::LessEqual => "LESS_EQUAL",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::LeftParen => "LEFT_PAREN",
            Self::RightParen => "RIGHT_PAREN",
            Self::LeftBrace => "LEFT_BRACE",
            Self::RightBrace => "RIGHT_BRACE",
            Self::Semicolon => "SEMICOLON",
            Self::Eof => "EOF",
        };
        write!(f, "{name}")
    }
}

/// The decoded value of a number or string token.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    /// A decoded numeric literal.
    Number(f64),
    /// A string literal without its quotes.
    String(String),
}

/// Represents a lexical token in the source input.
///
/// A token is a minimal but meaningful unit of text produced by the lexer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// What kind of token this is.
    pub kind:    TokenKind,
    /// The exact source text that was matched.
    pub lexeme:  String,
    /// The decoded value for number and string tokens.
    pub literal: Option<Literal>,
    /// The 1-based source line the token starts on.
    pub line:    usize,
}

impl Token {
    /// Creates a token without a literal value.
    #[must_use]
    pub fn new(kind: TokenKind, lexeme: &str, line: usize) -> Self {
        Self { kind,
               lexeme: lexeme.to_string(),
               literal: None,
               line }
    }

    /// Creates the end-of-input marker.
    #[must_use]
    pub fn eof(line: usize) -> Self {
        Self::new(TokenKind::Eof, "", line)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.literal {
            Some(Literal::Number(n)) => write!(f, "{} {} {n}", self.kind, self.lexeme),
            Some(Literal::String(s)) => write!(f, "{} {} {s}", self.kind, self.lexeme),
            None => write!(f, "{} {} null", self.kind, self.lexeme),
        }
    }
}

/// Converts source text into an ordered sequence of tokens.
///
/// Tokenization never fails. Unexpected characters and unterminated strings
/// are reported to `sink` and scanning continues with the next character. The
/// returned sequence always ends with a single [`TokenKind::Eof`] token.
///
/// # Example
/// ```
/// use minijs::{
///     error::Diagnostic,
///     interpreter::lexer::{TokenKind, tokenize},
/// };
///
/// let mut diagnostics: Vec<Diagnostic> = Vec::new();
/// let tokens = tokenize("let x = 1.5;", &mut diagnostics);
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
///
/// assert_eq!(kinds,
///            vec![TokenKind::Let,
///                 TokenKind::Identifier,
///                 TokenKind::Assign,
///                 TokenKind::Number,
///                 TokenKind::Semicolon,
///                 TokenKind::Eof]);
/// assert!(diagnostics.is_empty());
/// ```
pub fn tokenize(source: &str, sink: &mut dyn DiagnosticSink) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(raw) = lexer.next() {
        let lexeme = lexer.slice();
        // Multi-line strings have already advanced the counter past their end.
        let line = lexer.extras.line - lexeme.matches('\n').count();

        let token = match raw {
            Ok(RawToken::UnterminatedString) => {
                sink.report(LexError::UnterminatedString { line }.into());
                continue;
            },
            Ok(raw) => match convert(raw, lexeme, line) {
                Some(token) => token,
                None => continue,
            },
            Err(()) => {
                sink.report(LexError::UnexpectedCharacter { lexeme: lexeme.to_string(),
                                                            line }.into());
                continue;
            },
        };
        tokens.push(token);
    }

    tokens.push(Token::eof(lexer.extras.line));
    tracing::debug!(count = tokens.len(), "tokenized source");

    tokens
}

/// Builds the public token for `raw`, or `None` for input that produces no
/// token.
fn convert(raw: RawToken, lexeme: &str, line: usize) -> Option<Token> {
    let kind = match raw {
        RawToken::Number(n) => {
            return Some(Token { kind: TokenKind::Number,
                                lexeme: lexeme.to_string(),
                                literal: Some(Literal::Number(n)),
                                line });
        },
        RawToken::String(s) => {
            return Some(Token { kind: TokenKind::String,
                                lexeme: lexeme.to_string(),
                                literal: Some(Literal::String(s)),
                                line });
        },
        RawToken::Identifier => TokenKind::keyword(lexeme).unwrap_or(TokenKind::Identifier),
        RawToken::AndAnd => TokenKind::And,
        RawToken::OrOr => TokenKind::Or,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Multiply,
        RawToken::Slash => TokenKind::Divide,
        RawToken::Equals => TokenKind::Assign,
        RawToken::EqualEqual => TokenKind::Equal,
        RawToken::Bang => TokenKind::Not,
        RawToken::BangEqual => TokenKind::NotEqual,
        RawToken::Greater => TokenKind::Greater,
        RawToken::GreaterEqual => TokenKind::GreaterEqual,
        RawToken::Less => TokenKind::Less,
        RawToken::LessEqual => TokenKind::LessEqual,
        RawToken::LParen => TokenKind::LeftParen,
        RawToken::RParen => TokenKind::RightParen,
        RawToken::LBrace => TokenKind::LeftBrace,
        RawToken::RBrace => TokenKind::RightBrace,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::UnterminatedString
        | RawToken::Comment
        | RawToken::NewLine
        | RawToken::Stray => return None,
    };

    Some(Token::new(kind, lexeme, line))
}
