use serde::Serialize;

use crate::interpreter::value::Value;

/// Represents a literal value written directly in source code.
///
/// Only number and string literals exist in the surface syntax; booleans and
/// `null` are produced at runtime (by comparisons and uninitialized
/// declarations) but can never be spelled.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LiteralValue {
    /// A numeric literal such as `42` or `3.5`.
    Number(f64),
    /// A string literal without its surrounding quotes.
    String(String),
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<&LiteralValue> for Value {
    fn from(value: &LiteralValue) -> Self {
        match value {
            LiteralValue::Number(n) => Self::Number(*n),
            LiteralValue::String(s) => Self::String(s.clone()),
        }
    }
}

/// An abstract syntax tree node representing an expression.
///
/// Every node owns its children and records the line of the token that
/// introduced it. There are no parent links, so serializing a tree never
/// needs to break cycles.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Expr {
    /// An arithmetic, comparison or equality operation.
    Binary {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        operator: BinaryOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// A parenthesized expression.
    Grouping {
        /// The expression between the parentheses.
        inner: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A number or string literal.
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Line number in the source code.
        line:  usize,
    },
    /// A prefix operation (`-x`, `!x`).
    Unary {
        /// The operator to apply.
        operator: UnaryOperator,
        /// The operand expression.
        operand:  Box<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// Assignment to an existing variable. Evaluates to the assigned value.
    Assign {
        /// Name of the variable being assigned.
        name:  String,
        /// The value expression.
        value: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A short-circuiting `&&` or `||`.
    Logical {
        /// Left operand, always evaluated.
        left:     Box<Self>,
        /// The operator.
        operator: LogicalOperator,
        /// Right operand, evaluated only when the left one does not decide.
        right:    Box<Self>,
        /// Line number in the source code.
        line:     usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use minijs::ast::Expr;
    ///
    /// let expr = Expr::Variable { name: "x".to_string(),
    ///                             line: 5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Binary { line, .. }
            | Self::Grouping { line, .. }
            | Self::Literal { line, .. }
            | Self::Unary { line, .. }
            | Self::Variable { line, .. }
            | Self::Assign { line, .. }
            | Self::Logical { line, .. } => *line,
        }
    }
}

/// The keyword a variable declaration was introduced with.
///
/// Both keywords bind the same way; the distinction is kept so that the tree
/// reflects the source.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    /// `let`
    Let,
    /// `const`
    Const,
}

/// Represents a statement.
///
/// A program is an ordered list of top-level statements.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Statement {
    /// An expression evaluated for its side effects.
    #[serde(rename = "ExpressionStmt")]
    Expression {
        /// The expression to evaluate.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
    /// A conditional with an optional `else` branch.
    If {
        /// The condition, tested for truthiness.
        condition:   Expr,
        /// Statement executed when the condition is truthy.
        then_branch: Box<Self>,
        /// Statement executed otherwise, if present.
        else_branch: Option<Box<Self>>,
        /// Line number in the source code.
        line:        usize,
    },
    /// A variable declaration using `let` or `const`.
    #[serde(rename = "VarDecl")]
    VariableDeclaration {
        /// The name of the variable.
        name:        String,
        /// The declaring keyword.
        kind:        DeclarationKind,
        /// The initial value; `null` when absent.
        initializer: Option<Expr>,
        /// Line number in the source code.
        line:        usize,
    },
    /// A braced list of statements with its own scope.
    Block {
        /// Statements inside the block.
        statements: Vec<Self>,
        /// Line number in the source code.
        line:       usize,
    },
}

impl Statement {
    /// Gets the line number from `self`.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Expression { line, .. }
            | Self::If { line, .. }
            | Self::VariableDeclaration { line, .. }
            | Self::Block { line, .. } => *line,
        }
    }
}

/// Represents a binary operator.
///
/// Binary operators include arithmetic, comparisons and equality.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum BinaryOperator {
    /// Addition or string concatenation (`+`)
    #[serde(rename = "+")]
    Add,
    /// Subtraction (`-`)
    #[serde(rename = "-")]
    Sub,
    /// Multiplication (`*`)
    #[serde(rename = "*")]
    Mul,
    /// Division (`/`)
    #[serde(rename = "/")]
    Div,
    /// Less than (`<`)
    #[serde(rename = "<")]
    Less,
    /// Greater than (`>`)
    #[serde(rename = ">")]
    Greater,
    /// Less than or equal (`<=`)
    #[serde(rename = "<=")]
    LessEqual,
    /// Greater than or equal (`>=`)
    #[serde(rename = ">=")]
    GreaterEqual,
    /// Equal to (`==`)
    #[serde(rename = "==")]
    Equal,
    /// Not equal to (`!=`)
    #[serde(rename = "!=")]
    NotEqual,
}

/// Short-circuiting logical operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum LogicalOperator {
    /// Logical and (`&&`)
    #[serde(rename = "&&")]
    And,
    /// Logical or (`||`)
    #[serde(rename = "||")]
    Or,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    #[serde(rename = "-")]
    Negate,
    /// Logical NOT (e.g. `!x`).
    #[serde(rename = "!")]
    Not,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::And => write!(f, "&&"),
            Self::Or => write!(f, "||"),
        }
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
            Self::Not => write!(f, "!"),
        }
    }
}
