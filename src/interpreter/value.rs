use serde::Serialize;

/// Represents a runtime value in the interpreter.
///
/// This enum models every kind of value a program can compute: the results of
/// literals, arithmetic, comparisons and uninitialized declarations.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// A double precision floating-point number.
    Number(f64),
    /// A string of text.
    String(String),
    /// A boolean value, produced by comparisons, equality and `!`.
    Bool(bool),
    /// The absence of a value; the initial value of `let x;`.
    Null,
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl Value {
    /// Converts the value to a boolean for conditions and logical operators.
    ///
    /// `null`, `false`, `0` and the empty string are falsy; every other value
    /// is truthy, including `"0"`, `-1` and `"false"`.
    ///
    /// # Example
    /// ```
    /// use minijs::interpreter::value::Value;
    ///
    /// assert!(!Value::Null.is_truthy());
    /// assert!(!Value::Number(0.0).is_truthy());
    /// assert!(!Value::from("").is_truthy());
    /// assert!(Value::from("0").is_truthy());
    /// assert!(Value::Number(-1.0).is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0,
            Self::String(s) => !s.is_empty(),
        }
    }

    /// Equality as seen by `==` and `!=`.
    ///
    /// `null` equals only `null`. Values of different kinds are never equal;
    /// there is no coercion between numbers, strings and booleans.
    #[must_use]
    pub fn is_equal(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            _ => false,
        }
    }

    /// Returns the number held by this value, if it is one.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Renders the value for environment listings.
    ///
    /// Identical to the [`Display`](std::fmt::Display) form except that
    /// strings are wrapped in double quotes.
    ///
    /// # Example
    /// ```
    /// use minijs::interpreter::value::Value;
    ///
    /// assert_eq!(Value::from("hi").render(), "\"hi\"");
    /// assert_eq!(Value::Number(30.0).render(), "30");
    /// assert_eq!(Value::Null.render(), "null");
    /// ```
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::String(s) => format!("\"{s}\""),
            other => other.to_string(),
        }
    }
}

/// Formats a number the way the language prints it: integral values without
/// a fractional part, `-0` as `0`, infinities spelled out.
///
/// Magnitudes from `1e-6` up to but excluding `1e21` print in positional
/// form. Anything outside that range uses exponent notation with an explicit
/// exponent sign, so `1e21` prints as `1e+21` and `0.0000001` as `1e-7`.
fn format_number(n: f64, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    if n.is_nan() {
        write!(f, "NaN")
    } else if n.is_infinite() {
        write!(f, "{}Infinity", if n < 0.0 { "-" } else { "" })
    } else if n == 0.0 {
        write!(f, "0")
    } else if (1e-6..1e21).contains(&n.abs()) {
        write!(f, "{n}")
    } else {
        let formatted = format!("{n:e}");
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                write!(f, "{mantissa}e+{exponent}")
            },
            _ => write!(f, "{formatted}"),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => format_number(*n, f),
            Self::String(s) => write!(f, "{s}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Null => write!(f, "null"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_print_in_natural_form() {
        assert_eq!(Value::Number(30.0).to_string(), "30");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::Number(-0.0).to_string(), "0");
        assert_eq!(Value::Number(-7.0).to_string(), "-7");
        assert_eq!(Value::Number(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(Value::Number(f64::NEG_INFINITY).to_string(), "-Infinity");
    }

    #[test]
    fn extreme_magnitudes_use_exponent_notation() {
        assert_eq!(Value::Number(1e20).to_string(), "100000000000000000000");
        assert_eq!(Value::Number(1e21).to_string(), "1e+21");
        assert_eq!(Value::Number(-1.5e300).to_string(), "-1.5e+300");
        assert_eq!(Value::Number(0.000_001).to_string(), "0.000001");
        assert_eq!(Value::Number(1e-7).to_string(), "1e-7");
        assert_eq!(Value::Number(-2.5e-9).to_string(), "-2.5e-9");
    }

    #[test]
    fn truthiness_boundaries() {
        for falsy in [Value::Null, Value::Bool(false), 0.0.into(), "".into()] {
            assert!(!falsy.is_truthy(), "{falsy:?} should be falsy");
        }
        for truthy in [Value::Bool(true), (-1.0).into(), 0.5.into(), "0".into(), " ".into()] {
            assert!(truthy.is_truthy(), "{truthy:?} should be truthy");
        }
    }

    #[test]
    fn equality_never_coerces_between_kinds() {
        assert!(Value::Null.is_equal(&Value::Null));
        assert!(!Value::Null.is_equal(&Value::Bool(false)));
        assert!(!Value::Number(1.0).is_equal(&"1".into()));
        assert!(!Value::Number(0.0).is_equal(&Value::Bool(false)));
        assert!(Value::from("a").is_equal(&"a".into()));
        assert!(Value::Number(0.0).is_equal(&Value::Number(-0.0)));
    }

    #[test]
    fn render_quotes_strings_only() {
        assert_eq!(Value::from("a1").render(), "\"a1\"");
        assert_eq!(Value::Bool(true).render(), "true");
        assert_eq!(Value::Number(0.1).render(), "0.1");
    }
}
