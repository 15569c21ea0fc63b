//! Scalar fixture values.

use std::fmt;
use std::sync::LazyLock;

use regex_lite::Regex;

/// Matches the dynamic-value marker: `$eval(<expression>)`.
static EVAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$eval\((.+)\)$").expect("eval pattern is valid"));

/// A scalar value destined for one column of one row.
///
/// Values come out of YAML scalars; string scalars of the form
/// `$eval(<sql>)` become [`Value::Eval`] and are substituted with the
/// result of executing `<sql>` at insert time. Sequences and mappings are
/// rejected during parsing - a column holds exactly one scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL NULL.
    Null,
    /// Boolean literal.
    Bool(bool),
    /// Integer literal.
    Int(i64),
    /// Floating-point literal.
    Float(f64),
    /// Text literal.
    Text(String),
    /// Deferred SQL expression, evaluated against the target backend at
    /// insert time.
    Eval(String),
}

impl Value {
    /// Convert a YAML scalar into a fixture value.
    ///
    /// Returns `None` for sequences, mappings, and tagged values - those
    /// are not representable as a single column value and the caller
    /// reports them with table/column context.
    pub fn from_yaml(raw: &serde_yaml::Value) -> Option<Self> {
        match raw {
            serde_yaml::Value::Null => Some(Self::Null),
            serde_yaml::Value::Bool(b) => Some(Self::Bool(*b)),
            serde_yaml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Self::Int(i))
                } else {
                    n.as_f64().map(Self::Float)
                }
            }
            serde_yaml::Value::String(s) => Some(Self::from_text(s)),
            serde_yaml::Value::Sequence(_)
            | serde_yaml::Value::Mapping(_)
            | serde_yaml::Value::Tagged(_) => None,
        }
    }

    /// Build a value from raw text, recognizing the `$eval(...)` marker.
    pub fn from_text(text: &str) -> Self {
        match EVAL_RE.captures(text) {
            Some(captures) => Self::Eval(captures[1].to_string()),
            None => Self::Text(text.to_string()),
        }
    }

    /// The deferred SQL expression, if this is an [`Value::Eval`].
    pub fn eval_expression(&self) -> Option<&str> {
        match self {
            Self::Eval(expr) => Some(expr),
            _ => None,
        }
    }

    /// Whether this value is SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::Text(s) => write!(f, "{}", s),
            Self::Eval(expr) => write!(f, "$eval({})", expr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_recognizes_eval() {
        assert_eq!(
            Value::from_text("$eval(SELECT 1)"),
            Value::Eval("SELECT 1".to_string())
        );
    }

    #[test]
    fn test_from_text_plain_string() {
        assert_eq!(
            Value::from_text("SELECT 1"),
            Value::Text("SELECT 1".to_string())
        );
    }

    #[test]
    fn test_from_text_malformed_eval() {
        assert_eq!(
            Value::from_text("$evalSELECT 1)"),
            Value::Text("$evalSELECT 1)".to_string())
        );
    }

    #[test]
    fn test_from_text_empty_eval_is_literal() {
        assert_eq!(Value::from_text("$eval()"), Value::Text("$eval()".to_string()));
    }

    #[test]
    fn test_from_yaml_scalars() {
        assert_eq!(
            Value::from_yaml(&serde_yaml::Value::Null),
            Some(Value::Null)
        );
        assert_eq!(
            Value::from_yaml(&serde_yaml::from_str("42").unwrap()),
            Some(Value::Int(42))
        );
        assert_eq!(
            Value::from_yaml(&serde_yaml::from_str("2.5").unwrap()),
            Some(Value::Float(2.5))
        );
        assert_eq!(
            Value::from_yaml(&serde_yaml::from_str("true").unwrap()),
            Some(Value::Bool(true))
        );
    }

    #[test]
    fn test_from_yaml_rejects_collections() {
        assert_eq!(Value::from_yaml(&serde_yaml::from_str("[1, 2]").unwrap()), None);
        assert_eq!(
            Value::from_yaml(&serde_yaml::from_str("{a: 1}").unwrap()),
            None
        );
    }

    #[test]
    fn test_eval_expression_accessor() {
        assert_eq!(
            Value::Eval("SELECT NOW()".to_string()).eval_expression(),
            Some("SELECT NOW()")
        );
        assert_eq!(Value::Int(1).eval_expression(), None);
    }
}
