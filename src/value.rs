use std::cmp::Ordering;

use indexmap::IndexMap;
use rust_decimal::Decimal;

/// A JSON value as seen by the query engine.
///
/// This type represents all valid JSON types with a distinction between
/// integers and floats (unlike standard JSON which only has "number").
/// Both numeric variants share one numeric domain for equality and
/// ordering, so `1` and `1.0` compare equal.
///
/// Objects keep their keys in insertion order.
///
/// # Examples
///
/// ```
/// use jmesq::Value;
/// use indexmap::IndexMap;
///
/// let array = Value::Array(vec![Value::Integer(1), Value::Float(2.5)]);
///
/// let mut obj = IndexMap::new();
/// obj.insert("key".to_string(), Value::String("value".to_string()));
/// let object = Value::Object(obj);
///
/// assert!(array.is_truthy());
/// assert_eq!(object.type_name(), "object");
/// ```
#[derive(Debug, Clone)]
pub enum Value {
    /// JSON null
    Null,

    /// JSON boolean (true/false)
    Boolean(bool),

    /// Floating-point number
    Float(f64),

    /// Integer number (preserved separately from floats)
    Integer(i64),

    /// UTF-8 string
    String(String),

    /// Array of values
    Array(Vec<Value>),

    /// Object with string keys, in insertion order
    Object(IndexMap<String, Value>),
}

impl Value {
    /// Truthiness used by filters and the logical operators.
    ///
    /// `null`, `false`, `""`, `[]` and `{}` are falsy. Everything else is
    /// truthy, numeric zero included.
    pub fn is_truthy(&self) -> bool {
        use Value::*;
        match self {
            Null => false,
            Boolean(b) => *b,
            Float(_) | Integer(_) => true,
            String(s) => !s.is_empty(),
            Array(arr) => !arr.is_empty(),
            Object(obj) => !obj.is_empty(),
        }
    }

    /// Get as float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    /// Name reported by the `type()` function.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) | Value::Float(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// Display form used when a value is spliced into text
    /// (`join`, string `contains`).
    pub fn as_display_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            Value::Boolean(b) => b.to_string(),
            Value::Integer(n) => n.to_string(),
            Value::Float(_) | Value::Array(_) | Value::Object(_) => crate::output::to_json(self),
        }
    }

    /// Native ordering shared by the comparison operators and the sorting
    /// functions. Returns `None` for pairs that have no natural order.
    pub fn native_cmp(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Integer(a), Value::Float(b)) => integer_float_cmp(*a, *b),
            (Value::Float(a), Value::Integer(b)) => {
                integer_float_cmp(*b, *a).map(Ordering::reverse)
            }
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// Orders an integer against a float without rounding the integer.
///
/// Integral floats within decimal range are compared exactly; a float with
/// a fraction is small enough that `i as f64` is exact wherever the two
/// could be close.
fn integer_float_cmp(i: i64, f: f64) -> Option<Ordering> {
    if f.fract() == 0.0
        && let Some(exact) = Decimal::from_f64_retain(f)
    {
        return Some(Decimal::from(i).cmp(&exact));
    }
    (i as f64).partial_cmp(&f)
}

/// Deep structural equality. Numbers compare by value across the
/// integer/float split; object key order is not significant.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (a, b) if a.is_number() && b.is_number() => a.native_cmp(b) == Some(Ordering::Equal),
            _ => false,
        }
    }
}
