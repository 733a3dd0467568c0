//! JSON output serialization for query results.
//!
//! This module provides JSON serialization with support for both compact and
//! pretty-printed output formats. Object keys are written in insertion order,
//! so a result prints the way its query built it.
//!
//! # Features
//!
//! - **Compact output** via [`to_json()`] - the canonical form `to_string()` returns
//! - **Pretty output** via [`to_json_pretty()`] - 2-space indentation for the CLI
//! - **String escaping** - handles special characters and control codes
//! - **Number formatting** - whole floats print without a fraction (`1.0` → `1`),
//!   non-finite floats print as `null`
//!
//! # Examples
//!
//! ```
//! use jmesq::Value;
//! use jmesq::output::{to_json, to_json_pretty};
//!
//! let value = Value::Array(vec![Value::Integer(1), Value::Float(2.5)]);
//!
//! assert_eq!(to_json(&value), "[1,2.5]");
//! assert_eq!(to_json_pretty(&value), "[\n  1,\n  2.5\n]");
//! ```

use indexmap::IndexMap;

use crate::value::Value;

pub struct JsonPrinter {
    pretty: bool,
}

impl JsonPrinter {
    pub fn new(pretty: bool) -> Self {
        JsonPrinter { pretty }
    }

    pub fn print(&self, value: &Value) -> String {
        self.print_value(value, 0)
    }

    fn print_value(&self, value: &Value, indent: usize) -> String {
        match value {
            Value::Null => "null".to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Integer(n) => n.to_string(),
            Value::Float(n) if n.is_finite() => n.to_string(),
            Value::Float(_) => "null".to_string(),
            Value::String(s) => format!("\"{}\"", escape_string(s)),
            Value::Array(arr) => self.print_array(arr, indent),
            Value::Object(obj) => self.print_object(obj, indent),
        }
    }

    fn print_array(&self, arr: &[Value], indent: usize) -> String {
        if arr.is_empty() {
            return "[]".to_string();
        }

        if self.pretty {
            let items: Vec<String> = arr
                .iter()
                .map(|v| format!("{}{}", self.indent(indent + 1), self.print_value(v, indent + 1)))
                .collect();
            format!("[\n{}\n{}]", items.join(",\n"), self.indent(indent))
        } else {
            let items: Vec<String> = arr.iter().map(|v| self.print_value(v, indent)).collect();
            format!("[{}]", items.join(","))
        }
    }

    fn print_object(&self, obj: &IndexMap<String, Value>, indent: usize) -> String {
        if obj.is_empty() {
            return "{}".to_string();
        }

        if self.pretty {
            let items: Vec<String> = obj
                .iter()
                .map(|(k, v)| {
                    format!(
                        "{}\"{}\": {}",
                        self.indent(indent + 1),
                        escape_string(k),
                        self.print_value(v, indent + 1)
                    )
                })
                .collect();
            format!("{{\n{}\n{}}}", items.join(",\n"), self.indent(indent))
        } else {
            let items: Vec<String> = obj
                .iter()
                .map(|(k, v)| format!("\"{}\":{}", escape_string(k), self.print_value(v, indent)))
                .collect();
            format!("{{{}}}", items.join(","))
        }
    }

    fn indent(&self, level: usize) -> String {
        "  ".repeat(level)
    }
}

fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Converts a Value to compact JSON.
///
/// This is the canonical serialization: no whitespace, keys in insertion
/// order. `to_string()` inside queries produces exactly this text.
///
/// ```
/// use jmesq::{Value, convert::from_json};
/// use jmesq::output::to_json;
/// use serde_json::json;
///
/// let value = from_json(json!({"name": "Alice", "age": 30}));
/// assert_eq!(to_json(&value), r#"{"name":"Alice","age":30}"#);
/// ```
pub fn to_json(value: &Value) -> String {
    JsonPrinter::new(false).print(value)
}

/// Converts a Value to pretty-printed JSON with 2-space indentation,
/// one element or property per line.
pub fn to_json_pretty(value: &Value) -> String {
    JsonPrinter::new(true).print(value)
}
