//! Built-in function library.
//!
//! Every function takes positional arguments already evaluated against the
//! current value, except the key expressions of `sort_by`, `min_by` and
//! `max_by`, which are evaluated once per element. A type mismatch yields
//! `null` (or `false` for the string predicates), never an error.

use std::cmp::Ordering;

use indexmap::IndexMap;
use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};

use crate::{
    ast::Expr,
    evaluator::{EvalError, Evaluator, FunctionArg},
    output,
    value::Value,
};

static NULL: Value = Value::Null;

/// The functions a query may call by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Keys,
    Values,
    Length,
    Type,
    ToString,
    ToNumber,
    NotNull,
    Contains,
    StartsWith,
    EndsWith,
    Reverse,
    Sort,
    SortBy,
    Min,
    Max,
    MinBy,
    MaxBy,
    Sum,
    Avg,
    Floor,
    Ceil,
    Abs,
    Merge,
    Flatten,
    Join,
    Split,
    Trim,
    Upper,
    Lower,
}

impl Builtin {
    pub const ALL: [Builtin; 29] = [
        Builtin::Keys,
        Builtin::Values,
        Builtin::Length,
        Builtin::Type,
        Builtin::ToString,
        Builtin::ToNumber,
        Builtin::NotNull,
        Builtin::Contains,
        Builtin::StartsWith,
        Builtin::EndsWith,
        Builtin::Reverse,
        Builtin::Sort,
        Builtin::SortBy,
        Builtin::Min,
        Builtin::Max,
        Builtin::MinBy,
        Builtin::MaxBy,
        Builtin::Sum,
        Builtin::Avg,
        Builtin::Floor,
        Builtin::Ceil,
        Builtin::Abs,
        Builtin::Merge,
        Builtin::Flatten,
        Builtin::Join,
        Builtin::Split,
        Builtin::Trim,
        Builtin::Upper,
        Builtin::Lower,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Keys => "keys",
            Builtin::Values => "values",
            Builtin::Length => "length",
            Builtin::Type => "type",
            Builtin::ToString => "to_string",
            Builtin::ToNumber => "to_number",
            Builtin::NotNull => "not_null",
            Builtin::Contains => "contains",
            Builtin::StartsWith => "starts_with",
            Builtin::EndsWith => "ends_with",
            Builtin::Reverse => "reverse",
            Builtin::Sort => "sort",
            Builtin::SortBy => "sort_by",
            Builtin::Min => "min",
            Builtin::Max => "max",
            Builtin::MinBy => "min_by",
            Builtin::MaxBy => "max_by",
            Builtin::Sum => "sum",
            Builtin::Avg => "avg",
            Builtin::Floor => "floor",
            Builtin::Ceil => "ceil",
            Builtin::Abs => "abs",
            Builtin::Merge => "merge",
            Builtin::Flatten => "flatten",
            Builtin::Join => "join",
            Builtin::Split => "split",
            Builtin::Trim => "trim",
            Builtin::Upper => "upper",
            Builtin::Lower => "lower",
        }
    }

    /// Whether the argument at `position` is a key expression.
    pub fn defers_argument(self, position: usize) -> bool {
        matches!(self, Builtin::SortBy | Builtin::MinBy | Builtin::MaxBy) && position == 1
    }

    pub fn call(self, evaluator: &Evaluator, args: &[FunctionArg<'_>]) -> Result<Value, EvalError> {
        let a0 = value_arg(args, 0);
        let a1 = value_arg(args, 1);

        let result = match self {
            Builtin::Keys => match a0 {
                Value::Object(map) => {
                    Value::Array(map.keys().cloned().map(Value::String).collect())
                }
                _ => Value::Null,
            },
            Builtin::Values => match a0 {
                Value::Object(map) => Value::Array(map.values().cloned().collect()),
                _ => Value::Null,
            },
            Builtin::Length => match a0 {
                Value::Array(arr) => Value::Integer(arr.len() as i64),
                Value::String(s) => Value::Integer(s.chars().count() as i64),
                Value::Object(map) => Value::Integer(map.len() as i64),
                _ => Value::Null,
            },
            Builtin::Type => Value::String(a0.type_name().to_string()),
            Builtin::ToString => Value::String(output::to_json(a0)),
            Builtin::ToNumber => to_number(a0),
            Builtin::NotNull => args
                .iter()
                .filter_map(|arg| match arg {
                    FunctionArg::Value(v) if *v != Value::Null => Some(v.clone()),
                    _ => None,
                })
                .next()
                .unwrap_or(Value::Null),
            Builtin::Contains => Value::Boolean(match a0 {
                Value::Array(arr) => arr.contains(a1),
                Value::String(s) => s.contains(text_of(a1).as_str()),
                _ => false,
            }),
            Builtin::StartsWith => Value::Boolean(match (a0, a1) {
                (Value::String(s), Value::String(prefix)) => s.starts_with(prefix.as_str()),
                _ => false,
            }),
            Builtin::EndsWith => Value::Boolean(match (a0, a1) {
                (Value::String(s), Value::String(suffix)) => s.ends_with(suffix.as_str()),
                _ => false,
            }),
            Builtin::Reverse => match a0 {
                Value::Array(arr) => Value::Array(arr.iter().rev().cloned().collect()),
                Value::String(s) => Value::String(s.chars().rev().collect()),
                _ => Value::Null,
            },
            Builtin::Sort => match a0 {
                Value::Array(arr) => {
                    let mut sorted = arr.clone();
                    sorted.sort_by(order);
                    Value::Array(sorted)
                }
                _ => Value::Null,
            },
            Builtin::SortBy => match (a0, expression_arg(args, 1)) {
                (Value::Array(arr), Some(key)) => sort_by(evaluator, arr, key)?,
                _ => Value::Null,
            },
            Builtin::Min => extremum(a0, Ordering::Less),
            Builtin::Max => extremum(a0, Ordering::Greater),
            Builtin::MinBy => match (a0, expression_arg(args, 1)) {
                (Value::Array(arr), Some(key)) => extremum_by(evaluator, arr, key, Ordering::Less)?,
                _ => Value::Null,
            },
            Builtin::MaxBy => match (a0, expression_arg(args, 1)) {
                (Value::Array(arr), Some(key)) => {
                    extremum_by(evaluator, arr, key, Ordering::Greater)?
                }
                _ => Value::Null,
            },
            Builtin::Sum => match a0 {
                Value::Array(arr) => total(arr).map(|(sum, _)| sum).unwrap_or(Value::Null),
                _ => Value::Null,
            },
            Builtin::Avg => match a0 {
                Value::Array(arr) if !arr.is_empty() => average(arr),
                _ => Value::Null,
            },
            Builtin::Floor => round_with(a0, f64::floor),
            Builtin::Ceil => round_with(a0, f64::ceil),
            Builtin::Abs => match a0 {
                Value::Integer(n) => n
                    .checked_abs()
                    .map(Value::Integer)
                    .unwrap_or(Value::Float((*n as f64).abs())),
                Value::Float(n) => Value::Float(n.abs()),
                _ => Value::Null,
            },
            Builtin::Merge => {
                let mut merged = IndexMap::new();
                for arg in args {
                    if let FunctionArg::Value(Value::Object(map)) = arg {
                        for (k, v) in map {
                            merged.insert(k.clone(), v.clone());
                        }
                    }
                }
                Value::Object(merged)
            }
            Builtin::Flatten => match a0 {
                Value::Array(arr) => {
                    let mut flat = Vec::new();
                    flatten_deep(arr, &mut flat);
                    Value::Array(flat)
                }
                _ => Value::Null,
            },
            Builtin::Join => match a1 {
                Value::Array(arr) => {
                    let parts: Vec<String> = arr.iter().map(Value::as_display_string).collect();
                    Value::String(parts.join(&text_of(a0)))
                }
                _ => Value::Null,
            },
            Builtin::Split => match (a0, a1) {
                (Value::String(sep), Value::String(s)) => Value::Array(split(s, sep)),
                _ => Value::Null,
            },
            Builtin::Trim => map_string(a0, |s| s.trim().to_string()),
            Builtin::Upper => map_string(a0, str::to_uppercase),
            Builtin::Lower => map_string(a0, str::to_lowercase),
        };

        Ok(result)
    }
}

/// Evaluated argument at `position`; missing arguments read as `null`.
fn value_arg<'v>(args: &'v [FunctionArg<'_>], position: usize) -> &'v Value {
    match args.get(position) {
        Some(FunctionArg::Value(v)) => v,
        _ => &NULL,
    }
}

fn expression_arg<'e>(args: &[FunctionArg<'e>], position: usize) -> Option<&'e Expr> {
    match args.get(position) {
        Some(FunctionArg::Expression(expr)) => Some(*expr),
        _ => None,
    }
}

/// Sort comparator; unordered pairs count as equal so the stable sort
/// keeps their input order.
fn order(a: &Value, b: &Value) -> Ordering {
    a.native_cmp(b).unwrap_or(Ordering::Equal)
}

/// Text a value contributes when used as a separator or a substring.
fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => output::to_json(other),
    }
}

fn map_string(value: &Value, f: impl Fn(&str) -> String) -> Value {
    match value {
        Value::String(s) => Value::String(f(s)),
        _ => Value::Null,
    }
}

fn split(s: &str, sep: &str) -> Vec<Value> {
    if sep.is_empty() {
        s.chars().map(|c| Value::String(c.to_string())).collect()
    } else {
        s.split(sep).map(|p| Value::String(p.to_string())).collect()
    }
}

fn flatten_deep(items: &[Value], out: &mut Vec<Value>) {
    for item in items {
        match item {
            Value::Array(inner) => flatten_deep(inner, out),
            other => out.push(other.clone()),
        }
    }
}

fn keyed(
    evaluator: &Evaluator,
    items: &[Value],
    key: &Expr,
) -> Result<Vec<(Value, Value)>, EvalError> {
    let mut result = Vec::with_capacity(items.len());
    for item in items {
        let k = evaluator.eval_expr(key, item)?;
        result.push((k, item.clone()));
    }
    Ok(result)
}

fn sort_by(evaluator: &Evaluator, items: &[Value], key: &Expr) -> Result<Value, EvalError> {
    let mut pairs = keyed(evaluator, items, key)?;
    pairs.sort_by(|(a, _), (b, _)| order(a, b));
    Ok(Value::Array(pairs.into_iter().map(|(_, v)| v).collect()))
}

/// The element whose key orders `wanted` against every earlier winner;
/// the first element wins ties.
fn extremum_by(
    evaluator: &Evaluator,
    items: &[Value],
    key: &Expr,
    wanted: Ordering,
) -> Result<Value, EvalError> {
    let mut best: Option<(Value, Value)> = None;
    for (k, item) in keyed(evaluator, items, key)? {
        match &best {
            Some((best_key, _)) if k.native_cmp(best_key) != Some(wanted) => {}
            _ => best = Some((k, item)),
        }
    }
    Ok(best.map(|(_, item)| item).unwrap_or(Value::Null))
}

/// `min`/`max` over an all-number or all-string array.
fn extremum(value: &Value, wanted: Ordering) -> Value {
    let Value::Array(arr) = value else {
        return Value::Null;
    };
    let homogeneous = arr.iter().all(Value::is_number)
        || arr.iter().all(|v| matches!(v, Value::String(_)));
    if !homogeneous {
        return Value::Null;
    }

    let mut best: Option<&Value> = None;
    for item in arr {
        match best {
            Some(current) if item.native_cmp(current) != Some(wanted) => {}
            _ => best = Some(item),
        }
    }
    best.cloned().unwrap_or(Value::Null)
}

/// Numeric coercion used by `to_number`, `sum` and `avg`.
pub fn to_number(value: &Value) -> Value {
    match value {
        Value::Integer(_) | Value::Float(_) => value.clone(),
        Value::Null => Value::Integer(0),
        Value::Boolean(b) => Value::Integer(i64::from(*b)),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                Value::Integer(0)
            } else if let Ok(n) = s.parse::<i64>() {
                Value::Integer(n)
            } else {
                match s.parse::<f64>() {
                    Ok(n) if n.is_finite() => Value::Float(n),
                    _ => Value::Null,
                }
            }
        }
        Value::Array(_) | Value::Object(_) => Value::Null,
    }
}

fn to_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Integer(n) => Decimal::from_i64(*n),
        Value::Float(n) => Decimal::from_f64(*n),
        _ => None,
    }
}

fn from_decimal(d: Decimal) -> Option<Value> {
    if d.is_integer()
        && let Some(n) = d.to_i64()
    {
        return Some(Value::Integer(n));
    }
    d.to_f64().map(Value::Float)
}

/// Sum of the coerced elements, or `None` when one does not coerce.
///
/// Decimal arithmetic keeps `0.1 + 0.2` exact and whole results integral;
/// the float total takes over if the decimal range is exceeded.
fn total(items: &[Value]) -> Option<(Value, Option<Decimal>)> {
    let mut exact = Some(Decimal::ZERO);
    let mut approx = 0.0;

    for item in items {
        let n = to_number(item);
        approx += n.as_float()?;
        exact = exact.and_then(|acc| to_decimal(&n).and_then(|d| acc.checked_add(d)));
    }

    let sum = exact
        .and_then(from_decimal)
        .unwrap_or(Value::Float(approx));
    Some((sum, exact))
}

fn average(items: &[Value]) -> Value {
    let Some((sum, exact)) = total(items) else {
        return Value::Null;
    };
    let count = items.len();

    exact
        .and_then(|d| d.checked_div(Decimal::from(count)))
        .and_then(from_decimal)
        .or_else(|| sum.as_float().map(|s| Value::Float(s / count as f64)))
        .unwrap_or(Value::Null)
}

fn round_with(value: &Value, f: fn(f64) -> f64) -> Value {
    match value {
        Value::Integer(_) => value.clone(),
        Value::Float(n) => {
            let rounded = f(*n);
            if rounded.is_finite() && rounded.abs() < i64::MAX as f64 {
                Value::Integer(rounded as i64)
            } else {
                Value::Float(rounded)
            }
        }
        _ => Value::Null,
    }
}
