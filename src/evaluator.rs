use crate::{
    ast::{CompareOp, Expr},
    functions::Builtin,
    value::Value,
};

/// Errors that can occur during query evaluation.
///
/// Type mismatches never raise; they evaluate to `null`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    /// Call to a function name the library does not define
    #[error("Unknown function: {0}()")]
    UnknownFunction(String),
}

/// A function argument, either evaluated up front or handed over as an
/// expression for the function to evaluate per element.
#[derive(Debug, Clone)]
pub enum FunctionArg<'a> {
    Value(Value),
    Expression(&'a Expr),
}

/// The query evaluator.
///
/// Evaluation is a pure function of an expression and a current value. The
/// input is only ever borrowed; every result is a newly built value.
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluates an expression against a JSON document.
    ///
    /// # Examples
    ///
    /// ```
    /// use jmesq::{Evaluator, Expr, Value};
    ///
    /// let evaluator = Evaluator::new();
    /// let expr = Expr::Current;
    /// let doc = Value::Integer(42);
    ///
    /// let result = evaluator.eval_expression(&expr, &doc).unwrap();
    /// assert_eq!(result, Value::Integer(42));
    /// ```
    pub fn eval_expression(&self, expr: &Expr, document: &Value) -> Result<Value, EvalError> {
        self.eval_expr(expr, document)
    }

    pub(crate) fn eval_expr(&self, expr: &Expr, current: &Value) -> Result<Value, EvalError> {
        match expr {
            Expr::Current => Ok(current.clone()),
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Identifier(name) => Ok(match current {
                Value::Object(map) => map.get(name).cloned().unwrap_or(Value::Null),
                _ => Value::Null,
            }),
            Expr::SubExpression { left, right } | Expr::Pipe { left, right } => {
                let base = self.eval_expr(left, current)?;
                self.eval_expr(right, &base)
            }
            Expr::Index { object, index } => {
                let base = self.eval_expr(object, current)?;
                Ok(index_array(&base, *index))
            }
            Expr::Wildcard(object) => Ok(match self.eval_expr(object, current)? {
                arr @ Value::Array(_) => arr,
                Value::Object(map) => Value::Array(map.into_values().collect()),
                _ => Value::Null,
            }),
            Expr::ValueProjection(object) => Ok(match self.eval_expr(object, current)? {
                Value::Object(map) => Value::Array(map.into_values().collect()),
                _ => Value::Null,
            }),
            Expr::Flatten(object) => Ok(match self.eval_expr(object, current)? {
                Value::Array(items) => Value::Array(flatten_once(items)),
                _ => Value::Null,
            }),
            Expr::Filter { object, condition } => {
                let items = match self.eval_expr(object, current)? {
                    Value::Array(items) => items,
                    Value::Null => Vec::new(),
                    other => vec![other],
                };
                self.filter_array(items, condition).map(Value::Array)
            }
            Expr::MultiSelectList(items) => {
                let mut arr = Vec::with_capacity(items.len());
                for item in items {
                    arr.push(self.eval_expr(item, current)?);
                }
                Ok(Value::Array(arr))
            }
            Expr::MultiSelectHash(fields) => {
                let mut map = indexmap::IndexMap::with_capacity(fields.len());
                for (key, expr) in fields {
                    let value = self.eval_expr(expr, current)?;
                    map.insert(key.clone(), value);
                }
                Ok(Value::Object(map))
            }
            Expr::Compare { op, left, right } => {
                let left_val = self.eval_expr(left, current)?;
                let right_val = self.eval_expr(right, current)?;
                Ok(Value::Boolean(compare(*op, &left_val, &right_val)))
            }
            Expr::Or { left, right } => {
                let left_val = self.eval_expr(left, current)?;
                if left_val.is_truthy() {
                    Ok(left_val)
                } else {
                    self.eval_expr(right, current)
                }
            }
            Expr::And { left, right } => {
                let left_val = self.eval_expr(left, current)?;
                if left_val.is_truthy() {
                    self.eval_expr(right, current)
                } else {
                    Ok(left_val)
                }
            }
            Expr::Not(expr) => {
                let value = self.eval_expr(expr, current)?;
                Ok(Value::Boolean(!value.is_truthy()))
            }
            Expr::FunctionCall { name, args } => self.eval_function_call(name, args, current),
            // Only meaningful as a function argument
            Expr::ExpressionRef(_) => Ok(Value::Null),
        }
    }

    fn filter_array(&self, items: Vec<Value>, condition: &Expr) -> Result<Vec<Value>, EvalError> {
        let mut result = Vec::new();

        for item in items {
            if self.eval_expr(condition, &item)?.is_truthy() {
                result.push(item);
            }
        }

        Ok(result)
    }

    /// Resolve the function, then prepare its arguments: key-expression
    /// positions are handed over unevaluated, everything else is evaluated
    /// against the current value.
    fn eval_function_call(
        &self,
        name: &str,
        args: &[Expr],
        current: &Value,
    ) -> Result<Value, EvalError> {
        let builtin =
            Builtin::from_name(name).ok_or_else(|| EvalError::UnknownFunction(name.to_string()))?;

        let mut prepared = Vec::with_capacity(args.len());
        for (position, arg) in args.iter().enumerate() {
            if builtin.defers_argument(position) {
                let key = match arg {
                    Expr::ExpressionRef(inner) => inner.as_ref(),
                    other => other,
                };
                prepared.push(FunctionArg::Expression(key));
            } else {
                prepared.push(FunctionArg::Value(self.eval_expr(arg, current)?));
            }
        }

        log::trace!("calling {}() with {} argument(s)", name, prepared.len());
        builtin.call(self, &prepared)
    }
}

fn index_array(value: &Value, index: i64) -> Value {
    let Value::Array(arr) = value else {
        return Value::Null;
    };
    let position = if index < 0 {
        match arr.len().checked_sub(index.unsigned_abs() as usize) {
            Some(p) => p,
            None => return Value::Null,
        }
    } else {
        index as usize
    };
    arr.get(position).cloned().unwrap_or(Value::Null)
}

fn flatten_once(items: Vec<Value>) -> Vec<Value> {
    let mut result = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Array(inner) => result.extend(inner),
            other => result.push(other),
        }
    }
    result
}

/// Equality is structural; the ordering operators are `false` for pairs
/// without a native order.
fn compare(op: CompareOp, left: &Value, right: &Value) -> bool {
    match op {
        CompareOp::Equal => left == right,
        CompareOp::NotEqual => left != right,
        CompareOp::LessThan => left.native_cmp(right).is_some_and(|o| o.is_lt()),
        CompareOp::GreaterThan => left.native_cmp(right).is_some_and(|o| o.is_gt()),
        CompareOp::LessEqual => left.native_cmp(right).is_some_and(|o| o.is_le()),
        CompareOp::GreaterEqual => left.native_cmp(right).is_some_and(|o| o.is_ge()),
    }
}
