pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod convert;
pub mod evaluator;
pub mod functions;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod value;

pub use ast::{CompareOp, Expr, Token};
pub use evaluator::{EvalError, Evaluator, FunctionArg};
pub use functions::Builtin;
pub use lexer::{Lexer, tokenize};
pub use output::{to_json, to_json_pretty};
pub use parser::{ParseError, Parser, parse};
pub use value::Value;

/// Errors surfaced by [`search`]; the message is meant to be shown to the
/// user as is.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// Malformed query text
    #[error("Syntax error: {0}")]
    Syntax(#[from] ParseError),

    /// Failure while evaluating a well-formed query
    #[error("Runtime error: {0}")]
    Runtime(#[from] EvalError),
}

/// Tokenizes and parses a query without evaluating it.
pub fn compile(query: &str) -> Result<Expr, ParseError> {
    let tokens = tokenize(query.trim());
    log::debug!("tokenized {:?} into {} token(s)", query, tokens.len());

    let expr = parse(tokens)?;
    log::debug!("parsed {:?} as {:?}", query, expr);
    Ok(expr)
}

/// Evaluates `query` against `document` and returns the derived value.
///
/// # Examples
///
/// ```
/// use jmesq::{search, convert::from_json};
/// use serde_json::json;
///
/// let doc = from_json(json!({"a": {"b": 1}}));
/// assert_eq!(search(&doc, "a.b").unwrap(), from_json(json!(1)));
/// assert!(search(&doc, "[?").is_err());
/// ```
pub fn search(document: &Value, query: &str) -> Result<Value, SearchError> {
    let expr = compile(query)?;
    Ok(Evaluator::new().eval_expression(&expr, document)?)
}

/// [`search`] over `serde_json` values.
pub fn search_json(
    document: &serde_json::Value,
    query: &str,
) -> Result<serde_json::Value, SearchError> {
    let document = convert::from_json(document.clone());
    search(&document, query).map(convert::to_json)
}
