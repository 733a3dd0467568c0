//! Run queries against JSON input

use super::CliError;
use crate::{Evaluator, Value, compile, convert, output};

/// Options for the search command
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// The query to run
    pub query: String,
    /// JSON input text
    pub input: Option<String>,
    /// Pretty-print the output
    pub pretty: bool,
    /// Only validate syntax, don't execute
    pub syntax_only: bool,
}

/// Result of a search command
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Syntax validation passed
    SyntaxValid,
    /// Query ran; holds the result and its rendered JSON
    Success { value: Value, rendered: String },
}

/// Execute a search command
pub fn execute_search(options: &SearchOptions) -> Result<SearchOutcome, CliError> {
    let expr = compile(&options.query)?;

    if options.syntax_only {
        return Ok(SearchOutcome::SyntaxValid);
    }

    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let document = convert::parse_json(json_str)?;

    let value = Evaluator::new()
        .eval_expression(&expr, &document)
        .map_err(crate::SearchError::from)?;

    let rendered = if options.pretty {
        output::to_json_pretty(&value)
    } else {
        output::to_json(&value)
    };

    Ok(SearchOutcome::Success { value, rendered })
}
