//! Documentation content for the jmesq CLI

use super::CliError;
use crate::Builtin;

/// Available documentation topics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocTopic {
    Syntax,
    Operators,
    Projections,
    Functions,
}

impl DocTopic {
    /// Parse topic name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" => Some(Self::Syntax),
            "operators" | "ops" => Some(Self::Operators),
            "projections" | "projection" => Some(Self::Projections),
            "functions" | "function" | "fns" => Some(Self::Functions),
            _ => None,
        }
    }
}

/// Get the docs overview (topic listing)
pub fn get_docs_overview() -> &'static str {
    r#"JMESQ DOCUMENTATION

jmesq evaluates a JMESPath-style query against a JSON document and prints the
derived JSON value. Every expression is evaluated against a current value,
which starts out as the whole document.

DOCUMENTATION TOPICS

  syntax            Fields, indices, literals, multi-select lists and hashes
  operators         Comparison, logical and pipe operators
  projections       Wildcards, value projections, flattening and filters
  functions         The built-in function library

QUICK REFERENCE

  @                 Current value
  a.b               Field of a field
  items[0]          Array index (negative counts from the end)
  items[?x > `1`]   Filter
  [a, b]  {k: a}    Multi-select list / hash
  a | f(@)          Pipe into a function

Run 'jmesq doc <topic>' for detailed documentation.
"#
}

/// Get documentation for a specific topic
pub fn get_doc_topic(name: &str) -> Result<String, CliError> {
    match DocTopic::from_name(name) {
        Some(DocTopic::Syntax) => Ok(SYNTAX_DOC.to_string()),
        Some(DocTopic::Operators) => Ok(OPERATORS_DOC.to_string()),
        Some(DocTopic::Projections) => Ok(PROJECTIONS_DOC.to_string()),
        Some(DocTopic::Functions) => Ok(functions_doc()),
        None => Err(CliError::UnknownTopic(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX

CURRENT VALUE
  @                 The value being evaluated (initially the document)

FIELDS
  name              Field of the current object, null if absent
  "first name"      Double quotes name a field with any characters
  a.b.c             Nested fields

INDICES
  items[0]          First element
  items[-1]         Last element
  [1]               Index into the current value

LITERALS
  `true`            Raw literal, read as JSON
  `[1, 2]`          Any JSON value
  'text'            String literal
  42  -7            Numbers

MULTI-SELECT
  [name, age]       Array of several expressions
  {n: name, a: age} Object of several expressions, keys in order written

GROUPING
  (a || b).c        Parentheses group an expression
"#;

const OPERATORS_DOC: &str = r#"OPERATORS

COMPARISON
  ==  !=            Deep structural equality
  <  >  <=  >=      Numbers and strings; other pairs compare false

LOGICAL
  a || b            a if truthy, otherwise b
  a && b            a if falsy, otherwise b
  !a                true when a is falsy

  Falsy values: null, false, "", [], {}. Everything else is truthy,
  including 0.

PIPE
  a | b             Evaluate b against the result of a

PRECEDENCE (loosest first)
  |   ||   &&   comparisons   !   projections
"#;

const PROJECTIONS_DOC: &str = r#"PROJECTIONS

  items[*]          The array itself, or an object's values
  obj.*             An object's values
  items[]           Flatten nested arrays one level
  items[?cond]      Elements for which cond is truthy; cond sees each
                    element as @

  A projection yields an array; the expression after it is evaluated
  against that array as a whole, so pipe and dot behave the same.

EXAMPLES
  people[?age >= `18`]
  sort_by(people, &age)[0].name
  orders[?status == 'open' && total > `100`]
"#;

fn functions_doc() -> String {
    let mut doc = String::from("FUNCTIONS\n\n");
    for builtin in Builtin::ALL {
        doc.push_str(&format!("  {:<13} {}\n", builtin.name(), summary(builtin)));
    }
    doc.push_str(
        "\n  Arguments of the wrong type produce null rather than an error.\n\
         \x20 sort_by, min_by and max_by take a key expression: sort_by(items, &price)\n",
    );
    doc
}

fn summary(builtin: Builtin) -> &'static str {
    match builtin {
        Builtin::Keys => "keys(obj) - keys of an object",
        Builtin::Values => "values(obj) - values of an object",
        Builtin::Length => "length(x) - size of an array, string or object",
        Builtin::Type => "type(x) - null, boolean, number, string, array or object",
        Builtin::ToString => "to_string(x) - compact JSON text",
        Builtin::ToNumber => "to_number(x) - numeric coercion",
        Builtin::NotNull => "not_null(a, b, ...) - first argument that is not null",
        Builtin::Contains => "contains(arr|str, v) - membership test",
        Builtin::StartsWith => "starts_with(s, prefix)",
        Builtin::EndsWith => "ends_with(s, suffix)",
        Builtin::Reverse => "reverse(arr|str) - reversed copy",
        Builtin::Sort => "sort(arr) - ascending, stable",
        Builtin::SortBy => "sort_by(arr, &key) - ascending by key, stable",
        Builtin::Min => "min(arr) - smallest number or string",
        Builtin::Max => "max(arr) - largest number or string",
        Builtin::MinBy => "min_by(arr, &key) - element with the smallest key",
        Builtin::MaxBy => "max_by(arr, &key) - element with the largest key",
        Builtin::Sum => "sum(arr) - total",
        Builtin::Avg => "avg(arr) - mean, null when empty",
        Builtin::Floor => "floor(n)",
        Builtin::Ceil => "ceil(n)",
        Builtin::Abs => "abs(n)",
        Builtin::Merge => "merge(a, b, ...) - shallow merge, later keys win",
        Builtin::Flatten => "flatten(arr) - flatten all levels",
        Builtin::Join => "join(sep, arr) - join into a string",
        Builtin::Split => "split(sep, s) - split a string",
        Builtin::Trim => "trim(s)",
        Builtin::Upper => "upper(s)",
        Builtin::Lower => "lower(s)",
    }
}
