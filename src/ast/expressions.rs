use crate::{ast::CompareOp, value::Value};

/// Abstract Syntax Tree node representing a parsed expression.
///
/// The AST is the internal representation of a query after parsing.
/// Every child is a complete expression that can be evaluated on its own.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Current value (`@`)
    ///
    /// A bare `*` in primary position also parses to this.
    Current,

    /// Value embedded in the query
    ///
    /// # Examples
    /// ```text
    /// `{"a": 1}`
    /// 'text'
    /// -3
    /// ```
    Literal(Value),

    /// Field of the current value
    ///
    /// # Examples
    /// ```text
    /// name
    /// "first name"
    /// ```
    Identifier(String),

    /// Evaluate `right` against the result of `left`
    ///
    /// # Example
    /// ```text
    /// user.name
    /// ```
    SubExpression { left: Box<Expr>, right: Box<Expr> },

    /// Evaluate `right` against the result of `left`
    ///
    /// Evaluates exactly like [`Expr::SubExpression`]; a pipe does not
    /// end a projection.
    ///
    /// # Example
    /// ```text
    /// people[?active] | length(@)
    /// ```
    Pipe { left: Box<Expr>, right: Box<Expr> },

    /// `left || right`, yielding the first truthy operand
    Or { left: Box<Expr>, right: Box<Expr> },

    /// `left && right`, yielding the first falsy operand
    And { left: Box<Expr>, right: Box<Expr> },

    /// `!expr`, always a boolean
    Not(Box<Expr>),

    /// Comparison of two evaluated operands
    Compare {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Fixed-position array access, negative indices count from the end
    ///
    /// # Examples
    /// ```text
    /// items[0]
    /// items[-1]
    /// ```
    Index { object: Box<Expr>, index: i64 },

    /// Array projection (`[*]`)
    Wildcard(Box<Expr>),

    /// Object-values projection (`.*`)
    ValueProjection(Box<Expr>),

    /// One-level array flattening (`[]`)
    Flatten(Box<Expr>),

    /// Predicate projection (`[?condition]`)
    ///
    /// `condition` is evaluated against each element in turn.
    Filter {
        object: Box<Expr>,
        condition: Box<Expr>,
    },

    /// List built from sub-expressions
    ///
    /// # Example
    /// ```text
    /// [name, age]
    /// ```
    MultiSelectList(Vec<Expr>),

    /// Object built from sub-expressions, keys in declaration order
    ///
    /// # Example
    /// ```text
    /// {n: name, a: age}
    /// ```
    MultiSelectHash(Vec<(String, Expr)>),

    /// Built-in function call
    ///
    /// Arguments stay unevaluated until the function decides how to use
    /// them.
    ///
    /// # Examples
    /// ```text
    /// length(items)
    /// sort_by(people, &age)
    /// ```
    FunctionCall { name: String, args: Vec<Expr> },

    /// Expression reference (`&expr`), a key expression handed to a
    /// function instead of a value
    ExpressionRef(Box<Expr>),
}
