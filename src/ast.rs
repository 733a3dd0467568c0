//! # Query Language - Abstract Syntax Tree
//!
//! This module defines the tokens and the Abstract Syntax Tree (AST) for the
//! query language, a JMESPath-style expression language that derives a new
//! JSON value from a parsed document.
//!
//! ## Architecture Overview
//!
//! The AST module is organized into focused submodules:
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Expression nodes (references, projections, operations, literals)
//! - **[operators]** - Comparison operators
//!
//! ## Quick Start
//!
//! ```text
//! sort_by(people[?age >= `18`], &age)[0].name
//! ```
//!
//! This query keeps the adults, orders them by age and names the youngest.
//!
//! ## Core Concepts
//!
//! ### Current Value
//!
//! Every expression is evaluated against a current value, initially the whole
//! document. `@` refers to it explicitly; a bare name reads a field from it.
//!
//! ### Projections
//!
//! - **Wildcard** `[*]` - the elements of an array (or the values of an object)
//! - **Values** `.*` - the values of an object
//! - **Flatten** `[]` - splices nested arrays one level deep
//! - **Filter** `[?cond]` - the elements for which `cond` is truthy
//!
//! ### Sequencing
//!
//! `a.b` and `a | b` both evaluate the right side against the result of the
//! left side, and behave identically. A projection is not mapped over by
//! what follows it: `items[*].name` reads `name` from the projected array
//! itself, which yields `null`.
//!
//! ### Negative Indices
//!
//! ```text
//! items[-1]  // Last element
//! ```
pub mod expressions;
pub mod operators;
pub mod tokens;

pub use expressions::Expr;
pub use operators::CompareOp;
pub use tokens::Token;
