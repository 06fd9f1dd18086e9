//! # GraphQL Operation AST
//!
//! The `graphql_query_builder::ast` module contains the tree an operation is built from and the
//! traits that turn it into GraphQL source text. Only the parts of the query language that are
//! needed to send a request are modelled: an operation with an optional name, fields with aliases,
//! arguments, and sub-selections, and literal argument values.
//! [Reference](https://spec.graphql.org/October2021/#sec-Language)
//!
//! It's easiest to use this module by importing all of it, however, its three main parts are:
//! - [`ASTContext`], a context containing an arena that defines the lifetime for an AST
//! - [`TokenNode`], a trait using which AST Nodes lazily produce a stream of [Token]s
//! - [`PrintNode`], a trait using which AST Nodes are printed into source text
//!
//! The following workflow describes the minimum that's done using this module and while an AST
//! Context is active in the given scope.
//!
//! ```
//! use graphql_query_builder::ast::*;
//!
//! // Create an AST Context for an operation
//! let ctx = ASTContext::new();
//!
//! // Build a Query AST root node
//! let query = Query::new(&ctx, OperationKind::Query)
//!     .with_name(&ctx, "Foo")
//!     .with_fields([Field::new(&ctx, "bar").with_arguments([Argument::new(&ctx, "n", 1)])]);
//!
//! // Validate and print the Query node to an output String
//! let output = query.print().unwrap();
//! assert_eq!(output, "query Foo{bar(n:1),}");
//! ```

#[allow(clippy::module_inception)]
mod ast;

mod ast_conversion;
mod lexer;
mod printer;
mod tokens;

pub use ast::*;
pub use lexer::is_name;
pub use printer::PrintNode;
pub use tokens::{Token, TokenNode, Tokens};
