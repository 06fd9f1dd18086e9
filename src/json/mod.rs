//! # JSON Conversion
//!
//! The `graphql_query_builder::json` module contains utilities to convert from and to `serde_json`
//! values and to wrap an operation into a JSON request body. It's only available with the `json`
//! feature, which is enabled by default.
//!
//! The [ValueFromNode] trait allows conversion to `serde_json` values using a `to_json` method on
//! any given value. This methods converts without using any type information.
//!
//! The module otherwise only contains a handful of utilities:
//!
//! - `Query::json_body` validates and prints a query and wraps it as `{"query":"..."}`.
//! - [ast_from_value_untyped] is used to convert a JSON value to an AST value without casting.
//! - [ast_arguments_from_value] is used to convert a JSON object to a list of arguments.

#[cfg(feature = "json")]
extern crate serde_json;

#[cfg(feature = "json")]
extern crate serde;

mod conversion;
mod request;
mod values;

pub use conversion::*;
pub use values::*;
