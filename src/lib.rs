//! `graphql_query_builder`
//! =========
//!
//! _Building GraphQL operations in code and rendering them lazily._
//!
//! The **`graphql_query_builder`** library follows two goals:
//!
//! - To support a pleasant-to-use API to assemble GraphQL queries, mutations, and subscriptions
//! - To only ever render operations that are syntactically well-formed
//!
//! An operation is built as a tree of fields, arguments, and literal values that's allocated on
//! an arena. Before any text is produced the tree is validated: the operation kind has to be set,
//! all names have to be valid GraphQL names, and every reserved field slot has to be filled. The
//! text itself is then produced lazily as a stream of tokens, which may be written into any buffer
//! or collected into a `String`.
//!
//! This crate doesn't parse GraphQL, doesn't know about schemas, and doesn't send requests. It
//! does not check whether arguments match the types a server expects, only that the document
//! it renders is valid GraphQL syntax.
//!
//! [A good place to start learning more about this crate is the `ast` module...](ast)

pub mod ast;
pub mod error;
pub mod validate;
pub mod visit;

pub use bumpalo;

#[cfg(feature = "json")]
pub mod json;
