//! # Visiting GraphQL operations
//!
//! The `graphql_query_builder::visit` module contains utilities to traverse a [`Query`](crate::ast::Query)
//! and its fields, arguments, and values. Mainly, this module exposes the [Visitor] trait, which
//! can be used to implement a visitor, and the [`VisitNode`] trait that all traversable AST nodes
//! implement and where visiting can start.
//!
//! Visitors are how this crate validates queries before printing them, but they may also be used
//! to gain any other information about a query tree.
//!
//! In this example we'll define a visitor that counts all leaf fields of a query:
//!
//! ```
//! use graphql_query_builder::{ast::*, visit::*};
//!
//! #[derive(Default)]
//! struct CountLeaves {
//!    leaves: usize,
//! }
//!
//! impl<'a> Visitor<'a> for CountLeaves {
//!     fn enter_argument(
//!         &mut self,
//!         _ctx: &mut (),
//!         _argument: &'a Argument<'a>,
//!         _info: &VisitInfo
//!     ) -> VisitFlow {
//!         // We can skip over arguments and never traverse their values,
//!         // since we're only interested in fields
//!         VisitFlow::Skip
//!     }
//!
//!     fn enter_field(
//!         &mut self,
//!         _ctx: &mut (),
//!         field: &'a Field<'a>,
//!         _info: &VisitInfo
//!     ) -> VisitFlow {
//!         if field.is_leaf() {
//!             self.leaves += 1;
//!         }
//!         VisitFlow::Next
//!     }
//! }
//!
//! let ctx = ASTContext::new();
//! let query = Query::new(&ctx, OperationKind::Query).with_fields([
//!     Field::new(&ctx, "user").with_fields([Field::new(&ctx, "id"), Field::new(&ctx, "name")]),
//! ]);
//!
//! let mut visitor = CountLeaves::default();
//! query.visit(&mut (), &mut visitor);
//! assert_eq!(visitor.leaves, 2);
//! ```
//!
//! [More information on the Visitor trait](Visitor)

mod compose;
mod path;
mod visitor;

pub use compose::ComposedVisitor;
pub use path::*;
pub use visitor::*;
