//! # Validation Rules for GraphQL operations
//!
//! This module contains the checks an operation has to pass before it may be rendered. Since
//! this crate never sees a schema, the checks are purely syntactic and are grouped into this
//! module's [`DefaultRules`](rules::DefaultRules). Utilities to create your own
//! [`ValidationRules`](ValidationRule) are provided as well.
//!
//! The rules this module already comes with are:
//!
//! - [`rules::KnownOperationKind`]: validates that the operation's kind has been set
//! - [`rules::ValidNames`]: validates operation names, field names, aliases, argument names, and enum values against GraphQL's name grammar
//! - [`rules::NoMissingFields`]: validates that no reserved field slot was left empty
//!
//! The [visit](crate::visit) module is used to actually execute validation rules.
//! The [`ValidationRule`] trait is simply defined to implement the [Visitor](crate::visit::Visitor) trait
//! and to accept the [`ValidationContext`], which is used to keep track of validation errors.
//!
//! As such, the [`DefaultRules`](rules::DefaultRules) rule is a [`ValidationRule`] itself that's
//! composed using the [`ComposedVisitor`](crate::visit::ComposedVisitor) utility.
//!
//! Validation either stops at the first violation or collects all of them, depending on the
//! [`ValidationMode`]. The former is what `Query::validate` does and what happens before a
//! query is printed:
//!
//! ```
//! use graphql_query_builder::{ast::*, validate::*};
//!
//! let ctx = ASTContext::new();
//! let query = Query::new(&ctx, OperationKind::Query).with_fields([Field::new(&ctx, "field")]);
//!
//! DefaultRules::validate(&query).unwrap()
//! ```
//!
//! Another way is to utilize the [`ValidateNode`] trait instead to run validation starting from an
//! AST Node rather from the rule itself:
//!
//! ```
//! use graphql_query_builder::{ast::*, validate::*};
//!
//! let ctx = ASTContext::new();
//! let query = Query::new(&ctx, OperationKind::Query).with_fields([Field::new(&ctx, "1field")]);
//!
//! let error = query.validate_rule::<DefaultRules>(ValidationMode::Collect).unwrap_err();
//! assert_eq!(error.error_type(), graphql_query_builder::error::ErrorType::InvalidName(
//!     graphql_query_builder::error::NameKind::Field
//! ));
//! ```

#[allow(clippy::module_inception)]
mod validate;

mod context;

pub mod rules;
pub use context::{ValidationContext, ValidationMode};
pub use rules::DefaultRules;
pub use validate::*;
