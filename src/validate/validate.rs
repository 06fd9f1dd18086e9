use super::context::{ValidationContext, ValidationMode};
use super::rules::{DefaultRules, FieldRules};
use crate::ast::{Field, Query};
use crate::error::Result;
use crate::visit::{ComposedVisitor, VisitNode, Visitor};
use std::borrow::Borrow;

/// Trait for a `ValidationRule` that checks a given GraphQL operation against its rules using a
/// visitor.
///
/// A rule always implements a visitor and accepts the [`ValidationContext`] structure as
/// its passed context.
///
/// Rules implement the `Default` trait, which allows them to be instantiated easily.
/// The intention of using `Default` is for rules to not carry any external
/// state as for validating an operation no external state is needed.
pub trait ValidationRule<'a>: Visitor<'a, ValidationContext> + Default {
    /// Run this `ValidationRule` against the given query and return a result which errors with the
    /// first violation in depth-first order.
    #[inline]
    fn validate(query: &'a Query<'a>) -> Result<()> {
        Self::validate_with_mode(query, ValidationMode::FailFast)
    }

    /// Run this `ValidationRule` against the whole query and return a result which errors with all
    /// violations aggregated into one error.
    #[inline]
    fn validate_all(query: &'a Query<'a>) -> Result<()> {
        Self::validate_with_mode(query, ValidationMode::Collect)
    }

    /// Run this `ValidationRule` against the given query in the given [`ValidationMode`].
    #[inline]
    fn validate_with_mode(query: &'a Query<'a>, mode: ValidationMode) -> Result<()> {
        Self::validate_node(query, mode)
    }

    /// Run this `ValidationRule` against any AST node that can be visited, e.g. a single [Field].
    ///
    /// Paths of reported errors are relative to the given node.
    fn validate_node<N: VisitNode<'a>>(node: &'a N, mode: ValidationMode) -> Result<()> {
        let mut validation = ValidationContext::new(mode);
        let mut visitor = Self::default();
        node.visit(&mut validation, &mut visitor);
        validation.to_result()
    }
}

impl<'a, A, B> Default for ComposedVisitor<'a, ValidationContext, A, B>
where
    A: ValidationRule<'a>,
    B: ValidationRule<'a>,
{
    #[inline]
    fn default() -> Self {
        ComposedVisitor::new(A::default(), B::default())
    }
}

impl<'a, A, B> ValidationRule<'a> for ComposedVisitor<'a, ValidationContext, A, B>
where
    A: ValidationRule<'a>,
    B: ValidationRule<'a>,
{
}

/// Trait to run a [`ValidationRule`] on a given GraphQL operation.
pub trait ValidateNode<'a>
where
    Self: Borrow<Query<'a>>,
{
    /// Run the generic validation rule on the query and return a result which errors if
    /// the validation rule fails on the current query.
    ///
    /// `query.validate_rule::<YourValidationRule>(ValidationMode::FailFast)`
    #[inline]
    fn validate_rule<Rule: ValidationRule<'a>>(&'a self, mode: ValidationMode) -> Result<()> {
        Rule::validate_with_mode(self.borrow(), mode)
    }
}

impl<'a> ValidateNode<'a> for Query<'a> {}

impl<'a> Query<'a> {
    /// Checks this operation with the [`DefaultRules`] and returns the first violation in
    /// depth-first order.
    ///
    /// The operation kind must be set, all names must be valid GraphQL names, at least one field
    /// must be selected, and no reserved field slot may still be empty.
    ///
    /// Validation visits the tree recursively, so the nesting depth it supports is bounded by the
    /// thread's stack size. Producing [`Tokens`](crate::ast::Tokens) after validation is not.
    pub fn validate(&self) -> Result<()> {
        DefaultRules::validate(self).map_err(|error| {
            log::debug!("Query failed validation: {}", error.print(false));
            error
        })
    }

    /// Checks this operation with the [`DefaultRules`] and returns all violations as one
    /// aggregated error.
    pub fn validate_all(&self) -> Result<()> {
        DefaultRules::validate_all(self).map_err(|error| {
            log::debug!("Query failed validation: {}", error);
            error
        })
    }
}

impl<'a> Field<'a> {
    /// Checks this field and all of its sub-fields with the [`FieldRules`] and returns the first
    /// violation in depth-first order.
    ///
    /// This runs the same checks on the field that `Query::validate` runs on every field of a
    /// query, which makes it possible to check a field before it's added to a query.
    pub fn validate(&self) -> Result<()> {
        FieldRules::validate_node(self, ValidationMode::FailFast)
    }
}
