use super::super::{ValidationContext, ValidationRule};
use crate::error::{Error, ErrorType};
use crate::{ast::*, visit::*};

/// Validates that a query's operation kind has been set to one of `query`, `mutation`, or
/// `subscription`.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#OperationType)
#[derive(Default)]
pub struct KnownOperationKind;

impl<'a> ValidationRule<'a> for KnownOperationKind {}

impl<'a> Visitor<'a, ValidationContext> for KnownOperationKind {
    fn enter_query(
        &mut self,
        ctx: &mut ValidationContext,
        query: &'a Query<'a>,
        info: &VisitInfo,
    ) -> VisitFlow {
        if ctx.is_done() {
            return VisitFlow::Break;
        }
        if query.operation.is_none() {
            ctx.add_error(
                Error::new(
                    "Operation type is not set, expected one of query, mutation, or subscription",
                    ErrorType::InvalidOperationType,
                )
                .with_path(info.path.clone()),
            );
        }
        // Nothing below the query root is relevant to this rule
        match ctx.flow() {
            VisitFlow::Next => VisitFlow::Skip,
            flow => flow,
        }
    }
}
