use super::super::{ValidationContext, ValidationRule};
use crate::error::{Error, ErrorType};
use crate::{ast::*, visit::*};

/// Validates that an operation selects at least one field and that every field slot that was
/// reserved in a selection set has been filled.
///
/// See [`ValidationRule`]
#[derive(Default)]
pub struct NoMissingFields;

impl<'a> ValidationRule<'a> for NoMissingFields {}

impl<'a> Visitor<'a, ValidationContext> for NoMissingFields {
    fn enter_query(
        &mut self,
        ctx: &mut ValidationContext,
        query: &'a Query<'a>,
        info: &VisitInfo,
    ) -> VisitFlow {
        if ctx.is_done() {
            return VisitFlow::Break;
        }
        if query.selection_set.selections.is_empty() {
            let mut path = info.path.clone();
            path.push(PathSegment::SelectionSet);
            ctx.add_error(
                Error::new("Operation must select at least one field", ErrorType::MissingField)
                    .with_path(path),
            );
        }
        ctx.flow()
    }

    fn enter_argument(
        &mut self,
        ctx: &mut ValidationContext,
        _argument: &'a Argument<'a>,
        _info: &VisitInfo,
    ) -> VisitFlow {
        match ctx.flow() {
            VisitFlow::Next => VisitFlow::Skip,
            flow => flow,
        }
    }

    fn missing_field(
        &mut self,
        ctx: &mut ValidationContext,
        _selection_set: &'a SelectionSet<'a>,
        info: &VisitInfo,
    ) -> VisitFlow {
        if ctx.is_done() {
            return VisitFlow::Break;
        }
        let message = match info.path.segments.last() {
            Some(PathSegment::Index(index)) => format!("Field at index {index} was never set"),
            _ => "Field was never set".to_string(),
        };
        ctx.add_error(Error::new(message, ErrorType::MissingField).with_path(info.path.clone()));
        ctx.flow()
    }
}
