use super::super::{ValidationContext, ValidationRule};
use crate::error::{Error, ErrorType, NameKind};
use crate::{ast::*, visit::*};

/// Validates that all names of an operation match GraphQL's name grammar.
///
/// This checks the operation's name, every field's name and alias, the names of arguments and of
/// object fields nested inside argument values, and all enum values. An empty operation name or
/// alias counts as absent, while an empty field name is rejected. Enum values may additionally not
/// be `true`, `false`, or `null`.
///
/// See [`ValidationRule`]
/// [Reference](https://spec.graphql.org/October2021/#Name)
#[derive(Default)]
pub struct ValidNames;

impl<'a> ValidationRule<'a> for ValidNames {}

fn is_enum_value(value: &str) -> bool {
    !matches!(value, "true" | "false" | "null") && is_name(value)
}

fn invalid_name(kind: NameKind, name: &str, info: &VisitInfo) -> Error {
    let message = match kind {
        NameKind::Operation => format!("Operation name `{name}` is invalid"),
        NameKind::Field if name.is_empty() => "Field name must not be empty".to_string(),
        NameKind::Field => format!("Field name `{name}` is invalid"),
        NameKind::Alias => format!("Alias `{name}` is invalid"),
        NameKind::Argument => format!("Argument name `{name}` is invalid"),
        NameKind::Enum => format!("Enum value `{name}` is invalid"),
    };
    Error::new(message, ErrorType::InvalidName(kind)).with_path(info.path.clone())
}

impl<'a> Visitor<'a, ValidationContext> for ValidNames {
    fn enter_query(
        &mut self,
        ctx: &mut ValidationContext,
        query: &'a Query<'a>,
        info: &VisitInfo,
    ) -> VisitFlow {
        if ctx.is_done() {
            return VisitFlow::Break;
        }
        match query.name() {
            Some(name) if !is_name(name) => {
                ctx.add_error(invalid_name(NameKind::Operation, name, info))
            }
            _ => {}
        }
        ctx.flow()
    }

    fn enter_field(
        &mut self,
        ctx: &mut ValidationContext,
        field: &'a Field<'a>,
        info: &VisitInfo,
    ) -> VisitFlow {
        if ctx.is_done() {
            return VisitFlow::Break;
        }
        if !is_name(field.name) {
            ctx.add_error(invalid_name(NameKind::Field, field.name, info));
        }
        match field.alias {
            Some(alias) if !alias.is_empty() && !is_name(alias) => {
                ctx.add_error(invalid_name(NameKind::Alias, alias, info))
            }
            _ => {}
        }
        ctx.flow()
    }

    fn enter_argument(
        &mut self,
        ctx: &mut ValidationContext,
        argument: &'a Argument<'a>,
        info: &VisitInfo,
    ) -> VisitFlow {
        if ctx.is_done() {
            return VisitFlow::Break;
        }
        if !is_name(argument.name) {
            ctx.add_error(invalid_name(NameKind::Argument, argument.name, info));
        }
        ctx.flow()
    }

    fn enter_value(
        &mut self,
        ctx: &mut ValidationContext,
        value: &'a Value<'a>,
        info: &VisitInfo,
    ) -> VisitFlow {
        if ctx.is_done() {
            return VisitFlow::Break;
        }
        match value {
            Value::Enum(value) if !is_enum_value(value) => {
                ctx.add_error(invalid_name(NameKind::Enum, value, info));
            }
            Value::EnumList(values) => {
                for (index, value) in values.iter().enumerate() {
                    if !is_enum_value(value) {
                        let mut error = invalid_name(NameKind::Enum, value, info);
                        if let Some(path) = error.path.as_mut() {
                            path.push(PathSegment::Index(index));
                        }
                        ctx.add_error(error);
                    }
                }
            }
            _ => {}
        }
        ctx.flow()
    }
}
