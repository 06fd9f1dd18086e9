use crate::visit::ComposedVisitor;

mod known_operation_kind;
mod no_missing_fields;
mod valid_names;

pub use super::context::ValidationContext;
pub use known_operation_kind::*;
pub use no_missing_fields::*;
pub use valid_names::*;

/// The rules every field of an operation must pass, combined into one `ValidationRule`.
///
/// See: [`ComposedVisitor`]
pub type FieldRules<'a> = ComposedVisitor<'a, ValidationContext, ValidNames, NoMissingFields>;

/// All rules an operation must pass before it's rendered, combined into one `ValidationRule`.
///
/// Rules are called in order on each node, so on the same node an unset operation kind is reported
/// before an invalid name, which is reported before an empty field slot.
///
/// See: [`ComposedVisitor`]
pub type DefaultRules<'a> = ComposedVisitor<
    'a,
    ValidationContext,
    KnownOperationKind,
    FieldRules<'a>,
>;
