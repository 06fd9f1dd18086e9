use super::ast::*;
use crate::error::{Error, ErrorType, Result};
use bumpalo::collections::{vec::IntoIter, Vec};
use chrono::{DateTime, FixedOffset, Utc};
use std::any::{type_name, Any};

impl<'a> IntoIterator for ObjectValue<'a> {
    type Item = Argument<'a>;
    type IntoIter = IntoIter<'a, Argument<'a>>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.children.into_iter()
    }
}

impl<'a> IntoIterator for Arguments<'a> {
    type Item = Argument<'a>;
    type IntoIter = IntoIter<'a, Argument<'a>>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.children.into_iter()
    }
}

impl<'a> IntoIterator for SelectionSet<'a> {
    type Item = Option<Field<'a>>;
    type IntoIter = IntoIter<'a, Option<Field<'a>>>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.selections.into_iter()
    }
}

pub trait DefaultIn<'a> {
    fn default_in(arena: &'a bumpalo::Bump) -> Self;
}

impl<'a, T> DefaultIn<'a> for T
where
    T: Default,
{
    fn default_in(_ctx: &'a bumpalo::Bump) -> Self {
        Self::default()
    }
}

impl<'a> DefaultIn<'a> for Query<'a> {
    /// Creates an anonymous Query without fields whose operation kind is still unset.
    fn default_in(arena: &'a bumpalo::Bump) -> Self {
        Query {
            operation: None,
            name: None,
            selection_set: SelectionSet::default_in(arena),
        }
    }
}

impl<'a> DefaultIn<'a> for ObjectValue<'a> {
    fn default_in(arena: &'a bumpalo::Bump) -> Self {
        ObjectValue {
            children: Vec::new_in(arena),
        }
    }
}

impl<'a> DefaultIn<'a> for Arguments<'a> {
    fn default_in(arena: &'a bumpalo::Bump) -> Self {
        Arguments {
            children: Vec::new_in(arena),
        }
    }
}

impl<'a> DefaultIn<'a> for SelectionSet<'a> {
    fn default_in(arena: &'a bumpalo::Bump) -> Self {
        SelectionSet {
            selections: Vec::new_in(arena),
        }
    }
}

impl<'a> Value<'a> {
    /// Converts a dynamically typed value into the matching [Value] variant.
    ///
    /// The runtime type of `value` must be one of `bool`, `i64`, `i32`, `String`, `&'static str`,
    /// `DateTime<FixedOffset>`, `DateTime<Utc>`, or a `Vec` of `bool`, `i64`, `i32`, `String`, or
    /// `&'static str`. Strings are always converted to [`Value::String`]. Any other type results in
    /// an [`ErrorType::UnsupportedArgumentType`] error.
    pub fn from_any<T: Any>(ctx: &'a ASTContext, value: &T) -> Result<Value<'a>> {
        let any = value as &dyn Any;
        if let Some(value) = any.downcast_ref::<bool>() {
            Ok(Value::Boolean(*value))
        } else if let Some(value) = any.downcast_ref::<i64>() {
            Ok(Value::Int(*value))
        } else if let Some(value) = any.downcast_ref::<i32>() {
            Ok(Value::from(*value))
        } else if let Some(value) = any.downcast_ref::<String>() {
            Ok(Value::string(ctx, value))
        } else if let Some(value) = any.downcast_ref::<&'static str>() {
            Ok(Value::string(ctx, value))
        } else if let Some(value) = any.downcast_ref::<DateTime<FixedOffset>>() {
            Ok(Value::Time(*value))
        } else if let Some(value) = any.downcast_ref::<DateTime<Utc>>() {
            Ok(Value::time(*value))
        } else if let Some(values) = any.downcast_ref::<std::vec::Vec<bool>>() {
            Ok(Value::boolean_list(ctx, values.iter().copied()))
        } else if let Some(values) = any.downcast_ref::<std::vec::Vec<i64>>() {
            Ok(Value::int_list(ctx, values.iter().copied()))
        } else if let Some(values) = any.downcast_ref::<std::vec::Vec<i32>>() {
            Ok(Value::int_list(ctx, values.iter().map(|value| i64::from(*value))))
        } else if let Some(values) = any.downcast_ref::<std::vec::Vec<String>>() {
            Ok(Value::string_list(ctx, values))
        } else if let Some(values) = any.downcast_ref::<std::vec::Vec<&'static str>>() {
            Ok(Value::string_list(ctx, values))
        } else {
            Err(Error::new(
                format!("Argument type `{}` is not supported", type_name::<T>()),
                ErrorType::UnsupportedArgumentType,
            ))
        }
    }
}

impl<'a> Argument<'a> {
    /// Creates an argument from a dynamically typed value.
    ///
    /// See [`Value::from_any`] for the supported types.
    pub fn any<T: Any>(ctx: &'a ASTContext, name: &str, value: &T) -> Result<Argument<'a>> {
        Ok(Argument::new(ctx, name, Value::from_any(ctx, value)?))
    }
}
