use crate::ast::*;
use chrono::SecondsFormat;
use serde_json::{Map as JSMap, Value as JSValue};

/// Trait for converting AST Nodes of a GraphQL operation to [serde_json::Value]s.
///
/// The conversion doesn't use any type information. Strings, enums, and times all become JSON
/// strings, while objects become JSON objects keyed by their fields' names.
pub trait ValueFromNode {
    /// Convert current AST Node to a [serde_json::Value].
    fn to_json(&self) -> JSValue;
}

impl<'a> ValueFromNode for Value<'a> {
    #[inline]
    fn to_json(&self) -> JSValue {
        match self {
            Value::Boolean(value) => JSValue::Bool(*value),
            Value::Int(value) => (*value).into(),
            Value::String(value) | Value::BlockString(value) | Value::Enum(value) => {
                (*value).into()
            }
            Value::QuotedString(value) => format!("\"{}\"", value).into(),
            Value::Time(value) => value.to_rfc3339_opts(SecondsFormat::Secs, true).into(),
            Value::BooleanList(values) => values.iter().copied().collect(),
            Value::IntList(values) => values.iter().copied().collect(),
            Value::StringList(values) | Value::EnumList(values) => {
                values.iter().copied().collect()
            }
            Value::Object(object) => object.to_json(),
            Value::ObjectList(objects) => objects.iter().map(|object| object.to_json()).collect(),
        }
    }
}

impl<'a> ValueFromNode for ObjectValue<'a> {
    /// Convert current ObjectValue Node to a [serde_json::Value::Object].
    #[inline]
    fn to_json(&self) -> JSValue {
        JSValue::Object(map_from_arguments(&self.children))
    }
}

impl<'a> ValueFromNode for Arguments<'a> {
    /// Convert current Arguments Node to a [serde_json::Value::Object] keyed by the arguments' names.
    #[inline]
    fn to_json(&self) -> JSValue {
        JSValue::Object(map_from_arguments(&self.children))
    }
}

fn map_from_arguments(arguments: &[Argument]) -> JSMap<String, JSValue> {
    let mut map = JSMap::new();
    for argument in arguments.iter() {
        map.insert(argument.name.to_string(), argument.value.to_json());
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars() {
        let ctx = ASTContext::new();
        assert_eq!(Value::Boolean(true).to_json(), json!(true));
        assert_eq!(Value::Int(-5).to_json(), json!(-5));
        assert_eq!(Value::string(&ctx, "a").to_json(), json!("a"));
        assert_eq!(Value::quoted_string(&ctx, "a").to_json(), json!("\"a\""));
        assert_eq!(Value::enum_value(&ctx, "A").to_json(), json!("A"));
        let time = chrono::DateTime::parse_from_rfc3339("2021-10-01T12:00:00+01:00").unwrap();
        assert_eq!(Value::Time(time).to_json(), json!("2021-10-01T12:00:00+01:00"));
    }

    #[test]
    fn nested() {
        let ctx = ASTContext::new();
        let field = Field::new(&ctx, "search").with_arguments([
            Argument::new(&ctx, "ids", Value::int_list(&ctx, [1, 2])),
            Argument::new(
                &ctx,
                "where",
                Value::object(
                    &ctx,
                    [Argument::new(&ctx, "tags", Value::string_list(&ctx, ["x"]))],
                ),
            ),
            Argument::new(
                &ctx,
                "sort",
                Value::object_list(&ctx, [[Argument::new(&ctx, "asc", true)]]),
            ),
        ]);
        assert_eq!(
            field.arguments.to_json(),
            json!({
                "ids": [1, 2],
                "where": { "tags": ["x"] },
                "sort": [{ "asc": true }],
            })
        );
    }
}
