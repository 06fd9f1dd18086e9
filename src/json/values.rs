use crate::ast::*;
use crate::error::{Error, ErrorType, Result};
use serde_json::Value as JSValue;

fn unsupported(kind: &str) -> Error {
    Error::new(
        format!("Argument type `{kind}` is not supported"),
        ErrorType::UnsupportedArgumentType,
    )
}

fn json_kind(value: &JSValue) -> &'static str {
    match value {
        JSValue::Null => "null",
        JSValue::Bool(_) => "boolean",
        JSValue::Number(num) if num.is_i64() => "integer",
        JSValue::Number(_) => "number",
        JSValue::String(_) => "string",
        JSValue::Array(_) => "array",
        JSValue::Object(_) => "object",
    }
}

/// Convert a [serde_json::Value] to an AST Value Node without casting the JSON value to a type.
///
/// Booleans, integers that fit into an `i64`, and strings are converted to the matching scalar,
/// while arrays whose items are all of one of these kinds are converted to the matching list.
/// Since an empty array carries no item kind it's converted to an empty [`Value::IntList`], which
/// prints as `[]` all the same.
///
/// `null`, floats, objects, nested arrays, and arrays mixing kinds are rejected with an
/// [`ErrorType::UnsupportedArgumentType`] error.
pub fn ast_from_value_untyped<'a>(ctx: &'a ASTContext, value: &JSValue) -> Result<Value<'a>> {
    match value {
        JSValue::Bool(value) => Ok(Value::Boolean(*value)),
        JSValue::Number(num) => num
            .as_i64()
            .map(Value::Int)
            .ok_or_else(|| unsupported(json_kind(value))),
        JSValue::String(str) => Ok(Value::string(ctx, str)),
        JSValue::Array(list) => match list.first() {
            None => Ok(Value::int_list(ctx, [])),
            Some(JSValue::Bool(_)) => list
                .iter()
                .map(|item| item.as_bool().ok_or_else(|| unsupported_item(item)))
                .collect::<Result<Vec<bool>>>()
                .map(|items| Value::boolean_list(ctx, items)),
            Some(JSValue::Number(_)) => list
                .iter()
                .map(|item| item.as_i64().ok_or_else(|| unsupported_item(item)))
                .collect::<Result<Vec<i64>>>()
                .map(|items| Value::int_list(ctx, items)),
            Some(JSValue::String(_)) => list
                .iter()
                .map(|item| item.as_str().ok_or_else(|| unsupported_item(item)))
                .collect::<Result<Vec<&str>>>()
                .map(|items| Value::string_list(ctx, items)),
            Some(item) => Err(unsupported_item(item)),
        },
        JSValue::Null | JSValue::Object(_) => Err(unsupported(json_kind(value))),
    }
}

fn unsupported_item(item: &JSValue) -> Error {
    unsupported(&format!("array of {}", json_kind(item)))
}

/// Convert a JSON object to a list of AST Argument Nodes, one per key, in the
/// map's iteration order.
///
/// Every value is converted using [`ast_from_value_untyped`]. Any other JSON value than an object
/// is rejected with an [`ErrorType::UnsupportedArgumentType`] error.
pub fn ast_arguments_from_value<'a>(
    ctx: &'a ASTContext,
    value: &JSValue,
) -> Result<Vec<Argument<'a>>> {
    match value {
        JSValue::Object(map) => map
            .iter()
            .map(|(name, value)| {
                ast_from_value_untyped(ctx, value).map(|value| Argument::new(ctx, name, value))
            })
            .collect(),
        _ => Err(unsupported(json_kind(value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::PrintNode;
    use serde_json::json;

    fn print(value: JSValue) -> String {
        let ctx = ASTContext::new();
        let output = ast_from_value_untyped(&ctx, &value).unwrap().print();
        output
    }

    fn error_type(value: JSValue) -> ErrorType {
        let ctx = ASTContext::new();
        ast_from_value_untyped(&ctx, &value)
            .unwrap_err()
            .error_type()
    }

    #[test]
    fn scalars() {
        assert_eq!(print(json!(true)), "true");
        assert_eq!(print(json!(-12)), "-12");
        assert_eq!(print(json!("text")), r#""text""#);
    }

    #[test]
    fn lists() {
        assert_eq!(print(json!([])), "[]");
        assert_eq!(print(json!([true, false])), "[true,false]");
        assert_eq!(print(json!([1, 2, 3])), "[1,2,3]");
        assert_eq!(print(json!(["a", "b"])), r#"["a","b"]"#);
    }

    #[test]
    fn unsupported_values() {
        assert_eq!(error_type(json!(null)), ErrorType::UnsupportedArgumentType);
        assert_eq!(error_type(json!(1.5)), ErrorType::UnsupportedArgumentType);
        assert_eq!(error_type(json!({ "a": 1 })), ErrorType::UnsupportedArgumentType);
        assert_eq!(error_type(json!([1, "a"])), ErrorType::UnsupportedArgumentType);
        assert_eq!(error_type(json!([[1]])), ErrorType::UnsupportedArgumentType);
        assert_eq!(error_type(json!([1, 2.5])), ErrorType::UnsupportedArgumentType);
        assert_eq!(error_type(json!([null])), ErrorType::UnsupportedArgumentType);

        let ctx = ASTContext::new();
        let error = ast_from_value_untyped(&ctx, &json!(["a", true])).unwrap_err();
        assert_eq!(error.message(), "Argument type `array of boolean` is not supported");
    }

    #[test]
    fn arguments() {
        let ctx = ASTContext::new();
        let arguments =
            ast_arguments_from_value(&ctx, &json!({ "first": 10, "after": "abc" })).unwrap();
        let field = Field::new(&ctx, "items").with_arguments(arguments);
        assert_eq!(field.print(), r#"items(after:"abc",first:10)"#);

        let error = ast_arguments_from_value(&ctx, &json!([1])).unwrap_err();
        assert_eq!(error.error_type(), ErrorType::UnsupportedArgumentType);
    }
}
