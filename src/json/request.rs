use crate::ast::Query;
use crate::error::Result;
use serde::Serialize;

/// The body of a GraphQL request over HTTP, as sent in a `POST` request.
#[derive(Serialize)]
struct RequestBody<'a> {
    query: &'a str,
}

impl<'a> Query<'a> {
    /// Validates and prints this operation and wraps it into a JSON request body of the form
    /// `{"query":"..."}`.
    ///
    /// The document is serialized as a JSON string, so quotes and any other characters that
    /// JSON requires to be escaped are escaped in the output.
    pub fn json_body(&self) -> Result<String> {
        let query = self.print()?;
        let body = RequestBody { query: &query };
        // Serializing a struct of strings into a String can't fail
        Ok(serde_json::to_string(&body).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::error::ErrorType;
    use serde_json::{json, Value as JSValue};

    #[test]
    fn json_body() {
        let ctx = ASTContext::new();
        let query = Query::new(&ctx, OperationKind::Query)
            .with_fields([Field::new(&ctx, "a").with_arguments([Argument::new(&ctx, "n", 1)])]);
        assert_eq!(query.json_body().unwrap(), r#"{"query":"query{a(n:1),}"}"#);
    }

    #[test]
    fn escapes_quotes() {
        let ctx = ASTContext::new();
        let query = Query::new(&ctx, OperationKind::Mutation).with_fields([Field::new(&ctx, "post")
            .with_arguments([
                Argument::new(&ctx, "title", Value::string(&ctx, "hi")),
                Argument::new(&ctx, "body", Value::quoted_string(&ctx, "x")),
            ])]);

        let body = query.json_body().unwrap();
        assert_eq!(
            body,
            r#"{"query":"mutation{post(title:\"hi\",body:\"\\\"x\\\"\"),}"}"#
        );

        let parsed: JSValue = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed, json!({ "query": query.print().unwrap() }));
    }

    #[test]
    fn rejects_invalid_query() {
        let ctx = ASTContext::new();
        let query = Query::new(&ctx, OperationKind::Query).with_fields([Field::new(&ctx, "")]);
        let error = query.json_body().unwrap_err();
        assert_eq!(
            error.error_type(),
            ErrorType::InvalidName(crate::error::NameKind::Field)
        );
    }
}
