use super::ast::*;
use crate::error::{Error, ErrorType, Result};
use chrono::{DateTime, FixedOffset, SecondsFormat};
use lexical_core::FormattedSize;
use std::{fmt, fmt::Write, iter::FusedIterator};

const QUOTE: &str = "\"";
const ESCAPED_QUOTE_OPEN: &str = "\"\\\"";
const ESCAPED_QUOTE_CLOSE: &str = "\\\"\"";
const BLOCK_QUOTE: &str = "\"\"\"";

/// A contiguous fragment of output text.
///
/// Concatenating all tokens of a [Tokens] stream in emission order yields the printed document.
/// Tokens borrow from the AST they were produced from. Integers and times are only formatted
/// into text when a token is written.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Token<'a> {
    /// Punctuators, keywords, and quotes, e.g. `{`, `:`, `query`, or `"""`
    Static(&'static str),
    /// A field name, alias, argument name, operation name, or enum value
    Name(&'a str),
    /// The verbatim contents of a string value
    Text(&'a str),
    Int(i64),
    Time(DateTime<FixedOffset>),
}

impl<'a> Token<'a> {
    /// Write this token's text to a buffer implementing the [Write] trait.
    pub fn write_to_buffer(&self, buffer: &mut dyn Write) -> fmt::Result {
        match self {
            Token::Static(str) => buffer.write_str(str),
            Token::Name(str) | Token::Text(str) => buffer.write_str(str),
            Token::Int(value) => {
                let mut buf = [b'0'; i64::FORMATTED_SIZE_DECIMAL];
                let digits = lexical_core::write(*value, &mut buf);
                buffer.write_str(std::str::from_utf8(digits).map_err(|_| fmt::Error)?)
            }
            Token::Time(value) => {
                buffer.write_str(&value.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
        }
    }
}

impl<'a> fmt::Display for Token<'a> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to_buffer(f)
    }
}

/// Whether commas go between the items of a list or after every item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Separator {
    Between,
    Terminated,
}

#[derive(Debug, Clone, Copy)]
enum Items<'a> {
    Booleans(&'a [bool]),
    Ints(&'a [i64]),
    Strings(&'a [&'a str]),
    Enums(&'a [&'a str]),
    Objects(&'a [ObjectValue<'a>]),
    Arguments(&'a [Argument<'a>]),
    Fields(&'a [Option<Field<'a>>]),
}

impl<'a> Items<'a> {
    #[inline]
    fn len(&self) -> usize {
        match self {
            Items::Booleans(items) => items.len(),
            Items::Ints(items) => items.len(),
            Items::Strings(items) | Items::Enums(items) => items.len(),
            Items::Objects(items) => items.len(),
            Items::Arguments(items) => items.len(),
            Items::Fields(items) => items.len(),
        }
    }
}

/// A list whose remaining items are still to be emitted.
#[derive(Debug, Clone, Copy)]
struct List<'a> {
    items: Items<'a>,
    index: usize,
    emitted: bool,
    separator: Separator,
}

/// A unit of pending work on the [Tokens] stack.
#[derive(Debug, Clone, Copy)]
enum Frame<'a> {
    Token(Token<'a>),
    Query(&'a Query<'a>, OperationKind),
    Field(&'a Field<'a>),
    Argument(&'a Argument<'a>),
    Value(&'a Value<'a>),
    Object(&'a ObjectValue<'a>),
    List(List<'a>),
}

/// A lazy, depth-first stream of [Token]s for a node and all of its children.
///
/// The stream is driven by an explicit stack of pending frames. Every frame borrows the node it
/// renders and expands into a constant number of frames when it's reached, so the stack only ever
/// grows with the depth of the tree, not with its size. Dropping a partially consumed stream
/// simply drops this stack.
///
/// A stream can't be restarted: once it has returned `None` it keeps returning `None`. Rendering
/// again requires asking the node for a new stream.
#[derive(Debug)]
pub struct Tokens<'a> {
    stack: Vec<Frame<'a>>,
}

impl<'a> Tokens<'a> {
    #[inline]
    fn new(frame: Frame<'a>) -> Self {
        let mut stack = Vec::with_capacity(16);
        stack.push(frame);
        Tokens { stack }
    }

    /// Creates a stream for an operation that has already passed validation.
    #[inline]
    pub(crate) fn for_query(query: &'a Query<'a>, operation: OperationKind) -> Self {
        Tokens::new(Frame::Query(query, operation))
    }

    /// Writes all remaining tokens to a buffer implementing the [Write] trait.
    pub fn write_to_buffer(self, buffer: &mut dyn Write) -> fmt::Result {
        for token in self {
            token.write_to_buffer(buffer)?;
        }
        Ok(())
    }

    /// Drains all remaining tokens into a new String.
    pub fn into_string(self) -> String {
        let mut buf = String::new();
        match self.write_to_buffer(&mut buf) {
            Ok(()) => buf,
            _ => "".to_string(),
        }
    }

    #[inline]
    fn push_token(&mut self, token: Token<'a>) {
        self.stack.push(Frame::Token(token));
    }

    #[inline]
    fn push_static(&mut self, str: &'static str) {
        self.stack.push(Frame::Token(Token::Static(str)));
    }

    /// Pushes an opening token, the list's items, and a closing token.
    #[inline]
    fn open_list(
        &mut self,
        open: &'static str,
        items: Items<'a>,
        separator: Separator,
        close: &'static str,
    ) -> Token<'a> {
        self.push_static(close);
        self.stack.push(Frame::List(List {
            items,
            index: 0,
            emitted: false,
            separator,
        }));
        Token::Static(open)
    }

    /// Pushes a string's contents and closing quote and returns its opening quote.
    #[inline]
    fn quoted(&mut self, open: &'static str, text: &'a str, close: &'static str) -> Token<'a> {
        self.push_static(close);
        self.push_token(Token::Text(text));
        Token::Static(open)
    }

    fn expand_query(&mut self, query: &'a Query<'a>, operation: OperationKind) -> Token<'a> {
        self.push_static("}");
        self.stack.push(Frame::List(List {
            items: Items::Fields(&query.selection_set.selections),
            index: 0,
            emitted: false,
            separator: Separator::Terminated,
        }));
        self.push_static("{");
        if let Some(name) = query.name() {
            self.push_token(Token::Name(name));
            self.push_static(" ");
        }
        Token::Static(operation.as_str())
    }

    fn expand_field(&mut self, field: &'a Field<'a>) -> Token<'a> {
        if !field.selection_set.is_empty() {
            self.push_static("}");
            self.stack.push(Frame::List(List {
                items: Items::Fields(&field.selection_set.selections),
                index: 0,
                emitted: false,
                separator: Separator::Between,
            }));
            self.push_static("{");
        }
        if !field.arguments.is_empty() {
            self.push_static(")");
            self.stack.push(Frame::List(List {
                items: Items::Arguments(&field.arguments.children),
                index: 0,
                emitted: false,
                separator: Separator::Between,
            }));
            self.push_static("(");
        }
        match field.alias {
            Some(alias) if !alias.is_empty() => {
                self.push_token(Token::Name(field.name));
                self.push_static(":");
                Token::Name(alias)
            }
            _ => Token::Name(field.name),
        }
    }

    fn expand_value(&mut self, value: &'a Value<'a>) -> Token<'a> {
        match value {
            Value::Boolean(true) => Token::Static("true"),
            Value::Boolean(false) => Token::Static("false"),
            Value::Int(value) => Token::Int(*value),
            Value::String(text) => self.quoted(QUOTE, text, QUOTE),
            Value::QuotedString(text) => self.quoted(ESCAPED_QUOTE_OPEN, text, ESCAPED_QUOTE_CLOSE),
            Value::BlockString(text) => self.quoted(BLOCK_QUOTE, text, BLOCK_QUOTE),
            Value::Enum(value) => Token::Name(value),
            Value::Time(value) => {
                self.push_static(QUOTE);
                self.push_token(Token::Time(*value));
                Token::Static(QUOTE)
            }
            Value::BooleanList(items) => {
                self.open_list("[", Items::Booleans(items), Separator::Between, "]")
            }
            Value::IntList(items) => self.open_list("[", Items::Ints(items), Separator::Between, "]"),
            Value::StringList(items) => {
                self.open_list("[", Items::Strings(items), Separator::Between, "]")
            }
            Value::EnumList(items) => self.open_list("[", Items::Enums(items), Separator::Between, "]"),
            Value::Object(object) => self.expand_object(object),
            Value::ObjectList(items) => {
                self.open_list("[", Items::Objects(items), Separator::Between, "]")
            }
        }
    }

    #[inline]
    fn expand_object(&mut self, object: &'a ObjectValue<'a>) -> Token<'a> {
        self.open_list("{", Items::Arguments(&object.children), Separator::Between, "}")
    }

    /// Pushes the next item of a list back onto the stack, followed by the list itself.
    fn advance_list(&mut self, mut list: List<'a>) {
        let len = list.items.len();
        if let Items::Fields(fields) = list.items {
            // Empty slots only remain in fields that were never validated
            while list.index < len && fields[list.index].is_none() {
                list.index += 1;
            }
        }
        if list.index >= len {
            return;
        }

        let index = list.index;
        let needs_separator = list.emitted;
        list.index += 1;
        list.emitted = true;
        self.stack.push(Frame::List(list));

        if list.separator == Separator::Terminated {
            self.push_static(",");
        }
        match list.items {
            Items::Booleans(items) => self.push_static(if items[index] { "true" } else { "false" }),
            Items::Ints(items) => self.push_token(Token::Int(items[index])),
            Items::Strings(items) => {
                self.push_static(QUOTE);
                self.push_token(Token::Text(items[index]));
                self.push_static(QUOTE);
            }
            Items::Enums(items) => self.push_token(Token::Name(items[index])),
            Items::Objects(items) => self.stack.push(Frame::Object(&items[index])),
            Items::Arguments(items) => self.stack.push(Frame::Argument(&items[index])),
            Items::Fields(items) => {
                if let Some(field) = &items[index] {
                    self.stack.push(Frame::Field(field));
                }
            }
        }
        if list.separator == Separator::Between && needs_separator {
            self.push_static(",");
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        loop {
            let token = match self.stack.pop()? {
                Frame::Token(token) => token,
                Frame::Query(query, operation) => self.expand_query(query, operation),
                Frame::Field(field) => self.expand_field(field),
                Frame::Argument(argument) => {
                    self.stack.push(Frame::Value(&argument.value));
                    self.push_static(":");
                    Token::Name(argument.name)
                }
                Frame::Value(value) => self.expand_value(value),
                Frame::Object(object) => self.expand_object(object),
                Frame::List(list) => {
                    self.advance_list(list);
                    continue;
                }
            };
            return Some(token);
        }
    }
}

impl<'a> FusedIterator for Tokens<'a> {}

impl<'a> Query<'a> {
    /// Validates this operation and returns a new stream of tokens for it.
    ///
    /// The operation is rendered as `keyword[ name]{field,field,}`, where every top-level field is
    /// followed by a comma. No tokens are produced when validation fails, so a stream that's
    /// returned never fails midway. Each call validates again and starts a fresh stream.
    pub fn tokens(&self) -> Result<Tokens<'_>> {
        self.validate()?;
        match self.operation {
            Some(operation) => {
                log::trace!(
                    "Rendering {} operation with {} top-level fields",
                    operation,
                    self.selection_set.selections.len()
                );
                Ok(Tokens::for_query(self, operation))
            }
            None => Err(Error::new(
                "Operation type is not set, expected one of query, mutation, or subscription",
                ErrorType::InvalidOperationType,
            )),
        }
    }
}

/// Trait for AST Nodes that can lazily produce their own text as a stream of [Token]s.
///
/// Producing tokens never fails and doesn't validate any names. A [`Query`] doesn't implement
/// this trait, since an operation may only be rendered after it passed validation; use
/// [`Query::tokens`] instead.
pub trait TokenNode {
    /// Returns a new stream of tokens for this node and all of its children.
    fn tokens(&self) -> Tokens<'_>;
}

impl<'a> TokenNode for Value<'a> {
    #[inline]
    fn tokens(&self) -> Tokens<'_> {
        Tokens::new(Frame::Value(self))
    }
}

impl<'a> TokenNode for ObjectValue<'a> {
    #[inline]
    fn tokens(&self) -> Tokens<'_> {
        Tokens::new(Frame::Object(self))
    }
}

impl<'a> TokenNode for Argument<'a> {
    #[inline]
    fn tokens(&self) -> Tokens<'_> {
        Tokens::new(Frame::Argument(self))
    }
}

impl<'a> TokenNode for Field<'a> {
    #[inline]
    fn tokens(&self) -> Tokens<'_> {
        Tokens::new(Frame::Field(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_values() {
        let ctx = ASTContext::new();
        assert_eq!(Value::Boolean(true).tokens().into_string(), "true");
        assert_eq!(Value::Boolean(false).tokens().into_string(), "false");
        assert_eq!(Value::Int(0).tokens().into_string(), "0");
        assert_eq!(Value::Int(-9_007_199_254_740_993).tokens().into_string(), "-9007199254740993");
        assert_eq!(Value::Int(i64::MAX).tokens().into_string(), "9223372036854775807");
        assert_eq!(Value::string(&ctx, "hi").tokens().into_string(), r#""hi""#);
        assert_eq!(Value::quoted_string(&ctx, "hi").tokens().into_string(), r#""\"hi\"""#);
        assert_eq!(
            Value::block_string(&ctx, "line\nline").tokens().into_string(),
            "\"\"\"line\nline\"\"\""
        );
        assert_eq!(Value::enum_value(&ctx, "MOBILE_WEB").tokens().into_string(), "MOBILE_WEB");
    }

    #[test]
    fn time_values() {
        let time = DateTime::parse_from_rfc3339("2021-10-01T12:30:00.250+02:00").unwrap();
        assert_eq!(
            Value::Time(time).tokens().into_string(),
            r#""2021-10-01T12:30:00+02:00""#
        );
        let utc = DateTime::parse_from_rfc3339("2021-10-01T12:30:00+00:00").unwrap();
        assert_eq!(Value::Time(utc).tokens().into_string(), r#""2021-10-01T12:30:00Z""#);
    }

    #[test]
    fn lists() {
        let ctx = ASTContext::new();
        assert_eq!(Value::int_list(&ctx, []).tokens().into_string(), "[]");
        assert_eq!(Value::int_list(&ctx, [1]).tokens().into_string(), "[1]");
        assert_eq!(Value::int_list(&ctx, [1, 2, 3]).tokens().into_string(), "[1,2,3]");
        assert_eq!(
            Value::boolean_list(&ctx, [true, false]).tokens().into_string(),
            "[true,false]"
        );
        assert_eq!(
            Value::string_list(&ctx, ["a", "b"]).tokens().into_string(),
            r#"["a","b"]"#
        );
        assert_eq!(
            Value::enum_list(&ctx, ["A", "B"]).tokens().into_string(),
            "[A,B]"
        );
        assert_eq!(Value::string_list(&ctx, Vec::<&str>::new()).tokens().into_string(), "[]");
    }

    #[test]
    fn empty_list_argument() {
        let ctx = ASTContext::new();
        let argument = Argument::new(&ctx, "xs", Value::int_list(&ctx, []));
        assert_eq!(argument.tokens().into_string(), "xs:[]");
    }

    #[test]
    fn object_arguments() {
        let ctx = ASTContext::new();
        let argument = Argument::new(
            &ctx,
            "obj",
            Value::object(
                &ctx,
                [Argument::new(&ctx, "a", 1), Argument::new(&ctx, "b", true)],
            ),
        );
        assert_eq!(argument.tokens().into_string(), "obj:{a:1,b:true}");

        let empty = Argument::new(&ctx, "obj", Value::object(&ctx, []));
        assert_eq!(empty.tokens().into_string(), "obj:{}");

        let nested = Argument::new(
            &ctx,
            "where",
            Value::object(
                &ctx,
                [Argument::new(
                    &ctx,
                    "user",
                    Value::object(&ctx, [Argument::new(&ctx, "id", Value::int_list(&ctx, [1, 2]))]),
                )],
            ),
        );
        assert_eq!(nested.tokens().into_string(), "where:{user:{id:[1,2]}}");
    }

    #[test]
    fn object_list_arguments() {
        let ctx = ASTContext::new();
        let argument = Argument::new(
            &ctx,
            "items",
            Value::object_list(
                &ctx,
                [
                    vec![Argument::new(&ctx, "a", 1), Argument::new(&ctx, "b", 2)],
                    vec![],
                    vec![Argument::new(&ctx, "c", Value::enum_value(&ctx, "C"))],
                ],
            ),
        );
        assert_eq!(argument.tokens().into_string(), "items:[{a:1,b:2},{},{c:C}]");

        let empty = Argument::new(&ctx, "items", Value::object_list(&ctx, Vec::<Vec<Argument>>::new()));
        assert_eq!(empty.tokens().into_string(), "items:[]");
    }

    #[test]
    fn fields() {
        let ctx = ASTContext::new();
        let field = Field::new(&ctx, "user")
            .with_alias(&ctx, "me")
            .with_arguments([
                Argument::new(&ctx, "id", 4),
                Argument::new(&ctx, "role", Value::enum_value(&ctx, "ADMIN")),
            ])
            .with_fields([
                Field::new(&ctx, "id"),
                Field::new(&ctx, "friends")
                    .with_arguments([Argument::new(&ctx, "first", 10)])
                    .with_fields([Field::new(&ctx, "name")]),
            ]);
        assert_eq!(
            field.tokens().into_string(),
            "me:user(id:4,role:ADMIN){id,friends(first:10){name}}"
        );
        assert_eq!(Field::new(&ctx, "leaf").tokens().into_string(), "leaf");
    }

    #[test]
    fn fields_skip_empty_slots() {
        let ctx = ASTContext::new();
        let mut field = Field::new(&ctx, "user");
        field.selection_set.reserve();
        field.selection_set.add_leaves(&ctx, ["id"]);
        field.selection_set.reserve();
        field.selection_set.add_leaves(&ctx, ["name"]);
        assert_eq!(field.tokens().into_string(), "user{id,name}");
    }

    #[test]
    fn token_sequence() {
        let ctx = ASTContext::new();
        let argument = Argument::new(&ctx, "s", Value::string(&ctx, "x"));
        let tokens: std::vec::Vec<Token> = argument.tokens().collect();
        assert_eq!(
            tokens,
            [
                Token::Name("s"),
                Token::Static(":"),
                Token::Static("\""),
                Token::Text("x"),
                Token::Static("\""),
            ]
        );
    }

    #[test]
    fn partial_consumption_and_exhaustion() {
        let ctx = ASTContext::new();
        let field = Field::new(&ctx, "a").with_fields([Field::new(&ctx, "b"), Field::new(&ctx, "c")]);

        let mut tokens = field.tokens();
        assert_eq!(tokens.next(), Some(Token::Name("a")));
        assert_eq!(tokens.next(), Some(Token::Static("{")));
        drop(tokens);

        let mut tokens = field.tokens();
        assert_eq!(tokens.by_ref().count(), 6);
        assert_eq!(tokens.next(), None);
        assert_eq!(tokens.next(), None);

        assert_eq!(field.tokens().into_string(), "a{b,c}");
    }

    #[test]
    fn query_tokens() {
        let ctx = ASTContext::new();
        let query = Query::new(&ctx, OperationKind::Query)
            .with_name(&ctx, "Foo")
            .with_fields([Field::new(&ctx, "bar").with_arguments([Argument::new(&ctx, "n", 1)])]);

        let tokens: std::vec::Vec<Token> = query.tokens().unwrap().collect();
        assert_eq!(
            tokens,
            [
                Token::Static("query"),
                Token::Static(" "),
                Token::Name("Foo"),
                Token::Static("{"),
                Token::Name("bar"),
                Token::Static("("),
                Token::Name("n"),
                Token::Static(":"),
                Token::Int(1),
                Token::Static(")"),
                Token::Static(","),
                Token::Static("}"),
            ]
        );
        assert_eq!(query.tokens().unwrap().into_string(), "query Foo{bar(n:1),}");
    }

    #[test]
    fn query_tokens_require_validation() {
        let ctx = ASTContext::new();
        let query = Query::default_in(&ctx.arena).with_fields([Field::new(&ctx, "a")]);
        let error = query.tokens().unwrap_err();
        assert_eq!(error.error_type(), ErrorType::InvalidOperationType);

        let mut query = Query::new(&ctx, OperationKind::Subscription);
        query.selection_set.reserve();
        assert_eq!(query.tokens().unwrap_err().error_type(), ErrorType::MissingField);

        query.selection_set.fill(0, Field::new(&ctx, "a")).unwrap();
        assert_eq!(query.tokens().unwrap().into_string(), "subscription{a,}");
    }

    #[test]
    fn deep_nesting() {
        let ctx = ASTContext::new();
        let mut field = Field::new(&ctx, "leaf");
        for _ in 0..500 {
            field = Field::new(&ctx, "node").with_fields([field]);
        }
        let output = field.tokens().into_string();
        assert!(output.starts_with("node{node{"));
        assert!(output.contains("node{leaf}"));
        assert!(output.ends_with(&"}".repeat(500)));
        assert_eq!(output.matches('{').count(), 500);
    }
}
