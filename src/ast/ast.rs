pub use super::ast_conversion::*;
use crate::error::{Error, ErrorType, Result};
use bumpalo::collections::{CollectIn, Vec};
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use hashbrown::{HashMap, hash_map::DefaultHashBuilder};
use std::fmt;

/// A context for a GraphQL operation which holds an arena allocator.
///
/// For the duration of building, validating, and printing a query its performant and convenient
/// to allocate memory in one chunk for the whole tree. This context represents the lifetime of a
/// [Query] and all of its fields, arguments, and values.
///
/// Once the query has been rendered the context can be dropped, which frees the entire tree at
/// once. It's inadvisable to reuse one AST Context for many unrelated queries, since the arena
/// never frees memory on its own.
pub struct ASTContext {
    /// An arena allocator that holds the memory allocated for the AST Context's lifetime
    pub arena: bumpalo::Bump,
}

impl ASTContext {
    /// Create a new AST context with a preallocated arena.
    pub fn new() -> Self {
        let arena = bumpalo::Bump::new();
        ASTContext { arena }
    }

    /// Allocate an `&str` slice onto the arena and return a reference to it.
    ///
    /// This is useful when the original slice has an undefined lifetime.
    #[inline]
    pub fn alloc_str(&self, str: &str) -> &str {
        self.arena.alloc_str(str)
    }
}

impl Default for ASTContext {
    fn default() -> Self {
        Self::new()
    }
}

/// AST Node of possible argument values.
///
/// The set of variants is closed: every literal this crate is able to print is one of these.
/// Scalar lists are homogeneous, while [`Value::Object`] and [`Value::ObjectList`] nest further
/// [Argument]s recursively.
///
/// None of the string variants escape their contents. Embedding an unescaped `"` in a
/// [`Value::String`] or `"""` in a [`Value::BlockString`] produces an invalid document.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Input-Values)
#[derive(Debug, PartialEq, Clone)]
pub enum Value<'a> {
    /// Printed as `true` or `false`
    Boolean(bool),
    /// Printed as decimal digits
    Int(i64),
    /// Printed as `"value"`
    String(&'a str),
    /// Printed as `"\"value\""`, a string whose contents are themselves a quoted literal
    QuotedString(&'a str),
    /// Printed as `"""value"""`
    BlockString(&'a str),
    /// Printed verbatim, e.g. `MOBILE_WEB`
    Enum(&'a str),
    /// Printed as an RFC 3339 string with seconds precision, e.g. `"2021-10-01T12:00:00Z"`
    Time(DateTime<FixedOffset>),
    BooleanList(Vec<'a, bool>),
    IntList(Vec<'a, i64>),
    StringList(Vec<'a, &'a str>),
    EnumList(Vec<'a, &'a str>),
    /// An input object, printed as `{key:value,...}`
    Object(ObjectValue<'a>),
    /// A list of input objects, printed as `[{...},{...}]`
    ObjectList(Vec<'a, ObjectValue<'a>>),
}

impl<'a> Value<'a> {
    pub fn string<S: AsRef<str>>(ctx: &'a ASTContext, value: S) -> Self {
        Value::String(ctx.alloc_str(value.as_ref()))
    }

    pub fn quoted_string<S: AsRef<str>>(ctx: &'a ASTContext, value: S) -> Self {
        Value::QuotedString(ctx.alloc_str(value.as_ref()))
    }

    pub fn block_string<S: AsRef<str>>(ctx: &'a ASTContext, value: S) -> Self {
        Value::BlockString(ctx.alloc_str(value.as_ref()))
    }

    pub fn enum_value<S: AsRef<str>>(ctx: &'a ASTContext, value: S) -> Self {
        Value::Enum(ctx.alloc_str(value.as_ref()))
    }

    /// Creates a time value, keeping the offset of the given timestamp as-is.
    pub fn time<Tz: TimeZone>(value: DateTime<Tz>) -> Self {
        Value::Time(value.fixed_offset())
    }

    pub fn boolean_list<I: IntoIterator<Item = bool>>(ctx: &'a ASTContext, values: I) -> Self {
        Value::BooleanList(values.into_iter().collect_in(&ctx.arena))
    }

    pub fn int_list<I: IntoIterator<Item = i64>>(ctx: &'a ASTContext, values: I) -> Self {
        Value::IntList(values.into_iter().collect_in(&ctx.arena))
    }

    pub fn string_list<I>(ctx: &'a ASTContext, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Value::StringList(
            values
                .into_iter()
                .map(|value| ctx.alloc_str(value.as_ref()))
                .collect_in(&ctx.arena),
        )
    }

    pub fn enum_list<I>(ctx: &'a ASTContext, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Value::EnumList(
            values
                .into_iter()
                .map(|value| ctx.alloc_str(value.as_ref()))
                .collect_in(&ctx.arena),
        )
    }

    /// Creates an input object value from a list of arguments, which may themselves contain
    /// objects.
    pub fn object<I: IntoIterator<Item = Argument<'a>>>(ctx: &'a ASTContext, arguments: I) -> Self {
        Value::Object(ObjectValue {
            children: arguments.into_iter().collect_in(&ctx.arena),
        })
    }

    /// Creates a list of input objects, where every item is a list of arguments.
    pub fn object_list<I>(ctx: &'a ASTContext, objects: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoIterator<Item = Argument<'a>>,
    {
        Value::ObjectList(
            objects
                .into_iter()
                .map(|arguments| ObjectValue {
                    children: arguments.into_iter().collect_in(&ctx.arena),
                })
                .collect_in(&ctx.arena),
        )
    }
}

impl<'a> From<bool> for Value<'a> {
    #[inline]
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl<'a> From<i64> for Value<'a> {
    #[inline]
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl<'a> From<i32> for Value<'a> {
    #[inline]
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl<'a> From<DateTime<FixedOffset>> for Value<'a> {
    #[inline]
    fn from(value: DateTime<FixedOffset>) -> Self {
        Value::Time(value)
    }
}

impl<'a> From<DateTime<Utc>> for Value<'a> {
    #[inline]
    fn from(value: DateTime<Utc>) -> Self {
        Value::time(value)
    }
}

impl<'a> From<ObjectValue<'a>> for Value<'a> {
    #[inline]
    fn from(value: ObjectValue<'a>) -> Self {
        Value::Object(value)
    }
}

/// AST Node for an Object value, which is a list of named arguments.
///
/// Objects are printed in the order their fields were added.
/// [Reference](https://spec.graphql.org/October2021/#sec-Input-Object-Values)
#[derive(Debug, PartialEq, Clone)]
pub struct ObjectValue<'a> {
    pub children: Vec<'a, Argument<'a>>,
}

impl<'a> ObjectValue<'a> {
    /// Checks whether this Object contains any fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns a `Map` keyed by all object field's names mapped to their values.
    pub fn as_map(
        &'a self,
        ctx: &'a ASTContext,
    ) -> HashMap<&'a str, &'a Value<'a>, DefaultHashBuilder, &'a bumpalo::Bump> {
        let mut map = HashMap::new_in(&ctx.arena);
        for field in self.children.iter() {
            map.insert(field.name, &field.value);
        }
        map
    }
}

/// AST Node for an Argument, which carries a name and a value.
///
/// [Reference](https://spec.graphql.org/October2021/#Argument)
#[derive(Debug, PartialEq, Clone)]
pub struct Argument<'a> {
    pub name: &'a str,
    pub value: Value<'a>,
}

impl<'a> Argument<'a> {
    /// Creates a new argument, copying `name` onto the arena.
    pub fn new<V: Into<Value<'a>>>(ctx: &'a ASTContext, name: &str, value: V) -> Self {
        Argument {
            name: ctx.alloc_str(name),
            value: value.into(),
        }
    }
}

/// AST Node for a list of Arguments, which are similar to parameterized inputs to a function.
///
/// [Reference](https://spec.graphql.org/October2021/#Arguments)
#[derive(Debug, PartialEq, Clone)]
pub struct Arguments<'a> {
    pub children: Vec<'a, Argument<'a>>,
}

impl<'a> Arguments<'a> {
    /// Checks whether this list of Arguments contains any values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the value of the first argument with the given name.
    pub fn get(&self, name: &str) -> Option<&Value<'a>> {
        self.children
            .iter()
            .find(|argument| argument.name == name)
            .map(|argument| &argument.value)
    }

    /// Returns a `Map` keyed by all arguments' names mapped to their values.
    pub fn as_map(
        &'a self,
        ctx: &'a ASTContext,
    ) -> HashMap<&'a str, &'a Value<'a>, DefaultHashBuilder, &'a bumpalo::Bump> {
        let mut map = HashMap::new_in(&ctx.arena);
        for argument in self.children.iter() {
            map.insert(argument.name, &argument.value);
        }
        map
    }
}

/// AST Node for Selection Sets, which provide a way to select more information on a given parent.
///
/// Each entry is a slot for a [Field]. A slot may be reserved before the field that fills it has
/// been built, and a slot that's still empty when the query is validated fails validation.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Selection-Sets)
#[derive(Debug, PartialEq, Clone)]
pub struct SelectionSet<'a> {
    pub selections: Vec<'a, Option<Field<'a>>>,
}

impl<'a> SelectionSet<'a> {
    /// Checks whether this Selection Set contains any selections.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Returns an iterator over all fields in filled slots.
    #[inline]
    pub fn fields(&self) -> impl Iterator<Item = &Field<'a>> {
        self.selections.iter().flatten()
    }

    /// Appends a field to this Selection Set.
    #[inline]
    pub fn push(&mut self, field: Field<'a>) {
        self.selections.push(Some(field));
    }

    /// Reserves an empty slot for a field and returns its index.
    pub fn reserve(&mut self) -> usize {
        self.selections.push(None);
        self.selections.len() - 1
    }

    /// Puts a field into the slot at `index`, returning the field that previously occupied it.
    ///
    /// If no slot exists at `index` the field is handed back as an `Err`.
    pub fn fill(
        &mut self,
        index: usize,
        field: Field<'a>,
    ) -> std::result::Result<Option<Field<'a>>, Field<'a>> {
        match self.selections.get_mut(index) {
            Some(slot) => Ok(slot.replace(field)),
            None => Err(field),
        }
    }

    /// Appends one leaf field per name.
    pub fn add_leaves<I>(&mut self, ctx: &'a ASTContext, names: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for name in names {
            self.push(Field::new(ctx, name.as_ref()));
        }
    }
}

/// AST Node for Fields, which can be likened to functions or properties on a parent object.
///
/// In JSON this would represent a property in a JSON object.
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Fields)
#[derive(Debug, PartialEq, Clone)]
pub struct Field<'a> {
    /// A Field's `alias`, which is used to request information under a different name than the
    /// Field's `name`. An empty alias is treated as no alias.
    /// [Reference](https://spec.graphql.org/October2021/#sec-Field-Alias)
    pub alias: Option<&'a str>,
    /// A Field's `name`, which represents a resolver on a GraphQL schema's object type.
    pub name: &'a str,
    /// Arguments that are passed to a Field.
    ///
    /// When no Arguments are passed, this will be an empty
    /// list, as can be checked using `Arguments::is_empty`.
    /// See: [Arguments]
    pub arguments: Arguments<'a>,
    /// A sub-Selection Set that is passed below this field to add selections to this field's
    /// returned GraphQL object type.
    ///
    /// When no selections are present, this will be an empty
    /// list, as can be checked using `SelectionSet::is_empty`.
    /// See: [SelectionSet]
    pub selection_set: SelectionSet<'a>,
}

impl<'a> Field<'a> {
    /// Creates a new leaf field with the given `name`, copying it onto the arena.
    ///
    /// Arguments and the selection set are created as empty defaults.
    #[inline]
    pub fn new(ctx: &'a ASTContext, name: &str) -> Self {
        Field {
            alias: None,
            name: ctx.alloc_str(name),
            arguments: Arguments::default_in(&ctx.arena),
            selection_set: SelectionSet::default_in(&ctx.arena),
        }
    }

    /// Get the alias of the field, if present, otherwise get the name.
    #[inline]
    pub fn alias_or_name(&self) -> &'a str {
        match self.alias {
            Some(alias) if !alias.is_empty() => alias,
            _ => self.name,
        }
    }

    /// Checks whether this field has no sub-selections.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.selection_set.is_empty()
    }

    pub fn with_alias(mut self, ctx: &'a ASTContext, alias: &str) -> Self {
        self.alias = Some(ctx.alloc_str(alias));
        self
    }

    pub fn with_arguments<I: IntoIterator<Item = Argument<'a>>>(mut self, arguments: I) -> Self {
        self.add_arguments(arguments);
        self
    }

    pub fn with_fields<I: IntoIterator<Item = Field<'a>>>(mut self, fields: I) -> Self {
        self.add_fields(fields);
        self
    }

    /// Appends arguments after the ones this field already has.
    pub fn add_arguments<I: IntoIterator<Item = Argument<'a>>>(&mut self, arguments: I) -> &mut Self {
        self.arguments.children.extend(arguments);
        self
    }

    /// Replaces all of this field's arguments.
    pub fn set_arguments<I: IntoIterator<Item = Argument<'a>>>(&mut self, arguments: I) -> &mut Self {
        self.arguments.children.clear();
        self.add_arguments(arguments)
    }

    /// Appends sub-fields after the ones this field already selects.
    pub fn add_fields<I: IntoIterator<Item = Field<'a>>>(&mut self, fields: I) -> &mut Self {
        self.selection_set
            .selections
            .extend(fields.into_iter().map(Some));
        self
    }

    /// Replaces all of this field's sub-fields, including reserved slots.
    pub fn set_fields<I: IntoIterator<Item = Field<'a>>>(&mut self, fields: I) -> &mut Self {
        self.selection_set.selections.clear();
        self.add_fields(fields)
    }
}

/// AST Node for a kind of operation, as referred to by a [`Query`].
///
/// In GraphQL there are three different operations, with each having a unique keyword.
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Operations)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    /// Returns the lowercase keyword that starts an operation of this kind.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
            OperationKind::Subscription => "subscription",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for OperationKind {
    type Error = Error;

    /// Parses an operation keyword, ignoring ASCII case.
    fn try_from(value: &str) -> Result<Self> {
        [
            OperationKind::Query,
            OperationKind::Mutation,
            OperationKind::Subscription,
        ]
        .into_iter()
        .find(|kind| kind.as_str().eq_ignore_ascii_case(value))
        .ok_or_else(|| {
            Error::new(
                format!("Operation type `{value}` is not one of query, mutation, or subscription"),
                ErrorType::InvalidOperationType,
            )
        })
    }
}

/// AST Root Node for an operation, which owns the whole tree of fields and arguments.
///
/// A Query is built up freely and is only checked when it's validated or rendered, which is when
/// its kind, names, and field slots are checked.
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Operations)
#[derive(Debug, PartialEq, Clone)]
pub struct Query<'a> {
    /// The kind of operation, which must be set before the Query can be rendered.
    pub operation: Option<OperationKind>,
    /// An optional name of the operation. An empty name is treated as no name.
    pub name: Option<&'a str>,
    /// The top-level fields of the operation.
    /// See: [SelectionSet]
    pub selection_set: SelectionSet<'a>,
}

impl<'a> Query<'a> {
    /// Creates an empty, anonymous operation of the given kind.
    pub fn new(ctx: &'a ASTContext, operation: OperationKind) -> Self {
        Query {
            operation: Some(operation),
            ..Query::default_in(&ctx.arena)
        }
    }

    /// Returns the operation's name unless it's absent or empty.
    #[inline]
    pub fn name(&self) -> Option<&'a str> {
        self.name.filter(|name| !name.is_empty())
    }

    pub fn with_name(mut self, ctx: &'a ASTContext, name: &str) -> Self {
        self.set_name(ctx, name);
        self
    }

    pub fn with_fields<I: IntoIterator<Item = Field<'a>>>(mut self, fields: I) -> Self {
        self.add_fields(fields);
        self
    }

    pub fn set_name(&mut self, ctx: &'a ASTContext, name: &str) -> &mut Self {
        self.name = Some(ctx.alloc_str(name));
        self
    }

    pub fn set_operation(&mut self, operation: OperationKind) -> &mut Self {
        self.operation = Some(operation);
        self
    }

    /// Appends top-level fields after the ones this query already selects.
    pub fn add_fields<I: IntoIterator<Item = Field<'a>>>(&mut self, fields: I) -> &mut Self {
        self.selection_set
            .selections
            .extend(fields.into_iter().map(Some));
        self
    }

    /// Replaces all top-level fields, including reserved slots.
    pub fn set_fields<I: IntoIterator<Item = Field<'a>>>(&mut self, fields: I) -> &mut Self {
        self.selection_set.selections.clear();
        self.add_fields(fields)
    }
}
