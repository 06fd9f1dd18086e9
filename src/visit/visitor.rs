use super::{compose::ComposedVisitor, path::Path, PathSegment};
use crate::ast::*;
use private::VisitNodeWithInfo;

pub(crate) mod private {
    use super::{VisitFlow, VisitInfo, Visitor};

    pub trait VisitNodeWithInfo<'a>: Sized {
        fn visit_with_info<'b, C, V: Visitor<'a, C>>(
            &'a self,
            ctx: &'b mut C,
            visitor: &'b mut V,
            info: &mut VisitInfo,
        ) -> VisitFlow;
    }
}

/// A visitor signal that is returned from [Visitor] callbacks to alter the flow of traversal.
///
/// The default callbacks all return `VisitFlow::Next`, which continues the depth-first traversal. The
/// other signals may be used to skip over a node in an `enter_` callback or to abort traversal
/// entirely without visiting any more AST Nodes.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum VisitFlow {
    /// Continue visiting nodes as usual.
    Next,
    /// Abort the traversal without performing any subsequent visits.
    Break,
    /// Skip over the current node without performing any deeper traversal.
    /// (Only applies to `enter_` callbacks)
    Skip,
}

/// Information about the node that's currently being visited.
#[derive(Debug, Default)]
pub struct VisitInfo {
    /// The location of the current node relative to the root of the traversal.
    pub path: Path,
}

/// Trait for a visitor that carries methods that are called as callback while AST nodes
/// implementing the visitor pattern are traversed.
///
/// While the AST is traversed in depth-first order, callbacks that are prefixed with `enter_` are
/// called from top-to-bottom while the traversal is recursing, while callbacks that are prefixed
/// with `leave_` are called from bottom-to-top while the traversal is returning.
///
/// Arguments are visited wherever they occur: both a [Field]'s arguments and the fields of an
/// [`ObjectValue`] nested in an argument's [Value] are passed to `enter_argument`. Reserved slots
/// of a [`SelectionSet`] that were never filled are reported to `missing_field` instead of being
/// visited.
///
/// All callbacks have a default no-op implementation that returns `VisitFlow::Next`. The
/// [`VisitFlow`] signals are returned from callbacks to alter the traversal and either continue it
/// (`Next`), skip over a node during an `enter_` callback with (`Skip`), or abort traversal
/// entirely (`Break`).
///
/// The visitor must implement the [Visitor] trait which may also define a custom context structure
/// that can be passed to the `visit` method. By default the context is an empty unit `()`.
///
/// This pattern is applicable to any AST node that implements the [`VisitNode`] trait.
pub trait Visitor<'a, Context = ()>: Sized {
    /// Combines two visitors into one that calls the original and then the passed visitor on every
    /// node of a single traversal.
    ///
    /// Both visitors must accept the same `Context` type.
    #[inline]
    fn compose<V: Visitor<'a, Context>>(self, other: V) -> ComposedVisitor<'a, Context, Self, V> {
        ComposedVisitor::new(self, other)
    }

    /// Called when a [Query] is visited and before its child nodes are visited.
    fn enter_query(
        &mut self,
        _ctx: &mut Context,
        _query: &'a Query<'a>,
        _info: &VisitInfo,
    ) -> VisitFlow {
        VisitFlow::Next
    }
    /// Called after a [Query] and its child nodes were visited.
    fn leave_query(
        &mut self,
        _ctx: &mut Context,
        _query: &'a Query<'a>,
        _info: &VisitInfo,
    ) -> VisitFlow {
        VisitFlow::Next
    }

    /// Called when a [`SelectionSet`] node is visited and before its child nodes are visited.
    fn enter_selection_set(
        &mut self,
        _ctx: &mut Context,
        _selection_set: &'a SelectionSet<'a>,
        _info: &VisitInfo,
    ) -> VisitFlow {
        VisitFlow::Next
    }
    /// Called after a [`SelectionSet`] node and its child nodes were visited.
    fn leave_selection_set(
        &mut self,
        _ctx: &mut Context,
        _selection_set: &'a SelectionSet<'a>,
        _info: &VisitInfo,
    ) -> VisitFlow {
        VisitFlow::Next
    }

    /// Called for an empty field slot of a [`SelectionSet`], with the path pointing at the slot.
    ///
    /// Since an empty slot has no children, a `Skip` signal has the same effect as `Next`.
    fn missing_field(
        &mut self,
        _ctx: &mut Context,
        _selection_set: &'a SelectionSet<'a>,
        _info: &VisitInfo,
    ) -> VisitFlow {
        VisitFlow::Next
    }

    /// Called when a [Field] node is visited and before its child nodes are visited.
    fn enter_field(
        &mut self,
        _ctx: &mut Context,
        _field: &'a Field<'a>,
        _info: &VisitInfo,
    ) -> VisitFlow {
        VisitFlow::Next
    }
    /// Called after a [Field] node and its child nodes were visited.
    fn leave_field(
        &mut self,
        _ctx: &mut Context,
        _field: &'a Field<'a>,
        _info: &VisitInfo,
    ) -> VisitFlow {
        VisitFlow::Next
    }

    /// Called when an [Argument] node is visited and before its value is visited.
    fn enter_argument(
        &mut self,
        _ctx: &mut Context,
        _argument: &'a Argument<'a>,
        _info: &VisitInfo,
    ) -> VisitFlow {
        VisitFlow::Next
    }
    /// Called after an [Argument] node and its value were visited.
    fn leave_argument(
        &mut self,
        _ctx: &mut Context,
        _argument: &'a Argument<'a>,
        _info: &VisitInfo,
    ) -> VisitFlow {
        VisitFlow::Next
    }

    /// Called when a [Value] node is visited and before any nested object fields are visited.
    fn enter_value(
        &mut self,
        _ctx: &mut Context,
        _value: &'a Value<'a>,
        _info: &VisitInfo,
    ) -> VisitFlow {
        VisitFlow::Next
    }
    /// Called after a [Value] node and its nested object fields were visited.
    fn leave_value(
        &mut self,
        _ctx: &mut Context,
        _value: &'a Value<'a>,
        _info: &VisitInfo,
    ) -> VisitFlow {
        VisitFlow::Next
    }
}

/// Trait for visiting AST Nodes of a GraphQL operation in depth-first order using a custom visitor.
///
/// The visitor must implement the [Visitor] trait which may also define a custom context structure
/// that can be passed to the `visit` method.
pub trait VisitNode<'a>: Sized + private::VisitNodeWithInfo<'a> {
    /// Visit a GraphQL AST node tree recursively in depth-first order with a given visitor.
    ///
    /// The visitor must implement the [Visitor] trait which may also define a custom context structure
    /// that can be passed to the `visit` method. By default the context is an empty unit `()`.
    fn visit<'b, C, V: Visitor<'a, C>>(&'a self, ctx: &'b mut C, visitor: &'b mut V) -> VisitFlow {
        let mut info = VisitInfo::default();
        self.visit_with_info(ctx, visitor, &mut info)
    }
}

impl<'a, T: private::VisitNodeWithInfo<'a>> VisitNode<'a> for T {}

/// Visits a list of arguments, pushing each argument's index onto the path.
#[inline]
fn visit_arguments<'a, 'b, C, V: Visitor<'a, C>>(
    arguments: &'a [Argument<'a>],
    ctx: &'b mut C,
    visitor: &'b mut V,
    info: &mut VisitInfo,
) -> VisitFlow {
    for (index, argument) in arguments.iter().enumerate() {
        info.path.push(PathSegment::Index(index));
        if argument.visit_with_info(ctx, visitor, info) == VisitFlow::Break {
            return VisitFlow::Break;
        }
        info.path.pop();
    }
    VisitFlow::Next
}

impl<'a> private::VisitNodeWithInfo<'a> for Value<'a> {
    #[inline]
    fn visit_with_info<'b, C, V: Visitor<'a, C>>(
        &'a self,
        ctx: &'b mut C,
        visitor: &'b mut V,
        info: &mut VisitInfo,
    ) -> VisitFlow {
        let flow = visitor.enter_value(ctx, self, info);
        if let VisitFlow::Next = flow {
            match self {
                Value::Object(object) => {
                    if object.visit_with_info(ctx, visitor, info) == VisitFlow::Break {
                        return VisitFlow::Break;
                    }
                }
                Value::ObjectList(objects) => {
                    for (index, object) in objects.iter().enumerate() {
                        info.path.push(PathSegment::Index(index));
                        if object.visit_with_info(ctx, visitor, info) == VisitFlow::Break {
                            return VisitFlow::Break;
                        }
                        info.path.pop();
                    }
                }
                _ => {}
            }
            visitor.leave_value(ctx, self, info)
        } else {
            flow
        }
    }
}

impl<'a> private::VisitNodeWithInfo<'a> for ObjectValue<'a> {
    #[inline]
    fn visit_with_info<'b, C, V: Visitor<'a, C>>(
        &'a self,
        ctx: &'b mut C,
        visitor: &'b mut V,
        info: &mut VisitInfo,
    ) -> VisitFlow {
        visit_arguments(&self.children, ctx, visitor, info)
    }
}

impl<'a> private::VisitNodeWithInfo<'a> for Argument<'a> {
    #[inline]
    fn visit_with_info<'b, C, V: Visitor<'a, C>>(
        &'a self,
        ctx: &'b mut C,
        visitor: &'b mut V,
        info: &mut VisitInfo,
    ) -> VisitFlow {
        let flow = visitor.enter_argument(ctx, self, info);
        if let VisitFlow::Next = flow {
            info.path.push(PathSegment::Value);
            if self.value.visit_with_info(ctx, visitor, info) == VisitFlow::Break {
                return VisitFlow::Break;
            }
            info.path.pop();

            visitor.leave_argument(ctx, self, info)
        } else {
            flow
        }
    }
}

impl<'a> private::VisitNodeWithInfo<'a> for Arguments<'a> {
    #[inline]
    fn visit_with_info<'b, C, V: Visitor<'a, C>>(
        &'a self,
        ctx: &'b mut C,
        visitor: &'b mut V,
        info: &mut VisitInfo,
    ) -> VisitFlow {
        visit_arguments(&self.children, ctx, visitor, info)
    }
}

impl<'a> private::VisitNodeWithInfo<'a> for Field<'a> {
    #[inline]
    fn visit_with_info<'b, C, V: Visitor<'a, C>>(
        &'a self,
        ctx: &'b mut C,
        visitor: &'b mut V,
        info: &mut VisitInfo,
    ) -> VisitFlow {
        let flow = visitor.enter_field(ctx, self, info);
        if let VisitFlow::Next = flow {
            info.path.push(PathSegment::Arguments);
            if self.arguments.visit_with_info(ctx, visitor, info) == VisitFlow::Break {
                return VisitFlow::Break;
            }
            info.path.pop();

            info.path.push(PathSegment::SelectionSet);
            if self.selection_set.visit_with_info(ctx, visitor, info) == VisitFlow::Break {
                return VisitFlow::Break;
            }
            info.path.pop();

            visitor.leave_field(ctx, self, info)
        } else {
            flow
        }
    }
}

impl<'a> private::VisitNodeWithInfo<'a> for SelectionSet<'a> {
    #[inline]
    fn visit_with_info<'b, C, V: Visitor<'a, C>>(
        &'a self,
        ctx: &'b mut C,
        visitor: &'b mut V,
        info: &mut VisitInfo,
    ) -> VisitFlow {
        let flow = visitor.enter_selection_set(ctx, self, info);
        if let VisitFlow::Next = flow {
            for (index, selection) in self.selections.iter().enumerate() {
                info.path.push(PathSegment::Index(index));
                let flow = match selection {
                    Some(field) => field.visit_with_info(ctx, visitor, info),
                    None => visitor.missing_field(ctx, self, info),
                };
                if flow == VisitFlow::Break {
                    return VisitFlow::Break;
                }
                info.path.pop();
            }
            visitor.leave_selection_set(ctx, self, info)
        } else {
            flow
        }
    }
}

impl<'a> private::VisitNodeWithInfo<'a> for Query<'a> {
    #[inline]
    fn visit_with_info<'b, C, V: Visitor<'a, C>>(
        &'a self,
        ctx: &'b mut C,
        visitor: &'b mut V,
        info: &mut VisitInfo,
    ) -> VisitFlow {
        let flow = visitor.enter_query(ctx, self, info);
        if let VisitFlow::Next = flow {
            info.path.push(PathSegment::SelectionSet);
            if self.selection_set.visit_with_info(ctx, visitor, info) == VisitFlow::Break {
                return VisitFlow::Break;
            }
            info.path.pop();

            visitor.leave_query(ctx, self, info)
        } else {
            flow
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Default)]
    pub(crate) struct CountVisitor {
        pub(crate) in_query: usize,
        pub(crate) out_query: usize,
        pub(crate) in_selection_set: usize,
        pub(crate) out_selection_set: usize,
        pub(crate) missing_field: usize,
        pub(crate) in_field: usize,
        pub(crate) out_field: usize,
        pub(crate) in_argument: usize,
        pub(crate) out_argument: usize,
        pub(crate) in_value: usize,
        pub(crate) out_value: usize,
    }

    impl<'a> Visitor<'a, ()> for CountVisitor {
        fn enter_query(&mut self, _: &mut (), _query: &Query, _info: &VisitInfo) -> VisitFlow {
            self.in_query += 1;
            VisitFlow::Next
        }
        fn leave_query(&mut self, _: &mut (), _query: &Query, _info: &VisitInfo) -> VisitFlow {
            self.out_query += 1;
            VisitFlow::Next
        }

        fn enter_selection_set(
            &mut self,
            _: &mut (),
            _selection_set: &SelectionSet,
            _info: &VisitInfo,
        ) -> VisitFlow {
            self.in_selection_set += 1;
            VisitFlow::Next
        }
        fn leave_selection_set(
            &mut self,
            _: &mut (),
            _selection_set: &SelectionSet,
            _info: &VisitInfo,
        ) -> VisitFlow {
            self.out_selection_set += 1;
            VisitFlow::Next
        }

        fn missing_field(
            &mut self,
            _: &mut (),
            _selection_set: &SelectionSet,
            _info: &VisitInfo,
        ) -> VisitFlow {
            self.missing_field += 1;
            VisitFlow::Next
        }

        fn enter_field(&mut self, _: &mut (), _field: &Field, _info: &VisitInfo) -> VisitFlow {
            self.in_field += 1;
            VisitFlow::Next
        }
        fn leave_field(&mut self, _: &mut (), _field: &Field, _info: &VisitInfo) -> VisitFlow {
            self.out_field += 1;
            VisitFlow::Next
        }

        fn enter_argument(
            &mut self,
            _: &mut (),
            _argument: &Argument,
            _info: &VisitInfo,
        ) -> VisitFlow {
            self.in_argument += 1;
            VisitFlow::Next
        }
        fn leave_argument(
            &mut self,
            _: &mut (),
            _argument: &Argument,
            _info: &VisitInfo,
        ) -> VisitFlow {
            self.out_argument += 1;
            VisitFlow::Next
        }

        fn enter_value(&mut self, _: &mut (), _value: &Value, _info: &VisitInfo) -> VisitFlow {
            self.in_value += 1;
            VisitFlow::Next
        }
        fn leave_value(&mut self, _: &mut (), _value: &Value, _info: &VisitInfo) -> VisitFlow {
            self.out_value += 1;
            VisitFlow::Next
        }
    }

    /// `query{user(id:1,where:{name:"a",tags:[{k:1},{k:2}]}){id,_,posts{title}},_,}`
    /// where `_` marks an empty slot.
    pub(crate) fn sample_query(ctx: &ASTContext) -> Query<'_> {
        let mut user = Field::new(ctx, "user")
            .with_arguments([
                Argument::new(ctx, "id", 1),
                Argument::new(
                    ctx,
                    "where",
                    Value::object(
                        ctx,
                        [
                            Argument::new(ctx, "name", Value::string(ctx, "a")),
                            Argument::new(
                                ctx,
                                "tags",
                                Value::object_list(
                                    ctx,
                                    [[Argument::new(ctx, "k", 1)], [Argument::new(ctx, "k", 2)]],
                                ),
                            ),
                        ],
                    ),
                ),
            ])
            .with_fields([Field::new(ctx, "id")]);
        user.selection_set.reserve();
        user.add_fields([Field::new(ctx, "posts").with_fields([Field::new(ctx, "title")])]);

        let mut query = Query::new(ctx, OperationKind::Query).with_fields([user]);
        query.selection_set.reserve();
        query
    }

    #[test]
    fn counts() {
        let ctx = ASTContext::new();
        let query = sample_query(&ctx);

        let mut visitor = CountVisitor::default();
        query.visit(&mut (), &mut visitor);

        assert_eq!(
            visitor,
            CountVisitor {
                in_query: 1,
                out_query: 1,
                in_selection_set: 5,
                out_selection_set: 5,
                missing_field: 2,
                in_field: 4,
                out_field: 4,
                in_argument: 6,
                out_argument: 6,
                in_value: 6,
                out_value: 6,
            }
        )
    }

    #[derive(Default)]
    struct InfoVisitor {
        arguments: std::vec::Vec<(String, String)>,
        missing: std::vec::Vec<String>,
    }

    impl<'a> Visitor<'a> for InfoVisitor {
        fn enter_argument(
            &mut self,
            _ctx: &mut (),
            argument: &'a Argument<'a>,
            info: &VisitInfo,
        ) -> VisitFlow {
            self.arguments
                .push((argument.name.to_string(), info.path.to_string()));
            VisitFlow::Next
        }

        fn missing_field(
            &mut self,
            _ctx: &mut (),
            _selection_set: &'a SelectionSet<'a>,
            info: &VisitInfo,
        ) -> VisitFlow {
            self.missing.push(info.path.to_string());
            VisitFlow::Next
        }
    }

    #[test]
    fn visit_info_path() {
        let ctx = ASTContext::new();
        let query = sample_query(&ctx);

        let mut visitor = InfoVisitor::default();
        query.visit(&mut (), &mut visitor);

        let arguments: std::vec::Vec<(&str, &str)> = visitor
            .arguments
            .iter()
            .map(|(name, path)| (name.as_str(), path.as_str()))
            .collect();
        assert_eq!(
            arguments,
            [
                ("id", "selectionSet.0.arguments.0"),
                ("where", "selectionSet.0.arguments.1"),
                ("name", "selectionSet.0.arguments.1.value.0"),
                ("tags", "selectionSet.0.arguments.1.value.1"),
                ("k", "selectionSet.0.arguments.1.value.1.value.0.0"),
                ("k", "selectionSet.0.arguments.1.value.1.value.1.0"),
            ]
        );
        assert_eq!(
            visitor.missing,
            ["selectionSet.0.selectionSet.1", "selectionSet.1"]
        );
    }

    struct BreakOnMissing {
        fields: usize,
    }

    impl<'a> Visitor<'a> for BreakOnMissing {
        fn enter_field(&mut self, _: &mut (), _field: &Field, _info: &VisitInfo) -> VisitFlow {
            self.fields += 1;
            VisitFlow::Next
        }

        fn missing_field(
            &mut self,
            _: &mut (),
            _selection_set: &SelectionSet,
            _info: &VisitInfo,
        ) -> VisitFlow {
            VisitFlow::Break
        }
    }

    #[test]
    fn break_stops_traversal() {
        let ctx = ASTContext::new();
        let query = sample_query(&ctx);

        let mut visitor = BreakOnMissing { fields: 0 };
        assert_eq!(query.visit(&mut (), &mut visitor), VisitFlow::Break);
        // `user` and `id` are entered before the first empty slot is reached
        assert_eq!(visitor.fields, 2);
    }
}
