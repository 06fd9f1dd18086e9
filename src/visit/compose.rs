use super::visitor::*;
use crate::ast::*;

/// This structure implements the `Visitor` trait and runs two child Visitors in one traversal,
/// calling each callback on the first visitor and then on the second.
///
/// During traversal the Composed Visitor will keep track of the visitor's [`VisitFlow`] signals and
/// will avoid calling callbacks on them appropriately, while letting the other visitor continue as
/// usual. In short, this visitor aims to minimize the work it does while preserving expected
/// behavior.
///
/// Visitors may be composed indefinitely since a Composed Visitor can be passed into another
/// Composed Visitor, as long as all visitors accept the same `Context` type.
pub struct ComposedVisitor<'a, Context, A: Visitor<'a, Context>, B: Visitor<'a, Context>> {
    _marker: std::marker::PhantomData<&'a Context>,
    depth: usize,
    skip_a: usize,
    skip_b: usize,
    pub a: A,
    pub b: B,
}

/// Tracks the signal of one child visitor for an `enter_` callback.
///
/// `skip` is `usize::MAX` while the visitor is active, `0` once it broke off, and otherwise holds
/// the depth of the node it skipped.
#[inline(always)]
fn track_enter(
    flow: VisitFlow,
    skip: &mut usize,
    depth: usize,
    all_skip: &mut bool,
    all_break: &mut bool,
) {
    match flow {
        VisitFlow::Break => {
            *skip = 0;
            *all_skip = false;
        }
        VisitFlow::Skip => {
            *skip = depth;
            *all_break = false;
        }
        VisitFlow::Next => {
            *all_break = false;
            *all_skip = false;
        }
    }
}

impl<'a, C, A: Visitor<'a, C>, B: Visitor<'a, C>> ComposedVisitor<'a, C, A, B> {
    /// Composes two input visitors into one Composed Visitor.
    #[inline]
    pub fn new(a: A, b: B) -> ComposedVisitor<'a, C, A, B> {
        ComposedVisitor {
            _marker: std::marker::PhantomData,
            depth: 1,
            skip_a: usize::MAX,
            skip_b: usize::MAX,
            a,
            b,
        }
    }

    #[inline(always)]
    fn compose_flow_enter<Node: 'a>(
        &mut self,
        fn_a: fn(_self: &mut A, ctx: &mut C, node: &'a Node, info: &VisitInfo) -> VisitFlow,
        fn_b: fn(_self: &mut B, ctx: &mut C, node: &'a Node, info: &VisitInfo) -> VisitFlow,
        node: &'a Node,
        info: &VisitInfo,
        ctx: &mut C,
    ) -> VisitFlow {
        let mut all_skip = true;
        let mut all_break = true;

        if self.skip_a == usize::MAX {
            let flow = fn_a(&mut self.a, ctx, node, info);
            track_enter(flow, &mut self.skip_a, self.depth, &mut all_skip, &mut all_break);
        } else if self.skip_a == 0 {
            all_skip = false;
        } else {
            all_break = false;
        }

        if self.skip_b == usize::MAX {
            let flow = fn_b(&mut self.b, ctx, node, info);
            track_enter(flow, &mut self.skip_b, self.depth, &mut all_skip, &mut all_break);
        } else if self.skip_b == 0 {
            all_skip = false;
        } else {
            all_break = false;
        }

        if all_break {
            VisitFlow::Break
        } else if all_skip {
            if self.skip_a == self.depth {
                self.skip_a = usize::MAX;
            }
            if self.skip_b == self.depth {
                self.skip_b = usize::MAX;
            }
            VisitFlow::Skip
        } else {
            self.depth += 1;
            VisitFlow::Next
        }
    }

    #[inline(always)]
    fn compose_flow_leave<Node: 'a>(
        &mut self,
        fn_a: fn(_self: &mut A, ctx: &mut C, node: &'a Node, info: &VisitInfo) -> VisitFlow,
        fn_b: fn(_self: &mut B, ctx: &mut C, node: &'a Node, info: &VisitInfo) -> VisitFlow,
        node: &'a Node,
        info: &VisitInfo,
        ctx: &mut C,
    ) -> VisitFlow {
        self.depth -= 1;
        let mut all_break = true;

        if self.skip_a == usize::MAX {
            if fn_a(&mut self.a, ctx, node, info) == VisitFlow::Break {
                self.skip_a = 0;
            } else {
                all_break = false;
            }
        } else if self.skip_a == self.depth {
            self.skip_a = usize::MAX;
            all_break = false;
        } else if self.skip_a != 0 {
            all_break = false;
        }

        if self.skip_b == usize::MAX {
            if fn_b(&mut self.b, ctx, node, info) == VisitFlow::Break {
                self.skip_b = 0;
            } else {
                all_break = false;
            }
        } else if self.skip_b == self.depth {
            self.skip_b = usize::MAX;
            all_break = false;
        } else if self.skip_b != 0 {
            all_break = false;
        }

        if all_break {
            VisitFlow::Break
        } else {
            VisitFlow::Next
        }
    }

    /// Calls a callback that has no matching `leave_` callback on all active visitors.
    #[inline(always)]
    fn compose_flow_leaf<Node: 'a>(
        &mut self,
        fn_a: fn(_self: &mut A, ctx: &mut C, node: &'a Node, info: &VisitInfo) -> VisitFlow,
        fn_b: fn(_self: &mut B, ctx: &mut C, node: &'a Node, info: &VisitInfo) -> VisitFlow,
        node: &'a Node,
        info: &VisitInfo,
        ctx: &mut C,
    ) -> VisitFlow {
        if self.skip_a == usize::MAX && fn_a(&mut self.a, ctx, node, info) == VisitFlow::Break {
            self.skip_a = 0;
        }
        if self.skip_b == usize::MAX && fn_b(&mut self.b, ctx, node, info) == VisitFlow::Break {
            self.skip_b = 0;
        }

        if self.skip_a == 0 && self.skip_b == 0 {
            VisitFlow::Break
        } else {
            VisitFlow::Next
        }
    }
}

impl<'a, C, A: Visitor<'a, C>, B: Visitor<'a, C>> Visitor<'a, C> for ComposedVisitor<'a, C, A, B> {
    #[inline]
    fn enter_query(&mut self, ctx: &mut C, query: &'a Query<'a>, info: &VisitInfo) -> VisitFlow {
        self.compose_flow_enter(A::enter_query, B::enter_query, query, info, ctx)
    }

    #[inline]
    fn leave_query(&mut self, ctx: &mut C, query: &'a Query<'a>, info: &VisitInfo) -> VisitFlow {
        self.compose_flow_leave(A::leave_query, B::leave_query, query, info, ctx)
    }

    #[inline]
    fn enter_selection_set(
        &mut self,
        ctx: &mut C,
        selection_set: &'a SelectionSet<'a>,
        info: &VisitInfo,
    ) -> VisitFlow {
        self.compose_flow_enter(
            A::enter_selection_set,
            B::enter_selection_set,
            selection_set,
            info,
            ctx,
        )
    }

    #[inline]
    fn leave_selection_set(
        &mut self,
        ctx: &mut C,
        selection_set: &'a SelectionSet<'a>,
        info: &VisitInfo,
    ) -> VisitFlow {
        self.compose_flow_leave(
            A::leave_selection_set,
            B::leave_selection_set,
            selection_set,
            info,
            ctx,
        )
    }

    #[inline]
    fn missing_field(
        &mut self,
        ctx: &mut C,
        selection_set: &'a SelectionSet<'a>,
        info: &VisitInfo,
    ) -> VisitFlow {
        self.compose_flow_leaf(A::missing_field, B::missing_field, selection_set, info, ctx)
    }

    #[inline]
    fn enter_field(&mut self, ctx: &mut C, field: &'a Field<'a>, info: &VisitInfo) -> VisitFlow {
        self.compose_flow_enter(A::enter_field, B::enter_field, field, info, ctx)
    }

    #[inline]
    fn leave_field(&mut self, ctx: &mut C, field: &'a Field<'a>, info: &VisitInfo) -> VisitFlow {
        self.compose_flow_leave(A::leave_field, B::leave_field, field, info, ctx)
    }

    #[inline]
    fn enter_argument(
        &mut self,
        ctx: &mut C,
        argument: &'a Argument<'a>,
        info: &VisitInfo,
    ) -> VisitFlow {
        self.compose_flow_enter(A::enter_argument, B::enter_argument, argument, info, ctx)
    }

    #[inline]
    fn leave_argument(
        &mut self,
        ctx: &mut C,
        argument: &'a Argument<'a>,
        info: &VisitInfo,
    ) -> VisitFlow {
        self.compose_flow_leave(A::leave_argument, B::leave_argument, argument, info, ctx)
    }

    #[inline]
    fn enter_value(&mut self, ctx: &mut C, value: &'a Value<'a>, info: &VisitInfo) -> VisitFlow {
        self.compose_flow_enter(A::enter_value, B::enter_value, value, info, ctx)
    }

    #[inline]
    fn leave_value(&mut self, ctx: &mut C, value: &'a Value<'a>, info: &VisitInfo) -> VisitFlow {
        self.compose_flow_leave(A::leave_value, B::leave_value, value, info, ctx)
    }
}
