//! Qualified (dotted) member resolution.
//!
//! `MemberAccess` resolves its receiver first, accepting values, types and
//! namespaces, then dispatches on what the receiver denoted:
//!
//! - a namespace yields nested namespaces and registered types
//! - a type yields static members and nested types; an instance member
//!   reached through a type name has no receiver and is an error
//! - a value yields instance members, with the receiver's static type as
//!   the qualifier for the protected-access check; a static member
//!   reached through an instance is an error

use crate::access::AccessQuery;
use crate::expr::{
    Denotation, Expr, ExprClass, ExpressionNode, NodeId, Resolved, ResolveContext,
    classify_candidates, resolve, resolve_flags,
};
use crate::failures;
use crate::lookup::{LookupOutcome, binding_flags, lookup};
use crate::type_names;
use once_cell::unsync::OnceCell;
use sable_common::{Atom, Span};
use sable_decl::{TypeId, member_kinds};

pub struct MemberAccess {
    pub id: NodeId,
    pub object: Box<Expr>,
    pub name: Atom,
    pub type_args: Vec<TypeId>,
    pub span: Span,
    resolved: OnceCell<Resolved>,
}

impl MemberAccess {
    pub fn new(id: NodeId, object: Expr, name: Atom, span: Span) -> MemberAccess {
        MemberAccess {
            id,
            object: Box::new(object),
            name,
            type_args: Vec::new(),
            span,
            resolved: OnceCell::new(),
        }
    }

    pub fn with_type_args(mut self, args: Vec<TypeId>) -> MemberAccess {
        self.type_args = args;
        self
    }
}

impl ExpressionNode for MemberAccess {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn span(&self) -> Span {
        self.span
    }

    fn cache(&self) -> &OnceCell<Resolved> {
        &self.resolved
    }

    fn resolve_inner(&self, ctx: &mut ResolveContext<'_>) -> Option<Resolved> {
        let left = resolve(
            &*self.object,
            ctx,
            resolve_flags::VARIABLE_OR_VALUE
                | resolve_flags::TYPE
                | resolve_flags::INTERMEDIATE
                | resolve_flags::DISABLE_FLOW_ANALYSIS,
        )?;
        match left.denotation {
            Denotation::Namespace(ns) => type_names::resolve_in_namespace(
                ctx,
                ns,
                self.name,
                self.type_args.len() as u16,
                self.span,
            ),
            Denotation::Type(ty) => self.resolve_through_type(ctx, ty),
            _ => {
                let receiver = left.ty.expect("value expression carries a type");
                self.resolve_through_instance(ctx, receiver)
            }
        }
    }

    fn resolve_as_type(&self, ctx: &mut ResolveContext<'_>) -> Option<Resolved> {
        let left = resolve(&*self.object, ctx, resolve_flags::TYPE)?;
        match left.denotation {
            Denotation::Namespace(ns) => type_names::resolve_in_namespace(
                ctx,
                ns,
                self.name,
                self.type_args.len() as u16,
                self.span,
            ),
            Denotation::Type(ty) => {
                let compilation = ctx.compilation;
                let query = AccessQuery {
                    accessing: ctx.container_type,
                    qualifier: Some(ty),
                    target: ty,
                    kind_mask: member_kinds::NESTED_TYPE,
                    binding: binding_flags::ALL,
                };
                let mut almost = Vec::new();
                match lookup(compilation, &query, self.name, &mut almost) {
                    LookupOutcome::Found(set) => {
                        let id = set.single()?;
                        let nested = compilation.members.get(id).ty;
                        self.check_type_arity(ctx, nested)
                    }
                    _ => {
                        failures::report_member_lookup_failed(
                            ctx,
                            Some(ty),
                            ty,
                            self.name,
                            &almost,
                            self.span,
                        );
                        None
                    }
                }
            }
            _ => None,
        }
    }
}

impl MemberAccess {
    fn resolve_through_type(&self, ctx: &mut ResolveContext<'_>, ty: TypeId) -> Option<Resolved> {
        let compilation = ctx.compilation;
        let query = AccessQuery {
            accessing: ctx.container_type,
            qualifier: Some(ty),
            target: ty,
            kind_mask: member_kinds::ALL,
            binding: binding_flags::ALL,
        };
        let mut almost = Vec::new();
        match lookup(compilation, &query, self.name, &mut almost) {
            LookupOutcome::Found(set) => {
                let resolved = classify_candidates(compilation, &set);
                let resolved = self.apply_type_args(ctx, resolved)?;
                match resolved.denotation {
                    Denotation::MethodGroup(mut group) => {
                        if !group.retain_static_methods(compilation) {
                            let signature = group.signature_for_error(compilation);
                            failures::report_object_reference_required(ctx, &signature, self.span);
                            return None;
                        }
                        Some(Resolved {
                            class: ExprClass::MethodGroup,
                            ty: None,
                            denotation: Denotation::MethodGroup(group),
                        })
                    }
                    Denotation::Member(id) => {
                        if !compilation.members.get(id).is_static {
                            let signature = compilation.member_signature(id);
                            failures::report_object_reference_required(ctx, &signature, self.span);
                            return None;
                        }
                        Some(Resolved {
                            class: resolved.class,
                            ty: resolved.ty,
                            denotation: Denotation::Member(id),
                        })
                    }
                    other => Some(Resolved {
                        class: resolved.class,
                        ty: resolved.ty,
                        denotation: other,
                    }),
                }
            }
            LookupOutcome::Ambiguous(ids) => {
                failures::report_ambiguous(ctx, self.name, &ids, self.span);
                None
            }
            LookupOutcome::NotFound => {
                failures::report_member_lookup_failed(
                    ctx,
                    Some(ty),
                    ty,
                    self.name,
                    &almost,
                    self.span,
                );
                None
            }
        }
    }

    fn resolve_through_instance(
        &self,
        ctx: &mut ResolveContext<'_>,
        receiver: TypeId,
    ) -> Option<Resolved> {
        let compilation = ctx.compilation;
        let query = AccessQuery {
            accessing: ctx.container_type,
            qualifier: Some(receiver),
            target: receiver,
            // Nested types are not reachable through an instance.
            kind_mask: member_kinds::ALL & !member_kinds::NESTED_TYPE,
            binding: binding_flags::ALL,
        };
        let mut almost = Vec::new();
        match lookup(compilation, &query, self.name, &mut almost) {
            LookupOutcome::Found(set) => {
                let resolved = classify_candidates(compilation, &set);
                let resolved = self.apply_type_args(ctx, resolved)?;
                match resolved.denotation {
                    Denotation::MethodGroup(mut group) => {
                        if !group.retain_instance_methods(compilation) {
                            let signature = group.signature_for_error(compilation);
                            failures::report_static_via_instance(ctx, &signature, self.span);
                            return None;
                        }
                        Some(Resolved {
                            class: ExprClass::MethodGroup,
                            ty: None,
                            denotation: Denotation::MethodGroup(group),
                        })
                    }
                    Denotation::Member(id) => {
                        if compilation.members.get(id).is_static {
                            let signature = compilation.member_signature(id);
                            failures::report_static_via_instance(ctx, &signature, self.span);
                            return None;
                        }
                        Some(Resolved {
                            class: resolved.class,
                            ty: resolved.ty,
                            denotation: Denotation::Member(id),
                        })
                    }
                    other => Some(Resolved {
                        class: resolved.class,
                        ty: resolved.ty,
                        denotation: other,
                    }),
                }
            }
            LookupOutcome::Ambiguous(ids) => {
                failures::report_ambiguous(ctx, self.name, &ids, self.span);
                None
            }
            LookupOutcome::NotFound => {
                failures::report_member_lookup_failed(
                    ctx,
                    Some(receiver),
                    receiver,
                    self.name,
                    &almost,
                    self.span,
                );
                None
            }
        }
    }

    fn apply_type_args(&self, ctx: &mut ResolveContext<'_>, resolved: Resolved) -> Option<Resolved> {
        if self.type_args.is_empty() {
            return Some(resolved);
        }
        let compilation = ctx.compilation;
        match resolved.denotation {
            Denotation::MethodGroup(group) => {
                let specialized = group.with_type_arguments(ctx, &self.type_args, self.span)?;
                Some(Resolved {
                    class: ExprClass::MethodGroup,
                    ty: None,
                    denotation: Denotation::MethodGroup(specialized),
                })
            }
            Denotation::Type(ty) => self.check_type_arity(ctx, ty),
            other => {
                let display = match other {
                    Denotation::Member(id) => compilation.member_signature(id),
                    _ => compilation.interner.resolve(self.name).to_string(),
                };
                failures::report_non_generic_with_type_arguments(ctx, "member", &display, self.span);
                None
            }
        }
    }

    fn check_type_arity(&self, ctx: &mut ResolveContext<'_>, ty: TypeId) -> Option<Resolved> {
        let compilation = ctx.compilation;
        let expected = compilation
            .types
            .get(compilation.types.definition_of(ty))
            .arity;
        if expected as usize != self.type_args.len() {
            if expected == 0 {
                let display = compilation.type_name(ty);
                failures::report_non_generic_with_type_arguments(ctx, "type", &display, self.span);
            } else {
                failures::report_generic_type_arity(ctx, ty, expected, self.span);
            }
            return None;
        }
        Some(Resolved::ty_expr(ty))
    }
}
