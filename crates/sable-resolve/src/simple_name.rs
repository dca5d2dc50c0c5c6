//! Bare-identifier resolution.
//!
//! A `SimpleName` resolves through a fixed precedence ladder:
//!
//! 1. block-local bindings (locals and parameters), which member
//!    declarations can never shadow
//! 2. members of the enclosing types, innermost lexical scope first
//! 3. one direct retry against the containing type as given, covering the
//!    asymmetry between the lexical walk (which runs over defining
//!    declarations) and a constructed containing type
//! 4. type and namespace names
//! 5. failure, carrying the richest near-miss the walk recorded
//!
//! An instance member reached from a static context (or a field
//! initializer) is an error, unless the identifier doubles as a type name
//! of the same spelling at the head of a dotted chain.

use crate::access::{AccessQuery, AlmostMatchList};
use crate::expr::{
    Denotation, ExprClass, ExpressionNode, NodeId, Resolved, ResolveContext, classify_candidates,
};
use crate::failures;
use crate::lookup::{CandidateSet, LookupOutcome, binding_flags, lookup};
use crate::type_names;
use once_cell::unsync::OnceCell;
use sable_common::{Atom, Span};
use sable_decl::{TypeId, member_kinds};
use tracing::trace;

pub struct SimpleName {
    pub id: NodeId,
    pub name: Atom,
    /// Explicit generic type arguments, when the identifier was written
    /// with an argument list.
    pub type_args: Vec<TypeId>,
    pub span: Span,
    resolved: OnceCell<Resolved>,
}

impl SimpleName {
    pub fn new(id: NodeId, name: Atom, span: Span) -> SimpleName {
        SimpleName {
            id,
            name,
            type_args: Vec::new(),
            span,
            resolved: OnceCell::new(),
        }
    }

    pub fn with_type_args(mut self, args: Vec<TypeId>) -> SimpleName {
        self.type_args = args;
        self
    }
}

impl ExpressionNode for SimpleName {
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
        self.do_simple_name_resolve(ctx)
    }

    fn resolve_as_type(&self, ctx: &mut ResolveContext<'_>) -> Option<Resolved> {
        type_names::resolve_simple_type(
            ctx,
            self.name,
            self.type_args.len() as u16,
            self.span,
            false,
        )
    }
}

impl SimpleName {
    fn do_simple_name_resolve(&self, ctx: &mut ResolveContext<'_>) -> Option<Resolved> {
        trace!(name = ctx.compilation.interner.resolve(self.name), "simple name resolve");

        // Stage 1: block-local bindings.
        if let Some(local) = ctx.lookup_local(self.name) {
            let ty = local.ty;
            return Some(Resolved {
                class: ExprClass::Variable,
                ty: Some(ty),
                denotation: Denotation::Local { name: self.name },
            });
        }

        let compilation = ctx.compilation;
        let types = &compilation.types;

        // Stage 2: members of the enclosing types, innermost first. The
        // first level to record near-misses keeps them for stage 5.
        let mut almost: AlmostMatchList = Vec::new();
        let mut best_almost: Option<AlmostMatchList> = None;
        let mut found: Option<CandidateSet> = None;
        let mut scope = ctx.container_type.map(|t| types.definition_of(t));
        while let Some(level) = scope {
            let query = AccessQuery {
                accessing: ctx.container_type,
                qualifier: None,
                target: level,
                kind_mask: member_kinds::ALL,
                binding: binding_flags::ALL,
            };
            match lookup(compilation, &query, self.name, &mut almost) {
                LookupOutcome::Found(set) => {
                    found = Some(set);
                    break;
                }
                LookupOutcome::Ambiguous(ids) => {
                    failures::report_ambiguous(ctx, self.name, &ids, self.span);
                    return None;
                }
                LookupOutcome::NotFound => {
                    if best_almost.is_none() && !almost.is_empty() {
                        best_almost = Some(std::mem::take(&mut almost));
                    }
                    almost.clear();
                }
            }
            scope = types.get(level).lexical_parent.map(|t| types.definition_of(t));
        }

        // Stage 3: the containing type as given. A constructed
        // instantiation is not its own defining declaration, which is what
        // stage 2 walked.
        if found.is_none() {
            if let Some(container) = ctx.container_type {
                if types.definition_of(container) != container {
                    almost.clear();
                    let query = AccessQuery {
                        accessing: ctx.container_type,
                        qualifier: None,
                        target: container,
                        kind_mask: member_kinds::ALL,
                        binding: binding_flags::ALL,
                    };
                    match lookup(compilation, &query, self.name, &mut almost) {
                        LookupOutcome::Found(set) => found = Some(set),
                        LookupOutcome::Ambiguous(ids) => {
                            failures::report_ambiguous(ctx, self.name, &ids, self.span);
                            return None;
                        }
                        LookupOutcome::NotFound => {
                            if best_almost.is_none() && !almost.is_empty() {
                                best_almost = Some(std::mem::take(&mut almost));
                            }
                        }
                    }
                }
            }
        }

        let Some(set) = found else {
            // Stage 4: a type or namespace name.
            if let Some(resolved) = type_names::resolve_simple_type(
                ctx,
                self.name,
                self.type_args.len() as u16,
                self.span,
                true,
            ) {
                return Some(resolved);
            }

            // Stage 5: failure. An inaccessible near-miss beats "nothing
            // at all".
            let near = best_almost.unwrap_or_default();
            let context_name = match ctx.container_type {
                Some(container) => compilation.type_name(container),
                None => {
                    let ns = compilation
                        .namespaces
                        .full_name(&compilation.interner, ctx.current_namespace);
                    if ns.is_empty() {
                        "<global namespace>".to_string()
                    } else {
                        ns
                    }
                }
            };
            failures::report_simple_name_failure(ctx, self.name, &context_name, &near, self.span);
            return None;
        };

        let mut resolved = classify_candidates(compilation, &set);

        // Explicit type arguments specialize a method group; anything else
        // must match arity or fail.
        if !self.type_args.is_empty() {
            resolved = match resolved.denotation {
                Denotation::MethodGroup(group) => {
                    let specialized = group.with_type_arguments(ctx, &self.type_args, self.span)?;
                    Resolved {
                        class: ExprClass::MethodGroup,
                        ty: None,
                        denotation: Denotation::MethodGroup(specialized),
                    }
                }
                Denotation::Type(ty) => {
                    let expected = types.get(types.definition_of(ty)).arity;
                    if expected as usize != self.type_args.len() {
                        if expected == 0 {
                            let display = compilation.type_name(ty);
                            failures::report_non_generic_with_type_arguments(
                                ctx, "type", &display, self.span,
                            );
                        } else {
                            failures::report_generic_type_arity(ctx, ty, expected, self.span);
                        }
                        return None;
                    }
                    Resolved::ty_expr(ty)
                }
                other => {
                    let display = match other {
                        Denotation::Member(id) => compilation.member_signature(id),
                        _ => compilation.interner.resolve(self.name).to_string(),
                    };
                    failures::report_non_generic_with_type_arguments(
                        ctx, "member", &display, self.span,
                    );
                    return None;
                }
            };
        }

        // Instance members need a receiver: reject static contexts and
        // field initializers, and instance members of outer types reached
        // from inside a nested type.
        let (has_instance, has_static, declaring, signature) = match &resolved.denotation {
            Denotation::Member(id) => {
                let member = compilation.members.get(*id);
                (
                    !member.is_static,
                    member.is_static,
                    Some(member.declaring),
                    compilation.member_signature(*id),
                )
            }
            Denotation::MethodGroup(group) => (
                group.contains_instance(compilation),
                group.contains_static(compilation),
                Some(group.declaring_type(compilation)),
                group.signature_for_error(compilation),
            ),
            _ => (false, false, None, String::new()),
        };

        if has_instance {
            if ctx.is_static_context || ctx.is_field_initializer {
                if !has_static && !(ctx.intermediate && self.resolves_as_type_name(ctx)) {
                    failures::report_object_reference_required(ctx, &signature, self.span);
                    return None;
                }
            } else if let (Some(declaring), Some(container)) = (declaring, ctx.container_type) {
                if !types.is_family_accessible(container, declaring)
                    && types.is_nested_family_accessible(container, declaring)
                    && !(ctx.intermediate && self.resolves_as_type_name(ctx))
                {
                    failures::report_nonstatic_outer(ctx, declaring, container, self.span);
                    return None;
                }
            }
        }

        Some(resolved)
    }

    /// The narrow escape valve: the identifier also names a type with the
    /// identical spelling, so the head of a dotted chain may be read as a
    /// static type reference instead.
    fn resolves_as_type_name(&self, ctx: &mut ResolveContext<'_>) -> bool {
        matches!(
            type_names::resolve_simple_type(
                ctx,
                self.name,
                self.type_args.len() as u16,
                self.span,
                true,
            ),
            Some(resolved) if resolved.class == ExprClass::Type
        )
    }
}
