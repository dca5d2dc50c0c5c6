//! Type and namespace name resolution.
//!
//! Backs the type/namespace stage of bare-identifier resolution and the
//! type-only resolve path: nested types declared in the enclosing types
//! take precedence, then the enclosing namespace chain is walked outward
//! to the global namespace. Generic arity participates in the match; a
//! name that exists only at a different arity gets an arity diagnostic,
//! not "not found".

use crate::access::AccessQuery;
use crate::expr::{Resolved, ResolveContext};
use crate::failures;
use crate::lookup::{LookupOutcome, binding_flags, lookup};
use sable_common::{Atom, Span};
use sable_decl::{NamespaceId, TypeId, Visibility, member_kinds};
use smallvec::SmallVec;

fn type_accessible(ctx: &ResolveContext<'_>, ty: TypeId) -> bool {
    let compilation = ctx.compilation;
    let def = compilation.types.get(compilation.types.definition_of(ty));
    match def.visibility {
        Visibility::Public => true,
        _ => compilation.is_assembly_visible(def.module, ctx.current_module),
    }
}

/// Resolve a bare identifier as a type or namespace name. With `silent`
/// set, failures report nothing and return `None`; used for probing.
pub(crate) fn resolve_simple_type(
    ctx: &mut ResolveContext<'_>,
    name: Atom,
    arity: u16,
    span: Span,
    silent: bool,
) -> Option<Resolved> {
    let compilation = ctx.compilation;
    let types = &compilation.types;

    // Nested types declared in (or inherited by) the enclosing types.
    let mut arity_miss: Option<TypeId> = None;
    let mut scope = ctx.container_type;
    while let Some(level) = scope {
        let query = AccessQuery {
            accessing: ctx.container_type,
            qualifier: None,
            target: level,
            kind_mask: member_kinds::NESTED_TYPE,
            binding: binding_flags::ALL,
        };
        let mut almost = Vec::new();
        if let LookupOutcome::Found(set) = lookup(compilation, &query, name, &mut almost) {
            if let Some(id) = set.single() {
                let ty = compilation.members.get(id).ty;
                if types.get(types.definition_of(ty)).arity == arity {
                    return Some(Resolved::ty_expr(ty));
                }
                arity_miss = Some(ty);
                break;
            }
        }
        scope = types.get(types.definition_of(level)).lexical_parent;
    }

    // The enclosing namespace chain, innermost first.
    if arity_miss.is_none() {
        let namespaces = &compilation.namespaces;
        let mut ns = Some(ctx.current_namespace);
        while let Some(level) = ns {
            let registered = namespaces.types(level, name);
            if !registered.is_empty() {
                let matching: SmallVec<[TypeId; 2]> = registered
                    .iter()
                    .copied()
                    .filter(|&t| types.get(t).arity == arity)
                    .collect();
                match matching.len() {
                    0 => {
                        arity_miss = Some(registered[0]);
                    }
                    1 => {
                        let ty = matching[0];
                        if type_accessible(ctx, ty) {
                            return Some(Resolved::ty_expr(ty));
                        }
                        if !silent {
                            failures::report_inaccessible_type(ctx, ty, span);
                        }
                        return None;
                    }
                    _ => {
                        if !silent {
                            failures::report_ambiguous_types(
                                ctx,
                                name,
                                matching[0],
                                matching[1],
                                span,
                            );
                        }
                        return None;
                    }
                }
                break;
            }
            if arity == 0 {
                if let Some(child) = namespaces.child(level, name) {
                    return Some(Resolved::namespace(child));
                }
            }
            ns = namespaces.get(level).parent;
        }
    }

    if silent {
        return None;
    }
    match arity_miss {
        Some(ty) => {
            let expected = types.get(types.definition_of(ty)).arity;
            if expected == 0 {
                let display = compilation.interner.resolve(name).to_string();
                failures::report_non_generic_with_type_arguments(ctx, "type", &display, span);
            } else {
                failures::report_generic_type_arity(ctx, ty, expected, span);
            }
        }
        None => failures::report_type_name_not_found(ctx, name, span),
    }
    None
}

/// Resolve `name` as a member of namespace `ns`: a nested namespace or a
/// registered type of the requested arity.
pub(crate) fn resolve_in_namespace(
    ctx: &mut ResolveContext<'_>,
    ns: NamespaceId,
    name: Atom,
    arity: u16,
    span: Span,
) -> Option<Resolved> {
    let compilation = ctx.compilation;
    let types = &compilation.types;
    let namespaces = &compilation.namespaces;

    let registered = namespaces.types(ns, name);
    if !registered.is_empty() {
        let matching: SmallVec<[TypeId; 2]> = registered
            .iter()
            .copied()
            .filter(|&t| types.get(t).arity == arity)
            .collect();
        match matching.len() {
            1 => {
                let ty = matching[0];
                if type_accessible(ctx, ty) {
                    return Some(Resolved::ty_expr(ty));
                }
                failures::report_inaccessible_type(ctx, ty, span);
                return None;
            }
            0 => {
                let expected = types.get(registered[0]).arity;
                if expected == 0 {
                    let display = compilation.interner.resolve(name).to_string();
                    failures::report_non_generic_with_type_arguments(ctx, "type", &display, span);
                } else {
                    failures::report_generic_type_arity(ctx, registered[0], expected, span);
                }
                return None;
            }
            _ => {
                failures::report_ambiguous_types(ctx, name, matching[0], matching[1], span);
                return None;
            }
        }
    }

    if arity == 0 {
        if let Some(child) = namespaces.child(ns, name) {
            return Some(Resolved::namespace(child));
        }
    }

    failures::report_namespace_member_missing(ctx, ns, name, span);
    None
}
