//! Structured failure reporting.
//!
//! Every failed resolution is recovered locally into a `Diagnostic` and a
//! `None` result; callers keep going so one compilation surfaces as many
//! errors as possible. The helpers here keep the taxonomy sharp: "not
//! found" never masquerades as "found but inaccessible", and the
//! protected-through-wrong-qualifier case gets its own message.

use crate::access::{AccessQuery, AlmostMatchList};
use crate::expr::{ExprClass, Resolved, ResolveContext, resolve_flags};
use crate::lookup::{LookupOutcome, binding_flags, lookup};
use rustc_hash::FxHashSet;
use sable_common::{Atom, Diagnostic, Span, diagnostic_codes, diagnostic_messages, format_message};
use sable_decl::{MemberId, TypeId, member_kinds};

fn class_word(class: ExprClass) -> &'static str {
    match class {
        ExprClass::Invalid => "invalid expression",
        ExprClass::Value => "value",
        ExprClass::Variable => "variable",
        ExprClass::Namespace => "namespace",
        ExprClass::Type => "type",
        ExprClass::MethodGroup => "method group",
        ExprClass::PropertyAccess => "property access",
        ExprClass::EventAccess => "event access",
        ExprClass::IndexerAccess => "indexer access",
        ExprClass::Nothing => "nothing",
    }
}

fn expected_words(accepted: u32) -> String {
    let mut parts: Vec<&str> = Vec::new();
    if accepted & resolve_flags::VARIABLE_OR_VALUE != 0 {
        parts.push("variable or value");
    }
    if accepted & resolve_flags::TYPE != 0 {
        parts.push("type");
    }
    if accepted & resolve_flags::METHOD_GROUP != 0 {
        parts.push("method group");
    }
    parts.join(" or ")
}

/// The resolution succeeded but produced a class the caller's flags do
/// not accept: a classified kind mismatch, not a generic failure.
pub(crate) fn report_unexpected_kind(
    ctx: &mut ResolveContext<'_>,
    resolved: &Resolved,
    span: Span,
    accepted: u32,
) {
    let message = format_message(
        diagnostic_messages::EXPRESSION_DENOTES_WRONG_KIND,
        &[class_word(resolved.class), &expected_words(accepted)],
    );
    ctx.error(span, message, diagnostic_codes::EXPRESSION_DENOTES_WRONG_KIND);
}

pub(crate) fn report_method_group_usage(ctx: &mut ResolveContext<'_>, signature: &str, span: Span) {
    let message = format_message(
        diagnostic_messages::METHOD_REFERENCED_WITHOUT_PARENTHESES,
        &[signature],
    );
    ctx.error(
        span,
        message,
        diagnostic_codes::METHOD_REFERENCED_WITHOUT_PARENTHESES,
    );
}

pub(crate) fn report_this_unavailable(ctx: &mut ResolveContext<'_>, span: Span) {
    ctx.error(
        span,
        diagnostic_messages::KEYWORD_THIS_UNAVAILABLE.to_string(),
        diagnostic_codes::KEYWORD_THIS_UNAVAILABLE,
    );
}

pub(crate) fn report_object_reference_required(
    ctx: &mut ResolveContext<'_>,
    signature: &str,
    span: Span,
) {
    let message = format_message(diagnostic_messages::OBJECT_REFERENCE_REQUIRED, &[signature]);
    ctx.error(span, message, diagnostic_codes::OBJECT_REFERENCE_REQUIRED);
}

pub(crate) fn report_static_via_instance(
    ctx: &mut ResolveContext<'_>,
    signature: &str,
    span: Span,
) {
    let message = format_message(
        diagnostic_messages::STATIC_MEMBER_ACCESSED_WITH_INSTANCE_REFERENCE,
        &[signature],
    );
    ctx.error(
        span,
        message,
        diagnostic_codes::STATIC_MEMBER_ACCESSED_WITH_INSTANCE_REFERENCE,
    );
}

/// An instance member of an enclosing (outer) type reached from a nested
/// type without a receiver.
pub(crate) fn report_nonstatic_outer(
    ctx: &mut ResolveContext<'_>,
    declaring: TypeId,
    container: TypeId,
    span: Span,
) {
    let compilation = ctx.compilation;
    let message = format_message(
        diagnostic_messages::CANNOT_ACCESS_NONSTATIC_MEMBER_OF_OUTER_TYPE,
        &[
            &compilation.type_name(declaring),
            &compilation.type_name(container),
        ],
    );
    ctx.error(
        span,
        message,
        diagnostic_codes::CANNOT_ACCESS_NONSTATIC_MEMBER_OF_OUTER_TYPE,
    );
}

pub(crate) fn report_ambiguous(
    ctx: &mut ResolveContext<'_>,
    name: Atom,
    candidates: &[MemberId],
    span: Span,
) {
    let compilation = ctx.compilation;
    let first = candidates
        .first()
        .map(|&id| compilation.member_signature(id))
        .unwrap_or_default();
    let second = candidates
        .get(1)
        .map(|&id| compilation.member_signature(id))
        .unwrap_or_default();
    let message = format_message(
        diagnostic_messages::AMBIGUOUS_REFERENCE,
        &[compilation.interner.resolve(name), &first, &second],
    );
    ctx.error(span, message, diagnostic_codes::AMBIGUOUS_REFERENCE);
}

pub(crate) fn report_ambiguous_types(
    ctx: &mut ResolveContext<'_>,
    name: Atom,
    first: TypeId,
    second: TypeId,
    span: Span,
) {
    let compilation = ctx.compilation;
    let message = format_message(
        diagnostic_messages::AMBIGUOUS_REFERENCE,
        &[
            compilation.interner.resolve(name),
            &compilation.type_name(first),
            &compilation.type_name(second),
        ],
    );
    ctx.error(span, message, diagnostic_codes::AMBIGUOUS_REFERENCE);
}

pub(crate) fn report_generic_method_arity(
    ctx: &mut ResolveContext<'_>,
    member: MemberId,
    arity: u16,
    span: Span,
) {
    let compilation = ctx.compilation;
    let name = compilation
        .interner
        .resolve(compilation.members.get(member).name)
        .to_string();
    let message = format_message(
        diagnostic_messages::GENERIC_REQUIRES_TYPE_ARGUMENTS,
        &["method", &name, &arity.to_string()],
    );
    ctx.error(
        span,
        message,
        diagnostic_codes::GENERIC_REQUIRES_TYPE_ARGUMENTS,
    );
}

pub(crate) fn report_generic_type_arity(
    ctx: &mut ResolveContext<'_>,
    ty: TypeId,
    arity: u16,
    span: Span,
) {
    let name = ctx.compilation.type_name(ty);
    let message = format_message(
        diagnostic_messages::GENERIC_REQUIRES_TYPE_ARGUMENTS,
        &["type", &name, &arity.to_string()],
    );
    ctx.error(
        span,
        message,
        diagnostic_codes::GENERIC_REQUIRES_TYPE_ARGUMENTS,
    );
}

pub(crate) fn report_non_generic_with_type_arguments(
    ctx: &mut ResolveContext<'_>,
    kind_word: &str,
    name: &str,
    span: Span,
) {
    let message = format_message(
        diagnostic_messages::NON_GENERIC_USED_WITH_TYPE_ARGUMENTS,
        &[kind_word, name],
    );
    ctx.error(
        span,
        message,
        diagnostic_codes::NON_GENERIC_USED_WITH_TYPE_ARGUMENTS,
    );
}

pub(crate) fn report_namespace_member_missing(
    ctx: &mut ResolveContext<'_>,
    namespace: sable_decl::NamespaceId,
    name: Atom,
    span: Span,
) {
    let compilation = ctx.compilation;
    let ns_name = compilation
        .namespaces
        .full_name(&compilation.interner, namespace);
    let ns_display = if ns_name.is_empty() {
        "<global namespace>".to_string()
    } else {
        ns_name
    };
    let message = format_message(
        diagnostic_messages::TYPE_OR_NAMESPACE_DOES_NOT_EXIST_IN_NAMESPACE,
        &[compilation.interner.resolve(name), &ns_display],
    );
    ctx.error(
        span,
        message,
        diagnostic_codes::TYPE_OR_NAMESPACE_DOES_NOT_EXIST_IN_NAMESPACE,
    );
}

pub(crate) fn report_inaccessible_type(ctx: &mut ResolveContext<'_>, ty: TypeId, span: Span) {
    let message = format_message(
        diagnostic_messages::MEMBER_IS_INACCESSIBLE,
        &[&ctx.compilation.type_name(ty)],
    );
    ctx.error(span, message, diagnostic_codes::MEMBER_IS_INACCESSIBLE);
}

pub(crate) fn report_type_name_not_found(ctx: &mut ResolveContext<'_>, name: Atom, span: Span) {
    let message = format_message(
        diagnostic_messages::TYPE_OR_NAMESPACE_NOT_FOUND,
        &[ctx.compilation.interner.resolve(name)],
    );
    ctx.error(span, message, diagnostic_codes::TYPE_OR_NAMESPACE_NOT_FOUND);
}

/// One inaccessible-member diagnostic, with the member as related symbol.
fn inaccessible_diagnostic(
    ctx: &ResolveContext<'_>,
    member: MemberId,
    span: Span,
    message: String,
    code: u32,
) -> Diagnostic {
    let compilation = ctx.compilation;
    let signature = compilation.member_signature(member);
    let (related_file, related_span) = compilation
        .members
        .get(member)
        .declaration
        .unwrap_or((ctx.file, Span::default()));
    Diagnostic::error(ctx.file, span, message, code).with_related(
        related_file,
        related_span,
        format!("'{signature}' declared here"),
    )
}

/// Report the failure of a qualified member lookup, distinguishing the
/// taxonomy cases:
///
/// - almost-matches present: every candidate was rejected for visibility;
///   the protected-through-wrong-qualifier case gets its own code
/// - otherwise a permission-free probe decides between "exists but was
///   not visible to this query" and "no such member at all"
pub(crate) fn report_member_lookup_failed(
    ctx: &mut ResolveContext<'_>,
    qualifier: Option<TypeId>,
    target: TypeId,
    name: Atom,
    almost: &AlmostMatchList,
    span: Span,
) {
    let compilation = ctx.compilation;
    let types = &compilation.types;

    if !almost.is_empty() {
        let mut seen: FxHashSet<MemberId> = FxHashSet::default();
        let mut pending: Vec<Diagnostic> = Vec::new();
        for &id in almost {
            if !seen.insert(id) {
                continue;
            }
            let member = compilation.members.get(id);
            let protected_qualifier = match (qualifier, ctx.container_type) {
                (Some(qualifier), Some(accessing)) => {
                    member.visibility.has_family()
                        && !types.same_generic_instantiation(qualifier, accessing)
                        && types.is_nested_family_accessible(accessing, member.declaring)
                }
                _ => false,
            };
            let diagnostic = if protected_qualifier {
                let message = format_message(
                    diagnostic_messages::PROTECTED_MEMBER_THROUGH_WRONG_QUALIFIER,
                    &[
                        &compilation.member_signature(id),
                        &compilation.type_name(qualifier.expect("checked above")),
                        &compilation.type_name(ctx.container_type.expect("checked above")),
                    ],
                );
                inaccessible_diagnostic(
                    ctx,
                    id,
                    span,
                    message,
                    diagnostic_codes::PROTECTED_MEMBER_THROUGH_WRONG_QUALIFIER,
                )
            } else {
                let message = format_message(
                    diagnostic_messages::MEMBER_IS_INACCESSIBLE,
                    &[&compilation.member_signature(id)],
                );
                inaccessible_diagnostic(ctx, id, span, message, diagnostic_codes::MEMBER_IS_INACCESSIBLE)
            };
            pending.push(diagnostic);
        }
        ctx.diagnostics.extend(pending);
        return;
    }

    // Nothing was rejected for visibility: probe without the permission
    // check to tell "invisible to this query" apart from "absent".
    let probe = AccessQuery {
        accessing: Some(target),
        qualifier: None,
        target,
        kind_mask: member_kinds::ALL,
        binding: binding_flags::ALL | binding_flags::NON_PUBLIC,
    };
    let mut scratch: AlmostMatchList = Vec::new();
    match lookup(compilation, &probe, name, &mut scratch) {
        LookupOutcome::Found(set) => {
            let id = set.members()[0];
            let message = format_message(
                diagnostic_messages::MEMBER_IS_INACCESSIBLE,
                &[&compilation.member_signature(id)],
            );
            let diagnostic =
                inaccessible_diagnostic(ctx, id, span, message, diagnostic_codes::MEMBER_IS_INACCESSIBLE);
            ctx.diagnostics.push(diagnostic);
        }
        LookupOutcome::Ambiguous(ids) => {
            report_ambiguous(ctx, name, &ids, span);
        }
        LookupOutcome::NotFound => {
            let message = format_message(
                diagnostic_messages::TYPE_DOES_NOT_CONTAIN_DEFINITION,
                &[
                    &compilation.type_name(target),
                    compilation.interner.resolve(name),
                ],
            );
            ctx.error(
                span,
                message,
                diagnostic_codes::TYPE_DOES_NOT_CONTAIN_DEFINITION,
            );
        }
    }
}

/// Report the failure of a bare-identifier resolution: inaccessible
/// near-misses when the walk recorded any, otherwise a plain
/// name-does-not-exist with the richest context name available.
pub(crate) fn report_simple_name_failure(
    ctx: &mut ResolveContext<'_>,
    name: Atom,
    context_name: &str,
    almost: &AlmostMatchList,
    span: Span,
) {
    if !almost.is_empty() {
        let compilation = ctx.compilation;
        let mut seen: FxHashSet<MemberId> = FxHashSet::default();
        let mut pending: Vec<Diagnostic> = Vec::new();
        for &id in almost {
            if !seen.insert(id) {
                continue;
            }
            let message = format_message(
                diagnostic_messages::MEMBER_IS_INACCESSIBLE,
                &[&compilation.member_signature(id)],
            );
            pending.push(inaccessible_diagnostic(
                ctx,
                id,
                span,
                message,
                diagnostic_codes::MEMBER_IS_INACCESSIBLE,
            ));
        }
        ctx.diagnostics.extend(pending);
        return;
    }
    let message = format_message(
        diagnostic_messages::NAME_DOES_NOT_EXIST_IN_CONTEXT,
        &[ctx.compilation.interner.resolve(name), context_name],
    );
    ctx.error(span, message, diagnostic_codes::NAME_DOES_NOT_EXIST_IN_CONTEXT);
}
