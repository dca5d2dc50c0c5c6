//! The bare-identifier precedence ladder: locals, members of the
//! enclosing types, type/namespace names, and the static-context rules.

mod support;

use sable_common::diagnostic_codes;
use sable_decl::{NamespaceArena, TypeDef, TypeKind, Visibility};
use sable_resolve::{
    Denotation, ExprClass, NodeId, SimpleName, resolve, resolve_flags, resolve_value,
};
use support::{Fixture, codes, span};

#[test]
fn local_variable_shadows_an_instance_field() {
    let mut fix = Fixture::new();
    let owner = fix.class("Owner", fix.alpha);
    fix.field(owner, "x", Visibility::Private);
    let name = fix.atom("x");
    let int_ty = fix.int_ty;

    let mut ctx = fix.resolve_ctx(Some(owner));
    ctx.enter_block();
    ctx.declare_local(name, int_ty, false);

    let node = SimpleName::new(NodeId(1), name, span());
    let resolved = resolve_value(&node, &mut ctx).expect("locals resolve");
    assert_eq!(resolved.class, ExprClass::Variable);
    assert_eq!(resolved.denotation, Denotation::Local { name });
    assert_eq!(resolved.ty, Some(int_ty));
}

#[test]
fn parameters_resolve_in_the_local_stage() {
    let mut fix = Fixture::new();
    let owner = fix.class("Owner", fix.alpha);
    let name = fix.atom("input");
    let string_ty = fix.string_ty;

    let mut ctx = fix.resolve_ctx(Some(owner));
    ctx.enter_block();
    ctx.declare_local(name, string_ty, true);

    let node = SimpleName::new(NodeId(1), name, span());
    let resolved = resolve_value(&node, &mut ctx).expect("parameters resolve");
    assert_eq!(resolved.ty, Some(string_ty));
}

#[test]
fn outer_block_bindings_are_visible_from_inner_blocks() {
    let mut fix = Fixture::new();
    let owner = fix.class("Owner", fix.alpha);
    let name = fix.atom("x");
    let int_ty = fix.int_ty;

    let mut ctx = fix.resolve_ctx(Some(owner));
    ctx.enter_block();
    ctx.declare_local(name, int_ty, false);
    ctx.enter_block();

    let node = SimpleName::new(NodeId(1), name, span());
    assert!(resolve_value(&node, &mut ctx).is_some());
}

#[test]
fn members_of_the_container_resolve_after_locals() {
    let mut fix = Fixture::new();
    let owner = fix.class("Owner", fix.alpha);
    let member = fix.field(owner, "state", Visibility::Private);
    let name = fix.atom("state");
    let int_ty = fix.int_ty;

    let mut ctx = fix.resolve_ctx(Some(owner));
    let node = SimpleName::new(NodeId(1), name, span());
    let resolved = resolve_value(&node, &mut ctx).expect("own members resolve");
    assert_eq!(resolved.class, ExprClass::Variable);
    assert_eq!(resolved.denotation, Denotation::Member(member));
    assert_eq!(resolved.ty, Some(int_ty));
}

#[test]
fn the_lexical_nest_is_walked_outward() {
    let mut fix = Fixture::new();
    let outer = fix.class("Outer", fix.alpha);
    let member = fix.static_field(outer, "count", Visibility::Private);
    let inner = fix.nested_class("Inner", fix.alpha, outer);
    let name = fix.atom("count");

    let mut ctx = fix.resolve_ctx(Some(inner));
    let node = SimpleName::new(NodeId(1), name, span());
    let resolved = resolve_value(&node, &mut ctx).expect("outer statics resolve");
    assert_eq!(resolved.denotation, Denotation::Member(member));
}

#[test]
fn inherited_members_resolve_through_the_base_chain() {
    let mut fix = Fixture::new();
    let base = fix.class("Base", fix.alpha);
    let member = fix.field(base, "state", Visibility::Family);
    let derived = fix.class_with_base("Derived", fix.alpha, base);
    let name = fix.atom("state");

    let mut ctx = fix.resolve_ctx(Some(derived));
    let node = SimpleName::new(NodeId(1), name, span());
    let resolved = resolve_value(&node, &mut ctx).expect("inherited protected resolves bare");
    assert_eq!(resolved.denotation, Denotation::Member(member));
}

#[test]
fn instance_member_in_static_context_requires_an_object_reference() {
    let mut fix = Fixture::new();
    let owner = fix.class("Owner", fix.alpha);
    fix.field(owner, "state", Visibility::Private);
    let name = fix.atom("state");

    let mut ctx = fix.resolve_ctx(Some(owner));
    ctx.is_static_context = true;
    let node = SimpleName::new(NodeId(1), name, span());
    assert!(resolve_value(&node, &mut ctx).is_none());
    assert_eq!(codes(&ctx), vec![diagnostic_codes::OBJECT_REFERENCE_REQUIRED]);
}

#[test]
fn field_initializers_are_treated_as_static_contexts() {
    let mut fix = Fixture::new();
    let owner = fix.class("Owner", fix.alpha);
    fix.field(owner, "state", Visibility::Private);
    let name = fix.atom("state");

    let mut ctx = fix.resolve_ctx(Some(owner));
    ctx.is_field_initializer = true;
    let node = SimpleName::new(NodeId(1), name, span());
    assert!(resolve_value(&node, &mut ctx).is_none());
    assert_eq!(codes(&ctx), vec![diagnostic_codes::OBJECT_REFERENCE_REQUIRED]);
}

#[test]
fn identical_type_name_escapes_the_static_check_at_a_chain_head() {
    let mut fix = Fixture::new();
    let owner = fix.class("Owner", fix.alpha);
    // A type named Color in the global namespace, and an instance field
    // of the same name: `Color.Something` must stay resolvable.
    let color_name = fix.atom("Color");
    fix.ctx.declare_type(TypeDef {
        namespace: Some(NamespaceArena::GLOBAL),
        ..TypeDef::new(color_name, TypeKind::Enum, fix.alpha)
    });
    let string_ty = fix.string_ty;
    fix.ctx.add_member(
        owner,
        sable_decl::Member::new(
            color_name,
            sable_decl::MemberKind::Field,
            Visibility::Private,
            string_ty,
        ),
    );

    let mut ctx = fix.resolve_ctx(Some(owner));
    ctx.is_static_context = true;
    let node = SimpleName::new(NodeId(1), color_name, span());
    let resolved = resolve(
        &node,
        &mut ctx,
        resolve_flags::VARIABLE_OR_VALUE
            | resolve_flags::METHOD_GROUP
            | resolve_flags::INTERMEDIATE,
    );
    assert!(resolved.is_some(), "the chain head tolerates the name/type pun");
    assert!(ctx.diagnostics.is_empty());
}

#[test]
fn instance_member_of_an_outer_type_is_rejected_from_a_nested_type() {
    let mut fix = Fixture::new();
    let outer = fix.class("Outer", fix.alpha);
    fix.field(outer, "state", Visibility::Private);
    let inner = fix.nested_class("Inner", fix.alpha, outer);
    let name = fix.atom("state");

    let mut ctx = fix.resolve_ctx(Some(inner));
    let node = SimpleName::new(NodeId(1), name, span());
    assert!(resolve_value(&node, &mut ctx).is_none());
    assert_eq!(
        codes(&ctx),
        vec![diagnostic_codes::CANNOT_ACCESS_NONSTATIC_MEMBER_OF_OUTER_TYPE]
    );
}

#[test]
fn type_names_resolve_in_the_type_namespace_stage() {
    let mut fix = Fixture::new();
    let owner = fix.class("Owner", fix.alpha);
    let helper_name = fix.atom("Helper");
    let helper = fix.ctx.declare_type(TypeDef {
        namespace: Some(NamespaceArena::GLOBAL),
        ..TypeDef::new(helper_name, TypeKind::Class, fix.alpha)
    });

    let mut ctx = fix.resolve_ctx(Some(owner));
    let node = SimpleName::new(NodeId(1), helper_name, span());
    let resolved = resolve(&node, &mut ctx, resolve_flags::TYPE).expect("type names resolve");
    assert_eq!(resolved.class, ExprClass::Type);
    assert_eq!(resolved.denotation, Denotation::Type(helper));
}

#[test]
fn namespaces_resolve_as_namespace_expressions() {
    let mut fix = Fixture::new();
    let owner = fix.class("Owner", fix.alpha);
    let system_name = fix.atom("System");
    let system = fix.ctx.namespaces.add(NamespaceArena::GLOBAL, system_name);

    let mut ctx = fix.resolve_ctx(Some(owner));
    let node = SimpleName::new(NodeId(1), system_name, span());
    let resolved = resolve(&node, &mut ctx, resolve_flags::TYPE).expect("namespaces resolve");
    assert_eq!(resolved.class, ExprClass::Namespace);
    assert_eq!(resolved.denotation, Denotation::Namespace(system));
    assert_eq!(resolved.ty, None, "namespace expressions carry no value type");
}

#[test]
fn unknown_names_fail_with_the_context_in_the_message() {
    let mut fix = Fixture::new();
    let owner = fix.class("Owner", fix.alpha);
    let name = fix.atom("missing");

    let mut ctx = fix.resolve_ctx(Some(owner));
    let node = SimpleName::new(NodeId(1), name, span());
    assert!(resolve_value(&node, &mut ctx).is_none());
    assert_eq!(codes(&ctx), vec![diagnostic_codes::NAME_DOES_NOT_EXIST_IN_CONTEXT]);
    assert!(ctx.diagnostics[0].message_text.contains("Owner"));
}

#[test]
fn an_inaccessible_near_miss_beats_not_found() {
    let mut fix = Fixture::new();
    // Base lives in another module; its internal field is invisible here.
    let foreign_base = fix.class("ForeignBase", fix.beta);
    fix.field(foreign_base, "shared", Visibility::Assembly);
    let derived = fix.class_with_base("Derived", fix.alpha, foreign_base);
    let name = fix.atom("shared");

    let mut ctx = fix.resolve_ctx(Some(derived));
    let node = SimpleName::new(NodeId(1), name, span());
    assert!(resolve_value(&node, &mut ctx).is_none());
    assert_eq!(codes(&ctx), vec![diagnostic_codes::MEMBER_IS_INACCESSIBLE]);
    assert!(
        !ctx.diagnostics[0].related_information.is_empty(),
        "the rejected member is attached as a related symbol"
    );
}

#[test]
fn ambiguous_members_are_reported_not_picked() {
    let mut fix = Fixture::new();
    let owner = fix.class("Owner", fix.alpha);
    fix.field(owner, "x", Visibility::Public);
    fix.field(owner, "x", Visibility::Public);
    let name = fix.atom("x");

    let mut ctx = fix.resolve_ctx(Some(owner));
    let node = SimpleName::new(NodeId(1), name, span());
    assert!(resolve_value(&node, &mut ctx).is_none());
    assert_eq!(codes(&ctx), vec![diagnostic_codes::AMBIGUOUS_REFERENCE]);
}

#[test]
fn static_members_of_outer_types_resolve_from_nested_types() {
    let mut fix = Fixture::new();
    let outer = fix.class("Outer", fix.alpha);
    let member = fix.static_field(outer, "count", Visibility::Private);
    let inner = fix.nested_class("Inner", fix.alpha, outer);
    let name = fix.atom("count");

    let mut ctx = fix.resolve_ctx(Some(inner));
    let node = SimpleName::new(NodeId(1), name, span());
    let resolved = resolve_value(&node, &mut ctx).expect("outer statics are fine");
    assert_eq!(resolved.denotation, Denotation::Member(member));
}

#[test]
fn method_groups_keep_instance_and_static_sides_until_the_access_form_is_known() {
    let mut fix = Fixture::new();
    let owner = fix.class("Owner", fix.alpha);
    let int_ty = fix.int_ty;
    fix.method(owner, "run", Visibility::Public, &[int_ty]);
    fix.static_method(owner, "run", Visibility::Public, &[]);
    let name = fix.atom("run");

    // A group with a static side survives a static context.
    let mut ctx = fix.resolve_ctx(Some(owner));
    ctx.is_static_context = true;
    let node = SimpleName::new(NodeId(1), name, span());
    let resolved = resolve(
        &node,
        &mut ctx,
        resolve_flags::VARIABLE_OR_VALUE | resolve_flags::METHOD_GROUP,
    )
    .expect("the group is deferred to invocation");
    assert_eq!(resolved.class, ExprClass::MethodGroup);
}
