//! Visibility-matrix behavior of member lookup: the six levels, the
//! protected-qualifier rule, friend grants, and the almost-match side
//! channel.

mod support;

use sable_decl::{TypeDef, TypeKind, Visibility};
use sable_resolve::LookupOutcome;
use support::{Fixture, run_lookup};

#[test]
fn public_members_are_admitted_from_anywhere() {
    let mut fix = Fixture::new();
    let base = fix.class("Base", fix.alpha);
    let member = fix.field(base, "shared", Visibility::Public);
    let unrelated = fix.class("Unrelated", fix.beta);
    let name = fix.atom("shared");

    let (outcome, almost) = run_lookup(&fix.ctx, Some(unrelated), Some(base), base, name);
    match outcome {
        LookupOutcome::Found(set) => assert_eq!(set.single(), Some(member)),
        other => panic!("expected a match, got {other:?}"),
    }
    assert!(almost.is_empty(), "public members never almost-match");
}

#[test]
fn private_member_from_unrelated_type_is_rejected_with_almost_match() {
    let mut fix = Fixture::new();
    let owner = fix.class("Owner", fix.alpha);
    let member = fix.field(owner, "secret", Visibility::Private);
    let unrelated = fix.class("Unrelated", fix.alpha);
    let name = fix.atom("secret");

    let (outcome, almost) = run_lookup(&fix.ctx, Some(unrelated), Some(owner), owner, name);
    assert_eq!(outcome, LookupOutcome::NotFound);
    assert_eq!(almost, vec![member]);
}

#[test]
fn private_member_is_visible_inside_the_declaring_type() {
    let mut fix = Fixture::new();
    let owner = fix.class("Owner", fix.alpha);
    let member = fix.field(owner, "secret", Visibility::Private);
    let name = fix.atom("secret");

    let (outcome, almost) = run_lookup(&fix.ctx, Some(owner), None, owner, name);
    match outcome {
        LookupOutcome::Found(set) => assert_eq!(set.single(), Some(member)),
        other => panic!("expected a match, got {other:?}"),
    }
    assert!(almost.is_empty());
}

#[test]
fn private_member_is_visible_to_nested_types() {
    let mut fix = Fixture::new();
    let owner = fix.class("Owner", fix.alpha);
    let member = fix.field(owner, "secret", Visibility::Private);
    let inner = fix.nested_class("Inner", fix.alpha, owner);
    let deeper = fix.nested_class("Deeper", fix.alpha, inner);
    let name = fix.atom("secret");

    let (outcome, _) = run_lookup(&fix.ctx, Some(deeper), Some(owner), owner, name);
    match outcome {
        LookupOutcome::Found(set) => assert_eq!(set.single(), Some(member)),
        other => panic!("expected a match, got {other:?}"),
    }
}

#[test]
fn protected_member_through_base_qualifier_is_rejected() {
    let mut fix = Fixture::new();
    let base = fix.class("Base", fix.alpha);
    let member = fix.field(base, "state", Visibility::Family);
    let derived = fix.class_with_base("Derived", fix.alpha, base);
    let name = fix.atom("state");

    // b.state where b is typed Base: rejected, recorded as a near-miss.
    let (outcome, almost) = run_lookup(&fix.ctx, Some(derived), Some(base), base, name);
    assert_eq!(outcome, LookupOutcome::NotFound);
    assert_eq!(almost, vec![member]);

    // this.state: the qualifier is the accessing type itself.
    let (outcome, _) = run_lookup(&fix.ctx, Some(derived), Some(derived), derived, name);
    assert!(matches!(outcome, LookupOutcome::Found(_)));

    // bare state: no qualifier at all.
    let (outcome, _) = run_lookup(&fix.ctx, Some(derived), None, derived, name);
    assert!(matches!(outcome, LookupOutcome::Found(_)));
}

#[test]
fn protected_member_through_more_derived_qualifier_is_admitted() {
    let mut fix = Fixture::new();
    let base = fix.class("Base", fix.alpha);
    fix.field(base, "state", Visibility::Family);
    let derived = fix.class_with_base("Derived", fix.alpha, base);
    let leaf = fix.class_with_base("Leaf", fix.alpha, derived);
    let name = fix.atom("state");

    let (outcome, _) = run_lookup(&fix.ctx, Some(derived), Some(leaf), leaf, name);
    assert!(matches!(outcome, LookupOutcome::Found(_)));
}

#[test]
fn protected_member_through_sibling_qualifier_is_rejected() {
    let mut fix = Fixture::new();
    let base = fix.class("Base", fix.alpha);
    let member = fix.field(base, "state", Visibility::Family);
    let derived = fix.class_with_base("Derived", fix.alpha, base);
    let sibling = fix.class_with_base("Sibling", fix.alpha, base);
    let name = fix.atom("state");

    let (outcome, almost) = run_lookup(&fix.ctx, Some(derived), Some(sibling), sibling, name);
    assert_eq!(outcome, LookupOutcome::NotFound);
    assert_eq!(almost, vec![member]);
}

#[test]
fn static_protected_member_skips_the_receiver_check() {
    let mut fix = Fixture::new();
    let base = fix.class("Base", fix.alpha);
    fix.static_field(base, "counter", Visibility::Family);
    let derived = fix.class_with_base("Derived", fix.alpha, base);
    let name = fix.atom("counter");

    let (outcome, _) = run_lookup(&fix.ctx, Some(derived), Some(base), base, name);
    assert!(matches!(outcome, LookupOutcome::Found(_)));
}

#[test]
fn protected_access_from_type_nested_in_the_declaring_class() {
    let mut fix = Fixture::new();
    let base = fix.class("Base", fix.alpha);
    fix.field(base, "state", Visibility::Family);
    let derived = fix.class_with_base("Derived", fix.alpha, base);
    let inner = fix.nested_class("Inner", fix.alpha, base);
    let name = fix.atom("state");

    // Inner is nested in Base, so a Derived-typed receiver is fine: the
    // granting scope is Base and Derived derives from it.
    let (outcome, _) = run_lookup(&fix.ctx, Some(inner), Some(derived), derived, name);
    assert!(matches!(outcome, LookupOutcome::Found(_)));
}

#[test]
fn qualifier_of_the_same_generic_definition_is_admitted() {
    let mut fix = Fixture::new();
    let list_name = fix.atom("List");
    let list = fix.ctx.declare_type(TypeDef {
        arity: 1,
        ..TypeDef::new(list_name, TypeKind::Class, fix.alpha)
    });
    fix.field(list, "head", Visibility::Family);
    let int_ty = fix.int_ty;
    let string_ty = fix.string_ty;
    let list_int = fix.ctx.types.instantiate(list, vec![int_ty]);
    let list_string = fix.ctx.types.instantiate(list, vec![string_ty]);
    let name = fix.atom("head");

    let (outcome, _) = run_lookup(&fix.ctx, Some(list_string), Some(list_int), list_int, name);
    assert!(matches!(outcome, LookupOutcome::Found(_)));
}

#[test]
fn assembly_member_is_visible_within_its_module() {
    let mut fix = Fixture::new();
    let owner = fix.class("Owner", fix.alpha);
    fix.field(owner, "shared", Visibility::Assembly);
    let neighbor = fix.class("Neighbor", fix.alpha);
    let name = fix.atom("shared");

    let (outcome, _) = run_lookup(&fix.ctx, Some(neighbor), Some(owner), owner, name);
    assert!(matches!(outcome, LookupOutcome::Found(_)));
}

#[test]
fn assembly_member_is_rejected_across_modules_without_a_grant() {
    let mut fix = Fixture::new();
    let owner = fix.class("Owner", fix.alpha);
    let member = fix.field(owner, "shared", Visibility::Assembly);
    let foreign = fix.class("Foreign", fix.beta);
    let name = fix.atom("shared");

    let (outcome, almost) = run_lookup(&fix.ctx, Some(foreign), Some(owner), owner, name);
    assert_eq!(outcome, LookupOutcome::NotFound);
    assert_eq!(almost, vec![member]);
}

#[test]
fn friend_grant_admits_the_named_module_and_changes_nothing_else() {
    let mut fix = Fixture::new();
    let beta_name = fix.atom("Beta");
    fix.ctx.modules.add_friend_grant(fix.alpha, beta_name);
    let owner = fix.class("Owner", fix.alpha);
    let internal = fix.field(owner, "shared", Visibility::Assembly);
    let private = fix.field(owner, "secret", Visibility::Private);
    let foreign = fix.class("Foreign", fix.beta);
    let shared = fix.atom("shared");
    let secret = fix.atom("secret");

    let (outcome, _) = run_lookup(&fix.ctx, Some(foreign), Some(owner), owner, shared);
    match outcome {
        LookupOutcome::Found(set) => assert_eq!(set.single(), Some(internal)),
        other => panic!("expected a match, got {other:?}"),
    }

    // The grant does not loosen any other rule.
    let (outcome, almost) = run_lookup(&fix.ctx, Some(foreign), Some(owner), owner, secret);
    assert_eq!(outcome, LookupOutcome::NotFound);
    assert_eq!(almost, vec![private]);
}

#[test]
fn friend_answers_are_cached_per_module_pair() {
    let mut fix = Fixture::new();
    let beta_name = fix.atom("Beta");
    fix.ctx.modules.add_friend_grant(fix.alpha, beta_name);

    assert_eq!(fix.ctx.cached_friend_pairs(), 0);
    assert!(fix.ctx.is_assembly_visible(fix.alpha, fix.beta));
    assert!(fix.ctx.is_assembly_visible(fix.alpha, fix.beta));
    assert!(!fix.ctx.is_assembly_visible(fix.beta, fix.alpha));
    assert_eq!(fix.ctx.cached_friend_pairs(), 2);
}

#[test]
fn family_or_assembly_admits_either_relationship() {
    let mut fix = Fixture::new();
    let base = fix.class("Base", fix.alpha);
    fix.field(base, "state", Visibility::FamilyOrAssembly);
    let same_module_unrelated = fix.class("Neighbor", fix.alpha);
    let cross_module_derived = fix.class_with_base("Remote", fix.beta, base);
    let cross_module_unrelated = fix.class("Stranger", fix.beta);
    let name = fix.atom("state");

    let (outcome, _) = run_lookup(&fix.ctx, Some(same_module_unrelated), Some(base), base, name);
    assert!(matches!(outcome, LookupOutcome::Found(_)));

    let (outcome, _) = run_lookup(
        &fix.ctx,
        Some(cross_module_derived),
        Some(cross_module_derived),
        cross_module_derived,
        name,
    );
    assert!(matches!(outcome, LookupOutcome::Found(_)));

    let (outcome, _) = run_lookup(&fix.ctx, Some(cross_module_unrelated), Some(base), base, name);
    assert_eq!(outcome, LookupOutcome::NotFound);
}

#[test]
fn family_and_assembly_requires_both_relationships() {
    let mut fix = Fixture::new();
    let base = fix.class("Base", fix.alpha);
    fix.field(base, "state", Visibility::FamilyAndAssembly);
    let same_module_derived = fix.class_with_base("Derived", fix.alpha, base);
    let same_module_unrelated = fix.class("Neighbor", fix.alpha);
    let cross_module_derived = fix.class_with_base("Remote", fix.beta, base);
    let name = fix.atom("state");

    let (outcome, _) = run_lookup(
        &fix.ctx,
        Some(same_module_derived),
        Some(same_module_derived),
        same_module_derived,
        name,
    );
    assert!(matches!(outcome, LookupOutcome::Found(_)));

    let (outcome, _) = run_lookup(&fix.ctx, Some(same_module_unrelated), Some(base), base, name);
    assert_eq!(outcome, LookupOutcome::NotFound);

    let (outcome, _) = run_lookup(
        &fix.ctx,
        Some(cross_module_derived),
        Some(cross_module_derived),
        cross_module_derived,
        name,
    );
    assert_eq!(outcome, LookupOutcome::NotFound);
}

#[test]
fn code_outside_any_type_sees_only_public_members() {
    let mut fix = Fixture::new();
    let owner = fix.class("Owner", fix.alpha);
    fix.field(owner, "open", Visibility::Public);
    fix.field(owner, "shared", Visibility::Assembly);
    let open = fix.atom("open");
    let shared = fix.atom("shared");

    let (outcome, _) = run_lookup(&fix.ctx, None, None, owner, open);
    assert!(matches!(outcome, LookupOutcome::Found(_)));
    let (outcome, _) = run_lookup(&fix.ctx, None, None, owner, shared);
    assert_eq!(outcome, LookupOutcome::NotFound);
}
