//! Member lookup.
//!
//! `lookup` walks a type and its base chain, merging per-level member
//! table matches into a candidate set:
//!
//! - a single surviving non-method match stops the walk immediately; base
//!   members of the same name are shadowed, not merged
//! - methods and constructors switch the walk into method-scan mode and
//!   accumulate upward, with duplicate signatures suppressed, until a
//!   member declared with the hiding modifier terminates the scan
//! - two or more surviving non-methods at one level are ambiguous
//! - a walk that started on an interface retries against the transitive
//!   inherited-interface expansion before giving up
//!
//! The walk itself caches nothing; each level is an O(1) table query plus
//! a per-candidate visibility check.

use crate::access::{AccessQuery, AlmostMatchList, MemberFilter};
use sable_decl::{CompilationContext, MemberId, MemberKind, TypeId, TypeKind, member_kinds};
use smallvec::SmallVec;
use tracing::trace;

/// Binding flags for lookup queries, combined with `|`.
pub mod binding_flags {
    /// Accept instance members.
    pub const INSTANCE: u32 = 1 << 0;
    /// Accept static members.
    pub const STATIC: u32 = 1 << 1;
    /// Accept members admitted by the visibility filter.
    pub const PUBLIC: u32 = 1 << 2;
    /// Bypass the permission check; used by failure-path probes.
    pub const NON_PUBLIC: u32 = 1 << 3;
    /// Search only the start type, never its bases.
    pub const DECLARED_ONLY: u32 = 1 << 4;

    pub const ALL: u32 = INSTANCE | STATIC | PUBLIC;
}

/// The accumulating result of one lookup walk: either a single non-method
/// member, or an ordered set of method/constructor candidates merged
/// across inheritance levels.
#[derive(Clone, Debug, PartialEq)]
pub struct CandidateSet {
    members: SmallVec<[MemberId; 4]>,
    invocable: bool,
}

impl CandidateSet {
    fn single_member(id: MemberId) -> CandidateSet {
        CandidateSet {
            members: SmallVec::from_slice(&[id]),
            invocable: false,
        }
    }

    fn methods(members: SmallVec<[MemberId; 4]>) -> CandidateSet {
        debug_assert!(!members.is_empty());
        CandidateSet {
            members,
            invocable: true,
        }
    }

    pub fn members(&self) -> &[MemberId] {
        &self.members
    }

    /// Whether this set holds method/constructor candidates.
    pub fn is_method_group(&self) -> bool {
        self.invocable
    }

    /// The single non-method member, when this is not a method group.
    pub fn single(&self) -> Option<MemberId> {
        if self.invocable {
            None
        } else {
            self.members.first().copied()
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum LookupOutcome {
    Found(CandidateSet),
    /// Two or more non-method candidates tied at the same hierarchy level.
    Ambiguous(SmallVec<[MemberId; 2]>),
    NotFound,
}

enum LevelOutcome {
    Continue,
    Stop(LookupOutcome),
    /// A hiding member ended overload accumulation at this name.
    StopAccumulation,
}

/// Look up `name` on `query.target`, walking base types (and, for
/// interfaces, the inherited-interface expansion) per the merging rules
/// above. Visibility rejections are recorded on `almost`.
pub fn lookup(
    ctx: &CompilationContext,
    query: &AccessQuery,
    name: sable_common::Atom,
    almost: &mut AlmostMatchList,
) -> LookupOutcome {
    let filter = MemberFilter::new(ctx);
    let types = &ctx.types;
    trace!(
        target = query.target.0,
        name = ctx.interner.resolve(name),
        "member lookup"
    );

    let probe_non_public = query.binding & binding_flags::NON_PUBLIC != 0;
    // Code nested inside the start type keeps its private privileges at
    // every level of the walk.
    let nested_privilege = query
        .accessing
        .is_some_and(|a| types.is_nested_child_of(a, query.target));
    let declared_only = query.binding & binding_flags::DECLARED_ONLY != 0;
    let start_is_interface =
        types.get(types.definition_of(query.target)).kind == TypeKind::Interface;

    let mut kind_mask = query.kind_mask;
    let mut methods: SmallVec<[MemberId; 4]> = SmallVec::new();
    let mut method_scan = false;
    let mut current = Some(query.target);

    while let Some(level) = current {
        // Recompute the effective permission level for this step: code in
        // (or nested in) the level sees its non-public members, subject to
        // the filter approving each candidate individually.
        let private_ok = probe_non_public
            || nested_privilege
            || query.accessing.is_some_and(|a| {
                types.same_generic_instantiation(a, level) || types.is_nested_child_of(a, level)
            });
        match collect_level(
            ctx,
            &filter,
            query,
            name,
            kind_mask,
            private_ok,
            level,
            &mut methods,
            &mut method_scan,
            almost,
        ) {
            LevelOutcome::Stop(outcome) => return outcome,
            LevelOutcome::StopAccumulation => break,
            LevelOutcome::Continue => {}
        }
        if declared_only {
            break;
        }
        if method_scan {
            kind_mask &= member_kinds::METHOD | member_kinds::CONSTRUCTOR;
        }
        current = types.base_of(level);
    }

    if !methods.is_empty() {
        return LookupOutcome::Found(CandidateSet::methods(methods));
    }

    // Interfaces do not list the members they inherit; scan the expanded
    // set of inherited interfaces. The first interface with a match wins.
    if start_is_interface && !declared_only {
        for &iface in ctx.base_interface_expansion(query.target).iter() {
            match collect_level(
                ctx,
                &filter,
                query,
                name,
                kind_mask,
                probe_non_public,
                iface,
                &mut methods,
                &mut method_scan,
                almost,
            ) {
                LevelOutcome::Stop(outcome) => return outcome,
                LevelOutcome::StopAccumulation | LevelOutcome::Continue => {}
            }
            if !methods.is_empty() {
                return LookupOutcome::Found(CandidateSet::methods(methods));
            }
        }
    }

    LookupOutcome::NotFound
}

#[allow(clippy::too_many_arguments)]
fn collect_level(
    ctx: &CompilationContext,
    filter: &MemberFilter<'_>,
    query: &AccessQuery,
    name: sable_common::Atom,
    kind_mask: u32,
    private_ok: bool,
    level: TypeId,
    methods: &mut SmallVec<[MemberId; 4]>,
    method_scan: &mut bool,
    almost: &mut AlmostMatchList,
) -> LevelOutcome {
    let table = ctx.member_table(level);
    let mut non_methods: SmallVec<[MemberId; 2]> = SmallVec::new();
    let mut level_methods: SmallVec<[MemberId; 4]> = SmallVec::new();
    let mut hiding = false;

    for &id in table.find(name) {
        let member = ctx.members.get(id);
        if member.kind.mask() & kind_mask == 0 {
            continue;
        }
        // Nested types answer both static and instance searches.
        if member.kind != MemberKind::NestedType {
            if member.is_static && query.binding & binding_flags::STATIC == 0 {
                continue;
            }
            if !member.is_static && query.binding & binding_flags::INSTANCE == 0 {
                continue;
            }
        }
        if !filter.admits(query, private_ok, id, almost) {
            continue;
        }
        if member.hides_base_name {
            hiding = true;
        }
        if member.kind.is_invocable() {
            level_methods.push(id);
        } else {
            non_methods.push(id);
        }
    }

    if !*method_scan && !non_methods.is_empty() {
        // An event wins over its compiler-generated backing field.
        if non_methods.len() == 2 {
            let first = ctx.members.get(non_methods[0]).kind;
            let second = ctx.members.get(non_methods[1]).kind;
            if first == MemberKind::Event && second == MemberKind::Field {
                non_methods.truncate(1);
            } else if first == MemberKind::Field && second == MemberKind::Event {
                non_methods.swap(0, 1);
                non_methods.truncate(1);
            }
        }
        if non_methods.len() > 1 {
            return LevelOutcome::Stop(LookupOutcome::Ambiguous(non_methods));
        }
        // A method and a non-method on one level: declaration order decides.
        if level_methods.is_empty() || non_methods[0].0 < level_methods[0].0 {
            return LevelOutcome::Stop(LookupOutcome::Found(CandidateSet::single_member(
                non_methods[0],
            )));
        }
    }

    if !level_methods.is_empty() {
        *method_scan = true;
        for id in level_methods {
            let candidate = ctx.members.get(id);
            let duplicate = methods
                .iter()
                .any(|&existing| ctx.members.get(existing).same_signature(candidate));
            if !duplicate {
                methods.push(id);
            }
        }
    }

    if hiding && *method_scan {
        return LevelOutcome::StopAccumulation;
    }
    LevelOutcome::Continue
}

#[cfg(test)]
#[path = "tests/candidate_set_tests.rs"]
mod tests;
