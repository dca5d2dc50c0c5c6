//! Per-type member tables.
//!
//! A `MemberTable` indexes one declared type's own members by name. It is
//! built once per canonical type, on first use, and reused for the rest of
//! the compilation.
//!
//! Invariant: a table never contains inherited members. Inherited members
//! are reached by following the owner's base-type handle to the base
//! type's table; for interfaces, through the transitive inherited-interface
//! expansion.

use crate::member::{MemberArena, MemberId};
use rustc_hash::FxHashMap;
use sable_common::Atom;
use smallvec::SmallVec;

pub struct MemberTable {
    by_name: FxHashMap<Atom, SmallVec<[MemberId; 2]>>,
    count: usize,
}

impl MemberTable {
    pub(crate) fn build(members: &MemberArena, declared: &[MemberId]) -> MemberTable {
        let mut by_name: FxHashMap<Atom, SmallVec<[MemberId; 2]>> = FxHashMap::default();
        for &id in declared {
            by_name.entry(members.get(id).name).or_default().push(id);
        }
        MemberTable {
            by_name,
            count: declared.len(),
        }
    }

    /// Members declared under `name`, in declaration order. Kind-mask and
    /// binding filtering happens at the query site, which also consults
    /// the visibility filter per candidate.
    pub fn find(&self, name: Atom) -> &[MemberId] {
        self.by_name.get(&name).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
