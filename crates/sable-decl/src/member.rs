//! Member descriptors.
//!
//! A `Member` is a named, typed symbol belonging to exactly one declaring
//! type. Members are immutable once constructed and owned by the member
//! arena; the declaring type's member table indexes them by name.

use crate::ty::TypeId;
use sable_common::{Atom, FileId, Span};

/// Identifies a member in the member arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemberId(pub u32);

/// Kind of member.
///
/// This is a closed set: the lookup merging rules match on it exhaustively,
/// so adding a kind is a compile-time event, not a runtime surprise.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Property,
    Event,
    Method,
    Constructor,
    NestedType,
}

/// Kind masks for lookup queries, combined with `|`.
pub mod member_kinds {
    pub const FIELD: u32 = 1 << 0;
    pub const PROPERTY: u32 = 1 << 1;
    pub const EVENT: u32 = 1 << 2;
    pub const METHOD: u32 = 1 << 3;
    pub const CONSTRUCTOR: u32 = 1 << 4;
    pub const NESTED_TYPE: u32 = 1 << 5;

    pub const ALL: u32 = FIELD | PROPERTY | EVENT | METHOD | CONSTRUCTOR | NESTED_TYPE;
}

impl MemberKind {
    pub const fn mask(self) -> u32 {
        match self {
            MemberKind::Field => member_kinds::FIELD,
            MemberKind::Property => member_kinds::PROPERTY,
            MemberKind::Event => member_kinds::EVENT,
            MemberKind::Method => member_kinds::METHOD,
            MemberKind::Constructor => member_kinds::CONSTRUCTOR,
            MemberKind::NestedType => member_kinds::NESTED_TYPE,
        }
    }

    /// Methods and constructors accumulate into candidate sets instead of
    /// shadowing across hierarchy levels.
    pub const fn is_invocable(self) -> bool {
        matches!(self, MemberKind::Method | MemberKind::Constructor)
    }
}

/// Declared visibility level.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Private,
    /// "protected": the declaring type and its derivatives.
    Family,
    /// "internal": the declaring module and its friends.
    Assembly,
    FamilyOrAssembly,
    FamilyAndAssembly,
}

impl Visibility {
    /// Whether the level has a family component (plain or combined).
    pub const fn has_family(self) -> bool {
        matches!(
            self,
            Visibility::Family | Visibility::FamilyOrAssembly | Visibility::FamilyAndAssembly
        )
    }
}

#[derive(Debug, Clone)]
pub struct Member {
    pub name: Atom,
    pub kind: MemberKind,
    pub visibility: Visibility,
    pub is_static: bool,
    /// Stamped by `CompilationContext::add_member`; always the canonical
    /// owner for members declared on a partial fragment.
    pub declaring: TypeId,
    /// The member's value type: field type, property/indexer type, event
    /// handler type, method return type, or the nested type itself.
    pub ty: TypeId,
    /// Parameter types for methods, constructors and indexers.
    pub params: Vec<TypeId>,
    /// Generic parameter count for methods.
    pub generic_arity: u16,
    /// Declared with the hiding modifier: terminates overload accumulation
    /// from base levels at this name.
    pub hides_base_name: bool,
    /// Source position of the declaration, for related-symbol reporting.
    pub declaration: Option<(FileId, Span)>,
}

impl Member {
    pub fn new(name: Atom, kind: MemberKind, visibility: Visibility, ty: TypeId) -> Member {
        Member {
            name,
            kind,
            visibility,
            is_static: false,
            declaring: TypeId::INVALID,
            ty,
            params: Vec::new(),
            generic_arity: 0,
            hides_base_name: false,
            declaration: None,
        }
    }

    /// An indexer is a property with parameters.
    pub fn is_indexer(&self) -> bool {
        self.kind == MemberKind::Property && !self.params.is_empty()
    }

    /// Whether two members of the same name would collide as overloads:
    /// identical parameter lists, generic arity and static-ness.
    pub fn same_signature(&self, other: &Member) -> bool {
        self.is_static == other.is_static
            && self.generic_arity == other.generic_arity
            && self.params == other.params
    }
}

#[derive(Default)]
pub struct MemberArena {
    members: Vec<Member>,
}

impl MemberArena {
    pub fn new() -> Self {
        MemberArena::default()
    }

    pub(crate) fn alloc(&mut self, member: Member) -> MemberId {
        let id = MemberId(self.members.len() as u32);
        self.members.push(member);
        id
    }

    pub fn get(&self, id: MemberId) -> &Member {
        &self.members[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.members.clear();
    }
}
