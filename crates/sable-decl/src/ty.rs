//! The type arena and hierarchy queries.
//!
//! Types are u32 handles into an arena owned by the `CompilationContext`.
//! The inheritance graph is conceptually cyclic through the base-type
//! back-references, so a "base type" is stored as a handle and every walk
//! is an index chase; the arena owns all lifetimes centrally.
//!
//! Cycle detection for inheritance (class A extends B, B extends A) is the
//! declaration layer's responsibility; the queries here assume the graph
//! is acyclic.

use crate::member::{MemberId, Visibility};
use crate::module::ModuleId;
use crate::namespace::NamespaceId;
use rustc_hash::FxHashMap;
use sable_common::Atom;

/// Identifies a type in the type arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeId(pub u32);

impl TypeId {
    /// Sentinel for "not yet stamped"; never a valid arena index.
    pub const INVALID: TypeId = TypeId(u32::MAX);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
}

#[derive(Debug, Clone)]
pub struct TypeDef {
    pub name: Atom,
    pub kind: TypeKind,
    pub visibility: Visibility,
    pub module: ModuleId,
    /// Enclosing namespace for non-nested types.
    pub namespace: Option<NamespaceId>,
    pub base: Option<TypeId>,
    /// Directly implemented (or, for interfaces, directly inherited)
    /// interfaces, in declaration order.
    pub interfaces: Vec<TypeId>,
    /// The textually enclosing type, for nested declarations.
    pub lexical_parent: Option<TypeId>,
    /// Generic parameter count of the definition.
    pub arity: u16,
    /// For constructed instantiations: the generic definition.
    pub definition: Option<TypeId>,
    pub type_args: Vec<TypeId>,
    /// For partial-type fragments: the canonical owner that holds the
    /// member list and table.
    pub canonical: Option<TypeId>,
    /// Declared members in declaration order. Populated through
    /// `CompilationContext::add_member`; never contains inherited members.
    pub members: Vec<MemberId>,
}

impl TypeDef {
    pub fn new(name: Atom, kind: TypeKind, module: ModuleId) -> TypeDef {
        TypeDef {
            name,
            kind,
            visibility: Visibility::Public,
            module,
            namespace: None,
            base: None,
            interfaces: Vec::new(),
            lexical_parent: None,
            arity: 0,
            definition: None,
            type_args: Vec::new(),
            canonical: None,
            members: Vec::new(),
        }
    }
}

#[derive(Default)]
pub struct TypeArena {
    defs: Vec<TypeDef>,
    /// Interned constructed types, keyed by (definition, arguments).
    /// Append-only for the duration of a compilation.
    constructed: FxHashMap<(TypeId, Vec<TypeId>), TypeId>,
}

impl TypeArena {
    pub fn new() -> Self {
        TypeArena::default()
    }

    pub fn declare(&mut self, def: TypeDef) -> TypeId {
        let id = TypeId(self.defs.len() as u32);
        self.defs.push(def);
        id
    }

    pub fn get(&self, id: TypeId) -> &TypeDef {
        &self.defs[id.0 as usize]
    }

    pub(crate) fn push_member(&mut self, id: TypeId, member: MemberId) {
        self.defs[id.0 as usize].members.push(member);
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Resolve a partial-type fragment to its canonical owner.
    pub fn canonical(&self, id: TypeId) -> TypeId {
        match self.get(id).canonical {
            Some(owner) => owner,
            None => id,
        }
    }

    /// The defining declaration behind `id`: fragments resolve to their
    /// canonical owner, constructed instantiations to their generic
    /// definition. Member tables are always keyed by this.
    pub fn definition_of(&self, id: TypeId) -> TypeId {
        let id = self.canonical(id);
        match self.get(id).definition {
            Some(def) => self.canonical(def),
            None => id,
        }
    }

    /// Intern the instantiation of `definition` with `args`. Repeated
    /// requests for the same pair return the same handle.
    pub fn instantiate(&mut self, definition: TypeId, args: Vec<TypeId>) -> TypeId {
        let definition = self.canonical(definition);
        if let Some(&id) = self.constructed.get(&(definition, args.clone())) {
            return id;
        }
        let constructed = {
            let def = self.get(definition);
            TypeDef {
                name: def.name,
                kind: def.kind,
                visibility: def.visibility,
                module: def.module,
                namespace: def.namespace,
                base: def.base,
                interfaces: def.interfaces.clone(),
                lexical_parent: def.lexical_parent,
                arity: def.arity,
                definition: Some(definition),
                type_args: args.clone(),
                canonical: None,
                members: Vec::new(),
            }
        };
        let id = self.declare(constructed);
        self.constructed.insert((definition, args), id);
        id
    }

    /// The base type of `id`, read off the defining declaration.
    pub fn base_of(&self, id: TypeId) -> Option<TypeId> {
        self.get(self.definition_of(id)).base
    }

    // =========================================================================
    // Hierarchy queries
    // =========================================================================

    /// Whether `a` and `b` are the same type up to generic instantiation:
    /// identical handles, or instantiations of the same generic definition
    /// (type arguments are deliberately ignored).
    pub fn same_generic_instantiation(&self, a: TypeId, b: TypeId) -> bool {
        a == b || self.definition_of(a) == self.definition_of(b)
    }

    /// Whether `derived` is `base` or derives from it, walking the base
    /// chain and comparing up to generic instantiation.
    pub fn is_derived_from(&self, derived: TypeId, base: TypeId) -> bool {
        let mut current = Some(derived);
        while let Some(t) = current {
            if self.same_generic_instantiation(t, base) {
                return true;
            }
            current = self.base_of(t);
        }
        false
    }

    /// Whether `inner` is declared (textually) inside `outer`, at any
    /// depth. Strict: a type is not a nested child of itself.
    pub fn is_nested_child_of(&self, inner: TypeId, outer: TypeId) -> bool {
        if self.same_generic_instantiation(inner, outer) {
            return false;
        }
        let mut current = self.get(self.definition_of(inner)).lexical_parent;
        while let Some(t) = current {
            if self.same_generic_instantiation(t, outer) {
                return true;
            }
            current = self.get(self.definition_of(t)).lexical_parent;
        }
        false
    }

    /// Family accessibility: `ty` is `parent` or derives from it.
    pub fn is_family_accessible(&self, ty: TypeId, parent: TypeId) -> bool {
        self.is_derived_from(ty, parent)
    }

    /// Whether `ty`, or any type it is nested inside, is family-accessible
    /// to `parent`. A nested type has access to all the protected members
    /// visible to its enclosing types.
    pub fn is_nested_family_accessible(&self, ty: TypeId, parent: TypeId) -> bool {
        let mut current = Some(ty);
        while let Some(t) = current {
            if self.is_family_accessible(t, parent) {
                return true;
            }
            current = self.get(self.definition_of(t)).lexical_parent;
        }
        false
    }

    pub(crate) fn clear(&mut self) {
        self.defs.clear();
        self.constructed.clear();
    }
}
