//! The compilation context.
//!
//! One `CompilationContext` per compiled unit. It owns the interner, the
//! module/namespace/type/member arenas, and every cache the resolution
//! engine consults: memoized member tables, interface expansions, and
//! friend-module answers. There is no process-global state; the context is
//! passed by reference through every call and torn down wholesale by
//! `reset` at the end of a compilation.
//!
//! The engine runs on a single compilation thread, so the caches use plain
//! interior mutability with a build-once discipline rather than locks.

use crate::member::{Member, MemberArena, MemberId, MemberKind};
use crate::module::{ModuleArena, ModuleId};
use crate::namespace::NamespaceArena;
use crate::table::MemberTable;
use crate::ty::{TypeArena, TypeDef, TypeId};
use rustc_hash::{FxHashMap, FxHashSet};
use sable_common::{Atom, Interner};
use std::cell::RefCell;
use std::sync::Arc;
use tracing::{debug, trace};

pub struct CompilationContext {
    pub interner: Interner,
    pub modules: ModuleArena,
    pub namespaces: NamespaceArena,
    pub types: TypeArena,
    pub members: MemberArena,
    /// Member tables, keyed by defining declaration. Built once per type.
    tables: RefCell<FxHashMap<TypeId, Arc<MemberTable>>>,
    /// Transitive inherited-interface expansions, keyed the same way.
    iface_expansions: RefCell<FxHashMap<TypeId, Arc<[TypeId]>>>,
    /// Friend-grant answers per (declaring, accessing) module pair. The
    /// grant metadata is read once and the answer reused for the run.
    friend_pairs: RefCell<FxHashMap<(ModuleId, ModuleId), bool>>,
}

impl CompilationContext {
    pub fn new() -> Self {
        CompilationContext {
            interner: Interner::new(),
            modules: ModuleArena::new(),
            namespaces: NamespaceArena::new(),
            types: TypeArena::new(),
            members: MemberArena::new(),
            tables: RefCell::new(FxHashMap::default()),
            iface_expansions: RefCell::new(FxHashMap::default()),
            friend_pairs: RefCell::new(FxHashMap::default()),
        }
    }

    pub fn intern(&mut self, text: &str) -> Atom {
        self.interner.intern(text)
    }

    // =========================================================================
    // Declaration surface
    // =========================================================================

    /// Declare a type. Nested declarations are entered into the enclosing
    /// type's member list; top-level declarations are registered under
    /// their namespace.
    pub fn declare_type(&mut self, def: TypeDef) -> TypeId {
        let name = def.name;
        let visibility = def.visibility;
        let lexical_parent = def.lexical_parent;
        let namespace = def.namespace;
        let id = self.types.declare(def);
        if let Some(parent) = lexical_parent {
            self.add_member(parent, Member::new(name, MemberKind::NestedType, visibility, id));
        } else if let Some(ns) = namespace {
            self.namespaces.register_type(ns, name, id);
        }
        id
    }

    /// Add a declared member to `owner`, stamping its declaring type.
    /// Members declared on a partial fragment land on the canonical owner.
    pub fn add_member(&mut self, owner: TypeId, member: Member) -> MemberId {
        let owner = self.types.canonical(owner);
        debug_assert!(
            !self.tables.borrow().contains_key(&owner),
            "member added after the owner's table was built"
        );
        let mut member = member;
        member.declaring = owner;
        let id = self.members.alloc(member);
        self.types.push_member(owner, id);
        id
    }

    // =========================================================================
    // Cached queries
    // =========================================================================

    /// The member table of `ty`'s defining declaration, building it on
    /// first use. Constructed instantiations and partial fragments share
    /// their definition's table.
    pub fn member_table(&self, ty: TypeId) -> Arc<MemberTable> {
        let key = self.types.definition_of(ty);
        if let Some(table) = self.tables.borrow().get(&key) {
            return Arc::clone(table);
        }
        let table = Arc::new(MemberTable::build(
            &self.members,
            &self.types.get(key).members,
        ));
        debug!(ty = key.0, members = table.len(), "member table built");
        self.tables
            .borrow_mut()
            .entry(key)
            .or_insert(table)
            .clone()
    }

    /// The transitively inherited interfaces of `ty`, depth-first in
    /// declaration order, duplicates removed.
    pub fn base_interface_expansion(&self, ty: TypeId) -> Arc<[TypeId]> {
        let key = self.types.definition_of(ty);
        if let Some(expansion) = self.iface_expansions.borrow().get(&key) {
            return Arc::clone(expansion);
        }
        let mut out: Vec<TypeId> = Vec::new();
        let mut seen: FxHashSet<TypeId> = FxHashSet::default();
        let mut stack: Vec<TypeId> = self.types.get(key).interfaces.iter().rev().copied().collect();
        while let Some(iface) = stack.pop() {
            let def = self.types.definition_of(iface);
            if !seen.insert(def) {
                continue;
            }
            out.push(iface);
            for &inherited in self.types.get(def).interfaces.iter().rev() {
                stack.push(inherited);
            }
        }
        let expansion: Arc<[TypeId]> = out.into();
        self.iface_expansions
            .borrow_mut()
            .entry(key)
            .or_insert(expansion)
            .clone()
    }

    /// Whether code in `accessing` may see assembly-level members of
    /// `declaring`: same module, or a friend grant. Grant answers are
    /// cached per module pair.
    pub fn is_assembly_visible(&self, declaring: ModuleId, accessing: ModuleId) -> bool {
        if declaring == accessing {
            return true;
        }
        if let Some(&answer) = self.friend_pairs.borrow().get(&(declaring, accessing)) {
            return answer;
        }
        let answer = self.modules.grants_friendship(declaring, accessing);
        trace!(
            declaring = declaring.0,
            accessing = accessing.0,
            answer,
            "friend grant resolved"
        );
        self.friend_pairs
            .borrow_mut()
            .insert((declaring, accessing), answer);
        answer
    }

    /// Number of cached friend-module answers; observable for tests.
    pub fn cached_friend_pairs(&self) -> usize {
        self.friend_pairs.borrow().len()
    }

    // =========================================================================
    // Display helpers for diagnostics
    // =========================================================================

    /// Dotted display name of a type: lexical nest, then namespace.
    pub fn type_name(&self, ty: TypeId) -> String {
        let def = self.types.get(self.types.canonical(ty));
        let simple = self.interner.resolve(def.name);
        if let Some(parent) = def.lexical_parent {
            return format!("{}.{}", self.type_name(parent), simple);
        }
        if let Some(ns) = def.namespace {
            let prefix = self.namespaces.full_name(&self.interner, ns);
            if !prefix.is_empty() {
                return format!("{prefix}.{simple}");
            }
        }
        simple.to_string()
    }

    /// Display signature of a member: `Declaring.name`, with parameter
    /// types for methods, constructors and indexers.
    pub fn member_signature(&self, id: MemberId) -> String {
        let member = self.members.get(id);
        let owner = self.type_name(member.declaring);
        let name = self.interner.resolve(member.name);
        if member.kind.is_invocable() || member.is_indexer() {
            let params: Vec<String> = member
                .params
                .iter()
                .map(|&p| self.type_name(p))
                .collect();
            format!("{owner}.{name}({})", params.join(", "))
        } else {
            format!("{owner}.{name}")
        }
    }

    /// Tear down every arena and cache. The context is reusable afterwards
    /// as if freshly constructed.
    pub fn reset(&mut self) {
        self.interner = Interner::new();
        self.modules.clear();
        self.namespaces.clear();
        self.types.clear();
        self.members.clear();
        self.tables.borrow_mut().clear();
        self.iface_expansions.borrow_mut().clear();
        self.friend_pairs.borrow_mut().clear();
    }
}

impl Default for CompilationContext {
    fn default() -> Self {
        Self::new()
    }
}
