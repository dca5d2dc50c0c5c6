//! The namespace tree.
//!
//! Namespaces form a tree rooted at the global namespace. Each namespace
//! maps simple names to child namespaces and to the top-level types
//! registered under it; both maps preserve declaration order so that
//! diagnostics are deterministic.

use crate::ty::TypeId;
use indexmap::IndexMap;
use sable_common::{Atom, Interner};
use smallvec::SmallVec;

/// Identifies a namespace in the namespace arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NamespaceId(pub u32);

#[derive(Debug, Default)]
pub struct Namespace {
    pub name: Atom,
    pub parent: Option<NamespaceId>,
    children: IndexMap<Atom, NamespaceId>,
    /// Top-level types by simple name. Multiple entries under one name are
    /// generic-arity overloads (`List`, `List<T>`).
    types: IndexMap<Atom, SmallVec<[TypeId; 1]>>,
}

pub struct NamespaceArena {
    namespaces: Vec<Namespace>,
}

impl NamespaceArena {
    /// The global namespace, always present.
    pub const GLOBAL: NamespaceId = NamespaceId(0);

    pub fn new() -> Self {
        NamespaceArena {
            namespaces: vec![Namespace {
                name: Atom::EMPTY,
                parent: None,
                ..Namespace::default()
            }],
        }
    }

    pub fn get(&self, id: NamespaceId) -> &Namespace {
        &self.namespaces[id.0 as usize]
    }

    /// Add (or reopen) the child namespace `name` under `parent`.
    pub fn add(&mut self, parent: NamespaceId, name: Atom) -> NamespaceId {
        if let Some(&existing) = self.get(parent).children.get(&name) {
            return existing;
        }
        let id = NamespaceId(self.namespaces.len() as u32);
        self.namespaces.push(Namespace {
            name,
            parent: Some(parent),
            ..Namespace::default()
        });
        self.namespaces[parent.0 as usize].children.insert(name, id);
        id
    }

    pub(crate) fn register_type(&mut self, ns: NamespaceId, name: Atom, ty: TypeId) {
        self.namespaces[ns.0 as usize]
            .types
            .entry(name)
            .or_default()
            .push(ty);
    }

    pub fn child(&self, ns: NamespaceId, name: Atom) -> Option<NamespaceId> {
        self.get(ns).children.get(&name).copied()
    }

    /// Types registered under `name` in `ns`, in declaration order.
    pub fn types(&self, ns: NamespaceId, name: Atom) -> &[TypeId] {
        self.get(ns)
            .types
            .get(&name)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Dotted name of a namespace, empty for the global namespace.
    pub fn full_name(&self, interner: &Interner, id: NamespaceId) -> String {
        let mut parts: Vec<&str> = Vec::new();
        let mut current = Some(id);
        while let Some(ns) = current {
            let namespace = self.get(ns);
            if namespace.parent.is_some() {
                parts.push(interner.resolve(namespace.name));
            }
            current = namespace.parent;
        }
        parts.reverse();
        parts.join(".")
    }

    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.namespaces.truncate(1);
        self.namespaces[0].children.clear();
        self.namespaces[0].types.clear();
    }
}
