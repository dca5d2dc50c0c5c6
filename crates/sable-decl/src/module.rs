//! Compilation modules and friend grants.
//!
//! A module is the unit of assembly-level visibility: a member declared
//! `assembly` (or one of its family combinations) is visible to code in the
//! same module, and to code in any module the declaring module has named in
//! a friend grant.

use sable_common::Atom;

/// Identifies a compilation module.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ModuleId(pub u32);

#[derive(Debug, Clone)]
pub struct Module {
    pub name: Atom,
    /// Names of modules this module's assembly-level members are visible to.
    pub friend_grants: Vec<Atom>,
}

#[derive(Default)]
pub struct ModuleArena {
    modules: Vec<Module>,
}

impl ModuleArena {
    pub fn new() -> Self {
        ModuleArena::default()
    }

    pub fn add(&mut self, name: Atom) -> ModuleId {
        let id = ModuleId(self.modules.len() as u32);
        self.modules.push(Module {
            name,
            friend_grants: Vec::new(),
        });
        id
    }

    pub fn get(&self, id: ModuleId) -> &Module {
        &self.modules[id.0 as usize]
    }

    pub fn add_friend_grant(&mut self, module: ModuleId, friend: Atom) {
        self.modules[module.0 as usize].friend_grants.push(friend);
    }

    /// Whether `declaring` has granted its assembly-level visibility to
    /// `accessing`. The same-module case is handled by the caller; this
    /// only consults the declared grants.
    pub(crate) fn grants_friendship(&self, declaring: ModuleId, accessing: ModuleId) -> bool {
        let accessing_name = self.get(accessing).name;
        self.get(declaring).friend_grants.contains(&accessing_name)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.modules.clear();
    }
}
