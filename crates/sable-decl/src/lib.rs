//! Declaration model for the Sable compiler.
//!
//! This crate is the queryable surface the resolution engine works against:
//!
//! - `module` - compilation modules and friend grants
//! - `namespace` - the namespace tree and its type registrations
//! - `ty` - the type arena, hierarchy queries, constructed-type interning
//! - `member` - member descriptors and kind masks
//! - `table` - per-type declared-member tables
//! - `context` - the `CompilationContext` owning every arena and cache
//!
//! Types and members are identified by stable u32 handles into arenas; the
//! inheritance graph is walked by chasing handles, never owning pointers.

pub mod context;
pub mod member;
pub mod module;
pub mod namespace;
pub mod table;
pub mod ty;

pub use context::CompilationContext;
pub use member::{Member, MemberArena, MemberId, MemberKind, Visibility, member_kinds};
pub use module::{Module, ModuleArena, ModuleId};
pub use namespace::{Namespace, NamespaceArena, NamespaceId};
pub use table::MemberTable;
pub use ty::{TypeArena, TypeDef, TypeId, TypeKind};
