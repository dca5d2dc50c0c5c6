//! Name and member resolution for the Sable compiler.
//!
//! This crate answers the question every later phase depends on: given a
//! textual reference to a name, what does it denote, and is the referencing
//! code allowed to see it. It is organized into:
//!
//! - `access` - the visibility filter and the almost-match side channel
//! - `lookup` - the inheritance-walking member lookup
//! - `expr` - the expression classification protocol and resolve framework
//! - `simple_name` - bare-identifier resolution
//! - `member_access` - qualified (dotted) member resolution
//! - `method_group` - overload candidate sets
//! - `type_names` - type and namespace name resolution
//! - `failures` - structured failure reporting
//!
//! The engine performs no I/O and caches nothing across calls except what
//! the `CompilationContext` owns; every resolution is a fresh walk over
//! memoized member tables.

pub mod access;
pub mod expr;
pub mod failures;
pub mod lookup;
pub mod member_access;
pub mod method_group;
pub mod simple_name;
pub mod type_names;

pub use access::{AccessQuery, AlmostMatchList};
pub use expr::{
    BlockId, Denotation, Expr, ExprClass, ExpressionNode, Literal, LocalVar, NodeId, Resolved,
    ResolveContext, ThisRef, resolve, resolve_flags, resolve_value,
};
pub use lookup::{CandidateSet, LookupOutcome, binding_flags, lookup};
pub use member_access::MemberAccess;
pub use method_group::MethodGroupExpr;
pub use simple_name::SimpleName;
