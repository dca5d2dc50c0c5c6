//! The visibility filter.
//!
//! `MemberFilter` is the single authority on member admissibility: given
//! the accessing type, an optional qualifier type (the static type of the
//! expression the member is reached through) and a candidate member, it
//! decides whether the access is allowed under the visibility matrix and
//! the cross-module friend grants.
//!
//! Candidates rejected purely on visibility grounds are appended to the
//! caller's `AlmostMatchList`, so failure reporting can tell "not found"
//! apart from "found but inaccessible".

use sable_decl::{CompilationContext, Member, MemberId, TypeId, Visibility};
use tracing::trace;

/// One lookup request. Ephemeral: built per query, never persisted.
#[derive(Clone, Debug)]
pub struct AccessQuery {
    /// The type whose code is performing the lookup. `None` for code
    /// outside any type declaration, which sees only public members.
    pub accessing: Option<TypeId>,
    /// The static type of the receiver expression, when the lookup arose
    /// from a qualified access. `None` for bare identifiers.
    pub qualifier: Option<TypeId>,
    /// The type being searched.
    pub target: TypeId,
    /// `member_kinds` mask of acceptable member kinds.
    pub kind_mask: u32,
    /// `binding_flags` for static/instance selection and probing.
    pub binding: u32,
}

/// Members that matched by name and kind but were rejected for
/// visibility. Drained by the failure-reporting path; lives for one query.
pub type AlmostMatchList = Vec<MemberId>;

pub(crate) struct MemberFilter<'a> {
    ctx: &'a CompilationContext,
}

impl<'a> MemberFilter<'a> {
    pub(crate) fn new(ctx: &'a CompilationContext) -> Self {
        MemberFilter { ctx }
    }

    /// Whether `query` may see `id`. Rejections are recorded on `almost`.
    pub(crate) fn admits(
        &self,
        query: &AccessQuery,
        private_ok: bool,
        id: MemberId,
        almost: &mut AlmostMatchList,
    ) -> bool {
        let admitted = self.admits_inner(query, private_ok, self.ctx.members.get(id));
        if !admitted {
            trace!(member = id.0, "candidate rejected for visibility");
            almost.push(id);
        }
        admitted
    }

    fn admits_inner(&self, query: &AccessQuery, private_ok: bool, member: &Member) -> bool {
        let types = &self.ctx.types;
        let Some(accessing) = query.accessing else {
            return member.visibility == Visibility::Public;
        };

        // Code inside the declaring type sees all of its members through an
        // unqualified or self-qualified reference.
        let self_qualified = match query.qualifier {
            None => true,
            Some(qualifier) => types.same_generic_instantiation(qualifier, accessing),
        };
        if self_qualified && types.same_generic_instantiation(accessing, member.declaring) {
            return true;
        }

        match member.visibility {
            Visibility::Public => true,
            Visibility::Private => {
                private_ok
                    || types.same_generic_instantiation(accessing, member.declaring)
                    || types.is_nested_child_of(accessing, member.declaring)
            }
            Visibility::Assembly => self.assembly_admits(accessing, member),
            Visibility::Family => self.family_admits(query, accessing, member),
            Visibility::FamilyOrAssembly => {
                self.assembly_admits(accessing, member) || self.family_admits(query, accessing, member)
            }
            Visibility::FamilyAndAssembly => {
                self.assembly_admits(accessing, member) && self.family_admits(query, accessing, member)
            }
        }
    }

    fn assembly_admits(&self, accessing: TypeId, member: &Member) -> bool {
        let types = &self.ctx.types;
        let accessing_module = types.get(types.definition_of(accessing)).module;
        let declaring_module = types.get(types.definition_of(member.declaring)).module;
        self.ctx.is_assembly_visible(declaring_module, accessing_module)
    }

    fn family_admits(&self, query: &AccessQuery, accessing: TypeId, member: &Member) -> bool {
        let types = &self.ctx.types;

        // Resolved from a bare name; there is no receiver to check.
        if member.is_static && query.qualifier.is_none() {
            return true;
        }

        // A nested type has access to all the protected members visible to
        // its enclosing types, through a receiver of the enclosing type.
        if let Some(qualifier) = query.qualifier {
            if types.is_nested_child_of(accessing, qualifier) {
                return true;
            }
        }

        // Walk the accessing type and its enclosing types looking for one
        // that is family-accessible to the declaring type. A derived class
        // can access protected members of its base, but not through a
        // receiver of the base type itself: the qualifier must be the
        // granting type or something derived from it.
        let mut scope = Some(accessing);
        while let Some(granting) = scope {
            if types.is_family_accessible(granting, member.declaring) {
                if member.is_static {
                    return true;
                }
                match query.qualifier {
                    None => return true,
                    Some(qualifier) => {
                        if types.same_generic_instantiation(qualifier, granting)
                            || types.is_derived_from(qualifier, granting)
                        {
                            return true;
                        }
                    }
                }
            }
            scope = types.get(types.definition_of(granting)).lexical_parent;
        }
        false
    }
}

#[cfg(test)]
#[path = "tests/access_filter_tests.rs"]
mod tests;
