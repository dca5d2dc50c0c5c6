//! Method groups.
//!
//! A method group wraps the full candidate set produced by a lookup walk
//! without collapsing it to one overload; final overload selection is an
//! invocation-time concern. The group supports the two refinements the
//! resolver needs before that point: static/instance filtering once the
//! access form is known, and specialization by an explicit list of generic
//! type arguments.

use crate::expr::ResolveContext;
use crate::failures;
use sable_common::Span;
use sable_decl::{CompilationContext, MemberId, TypeId};
use smallvec::SmallVec;

#[derive(Clone, Debug, PartialEq)]
pub struct MethodGroupExpr {
    candidates: SmallVec<[MemberId; 4]>,
    has_type_arguments: bool,
    type_arguments: Vec<TypeId>,
}

impl MethodGroupExpr {
    pub(crate) fn new(candidates: &[MemberId]) -> MethodGroupExpr {
        debug_assert!(!candidates.is_empty());
        MethodGroupExpr {
            candidates: SmallVec::from_slice(candidates),
            has_type_arguments: false,
            type_arguments: Vec::new(),
        }
    }

    /// Candidates in accumulation order: the start type's declarations
    /// first, base declarations after.
    pub fn candidates(&self) -> &[MemberId] {
        &self.candidates
    }

    pub fn has_type_arguments(&self) -> bool {
        self.has_type_arguments
    }

    pub fn type_arguments(&self) -> &[TypeId] {
        &self.type_arguments
    }

    pub fn name(&self, ctx: &CompilationContext) -> sable_common::Atom {
        ctx.members.get(self.candidates[0]).name
    }

    /// The group's declaring type; the most basal candidate sits at the
    /// end of the accumulation order.
    pub fn declaring_type(&self, ctx: &CompilationContext) -> TypeId {
        let last = *self.candidates.last().expect("group is never empty");
        ctx.members.get(last).declaring
    }

    /// Whether the group contains at least one instance method. A group
    /// can contain both kinds at once.
    pub fn contains_instance(&self, ctx: &CompilationContext) -> bool {
        self.candidates
            .iter()
            .any(|&id| !ctx.members.get(id).is_static)
    }

    /// Whether the group contains at least one static method.
    pub fn contains_static(&self, ctx: &CompilationContext) -> bool {
        self.candidates
            .iter()
            .any(|&id| ctx.members.get(id).is_static)
    }

    /// Drop static candidates. Returns false (leaving the group intact)
    /// if that would empty it.
    pub fn retain_instance_methods(&mut self, ctx: &CompilationContext) -> bool {
        self.retain(ctx, false)
    }

    /// Drop instance candidates. Returns false (leaving the group intact)
    /// if that would empty it.
    pub fn retain_static_methods(&mut self, ctx: &CompilationContext) -> bool {
        self.retain(ctx, true)
    }

    fn retain(&mut self, ctx: &CompilationContext, keep_static: bool) -> bool {
        let kept: SmallVec<[MemberId; 4]> = self
            .candidates
            .iter()
            .copied()
            .filter(|&id| ctx.members.get(id).is_static == keep_static)
            .collect();
        if kept.is_empty() {
            return false;
        }
        self.candidates = kept;
        true
    }

    /// Specialize the group by an explicit generic type-argument list:
    /// re-derive a candidate set restricted to methods whose generic
    /// parameter count matches `args`. Reports an arity diagnostic and
    /// returns `None` when no candidate matches.
    pub fn with_type_arguments(
        &self,
        ctx: &mut ResolveContext<'_>,
        args: &[TypeId],
        span: Span,
    ) -> Option<MethodGroupExpr> {
        let compilation = ctx.compilation;
        let mut first_generic: Option<MemberId> = None;
        let mut matching: SmallVec<[MemberId; 4]> = SmallVec::new();
        for &id in &self.candidates {
            let member = compilation.members.get(id);
            if member.generic_arity == 0 {
                continue;
            }
            if first_generic.is_none() {
                first_generic = Some(id);
            }
            if member.generic_arity as usize == args.len() {
                matching.push(id);
            }
        }

        if !matching.is_empty() {
            return Some(MethodGroupExpr {
                candidates: matching,
                has_type_arguments: true,
                type_arguments: args.to_vec(),
            });
        }

        match first_generic {
            Some(id) => {
                let arity = compilation.members.get(id).generic_arity;
                failures::report_generic_method_arity(ctx, id, arity, span);
            }
            None => {
                let name = compilation
                    .interner
                    .resolve(self.name(compilation))
                    .to_string();
                failures::report_non_generic_with_type_arguments(ctx, "method", &name, span);
            }
        }
        None
    }

    /// Display signature of the group for diagnostics; the first candidate
    /// stands for the set.
    pub fn signature_for_error(&self, ctx: &CompilationContext) -> String {
        ctx.member_signature(self.candidates[0])
    }
}
