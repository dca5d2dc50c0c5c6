//! Shared fixtures for the resolver integration tests.
//!
//! Tests build declaration worlds directly through the `sable-decl`
//! construction API, the same surface the real declaration layer uses.

#![allow(dead_code)]

use sable_common::{Atom, FileId, Span};
use sable_decl::{
    CompilationContext, Member, MemberId, MemberKind, ModuleId, TypeDef, TypeId, TypeKind,
    Visibility, member_kinds,
};
use sable_resolve::{AccessQuery, AlmostMatchList, LookupOutcome, ResolveContext, binding_flags, lookup};

pub struct Fixture {
    pub ctx: CompilationContext,
    pub alpha: ModuleId,
    pub beta: ModuleId,
    pub int_ty: TypeId,
    pub string_ty: TypeId,
}

impl Fixture {
    pub fn new() -> Fixture {
        let mut ctx = CompilationContext::new();
        let alpha_name = ctx.intern("Alpha");
        let alpha = ctx.modules.add(alpha_name);
        let beta_name = ctx.intern("Beta");
        let beta = ctx.modules.add(beta_name);
        let int_name = ctx.intern("Int32");
        let int_ty = ctx.declare_type(TypeDef::new(int_name, TypeKind::Struct, alpha));
        let string_name = ctx.intern("String");
        let string_ty = ctx.declare_type(TypeDef::new(string_name, TypeKind::Class, alpha));
        Fixture {
            ctx,
            alpha,
            beta,
            int_ty,
            string_ty,
        }
    }

    pub fn atom(&mut self, text: &str) -> Atom {
        self.ctx.intern(text)
    }

    pub fn class(&mut self, name: &str, module: ModuleId) -> TypeId {
        let name = self.ctx.intern(name);
        self.ctx
            .declare_type(TypeDef::new(name, TypeKind::Class, module))
    }

    pub fn class_with_base(&mut self, name: &str, module: ModuleId, base: TypeId) -> TypeId {
        let name = self.ctx.intern(name);
        self.ctx.declare_type(TypeDef {
            base: Some(base),
            ..TypeDef::new(name, TypeKind::Class, module)
        })
    }

    pub fn nested_class(&mut self, name: &str, module: ModuleId, outer: TypeId) -> TypeId {
        let name = self.ctx.intern(name);
        self.ctx.declare_type(TypeDef {
            lexical_parent: Some(outer),
            ..TypeDef::new(name, TypeKind::Class, module)
        })
    }

    pub fn interface(&mut self, name: &str, module: ModuleId, inherited: &[TypeId]) -> TypeId {
        let name = self.ctx.intern(name);
        self.ctx.declare_type(TypeDef {
            interfaces: inherited.to_vec(),
            ..TypeDef::new(name, TypeKind::Interface, module)
        })
    }

    pub fn field(&mut self, owner: TypeId, name: &str, visibility: Visibility) -> MemberId {
        let name = self.ctx.intern(name);
        let ty = self.int_ty;
        self.ctx
            .add_member(owner, Member::new(name, MemberKind::Field, visibility, ty))
    }

    pub fn static_field(&mut self, owner: TypeId, name: &str, visibility: Visibility) -> MemberId {
        let name = self.ctx.intern(name);
        let ty = self.int_ty;
        self.ctx.add_member(
            owner,
            Member {
                is_static: true,
                ..Member::new(name, MemberKind::Field, visibility, ty)
            },
        )
    }

    pub fn method(
        &mut self,
        owner: TypeId,
        name: &str,
        visibility: Visibility,
        params: &[TypeId],
    ) -> MemberId {
        let name = self.ctx.intern(name);
        let ty = self.int_ty;
        self.ctx.add_member(
            owner,
            Member {
                params: params.to_vec(),
                ..Member::new(name, MemberKind::Method, visibility, ty)
            },
        )
    }

    pub fn static_method(
        &mut self,
        owner: TypeId,
        name: &str,
        visibility: Visibility,
        params: &[TypeId],
    ) -> MemberId {
        let name = self.ctx.intern(name);
        let ty = self.int_ty;
        self.ctx.add_member(
            owner,
            Member {
                is_static: true,
                params: params.to_vec(),
                ..Member::new(name, MemberKind::Method, visibility, ty)
            },
        )
    }

    pub fn generic_method(
        &mut self,
        owner: TypeId,
        name: &str,
        visibility: Visibility,
        generic_arity: u16,
    ) -> MemberId {
        let name = self.ctx.intern(name);
        let ty = self.int_ty;
        self.ctx.add_member(
            owner,
            Member {
                generic_arity,
                ..Member::new(name, MemberKind::Method, visibility, ty)
            },
        )
    }

    /// A resolution context for code inside `container`, in the primary
    /// module.
    pub fn resolve_ctx(&self, container: Option<TypeId>) -> ResolveContext<'_> {
        let mut ctx = ResolveContext::new(&self.ctx, FileId(0), self.alpha);
        ctx.container_type = container;
        ctx
    }
}

pub fn span() -> Span {
    Span::new(0, 1)
}

/// Run a full-mask lookup and return the outcome with its almost-matches.
pub fn run_lookup(
    ctx: &CompilationContext,
    accessing: Option<TypeId>,
    qualifier: Option<TypeId>,
    target: TypeId,
    name: Atom,
) -> (LookupOutcome, AlmostMatchList) {
    let query = AccessQuery {
        accessing,
        qualifier,
        target,
        kind_mask: member_kinds::ALL,
        binding: binding_flags::ALL,
    };
    let mut almost = Vec::new();
    let outcome = lookup(ctx, &query, name, &mut almost);
    (outcome, almost)
}

/// Collect the diagnostic codes recorded on a resolve context.
pub fn codes(ctx: &ResolveContext<'_>) -> Vec<u32> {
    ctx.diagnostics.iter().map(|d| d.code).collect()
}
