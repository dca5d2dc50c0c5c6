//! The expression classification protocol.
//!
//! Every resolvable syntax node implements `ExpressionNode`; the framework
//! entry points `resolve` and `resolve_value` wrap the node-specific step
//! with the caller's acceptance mask, the scoped flow-analysis toggles,
//! the re-entrancy guard, and the postcondition checks.
//!
//! A node's classification is computed exactly once: repeated resolution
//! returns the identical `Resolved` value.

use crate::failures;
use crate::lookup::CandidateSet;
use crate::member_access::MemberAccess;
use crate::method_group::MethodGroupExpr;
use crate::simple_name::SimpleName;
use once_cell::unsync::OnceCell;
use rustc_hash::{FxHashMap, FxHashSet};
use sable_common::{Atom, Diagnostic, FileId, Span};
use sable_decl::{CompilationContext, MemberId, MemberKind, ModuleId, NamespaceArena, NamespaceId, TypeId};

/// Identity of a syntax node, supplied by the node's builder (normally the
/// parser). Used by the re-entrancy guard.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// Semantic category of a resolved expression.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExprClass {
    Invalid,
    Value,
    Variable,
    Namespace,
    Type,
    MethodGroup,
    PropertyAccess,
    EventAccess,
    IndexerAccess,
    Nothing,
}

/// Flags telling `resolve` which expression classes the caller accepts,
/// plus the scoped toggles applied for the duration of the call.
pub mod resolve_flags {
    /// Accept Value, Variable, PropertyAccess, EventAccess or IndexerAccess.
    pub const VARIABLE_OR_VALUE: u32 = 1;
    /// Accept a type or namespace expression.
    pub const TYPE: u32 = 2;
    /// Accept a method group.
    pub const METHOD_GROUP: u32 = 4;
    /// Mask of all the expression class flags.
    pub const MASK_EXPR_CLASS: u32 = 7;
    /// Suspend definite-assignment flow analysis while resolving.
    pub const DISABLE_FLOW_ANALYSIS: u32 = 8;
    /// This is the first segment of a dotted access chain.
    pub const INTERMEDIATE: u32 = 16;
}

/// The `resolve_flags` class bits a resolved class satisfies.
pub(crate) const fn accepted_mask(class: ExprClass) -> u32 {
    match class {
        ExprClass::Value
        | ExprClass::Variable
        | ExprClass::PropertyAccess
        | ExprClass::EventAccess
        | ExprClass::IndexerAccess => resolve_flags::VARIABLE_OR_VALUE,
        ExprClass::Type | ExprClass::Namespace => resolve_flags::TYPE,
        ExprClass::MethodGroup => resolve_flags::METHOD_GROUP,
        ExprClass::Nothing | ExprClass::Invalid => 0,
    }
}

/// What a resolved expression denotes.
#[derive(Clone, Debug, PartialEq)]
pub enum Denotation {
    /// A computed value with no further identity.
    Value,
    /// A block-local variable or parameter.
    Local { name: Atom },
    /// A field, property, indexer or event.
    Member(MemberId),
    /// One or more overloaded methods or constructors.
    MethodGroup(MethodGroupExpr),
    Type(TypeId),
    Namespace(NamespaceId),
    Nothing,
}

/// A classified expression: the class tag, the concrete value type (absent
/// only for namespaces and method groups), and the denoted entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolved {
    pub class: ExprClass,
    pub ty: Option<TypeId>,
    pub denotation: Denotation,
}

impl Resolved {
    pub fn value(ty: TypeId) -> Resolved {
        Resolved {
            class: ExprClass::Value,
            ty: Some(ty),
            denotation: Denotation::Value,
        }
    }

    pub fn ty_expr(ty: TypeId) -> Resolved {
        Resolved {
            class: ExprClass::Type,
            ty: Some(ty),
            denotation: Denotation::Type(ty),
        }
    }

    pub fn namespace(ns: NamespaceId) -> Resolved {
        Resolved {
            class: ExprClass::Namespace,
            ty: None,
            denotation: Denotation::Namespace(ns),
        }
    }
}

/// Classify a single non-method member.
pub(crate) fn classify_member(ctx: &CompilationContext, id: MemberId) -> Resolved {
    let member = ctx.members.get(id);
    let class = match member.kind {
        MemberKind::Field => ExprClass::Variable,
        MemberKind::Property => {
            if member.is_indexer() {
                ExprClass::IndexerAccess
            } else {
                ExprClass::PropertyAccess
            }
        }
        MemberKind::Event => ExprClass::EventAccess,
        MemberKind::NestedType => {
            return Resolved::ty_expr(member.ty);
        }
        MemberKind::Method | MemberKind::Constructor => {
            unreachable!("method candidates are classified as groups")
        }
    };
    Resolved {
        class,
        ty: Some(member.ty),
        denotation: Denotation::Member(id),
    }
}

/// Classify a lookup candidate set.
pub(crate) fn classify_candidates(ctx: &CompilationContext, set: &CandidateSet) -> Resolved {
    if set.is_method_group() {
        Resolved {
            class: ExprClass::MethodGroup,
            ty: None,
            denotation: Denotation::MethodGroup(MethodGroupExpr::new(set.members())),
        }
    } else {
        classify_member(ctx, set.single().expect("non-method set holds one member"))
    }
}

// =============================================================================
// Resolution context
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlockId(pub u32);

/// A local variable or parameter binding.
#[derive(Clone, Debug)]
pub struct LocalVar {
    pub name: Atom,
    pub ty: TypeId,
    pub is_parameter: bool,
}

struct Block {
    bindings: FxHashMap<Atom, LocalVar>,
    parent: Option<BlockId>,
}

/// Per-resolution state, borrowing the compilation-wide context.
///
/// Flow toggles and the intermediate marker are scoped: `resolve` saves
/// them on entry and restores them on exit, so reentrant calls cannot leak
/// state into each other.
pub struct ResolveContext<'a> {
    pub compilation: &'a CompilationContext,
    pub file: FileId,
    /// The module the resolving code belongs to.
    pub current_module: ModuleId,
    /// The type whose body is being resolved, innermost.
    pub container_type: Option<TypeId>,
    /// The namespace enclosing the resolving code.
    pub current_namespace: NamespaceId,
    pub is_static_context: bool,
    pub is_field_initializer: bool,
    /// Definite-assignment analysis toggle; suspended by
    /// `resolve_flags::DISABLE_FLOW_ANALYSIS` for the duration of a call.
    pub do_flow_analysis: bool,
    pub(crate) intermediate: bool,
    pub diagnostics: Vec<Diagnostic>,
    pub current_block: Option<BlockId>,
    blocks: Vec<Block>,
    /// Nodes currently resolving; a node that recursively requests its own
    /// resolution fails closed instead of looping.
    in_progress: FxHashSet<NodeId>,
}

impl<'a> ResolveContext<'a> {
    pub fn new(compilation: &'a CompilationContext, file: FileId, module: ModuleId) -> Self {
        ResolveContext {
            compilation,
            file,
            current_module: module,
            container_type: None,
            current_namespace: NamespaceArena::GLOBAL,
            is_static_context: false,
            is_field_initializer: false,
            do_flow_analysis: true,
            intermediate: false,
            diagnostics: Vec::new(),
            current_block: None,
            blocks: Vec::new(),
            in_progress: FxHashSet::default(),
        }
    }

    /// Open a new block under the current one and make it current.
    pub fn enter_block(&mut self) -> BlockId {
        let id = BlockId(self.blocks.len() as u32);
        self.blocks.push(Block {
            bindings: FxHashMap::default(),
            parent: self.current_block,
        });
        self.current_block = Some(id);
        id
    }

    pub fn exit_block(&mut self) {
        if let Some(current) = self.current_block {
            self.current_block = self.blocks[current.0 as usize].parent;
        }
    }

    pub fn declare_local(&mut self, name: Atom, ty: TypeId, is_parameter: bool) {
        let block = self.current_block.expect("no block to declare a local in");
        self.blocks[block.0 as usize].bindings.insert(
            name,
            LocalVar {
                name,
                ty,
                is_parameter,
            },
        );
    }

    /// Find `name` in the innermost enclosing block chain.
    pub fn lookup_local(&self, name: Atom) -> Option<&LocalVar> {
        let mut current = self.current_block;
        while let Some(block) = current {
            let block = &self.blocks[block.0 as usize];
            if let Some(binding) = block.bindings.get(&name) {
                return Some(binding);
            }
            current = block.parent;
        }
        None
    }

    pub(crate) fn begin_resolving(&mut self, node: NodeId) -> bool {
        self.in_progress.insert(node)
    }

    pub(crate) fn end_resolving(&mut self, node: NodeId) {
        self.in_progress.remove(&node);
    }

    pub(crate) fn error(&mut self, span: Span, message: String, code: u32) {
        self.diagnostics
            .push(Diagnostic::error(self.file, span, message, code));
    }
}

// =============================================================================
// The node protocol and resolve framework
// =============================================================================

/// The capability contract every resolvable syntax node satisfies.
pub trait ExpressionNode {
    fn node_id(&self) -> NodeId;
    fn span(&self) -> Span;
    /// The node's set-once resolution slot.
    fn cache(&self) -> &OnceCell<Resolved>;

    /// The node-specific resolution step. On success the returned value
    /// carries exactly one concrete class tag.
    fn resolve_inner(&self, ctx: &mut ResolveContext<'_>) -> Option<Resolved>;

    /// The type/namespace-only resolution path. Cheaper than the general
    /// step and free of value-level side effects; nodes that can denote
    /// types override this.
    fn resolve_as_type(&self, ctx: &mut ResolveContext<'_>) -> Option<Resolved> {
        let resolved = self.resolve_inner(ctx)?;
        if matches!(resolved.class, ExprClass::Type | ExprClass::Namespace) {
            Some(resolved)
        } else {
            failures::report_unexpected_kind(ctx, &resolved, self.span(), resolve_flags::TYPE);
            None
        }
    }
}

/// Resolve `node`, accepting the classes in `accepted`.
///
/// Postconditions on success: the class tag is concrete (never `Invalid`),
/// and every class except `Namespace` and `MethodGroup` carries a value
/// type. A violation is a programming fault in the node, not a user error.
pub fn resolve(
    node: &dyn ExpressionNode,
    ctx: &mut ResolveContext<'_>,
    accepted: u32,
) -> Option<Resolved> {
    if let Some(existing) = node.cache().get() {
        let existing = existing.clone();
        return check_accepted(ctx, existing, node.span(), accepted);
    }

    if !ctx.begin_resolving(node.node_id()) {
        // Re-entrant resolution of a node still in progress fails closed.
        return None;
    }

    let result = if accepted & resolve_flags::MASK_EXPR_CLASS == resolve_flags::TYPE {
        node.resolve_as_type(ctx)
    } else {
        let saved_flow = ctx.do_flow_analysis;
        let saved_intermediate = ctx.intermediate;
        if accepted & resolve_flags::DISABLE_FLOW_ANALYSIS != 0 {
            ctx.do_flow_analysis = false;
        }
        ctx.intermediate = accepted & resolve_flags::INTERMEDIATE != 0;
        let result = node.resolve_inner(ctx);
        ctx.do_flow_analysis = saved_flow;
        ctx.intermediate = saved_intermediate;
        result
    };
    ctx.end_resolving(node.node_id());

    let resolved = result?;
    assert!(
        resolved.class != ExprClass::Invalid,
        "expression resolved without a classification"
    );
    assert!(
        matches!(resolved.class, ExprClass::Namespace | ExprClass::MethodGroup)
            || resolved.ty.is_some(),
        "expression did not set its type after resolution"
    );
    let _ = node.cache().set(resolved.clone());
    check_accepted(ctx, resolved, node.span(), accepted)
}

/// Resolve `node` in a value position: the common default accepting
/// values, variables and method groups, where a bare method group is
/// itself an error (methods must be invoked, not referenced bare).
pub fn resolve_value(node: &dyn ExpressionNode, ctx: &mut ResolveContext<'_>) -> Option<Resolved> {
    let resolved = resolve(
        node,
        ctx,
        resolve_flags::VARIABLE_OR_VALUE | resolve_flags::METHOD_GROUP,
    )?;
    if resolved.class == ExprClass::MethodGroup {
        if let Denotation::MethodGroup(group) = &resolved.denotation {
            let signature = group.signature_for_error(ctx.compilation);
            failures::report_method_group_usage(ctx, &signature, node.span());
        }
        return None;
    }
    Some(resolved)
}

fn check_accepted(
    ctx: &mut ResolveContext<'_>,
    resolved: Resolved,
    span: Span,
    accepted: u32,
) -> Option<Resolved> {
    if accepted & accepted_mask(resolved.class) == 0 {
        failures::report_unexpected_kind(ctx, &resolved, span, accepted);
        return None;
    }
    Some(resolved)
}

// =============================================================================
// Leaf nodes
// =============================================================================

/// A value of a known type; stands in for literals and already-computed
/// expressions.
pub struct Literal {
    pub id: NodeId,
    pub ty: TypeId,
    pub span: Span,
    resolved: OnceCell<Resolved>,
}

impl Literal {
    pub fn new(id: NodeId, ty: TypeId, span: Span) -> Literal {
        Literal {
            id,
            ty,
            span,
            resolved: OnceCell::new(),
        }
    }
}

impl ExpressionNode for Literal {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn span(&self) -> Span {
        self.span
    }

    fn cache(&self) -> &OnceCell<Resolved> {
        &self.resolved
    }

    fn resolve_inner(&self, _ctx: &mut ResolveContext<'_>) -> Option<Resolved> {
        Some(Resolved::value(self.ty))
    }
}

/// The `this` reference.
pub struct ThisRef {
    pub id: NodeId,
    pub span: Span,
    resolved: OnceCell<Resolved>,
}

impl ThisRef {
    pub fn new(id: NodeId, span: Span) -> ThisRef {
        ThisRef {
            id,
            span,
            resolved: OnceCell::new(),
        }
    }
}

impl ExpressionNode for ThisRef {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn span(&self) -> Span {
        self.span
    }

    fn cache(&self) -> &OnceCell<Resolved> {
        &self.resolved
    }

    fn resolve_inner(&self, ctx: &mut ResolveContext<'_>) -> Option<Resolved> {
        let container = ctx.container_type;
        match container {
            Some(container) if !ctx.is_static_context => Some(Resolved::value(container)),
            _ => {
                failures::report_this_unavailable(ctx, self.span);
                None
            }
        }
    }
}

/// A resolvable expression tree.
pub enum Expr {
    Name(SimpleName),
    Member(MemberAccess),
    This(ThisRef),
    Literal(Literal),
}

impl ExpressionNode for Expr {
    fn node_id(&self) -> NodeId {
        match self {
            Expr::Name(n) => n.node_id(),
            Expr::Member(n) => n.node_id(),
            Expr::This(n) => n.node_id(),
            Expr::Literal(n) => n.node_id(),
        }
    }

    fn span(&self) -> Span {
        match self {
            Expr::Name(n) => n.span(),
            Expr::Member(n) => n.span(),
            Expr::This(n) => n.span(),
            Expr::Literal(n) => n.span(),
        }
    }

    fn cache(&self) -> &OnceCell<Resolved> {
        match self {
            Expr::Name(n) => n.cache(),
            Expr::Member(n) => n.cache(),
            Expr::This(n) => n.cache(),
            Expr::Literal(n) => n.cache(),
        }
    }

    fn resolve_inner(&self, ctx: &mut ResolveContext<'_>) -> Option<Resolved> {
        match self {
            Expr::Name(n) => n.resolve_inner(ctx),
            Expr::Member(n) => n.resolve_inner(ctx),
            Expr::This(n) => n.resolve_inner(ctx),
            Expr::Literal(n) => n.resolve_inner(ctx),
        }
    }

    fn resolve_as_type(&self, ctx: &mut ResolveContext<'_>) -> Option<Resolved> {
        match self {
            Expr::Name(n) => n.resolve_as_type(ctx),
            Expr::Member(n) => n.resolve_as_type(ctx),
            Expr::This(n) => n.resolve_as_type(ctx),
            Expr::Literal(n) => n.resolve_as_type(ctx),
        }
    }
}
