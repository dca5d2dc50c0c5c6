//! Common types shared by every Sable compiler crate.
//!
//! This crate holds the pieces the declaration layer and the resolution
//! engine both depend on: the identifier interner, source positions, and
//! the structured diagnostics model.

pub mod diagnostics;
pub mod interner;
pub mod span;

pub use diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticMessage, DiagnosticRelatedInformation,
    diagnostic_codes, diagnostic_messages, format_message, get_message_template,
};
pub use interner::{Atom, Interner};
pub use span::{FileId, Span};
