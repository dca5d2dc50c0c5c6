//! Source positions.

use serde::Serialize;

/// Identifies a source file within a compilation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct FileId(pub u32);

/// A half-open byte range within a file.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: u32,
    pub length: u32,
}

impl Span {
    pub const fn new(start: u32, length: u32) -> Self {
        Span { start, length }
    }

    pub const fn end(&self) -> u32 {
        self.start + self.length
    }
}
