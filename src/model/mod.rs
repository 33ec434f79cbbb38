//! Document model.
//!
//! Defines the raw text a document is loaded into and the per-character
//! keep/discard mask the audit builds over it.

mod document;
mod mask;

pub use document::*;
pub use mask::*;
