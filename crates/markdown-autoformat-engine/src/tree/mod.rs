//! # Document Tree
//!
//! The in-memory document the autoformat engine reads and rewrites.
//!
//! - **`document`**: `Document` and the `DocumentAccess` seam the engine borrows through
//! - **`block`**: `BlockNode` and its kinds (paragraph, heading, quote, list item, code, rule)
//! - **`inline`**: `InlineNode` children and `TextRun` formatting
//!
//! Blocks own their inline children; the document owns its blocks. Text content is
//! never stored on a block, it is always computed from the children.

pub mod block;
pub mod document;
pub mod inline;

pub use block::{BlockKind, BlockNode, CodeBlock, HeadingLevel, ListItem, ListType};
pub use document::{Document, DocumentAccess, TextNodeWithOffset};
pub use inline::{InlineNode, TextFormat, TextRun};
