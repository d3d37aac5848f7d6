//! Markdown autoformatting for editing surfaces.
//!
//! Plain text pasted or typed into a document starts out as one paragraph per
//! line; [`autoformat()`] then sweeps the blocks until every heading, list item,
//! quote, rule and fenced code block has been recognized, and formats the
//! inline spans that remain.

pub mod autoformat;
pub mod markdown;
pub mod tree;

// Re-export key types for easier usage
pub use autoformat::{Autoformatter, AutoformatError, SweepReport, import_plain_text};
pub use markdown::{AutoformatOptions, autoformat, convert_from_plain_text};
pub use tree::{BlockKind, BlockNode, Document, DocumentAccess, InlineNode};
