//! # Markdown Kinds
//!
//! Syntax-owning types: each one keeps the delimiters and small decisions for
//! one construct so that criteria and rewrites never hardcode them.
//!
//! - **`CodeFence`**: ```` ``` ```` / `~~~` fences, info strings, closing rules
//! - **`ListMarker`**: indentation width and task boxes

pub mod code_fence;
pub mod list_marker;

pub use code_fence::{CodeFence, FenceKind};
pub use list_marker::ListMarker;
