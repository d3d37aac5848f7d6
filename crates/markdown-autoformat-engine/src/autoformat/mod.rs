//! # Autoformat Engine
//!
//! Turns markdown shorthand typed or pasted as plain text into document
//! structure, without an explicit "import markdown" step.
//!
//! ## Procedures
//!
//! 1. **Plain-text import** (`import`): one paragraph per line, no interpretation
//! 2. **Single-block matching** (`matcher`): code-block continuation first, then
//!    the paragraph-start criteria in catalog order, delegating to a [`Rewrite`]
//! 3. **Scan driver** (`driver`): sweeps the top-level blocks to a fixed point,
//!    restarting from the current index whenever a rewrite changes the block count
//!
//! ## Seams
//!
//! The engine knows no markdown itself. The catalog of [`Criterion`]s, the
//! [`CodeBlockRule`] and the [`Rewrite`] are injected; `crate::markdown` provides
//! the default implementations.

pub mod context;
pub mod criteria;
pub mod driver;
pub mod error;
pub mod import;
mod matcher;

pub use context::ScanningContext;
pub use criteria::{
    CaptureGroup, CodeBlockRule, Criterion, HorizontalRuleFactory, PatternMatchResults, Rewrite,
};
pub use driver::{Autoformatter, SweepReport};
pub use error::AutoformatError;
pub use import::import_plain_text;
