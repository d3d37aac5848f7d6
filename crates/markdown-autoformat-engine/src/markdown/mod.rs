//! # Markdown Autoformatting
//!
//! The default markdown rules plugged into the engine's seams.
//!
//! - **`criteria`**: the regex-backed catalog, block kinds first, inline kinds last
//! - **`rewrite`**: `MarkdownRewriter` and the `FencedCodeRule` used inside fences
//! - **`inline`**: the inline pass that turns `**`, `_`, `~~` and backtick spans into runs
//! - **`kinds`**: delimiter knowledge shared by all of the above
//!
//! [`convert_from_plain_text`] is the one-call path: import, sweep, inline pass.

pub mod criteria;
pub mod inline;
pub mod kinds;
pub mod rewrite;

use log::{debug, warn};

use crate::autoformat::{Autoformatter, AutoformatError, SweepReport, import_plain_text};
use crate::tree::{BlockNode, Document, DocumentAccess};

pub use criteria::{FormatKind, MarkdownCriterion, UnknownCriterion, default_catalog};
pub use inline::format_inline_runs;
pub use rewrite::{FencedCodeRule, MarkdownRewriter};

/// Knobs for one autoformat run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoformatOptions {
    /// Restart cap for the sweep; `None` runs until the document settles.
    pub max_restarts: Option<usize>,
    /// Run the inline pass after the sweep.
    pub inline_formatting: bool,
    /// Turn `---`, `***` and `___` lines into horizontal rules.
    pub horizontal_rules: bool,
    /// Criterion names (see [`FormatKind::name`]) left out of the catalog.
    pub disabled_criteria: Vec<String>,
}

impl Default for AutoformatOptions {
    fn default() -> Self {
        Self {
            max_restarts: None,
            inline_formatting: true,
            horizontal_rules: true,
            disabled_criteria: Vec::new(),
        }
    }
}

impl AutoformatOptions {
    /// The default catalog minus the disabled criteria.
    ///
    /// Unknown names are logged and ignored.
    pub fn catalog(&self) -> Vec<MarkdownCriterion> {
        let mut disabled = Vec::new();
        for name in &self.disabled_criteria {
            match name.parse::<FormatKind>() {
                Ok(kind) => disabled.push(kind),
                Err(e) => warn!("Ignoring disabled criterion: {e}"),
            }
        }
        default_catalog()
            .into_iter()
            .filter(|c| !disabled.contains(&c.kind()))
            .collect()
    }
}

/// Autoformats an existing document in place.
///
/// Runs the block sweep to its fixed point, then the inline pass when enabled.
pub fn autoformat<D>(
    document: &mut D,
    options: &AutoformatOptions,
) -> Result<SweepReport, AutoformatError>
where
    D: DocumentAccess,
{
    let catalog = options.catalog();
    let code_rule = FencedCodeRule::new();
    let factory = BlockNode::horizontal_rule;

    let mut engine =
        Autoformatter::new(&catalog, &code_rule).with_max_restarts(options.max_restarts);
    if options.horizontal_rules {
        engine = engine.with_horizontal_rule(&factory);
    }

    let report = engine.autoformat_document(document, &mut MarkdownRewriter)?;
    if options.inline_formatting {
        let spans = format_inline_runs(document, &catalog);
        debug!("Inline pass formatted {spans} spans");
    }
    Ok(report)
}

/// Imports `text` one paragraph per line and autoformats the result.
///
/// Empty input yields `Ok(None)`.
pub fn convert_from_plain_text(
    text: &str,
    options: &AutoformatOptions,
) -> Result<Option<Document>, AutoformatError> {
    let mut document = Document::new();
    if import_plain_text(&mut document, text).is_none() {
        return Ok(None);
    }
    autoformat(&mut document, options)?;
    Ok(Some(document))
}
