use crate::tree::{BlockNode, DocumentAccess, TextNodeWithOffset};

use super::{context::ScanningContext, error::AutoformatError};

/// One capture group of a successful match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureGroup {
    pub text: String,
    /// Byte offset of `text` within the joined block text.
    pub offset: usize,
}

/// Capture data produced by a criterion that matched.
///
/// Group 0 is the whole match. A group that did not take part in the match is
/// `None`, which keeps "matched an empty string" apart from "absent".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatchResults {
    pub groups: Vec<Option<CaptureGroup>>,
}

impl PatternMatchResults {
    pub fn group(&self, index: usize) -> Option<&CaptureGroup> {
        self.groups.get(index).and_then(Option::as_ref)
    }

    /// The whole match.
    pub fn full(&self) -> Option<&CaptureGroup> {
        self.group(0)
    }

    pub fn group_text(&self, index: usize) -> Option<&str> {
        self.group(index).map(|g| g.text.as_str())
    }
}

/// A markdown pattern rule in the catalog.
pub trait Criterion {
    /// Stable name, used in logs and to disable rules from configuration.
    fn name(&self) -> &str;

    /// Whether the pattern must start at the beginning of a paragraph.
    ///
    /// Only these criteria are probed by the block matcher.
    fn requires_paragraph_start(&self) -> bool;

    /// Tests `joined_text`, the full text of the paragraph `anchor` points into.
    fn match_paragraph(
        &self,
        joined_text: &str,
        anchor: &TextNodeWithOffset,
    ) -> Option<PatternMatchResults>;
}

/// The fixed rule used while a fenced code block is open.
pub trait CodeBlockRule<C> {
    /// Descriptor recorded on the context when the code-block path fires.
    fn criterion(&self) -> &C;

    /// Whether `text` is a fence line that can close an open code block.
    fn looks_like_code_block_boundary(&self, text: &str) -> bool;

    /// Whether a non-fence line inside an open code block belongs to it.
    fn continues_code_block(&self, _text: &str) -> bool {
        false
    }
}

/// Produces the decorator block inserted for a horizontal rule.
pub type HorizontalRuleFactory<'a> = &'a dyn Fn() -> BlockNode;

/// Performs the structural mutation for whatever the context says matched.
///
/// Changes to the number of top-level blocks are how the scan driver learns it
/// has to restart; a rewrite must only insert or remove blocks at or after the
/// block it was invoked for.
pub trait Rewrite<C> {
    fn perform_rewrite(
        &mut self,
        document: &mut dyn DocumentAccess,
        context: &mut ScanningContext<'_, C>,
        horizontal_rule: Option<HorizontalRuleFactory<'_>>,
    ) -> Result<(), AutoformatError>;
}
