use crate::tree::TextNodeWithOffset;

use super::criteria::PatternMatchResults;

/// Mutable state of one autoformat sweep.
///
/// Only `is_within_code_block` survives from one block to the next; everything
/// else describes the block currently being evaluated and is cleared by
/// [`ScanningContext::reset`] after every block, matched or not.
#[derive(Debug)]
pub struct ScanningContext<'a, C> {
    /// An opening fence has been seen and its closing fence has not.
    pub is_within_code_block: bool,
    /// The criterion that fired for the current block.
    pub markdown_criteria: Option<&'a C>,
    /// Captures produced by `markdown_criteria` against `joined_text`.
    pub pattern_match_results: Option<PatternMatchResults>,
    pub text_node_with_offset: Option<TextNodeWithOffset>,
    pub joined_text: Option<String>,
    /// Index of the block under evaluation.
    pub block_index: Option<usize>,
}

impl<'a, C> ScanningContext<'a, C> {
    pub fn new() -> Self {
        Self {
            is_within_code_block: false,
            markdown_criteria: None,
            pattern_match_results: None,
            text_node_with_offset: None,
            joined_text: None,
            block_index: None,
        }
    }

    /// Clears the per-block fields, keeping the code-block flag.
    pub fn reset(&mut self) {
        self.markdown_criteria = None;
        self.pattern_match_results = None;
        self.text_node_with_offset = None;
        self.joined_text = None;
        self.block_index = None;
    }
}

impl<C> Default for ScanningContext<'_, C> {
    fn default() -> Self {
        Self::new()
    }
}
