use log::trace;

use crate::tree::{DocumentAccess, InlineNode, TextNodeWithOffset};

use super::{
    context::ScanningContext,
    criteria::{Criterion, Rewrite},
    driver::Autoformatter,
    error::AutoformatError,
};

pub(crate) const EXPECT_TEXT_ONLY_PARAGRAPH: &str = "paragraph expected to contain only text nodes";

impl<'a, C: Criterion> Autoformatter<'a, C> {
    /// Tries every applicable rule against the block at `index`.
    ///
    /// Inside an open code block the code-block rule gets the first look and,
    /// if it claims the block, nothing else is tried. Otherwise a non-empty
    /// paragraph is probed with each paragraph-start criterion in catalog order.
    /// A match does not stop the probing: the remaining criteria still run
    /// against whatever now sits at `index`, as long as it is still a
    /// paragraph and the block count is unchanged.
    ///
    /// Returns the number of rewrites invoked.
    pub(crate) fn try_convert_block<D, R>(
        &self,
        context: &mut ScanningContext<'a, C>,
        document: &mut D,
        index: usize,
        rewrite: &mut R,
    ) -> Result<usize, AutoformatError>
    where
        D: DocumentAccess,
        R: Rewrite<C>,
    {
        let Some(block) = document.block(index) else {
            return Ok(0);
        };
        let text_content = block.text_content();
        let is_candidate_paragraph =
            block.is_paragraph() && !text_content.is_empty() && !block.children().is_empty();
        context.block_index = Some(index);

        let rule = self.code_block;
        if context.is_within_code_block
            && (rule.looks_like_code_block_boundary(&text_content)
                || rule.continues_code_block(&text_content))
        {
            context.markdown_criteria = Some(rule.criterion());
            context.joined_text = Some(text_content);
            trace!("Block {index} continues an open code block");
            rewrite.perform_rewrite(document, context, self.horizontal_rule)?;
            return Ok(1);
        }

        if !is_candidate_paragraph {
            return Ok(0);
        }

        let count = document.block_count();
        let mut rewrites = 0;
        let catalog: &'a [C] = self.catalog;
        for criteria in catalog {
            if !criteria.requires_paragraph_start() {
                continue;
            }

            let Some(paragraph) = document.block(index) else {
                continue;
            };
            if document.block_count() != count
                || !paragraph.is_paragraph()
                || paragraph.children().is_empty()
            {
                continue;
            }
            if !matches!(paragraph.first_child(), Some(InlineNode::Text(_))) {
                return Err(AutoformatError::InvariantViolated {
                    block_index: index,
                    expectation: EXPECT_TEXT_ONLY_PARAGRAPH,
                });
            }

            let anchor = TextNodeWithOffset {
                block: index,
                child: 0,
                offset: 0,
            };
            let joined_text = paragraph.text_content();
            context.text_node_with_offset = Some(anchor);
            let results = criteria.match_paragraph(&joined_text, &anchor);
            context.joined_text = Some(joined_text);

            if let Some(results) = results {
                trace!("Criterion '{}' matched block {index}", criteria.name());
                context.markdown_criteria = Some(criteria);
                context.pattern_match_results = Some(results);
                rewrite.perform_rewrite(document, context, self.horizontal_rule)?;
                rewrites += 1;
            }
        }

        Ok(rewrites)
    }
}
