use log::{debug, trace};

use crate::autoformat::{
    AutoformatError, CodeBlockRule, HorizontalRuleFactory, PatternMatchResults, Rewrite,
    ScanningContext,
};
use crate::tree::{
    BlockKind, BlockNode, CodeBlock, DocumentAccess, HeadingLevel, InlineNode, ListItem,
    ListType, TextNodeWithOffset,
};

use super::{
    criteria::{FormatKind, MarkdownCriterion},
    kinds::{CodeFence, FenceKind, ListMarker},
};

/// The fenced-code rule used while a fence is open.
///
/// Inside an open fence every line belongs to the code block: a bare fence line
/// is a boundary (it may close the block), anything else is a continuation.
#[derive(Debug, Clone)]
pub struct FencedCodeRule {
    criterion: MarkdownCriterion,
}

impl FencedCodeRule {
    pub fn new() -> Self {
        Self {
            criterion: MarkdownCriterion::new(FormatKind::CodeFence),
        }
    }
}

impl Default for FencedCodeRule {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeBlockRule<MarkdownCriterion> for FencedCodeRule {
    fn criterion(&self) -> &MarkdownCriterion {
        &self.criterion
    }

    fn looks_like_code_block_boundary(&self, text: &str) -> bool {
        CodeFence::is_closer(text)
    }

    fn continues_code_block(&self, _text: &str) -> bool {
        true
    }
}

/// Applies matched [`MarkdownCriterion`]s to the document.
///
/// Block kinds replace the paragraph in place, keeping its inline children
/// minus the matched marker. Horizontal rules insert a decorator before the
/// paragraph. Code fences build a code block line by line, removing each
/// absorbed paragraph at the current index.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRewriter;

impl Rewrite<MarkdownCriterion> for MarkdownRewriter {
    fn perform_rewrite(
        &mut self,
        document: &mut dyn DocumentAccess,
        context: &mut ScanningContext<'_, MarkdownCriterion>,
        horizontal_rule: Option<HorizontalRuleFactory<'_>>,
    ) -> Result<(), AutoformatError> {
        let Some(criterion) = context.markdown_criteria else {
            return Ok(());
        };
        let index = context
            .block_index
            .ok_or_else(|| AutoformatError::rewrite(0, "no block under evaluation"))?;
        trace!("Rewriting block {index} as {}", criterion.kind());

        let kind = criterion.kind();
        let on_code_line = kind == FormatKind::CodeFence && context.is_within_code_block;
        if kind.requires_paragraph_start()
            && !on_code_line
            && !marker_is_plain(document, context, index)?
        {
            trace!("Block {index} starts inside an inline code span, leaving it as is");
            return Ok(());
        }

        match kind {
            FormatKind::CodeFence => rewrite_code_fence(document, context, index),
            FormatKind::HorizontalRule => match horizontal_rule {
                Some(factory) => insert_horizontal_rule(document, context, index, factory),
                None => Ok(()),
            },
            FormatKind::InlineCode
            | FormatKind::Bold
            | FormatKind::Strikethrough
            | FormatKind::Italic => Ok(()),
            kind => {
                let results = match_results(context, index)?;
                let new_kind = block_kind_for(kind, results, index)?;
                replace_paragraph(document, context, index, new_kind)
            }
        }
    }
}

fn match_results<'c>(
    context: &'c ScanningContext<'_, MarkdownCriterion>,
    index: usize,
) -> Result<&'c PatternMatchResults, AutoformatError> {
    context
        .pattern_match_results
        .as_ref()
        .ok_or_else(|| AutoformatError::rewrite(index, "criterion recorded without match results"))
}

fn anchor(
    context: &ScanningContext<'_, MarkdownCriterion>,
    index: usize,
) -> Result<TextNodeWithOffset, AutoformatError> {
    context
        .text_node_with_offset
        .ok_or_else(|| AutoformatError::rewrite(index, "paragraph rewrite without a text anchor"))
}

fn block_kind_for(
    kind: FormatKind,
    results: &PatternMatchResults,
    index: usize,
) -> Result<BlockKind, AutoformatError> {
    let indent = || ListMarker::indent_level(results.group_text(1).unwrap_or_default());
    let block_kind = match kind {
        FormatKind::Heading => {
            let marker = results.group_text(1).unwrap_or_default();
            let level = HeadingLevel::from_marker_len(marker.len()).ok_or_else(|| {
                AutoformatError::rewrite(index, format!("invalid heading marker '{marker}'"))
            })?;
            BlockKind::Heading { level }
        }
        FormatKind::Quote => BlockKind::Quote,
        FormatKind::CheckList => BlockKind::ListItem(ListItem {
            list_type: ListType::Check {
                checked: ListMarker::is_checked(results.group_text(2).unwrap_or_default()),
            },
            indent: indent(),
        }),
        FormatKind::UnorderedList => BlockKind::ListItem(ListItem {
            list_type: ListType::Bullet,
            indent: indent(),
        }),
        FormatKind::OrderedList => {
            let digits = results.group_text(2).unwrap_or_default();
            let start = digits.parse::<u64>().map_err(|e| {
                AutoformatError::rewrite(index, format!("invalid list number '{digits}': {e}"))
            })?;
            BlockKind::ListItem(ListItem {
                list_type: ListType::Number { start },
                indent: indent(),
            })
        }
        other => {
            return Err(AutoformatError::rewrite(
                index,
                format!("{other} does not produce a block"),
            ));
        }
    };
    Ok(block_kind)
}

fn marker_len(
    context: &ScanningContext<'_, MarkdownCriterion>,
    index: usize,
) -> Result<usize, AutoformatError> {
    Ok(match_results(context, index)?
        .full()
        .map(|g| g.text.len())
        .unwrap_or(0))
}

fn replace_paragraph(
    document: &mut dyn DocumentAccess,
    context: &ScanningContext<'_, MarkdownCriterion>,
    index: usize,
    kind: BlockKind,
) -> Result<(), AutoformatError> {
    let anchor = anchor(context, index)?;
    let len = marker_len(context, index)?;
    let block = block_at(document, anchor.block)?;

    let mut children = std::mem::take(&mut block.children);
    strip_marker(&mut children, &anchor, len);
    *block = BlockNode { kind, children };
    Ok(())
}

fn insert_horizontal_rule(
    document: &mut dyn DocumentAccess,
    context: &ScanningContext<'_, MarkdownCriterion>,
    index: usize,
    factory: HorizontalRuleFactory<'_>,
) -> Result<(), AutoformatError> {
    let anchor = anchor(context, index)?;
    let len = marker_len(context, index)?;
    let block = block_at(document, anchor.block)?;
    strip_marker(&mut block.children, &anchor, len);

    // The emptied paragraph stays after the rule as the line to keep typing on.
    document.top_level_blocks_mut().insert(anchor.block, factory());
    Ok(())
}

fn rewrite_code_fence(
    document: &mut dyn DocumentAccess,
    context: &mut ScanningContext<'_, MarkdownCriterion>,
    index: usize,
) -> Result<(), AutoformatError> {
    if !context.is_within_code_block {
        let results = match_results(context, index)?;
        let fence = results
            .group_text(1)
            .and_then(CodeFence::sig)
            .ok_or_else(|| AutoformatError::rewrite(index, "code fence without a fence marker"))?;
        let language = results
            .group_text(2)
            .filter(|lang| !lang.is_empty())
            .map(str::to_string);

        let block = block_at(document, index)?;
        *block = BlockNode::new(BlockKind::Code(CodeBlock::opened(language, fence)));
        context.is_within_code_block = true;
        return Ok(());
    }

    let line = context.joined_text.clone().unwrap_or_default();
    let Some((code_index, fence)) = open_code_block_before(document, index) else {
        debug!("No open code block before block {index}, leaving the fence");
        context.is_within_code_block = false;
        return Ok(());
    };

    let code_block = block_at(document, code_index)?;
    if CodeFence::closes(fence, &line) {
        if let BlockKind::Code(code) = &mut code_block.kind {
            code.open_fence = None;
        }
        context.is_within_code_block = false;
    } else {
        append_code_line(code_block, &line);
    }

    document.top_level_blocks_mut().remove(index);
    Ok(())
}

/// The nearest element block before `index`, if it is a code block still
/// waiting for its closing fence. Decorators in between are skipped.
fn open_code_block_before(
    document: &dyn DocumentAccess,
    index: usize,
) -> Option<(usize, FenceKind)> {
    let blocks = document.top_level_blocks();
    let (code_index, block) = blocks
        .get(..index)?
        .iter()
        .enumerate()
        .rev()
        .find(|(_, block)| block.is_element())?;
    match &block.kind {
        BlockKind::Code(code) => code.open_fence.map(|fence| (code_index, fence)),
        _ => None,
    }
}

/// Whether the matched marker lies in plain text. A marker that reaches into
/// an inline code span is code content, not markup.
fn marker_is_plain(
    document: &dyn DocumentAccess,
    context: &ScanningContext<'_, MarkdownCriterion>,
    index: usize,
) -> Result<bool, AutoformatError> {
    let anchor = anchor(context, index)?;
    let mut remaining = marker_len(context, index)?;
    let block = document
        .block(anchor.block)
        .ok_or_else(|| AutoformatError::rewrite(index, "block index out of range"))?;

    let mut offset = anchor.offset;
    for child in block.children().iter().skip(anchor.child) {
        if remaining == 0 {
            break;
        }
        let take = child
            .text_content()
            .len()
            .saturating_sub(offset)
            .min(remaining);
        if take > 0 && child.as_text_run().is_some_and(|run| run.format.code) {
            return Ok(false);
        }
        remaining -= take;
        offset = 0;
    }
    Ok(true)
}

fn append_code_line(block: &mut BlockNode, line: &str) {
    let BlockNode { kind, children } = block;
    if let BlockKind::Code(code) = kind {
        if code.line_count > 0 {
            children.push(InlineNode::LineBreak);
        }
        if !line.is_empty() {
            children.push(InlineNode::text_run(line));
        }
        code.line_count += 1;
    }
}

fn block_at(
    document: &mut dyn DocumentAccess,
    index: usize,
) -> Result<&mut BlockNode, AutoformatError> {
    document
        .top_level_blocks_mut()
        .get_mut(index)
        .ok_or_else(|| AutoformatError::rewrite(index, "block index out of range"))
}

/// Removes `len` bytes of marker text starting at `anchor`, then drops text
/// runs the removal left empty.
fn strip_marker(children: &mut Vec<InlineNode>, anchor: &TextNodeWithOffset, len: usize) {
    let mut remaining = len;
    let mut offset = anchor.offset;
    for child in children.iter_mut().skip(anchor.child) {
        if remaining == 0 {
            break;
        }
        match child.as_text_run_mut() {
            Some(run) => {
                let start = offset.min(run.text.len());
                let take = (run.text.len() - start).min(remaining);
                run.text.replace_range(start..start + take, "");
                remaining -= take;
            }
            None => remaining -= child.text_content().len().min(remaining),
        }
        offset = 0;
    }
    children.retain(|child| !matches!(child, InlineNode::Text(run) if run.text.is_empty()));
}
