use log::trace;

use crate::autoformat::Criterion;
use crate::tree::{BlockKind, DocumentAccess, InlineNode, TextFormat, TextRun};

use super::criteria::{DelimitedMatch, FormatKind, MarkdownCriterion};

/// Applies the inline criteria of `catalog` to every text run of every element
/// block, code blocks excepted.
///
/// The earliest match in a run wins; equal starts go to the criterion listed
/// first. The delimited content becomes its own run with the criterion's flag
/// added and is formatted again for nested spans, except inside inline code.
///
/// Returns the number of spans formatted.
pub fn format_inline_runs<D>(document: &mut D, catalog: &[MarkdownCriterion]) -> usize
where
    D: DocumentAccess + ?Sized,
{
    let inline: Vec<&MarkdownCriterion> = catalog
        .iter()
        .filter(|c| !c.requires_paragraph_start())
        .collect();
    if inline.is_empty() {
        return 0;
    }

    let mut formatted = 0;
    for (index, block) in document.top_level_blocks_mut().iter_mut().enumerate() {
        if !block.is_element() || matches!(block.kind, BlockKind::Code(_)) {
            continue;
        }

        let before = formatted;
        let mut children = Vec::with_capacity(block.children.len());
        for child in block.children.drain(..) {
            match child {
                InlineNode::Text(run) if !run.format.code && !run.text.is_empty() => {
                    split_run(&run.text, run.format, &inline, &mut children, &mut formatted);
                }
                other => children.push(other),
            }
        }
        block.children = children;

        if formatted > before {
            trace!("Formatted {} inline spans in block {index}", formatted - before);
        }
    }
    formatted
}

fn split_run(
    text: &str,
    format: TextFormat,
    criteria: &[&MarkdownCriterion],
    out: &mut Vec<InlineNode>,
    formatted: &mut usize,
) {
    let Some((kind, span)) = earliest_match(text, criteria) else {
        if !text.is_empty() {
            out.push(InlineNode::Text(TextRun::with_format(text, format)));
        }
        return;
    };
    *formatted += 1;

    if span.start > 0 {
        out.push(InlineNode::Text(TextRun::with_format(
            &text[..span.start],
            format,
        )));
    }

    let inner = &text[span.inner_start..span.inner_end];
    let inner_format = kind.apply(format);
    if kind == FormatKind::InlineCode {
        out.push(InlineNode::Text(TextRun::with_format(inner, inner_format)));
    } else {
        split_run(inner, inner_format, criteria, out, formatted);
    }

    split_run(&text[span.end..], format, criteria, out, formatted);
}

fn earliest_match(
    text: &str,
    criteria: &[&MarkdownCriterion],
) -> Option<(FormatKind, DelimitedMatch)> {
    let mut best: Option<(FormatKind, DelimitedMatch)> = None;
    for criterion in criteria {
        if let Some(span) = criterion.find_delimited(text)
            && best.is_none_or(|(_, current)| span.start < current.start)
        {
            best = Some((criterion.kind(), span));
        }
    }
    best
}
