use crate::tree::{BlockNode, Document, DocumentAccess, InlineNode};

/// Replaces the document's blocks with one plain paragraph per line of `text`.
///
/// No markup is interpreted. Empty input imports nothing: the document is left
/// untouched and `None` is returned. Lines are split on `\n` with standard
/// split semantics, so a trailing line break yields a trailing empty paragraph.
///
/// Unlike a raw split, a `\r` left over from CRLF input is dropped from its
/// line so that CRLF and LF text import to the same paragraphs. The segment
/// count is unaffected.
pub fn import_plain_text<'d, D: DocumentAccess>(
    document: &'d mut D,
    text: &str,
) -> Option<&'d mut D> {
    if text.is_empty() {
        return None;
    }

    let blocks: Vec<BlockNode> = text
        .split('\n')
        .map(|line| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            BlockNode::paragraph().append(InlineNode::text_run(line))
        })
        .collect();

    log::trace!("Importing {} lines of plain text", blocks.len());
    document.clear();
    document.replace_top_level_blocks(blocks);
    Some(document)
}

impl Document {
    /// Builds a fresh document from plain text; see [`import_plain_text`].
    pub fn from_plain_text(text: &str) -> Option<Self> {
        let mut document = Document::new();
        import_plain_text(&mut document, text)?;
        Some(document)
    }
}
