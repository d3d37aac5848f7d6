use serde::Serialize;

use super::{block::BlockNode, inline::InlineNode};

/// Access to a document's top-level block sequence.
///
/// The autoformat engine only ever borrows a document through this trait, so a
/// host can put its own storage behind it. Index-based access is deliberate:
/// rewrites may insert or remove blocks while a sweep is in progress.
pub trait DocumentAccess {
    fn top_level_blocks(&self) -> &[BlockNode];

    fn top_level_blocks_mut(&mut self) -> &mut Vec<BlockNode>;

    fn replace_top_level_blocks(&mut self, blocks: Vec<BlockNode>) {
        *self.top_level_blocks_mut() = blocks;
    }

    fn clear(&mut self) {
        self.top_level_blocks_mut().clear();
    }

    fn block_count(&self) -> usize {
        self.top_level_blocks().len()
    }

    fn block(&self, index: usize) -> Option<&BlockNode> {
        self.top_level_blocks().get(index)
    }
}

/// In-memory document: an ordered list of top-level blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub blocks: Vec<BlockNode>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_blocks(blocks: Vec<BlockNode>) -> Self {
        Self { blocks }
    }

    /// Builds a document of plain paragraphs, one per entry.
    pub fn from_paragraphs<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            blocks: lines
                .into_iter()
                .map(|line| BlockNode::paragraph().append(InlineNode::text_run(line)))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Renders one line per block, used by the CLI and snapshot tests.
    pub fn outline(&self) -> String {
        self.blocks
            .iter()
            .map(BlockNode::outline_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl DocumentAccess for Document {
    fn top_level_blocks(&self) -> &[BlockNode] {
        &self.blocks
    }

    fn top_level_blocks_mut(&mut self) -> &mut Vec<BlockNode> {
        &mut self.blocks
    }
}

/// A position inside one text run of one block.
///
/// # Invariants
///
/// - `child` addresses an [`InlineNode::Text`] child of block `block`
/// - `offset <= ` that run's own text length (not the block's joined text)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextNodeWithOffset {
    pub block: usize,
    pub child: usize,
    pub offset: usize,
}

impl TextNodeWithOffset {
    /// Anchors into `document`, returning `None` when the child is not a text
    /// run or the offset falls outside its text.
    pub fn new(
        document: &(impl DocumentAccess + ?Sized),
        block: usize,
        child: usize,
        offset: usize,
    ) -> Option<Self> {
        let run = document
            .block(block)?
            .children()
            .get(child)?
            .as_text_run()?;
        (offset <= run.text.len() && run.text.is_char_boundary(offset)).then_some(Self {
            block,
            child,
            offset,
        })
    }
}
