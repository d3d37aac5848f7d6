use std::fmt;

use serde::Serialize;

use super::inline::InlineNode;
use crate::markdown::kinds::FenceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    /// Maps a run of `#` markers to a level; only 1 through 6 are headings.
    pub fn from_marker_len(len: usize) -> Option<Self> {
        match len {
            1 => Some(Self::H1),
            2 => Some(Self::H2),
            3 => Some(Self::H3),
            4 => Some(Self::H4),
            5 => Some(Self::H5),
            6 => Some(Self::H6),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8 + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "list", rename_all = "snake_case")]
pub enum ListType {
    Bullet,
    Number { start: u64 },
    Check { checked: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub list_type: ListType,
    /// Nesting depth derived from the leading whitespace of the source line.
    pub indent: usize,
}

/// A code block under construction or complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    pub language: Option<String>,
    /// Fence that opened this block while it is still waiting for its closer.
    pub open_fence: Option<FenceKind>,
    /// Number of source lines absorbed so far (blank lines included).
    pub line_count: usize,
}

impl CodeBlock {
    pub fn opened(language: Option<String>, fence: FenceKind) -> Self {
        Self {
            language,
            open_fence: Some(fence),
            line_count: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open_fence.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockKind {
    Paragraph,
    Heading { level: HeadingLevel },
    Quote,
    ListItem(ListItem),
    Code(CodeBlock),
    /// Decorator block: has no children and is not a structural element.
    HorizontalRule,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::Paragraph => write!(f, "paragraph"),
            BlockKind::Heading { level } => write!(f, "heading(h{})", level.as_u8()),
            BlockKind::Quote => write!(f, "quote"),
            BlockKind::ListItem(item) => {
                let list = match item.list_type {
                    ListType::Bullet => "bullet".to_string(),
                    ListType::Number { start } => format!("number {start}"),
                    ListType::Check { checked: true } => "check [x]".to_string(),
                    ListType::Check { checked: false } => "check [ ]".to_string(),
                };
                if item.indent > 0 {
                    write!(f, "list-item({list}, indent {})", item.indent)
                } else {
                    write!(f, "list-item({list})")
                }
            }
            BlockKind::Code(code) => {
                let open = if code.is_open() { ", open" } else { "" };
                match &code.language {
                    Some(lang) => write!(f, "code({lang}{open})"),
                    None => write!(f, "code(plain{open})"),
                }
            }
            BlockKind::HorizontalRule => write!(f, "horizontal-rule"),
        }
    }
}

/// A top-level block of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockNode {
    pub kind: BlockKind,
    pub children: Vec<InlineNode>,
}

impl BlockNode {
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    pub fn paragraph() -> Self {
        Self::new(BlockKind::Paragraph)
    }

    pub fn horizontal_rule() -> Self {
        Self::new(BlockKind::HorizontalRule)
    }

    /// Appends a child and returns the block, for building trees inline.
    #[must_use]
    pub fn append(mut self, child: InlineNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(&self) -> &[InlineNode] {
        &self.children
    }

    pub fn first_child(&self) -> Option<&InlineNode> {
        self.children.first()
    }

    pub fn is_paragraph(&self) -> bool {
        matches!(self.kind, BlockKind::Paragraph)
    }

    /// Structural elements own inline children; decorators do not.
    pub fn is_element(&self) -> bool {
        !matches!(self.kind, BlockKind::HorizontalRule)
    }

    pub fn text_content(&self) -> String {
        self.children.iter().map(InlineNode::text_content).collect()
    }

    /// One outline line: kind, text, and any formatted runs.
    pub fn outline_line(&self) -> String {
        if !self.is_element() {
            return self.kind.to_string();
        }
        let mut line = format!("{} {:?}", self.kind, self.text_content());
        let formatted: Vec<String> = self
            .children
            .iter()
            .filter_map(InlineNode::as_text_run)
            .filter(|run| !run.format.is_plain())
            .map(|run| {
                let mut flags = Vec::new();
                if run.format.bold {
                    flags.push("bold");
                }
                if run.format.italic {
                    flags.push("italic");
                }
                if run.format.strikethrough {
                    flags.push("strikethrough");
                }
                if run.format.code {
                    flags.push("code");
                }
                format!("{}:{:?}", flags.join("+"), run.text)
            })
            .collect();
        if !formatted.is_empty() {
            line.push_str(&format!(" [{}]", formatted.join(", ")));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::inline::{TextFormat, TextRun};

    #[test]
    fn heading_levels_stop_at_six() {
        assert_eq!(HeadingLevel::from_marker_len(1), Some(HeadingLevel::H1));
        assert_eq!(HeadingLevel::from_marker_len(6), Some(HeadingLevel::H6));
        assert_eq!(HeadingLevel::from_marker_len(0), None);
        assert_eq!(HeadingLevel::from_marker_len(7), None);
        assert_eq!(HeadingLevel::H3.as_u8(), 3);
    }

    #[test]
    fn text_content_joins_children() {
        let block = BlockNode::paragraph()
            .append(InlineNode::text_run("one"))
            .append(InlineNode::LineBreak)
            .append(InlineNode::text_run("two"));
        assert_eq!(block.text_content(), "one\ntwo");
    }

    #[test]
    fn horizontal_rule_is_not_an_element() {
        assert!(!BlockNode::horizontal_rule().is_element());
        assert!(BlockNode::paragraph().is_element());
        assert!(BlockNode::new(BlockKind::Quote).is_element());
    }

    #[test]
    fn outline_line_lists_formatted_runs() {
        let bold = TextFormat {
            bold: true,
            ..TextFormat::default()
        };
        let block = BlockNode::paragraph()
            .append(InlineNode::text_run("a "))
            .append(InlineNode::Text(TextRun::with_format("b", bold)));
        assert_eq!(block.outline_line(), r#"paragraph "a b" [bold:"b"]"#);
    }

    #[test]
    fn outline_line_for_list_items() {
        let block = BlockNode::new(BlockKind::ListItem(ListItem {
            list_type: ListType::Number { start: 3 },
            indent: 1,
        }))
        .append(InlineNode::text_run("third"));
        assert_eq!(block.outline_line(), r#"list-item(number 3, indent 1) "third""#);
    }
}
