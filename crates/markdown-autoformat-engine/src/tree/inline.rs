use serde::Serialize;

/// Formatting flags carried by a text run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TextFormat {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub code: bool,
}

impl TextFormat {
    /// Returns true if no flag is set.
    #[must_use]
    pub fn is_plain(self) -> bool {
        self == Self::default()
    }
}

/// A run of text sharing one format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextRun {
    pub text: String,
    pub format: TextFormat,
}

impl TextRun {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: TextFormat::default(),
        }
    }

    pub fn with_format(text: impl Into<String>, format: TextFormat) -> Self {
        Self {
            text: text.into(),
            format,
        }
    }
}

/// A child of a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InlineNode {
    Text(TextRun),
    /// Hard line break; only code blocks produce these.
    LineBreak,
}

impl InlineNode {
    pub fn text_run(text: impl Into<String>) -> Self {
        InlineNode::Text(TextRun::new(text))
    }

    pub fn is_text_run(&self) -> bool {
        matches!(self, InlineNode::Text(_))
    }

    pub fn as_text_run(&self) -> Option<&TextRun> {
        match self {
            InlineNode::Text(run) => Some(run),
            InlineNode::LineBreak => None,
        }
    }

    pub fn as_text_run_mut(&mut self) -> Option<&mut TextRun> {
        match self {
            InlineNode::Text(run) => Some(run),
            InlineNode::LineBreak => None,
        }
    }

    /// Text this node contributes to its block's text content.
    pub fn text_content(&self) -> &str {
        match self {
            InlineNode::Text(run) => &run.text,
            InlineNode::LineBreak => "\n",
        }
    }
}
