use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::autoformat::{CaptureGroup, Criterion, PatternMatchResults};
use crate::tree::{TextFormat, TextNodeWithOffset};

/// Which markdown construct a criterion recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    Heading,
    Quote,
    CheckList,
    UnorderedList,
    OrderedList,
    CodeFence,
    HorizontalRule,
    InlineCode,
    Bold,
    Strikethrough,
    Italic,
}

impl FormatKind {
    /// Every kind, in default catalog order.
    pub const ALL: [FormatKind; 11] = [
        FormatKind::Heading,
        FormatKind::Quote,
        FormatKind::CheckList,
        FormatKind::UnorderedList,
        FormatKind::OrderedList,
        FormatKind::CodeFence,
        FormatKind::HorizontalRule,
        FormatKind::InlineCode,
        FormatKind::Bold,
        FormatKind::Strikethrough,
        FormatKind::Italic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FormatKind::Heading => "heading",
            FormatKind::Quote => "quote",
            FormatKind::CheckList => "check_list",
            FormatKind::UnorderedList => "unordered_list",
            FormatKind::OrderedList => "ordered_list",
            FormatKind::CodeFence => "code_fence",
            FormatKind::HorizontalRule => "horizontal_rule",
            FormatKind::InlineCode => "inline_code",
            FormatKind::Bold => "bold",
            FormatKind::Strikethrough => "strikethrough",
            FormatKind::Italic => "italic",
        }
    }

    /// Block-level kinds must match at the start of a paragraph.
    pub fn requires_paragraph_start(self) -> bool {
        !matches!(
            self,
            FormatKind::InlineCode | FormatKind::Bold | FormatKind::Strikethrough | FormatKind::Italic
        )
    }

    fn pattern(self) -> &'static str {
        match self {
            FormatKind::Heading => r"^(#{1,6})\s",
            FormatKind::Quote => r"^>\s",
            FormatKind::CheckList => r"^(\s*)[-*+]\s\[([ xX])\]\s",
            FormatKind::UnorderedList => r"^(\s*)[-*+]\s",
            FormatKind::OrderedList => r"^(\s*)(\d{1,9})\.\s",
            FormatKind::CodeFence => r"^(```|~~~)\s*([\w+#.-]*)\s*$",
            FormatKind::HorizontalRule => r"^(?:\*\*\*|---|___)\s?$",
            // Inline kinds: each alternative is `(span(content))`. Underscore
            // delimiters only count outside words.
            FormatKind::InlineCode => r"(`([^`]+)`)",
            FormatKind::Bold => r"(\*\*([^*]+)\*\*)|(?:^|\W)(__([^_]+)__)(?:\W|$)",
            FormatKind::Strikethrough => r"(~~([^~]+)~~)",
            FormatKind::Italic => r"(\*([^*]+)\*)|(?:^|\W)(_([^_]+)_)(?:\W|$)",
        }
    }

    /// Adds this kind's flag to `format`; block kinds leave it unchanged.
    pub fn apply(self, format: TextFormat) -> TextFormat {
        let mut format = format;
        match self {
            FormatKind::InlineCode => format.code = true,
            FormatKind::Bold => format.bold = true,
            FormatKind::Strikethrough => format.strikethrough = true,
            FormatKind::Italic => format.italic = true,
            _ => {}
        }
        format
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown markdown criterion: {0}")]
pub struct UnknownCriterion(pub String);

impl FromStr for FormatKind {
    type Err = UnknownCriterion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormatKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownCriterion(s.to_string()))
    }
}

/// A delimited inline span found by an inline criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimitedMatch {
    /// Byte range of the whole match, delimiters included.
    pub start: usize,
    pub end: usize,
    /// Byte range of the content between the delimiters.
    pub inner_start: usize,
    pub inner_end: usize,
}

/// A regex-backed criterion for one [`FormatKind`].
#[derive(Debug, Clone)]
pub struct MarkdownCriterion {
    kind: FormatKind,
    pattern: &'static Regex,
}

/// Compiled patterns, indexed like [`FormatKind::ALL`].
fn compiled_patterns() -> &'static [Regex; 11] {
    static PATTERNS: OnceLock<[Regex; 11]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        FormatKind::ALL
            .map(|kind| Regex::new(kind.pattern()).expect("Invalid markdown criterion regex"))
    })
}

impl MarkdownCriterion {
    pub fn new(kind: FormatKind) -> Self {
        Self {
            kind,
            pattern: &compiled_patterns()[kind as usize],
        }
    }

    pub fn kind(&self) -> FormatKind {
        self.kind
    }

    /// Finds the first delimited span in `text`, for inline criteria.
    pub fn find_delimited(&self, text: &str) -> Option<DelimitedMatch> {
        let caps = self.pattern.captures(text)?;
        let mut groups = caps.iter().skip(1).flatten();
        let span = groups.next()?;
        let inner = groups.next()?;
        Some(DelimitedMatch {
            start: span.start(),
            end: span.end(),
            inner_start: inner.start(),
            inner_end: inner.end(),
        })
    }
}

impl Criterion for MarkdownCriterion {
    fn name(&self) -> &str {
        self.kind.name()
    }

    fn requires_paragraph_start(&self) -> bool {
        self.kind.requires_paragraph_start()
    }

    fn match_paragraph(
        &self,
        joined_text: &str,
        _anchor: &TextNodeWithOffset,
    ) -> Option<PatternMatchResults> {
        let caps = self.pattern.captures(joined_text)?;
        let groups = caps
            .iter()
            .map(|group| {
                group.map(|m| CaptureGroup {
                    text: m.as_str().to_string(),
                    offset: m.start(),
                })
            })
            .collect();
        Some(PatternMatchResults { groups })
    }
}

/// The default catalog: every kind in [`FormatKind::ALL`] order.
pub fn default_catalog() -> Vec<MarkdownCriterion> {
    FormatKind::ALL
        .into_iter()
        .map(MarkdownCriterion::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn anchor() -> TextNodeWithOffset {
        TextNodeWithOffset {
            block: 0,
            child: 0,
            offset: 0,
        }
    }

    /// The first paragraph-start criterion in catalog order that matches.
    fn first_block_match(text: &str) -> Option<FormatKind> {
        default_catalog()
            .into_iter()
            .filter(|c| c.requires_paragraph_start())
            .find(|c| c.match_paragraph(text, &anchor()).is_some())
            .map(|c| c.kind())
    }

    #[rstest]
    #[case("# Title", Some(FormatKind::Heading))]
    #[case("###### Six", Some(FormatKind::Heading))]
    #[case("####### Seven", None)]
    #[case("#hashtag", None)]
    #[case("> quoted", Some(FormatKind::Quote))]
    #[case("- [ ] todo", Some(FormatKind::CheckList))]
    #[case("* [x] done", Some(FormatKind::CheckList))]
    #[case("- item", Some(FormatKind::UnorderedList))]
    #[case("    + nested", Some(FormatKind::UnorderedList))]
    #[case("12. twelfth", Some(FormatKind::OrderedList))]
    #[case("```", Some(FormatKind::CodeFence))]
    #[case("```rust", Some(FormatKind::CodeFence))]
    #[case("~~~", Some(FormatKind::CodeFence))]
    #[case("---", Some(FormatKind::HorizontalRule))]
    #[case("***", Some(FormatKind::HorizontalRule))]
    #[case("___ ", Some(FormatKind::HorizontalRule))]
    #[case("-- not a rule", None)]
    #[case("plain text", None)]
    #[case("**bold** start", None)]
    fn block_criteria_in_catalog_order(#[case] text: &str, #[case] expected: Option<FormatKind>) {
        assert_eq!(first_block_match(text), expected);
    }

    #[test]
    fn captures_carry_offsets() {
        let criterion = MarkdownCriterion::new(FormatKind::OrderedList);
        let results = criterion.match_paragraph("  7. seventh", &anchor()).unwrap();
        assert_eq!(results.group_text(0), Some("  7. "));
        assert_eq!(results.group_text(1), Some("  "));
        assert_eq!(results.group(2).map(|g| (g.text.as_str(), g.offset)), Some(("7", 2)));
    }

    #[test]
    fn bare_fence_has_empty_language_group() {
        let criterion = MarkdownCriterion::new(FormatKind::CodeFence);
        let results = criterion.match_paragraph("```", &anchor()).unwrap();
        assert_eq!(results.group_text(1), Some("```"));
        assert_eq!(results.group_text(2), Some(""));
    }

    #[test]
    fn inline_criteria_do_not_require_paragraph_start() {
        let inline: Vec<FormatKind> = default_catalog()
            .iter()
            .filter(|c| !c.requires_paragraph_start())
            .map(MarkdownCriterion::kind)
            .collect();
        assert_eq!(
            inline,
            vec![
                FormatKind::InlineCode,
                FormatKind::Bold,
                FormatKind::Strikethrough,
                FormatKind::Italic
            ]
        );
    }

    #[test]
    fn find_delimited_reports_inner_range() {
        let bold = MarkdownCriterion::new(FormatKind::Bold);
        let m = bold.find_delimited("a __b__ c").unwrap();
        assert_eq!((m.start, m.end), (2, 7));
        assert_eq!((m.inner_start, m.inner_end), (4, 5));
        assert!(bold.find_delimited("no markup").is_none());
    }

    #[test]
    fn patterns_are_compiled_once_per_kind() {
        let a = MarkdownCriterion::new(FormatKind::Italic);
        let b = MarkdownCriterion::new(FormatKind::Italic);
        assert!(std::ptr::eq(a.pattern, b.pattern));
        for kind in FormatKind::ALL {
            assert_eq!(MarkdownCriterion::new(kind).pattern.as_str(), kind.pattern());
        }
    }

    #[rstest]
    #[case(FormatKind::Italic, "call my_var_name now", None)]
    #[case(FormatKind::Italic, "snake_case", None)]
    #[case(FormatKind::Italic, "an _emphasised_ word", Some((3, 15)))]
    #[case(FormatKind::Italic, "_start_ of line", Some((0, 7)))]
    #[case(FormatKind::Italic, "end of _line_", Some((7, 13)))]
    #[case(FormatKind::Italic, "a *star* inside", Some((2, 8)))]
    #[case(FormatKind::Italic, "x*y*z", Some((1, 4)))]
    #[case(FormatKind::Bold, "CONST__NAME__X", None)]
    #[case(FormatKind::Bold, "(__wrapped__)", Some((1, 12)))]
    #[case(FormatKind::InlineCode, "run `cargo` now", Some((4, 11)))]
    #[case(FormatKind::Strikethrough, "so~~gone~~", Some((2, 10)))]
    fn delimited_spans(
        #[case] kind: FormatKind,
        #[case] text: &str,
        #[case] expected: Option<(usize, usize)>,
    ) {
        let span = MarkdownCriterion::new(kind)
            .find_delimited(text)
            .map(|m| (m.start, m.end));
        assert_eq!(span, expected);
    }

    #[test]
    fn kinds_round_trip_through_names() {
        for kind in FormatKind::ALL {
            assert_eq!(kind.name().parse::<FormatKind>(), Ok(kind));
        }
        assert_eq!(
            "underline".parse::<FormatKind>(),
            Err(UnknownCriterion("underline".to_string()))
        );
    }

    #[test]
    fn apply_sets_inline_flags_only() {
        let plain = TextFormat::default();
        assert!(FormatKind::Bold.apply(plain).bold);
        assert!(FormatKind::InlineCode.apply(plain).code);
        assert_eq!(FormatKind::Heading.apply(plain), plain);
    }
}
