use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FenceKind {
    Backticks,
    Tildes,
}

/// Fenced code block delimiters.
///
/// All fence syntax knowledge lives here; criteria, the code-block rule and the
/// rewriter ask this type instead of matching on backticks themselves.
pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";
    pub const TILDES: &'static str = "~~~";

    /// The fence kind a line opens or closes with, if it starts with a fence.
    pub fn sig(line: &str) -> Option<FenceKind> {
        let t = line.trim_end_matches(['\r', '\n']);
        if t.starts_with(Self::BACKTICKS) {
            Some(FenceKind::Backticks)
        } else if t.starts_with(Self::TILDES) {
            Some(FenceKind::Tildes)
        } else {
            None
        }
    }

    /// The info string after the fence, trimmed; `None` when absent.
    pub fn info(line: &str) -> Option<&str> {
        let kind = Self::sig(line)?;
        let delimiter = match kind {
            FenceKind::Backticks => Self::BACKTICKS,
            FenceKind::Tildes => Self::TILDES,
        };
        let info = line[delimiter.len()..].trim();
        (!info.is_empty()).then_some(info)
    }

    /// A bare fence line (no info string) that could close an open block.
    pub fn is_closer(line: &str) -> bool {
        Self::sig(line).is_some() && Self::info(line).is_none()
    }

    /// Whether `line` closes a block opened with `kind`.
    pub fn closes(kind: FenceKind, line: &str) -> bool {
        Self::is_closer(line) && Self::sig(line) == Some(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_backtick_fence() {
        assert_eq!(CodeFence::sig("```rust"), Some(FenceKind::Backticks));
    }

    #[test]
    fn detect_tilde_fence() {
        assert_eq!(CodeFence::sig("~~~"), Some(FenceKind::Tildes));
    }

    #[test]
    fn no_fence() {
        assert_eq!(CodeFence::sig("hello"), None);
        assert_eq!(CodeFence::sig("``"), None);
    }

    #[test]
    fn info_string_is_the_language() {
        assert_eq!(CodeFence::info("```rust"), Some("rust"));
        assert_eq!(CodeFence::info("~~~ python "), Some("python"));
        assert_eq!(CodeFence::info("```"), None);
        assert_eq!(CodeFence::info("plain"), None);
    }

    #[test]
    fn closes_matching_fence() {
        assert!(CodeFence::closes(FenceKind::Backticks, "```"));
        assert!(CodeFence::closes(FenceKind::Tildes, "~~~  "));
    }

    #[test]
    fn does_not_close_mismatched_fence() {
        assert!(!CodeFence::closes(FenceKind::Backticks, "~~~"));
        assert!(!CodeFence::closes(FenceKind::Tildes, "```"));
    }

    #[test]
    fn fence_with_info_string_never_closes() {
        assert!(!CodeFence::closes(FenceKind::Backticks, "```rust"));
        assert!(!CodeFence::is_closer("```rust"));
    }
}
