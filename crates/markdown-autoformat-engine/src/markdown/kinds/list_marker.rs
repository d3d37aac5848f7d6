/// List item markers and indentation.
pub struct ListMarker;

impl ListMarker {
    /// Columns of leading whitespace per nesting level.
    pub const INDENT_WIDTH: usize = 4;
    /// Columns a tab counts for.
    pub const TAB_WIDTH: usize = 4;

    /// Nesting depth for the whitespace before a list marker.
    pub fn indent_level(leading: &str) -> usize {
        let columns: usize = leading
            .chars()
            .map(|c| if c == '\t' { Self::TAB_WIDTH } else { 1 })
            .sum();
        columns / Self::INDENT_WIDTH
    }

    /// Whether the text inside a task box marks the item as done.
    pub fn is_checked(box_content: &str) -> bool {
        box_content.eq_ignore_ascii_case("x")
    }
}
