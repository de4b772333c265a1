//! Text processing utilities.

/// Default number of characters shown when previewing long content.
pub const PREVIEW_CHARS: usize = 200;

/// Truncate `content` to at most `max_chars` characters, marking the cut with `...`.
pub fn preview(content: &str, max_chars: usize) -> String {
    let truncated: String = content.chars().take(max_chars).collect();
    if content.chars().count() > max_chars {
        format!("{}...", truncated)
    } else {
        truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview() {
        assert_eq!(preview("", 10), "");
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("exactly10!", 10), "exactly10!");
        assert_eq!(preview("a longer sentence", 8), "a longer...");
        assert_eq!(preview("héllo wörld", 5), "héllo...");
    }
}
