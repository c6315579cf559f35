//! Shared utility functions.

/// Shorten `s` to at most `max_chars` characters for log output, appending
/// `…` when anything was cut.
pub fn preview(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_short_is_unchanged() {
        assert_eq!(preview("hi", 10), "hi");
    }

    #[test]
    fn preview_truncates_with_ellipsis() {
        assert_eq!(preview("hello world", 6), "hello…");
    }

    #[test]
    fn preview_counts_chars_not_bytes() {
        assert_eq!(preview("¿Cuántos portátiles?", 4), "¿Cu…");
    }

    #[test]
    fn preview_empty() {
        assert_eq!(preview("", 3), "");
    }
}
