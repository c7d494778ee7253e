//! String utilities for the domain layer.

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// Uses byte length for max_len but ensures truncation occurs at valid
/// UTF-8 character boundaries.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_multibyte() {
        // 'é' is 2 bytes, 'ç' is 2 bytes
        assert_eq!(truncate("Olá, guerreiro", 30), "Olá, guerreiro");
        // max_len=6 -> target=3 -> byte 3 is inside 'á' -> back to 2
        assert_eq!(truncate("Olá, guerreiro", 6), "Ol...");
    }

    #[test]
    fn test_truncate_emoji() {
        // Emojis are 4 bytes each
        // max_len=10 -> target=7 -> back to char boundary at 4
        assert_eq!(truncate("🐉🛡🗡", 10), "🐉...");
    }
}
