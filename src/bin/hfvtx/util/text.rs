/// Greedy word wrap to at most `width` characters per line.
///
/// Always returns at least one (possibly empty) line.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    for word in text.split_whitespace() {
        match lines.last_mut() {
            Some(line) if line.chars().count() + 1 + word.chars().count() <= width => {
                line.push(' ');
                line.push_str(word);
            }
            _ => lines.push(word.to_string()),
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Shortens `s` to at most `max_len` characters, marking a cut with `…`.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len == 0 {
        return String::new();
    }

    let mut out: String = s.chars().take(max_len - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_keeps_short_text_on_one_line() {
        assert_eq!(wrap("close pair", 20), vec!["close pair"]);
    }

    #[test]
    fn wrap_breaks_between_words() {
        assert_eq!(
            wrap("track helix straight line", 12),
            vec!["track helix", "straight", "line"]
        );
    }

    #[test]
    fn wrap_of_blank_text_is_one_empty_line() {
        assert_eq!(wrap("   ", 10), vec![String::new()]);
    }

    #[test]
    fn truncate_leaves_fitting_text_alone() {
        assert_eq!(truncate("vertex", 6), "vertex");
    }

    #[test]
    fn truncate_marks_the_cut() {
        assert_eq!(truncate("pointing angle", 8), "pointin…");
        assert_eq!(truncate("θ-ψ-φ-λ", 4), "θ-ψ…");
        assert_eq!(truncate("abc", 0), "");
    }
}
