/// First row to draw so that `selected_index` stays on screen.
pub const fn scroll_offset(
    total_rows: usize,
    max_visible_rows: usize,
    selected_index: usize,
) -> usize {
    if total_rows <= max_visible_rows || max_visible_rows == 0 {
        return 0;
    }

    if selected_index >= max_visible_rows {
        let offset = selected_index + 1 - max_visible_rows;
        let last_page = total_rows - max_visible_rows;
        return if offset > last_page { last_page } else { offset };
    }

    0
}

/// Cuts `text` to `width` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_lists_never_scroll() {
        assert_eq!(scroll_offset(5, 10, 4), 0);
        assert_eq!(scroll_offset(5, 0, 4), 0);
    }

    #[test]
    fn selection_below_the_fold_scrolls_into_view() {
        assert_eq!(scroll_offset(30, 10, 9), 0);
        assert_eq!(scroll_offset(30, 10, 10), 1);
        assert_eq!(scroll_offset(30, 10, 29), 20);
        assert_eq!(scroll_offset(30, 10, 50), 20);
    }

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(truncate("Kahwabar", 20), "Kahwabar");
        assert_eq!(truncate("Tripoli Train Station", 8), "Tripoli…");
        assert_eq!(truncate("محطة قطار طرابلس", 5), "محطة…");
        assert_eq!(truncate("abc", 0), "");
    }
}
