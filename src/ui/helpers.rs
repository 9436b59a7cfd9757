//! Utility helper functions for the UI module.

use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::Terminal;

/// Fill an entire area with a background color
pub fn fill_area(buf: &mut Buffer, area: Rect, color: Color) {
    let style = Style::default().bg(color);
    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            buf.set_string(x, y, " ", style);
        }
    }
}

/// Truncate or pad a string to exactly the given width
pub fn truncate_or_pad(s: &str, width: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() >= width {
        chars[..width].iter().collect()
    } else {
        let mut result: String = chars.into_iter().collect();
        result.push_str(&" ".repeat(width - result.len()));
        result
    }
}

/// Set up the terminal for TUI mode
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal mode
pub fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    Ok(())
}

/// Strip terminal control sequences from remote text before display.
///
/// ratatui spans never interpret text as markup, so comment content is
/// inert by construction; this closes the remaining channel of raw
/// control characters reaching the terminal. Newlines survive, tabs
/// become spaces.
pub fn sanitize_text(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\n' => Some('\n'),
            '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

/// Format a comment timestamp as "Jan 5, 2024". Unparseable input is
/// shown as-is rather than dropped.
pub fn format_comment_date(raw: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return dt.format("%b %-d, %Y").to_string();
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return dt.format("%b %-d, %Y").to_string();
    }
    raw.to_string()
}

/// Format time as relative (e.g., "2h ago", "3d ago")
pub fn format_relative_time(iso_time: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(iso_time)
        .map(|dt| {
            let now = chrono::Utc::now();
            let diff = now.signed_duration_since(dt);
            if diff.num_hours() < 1 {
                format!("{}m ago", diff.num_minutes().max(0))
            } else if diff.num_days() < 1 {
                format!("{}h ago", diff.num_hours())
            } else {
                format!("{}d ago", diff.num_days())
            }
        })
        .unwrap_or_else(|_| iso_time.to_string())
}

/// Character-based text wrapping - breaks at width boundary
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut result = Vec::new();

    for line in text.split('\n') {
        if line.is_empty() {
            result.push(String::new());
            continue;
        }

        let chars: Vec<char> = line.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            let end = (i + width).min(chars.len());
            let wrapped_line: String = chars[i..end].iter().collect();
            result.push(wrapped_line);
            i = end;
        }
    }

    if result.is_empty() {
        result.push(String::new());
    }

    result
}

/// Branch prefix for a thread item ("├─ ", "└─ " plus ancestor bars).
/// Top-level comments render flush, so the root level draws no bars.
pub fn thread_prefix(depth: usize, is_last: bool, ancestors_last: &[bool]) -> String {
    if depth == 0 {
        return String::new();
    }

    let mut prefix = String::new();
    for &ancestor_is_last in ancestors_last.iter().skip(1) {
        prefix.push_str(if ancestor_is_last { "   " } else { "│  " });
    }

    prefix.push_str(if is_last { "└─ " } else { "├─ " });
    prefix
}

/// Continuation prefix for an item's wrapped content lines, keeping the
/// sibling bars aligned under the branch
pub fn continuation_prefix(depth: usize, is_last: bool, ancestors_last: &[bool]) -> String {
    if depth == 0 {
        return String::new();
    }

    let mut prefix = String::new();
    for &ancestor_is_last in ancestors_last.iter().skip(1) {
        prefix.push_str(if ancestor_is_last { "   " } else { "│  " });
    }

    prefix.push_str(if is_last { "   " } else { "│  " });
    prefix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_plain_markup_text() {
        // Markup is inert text in the terminal; it must survive verbatim
        assert_eq!(
            sanitize_text("<script>x</script>"),
            "<script>x</script>"
        );
    }

    #[test]
    fn test_sanitize_strips_escape_sequences() {
        assert_eq!(sanitize_text("red\x1b[31mtext"), "redtext");
        assert_eq!(sanitize_text("\x07beep\r"), "beep");
    }

    #[test]
    fn test_sanitize_keeps_newlines_and_expands_tabs() {
        assert_eq!(sanitize_text("a\nb\tc"), "a\nb c");
    }

    #[test]
    fn test_format_comment_date_rfc3339() {
        assert_eq!(format_comment_date("2024-01-05T10:30:00Z"), "Jan 5, 2024");
        assert_eq!(
            format_comment_date("2023-11-28T00:00:00+02:00"),
            "Nov 28, 2023"
        );
    }

    #[test]
    fn test_format_comment_date_naive() {
        assert_eq!(format_comment_date("2024-01-05 10:30:00"), "Jan 5, 2024");
    }

    #[test]
    fn test_format_comment_date_unparseable_passthrough() {
        assert_eq!(format_comment_date("yesterday"), "yesterday");
    }

    #[test]
    fn test_wrap_text_basic() {
        assert_eq!(wrap_text("hello world", 5), vec!["hello", " worl", "d"]);
    }

    #[test]
    fn test_wrap_text_preserves_blank_lines() {
        assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
    }

    #[test]
    fn test_wrap_text_empty() {
        assert_eq!(wrap_text("", 10), vec![""]);
    }

    #[test]
    fn test_truncate_or_pad_truncate() {
        assert_eq!(truncate_or_pad("hello world", 5), "hello");
    }

    #[test]
    fn test_truncate_or_pad_pad() {
        assert_eq!(truncate_or_pad("hi", 5), "hi   ");
    }

    #[test]
    fn test_thread_prefix_top_level_is_flush() {
        assert_eq!(thread_prefix(0, true, &[]), "");
    }

    #[test]
    fn test_thread_prefix_first_reply_level() {
        assert_eq!(thread_prefix(1, false, &[true]), "├─ ");
        assert_eq!(thread_prefix(1, true, &[true]), "└─ ");
    }

    #[test]
    fn test_thread_prefix_nested_bars() {
        // depth 2 under a non-last depth-1 parent keeps its bar
        assert_eq!(thread_prefix(2, true, &[true, false]), "│  └─ ");
        assert_eq!(thread_prefix(2, true, &[true, true]), "   └─ ");
    }

    #[test]
    fn test_continuation_prefix_aligns() {
        assert_eq!(continuation_prefix(1, false, &[true]), "│  ");
        assert_eq!(continuation_prefix(1, true, &[true]), "   ");
        assert_eq!(continuation_prefix(0, true, &[]), "");
    }
}
