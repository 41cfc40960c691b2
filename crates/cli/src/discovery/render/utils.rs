//! Utility functions for rendering

use {
    super::super::format::Tone,
    ratatui::{layout::Rect, style::Color},
    unicode_width::UnicodeWidthStr,
};

pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Positive => Color::Green,
        Tone::Negative => Color::Red,
        Tone::Neutral => Color::DarkGray,
    }
}

/// Truncate a string to fit within a maximum display width (not byte length).
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    // "…" is one column wide
    let target_width = max_width.saturating_sub(1);
    let mut result = String::new();
    let mut width = 0;

    for c in s.chars() {
        let char_width = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if width + char_width > target_width {
            break;
        }
        result.push(c);
        width += char_width;
    }

    result.push('…');
    result
}

/// Number of terminal lines `text` takes when wrapped at `width`
pub fn wrapped_height(text: &str, width: usize) -> usize {
    if width == 0 {
        return 0;
    }
    text.lines()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum::<usize>()
        .max(1)
}

/// Create a centered rectangle with fixed width and percentage height
pub fn centered_rect_fixed_width(width: u16, percent_y: u16, r: Rect) -> Rect {
    use ratatui::layout::{Constraint, Layout};

    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    let width = width.min(r.width);
    let left_margin = (r.width - width) / 2;
    let right_margin = r.width - width - left_margin;

    Layout::horizontal([
        Constraint::Length(left_margin),
        Constraint::Length(width),
        Constraint::Length(right_margin),
    ])
    .split(popup_layout[1])[1]
}
