use chrono::{DateTime, Local, Utc};

use flashdeck_lib::flashcards::CardStatus;

/// ANSI color codes
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
}

/// Wrap `text` in a color code when colors are enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Shorten to `max_chars` characters, marking the cut with "..."
pub fn truncate(text: &str, max_chars: usize) -> String {
    let single_line = text.replace('\n', " ");
    if single_line.chars().count() <= max_chars {
        single_line
    } else {
        let kept: String = single_line.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Timestamp in the user's local time, minute precision
pub fn local_time(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Short status label, e.g. "available" or "until 2026-03-04 09:30"
pub fn status_label(status: &CardStatus, use_color: bool) -> String {
    match status {
        CardStatus::Available => paint("available", Color::GREEN, use_color),
        CardStatus::Suppressed { until } => {
            paint(&format!("until {}", local_time(until)), Color::YELLOW, use_color)
        }
    }
}

/// Simple word-wrapping for terminal output
pub fn wrap_lines(text: &str, prefix: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let effective_width = max_width.saturating_sub(prefix.len());

    for line in text.lines() {
        if line.chars().count() <= effective_width {
            lines.push(format!("{}{}", prefix, line));
            continue;
        }

        let mut current_line = String::new();
        for word in line.split_whitespace() {
            if current_line.is_empty() {
                current_line = word.to_string();
            } else if current_line.chars().count() + 1 + word.chars().count() <= effective_width {
                current_line.push(' ');
                current_line.push_str(word);
            } else {
                lines.push(format!("{}{}", prefix, current_line));
                current_line = word.to_string();
            }
        }
        if !current_line.is_empty() {
            lines.push(format!("{}{}", prefix, current_line));
        }
    }

    lines
}
