//! Shared menu styling: the cursor marker and the few colors the views use.

use ratatui::style::{Color, Modifier, Style};

pub const CURSOR: &str = "-> ";

/// Cursor-highlighted entry.
pub fn highlight() -> Style {
    Style::default().fg(Color::Magenta)
}

/// Entry being dragged in move mode.
pub fn move_highlight() -> Style {
    Style::default().fg(Color::LightRed)
}

/// Toggled-on article.
pub fn selected() -> Style {
    Style::default().bg(Color::Red).fg(Color::White)
}

pub fn header() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub fn number() -> Style {
    Style::default().fg(Color::Blue)
}
