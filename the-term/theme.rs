//! Hardcoded palette using terminal colors.

use ratatui::style::{
  Color,
  Modifier,
  Style,
};
use the_grid::messages::MessageLevel;

pub const CELL_FILLED: Color = Color::Black;
pub const CELL_EMPTY: Color = Color::White;
pub const GRID_BORDER: Color = Color::Gray;

pub fn label() -> Style {
  Style::default().add_modifier(Modifier::BOLD)
}

pub fn hint() -> Style {
  Style::default().fg(Color::DarkGray)
}

pub fn selected_mode() -> Style {
  Style::default().add_modifier(Modifier::REVERSED)
}

pub fn prompt() -> Style {
  Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

/// Map a message level to its status line style.
pub fn message(level: MessageLevel) -> Style {
  match level {
    MessageLevel::Info => Style::default(),
    MessageLevel::Warning => Style::default().fg(Color::Yellow),
    MessageLevel::Error => Style::default().fg(Color::Red),
  }
}
