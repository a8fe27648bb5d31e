//! Rendering - lays out the form, the grid and the status line.

use eyre::Result;
use ratatui::{
  Frame,
  layout::{
    Constraint,
    Layout,
    Rect,
  },
  text::{
    Line,
    Span,
  },
  widgets::Paragraph,
};
use the_grid::{
  Mode,
  grid::CELL_COUNT,
};

use crate::{
  Ctx,
  terminal::Terminal,
  theme,
  view::{
    GridLayout,
    GridWidget,
    SURFACE_HEIGHT,
    SURFACE_WIDTH,
  },
};

const INPUT_LABEL: &str = "Text: ";
const HELP: &str = "Enter generate  Tab mode  drag to paint  Ctrl-R reset  Esc quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
  pub input:  Rect,
  pub mode:   Rect,
  pub help:   Rect,
  pub grid:   Rect,
  pub status: Rect,
}

pub fn screen_areas(area: Rect) -> ScreenAreas {
  let [input, mode, help, grid, status, _] = Layout::vertical([
    Constraint::Length(1),
    Constraint::Length(1),
    Constraint::Length(1),
    Constraint::Length(SURFACE_HEIGHT),
    Constraint::Length(1),
    Constraint::Min(0),
  ])
  .areas(area);
  let [grid, _] =
    Layout::horizontal([Constraint::Length(SURFACE_WIDTH), Constraint::Min(0)]).areas(grid);

  ScreenAreas {
    input,
    mode,
    help,
    grid,
    status,
  }
}

fn mode_line(selected: Mode) -> Line<'static> {
  let mut spans = vec![Span::styled("Mode: ", theme::label())];
  for mode in Mode::ALL {
    let label = format!(" {} ", mode.label());
    spans.push(if mode == selected {
      Span::styled(label, theme::selected_mode())
    } else {
      Span::styled(label, theme::hint())
    });
  }
  Line::from(spans)
}

fn status_line(ctx: &Ctx) -> Line<'_> {
  if let Some(prompt) = ctx.prompt {
    return Line::from(Span::styled(prompt.text(), theme::prompt()));
  }
  if let Some(message) = ctx.session.messages().active() {
    return Line::from(Span::styled(
      message.text.as_str(),
      theme::message(message.level),
    ));
  }
  let filled = ctx.session.grid().filled_count();
  Line::from(Span::styled(
    format!("{filled}/{CELL_COUNT} cells filled"),
    theme::hint(),
  ))
}

pub fn draw(frame: &mut Frame, ctx: &mut Ctx) {
  let areas = screen_areas(frame.area());
  ctx.layout = GridLayout::new(areas.grid);

  let input = Line::from(vec![
    Span::styled(INPUT_LABEL, theme::label()),
    Span::raw(ctx.input.as_str()),
  ]);
  let cursor_x = areas.input.x + (input.width() as u16).min(areas.input.width.saturating_sub(1));
  frame.render_widget(Paragraph::new(input), areas.input);
  if ctx.prompt.is_none() {
    frame.set_cursor_position((cursor_x, areas.input.y));
  }

  frame.render_widget(Paragraph::new(mode_line(ctx.mode)), areas.mode);
  frame.render_widget(
    Paragraph::new(Span::styled(HELP, theme::hint())),
    areas.help,
  );
  frame.render_widget(GridWidget::new(ctx.session.grid()), areas.grid);
  frame.render_widget(Paragraph::new(status_line(ctx)), areas.status);
}

/// Render the current state to the terminal.
pub fn render(ctx: &mut Ctx, terminal: &mut Terminal) -> Result<()> {
  terminal.draw(|frame| draw(frame, ctx))
}
