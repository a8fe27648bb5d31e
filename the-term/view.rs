//! Grid view: where each cell sits on screen and how it is drawn.

use ratatui::{
  buffer::Buffer,
  layout::Rect,
  style::Style,
  widgets::Widget,
};
use the_grid::{
  CellPos,
  GRID_SIZE,
  Grid,
};

use crate::theme;

/// Terminal columns per cell. Two columns make a cell roughly square.
pub const CELL_WIDTH: u16 = 2;
pub const CELL_HEIGHT: u16 = 1;
/// Frame drawn around the cells, in terminal cells.
pub const BORDER: u16 = 1;

pub const SURFACE_WIDTH: u16 = GRID_SIZE as u16 * CELL_WIDTH + 2 * BORDER;
pub const SURFACE_HEIGHT: u16 = GRID_SIZE as u16 * CELL_HEIGHT + 2 * BORDER;

/// Placement of the drawing surface on screen.
///
/// `visible` is the part of the surface the screen layout actually gave
/// the grid. Hit-testing never reaches past it, so rows cut off by a short
/// terminal cannot be painted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridLayout {
  x:       u16,
  y:       u16,
  visible: Rect,
}

impl GridLayout {
  /// Lay the surface out from the top-left of `area`, clipped to it.
  pub fn new(area: Rect) -> Self {
    let surface = Rect::new(area.x, area.y, SURFACE_WIDTH, SURFACE_HEIGHT);
    Self {
      x:       area.x,
      y:       area.y,
      visible: surface.intersection(area),
    }
  }

  /// The whole surface, border included.
  pub fn surface(&self) -> Rect {
    Rect::new(self.x, self.y, SURFACE_WIDTH, SURFACE_HEIGHT)
  }

  /// The drawn part of the surface.
  pub fn visible(&self) -> Rect {
    self.visible
  }

  pub fn cell_rect(&self, pos: CellPos) -> Rect {
    Rect::new(
      self.x + BORDER + pos.col() as u16 * CELL_WIDTH,
      self.y + BORDER + pos.row() as u16 * CELL_HEIGHT,
      CELL_WIDTH,
      CELL_HEIGHT,
    )
  }

  /// Whether `(x, y)` lies on the drawn surface, border included.
  pub fn contains(&self, x: u16, y: u16) -> bool {
    let visible = self.visible;
    x >= visible.left() && x < visible.right() && y >= visible.top() && y < visible.bottom()
  }

  /// The drawn cell under `(x, y)`, if any. The border belongs to no cell.
  pub fn cell_at(&self, x: u16, y: u16) -> Option<CellPos> {
    if !self.contains(x, y) {
      return None;
    }
    let dx = x.checked_sub(self.x + BORDER)?;
    let dy = y.checked_sub(self.y + BORDER)?;
    CellPos::new(
      usize::from(dy / CELL_HEIGHT),
      usize::from(dx / CELL_WIDTH),
    )
  }
}

pub struct GridWidget<'a> {
  grid: &'a Grid,
}

impl<'a> GridWidget<'a> {
  pub fn new(grid: &'a Grid) -> Self {
    Self { grid }
  }
}

impl Widget for GridWidget<'_> {
  fn render(self, area: Rect, buf: &mut Buffer) {
    let layout = GridLayout::new(area);
    let area = layout.visible().intersection(buf.area);

    buf.set_style(area, Style::default().bg(theme::GRID_BORDER));
    for (pos, filled) in self.grid.cells() {
      let rect = layout.cell_rect(pos).intersection(area);
      if rect.is_empty() {
        continue;
      }
      let style = Style::default().bg(if filled {
        theme::CELL_FILLED
      } else {
        theme::CELL_EMPTY
      });
      for x in rect.left()..rect.right() {
        buf[(x, rect.y)].set_symbol(" ").set_style(style);
      }
    }
  }
}
