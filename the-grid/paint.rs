//! Drag painting.
//!
//! The controller only decides *which* cell to toggle for each pointer
//! event; committing and persisting the toggle is up to the caller.

use crate::grid::CellPos;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaintState {
  #[default]
  Idle,
  /// A button is held. `hover` is the cell the pointer is currently over,
  /// `None` while it sits between or outside cells.
  Painting { hover: Option<CellPos> },
}

#[derive(Debug, Clone, Default)]
pub struct PaintController {
  state: PaintState,
}

impl PaintController {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn state(&self) -> PaintState {
    self.state
  }

  pub fn is_painting(&self) -> bool {
    matches!(self.state, PaintState::Painting { .. })
  }

  /// Button pressed over `pos`. Always toggles, even if a previous gesture
  /// never saw its release.
  pub fn pointer_down(&mut self, pos: CellPos) -> Option<CellPos> {
    self.state = PaintState::Painting { hover: Some(pos) };
    Some(pos)
  }

  /// Pointer moved onto `pos`. Toggles only when painting and only on a
  /// transition into the cell.
  pub fn pointer_enter(&mut self, pos: CellPos) -> Option<CellPos> {
    match &mut self.state {
      PaintState::Idle => None,
      PaintState::Painting { hover } if *hover == Some(pos) => None,
      PaintState::Painting { hover } => {
        *hover = Some(pos);
        Some(pos)
      },
    }
  }

  /// Pointer left the hovered cell without landing on another one.
  pub fn pointer_leave(&mut self) {
    if let PaintState::Painting { hover } = &mut self.state {
      *hover = None;
    }
  }

  /// Button released over the grid surface. Ends the gesture.
  pub fn pointer_up(&mut self) {
    self.state = PaintState::Idle;
  }
}
