//! Editing session: the current grid plus everything that may change it.
//!
//! Every committed change goes through [`Session::commit`], which installs
//! the new grid and saves it before returning. Saves therefore happen in
//! change order and the paint gesture itself is never persisted.

use crate::{
  encode::{
    EncodeBridge,
    EncodeError,
    EncodeRequest,
    Encoder,
  },
  grid::{
    CellPos,
    Grid,
  },
  messages::MessageCenter,
  paint::PaintController,
  persist::Persistence,
};

#[derive(Debug)]
pub struct Session<P, E> {
  grid:     Grid,
  paint:    PaintController,
  store:    P,
  bridge:   EncodeBridge<E>,
  messages: MessageCenter,
}

impl<P: Persistence, E: Encoder> Session<P, E> {
  /// Load the saved grid once, falling back to a blank one.
  pub fn open(mut store: P, encoder: E) -> Self {
    let grid = match store.load() {
      Some(grid) => {
        log::info!("restored grid with {} filled cells", grid.filled_count());
        grid
      },
      None => Grid::initial(),
    };

    Self {
      grid,
      paint: PaintController::new(),
      store,
      bridge: EncodeBridge::new(encoder),
      messages: MessageCenter::default(),
    }
  }

  pub fn grid(&self) -> &Grid {
    &self.grid
  }

  pub fn paint(&self) -> &PaintController {
    &self.paint
  }

  #[cfg(test)]
  pub(crate) fn store(&self) -> &P {
    &self.store
  }

  pub fn messages(&self) -> &MessageCenter {
    &self.messages
  }

  pub fn messages_mut(&mut self) -> &mut MessageCenter {
    &mut self.messages
  }

  fn commit(&mut self, grid: Grid) {
    self.grid = grid;
    self.store.save(&self.grid);
  }

  fn toggle(&mut self, pos: Option<CellPos>) -> bool {
    let Some(pos) = pos else {
      return false;
    };
    let grid = self.grid.toggle(pos);
    self.commit(grid);
    true
  }

  /// Returns whether a cell was toggled.
  pub fn pointer_down(&mut self, pos: CellPos) -> bool {
    let target = self.paint.pointer_down(pos);
    self.toggle(target)
  }

  /// Returns whether a cell was toggled.
  pub fn pointer_enter(&mut self, pos: CellPos) -> bool {
    let target = self.paint.pointer_enter(pos);
    self.toggle(target)
  }

  pub fn pointer_leave(&mut self) {
    self.paint.pointer_leave();
  }

  pub fn pointer_up(&mut self) {
    self.paint.pointer_up();
  }

  /// Replace the grid with the encoding of `request`.
  ///
  /// On failure the grid is left as it was, nothing is saved and the error
  /// is published as a message.
  pub fn generate(&mut self, request: &EncodeRequest) -> Result<(), EncodeError> {
    match self.bridge.run(request) {
      Ok(encoded) => {
        let grid = self.grid.replace(encoded);
        self.commit(grid);
        self
          .messages
          .info(format!("generated {} grid", request.mode.label()));
        Ok(())
      },
      Err(err) => {
        self.messages.error(format!("generate failed: {err}"));
        Err(err)
      },
    }
  }

  /// Clear every cell. Callers are expected to have asked the user first.
  pub fn reset(&mut self) {
    let grid = self.grid.replace(Grid::initial());
    self.commit(grid);
    self.messages.info("grid reset");
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    encode::Mode,
    encoder::SegmentEncoder,
    grid::GRID_SIZE,
    messages::MessageLevel,
    persist::{
      MemoryStore,
      NullStore,
    },
  };

  fn pos(row: usize, col: usize) -> CellPos {
    CellPos::new(row, col).unwrap()
  }

  fn session() -> Session<MemoryStore, SegmentEncoder> {
    Session::open(MemoryStore::new(), SegmentEncoder)
  }

  fn changed(before: &Grid, after: &Grid) -> Vec<CellPos> {
    CellPos::all()
      .filter(|&cell| before.get(cell) != after.get(cell))
      .collect()
  }

  #[test]
  fn opens_from_saved_state() {
    let saved = Grid::initial().toggle(pos(1, 1));
    let raw = serde_json::to_string(&saved).unwrap();
    let session = Session::open(MemoryStore::new().with_raw(raw), SegmentEncoder);
    assert_eq!(session.grid(), &saved);
    assert!(session.store().saves().is_empty());
  }

  #[test]
  fn falls_back_to_blank_grid() {
    let session = Session::open(NullStore, SegmentEncoder);
    assert!(session.grid().is_blank());

    let corrupt = MemoryStore::new().with_raw("{\"not\": \"a grid\"}");
    let session = Session::open(corrupt, SegmentEncoder);
    assert!(session.grid().is_blank());
  }

  #[test]
  fn click_without_drag_toggles_one_cell() {
    let mut session = session();
    let before = session.grid().clone();
    assert!(session.pointer_down(pos(0, 0)));
    session.pointer_up();

    assert_eq!(changed(&before, session.grid()), vec![pos(0, 0)]);
    assert_eq!(session.store().saves().len(), 1);
  }

  #[test]
  fn drag_toggles_each_cell_once_in_order() {
    let mut session = session();
    let before = session.grid().clone();
    session.pointer_down(pos(2, 2));
    session.pointer_enter(pos(2, 3));
    session.pointer_enter(pos(2, 4));
    session.pointer_up();

    assert_eq!(
      changed(&before, session.grid()),
      vec![pos(2, 2), pos(2, 3), pos(2, 4)]
    );

    // one save per toggle, each including the toggles before it
    let saves = session.store().saves();
    assert_eq!(saves.len(), 3);
    assert_eq!(changed(&before, &saves[0]), vec![pos(2, 2)]);
    assert_eq!(changed(&before, &saves[1]), vec![pos(2, 2), pos(2, 3)]);
    assert_eq!(&saves[2], session.grid());
  }

  #[test]
  fn entering_the_pressed_cell_does_not_toggle_twice() {
    let mut session = session();
    session.pointer_down(pos(5, 5));
    assert!(!session.pointer_enter(pos(5, 5)));
    session.pointer_up();

    assert!(session.grid().get(pos(5, 5)));
    assert_eq!(session.store().saves().len(), 1);
  }

  #[test]
  fn painting_over_filled_cells_clears_them() {
    let mut session = session();
    session.pointer_down(pos(0, 0));
    session.pointer_up();
    session.pointer_down(pos(0, 1));
    session.pointer_enter(pos(0, 0));
    session.pointer_up();

    assert!(!session.grid().get(pos(0, 0)));
    assert!(session.grid().get(pos(0, 1)));
  }

  #[test]
  fn hovering_without_a_button_is_inert() {
    let mut session = session();
    assert!(!session.pointer_enter(pos(3, 3)));
    assert!(session.grid().is_blank());
    assert!(session.store().saves().is_empty());
  }

  #[test]
  fn reset_clears_and_persists() {
    let mut session = session();
    session.pointer_down(pos(7, 7));
    session.pointer_up();

    session.reset();
    assert!(session.grid().is_blank());
    assert_eq!(session.store().saves().last(), Some(&Grid::initial()));

    let mut store = session.store().clone();
    assert_eq!(store.load(), Some(Grid::initial()));
  }

  #[test]
  fn generate_replaces_the_whole_grid() {
    let mut session = session();
    session.pointer_down(pos(20, 20));
    session.pointer_up();

    let request = EncodeRequest::new("", Mode::Alphanumeric);
    session.generate(&request).unwrap();

    let expected = EncodeBridge::new(SegmentEncoder).run(&request).unwrap();
    assert_eq!(session.grid(), &expected);
    assert!(!session.grid().get(pos(20, 20)));
    assert_eq!(session.store().saves().last(), Some(&expected));
    assert_eq!(session.store().saves().len(), 2);
  }

  #[test]
  fn failed_generate_keeps_the_grid() {
    let mut session = session();
    session.pointer_down(pos(4, 4));
    session.pointer_up();
    let before = session.grid().clone();

    let err = session
      .generate(&EncodeRequest::new("lowercase", Mode::Alphanumeric))
      .unwrap_err();
    assert!(matches!(err, EncodeError::UnsupportedCharacter { ch: 'l', .. }));
    assert_eq!(session.grid(), &before);
    assert_eq!(session.store().saves().len(), 1);
    assert_eq!(
      session.messages().active().map(|m| m.level),
      Some(MessageLevel::Error)
    );
  }

  #[test]
  fn malformed_encoder_output_keeps_the_grid() {
    let broken =
      |_: &str, _: Mode| -> Result<Vec<Vec<bool>>, EncodeError> { Ok(vec![vec![true; GRID_SIZE]; 3]) };
    let mut session = Session::open(MemoryStore::new(), broken);
    assert!(matches!(
      session.generate(&EncodeRequest::default()),
      Err(EncodeError::Shape(_))
    ));
    assert!(session.grid().is_blank());
    assert!(session.store().saves().is_empty());
  }
}
