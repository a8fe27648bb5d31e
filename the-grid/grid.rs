//! The 21×21 cell matrix and its mutation primitives.
//!
//! A [`Grid`] is immutable: every mutation returns a new grid. Rows are
//! reference counted, so a toggle only reallocates the row it touches and
//! every other row is shared with the previous grid.

use std::{
  fmt,
  sync::Arc,
};

use serde::{
  Deserialize,
  Serialize,
};
use thiserror::Error;

/// Number of rows (and columns) in the grid.
pub const GRID_SIZE: usize = 21;

/// Total number of cells in the grid.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

pub type Row = [bool; GRID_SIZE];

/// A cell coordinate that is known to be inside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPos {
  row: usize,
  col: usize,
}

impl CellPos {
  /// Returns `None` when either coordinate is outside `0..GRID_SIZE`.
  pub const fn new(row: usize, col: usize) -> Option<Self> {
    if row < GRID_SIZE && col < GRID_SIZE {
      Some(Self { row, col })
    } else {
      None
    }
  }

  pub const fn row(self) -> usize {
    self.row
  }

  pub const fn col(self) -> usize {
    self.col
  }

  /// Every cell position in row-major order.
  pub fn all() -> impl Iterator<Item = CellPos> {
    (0..GRID_SIZE).flat_map(|row| (0..GRID_SIZE).map(move |col| CellPos { row, col }))
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridShapeError {
  #[error("expected {GRID_SIZE} rows, found {0}")]
  RowCount(usize),
  #[error("row {row} has {len} cells, expected {GRID_SIZE}")]
  RowLength { row: usize, len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<bool>>", into = "Vec<Vec<bool>>")]
pub struct Grid {
  rows: [Arc<Row>; GRID_SIZE],
}

impl Default for Grid {
  fn default() -> Self {
    Self::initial()
  }
}

impl Grid {
  /// A grid with every cell empty.
  pub fn initial() -> Self {
    let blank = Arc::new([false; GRID_SIZE]);
    Self {
      rows: std::array::from_fn(|_| Arc::clone(&blank)),
    }
  }

  pub fn get(&self, pos: CellPos) -> bool {
    self.rows[pos.row][pos.col]
  }

  /// Returns a new grid with the cell at `pos` inverted.
  ///
  /// `self` is left untouched; only the targeted row is copied.
  #[must_use]
  pub fn toggle(&self, pos: CellPos) -> Grid {
    let mut rows = self.rows.clone();
    let row = Arc::make_mut(&mut rows[pos.row]);
    row[pos.col] = !row[pos.col];
    Grid { rows }
  }

  /// Wholesale substitution. The structural invariant is carried by the
  /// type, so there is nothing left to validate here.
  #[must_use]
  pub fn replace(&self, new: Grid) -> Grid {
    new
  }

  pub fn rows(&self) -> impl Iterator<Item = &Row> {
    self.rows.iter().map(|row| row.as_ref())
  }

  pub fn cells(&self) -> impl Iterator<Item = (CellPos, bool)> + '_ {
    CellPos::all().map(|pos| (pos, self.get(pos)))
  }

  pub fn filled_count(&self) -> usize {
    self.rows().map(|row| row.iter().filter(|&&cell| cell).count()).sum()
  }

  pub fn is_blank(&self) -> bool {
    self.filled_count() == 0
  }

  /// Whether `self` and `other` share the allocation backing `row`.
  pub fn shares_row(&self, other: &Grid, row: usize) -> bool {
    match (self.rows.get(row), other.rows.get(row)) {
      (Some(lhs), Some(rhs)) => Arc::ptr_eq(lhs, rhs),
      _ => false,
    }
  }
}

impl TryFrom<Vec<Vec<bool>>> for Grid {
  type Error = GridShapeError;

  fn try_from(value: Vec<Vec<bool>>) -> Result<Self, Self::Error> {
    if value.len() != GRID_SIZE {
      return Err(GridShapeError::RowCount(value.len()));
    }

    let mut rows = Vec::with_capacity(GRID_SIZE);
    for (index, cells) in value.into_iter().enumerate() {
      let row: Row = cells
        .try_into()
        .map_err(|cells: Vec<bool>| GridShapeError::RowLength {
          row: index,
          len: cells.len(),
        })?;
      rows.push(Arc::new(row));
    }

    let rows = rows
      .try_into()
      .map_err(|rows: Vec<Arc<Row>>| GridShapeError::RowCount(rows.len()))?;
    Ok(Self { rows })
  }
}

impl From<Grid> for Vec<Vec<bool>> {
  fn from(grid: Grid) -> Self {
    grid.rows().map(|row| row.to_vec()).collect()
  }
}

/// Plain-text rendering, two characters per cell.
impl fmt::Display for Grid {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for row in self.rows() {
      for &cell in row {
        f.write_str(if cell { "##" } else { ".." })?;
      }
      writeln!(f)?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use quickcheck::{
    Arbitrary,
    Gen,
  };

  use super::*;

  #[derive(Debug, Clone)]
  struct AnyGrid(Grid);

  impl Arbitrary for AnyGrid {
    fn arbitrary(g: &mut Gen) -> Self {
      let cells = (0..GRID_SIZE)
        .map(|_| (0..GRID_SIZE).map(|_| bool::arbitrary(g)).collect())
        .collect::<Vec<Vec<bool>>>();
      AnyGrid(Grid::try_from(cells).unwrap())
    }
  }

  #[derive(Debug, Clone, Copy)]
  struct AnyPos(CellPos);

  impl Arbitrary for AnyPos {
    fn arbitrary(g: &mut Gen) -> Self {
      let row = usize::arbitrary(g) % GRID_SIZE;
      let col = usize::arbitrary(g) % GRID_SIZE;
      AnyPos(CellPos::new(row, col).unwrap())
    }
  }

  quickcheck::quickcheck! {
      fn toggle_is_an_involution(grid: AnyGrid, pos: AnyPos) -> bool {
          grid.0.toggle(pos.0).toggle(pos.0) == grid.0
      }

      fn toggle_changes_exactly_one_cell(grid: AnyGrid, pos: AnyPos) -> bool {
          let toggled = grid.0.toggle(pos.0);
          let changed: Vec<CellPos> = CellPos::all()
              .filter(|&cell| toggled.get(cell) != grid.0.get(cell))
              .collect();
          changed == vec![pos.0]
      }
  }

  #[test]
  fn initial_is_all_empty() {
    let grid = Grid::initial();
    assert_eq!(grid.rows().count(), GRID_SIZE);
    assert!(grid.rows().all(|row| row.len() == GRID_SIZE));
    assert_eq!(grid.cells().count(), CELL_COUNT);
    assert!(grid.cells().all(|(_, cell)| !cell));
    assert!(grid.is_blank());
    assert_eq!(grid, Grid::default());
  }

  #[test]
  fn toggle_leaves_input_untouched() {
    let grid = Grid::initial();
    let pos = CellPos::new(3, 7).unwrap();
    let toggled = grid.toggle(pos);

    assert!(!grid.get(pos));
    assert!(toggled.get(pos));
    assert_eq!(toggled.filled_count(), 1);
  }

  #[test]
  fn toggle_shares_untouched_rows() {
    let grid = Grid::initial();
    let toggled = grid.toggle(CellPos::new(4, 0).unwrap());

    assert!(!toggled.shares_row(&grid, 4));
    for row in (0..GRID_SIZE).filter(|&row| row != 4) {
      assert!(toggled.shares_row(&grid, row), "row {row} was copied");
    }
  }

  #[test]
  fn replace_installs_the_new_grid() {
    let painted = Grid::initial().toggle(CellPos::new(0, 0).unwrap());
    let replaced = painted.replace(Grid::initial());
    assert!(replaced.is_blank());
  }

  #[test]
  fn cell_pos_rejects_out_of_range() {
    assert!(CellPos::new(GRID_SIZE, 0).is_none());
    assert!(CellPos::new(0, GRID_SIZE).is_none());
    assert!(CellPos::new(GRID_SIZE - 1, GRID_SIZE - 1).is_some());
    assert_eq!(CellPos::all().count(), CELL_COUNT);
  }

  #[test]
  fn shape_is_checked_on_conversion() {
    assert_eq!(
      Grid::try_from(vec![vec![false; GRID_SIZE]; 20]),
      Err(GridShapeError::RowCount(20))
    );

    let mut cells = vec![vec![false; GRID_SIZE]; GRID_SIZE];
    cells[5].push(true);
    assert_eq!(
      Grid::try_from(cells),
      Err(GridShapeError::RowLength { row: 5, len: 22 })
    );
  }

  #[test]
  fn json_is_an_array_of_arrays() {
    let grid = Grid::initial().toggle(CellPos::new(0, 1).unwrap());
    let json = serde_json::to_value(&grid).unwrap();
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), GRID_SIZE);
    assert_eq!(rows[0][1], serde_json::Value::Bool(true));
    assert_eq!(rows[0][0], serde_json::Value::Bool(false));

    let back: Grid = serde_json::from_value(json).unwrap();
    assert_eq!(back, grid);

    assert!(serde_json::from_str::<Grid>("[[true, false]]").is_err());
  }

  #[test]
  fn display_uses_two_chars_per_cell() {
    let grid = Grid::initial().toggle(CellPos::new(0, 0).unwrap());
    let text = grid.to_string();
    let first = text.lines().next().unwrap();
    assert_eq!(first.len(), GRID_SIZE * 2);
    assert!(first.starts_with("##.."));
    assert_eq!(text.lines().count(), GRID_SIZE);
  }
}
