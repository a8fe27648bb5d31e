//! Durable storage for the grid.
//!
//! Storage is best effort. A missing, unreadable or malformed value loads as
//! `None` and the caller falls back to [`Grid::initial`]; a failed write is
//! logged and dropped. Nothing in here ever reaches the user as an error.

use std::{
  fs,
  io::{
    self,
    Write,
  },
  path::{
    Path,
    PathBuf,
  },
};

use tempfile::NamedTempFile;

use crate::grid::Grid;

/// Key the grid is stored under.
pub const GRID_KEY: &str = "squares";

/// Load/save seam between the session and whatever backs it.
pub trait Persistence {
  /// Read the saved grid, if there is a usable one.
  fn load(&mut self) -> Option<Grid>;

  /// Overwrite the saved grid. Errors are swallowed.
  fn save(&mut self, grid: &Grid);
}

impl<P: Persistence + ?Sized> Persistence for Box<P> {
  fn load(&mut self) -> Option<Grid> {
    (**self).load()
  }

  fn save(&mut self, grid: &Grid) {
    (**self).save(grid)
  }
}

fn decode(raw: &str) -> Option<Grid> {
  match serde_json::from_str(raw) {
    Ok(grid) => Some(grid),
    Err(err) => {
      log::warn!("ignoring unreadable saved value for '{GRID_KEY}': {err}");
      None
    },
  }
}

fn encode(grid: &Grid) -> Option<String> {
  match serde_json::to_string(grid) {
    Ok(raw) => Some(raw),
    Err(err) => {
      log::error!("failed to serialize grid: {err}");
      None
    },
  }
}

/// The grid as `<dir>/squares.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
  dir: Option<PathBuf>,
}

impl FileStore {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self {
      dir: Some(dir.into()),
    }
  }

  /// A store whose backing directory could not be determined.
  pub fn unavailable() -> Self {
    Self { dir: None }
  }

  pub fn path(&self) -> Option<PathBuf> {
    self
      .dir
      .as_ref()
      .map(|dir| dir.join(format!("{GRID_KEY}.json")))
  }

  fn write(dir: &Path, path: &Path, raw: &str) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(raw.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|err| err.error)?;
    Ok(())
  }
}

impl Persistence for FileStore {
  fn load(&mut self) -> Option<Grid> {
    let Some(path) = self.path() else {
      log::debug!("storage unavailable, starting from a blank grid");
      return None;
    };

    match fs::read_to_string(&path) {
      Ok(raw) => decode(&raw),
      Err(err) if err.kind() == io::ErrorKind::NotFound => None,
      Err(err) => {
        log::warn!("failed to read {}: {err}", path.display());
        None
      },
    }
  }

  fn save(&mut self, grid: &Grid) {
    let (Some(dir), Some(path)) = (self.dir.as_deref(), self.path()) else {
      return;
    };
    let Some(raw) = encode(grid) else {
      return;
    };
    if let Err(err) = Self::write(dir, &path, &raw) {
      log::warn!("failed to save grid to {}: {err}", path.display());
    }
  }
}

/// Volatile storage, also used to observe save order in tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
  raw:   Option<String>,
  saves: Vec<Grid>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Seed the stored value, bypassing serialization.
  pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
    self.raw = Some(raw.into());
    self
  }

  pub fn raw(&self) -> Option<&str> {
    self.raw.as_deref()
  }

  /// Every grid passed to `save`, oldest first.
  pub fn saves(&self) -> &[Grid] {
    &self.saves
  }
}

impl Persistence for MemoryStore {
  fn load(&mut self) -> Option<Grid> {
    self.raw.as_deref().and_then(decode)
  }

  fn save(&mut self, grid: &Grid) {
    self.saves.push(grid.clone());
    if let Some(raw) = encode(grid) {
      self.raw = Some(raw);
    }
  }
}

/// Storage that does not exist. Loads nothing, saves nowhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStore;

impl Persistence for NullStore {
  fn load(&mut self) -> Option<Grid> {
    None
  }

  fn save(&mut self, _grid: &Grid) {}
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;
  use crate::grid::CellPos;

  fn painted() -> Grid {
    Grid::initial()
      .toggle(CellPos::new(0, 0).unwrap())
      .toggle(CellPos::new(20, 20).unwrap())
  }

  #[test]
  fn file_store_round_trip() {
    let dir = TempDir::new().unwrap();
    let mut store = FileStore::new(dir.path());
    assert_eq!(store.load(), None);

    store.save(&painted());
    assert_eq!(store.load(), Some(painted()));

    // a second store over the same directory sees the value, as after a restart
    let mut reopened = FileStore::new(dir.path());
    assert_eq!(reopened.load(), Some(painted()));
  }

  #[test]
  fn file_store_overwrites() {
    let dir = TempDir::new().unwrap();
    let mut store = FileStore::new(dir.path());
    store.save(&painted());
    store.save(&Grid::initial());
    assert_eq!(store.load(), Some(Grid::initial()));
  }

  #[test]
  fn file_store_creates_missing_directory() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a").join("b");
    let mut store = FileStore::new(&nested);
    store.save(&painted());
    assert!(nested.join("squares.json").exists());
  }

  #[test]
  fn corrupt_file_loads_as_absent() {
    let dir = TempDir::new().unwrap();
    let mut store = FileStore::new(dir.path());
    let path = store.path().unwrap();

    fs::write(&path, "not json").unwrap();
    assert_eq!(store.load(), None);

    fs::write(&path, "[[true, false], [false]]").unwrap();
    assert_eq!(store.load(), None);
  }

  #[test]
  fn unavailable_storage_loads_as_absent() {
    let mut store = FileStore::unavailable();
    assert_eq!(store.path(), None);
    store.save(&painted());
    assert_eq!(store.load(), None);

    let mut null = NullStore;
    null.save(&painted());
    assert_eq!(null.load(), None);
  }

  #[test]
  fn unwritable_location_is_swallowed() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("file");
    fs::write(&blocker, "").unwrap();

    // the "directory" is a regular file, so every write fails
    let mut store = FileStore::new(&blocker);
    store.save(&painted());
    assert_eq!(store.load(), None);
  }

  #[test]
  fn memory_store_round_trip() {
    let mut store = MemoryStore::new();
    assert_eq!(store.load(), None);
    store.save(&painted());
    assert_eq!(store.load(), Some(painted()));
    assert_eq!(store.saves().len(), 1);
    assert!(store.raw().unwrap().starts_with("[[true,"));
  }

  #[test]
  fn memory_store_ignores_bad_shape() {
    let mut store = MemoryStore::new().with_raw("[]");
    assert_eq!(store.load(), None);
  }
}
