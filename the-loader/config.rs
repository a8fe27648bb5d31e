use std::{
  io,
  path::{
    Path,
    PathBuf,
  },
};

use eyre::{
  Result,
  WrapErr,
};
use serde::Deserialize;
use the_grid::Mode;

/// Contents of `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
  /// Mode selected when the editor starts.
  pub default_mode: Mode,
  /// Keep the grid between runs. When off nothing is read or written.
  pub persist:      bool,
  /// Directory holding the saved grid, instead of the data dir.
  pub state_dir:    Option<PathBuf>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      default_mode: Mode::default(),
      persist:      true,
      state_dir:    None,
    }
  }
}

impl Config {
  pub fn parse(source: &str) -> Result<Self> {
    let mut config: Config = toml::from_str(source).wrap_err("failed to parse config.toml")?;
    config.state_dir = config.state_dir.map(|dir| crate::expand_tilde(&dir));
    Ok(config)
  }

  /// Read `path`. A missing file yields the defaults, a malformed one is an
  /// error.
  pub fn load_from(path: &Path) -> Result<Self> {
    match std::fs::read_to_string(path) {
      Ok(source) => Self::parse(&source).wrap_err_with(|| format!("in {}", path.display())),
      Err(err) if err.kind() == io::ErrorKind::NotFound => {
        log::debug!("no config at {}, using defaults", path.display());
        Ok(Self::default())
      },
      Err(err) => Err(err).wrap_err_with(|| format!("failed to read {}", path.display())),
    }
  }

  /// Load the user config file.
  pub fn load() -> Result<Self> {
    match crate::config_file() {
      Some(path) => Self::load_from(&path),
      None => Ok(Self::default()),
    }
  }

  /// Directory the grid is saved in, if any.
  pub fn storage_dir(&self) -> Option<PathBuf> {
    if !self.persist {
      return None;
    }
    self.state_dir.clone().or_else(crate::data_dir)
  }
}
