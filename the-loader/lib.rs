//! Filesystem locations and user configuration.

pub mod config;

use std::{
  path::{
    Path,
    PathBuf,
  },
  sync::OnceLock,
};

use etcetera::base_strategy::{
  BaseStrategy,
  choose_base_strategy,
};

const APP_DIR: &str = "the-grid";

static CONFIG_FILE: OnceLock<Option<PathBuf>> = OnceLock::new();

static LOG_FILE: OnceLock<Option<PathBuf>> = OnceLock::new();

pub fn initialize_config_file(specified_file: Option<PathBuf>) {
  let config_file = specified_file.or_else(default_config_file);
  CONFIG_FILE.set(config_file).ok();
}

pub fn initialize_log_file(specified_file: Option<PathBuf>) {
  let log_file = specified_file.or_else(default_log_file);
  if let Some(path) = &log_file {
    ensure_parent_dir(path);
  }
  LOG_FILE.set(log_file).ok();
}

/// Expand a leading `~` to the home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  match path.strip_prefix("~") {
    Ok(rest) => match etcetera::home_dir() {
      Ok(home) => home.join(rest),
      Err(_) => path.to_path_buf(),
    },
    Err(_) => path.to_path_buf(),
  }
}

#[derive(Debug, Clone, Copy)]
enum BaseDir {
  Config,
  Data,
  Cache,
}

/// Resolve an application directory. The environment variable wins;
/// otherwise the platform base directory is used. `None` when neither is
/// available, e.g. no home directory in a sandbox.
fn app_dir(env_var: &str, base: BaseDir) -> Option<PathBuf> {
  if let Some(dir) = std::env::var_os(env_var) {
    return Some(expand_tilde(Path::new(&dir)));
  }
  let strategy = match choose_base_strategy() {
    Ok(strategy) => strategy,
    Err(err) => {
      log::warn!("no {base:?} directory: {err}");
      return None;
    },
  };
  let dir = match base {
    BaseDir::Config => strategy.config_dir(),
    BaseDir::Data => strategy.data_dir(),
    BaseDir::Cache => strategy.cache_dir(),
  };
  Some(dir.join(APP_DIR))
}

pub fn config_dir() -> Option<PathBuf> {
  app_dir("THE_GRID_CONFIG_DIR", BaseDir::Config)
}

/// Where the painted grid is kept between runs.
pub fn data_dir() -> Option<PathBuf> {
  app_dir("THE_GRID_DATA_DIR", BaseDir::Data)
}

pub fn cache_dir() -> Option<PathBuf> {
  app_dir("THE_GRID_CACHE_DIR", BaseDir::Cache)
}

pub fn config_file() -> Option<PathBuf> {
  CONFIG_FILE.get_or_init(default_config_file).clone()
}

pub fn log_file() -> Option<PathBuf> {
  LOG_FILE
    .get_or_init(|| {
      let path = default_log_file();
      if let Some(path) = &path {
        ensure_parent_dir(path);
      }
      path
    })
    .clone()
}

pub fn default_log_file() -> Option<PathBuf> {
  cache_dir().map(|dir| dir.join("the-grid.log"))
}

fn default_config_file() -> Option<PathBuf> {
  config_dir().map(|dir| dir.join("config.toml"))
}

fn ensure_parent_dir(path: &Path) {
  if let Some(parent) = path.parent()
    && !parent.exists()
  {
    std::fs::create_dir_all(parent).ok();
  }
}
