//! Terminal client for the-grid.
//!
//! Paint a 21×21 grid with the mouse, or fill it from text:
//! - Left button down/drag toggles cells
//! - Type text, pick a mode with Tab, press Enter to generate
//! - Ctrl-R resets after confirmation

mod ctx;
mod input;
mod render;
mod terminal;
mod theme;
mod view;

use std::{
  path::PathBuf,
  time::Duration,
};

use clap::{
  ArgAction,
  Parser,
};
use crossterm::event::{
  self,
  Event,
};
use eyre::{
  Result,
  WrapErr,
};
use the_grid::{
  Mode,
  Session,
  encoder::SegmentEncoder,
  persist::{
    FileStore,
    NullStore,
    Persistence,
  },
};
use the_grid_loader::config::Config;

use crate::ctx::Ctx;

#[derive(Debug, Parser)]
#[command(name = "the-grid", version)]
#[command(about = "Paint a 21x21 two-dimensional code grid in the terminal")]
struct Cli {
  /// Increase logging verbosity (repeat for more detail)
  #[arg(short = 'v', action = ArgAction::Count)]
  verbosity: u8,

  /// Save logs to a specific file
  #[arg(long = "log", value_name = "FILE")]
  log_file: Option<PathBuf>,

  /// Load configuration from a specific file
  #[arg(short = 'c', long = "config", value_name = "FILE")]
  config_file: Option<PathBuf>,

  /// Keep the saved grid in this directory
  #[arg(long, value_name = "DIR")]
  state_dir: Option<PathBuf>,

  /// Do not load or save the grid
  #[arg(long, conflicts_with = "state_dir")]
  no_persist: bool,

  /// Initially selected mode (alphanumeric, 8bit, shiftjis)
  #[arg(long, value_name = "MODE")]
  mode: Option<Mode>,

  /// Print the saved grid and exit
  #[arg(long)]
  print: bool,
}

fn setup_logging(verbosity: u8) -> Result<()> {
  // stdout and stderr belong to the TUI, so without a file there is no log
  let Some(path) = the_grid_loader::log_file() else {
    return Ok(());
  };

  let level = match verbosity {
    0 => log::LevelFilter::Warn,
    1 => log::LevelFilter::Info,
    2 => log::LevelFilter::Debug,
    _ => log::LevelFilter::Trace,
  };

  fern::Dispatch::new()
    .format(|out, message, record| {
      out.finish(format_args!(
        "{} {} [{}] {}",
        chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
        record.target(),
        record.level(),
        message
      ))
    })
    .level(level)
    .chain(
      fern::log_file(&path).wrap_err_with(|| format!("failed to open {}", path.display()))?,
    )
    .apply()
    .wrap_err("failed to install logger")?;
  Ok(())
}

fn open_store(cli: &Cli, config: &Config) -> Box<dyn Persistence> {
  if cli.no_persist {
    return Box::new(NullStore);
  }
  match cli.state_dir.clone().or_else(|| config.storage_dir()) {
    Some(dir) => {
      log::info!("grid state in {}", dir.display());
      Box::new(FileStore::new(dir))
    },
    None if config.persist => Box::new(FileStore::unavailable()),
    None => Box::new(NullStore),
  }
}

fn run(ctx: &mut Ctx, terminal: &mut terminal::Terminal) -> Result<()> {
  let size = terminal.size()?;
  ctx.resize(size.width, size.height);

  // Initial render
  render::render(ctx, terminal)?;

  // Event loop
  loop {
    if ctx.should_quit {
      break;
    }

    if event::poll(Duration::from_millis(100))? {
      match event::read()? {
        Event::Key(key) => input::handle_key(ctx, key),
        Event::Mouse(mouse) => input::handle_mouse(ctx, mouse),
        Event::Resize(w, h) => ctx.resize(w, h),
        _ => {},
      }
    }

    if ctx.needs_render {
      render::render(ctx, terminal)?;
      ctx.needs_render = false;
    }
  }

  Ok(())
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  the_grid_loader::initialize_config_file(cli.config_file.clone());
  the_grid_loader::initialize_log_file(cli.log_file.clone());
  setup_logging(cli.verbosity)?;

  let config = Config::load()?;
  let store = open_store(&cli, &config);
  let session = Session::open(store, SegmentEncoder);

  if cli.print {
    print!("{}", session.grid());
    return Ok(());
  }

  let mut ctx = Ctx::new(session, cli.mode.unwrap_or(config.default_mode));
  let mut terminal = terminal::Terminal::new()?;

  terminal.enter_raw_mode()?;
  let result = run(&mut ctx, &mut terminal);
  terminal.leave_raw_mode()?;
  result
}
