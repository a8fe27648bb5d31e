//! Terminal abstraction using ratatui + crossterm backend.

use std::io::{
  self,
  Stdout,
};

use crossterm::{
  event::{
    DisableMouseCapture,
    EnableMouseCapture,
  },
  execute,
  terminal::{
    EnterAlternateScreen,
    LeaveAlternateScreen,
    disable_raw_mode,
    enable_raw_mode,
  },
};
use eyre::Result;
use ratatui::{
  Terminal as RatatuiTerminal,
  backend::CrosstermBackend,
  layout::Size,
};

pub struct Terminal {
  terminal: RatatuiTerminal<CrosstermBackend<Stdout>>,
}

impl Terminal {
  pub fn new() -> Result<Self> {
    let stdout = io::stdout();
    let backend = CrosstermBackend::new(stdout);
    let terminal = RatatuiTerminal::new(backend)?;
    Ok(Self { terminal })
  }

  /// Raw mode, alternate screen and mouse reporting, all pointer motion
  /// included.
  pub fn enter_raw_mode(&mut self) -> Result<()> {
    enable_raw_mode()?;
    execute!(
      self.terminal.backend_mut(),
      EnterAlternateScreen,
      EnableMouseCapture
    )?;
    self.terminal.hide_cursor()?;
    Ok(())
  }

  pub fn leave_raw_mode(&mut self) -> Result<()> {
    execute!(
      self.terminal.backend_mut(),
      DisableMouseCapture,
      LeaveAlternateScreen
    )?;
    disable_raw_mode()?;
    self.terminal.show_cursor()?;
    Ok(())
  }

  pub fn draw<F>(&mut self, f: F) -> Result<()>
  where
    F: for<'a> FnOnce(&mut ratatui::Frame<'a>),
  {
    self.terminal.draw(f)?;
    Ok(())
  }

  pub fn size(&self) -> Result<Size> {
    Ok(self.terminal.size()?)
  }
}
