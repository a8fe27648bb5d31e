//! Application context (state).

use the_grid::{
  EncodeRequest,
  Mode,
  Session,
  encoder::SegmentEncoder,
  persist::Persistence,
};

use crate::{
  render::screen_areas,
  view::GridLayout,
};

pub type GridSession = Session<Box<dyn Persistence>, SegmentEncoder>;

/// A modal question waiting for an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
  ConfirmReset,
}

impl Prompt {
  pub fn text(self) -> &'static str {
    match self {
      Self::ConfirmReset => "Reset the grid? Every painted cell will be cleared. [y/N]",
    }
  }
}

pub struct Ctx {
  pub session:      GridSession,
  /// Text typed into the input line.
  pub input:        String,
  pub mode:         Mode,
  pub prompt:       Option<Prompt>,
  /// Where the grid was last laid out, for mouse hit-testing.
  pub layout:       GridLayout,
  pub should_quit:  bool,
  pub needs_render: bool,
}

impl Ctx {
  pub fn new(session: GridSession, mode: Mode) -> Self {
    Self {
      session,
      input: String::new(),
      mode,
      prompt: None,
      layout: GridLayout::default(),
      should_quit: false,
      needs_render: true,
    }
  }

  pub fn resize(&mut self, width: u16, height: u16) {
    let grid = screen_areas(ratatui::layout::Rect::new(0, 0, width, height)).grid;
    self.layout = GridLayout::new(grid);
    self.needs_render = true;
  }

  /// Encode the input line with the selected mode.
  pub fn generate(&mut self) {
    let request = EncodeRequest::new(self.input.clone(), self.mode);
    // the session already published the failure to the status line
    if let Err(err) = self.session.generate(&request) {
      log::debug!("generate rejected: {err}");
    }
    self.needs_render = true;
  }

  pub fn request_reset(&mut self) {
    self.prompt = Some(Prompt::ConfirmReset);
    self.needs_render = true;
  }

  /// Resolve the open prompt. Declining leaves everything as it was.
  pub fn answer_prompt(&mut self, confirmed: bool) {
    match self.prompt.take() {
      Some(Prompt::ConfirmReset) if confirmed => self.session.reset(),
      Some(Prompt::ConfirmReset) => {
        self.session.messages_mut().info("reset cancelled");
      },
      None => {},
    }
    self.needs_render = true;
  }

  pub fn next_mode(&mut self) {
    self.mode = self.mode.next();
    self.needs_render = true;
  }

  pub fn prev_mode(&mut self) {
    self.mode = self.mode.prev();
    self.needs_render = true;
  }
}
