//! Input handling - maps crossterm key and mouse events onto the context.

use crossterm::event::{
  KeyCode,
  KeyEvent,
  KeyEventKind,
  KeyModifiers,
  MouseButton,
  MouseEvent,
  MouseEventKind,
};

use crate::Ctx;

pub fn handle_key(ctx: &mut Ctx, event: KeyEvent) {
  if event.kind == KeyEventKind::Release {
    return;
  }

  let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
  let quit = ctrl && matches!(event.code, KeyCode::Char('c' | 'q'));

  if ctx.prompt.is_some() {
    let confirmed = !quit && matches!(event.code, KeyCode::Char('y' | 'Y'));
    ctx.answer_prompt(confirmed);
    ctx.should_quit = quit;
    return;
  }

  match event.code {
    _ if quit => ctx.should_quit = true,
    KeyCode::Char('r') if ctrl => ctx.request_reset(),
    KeyCode::Char('u') if ctrl => {
      ctx.input.clear();
      ctx.needs_render = true;
    },
    KeyCode::Esc => ctx.should_quit = true,
    KeyCode::Enter => ctx.generate(),
    KeyCode::Tab => ctx.next_mode(),
    KeyCode::BackTab => ctx.prev_mode(),
    KeyCode::Backspace => {
      ctx.input.pop();
      ctx.needs_render = true;
    },
    KeyCode::Char(c) if !ctrl && !event.modifiers.contains(KeyModifiers::ALT) => {
      ctx.input.push(c);
      ctx.needs_render = true;
    },
    _ => {},
  }
}

/// Translate raw pointer positions into paint gestures.
///
/// Only the left button paints. A release only ends the gesture when it
/// happens over the grid surface; one released elsewhere keeps painting
/// until a release over the surface is seen.
pub fn handle_mouse(ctx: &mut Ctx, event: MouseEvent) {
  // the confirmation prompt is modal
  if ctx.prompt.is_some() {
    return;
  }

  let (x, y) = (event.column, event.row);
  let cell = ctx.layout.cell_at(x, y);
  let changed = match event.kind {
    MouseEventKind::Down(MouseButton::Left) => {
      cell.is_some_and(|pos| ctx.session.pointer_down(pos))
    },
    MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => match cell {
      Some(pos) => ctx.session.pointer_enter(pos),
      None => {
        ctx.session.pointer_leave();
        false
      },
    },
    MouseEventKind::Up(MouseButton::Left) if ctx.layout.contains(x, y) => {
      ctx.session.pointer_up();
      false
    },
    _ => false,
  };

  if changed {
    ctx.needs_render = true;
  }
}
