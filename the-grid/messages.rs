use std::collections::VecDeque;

pub const DEFAULT_HISTORY_LIMIT: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
  Info,
  Warning,
  Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
  pub id:    u64,
  pub level: MessageLevel,
  pub text:  String,
}

/// User-facing status line messages, newest active.
#[derive(Debug, Clone)]
pub struct MessageCenter {
  active:          Option<Message>,
  history:         VecDeque<Message>,
  next_message_id: u64,
  history_limit:   usize,
}

impl Default for MessageCenter {
  fn default() -> Self {
    Self::with_limit(DEFAULT_HISTORY_LIMIT)
  }
}

impl MessageCenter {
  pub fn with_limit(history_limit: usize) -> Self {
    Self {
      active:          None,
      history:         VecDeque::new(),
      next_message_id: 1,
      history_limit:   history_limit.max(1),
    }
  }

  pub fn active(&self) -> Option<&Message> {
    self.active.as_ref()
  }

  pub fn history(&self) -> impl Iterator<Item = &Message> {
    self.history.iter()
  }

  pub fn publish(&mut self, level: MessageLevel, text: impl Into<String>) -> Message {
    let message = Message {
      id: self.next_message_id,
      level,
      text: text.into(),
    };
    self.next_message_id = self.next_message_id.saturating_add(1);

    match level {
      MessageLevel::Error => log::error!("{}", message.text),
      MessageLevel::Warning => log::warn!("{}", message.text),
      MessageLevel::Info => log::info!("{}", message.text),
    }

    self.active = Some(message.clone());
    self.history.push_back(message.clone());
    while self.history.len() > self.history_limit {
      self.history.pop_front();
    }
    message
  }

  pub fn info(&mut self, text: impl Into<String>) -> Message {
    self.publish(MessageLevel::Info, text)
  }

  pub fn warning(&mut self, text: impl Into<String>) -> Message {
    self.publish(MessageLevel::Warning, text)
  }

  pub fn error(&mut self, text: impl Into<String>) -> Message {
    self.publish(MessageLevel::Error, text)
  }
}
