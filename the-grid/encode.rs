//! Bridge between free text and the grid.
//!
//! The bridge does no encoding itself. It hands `(text, mode)` to an
//! [`Encoder`] and validates that what comes back is grid shaped, so a
//! misbehaving encoder can never leave a half-written grid behind.

use std::{
  fmt,
  str::FromStr,
};

use serde::{
  Deserialize,
  Serialize,
};
use thiserror::Error;

use crate::grid::{
  Grid,
  GridShapeError,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
  #[default]
  #[serde(rename = "alphanumeric")]
  Alphanumeric,
  #[serde(rename = "8bit")]
  EightBit,
  #[serde(rename = "shiftjis")]
  ShiftJis,
}

impl Mode {
  pub const ALL: [Mode; 3] = [Mode::Alphanumeric, Mode::EightBit, Mode::ShiftJis];

  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Alphanumeric => "alphanumeric",
      Self::EightBit => "8bit",
      Self::ShiftJis => "shiftjis",
    }
  }

  /// Human readable label for selectors.
  pub const fn label(self) -> &'static str {
    match self {
      Self::Alphanumeric => "Alphanumeric",
      Self::EightBit => "8-bit byte",
      Self::ShiftJis => "Shift JIS",
    }
  }

  pub fn next(self) -> Self {
    let index = Self::ALL.iter().position(|&m| m == self).unwrap_or(0);
    Self::ALL[(index + 1) % Self::ALL.len()]
  }

  pub fn prev(self) -> Self {
    let index = Self::ALL.iter().position(|&m| m == self).unwrap_or(0);
    Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
  }
}

impl fmt::Display for Mode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mode '{0}', expected one of: alphanumeric, 8bit, shiftjis")]
pub struct ParseModeError(String);

impl FromStr for Mode {
  type Err = ParseModeError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
      .ok_or_else(|| ParseModeError(s.to_string()))
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
  #[error("'{ch}' cannot be encoded in {mode} mode")]
  UnsupportedCharacter { ch: char, mode: Mode },
  #[error("{count} characters do not fit the {mode} character count")]
  CountOverflow { count: usize, mode: Mode },
  #[error("encoded data needs {bits} cells but the grid only has {capacity}")]
  CapacityExceeded { bits: usize, capacity: usize },
  #[error("encoder returned a malformed grid: {0}")]
  Shape(#[from] GridShapeError),
  #[error("encoder failed: {0}")]
  Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodeRequest {
  pub text: String,
  pub mode: Mode,
}

impl EncodeRequest {
  pub fn new(text: impl Into<String>, mode: Mode) -> Self {
    Self {
      text: text.into(),
      mode,
    }
  }
}

/// Text-to-grid capability.
///
/// Output is deliberately unchecked: the bridge owns shape validation, so
/// implementations only need to be deterministic and side-effect free.
pub trait Encoder {
  fn encode(&self, text: &str, mode: Mode) -> Result<Vec<Vec<bool>>, EncodeError>;
}

impl<F> Encoder for F
where
  F: Fn(&str, Mode) -> Result<Vec<Vec<bool>>, EncodeError>,
{
  fn encode(&self, text: &str, mode: Mode) -> Result<Vec<Vec<bool>>, EncodeError> {
    self(text, mode)
  }
}

#[derive(Debug, Clone, Default)]
pub struct EncodeBridge<E> {
  encoder: E,
}

impl<E: Encoder> EncodeBridge<E> {
  pub fn new(encoder: E) -> Self {
    Self { encoder }
  }

  /// Run the encoder and return a complete grid, or an error and nothing.
  pub fn run(&self, request: &EncodeRequest) -> Result<Grid, EncodeError> {
    log::debug!(
      "encoding {} chars in {} mode",
      request.text.chars().count(),
      request.mode
    );
    let cells = self.encoder.encode(&request.text, request.mode)?;
    Ok(Grid::try_from(cells)?)
  }
}
