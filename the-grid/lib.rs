//! Core state model for the-grid: a 21×21 cell matrix that can be painted
//! by hand or filled from text.
//!
//! Nothing in this crate talks to a terminal. Pointer events come in as
//! checked [`grid::CellPos`] values and the host decides how to draw.

pub mod encode;
pub mod encoder;
pub mod grid;
pub mod messages;
pub mod paint;
pub mod persist;
pub mod session;

pub use encode::{
  EncodeError,
  EncodeRequest,
  Encoder,
  Mode,
};
pub use grid::{
  CellPos,
  Grid,
  GRID_SIZE,
};
pub use session::Session;
