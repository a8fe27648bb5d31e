//! Built-in text encoder.
//!
//! A small, readable segment encoder for experimenting with how text turns
//! into cells. It borrows the idea of a mode indicator, a character count
//! and mode-specific compaction, but it is not a barcode standard: there
//! are no finder patterns, no error correction and no masking. Bits are
//! laid out row-major from the top-left cell and the rest of the grid is
//! left empty.

use crate::{
  encode::{
    EncodeError,
    Encoder,
    Mode,
  },
  grid::{
    CELL_COUNT,
    GRID_SIZE,
  },
};

const ALPHANUMERIC: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

const MODE_INDICATOR_BITS: usize = 4;

fn mode_indicator(mode: Mode) -> u32 {
  match mode {
    Mode::Alphanumeric => 0b0010,
    Mode::EightBit => 0b0100,
    Mode::ShiftJis => 0b1000,
  }
}

fn count_bits(mode: Mode) -> usize {
  match mode {
    Mode::Alphanumeric => 9,
    Mode::EightBit | Mode::ShiftJis => 8,
  }
}

#[derive(Debug, Default)]
struct BitWriter {
  bits: Vec<bool>,
}

impl BitWriter {
  /// Append the low `width` bits of `value`, most significant first.
  fn push(&mut self, value: u32, width: usize) {
    self
      .bits
      .extend((0..width).rev().map(|shift| (value >> shift) & 1 == 1));
  }

  fn len(&self) -> usize {
    self.bits.len()
  }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentEncoder;

impl SegmentEncoder {
  pub fn new() -> Self {
    Self
  }

  fn alphanumeric(text: &str) -> Result<(usize, Vec<(u32, usize)>), EncodeError> {
    let values = text
      .chars()
      .map(|ch| {
        ALPHANUMERIC
          .find(ch)
          .map(|index| index as u32)
          .ok_or(EncodeError::UnsupportedCharacter {
            ch,
            mode: Mode::Alphanumeric,
          })
      })
      .collect::<Result<Vec<_>, _>>()?;

    let words = values
      .chunks(2)
      .map(|pair| match (pair.first(), pair.get(1)) {
        (Some(&a), Some(&b)) => (a * 45 + b, 11),
        (Some(&a), None) => (a, 6),
        (None, _) => (0, 0),
      })
      .collect();
    Ok((values.len(), words))
  }

  fn eight_bit(text: &str) -> (usize, Vec<(u32, usize)>) {
    let words = text.bytes().map(|byte| (u32::from(byte), 8)).collect();
    (text.len(), words)
  }

  fn shift_jis(text: &str) -> Result<(usize, Vec<(u32, usize)>), EncodeError> {
    let mut buf = [0u8; 4];
    let words = text
      .chars()
      .map(|ch| {
        let unsupported = EncodeError::UnsupportedCharacter {
          ch,
          mode: Mode::ShiftJis,
        };
        let (bytes, _, had_errors) = encoding_rs::SHIFT_JIS.encode(ch.encode_utf8(&mut buf));
        let &[hi, lo] = &*bytes else {
          return Err(unsupported);
        };
        if had_errors {
          return Err(unsupported);
        }

        let code = u32::from(u16::from_be_bytes([hi, lo]));
        let offset = match code {
          0x8140..=0x9FFC => code - 0x8140,
          0xE040..=0xEBBF => code - 0xC140,
          _ => return Err(unsupported),
        };
        Ok(((offset >> 8) * 0xC0 + (offset & 0xFF), 13))
      })
      .collect::<Result<Vec<_>, _>>()?;
    Ok((words.len(), words))
  }
}

impl Encoder for SegmentEncoder {
  fn encode(&self, text: &str, mode: Mode) -> Result<Vec<Vec<bool>>, EncodeError> {
    let (count, words) = match mode {
      Mode::Alphanumeric => Self::alphanumeric(text)?,
      Mode::EightBit => Self::eight_bit(text),
      Mode::ShiftJis => Self::shift_jis(text)?,
    };

    let width = count_bits(mode);
    if count >= 1 << width {
      return Err(EncodeError::CountOverflow { count, mode });
    }

    let mut writer = BitWriter::default();
    writer.push(mode_indicator(mode), MODE_INDICATOR_BITS);
    writer.push(count as u32, width);
    for (value, bits) in words {
      writer.push(value, bits);
    }

    if writer.len() > CELL_COUNT {
      return Err(EncodeError::CapacityExceeded {
        bits:     writer.len(),
        capacity: CELL_COUNT,
      });
    }

    let mut cells = writer.bits;
    cells.resize(CELL_COUNT, false);
    Ok(cells.chunks(GRID_SIZE).map(<[bool]>::to_vec).collect())
  }
}
