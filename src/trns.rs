//! `tRNS`: transparency data.

#![allow(nonstandard_style)]

use crate::util::u16_be;

/// `tRNS`: Transparency.
///
/// * For greyscale and truecolor images this is a single color key, stored
///   as `u16` fields even when the image bit depth is lower. Samples that
///   match the key exactly become fully transparent; everything else is
///   fully opaque.
/// * For indexed color it's an alpha value per palette entry. The table may
///   be shorter than the palette; missing entries count as 255.
///
/// The parser picks a variant from the payload length, so a 2 or 6 byte
/// index table comes out as `Y`/`RGB`. [`index_alpha`](Self::index_alpha)
/// reads all three variants as a table, which un-does that ambiguity for
/// indexed images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum tRNS<'b> {
  Y { y: u16 },
  RGB { r: u16, g: u16, b: u16 },
  Index { data: &'b [u8] },
}
impl<'b> tRNS<'b> {
  /// Parses a tRNS payload by its length.
  #[inline]
  #[must_use]
  pub fn from_payload(data: &'b [u8]) -> Self {
    match data.len() {
      2 => Self::Y { y: u16_be(data) },
      6 => Self::RGB { r: u16_be(&data[0..2]), g: u16_be(&data[2..4]), b: u16_be(&data[4..6]) },
      _ => Self::Index { data },
    }
  }

  /// The alpha for palette entry `i`, treating any variant as a table.
  ///
  /// Entries past the end of the table are fully opaque.
  #[inline]
  #[must_use]
  pub fn index_alpha(&self, i: usize) -> u8 {
    match self {
      Self::Index { data } => data.get(i).copied().unwrap_or(255),
      Self::Y { y } => {
        let table = y.to_be_bytes();
        table.get(i).copied().unwrap_or(255)
      }
      Self::RGB { r, g, b } => {
        let [r0, r1] = r.to_be_bytes();
        let [g0, g1] = g.to_be_bytes();
        let [b0, b1] = b.to_be_bytes();
        let table = [r0, r1, g0, g1, b0, b1];
        table.get(i).copied().unwrap_or(255)
      }
    }
  }

  /// The grey color key, if this is the `Y` variant.
  #[inline]
  #[must_use]
  pub const fn grey_key(&self) -> Option<u16> {
    match self {
      Self::Y { y } => Some(*y),
      _ => None,
    }
  }

  /// The RGB color key, if this is the `RGB` variant.
  #[inline]
  #[must_use]
  pub const fn rgb_key(&self) -> Option<[u16; 3]> {
    match self {
      Self::RGB { r, g, b } => Some([*r, *g, *b]),
      _ => None,
    }
  }
}
