//! `PLTE`: the palette.

use core::fmt::Debug;

use crate::{
  error::{PngError, PngResult},
  raw_chunk::ChunkTy,
};

/// Palette data. Entries are always RGB triples.
///
/// * Required for indexed-color images, where samples are indexes into this
///   table. Transparency for palette entries rides in a separate `tRNS`
///   chunk.
/// * Optional for truecolor images, where it's only a quantization hint.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PLTE<'b>(&'b [[u8; 3]]);
impl<'b> PLTE<'b> {
  /// Parses a PLTE payload: 1 to 256 RGB triples, nothing left over.
  #[inline]
  pub fn from_payload(data: &'b [u8]) -> PngResult<Self> {
    if data.is_empty() || data.len() % 3 != 0 {
      return Err(PngError::PayloadUnderrun(ChunkTy::PLTE));
    }
    let entries: &[[u8; 3]] = bytemuck::cast_slice(data);
    if entries.len() > 256 {
      return Err(PngError::PayloadUnderrun(ChunkTy::PLTE));
    }
    Ok(Self(entries))
  }

  /// Gets the entries as a slice.
  #[inline]
  #[must_use]
  pub const fn entries(&self) -> &'b [[u8; 3]] {
    self.0
  }
}
impl Debug for PLTE<'_> {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    // prints no more than 4 palette entries
    f.debug_tuple("PLTE").field(&&self.0[..self.0.len().min(4)]).field(&self.0.len()).finish()
  }
}
