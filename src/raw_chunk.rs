//! Framing: signature plus `(length, type, payload, crc)` records.

use core::fmt::{Debug, Write};

use crate::{
  crc32::png_crc32,
  error::{PngError, PngResult},
  util::u32_be,
};

/// The 8 bytes that start every PNG data stream.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Checks if the bytes begin with the PNG signature.
#[inline]
#[must_use]
pub const fn is_png_signature_correct(bytes: &[u8]) -> bool {
  matches!(bytes, [137, 80, 78, 71, 13, 10, 26, 10, ..])
}

/// A chunk's 4-byte type tag.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
#[allow(nonstandard_style)]
pub struct ChunkTy(pub [u8; 4]);
#[allow(nonstandard_style)]
#[allow(missing_docs)]
impl ChunkTy {
  pub const IHDR: Self = Self(*b"IHDR");
  pub const PLTE: Self = Self(*b"PLTE");
  pub const IDAT: Self = Self(*b"IDAT");
  pub const IEND: Self = Self(*b"IEND");
  pub const tRNS: Self = Self(*b"tRNS");
  pub const cHRM: Self = Self(*b"cHRM");
  pub const gAMA: Self = Self(*b"gAMA");
  pub const iCCP: Self = Self(*b"iCCP");
  pub const sBIT: Self = Self(*b"sBIT");
  pub const sRGB: Self = Self(*b"sRGB");
  pub const bKGD: Self = Self(*b"bKGD");
  pub const hIST: Self = Self(*b"hIST");
  pub const pHYs: Self = Self(*b"pHYs");
  pub const sPLT: Self = Self(*b"sPLT");
  pub const tIME: Self = Self(*b"tIME");
  pub const tEXt: Self = Self(*b"tEXt");
  pub const zTXt: Self = Self(*b"zTXt");
  pub const iTXt: Self = Self(*b"iTXt");

  /// If the chunk is ancillary (safe to skip when unrecognized).
  ///
  /// Bit 5 of the first type byte: set (lowercase) means ancillary, clear
  /// (uppercase) means critical.
  #[inline]
  #[must_use]
  pub const fn is_ancillary(self) -> bool {
    (self.0[0] & 0b0010_0000) != 0
  }

  /// The opposite of [`is_ancillary`](Self::is_ancillary).
  #[inline]
  #[must_use]
  pub const fn is_critical(self) -> bool {
    !self.is_ancillary()
  }
}
impl Debug for ChunkTy {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_char(self.0[0] as char)?;
    f.write_char(self.0[1] as char)?;
    f.write_char(self.0[2] as char)?;
    f.write_char(self.0[3] as char)?;
    Ok(())
  }
}

/// An unparsed chunk: type tag, payload slice, and the CRC the file claims.
#[derive(Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct RawChunk<'b> {
  pub ty: ChunkTy,
  pub data: &'b [u8],
  pub declared_crc: u32,
}
impl RawChunk<'_> {
  /// Computes the CRC this chunk *should* carry, from its type and payload.
  #[inline]
  #[must_use]
  pub fn actual_crc(&self) -> u32 {
    png_crc32(self.ty.0.iter().copied().chain(self.data.iter().copied()))
  }

  /// If the stored CRC matches the computed one.
  #[inline]
  #[must_use]
  pub fn crc_matches(&self) -> bool {
    self.declared_crc == self.actual_crc()
  }
}
impl Debug for RawChunk<'_> {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("RawChunk")
      .field("ty", &self.ty)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .field("declared_crc", &self.declared_crc)
      .finish()
  }
}

/// An iterator that produces successive raw chunks from PNG bytes.
///
/// Unlike a lenient reader that quietly stops at truncated input, this one
/// reports: a record cut off mid-way yields `Err(ShortRead)` and then the
/// iterator fuses. A clean end of input just ends the iteration; whether the
/// chunk *sequence* was complete is the ordering machine's call, not the
/// framer's.
#[derive(Debug, Clone, PartialEq)]
pub struct RawChunkIter<'b>(&'b [u8]);
impl<'b> RawChunkIter<'b> {
  /// Starts iterating the chunks of a PNG data stream.
  ///
  /// ## Failure
  /// * `SignatureMismatch` if the first 8 bytes aren't the PNG signature.
  #[inline]
  pub const fn new(png: &'b [u8]) -> PngResult<Self> {
    match png {
      [137, 80, 78, 71, 13, 10, 26, 10, rest @ ..] => Ok(Self(rest)),
      _ => Err(PngError::SignatureMismatch),
    }
  }
}
impl<'b> Iterator for RawChunkIter<'b> {
  type Item = PngResult<RawChunk<'b>>;

  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    if self.0.is_empty() {
      return None;
    }
    // any shortage from here on is a truncated record, and the iterator
    // fuses after reporting it.
    if self.0.len() < 8 {
      self.0 = &[];
      return Some(Err(PngError::ShortRead));
    }
    let (len_bytes, rest) = self.0.split_at(4);
    let chunk_len = u32_be(len_bytes) as usize;
    let (ty_bytes, rest) = rest.split_at(4);
    let ty = ChunkTy(ty_bytes.try_into().unwrap());
    if rest.len() < chunk_len {
      self.0 = &[];
      return Some(Err(PngError::ShortRead));
    }
    let (data, rest) = rest.split_at(chunk_len);
    if rest.len() < 4 {
      self.0 = &[];
      return Some(Err(PngError::ShortRead));
    }
    let (crc_bytes, rest) = rest.split_at(4);
    let declared_crc = u32_be(crc_bytes);
    self.0 = rest;
    Some(Ok(RawChunk { ty, data, declared_crc }))
  }
}
