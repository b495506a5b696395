//! Slicing the inflated stream into reduced images.

use alloc::vec::Vec;

use crate::{
  error::{PngError, PngResult},
  ihdr::IHDR,
};

/// One reduced image: the whole picture when not interlaced, or a single
/// Adam7 pass.
///
/// Filter bytes are stored apart from the pixel bytes, one per row, so the
/// later stages never have to step around them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReducedImage {
  /// 0 for the full (non-interlaced) image, 1 through 7 for an Adam7 pass.
  pub image_level: usize,
  /// Width in pixels. Never 0; empty passes aren't materialized.
  pub width: u32,
  /// Height in scanlines. Never 0.
  pub height: u32,
  /// Samples in one pixel.
  pub samples_per_pixel: usize,
  /// Bits per sample. The splitter records the header's depth; exploding
  /// packed samples raises it to 8.
  pub bit_depth: u8,
  /// Bytes in one (packed) scanline, filter byte not included.
  pub scanline_bytes: usize,
  /// One filter type byte per scanline.
  pub filter_bytes: Vec<u8>,
  /// `height * scanline_bytes` of filtered (later: reconstructed) samples.
  pub pixel_bytes: Vec<u8>,
}
impl ReducedImage {
  /// Bytes one sample occupies: 2 at bit depth 16, otherwise 1.
  #[inline]
  #[must_use]
  pub const fn bytes_per_sample(&self) -> usize {
    if self.bit_depth == 16 {
      2
    } else {
      1
    }
  }
}

/// Partitions the inflated data stream into its reduced images.
///
/// Each row is one filter byte followed by the packed scanline. Passes with
/// zero width or height occupy no bytes and produce no entry. The input must
/// be exactly the predicted filtered size; the inflater already guarantees
/// that, so a mismatch here means the caller fed the wrong buffer.
///
/// ## Failure
/// * `BadFilterType` when a row leads with a byte above 4.
/// * `InflateSizeMismatch` when the buffer doesn't carve up exactly.
pub fn split_reduced_images(ihdr: &IHDR, inflated: Vec<u8>) -> PngResult<Vec<ReducedImage>> {
  let mut rest = inflated.as_slice();
  let mut out = Vec::new();
  for (image_level, width, height) in ihdr.reduced_image_levels() {
    if width == 0 || height == 0 {
      continue;
    }
    let scanline_bytes = ihdr.format.bytes_per_scanline(width);
    let mut filter_bytes = Vec::with_capacity(height as usize);
    let mut pixel_bytes = Vec::with_capacity(height as usize * scanline_bytes);
    for _ in 0..height {
      if rest.len() < 1 + scanline_bytes {
        return Err(PngError::InflateSizeMismatch);
      }
      let (row, tail) = rest.split_at(1 + scanline_bytes);
      match row[0] {
        f @ 0..=4 => filter_bytes.push(f),
        other => return Err(PngError::BadFilterType(other)),
      }
      pixel_bytes.extend_from_slice(&row[1..]);
      rest = tail;
    }
    out.push(ReducedImage {
      image_level,
      width,
      height,
      samples_per_pixel: ihdr.format.samples_per_pixel(),
      bit_depth: ihdr.format.bit_depth(),
      scanline_bytes,
      filter_bytes,
      pixel_bytes,
    });
  }
  if !rest.is_empty() {
    return Err(PngError::InflateSizeMismatch);
  }
  Ok(out)
}
