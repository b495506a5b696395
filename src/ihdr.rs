//! `IHDR`: the image header, and the pixel format math every later stage
//! leans on.

use crate::{
  adam7::reduced_image_dimensions,
  error::{PngError, PngResult},
  raw_chunk::ChunkTy,
  util::u32_be,
};

/// The pixel formats a PNG can legally declare.
///
/// This combines a color type with a bit depth per sample, and only the
/// combinations the format allows exist as variants, so "disallowed
/// `(colorType, bitDepth)` pair" is unrepresentable after header parsing.
///
/// * The greyscale (`Y`) and indexed (`I`) formats allow 1, 2, or 4 bit
///   samples. Those are tightly packed into bytes, left-most sample in the
///   highest bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum PixelFormat {
  Y1,
  Y2,
  Y4,
  Y8,
  Y16,
  RGB8,
  RGB16,
  I1,
  I2,
  I4,
  I8,
  YA8,
  YA16,
  RGBA8,
  RGBA16,
}
impl PixelFormat {
  /// Builds the format from the header's raw `colorType` and `bitDepth`
  /// fields, rejecting pairs outside the allowed set.
  #[inline]
  pub const fn from_color_type_and_bit_depth(color_type: u8, bit_depth: u8) -> PngResult<Self> {
    Ok(match (color_type, bit_depth) {
      (0, 1) => Self::Y1,
      (0, 2) => Self::Y2,
      (0, 4) => Self::Y4,
      (0, 8) => Self::Y8,
      (0, 16) => Self::Y16,
      (2, 8) => Self::RGB8,
      (2, 16) => Self::RGB16,
      (3, 1) => Self::I1,
      (3, 2) => Self::I2,
      (3, 4) => Self::I4,
      (3, 8) => Self::I8,
      (4, 8) => Self::YA8,
      (4, 16) => Self::YA16,
      (6, 8) => Self::RGBA8,
      (6, 16) => Self::RGBA16,
      _ => return Err(PngError::InvalidHeader("disallowed colorType/bitDepth pair")),
    })
  }

  /// Bits per sample as declared in the header: 1, 2, 4, 8, or 16.
  #[inline]
  #[must_use]
  pub const fn bit_depth(self) -> u8 {
    match self {
      Self::Y1 | Self::I1 => 1,
      Self::Y2 | Self::I2 => 2,
      Self::Y4 | Self::I4 => 4,
      Self::Y8 | Self::I8 | Self::RGB8 | Self::YA8 | Self::RGBA8 => 8,
      Self::Y16 | Self::RGB16 | Self::YA16 | Self::RGBA16 => 16,
    }
  }

  /// Samples per pixel: greyscale and indexed 1, grey+alpha 2, truecolor 3,
  /// truecolor+alpha 4.
  #[inline]
  #[must_use]
  pub const fn samples_per_pixel(self) -> usize {
    match self {
      Self::Y1 | Self::Y2 | Self::Y4 | Self::Y8 | Self::Y16 => 1,
      Self::I1 | Self::I2 | Self::I4 | Self::I8 => 1,
      Self::YA8 | Self::YA16 => 2,
      Self::RGB8 | Self::RGB16 => 3,
      Self::RGBA8 | Self::RGBA16 => 4,
    }
  }

  /// If this is one of the indexed-color formats.
  #[inline]
  #[must_use]
  pub const fn is_indexed(self) -> bool {
    matches!(self, Self::I1 | Self::I2 | Self::I4 | Self::I8)
  }

  /// Bits for one whole pixel in the data stream.
  #[inline]
  #[must_use]
  pub const fn bits_per_pixel(self) -> usize {
    self.samples_per_pixel() * self.bit_depth() as usize
  }

  /// The byte stride the scanline filters use.
  ///
  /// `ceil(bits_per_pixel / 8)`, which is never less than 1 since every
  /// format carries at least one bit per pixel. Filters operate on the
  /// packed byte stream, so sub-byte formats filter at a stride of one byte.
  #[inline]
  #[must_use]
  pub const fn filter_bpp(self) -> usize {
    (self.bits_per_pixel() + 7) / 8
  }

  /// Given an image's *pixel* width, the *bytes* of one packed scanline.
  ///
  /// This does not include the scanline's leading filter byte.
  #[inline]
  #[must_use]
  pub const fn bytes_per_scanline(self, width: u32) -> usize {
    (width as usize * self.bits_per_pixel() + 7) / 8
  }
}

/// `IHDR`: Image header.
///
/// The first chunk of every PNG. Parsed once, then shared read-only with
/// every later pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IHDR {
  /// Width in pixels, 1 to `i32::MAX`.
  pub width: u32,
  /// Height in pixels, 1 to `i32::MAX`.
  pub height: u32,
  /// Format of the pixels.
  pub format: PixelFormat,
  /// If the pixel data is interlaced with Adam7.
  pub is_interlaced: bool,
}
impl IHDR {
  /// Parses the 13-byte IHDR payload.
  ///
  /// ## Failure
  /// * `PayloadOverrun` / `PayloadUnderrun` when the payload isn't exactly
  ///   13 bytes.
  /// * `InvalidHeader` for zero or oversized dimensions, a disallowed
  ///   `(colorType, bitDepth)` pair, or unknown compression / filter /
  ///   interlace methods.
  pub fn from_payload(data: &[u8]) -> PngResult<Self> {
    match data.len() {
      13 => (),
      n if n < 13 => return Err(PngError::PayloadOverrun(ChunkTy::IHDR)),
      _ => return Err(PngError::PayloadUnderrun(ChunkTy::IHDR)),
    }
    let width = u32_be(&data[0..4]);
    let height = u32_be(&data[4..8]);
    if width == 0 || width > i32::MAX as u32 {
      return Err(PngError::InvalidHeader("width out of range"));
    }
    if height == 0 || height > i32::MAX as u32 {
      return Err(PngError::InvalidHeader("height out of range"));
    }
    let format = PixelFormat::from_color_type_and_bit_depth(data[9], data[8])?;
    if data[10] != 0 {
      return Err(PngError::InvalidHeader("unknown compression method"));
    }
    if data[11] != 0 {
      return Err(PngError::InvalidHeader("unknown filter method"));
    }
    let is_interlaced = match data[12] {
      0 => false,
      1 => true,
      _ => return Err(PngError::InvalidHeader("unknown interlace method")),
    };
    Ok(Self { width, height, format, is_interlaced })
  }

  /// The exact number of bytes the inflated IDAT stream must hold.
  ///
  /// Per reduced image this is `height * (1 + bytes_per_scanline(width))`;
  /// a reduced image with zero width or height contributes nothing. The
  /// inflater pre-sizes its output buffer to this and demands a perfect
  /// fit.
  #[inline]
  #[must_use]
  pub fn predicted_filtered_size(self) -> usize {
    let mut total = 0_usize;
    for (_, width, height) in self.reduced_image_levels() {
      if width == 0 || height == 0 {
        continue;
      }
      let bytes_per_filterline = 1 + self.format.bytes_per_scanline(width);
      total += bytes_per_filterline.saturating_mul(height as usize);
    }
    total
  }

  /// The `(image_level, width, height)` of each reduced image the data
  /// stream carries: the full image alone, or the seven Adam7 passes.
  /// Levels as in
  /// [interlaced_pos_to_full_pos](crate::adam7::interlaced_pos_to_full_pos).
  #[inline]
  pub(crate) fn reduced_image_levels(self) -> impl Iterator<Item = (usize, u32, u32)> {
    let dims = reduced_image_dimensions(self.width, self.height);
    let range = if self.is_interlaced { 1..8 } else { 0..1 };
    range.map(move |i| (i, dims[i].0, dims[i].1))
  }
}
