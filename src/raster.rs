//! The finished raster, shaped for a blit or a texture upload.

use alloc::vec::Vec;

use pixel_formats::r8g8b8a8_Srgb;

/// A decoded image as one packed byte buffer plus the numbers a display
/// surface wants alongside it.
///
/// * `bytes` holds `height` rows of `pitch` bytes each, top row first.
/// * `pitch = width * (bits_per_pixel / 8)`; rows are not padded.
/// * The default decode path always produces `bits_per_pixel = 32` RGBA
///   data, one byte per channel, alpha last.
///
/// The struct takes no opinion on whether row 0 displays at the top or the
/// bottom; that's between you and your graphics API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RasterImage {
  /// Width in pixels.
  pub width: u32,
  /// Height in pixels.
  pub height: u32,
  /// Bytes from one row to the next.
  pub pitch: u32,
  /// Bits for one whole pixel: 8, 16, 24, or 32.
  pub bits_per_pixel: u8,
  /// The pixel data, `height * pitch` bytes.
  pub bytes: Vec<u8>,
}
impl RasterImage {
  /// Packages an RGBA8 buffer produced by the pipeline.
  #[inline]
  #[must_use]
  pub(crate) fn from_rgba8(width: u32, height: u32, bytes: Vec<u8>) -> Self {
    debug_assert_eq!(bytes.len(), height as usize * width as usize * 4);
    Self { width, height, pitch: width * 4, bits_per_pixel: 32, bytes }
  }

  /// Views the buffer as typed RGBA pixels.
  ///
  /// ## Panics
  /// * If the image isn't 32 bits per pixel (the default decode always is).
  #[inline]
  #[must_use]
  pub fn pixels_rgba8(&self) -> &[r8g8b8a8_Srgb] {
    assert_eq!(self.bits_per_pixel, 32);
    bytemuck::cast_slice(&self.bytes)
  }

  /// Gets one pixel, or `None` when `x`/`y` is out of bounds.
  ///
  /// Row-major: `index = y * width + x`, same as the byte layout.
  #[inline]
  #[must_use]
  pub fn get(&self, x: u32, y: u32) -> Option<&r8g8b8a8_Srgb> {
    if x < self.width && y < self.height {
      self.pixels_rgba8().get((y * self.width + x) as usize)
    } else {
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn shape_invariants() {
    let image = RasterImage::from_rgba8(3, 2, alloc::vec![0; 24]);
    assert_eq!(image.pitch, 12);
    assert_eq!(image.bits_per_pixel, 32);
    assert_eq!(image.bytes.len(), (image.height * image.pitch) as usize);
    assert_eq!(image.pixels_rgba8().len(), 6);
  }

  #[test]
  fn pixel_access() {
    let mut bytes = Vec::new();
    for i in 0..6_u8 {
      bytes.extend_from_slice(&[i, 0, 0, 255]);
    }
    let image = RasterImage::from_rgba8(3, 2, bytes);
    assert_eq!(image.get(0, 0).unwrap().r, 0);
    assert_eq!(image.get(2, 1).unwrap().r, 5);
    assert!(image.get(3, 0).is_none());
    assert!(image.get(0, 2).is_none());
  }
}
