//! Unpacking sub-byte samples to one byte each.

use alloc::vec::Vec;

use crate::reduced::ReducedImage;

/// Expands packed 1/2/4-bit samples so every sample owns a whole byte.
///
/// Samples sit MSB-first within each packed byte, and a scanline's last byte
/// may carry padding bits that are dropped here. The raw value lands in the
/// low bits of the output byte (a 4-bit sample of 0b1010 becomes
/// `0b0000_1010`); scaling values up to full 8-bit range is the normalizer's
/// job, because indexed samples must *not* be scaled.
///
/// Images at bit depth 8 or 16 pass through untouched. Afterwards the image
/// reports bit depth 8, one byte per sample.
pub fn explode_packed_samples(image: &mut ReducedImage) {
  let depth = image.bit_depth as usize;
  if depth >= 8 {
    return;
  }
  // only greyscale and indexed formats pack, and both are 1 sample/pixel
  debug_assert_eq!(image.samples_per_pixel, 1);
  let out_line = image.width as usize;
  let mut out = Vec::with_capacity(image.height as usize * out_line);
  let low_mask = (1_u8 << depth) - 1;
  let per_byte = 8 / depth;
  for line in image.pixel_bytes.chunks_exact(image.scanline_bytes) {
    let mut produced = 0;
    'row: for &packed in line {
      for k in 0..per_byte {
        if produced == out_line {
          break 'row;
        }
        let down_shift = 8 - depth * (k + 1);
        out.push((packed >> down_shift) & low_mask);
        produced += 1;
      }
    }
  }
  image.pixel_bytes = out;
  image.scanline_bytes = out_line;
  image.bit_depth = 8;
}
