//! Rewriting the Adam7 passes into one raster.

use alloc::vec::Vec;

use crate::{adam7::interlaced_pos_to_full_pos, ihdr::IHDR, reduced::ReducedImage};

/// Merges the reduced images into a single `width * height` sample grid.
///
/// Takes the (already defiltered, already exploded) reduced images and
/// writes each pixel to its spot in the full image. Copies happen at pixel
/// granularity: `samples_per_pixel * bytes_per_sample` bytes each. A
/// non-interlaced image is a single level-0 reduced image and just moves
/// out.
///
/// The output is row-major, no padding, no filter bytes: exactly
/// `height * width * samples_per_pixel * bytes_per_sample` bytes.
#[must_use]
pub fn deinterlace_reduced_images(ihdr: &IHDR, mut reduced: Vec<ReducedImage>) -> Vec<u8> {
  if !ihdr.is_interlaced {
    debug_assert_eq!(reduced.len(), 1);
    return match reduced.pop() {
      Some(image) => image.pixel_bytes,
      None => Vec::new(),
    };
  }
  let full_width = ihdr.width as usize;
  let pixel_size = match reduced.first() {
    Some(image) => image.samples_per_pixel * image.bytes_per_sample(),
    None => return Vec::new(),
  };
  let mut out = alloc::vec![0_u8; ihdr.height as usize * full_width * pixel_size];
  for image in &reduced {
    for y in 0..image.height {
      let row_start = y as usize * image.scanline_bytes;
      for x in 0..image.width {
        let (full_x, full_y) = interlaced_pos_to_full_pos(image.image_level, x, y);
        let src = row_start + x as usize * pixel_size;
        let dst = (full_y as usize * full_width + full_x as usize) * pixel_size;
        out[dst..dst + pixel_size].copy_from_slice(&image.pixel_bytes[src..src + pixel_size]);
      }
    }
  }
  out
}
