//! Undoing the per-scanline filters.
//!
//! From the PNG spec:
//!
//! > Filters are applied to **bytes**, not to pixels, regardless of the bit
//! > depth or color type of the image.
//!
//! So the whole stage works at byte granularity with a stride of
//! [`filter_bpp`](crate::ihdr::PixelFormat::filter_bpp) bytes, and it runs
//! *before* packed samples get exploded.

use crate::{
  error::{PngError, PngResult},
  reduced::ReducedImage,
};

/// Reconstruct Filter Type 1 ("Sub").
///
/// * `fx` filtered X
/// * `ra` reconstructed `a`, the byte one stride to the left (0 at the left
///   edge)
#[inline]
const fn reconstruct_sub(fx: u8, ra: u8) -> u8 {
  fx.wrapping_add(ra)
}

/// Reconstruct Filter Type 2 ("Up").
///
/// * `fx` filtered X
/// * `rb` reconstructed `b`, the corresponding byte of the previous scanline
///   (0 on the first line)
#[inline]
const fn reconstruct_up(fx: u8, rb: u8) -> u8 {
  fx.wrapping_add(rb)
}

/// Reconstruct Filter Type 3 ("Average").
///
/// The average of `a` and `b` is taken in u32 math; the spec requires that
/// the sum not wrap before halving.
#[inline]
const fn reconstruct_average(fx: u8, ra: u8, rb: u8) -> u8 {
  fx.wrapping_add(((ra as u32 + rb as u32) / 2) as u8)
}

/// Reconstruct Filter Type 4 ("Paeth").
#[inline]
const fn reconstruct_paeth(fx: u8, ra: u8, rb: u8, rc: u8) -> u8 {
  fx.wrapping_add(paeth_predict(ra, rb, rc))
}

/// The Paeth predictor: whichever of left `a`, above `b`, and upper-left `c`
/// is closest to `a + b - c`.
///
/// The spec is emphatic that the comparisons happen exactly in the order
/// written here, ties resolving toward `a`, then `b`. Math is `i32` so
/// nothing can overflow.
pub(crate) const fn paeth_predict(a: u8, b: u8, c: u8) -> u8 {
  let a_ = a as i32;
  let b_ = b as i32;
  let c_ = c as i32;
  let p = a_ + b_ - c_;
  let pa = (p - a_).abs();
  let pb = (p - b_).abs();
  let pc = (p - c_).abs();
  if pa <= pb && pa <= pc {
    a
  } else if pb <= pc {
    b
  } else {
    c
  }
}

/// Reconstructs one scanline into `cur`.
///
/// * `raw` is the filtered input row.
/// * `cur` receives the reconstructed row; `a`/`c` references within the row
///   read from it as it fills.
/// * `prev` is the reconstructed previous row, or all zeroes on the first
///   row.
fn reconstruct_scanline(
  filter: u8, raw: &[u8], cur: &mut [u8], prev: &[u8], bpp: usize,
) -> PngResult<()> {
  match filter {
    0 => cur.copy_from_slice(raw),
    1 => {
      for i in 0..raw.len() {
        let a = if i >= bpp { cur[i - bpp] } else { 0 };
        cur[i] = reconstruct_sub(raw[i], a);
      }
    }
    2 => {
      for i in 0..raw.len() {
        cur[i] = reconstruct_up(raw[i], prev[i]);
      }
    }
    3 => {
      for i in 0..raw.len() {
        let a = if i >= bpp { cur[i - bpp] } else { 0 };
        cur[i] = reconstruct_average(raw[i], a, prev[i]);
      }
    }
    4 => {
      for i in 0..raw.len() {
        let (a, c) = if i >= bpp { (cur[i - bpp], prev[i - bpp]) } else { (0, 0) };
        cur[i] = reconstruct_paeth(raw[i], a, prev[i], c);
      }
    }
    other => return Err(PngError::BadFilterType(other)),
  }
  Ok(())
}

/// Undoes the filtering of every scanline of one reduced image, in place.
///
/// Rows are processed top to bottom through a two-buffer window: the row
/// being reconstructed and the already-reconstructed row above it live in
/// separate buffers whose roles swap once a row is emitted. `bpp` is the
/// filter stride of the *packed* stream
/// ([`PixelFormat::filter_bpp`](crate::ihdr::PixelFormat::filter_bpp)).
pub fn unfilter_reduced_image(image: &mut ReducedImage, bpp: usize) -> PngResult<()> {
  let line_len = image.scanline_bytes;
  if line_len == 0 {
    return Ok(());
  }
  let mut prev = alloc::vec![0_u8; line_len];
  let mut cur = alloc::vec![0_u8; line_len];
  let rows = image.pixel_bytes.chunks_exact_mut(line_len);
  for (&filter, raw) in image.filter_bytes.iter().zip(rows) {
    reconstruct_scanline(filter, raw, &mut cur, &prev, bpp)?;
    raw.copy_from_slice(&cur);
    core::mem::swap(&mut prev, &mut cur);
  }
  // every row is reconstructed now, which is the same as all-zero filters
  image.filter_bytes.iter_mut().for_each(|f| *f = 0);
  Ok(())
}
