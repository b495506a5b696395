//! Bit-depth reduction and color-type expansion: anything in, RGBA8 out.

use alloc::vec::Vec;

use bitfrob::u8_replicate_bits;

use crate::{
  error::{PngError, PngResult},
  ihdr::{IHDR, PixelFormat},
  plte::PLTE,
  trns::tRNS,
  util::u16_be,
};

/// Reduces one 16-bit sample to 8 bits.
///
/// `(v * 255) / 65535` with plain integer truncation. Reference decoders use
/// this scale rather than taking the high byte, and the two disagree by one
/// for about half the input range, so the division is not optional.
#[inline]
#[must_use]
pub const fn scale_16_to_8(v: u16) -> u8 {
  ((v as u32 * 255) / 65535) as u8
}

/// Scales a sample of `depth` bits (stored in the low bits of a byte) to the
/// full 8-bit range.
#[inline]
#[must_use]
fn scale_low_depth_to_8(depth: u8, v: u8) -> u8 {
  if depth >= 8 {
    v
  } else {
    u8_replicate_bits(depth as u32, v)
  }
}

/// Expands a full sample grid into `width * height * 4` RGBA8 bytes.
///
/// Two sub-stages, run in order:
///
/// 1. 16-bit samples reduce to 8 via [scale_16_to_8]. (Samples below 8 bits
///    were already exploded to byte-per-sample, still at their raw values.)
/// 2. The color type expands to RGBA: palette lookups for indexed, grey
///    replication for greyscale, an opaque alpha channel wherever the source
///    has none. A `tRNS` chunk supplies per-palette-entry alpha, or a color
///    key that turns exact-match pixels fully transparent.
///
/// The `samples` grid must already be defiltered, exploded, and
/// deinterlaced.
pub fn normalize_to_rgba8(
  ihdr: &IHDR, samples: Vec<u8>, plte: Option<&PLTE<'_>>, trns: Option<&tRNS<'_>>,
) -> PngResult<Vec<u8>> {
  let depth = ihdr.format.bit_depth();
  let samples8: Vec<u8> = if depth == 16 {
    samples.chunks_exact(2).map(|pair| scale_16_to_8(u16_be(pair))).collect()
  } else {
    samples
  };
  //
  let pixel_count = ihdr.width as usize * ihdr.height as usize;
  let mut out = Vec::with_capacity(pixel_count * 4);
  match ihdr.format {
    PixelFormat::Y1
    | PixelFormat::Y2
    | PixelFormat::Y4
    | PixelFormat::Y8
    | PixelFormat::Y16 => {
      let key = grey_key_at_depth(depth, trns);
      for &raw in samples8.iter() {
        let alpha = if key == Some(raw) { 0 } else { 255 };
        let y = scale_low_depth_to_8(depth, raw);
        out.extend_from_slice(&[y, y, y, alpha]);
      }
    }
    PixelFormat::YA8 | PixelFormat::YA16 => {
      for pair in samples8.chunks_exact(2) {
        out.extend_from_slice(&[pair[0], pair[0], pair[0], pair[1]]);
      }
    }
    PixelFormat::RGB8 | PixelFormat::RGB16 => {
      let key = rgb_key_at_depth(depth, trns);
      for rgb in samples8.chunks_exact(3) {
        let alpha = if key == Some([rgb[0], rgb[1], rgb[2]]) { 0 } else { 255 };
        out.extend_from_slice(&[rgb[0], rgb[1], rgb[2], alpha]);
      }
    }
    PixelFormat::RGBA8 | PixelFormat::RGBA16 => {
      out.extend_from_slice(&samples8);
    }
    PixelFormat::I1 | PixelFormat::I2 | PixelFormat::I4 | PixelFormat::I8 => {
      let entries = match plte {
        Some(plte) => plte.entries(),
        None => return Err(PngError::MissingPalette),
      };
      for &index in samples8.iter() {
        let [r, g, b] = match entries.get(index as usize) {
          Some(rgb) => *rgb,
          None => return Err(PngError::PaletteIndexOutOfRange),
        };
        let alpha = match trns {
          Some(table) => table.index_alpha(index as usize),
          None => 255,
        };
        out.extend_from_slice(&[r, g, b, alpha]);
      }
    }
  }
  debug_assert_eq!(out.len(), pixel_count * 4);
  Ok(out)
}

/// The grey color key, brought to the sample representation stage 2 sees:
/// masked to the bit depth below 8, reduced alongside the samples at 16.
fn grey_key_at_depth(depth: u8, trns: Option<&tRNS<'_>>) -> Option<u8> {
  let key = trns.and_then(tRNS::grey_key)?;
  Some(match depth {
    16 => scale_16_to_8(key),
    8 => key as u8,
    _ => key as u8 & ((1 << depth) - 1),
  })
}

/// As [grey_key_at_depth], for the truecolor key. Only depths 8 and 16
/// apply.
fn rgb_key_at_depth(depth: u8, trns: Option<&tRNS<'_>>) -> Option<[u8; 3]> {
  let [r, g, b] = trns.and_then(tRNS::rgb_key)?;
  Some(if depth == 16 {
    [scale_16_to_8(r), scale_16_to_8(g), scale_16_to_8(b)]
  } else {
    [r as u8, g as u8, b as u8]
  })
}
