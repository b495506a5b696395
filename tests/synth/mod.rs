//! Builders that synthesize PNG data streams in memory, so every test input
//! is constructed rather than checked in as a fixture.

use pngblit::{png_crc32, reduced_image_dimensions, PNG_SIGNATURE};

/// Wraps a payload as a chunk record: length, type, payload, CRC.
pub fn chunk(ty: [u8; 4], payload: &[u8]) -> Vec<u8> {
  let mut out = Vec::with_capacity(12 + payload.len());
  out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
  out.extend_from_slice(&ty);
  out.extend_from_slice(payload);
  let crc = png_crc32(ty.iter().copied().chain(payload.iter().copied()));
  out.extend_from_slice(&crc.to_be_bytes());
  out
}

/// Concatenates chunks behind the PNG signature.
pub fn png(chunks: &[&[u8]]) -> Vec<u8> {
  let mut out = PNG_SIGNATURE.to_vec();
  for chunk in chunks {
    out.extend_from_slice(chunk);
  }
  out
}

/// The 13-byte IHDR payload.
pub fn ihdr_payload(
  width: u32, height: u32, bit_depth: u8, color_type: u8, interlace: u8,
) -> [u8; 13] {
  let mut out = [0; 13];
  out[0..4].copy_from_slice(&width.to_be_bytes());
  out[4..8].copy_from_slice(&height.to_be_bytes());
  out[8] = bit_depth;
  out[9] = color_type;
  // compression and filter method both 0
  out[12] = interlace;
  out
}

/// A complete IHDR chunk.
pub fn ihdr(width: u32, height: u32, bit_depth: u8, color_type: u8, interlace: u8) -> Vec<u8> {
  chunk(*b"IHDR", &ihdr_payload(width, height, bit_depth, color_type, interlace))
}

/// A complete IDAT chunk holding the zlib-compressed filtered stream.
pub fn idat_from_filtered(filtered: &[u8]) -> Vec<u8> {
  chunk(*b"IDAT", &miniz_oxide::deflate::compress_to_vec_zlib(filtered, 6))
}

/// An empty IEND chunk.
pub fn iend() -> Vec<u8> {
  chunk(*b"IEND", &[])
}

/// Signature + IHDR + one IDAT + IEND, from an already-filtered stream.
pub fn simple_png(
  width: u32, height: u32, bit_depth: u8, color_type: u8, interlace: u8, filtered: &[u8],
) -> Vec<u8> {
  png(&[&ihdr(width, height, bit_depth, color_type, interlace), &idat_from_filtered(filtered), &iend()])
}

/// The filtered stream of a solid-color Adam7 truecolor image: every
/// scanline of every pass is filter type 0 followed by the same RGB value
/// for each pixel.
pub fn interlaced_solid_rgb8(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
  let dims = reduced_image_dimensions(width, height);
  let mut out = Vec::new();
  for level in 1..=7 {
    let (w, h) = dims[level];
    if w == 0 || h == 0 {
      continue;
    }
    for _ in 0..h {
      out.push(0);
      for _ in 0..w {
        out.extend_from_slice(&rgb);
      }
    }
  }
  out
}
