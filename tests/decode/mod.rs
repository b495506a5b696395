//! End-to-end decode scenarios over synthesized PNG files.

use pngblit::{decode_rgba8, ChunkStage, ChunkTy, PngError};

use crate::synth::*;

/// Flattens `(r, g, b, a)` pixel tuples for comparing against raster bytes.
fn rgba_bytes(pixels: &[(u8, u8, u8, u8)]) -> Vec<u8> {
  pixels.iter().flat_map(|&(r, g, b, a)| [r, g, b, a]).collect()
}

#[test]
fn single_red_truecolor_pixel() {
  let bytes = simple_png(1, 1, 8, 2, 0, &[0, 255, 0, 0]);
  let image = decode_rgba8(&bytes).unwrap();
  assert_eq!(image.width, 1);
  assert_eq!(image.height, 1);
  assert_eq!(image.bits_per_pixel, 32);
  assert_eq!(image.pitch, 4);
  assert_eq!(image.bytes, &[255, 0, 0, 255]);
}

#[test]
fn one_bit_greyscale_checker() {
  let bytes = simple_png(2, 2, 1, 0, 0, &[0, 0b1000_0000, 0, 0b0100_0000]);
  let image = decode_rgba8(&bytes).unwrap();
  assert_eq!(
    image.bytes,
    rgba_bytes(&[(255, 255, 255, 255), (0, 0, 0, 255), (0, 0, 0, 255), (255, 255, 255, 255)])
  );
}

#[test]
fn indexed_three_by_three() {
  let palette = [10, 20, 30, 40, 50, 60];
  let filtered = [0, 0, 1, 0, 0, 1, 0, 1, 0, 0, 1, 0];
  let bytes = png(&[
    &ihdr(3, 3, 8, 3, 0),
    &chunk(*b"PLTE", &palette),
    &idat_from_filtered(&filtered),
    &iend(),
  ]);
  let image = decode_rgba8(&bytes).unwrap();
  let a = (10, 20, 30, 255);
  let b = (40, 50, 60, 255);
  assert_eq!(image.bytes, rgba_bytes(&[a, b, a, b, a, b, a, b, a]));
  assert_eq!(image.bytes.len() as u32, image.height * image.pitch);
}

#[test]
fn adam7_solid_color() {
  let filtered = interlaced_solid_rgb8(4, 4, [100, 150, 200]);
  let bytes = simple_png(4, 4, 8, 2, 1, &filtered);
  let image = decode_rgba8(&bytes).unwrap();
  assert_eq!(image.width, 4);
  assert_eq!(image.height, 4);
  assert_eq!(image.bytes, rgba_bytes(&[(100, 150, 200, 255); 16]));
}

#[test]
fn flipped_ihdr_crc_is_fatal() {
  let mut header = ihdr(1, 1, 8, 2, 0);
  let last = header.len() - 1;
  header[last] ^= 0xFF;
  let bytes = png(&[&header, &idat_from_filtered(&[0, 255, 0, 0]), &iend()]);
  assert_eq!(decode_rgba8(&bytes), Err(PngError::CrcMismatch(ChunkTy::IHDR)));
}

#[test]
fn unknown_compression_method_is_invalid() {
  let mut payload = ihdr_payload(1, 1, 8, 2, 0);
  payload[10] = 1;
  let bytes =
    png(&[&chunk(*b"IHDR", &payload), &idat_from_filtered(&[0, 255, 0, 0]), &iend()]);
  assert!(matches!(decode_rgba8(&bytes), Err(PngError::InvalidHeader(_))));
}

#[test]
fn paeth_filtered_row_end_to_end() {
  // raw greyscale row 10 20 15 15 200, Paeth-filtered by hand (with no
  // previous row, the predictor degenerates to the left neighbor).
  let bytes = simple_png(5, 1, 8, 0, 0, &[4, 10, 10, 251, 0, 185]);
  let image = decode_rgba8(&bytes).unwrap();
  let grey = |y: u8| (y, y, y, 255);
  assert_eq!(image.bytes, rgba_bytes(&[grey(10), grey(20), grey(15), grey(15), grey(200)]));
}

#[test]
fn mutated_signature_is_rejected() {
  let mut bytes = simple_png(1, 1, 8, 2, 0, &[0, 255, 0, 0]);
  bytes[0] ^= 0x01;
  assert_eq!(decode_rgba8(&bytes), Err(PngError::SignatureMismatch));
}

#[test]
fn mutated_critical_payload_never_decodes_silently() {
  // flip a byte inside the IHDR *payload*, leaving the stored CRC alone.
  let mut bytes = simple_png(2, 2, 8, 2, 0, &[0; 2 * (1 + 6)]);
  bytes[8 + 8 + 3] ^= 0x04; // low byte of width
  assert_eq!(decode_rgba8(&bytes), Err(PngError::CrcMismatch(ChunkTy::IHDR)));
}

#[test]
fn sixteen_bit_rgba_pixels() {
  let mut filtered = vec![0_u8];
  for v in [0xFFFF_u16, 0x0000, 0x8080, 0xFFFF, 0x0000, 0x0000, 0x0000, 0xFFFF] {
    filtered.extend_from_slice(&v.to_be_bytes());
  }
  let bytes = simple_png(2, 1, 16, 6, 0, &filtered);
  let image = decode_rgba8(&bytes).unwrap();
  assert_eq!(image.bytes, rgba_bytes(&[(255, 0, 128, 255), (0, 0, 0, 255)]));
}

#[test]
fn greyscale_alpha_pixels() {
  let bytes = simple_png(2, 1, 8, 4, 0, &[0, 9, 33, 200, 255]);
  let image = decode_rgba8(&bytes).unwrap();
  assert_eq!(image.bytes, rgba_bytes(&[(9, 9, 9, 33), (200, 200, 200, 255)]));
}

#[test]
fn max_size_palette() {
  let mut palette = Vec::with_capacity(256 * 3);
  for i in 0..=255_u8 {
    palette.extend_from_slice(&[i, i.wrapping_add(1), i.wrapping_add(2)]);
  }
  let bytes = png(&[
    &ihdr(1, 1, 8, 3, 0),
    &chunk(*b"PLTE", &palette),
    &idat_from_filtered(&[0, 255]),
    &iend(),
  ]);
  let image = decode_rgba8(&bytes).unwrap();
  assert_eq!(image.bytes, rgba_bytes(&[(255, 0, 1, 255)]));
}

#[test]
fn palette_index_out_of_range() {
  let bytes = png(&[
    &ihdr(1, 1, 8, 3, 0),
    &chunk(*b"PLTE", &[1, 2, 3]),
    &idat_from_filtered(&[0, 1]),
    &iend(),
  ]);
  assert_eq!(decode_rgba8(&bytes), Err(PngError::PaletteIndexOutOfRange));
}

#[test]
fn indexed_without_palette() {
  let bytes = simple_png(1, 1, 8, 3, 0, &[0, 0]);
  assert_eq!(decode_rgba8(&bytes), Err(PngError::MissingPalette));
}

#[test]
fn one_by_one_interlaced() {
  let bytes = simple_png(1, 1, 8, 2, 1, &[0, 1, 2, 3]);
  let image = decode_rgba8(&bytes).unwrap();
  assert_eq!(image.bytes, rgba_bytes(&[(1, 2, 3, 255)]));
}

#[test]
fn trailing_garbage_after_iend_is_ignored() {
  let mut bytes = simple_png(1, 1, 8, 2, 0, &[0, 255, 0, 0]);
  bytes.extend_from_slice(b"not chunks at all");
  assert!(decode_rgba8(&bytes).is_ok());
}

#[test]
fn empty_idat_stream_fails_to_inflate() {
  let bytes = png(&[&ihdr(1, 1, 8, 2, 0), &chunk(*b"IDAT", &[]), &iend()]);
  assert_eq!(decode_rgba8(&bytes), Err(PngError::DecompressionError));
}

#[test]
fn idat_may_split_anywhere() {
  let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&[0, 255, 0, 0], 6);
  let (front, back) = compressed.split_at(3);
  let bytes = png(&[
    &ihdr(1, 1, 8, 2, 0),
    &chunk(*b"IDAT", front),
    &chunk(*b"IDAT", back),
    &iend(),
  ]);
  let image = decode_rgba8(&bytes).unwrap();
  assert_eq!(image.bytes, &[255, 0, 0, 255]);
}

#[test]
fn unknown_critical_chunk_is_fatal() {
  let bytes = png(&[
    &ihdr(1, 1, 8, 2, 0),
    &chunk(*b"ABCD", &[1, 2, 3]),
    &idat_from_filtered(&[0, 255, 0, 0]),
    &iend(),
  ]);
  assert_eq!(decode_rgba8(&bytes), Err(PngError::UnknownCriticalChunk(ChunkTy(*b"ABCD"))));
}

#[test]
fn unknown_ancillary_chunk_is_skipped() {
  let bytes = png(&[
    &ihdr(1, 1, 8, 2, 0),
    &chunk(*b"abCD", &[1, 2, 3]),
    &idat_from_filtered(&[0, 255, 0, 0]),
    &iend(),
  ]);
  assert!(decode_rgba8(&bytes).is_ok());
}

#[test]
fn corrupt_ancillary_chunks_are_tolerated() {
  // bad CRC on a gAMA chunk
  let mut gama = chunk(*b"gAMA", &45_455_u32.to_be_bytes());
  let last = gama.len() - 1;
  gama[last] ^= 0xFF;
  let bytes =
    png(&[&ihdr(1, 1, 8, 2, 0), &gama, &idat_from_filtered(&[0, 255, 0, 0]), &iend()]);
  assert!(decode_rgba8(&bytes).is_ok());
  // well-framed gAMA with a payload of the wrong size
  let bytes = png(&[
    &ihdr(1, 1, 8, 2, 0),
    &chunk(*b"gAMA", &[1, 2, 3]),
    &idat_from_filtered(&[0, 255, 0, 0]),
    &iend(),
  ]);
  assert!(decode_rgba8(&bytes).is_ok());
}

#[test]
fn ordering_violations() {
  use ChunkStage::*;
  let good_idat = idat_from_filtered(&[0, 255, 0, 0]);
  // first chunk isn't the header
  let bytes = png(&[&chunk(*b"gAMA", &45_455_u32.to_be_bytes())]);
  assert_eq!(decode_rgba8(&bytes), Err(PngError::BadOrdering(ExpectIhdr, ChunkTy::gAMA)));
  // duplicate header
  let bytes = png(&[&ihdr(1, 1, 8, 2, 0), &ihdr(1, 1, 8, 2, 0), &good_idat, &iend()]);
  assert_eq!(decode_rgba8(&bytes), Err(PngError::BadOrdering(BeforePlte, ChunkTy::IHDR)));
  // palette after image data
  let bytes =
    png(&[&ihdr(1, 1, 8, 2, 0), &good_idat, &chunk(*b"PLTE", &[1, 2, 3]), &iend()]);
  assert_eq!(decode_rgba8(&bytes), Err(PngError::BadOrdering(AfterIdat, ChunkTy::PLTE)));
  // a gap in the IDAT run
  let bytes = png(&[
    &ihdr(1, 1, 8, 2, 0),
    &good_idat,
    &chunk(*b"tIME", &[7, 0xD0, 1, 1, 0, 0, 0]),
    &good_idat,
    &iend(),
  ]);
  assert_eq!(decode_rgba8(&bytes), Err(PngError::BadOrdering(AfterIdat, ChunkTy::IDAT)));
  // stream just stops without a trailer
  let bytes = png(&[&ihdr(1, 1, 8, 2, 0), &good_idat]);
  assert_eq!(decode_rgba8(&bytes), Err(PngError::MissingIend));
  // nothing at all after the signature
  let bytes = png(&[]);
  assert_eq!(decode_rgba8(&bytes), Err(PngError::MissingIhdr));
}

#[test]
fn truncated_mid_chunk_is_a_short_read() {
  let full = simple_png(1, 1, 8, 2, 0, &[0, 255, 0, 0]);
  let bytes = &full[..full.len() - 6];
  assert_eq!(decode_rgba8(bytes), Err(PngError::ShortRead));
}

#[test]
fn indexed_with_transparency_table() {
  let bytes = png(&[
    &ihdr(2, 1, 8, 3, 0),
    &chunk(*b"PLTE", &[10, 20, 30, 40, 50, 60]),
    &chunk(*b"tRNS", &[77, 0, 0]),
    &idat_from_filtered(&[0, 0, 1]),
    &iend(),
  ]);
  let image = decode_rgba8(&bytes).unwrap();
  assert_eq!(image.bytes, rgba_bytes(&[(10, 20, 30, 77), (40, 50, 60, 0)]));
}

#[test]
fn truecolor_color_key() {
  let mut trns_payload = Vec::new();
  for v in [255_u16, 0, 0] {
    trns_payload.extend_from_slice(&v.to_be_bytes());
  }
  let bytes = png(&[
    &ihdr(2, 1, 8, 2, 0),
    &chunk(*b"tRNS", &trns_payload),
    &idat_from_filtered(&[0, 255, 0, 0, 255, 1, 0]),
    &iend(),
  ]);
  let image = decode_rgba8(&bytes).unwrap();
  assert_eq!(image.bytes, rgba_bytes(&[(255, 0, 0, 0), (255, 1, 0, 255)]));
}

#[test]
fn filtered_interlaced_image() {
  // 8x8 greyscale Adam7 gradient, each pass row filtered with Sub.
  let (w, h) = (8_u32, 8_u32);
  let grid: Vec<u8> = (0..w * h).map(|i| (3 * i) as u8).collect();
  let dims = pngblit::reduced_image_dimensions(w, h);
  let mut filtered = Vec::new();
  for level in 1..=7 {
    let (rw, rh) = dims[level];
    for ry in 0..rh {
      filtered.push(1);
      let mut prev = 0_u8;
      for rx in 0..rw {
        let (fx, fy) = pngblit::interlaced_pos_to_full_pos(level, rx, ry);
        let value = grid[(fy * w + fx) as usize];
        filtered.push(value.wrapping_sub(prev));
        prev = value;
      }
    }
  }
  let bytes = simple_png(w, h, 8, 0, 1, &filtered);
  let image = decode_rgba8(&bytes).unwrap();
  let expected = rgba_bytes(&grid.iter().map(|&y| (y, y, y, 255)).collect::<Vec<_>>());
  assert_eq!(image.bytes, expected);
}
