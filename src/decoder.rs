//! The one-call pipeline: PNG bytes in, RGBA8 raster out.

use log::trace;

use crate::{
  decoded::DecodedChunks,
  deinterlace::deinterlace_reduced_images,
  error::PngResult,
  explode::explode_packed_samples,
  normalize::normalize_to_rgba8,
  raster::RasterImage,
  reduced::split_reduced_images,
  unfilter::unfilter_reduced_image,
  zinflate::{concat_idat, inflate_idat},
};

/// Decodes a complete PNG data stream into an RGBA8 [RasterImage].
///
/// Runs the whole pipeline: chunk parsing (with CRC and ordering checks),
/// IDAT inflation to the exact predicted size, scanline defiltering, packed
/// sample explosion, Adam7 reassembly when the image is interlaced, and
/// normalization of every color type to 8-bit RGBA. Each intermediate buffer
/// is handed to the next stage by value and freed as soon as that stage is
/// done with it.
///
/// Any failure aborts the decode; you get the whole image or none of it.
pub fn decode_rgba8(png: &[u8]) -> PngResult<RasterImage> {
  let decoded = DecodedChunks::parse(png)?;
  let ihdr = decoded.header()?;
  trace!("decoding {}x{} {:?}", ihdr.width, ihdr.height, ihdr.format);
  //
  let inflated = {
    let zlib_blob = concat_idat(&decoded.idat);
    inflate_idat(&zlib_blob, ihdr.predicted_filtered_size())?
  };
  //
  let mut reduced = split_reduced_images(&ihdr, inflated)?;
  let bpp = ihdr.format.filter_bpp();
  for image in reduced.iter_mut() {
    unfilter_reduced_image(image, bpp)?;
    explode_packed_samples(image);
  }
  //
  let samples = deinterlace_reduced_images(&ihdr, reduced);
  let rgba = normalize_to_rgba8(&ihdr, samples, decoded.plte.as_ref(), decoded.trns.as_ref())?;
  Ok(RasterImage::from_rgba8(ihdr.width, ihdr.height, rgba))
}
