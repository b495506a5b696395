//! Gathers the IDAT fragments and runs them through the inflate routine.

use alloc::vec::Vec;

use log::trace;
use miniz_oxide::inflate::{decompress_slice_iter_to_slice, TINFLStatus};

use crate::{
  error::{PngError, PngResult},
  idat::IDAT,
};

/// Concatenates every IDAT payload, in file order, into one compressed blob.
///
/// The chunk boundaries carry no meaning; the result is a single
/// zlib-wrapped DEFLATE stream.
#[must_use]
pub fn concat_idat(idats: &[IDAT<'_>]) -> Vec<u8> {
  let total: usize = idats.iter().map(|idat| idat.as_bytes().len()).sum();
  let mut blob = Vec::with_capacity(total);
  for idat in idats {
    blob.extend_from_slice(idat.as_bytes());
  }
  blob
}

/// Inflates the compressed blob into exactly `predicted_size` bytes.
///
/// The output buffer is sized up front from the header's prediction and the
/// inflate runs once over the whole input. The stream has to fill the buffer
/// perfectly: finishing short, or wanting to write past the end, means the
/// header and the pixel data disagree.
///
/// The zlib adler32 trailer is not verified; the chunk CRCs already cover
/// this data.
pub fn inflate_idat(zlib_blob: &[u8], predicted_size: usize) -> PngResult<Vec<u8>> {
  let mut out = alloc::vec![0_u8; predicted_size];
  trace!("inflating {} compressed bytes, expecting {predicted_size} out", zlib_blob.len());
  match decompress_slice_iter_to_slice(&mut out, core::iter::once(zlib_blob), true, true) {
    Ok(n) if n == predicted_size => Ok(out),
    Ok(_) => Err(PngError::InflateSizeMismatch),
    Err(TINFLStatus::HasMoreOutput) => Err(PngError::InflateSizeMismatch),
    Err(_) => Err(PngError::DecompressionError),
  }
}
