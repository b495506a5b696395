//! The error type for everything that can go wrong while decoding.

use crate::{decoded::ChunkStage, raw_chunk::ChunkTy};

/// An error from the `pngblit` crate.
///
/// Every stage of the pipeline reports through this one enum, and a failure
/// anywhere aborts the whole decode. Partial images are never handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PngError {
  /// The first 8 bytes are not the PNG signature.
  SignatureMismatch,

  /// The data stream ended in the middle of a record.
  ShortRead,

  /// The chunk's stored CRC doesn't match the CRC computed over its type and
  /// payload.
  ///
  /// Only critical chunks produce this error. An ancillary chunk that fails
  /// its CRC is logged and dropped instead.
  CrcMismatch(ChunkTy),

  /// A chunk type this decoder doesn't know, with the critical bit set.
  ///
  /// Unknown *ancillary* chunks are skipped, but an unknown critical chunk
  /// means we can't render the image correctly, so it's fatal.
  UnknownCriticalChunk(ChunkTy),

  /// A chunk appeared at a position where it's not allowed.
  ///
  /// Carries the ordering stage the decoder was in and the chunk type that
  /// violated it. Covers, among others: a first chunk that isn't IHDR, a
  /// second IHDR, PLTE after image data, and a non-contiguous IDAT run.
  BadOrdering(ChunkStage, ChunkTy),

  /// The chunk stream ended without ever producing an IHDR.
  MissingIhdr,

  /// The chunk stream ended without an IEND trailer.
  MissingIend,

  /// The image is indexed-color but no PLTE chunk came before the image
  /// data.
  MissingPalette,

  /// The IHDR fields parsed, but hold an illegal value or combination.
  InvalidHeader(&'static str),

  /// A typed chunk parser finished without consuming the whole payload.
  PayloadUnderrun(ChunkTy),

  /// A typed chunk parser needed more bytes than the chunk's declared
  /// length.
  PayloadOverrun(ChunkTy),

  /// The zlib stream in the IDAT data couldn't be inflated.
  DecompressionError,

  /// Inflation succeeded but produced a different number of bytes than the
  /// header predicts.
  InflateSizeMismatch,

  /// A scanline's filter byte wasn't 0 through 4.
  BadFilterType(u8),

  /// An indexed-color sample is past the end of the palette.
  PaletteIndexOutOfRange,
}

/// Alias for a `Result` with [PngError] as the error form.
pub type PngResult<T> = Result<T, PngError>;
