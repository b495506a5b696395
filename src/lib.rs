#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

//! Decodes PNG data into a raster you can blit or upload.
//!
//! * [Portable Network Graphics (PNG) Specification (Third Edition)][png-spec]
//!
//! [png-spec]: https://www.w3.org/TR/png/
//!
//! ## Library Design Assumptions
//!
//! * The entire PNG encoded data stream is a single byte slice. This library
//!   does not attempt "stream" decoding that keeps only a minimal amount of
//!   live data.
//! * Decoding is synchronous and single threaded. If you want parallelism,
//!   decode separate images on separate threads; a decode call shares
//!   nothing.
//! * Each pipeline stage takes ownership of its input buffer and gives back
//!   the next representation, so peak memory is the compressed data plus the
//!   filtered data plus the final image, and intermediates free as soon as
//!   they're consumed.
//!
//! ## Decoding
//!
//! Call [`decode_rgba8`] and you get a [`RasterImage`]: width, height,
//! pitch, bits per pixel, and the pixel bytes, every color type already
//! normalized to 8-bit RGBA.
//!
//! If you want to drive the stages yourself (say, to stop after the chunk
//! walk and look at metadata), they're all exported: [`DecodedChunks::parse`]
//! gives the typed chunks, [`concat_idat`] + [`inflate_idat`] the filtered
//! stream, [`split_reduced_images`] / [`unfilter_reduced_image`] /
//! [`explode_packed_samples`] / [`deinterlace_reduced_images`] /
//! [`normalize_to_rgba8`] the rest of the pipeline in order.
//!
//! ## Strictness
//!
//! This decoder is picky on purpose, because it feeds buffers straight to
//! display code:
//!
//! * Chunk CRCs are verified. A bad critical chunk is fatal; a bad ancillary
//!   chunk is dropped with a `log` warning.
//! * The chunk ordering rules are enforced as a state machine, including
//!   IDAT contiguity.
//! * The inflated data stream must match the size the header predicts,
//!   exactly.
//! * Errors never produce a partial image.
//!
//! The zlib adler32 trailer is the one check deliberately skipped; the chunk
//! CRCs already cover those bytes.

extern crate alloc;

mod adam7;
mod ancillary;
mod chunk;
mod crc32;
mod decoded;
mod decoder;
mod deinterlace;
mod error;
mod explode;
mod idat;
mod ihdr;
mod normalize;
mod plte;
mod raster;
mod raw_chunk;
mod reduced;
mod trns;
mod unfilter;
mod util;
mod zinflate;

pub use self::{
  adam7::*, ancillary::*, chunk::*, crc32::*, decoded::*, decoder::*, deinterlace::*, error::*,
  explode::*, idat::*, ihdr::*, normalize::*, plte::*, raster::*, raw_chunk::*, reduced::*,
  trns::*, unfilter::*, zinflate::*,
};
