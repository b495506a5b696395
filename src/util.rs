#![forbid(unsafe_code)]

//! Big-endian integer pulls.
//!
//! Every multi-byte integer in a PNG data stream is network byte order, so
//! these two functions are the only place where file bytes become integers
//! anywhere in this crate.

/// Reads a `u16` from `bytes`, network byte order.
///
/// ## Panics
/// * If `bytes` is not exactly 2 bytes long.
#[inline]
#[must_use]
pub(crate) fn u16_be(bytes: &[u8]) -> u16 {
  u16::from_be_bytes(bytes.try_into().unwrap())
}

/// Reads a `u32` from `bytes`, network byte order.
///
/// ## Panics
/// * If `bytes` is not exactly 4 bytes long.
#[inline]
#[must_use]
pub(crate) fn u32_be(bytes: &[u8]) -> u32 {
  u32::from_be_bytes(bytes.try_into().unwrap())
}
