//! `IDAT`: the compressed image data.

use core::fmt::Debug;

/// One fragment of the image data stream.
///
/// * The pixel data is zlib compressed, and an image usually splits it over
///   several IDAT chunks. The chunk boundaries mean nothing: all fragments
///   concatenated in file order form the single zlib stream.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct IDAT<'b>(&'b [u8]);
impl<'b> From<&'b [u8]> for IDAT<'b> {
  #[inline]
  fn from(data: &'b [u8]) -> Self {
    Self(data)
  }
}
impl<'b> IDAT<'b> {
  /// The raw compressed fragment.
  #[inline]
  #[must_use]
  pub const fn as_bytes(&self) -> &'b [u8] {
    self.0
  }
}
impl Debug for IDAT<'_> {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_tuple("IDAT").field(&&self.0[..self.0.len().min(12)]).field(&self.0.len()).finish()
  }
}
