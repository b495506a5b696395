//! The ancillary chunk records this decoder keeps for diagnostics.
//!
//! None of these affect pixel output (transparency has its own module, since
//! it does). They're parsed so that callers can inspect color-management and
//! text metadata, and so that a malformed one can be reported precisely.

#![allow(nonstandard_style)]

/// `cHRM`: Primary chromaticities and white point.
///
/// Values are the floating point chromacity times 100,000. An `sRGB` or
/// `iCCP` chunk overrides this one when present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct cHRM {
  pub white_x: u32,
  pub white_y: u32,
  pub red_x: u32,
  pub red_y: u32,
  pub green_x: u32,
  pub green_y: u32,
  pub blue_x: u32,
  pub blue_y: u32,
}

/// `gAMA`: Image gamma, times 100,000.
///
/// **Example:** a gamma of 1/2.2 is stored as 45,455.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct gAMA {
  pub gamma: u32,
}

/// `iCCP`: Embedded ICC profile.
///
/// The profile itself is a zlib stream; this crate stores it compressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct iCCP<'b> {
  pub name: &'b [u8],
  pub zlib_data: &'b [u8],
}

/// `sBIT`: Significant bits per channel in the original image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum sBIT {
  Y { y: u8 },
  YA { y: u8, a: u8 },
  RGB { r: u8, g: u8, b: u8 },
  RGBA { r: u8, g: u8, b: u8, a: u8 },
}

/// Rendering intent, as used by [`sRGB`] chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SrgbIntent {
  /// Good gamut adaptation, e.g. photographs.
  Perceptual,
  /// Colour appearance matching relative to the output white point.
  RelativeColorimetric,
  /// Saturation preserved at the expense of hue and lightness.
  Saturation,
  /// Absolute colorimetry, e.g. proofs for another device.
  AbsoluteColorimetric,
}

/// `sRGB`: the image is in the sRGB colour space.
///
/// Overrides `gAMA` and `cHRM` when present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct sRGB {
  pub intent: SrgbIntent,
}

/// `bKGD`: Intended background colour.
///
/// The variant should match the image's color type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum bKGD {
  Y { y: u16 },
  RGB { r: u16, g: u16, b: u16 },
  Index { i: u8 },
}

/// `hIST`: Approximate usage frequency of each palette entry.
///
/// Stored as the raw 2-byte big-endian values; the length should match the
/// palette's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct hIST<'b> {
  pub data: &'b [[u8; 2]],
}

/// `pHYs`: Intended physical pixel size or aspect ratio.
///
/// When `is_meters` is set, `ppu_x`/`ppu_y` are pixels per meter; otherwise
/// they only define an aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct pHYs {
  pub ppu_x: u32,
  pub ppu_y: u32,
  pub is_meters: bool,
}

/// `sPLT`: Suggested palette data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct sPLT<'b> {
  pub palette_name: &'b [u8],
  pub is_16bit: bool,
  pub entries: &'b [u8],
}

/// `tIME`: Image last-modification time, UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct tIME {
  /// 4-digit year.
  pub year: u16,
  /// 1-12
  pub month: u8,
  /// 1-31
  pub day: u8,
  /// 0-23
  pub hour: u8,
  /// 0-59
  pub minute: u8,
  /// 0-60 (60 for leap seconds)
  pub second: u8,
}

/// `tEXt`: Textual data, Latin-1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct tEXt<'b> {
  pub keyword: &'b [u8],
  pub text: &'b [u8],
}

/// `zTXt`: Compressed textual data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct zTXt<'b> {
  pub keyword: &'b [u8],
  pub zlib_data: &'b [u8],
}

/// `iTXt`: International textual data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct iTXt<'b> {
  pub keyword: &'b [u8],
  pub text_is_compressed: bool,
  pub lang: &'b [u8],
  /// The keyword, translated into the target language.
  pub translated_keyword: &'b str,
  /// UTF-8 text once decompressed (when compressed at all).
  pub text: &'b [u8],
}
