//! Typed chunks: one central dispatch from raw records to parsed payloads.

use bytemuck::cast_slice;

use crate::{
  ancillary::*,
  error::{PngError, PngResult},
  idat::IDAT,
  ihdr::IHDR,
  plte::PLTE,
  raw_chunk::{ChunkTy, RawChunk},
  trns::tRNS,
  util::u32_be,
};

/// A fully parsed PNG chunk.
///
/// Built from a [`RawChunk`] with [`PngChunk::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(nonstandard_style)]
#[allow(missing_docs)]
pub enum PngChunk<'b> {
  IHDR(IHDR),
  PLTE(PLTE<'b>),
  IDAT(IDAT<'b>),
  IEND,
  tRNS(tRNS<'b>),
  cHRM(cHRM),
  gAMA(gAMA),
  iCCP(iCCP<'b>),
  sBIT(sBIT),
  sRGB(sRGB),
  bKGD(bKGD),
  hIST(hIST<'b>),
  pHYs(pHYs),
  sPLT(sPLT<'b>),
  tIME(tIME),
  tEXt(tEXt<'b>),
  zTXt(zTXt<'b>),
  iTXt(iTXt<'b>),
}
impl<'b> PngChunk<'b> {
  /// Parses a raw chunk's payload according to its type tag.
  ///
  /// * A known type parses to `Some(chunk)`, or fails if the payload doesn't
  ///   fit the type's layout exactly (`PayloadUnderrun` when bytes are left
  ///   over, `PayloadOverrun` when the payload is too short).
  /// * An unknown ancillary type gives `Some(None)`-style `Ok(None)`: legal,
  ///   carries nothing we understand, to be skipped.
  /// * An unknown critical type is fatal.
  ///
  /// CRC checking is not done here; the caller decides how strictly to treat
  /// it before parsing.
  pub fn parse(raw: RawChunk<'b>) -> PngResult<Option<Self>> {
    let RawChunk { ty, data, declared_crc: _ } = raw;
    Ok(Some(match ty {
      ChunkTy::IHDR => PngChunk::IHDR(IHDR::from_payload(data)?),
      ChunkTy::PLTE => PngChunk::PLTE(PLTE::from_payload(data)?),
      ChunkTy::IDAT => PngChunk::IDAT(IDAT::from(data)),
      ChunkTy::IEND => match data {
        [] => PngChunk::IEND,
        _ => return Err(PngError::PayloadUnderrun(ChunkTy::IEND)),
      },
      ChunkTy::tRNS => PngChunk::tRNS(tRNS::from_payload(data)),
      ChunkTy::cHRM => {
        if data.len() != 8 * 4 {
          return Err(payload_size_error(ty, data.len() < 8 * 4));
        }
        PngChunk::cHRM(cHRM {
          white_x: u32_be(&data[0..4]),
          white_y: u32_be(&data[4..8]),
          red_x: u32_be(&data[8..12]),
          red_y: u32_be(&data[12..16]),
          green_x: u32_be(&data[16..20]),
          green_y: u32_be(&data[20..24]),
          blue_x: u32_be(&data[24..28]),
          blue_y: u32_be(&data[28..32]),
        })
      }
      ChunkTy::gAMA => {
        if data.len() != 4 {
          return Err(payload_size_error(ty, data.len() < 4));
        }
        PngChunk::gAMA(gAMA { gamma: u32_be(data) })
      }
      ChunkTy::iCCP => {
        let mut it = data.splitn(2, |u| u == &0_u8);
        let name = it.next().ok_or(PngError::PayloadOverrun(ty))?;
        match it.next().ok_or(PngError::PayloadOverrun(ty))? {
          [0, zlib_data @ ..] => PngChunk::iCCP(iCCP { name, zlib_data }),
          _ => return Err(PngError::PayloadOverrun(ty)),
        }
      }
      ChunkTy::sBIT => match *data {
        [y] => PngChunk::sBIT(sBIT::Y { y }),
        [y, a] => PngChunk::sBIT(sBIT::YA { y, a }),
        [r, g, b] => PngChunk::sBIT(sBIT::RGB { r, g, b }),
        [r, g, b, a] => PngChunk::sBIT(sBIT::RGBA { r, g, b, a }),
        [] => return Err(PngError::PayloadOverrun(ty)),
        _ => return Err(PngError::PayloadUnderrun(ty)),
      },
      ChunkTy::sRGB => PngChunk::sRGB(sRGB {
        intent: match data {
          [0] => SrgbIntent::Perceptual,
          [1] => SrgbIntent::RelativeColorimetric,
          [2] => SrgbIntent::Saturation,
          [3] => SrgbIntent::AbsoluteColorimetric,
          [] => return Err(PngError::PayloadOverrun(ty)),
          _ => return Err(PngError::PayloadUnderrun(ty)),
        },
      }),
      ChunkTy::bKGD => match *data {
        [i] => PngChunk::bKGD(bKGD::Index { i }),
        [y0, y1] => PngChunk::bKGD(bKGD::Y { y: u16::from_be_bytes([y0, y1]) }),
        [r0, r1, g0, g1, b0, b1] => PngChunk::bKGD(bKGD::RGB {
          r: u16::from_be_bytes([r0, r1]),
          g: u16::from_be_bytes([g0, g1]),
          b: u16::from_be_bytes([b0, b1]),
        }),
        _ => return Err(PngError::PayloadUnderrun(ty)),
      },
      ChunkTy::hIST => {
        if data.len() % 2 != 0 {
          return Err(PngError::PayloadUnderrun(ty));
        }
        PngChunk::hIST(hIST { data: cast_slice(data) })
      }
      ChunkTy::pHYs => {
        if data.len() != 9 {
          return Err(payload_size_error(ty, data.len() < 9));
        }
        if data[8] > 1 {
          return Err(PngError::PayloadUnderrun(ty));
        }
        PngChunk::pHYs(pHYs {
          ppu_x: u32_be(&data[0..4]),
          ppu_y: u32_be(&data[4..8]),
          is_meters: data[8] == 1,
        })
      }
      ChunkTy::sPLT => {
        let mut it = data.splitn(2, |u| u == &0_u8);
        let palette_name = it.next().ok_or(PngError::PayloadOverrun(ty))?;
        match it.next().ok_or(PngError::PayloadOverrun(ty))? {
          [8, entries @ ..] => PngChunk::sPLT(sPLT { palette_name, is_16bit: false, entries }),
          [16, entries @ ..] => PngChunk::sPLT(sPLT { palette_name, is_16bit: true, entries }),
          _ => return Err(PngError::PayloadOverrun(ty)),
        }
      }
      ChunkTy::tIME => match *data {
        [y0, y1, month, day, hour, minute, second] => PngChunk::tIME(tIME {
          year: u16::from_be_bytes([y0, y1]),
          month,
          day,
          hour,
          minute,
          second,
        }),
        _ => return Err(payload_size_error(ty, data.len() < 7)),
      },
      ChunkTy::tEXt => {
        let mut it = data.splitn(2, |u| u == &0_u8);
        let keyword = it.next().ok_or(PngError::PayloadOverrun(ty))?;
        let text = it.next().ok_or(PngError::PayloadOverrun(ty))?;
        PngChunk::tEXt(tEXt { keyword, text })
      }
      ChunkTy::zTXt => {
        let mut it = data.splitn(2, |u| u == &0_u8);
        let keyword = it.next().ok_or(PngError::PayloadOverrun(ty))?;
        match it.next().ok_or(PngError::PayloadOverrun(ty))? {
          [0, zlib_data @ ..] => PngChunk::zTXt(zTXt { keyword, zlib_data }),
          _ => return Err(PngError::PayloadOverrun(ty)),
        }
      }
      ChunkTy::iTXt => {
        let mut it = data.splitn(4, |u| u == &0_u8);
        let keyword = it.next().ok_or(PngError::PayloadOverrun(ty))?;
        // compression flag, compression method, then the language tag
        let flag_method_lang = it.next().ok_or(PngError::PayloadOverrun(ty))?;
        let translated_keyword = core::str::from_utf8(it.next().ok_or(PngError::PayloadOverrun(ty))?)
          .map_err(|_| PngError::PayloadOverrun(ty))?;
        let text = it.next().ok_or(PngError::PayloadOverrun(ty))?;
        match flag_method_lang {
          [0, 0, lang @ ..] => PngChunk::iTXt(iTXt {
            keyword,
            lang,
            text,
            text_is_compressed: false,
            translated_keyword,
          }),
          [1, 0, lang @ ..] => PngChunk::iTXt(iTXt {
            keyword,
            lang,
            text,
            text_is_compressed: true,
            translated_keyword,
          }),
          _ => return Err(PngError::PayloadOverrun(ty)),
        }
      }
      unknown if unknown.is_ancillary() => return Ok(None),
      unknown => return Err(PngError::UnknownCriticalChunk(unknown)),
    }))
  }

  /// The header, if this is an IHDR chunk.
  #[inline]
  #[must_use]
  pub const fn to_ihdr(self) -> Option<IHDR> {
    match self {
      Self::IHDR(ihdr) => Some(ihdr),
      _ => None,
    }
  }
}

#[inline]
const fn payload_size_error(ty: ChunkTy, too_short: bool) -> PngError {
  if too_short {
    PngError::PayloadOverrun(ty)
  } else {
    PngError::PayloadUnderrun(ty)
  }
}
