//! Walks the chunk stream in order, checks CRCs, and accumulates the typed
//! payloads into one store.

use alloc::vec::Vec;

use log::{trace, warn};

use crate::{
  ancillary::*,
  chunk::PngChunk,
  error::{PngError, PngResult},
  idat::IDAT,
  ihdr::IHDR,
  plte::PLTE,
  raw_chunk::{ChunkTy, RawChunk, RawChunkIter},
  trns::tRNS,
};

/// Where the decoder is within the legal chunk ordering.
///
/// ```txt
/// ExpectIhdr -> BeforePlte -> BeforeIdat -> InIdat -> AfterIdat -> Terminal
/// ```
///
/// `BeforePlte` ends at the palette itself or at the first chunk that must
/// follow the palette; either way a PLTE seen later is out of order. The
/// IDAT run is contiguous: any other chunk ends it, and an IDAT after that
/// is a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkStage {
  /// Nothing seen yet; only IHDR is legal.
  ExpectIhdr,
  /// Header seen; a palette may still appear.
  BeforePlte,
  /// Palette (or a post-palette chunk) seen; waiting on image data.
  BeforeIdat,
  /// Inside the contiguous IDAT run.
  InIdat,
  /// The IDAT run ended; only non-IDAT chunks until IEND.
  AfterIdat,
  /// IEND seen. Anything after this in the stream is ignored.
  Terminal,
}
impl ChunkStage {
  /// Advances the stage for a chunk of type `ty`, or reports the ordering
  /// violation that chunk commits.
  fn advance(self, ty: ChunkTy) -> PngResult<Self> {
    use ChunkStage::*;
    // any non-IDAT chunk ends the IDAT run before being judged itself
    let stage = if self == InIdat && ty != ChunkTy::IDAT { AfterIdat } else { self };
    match (stage, ty) {
      (ExpectIhdr, ChunkTy::IHDR) => Ok(BeforePlte),
      (ExpectIhdr, _) | (Terminal, _) | (_, ChunkTy::IHDR) => {
        Err(PngError::BadOrdering(stage, ty))
      }
      //
      (BeforePlte, ChunkTy::PLTE) => Ok(BeforeIdat),
      (BeforePlte, ChunkTy::bKGD | ChunkTy::hIST | ChunkTy::tRNS) => Ok(BeforeIdat),
      (_, ChunkTy::PLTE) => Err(PngError::BadOrdering(stage, ty)),
      //
      (BeforePlte | BeforeIdat | InIdat, ChunkTy::IDAT) => Ok(InIdat),
      (AfterIdat, ChunkTy::IDAT) => Err(PngError::BadOrdering(stage, ty)),
      //
      (AfterIdat, ChunkTy::IEND) => Ok(Terminal),
      (_, ChunkTy::IEND) => Err(PngError::BadOrdering(stage, ty)),
      //
      (s, _) => Ok(s),
    }
  }
}

/// Every parsed chunk of a PNG, held by type.
///
/// Payload slices borrow from the input bytes. Singleton chunks keep their
/// first occurrence; repeatable ones keep all, in file order (which is the
/// order that matters for IDAT).
#[derive(Debug, Clone, Default)]
#[allow(missing_docs)]
pub struct DecodedChunks<'b> {
  pub ihdr: Option<IHDR>,
  pub plte: Option<PLTE<'b>>,
  pub trns: Option<tRNS<'b>>,
  pub idat: Vec<IDAT<'b>>,
  pub chrm: Option<cHRM>,
  pub gama: Option<gAMA>,
  pub iccp: Option<iCCP<'b>>,
  pub sbit: Option<sBIT>,
  pub srgb: Option<sRGB>,
  pub bkgd: Option<bKGD>,
  pub hist: Option<hIST<'b>>,
  pub phys: Option<pHYs>,
  pub time: Option<tIME>,
  pub splt: Vec<sPLT<'b>>,
  pub text: Vec<tEXt<'b>>,
  pub ztxt: Vec<zTXt<'b>>,
  pub itxt: Vec<iTXt<'b>>,
}
impl<'b> DecodedChunks<'b> {
  /// Reads the full chunk sequence of a PNG data stream into a store.
  ///
  /// Enforces, in this order per chunk: framing, the CRC, the ordering
  /// state machine, then the typed payload parse. Critical chunks fail hard on a
  /// bad CRC or a bad payload; ancillary chunks are logged and dropped
  /// instead. Unknown ancillary chunk types are skipped, unknown critical
  /// ones are fatal. Bytes after the IEND record are ignored.
  ///
  /// On success the store always holds an IHDR and at least one IDAT, and
  /// indexed-color images always hold a palette.
  pub fn parse(png: &'b [u8]) -> PngResult<Self> {
    let mut out = Self::default();
    let mut stage = ChunkStage::ExpectIhdr;
    for raw in RawChunkIter::new(png)? {
      let raw: RawChunk<'b> = raw?;
      if !raw.crc_matches() {
        if raw.ty.is_critical() {
          return Err(PngError::CrcMismatch(raw.ty));
        } else {
          // a chunk we drop doesn't drive the ordering machine either
          warn!("dropping ancillary chunk {:?}: crc mismatch", raw.ty);
          continue;
        }
      }
      stage = stage.advance(raw.ty)?;
      let chunk = match PngChunk::parse(raw) {
        Ok(Some(chunk)) => chunk,
        Ok(None) => {
          trace!("skipping unknown ancillary chunk {:?}", raw.ty);
          continue;
        }
        Err(e) if raw.ty.is_ancillary() => {
          warn!("dropping ancillary chunk {:?}: {:?}", raw.ty, e);
          continue;
        }
        Err(e) => return Err(e),
      };
      out.store(chunk);
      if stage == ChunkStage::Terminal {
        break;
      }
    }
    match stage {
      ChunkStage::ExpectIhdr => return Err(PngError::MissingIhdr),
      ChunkStage::Terminal => (),
      _ => return Err(PngError::MissingIend),
    }
    if out.header()?.format.is_indexed() && out.plte.is_none() {
      return Err(PngError::MissingPalette);
    }
    Ok(out)
  }

  /// The header. A store built by [`parse`](Self::parse) always has one.
  #[inline]
  pub fn header(&self) -> PngResult<IHDR> {
    self.ihdr.ok_or(PngError::MissingIhdr)
  }

  fn store(&mut self, chunk: PngChunk<'b>) {
    match chunk {
      PngChunk::IHDR(ihdr) => self.ihdr = Some(ihdr),
      PngChunk::PLTE(plte) => self.plte = Some(plte),
      PngChunk::IDAT(idat) => self.idat.push(idat),
      PngChunk::IEND => (),
      PngChunk::tRNS(trns) => keep_first(&mut self.trns, trns),
      PngChunk::cHRM(chrm) => keep_first(&mut self.chrm, chrm),
      PngChunk::gAMA(gama) => keep_first(&mut self.gama, gama),
      PngChunk::iCCP(iccp) => keep_first(&mut self.iccp, iccp),
      PngChunk::sBIT(sbit) => keep_first(&mut self.sbit, sbit),
      PngChunk::sRGB(srgb) => keep_first(&mut self.srgb, srgb),
      PngChunk::bKGD(bkgd) => keep_first(&mut self.bkgd, bkgd),
      PngChunk::hIST(hist) => keep_first(&mut self.hist, hist),
      PngChunk::pHYs(phys) => keep_first(&mut self.phys, phys),
      PngChunk::tIME(time) => keep_first(&mut self.time, time),
      PngChunk::sPLT(splt) => self.splt.push(splt),
      PngChunk::tEXt(text) => self.text.push(text),
      PngChunk::zTXt(ztxt) => self.ztxt.push(ztxt),
      PngChunk::iTXt(itxt) => self.itxt.push(itxt),
    }
  }
}

/// Duplicate singleton ancillary chunks keep the first value seen.
fn keep_first<T: core::fmt::Debug>(slot: &mut Option<T>, value: T) {
  if slot.is_some() {
    warn!("ignoring duplicate chunk: {value:?}");
  } else {
    *slot = Some(value);
  }
}
