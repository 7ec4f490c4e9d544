//! aarch64 accelerated CRC32-C (Castagnoli).
//!
//! Uses the ARMv8 CRC32 extension (`crc32c*` instructions).
//!
//! Safety:
//! - This file is allowed to use `unsafe` for ISA-specific intrinsics.
//! - All unsafe is contained within this module.

#![allow(unsafe_code)]

#[cfg(target_pointer_width = "64")]
use core::arch::aarch64::__crc32cd;
use core::arch::aarch64::{__crc32cb, __crc32ch, __crc32cw};

use super::{Fold, WORD, fold_staged};

/// ARMv8 CRC extension operands.
///
/// Only ever driven from [`compute_crc_unchecked`], whose caller guarantees
/// the `crc` feature; that is the safety argument for every `unsafe` block.
struct CrcExt;

impl Fold for CrcExt {
  #[inline(always)]
  fn fold_u8(crc: u32, v: u8) -> u32 {
    // SAFETY: see `CrcExt`.
    unsafe { __crc32cb(crc, v) }
  }

  #[inline(always)]
  fn fold_u16(crc: u32, v: u16) -> u32 {
    // SAFETY: see `CrcExt`.
    unsafe { __crc32ch(crc, v) }
  }

  #[inline(always)]
  fn fold_u32(crc: u32, v: u32) -> u32 {
    // SAFETY: see `CrcExt`.
    unsafe { __crc32cw(crc, v) }
  }

  #[cfg(target_pointer_width = "64")]
  #[inline(always)]
  fn fold_word(crc: u32, word: [u8; WORD]) -> u32 {
    // SAFETY: see `CrcExt`.
    unsafe { __crc32cd(crc, u64::from_le_bytes(word)) }
  }

  #[cfg(not(target_pointer_width = "64"))]
  #[inline(always)]
  fn fold_word(crc: u32, word: [u8; WORD]) -> u32 {
    // SAFETY: see `CrcExt`.
    unsafe { __crc32cw(crc, u32::from_le_bytes(word)) }
  }
}

/// Compute CRC32-C using the ARMv8 CRC32 extension.
///
/// # Safety
///
/// Caller must ensure the CPU supports the `crc` target feature.
#[target_feature(enable = "crc")]
pub(super) unsafe fn compute_crc_unchecked(crc: u32, data: &[u8]) -> u32 {
  fold_staged::<CrcExt>(crc, data)
}
