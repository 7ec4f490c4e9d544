//! x86/x86_64 accelerated CRC32-C (Castagnoli).
//!
//! Uses the SSE4.2 `crc32` instruction family.
//!
//! Safety:
//! - This file is allowed to use `unsafe` for ISA-specific intrinsics.
//! - All unsafe is contained within this module.

#![allow(unsafe_code)]

#[cfg(target_arch = "x86")]
use core::arch::x86::{_mm_crc32_u8, _mm_crc32_u16, _mm_crc32_u32};
#[cfg(all(target_arch = "x86_64", target_pointer_width = "64"))]
use core::arch::x86_64::_mm_crc32_u64;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::{_mm_crc32_u8, _mm_crc32_u16, _mm_crc32_u32};

use super::{Fold, WORD, fold_staged};

/// SSE4.2 `crc32` operands.
///
/// Only ever driven from [`compute_sse42_unchecked`], whose caller guarantees
/// SSE4.2; that is the safety argument for every `unsafe` block below.
struct Sse42;

impl Fold for Sse42 {
  #[inline(always)]
  fn fold_u8(crc: u32, v: u8) -> u32 {
    // SAFETY: see `Sse42`.
    unsafe { _mm_crc32_u8(crc, v) }
  }

  #[inline(always)]
  fn fold_u16(crc: u32, v: u16) -> u32 {
    // SAFETY: see `Sse42`.
    unsafe { _mm_crc32_u16(crc, v) }
  }

  #[inline(always)]
  fn fold_u32(crc: u32, v: u32) -> u32 {
    // SAFETY: see `Sse42`.
    unsafe { _mm_crc32_u32(crc, v) }
  }

  #[cfg(all(target_arch = "x86_64", target_pointer_width = "64"))]
  #[inline(always)]
  fn fold_word(crc: u32, word: [u8; WORD]) -> u32 {
    // SAFETY: see `Sse42`. The upper half of the result is always zero.
    unsafe { _mm_crc32_u64(u64::from(crc), u64::from_le_bytes(word)) as u32 }
  }

  #[cfg(not(all(target_arch = "x86_64", target_pointer_width = "64")))]
  #[inline(always)]
  fn fold_word(crc: u32, word: [u8; WORD]) -> u32 {
    // SAFETY: see `Sse42`.
    unsafe { _mm_crc32_u32(crc, u32::from_le_bytes(word)) }
  }
}

/// Compute CRC32-C using SSE4.2 `crc32` instructions.
///
/// # Safety
///
/// Caller must ensure the CPU supports the `sse4.2` target feature.
#[target_feature(enable = "sse4.2")]
pub(super) unsafe fn compute_sse42_unchecked(crc: u32, data: &[u8]) -> u32 {
  fold_staged::<Sse42>(crc, data)
}
