//! Generic engine: portable CRC32-C.
//!
//! Slicing-by-8 processes 8 bytes per step using 8 precomputed tables:
//!
//! 1. XOR the low 4 bytes of the block into the register
//! 2. Look up each of the 8 bytes in the table for its position
//! 3. XOR the 8 table entries to get the new register
//!
//! With the `no-tables` feature this delegates to [`crate::bitwise`].
//! Runs on every target and never touches CPU-specific instructions.

#[cfg(not(feature = "no-tables"))]
use crate::constants::TABLES;

/// Compute CRC32-C with the portable engine.
///
/// `crc` is the raw register (no pre/post inversion); the returned value is
/// the updated raw register.
#[inline]
pub fn compute(crc: u32, data: &[u8]) -> u32 {
  #[cfg(feature = "no-tables")]
  {
    crate::bitwise::compute(crc, data)
  }

  #[cfg(not(feature = "no-tables"))]
  {
    let mut crc = crc;
    let mut rest = data;

    while let Some((block, tail)) = rest.split_first_chunk::<8>() {
      let d = u64::from_le_bytes(*block);
      let lo = (crc as u64) ^ (d & 0xFFFF_FFFF);
      let hi = d >> 32;

      crc = lookup(7, lo as u8)
        ^ lookup(6, (lo >> 8) as u8)
        ^ lookup(5, (lo >> 16) as u8)
        ^ lookup(4, (lo >> 24) as u8)
        ^ lookup(3, hi as u8)
        ^ lookup(2, (hi >> 8) as u8)
        ^ lookup(1, (hi >> 16) as u8)
        ^ lookup(0, (hi >> 24) as u8);
      rest = tail;
    }

    for &byte in rest {
      crc = compute_byte(crc, byte);
    }

    crc
  }
}

/// Fold a single byte into the register.
#[inline]
pub fn compute_byte(crc: u32, byte: u8) -> u32 {
  #[cfg(feature = "no-tables")]
  {
    crate::bitwise::compute_byte(crc, byte)
  }

  #[cfg(not(feature = "no-tables"))]
  {
    (crc >> 8) ^ lookup(0, crc as u8 ^ byte)
  }
}

#[cfg(not(feature = "no-tables"))]
#[inline(always)]
#[allow(clippy::indexing_slicing)] // `table < 8` at every call site, `index` is a u8
fn lookup(table: usize, index: u8) -> u32 {
  TABLES.0[table][index as usize]
}

#[cfg(test)]
mod tests {
  extern crate std;

  use std::vec::Vec;

  use super::*;

  /// Standard CRC32-C test vector: "123456789" -> 0xE3069283
  const CHECK_VALUE: u32 = 0xE306_9283;

  #[test]
  fn test_check_string() {
    let crc = compute(0xFFFF_FFFF, b"123456789") ^ 0xFFFF_FFFF;
    assert_eq!(crc, CHECK_VALUE);
  }

  #[test]
  fn test_empty() {
    assert_eq!(compute(0xFFFF_FFFF, b"") ^ 0xFFFF_FFFF, 0x0000_0000);
    assert_eq!(compute(0, b""), 0);
  }

  #[test]
  fn test_zeros() {
    let crc = compute(0xFFFF_FFFF, &[0u8; 32]) ^ 0xFFFF_FFFF;
    assert_eq!(crc, 0x8A91_36AA);
  }

  #[test]
  fn test_ones() {
    let crc = compute(0xFFFF_FFFF, &[0xFFu8; 32]) ^ 0xFFFF_FFFF;
    assert_eq!(crc, 0x62A8_AB43);
  }

  #[test]
  fn test_ascending_and_descending() {
    let up: Vec<u8> = (0u8..32).collect();
    let down: Vec<u8> = (0u8..32).rev().collect();
    assert_eq!(compute(0xFFFF_FFFF, &up) ^ 0xFFFF_FFFF, 0x46DD_794E);
    assert_eq!(compute(0xFFFF_FFFF, &down) ^ 0xFFFF_FFFF, 0x113F_DB5C);
  }

  #[test]
  fn test_incremental_matches_oneshot() {
    let data = b"hello world, this is a test of incremental CRC";
    let oneshot = compute(0xFFFF_FFFF, data);

    for split in 0..=data.len() {
      let (a, b) = data.split_at(split);
      assert_eq!(compute(compute(0xFFFF_FFFF, a), b), oneshot, "mismatch at split point {split}");
    }
  }

  #[test]
  fn test_matches_bitwise_for_all_small_lengths() {
    let data: Vec<u8> = (0..300u32).map(|i| (i.wrapping_mul(31) ^ (i >> 3)) as u8).collect();
    for len in 0..=data.len() {
      for seed in [0u32, 0xFFFF_FFFF, 0x0123_4567] {
        assert_eq!(
          compute(seed, &data[..len]),
          crate::bitwise::compute(seed, &data[..len]),
          "len={len} seed={seed:#x}"
        );
      }
    }
  }
}
