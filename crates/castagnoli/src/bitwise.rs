//! Table-less CRC32-C using branchless bitwise reduction.
//!
//! For each bit, a conditional mask is built with `wrapping_sub`
//! (`0 - 0 = 0x00000000`, `0 - 1 = 0xFFFFFFFF`) and the polynomial is XORed
//! in under that mask, so no branch depends on the data.
//!
//! This is the generic engine under the `no-tables` feature, and the
//! reference the table-driven engine is checked against.

use crate::constants::POLYNOMIAL;

/// Compute CRC32-C over a byte slice without lookup tables.
///
/// `crc` is the raw register; no pre/post inversion is applied.
///
/// # Example
///
/// ```
/// use castagnoli::bitwise::compute;
///
/// let crc = compute(0xFFFF_FFFF, b"123456789") ^ 0xFFFF_FFFF;
/// assert_eq!(crc, 0xE306_9283);
/// ```
#[inline]
pub fn compute(mut crc: u32, data: &[u8]) -> u32 {
  let mut rest = data;
  while let Some((chunk, tail)) = rest.split_first_chunk::<4>() {
    crc = compute_byte(crc, chunk[0]);
    crc = compute_byte(crc, chunk[1]);
    crc = compute_byte(crc, chunk[2]);
    crc = compute_byte(crc, chunk[3]);
    rest = tail;
  }

  for &byte in rest {
    crc = compute_byte(crc, byte);
  }

  crc
}

/// Fold a single byte into the register.
///
/// `const` so callers can checksum known data at compile time.
#[inline]
pub const fn compute_byte(mut crc: u32, byte: u8) -> u32 {
  crc ^= byte as u32;

  let mut bit = 0;
  while bit < 8 {
    let mask = 0u32.wrapping_sub(crc & 1);
    crc = (crc >> 1) ^ (POLYNOMIAL & mask);
    bit += 1;
  }

  crc
}
