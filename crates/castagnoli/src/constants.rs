//! CRC32-C (Castagnoli) constants.
//!
//! Polynomial: 0x1EDC6F41 (reflected: 0x82F63B78)
//! Used by: iSCSI, SCTP, Btrfs, ext4, LevelDB-style record logs

/// CRC32-C polynomial in normal (MSB-first) form.
pub const POLYNOMIAL_NORMAL: u32 = 0x1EDC_6F41;

/// CRC32-C polynomial in reflected (bit-reversed) form.
///
/// Both engines process LSB-first, which is the form the hardware
/// instructions implement.
pub const POLYNOMIAL: u32 = 0x82F6_3B78;

/// Standard initial register value and final XOR mask.
pub const INIT: u32 = 0xFFFF_FFFF;

/// Additive constant applied by [`mask`](fn@crate::mask).
pub const MASK_DELTA: u32 = 0xa282_ead8;

/// Rotation distance used by [`mask`](fn@crate::mask).
pub(crate) const MASK_ROTATION: u32 = 15;

/// Wrapper type to force 64-byte (cache line) alignment.
#[cfg(not(feature = "no-tables"))]
#[repr(align(64))]
pub(crate) struct Aligned64<T>(pub T);

/// Slicing-by-8 lookup tables (8 * 256 * 4 = 8KB).
///
/// Table `t` holds the register contribution of a byte that sits `t` positions
/// before the end of an 8-byte block.
#[cfg(not(feature = "no-tables"))]
pub(crate) static TABLES: Aligned64<[[u32; 256]; 8]> = Aligned64(generate_slicing_tables(POLYNOMIAL));

/// Generate the byte-at-a-time table for a reflected polynomial.
#[cfg(not(feature = "no-tables"))]
#[allow(clippy::indexing_slicing)] // const loop, `i < 256`
const fn generate_table_0(poly: u32) -> [u32; 256] {
  let mut table = [0u32; 256];
  let mut i = 0usize;

  while i < 256 {
    let mut crc = i as u32;
    let mut j = 0;
    while j < 8 {
      if crc & 1 != 0 {
        crc = (crc >> 1) ^ poly;
      } else {
        crc >>= 1;
      }
      j += 1;
    }
    table[i] = crc;
    i += 1;
  }

  table
}

/// Generate all 8 slicing-by-8 tables.
///
/// Tables 1-7 are derived by pushing one more zero byte through table 0.
#[cfg(not(feature = "no-tables"))]
#[allow(clippy::indexing_slicing)] // const loops over fixed bounds
const fn generate_slicing_tables(poly: u32) -> [[u32; 256]; 8] {
  let table0 = generate_table_0(poly);
  let mut tables = [[0u32; 256]; 8];
  tables[0] = table0;

  let mut t = 1;
  while t < 8 {
    let mut i = 0;
    while i < 256 {
      let prev = tables[t - 1][i];
      tables[t][i] = (prev >> 8) ^ table0[(prev & 0xFF) as usize];
      i += 1;
    }
    t += 1;
  }

  tables
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn reflected_polynomial_is_bit_reversed_normal() {
    assert_eq!(POLYNOMIAL_NORMAL.reverse_bits(), POLYNOMIAL);
  }

  #[cfg(not(feature = "no-tables"))]
  #[test]
  fn table_spot_values() {
    // Well-known entries of the CRC32-C byte table.
    assert_eq!(TABLES.0[0][0], 0x0000_0000);
    assert_eq!(TABLES.0[0][1], 0xF26B_8303);
    assert_eq!(TABLES.0[0][128], POLYNOMIAL);
    assert_eq!(TABLES.0[0][255], 0xAD7D_5351);
  }

  #[cfg(not(feature = "no-tables"))]
  #[test]
  fn tables_are_cache_line_aligned() {
    assert_eq!(core::ptr::addr_of!(TABLES).addr() % 64, 0);
  }
}
