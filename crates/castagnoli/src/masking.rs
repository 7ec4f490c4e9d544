//! Checksum masking for stored records.
//!
//! Computing a CRC over data that itself embeds CRCs is problematic, and an
//! all-zero record yields a degenerate checksum. Records therefore store a
//! masked value: the finalized CRC rotated and offset by a constant. The
//! transform is a bijection on `u32` and offers no security.

use traits::VerificationError;

use crate::constants::{MASK_DELTA, MASK_ROTATION};

/// Mask a raw CRC register for storage.
///
/// `mask(crc) = rotate_right(!crc, 15) + 0xa282_ead8` (wrapping). The
/// bitwise-not is the standard CRC32-C finalization, so `crc` is the raw
/// register as returned by [`checksum`](crate::checksum) seeded with `!0`.
///
/// # Example
///
/// ```
/// use castagnoli::{MASK_DELTA, mask};
///
/// assert_eq!(mask(!0), MASK_DELTA);
/// ```
#[inline]
#[must_use]
pub const fn mask(crc: u32) -> u32 {
  (!crc).rotate_right(MASK_ROTATION).wrapping_add(MASK_DELTA)
}

/// Invert [`mask`]: subtract the delta, rotate left 15, bitwise-not.
///
/// `unmask(mask(x)) == x` for every `x`.
#[inline]
#[must_use]
pub const fn unmask(masked: u32) -> u32 {
  !masked.wrapping_sub(MASK_DELTA).rotate_left(MASK_ROTATION)
}

/// Check `data` against a stored masked checksum.
///
/// # Errors
///
/// Returns [`VerificationError`] when the recomputed checksum differs.
///
/// # Panics
///
/// See [`engine`](fn@crate::engine).
///
/// # Example
///
/// ```
/// use castagnoli::{masked_checksum, verify_masked};
///
/// let record = b"key=value";
/// let stored = masked_checksum(record);
/// assert!(verify_masked(record, stored).is_ok());
/// assert!(verify_masked(b"key=valuE", stored).is_err());
/// ```
#[inline]
pub fn verify_masked(data: &[u8], stored: u32) -> Result<(), VerificationError> {
  if crate::dispatch::masked_checksum(data) == stored {
    Ok(())
  } else {
    Err(VerificationError::new())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{constants::INIT, portable};

  #[test]
  fn inverse_on_edges() {
    for x in [0, 1, 0x8000_0000, 0x7FFF_FFFF, MASK_DELTA, !MASK_DELTA, 0xE306_9283, u32::MAX] {
      assert_eq!(unmask(mask(x)), x, "x={x:#010x}");
      assert_eq!(mask(unmask(x)), x, "x={x:#010x}");
    }
  }

  #[test]
  fn formula() {
    let raw = 0x1234_5678u32;
    let expected = (!raw).rotate_right(15).wrapping_add(0xa282_ead8);
    assert_eq!(mask(raw), expected);
  }

  #[test]
  fn addition_wraps() {
    // !0x0000_0000 rotated is 0xFFFF_FFFF; adding the delta must wrap.
    assert_eq!(mask(0), MASK_DELTA.wrapping_sub(1));
  }

  #[test]
  fn masking_changes_value() {
    let raw = portable::compute(INIT, b"123456789");
    assert_ne!(mask(raw), !raw);
    assert_ne!(mask(mask(raw)), mask(raw));
  }

  #[test]
  fn empty_record() {
    assert_eq!(mask(portable::compute(INIT, &[])), MASK_DELTA);
  }

  #[test]
  fn verify_round_trip() {
    let data = b"\x00\x00\x00\x00\x00\x00\x00\x00";
    let stored = crate::dispatch::masked_checksum(data);
    assert_eq!(verify_masked(data, stored), Ok(()));
    assert_eq!(verify_masked(data, stored ^ 1), Err(VerificationError::new()));
    assert_eq!(verify_masked(&data[1..], stored), Err(VerificationError::new()));
  }
}
