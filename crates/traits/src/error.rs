//! Verification errors.

use core::fmt;

/// A stored checksum did not match its data.
///
/// Carries no detail: a corrupt record is rejected the same way whichever
/// bit flipped, and callers never see the recomputed value.
///
/// # Examples
///
/// ```
/// use traits::VerificationError;
///
/// fn check_record(stored: u32, recomputed: u32) -> Result<(), VerificationError> {
///   (stored == recomputed).then_some(()).ok_or(VerificationError::new())
/// }
///
/// assert!(check_record(0xE306_9283, 0xE306_9283).is_ok());
/// assert_eq!(check_record(0xE306_9283, 0), Err(VerificationError::new()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub struct VerificationError;

impl VerificationError {
  /// The mismatch error. Outside this crate, the only constructor.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self
  }
}

impl fmt::Display for VerificationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("checksum mismatch")
  }
}

impl core::error::Error for VerificationError {}
