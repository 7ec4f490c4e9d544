//! CPU capability representation.
//!
//! This module answers the question: "What instructions can I legally run on
//! this machine?" for the instruction families the checksum engines care about.
//!
//! # Bit Layout
//!
//! - Bits 0-31: x86/x86_64 features
//! - Bits 32-63: aarch64 features
//!
//! # Usage
//!
//! ```ignore
//! use platform::caps::x86;
//!
//! if platform::caps().has(x86::SSE42) {
//!     // `crc32` instruction family is available
//! }
//! ```

// ─────────────────────────────────────────────────────────────────────────────
// Core Capability Type
// ─────────────────────────────────────────────────────────────────────────────

/// CPU capabilities: a 64-bit feature bitset.
///
/// `Caps` is `Copy`, `Send`, and `Sync`. It can be freely shared across threads.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Caps(pub(crate) u64);

impl Caps {
  /// Empty capability set (no features).
  pub const NONE: Self = Self(0);

  /// Create a capability set from a raw word.
  #[cfg(test)]
  #[inline]
  #[must_use]
  pub const fn from_raw(bits: u64) -> Self {
    Self(bits)
  }

  /// Access the raw underlying word.
  #[inline]
  #[must_use]
  pub const fn to_raw(self) -> u64 {
    self.0
  }

  /// Check if all features in `required` are present.
  #[inline(always)]
  #[must_use]
  pub const fn has(self, required: Self) -> bool {
    (self.0 & required.0) == required.0
  }

  /// Union of two capability sets.
  #[inline]
  #[must_use]
  pub const fn union(self, other: Self) -> Self {
    Self(self.0 | other.0)
  }

  /// Create a capability set with a single bit set.
  #[inline]
  #[must_use]
  pub const fn bit(bit: u8) -> Self {
    Self(1u64 << (bit % 64))
  }

  /// Check if a specific bit is set.
  #[inline]
  #[must_use]
  pub const fn has_bit(self, bit: u8) -> bool {
    (self.0 & (1u64 << (bit % 64))) != 0
  }

  /// Returns an iterator over the names of all set feature bits.
  pub fn feature_names(self) -> impl Iterator<Item = &'static str> {
    FEATURE_NAMES
      .iter()
      .filter_map(move |(bit, name)| if self.has_bit(*bit) { Some(*name) } else { None })
  }
}

impl core::ops::BitOr for Caps {
  type Output = Self;

  #[inline]
  fn bitor(self, rhs: Self) -> Self::Output {
    self.union(rhs)
  }
}

impl core::ops::BitOrAssign for Caps {
  #[inline]
  fn bitor_assign(&mut self, rhs: Self) {
    *self = self.union(rhs);
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Architecture Identification
// ─────────────────────────────────────────────────────────────────────────────

/// Target architecture enumeration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Arch {
  X86_64,
  X86,
  Aarch64,
  #[default]
  Other,
}

impl Arch {
  /// Get the architecture for the current compilation target.
  #[inline]
  #[must_use]
  pub const fn current() -> Self {
    #[cfg(target_arch = "x86_64")]
    {
      Self::X86_64
    }
    #[cfg(target_arch = "x86")]
    {
      Self::X86
    }
    #[cfg(target_arch = "aarch64")]
    {
      Self::Aarch64
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64")))]
    {
      Self::Other
    }
  }

  /// Returns the human-readable name for this architecture.
  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::X86_64 => "x86_64",
      Self::X86 => "x86",
      Self::Aarch64 => "aarch64",
      Self::Other => "other",
    }
  }
}

impl core::fmt::Display for Arch {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(self.name())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// x86/x86_64 Features (bits 0-31)
// ─────────────────────────────────────────────────────────────────────────────

/// x86/x86_64 CPU features.
pub mod x86 {
  use super::Caps;

  pub const SSE42: Caps = Caps::bit(2);

  /// SSE4.2 `crc32` instruction (Castagnoli polynomial, 8/16/32/64-bit operands).
  pub const CRC32C_READY: Caps = SSE42;
}

// ─────────────────────────────────────────────────────────────────────────────
// aarch64 Features (bits 32-63)
// ─────────────────────────────────────────────────────────────────────────────

/// aarch64 CPU features.
pub mod aarch64 {
  use super::Caps;

  pub const CRC: Caps = Caps::bit(33);

  /// ARMv8 CRC32 extension (`crc32c{b,h,w,x}`).
  pub const CRC32C_READY: Caps = CRC;
}

/// The capability set that gates the hardware CRC32C engine on this target.
#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
pub const CRC32C_READY: Caps = x86::CRC32C_READY;

/// The capability set that gates the hardware CRC32C engine on this target.
#[cfg(target_arch = "aarch64")]
pub const CRC32C_READY: Caps = aarch64::CRC32C_READY;

// ─────────────────────────────────────────────────────────────────────────────
// Feature Names
// ─────────────────────────────────────────────────────────────────────────────

const FEATURE_NAMES: [(u8, &str); 2] = [(2, "sse4.2"), (33, "crc")];

impl core::fmt::Debug for Caps {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    write!(f, "Caps({}", Arch::current())?;

    let mut iter = self.feature_names().peekable();
    if iter.peek().is_none() {
      return f.write_str(", none)");
    }

    f.write_str(", [")?;
    let mut first = true;
    for name in iter {
      if !first {
        f.write_str(", ")?;
      }
      first = false;
      f.write_str(name)?;
    }
    f.write_str("])")
  }
}

impl core::fmt::Display for Caps {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    core::fmt::Debug::fmt(self, f)
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::format;

  use super::*;

  #[test]
  fn has_requires_every_bit() {
    let both = x86::SSE42 | aarch64::CRC;
    assert!(both.has(x86::SSE42));
    assert!(both.has(both));
    assert!(!x86::SSE42.has(both));
  }

  #[test]
  fn empty_set_gates_nothing() {
    assert!(Caps::NONE.has(Caps::NONE));
    assert!(!Caps::NONE.has(x86::CRC32C_READY));
    assert!(!Caps::NONE.has(aarch64::CRC32C_READY));
  }

  #[test]
  fn bit_layout_does_not_overlap() {
    assert_eq!(x86::SSE42.to_raw(), 1 << 2);
    assert_eq!(aarch64::CRC.to_raw(), 1 << 33);
    assert!(!x86::CRC32C_READY.has(aarch64::CRC32C_READY));
  }

  #[test]
  fn from_raw_roundtrips() {
    assert_eq!(Caps::from_raw(0b100), x86::SSE42);
  }

  #[test]
  fn debug_lists_feature_names() {
    let s = format!("{:?}", x86::SSE42 | aarch64::CRC);
    assert!(s.ends_with(", [sse4.2, crc])"), "{s}");
    assert!(format!("{}", Caps::NONE).ends_with(", none)"));
  }
}
