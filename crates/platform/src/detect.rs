//! CPU feature detection.
//!
//! This module provides the unified [`caps()`] function. It handles:
//!
//! - Compile-time detection (via `cfg!(target_feature = "...")`)
//! - Runtime detection (via `std::arch` feature macros)
//! - Caching (via `OnceLock` with `std`, atomics without)
//! - User-supplied overrides for bare metal and testing
//! - Miri fallback (always returns portable caps)

use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::caps::Caps;

// ─────────────────────────────────────────────────────────────────────────────
// Cache
// ─────────────────────────────────────────────────────────────────────────────

/// Cache state for no_std builds.
#[cfg(not(feature = "std"))]
mod cache {
  use core::sync::atomic::AtomicU8;

  use super::*;

  const UNINIT: u8 = 0;
  const BUSY: u8 = 1;
  const READY: u8 = 2;

  static STATE: AtomicU8 = AtomicU8::new(UNINIT);
  static CACHED: AtomicU64 = AtomicU64::new(0);

  /// Return the cached value, computing it on first use.
  #[inline]
  pub fn get_or_init(f: fn() -> Caps) -> Caps {
    if STATE.load(Ordering::Acquire) == READY {
      return Caps(CACHED.load(Ordering::Acquire));
    }

    match STATE.compare_exchange(UNINIT, BUSY, Ordering::AcqRel, Ordering::Acquire) {
      Ok(_) => {
        let caps = f();
        CACHED.store(caps.0, Ordering::Release);
        STATE.store(READY, Ordering::Release);
        caps
      }
      Err(_) => {
        while STATE.load(Ordering::Acquire) != READY {
          core::hint::spin_loop();
        }
        Caps(CACHED.load(Ordering::Acquire))
      }
    }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Override Support
// ─────────────────────────────────────────────────────────────────────────────

static OVERRIDE_SET: AtomicBool = AtomicBool::new(false);
static OVERRIDE_BITS: AtomicU64 = AtomicU64::new(0);

/// Set or clear the capabilities override.
///
/// When set, [`caps()`] returns the override instead of detecting. Pass
/// `None` to clear it and resume detection.
pub fn set_caps_override(value: Option<Caps>) {
  match value {
    Some(caps) => {
      OVERRIDE_BITS.store(caps.0, Ordering::Release);
      OVERRIDE_SET.store(true, Ordering::Release);
    }
    None => OVERRIDE_SET.store(false, Ordering::Release),
  }
}

/// Check if an override is currently set.
#[inline]
pub fn has_override() -> bool {
  OVERRIDE_SET.load(Ordering::Acquire)
}

fn get_override() -> Option<Caps> {
  if OVERRIDE_SET.load(Ordering::Acquire) {
    Some(Caps(OVERRIDE_BITS.load(Ordering::Acquire)))
  } else {
    None
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main API
// ─────────────────────────────────────────────────────────────────────────────

/// Get detected CPU capabilities.
///
/// Detection runs once per process; later calls read the cached value.
/// An override installed with [`set_caps_override`] takes precedence.
#[inline]
#[must_use]
pub fn caps() -> Caps {
  // Miri cannot interpret the hardware intrinsics.
  #[cfg(miri)]
  {
    Caps::NONE
  }

  #[cfg(not(miri))]
  {
    if let Some(caps) = get_override() {
      return caps;
    }

    #[cfg(feature = "std")]
    {
      use std::sync::OnceLock;
      static CACHED: OnceLock<Caps> = OnceLock::new();
      *CACHED.get_or_init(detect_uncached)
    }

    #[cfg(not(feature = "std"))]
    {
      cache::get_or_init(detect_uncached)
    }
  }
}

/// Detect capabilities without caching or overrides.
#[inline]
#[must_use]
pub fn detect_uncached() -> Caps {
  #[allow(unused_mut)]
  let mut caps = caps_static();

  #[cfg(feature = "std")]
  {
    caps |= runtime();
  }

  caps
}

/// Capabilities the compiler was told it may assume.
#[inline]
#[must_use]
pub(crate) const fn caps_static() -> Caps {
  #[allow(unused_mut)]
  let mut bits = Caps::NONE;

  #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
  {
    #[cfg(target_feature = "sse4.2")]
    {
      bits = bits.union(crate::caps::x86::SSE42);
    }
  }

  #[cfg(target_arch = "aarch64")]
  {
    #[cfg(target_feature = "crc")]
    {
      bits = bits.union(crate::caps::aarch64::CRC);
    }
  }

  bits
}

#[cfg(all(feature = "std", any(target_arch = "x86_64", target_arch = "x86")))]
fn runtime() -> Caps {
  use crate::caps::x86;

  let mut caps = Caps::NONE;
  if std::arch::is_x86_feature_detected!("sse4.2") {
    caps |= x86::SSE42;
  }
  caps
}

#[cfg(all(feature = "std", target_arch = "aarch64"))]
fn runtime() -> Caps {
  use crate::caps::aarch64;

  let mut caps = Caps::NONE;
  if std::arch::is_aarch64_feature_detected!("crc") {
    caps |= aarch64::CRC;
  }
  caps
}

#[cfg(all(
  feature = "std",
  not(any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64"))
))]
fn runtime() -> Caps {
  Caps::NONE
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
