//! CPU detection and capabilities for the castagnoli workspace.
//!
//! This crate is the single source of truth for CPU feature detection.
//! Checksum engines query [`caps()`] instead of doing ad-hoc detection.
//!
//! # Core Types
//!
//! - [`Caps`]: What instructions can run on this machine
//!
//! # Design
//!
//! 1. **One API**: Engines query `platform::caps()`.
//! 2. **Zero-cost when possible**: Compile-time features are folded in via `cfg!`.
//! 3. **Cached otherwise**: Runtime detection is cached in `OnceLock` (std) or atomics (no_std).
//! 4. **Overridable**: Tests and bare-metal deployments can pin capabilities.
//! 5. **Miri-safe**: Under Miri, always returns portable-only caps.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod caps;
mod detect;

pub use caps::{Arch, Caps};
pub use detect::detect_uncached;

/// Get detected CPU capabilities.
///
/// # Caching
///
/// - With `std`: compile-time features plus runtime detection, cached in a `OnceLock`.
/// - Without `std`: compile-time features only, cached with atomics.
///
/// # Example
///
/// ```
/// let caps = platform::caps();
/// assert_eq!(caps, platform::caps());
/// ```
#[inline]
#[must_use]
pub fn caps() -> Caps {
  detect::caps()
}

/// Set or clear the capabilities override.
///
/// # Hazard
///
/// Engines treat the reported capabilities as a guarantee. Removing features
/// is always sound. Adding a feature the CPU lacks (for example `SSE42` on a
/// machine without it) lets a safe engine call execute an illegal
/// instruction. Only claim features the deployment hardware is known to have.
///
/// When set, [`caps()`] will return the override value instead of detecting.
/// Pass `None` to clear the override and resume detection.
///
/// # Example
///
/// ```ignore
/// // In tests: force the portable fallback.
/// platform::set_caps_override(Some(platform::Caps::NONE));
/// // ...
/// platform::set_caps_override(None);
/// ```
#[inline]
pub fn set_caps_override(value: Option<Caps>) {
  detect::set_caps_override(value);
}

/// Check if an override is currently set.
#[inline]
#[must_use]
pub fn has_override() -> bool {
  detect::has_override()
}
