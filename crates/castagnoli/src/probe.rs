//! CPU capability probe for the accelerated engine.
//!
//! The mechanism (compile-time `target_feature` plus runtime CPUID / HWCAP
//! queries) lives in the `platform` crate. This module reduces it to the one
//! question the dispatcher asks.

/// Whether the host CPU can run the accelerated engine.
///
/// Detection is cached by `platform`, so repeated calls are a single atomic
/// load. Never mutates dispatch state and may be called at any time,
/// including before [`initialize`](crate::initialize).
#[inline]
#[must_use]
pub fn supported() -> bool {
  #[cfg(any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64"))]
  {
    platform::caps().has(platform::caps::CRC32C_READY)
  }

  #[cfg(not(any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64")))]
  {
    false
  }
}

/// Name of the accelerated backend for this target, e.g. `"x86_64/sse4.2"`.
///
/// `None` when the target has no CRC32-C instruction family. A `Some` value
/// says nothing about the host CPU; see [`supported`].
#[inline]
#[must_use]
pub const fn backend_name() -> Option<&'static str> {
  crate::hwcrc::BACKEND_NAME
}
