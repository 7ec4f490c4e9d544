//! Engine selection configuration.
//!
//! Two layers, applied in order:
//!
//! 1. **Build mode** (cargo features): `force-accelerated`, `force-generic`,
//!    or neither for runtime detection. Fixed at compile time.
//! 2. **Force override** (`CASTAGNOLI_FORCE`, std only): refines runtime
//!    detection. Read once per process and ignored by the forced modes.
//!
//! Safety note: force requests are always clamped to detected CPU
//! capabilities. Asking for `hwcrc` on a CPU without it yields `auto`.

#[cfg(all(feature = "force-accelerated", feature = "force-generic"))]
compile_error!("features `force-accelerated` and `force-generic` are mutually exclusive");

/// Environment variable consulted in runtime-detected mode.
pub const FORCE_ENV: &str = "CASTAGNOLI_FORCE";

/// Build-time engine selection mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
  /// Probe the CPU once and bind whichever engine it supports.
  RuntimeDetected,
  /// Always bind the accelerated engine; unsupported hardware is an error.
  ForcedAccelerated,
  /// Always bind the generic engine; no probing.
  ForcedGeneric,
}

impl Mode {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::RuntimeDetected => "runtime-detected",
      Self::ForcedAccelerated => "forced-accelerated",
      Self::ForcedGeneric => "forced-generic",
    }
  }
}

/// The mode this crate was compiled with.
pub const MODE: Mode = {
  #[cfg(feature = "force-accelerated")]
  {
    Mode::ForcedAccelerated
  }
  #[cfg(all(feature = "force-generic", not(feature = "force-accelerated")))]
  {
    Mode::ForcedGeneric
  }
  #[cfg(not(any(feature = "force-accelerated", feature = "force-generic")))]
  {
    Mode::RuntimeDetected
  }
};

/// Forced engine selection within runtime-detected mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Force {
  /// Use whatever the probe reports.
  #[default]
  Auto,
  /// Use the generic engine even if acceleration is available.
  Portable,
  /// Use hardware CRC instructions (if available).
  Hwcrc,
}

impl Force {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Auto => "auto",
      Self::Portable => "portable",
      Self::Hwcrc => "hwcrc",
    }
  }

  /// Parse a force value. Unknown or empty strings yield `None`.
  #[must_use]
  pub fn parse(value: &str) -> Option<Self> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("auto") {
      return Some(Self::Auto);
    }
    if value.eq_ignore_ascii_case("portable")
      || value.eq_ignore_ascii_case("generic")
      || value.eq_ignore_ascii_case("table")
    {
      return Some(Self::Portable);
    }
    if value.eq_ignore_ascii_case("hwcrc")
      || value.eq_ignore_ascii_case("accelerated")
      || value.eq_ignore_ascii_case("crc32c")
    {
      return Some(Self::Hwcrc);
    }
    None
  }
}

/// Effective configuration (after applying overrides).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
  /// Build mode.
  pub mode: Mode,
  /// Requested force (env). Always `Auto` in the forced modes.
  pub requested_force: Force,
  /// Force clamped to detected CPU capabilities.
  pub effective_force: Force,
}

#[cfg(feature = "std")]
fn read_env_force() -> Force {
  std::env::var(FORCE_ENV)
    .ok()
    .and_then(|value| Force::parse(&value))
    .unwrap_or_default()
}

#[cfg(feature = "std")]
fn requested_force() -> Force {
  use std::sync::OnceLock;
  static FORCE: OnceLock<Force> = OnceLock::new();
  *FORCE.get_or_init(read_env_force)
}

#[cfg(not(feature = "std"))]
fn requested_force() -> Force {
  Force::Auto
}

#[inline]
#[must_use]
fn clamp_force(requested: Force, supported: bool) -> Force {
  match requested {
    Force::Auto | Force::Portable => requested,
    Force::Hwcrc if supported => Force::Hwcrc,
    Force::Hwcrc => Force::Auto,
  }
}

fn resolve(mode: Mode, requested: Force, supported: bool) -> Config {
  match mode {
    Mode::RuntimeDetected => Config {
      mode,
      requested_force: requested,
      effective_force: clamp_force(requested, supported),
    },
    Mode::ForcedAccelerated | Mode::ForcedGeneric => Config {
      mode,
      requested_force: Force::Auto,
      effective_force: Force::Auto,
    },
  }
}

/// Get the effective configuration for this process.
#[inline]
#[must_use]
pub fn get() -> Config {
  resolve(MODE, requested_force(), crate::probe::supported())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_accepts_aliases() {
    assert_eq!(Force::parse("auto"), Some(Force::Auto));
    assert_eq!(Force::parse(" Portable "), Some(Force::Portable));
    assert_eq!(Force::parse("generic"), Some(Force::Portable));
    assert_eq!(Force::parse("HWCRC"), Some(Force::Hwcrc));
    assert_eq!(Force::parse("crc32c"), Some(Force::Hwcrc));
    assert_eq!(Force::parse(""), None);
    assert_eq!(Force::parse("avx512"), None);
  }

  #[test]
  fn hwcrc_clamps_to_auto_without_support() {
    assert_eq!(clamp_force(Force::Hwcrc, false), Force::Auto);
    assert_eq!(clamp_force(Force::Hwcrc, true), Force::Hwcrc);
    assert_eq!(clamp_force(Force::Portable, false), Force::Portable);
    assert_eq!(clamp_force(Force::Auto, true), Force::Auto);
  }

  #[test]
  fn forced_modes_ignore_requests() {
    for mode in [Mode::ForcedAccelerated, Mode::ForcedGeneric] {
      let cfg = resolve(mode, Force::Portable, true);
      assert_eq!(cfg.mode, mode);
      assert_eq!(cfg.requested_force, Force::Auto);
      assert_eq!(cfg.effective_force, Force::Auto);
    }
  }

  #[test]
  fn runtime_mode_keeps_request() {
    let cfg = resolve(Mode::RuntimeDetected, Force::Portable, true);
    assert_eq!(cfg.requested_force, Force::Portable);
    assert_eq!(cfg.effective_force, Force::Portable);
  }

  #[test]
  fn get_reports_build_mode() {
    assert_eq!(get().mode, MODE);
  }

  #[test]
  fn names() {
    assert_eq!(Force::Hwcrc.as_str(), "hwcrc");
    assert_eq!(Mode::RuntimeDetected.as_str(), "runtime-detected");
  }
}
