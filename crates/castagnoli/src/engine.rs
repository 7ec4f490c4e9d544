//! Engine handles.
//!
//! An [`Engine`] is a resolved choice between the generic and accelerated
//! checksum engines. It is a plain `Copy` value: construct it once, then hand
//! it to whatever needs CRC32-C. Holding an accelerated handle is proof that
//! the capability probe passed, so checksumming through it never executes an
//! unsupported instruction.

use core::fmt;

use crate::{
  config::{self, Force, Mode},
  constants::INIT,
  error::InitError,
  hasher::Crc32c,
  hwcrc, masking::mask, portable, probe,
};

/// Which checksum engine a handle is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Backend {
  /// Portable table-driven (or bitwise, with `no-tables`) engine.
  Generic,
  /// CPU CRC32-C instructions.
  Accelerated,
}

impl Backend {
  /// Human-readable backend name, e.g. `"portable/slice8"` or `"aarch64/crc"`.
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Generic => {
        if cfg!(feature = "no-tables") {
          "portable/bitwise"
        } else {
          "portable/slice8"
        }
      }
      Self::Accelerated => match hwcrc::BACKEND_NAME {
        Some(name) => name,
        None => "accelerated",
      },
    }
  }
}

impl fmt::Display for Backend {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// A resolved CRC32-C engine.
///
/// # Example
///
/// ```
/// use castagnoli::{Backend, Engine};
///
/// let generic = Engine::generic();
/// let best = Engine::detect();
///
/// let data = b"123456789";
/// assert_eq!(generic.checksum(!0, data), best.checksum(!0, data));
/// assert_eq!(!generic.checksum(!0, data), 0xE306_9283);
/// assert_eq!(generic.backend(), Backend::Generic);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Engine {
  backend: Backend,
}

impl Engine {
  /// The generic engine. Always available.
  #[inline]
  #[must_use]
  pub const fn generic() -> Self {
    Self {
      backend: Backend::Generic,
    }
  }

  /// The accelerated engine, if the CPU supports it.
  ///
  /// # Errors
  ///
  /// Returns [`InitError`] when the probe fails.
  #[inline]
  pub fn accelerated() -> Result<Self, InitError> {
    if probe::supported() {
      Ok(Self {
        backend: Backend::Accelerated,
      })
    } else {
      Err(InitError::for_target())
    }
  }

  /// Accelerated handle for a probe that already passed.
  ///
  /// # Safety
  ///
  /// [`probe::supported`] must have returned `true` in this process.
  #[inline]
  #[allow(unsafe_code)]
  pub(crate) const unsafe fn accelerated_unchecked() -> Self {
    Self {
      backend: Backend::Accelerated,
    }
  }

  /// The fastest engine the CPU supports.
  #[inline]
  #[must_use]
  pub fn detect() -> Self {
    Self::accelerated().unwrap_or(Self::generic())
  }

  /// The engine selected by the build mode and the force override.
  ///
  /// - forced-generic: [`Engine::generic`], no probing.
  /// - forced-accelerated: [`Engine::accelerated`].
  /// - runtime-detected: [`Engine::detect`], refined by `CASTAGNOLI_FORCE`.
  ///
  /// # Errors
  ///
  /// Only in forced-accelerated mode, when the probe fails.
  pub fn configured() -> Result<Self, InitError> {
    match config::MODE {
      Mode::ForcedGeneric => Ok(Self::generic()),
      Mode::ForcedAccelerated => Self::accelerated(),
      Mode::RuntimeDetected => Ok(match config::get().effective_force {
        Force::Portable => Self::generic(),
        // Clamped: `Hwcrc` survives only when the probe passes.
        Force::Hwcrc | Force::Auto => Self::detect(),
      }),
    }
  }

  /// Backend this handle is bound to.
  #[inline]
  #[must_use]
  pub const fn backend(self) -> Backend {
    self.backend
  }

  /// Fold `data` into the raw register `seed` and return the new register.
  ///
  /// No pre or post inversion is applied. `checksum(s, &[]) == s`, and
  /// feeding one result as the seed of the next call equals a single pass.
  #[inline]
  #[must_use]
  #[allow(unsafe_code)]
  pub fn checksum(self, seed: u32, data: &[u8]) -> u32 {
    match self.backend {
      Backend::Generic => portable::compute(seed, data),
      // SAFETY: `Accelerated` is only constructed after the probe passed.
      Backend::Accelerated => unsafe { hwcrc::compute_unchecked(seed, data) },
    }
  }

  /// Standard finalized CRC32-C masked for storage. See [`mask`](fn@crate::mask).
  #[inline]
  #[must_use]
  pub fn masked_checksum(self, data: &[u8]) -> u32 {
    mask(self.checksum(INIT, data))
  }

  /// Streaming hasher running on this engine.
  #[inline]
  #[must_use]
  pub const fn hasher(self) -> Crc32c {
    Crc32c::with_engine(self)
  }
}

impl fmt::Debug for Engine {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Engine")
      .field("backend", &format_args!("{}", self.backend))
      .finish()
  }
}
