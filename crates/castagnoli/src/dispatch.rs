//! Process-wide dispatcher.
//!
//! Binds one [`Engine`] per process and exposes the dispatched entry points.
//! Prefer holding an [`Engine`] directly when it can be passed around; this
//! module exists for callers that want a single global `checksum` function.
//!
//! # Lifecycle
//!
//! ```text
//! UNBOUND ──initialize()──► BINDING ──► GENERIC | ACCELERATED | FAILED
//! ```
//!
//! The bind is a one-shot compare-and-swap. Racing callers spin on `BINDING`
//! and then observe the completed result; no caller ever sees a partial
//! binding, and a bound state never changes.

use core::sync::atomic::{AtomicU8, Ordering};

use crate::{
  config,
  constants::INIT,
  engine::{Backend, Engine},
  error::InitError,
  masking::mask,
};

const UNBOUND: u8 = 0;
const BINDING: u8 = 1;
const GENERIC: u8 = 2;
const ACCELERATED: u8 = 3;
const FAILED: u8 = 4;

static STATE: AtomicU8 = AtomicU8::new(UNBOUND);

#[inline]
#[allow(unsafe_code)]
fn load_bound() -> Option<Result<Engine, InitError>> {
  match STATE.load(Ordering::Acquire) {
    GENERIC => Some(Ok(Engine::generic())),
    // SAFETY: `ACCELERATED` is only stored after `Engine::configured` returned
    // an accelerated handle, which requires the probe to pass.
    ACCELERATED => Some(Ok(unsafe { Engine::accelerated_unchecked() })),
    FAILED => Some(Err(InitError::for_target())),
    _ => None,
  }
}

#[cold]
fn bind() -> Result<Engine, InitError> {
  loop {
    match STATE.compare_exchange(UNBOUND, BINDING, Ordering::AcqRel, Ordering::Acquire) {
      Ok(_) => {
        let result = Engine::configured();
        let state = match result {
          Ok(engine) if engine.backend() == Backend::Accelerated => ACCELERATED,
          Ok(_) => GENERIC,
          Err(_) => FAILED,
        };
        STATE.store(state, Ordering::Release);

        let mode = config::MODE.as_str();
        match &result {
          Ok(engine) => log::debug!("castagnoli: bound {} engine ({mode} mode)", engine.backend()),
          Err(err) => log::error!("castagnoli: initialization failed ({mode} mode): {err}"),
        }
        return result;
      }
      Err(BINDING) => {
        while STATE.load(Ordering::Acquire) == BINDING {
          core::hint::spin_loop();
        }
      }
      Err(_) => {}
    }

    if let Some(bound) = load_bound() {
      return bound;
    }
  }
}

/// Bind the process-wide engine.
///
/// Idempotent: the first call probes (per the build mode) and binds; every
/// later call, including concurrent ones, returns the same engine or the same
/// error without probing again. Forced-generic mode never probes.
///
/// # Errors
///
/// In forced-accelerated mode, returns [`InitError`] when the CPU lacks the
/// instruction family. The failure is sticky.
///
/// # Example
///
/// ```
/// let engine = castagnoli::initialize()?;
/// assert_eq!(castagnoli::initialize()?, engine);
/// # Ok::<(), castagnoli::InitError>(())
/// ```
#[inline]
pub fn initialize() -> Result<Engine, InitError> {
  match load_bound() {
    Some(bound) => bound,
    None => bind(),
  }
}

/// The process-wide engine, binding it on first use.
///
/// # Panics
///
/// In forced-accelerated mode on a CPU without the instruction family. This
/// is a deliberate abort with a diagnostic; the unsupported instruction is
/// never executed. Call [`initialize`] first to handle the error instead.
#[inline]
#[must_use]
pub fn engine() -> Engine {
  match initialize() {
    Ok(engine) => engine,
    Err(err) => panic!("castagnoli: {err}; this build requires hardware CRC32-C (feature `force-accelerated`)"),
  }
}

/// Fold `data` into the raw register `seed` with the process-wide engine.
///
/// Identical results on every backend. See [`Engine::checksum`].
///
/// # Panics
///
/// See [`engine`].
#[inline]
#[must_use]
pub fn checksum(seed: u32, data: &[u8]) -> u32 {
  engine().checksum(seed, data)
}

/// Standard finalized CRC32-C of `data`, masked for storage.
///
/// Equal to `mask(checksum(!0, data))`.
///
/// # Example
///
/// ```
/// use castagnoli::{masked_checksum, unmask};
///
/// let stored = masked_checksum(b"123456789");
/// assert_eq!(!unmask(stored), 0xE306_9283);
/// ```
///
/// # Panics
///
/// See [`engine`].
#[inline]
#[must_use]
pub fn masked_checksum(data: &[u8]) -> u32 {
  mask(checksum(INIT, data))
}

#[cfg(test)]
mod tests {
  extern crate std;

  use std::{thread, vec::Vec};

  use super::*;
  use crate::probe;

  // The dispatcher is process-wide and other unit tests bind it too, so these
  // tests only rely on the one-way property: once bound, never unbound.

  #[test]
  fn initialize_is_idempotent() {
    let first = initialize();
    for _ in 0..8 {
      assert_eq!(initialize(), first);
    }
    assert_eq!(load_bound(), Some(first));
  }

  #[test]
  fn concurrent_initialize_agrees() {
    let results: Vec<_> = (0..8)
      .map(|_| thread::spawn(initialize))
      .collect::<Vec<_>>()
      .into_iter()
      .map(|h| h.join().unwrap())
      .collect();
    assert!(results.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(load_bound(), Some(results[0]));
  }

  #[test]
  fn checksum_binds_lazily() {
    assert_eq!(!checksum(INIT, b"123456789"), 0xE306_9283);
    assert!(load_bound().is_some());
  }

  #[test]
  fn bound_backend_matches_mode() {
    match (config::MODE, initialize()) {
      (config::Mode::ForcedGeneric, Ok(engine)) => assert_eq!(engine.backend(), Backend::Generic),
      (config::Mode::ForcedAccelerated, Ok(engine)) => assert_eq!(engine.backend(), Backend::Accelerated),
      (config::Mode::ForcedAccelerated, Err(_)) => assert!(!probe::supported()),
      (config::Mode::RuntimeDetected, Ok(engine)) => {
        if engine.backend() == Backend::Accelerated {
          assert!(probe::supported());
        }
      }
      (mode, result) => panic!("unexpected {result:?} in {mode:?}"),
    }
  }

  #[test]
  fn masked_checksum_matches_engine() {
    let data = b"castagnoli";
    assert_eq!(masked_checksum(data), Engine::generic().masked_checksum(data));
  }
}
