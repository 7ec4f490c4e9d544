//! Streaming CRC32-C.

use traits::Checksum;

use crate::{constants::INIT, dispatch, engine::Engine, masking::mask};

/// Streaming CRC32-C (Castagnoli) hasher.
///
/// Init `0xFFFF_FFFF`, final XOR `0xFFFF_FFFF`. Runs on the process-wide
/// engine unless built with [`Crc32c::with_engine`] or [`Engine::hasher`].
///
/// # Example
///
/// ```
/// use castagnoli::Crc32c;
///
/// let mut hasher = Crc32c::new();
/// hasher.update(b"1234");
/// hasher.update(b"56789");
/// assert_eq!(hasher.finalize(), 0xE306_9283);
/// ```
#[derive(Clone, Debug)]
pub struct Crc32c {
  /// Raw register (finalization XOR applied on `finalize`).
  state: u32,
  /// Register value restored by `reset`.
  initial: u32,
  engine: Engine,
}

impl Crc32c {
  /// Create a new hasher on the process-wide engine.
  ///
  /// # Panics
  ///
  /// See [`engine`](fn@crate::engine).
  #[inline]
  #[must_use]
  pub fn new() -> Self {
    Self::with_engine(dispatch::engine())
  }

  /// Create a new hasher on a specific engine.
  #[inline]
  #[must_use]
  pub const fn with_engine(engine: Engine) -> Self {
    Self {
      state: INIT,
      initial: INIT,
      engine,
    }
  }

  /// Create a new hasher that continues from a previous finalized CRC.
  ///
  /// # Example
  ///
  /// ```
  /// use castagnoli::Crc32c;
  ///
  /// let data = b"hello world";
  /// let (first, second) = data.split_at(6);
  ///
  /// let mut hasher = Crc32c::resume(Crc32c::checksum(first));
  /// hasher.update(second);
  /// assert_eq!(hasher.finalize(), Crc32c::checksum(data));
  /// ```
  ///
  /// # Panics
  ///
  /// Like [`Crc32c::new`], binds the process-wide engine; see
  /// [`engine`](fn@crate::engine).
  #[inline]
  #[must_use]
  pub fn resume(crc: u32) -> Self {
    let mut hasher = Self::new();
    hasher.state = crc ^ INIT;
    hasher.initial = crc ^ INIT;
    hasher
  }

  /// Compute CRC32-C of data in one shot.
  ///
  /// ```
  /// use castagnoli::Crc32c;
  ///
  /// assert_eq!(Crc32c::checksum(b"123456789"), 0xE306_9283);
  /// ```
  #[inline]
  #[must_use]
  pub fn checksum(data: &[u8]) -> u32 {
    dispatch::checksum(INIT, data) ^ INIT
  }

  /// Update the hasher with additional data.
  #[inline]
  pub fn update(&mut self, data: &[u8]) {
    self.state = self.engine.checksum(self.state, data);
  }

  /// Finalize and return the checksum.
  ///
  /// This does not consume the hasher, allowing further updates.
  #[inline]
  #[must_use]
  pub const fn finalize(&self) -> u32 {
    self.state ^ INIT
  }

  /// The finalized checksum masked for storage. See [`mask`](fn@crate::mask).
  #[inline]
  #[must_use]
  pub const fn masked(&self) -> u32 {
    mask(self.state)
  }

  /// Reset the hasher to its initial state.
  #[inline]
  pub fn reset(&mut self) {
    self.state = self.initial;
  }

  /// Engine this hasher runs on.
  #[inline]
  #[must_use]
  pub const fn engine(&self) -> Engine {
    self.engine
  }
}

impl Default for Crc32c {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl Checksum for Crc32c {
  const OUTPUT_SIZE: usize = 4;
  type Output = u32;

  #[inline]
  fn new() -> Self {
    Crc32c::new()
  }

  #[inline]
  fn with_initial(initial: Self::Output) -> Self {
    Crc32c::resume(initial)
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    Crc32c::update(self, data);
  }

  #[inline]
  fn finalize(&self) -> Self::Output {
    Crc32c::finalize(self)
  }

  #[inline]
  fn reset(&mut self) {
    Crc32c::reset(self);
  }

  #[inline]
  fn checksum(data: &[u8]) -> Self::Output {
    Crc32c::checksum(data)
  }
}

#[cfg(feature = "std")]
impl std::io::Write for Crc32c {
  #[inline]
  fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
    self.update(buf);
    Ok(buf.len())
  }

  #[inline]
  fn flush(&mut self) -> std::io::Result<()> {
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::vec::Vec;

  use super::*;

  const CHECK: u32 = 0xE306_9283;

  #[test]
  fn check_value() {
    assert_eq!(Crc32c::checksum(b"123456789"), CHECK);
    assert_eq!(Crc32c::checksum(b""), 0);
  }

  #[test]
  fn streaming_matches_oneshot() {
    let data: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
    let expected = Crc32c::checksum(&data);
    for split in [0, 1, 7, 8, 500, 999, 1000] {
      let mut hasher = Crc32c::new();
      hasher.update(&data[..split]);
      hasher.update(&data[split..]);
      assert_eq!(hasher.finalize(), expected, "split={split}");
    }
  }

  #[test]
  fn finalize_is_idempotent() {
    let mut hasher = Crc32c::new();
    hasher.update(b"123456789");
    assert_eq!(hasher.finalize(), hasher.finalize());
  }

  #[test]
  fn reset_restores_initial() {
    let mut hasher = Crc32c::resume(Crc32c::checksum(b"1234"));
    hasher.update(b"56789");
    assert_eq!(hasher.finalize(), CHECK);
    hasher.reset();
    hasher.update(b"56789");
    assert_eq!(hasher.finalize(), CHECK);
  }

  #[test]
  fn with_initial_is_resume() {
    let mut hasher = <Crc32c as Checksum>::with_initial(Crc32c::checksum(b"12345"));
    hasher.update(b"6789");
    assert_eq!(hasher.finalize(), CHECK);
  }

  #[test]
  fn engine_hashers_agree() {
    let mut generic = Engine::generic().hasher();
    let mut detected = Engine::detect().hasher();
    for chunk in [&b"123"[..], b"", b"456789"] {
      generic.update(chunk);
      detected.update(chunk);
    }
    assert_eq!(generic.finalize(), CHECK);
    assert_eq!(detected.finalize(), CHECK);
  }

  #[test]
  fn masked_matches_free_function() {
    let mut hasher = Crc32c::new();
    hasher.update(b"record payload");
    assert_eq!(hasher.masked(), dispatch::masked_checksum(b"record payload"));
    assert_eq!(crate::unmask(hasher.masked()), !hasher.finalize());
  }

  #[test]
  fn vectored_update() {
    let parts: [&[u8]; 3] = [b"1234", b"", b"56789"];
    let mut hasher = Crc32c::new();
    hasher.update_vectored(&parts);
    assert_eq!(hasher.finalize(), CHECK);
  }

  #[test]
  fn verify_trait_method() {
    assert!(Crc32c::verify(b"123456789", CHECK).is_ok());
    assert!(Crc32c::verify(b"123456789", CHECK ^ 1).is_err());
  }

  #[cfg(feature = "std")]
  #[test]
  fn io_write() {
    use std::io::Write;

    let mut hasher = Crc32c::new();
    hasher.write_all(b"123456789").unwrap();
    hasher.flush().unwrap();
    assert_eq!(hasher.finalize(), CHECK);
  }
}
