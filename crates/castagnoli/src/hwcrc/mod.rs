//! Accelerated engine: CPU CRC32-C instructions.
//!
//! The instructions fold 1, 2, 4 or 8 bytes into the register per step. The
//! buffer is walked in three stages:
//!
//! 1. **Align**: fold 1, 2 and (64-bit targets) 4 bytes until the cursor sits
//!    on a native word boundary.
//! 2. **Bulk**: fold one native word (8 bytes on 64-bit targets, 4 on 32-bit)
//!    per step.
//! 3. **Drain**: fold the 4 (64-bit targets), 2 and 1 byte tails.
//!
//! Chunk boundaries never change the result: CRC folding is a function of the
//! byte stream only. Alignment is a throughput concern.
//!
//! The stage logic lives here once, generic over [`Fold`]; each ISA module
//! supplies the instruction wrappers and a `#[target_feature]` entry point.

#[cfg(target_arch = "aarch64")]
mod aarch64;
#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
mod x86;

/// Native word width used by the bulk stage.
pub(crate) const WORD: usize = core::mem::size_of::<usize>();

/// One ISA's CRC32-C fold primitives.
///
/// Multi-byte operands are the little-endian reading of the next bytes in
/// the stream, which is the byte order the instructions consume.
pub(crate) trait Fold {
  fn fold_u8(crc: u32, v: u8) -> u32;
  fn fold_u16(crc: u32, v: u16) -> u32;
  fn fold_u32(crc: u32, v: u32) -> u32;
  fn fold_word(crc: u32, word: [u8; WORD]) -> u32;
}

#[inline(always)]
fn misaligned(bytes: &[u8], align: usize) -> bool {
  bytes.as_ptr().addr() & (align - 1) != 0
}

/// Align, bulk, drain. See the module docs.
#[inline(always)]
#[allow(clippy::collapsible_if)]
pub(crate) fn fold_staged<F: Fold>(mut crc: u32, data: &[u8]) -> u32 {
  let mut rest = data;

  if misaligned(rest, 2) {
    if let Some((&byte, tail)) = rest.split_first() {
      crc = F::fold_u8(crc, byte);
      rest = tail;
    }
  }

  if misaligned(rest, 4) {
    if let Some((chunk, tail)) = rest.split_first_chunk::<2>() {
      crc = F::fold_u16(crc, u16::from_le_bytes(*chunk));
      rest = tail;
    }
  }

  #[cfg(target_pointer_width = "64")]
  {
    if misaligned(rest, 8) {
      if let Some((chunk, tail)) = rest.split_first_chunk::<4>() {
        crc = F::fold_u32(crc, u32::from_le_bytes(*chunk));
        rest = tail;
      }
    }
  }

  while let Some((word, tail)) = rest.split_first_chunk::<WORD>() {
    crc = F::fold_word(crc, *word);
    rest = tail;
  }

  // 32-bit targets: the bulk stage already consumed every 4-byte chunk.
  #[cfg(target_pointer_width = "64")]
  {
    if let Some((chunk, tail)) = rest.split_first_chunk::<4>() {
      crc = F::fold_u32(crc, u32::from_le_bytes(*chunk));
      rest = tail;
    }
  }

  if let Some((chunk, tail)) = rest.split_first_chunk::<2>() {
    crc = F::fold_u16(crc, u16::from_le_bytes(*chunk));
    rest = tail;
  }

  if let Some(&byte) = rest.first() {
    crc = F::fold_u8(crc, byte);
  }

  crc
}

/// Name of the accelerated backend compiled for this target, if any.
pub(crate) const BACKEND_NAME: Option<&str> = {
  #[cfg(target_arch = "x86_64")]
  {
    Some("x86_64/sse4.2")
  }
  #[cfg(target_arch = "x86")]
  {
    Some("x86/sse4.2")
  }
  #[cfg(target_arch = "aarch64")]
  {
    Some("aarch64/crc")
  }
  #[cfg(not(any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64")))]
  {
    None
  }
};

/// Compute CRC32-C with the CPU instruction family.
///
/// # Safety
///
/// The caller must have confirmed the instruction family is available
/// (see [`crate::probe::supported`]).
#[inline]
#[allow(unsafe_code)]
pub(crate) unsafe fn compute_unchecked(crc: u32, data: &[u8]) -> u32 {
  #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
  {
    // SAFETY: forwarded caller contract (SSE4.2 present).
    unsafe { x86::compute_sse42_unchecked(crc, data) }
  }

  #[cfg(target_arch = "aarch64")]
  {
    // SAFETY: forwarded caller contract (CRC extension present).
    unsafe { aarch64::compute_crc_unchecked(crc, data) }
  }

  // No instruction family on this target; the probe never passes here.
  #[cfg(not(any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64")))]
  {
    crate::portable::compute(crc, data)
  }
}
