//! Fuzz target for CRC32-C engines and masking.
//!
//! Tests that:
//! - No panics on arbitrary input
//! - Generic and accelerated engines agree at every start offset
//! - Incremental updates produce same result as one-shot
//! - Masked checksums unmask to the raw register

#![no_main]

use arbitrary::Arbitrary;
use castagnoli::{Engine, INIT, mask, unmask};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  seed: u32,
  offset: u8,
  split_point: usize,
}

fuzz_target!(|input: Input| {
  let offset = usize::from(input.offset % 8).min(input.data.len());
  let data = &input.data[offset..];
  let split = input.split_point % (data.len() + 1);

  let generic = Engine::generic();
  let reference = generic.checksum(input.seed, data);

  if let Ok(accelerated) = Engine::accelerated() {
    assert_eq!(accelerated.checksum(input.seed, data), reference, "engine mismatch");
  }

  // Incremental computation
  let (a, b) = data.split_at(split);
  let dispatched = castagnoli::checksum(castagnoli::checksum(input.seed, a), b);
  assert_eq!(dispatched, reference, "incremental mismatch");

  // Masking
  assert_eq!(unmask(mask(input.seed)), input.seed, "mask not invertible");
  let raw = generic.checksum(INIT, data);
  assert_eq!(unmask(castagnoli::masked_checksum(data)), raw, "masked checksum mismatch");
});
