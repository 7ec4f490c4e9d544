//! Fuzz target for the streaming CRC32-C API.
//!
//! Tests that arbitrary sequences of update calls produce correct results.

#![no_main]

use std::io::Write;

use arbitrary::Arbitrary;
use castagnoli::{Crc32c, Engine};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  /// Chunk sizes for streaming updates
  chunk_sizes: Vec<usize>,
  generic: bool,
}

fuzz_target!(|input: Input| {
  let data = &input.data;
  let expected = Crc32c::checksum(data);

  let mut hasher = if input.generic {
    Engine::generic().hasher()
  } else {
    Crc32c::new()
  };

  let mut offset = 0;
  let mut chunk_idx = 0;
  while offset < data.len() {
    let chunk_size = match input.chunk_sizes.get(chunk_idx % input.chunk_sizes.len().max(1)) {
      Some(size) => (size % 256).max(1),
      None => 1,
    };
    let end = (offset + chunk_size).min(data.len());
    if chunk_idx % 2 == 0 {
      hasher.update(&data[offset..end]);
    } else {
      hasher.write_all(&data[offset..end]).unwrap();
    }
    offset = end;
    chunk_idx += 1;
  }

  assert_eq!(hasher.finalize(), expected, "streaming mismatch");
  assert_eq!(hasher.masked(), castagnoli::masked_checksum(data), "masked mismatch");

  hasher.reset();
  hasher.update(data);
  assert_eq!(hasher.finalize(), expected, "reset mismatch");
});
