//! Differential fuzzing against the `crc32c` crate.

#![no_main]

use castagnoli::{Crc32c, Engine, INIT};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
  let reference = crc32c::crc32c(data);

  let ours = Crc32c::checksum(data);
  assert_eq!(
    ours, reference,
    "CRC32-C differential mismatch: ours={ours:#010x}, reference={reference:#010x}, len={}",
    data.len()
  );

  let generic = !Engine::generic().checksum(INIT, data);
  assert_eq!(generic, reference, "generic engine mismatch");

  // Append semantics: split in half and resume.
  let (a, b) = data.split_at(data.len() / 2);
  let mut hasher = Crc32c::resume(crc32c::crc32c(a));
  hasher.update(b);
  assert_eq!(hasher.finalize(), crc32c::crc32c_append(crc32c::crc32c(a), b));
});
