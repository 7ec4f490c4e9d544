//! Bind the engine once, checksum a record, store and verify it.
//!
//! Run: `cargo run -p castagnoli --example basic`
//! Force the generic engine: `CASTAGNOLI_FORCE=portable cargo run -p castagnoli --example basic`

use castagnoli::{Crc32c, InitError, config, masked_checksum, unmask, verify_masked};

fn main() -> Result<(), InitError> {
  let engine = castagnoli::initialize()?;
  let cfg = config::get();
  println!(
    "engine: {} (mode {}, force {} -> {})",
    engine.backend(),
    cfg.mode.as_str(),
    cfg.requested_force.as_str(),
    cfg.effective_force.as_str()
  );

  let record = b"user:42|balance:1000";
  let crc = Crc32c::checksum(record);
  let stored = masked_checksum(record);
  println!("crc32c  = {crc:#010x}");
  println!("masked  = {stored:#010x}");
  println!("unmask  = {:#010x} (raw register)", unmask(stored));

  match verify_masked(record, stored) {
    Ok(()) => println!("record verified"),
    Err(err) => println!("record rejected: {err}"),
  }

  let mut tampered = *record;
  tampered[5] ^= 0x01;
  match verify_masked(&tampered, stored) {
    Ok(()) => println!("tampered record verified (unexpected)"),
    Err(err) => println!("tampered record rejected: {err}"),
  }

  Ok(())
}
