//! Property-based tests.
//!
//! Randomized inputs for the invariants the known vectors cannot cover
//! exhaustively: engine equality, incrementality, and mask invertibility.

use castagnoli::{Crc32c, Engine, INIT, MASK_DELTA, mask, unmask};
use proptest::prelude::*;

// Test Strategies

/// Generate arbitrary byte vectors up to 8KB.
fn arb_data() -> impl Strategy<Value = Vec<u8>> {
  prop::collection::vec(any::<u8>(), 0..8192)
}

/// Generate sorted split points for chunked testing.
fn arb_splits(len: usize, count: usize) -> impl Strategy<Value = Vec<usize>> {
  prop::collection::vec(0..=len, count).prop_map(move |mut splits| {
    splits.sort_unstable();
    splits.push(len);
    splits.dedup();
    splits
  })
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(1000))]

  #[test]
  fn mask_unmask_inverse(x in any::<u32>()) {
    prop_assert_eq!(unmask(mask(x)), x);
    prop_assert_eq!(mask(unmask(x)), x);
  }

  #[test]
  fn mask_matches_formula(x in any::<u32>()) {
    prop_assert_eq!(mask(x), (!x).rotate_right(15).wrapping_add(MASK_DELTA));
  }

  #[test]
  fn mask_is_injective(a in any::<u32>(), b in any::<u32>()) {
    prop_assume!(a != b);
    prop_assert_ne!(mask(a), mask(b));
  }
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(256))]

  #[test]
  fn engines_agree(data in arb_data(), seed in any::<u32>(), offset in 0usize..8) {
    let offset = offset.min(data.len());
    let slice = &data[offset..];
    let generic = Engine::generic().checksum(seed, slice);
    prop_assert_eq!(Engine::detect().checksum(seed, slice), generic);
    prop_assert_eq!(castagnoli::checksum(seed, slice), generic);
  }

  #[test]
  fn incremental_equals_oneshot(data in arb_data(), split in 0..8192usize, seed in any::<u32>()) {
    let split = split.min(data.len());
    let (a, b) = data.split_at(split);
    let engine = Engine::detect();
    prop_assert_eq!(engine.checksum(engine.checksum(seed, a), b), engine.checksum(seed, &data));
  }

  #[test]
  fn multi_chunk_streaming((data, splits) in arb_data().prop_flat_map(|d| {
    let len = d.len();
    (Just(d), arb_splits(len, 8))
  })) {
    let mut hasher = Crc32c::new();
    let mut prev = 0;
    for split in splits {
      hasher.update(&data[prev..split]);
      prev = split;
    }
    prop_assert_eq!(hasher.finalize(), Crc32c::checksum(&data));
  }

  #[test]
  fn resume_continues(data in arb_data(), split in 0..8192usize) {
    let split = split.min(data.len());
    let (a, b) = data.split_at(split);
    let mut hasher = Crc32c::resume(Crc32c::checksum(a));
    hasher.update(b);
    prop_assert_eq!(hasher.finalize(), Crc32c::checksum(&data));
  }

  #[test]
  fn masked_round_trips_to_raw(data in arb_data()) {
    let raw = castagnoli::checksum(INIT, &data);
    let stored = castagnoli::masked_checksum(&data);
    prop_assert_eq!(unmask(stored), raw);
    prop_assert!(castagnoli::verify_masked(&data, stored).is_ok());
  }

  #[test]
  fn corruption_is_detected(mut data in prop::collection::vec(any::<u8>(), 1..4096), index in any::<prop::sample::Index>(), bit in 0u8..8) {
    let stored = castagnoli::masked_checksum(&data);
    let i = index.index(data.len());
    data[i] ^= 1 << bit;
    prop_assert!(castagnoli::verify_masked(&data, stored).is_err());
  }
}
