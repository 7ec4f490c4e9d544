//! CRC32-C (Castagnoli) with one-time hardware dispatch and record masking.
//!
//! Two interchangeable engines compute the same function:
//!
//! | Engine | Implementation | Availability |
//! |--------|----------------|--------------|
//! | Generic | slicing-by-8 tables (bitwise with `no-tables`) | every target |
//! | Accelerated | SSE4.2 `crc32` / ARMv8 `crc32c*` | probed per CPU |
//!
//! A process binds one of them exactly once; after that the choice never
//! changes. Records store [`mask`]ed checksums.
//!
//! # Example
//!
//! ```rust
//! use castagnoli::{Checksum, Crc32c, masked_checksum, unmask};
//!
//! castagnoli::initialize()?;
//!
//! // Raw register in, raw register out.
//! let raw = castagnoli::checksum(!0, b"123456789");
//! assert_eq!(!raw, 0xE306_9283);
//!
//! // Streaming
//! let mut hasher = Crc32c::new();
//! hasher.update(b"1234");
//! hasher.update(b"56789");
//! assert_eq!(hasher.finalize(), 0xE306_9283);
//!
//! // Storage
//! let stored = masked_checksum(b"123456789");
//! assert_eq!(unmask(stored), raw);
//! # Ok::<(), castagnoli::InitError>(())
//! ```
//!
//! # Engine selection
//!
//! | Feature | Mode | `initialize()` |
//! |---------|------|----------------|
//! | (none) | runtime-detected | probes once, falls back to generic |
//! | `force-accelerated` | forced-accelerated | probes, [`InitError`] if unsupported |
//! | `force-generic` | forced-generic | never probes |
//!
//! In runtime-detected mode `CASTAGNOLI_FORCE=auto|portable|hwcrc` refines
//! the choice (see [`config`]).
//!
//! Code that prefers not to touch global state can hold an [`Engine`]
//! directly:
//!
//! ```rust
//! use castagnoli::Engine;
//!
//! let engine = Engine::detect();
//! let mut hasher = engine.hasher();
//! hasher.update(b"123456789");
//! assert_eq!(hasher.finalize(), 0xE306_9283);
//! ```
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Without `std`, CPU features come from
//! compile-time `target_feature` only and `CASTAGNOLI_FORCE` is not read.
//!
//! ```toml
//! [dependencies]
//! castagnoli = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![deny(unsafe_code)]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod bitwise;
pub mod config;
mod constants;
mod dispatch;
mod engine;
mod error;
mod hasher;
mod hwcrc;
mod masking;
mod portable;
pub mod probe;

pub use constants::{INIT, MASK_DELTA, POLYNOMIAL, POLYNOMIAL_NORMAL};
pub use dispatch::{checksum, engine, initialize, masked_checksum};
pub use engine::{Backend, Engine};
pub use error::InitError;
pub use hasher::Crc32c;
pub use masking::{mask, unmask, verify_masked};
// Re-export traits for convenience
pub use traits::{Checksum, VerificationError};
