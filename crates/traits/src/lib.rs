//! Core checksum traits for the castagnoli workspace.
//!
//! This crate provides the traits every checksum type in the workspace
//! conforms to. It is `no_std` compatible and has zero dependencies.
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`Checksum`] | Streaming, non-cryptographic checksums |
//!
//! # Error Types
//!
//! - [`VerificationError`] - Opaque error for a stored checksum that does not match its data
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code to ensure
//! all error paths are handled explicitly.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod checksum;
pub mod error;

pub use checksum::Checksum;
pub use error::VerificationError;
