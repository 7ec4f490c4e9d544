//! Initialization errors.

use core::fmt;

/// The requested engine cannot run on this host.
///
/// Produced when forced-accelerated mode (or an explicit request for the
/// accelerated engine) meets a CPU without the CRC32-C instruction family.
/// Carries no process state, so callers decide how to shut down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum InitError {
  /// The target has an accelerated backend but the CPU lacks the instruction.
  Unsupported {
    /// Backend that was requested, e.g. `"x86_64/sse4.2"`.
    backend: &'static str,
  },
  /// The target architecture has no accelerated backend at all.
  NoBackend {
    /// Architecture name as reported by `platform::Arch`.
    arch: &'static str,
  },
}

impl InitError {
  /// The error for requesting acceleration on this target and host.
  #[must_use]
  pub(crate) fn for_target() -> Self {
    match crate::probe::backend_name() {
      Some(backend) => Self::Unsupported { backend },
      None => Self::NoBackend {
        arch: platform::Arch::current().name(),
      },
    }
  }
}

impl fmt::Display for InitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Unsupported { backend } => {
        write!(f, "accelerated CRC32-C backend `{backend}` is not supported by this CPU")
      }
      Self::NoBackend { arch } => {
        write!(f, "no accelerated CRC32-C backend exists for `{arch}`")
      }
    }
  }
}

impl core::error::Error for InitError {}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::string::ToString;

  use super::*;

  #[test]
  fn display_unsupported() {
    let err = InitError::Unsupported {
      backend: "x86_64/sse4.2",
    };
    assert_eq!(
      err.to_string(),
      "accelerated CRC32-C backend `x86_64/sse4.2` is not supported by this CPU"
    );
  }

  #[test]
  fn display_no_backend() {
    let err = InitError::NoBackend { arch: "riscv64" };
    assert_eq!(err.to_string(), "no accelerated CRC32-C backend exists for `riscv64`");
  }

  #[test]
  fn for_target_names_backend() {
    match InitError::for_target() {
      InitError::Unsupported { backend } => assert_eq!(Some(backend), crate::probe::backend_name()),
      InitError::NoBackend { .. } => assert!(crate::probe::backend_name().is_none()),
    }
  }

  #[test]
  fn error_trait_impl() {
    use core::error::Error;

    let err = InitError::for_target();
    assert!(err.source().is_none());
  }
}
