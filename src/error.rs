//! Error types shared by every primitive in the crate.
//!
//! All failures are terminal for the call that produced them. Nothing is
//! retried internally, and no operation returns partial output alongside an
//! error.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, AeadError>;

/// Coarse classification of an [`AeadError`].
///
/// Callers that only need to decide *what kind* of failure happened (bad
/// input, message too long, forged or corrupted data) can match on this
/// instead of the detailed variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An input had the wrong shape. Detected before any cryptographic work.
    Parameter,
    /// The message needs more keystream blocks than a 32-bit counter can
    /// address from the chosen start counter.
    Overflow,
    /// Tag verification failed.
    Authentication,
}

/// Errors returned by the ChaCha20, Poly1305 and ChaCha20-Poly1305 APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AeadError {
    /// The key is not exactly 32 bytes.
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// The nonce is not exactly 12 bytes.
    #[error("invalid nonce length: expected {expected} bytes, got {actual}")]
    InvalidNonceLength { expected: usize, actual: usize },

    /// The authentication tag is not exactly 16 bytes.
    #[error("invalid tag length: expected {expected} bytes, got {actual}")]
    InvalidTagLength { expected: usize, actual: usize },

    /// Input and output buffers differ in length.
    #[error("output buffer holds {output} bytes but input has {input}")]
    BufferLengthMismatch { input: usize, output: usize },

    /// The AEAD start counter collides with the block reserved for the
    /// one-time Poly1305 key.
    #[error("initial block counter {counter} is reserved for the one-time MAC key")]
    InvalidCounter { counter: u32 },

    /// Encrypting `len` bytes from `counter` would wrap the block counter.
    #[error("message of {len} bytes starting at block {counter} exceeds the 32-bit block counter")]
    CounterOverflow { counter: u32, len: u64 },

    /// The supplied tag does not match the recomputed one.
    #[error("authentication failed")]
    AuthenticationFailed,
}

impl AeadError {
    /// Returns the coarse category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AeadError::InvalidKeyLength { .. }
            | AeadError::InvalidNonceLength { .. }
            | AeadError::InvalidTagLength { .. }
            | AeadError::BufferLengthMismatch { .. }
            | AeadError::InvalidCounter { .. } => ErrorKind::Parameter,
            AeadError::CounterOverflow { .. } => ErrorKind::Overflow,
            AeadError::AuthenticationFailed => ErrorKind::Authentication,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_cover_every_variant() {
        let parameter = [
            AeadError::InvalidKeyLength { expected: 32, actual: 31 },
            AeadError::InvalidNonceLength { expected: 12, actual: 8 },
            AeadError::InvalidTagLength { expected: 16, actual: 0 },
            AeadError::BufferLengthMismatch { input: 3, output: 2 },
            AeadError::InvalidCounter { counter: 0 },
        ];
        for err in parameter {
            assert_eq!(err.kind(), ErrorKind::Parameter, "{err}");
        }

        let overflow = AeadError::CounterOverflow { counter: u32::MAX, len: 65 };
        assert_eq!(overflow.kind(), ErrorKind::Overflow);
        assert_eq!(AeadError::AuthenticationFailed.kind(), ErrorKind::Authentication);
    }

    #[test]
    fn authentication_failure_message_is_opaque() {
        assert_eq!(AeadError::AuthenticationFailed.to_string(), "authentication failed");
    }

    #[test]
    fn length_errors_report_sizes() {
        let err = AeadError::InvalidKeyLength { expected: 32, actual: 16 };
        assert_eq!(err.to_string(), "invalid key length: expected 32 bytes, got 16");
    }
}
