//! Key material for ChaCha20 and ChaCha20-Poly1305.
//!
//! This module only defines the shape of the inputs: a 256-bit secret key
//! and a 96-bit (IETF) nonce. No encryption or authentication logic lives
//! here.
//!
//! Both types are built either from fixed-size arrays, which cannot have
//! the wrong length, or from byte slices, which are length-checked and
//! rejected with a parameter error before any cryptographic work starts.
//!
//! Both are wiped from memory when dropped. A nonce is not secret, but
//! clearing it costs nothing and keeps the two types uniform.
//!
//! Nonce uniqueness per key is **not** tracked here. Encrypting two
//! messages under the same `(key, nonce)` pair leaks the XOR of their
//! plaintexts and lets an attacker forge tags. Callers own that invariant.

use core::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{AeadError, Result};
use crate::primitives::ConstantTimeEq;

/// Key length in bytes.
pub const KEY_LEN: usize = 32;

/// Nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// A 256-bit ChaCha20 key.
///
/// `Debug` output is redacted and equality is constant-time.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Key([u8; KEY_LEN]);

impl Key {
    /// Builds a key from a byte slice that must be exactly 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let raw: [u8; KEY_LEN] = bytes.try_into().map_err(|_| AeadError::InvalidKeyLength {
            expected: KEY_LEN,
            actual: bytes.len(),
        })?;

        Ok(Self(raw))
    }

    /// Returns the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl From<[u8; KEY_LEN]> for Key {
    fn from(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for Key {
    type Error = AeadError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_slice(bytes)
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0)
    }
}

impl Eq for Key {}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Key(..)")
    }
}

/// A 96-bit ChaCha20 nonce (IETF variant).
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Nonce([u8; NONCE_LEN]);

impl Nonce {
    /// Builds a nonce from a byte slice that must be exactly 12 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let raw: [u8; NONCE_LEN] =
            bytes.try_into().map_err(|_| AeadError::InvalidNonceLength {
                expected: NONCE_LEN,
                actual: bytes.len(),
            })?;

        Ok(Self(raw))
    }

    /// Returns the raw nonce bytes.
    pub fn as_bytes(&self) -> &[u8; NONCE_LEN] {
        &self.0
    }
}

impl From<[u8; NONCE_LEN]> for Nonce {
    fn from(bytes: [u8; NONCE_LEN]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for Nonce {
    type Error = AeadError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_slice(bytes)
    }
}

impl fmt::Debug for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Nonce(")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_from_slice_checks_length() {
        assert!(Key::from_slice(&[7u8; 32]).is_ok());
        assert_eq!(
            Key::from_slice(&[7u8; 31]),
            Err(AeadError::InvalidKeyLength { expected: 32, actual: 31 })
        );
        assert_eq!(
            Key::try_from(&[0u8; 33][..]),
            Err(AeadError::InvalidKeyLength { expected: 32, actual: 33 })
        );
    }

    #[test]
    fn nonce_from_slice_checks_length() {
        assert!(Nonce::from_slice(&[0u8; 12]).is_ok());
        assert_eq!(
            Nonce::from_slice(&[]),
            Err(AeadError::InvalidNonceLength { expected: 12, actual: 0 })
        );
    }

    #[test]
    fn key_debug_is_redacted() {
        let key = Key::from([0xAB; 32]);
        assert_eq!(format!("{key:?}"), "Key(..)");
    }

    #[test]
    fn nonce_debug_is_hex() {
        let nonce = Nonce::from([0, 0, 0, 9, 0, 0, 0, 0x4a, 0, 0, 0, 0]);
        assert_eq!(format!("{nonce:?}"), "Nonce(000000090000004a00000000)");
    }

    #[test]
    fn zeroize_clears_key_bytes() {
        let mut key = Key::from([0xFF; 32]);
        key.zeroize();
        assert_eq!(key.as_bytes(), &[0u8; 32]);
    }
}
