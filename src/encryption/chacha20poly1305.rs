//! ChaCha20-Poly1305 authenticated encryption (RFC 8439, section 2.8).
//!
//! This module combines:
//!
//! - ChaCha20 as a stream cipher for confidentiality
//! - Poly1305 as a one-time MAC over the associated data and ciphertext
//!
//! ## Construction
//!
//! 1. The one-time Poly1305 key is the first 32 bytes of ChaCha20 block 0.
//! 2. The message is encrypted with ChaCha20 starting at the configured
//!    initial counter (1 by default).
//! 3. The tag authenticates
//!    `aad || pad16(aad) || ciphertext || pad16(ciphertext) || LE64(len(aad)) || LE64(len(ciphertext))`.
//!
//! Opening verifies the tag first, in constant time, and only decrypts
//! once it matches. A failed open never exposes any plaintext.
//!
//! ## Notes
//!
//! - The caller must ensure `(key, nonce)` uniqueness. Nothing here keeps
//!   state between calls, so reuse cannot be detected.
//! - Key material and the derived one-time key are wiped after use.

use tracing::debug;
use zeroize::{Zeroize, Zeroizing};

use super::chacha20::{apply_keystream, block, check_counter};
use super::poly1305::{self, Poly1305, TAG_LEN, Tag};
use crate::error::{AeadError, Result};
use crate::keys::{Key, Nonce};
use crate::primitives::conv::length_block;

/// Tunable parameters for [`ChaCha20Poly1305`].
///
/// The defaults follow RFC 8439 and there is rarely a reason to change
/// them. A non-default initial counter is only interoperable with peers
/// using the same value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AeadParams {
    /// Block counter of the first message keystream block (default 1).
    ///
    /// Block 0 is reserved for the one-time Poly1305 key, so 0 is rejected.
    pub initial_counter: u32,
}

impl AeadParams {
    /// Checks that the parameters can be used safely.
    ///
    /// # Errors
    ///
    /// [`AeadError::InvalidCounter`] if `initial_counter` is 0.
    pub fn validate(&self) -> Result<()> {
        if self.initial_counter == 0 {
            return Err(AeadError::InvalidCounter {
                counter: self.initial_counter,
            });
        }

        Ok(())
    }
}

impl Default for AeadParams {
    /// RFC 8439 parameters: message keystream starts at block 1.
    fn default() -> Self {
        Self { initial_counter: 1 }
    }
}

/// Derives the one-time Poly1305 key: the first half of block 0.
fn poly1305_key_gen(key: &Key, nonce: &Nonce) -> Zeroizing<[u8; poly1305::KEY_LEN]> {
    let mut block0 = block(key, 0, nonce);

    let mut otk = Zeroizing::new([0u8; poly1305::KEY_LEN]);
    otk.copy_from_slice(&block0[..poly1305::KEY_LEN]);
    block0.zeroize();

    otk
}

/// Feeds the RFC 8439 MAC input into a fresh authenticator, without
/// building the concatenated buffer.
fn authenticator(key: &Key, nonce: &Nonce, aad: &[u8], ciphertext: &[u8]) -> Poly1305 {
    let otk = poly1305_key_gen(key, nonce);

    let mut mac = Poly1305::new(&otk);
    mac.update_padded(aad);
    mac.update_padded(ciphertext);
    mac.update(&length_block(aad.len(), ciphertext.len()));

    mac
}

/// A ChaCha20-Poly1305 key together with its parameters.
///
/// The value holds no per-message state: every seal and open derives its own
/// one-time MAC key from the nonce, so a single instance can be shared
/// between threads.
#[derive(Clone, Debug)]
pub struct ChaCha20Poly1305 {
    key: Key,
    params: AeadParams,
}

impl ChaCha20Poly1305 {
    /// Creates a cipher with the default RFC 8439 parameters.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            params: AeadParams::default(),
        }
    }

    /// Creates a cipher from a key slice that must be exactly 32 bytes.
    pub fn from_slice(key: &[u8]) -> Result<Self> {
        Ok(Self::new(Key::from_slice(key)?))
    }

    /// Creates a cipher with explicit parameters.
    ///
    /// # Errors
    ///
    /// Any error from [`AeadParams::validate`].
    pub fn with_params(key: Key, params: AeadParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { key, params })
    }

    /// Returns the parameters in use.
    pub fn params(&self) -> AeadParams {
        self.params
    }

    /// Encrypts `buffer` in place and returns the tag.
    ///
    /// # Errors
    ///
    /// [`AeadError::CounterOverflow`] if the message is too long for the
    /// 32-bit block counter. `buffer` is untouched in that case.
    pub fn seal_in_place_detached(
        &self,
        nonce: &Nonce,
        aad: &[u8],
        buffer: &mut [u8],
    ) -> Result<Tag> {
        let counter = self.params.initial_counter;
        check_counter(counter, buffer.len())?;

        debug!(aad_len = aad.len(), len = buffer.len(), counter, "sealing message");

        apply_keystream(&self.key, nonce, counter, buffer)?;

        Ok(authenticator(&self.key, nonce, aad, buffer).finalize())
    }

    /// Encrypts `plaintext`, returning the ciphertext and the tag.
    ///
    /// The ciphertext has the same length as the plaintext; the associated
    /// data is authenticated but never part of the output.
    pub fn seal(&self, nonce: &Nonce, aad: &[u8], plaintext: &[u8]) -> Result<(Vec<u8>, Tag)> {
        check_counter(self.params.initial_counter, plaintext.len())?;

        let mut ciphertext = plaintext.to_vec();
        let tag = self.seal_in_place_detached(nonce, aad, &mut ciphertext)?;

        Ok((ciphertext, tag))
    }

    /// Verifies `tag` over `aad` and `ciphertext` without decrypting.
    fn authenticate(
        &self,
        nonce: &Nonce,
        aad: &[u8],
        ciphertext: &[u8],
        tag: &[u8],
    ) -> Result<()> {
        if tag.len() != TAG_LEN {
            return Err(AeadError::InvalidTagLength {
                expected: TAG_LEN,
                actual: tag.len(),
            });
        }

        check_counter(self.params.initial_counter, ciphertext.len())?;

        debug!(aad_len = aad.len(), len = ciphertext.len(), "opening message");

        authenticator(&self.key, nonce, aad, ciphertext)
            .verify(tag)
            .inspect_err(|_| debug!("tag verification failed"))
    }

    /// Verifies and decrypts `buffer` in place.
    ///
    /// On any error `buffer` still holds the original ciphertext.
    pub fn open_in_place_detached(
        &self,
        nonce: &Nonce,
        aad: &[u8],
        buffer: &mut [u8],
        tag: &[u8],
    ) -> Result<()> {
        self.authenticate(nonce, aad, buffer, tag)?;
        apply_keystream(&self.key, nonce, self.params.initial_counter, buffer)
    }

    /// Verifies and decrypts `ciphertext`.
    ///
    /// # Errors
    ///
    /// - [`AeadError::InvalidTagLength`] if `tag` is not 16 bytes
    /// - [`AeadError::CounterOverflow`] if the ciphertext is too long
    /// - [`AeadError::AuthenticationFailed`] if the tag does not match;
    ///   no plaintext buffer is ever allocated in that case
    pub fn open(
        &self,
        nonce: &Nonce,
        aad: &[u8],
        ciphertext: &[u8],
        tag: &[u8],
    ) -> Result<Vec<u8>> {
        self.authenticate(nonce, aad, ciphertext, tag)?;

        let mut plaintext = ciphertext.to_vec();
        apply_keystream(&self.key, nonce, self.params.initial_counter, &mut plaintext)?;

        Ok(plaintext)
    }
}

/// Seals `plaintext` with raw key and nonce bytes and default parameters.
///
/// # Errors
///
/// Key and nonce lengths are checked first, in that order, then the
/// message length against the block counter.
pub fn seal(key: &[u8], nonce: &[u8], aad: &[u8], plaintext: &[u8]) -> Result<(Vec<u8>, Tag)> {
    seal_with_params(key, nonce, aad, plaintext, AeadParams::default())
}

/// [`seal`] with explicit parameters.
pub fn seal_with_params(
    key: &[u8],
    nonce: &[u8],
    aad: &[u8],
    plaintext: &[u8],
    params: AeadParams,
) -> Result<(Vec<u8>, Tag)> {
    let key = Key::from_slice(key)?;
    let nonce = Nonce::from_slice(nonce)?;

    ChaCha20Poly1305::with_params(key, params)?.seal(&nonce, aad, plaintext)
}

/// Opens `ciphertext` with raw key, nonce and tag bytes and default
/// parameters.
///
/// # Errors
///
/// Key, nonce and tag lengths are checked first, in that order. After
/// that the only possible failures are an over-long ciphertext and
/// [`AeadError::AuthenticationFailed`].
pub fn open(
    key: &[u8],
    nonce: &[u8],
    aad: &[u8],
    ciphertext: &[u8],
    tag: &[u8],
) -> Result<Vec<u8>> {
    open_with_params(key, nonce, aad, ciphertext, tag, AeadParams::default())
}

/// [`open`] with explicit parameters.
pub fn open_with_params(
    key: &[u8],
    nonce: &[u8],
    aad: &[u8],
    ciphertext: &[u8],
    tag: &[u8],
    params: AeadParams,
) -> Result<Vec<u8>> {
    let key = Key::from_slice(key)?;
    let nonce = Nonce::from_slice(nonce)?;

    ChaCha20Poly1305::with_params(key, params)?.open(&nonce, aad, ciphertext, tag)
}
