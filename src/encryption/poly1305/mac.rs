//! Poly1305 message authentication code (RFC 8439, section 2.5).

use core::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::core::{FULL_BLOCK_HIBIT, State};
use crate::error::{AeadError, Result};
use crate::primitives::ConstantTimeEq;
use crate::primitives::conv::pad16_len;

/// Poly1305 one-time key length in bytes.
pub const KEY_LEN: usize = 32;

/// Poly1305 tag length in bytes.
pub const TAG_LEN: usize = 16;

const BLOCK_LEN: usize = 16;

const ZERO_BLOCK: [u8; BLOCK_LEN] = [0; BLOCK_LEN];

/// A 128-bit Poly1305 authentication tag.
pub type Tag = [u8; TAG_LEN];

/// Incremental Poly1305 authenticator.
///
/// Input may be fed in pieces of any size; it is regrouped into 16-byte
/// blocks internally, so splitting a message across several
/// [`update`](Self::update) calls produces the same tag as a single call.
///
/// # Security
///
/// The key is a **one-time** key. Authenticating two different messages
/// with the same key lets an attacker recover it and forge tags. Inside the
/// AEAD the key is derived fresh from every `(key, nonce)` pair.
///
/// The whole state, including buffered input, is wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Poly1305 {
    state: State,
    buffer: [u8; BLOCK_LEN],
    buffered: usize,
}

impl Poly1305 {
    /// Creates an authenticator from a 32-byte one-time key (`r || s`).
    pub fn new(key: &[u8; KEY_LEN]) -> Self {
        Self {
            state: State::new(key),
            buffer: [0; BLOCK_LEN],
            buffered: 0,
        }
    }

    /// Creates an authenticator from a key slice that must be exactly 32
    /// bytes long.
    pub fn from_slice(key: &[u8]) -> Result<Self> {
        let key: &[u8; KEY_LEN] = key.try_into().map_err(|_| AeadError::InvalidKeyLength {
            expected: KEY_LEN,
            actual: key.len(),
        })?;

        Ok(Self::new(key))
    }

    /// Absorbs `data` into the MAC.
    pub fn update(&mut self, mut data: &[u8]) {
        if self.buffered > 0 {
            let take = (BLOCK_LEN - self.buffered).min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];

            if self.buffered < BLOCK_LEN {
                return;
            }

            self.state.absorb(&self.buffer, FULL_BLOCK_HIBIT);
            self.buffered = 0;
        }

        let mut blocks = data.chunks_exact(BLOCK_LEN);
        for block in &mut blocks {
            self.state.absorb(block, FULL_BLOCK_HIBIT);
        }

        let rest = blocks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffered = rest.len();
    }

    /// Absorbs `data`, then zero-pads the input stream up to the next
    /// 16-byte boundary.
    ///
    /// When the stream was aligned before the call this is exactly
    /// `update(data || pad16(data))`, the framing ChaCha20-Poly1305 uses for
    /// the associated data and the ciphertext.
    pub fn update_padded(&mut self, data: &[u8]) {
        self.update(data);
        self.update(&ZERO_BLOCK[..pad16_len(self.buffered)]);
    }

    /// Consumes the authenticator and returns the tag.
    ///
    /// A trailing partial block gets its `0x01` length marker right after
    /// the last message byte instead of the implicit `2^128` bit.
    pub fn finalize(mut self) -> Tag {
        if self.buffered > 0 {
            let mut last = [0u8; BLOCK_LEN];
            last[..self.buffered].copy_from_slice(&self.buffer[..self.buffered]);
            last[self.buffered] = 1;

            self.state.absorb(&last, 0);
            last.zeroize();
        }

        self.state.finalize()
    }

    /// Consumes the authenticator and checks the computed tag against
    /// `expected` in constant time.
    ///
    /// # Errors
    ///
    /// - [`AeadError::InvalidTagLength`] if `expected` is not 16 bytes
    /// - [`AeadError::AuthenticationFailed`] if the tags differ
    pub fn verify(self, expected: &[u8]) -> Result<()> {
        let expected: &Tag = expected.try_into().map_err(|_| AeadError::InvalidTagLength {
            expected: TAG_LEN,
            actual: expected.len(),
        })?;

        let mut computed = self.finalize();
        let ok = computed.ct_eq(expected);
        computed.zeroize();

        if ok {
            Ok(())
        } else {
            Err(AeadError::AuthenticationFailed)
        }
    }
}

impl fmt::Debug for Poly1305 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Poly1305").finish_non_exhaustive()
    }
}

/// Computes the Poly1305 tag of `msg` under a one-time `key`.
pub fn poly1305(key: &[u8; KEY_LEN], msg: &[u8]) -> Tag {
    let mut mac = Poly1305::new(key);
    mac.update(msg);
    mac.finalize()
}

/// Like [`poly1305`], for a key given as an unchecked slice.
///
/// # Errors
///
/// [`AeadError::InvalidKeyLength`] if `key` is not 32 bytes.
pub fn poly1305_from_slice(key: &[u8], msg: &[u8]) -> Result<Tag> {
    let mut mac = Poly1305::from_slice(key)?;
    mac.update(msg);
    Ok(mac.finalize())
}
