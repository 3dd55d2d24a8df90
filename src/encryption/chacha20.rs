//! ChaCha20 block function and stream cipher (RFC 8439, section 2).
//!
//! The block function turns `(key, counter, nonce)` into 64 bytes of
//! keystream. The stream cipher XORs consecutive blocks, starting at a
//! caller-chosen counter, into a buffer of any length.
//!
//! This module performs no authentication. Use
//! [`crate::encryption::chacha20poly1305`] unless raw keystream is what you
//! need.
//!
//! The block counter is 32 bits wide. A message that would need counter
//! values past `u32::MAX` is rejected up front with
//! [`AeadError::CounterOverflow`]; the counter never wraps, since a wrapped
//! counter replays keystream from the start of the message.

use tracing::trace;
use zeroize::Zeroize;

use crate::error::{AeadError, Result};
use crate::keys::{Key, Nonce};
use crate::primitives::conv::{le_words, store_le_words};

/// Size of one keystream block in bytes.
pub const BLOCK_LEN: usize = 64;

/// `"expand 32-byte k"` as little-endian words.
const SIGMA: [u32; 4] = [
    0x6170_7865, // "expa"
    0x3320_646e, // "nd 3"
    0x7962_2d32, // "2-by"
    0x6b20_6574, // "te k"
];

/// Quarter round on four words of the state: add, xor, rotate by
/// 16, 12, 8 and 7.
#[inline(always)]
fn quarter_round(x: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    x[a] = x[a].wrapping_add(x[b]);
    x[d] = (x[d] ^ x[a]).rotate_left(16);

    x[c] = x[c].wrapping_add(x[d]);
    x[b] = (x[b] ^ x[c]).rotate_left(12);

    x[a] = x[a].wrapping_add(x[b]);
    x[d] = (x[d] ^ x[a]).rotate_left(8);

    x[c] = x[c].wrapping_add(x[d]);
    x[b] = (x[b] ^ x[c]).rotate_left(7);
}

/// Ten double rounds (column round then diagonal round), 20 rounds total.
#[inline(always)]
fn permute(x: &mut [u32; 16]) {
    for _ in 0..10 {
        quarter_round(x, 0, 4, 8, 12);
        quarter_round(x, 1, 5, 9, 13);
        quarter_round(x, 2, 6, 10, 14);
        quarter_round(x, 3, 7, 11, 15);

        quarter_round(x, 0, 5, 10, 15);
        quarter_round(x, 1, 6, 11, 12);
        quarter_round(x, 2, 7, 8, 13);
        quarter_round(x, 3, 4, 9, 14);
    }
}

/// Computes one 64-byte ChaCha20 keystream block.
///
/// The state is laid out as four constant words, eight key words, the
/// block counter and three nonce words, all little-endian. After the 20
/// rounds the input state is added back word by word and the result is
/// serialized little-endian.
///
/// Pure and deterministic: the same `(key, counter, nonce)` always yields
/// the same block. Reusing that triple for two messages is catastrophic.
pub fn block(key: &Key, counter: u32, nonce: &Nonce) -> [u8; BLOCK_LEN] {
    let mut key_words: [u32; 8] = le_words(key.as_bytes());
    let nonce_words: [u32; 3] = le_words(nonce.as_bytes());

    let mut input = [0u32; 16];
    input[..4].copy_from_slice(&SIGMA);
    input[4..12].copy_from_slice(&key_words);
    input[12] = counter;
    input[13..].copy_from_slice(&nonce_words);

    let mut x = input;
    permute(&mut x);

    for (word, original) in x.iter_mut().zip(&input) {
        *word = word.wrapping_add(*original);
    }

    let mut out = [0u8; BLOCK_LEN];
    store_le_words(&x, &mut out);

    key_words.zeroize();
    input.zeroize();
    x.zeroize();

    out
}

/// Number of keystream blocks needed for `len` bytes.
#[inline(always)]
fn blocks_for(len: usize) -> u64 {
    (len as u64).div_ceil(BLOCK_LEN as u64)
}

/// Checks that `len` bytes starting at block `counter` stay within the
/// 32-bit counter space.
///
/// From `counter` there are `2^32 - counter` usable blocks, so a start
/// counter of 1 allows just under 256 GiB.
pub(crate) fn check_counter(counter: u32, len: usize) -> Result<()> {
    let available = u64::from(u32::MAX) - u64::from(counter) + 1;

    if blocks_for(len) > available {
        return Err(AeadError::CounterOverflow {
            counter,
            len: len as u64,
        });
    }

    Ok(())
}

/// XORs the keystream starting at block `counter` into `data`, in place.
///
/// Encryption and decryption are the same operation. The final block may
/// be partial; only the bytes that exist are touched.
///
/// # Errors
///
/// [`AeadError::CounterOverflow`] if `data` needs counter values beyond
/// `u32::MAX`. The check happens before any keystream is produced, and
/// `data` is left untouched.
pub fn apply_keystream(key: &Key, nonce: &Nonce, counter: u32, data: &mut [u8]) -> Result<()> {
    check_counter(counter, data.len())?;

    trace!(counter, blocks = blocks_for(data.len()), "applying chacha20 keystream");

    for (offset, chunk) in data.chunks_mut(BLOCK_LEN).enumerate() {
        // In range: check_counter bounds `offset` by the remaining counter space.
        let mut keystream = block(key, counter + offset as u32, nonce);

        for (byte, k) in chunk.iter_mut().zip(&keystream) {
            *byte ^= k;
        }

        keystream.zeroize();
    }

    Ok(())
}

/// XORs the keystream into `input`, writing the result to `output`.
///
/// # Errors
///
/// - [`AeadError::BufferLengthMismatch`] if the buffers differ in length
/// - [`AeadError::CounterOverflow`] as for [`apply_keystream`]
///
/// `output` is only written once both checks have passed.
pub fn xor(
    key: &Key,
    nonce: &Nonce,
    counter: u32,
    input: &[u8],
    output: &mut [u8],
) -> Result<()> {
    if input.len() != output.len() {
        return Err(AeadError::BufferLengthMismatch {
            input: input.len(),
            output: output.len(),
        });
    }

    check_counter(counter, input.len())?;

    output.copy_from_slice(input);
    apply_keystream(key, nonce, counter, output)
}

/// Encrypts or decrypts `input` with raw ChaCha20, taking the key and nonce
/// as unchecked byte slices.
///
/// This is the boundary entry point for callers holding raw bytes. Lengths
/// are validated first, key before nonce, and no keystream is generated
/// when either is wrong.
///
/// `counter` is usually 1 when interoperating with ChaCha20-Poly1305
/// ciphertexts and 0 for standalone use.
pub fn chacha20(key: &[u8], nonce: &[u8], counter: u32, input: &[u8]) -> Result<Vec<u8>> {
    let key = Key::from_slice(key)?;
    let nonce = Nonce::from_slice(nonce)?;
    check_counter(counter, input.len())?;

    let mut output = input.to_vec();
    apply_keystream(&key, &nonce, counter, &mut output)?;

    Ok(output)
}
