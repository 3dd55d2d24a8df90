//! ChaCha20-Poly1305 authenticated encryption (RFC 8439)
//!
//! This crate provides the ChaCha20 stream cipher, the Poly1305 one-time
//! authenticator and their composition into the ChaCha20-Poly1305 AEAD.
//!
//! The focus is on **clarity, predictability, and auditability**. Every
//! primitive is implemented in plain Rust with explicit, fixed-size
//! arithmetic; the only dependencies cover error derivation, structured
//! logging and memory wiping.
//!
//! # Module overview
//!
//! - `keys`
//!   The 256-bit [`Key`] and 96-bit [`Nonce`] types. Slice constructors
//!   check lengths; both types are wiped on drop.
//!
//! - `primitives`
//!   Byte-level helpers: little-endian word conversion, the RFC 8439
//!   padding/length framing and constant-time comparison.
//!
//! - `encryption`
//!   The ChaCha20 block function and keystream cipher, the Poly1305 MAC,
//!   and the ChaCha20-Poly1305 seal/open operations.
//!
//! # Example
//!
//! ```
//! use cryptal_aead::encryption::chacha20poly1305::{open, seal};
//!
//! let key = [0x42u8; 32];
//! let nonce = [0x24u8; 12];
//!
//! let (ciphertext, tag) = seal(&key, &nonce, b"header", b"attack at dawn")?;
//! let plaintext = open(&key, &nonce, b"header", &ciphertext, &tag)?;
//!
//! assert_eq!(plaintext, b"attack at dawn");
//! # Ok::<(), cryptal_aead::AeadError>(())
//! ```
//!
//! # Design goals
//!
//! - Validate every input before any cryptographic work
//! - Never release unverified plaintext
//! - Never wrap the block counter
//! - Constant-time tag comparison
//! - No state between calls
//!
//! Nonce uniqueness per key is the caller's responsibility. This crate is
//! stateless and cannot detect reuse.

mod error;

pub mod encryption;
pub mod keys;
pub mod primitives;

pub use encryption::chacha20poly1305::{AeadParams, ChaCha20Poly1305};
pub use encryption::poly1305::Tag;
pub use error::{AeadError, ErrorKind, Result};
pub use keys::{Key, Nonce};
