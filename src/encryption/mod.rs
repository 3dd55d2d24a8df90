//! Symmetric encryption and authentication.
//!
//! - `chacha20`: the ChaCha20 block function and raw stream cipher
//! - `poly1305`: the Poly1305 one-time authenticator
//! - `chacha20poly1305`: the RFC 8439 AEAD built from the two
//!
//! Most callers want `chacha20poly1305`. The other two are exposed for
//! interoperability and testing; neither one is safe to use alone for
//! encrypting messages.

pub mod chacha20;
pub mod chacha20poly1305;
pub mod poly1305;
