//! Poly1305 message authentication code (RFC 8439).
//!
//! This module provides the Poly1305 one-time authenticator used by
//! ChaCha20-Poly1305. It is usable on its own, but its key must then be
//! produced by the caller and never used for more than one message.
//!
//! The implementation is split into two layers:
//!
//! - `core`: clamping, 130-bit limb arithmetic and final reduction over
//!   whole 16-byte blocks
//! - `mac`: the public incremental interface, handling arbitrary-length
//!   input, the AEAD pad16 framing and constant-time verification

/// Limb arithmetic. Cryptographically sensitive; internal only.
mod core;

/// Incremental MAC interface.
mod mac;

pub use mac::{KEY_LEN, Poly1305, TAG_LEN, Tag, poly1305, poly1305_from_slice};
