//! Byte-level building blocks
//!
//! This module gathers the small, non-cryptographic helpers that the
//! ChaCha20 and Poly1305 code relies on:
//!
//! - `conv`: little-endian word loading/storing and the RFC 8439 padding and
//!   length-block encodings
//! - `ct`: constant-time equality for tags and other secret-dependent
//!   comparisons
//!
//! Nothing here allocates.

pub(crate) mod conv;
mod ct;

/// Constant-time equality.
pub use ct::ConstantTimeEq;
