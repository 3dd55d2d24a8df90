use zeroize::Zeroize;

use crate::primitives::conv::{le_words, store_le_words};

/// Poly1305 arithmetic state over GF(2^130 - 5).
///
/// Both the accumulator `h` and the clamped multiplier `r` are held as five
/// 26-bit limbs in `u32`s. Products are formed in `u64`, where the largest
/// possible column sum stays below 2^64, and then carried back down to
/// 26-bit limbs. Reduction uses `2^130 = 5 (mod p)`: anything carried out
/// of the top limb re-enters the bottom limb multiplied by 5.
///
/// This type only knows how to absorb 16-byte blocks. Message chunking,
/// partial-block handling and padding live in the `mac` layer.
///
/// # Security
///
/// - Every operation runs in time independent of `h`, `r` and `s`.
/// - A state must never be reused across messages.
#[derive(Zeroize)]
pub(crate) struct State {
    /// Clamped `r`, five 26-bit limbs.
    r: [u32; 5],
    /// Accumulator, five 26-bit limbs (top limb may briefly exceed 26 bits).
    h: [u32; 5],
    /// `s`, the second key half, as four little-endian words.
    s: [u32; 4],
}

const MASK26: u32 = 0x03ff_ffff;

/// The `2^128` bit of a full 16-byte block, expressed in the top limb.
pub(crate) const FULL_BLOCK_HIBIT: u32 = 1 << 24;

/// Splits a 128-bit little-endian value (four words) into 26-bit limbs,
/// OR-ing `hibit` into the top limb.
#[inline(always)]
fn to_limbs(t: [u32; 4], hibit: u32) -> [u32; 5] {
    [
        t[0] & MASK26,
        ((t[0] >> 26) | (t[1] << 6)) & MASK26,
        ((t[1] >> 20) | (t[2] << 12)) & MASK26,
        ((t[2] >> 14) | (t[3] << 18)) & MASK26,
        (t[3] >> 8) | hibit,
    ]
}

impl State {
    /// Builds the state from a 32-byte one-time key.
    ///
    /// `key[..16]` is `r`. Clamping clears the top four bits of bytes 3, 7,
    /// 11 and 15 and the bottom two bits of bytes 4, 8 and 12, which is the
    /// word-wise mask applied below. `key[16..]` is `s`, used as-is.
    pub(crate) fn new(key: &[u8; 32]) -> Self {
        let mut t: [u32; 4] = le_words(&key[..16]);
        t[0] &= 0x0fff_ffff;
        t[1] &= 0x0fff_fffc;
        t[2] &= 0x0fff_fffc;
        t[3] &= 0x0fff_fffc;

        let r = to_limbs(t, 0);
        t.zeroize();

        Self {
            r,
            h: [0; 5],
            s: le_words(&key[16..]),
        }
    }

    /// Absorbs one 16-byte block: `h = (h + block + hibit * 2^128) * r mod p`.
    ///
    /// `block` must be exactly 16 bytes. Full message blocks pass
    /// [`FULL_BLOCK_HIBIT`]; the final short block arrives already padded
    /// with its `0x01` marker byte and passes 0.
    pub(crate) fn absorb(&mut self, block: &[u8], hibit: u32) {
        let m = to_limbs(le_words(block), hibit);

        for (h, m) in self.h.iter_mut().zip(m) {
            *h += m;
        }

        let [h0, h1, h2, h3, h4] = self.h.map(u64::from);
        let [r0, r1, r2, r3, r4] = self.r.map(u64::from);
        let (s1, s2, s3, s4) = (r1 * 5, r2 * 5, r3 * 5, r4 * 5);

        let d = [
            h0 * r0 + h1 * s4 + h2 * s3 + h3 * s2 + h4 * s1,
            h0 * r1 + h1 * r0 + h2 * s4 + h3 * s3 + h4 * s2,
            h0 * r2 + h1 * r1 + h2 * r0 + h3 * s4 + h4 * s3,
            h0 * r3 + h1 * r2 + h2 * r1 + h3 * r0 + h4 * s4,
            h0 * r4 + h1 * r3 + h2 * r2 + h3 * r1 + h4 * r0,
        ];

        let mut carry = 0u64;
        for (h, d) in self.h.iter_mut().zip(d) {
            let t = d + carry;
            *h = (t as u32) & MASK26;
            carry = t >> 26;
        }

        let t = u64::from(self.h[0]) + carry * 5;
        self.h[0] = (t as u32) & MASK26;
        self.h[1] += (t >> 26) as u32;
    }

    /// Fully reduces `h` modulo `p`, adds `s` modulo 2^128 and returns the
    /// little-endian tag.
    pub(crate) fn finalize(&mut self) -> [u8; 16] {
        let h = &mut self.h;

        // Propagate carries until every limb fits in 26 bits.
        let mut c = h[1] >> 26;
        h[1] &= MASK26;
        for i in 2..5 {
            h[i] += c;
            c = h[i] >> 26;
            h[i] &= MASK26;
        }
        h[0] += c * 5;
        c = h[0] >> 26;
        h[0] &= MASK26;
        h[1] += c;

        // g = h + 5 - 2^130; select g when it does not borrow, i.e. h >= p.
        let mut g = [0u32; 5];
        c = 5;
        for i in 0..4 {
            g[i] = h[i] + c;
            c = g[i] >> 26;
            g[i] &= MASK26;
        }
        g[4] = h[4].wrapping_add(c).wrapping_sub(1 << 26);

        let use_g = (g[4] >> 31).wrapping_sub(1);
        for (h, g) in h.iter_mut().zip(&g) {
            *h = (*h & !use_g) | (*g & use_g);
        }

        let packed = [
            h[0] | (h[1] << 26),
            (h[1] >> 6) | (h[2] << 20),
            (h[2] >> 12) | (h[3] << 14),
            (h[3] >> 18) | (h[4] << 8),
        ];

        let mut words = [0u32; 4];
        let mut acc = 0u64;
        for ((word, p), s) in words.iter_mut().zip(packed).zip(self.s) {
            acc += u64::from(p) + u64::from(s);
            *word = acc as u32;
            acc >>= 32;
        }

        let mut tag = [0u8; 16];
        store_le_words(&words, &mut tag);

        g.zeroize();
        words.zeroize();

        tag
    }
}
