//! Little-endian conversions and AEAD framing helpers.

/// Reads `N` consecutive little-endian `u32` words from the front of `bytes`.
///
/// `bytes` must hold at least `4 * N` bytes; callers only pass fixed-size
/// arrays whose length is checked by the type system.
#[inline(always)]
pub(crate) fn le_words<const N: usize>(bytes: &[u8]) -> [u32; N] {
    let mut words = [0u32; N];

    for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    words
}

/// Serializes `words` little-endian into `out`.
#[inline(always)]
pub(crate) fn store_le_words(words: &[u32], out: &mut [u8]) {
    for (chunk, word) in out.chunks_exact_mut(4).zip(words) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
}

/// Number of zero bytes needed to bring `len` up to a multiple of 16.
#[inline(always)]
pub(crate) const fn pad16_len(len: usize) -> usize {
    (16 - len % 16) % 16
}

/// The final Poly1305 block of the AEAD construction:
/// `LE64(aad_len) || LE64(ciphertext_len)`.
#[inline(always)]
pub(crate) fn length_block(aad_len: usize, ciphertext_len: usize) -> [u8; 16] {
    let mut block = [0u8; 16];
    block[..8].copy_from_slice(&(aad_len as u64).to_le_bytes());
    block[8..].copy_from_slice(&(ciphertext_len as u64).to_le_bytes());
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad16_len_aligns_to_sixteen() {
        assert_eq!(pad16_len(0), 0);
        assert_eq!(pad16_len(1), 15);
        assert_eq!(pad16_len(12), 4);
        assert_eq!(pad16_len(16), 0);
        assert_eq!(pad16_len(17), 15);
        assert_eq!(pad16_len(114), 14);
    }

    #[test]
    fn length_block_is_two_le64() {
        let block = length_block(12, 114);
        assert_eq!(&block[..8], &[12, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&block[8..], &[114, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn words_round_trip_through_bytes() {
        let bytes: [u8; 12] = [0, 0, 0, 9, 0, 0, 0, 0x4a, 0, 0, 0, 0];
        let words: [u32; 3] = le_words(&bytes);
        assert_eq!(words, [0x0900_0000, 0x4a00_0000, 0]);

        let mut out = [0u8; 12];
        store_le_words(&words, &mut out);
        assert_eq!(out, bytes);
    }
}
