/// Constant-time comparison utilities.
///
/// Implementations must not branch on, or exit early because of, the
/// contents being compared. The only data-dependent decision is the final
/// `== 0` on the accumulated difference.
pub trait ConstantTimeEq {
    /// Returns `true` if `self == other`, in constant time.
    fn ct_eq(&self, other: &Self) -> bool;
}

impl<const N: usize> ConstantTimeEq for [u8; N] {
    /// Every byte pair is XORed and OR-accumulated before the single
    /// comparison, so the running time does not depend on where the first
    /// difference occurs.
    #[inline(always)]
    fn ct_eq(&self, other: &Self) -> bool {
        self.as_slice().ct_eq(other.as_slice())
    }
}

impl ConstantTimeEq for [u8] {
    /// Slices of different lengths compare unequal immediately. Lengths are
    /// public; only the contents are treated as secret.
    #[inline(always)]
    fn ct_eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }

        self.iter()
            .zip(other)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

#[cfg(test)]
mod tests {
    use super::ConstantTimeEq;

    #[test]
    fn equal_arrays() {
        assert!([0x5au8; 16].ct_eq(&[0x5au8; 16]));
        assert!([0u8; 0].ct_eq(&[]));
    }

    #[test]
    fn difference_in_any_position_is_detected() {
        let base = [0x11u8; 16];
        for i in 0..16 {
            for bit in 0..8 {
                let mut other = base;
                other[i] ^= 1 << bit;
                assert!(!base.ct_eq(&other), "byte {i} bit {bit}");
            }
        }
    }

    #[test]
    fn slices_of_different_length_are_unequal() {
        assert!(!b"abc"[..].ct_eq(&b"abcd"[..]));
    }
}
