//! WOTS+ parameter derivation.
//!
//! A parameter set is fixed by the security parameter `n` (bytes per hash
//! output) and the Winternitz window `w`. Everything else is derived:
//!
//! ```text
//! len1 = ceil(8n / lg(w))                        message digits
//! len2 = floor(lg(len1 * (w - 1)) / lg(w)) + 1   checksum digits
//! len  = len1 + len2                             chains per key
//! ```

use crate::constants;
use crate::error::{Result, WotsError};

/// Largest supported Winternitz window. Digits are stored as bytes.
pub const MAX_W: usize = 256;

/// Validated, immutable WOTS+ configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParameterSet {
    n: usize,
    w: usize,
    log_w: usize,
    len1: usize,
    len2: usize,
}

impl ParameterSet {
    /// Derives a parameter set from `n` and `w`.
    ///
    /// Fails with `InvalidParameter` if `n` is zero, or `w` is not a power
    /// of two in `4..=256`.
    pub fn new(n: usize, w: usize) -> Result<Self> {
        if n == 0 {
            return Err(WotsError::invalid("n must be positive"));
        }
        if w < 4 || !w.is_power_of_two() {
            return Err(WotsError::invalid(format!(
                "w must be a power of two >= 4, got {w}"
            )));
        }
        if w > MAX_W {
            return Err(WotsError::invalid(format!(
                "w must be at most {MAX_W}, got {w}"
            )));
        }

        let log_w = w.ilog2() as usize;
        let len1 = n
            .checked_mul(8)
            .map(|bits| bits.div_ceil(log_w))
            .ok_or_else(|| WotsError::invalid("n is too large"))?;
        let max_checksum = len1
            .checked_mul(w - 1)
            .ok_or_else(|| WotsError::invalid("n is too large"))?;
        let len2 = (max_checksum.ilog2() as usize / log_w) + 1;

        if len1 + len2 > u32::MAX as usize {
            return Err(WotsError::invalid("chain count does not fit an address"));
        }

        let params = ParameterSet {
            n,
            w,
            log_w,
            len1,
            len2,
        };
        tracing::trace!(n, w, len1, len2, len = params.len(), "derived WOTS+ parameters");
        Ok(params)
    }

    /// `n = 32, w = 4`: longest chains-per-key, cheapest chains.
    pub fn n32_w4() -> Self {
        Self::from_valid(32, 4)
    }

    /// `n = 32, w = 16`: the default, as used by XMSS and SPHINCS+.
    pub fn n32_w16() -> Self {
        Self::from_valid(32, 16)
    }

    /// `n = 32, w = 256`: shortest signatures, longest chains.
    pub fn n32_w256() -> Self {
        Self::from_valid(32, 256)
    }

    /// `n = 16, w = 16`: 128-bit hash outputs.
    pub fn n16_w16() -> Self {
        Self::from_valid(16, 16)
    }

    // Only for the hard-coded presets above.
    fn from_valid(n: usize, w: usize) -> Self {
        let log_w = w.ilog2() as usize;
        let len1 = (8 * n).div_ceil(log_w);
        let len2 = ((len1 * (w - 1)).ilog2() as usize / log_w) + 1;
        ParameterSet {
            n,
            w,
            log_w,
            len1,
            len2,
        }
    }

    /// Security parameter: bytes per hash output, seed and digest.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Winternitz window.
    #[inline]
    pub fn w(&self) -> usize {
        self.w
    }

    /// Bits per base-w digit.
    #[inline]
    pub fn log_w(&self) -> usize {
        self.log_w
    }

    /// Number of message digits.
    #[inline]
    pub fn len1(&self) -> usize {
        self.len1
    }

    /// Number of checksum digits.
    #[inline]
    pub fn len2(&self) -> usize {
        self.len2
    }

    /// Total number of chains (and signature elements).
    #[inline]
    pub fn len(&self) -> usize {
        self.len1 + self.len2
    }

    /// Hash applications from a chain seed to its endpoint (`w - 1`).
    #[inline]
    pub fn chain_length(&self) -> usize {
        self.w - 1
    }

    /// Largest checksum value, reached by the all-zero digest.
    pub fn max_checksum(&self) -> u64 {
        (self.len1 * self.chain_length()) as u64
    }

    pub fn signature_size(&self) -> usize {
        self.len() * self.n
    }

    pub fn public_key_size(&self) -> usize {
        self.len() * self.n
    }

    /// Key index, public seed and endpoint digest.
    pub fn compressed_public_key_size(&self) -> usize {
        8 + 2 * self.n
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self::from_valid(constants::HASH_LEN, constants::WINTERNITZ_W)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_constants() {
        let params = ParameterSet::default();
        assert_eq!(params.n(), constants::HASH_LEN);
        assert_eq!(params.w(), constants::WINTERNITZ_W);
        assert_eq!(params.len1(), constants::NUM_MESSAGE_CHUNKS);
        assert_eq!(params.len2(), constants::NUM_CHECKSUM_CHUNKS);
        assert_eq!(params.len(), constants::NUM_SIGNATURE_CHUNKS);
        assert_eq!(params.chain_length(), constants::CHAIN_LEN);
        assert_eq!(params.signature_size(), constants::SIGNATURE_SIZE);
        assert_eq!(
            params.compressed_public_key_size(),
            constants::COMPRESSED_PUBLIC_KEY_SIZE
        );
    }

    #[test]
    fn test_n32_w16() {
        let params = ParameterSet::new(32, 16).unwrap();
        assert_eq!(params.len1(), 64);
        assert_eq!(params.len2(), 3);
        assert_eq!(params.len(), 67);
        assert_eq!(params.chain_length(), 15);
        assert_eq!(params.max_checksum(), 960);
        assert_eq!(params, ParameterSet::n32_w16());
    }

    #[test]
    fn test_presets_match_new() {
        assert_eq!(ParameterSet::new(32, 4).unwrap(), ParameterSet::n32_w4());
        assert_eq!(ParameterSet::new(32, 256).unwrap(), ParameterSet::n32_w256());
        assert_eq!(ParameterSet::new(16, 16).unwrap(), ParameterSet::n16_w16());
    }

    #[test]
    fn test_other_windows() {
        // 256 bits / 2 = 128 digits; 128 * 3 = 384 needs 5 base-4 digits
        let w4 = ParameterSet::n32_w4();
        assert_eq!((w4.len1(), w4.len2()), (128, 5));

        // 32 digits; 32 * 255 = 8160 needs 2 base-256 digits
        let w256 = ParameterSet::n32_w256();
        assert_eq!((w256.len1(), w256.len2()), (32, 2));

        // lg(8) = 3 does not divide 256: ceil(256 / 3) = 86; 86 * 7 = 602 -> 4 digits
        let w8 = ParameterSet::new(32, 8).unwrap();
        assert_eq!((w8.len1(), w8.len2()), (86, 4));
    }

    #[test]
    fn test_rejects_w_not_power_of_two() {
        assert!(matches!(
            ParameterSet::new(32, 3),
            Err(WotsError::InvalidParameter { .. })
        ));
        assert!(ParameterSet::new(32, 12).is_err());
    }

    #[test]
    fn test_rejects_small_or_large_w() {
        assert!(ParameterSet::new(32, 2).is_err());
        assert!(ParameterSet::new(32, 1).is_err());
        assert!(ParameterSet::new(32, 0).is_err());
        assert!(ParameterSet::new(32, 512).is_err());
    }

    #[test]
    fn test_rejects_zero_n() {
        assert!(matches!(
            ParameterSet::new(0, 16),
            Err(WotsError::InvalidParameter { .. })
        ));
    }
}
