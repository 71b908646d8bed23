//! Digest to chain-position encoding.
//!
//! The digest is read as a big-endian bit string, `lg(w)` bits per digit,
//! most significant digit first. If `8n` is not a multiple of `lg(w)` the
//! last digit is padded with zero bits on the right. The checksum
//! `sum(w - 1 - d_i)` is appended as `len2` base-w digits, most
//! significant first.

use crate::error::{Result, WotsError};
use crate::params::ParameterSet;

/// Splits `input` into `out_len` base-`2^log_w` digits.
pub fn base_w(input: &[u8], log_w: usize, out_len: usize) -> Vec<u8> {
    debug_assert!((1..=8).contains(&log_w));
    let mask = (1u32 << log_w) - 1;
    let mut digits = Vec::with_capacity(out_len);
    let mut bytes = input.iter();
    let mut acc: u32 = 0;
    let mut bits = 0usize;

    while digits.len() < out_len {
        if bits < log_w {
            match bytes.next() {
                Some(&byte) => {
                    acc = (acc << 8) | u32::from(byte);
                    bits += 8;
                }
                None => {
                    acc <<= log_w - bits;
                    bits = log_w;
                }
            }
        }
        bits -= log_w;
        digits.push(((acc >> bits) & mask) as u8);
        acc &= (1u32 << bits) - 1;
    }
    digits
}

/// Sum of `w - 1 - d` over the message digits.
pub fn checksum(message_digits: &[u8], params: &ParameterSet) -> u64 {
    let chain_length = params.chain_length() as u64;
    message_digits
        .iter()
        .map(|&digit| chain_length - u64::from(digit))
        .sum()
}

/// Encodes `checksum` as `len2` base-w digits, most significant first.
fn checksum_digits(checksum: u64, params: &ParameterSet) -> Vec<u8> {
    let mask = (params.w() - 1) as u64;
    (0..params.len2())
        .rev()
        .map(|i| ((checksum >> (i * params.log_w())) & mask) as u8)
        .collect()
}

/// Compute message hash chain indexes.
///
/// Converts the digest to `len1` base-w digits and appends the `len2`
/// checksum digits, giving one chain position per chain. Fails with
/// `InvalidParameter` if the digest is not `n` bytes.
pub fn chain_lengths(digest: &[u8], params: &ParameterSet) -> Result<Vec<u8>> {
    if digest.len() != params.n() {
        return Err(WotsError::invalid(format!(
            "digest must be {} bytes, got {}",
            params.n(),
            digest.len()
        )));
    }

    let mut positions = base_w(digest, params.log_w(), params.len1());
    let sum = checksum(&positions, params);
    positions.extend(checksum_digits(sum, params));
    Ok(positions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_w_nibbles() {
        assert_eq!(base_w(&[0x12, 0x34], 4, 4), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_base_w_bit_pairs() {
        // 0b11_01_00_10
        assert_eq!(base_w(&[0xd2], 2, 4), vec![3, 1, 0, 2]);
    }

    #[test]
    fn test_base_w_bytes() {
        assert_eq!(base_w(&[0xab, 0x01], 8, 2), vec![0xab, 0x01]);
    }

    #[test]
    fn test_base_w_unaligned_pads_last_digit() {
        // 0b101_100_00 | 0b1 -> 101 100 001 with one real bit in the last digit
        assert_eq!(base_w(&[0xb0, 0x80], 3, 6), vec![5, 4, 1, 0, 0, 0]);
        // 1 byte, 3-bit digits: 111 111 11(0)
        assert_eq!(base_w(&[0xff], 3, 3), vec![7, 7, 6]);
    }

    #[test]
    fn test_checksum_bounds() {
        let params = ParameterSet::n32_w16();
        assert_eq!(checksum(&[0u8; 64], &params), 960);
        assert_eq!(checksum(&[15u8; 64], &params), 0);
    }

    #[test]
    fn test_chain_lengths_all_zero_digest() {
        let params = ParameterSet::n32_w16();
        let positions = chain_lengths(&[0u8; 32], &params).unwrap();
        assert_eq!(positions.len(), 67);
        assert!(positions[..64].iter().all(|&d| d == 0));
        // 960 = 0x3c0
        assert_eq!(&positions[64..], &[3, 12, 0]);
    }

    #[test]
    fn test_chain_lengths_all_ones_digest() {
        let params = ParameterSet::n32_w16();
        let positions = chain_lengths(&[0x01u8; 32], &params).unwrap();
        for pair in positions[..64].chunks(2) {
            assert_eq!(pair, &[0, 1]);
        }
        // 32 * 15 + 32 * 14 = 928 = 0x3a0
        assert_eq!(&positions[64..], &[3, 10, 0]);
    }

    #[test]
    fn test_chain_lengths_max_digest() {
        let params = ParameterSet::n32_w16();
        let positions = chain_lengths(&[0xffu8; 32], &params).unwrap();
        assert!(positions[..64].iter().all(|&d| d == 15));
        assert_eq!(&positions[64..], &[0, 0, 0]);
    }

    #[test]
    fn test_chain_lengths_w256() {
        let params = ParameterSet::n32_w256();
        let positions = chain_lengths(&[0u8; 32], &params).unwrap();
        // 32 * 255 = 8160 = 0x1fe0
        assert_eq!(&positions[32..], &[0x1f, 0xe0]);
    }

    #[test]
    fn test_chain_lengths_rejects_wrong_digest_length() {
        let params = ParameterSet::n32_w16();
        assert!(matches!(
            chain_lengths(&[0u8; 31], &params),
            Err(WotsError::InvalidParameter { .. })
        ));
        assert!(chain_lengths(&[0u8; 33], &params).is_err());
    }
}
