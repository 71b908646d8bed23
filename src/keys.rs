//! Key and signature objects.
//!
//! These define the in-memory shape of WOTS+ values only. Callers choose
//! their own encoding; [`CompressedPublicKey`] and [`Signature`] offer a
//! plain byte form for convenience.

use std::fmt;

use zeroize::Zeroize;

use crate::error::{Result, WotsError};
use crate::params::ParameterSet;

/// WOTS+ private key: one secret seed per chain.
///
/// Consumed by [`WOTSPlus::sign`](crate::WOTSPlus::sign). Not `Clone`, and
/// all secret bytes are zeroized on drop.
pub struct PrivateKey {
    params: ParameterSet,
    key_index: u64,
    public_seed: Vec<u8>,
    seeds: Vec<Vec<u8>>,
}

impl PrivateKey {
    pub(crate) fn new(params: ParameterSet, key_index: u64, public_seed: Vec<u8>, seeds: Vec<Vec<u8>>) -> Self {
        PrivateKey {
            params,
            key_index,
            public_seed,
            seeds,
        }
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn key_index(&self) -> u64 {
        self.key_index
    }

    pub fn public_seed(&self) -> &[u8] {
        &self.public_seed
    }

    pub(crate) fn seeds(&self) -> &[Vec<u8>] {
        &self.seeds
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        for seed in self.seeds.iter_mut() {
            seed.zeroize();
        }
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("params", &self.params)
            .field("key_index", &self.key_index)
            .field("seeds", &"<redacted>")
            .finish()
    }
}

/// WOTS+ public key: the endpoint of every chain, plus what a verifier
/// needs to recompute the chain randomization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    params: ParameterSet,
    key_index: u64,
    public_seed: Vec<u8>,
    elements: Vec<Vec<u8>>,
}

impl PublicKey {
    /// Builds a public key from its parts, checking their shape against
    /// `params`.
    pub fn from_parts(
        params: ParameterSet,
        key_index: u64,
        public_seed: Vec<u8>,
        elements: Vec<Vec<u8>>,
    ) -> Result<Self> {
        if public_seed.len() != params.n() {
            return Err(WotsError::invalid(format!(
                "public seed must be {} bytes, got {}",
                params.n(),
                public_seed.len()
            )));
        }
        check_elements(&elements, &params, "public key")?;
        Ok(PublicKey {
            params,
            key_index,
            public_seed,
            elements,
        })
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn key_index(&self) -> u64 {
        self.key_index
    }

    pub fn public_seed(&self) -> &[u8] {
        &self.public_seed
    }

    /// Chain endpoints in chain order.
    pub fn elements(&self) -> &[Vec<u8>] {
        &self.elements
    }
}

/// Public key reduced to a single digest of all chain endpoints.
///
/// Byte form: key index (8 bytes, big-endian) || public seed || digest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompressedPublicKey {
    pub key_index: u64,
    pub public_seed: Vec<u8>,
    pub digest: Vec<u8>,
}

impl CompressedPublicKey {
    /// Convert the public key to bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(8 + self.public_seed.len() + self.digest.len());
        result.extend_from_slice(&self.key_index.to_be_bytes());
        result.extend_from_slice(&self.public_seed);
        result.extend_from_slice(&self.digest);
        result
    }

    /// Create a compressed public key from bytes for security parameter `n`.
    /// Returns None if the input is not of the correct length
    pub fn from_bytes(bytes: &[u8], n: usize) -> Option<Self> {
        let expected = n.checked_mul(2).and_then(|len| len.checked_add(8))?;
        if n == 0 || bytes.len() != expected {
            return None;
        }
        let mut key_index = [0u8; 8];
        key_index.copy_from_slice(&bytes[..8]);

        Some(CompressedPublicKey {
            key_index: u64::from_be_bytes(key_index),
            public_seed: bytes[8..8 + n].to_vec(),
            digest: bytes[8 + n..].to_vec(),
        })
    }
}

/// WOTS+ signature: one intermediate chain value per chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    elements: Vec<Vec<u8>>,
}

impl Signature {
    /// Wraps raw chain values. Their shape is checked when verifying.
    pub fn from_elements(elements: Vec<Vec<u8>>) -> Self {
        Signature { elements }
    }

    pub fn elements(&self) -> &[Vec<u8>] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<Vec<u8>> {
        self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Concatenation of all elements.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.elements.concat()
    }

    /// Splits `bytes` into `len` elements of `n` bytes each.
    pub fn from_bytes(bytes: &[u8], params: &ParameterSet) -> Result<Self> {
        if bytes.len() != params.signature_size() {
            return Err(WotsError::invalid(format!(
                "signature must be {} bytes, got {}",
                params.signature_size(),
                bytes.len()
            )));
        }
        Ok(Signature {
            elements: bytes.chunks(params.n()).map(<[u8]>::to_vec).collect(),
        })
    }

    pub(crate) fn check_shape(&self, params: &ParameterSet) -> Result<()> {
        check_elements(&self.elements, params, "signature")
    }
}

/// A private key that may sign exactly once.
///
/// Signing through the wrapper takes the key out; later attempts fail with
/// `KeyReused` instead of silently producing a second signature.
#[derive(Debug)]
pub struct OneTimeKey {
    pub(crate) key: Option<PrivateKey>,
}

impl OneTimeKey {
    pub fn new(key: PrivateKey) -> Self {
        OneTimeKey { key: Some(key) }
    }

    pub fn is_used(&self) -> bool {
        self.key.is_none()
    }
}

impl From<PrivateKey> for OneTimeKey {
    fn from(key: PrivateKey) -> Self {
        OneTimeKey::new(key)
    }
}

fn check_elements(elements: &[Vec<u8>], params: &ParameterSet, what: &str) -> Result<()> {
    if elements.len() != params.len() {
        return Err(WotsError::invalid(format!(
            "{what} must have {} elements, got {}",
            params.len(),
            elements.len()
        )));
    }
    if let Some(i) = elements.iter().position(|e| e.len() != params.n()) {
        return Err(WotsError::invalid(format!(
            "{what} element {i} must be {} bytes, got {}",
            params.n(),
            elements[i].len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compressed_public_key_serialization() {
        let public_key = CompressedPublicKey {
            key_index: 5,
            public_seed: vec![1u8; 32],
            digest: vec![2u8; 32],
        };

        let bytes = public_key.to_bytes();
        assert_eq!(bytes.len(), 72);
        assert_eq!(&bytes[..8], &[0, 0, 0, 0, 0, 0, 0, 5]);
        let recovered = CompressedPublicKey::from_bytes(&bytes, 32).unwrap();
        assert_eq!(recovered, public_key);
    }

    #[test]
    fn test_compressed_public_key_wrong_length() {
        assert!(CompressedPublicKey::from_bytes(&[0u8; 71], 32).is_none());
        assert!(CompressedPublicKey::from_bytes(&[0u8; 8], 0).is_none());
        assert!(CompressedPublicKey::from_bytes(&[0u8; 72], usize::MAX / 2 + 1).is_none());
        assert!(CompressedPublicKey::from_bytes(&[0u8; 72], usize::MAX).is_none());
    }

    #[test]
    fn test_signature_bytes() {
        let params = ParameterSet::n16_w16();
        let elements: Vec<Vec<u8>> = (0..params.len()).map(|i| vec![i as u8; 16]).collect();
        let signature = Signature::from_elements(elements.clone());
        let bytes = signature.to_bytes();
        assert_eq!(bytes.len(), params.signature_size());
        assert_eq!(Signature::from_bytes(&bytes, &params).unwrap().elements(), &elements[..]);
        assert!(Signature::from_bytes(&bytes[1..], &params).is_err());
    }

    #[test]
    fn test_signature_shape_check() {
        let params = ParameterSet::n32_w16();
        let good = Signature::from_elements(vec![vec![0u8; 32]; 67]);
        assert!(good.check_shape(&params).is_ok());

        let short = Signature::from_elements(vec![vec![0u8; 32]; 66]);
        assert!(short.check_shape(&params).is_err());

        let mut elements = vec![vec![0u8; 32]; 67];
        elements[40] = vec![0u8; 31];
        assert!(Signature::from_elements(elements).check_shape(&params).is_err());
    }

    #[test]
    fn test_public_key_from_parts_checks_shape() {
        let params = ParameterSet::n32_w16();
        assert!(PublicKey::from_parts(params, 0, vec![0u8; 32], vec![vec![0u8; 32]; 67]).is_ok());
        assert!(PublicKey::from_parts(params, 0, vec![0u8; 16], vec![vec![0u8; 32]; 67]).is_err());
        assert!(PublicKey::from_parts(params, 0, vec![0u8; 32], vec![vec![0u8; 32]; 3]).is_err());
    }

    #[test]
    fn test_private_key_debug_redacts_seeds() {
        let key = PrivateKey::new(
            ParameterSet::n32_w16(),
            0,
            vec![1u8; 32],
            vec![vec![0xabu8; 32]; 67],
        );
        let printed = format!("{key:?}");
        assert!(printed.contains("<redacted>"));
        assert!(!printed.contains("171"));
    }
}
