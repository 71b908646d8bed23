//! WOTS+ (Winternitz One-Time Signature Plus) implementation
//!
//! A hash-based one-time signature: the private key is a set of secret
//! chain seeds, the public key is the set of chain endpoints after `w - 1`
//! hash applications, and a signature reveals each chain at the position
//! selected by one base-w digit of the message digest (plus checksum).
//!
//! Every hash call is domain separated by an [`Address`] and every chain
//! step is randomized with a per-step key and bitmask derived from a public
//! seed, which is what the "+" adds over plain WOTS.
//!
//! ```
//! use wots::{ParameterSet, Sha256, WOTSPlus};
//!
//! let wots = WOTSPlus::new(ParameterSet::n32_w16(), Sha256)?;
//! let (private_key, public_key) = wots.generate_key_pair(&[7u8; 32])?;
//!
//! let digest = wots.message_digest(b"hello");
//! // signing consumes the private key
//! let signature = wots.sign(private_key, &digest)?;
//!
//! assert!(wots.verify(&public_key, &digest, &signature).is_ok());
//! # Ok::<(), wots::WotsError>(())
//! ```
//!
//! Each private key must sign at most one message. [`WOTSPlus::sign`]
//! takes the key by value, and [`OneTimeKey`] refuses a second signature
//! for callers that need to hold the key across calls.

pub mod address;
pub mod chain;
pub mod constants;
pub mod encoding;
pub mod error;
pub mod hash;
pub mod keys;
pub mod params;

mod keygen;
mod sign;
mod verify;

pub use address::{Address, Purpose};
pub use chain::Chain;
pub use error::{Result, WotsError};
pub use hash::{HashFn, HashPrimitive, Keccak256, Sha256, Shake256};
pub use keys::{CompressedPublicKey, OneTimeKey, PrivateKey, PublicKey, Signature};
pub use params::ParameterSet;

/// A WOTS+ instance: one parameter set and one hash primitive.
///
/// Stateless apart from its configuration, so a single instance can be
/// shared across threads and used for any number of key pairs.
#[derive(Clone, Debug)]
pub struct WOTSPlus<H: HashPrimitive> {
    params: ParameterSet,
    hasher: H,
}

impl<H: HashPrimitive> WOTSPlus<H> {
    /// Create a new WOTS+ instance with the specified parameters and hash
    /// function.
    ///
    /// Fails with `InvalidParameter` if the hash output length is not `n`.
    pub fn new(params: ParameterSet, hasher: H) -> Result<Self> {
        if hasher.output_len() != params.n() {
            return Err(WotsError::invalid(format!(
                "hash output is {} bytes but n is {}",
                hasher.output_len(),
                params.n()
            )));
        }
        Ok(WOTSPlus { params, hasher })
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Hashes an arbitrary message to the `n`-byte digest that
    /// [`sign`](Self::sign) and [`verify`](Self::verify) expect.
    pub fn message_digest(&self, message: &[u8]) -> Vec<u8> {
        hash::message_digest(&self.hasher, message)
    }

    /// The chain function for one key instance.
    pub fn chain<'a>(&'a self, public_seed: &'a [u8], key_index: u64) -> Chain<'a, H> {
        Chain::new(&self.hasher, &self.params, public_seed, key_index)
    }

    fn check_params(&self, other: &ParameterSet, what: &str) -> Result<()> {
        if *other != self.params {
            return Err(WotsError::invalid(format!(
                "{what} was built for n={} w={}, instance uses n={} w={}",
                other.n(),
                other.w(),
                self.params.n(),
                self.params.w()
            )));
        }
        Ok(())
    }
}

impl WOTSPlus<HashFn> {
    /// Default parameter set (`n = 32`, `w = 16`) around a plain 32-byte
    /// hash function, e.g. an on-chain keccak syscall.
    pub fn with_hash_fn(hash_fn: HashFn) -> Self {
        WOTSPlus {
            params: ParameterSet::default(),
            hasher: hash_fn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Mock hash function for testing: XOR-folds the whole input
    fn mock_hash(data: &[u8]) -> [u8; 32] {
        let mut output = [0u8; 32];
        for (i, &byte) in data.iter().enumerate() {
            output[i % 32] ^= byte;
        }
        output
    }

    #[test]
    fn test_new_rejects_mismatched_hash() {
        let result = WOTSPlus::new(ParameterSet::n16_w16(), Sha256);
        assert!(matches!(result, Err(WotsError::InvalidParameter { .. })));
        assert!(WOTSPlus::new(ParameterSet::n16_w16(), Shake256::new(16)).is_ok());
    }

    #[test]
    fn test_with_hash_fn_uses_default_params() {
        let wots = WOTSPlus::with_hash_fn(mock_hash);
        assert_eq!(*wots.params(), ParameterSet::default());
        assert_eq!(wots.params().len(), constants::NUM_SIGNATURE_CHUNKS);
    }

    #[test]
    fn test_message_digest_length() {
        let wots = WOTSPlus::new(ParameterSet::n16_w16(), Shake256::new(16)).unwrap();
        assert_eq!(wots.message_digest(b"hello").len(), 16);
        assert_ne!(wots.message_digest(b"hello"), wots.message_digest(b"hellp"));
    }

    #[test]
    fn test_key_generation_and_signing() {
        let wots = WOTSPlus::with_hash_fn(mock_hash);
        let private_seed = [1u8; 32];
        let (private_key, public_key) = wots.generate_key_pair(&private_seed).unwrap();

        let message = [2u8; constants::MESSAGE_LEN];
        let signature = wots.sign(private_key, &message).unwrap();

        assert!(wots.verify(&public_key, &message, &signature).is_ok());
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let wots = WOTSPlus::with_hash_fn(mock_hash);
        let (private_key, public_key) = wots.generate_key_pair(&[1u8; 32]).unwrap();

        let message = [2u8; constants::MESSAGE_LEN];
        let mut elements = wots.sign(private_key, &message).unwrap().into_elements();
        elements[5][0] ^= 0x01;

        assert_eq!(
            wots.verify(&public_key, &message, &Signature::from_elements(elements)),
            Err(WotsError::VerificationFailed)
        );
    }

    #[test]
    fn test_mock_hash_depends_on_chain_value() {
        let wots = WOTSPlus::with_hash_fn(mock_hash);
        let chain = wots.chain(&[7u8; 32], 0);
        assert_ne!(
            chain.advance(&[1u8; 32], 0, 0, 1).unwrap(),
            chain.advance(&[2u8; 32], 0, 0, 1).unwrap()
        );
    }

    #[test]
    fn test_invalid_message_length() {
        let wots = WOTSPlus::with_hash_fn(mock_hash);
        let (_, public_key) = wots.generate_key_pair(&[1u8; 32]).unwrap();

        let invalid_message = [2u8; constants::MESSAGE_LEN + 1];
        let signature = Signature::from_elements(vec![vec![0u8; 32]; constants::NUM_SIGNATURE_CHUNKS]);
        assert!(matches!(
            wots.verify(&public_key, &invalid_message, &signature),
            Err(WotsError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_invalid_signature_length() {
        let wots = WOTSPlus::with_hash_fn(mock_hash);
        let (_, public_key) = wots.generate_key_pair(&[1u8; 32]).unwrap();

        let message = [2u8; constants::MESSAGE_LEN];
        let signature = Signature::from_elements(vec![vec![0u8; 32]; constants::NUM_SIGNATURE_CHUNKS - 1]);
        assert!(matches!(
            wots.verify(&public_key, &message, &signature),
            Err(WotsError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_mismatched_parameter_sets() {
        let wots16 = WOTSPlus::new(ParameterSet::n32_w16(), Sha256).unwrap();
        let wots4 = WOTSPlus::new(ParameterSet::n32_w4(), Sha256).unwrap();
        let (private_key, public_key) = wots16.generate_key_pair(&[1u8; 32]).unwrap();

        let signature = Signature::from_elements(vec![vec![0u8; 32]; 67]);
        assert!(matches!(
            wots4.verify(&public_key, &[0u8; 32], &signature),
            Err(WotsError::InvalidParameter { .. })
        ));
        assert!(matches!(
            wots4.sign(private_key, &[0u8; 32]),
            Err(WotsError::InvalidParameter { .. })
        ));
    }
}
