//! WOTS+ verification.
//!
//! A signature element for chain `i` sits at position `d_i`. Walking it the
//! remaining `w - 1 - d_i` steps must land exactly on the public endpoint.

use subtle::{Choice, ConstantTimeEq};

use crate::chain::map_chains;
use crate::encoding;
use crate::error::{Result, WotsError};
use crate::hash::HashPrimitive;
use crate::keys::{CompressedPublicKey, PublicKey, Signature};
use crate::WOTSPlus;

impl<H: HashPrimitive> WOTSPlus<H> {
    /// Recompute the public key a signature commits to.
    ///
    /// This is the building block for tree schemes, which hash the result
    /// into a leaf instead of comparing it to a stored key.
    pub fn public_key_from_signature(
        &self,
        public_seed: &[u8],
        key_index: u64,
        digest: &[u8],
        signature: &Signature,
    ) -> Result<PublicKey> {
        if public_seed.len() != self.params.n() {
            return Err(WotsError::invalid(format!(
                "public seed must be {} bytes, got {}",
                self.params.n(),
                public_seed.len()
            )));
        }
        signature.check_shape(&self.params)?;
        let positions = encoding::chain_lengths(digest, &self.params)?;

        let chain = self.chain(public_seed, key_index);
        let chain_length = self.params.chain_length();
        let elements = signature.elements();
        let endpoints = map_chains(self.params.len(), |i| {
            let position = usize::from(positions[i]);
            chain.advance(&elements[i], i, position, chain_length - position)
        })?;

        PublicKey::from_parts(self.params, key_index, public_seed.to_vec(), endpoints)
    }

    /// Verify a WOTS+ signature against a full public key.
    ///
    /// Returns `Err(VerificationFailed)` unless every chain lands on its
    /// endpoint. All endpoints are compared in constant time.
    pub fn verify(&self, public_key: &PublicKey, digest: &[u8], signature: &Signature) -> Result<()> {
        let _span = tracing::debug_span!("wots_verify", key_index = public_key.key_index()).entered();

        self.check_params(public_key.params(), "public key")?;
        let recomputed =
            self.public_key_from_signature(public_key.public_seed(), public_key.key_index(), digest, signature)?;

        let mut equal = Choice::from(1u8);
        for (expected, actual) in public_key.elements().iter().zip(recomputed.elements()) {
            equal &= expected.as_slice().ct_eq(actual.as_slice());
        }
        accept(equal)
    }

    /// Verify a WOTS+ signature against a compressed public key.
    ///
    /// The recomputed endpoints are hashed together and compared with the
    /// stored digest.
    pub fn verify_compressed(
        &self,
        public_key: &CompressedPublicKey,
        digest: &[u8],
        signature: &Signature,
    ) -> Result<()> {
        let _span = tracing::debug_span!("wots_verify_compressed", key_index = public_key.key_index).entered();

        let recomputed =
            self.public_key_from_signature(&public_key.public_seed, public_key.key_index, digest, signature)?;
        let computed_hash =
            self.compress_endpoints(&public_key.public_seed, public_key.key_index, recomputed.elements());

        accept(computed_hash.as_slice().ct_eq(public_key.digest.as_slice()))
    }
}

fn accept(equal: Choice) -> Result<()> {
    if bool::from(equal) {
        Ok(())
    } else {
        tracing::debug!("WOTS+ signature rejected");
        Err(WotsError::VerificationFailed)
    }
}
