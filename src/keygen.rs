//! WOTS+ key generation.
//!
//! ```text
//! public_seed = PRF(master_seed, ADRS{key, PublicSeed})
//! seed_i      = PRF(master_seed, ADRS{key, SeedDerivation, chain = i})
//! pk_i        = c^{w-1}(seed_i)
//! ```

use crate::address::{Address, Purpose};
use crate::chain::map_chains;
use crate::error::{Result, WotsError};
use crate::hash::{self, HashPrimitive};
use crate::keys::{CompressedPublicKey, PrivateKey, PublicKey};
use crate::WOTSPlus;

impl<H: HashPrimitive> WOTSPlus<H> {
    /// Generate a WOTS+ key pair for key index 0.
    pub fn generate_key_pair(&self, master_seed: &[u8]) -> Result<(PrivateKey, PublicKey)> {
        self.generate_key_pair_at(master_seed, 0)
    }

    /// Generate a WOTS+ key pair for the key instance `key_index`.
    ///
    /// The process works as follows:
    /// 1. Derive the public seed from the master seed
    /// 2. Derive one secret seed per chain from the master seed
    /// 3. Run every chain to its end to get the public key segments
    ///
    /// The same master seed with different key indexes yields unrelated
    /// key pairs, so a tree of one-time keys can share one master seed.
    pub fn generate_key_pair_at(&self, master_seed: &[u8], key_index: u64) -> Result<(PrivateKey, PublicKey)> {
        let _span = tracing::debug_span!("wots_keygen", key_index).entered();

        let private_key = self.private_key_at(master_seed, key_index)?;
        let public_key = self.public_key(&private_key)?;
        tracing::debug!(chains = self.params.len(), "generated WOTS+ key pair");

        Ok((private_key, public_key))
    }

    /// Derive only the private key for key index 0.
    ///
    /// Signing needs no public key, so this skips the `len * (w - 1)` chain
    /// steps that computing one costs.
    pub fn private_key(&self, master_seed: &[u8]) -> Result<PrivateKey> {
        self.private_key_at(master_seed, 0)
    }

    /// Derive only the private key for the key instance `key_index`.
    pub fn private_key_at(&self, master_seed: &[u8], key_index: u64) -> Result<PrivateKey> {
        if master_seed.len() != self.params.n() {
            return Err(WotsError::invalid(format!(
                "master seed must be {} bytes, got {}",
                self.params.n(),
                master_seed.len()
            )));
        }

        let public_seed = hash::prf(
            &self.hasher,
            master_seed,
            &Address::new(key_index, Purpose::PublicSeed),
        );
        let seed_address = Address::new(key_index, Purpose::SeedDerivation);
        let seeds = map_chains(self.params.len(), |i| {
            Ok(hash::prf(&self.hasher, master_seed, &seed_address.with_chain(i as u32)))
        })?;

        Ok(PrivateKey::new(self.params, key_index, public_seed, seeds))
    }

    /// Generate public key from a private key
    pub fn public_key(&self, private_key: &PrivateKey) -> Result<PublicKey> {
        self.check_params(private_key.params(), "private key")?;

        let chain = self.chain(private_key.public_seed(), private_key.key_index());
        let chain_length = self.params.chain_length();
        let seeds = private_key.seeds();
        let endpoints = map_chains(self.params.len(), |i| chain.advance(&seeds[i], i, 0, chain_length))?;

        PublicKey::from_parts(
            self.params,
            private_key.key_index(),
            private_key.public_seed().to_vec(),
            endpoints,
        )
    }

    /// Hash all public key segments together into a compressed public key.
    pub fn compress(&self, public_key: &PublicKey) -> Result<CompressedPublicKey> {
        self.check_params(public_key.params(), "public key")?;
        Ok(CompressedPublicKey {
            key_index: public_key.key_index(),
            public_seed: public_key.public_seed().to_vec(),
            digest: self.compress_endpoints(public_key.public_seed(), public_key.key_index(), public_key.elements()),
        })
    }

    pub(crate) fn compress_endpoints(&self, public_seed: &[u8], key_index: u64, endpoints: &[Vec<u8>]) -> Vec<u8> {
        hash::compress(
            &self.hasher,
            public_seed,
            &Address::new(key_index, Purpose::PublicKeyCompression),
            endpoints,
        )
    }
}
