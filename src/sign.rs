//! WOTS+ signing.

use crate::chain::map_chains;
use crate::encoding;
use crate::error::{Result, WotsError};
use crate::hash::HashPrimitive;
use crate::keys::{OneTimeKey, PrivateKey, Signature};
use crate::WOTSPlus;

impl<H: HashPrimitive> WOTSPlus<H> {
    /// Sign a digest with a WOTS+ private key, consuming the key.
    ///
    /// The process works as follows:
    /// 1. Convert the digest to `len1` base-w digits
    /// 2. Compute the checksum and append it as `len2` base-w digits
    /// 3. Walk each chain seed forward by its digit
    ///
    /// The private key is zeroized when this returns, whether or not
    /// signing succeeded.
    pub fn sign(&self, private_key: PrivateKey, digest: &[u8]) -> Result<Signature> {
        let _span = tracing::debug_span!("wots_sign", key_index = private_key.key_index()).entered();

        self.check_params(private_key.params(), "private key")?;
        let positions = encoding::chain_lengths(digest, &self.params)?;

        let chain = self.chain(private_key.public_seed(), private_key.key_index());
        let seeds = private_key.seeds();
        let elements = map_chains(self.params.len(), |i| {
            chain.advance(&seeds[i], i, 0, usize::from(positions[i]))
        })?;

        Ok(Signature::from_elements(elements))
    }
}

impl OneTimeKey {
    /// Signs `digest` if this key has not signed before.
    ///
    /// Fails with `KeyReused` on every call after the first successful
    /// one. A digest of the wrong length is rejected without using up the
    /// key.
    pub fn sign<H: HashPrimitive>(&mut self, wots: &WOTSPlus<H>, digest: &[u8]) -> Result<Signature> {
        if self.key.is_none() {
            tracing::debug!("refusing to sign twice with a one-time key");
            return Err(WotsError::KeyReused);
        }
        if digest.len() != wots.params().n() {
            return Err(WotsError::invalid(format!(
                "digest must be {} bytes, got {}",
                wots.params().n(),
                digest.len()
            )));
        }
        let key = self.key.take().ok_or(WotsError::KeyReused)?;
        wots.sign(key, digest)
    }
}
