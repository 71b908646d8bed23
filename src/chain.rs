//! The WOTS+ chain function and the per-chain parallel map.

use zeroize::Zeroize;

use crate::address::{Address, Purpose};
use crate::error::{Result, WotsError};
use crate::hash::{self, HashPrimitive};
use crate::params::ParameterSet;

/// Chain function (c_k^i function) bound to one key instance.
///
/// Step `j` of chain `i` takes the value at position `j` to position
/// `j + 1`:
///
/// ```text
/// key   = PRF(public_seed, ADRS{ChainKey,  i, j})
/// mask  = PRF(public_seed, ADRS{ChainMask, i, j})
/// value = F(key, value XOR mask)
/// ```
///
/// Holds no mutable state, so chains can be walked concurrently.
pub struct Chain<'a, H: HashPrimitive + ?Sized> {
    hasher: &'a H,
    params: &'a ParameterSet,
    public_seed: &'a [u8],
    key_index: u64,
}

impl<'a, H: HashPrimitive + ?Sized> Chain<'a, H> {
    pub fn new(hasher: &'a H, params: &'a ParameterSet, public_seed: &'a [u8], key_index: u64) -> Self {
        Chain {
            hasher,
            params,
            public_seed,
            key_index,
        }
    }

    /// Walks `value`, which sits at position `start` of chain `chain`,
    /// forward by `steps` positions.
    ///
    /// Fails with `ChainOverrun` if `start + steps` exceeds the chain length,
    /// and with `InvalidParameter` if `value` is not `n` bytes or the chain
    /// index is out of range.
    pub fn advance(&self, value: &[u8], chain: usize, start: usize, steps: usize) -> Result<Vec<u8>> {
        let chain_length = self.params.chain_length();
        let end = start.checked_add(steps).filter(|&end| end <= chain_length);
        let Some(end) = end else {
            return Err(WotsError::ChainOverrun {
                chain,
                start,
                steps,
                chain_length,
            });
        };
        if chain >= self.params.len() {
            return Err(WotsError::invalid(format!(
                "chain index {chain} out of range for {} chains",
                self.params.len()
            )));
        }
        if value.len() != self.params.n() {
            return Err(WotsError::invalid(format!(
                "chain value must be {} bytes, got {}",
                self.params.n(),
                value.len()
            )));
        }

        let mut chain_out = value.to_vec();
        for step in start..end {
            chain_out = self.step(chain_out, chain as u32, step as u32);
        }
        Ok(chain_out)
    }

    fn step(&self, mut value: Vec<u8>, chain: u32, step: u32) -> Vec<u8> {
        let key_address = Address::new(self.key_index, Purpose::ChainKey)
            .with_chain(chain)
            .with_step(step);
        let mask_address = Address::new(self.key_index, Purpose::ChainMask)
            .with_chain(chain)
            .with_step(step);

        let key = hash::prf(self.hasher, self.public_seed, &key_address);
        let mask = hash::prf(self.hasher, self.public_seed, &mask_address);

        xor_in_place(&mut value, &mask);
        let next = hash::f(self.hasher, &key, &value);
        value.zeroize();
        next
    }
}

/// XOR `mask` into `value`. Both are `n` bytes.
fn xor_in_place(value: &mut [u8], mask: &[u8]) {
    for (v, m) in value.iter_mut().zip(mask) {
        *v ^= m;
    }
}

/// Runs `f` for every chain index in `0..len`, in parallel when the
/// `parallel` feature is enabled. Results keep chain order.
#[cfg(feature = "parallel")]
pub(crate) fn map_chains<T, F>(len: usize, f: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> Result<T> + Sync + Send,
{
    use rayon::prelude::*;
    (0..len).into_par_iter().map(f).collect()
}

#[cfg(not(feature = "parallel"))]
pub(crate) fn map_chains<T, F>(len: usize, f: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> Result<T> + Sync + Send,
{
    map_chains_sequential(len, f)
}

/// In-order map over `0..len` on the calling thread.
#[cfg(any(test, not(feature = "parallel")))]
pub(crate) fn map_chains_sequential<T, F>(len: usize, f: F) -> Result<Vec<T>>
where
    F: Fn(usize) -> Result<T>,
{
    (0..len).map(f).collect()
}
