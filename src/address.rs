//! Address structure for WOTS+ domain separation.
//!
//! Every hash invocation is keyed by a 32-byte address so that no two
//! (key, purpose, chain, step) tuples ever share a hash input.
//!
//! # Structure
//!
//! ```text
//! Bytes 0-7:   Key index (u64)
//! Bytes 8-11:  Purpose
//! Bytes 12-15: Chain index
//! Bytes 16-19: Step index
//! Bytes 20-31: Reserved, always zero
//! ```
//!
//! All fields are big-endian and fixed-width, so the encoding is injective.

/// Size of an encoded address in bytes.
pub const ADDRESS_LEN: usize = 32;

/// What a hash invocation is used for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Purpose {
    /// Derivation of a chain seed from the master seed.
    SeedDerivation = 0,
    /// Derivation of the public seed from the master seed.
    PublicSeed = 1,
    /// Per-step chain key.
    ChainKey = 2,
    /// Per-step chain bitmask.
    ChainMask = 3,
    /// Compression of all chain endpoints into one digest.
    PublicKeyCompression = 4,
}

/// Fixed-width domain-separation record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Address {
    data: [u8; ADDRESS_LEN],
}

impl Address {
    /// Creates an address for `key_index` with the given purpose and chain
    /// and step set to zero.
    pub fn new(key_index: u64, purpose: Purpose) -> Self {
        let mut address = Address {
            data: [0u8; ADDRESS_LEN],
        };
        address.data[0..8].copy_from_slice(&key_index.to_be_bytes());
        address.set_purpose(purpose);
        address
    }

    #[inline]
    pub fn key_index(&self) -> u64 {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&self.data[0..8]);
        u64::from_be_bytes(bytes)
    }

    /// Sets the purpose (bytes 8-11) and clears chain and step.
    #[inline]
    pub fn set_purpose(&mut self, purpose: Purpose) {
        self.data[8..12].copy_from_slice(&(purpose as u32).to_be_bytes());
        self.data[12..20].fill(0);
    }

    #[inline]
    pub fn purpose(&self) -> u32 {
        self.read_u32(8)
    }

    /// Sets the chain index (bytes 12-15).
    #[inline]
    pub fn set_chain(&mut self, chain: u32) {
        self.data[12..16].copy_from_slice(&chain.to_be_bytes());
    }

    #[inline]
    pub fn chain(&self) -> u32 {
        self.read_u32(12)
    }

    /// Sets the step index (bytes 16-19).
    #[inline]
    pub fn set_step(&mut self, step: u32) {
        self.data[16..20].copy_from_slice(&step.to_be_bytes());
    }

    #[inline]
    pub fn step(&self) -> u32 {
        self.read_u32(16)
    }

    /// Returns a copy with the chain index replaced.
    pub fn with_chain(mut self, chain: u32) -> Self {
        self.set_chain(chain);
        self
    }

    /// Returns a copy with the step index replaced.
    pub fn with_step(mut self, step: u32) -> Self {
        self.set_step(step);
        self
    }

    /// Returns a copy with the purpose replaced. Chain and step are reset.
    pub fn with_purpose(mut self, purpose: Purpose) -> Self {
        self.set_purpose(purpose);
        self
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.data
    }

    #[inline]
    pub fn to_bytes(&self) -> [u8; ADDRESS_LEN] {
        self.data
    }

    fn read_u32(&self, offset: usize) -> u32 {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.data[offset..offset + 4]);
        u32::from_be_bytes(bytes)
    }
}
