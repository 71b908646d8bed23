//! Hash primitives and the framed hash calls built on them.
//!
//! All hashing in the scheme goes through [`HashPrimitive`]. On top of it
//! this module defines four framed calls, each starting with a distinct
//! prefix byte:
//!
//! - `F`: chain step, `H(0x00 || key || value)`
//! - `H_msg`: message digest, `H(0x01 || message)`
//! - `T`: public key compression, `H(0x02 || public_seed || ADRS || pk_0 || ... )`
//! - `PRF`: keyed derivation, `H(0x03 || key || ADRS)`

use zeroize::Zeroizing;

use crate::address::Address;

const PREFIX_F: u8 = 0x00;
const PREFIX_MESSAGE: u8 = 0x01;
const PREFIX_COMPRESS: u8 = 0x02;
const PREFIX_PRF: u8 = 0x03;

/// A fixed-output hash function used for every chain step, derivation and
/// compression.
///
/// Implementations must be deterministic and return exactly
/// [`output_len`](HashPrimitive::output_len) bytes.
pub trait HashPrimitive: Send + Sync {
    /// Output length in bytes. Must equal the parameter set's `n`.
    fn output_len(&self) -> usize;

    fn hash(&self, input: &[u8]) -> Vec<u8>;
}

/// Plain function hash, e.g. a keccak syscall. Always 32 bytes.
pub type HashFn = fn(&[u8]) -> [u8; 32];

impl HashPrimitive for HashFn {
    fn output_len(&self) -> usize {
        32
    }

    fn hash(&self, input: &[u8]) -> Vec<u8> {
        self(input).to_vec()
    }
}

/// Keccak-256 as used by Ethereum and Solana (not SHA3-256 padding).
#[derive(Clone, Copy, Debug, Default)]
pub struct Keccak256;

impl HashPrimitive for Keccak256 {
    fn output_len(&self) -> usize {
        32
    }

    fn hash(&self, input: &[u8]) -> Vec<u8> {
        use sha3::Digest;
        sha3::Keccak256::digest(input).to_vec()
    }
}

/// SHA-256.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256;

impl HashPrimitive for Sha256 {
    fn output_len(&self) -> usize {
        32
    }

    fn hash(&self, input: &[u8]) -> Vec<u8> {
        use sha2::Digest;
        sha2::Sha256::digest(input).to_vec()
    }
}

/// SHAKE256 truncated to `n` bytes. Supports any security parameter.
#[derive(Clone, Copy, Debug)]
pub struct Shake256 {
    n: usize,
}

impl Shake256 {
    pub fn new(n: usize) -> Self {
        Shake256 { n }
    }
}

impl HashPrimitive for Shake256 {
    fn output_len(&self) -> usize {
        self.n
    }

    fn hash(&self, input: &[u8]) -> Vec<u8> {
        use sha3::digest::{ExtendableOutput, Update, XofReader};

        let mut hasher = sha3::Shake256::default();
        hasher.update(input);
        let mut reader = hasher.finalize_xof();
        let mut output = vec![0u8; self.n];
        reader.read(&mut output);
        output
    }
}

/// `prefix || parts...` in a buffer that is wiped on drop. PRF inputs hold
/// the master seed and F inputs hold masked chain values.
fn framed(prefix: u8, parts: &[&[u8]]) -> Zeroizing<Vec<u8>> {
    let len = 1 + parts.iter().map(|part| part.len()).sum::<usize>();
    let mut input = Zeroizing::new(Vec::with_capacity(len));
    input.push(prefix);
    for part in parts {
        input.extend_from_slice(part);
    }
    input
}

/// PRF(key, ADRS) for seed, public seed, chain key and bitmask derivation.
pub(crate) fn prf<H: HashPrimitive + ?Sized>(hasher: &H, key: &[u8], address: &Address) -> Vec<u8> {
    hasher.hash(&framed(PREFIX_PRF, &[key, address.as_bytes()]))
}

/// F(key, value): one chain step on an already-masked value.
pub(crate) fn f<H: HashPrimitive + ?Sized>(hasher: &H, key: &[u8], value: &[u8]) -> Vec<u8> {
    hasher.hash(&framed(PREFIX_F, &[key, value]))
}

/// T(public_seed, ADRS, endpoints): compresses all endpoints into one value.
pub(crate) fn compress<H: HashPrimitive + ?Sized>(
    hasher: &H,
    public_seed: &[u8],
    address: &Address,
    endpoints: &[Vec<u8>],
) -> Vec<u8> {
    let body: usize = endpoints.iter().map(Vec::len).sum();
    let mut input = Vec::with_capacity(1 + public_seed.len() + address.as_bytes().len() + body);
    input.push(PREFIX_COMPRESS);
    input.extend_from_slice(public_seed);
    input.extend_from_slice(address.as_bytes());
    for endpoint in endpoints {
        input.extend_from_slice(endpoint);
    }
    hasher.hash(&input)
}

/// H_msg(message): hashes an arbitrary message to an `n`-byte digest.
pub(crate) fn message_digest<H: HashPrimitive + ?Sized>(hasher: &H, message: &[u8]) -> Vec<u8> {
    let mut input = Vec::with_capacity(1 + message.len());
    input.push(PREFIX_MESSAGE);
    input.extend_from_slice(message);
    hasher.hash(&input)
}
