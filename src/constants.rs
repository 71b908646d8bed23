//! Compile-time constants for the default parameter set (`n = 32`, `w = 16`).
//!
//! Consumers with fixed-size buffers (for example on-chain programs) use
//! these instead of querying a [`ParameterSet`](crate::ParameterSet) at
//! runtime. `ParameterSet::default()` derives the same values.

/// HashLen: The WOTS+ `n` security parameter which is the size
/// of the hash function output in bytes.
/// This is 32 for keccak256 and sha256 (256 / 8 = 32)
pub const HASH_LEN: usize = 32;

/// MessageLen: the size of the digest to be signed in bytes.
///
/// Note that this is not the message length itself as, like
/// with most signatures, we hash the message and then compute
/// the signature on the hash of the message.
pub const MESSAGE_LEN: usize = HASH_LEN;

/// The Winternitz `w` parameter: the base of the digit representation
/// of the digest and checksum.
///
/// A larger value means a smaller signature size but a longer
/// computation time.
pub const WINTERNITZ_W: usize = 16;

/// Number of hash applications from a chain seed to its public endpoint.
pub const CHAIN_LEN: usize = WINTERNITZ_W - 1;

/// lg(w) so we don't calculate it (lg(16) == 4)
pub const LG_W: usize = WINTERNITZ_W.ilog2() as usize;

/// NumMessageChunks: the `len_1` parameter which is the number of
/// message chunks. This is
/// ceil(8n / lg(w)) -> ceil(32*8 / lg(16)) -> 256 / 4 = 64
pub const NUM_MESSAGE_CHUNKS: usize = (8 * HASH_LEN).div_ceil(LG_W);

/// NumChecksumChunks: the `len_2` parameter which is the number of
/// checksum chunks. This is
/// floor(lg(len_1 * (w - 1)) / lg(w)) + 1
/// -> floor(lg(64 * 15) / lg(16)) + 1 = 3
pub const NUM_CHECKSUM_CHUNKS: usize =
    ((NUM_MESSAGE_CHUNKS * (WINTERNITZ_W - 1)).ilog2() as usize / LG_W) + 1;

pub const NUM_SIGNATURE_CHUNKS: usize = NUM_MESSAGE_CHUNKS + NUM_CHECKSUM_CHUNKS;

/// Size of signature in bytes
pub const SIGNATURE_SIZE: usize = NUM_SIGNATURE_CHUNKS * HASH_LEN;

/// Size of a compressed public key in bytes: key index, public seed and
/// the digest of all chain endpoints.
pub const COMPRESSED_PUBLIC_KEY_SIZE: usize = 8 + HASH_LEN * 2;
