//! Error types for WOTS+ operations.

use thiserror::Error;

/// Errors returned by parameter derivation, key generation, signing and
/// verification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WotsError {
    /// Malformed `n`/`w`, a digest or signature of the wrong shape, or
    /// objects built for a different parameter set.
    #[error("invalid parameter: {reason}")]
    InvalidParameter {
        /// Description of the rejected input.
        reason: String,
    },

    /// A chain walk was asked to go past the end of its chain.
    #[error("chain {chain} overrun: start {start} + steps {steps} exceeds chain length {chain_length}")]
    ChainOverrun {
        chain: usize,
        start: usize,
        steps: usize,
        chain_length: usize,
    },

    /// The signature does not match the public key for the given digest.
    #[error("signature verification failed")]
    VerificationFailed,

    /// A one-time key was asked to sign a second message.
    #[error("one-time key has already produced a signature")]
    KeyReused,
}

impl WotsError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        WotsError::InvalidParameter {
            reason: reason.into(),
        }
    }
}

/// Result type alias for WOTS+ operations.
pub type Result<T> = std::result::Result<T, WotsError>;
