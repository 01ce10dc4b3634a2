//! Deterministic account derivation.
//!
//! Covers the full path from a BIP-39 mnemonic to a chain keypair:
//! - mnemonic <-> entropy with checksum validation
//! - seed derivation (BIP-39 sentence PBKDF2, and the distinct Substrate
//!   derivation from raw entropy bytes)
//! - junction (soft/hard) derivation paths
//! - sr25519 / ed25519 / secp256k1 keypair creation

mod junction;
mod keypair;
mod mnemonic;

pub use junction::{Junction, JunctionPath, CHAIN_CODE_LEN};
pub use keypair::{create_keypair, CryptoType, KeyPair};
pub use mnemonic::{
    entropy_to_mnemonic, generate_mnemonic, mnemonic_to_entropy, parse_mnemonic,
    seed_from_entropy, seed_from_mnemonic, SecretSeed, WordCount,
};

use thiserror::Error;

/// Derivation errors
#[derive(Debug, Error)]
pub enum DeriveError {
    /// Mnemonic has an unsupported number of words
    #[error("invalid word count: {0} (expected 12, 15, 18, 21 or 24)")]
    InvalidWordCount(usize),
    /// Mnemonic checksum does not match its entropy
    #[error("mnemonic checksum mismatch")]
    InvalidChecksum,
    /// A word is not in the BIP-39 wordlist
    #[error("unknown mnemonic word")]
    UnknownWord,
    /// Entropy buffer has an unsupported byte length
    #[error("invalid entropy length: {0} bytes (expected 16, 20, 24, 28 or 32)")]
    InvalidEntropy(usize),
    /// Mnemonic phrase failed validation for another reason
    #[error("invalid mnemonic: {0}")]
    InvalidPhrase(String),
    /// Derivation path string does not match the junction grammar
    #[error("malformed derivation path: {0}")]
    MalformedPath(String),
    /// The requested junction kind has no algorithm on this curve
    #[error("unsupported derivation: soft junctions are not defined for {0}")]
    UnsupportedDerivation(CryptoType),
    /// Seed bytes were rejected by the underlying curve library
    #[error("invalid seed: {0}")]
    InvalidSeed(String),
}

/// Result type for derivation operations
pub type DeriveResult<T> = Result<T, DeriveError>;
