//! Chain address codecs.
//!
//! SS58 for Substrate chains (round-trip exact, checksummed) and
//! Keccak-derived 20-byte addresses for Ethereum chains (one-way).

mod ethereum;
mod ss58;

pub use ethereum::{ethereum_address, to_checksum_string, ETHEREUM_ADDRESS_LEN};
pub use ss58::{ss58_decode, ss58_encode, Ss58Prefix};

use thiserror::Error;

/// Address codec errors
#[derive(Debug, Error)]
pub enum AddressError {
    /// SS58 checksum does not match the payload
    #[error("invalid address checksum")]
    InvalidChecksum,
    /// Base58 decoding failed
    #[error("invalid base58: {0}")]
    Base58(String),
    /// Payload or key has an unsupported byte length
    #[error("invalid length: {0} bytes")]
    InvalidLength(usize),
    /// Network prefix is outside the encodable range
    #[error("invalid network prefix: {0}")]
    InvalidPrefix(u16),
    /// Public key is not a valid curve point
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),
}

/// Result type for address operations
pub type AddressResult<T> = Result<T, AddressError>;
