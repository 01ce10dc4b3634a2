//! SCALE extrinsic encoding.
//!
//! Builds the bytes a keypair signs and the final on-wire transaction.
//! Two incompatible wire layouts exist and are selected explicitly with
//! [`ExtrinsicFormat`] -- never inferred. Picking the wrong one for a
//! chain produces a transaction that fails signature verification
//! on-chain rather than a decode error, so the format travels with every
//! encode call.

mod call;
mod compact;
mod era;
mod payload;
mod signed;

pub use call::Call;
pub use compact::{
    encode_compact_len, encode_compact_u128, encode_compact_u32, encode_compact_u64,
};
pub use era::Era;
pub use payload::encode_signing_payload;
pub use signed::{encode_signed_extrinsic, ExtrinsicBuilder};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::derive::CryptoType;
use crate::signer::SignError;

/// Which on-wire transaction layout a chain's runtime expects.
///
/// Select once per chain from its runtime version; the layouts must never
/// be mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtrinsicFormat {
    /// Current layout: `MultiAddress` sender, signature tagged with a
    /// `MultiSignature` discriminant, transaction version in the signed
    /// payload.
    V4,
    /// Legacy layout (spec version 27 era runtimes): raw 32-byte sender,
    /// untagged signature, no transaction version in the signed payload.
    V27,
}

/// Runtime metadata an extrinsic binds its signature to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainContext {
    /// Runtime spec version
    pub spec_version: u32,
    /// Transaction version (ignored by the V27 payload)
    pub transaction_version: u32,
    /// Genesis block hash
    pub genesis_hash: [u8; 32],
    /// Mortality checkpoint hash (only consulted for mortal eras)
    pub block_hash: [u8; 32],
}

impl ChainContext {
    /// Context with an explicit mortality checkpoint
    #[must_use]
    pub const fn new(
        spec_version: u32,
        transaction_version: u32,
        genesis_hash: [u8; 32],
        block_hash: [u8; 32],
    ) -> Self {
        Self {
            spec_version,
            transaction_version,
            genesis_hash,
            block_hash,
        }
    }

    /// Context for immortal transactions: the genesis hash doubles as the
    /// mortality checkpoint.
    #[must_use]
    pub const fn immortal(
        spec_version: u32,
        transaction_version: u32,
        genesis_hash: [u8; 32],
    ) -> Self {
        Self::new(spec_version, transaction_version, genesis_hash, genesis_hash)
    }
}

/// Extrinsic encoding errors
#[derive(Debug, Error)]
pub enum ExtrinsicError {
    /// The signature kind has no representation in the selected layout
    #[error("{crypto_type} signatures cannot be encoded in the {format:?} layout")]
    SignatureFormat {
        /// Selected wire layout
        format: ExtrinsicFormat,
        /// Curve of the offending signature
        crypto_type: CryptoType,
    },
    /// Signing failed while building the extrinsic
    #[error(transparent)]
    Sign(#[from] SignError),
}

/// Result type for extrinsic operations
pub type ExtrinsicResult<T> = Result<T, ExtrinsicError>;
