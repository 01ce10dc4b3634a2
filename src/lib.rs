//! # Polysign
//!
//! Multi-curve account derivation and extrinsic signing core for
//! Substrate- and Ethereum-family chains.
//!
//! ## Architecture
//!
//! Leaf to root:
//! - [`hashing`]: BLAKE2b, Keccak-256, SHA-256, HMAC, and the twox
//!   storage-key constructions
//! - [`derive`]: BIP-39 mnemonics, the two seed derivations, junction
//!   paths, and sr25519/ed25519/ecdsa keypairs
//! - [`address`]: SS58 and Ethereum address codecs
//! - [`signer`]: per-curve payload signing plus the fee-estimation dry-run
//!   signer
//! - [`extrinsic`]: SCALE compact integers, eras, signing payloads, and
//!   signed-extrinsic assembly in two wire formats
//! - [`import`]: the orchestration boundary handed to storage/UI layers
//!
//! ## Design constraints
//!
//! Every operation is a pure, synchronous function of its inputs: no I/O,
//! no global state, safe to call from any number of threads. Secret
//! material lives in zero-on-drop wrappers and never appears in logs or
//! `Debug` output. Network submission and key storage are external
//! collaborators reached only through explicit capability traits.

#![forbid(unsafe_code)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rust_2018_idioms
)]
#![warn(missing_docs)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::missing_panics_doc
)]

pub mod address;
pub mod derive;
pub mod extrinsic;
pub mod hashing;
pub mod import;
pub mod signer;

pub use address::{ethereum_address, ss58_decode, ss58_encode, AddressError, Ss58Prefix};
pub use derive::{
    create_keypair, CryptoType, DeriveError, Junction, JunctionPath, KeyPair, SecretSeed,
    WordCount,
};
pub use extrinsic::{
    Call, ChainContext, Era, ExtrinsicBuilder, ExtrinsicError, ExtrinsicFormat,
};
pub use import::{
    import_from_entropy, import_from_mnemonic, AccountImport, AccountSummary, KeyStore,
    KeyStoreError,
};
pub use signer::{
    verify, ChainFamily, FeeEstimationSigner, PayloadSigner, SignError, Signature,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
