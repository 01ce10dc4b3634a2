//! Hashing primitives shared by derivation, addressing, and extrinsic
//! encoding.
//!
//! Uses audited, production-grade crates:
//! - BLAKE2b for Substrate account ids, payload digests, and storage keys
//! - Keccak-256 (SHA-3 family) for Ethereum addresses and pre-hashes
//! - SHA-256 / HMAC for BIP-39 plumbing
//! - XXH64 for the twox storage-key constructions

use blake2::digest::{Update, VariableOutput};
use blake2::Blake2bVar;
use hmac::{Hmac, Mac};
use sha2::digest::Digest as _;
use sha2::{Sha256, Sha512};
use sha3::Keccak256;
use std::hash::Hasher as _;
use thiserror::Error;
use twox_hash::XxHash64;

/// Hashing errors
#[derive(Debug, Error)]
pub enum HashingError {
    /// Requested digest length is not supported by the underlying hash
    #[error("invalid digest length: {0}")]
    InvalidDigestLength(usize),
    /// MAC construction rejected the key
    #[error("invalid MAC key: {0}")]
    InvalidMacKey(String),
}

/// Result type for hashing operations
pub type HashingResult<T> = Result<T, HashingError>;

/// BLAKE2b with a caller-chosen digest length (1..=64 bytes).
///
/// Hashing a zero-length input is valid and returns the digest of the
/// empty message.
///
/// # Errors
/// Returns [`HashingError::InvalidDigestLength`] if `output_len` is zero
/// or greater than 64.
pub fn blake2b(data: &[u8], output_len: usize) -> HashingResult<Vec<u8>> {
    let mut hasher =
        Blake2bVar::new(output_len).map_err(|_| HashingError::InvalidDigestLength(output_len))?;
    hasher.update(data);

    let mut out = vec![0u8; output_len];
    hasher
        .finalize_variable(&mut out)
        .map_err(|_| HashingError::InvalidDigestLength(output_len))?;
    Ok(out)
}

/// BLAKE2b-128 digest
#[must_use]
pub fn blake2b_128(data: &[u8]) -> [u8; 16] {
    let digest = blake2b(data, 16).expect("16 is a valid BLAKE2b digest length");
    let mut out = [0u8; 16];
    out.copy_from_slice(&digest);
    out
}

/// BLAKE2b-256 digest (the Substrate `blake2_256` hash)
#[must_use]
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    let digest = blake2b(data, 32).expect("32 is a valid BLAKE2b digest length");
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// BLAKE2b-512 digest (used by the SS58 checksum)
#[must_use]
pub fn blake2b_512(data: &[u8]) -> [u8; 64] {
    let digest = blake2b(data, 64).expect("64 is a valid BLAKE2b digest length");
    let mut out = [0u8; 64];
    out.copy_from_slice(&digest);
    out
}

/// Keccak-256 digest (Ethereum addresses and pre-hashes)
#[must_use]
pub fn keccak_256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Keccak256::digest(data));
    out
}

/// SHA-256 digest
#[must_use]
pub fn sha2_256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(data));
    out
}

/// HMAC-SHA256 of `data` under `key`.
///
/// # Errors
/// Returns [`HashingError::InvalidMacKey`] if the MAC rejects the key.
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> HashingResult<[u8; 32]> {
    let mut mac = <Hmac<Sha256>>::new_from_slice(key)
        .map_err(|e| HashingError::InvalidMacKey(e.to_string()))?;
    Mac::update(&mut mac, data);

    let mut out = [0u8; 32];
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}

/// HMAC-SHA512 of `data` under `key`.
///
/// # Errors
/// Returns [`HashingError::InvalidMacKey`] if the MAC rejects the key.
pub fn hmac_sha512(key: &[u8], data: &[u8]) -> HashingResult<[u8; 64]> {
    let mut mac = <Hmac<Sha512>>::new_from_slice(key)
        .map_err(|e| HashingError::InvalidMacKey(e.to_string()))?;
    Mac::update(&mut mac, data);

    let mut out = [0u8; 64];
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}

/// Seeded XXH64, little-endian digest bytes (the Substrate `twox_64`).
#[must_use]
pub fn xxh64(data: &[u8], seed: u64) -> [u8; 8] {
    let mut hasher = XxHash64::with_seed(seed);
    hasher.write(data);
    hasher.finish().to_le_bytes()
}

/// The Substrate `twox_128` storage-key hash.
///
/// This is NOT a true 128-bit xxHash: it is two independent seeded XXH64
/// runs concatenated (`xxh64(data, 0) || xxh64(data, 1)`). Storage-key
/// compatibility requires exactly this construction.
#[must_use]
pub fn xxh128(data: &[u8]) -> [u8; 16] {
    let mut out = [0u8; 16];
    out[..8].copy_from_slice(&xxh64(data, 0));
    out[8..].copy_from_slice(&xxh64(data, 1));
    out
}

/// The `twox_64_concat` storage-key hasher: `xxh64(data, 0) || data`.
#[must_use]
pub fn twox_64_concat(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(8 + data.len());
    out.extend_from_slice(&xxh64(data, 0));
    out.extend_from_slice(data);
    out
}

/// The `blake2_128_concat` storage-key hasher: `blake2b(data, 16) || data`.
#[must_use]
pub fn blake2_128_concat(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(16 + data.len());
    out.extend_from_slice(&blake2b_128(data));
    out.extend_from_slice(data);
    out
}
