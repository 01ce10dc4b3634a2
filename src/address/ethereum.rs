//! Ethereum address derivation.
//!
//! `address = keccak256(uncompressed-public-key)[12..32]`. The hash input
//! is the 64-byte X || Y point encoding without the SEC1 0x04 prefix;
//! compressed keys are decompressed first. Derivation is one-way -- there
//! is no decode back to the public key.

use k256::ecdsa::VerifyingKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;

use crate::hashing::keccak_256;

use super::{AddressError, AddressResult};

/// Ethereum addresses are 20 bytes
pub const ETHEREUM_ADDRESS_LEN: usize = 20;

/// Derive the 20-byte Ethereum address for a secp256k1 public key.
///
/// Accepts a 64-byte uncompressed key without prefix (hashed directly),
/// a 33-byte SEC1 compressed key, or a 65-byte SEC1 uncompressed key
/// (both parsed and normalized through point decompression first).
///
/// # Errors
/// Returns [`AddressError::InvalidLength`] for other input sizes and
/// [`AddressError::InvalidPublicKey`] if the bytes are not a point on the
/// curve -- never a silent zero address.
pub fn ethereum_address(public_key: &[u8]) -> AddressResult<[u8; ETHEREUM_ADDRESS_LEN]> {
    let mut uncompressed = [0u8; 64];

    match public_key.len() {
        // Already the raw X || Y form: no decompression round-trip.
        64 => uncompressed.copy_from_slice(public_key),
        33 | 65 => {
            let key = VerifyingKey::from_sec1_bytes(public_key)
                .map_err(|e| AddressError::InvalidPublicKey(e.to_string()))?;
            let point = key.to_encoded_point(false);
            uncompressed.copy_from_slice(&point.as_bytes()[1..]);
        }
        other => return Err(AddressError::InvalidLength(other)),
    }

    let digest = keccak_256(&uncompressed);
    let mut address = [0u8; ETHEREUM_ADDRESS_LEN];
    address.copy_from_slice(&digest[12..]);
    Ok(address)
}

/// Render an address in EIP-55 mixed-case checksum form (`0x`-prefixed).
#[must_use]
pub fn to_checksum_string(address: &[u8; ETHEREUM_ADDRESS_LEN]) -> String {
    let lower = hex::encode(address);
    let digest = keccak_256(lower.as_bytes());

    let mut out = String::with_capacity(2 + lower.len());
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = (digest[i / 2] >> (4 * (1 - i % 2))) & 0x0f;
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}
