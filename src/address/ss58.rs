//! SS58 address encoding.
//!
//! Format: `base58(prefix-bytes || account-id || checksum)` where the
//! checksum is the first two bytes of BLAKE2b-512 over `"SS58PRE"` plus
//! the payload. Network prefixes below 64 occupy one byte; 64..16384 use
//! the two-byte packing. The prefix is data, not a validated enum:
//! unknown prefixes decode fine and callers decide what to accept.

use crate::hashing::blake2b_512;

use super::{AddressError, AddressResult};

/// SS58 network prefix (14 usable bits)
pub type Ss58Prefix = u16;

const CHECKSUM_PREIMAGE: &[u8] = b"SS58PRE";
const CHECKSUM_LEN: usize = 2;
const ACCOUNT_ID_LEN: usize = 32;

/// Encode a 32-byte account id as an SS58 address.
///
/// # Errors
/// Returns [`AddressError::InvalidPrefix`] for prefixes above 16383.
pub fn ss58_encode(account_id: &[u8; 32], prefix: Ss58Prefix) -> AddressResult<String> {
    let mut payload = Vec::with_capacity(2 + ACCOUNT_ID_LEN + CHECKSUM_LEN);

    match prefix {
        0..=63 => payload.push(prefix as u8),
        64..=16383 => {
            // Two-byte form: 0b01 marker, then the 14 prefix bits split
            // across the remaining positions.
            let first = ((prefix & 0b0000_0000_1111_1100) >> 2) as u8 | 0b0100_0000;
            let second = ((prefix >> 8) as u8) | (((prefix & 0b11) as u8) << 6);
            payload.push(first);
            payload.push(second);
        }
        _ => return Err(AddressError::InvalidPrefix(prefix)),
    }

    payload.extend_from_slice(account_id);
    payload.extend_from_slice(&checksum(&payload));

    Ok(bs58::encode(payload).into_string())
}

/// Decode an SS58 address into its account id and network prefix.
///
/// # Errors
/// Returns [`AddressError::Base58`] on malformed base58,
/// [`AddressError::InvalidLength`] on truncated payloads, and
/// [`AddressError::InvalidChecksum`] when the checksum does not match.
pub fn ss58_decode(address: &str) -> AddressResult<([u8; 32], Ss58Prefix)> {
    let data = bs58::decode(address)
        .into_vec()
        .map_err(|e| AddressError::Base58(e.to_string()))?;

    if data.is_empty() {
        return Err(AddressError::InvalidLength(0));
    }

    let (prefix_len, prefix) = match data[0] {
        0..=63 => (1, Ss58Prefix::from(data[0])),
        64..=127 => {
            if data.len() < 2 {
                return Err(AddressError::InvalidLength(data.len()));
            }
            let lower = (data[0] << 2) | (data[1] >> 6);
            let upper = data[1] & 0b0011_1111;
            (2, Ss58Prefix::from(lower) | (Ss58Prefix::from(upper) << 8))
        }
        _ => return Err(AddressError::InvalidPrefix(Ss58Prefix::from(data[0]))),
    };

    let expected_len = prefix_len + ACCOUNT_ID_LEN + CHECKSUM_LEN;
    if data.len() != expected_len {
        return Err(AddressError::InvalidLength(data.len()));
    }

    let body_end = prefix_len + ACCOUNT_ID_LEN;
    if checksum(&data[..body_end]) != data[body_end..] {
        return Err(AddressError::InvalidChecksum);
    }

    let mut account_id = [0u8; ACCOUNT_ID_LEN];
    account_id.copy_from_slice(&data[prefix_len..body_end]);
    Ok((account_id, prefix))
}

fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut preimage = Vec::with_capacity(CHECKSUM_PREIMAGE.len() + payload.len());
    preimage.extend_from_slice(CHECKSUM_PREIMAGE);
    preimage.extend_from_slice(payload);

    let digest = blake2b_512(&preimage);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}
