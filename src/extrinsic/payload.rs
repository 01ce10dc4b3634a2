//! Signing-payload construction.
//!
//! Field order is fixed per layout and deviations are invisible until the
//! chain rejects the signature, so the golden-vector tests below pin the
//! exact bytes.

use crate::hashing::blake2b_256;

use super::{encode_compact_u128, encode_compact_u32, Call, ChainContext, Era, ExtrinsicFormat};

// Substrate convention: payloads longer than this are signed through their
// BLAKE2b-256 digest.
const PAYLOAD_HASH_THRESHOLD: usize = 256;

/// Encode the bytes a keypair signs for an extrinsic.
///
/// Layout: `call ++ era ++ compact(nonce) ++ compact(tip) ++ spec_version
/// ++ [transaction_version] ++ genesis_hash ++ checkpoint_hash`. The
/// transaction version is present only in the V4 payload; V27 runtimes
/// predate it. The version/hash trailer binds the signature to one
/// runtime and is NOT part of the on-wire extrinsic.
///
/// Immortal eras use the genesis hash as the mortality checkpoint;
/// mortal eras use the context's `block_hash`.
#[must_use]
pub fn encode_signing_payload(
    format: ExtrinsicFormat,
    call: &Call,
    era: &Era,
    nonce: u32,
    tip: u128,
    context: &ChainContext,
) -> Vec<u8> {
    let mut payload = call.encode();
    payload.extend_from_slice(&era.encode());
    encode_compact_u32(nonce, &mut payload);
    encode_compact_u128(tip, &mut payload);

    payload.extend_from_slice(&context.spec_version.to_le_bytes());
    if format == ExtrinsicFormat::V4 {
        payload.extend_from_slice(&context.transaction_version.to_le_bytes());
    }
    payload.extend_from_slice(&context.genesis_hash);

    let checkpoint = if era.is_immortal() {
        &context.genesis_hash
    } else {
        &context.block_hash
    };
    payload.extend_from_slice(checkpoint);

    if payload.len() > PAYLOAD_HASH_THRESHOLD {
        blake2b_256(&payload).to_vec()
    } else {
        payload
    }
}
