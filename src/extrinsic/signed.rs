//! Signed-extrinsic assembly.

use tracing::debug;

use crate::derive::{CryptoType, KeyPair};
use crate::signer::{FeeEstimationSigner, PayloadSigner, Signature};

use super::{
    encode_compact_len, encode_compact_u128, encode_compact_u32, encode_signing_payload, Call,
    ChainContext, Era, ExtrinsicError, ExtrinsicFormat, ExtrinsicResult,
};

/// Extrinsic format version bits: v4 with the signed bit set
const SIGNED_VERSION_BYTE: u8 = 0x84;
/// `MultiAddress::Id` discriminant
const MULTI_ADDRESS_ID: u8 = 0x00;

// MultiSignature discriminants fixed by the runtime.
const fn multi_signature_discriminant(crypto_type: CryptoType) -> u8 {
    match crypto_type {
        CryptoType::Ed25519 => 0,
        CryptoType::Sr25519 => 1,
        CryptoType::Ecdsa => 2,
    }
}

/// Assemble the on-wire bytes of a signed extrinsic.
///
/// V4 layout: `[0x84][address enum][account][sig discriminant][signature]
/// [era][compact nonce][compact tip][call]`. V27 drops the address enum
/// and the signature discriminant: raw account id, raw 64-byte signature.
/// The whole body is wrapped in a compact length prefix, ready for RPC
/// submission.
///
/// # Errors
/// Returns [`ExtrinsicError::SignatureFormat`] for signature kinds the
/// selected layout cannot represent (recoverable ecdsa in V27).
pub fn encode_signed_extrinsic(
    format: ExtrinsicFormat,
    account_id: &[u8; 32],
    signature: &Signature,
    era: &Era,
    nonce: u32,
    tip: u128,
    call: &Call,
) -> ExtrinsicResult<Vec<u8>> {
    let mut body = Vec::with_capacity(128 + call.args.len());
    body.push(SIGNED_VERSION_BYTE);

    match format {
        ExtrinsicFormat::V4 => {
            body.push(MULTI_ADDRESS_ID);
            body.extend_from_slice(account_id);
            body.push(multi_signature_discriminant(signature.crypto_type()));
            body.extend_from_slice(signature.as_bytes());
        }
        ExtrinsicFormat::V27 => {
            if signature.crypto_type() == CryptoType::Ecdsa {
                return Err(ExtrinsicError::SignatureFormat {
                    format,
                    crypto_type: CryptoType::Ecdsa,
                });
            }
            body.extend_from_slice(account_id);
            body.extend_from_slice(signature.as_bytes());
        }
    }

    body.extend_from_slice(&era.encode());
    encode_compact_u32(nonce, &mut body);
    encode_compact_u128(tip, &mut body);
    body.extend_from_slice(&call.encode());

    let mut out = Vec::with_capacity(body.len() + 4);
    encode_compact_len(body.len(), &mut out);
    out.extend_from_slice(&body);
    Ok(out)
}

/// Builds signed extrinsics for one chain: format, runtime context, and
/// era are fixed up front, calls and signers vary per transaction.
#[derive(Debug, Clone, Copy)]
pub struct ExtrinsicBuilder {
    format: ExtrinsicFormat,
    context: ChainContext,
    era: Era,
}

impl ExtrinsicBuilder {
    /// Builder for the given layout and runtime context, immortal era
    #[must_use]
    pub const fn new(format: ExtrinsicFormat, context: ChainContext) -> Self {
        Self {
            format,
            context,
            era: Era::Immortal,
        }
    }

    /// Override the era for subsequent builds
    #[must_use]
    pub const fn with_era(mut self, era: Era) -> Self {
        self.era = era;
        self
    }

    /// The selected wire layout
    #[must_use]
    pub const fn format(&self) -> ExtrinsicFormat {
        self.format
    }

    /// Encode the payload, sign it, and assemble the final extrinsic.
    ///
    /// # Errors
    /// Propagates signing failures ([`crate::signer::SignError`], including
    /// `KeyTypeMismatch`) and layout mismatches
    /// ([`ExtrinsicError::SignatureFormat`]).
    pub fn build_signed(
        &self,
        call: &Call,
        nonce: u32,
        tip: u128,
        signer: &PayloadSigner,
        keypair: &KeyPair,
    ) -> ExtrinsicResult<Vec<u8>> {
        let payload =
            encode_signing_payload(self.format, call, &self.era, nonce, tip, &self.context);
        let signature = signer.sign(keypair, &payload)?;
        let account_id = keypair.account_id();

        let extrinsic = encode_signed_extrinsic(
            self.format,
            &account_id,
            &signature,
            &self.era,
            nonce,
            tip,
            call,
        )?;
        debug!(
            format = ?self.format,
            crypto_type = %signature.crypto_type(),
            module = call.module_index,
            call = call.call_index,
            len = extrinsic.len(),
            "assembled signed extrinsic"
        );
        Ok(extrinsic)
    }

    /// Build a fee-estimation extrinsic: identical layout and byte length,
    /// signed with the fixed non-secret dry-run seed.
    ///
    /// The caller supplies the real sender's account id so fee estimation
    /// sees the correct address bytes.
    ///
    /// # Errors
    /// Same failure modes as [`Self::build_signed`].
    pub fn build_for_fee_estimation(
        &self,
        call: &Call,
        nonce: u32,
        tip: u128,
        signer: &FeeEstimationSigner,
        account_id: &[u8; 32],
    ) -> ExtrinsicResult<Vec<u8>> {
        let payload =
            encode_signing_payload(self.format, call, &self.era, nonce, tip, &self.context);
        let signature = signer.sign_for_fee(&payload)?;

        encode_signed_extrinsic(
            self.format,
            account_id,
            &signature,
            &self.era,
            nonce,
            tip,
            call,
        )
    }
}
