//! Payload signing across the three supported curves.
//!
//! Dispatch rules:
//! - sr25519: Schnorrkel over the raw message under the `b"substrate"`
//!   signing context (randomized per call -- two signatures over the same
//!   message differ, both verify)
//! - ed25519: EdDSA over the raw message (deterministic)
//! - ecdsa: ECDSA over a 32-byte pre-hash of the message -- BLAKE2b-256
//!   for Substrate chains, Keccak-256 for Ethereum chains. The pre-hash
//!   follows the target chain family, not the curve. Signatures are
//!   65 bytes with the recovery id in the last byte.

mod fee_dummy;

pub use fee_dummy::FeeEstimationSigner;

use ed25519_dalek::{
    Signature as Ed25519Signature, Signer as _, Verifier as _, VerifyingKey as Ed25519VerifyingKey,
};
use k256::ecdsa::signature::hazmat::PrehashVerifier as _;
use k256::ecdsa::{
    RecoveryId, Signature as EcdsaSignature, VerifyingKey as EcdsaVerifyingKey,
};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use schnorrkel::{
    signing_context, PublicKey as Sr25519PublicKey, Signature as Sr25519Signature,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::derive::{CryptoType, KeyPair};
use crate::hashing::{blake2b_256, keccak_256};

/// Substrate signing context for sr25519
const SIGNING_CONTEXT: &[u8] = b"substrate";

/// Signing errors
#[derive(Debug, Error)]
pub enum SignError {
    /// The keypair's curve does not match the signer's declared type
    #[error("key type mismatch: signer declared {expected}, keypair is {actual}")]
    KeyTypeMismatch {
        /// Curve the signer was declared for
        expected: CryptoType,
        /// Curve of the keypair actually supplied
        actual: CryptoType,
    },
    /// Signature bytes are malformed or fail verification
    #[error("invalid signature")]
    InvalidSignature,
    /// Public key bytes are not valid for the curve
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),
    /// Underlying curve library failure
    #[error("cryptographic failure: {0}")]
    Crypto(String),
}

/// Result type for signing operations
pub type SignResult<T> = Result<T, SignError>;

/// Which pre-hash family an ecdsa payload belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainFamily {
    /// Substrate chains: BLAKE2b-256 pre-hash
    Substrate,
    /// Ethereum chains: Keccak-256 pre-hash
    Ethereum,
}

/// A signature tagged with its curve.
///
/// 64 bytes for sr25519/ed25519, 65 bytes (recoverable) for ecdsa.
/// Immutable once produced.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Signature {
    /// Schnorrkel signature
    Sr25519([u8; 64]),
    /// EdDSA signature
    Ed25519([u8; 64]),
    /// Recoverable ECDSA signature (r || s || recovery-id)
    Ecdsa([u8; 65]),
}

impl Signature {
    /// The curve this signature was produced on
    #[must_use]
    pub const fn crypto_type(&self) -> CryptoType {
        match self {
            Self::Sr25519(_) => CryptoType::Sr25519,
            Self::Ed25519(_) => CryptoType::Ed25519,
            Self::Ecdsa(_) => CryptoType::Ecdsa,
        }
    }

    /// Raw signature bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Sr25519(bytes) | Self::Ed25519(bytes) => bytes,
            Self::Ecdsa(bytes) => bytes,
        }
    }

    /// Rebuild a signature from raw bytes.
    ///
    /// # Errors
    /// Returns [`SignError::InvalidSignature`] if the length does not match
    /// the curve's signature size.
    pub fn from_bytes(crypto_type: CryptoType, bytes: &[u8]) -> SignResult<Self> {
        match crypto_type {
            CryptoType::Sr25519 => {
                let arr: [u8; 64] = bytes.try_into().map_err(|_| SignError::InvalidSignature)?;
                Ok(Self::Sr25519(arr))
            }
            CryptoType::Ed25519 => {
                let arr: [u8; 64] = bytes.try_into().map_err(|_| SignError::InvalidSignature)?;
                Ok(Self::Ed25519(arr))
            }
            CryptoType::Ecdsa => {
                let arr: [u8; 65] = bytes.try_into().map_err(|_| SignError::InvalidSignature)?;
                Ok(Self::Ecdsa(arr))
            }
        }
    }

    /// Hex rendering of the signature bytes
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sig({}, {}..)", self.crypto_type(), &self.to_hex()[..16])
    }
}

/// The real signing path: declared curve plus target chain family.
///
/// Stateless; every call borrows the keypair for exactly one signature.
#[derive(Debug, Clone, Copy)]
pub struct PayloadSigner {
    crypto_type: CryptoType,
    family: ChainFamily,
}

impl PayloadSigner {
    /// Signer for an explicit curve/family combination
    #[must_use]
    pub const fn new(crypto_type: CryptoType, family: ChainFamily) -> Self {
        Self {
            crypto_type,
            family,
        }
    }

    /// Substrate-chain signer for the given curve
    #[must_use]
    pub const fn substrate(crypto_type: CryptoType) -> Self {
        Self::new(crypto_type, ChainFamily::Substrate)
    }

    /// Ethereum-chain signer (always ecdsa)
    #[must_use]
    pub const fn ethereum() -> Self {
        Self::new(CryptoType::Ecdsa, ChainFamily::Ethereum)
    }

    /// The declared curve
    #[must_use]
    pub const fn crypto_type(&self) -> CryptoType {
        self.crypto_type
    }

    /// The declared chain family
    #[must_use]
    pub const fn family(&self) -> ChainFamily {
        self.family
    }

    /// Sign an arbitrary byte payload.
    ///
    /// # Errors
    /// Returns [`SignError::KeyTypeMismatch`] when the keypair's curve is
    /// not the declared one -- a programmer error that must fail fast, not
    /// produce a garbage signature. Curve-library failures surface as
    /// [`SignError::Crypto`].
    pub fn sign(&self, keypair: &KeyPair, message: &[u8]) -> SignResult<Signature> {
        if keypair.crypto_type() != self.crypto_type {
            return Err(SignError::KeyTypeMismatch {
                expected: self.crypto_type,
                actual: keypair.crypto_type(),
            });
        }
        dispatch_sign(keypair, self.family, message)
    }
}

// Shared low-level dispatch; the fee-estimation signer reuses this without
// sharing any public interface with the real signer.
pub(crate) fn dispatch_sign(
    keypair: &KeyPair,
    family: ChainFamily,
    message: &[u8],
) -> SignResult<Signature> {
    match keypair {
        KeyPair::Sr25519(pair) => {
            let context = signing_context(SIGNING_CONTEXT);
            Ok(Signature::Sr25519(
                pair.sign(context.bytes(message)).to_bytes(),
            ))
        }
        KeyPair::Ed25519(key) => Ok(Signature::Ed25519(key.sign(message).to_bytes())),
        KeyPair::Ecdsa(key) => {
            let prehash = ecdsa_prehash(family, message);
            let (signature, recovery_id) = key
                .sign_prehash_recoverable(&prehash)
                .map_err(|e| SignError::Crypto(e.to_string()))?;

            let mut out = [0u8; 65];
            out[..64].copy_from_slice(&signature.to_bytes());
            out[64] = recovery_id.to_byte();
            Ok(Signature::Ecdsa(out))
        }
    }
}

/// Verify a signature against a message and public key.
///
/// `family` selects the ecdsa pre-hash and is ignored for the other
/// curves.
///
/// # Errors
/// Returns [`SignError::InvalidPublicKey`] for malformed keys and
/// [`SignError::InvalidSignature`] when verification fails.
pub fn verify(
    signature: &Signature,
    message: &[u8],
    public_key: &[u8],
    family: ChainFamily,
) -> SignResult<()> {
    match signature {
        Signature::Sr25519(bytes) => {
            let key = Sr25519PublicKey::from_bytes(public_key)
                .map_err(|e| SignError::InvalidPublicKey(e.to_string()))?;
            let sig =
                Sr25519Signature::from_bytes(bytes).map_err(|_| SignError::InvalidSignature)?;
            key.verify_simple(SIGNING_CONTEXT, message, &sig)
                .map_err(|_| SignError::InvalidSignature)
        }
        Signature::Ed25519(bytes) => {
            let key_bytes: &[u8; 32] = public_key
                .try_into()
                .map_err(|_| SignError::InvalidPublicKey("expected 32 bytes".into()))?;
            let key = Ed25519VerifyingKey::from_bytes(key_bytes)
                .map_err(|e| SignError::InvalidPublicKey(e.to_string()))?;
            key.verify(message, &Ed25519Signature::from_bytes(bytes))
                .map_err(|_| SignError::InvalidSignature)
        }
        Signature::Ecdsa(bytes) => {
            let key = EcdsaVerifyingKey::from_sec1_bytes(public_key)
                .map_err(|e| SignError::InvalidPublicKey(e.to_string()))?;
            let sig =
                EcdsaSignature::from_slice(&bytes[..64]).map_err(|_| SignError::InvalidSignature)?;
            key.verify_prehash(&ecdsa_prehash(family, message), &sig)
                .map_err(|_| SignError::InvalidSignature)
        }
    }
}

/// Recover the compressed public key from a recoverable ecdsa signature.
///
/// # Errors
/// Returns [`SignError::KeyTypeMismatch`] for non-ecdsa signatures and
/// [`SignError::InvalidSignature`] when recovery fails.
pub fn recover_ecdsa_public_key(
    signature: &Signature,
    message: &[u8],
    family: ChainFamily,
) -> SignResult<Vec<u8>> {
    let Signature::Ecdsa(bytes) = signature else {
        return Err(SignError::KeyTypeMismatch {
            expected: CryptoType::Ecdsa,
            actual: signature.crypto_type(),
        });
    };

    let sig = EcdsaSignature::from_slice(&bytes[..64]).map_err(|_| SignError::InvalidSignature)?;
    let recovery_id = RecoveryId::from_byte(bytes[64]).ok_or(SignError::InvalidSignature)?;

    let key =
        EcdsaVerifyingKey::recover_from_prehash(&ecdsa_prehash(family, message), &sig, recovery_id)
            .map_err(|_| SignError::InvalidSignature)?;
    Ok(key.to_encoded_point(true).as_bytes().to_vec())
}

fn ecdsa_prehash(family: ChainFamily, message: &[u8]) -> [u8; 32] {
    match family {
        ChainFamily::Substrate => blake2b_256(message),
        ChainFamily::Ethereum => keccak_256(message),
    }
}
