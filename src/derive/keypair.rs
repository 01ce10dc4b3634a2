//! Multi-curve keypairs.
//!
//! `KeyPair` is a sum type over the three supported curves so every
//! dispatch site matches exhaustively; adding a curve is a compile-time
//! exercise rather than a runtime assertion.

use ed25519_dalek::SigningKey as Ed25519SigningKey;
use k256::ecdsa::SigningKey as EcdsaSigningKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use schnorrkel::derive::{ChainCode, Derivation};
use schnorrkel::{ExpansionMode, Keypair as Sr25519Keypair, MiniSecretKey};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::extrinsic::encode_compact_u64;
use crate::hashing::blake2b_256;

use super::{DeriveError, DeriveResult, Junction};

/// Domain-separation tag for ed25519 hard junctions
const ED25519_HDKD_TAG: &str = "Ed25519HDKD";
/// Domain-separation tag for secp256k1 hard junctions
const SECP256K1_HDKD_TAG: &str = "Secp256k1HDKD";

/// The signature algorithm an account uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CryptoType {
    /// Schnorr on Ristretto255 (Substrate native)
    Sr25519,
    /// EdDSA on Curve25519
    Ed25519,
    /// ECDSA on secp256k1
    Ecdsa,
}

impl fmt::Display for CryptoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sr25519 => "sr25519",
            Self::Ed25519 => "ed25519",
            Self::Ecdsa => "ecdsa",
        };
        write!(f, "{name}")
    }
}

/// A curve keypair: private key material plus the derived public key.
///
/// Owned exclusively by the signing context that created it. There is no
/// `Clone`, no `Debug` on the secret halves, and no serde; key material
/// leaves this type only through the signing functions.
pub enum KeyPair {
    /// Schnorrkel keypair
    Sr25519(Sr25519Keypair),
    /// Ed25519 signing key
    Ed25519(Ed25519SigningKey),
    /// secp256k1 ECDSA signing key
    Ecdsa(EcdsaSigningKey),
}

impl KeyPair {
    /// Build a keypair from seed bytes (the first 32 are used).
    ///
    /// # Errors
    /// Returns [`DeriveError::InvalidSeed`] if the seed is shorter than 32
    /// bytes or rejected by the curve library.
    pub fn from_seed(crypto_type: CryptoType, seed: &[u8]) -> DeriveResult<Self> {
        if seed.len() < 32 {
            return Err(DeriveError::InvalidSeed(format!(
                "need at least 32 bytes, got {}",
                seed.len()
            )));
        }
        let mut key_material = [0u8; 32];
        key_material.copy_from_slice(&seed[..32]);

        match crypto_type {
            CryptoType::Sr25519 => {
                let mini = MiniSecretKey::from_bytes(&key_material)
                    .map_err(|e| DeriveError::InvalidSeed(e.to_string()))?;
                Ok(Self::Sr25519(mini.expand_to_keypair(ExpansionMode::Ed25519)))
            }
            CryptoType::Ed25519 => Ok(Self::Ed25519(Ed25519SigningKey::from_bytes(&key_material))),
            CryptoType::Ecdsa => {
                let key = EcdsaSigningKey::from_slice(&key_material)
                    .map_err(|e| DeriveError::InvalidSeed(e.to_string()))?;
                Ok(Self::Ecdsa(key))
            }
        }
    }

    /// Apply junction derivations in order, consuming the parent key.
    ///
    /// Soft derivation exists only on sr25519; requesting it on ed25519 or
    /// ecdsa fails before any key material is produced.
    ///
    /// # Errors
    /// Returns [`DeriveError::UnsupportedDerivation`] for soft junctions on
    /// curves without a soft-derivation algebra, or
    /// [`DeriveError::InvalidSeed`] if a derived scalar is rejected.
    pub fn derive(self, junctions: &[Junction]) -> DeriveResult<Self> {
        let mut current = self;
        for junction in junctions {
            current = current.derive_junction(junction)?;
        }
        Ok(current)
    }

    fn derive_junction(self, junction: &Junction) -> DeriveResult<Self> {
        let cc = junction.chain_code();
        match self {
            Self::Sr25519(pair) => {
                let derived = match junction {
                    Junction::Hard(_) => {
                        let (mini, _) =
                            pair.secret.hard_derive_mini_secret_key(Some(ChainCode(*cc)), b"");
                        mini.expand_to_keypair(ExpansionMode::Ed25519)
                    }
                    Junction::Soft(_) => pair.derived_key_simple(ChainCode(*cc), b"").0,
                };
                Ok(Self::Sr25519(derived))
            }
            Self::Ed25519(key) => {
                if !junction.is_hard() {
                    return Err(DeriveError::UnsupportedDerivation(CryptoType::Ed25519));
                }
                let seed = hard_junction_seed(ED25519_HDKD_TAG, &key.to_bytes(), cc);
                Ok(Self::Ed25519(Ed25519SigningKey::from_bytes(&seed)))
            }
            Self::Ecdsa(key) => {
                if !junction.is_hard() {
                    return Err(DeriveError::UnsupportedDerivation(CryptoType::Ecdsa));
                }
                let secret: [u8; 32] = key.to_bytes().into();
                let seed = hard_junction_seed(SECP256K1_HDKD_TAG, &secret, cc);
                let derived = EcdsaSigningKey::from_slice(&seed)
                    .map_err(|e| DeriveError::InvalidSeed(e.to_string()))?;
                Ok(Self::Ecdsa(derived))
            }
        }
    }

    /// The curve this keypair belongs to
    #[must_use]
    pub const fn crypto_type(&self) -> CryptoType {
        match self {
            Self::Sr25519(_) => CryptoType::Sr25519,
            Self::Ed25519(_) => CryptoType::Ed25519,
            Self::Ecdsa(_) => CryptoType::Ecdsa,
        }
    }

    /// Public-key bytes: 32 for sr25519/ed25519, 33 (SEC1 compressed) for
    /// ecdsa.
    #[must_use]
    pub fn public_key(&self) -> Vec<u8> {
        match self {
            Self::Sr25519(pair) => pair.public.to_bytes().to_vec(),
            Self::Ed25519(key) => key.verifying_key().to_bytes().to_vec(),
            Self::Ecdsa(key) => key
                .verifying_key()
                .to_encoded_point(true)
                .as_bytes()
                .to_vec(),
        }
    }

    /// The 32-byte on-chain account id: the public key itself for
    /// sr25519/ed25519, BLAKE2b-256 of the compressed public key for ecdsa.
    #[must_use]
    pub fn account_id(&self) -> [u8; 32] {
        match self {
            Self::Sr25519(pair) => pair.public.to_bytes(),
            Self::Ed25519(key) => key.verifying_key().to_bytes(),
            Self::Ecdsa(_) => blake2b_256(&self.public_key()),
        }
    }
}

// Never expose secret halves through Debug.
impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("crypto_type", &self.crypto_type())
            .field("public_key", &hex::encode(self.public_key()))
            .finish()
    }
}

/// Derive a keypair from a seed and an ordered junction list.
///
/// # Errors
/// Propagates [`KeyPair::from_seed`] and [`KeyPair::derive`] failures.
pub fn create_keypair(
    seed: &[u8],
    crypto_type: CryptoType,
    junctions: &[Junction],
) -> DeriveResult<KeyPair> {
    KeyPair::from_seed(crypto_type, seed)?.derive(junctions)
}

// Hard-junction seed for curves without a native derivation algebra:
// BLAKE2b-256 of the SCALE-encoded (tag, parent_seed, chain_code) tuple.
fn hard_junction_seed(tag: &str, seed: &[u8; 32], cc: &[u8; 32]) -> [u8; 32] {
    let mut data = Vec::with_capacity(tag.len() + 68);
    encode_compact_u64(tag.len() as u64, &mut data);
    data.extend_from_slice(tag.as_bytes());
    data.extend_from_slice(seed);
    data.extend_from_slice(cc);
    blake2b_256(&data)
}
