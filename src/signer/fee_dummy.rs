//! Deterministic signer for fee-estimation dry runs.
//!
//! Fee calculation only needs an extrinsic of the correct byte length, so
//! dry runs sign with a fixed, non-secret seed. This lives in a separate
//! type that shares no interface with [`PayloadSigner`](super::PayloadSigner):
//! nothing that accepts a real signer can be handed this one, which keeps
//! the dummy path structurally unreachable from broadcast code.

use crate::derive::{CryptoType, KeyPair};

use super::{dispatch_sign, ChainFamily, SignError, SignResult, Signature};

// Fixed, publicly known seed. Anything produced from it is non-authoritative.
const FEE_ESTIMATION_SEED: [u8; 32] = [1u8; 32];

/// Produces structurally valid, non-authoritative signatures for fee
/// dry runs.
#[derive(Debug, Clone, Copy)]
pub struct FeeEstimationSigner {
    crypto_type: CryptoType,
    family: ChainFamily,
}

impl FeeEstimationSigner {
    /// Dry-run signer for an explicit curve/family combination
    #[must_use]
    pub const fn new(crypto_type: CryptoType, family: ChainFamily) -> Self {
        Self {
            crypto_type,
            family,
        }
    }

    /// Substrate-chain dry-run signer for the given curve
    #[must_use]
    pub const fn substrate(crypto_type: CryptoType) -> Self {
        Self::new(crypto_type, ChainFamily::Substrate)
    }

    /// The curve this dry-run signer emulates
    #[must_use]
    pub const fn crypto_type(&self) -> CryptoType {
        self.crypto_type
    }

    /// Sign a payload with the fixed fee-estimation seed.
    ///
    /// The result has exactly the byte length of a real signature of the
    /// same crypto type and must never reach network submission.
    ///
    /// # Errors
    /// Returns [`SignError::Crypto`] if the fixed seed is rejected by the
    /// curve library.
    pub fn sign_for_fee(&self, message: &[u8]) -> SignResult<Signature> {
        let keypair = KeyPair::from_seed(self.crypto_type, &FEE_ESTIMATION_SEED)
            .map_err(|e| SignError::Crypto(e.to_string()))?;
        dispatch_sign(&keypair, self.family, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signer::PayloadSigner;

    const MESSAGE: &[u8] = b"fee estimation payload";

    #[test]
    fn test_fee_signature_matches_real_length() {
        for crypto_type in [CryptoType::Sr25519, CryptoType::Ed25519, CryptoType::Ecdsa] {
            let real_pair = KeyPair::from_seed(crypto_type, &[7u8; 32]).unwrap();
            let real = PayloadSigner::substrate(crypto_type)
                .sign(&real_pair, MESSAGE)
                .unwrap();
            let dummy = FeeEstimationSigner::substrate(crypto_type)
                .sign_for_fee(MESSAGE)
                .unwrap();
            assert_eq!(dummy.as_bytes().len(), real.as_bytes().len());
            assert_eq!(dummy.crypto_type(), crypto_type);
        }
    }

    #[test]
    fn test_fee_signature_deterministic_for_deterministic_curves() {
        for crypto_type in [CryptoType::Ed25519, CryptoType::Ecdsa] {
            let signer = FeeEstimationSigner::substrate(crypto_type);
            let a = signer.sign_for_fee(MESSAGE).unwrap();
            let b = signer.sign_for_fee(MESSAGE).unwrap();
            assert_eq!(a.as_bytes(), b.as_bytes());
        }
    }

    #[test]
    fn test_fee_signature_is_not_a_real_account_signature() {
        // The dummy seed is public; a real account's key never matches it.
        let real_pair = KeyPair::from_seed(CryptoType::Ed25519, &[7u8; 32]).unwrap();
        let dummy = FeeEstimationSigner::substrate(CryptoType::Ed25519)
            .sign_for_fee(MESSAGE)
            .unwrap();
        assert!(crate::signer::verify(
            &dummy,
            MESSAGE,
            &real_pair.public_key(),
            ChainFamily::Substrate
        )
        .is_err());
    }
}
