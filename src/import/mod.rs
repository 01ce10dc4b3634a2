//! Account import orchestration.
//!
//! The unit-of-work boundary exposed to storage and UI layers: raw
//! entropy plus a derivation-path string in, everything needed to persist
//! an account out. Pure composition of the derivation steps -- errors
//! propagate from the first failing sub-step without extra wrapping, and
//! nothing here touches I/O. External key storage enters only as an
//! explicit [`KeyStore`] capability, never a process-wide singleton.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use zeroize::Zeroizing;

use crate::derive::{
    create_keypair, entropy_to_mnemonic, mnemonic_to_entropy, parse_mnemonic, seed_from_entropy,
    seed_from_mnemonic, CryptoType, DeriveResult, JunctionPath, KeyPair, SecretSeed,
};

/// Opaque failure reported by a [`KeyStore`] implementation
#[derive(Debug, Error)]
#[error("key storage failure: {0}")]
pub struct KeyStoreError(pub String);

/// The external key-storage collaborator.
///
/// Implementations live outside this crate; the core only consumes the
/// shape. Tags are deterministic strings constructed by the caller.
pub trait KeyStore {
    /// Fetch raw key material by tag, `None` if absent.
    ///
    /// # Errors
    /// Returns [`KeyStoreError`] on storage failure.
    fn fetch_key(&self, tag: &str) -> Result<Option<Vec<u8>>, KeyStoreError>;

    /// Store raw key material under a tag, replacing any existing entry.
    ///
    /// # Errors
    /// Returns [`KeyStoreError`] on storage failure.
    fn store(&mut self, tag: &str, bytes: &[u8]) -> Result<(), KeyStoreError>;
}

/// Everything produced by an account import.
///
/// Holds live secret material; keep it in the smallest possible scope.
/// Entropy and seed buffers zero themselves on drop.
pub struct AccountImport {
    /// The entropy the account derives from
    pub entropy: Zeroizing<Vec<u8>>,
    /// The parsed derivation path
    pub path: JunctionPath,
    /// The derived seed
    pub seed: SecretSeed,
    /// The derived keypair
    pub keypair: KeyPair,
}

impl AccountImport {
    /// Non-secret summary for display and persistence metadata
    #[must_use]
    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            crypto_type: self.keypair.crypto_type(),
            public_key: hex::encode(self.keypair.public_key()),
            account_id: hex::encode(self.keypair.account_id()),
        }
    }

    /// Persist the seed into external key storage under `tag`.
    ///
    /// # Errors
    /// Propagates the store's [`KeyStoreError`].
    pub fn persist(&self, store: &mut dyn KeyStore, tag: &str) -> Result<(), KeyStoreError> {
        store.store(tag, self.seed.as_bytes())
    }
}

/// Non-secret account description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    /// Signature algorithm
    pub crypto_type: CryptoType,
    /// Public key (hex)
    pub public_key: String,
    /// 32-byte account id (hex)
    pub account_id: String,
}

/// Import an account from raw entropy and a derivation-path string.
///
/// Seed selection follows the curve family: sr25519 substrate accounts
/// derive from the entropy bytes, ed25519/ecdsa accounts from the BIP-39
/// mnemonic sentence. A `///password` path suffix feeds the seed
/// derivation in both cases.
///
/// # Errors
/// Fails with whatever the first failing derivation step reports --
/// malformed path, bad entropy, unsupported junction.
pub fn import_from_entropy(
    entropy: &[u8],
    derivation_path: &str,
    crypto_type: CryptoType,
) -> DeriveResult<AccountImport> {
    let path = JunctionPath::parse(derivation_path)?;
    let password = path.password().unwrap_or("");

    let seed = match crypto_type {
        CryptoType::Sr25519 => seed_from_entropy(entropy, password)?,
        CryptoType::Ed25519 | CryptoType::Ecdsa => {
            let mnemonic = entropy_to_mnemonic(entropy)?;
            seed_from_mnemonic(&mnemonic, password)
        }
    };

    let keypair = create_keypair(seed.key_material(), crypto_type, path.junctions())?;
    debug!(
        %crypto_type,
        junctions = path.junctions().len(),
        account_id = %hex::encode(keypair.account_id()),
        "imported account from entropy"
    );

    Ok(AccountImport {
        entropy: Zeroizing::new(entropy.to_vec()),
        path,
        seed,
        keypair,
    })
}

/// Import an account from a mnemonic phrase.
///
/// # Errors
/// Propagates mnemonic validation and [`import_from_entropy`] failures.
pub fn import_from_mnemonic(
    phrase: &str,
    derivation_path: &str,
    crypto_type: CryptoType,
) -> DeriveResult<AccountImport> {
    let mnemonic = parse_mnemonic(phrase)?;
    let entropy = mnemonic_to_entropy(&mnemonic);
    import_from_entropy(&entropy, derivation_path, crypto_type)
}

/// Rebuild a keypair from seed material previously persisted in a
/// [`KeyStore`].
///
/// Returns `None` when nothing is stored under `tag`.
///
/// # Errors
/// Propagates storage failures as [`KeyStoreError`] text inside
/// [`crate::derive::DeriveError::InvalidSeed`], and derivation failures
/// unchanged.
pub fn load_keypair(
    store: &dyn KeyStore,
    tag: &str,
    crypto_type: CryptoType,
    derivation_path: &str,
) -> DeriveResult<Option<KeyPair>> {
    let path = JunctionPath::parse(derivation_path)?;
    let Some(seed_bytes) = store
        .fetch_key(tag)
        .map_err(|e| crate::derive::DeriveError::InvalidSeed(e.to_string()))?
    else {
        return Ok(None);
    };

    let seed = SecretSeed::new(seed_bytes);
    create_keypair(seed.key_material(), crypto_type, path.junctions()).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::ss58_encode;
    use crate::derive::DeriveError;
    use std::collections::HashMap;

    // The Substrate development phrase; //Alice etc. derive the well-known
    // dev accounts from it.
    const DEV_PHRASE: &str =
        "bottom drive obey lake curtain smoke basket hold race lonely fit walk";
    const ALICE_PUBLIC: &str = "d43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d";
    const ALICE_SUBSTRATE: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";

    #[derive(Default)]
    struct MemoryStore(HashMap<String, Vec<u8>>);

    impl KeyStore for MemoryStore {
        fn fetch_key(&self, tag: &str) -> Result<Option<Vec<u8>>, KeyStoreError> {
            Ok(self.0.get(tag).cloned())
        }

        fn store(&mut self, tag: &str, bytes: &[u8]) -> Result<(), KeyStoreError> {
            self.0.insert(tag.to_string(), bytes.to_vec());
            Ok(())
        }
    }

    #[test]
    fn test_alice_dev_account() {
        // End to end: dev phrase -> entropy seed -> hard junction ->
        // sr25519 keypair -> SS58, landing on the canonical Alice account.
        let import =
            import_from_mnemonic(DEV_PHRASE, "//Alice", CryptoType::Sr25519).unwrap();

        assert_eq!(hex::encode(import.keypair.public_key()), ALICE_PUBLIC);
        assert_eq!(
            ss58_encode(&import.keypair.account_id(), 42).unwrap(),
            ALICE_SUBSTRATE
        );
    }

    #[test]
    fn test_import_is_deterministic() {
        let entropy = [3u8; 32];
        for crypto_type in [CryptoType::Sr25519, CryptoType::Ed25519, CryptoType::Ecdsa] {
            let a = import_from_entropy(&entropy, "//stash", crypto_type).unwrap();
            let b = import_from_entropy(&entropy, "//stash", crypto_type).unwrap();
            assert_eq!(a.keypair.public_key(), b.keypair.public_key());
            assert_eq!(a.seed.as_bytes(), b.seed.as_bytes());
        }
    }

    #[test]
    fn test_path_password_changes_keys() {
        let entropy = [3u8; 32];
        let plain = import_from_entropy(&entropy, "//0", CryptoType::Sr25519).unwrap();
        let guarded = import_from_entropy(&entropy, "//0///pw", CryptoType::Sr25519).unwrap();
        assert_ne!(plain.keypair.public_key(), guarded.keypair.public_key());
    }

    #[test]
    fn test_seed_path_depends_on_curve_family() {
        // sr25519 derives from entropy, ed25519 from the mnemonic
        // sentence: the seeds must differ for identical input.
        let entropy = [3u8; 32];
        let sr = import_from_entropy(&entropy, "", CryptoType::Sr25519).unwrap();
        let ed = import_from_entropy(&entropy, "", CryptoType::Ed25519).unwrap();
        assert_ne!(sr.seed.as_bytes(), ed.seed.as_bytes());
    }

    #[test]
    fn test_first_failing_step_reports() {
        let entropy = [3u8; 32];

        // Malformed path fails before any seed derivation.
        assert!(matches!(
            import_from_entropy(&entropy, "//", CryptoType::Sr25519),
            Err(DeriveError::MalformedPath(_))
        ));

        // Bad entropy fails at the seed step.
        assert!(matches!(
            import_from_entropy(&[0u8; 7], "", CryptoType::Sr25519),
            Err(DeriveError::InvalidEntropy(7))
        ));

        // Soft junction on ed25519 fails at keypair creation.
        assert!(matches!(
            import_from_entropy(&entropy, "/soft", CryptoType::Ed25519),
            Err(DeriveError::UnsupportedDerivation(CryptoType::Ed25519))
        ));
    }

    #[test]
    fn test_summary_has_no_secret_material() {
        let entropy = [3u8; 32];
        let import = import_from_entropy(&entropy, "//0", CryptoType::Ecdsa).unwrap();

        let summary = import.summary();
        assert_eq!(summary.crypto_type, CryptoType::Ecdsa);
        assert_eq!(summary.public_key.len(), 66);
        assert_eq!(summary.account_id.len(), 64);

        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains(&hex::encode(import.seed.as_bytes())));
        assert!(!json.contains(&hex::encode(&*import.entropy)));
    }

    #[test]
    fn test_persist_and_reload_roundtrip() {
        let entropy = [3u8; 32];
        let mut store = MemoryStore::default();

        let import = import_from_entropy(&entropy, "//stash", CryptoType::Sr25519).unwrap();
        import.persist(&mut store, "wallet-1:account-0:substrate").unwrap();

        let reloaded = load_keypair(
            &store,
            "wallet-1:account-0:substrate",
            CryptoType::Sr25519,
            "//stash",
        )
        .unwrap()
        .expect("seed was stored");
        assert_eq!(reloaded.public_key(), import.keypair.public_key());
    }

    #[test]
    fn test_load_missing_tag_is_none() {
        let store = MemoryStore::default();
        let result = load_keypair(&store, "absent", CryptoType::Sr25519, "").unwrap();
        assert!(result.is_none());
    }
}
