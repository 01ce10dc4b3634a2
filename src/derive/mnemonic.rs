//! BIP-39 mnemonic and seed handling.
//!
//! Two seed derivations coexist and are deliberately kept apart:
//! - [`seed_from_mnemonic`]: the BIP-39 standard, PBKDF2-HMAC-SHA512 over
//!   the mnemonic *sentence* (used for ed25519 and secp256k1 accounts)
//! - [`seed_from_entropy`]: the Substrate variant, PBKDF2-HMAC-SHA512 over
//!   the raw *entropy bytes* (used for sr25519 substrate accounts)
//!
//! Interchanging the two produces valid-looking but wrong keys, which is
//! why they are separate functions rather than a flag.

use bip39::{Language, Mnemonic};
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha512;
use std::fmt;
use zeroize::{Zeroize, Zeroizing};

use super::{DeriveError, DeriveResult};

/// PBKDF2 round count fixed by BIP-39
const SEED_ROUNDS: u32 = 2048;

/// Seed length in bytes produced by both derivations
pub(crate) const SEED_LEN: usize = 64;

/// Supported mnemonic word counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordCount {
    /// 12 words (128-bit entropy)
    Twelve = 12,
    /// 15 words (160-bit entropy)
    Fifteen = 15,
    /// 18 words (192-bit entropy)
    Eighteen = 18,
    /// 21 words (224-bit entropy)
    TwentyOne = 21,
    /// 24 words (256-bit entropy)
    TwentyFour = 24,
}

impl WordCount {
    /// Entropy length in bytes for this word count
    #[must_use]
    pub const fn entropy_bytes(self) -> usize {
        match self {
            Self::Twelve => 16,
            Self::Fifteen => 20,
            Self::Eighteen => 24,
            Self::TwentyOne => 28,
            Self::TwentyFour => 32,
        }
    }

    /// Map a word count to the enum
    ///
    /// # Errors
    /// Returns [`DeriveError::InvalidWordCount`] for unsupported counts.
    pub const fn from_count(count: usize) -> DeriveResult<Self> {
        match count {
            12 => Ok(Self::Twelve),
            15 => Ok(Self::Fifteen),
            18 => Ok(Self::Eighteen),
            21 => Ok(Self::TwentyOne),
            24 => Ok(Self::TwentyFour),
            other => Err(DeriveError::InvalidWordCount(other)),
        }
    }
}

/// A derived seed with zero-on-drop backing memory.
///
/// Both seed derivations produce 64 bytes; curve key material uses the
/// first 32. The buffer is wiped when the value goes out of scope,
/// including on error paths.
pub struct SecretSeed(Zeroizing<Vec<u8>>);

impl SecretSeed {
    /// Wrap raw seed bytes
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(Zeroizing::new(bytes))
    }

    /// The full seed
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The leading 32 bytes used as curve key material
    #[must_use]
    pub fn key_material(&self) -> &[u8] {
        &self.0[..self.0.len().min(32)]
    }

    /// Seed length in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the seed is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Never print seed material.
impl fmt::Debug for SecretSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretSeed")
            .field("len", &self.0.len())
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Generate a new random mnemonic with the given word count.
///
/// Entropy comes from the OS CSPRNG; this is the only randomized step in
/// account creation, everything downstream is deterministic.
#[must_use]
pub fn generate_mnemonic(word_count: WordCount) -> Mnemonic {
    let mut entropy = [0u8; 32];
    let len = word_count.entropy_bytes();
    rand::rngs::OsRng.fill_bytes(&mut entropy[..len]);

    let mnemonic = Mnemonic::from_entropy_in(Language::English, &entropy[..len])
        .expect("entropy length is valid for the requested word count");
    entropy.zeroize();
    mnemonic
}

/// Parse and validate a mnemonic phrase.
///
/// Whitespace is normalized before validation, so phrases copied with
/// irregular spacing still parse.
///
/// # Errors
/// Returns [`DeriveError::InvalidWordCount`], [`DeriveError::UnknownWord`]
/// or [`DeriveError::InvalidChecksum`] on malformed input.
pub fn parse_mnemonic(phrase: &str) -> DeriveResult<Mnemonic> {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    WordCount::from_count(words.len())?;

    Mnemonic::parse_in(Language::English, words.join(" ")).map_err(map_bip39_error)
}

/// Build a mnemonic from raw entropy bytes.
///
/// # Errors
/// Returns [`DeriveError::InvalidEntropy`] if the length does not map to
/// a supported word count.
pub fn entropy_to_mnemonic(entropy: &[u8]) -> DeriveResult<Mnemonic> {
    if !matches!(entropy.len(), 16 | 20 | 24 | 28 | 32) {
        return Err(DeriveError::InvalidEntropy(entropy.len()));
    }
    Mnemonic::from_entropy_in(Language::English, entropy).map_err(map_bip39_error)
}

/// Extract the entropy bytes a mnemonic encodes.
///
/// The length varies with the word count (12 words -> 16 bytes, 24 words
/// -> 32 bytes); callers must not assume a fixed size.
#[must_use]
pub fn mnemonic_to_entropy(mnemonic: &Mnemonic) -> Zeroizing<Vec<u8>> {
    Zeroizing::new(mnemonic.to_entropy())
}

/// BIP-39 seed: PBKDF2-HMAC-SHA512 over the mnemonic sentence with salt
/// `"mnemonic" + password`, 2048 rounds.
#[must_use]
pub fn seed_from_mnemonic(mnemonic: &Mnemonic, password: &str) -> SecretSeed {
    SecretSeed::new(mnemonic.to_seed(password).to_vec())
}

/// Substrate seed: PBKDF2-HMAC-SHA512 over the raw entropy bytes with salt
/// `"mnemonic" + password`, 2048 rounds.
///
/// This is what sr25519 substrate accounts derive their mini secret from.
/// It is NOT the BIP-39 sentence derivation and the two never agree.
///
/// # Errors
/// Returns [`DeriveError::InvalidEntropy`] for unsupported entropy lengths.
pub fn seed_from_entropy(entropy: &[u8], password: &str) -> DeriveResult<SecretSeed> {
    if !matches!(entropy.len(), 16 | 20 | 24 | 28 | 32) {
        return Err(DeriveError::InvalidEntropy(entropy.len()));
    }

    let salt = Zeroizing::new(format!("mnemonic{password}"));
    let mut seed = Zeroizing::new(vec![0u8; SEED_LEN]);
    pbkdf2_hmac::<Sha512>(entropy, salt.as_bytes(), SEED_ROUNDS, &mut seed);

    Ok(SecretSeed(seed))
}

fn map_bip39_error(error: bip39::Error) -> DeriveError {
    match error {
        bip39::Error::BadWordCount(count) => DeriveError::InvalidWordCount(count),
        bip39::Error::UnknownWord(_) => DeriveError::UnknownWord,
        bip39::Error::InvalidChecksum => DeriveError::InvalidChecksum,
        bip39::Error::BadEntropyBitCount(bits) => DeriveError::InvalidEntropy(bits / 8),
        other => DeriveError::InvalidPhrase(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Standard test mnemonics (from the BIP-39 reference vectors)
    const TEST_MNEMONIC_12: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
    const TEST_MNEMONIC_24: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon art";

    #[test]
    fn test_generate_all_word_counts() {
        for (count, entropy_len) in [
            (WordCount::Twelve, 16),
            (WordCount::Fifteen, 20),
            (WordCount::Eighteen, 24),
            (WordCount::TwentyOne, 28),
            (WordCount::TwentyFour, 32),
        ] {
            let mnemonic = generate_mnemonic(count);
            assert_eq!(mnemonic.word_count(), count as usize);
            assert_eq!(mnemonic_to_entropy(&mnemonic).len(), entropy_len);
        }
    }

    #[test]
    fn test_roundtrip_all_word_counts() {
        for count in [
            WordCount::Twelve,
            WordCount::Fifteen,
            WordCount::Eighteen,
            WordCount::TwentyOne,
            WordCount::TwentyFour,
        ] {
            let mnemonic = generate_mnemonic(count);
            let entropy = mnemonic_to_entropy(&mnemonic);
            let rebuilt = entropy_to_mnemonic(&entropy).unwrap();
            assert_eq!(rebuilt.to_string(), mnemonic.to_string());
        }
    }

    #[test]
    fn test_unique_generation() {
        let a = generate_mnemonic(WordCount::Twelve);
        let b = generate_mnemonic(WordCount::Twelve);
        assert_ne!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_entropy_roundtrip_12_words() {
        let mnemonic = parse_mnemonic(TEST_MNEMONIC_12).unwrap();
        let entropy = mnemonic_to_entropy(&mnemonic);
        assert_eq!(&**entropy, &[0u8; 16]);

        let rebuilt = entropy_to_mnemonic(&entropy).unwrap();
        assert_eq!(rebuilt.to_string(), TEST_MNEMONIC_12);
    }

    #[test]
    fn test_entropy_roundtrip_24_words() {
        let mnemonic = parse_mnemonic(TEST_MNEMONIC_24).unwrap();
        let entropy = mnemonic_to_entropy(&mnemonic);
        assert_eq!(entropy.len(), 32);

        let rebuilt = entropy_to_mnemonic(&entropy).unwrap();
        assert_eq!(rebuilt.to_string(), TEST_MNEMONIC_24);
    }

    #[test]
    fn test_entropy_length_follows_word_count() {
        // 12- and 24-word mnemonics must not collapse to one entropy size.
        let e12 = mnemonic_to_entropy(&parse_mnemonic(TEST_MNEMONIC_12).unwrap());
        let e24 = mnemonic_to_entropy(&parse_mnemonic(TEST_MNEMONIC_24).unwrap());
        assert_eq!(e12.len(), 16);
        assert_eq!(e24.len(), 32);
    }

    #[test]
    fn test_parse_normalizes_whitespace() {
        let messy = format!("  {}  ", TEST_MNEMONIC_12.replace(' ', "   "));
        let mnemonic = parse_mnemonic(&messy).unwrap();
        assert_eq!(mnemonic.to_string(), TEST_MNEMONIC_12);
    }

    #[test]
    fn test_parse_rejects_word_count() {
        assert!(matches!(
            parse_mnemonic("abandon abandon abandon"),
            Err(DeriveError::InvalidWordCount(3))
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_word() {
        let phrase = TEST_MNEMONIC_12.replace("about", "zzzzzz");
        assert!(matches!(
            parse_mnemonic(&phrase),
            Err(DeriveError::UnknownWord)
        ));
    }

    #[test]
    fn test_parse_rejects_bad_checksum() {
        // Valid words, wrong final word for this entropy.
        let phrase = TEST_MNEMONIC_12.replace("about", "abandon");
        assert!(matches!(
            parse_mnemonic(&phrase),
            Err(DeriveError::InvalidChecksum)
        ));
    }

    #[test]
    fn test_entropy_to_mnemonic_rejects_bad_length() {
        assert!(matches!(
            entropy_to_mnemonic(&[0u8; 17]),
            Err(DeriveError::InvalidEntropy(17))
        ));
    }

    #[test]
    fn test_bip39_seed_reference_vectors() {
        let mnemonic = parse_mnemonic(TEST_MNEMONIC_12).unwrap();

        let plain = seed_from_mnemonic(&mnemonic, "");
        assert_eq!(
            hex::encode(plain.as_bytes()),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1\
             9a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
        );

        let trezor = seed_from_mnemonic(&mnemonic, "TREZOR");
        assert_eq!(
            hex::encode(trezor.as_bytes()),
            "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e5349553\
             1f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04"
        );
    }

    #[test]
    fn test_substrate_seed_is_not_bip39_seed() {
        let mnemonic = parse_mnemonic(TEST_MNEMONIC_12).unwrap();
        let entropy = mnemonic_to_entropy(&mnemonic);

        let substrate = seed_from_entropy(&entropy, "").unwrap();
        let bip39 = seed_from_mnemonic(&mnemonic, "");
        assert_eq!(substrate.len(), SEED_LEN);
        assert_ne!(substrate.as_bytes(), bip39.as_bytes());
    }

    #[test]
    fn test_substrate_seed_deterministic() {
        let entropy = [7u8; 32];
        let a = seed_from_entropy(&entropy, "pw").unwrap();
        let b = seed_from_entropy(&entropy, "pw").unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());

        let c = seed_from_entropy(&entropy, "other").unwrap();
        assert_ne!(a.as_bytes(), c.as_bytes());
    }

    #[test]
    fn test_substrate_seed_rejects_bad_entropy() {
        assert!(seed_from_entropy(&[0u8; 15], "").is_err());
        assert!(seed_from_entropy(&[0u8; 33], "").is_err());
    }

    #[test]
    fn test_seed_key_material_is_32_bytes() {
        let mnemonic = parse_mnemonic(TEST_MNEMONIC_12).unwrap();
        let seed = seed_from_mnemonic(&mnemonic, "");
        assert_eq!(seed.key_material().len(), 32);
        assert_eq!(seed.key_material(), &seed.as_bytes()[..32]);
    }

    #[test]
    fn test_debug_does_not_leak_seed() {
        let mnemonic = parse_mnemonic(TEST_MNEMONIC_12).unwrap();
        let seed = seed_from_mnemonic(&mnemonic, "");
        let output = format!("{seed:?}");
        assert!(output.contains("REDACTED"));
        assert!(!output.contains("5eb00b"));
    }
}
