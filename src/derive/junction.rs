//! Substrate derivation-path junctions.
//!
//! Grammar: `(//hard | /soft)* (///password)?`. One `/` introduces a soft
//! junction, a doubled `//` a hard junction, and a trailing `///password`
//! carries the seed password. A path that does not match the grammar is a
//! hard error, never a partial parse.

use crate::extrinsic::encode_compact_u64;
use crate::hashing::blake2b_256;

use super::{DeriveError, DeriveResult};

/// Chain-code length carried by every junction
pub const CHAIN_CODE_LEN: usize = 32;

/// One step of hierarchical key derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Junction {
    /// Soft derivation: the derived public key is computable from the
    /// parent public key.
    Soft([u8; CHAIN_CODE_LEN]),
    /// Hard derivation: severs the public-key relation to the parent.
    Hard([u8; CHAIN_CODE_LEN]),
}

impl Junction {
    /// Soft junction from a path segment
    #[must_use]
    pub fn soft(segment: &str) -> Self {
        Self::Soft(chain_code(segment))
    }

    /// Hard junction from a path segment
    #[must_use]
    pub fn hard(segment: &str) -> Self {
        Self::Hard(chain_code(segment))
    }

    /// The 32-byte chain code
    #[must_use]
    pub const fn chain_code(&self) -> &[u8; CHAIN_CODE_LEN] {
        match self {
            Self::Soft(cc) | Self::Hard(cc) => cc,
        }
    }

    /// Whether this is a hard junction
    #[must_use]
    pub const fn is_hard(&self) -> bool {
        matches!(self, Self::Hard(_))
    }
}

// Chain-code construction: numeric segments encode as a little-endian u64,
// string segments as length-prefixed bytes; encodings longer than 32 bytes
// collapse to their BLAKE2b-256 digest, shorter ones are zero-padded.
fn chain_code(segment: &str) -> [u8; CHAIN_CODE_LEN] {
    let mut cc = [0u8; CHAIN_CODE_LEN];

    if let Ok(index) = segment.parse::<u64>() {
        cc[..8].copy_from_slice(&index.to_le_bytes());
        return cc;
    }

    let mut encoded = Vec::with_capacity(segment.len() + 4);
    encode_compact_u64(segment.len() as u64, &mut encoded);
    encoded.extend_from_slice(segment.as_bytes());

    if encoded.len() > CHAIN_CODE_LEN {
        cc.copy_from_slice(&blake2b_256(&encoded));
    } else {
        cc[..encoded.len()].copy_from_slice(&encoded);
    }
    cc
}

/// A parsed derivation path: ordered junctions plus an optional password.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JunctionPath {
    junctions: Vec<Junction>,
    password: Option<String>,
}

impl JunctionPath {
    /// The empty path (no junctions, no password)
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            junctions: Vec::new(),
            password: None,
        }
    }

    /// Parse a derivation-path string.
    ///
    /// # Errors
    /// Returns [`DeriveError::MalformedPath`] on empty segments, stray
    /// separators, or an empty password.
    pub fn parse(path: &str) -> DeriveResult<Self> {
        if path.is_empty() {
            return Ok(Self::empty());
        }

        let (junction_part, password) = match path.find("///") {
            Some(idx) => {
                let password = &path[idx + 3..];
                if password.is_empty() {
                    return Err(DeriveError::MalformedPath(
                        "empty password after '///'".into(),
                    ));
                }
                (&path[..idx], Some(password.to_string()))
            }
            None => (path, None),
        };

        let mut junctions = Vec::new();
        let mut rest = junction_part;
        while !rest.is_empty() {
            let hard = if let Some(stripped) = rest.strip_prefix("//") {
                rest = stripped;
                true
            } else if let Some(stripped) = rest.strip_prefix('/') {
                rest = stripped;
                false
            } else {
                return Err(DeriveError::MalformedPath(format!(
                    "expected '/' or '//' at '{rest}'"
                )));
            };

            let end = rest.find('/').unwrap_or(rest.len());
            let segment = &rest[..end];
            if segment.is_empty() {
                return Err(DeriveError::MalformedPath("empty junction segment".into()));
            }

            junctions.push(if hard {
                Junction::hard(segment)
            } else {
                Junction::soft(segment)
            });
            rest = &rest[end..];
        }

        Ok(Self {
            junctions,
            password,
        })
    }

    /// The junctions in application order
    #[must_use]
    pub fn junctions(&self) -> &[Junction] {
        &self.junctions
    }

    /// The `///password` suffix, if present
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Whether the path carries no junctions and no password
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.junctions.is_empty() && self.password.is_none()
    }
}
