//! Algorithm identifiers and the descriptor table behind name dispatch.
//!
//! Each identifier maps to a [`Descriptor`]: the primitive a provider has to
//! compute, and optionally how many leading bytes of that primitive's output
//! form the announced digest. Adding an algorithm is a table entry.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::DigestError;

/// Largest primitive output; sizes the scratch buffer used during dispatch.
pub const MAX_DIGEST_LEN: usize = 64;

/// An untruncated digest computation executed by a provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl Primitive {
    pub const ALL: [Primitive; 6] = [
        Self::Md5,
        Self::Sha1,
        Self::Sha224,
        Self::Sha256,
        Self::Sha384,
        Self::Sha512,
    ];

    /// Human-readable name, distinct from the identifier strings.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA-1",
            Self::Sha224 => "SHA-224",
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
        }
    }

    /// Output length in bytes.
    pub const fn output_len(self) -> usize {
        match self {
            Self::Md5 => 16,
            Self::Sha1 => 20,
            Self::Sha224 => 28,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }
}

/// Symbolic digest algorithm identifier.
///
/// The serialized form is the identifier string (`"sha2-256"`), matched
/// exactly and case-sensitively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    #[serde(rename = "md5")]
    Md5,
    #[serde(rename = "sha")]
    Sha1,
    #[serde(rename = "sha2-224")]
    Sha224,
    #[serde(rename = "sha2-256")]
    Sha256,
    #[serde(rename = "sha2-384")]
    Sha384,
    #[serde(rename = "sha2-512")]
    Sha512,
    /// SHA-512 truncated to its leading 28 bytes.
    #[serde(rename = "sha2-512_224")]
    Sha512Trunc224,
    /// SHA-512 truncated to its leading 32 bytes.
    #[serde(rename = "sha2-512_256")]
    Sha512Trunc256,
}

impl Algorithm {
    pub const ALL: [Algorithm; 8] = [
        Self::Md5,
        Self::Sha1,
        Self::Sha224,
        Self::Sha256,
        Self::Sha384,
        Self::Sha512,
        Self::Sha512Trunc224,
        Self::Sha512Trunc256,
    ];

    /// Resolve an identifier. Matching is exact and case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> { lookup(name).map(|d| d.algorithm) }

    pub fn descriptor(self) -> &'static Descriptor { &DESCRIPTORS[self as usize] }

    pub fn name(self) -> &'static str { self.descriptor().name }

    /// Natural digest length in bytes.
    pub fn digest_len(self) -> usize { self.descriptor().digest_len() }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

impl FromStr for Algorithm {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| DigestError::UnknownAlgorithm(s.to_string()))
    }
}

/// How an identifier is computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Descriptor {
    pub algorithm:   Algorithm,
    pub name:        &'static str,
    pub base:        Primitive,
    /// Keep only this many leading bytes of the base output.
    pub truncate_to: Option<usize>,
}

impl Descriptor {
    const fn plain(algorithm: Algorithm, name: &'static str, base: Primitive) -> Self {
        Self {
            algorithm,
            name,
            base,
            truncate_to: None,
        }
    }

    const fn truncated(
        algorithm: Algorithm,
        name: &'static str,
        base: Primitive,
        len: usize,
    ) -> Self {
        Self {
            algorithm,
            name,
            base,
            truncate_to: Some(len),
        }
    }

    /// Announced output length; the capacity contract is checked against this.
    pub const fn digest_len(&self) -> usize {
        match self.truncate_to {
            Some(len) => len,
            None => self.base.output_len(),
        }
    }
}

// Indexed by `Algorithm as usize`.
static DESCRIPTORS: [Descriptor; 8] = [
    Descriptor::plain(Algorithm::Md5, "md5", Primitive::Md5),
    Descriptor::plain(Algorithm::Sha1, "sha", Primitive::Sha1),
    Descriptor::plain(Algorithm::Sha224, "sha2-224", Primitive::Sha224),
    Descriptor::plain(Algorithm::Sha256, "sha2-256", Primitive::Sha256),
    Descriptor::plain(Algorithm::Sha384, "sha2-384", Primitive::Sha384),
    Descriptor::plain(Algorithm::Sha512, "sha2-512", Primitive::Sha512),
    Descriptor::truncated(
        Algorithm::Sha512Trunc224,
        "sha2-512_224",
        Primitive::Sha512,
        28,
    ),
    Descriptor::truncated(
        Algorithm::Sha512Trunc256,
        "sha2-512_256",
        Primitive::Sha512,
        32,
    ),
];

static BY_NAME: Lazy<HashMap<&'static str, &'static Descriptor>> =
    Lazy::new(|| DESCRIPTORS.iter().map(|d| (d.name, d)).collect());

/// Look up the descriptor for an identifier.
pub fn lookup(name: &str) -> Option<&'static Descriptor> { BY_NAME.get(name).copied() }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_discriminant() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.descriptor().algorithm, algorithm);
        }
    }

    #[test]
    fn identifier_lengths() {
        let expected = [
            ("md5", 16),
            ("sha", 20),
            ("sha2-224", 28),
            ("sha2-256", 32),
            ("sha2-384", 48),
            ("sha2-512", 64),
            ("sha2-512_224", 28),
            ("sha2-512_256", 32),
        ];
        for (name, len) in expected {
            let descriptor = lookup(name).unwrap();
            assert_eq!(descriptor.name, name);
            assert_eq!(descriptor.digest_len(), len, "{name}");
        }
    }

    #[test]
    fn truncated_variants_share_sha512() {
        for algorithm in [Algorithm::Sha512Trunc224, Algorithm::Sha512Trunc256] {
            let descriptor = algorithm.descriptor();
            assert_eq!(descriptor.base, Primitive::Sha512);
            assert!(descriptor.digest_len() < descriptor.base.output_len());
        }
    }

    #[test]
    fn primitives_fit_scratch() {
        for primitive in Primitive::ALL {
            assert!(primitive.output_len() <= MAX_DIGEST_LEN);
        }
    }

    #[test]
    fn lookup_is_exact_and_case_sensitive() {
        assert!(lookup("SHA").is_none());
        assert!(lookup("Md5").is_none());
        assert!(lookup("sha2-256 ").is_none());
        assert!(lookup("sha-256").is_none());
        assert!(lookup("sha2-9000").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn parse_and_display() {
        let algorithm: Algorithm = "sha2-512_256".parse().unwrap();
        assert_eq!(algorithm, Algorithm::Sha512Trunc256);
        assert_eq!(algorithm.to_string(), "sha2-512_256");

        let err = "sha1".parse::<Algorithm>().unwrap_err();
        assert_eq!(err, DigestError::UnknownAlgorithm("sha1".into()));
    }

    #[test]
    fn serde_uses_identifiers() {
        for algorithm in Algorithm::ALL {
            let json = serde_json::to_string(&algorithm).unwrap();
            assert_eq!(json, format!("\"{}\"", algorithm.name()));
        }
        let parsed: Algorithm = serde_json::from_str("\"sha\"").unwrap();
        assert_eq!(parsed, Algorithm::Sha1);
        assert!(serde_json::from_str::<Algorithm>("\"SHA\"").is_err());
    }
}
