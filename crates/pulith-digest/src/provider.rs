//! Cryptographic providers behind the dispatcher.
//!
//! # Architecture
//!
//! A [`Provider`] only computes primitives. Which identifiers exist, how
//! they truncate, and how output buffers are checked is decided by the
//! dispatcher. Providers compose with [`PairProvider`] the same way
//! resolvers chain: primary first, fallback for whatever it lacks.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::algorithm::Primitive;
use crate::bundled::Bundled;
use crate::error::{DigestError, Result};

/// A backend able to compute some set of primitives.
///
/// Implementations must be reentrant: the dispatcher calls them from any
/// thread without coordination.
pub trait Provider: Send + Sync {
    fn name(&self) -> &'static str;

    fn supports(&self, primitive: Primitive) -> bool;

    /// Compute `primitive` over `data` into `out`.
    ///
    /// `out.len()` must equal `primitive.output_len()`, otherwise
    /// [`DigestError::InvalidArgument`]. Unsupported primitives return
    /// [`DigestError::UnknownAlgorithm`]. `out` is untouched on error.
    fn digest(&self, primitive: Primitive, data: &[u8], out: &mut [u8]) -> Result<()>;
}

impl<P: Provider + ?Sized> Provider for &P {
    fn name(&self) -> &'static str { (**self).name() }

    fn supports(&self, primitive: Primitive) -> bool { (**self).supports(primitive) }

    fn digest(&self, primitive: Primitive, data: &[u8], out: &mut [u8]) -> Result<()> {
        (**self).digest(primitive, data, out)
    }
}

impl<P: Provider + ?Sized> Provider for Box<P> {
    fn name(&self) -> &'static str { (**self).name() }

    fn supports(&self, primitive: Primitive) -> bool { (**self).supports(primitive) }

    fn digest(&self, primitive: Primitive, data: &[u8], out: &mut [u8]) -> Result<()> {
        (**self).digest(primitive, data, out)
    }
}

impl<P: Provider + ?Sized> Provider for Arc<P> {
    fn name(&self) -> &'static str { (**self).name() }

    fn supports(&self, primitive: Primitive) -> bool { (**self).supports(primitive) }

    fn digest(&self, primitive: Primitive, data: &[u8], out: &mut [u8]) -> Result<()> {
        (**self).digest(primitive, data, out)
    }
}

pub(crate) fn unsupported(provider: &dyn Provider, primitive: Primitive) -> DigestError {
    DigestError::UnknownAlgorithm(format!("{} in provider {}", primitive.as_str(), provider.name()))
}

/// Providers write exactly `primitive.output_len()` bytes.
pub(crate) fn check_output(primitive: Primitive, out: &[u8]) -> Result<()> {
    if out.len() != primitive.output_len() {
        return Err(DigestError::InvalidArgument(
            "output length does not match primitive",
        ));
    }
    Ok(())
}

/// Routes each primitive to `primary` when it supports it, else `fallback`.
#[derive(Clone, Debug)]
pub struct PairProvider<P, F> {
    primary:  P,
    fallback: F,
}

impl<P, F> PairProvider<P, F>
where
    P: Provider,
    F: Provider,
{
    pub fn new(primary: P, fallback: F) -> Self { Self { primary, fallback } }
}

impl<P, F> Provider for PairProvider<P, F>
where
    P: Provider,
    F: Provider,
{
    fn name(&self) -> &'static str { self.primary.name() }

    fn supports(&self, primitive: Primitive) -> bool {
        self.primary.supports(primitive) || self.fallback.supports(primitive)
    }

    fn digest(&self, primitive: Primitive, data: &[u8], out: &mut [u8]) -> Result<()> {
        if self.primary.supports(primitive) {
            self.primary.digest(primitive, data, out)
        } else {
            self.fallback.digest(primitive, data, out)
        }
    }
}

/// Provider configuration selected at build time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendTier {
    /// Every algorithm from the RustCrypto backend.
    Full,
    /// Same algorithm set, MD5 from the bundled implementation.
    Alternate,
    /// Bundled MD5 only.
    Legacy,
}

impl BackendTier {
    /// The tier this build was configured for through cargo features.
    pub fn configured() -> Self {
        let tier = if cfg!(not(feature = "rustcrypto")) {
            Self::Legacy
        } else if cfg!(feature = "bundled-md5") {
            Self::Alternate
        } else {
            Self::Full
        };
        tracing::debug!(tier = %tier, "resolved configured backend tier");
        tier
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Alternate => "alternate",
            Self::Legacy => "legacy",
        }
    }

    /// Whether this build can construct the tier's provider.
    pub fn is_available(self) -> bool {
        match self {
            Self::Legacy => true,
            Self::Full | Self::Alternate => cfg!(feature = "rustcrypto"),
        }
    }

    pub fn provider(self) -> Result<Box<dyn Provider>> {
        match self {
            Self::Legacy => Ok(Box::new(Bundled)),
            #[cfg(feature = "rustcrypto")]
            Self::Full => Ok(Box::new(crate::rustcrypto::RustCrypto::new())),
            #[cfg(feature = "rustcrypto")]
            Self::Alternate => Ok(Box::new(PairProvider::new(
                Bundled,
                crate::rustcrypto::RustCrypto::without_md5(),
            ))),
            #[cfg(not(feature = "rustcrypto"))]
            Self::Full | Self::Alternate => Err(DigestError::BackendUnavailable(self)),
        }
    }

    /// Provider of [`configured`](Self::configured). Infallible: the
    /// configured tier is derived from the same features that gate the
    /// backends.
    pub(crate) fn configured_provider() -> Box<dyn Provider> {
        #[cfg(not(feature = "rustcrypto"))]
        let provider: Box<dyn Provider> = Box::new(Bundled);
        #[cfg(all(feature = "rustcrypto", feature = "bundled-md5"))]
        let provider: Box<dyn Provider> = Box::new(PairProvider::new(
            Bundled,
            crate::rustcrypto::RustCrypto::without_md5(),
        ));
        #[cfg(all(feature = "rustcrypto", not(feature = "bundled-md5")))]
        let provider: Box<dyn Provider> = Box::new(crate::rustcrypto::RustCrypto::new());

        tracing::debug!(tier = %Self::configured(), "configured backend provider built");
        provider
    }
}

impl Default for BackendTier {
    fn default() -> Self { Self::configured() }
}

impl fmt::Display for BackendTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockProvider(&'static str, Primitive, u8);

    impl Provider for MockProvider {
        fn name(&self) -> &'static str { self.0 }

        fn supports(&self, primitive: Primitive) -> bool { primitive == self.1 }

        fn digest(&self, primitive: Primitive, _data: &[u8], out: &mut [u8]) -> Result<()> {
            if !self.supports(primitive) {
                return Err(unsupported(self, primitive));
            }
            out.fill(self.2);
            Ok(())
        }
    }

    #[test]
    fn test_pair_provider_fallback() {
        let provider = PairProvider::new(
            MockProvider("primary", Primitive::Md5, 0xaa),
            MockProvider("fallback", Primitive::Sha1, 0xbb),
        );

        let mut out = [0u8; 16];
        provider.digest(Primitive::Md5, b"a", &mut out).unwrap();
        assert_eq!(out, [0xaa; 16]);

        let mut out = [0u8; 20];
        provider.digest(Primitive::Sha1, b"a", &mut out).unwrap();
        assert_eq!(out, [0xbb; 20]);

        assert!(!provider.supports(Primitive::Sha256));
        let mut out = [0u8; 32];
        let err = provider
            .digest(Primitive::Sha256, b"a", &mut out)
            .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::UnknownAlgorithm);
        assert_eq!(out, [0u8; 32]);
    }

    #[test]
    fn test_pair_provider_prefers_primary() {
        let provider = PairProvider::new(
            MockProvider("primary", Primitive::Md5, 0x01),
            MockProvider("fallback", Primitive::Md5, 0x02),
        );
        let mut out = [0u8; 16];
        provider.digest(Primitive::Md5, b"a", &mut out).unwrap();
        assert_eq!(out, [0x01; 16]);
        assert_eq!(provider.name(), "primary");
    }

    #[test]
    fn test_smart_pointers_delegate() {
        let mock = MockProvider("mock", Primitive::Sha256, 0x11);
        let boxed: Box<dyn Provider> = Box::new(MockProvider("boxed", Primitive::Sha256, 0x22));
        let shared = Arc::new(MockProvider("shared", Primitive::Sha256, 0x33));

        assert_eq!((&mock).name(), "mock");
        assert_eq!(boxed.name(), "boxed");
        assert_eq!(shared.name(), "shared");
        assert!(boxed.supports(Primitive::Sha256));
        assert!(!shared.supports(Primitive::Sha512));
    }

    #[test]
    fn test_tier_serde_names() {
        assert_eq!(serde_json::to_string(&BackendTier::Full).unwrap(), "\"full\"");
        let tier: BackendTier = serde_json::from_str("\"alternate\"").unwrap();
        assert_eq!(tier, BackendTier::Alternate);
        let tier: BackendTier = serde_json::from_str("\"legacy\"").unwrap();
        assert_eq!(tier, BackendTier::Legacy);
        assert!(serde_json::from_str::<BackendTier>("\"Full\"").is_err());
    }

    #[test]
    fn test_legacy_tier_always_available() {
        assert!(BackendTier::Legacy.is_available());
        let provider = BackendTier::Legacy.provider().unwrap();
        assert!(provider.supports(Primitive::Md5));
        assert!(!provider.supports(Primitive::Sha1));
    }

    #[cfg(feature = "rustcrypto")]
    #[test]
    fn test_alternate_tier_routes_md5_to_bundled() {
        let provider = BackendTier::Alternate.provider().unwrap();
        assert_eq!(provider.name(), "bundled");
        for primitive in Primitive::ALL {
            assert!(provider.supports(primitive), "{primitive:?}");
        }
    }

    #[cfg(not(feature = "rustcrypto"))]
    #[test]
    fn test_full_tier_unavailable_without_backend() {
        for tier in [BackendTier::Full, BackendTier::Alternate] {
            assert!(matches!(
                tier.provider(),
                Err(DigestError::BackendUnavailable(t)) if t == tier
            ));
        }
    }

    #[cfg(feature = "bundled-md5")]
    #[test]
    fn test_bundled_md5_feature_selects_alternate() {
        assert_eq!(BackendTier::configured(), BackendTier::Alternate);
        assert_eq!(crate::Dispatcher::configured().provider_name(), "bundled");
    }

    #[test]
    fn test_configured_provider_matches_configured_tier() {
        let expected = BackendTier::configured().provider().ok().map(|p| p.name());
        assert_eq!(Some(BackendTier::configured_provider().name()), expected);
    }

    #[test]
    fn test_unsupported_message_uses_primitive_name() {
        let err = unsupported(&MockProvider("mock", Primitive::Md5, 0), Primitive::Sha1);
        assert_eq!(err.to_string(), "unknown hash algorithm: 'SHA-1 in provider mock'");
    }

    #[test]
    fn test_check_output_length() {
        assert!(check_output(Primitive::Sha256, &[0u8; 32]).is_ok());
        for len in [0, 16, 31, 33, 64] {
            let err = check_output(Primitive::Sha256, &vec![0u8; len]).unwrap_err();
            assert_eq!(err.kind(), crate::ErrorKind::InvalidArgument, "len {len}");
        }
    }

    #[test]
    fn test_configured_tier_is_available() {
        assert!(BackendTier::configured().is_available());
        assert_eq!(BackendTier::default(), BackendTier::configured());
    }
}
