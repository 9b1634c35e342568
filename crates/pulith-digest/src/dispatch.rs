//! Name-dispatched digest computation.
//!
//! Every call validates its arguments, resolves the identifier through the
//! descriptor table, checks that the active provider can compute the base
//! primitive, and checks the caller's capacity against the announced digest
//! length before anything is computed. The caller's buffer is written only
//! on success, and only its first `digest_len` bytes.

use std::fmt;

use once_cell::sync::Lazy;

use crate::algorithm::{Algorithm, Descriptor, MAX_DIGEST_LEN, lookup};
use crate::error::{DigestError, Result};
use crate::format::to_hex;
use crate::provider::{BackendTier, Provider};

pub struct Dispatcher<P = Box<dyn Provider>> {
    provider: P,
}

impl Dispatcher<Box<dyn Provider>> {
    /// Dispatcher over the provider of the build-time [`BackendTier`].
    pub fn configured() -> Self {
        Self::new(BackendTier::configured_provider())
    }

    pub fn for_tier(tier: BackendTier) -> Result<Self> { Ok(Self::new(tier.provider()?)) }
}

impl Default for Dispatcher<Box<dyn Provider>> {
    fn default() -> Self { Self::configured() }
}

impl<P: Provider> fmt::Debug for Dispatcher<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("provider", &self.provider.name())
            .finish()
    }
}

impl<P: Provider> Dispatcher<P> {
    pub fn new(provider: P) -> Self {
        tracing::debug!(provider = provider.name(), "digest dispatcher created");
        Self { provider }
    }

    pub fn provider(&self) -> &P { &self.provider }

    pub fn provider_name(&self) -> &'static str { self.provider.name() }

    /// Whether the active provider can compute `algorithm`.
    pub fn supports(&self, algorithm: Algorithm) -> bool {
        self.provider.supports(algorithm.descriptor().base)
    }

    /// Algorithms computable with the active provider.
    pub fn supported(&self) -> impl Iterator<Item = Algorithm> + '_ {
        Algorithm::ALL.into_iter().filter(|&a| self.supports(a))
    }

    /// Compute the digest named `algorithm` over `data` into `out`.
    ///
    /// Returns the natural digest length on success.
    ///
    /// # Errors
    ///
    /// - [`DigestError::InvalidArgument`] if `algorithm`, `data` or `out` is empty.
    /// - [`DigestError::UnknownAlgorithm`] if the name is not a known identifier,
    ///   or the active provider cannot compute it. Buffer size is irrelevant.
    /// - [`DigestError::BufferTooSmall`] if `out` is shorter than the digest.
    ///
    /// `out` is untouched on every error.
    pub fn compute(&self, algorithm: &str, data: &[u8], out: &mut [u8]) -> Result<usize> {
        let result = self.resolve_and_run(algorithm, data, out);
        if let Err(err) = &result {
            tracing::debug!(algorithm, %err, "digest rejected");
        }
        result
    }

    /// [`compute`](Self::compute) for an already resolved identifier.
    pub fn compute_with(&self, algorithm: Algorithm, data: &[u8], out: &mut [u8]) -> Result<usize> {
        let result =
            check_buffers(data, out).and_then(|()| self.run(algorithm.descriptor(), data, out));
        if let Err(err) = &result {
            tracing::debug!(algorithm = algorithm.name(), %err, "digest rejected");
        }
        result
    }

    /// Owned digest bytes.
    pub fn digest(&self, algorithm: &str, data: &[u8]) -> Result<Vec<u8>> {
        let mut out = [0u8; MAX_DIGEST_LEN];
        let len = self.compute(algorithm, data, &mut out)?;
        Ok(out[..len].to_vec())
    }

    /// Digest rendered as lowercase hex.
    pub fn digest_hex(&self, algorithm: &str, data: &[u8]) -> Result<String> {
        let mut out = [0u8; MAX_DIGEST_LEN];
        let len = self.compute(algorithm, data, &mut out)?;
        Ok(to_hex(&out[..len]))
    }

    fn resolve_and_run(&self, algorithm: &str, data: &[u8], out: &mut [u8]) -> Result<usize> {
        if algorithm.is_empty() {
            return Err(DigestError::InvalidArgument("empty algorithm name"));
        }
        check_buffers(data, out)?;

        let descriptor =
            lookup(algorithm).ok_or_else(|| DigestError::UnknownAlgorithm(algorithm.to_string()))?;
        self.run(descriptor, data, out)
    }

    fn run(&self, descriptor: &Descriptor, data: &[u8], out: &mut [u8]) -> Result<usize> {
        if !self.provider.supports(descriptor.base) {
            return Err(DigestError::UnknownAlgorithm(descriptor.name.to_string()));
        }

        let len = descriptor.digest_len();
        if out.len() < len {
            return Err(DigestError::BufferTooSmall {
                algorithm: descriptor.name,
                required:  len,
                capacity:  out.len(),
            });
        }

        // Full base output goes to scratch; truncated variants keep the prefix.
        let mut scratch = [0u8; MAX_DIGEST_LEN];
        let base = &mut scratch[..descriptor.base.output_len()];
        self.provider.digest(descriptor.base, data, base)?;
        out[..len].copy_from_slice(&base[..len]);

        tracing::trace!(
            algorithm = descriptor.name,
            data_len = data.len(),
            "digest computed"
        );
        Ok(len)
    }
}

fn check_buffers(data: &[u8], out: &[u8]) -> Result<()> {
    if data.is_empty() {
        return Err(DigestError::InvalidArgument("empty input data"));
    }
    if out.is_empty() {
        return Err(DigestError::InvalidArgument("empty output buffer"));
    }
    Ok(())
}

static CONFIGURED: Lazy<Dispatcher> = Lazy::new(Dispatcher::configured);

/// [`Dispatcher::compute`] on the process-wide dispatcher of the build-time tier.
pub fn compute_digest(algorithm: &str, data: &[u8], out: &mut [u8]) -> Result<usize> {
    CONFIGURED.compute(algorithm, data, out)
}
