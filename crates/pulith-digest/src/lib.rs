//! Name-dispatched message digests with pluggable cryptographic providers.
//!
//! Callers name an algorithm (`"sha2-256"`, `"md5"`, ...) and hand over a
//! caller-owned output buffer; the dispatcher resolves the name, checks the
//! buffer against the algorithm's announced length, and computes the digest
//! through whichever provider it was built with. Digests render as lowercase
//! hex with [`format_hex`].
//!
//! # Architecture
//!
//! - `algorithm.rs` - Identifier table: name, length, base primitive, truncation
//! - `dispatch.rs` - Validation, resolution and computation
//! - `provider.rs` - Provider contract, composition and backend tiers
//! - `bundled/` - In-crate MD5, always available
//! - `rustcrypto.rs` - RustCrypto backend (`rustcrypto` feature)
//! - `format.rs` - Hex rendering
//!
//! # Example
//!
//! ```
//! use pulith_digest::{Dispatcher, format_hex};
//!
//! let dispatcher = Dispatcher::configured();
//!
//! let mut digest = [0u8; 64];
//! let len = dispatcher.compute("md5", b"a", &mut digest).unwrap();
//! assert_eq!(len, 16);
//!
//! let mut text = [0u8; 33];
//! let hex = format_hex(&digest[..len], &mut text).unwrap();
//! assert_eq!(hex, "0cc175b9c0f1b6a831c399e269772661");
//! ```

pub use self::algorithm::{Algorithm, Descriptor, MAX_DIGEST_LEN, Primitive};
pub use self::bundled::Bundled;
pub use self::dispatch::{Dispatcher, compute_digest};
pub use self::error::{DigestError, ErrorKind, Result};
pub use self::format::{format_hex, to_hex};
pub use self::provider::{BackendTier, PairProvider, Provider};

#[cfg(feature = "rustcrypto")]
pub use self::rustcrypto::RustCrypto;

mod algorithm;
mod bundled;
mod dispatch;
mod error;
mod format;
mod provider;
#[cfg(feature = "rustcrypto")]
mod rustcrypto;
