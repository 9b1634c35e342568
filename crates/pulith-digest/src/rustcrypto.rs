use digest::Digest;

use crate::algorithm::Primitive;
use crate::error::Result;
use crate::provider::{Provider, check_output, unsupported};

/// Provider backed by the RustCrypto `md-5`, `sha1` and `sha2` crates.
#[derive(Clone, Copy, Debug)]
pub struct RustCrypto {
    md5: bool,
}

impl Default for RustCrypto {
    fn default() -> Self { Self::new() }
}

impl RustCrypto {
    pub fn new() -> Self { Self { md5: true } }

    /// A backend whose policy disables MD5.
    pub fn without_md5() -> Self { Self { md5: false } }
}

fn digest_into<D: Digest>(data: &[u8], out: &mut [u8]) { out.copy_from_slice(&D::digest(data)); }

impl Provider for RustCrypto {
    fn name(&self) -> &'static str { "rustcrypto" }

    fn supports(&self, primitive: Primitive) -> bool { primitive != Primitive::Md5 || self.md5 }

    fn digest(&self, primitive: Primitive, data: &[u8], out: &mut [u8]) -> Result<()> {
        if !self.supports(primitive) {
            return Err(unsupported(self, primitive));
        }
        check_output(primitive, out)?;
        match primitive {
            Primitive::Md5 => digest_into::<md5::Md5>(data, out),
            Primitive::Sha1 => digest_into::<sha1::Sha1>(data, out),
            Primitive::Sha224 => digest_into::<sha2::Sha224>(data, out),
            Primitive::Sha256 => digest_into::<sha2::Sha256>(data, out),
            Primitive::Sha384 => digest_into::<sha2::Sha384>(data, out),
            Primitive::Sha512 => digest_into::<sha2::Sha512>(data, out),
        }
        Ok(())
    }
}
