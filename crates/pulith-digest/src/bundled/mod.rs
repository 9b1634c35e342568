//! In-crate implementations that need no external backend.

mod md5;

use crate::algorithm::Primitive;
use crate::error::Result;
use crate::provider::{Provider, check_output, unsupported};

/// Always-available provider computing MD5 only.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bundled;

impl Provider for Bundled {
    fn name(&self) -> &'static str { "bundled" }

    fn supports(&self, primitive: Primitive) -> bool { primitive == Primitive::Md5 }

    fn digest(&self, primitive: Primitive, data: &[u8], out: &mut [u8]) -> Result<()> {
        match primitive {
            Primitive::Md5 => {
                check_output(primitive, out)?;
                out.copy_from_slice(&md5::Md5::digest(data));
                Ok(())
            }
            _ => Err(unsupported(self, primitive)),
        }
    }
}
