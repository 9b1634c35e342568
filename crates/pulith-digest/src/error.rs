use crate::provider::BackendTier;

/// Machine-checkable classification of a [`DigestError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    UnknownAlgorithm,
    BufferTooSmall,
    BackendUnavailable,
}

impl ErrorKind {
    /// Every kind is a caller-side problem; hosts without a finer taxonomy
    /// report them all as a single internal error.
    pub fn is_internal(self) -> bool { true }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DigestError {
    #[error("bad arguments to function: {0}")]
    InvalidArgument(&'static str),

    #[error("unknown hash algorithm: '{0}'")]
    UnknownAlgorithm(String),

    #[error("hash buffer too small: '{algorithm}' needs {required} bytes, got {capacity}")]
    BufferTooSmall {
        algorithm: &'static str,
        required:  usize,
        capacity:  usize,
    },

    #[error("backend tier '{0}' is not available in this build")]
    BackendUnavailable(BackendTier),
}

impl DigestError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::UnknownAlgorithm(_) => ErrorKind::UnknownAlgorithm,
            Self::BufferTooSmall { .. } => ErrorKind::BufferTooSmall,
            Self::BackendUnavailable(_) => ErrorKind::BackendUnavailable,
        }
    }
}

pub type Result<T> = std::result::Result<T, DigestError>;
