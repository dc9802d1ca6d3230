use std::fmt;

use rulesync_common::codec::CodecError;

use crate::store::StoreError;

#[derive(Debug)]
pub enum SyncError {
    InvalidArgument(String),
    Store(StoreError),
    Decode(CodecError),
    Encode(CodecError),
    /// The store answered but refused the write.
    Rejected,
    /// The worker pool shut down before the task resolved.
    Cancelled,
    /// A blocking wait was attempted on a current-thread runtime.
    BlockedInRuntime,
    Pool(std::io::Error),
}

impl SyncError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::Store(e) => write!(f, "store: {e}"),
            Self::Decode(e) => write!(f, "decode: {e}"),
            Self::Encode(e) => write!(f, "encode: {e}"),
            Self::Rejected => write!(f, "store rejected the publish"),
            Self::Cancelled => write!(f, "task cancelled before completion"),
            Self::BlockedInRuntime => {
                write!(f, "blocking call from inside a current-thread runtime")
            }
            Self::Pool(e) => write!(f, "worker pool: {e}"),
        }
    }
}

impl std::error::Error for SyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            Self::Decode(e) | Self::Encode(e) => Some(e),
            Self::Pool(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for SyncError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl From<std::io::Error> for SyncError {
    fn from(e: std::io::Error) -> Self {
        Self::Pool(e)
    }
}
