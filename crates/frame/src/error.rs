//! Error type shared by every operation in the crate.

use core::fmt;

use thiserror::Error;

use crate::lifecycle::ContextKind;
use crate::registry::ErrorCode;

/// Failure reported by a context, the frame inspector, or the engine.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum FrameError {
    /// The engine returned a null handle when asked for a new context.
    #[error("{} failed", .kind.constructor())]
    ContextCreationFailed {
        /// Which context could not be allocated.
        kind: ContextKind,
    },
    /// An engine call failed; `site` names the operation that issued it.
    #[error("{site}: {code}")]
    Engine {
        /// Short call-site tag such as `"compress"` or `"set level"`.
        site: &'static str,
        /// Interned engine error code.
        #[source]
        code: &'static ErrorCode,
    },
    /// An engine call failed on a path that carries no call-site tag.
    #[error(transparent)]
    Code(&'static ErrorCode),
    /// Decompression was asked to decode an empty source.
    #[error("no source frame supplied")]
    EmptySource,
    /// The frame header does not declare its decompressed size.
    #[error("unknown frame content size")]
    ContentSizeUnknown,
    /// The input is not a well-formed frame.
    #[error("bad frame")]
    BadFrame,
    /// The frame declares more content than the decoder's window ceiling.
    #[error("frame too big: {content_size} bytes exceeds limit of {limit} bytes")]
    FrameTooBig {
        /// Decompressed size declared by the frame header.
        content_size: u64,
        /// Configured decompression ceiling in bytes.
        limit: usize,
    },
}

/// Coarse classification of a [`FrameError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// A native context could not be allocated.
    ContextCreationFailed,
    /// The engine rejected a parameter kind or value.
    ParameterRejected,
    /// No source frame was supplied.
    NilSource,
    /// The frame does not declare its content size.
    ContentSizeUnknown,
    /// The input is not a well-formed frame.
    BadFrame,
    /// The frame exceeds the configured decompression ceiling.
    FrameTooBig,
    /// Any other engine failure; see [`FrameError::code`].
    NativeOperationFailed,
}

impl FrameError {
    pub(crate) const fn engine(site: &'static str, code: &'static ErrorCode) -> Self {
        Self::Engine { site, code }
    }

    /// Returns the taxonomy bucket this error belongs to.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ContextCreationFailed { .. } => ErrorKind::ContextCreationFailed,
            Self::Engine { code, .. } | Self::Code(code) => {
                if code.is_parameter_rejection() {
                    ErrorKind::ParameterRejected
                } else {
                    ErrorKind::NativeOperationFailed
                }
            }
            Self::EmptySource => ErrorKind::NilSource,
            Self::ContentSizeUnknown => ErrorKind::ContentSizeUnknown,
            Self::BadFrame => ErrorKind::BadFrame,
            Self::FrameTooBig { .. } => ErrorKind::FrameTooBig,
        }
    }

    /// Returns the interned engine code for native failures.
    #[must_use]
    pub const fn code(&self) -> Option<&'static ErrorCode> {
        match self {
            Self::Engine { code, .. } | Self::Code(code) => Some(*code),
            _ => None,
        }
    }

    /// Returns the call-site tag for tagged native failures.
    #[must_use]
    pub const fn site(&self) -> Option<&'static str> {
        match self {
            Self::Engine { site, .. } => Some(*site),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ContextCreationFailed => "context creation failed",
            Self::ParameterRejected => "parameter rejected",
            Self::NilSource => "nil source",
            Self::ContentSizeUnknown => "content size unknown",
            Self::BadFrame => "bad frame",
            Self::FrameTooBig => "frame too big",
            Self::NativeOperationFailed => "native operation failed",
        };
        f.write_str(label)
    }
}
