//! Acquisition and release of native engine contexts.
//!
//! Both context types own exactly one native handle. The handle is created
//! by the context's constructor and released either by [`Dispose::dispose`],
//! which consumes the context and reports the engine's release result, or by
//! `Drop` as a safety net when a context goes out of scope undisposed.
//! Because `dispose` takes `self` by value, a second disposal or any use after
//! disposal is rejected at compile time:
//!
//! ```compile_fail
//! use frame::{Compressor, Dispose};
//!
//! let compressor = Compressor::new(None).unwrap();
//! compressor.dispose().unwrap();
//! compressor.dispose().unwrap();
//! ```

use core::fmt;

use crate::error::FrameError;
use crate::registry::ErrorCode;
use crate::trace;

/// Call-site tag attached to release failures.
pub(crate) const DISPOSE_SITE: &str = "dispose";

/// Identifies which kind of native context an event or error refers to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ContextKind {
    /// Encoding context (`ZSTD_CCtx`).
    Compression,
    /// Decoding context (`ZSTD_DCtx`).
    Decompression,
}

impl ContextKind {
    /// Returns the name of the engine function that allocates this context.
    #[must_use]
    pub const fn constructor(self) -> &'static str {
        match self {
            Self::Compression => "ZSTD_createCCtx",
            Self::Decompression => "ZSTD_createDCtx",
        }
    }
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Compression => "compression",
            Self::Decompression => "decompression",
        })
    }
}

/// Explicit, single-shot release of a native context.
pub trait Dispose: Sized {
    /// Releases the native handle.
    ///
    /// The handle is gone once this returns, whether or not the engine
    /// reported a release failure; a failure is returned rather than hidden.
    fn dispose(self) -> Result<(), FrameError>;
}

/// A raw engine handle with a fallible constructor and an observable release.
pub(crate) trait NativeHandle: Sized {
    const KIND: ContextKind;

    /// Allocates a handle, returning `None` when the engine returns null.
    fn create() -> Option<Self>;

    /// Frees the handle and reports the engine's result.
    fn free(self) -> Result<(), &'static ErrorCode>;
}

pub(crate) fn acquire<H: NativeHandle>() -> Result<H, FrameError> {
    let handle = H::create().ok_or(FrameError::ContextCreationFailed { kind: H::KIND })?;
    trace::context_created(H::KIND);
    Ok(handle)
}

pub(crate) fn release<H: NativeHandle>(handle: H) -> Result<(), FrameError> {
    handle
        .free()
        .map_err(|code| FrameError::engine(DISPOSE_SITE, code))?;
    trace::context_released(H::KIND);
    Ok(())
}

/// Runs `body` with `context` and disposes the context on every exit path.
///
/// An error from `body` takes precedence; otherwise a disposal failure is
/// returned in place of the body's value.
///
/// ```
/// use frame::{Compressor, lifecycle};
///
/// let frame = lifecycle::scoped(Compressor::new(None)?, |c| c.compress_to_vec(b"payload"))?;
/// assert_eq!(&frame[..4], &[0x28, 0xB5, 0x2F, 0xFD]);
/// # Ok::<(), frame::FrameError>(())
/// ```
pub fn scoped<C, T, F>(mut context: C, body: F) -> Result<T, FrameError>
where
    C: Dispose,
    F: FnOnce(&mut C) -> Result<T, FrameError>,
{
    let outcome = body(&mut context);
    let disposed = context.dispose();
    let value = outcome?;
    disposed?;
    Ok(value)
}
