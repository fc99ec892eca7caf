//! Structured tracing for context lifetimes and buffer sizing decisions.
//!
//! All tracing is conditionally compiled behind the `tracing` feature flag;
//! with the feature disabled every helper is an inline no-op.

use crate::lifecycle::ContextKind;
use crate::registry::ErrorCode;

/// Target for context creation and release events.
#[cfg(feature = "tracing")]
const LIFECYCLE_TARGET: &str = "frame::lifecycle";
/// Target for compression events.
#[cfg(feature = "tracing")]
const COMPRESS_TARGET: &str = "frame::compress";
/// Target for decompression events.
#[cfg(feature = "tracing")]
const DECOMPRESS_TARGET: &str = "frame::decompress";

// ============================================================================
// Lifecycle
// ============================================================================

#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn context_created(kind: ContextKind) {
    tracing::trace!(target: LIFECYCLE_TARGET, %kind, "context created");
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn context_created(_kind: ContextKind) {}

#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn context_released(kind: ContextKind) {
    tracing::trace!(target: LIFECYCLE_TARGET, %kind, "context released");
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn context_released(_kind: ContextKind) {}

/// Emitted when a context dropped without `dispose` fails to release.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn release_failed(kind: ContextKind, code: &ErrorCode) {
    tracing::warn!(
        target: LIFECYCLE_TARGET,
        %kind,
        code = code.code(),
        error = %code,
        "context release failed during drop"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn release_failed(_kind: ContextKind, _code: &ErrorCode) {}

#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn parameter_applied(kind: ContextKind, site: &'static str, value: i32) {
    tracing::debug!(target: LIFECYCLE_TARGET, %kind, parameter = site, value, "parameter applied");
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn parameter_applied(_kind: ContextKind, _site: &'static str, _value: i32) {}

// ============================================================================
// Compression
// ============================================================================

#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn compressed(src_len: usize, bound: usize, written: usize) {
    tracing::trace!(target: COMPRESS_TARGET, src_len, bound, written, "frame compressed");
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn compressed(_src_len: usize, _bound: usize, _written: usize) {}

// ============================================================================
// Decompression
// ============================================================================

/// Records the content-size check; `None` means the header omits the size.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn content_size_checked(content_size: Option<u64>, limit: usize) {
    tracing::debug!(target: DECOMPRESS_TARGET, ?content_size, limit, "content size checked");
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn content_size_checked(_content_size: Option<u64>, _limit: usize) {}

#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn frame_too_big(content_size: u64, limit: usize) {
    tracing::debug!(target: DECOMPRESS_TARGET, content_size, limit, "frame exceeds window limit");
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn frame_too_big(_content_size: u64, _limit: usize) {}

#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn decompressed(src_len: usize, written: usize) {
    tracing::trace!(target: DECOMPRESS_TARGET, src_len, written, "frame decompressed");
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn decompressed(_src_len: usize, _written: usize) {}
