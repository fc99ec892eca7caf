#![allow(unsafe_code)]

//! Raw boundary to the native zstd engine.
//!
//! This is the only module that calls into `zstd_sys`. Every call's return
//! value is checked here and failures leave as interned
//! [`ErrorCode`](crate::registry::ErrorCode) references, so the rest of the
//! crate never sees a raw `size_t` result.

use std::ffi::CStr;
use std::mem;
use std::ptr::NonNull;

use zstd::zstd_safe::zstd_sys;

use crate::lifecycle::{ContextKind, NativeHandle};
use crate::registry::{self, ErrorCode};
use crate::trace;

/// Sentinel returned by `ZSTD_getFrameContentSize` when the header omits the size.
const CONTENTSIZE_UNKNOWN: u64 = u64::MAX;
/// Sentinel returned by `ZSTD_getFrameContentSize` for malformed input.
const CONTENTSIZE_ERROR: u64 = u64::MAX - 1;

/// Default decoder window log (`ZSTD_WINDOWLOG_LIMIT_DEFAULT`).
pub(crate) const WINDOWLOG_LIMIT_DEFAULT: u32 = 27;

/// Outcome of probing a frame header for its declared content size.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ContentSize {
    Known(u64),
    Unknown,
    Error,
}

/// Translates an engine result into the written byte count or an interned code.
pub(crate) fn check(result: usize) -> Result<usize, &'static ErrorCode> {
    // SAFETY: ZSTD_getErrorCode accepts any size_t produced by the engine and
    // only returns enumerators the engine defines.
    let code = unsafe { zstd_sys::ZSTD_getErrorCode(result) } as u32;
    if code == 0 {
        Ok(result)
    } else {
        Err(registry::code_for(code))
    }
}

/// Resolves the engine's display name for a stable error code.
///
/// The engine encodes error `e` as the `size_t` value `0 - e`, which is the
/// form `ZSTD_getErrorName` expects.
pub(crate) fn error_name_for_code(code: u32) -> &'static str {
    let result = 0usize.wrapping_sub(code as usize);
    // SAFETY: ZSTD_getErrorName returns a pointer into a static table of
    // NUL-terminated strings for every input value.
    let name = unsafe { CStr::from_ptr(zstd_sys::ZSTD_getErrorName(result)) };
    name.to_str().unwrap_or("Unknown error")
}

pub(crate) fn compress_bound(src_len: usize) -> usize {
    // SAFETY: pure arithmetic on the engine side.
    unsafe { zstd_sys::ZSTD_compressBound(src_len) }
}

pub(crate) fn frame_content_size(src: &[u8]) -> ContentSize {
    // SAFETY: the pointer/length pair describes a live, initialised slice.
    let size = unsafe { zstd_sys::ZSTD_getFrameContentSize(src.as_ptr().cast(), src.len()) };
    match size {
        CONTENTSIZE_UNKNOWN => ContentSize::Unknown,
        CONTENTSIZE_ERROR => ContentSize::Error,
        known => ContentSize::Known(known),
    }
}

pub(crate) fn find_frame_compressed_size(src: &[u8]) -> Result<usize, &'static ErrorCode> {
    // SAFETY: the pointer/length pair describes a live, initialised slice.
    check(unsafe { zstd_sys::ZSTD_findFrameCompressedSize(src.as_ptr().cast(), src.len()) })
}

/// Encoder parameters this layer configures.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum EncoderParameter {
    CompressionLevel,
    ChecksumFlag,
}

impl EncoderParameter {
    const fn raw(self) -> zstd_sys::ZSTD_cParameter {
        match self {
            Self::CompressionLevel => zstd_sys::ZSTD_cParameter::ZSTD_c_compressionLevel,
            Self::ChecksumFlag => zstd_sys::ZSTD_cParameter::ZSTD_c_checksumFlag,
        }
    }
}

/// Exclusively owned `ZSTD_CCtx`.
///
/// Not `Sync`: every engine call goes through `&mut self`, so a single
/// context can never see two calls in flight.
#[derive(Debug)]
pub(crate) struct EncoderHandle(NonNull<zstd_sys::ZSTD_CCtx>);

// SAFETY: the engine context carries no thread affinity; exclusive access is
// guaranteed by `&mut self` on every call.
unsafe impl Send for EncoderHandle {}

impl EncoderHandle {
    pub(crate) fn set_parameter(
        &mut self,
        parameter: EncoderParameter,
        value: i32,
    ) -> Result<(), &'static ErrorCode> {
        // SAFETY: the handle is live for as long as `self` exists.
        let result =
            unsafe { zstd_sys::ZSTD_CCtx_setParameter(self.0.as_ptr(), parameter.raw(), value) };
        check(result).map(drop)
    }

    /// Writes one complete frame for `src` into `dst` (`ZSTD_compress2`).
    pub(crate) fn compress(
        &mut self,
        dst: &mut [u8],
        src: &[u8],
    ) -> Result<usize, &'static ErrorCode> {
        // SAFETY: both slices are live and initialised; the engine writes at
        // most `dst.len()` bytes.
        let result = unsafe {
            zstd_sys::ZSTD_compress2(
                self.0.as_ptr(),
                dst.as_mut_ptr().cast(),
                dst.len(),
                src.as_ptr().cast(),
                src.len(),
            )
        };
        check(result)
    }
}

impl NativeHandle for EncoderHandle {
    const KIND: ContextKind = ContextKind::Compression;

    fn create() -> Option<Self> {
        // SAFETY: allocation only; a null return is handled by NonNull::new.
        NonNull::new(unsafe { zstd_sys::ZSTD_createCCtx() }).map(Self)
    }

    fn free(self) -> Result<(), &'static ErrorCode> {
        let raw = self.0;
        mem::forget(self);
        // SAFETY: `raw` came from ZSTD_createCCtx and `self` was forgotten, so
        // Drop cannot free it a second time.
        check(unsafe { zstd_sys::ZSTD_freeCCtx(raw.as_ptr()) }).map(drop)
    }
}

impl Drop for EncoderHandle {
    fn drop(&mut self) {
        // SAFETY: the handle is live and is never used after this call.
        let result = unsafe { zstd_sys::ZSTD_freeCCtx(self.0.as_ptr()) };
        if let Err(code) = check(result) {
            trace::release_failed(Self::KIND, code);
        }
    }
}

/// Exclusively owned `ZSTD_DCtx`.
#[derive(Debug)]
pub(crate) struct DecoderHandle(NonNull<zstd_sys::ZSTD_DCtx>);

// SAFETY: see EncoderHandle.
unsafe impl Send for DecoderHandle {}

impl DecoderHandle {
    pub(crate) fn set_window_log_max(&mut self, window_log: u32) -> Result<(), &'static ErrorCode> {
        let value = i32::try_from(window_log).unwrap_or(i32::MAX);
        // SAFETY: the handle is live for as long as `self` exists.
        let result = unsafe {
            zstd_sys::ZSTD_DCtx_setParameter(
                self.0.as_ptr(),
                zstd_sys::ZSTD_dParameter::ZSTD_d_windowLogMax,
                value,
            )
        };
        check(result).map(drop)
    }

    /// Decodes every frame in `src` into `dst` (`ZSTD_decompressDCtx`).
    pub(crate) fn decompress(
        &mut self,
        dst: &mut [u8],
        src: &[u8],
    ) -> Result<usize, &'static ErrorCode> {
        // SAFETY: both slices are live and initialised; the engine writes at
        // most `dst.len()` bytes.
        let result = unsafe {
            zstd_sys::ZSTD_decompressDCtx(
                self.0.as_ptr(),
                dst.as_mut_ptr().cast(),
                dst.len(),
                src.as_ptr().cast(),
                src.len(),
            )
        };
        check(result)
    }
}

impl NativeHandle for DecoderHandle {
    const KIND: ContextKind = ContextKind::Decompression;

    fn create() -> Option<Self> {
        // SAFETY: allocation only; a null return is handled by NonNull::new.
        NonNull::new(unsafe { zstd_sys::ZSTD_createDCtx() }).map(Self)
    }

    fn free(self) -> Result<(), &'static ErrorCode> {
        let raw = self.0;
        mem::forget(self);
        // SAFETY: `raw` came from ZSTD_createDCtx and `self` was forgotten.
        check(unsafe { zstd_sys::ZSTD_freeDCtx(raw.as_ptr()) }).map(drop)
    }
}

impl Drop for DecoderHandle {
    fn drop(&mut self) {
        // SAFETY: the handle is live and is never used after this call.
        let result = unsafe { zstd_sys::ZSTD_freeDCtx(self.0.as_ptr()) };
        if let Err(code) = check(result) {
            trace::release_failed(Self::KIND, code);
        }
    }
}
