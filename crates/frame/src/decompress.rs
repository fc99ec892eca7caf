//! Single-shot frame decompression with a memory ceiling.
//!
//! A [`Decompressor`] owns one native decoding context plus a byte ceiling
//! (the window limit). Before any allocation the frame header is read for
//! its declared content size; frames claiming more than the ceiling are
//! rejected with [`FrameError::FrameTooBig`] so a hostile header cannot force
//! a large allocation.
//!
//! # Unknown content size
//!
//! Frames produced by streaming encoders may omit their content size. Such a
//! frame is only attempted when the caller supplies a destination with
//! non-zero capacity, in which case that capacity is trusted as the output
//! size. An undersized buffer then fails inside the engine with
//! `DST_SIZE_TOO_SMALL` rather than being grown.

use crate::buffer;
use crate::error::FrameError;
use crate::inspect;
use crate::lifecycle::{self, Dispose, NativeHandle};
use crate::native::DecoderHandle;
use crate::options::DecompressOptions;
use crate::trace;

const SET_WINDOWLOG_SITE: &str = "set windowlog";
const DECOMPRESS_SITE: &str = "decompress";

/// Owns one native decoding context.
///
/// Calls take `&mut self`, so a context serves one call at a time.
#[derive(Debug)]
pub struct Decompressor {
    handle: DecoderHandle,
    window_limit: usize,
}

impl Decompressor {
    /// Creates a decompressor that accepts frames up to `window_log_max`
    /// bytes; zero selects the default of 128 MiB.
    pub fn new(window_log_max: usize) -> Result<Self, FrameError> {
        let options = DecompressOptions::new().with_window_log_max(window_log_max);
        Self::with_options(&options)
    }

    /// Creates a decompressor from `options`.
    ///
    /// A non-default ceiling is also installed as the engine's window-log
    /// limit; an engine rejection is returned with the tag `"set windowlog"`.
    pub fn with_options(options: &DecompressOptions) -> Result<Self, FrameError> {
        let mut handle: DecoderHandle = lifecycle::acquire()?;

        if let Some(window_log) = options.engine_window_log() {
            handle
                .set_window_log_max(window_log)
                .map_err(|code| FrameError::engine(SET_WINDOWLOG_SITE, code))?;
            trace::parameter_applied(
                DecoderHandle::KIND,
                SET_WINDOWLOG_SITE,
                i32::try_from(window_log).unwrap_or(i32::MAX),
            );
        }

        Ok(Self {
            handle,
            window_limit: options.window_limit(),
        })
    }

    /// Returns the largest content size, in bytes, this decompressor accepts.
    #[must_use]
    pub const fn window_limit(&self) -> usize {
        self.window_limit
    }

    /// Decompresses `src` into `dst` and returns the number of bytes written.
    ///
    /// `src` must hold exactly one or more complete frames. `dst` is first
    /// widened to its full capacity and, when the frame declares a larger
    /// content size, grown by exactly the shortfall. Output starts at offset 0
    /// and `dst` is truncated to the bytes written. On failure `dst` is
    /// cleared and keeps its capacity.
    pub fn decompress(&mut self, dst: &mut Vec<u8>, src: &[u8]) -> Result<usize, FrameError> {
        let result = self.decompress_inner(dst, src);
        if result.is_err() {
            dst.clear();
        }
        result
    }

    /// Decompresses `src` into a freshly allocated buffer.
    ///
    /// The frame must declare its content size.
    pub fn decompress_to_vec(&mut self, src: &[u8]) -> Result<Vec<u8>, FrameError> {
        let mut dst = Vec::new();
        self.decompress(&mut dst, src)?;
        Ok(dst)
    }

    fn decompress_inner(&mut self, dst: &mut Vec<u8>, src: &[u8]) -> Result<usize, FrameError> {
        if src.is_empty() {
            return Err(FrameError::EmptySource);
        }
        let supplied = dst.capacity() > 0;
        buffer::widen(dst);

        match inspect::frame_content_size(src) {
            Ok(content_size) => {
                trace::content_size_checked(Some(content_size), self.window_limit);
                let need = usize::try_from(content_size)
                    .ok()
                    .filter(|&need| need <= self.window_limit);
                let Some(need) = need else {
                    trace::frame_too_big(content_size, self.window_limit);
                    return Err(FrameError::FrameTooBig {
                        content_size,
                        limit: self.window_limit,
                    });
                };
                buffer::grow_to(dst, need);
            }
            Err(FrameError::ContentSizeUnknown) if supplied => {
                trace::content_size_checked(None, self.window_limit);
            }
            Err(err) => return Err(err),
        }

        let written = self
            .handle
            .decompress(dst, src)
            .map_err(|code| FrameError::engine(DECOMPRESS_SITE, code))?;
        dst.truncate(written);
        trace::decompressed(src.len(), written);
        Ok(written)
    }
}

impl Dispose for Decompressor {
    fn dispose(self) -> Result<(), FrameError> {
        lifecycle::release(self.handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::options::DEFAULT_WINDOW_LIMIT;

    #[test]
    fn zero_selects_default_limit() {
        let decompressor = Decompressor::new(0).expect("decompressor");
        assert_eq!(decompressor.window_limit(), DEFAULT_WINDOW_LIMIT);
        decompressor.dispose().expect("dispose");
    }

    #[test]
    fn engine_rejects_tiny_window() {
        let err = Decompressor::new(1 << 4).expect_err("window log 4 is below the engine minimum");
        assert_eq!(err.site(), Some(SET_WINDOWLOG_SITE));
        assert_eq!(err.kind(), ErrorKind::ParameterRejected);
    }

    #[test]
    fn empty_source_is_rejected_before_touching_dst() {
        let mut decompressor = Decompressor::new(0).expect("decompressor");
        let mut dst = Vec::new();
        let err = decompressor
            .decompress(&mut dst, &[])
            .expect_err("empty source");
        assert_eq!(err, FrameError::EmptySource);
        assert_eq!(err.kind(), ErrorKind::NilSource);
        assert_eq!(dst.capacity(), 0);
    }

    #[test]
    fn garbage_source_is_a_bad_frame() {
        let mut decompressor = Decompressor::new(0).expect("decompressor");
        let mut dst = Vec::with_capacity(64);
        let err = decompressor
            .decompress(&mut dst, b"not a frame")
            .expect_err("garbage");
        assert_eq!(err, FrameError::BadFrame);
        assert!(dst.is_empty());
        assert!(dst.capacity() >= 64);
    }
}
