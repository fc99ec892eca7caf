//! Single-shot frame compression.
//!
//! A [`Compressor`] owns one native encoding context. Each call to
//! [`Compressor::compress`] writes one complete, self-contained frame
//! (header, blocks and optional checksum) into the caller's buffer.
//!
//! ```
//! use frame::{CompressOptions, CompressionLevel, Compressor, Dispose};
//!
//! let options = CompressOptions::new()
//!     .with_level(CompressionLevel::from_numeric(15))
//!     .with_checksum(true);
//! let mut compressor = Compressor::new(Some(&options))?;
//!
//! let mut dst = Vec::new();
//! let written = compressor.compress(&mut dst, b"Hello, World!\n")?;
//! assert_eq!(written, dst.len());
//! assert_eq!(&dst[..4], &[0x28, 0xB5, 0x2F, 0xFD]);
//!
//! compressor.dispose()?;
//! # Ok::<(), frame::FrameError>(())
//! ```

use crate::buffer;
use crate::error::FrameError;
use crate::lifecycle::{self, Dispose, NativeHandle};
use crate::native::{self, EncoderHandle, EncoderParameter};
use crate::options::{CompressOptions, CompressionLevel};
use crate::trace;

const SET_LEVEL_SITE: &str = "set level";
const SET_CHECKSUM_SITE: &str = "set checksum";
const COMPRESS_SITE: &str = "compress";

/// Returns the largest frame the engine can produce for `src_len` input bytes.
///
/// Delegates to `ZSTD_compressBound` so the result tracks the engine's own
/// frame overhead constants.
#[must_use]
pub fn compress_bound(src_len: usize) -> usize {
    native::compress_bound(src_len)
}

/// Owns one native encoding context.
///
/// Calls take `&mut self`, so a context serves one call at a time. Move the
/// compressor between threads freely, but give each thread its own instance
/// for parallel work.
#[derive(Debug)]
pub struct Compressor {
    handle: EncoderHandle,
    level: CompressionLevel,
    checksum: bool,
}

impl Compressor {
    /// Creates a compressor, applying `options` when supplied.
    ///
    /// Engine rejections of the level or checksum flag are returned with the
    /// call-site tags `"set level"` and `"set checksum"`; the partially
    /// configured context is released before returning.
    pub fn new(options: Option<&CompressOptions>) -> Result<Self, FrameError> {
        let options = options.copied().unwrap_or_default();
        let mut handle: EncoderHandle = lifecycle::acquire()?;

        if let Some(level) = options.level.parameter() {
            handle
                .set_parameter(EncoderParameter::CompressionLevel, level)
                .map_err(|code| FrameError::engine(SET_LEVEL_SITE, code))?;
            trace::parameter_applied(EncoderHandle::KIND, SET_LEVEL_SITE, level);
        }
        if options.checksum {
            handle
                .set_parameter(EncoderParameter::ChecksumFlag, 1)
                .map_err(|code| FrameError::engine(SET_CHECKSUM_SITE, code))?;
            trace::parameter_applied(EncoderHandle::KIND, SET_CHECKSUM_SITE, 1);
        }

        Ok(Self {
            handle,
            level: options.level,
            checksum: options.checksum,
        })
    }

    /// Returns the configured compression level.
    #[must_use]
    pub const fn level(&self) -> CompressionLevel {
        self.level
    }

    /// Reports whether produced frames carry a content checksum.
    #[must_use]
    pub const fn checksum(&self) -> bool {
        self.checksum
    }

    /// Returns the worst-case compressed size for `src_len` input bytes.
    #[must_use]
    pub fn compute_bound(&self, src_len: usize) -> usize {
        compress_bound(src_len)
    }

    /// Compresses `src` into `dst` as one complete frame.
    ///
    /// `dst` is first sized to [`compress_bound`]`(src.len())`: when its
    /// capacity falls short it grows by exactly the shortfall, otherwise its
    /// length is adjusted in place without reallocating. The frame is written
    /// from offset 0 and `dst` is then truncated to the bytes written, which
    /// are also returned. On failure `dst` is cleared and keeps its capacity.
    pub fn compress(&mut self, dst: &mut Vec<u8>, src: &[u8]) -> Result<usize, FrameError> {
        let bound = compress_bound(src.len());
        buffer::fit(dst, bound);

        match self.handle.compress(dst, src) {
            Ok(written) => {
                dst.truncate(written);
                trace::compressed(src.len(), bound, written);
                Ok(written)
            }
            Err(code) => {
                dst.clear();
                Err(FrameError::engine(COMPRESS_SITE, code))
            }
        }
    }

    /// Compresses `src` into a freshly allocated buffer.
    pub fn compress_to_vec(&mut self, src: &[u8]) -> Result<Vec<u8>, FrameError> {
        let mut dst = Vec::new();
        self.compress(&mut dst, src)?;
        Ok(dst)
    }
}

impl Dispose for Compressor {
    fn dispose(self) -> Result<(), FrameError> {
        lifecycle::release(self.handle)
    }
}
