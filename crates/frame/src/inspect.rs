//! Frame metadata queries that do not decompress.
//!
//! Both queries are answered by the engine from the frame header; nothing in
//! this crate parses frame bytes itself.
//!
//! ```
//! use frame::{Compressor, inspect};
//!
//! let mut compressor = Compressor::new(None)?;
//! let mut packed = compressor.compress_to_vec(b"first")?;
//! packed.extend(compressor.compress_to_vec(b"second")?);
//!
//! let first_len = inspect::frame_compressed_size(&packed)?;
//! assert_eq!(inspect::frame_content_size(&packed[..first_len])?, 5);
//! assert_eq!(inspect::frames(&packed).count(), 2);
//! # Ok::<(), frame::FrameError>(())
//! ```

use core::iter::FusedIterator;

use crate::error::FrameError;
use crate::native::{self, ContentSize};

/// Returns the decompressed size declared by the frame at the start of `src`.
///
/// Frames written without a size field (for example by a streaming encoder)
/// report [`FrameError::ContentSizeUnknown`]; input that is not a frame
/// reports [`FrameError::BadFrame`].
pub fn frame_content_size(src: &[u8]) -> Result<u64, FrameError> {
    match native::frame_content_size(src) {
        ContentSize::Known(size) => Ok(size),
        ContentSize::Unknown => Err(FrameError::ContentSizeUnknown),
        ContentSize::Error => Err(FrameError::BadFrame),
    }
}

/// Returns the byte length of the first complete frame in `buf`.
///
/// For the returned `n`, `&buf[..n]` is a valid source for
/// [`Decompressor::decompress`](crate::Decompressor::decompress). Failures
/// carry the bare engine code with no call-site tag.
pub fn frame_compressed_size(buf: &[u8]) -> Result<usize, FrameError> {
    native::find_frame_compressed_size(buf).map_err(FrameError::Code)
}

/// Iterates over back-to-back frames packed into one buffer.
pub fn frames(buf: &[u8]) -> Frames<'_> {
    Frames { remaining: buf }
}

/// Iterator returned by [`frames`].
///
/// Yields each complete frame in order. A malformed or truncated tail yields
/// one error and ends the iteration.
#[derive(Clone, Debug)]
pub struct Frames<'a> {
    remaining: &'a [u8],
}

impl<'a> Frames<'a> {
    /// Returns the bytes not yet consumed.
    #[must_use]
    pub const fn remainder(&self) -> &'a [u8] {
        self.remaining
    }
}

impl<'a> Iterator for Frames<'a> {
    type Item = Result<&'a [u8], FrameError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.is_empty() {
            return None;
        }
        match frame_compressed_size(self.remaining) {
            Ok(len) => {
                let (frame, rest) = self.remaining.split_at(len);
                self.remaining = rest;
                Some(Ok(frame))
            }
            Err(err) => {
                self.remaining = &[];
                Some(Err(err))
            }
        }
    }
}

impl FusedIterator for Frames<'_> {}
