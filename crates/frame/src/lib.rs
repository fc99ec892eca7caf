#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `frame` is a single-shot safety layer over the native Zstandard engine.
//! It does not compress anything itself; it owns the contract between caller
//! byte buffers and the engine's frame format: output-buffer bounds, buffer
//! growth, parameter application, native context lifetime, and translation of
//! the engine's numeric error results into interned, comparable codes.
//!
//! # Design
//!
//! - [`Compressor`] and [`Decompressor`] each own one native context. Every
//!   operation takes `&mut self`, so a context never serves two calls at
//!   once, and [`Dispose::dispose`] consumes the context so it cannot be used
//!   after release.
//! - [`inspect`] answers "how large is this frame" questions from the frame
//!   header without decompressing.
//! - [`registry`] interns engine error codes process-wide, so error paths
//!   hand out `&'static` references instead of allocating.
//!
//! # Invariants
//!
//! - Output is always written into caller-provided `Vec<u8>` buffers, which
//!   grow only by the shortfall and are never shrunk in capacity.
//! - Decompression reads the declared content size before allocating and
//!   rejects frames above the configured window limit.
//! - All native calls live in one private module; the rest of the crate is
//!   free of `unsafe`.
//!
//! # Errors
//!
//! Every fallible operation returns [`FrameError`]. [`FrameError::kind`]
//! classifies it into an [`ErrorKind`], and [`FrameError::code`] exposes the
//! engine's stable code for native failures.
//!
//! # Examples
//!
//! ```
//! use frame::{CompressOptions, CompressionLevel, Compressor, Decompressor, Dispose};
//!
//! let src = "Hello, World!\n".repeat(20);
//! let options = CompressOptions::new()
//!     .with_level(CompressionLevel::from_numeric(15))
//!     .with_checksum(true);
//!
//! let mut compressor = Compressor::new(Some(&options))?;
//! let compressed = compressor.compress_to_vec(src.as_bytes())?;
//! compressor.dispose()?;
//!
//! let mut decompressor = Decompressor::new(0)?;
//! let restored = decompressor.decompress_to_vec(&compressed)?;
//! decompressor.dispose()?;
//!
//! assert_eq!(restored, src.as_bytes());
//! # Ok::<(), frame::FrameError>(())
//! ```
//!
//! # See also
//!
//! - [`lifecycle::scoped`] for running work against a context that is always
//!   disposed afterwards.
//! - [`inspect::frames`] for splitting back-to-back frames.

mod buffer;
pub mod compress;
pub mod decompress;
mod error;
pub mod inspect;
pub mod lifecycle;
mod native;
pub mod options;
pub mod registry;
mod trace;

pub use compress::{Compressor, compress_bound};
pub use decompress::Decompressor;
pub use error::{ErrorKind, FrameError};
pub use inspect::{frame_compressed_size, frame_content_size};
pub use lifecycle::{ContextKind, Dispose};
pub use options::{CompressOptions, CompressionLevel, DEFAULT_WINDOW_LIMIT, DecompressOptions};
pub use registry::ErrorCode;
