//! Configuration accepted by the compression and decompression contexts.
//!
//! Values are forwarded to the engine as-is. Range checking (levels outside
//! `1..=22`, window logs the engine does not support) is left to the engine,
//! which reports rejections as [`ErrorKind::ParameterRejected`].
//!
//! [`ErrorKind::ParameterRejected`]: crate::ErrorKind::ParameterRejected

use std::num::NonZeroI32;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::native::WINDOWLOG_LIMIT_DEFAULT;

/// Default decompression ceiling in bytes (128 MiB).
pub const DEFAULT_WINDOW_LIMIT: usize = 1 << WINDOWLOG_LIMIT_DEFAULT;

/// Compression effort requested from the engine.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CompressionLevel {
    /// Leave the engine's default in place (level 3).
    #[default]
    Default,
    /// Favour speed over compression ratio (level 1).
    Fast,
    /// Favour ratio (level 19). Levels of 20 and above cost considerably
    /// more memory and time and must be requested explicitly.
    Best,
    /// An explicit engine level, normally in `1..=22`.
    Precise(NonZeroI32),
}

impl CompressionLevel {
    /// Maps a numeric level onto a [`CompressionLevel`].
    ///
    /// Zero selects [`CompressionLevel::Default`]; any other value is passed
    /// through unvalidated.
    #[must_use]
    pub const fn from_numeric(level: i32) -> Self {
        match NonZeroI32::new(level) {
            Some(level) => Self::Precise(level),
            None => Self::Default,
        }
    }

    /// Returns the value sent to the engine, or `None` to keep its default.
    #[must_use]
    pub const fn parameter(self) -> Option<i32> {
        match self {
            Self::Default => None,
            Self::Fast => Some(1),
            Self::Best => Some(19),
            Self::Precise(level) => Some(level.get()),
        }
    }
}

/// Options applied when a [`Compressor`](crate::Compressor) is created.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CompressOptions {
    /// Compression effort.
    pub level: CompressionLevel,
    /// Append a content checksum to every produced frame.
    pub checksum: bool,
}

impl CompressOptions {
    /// Creates options with the engine defaults.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            level: CompressionLevel::Default,
            checksum: false,
        }
    }

    /// Sets the compression level.
    #[must_use]
    pub const fn with_level(mut self, level: CompressionLevel) -> Self {
        self.level = level;
        self
    }

    /// Enables or disables the trailing content checksum.
    #[must_use]
    pub const fn with_checksum(mut self, checksum: bool) -> Self {
        self.checksum = checksum;
        self
    }
}

/// Options applied when a [`Decompressor`](crate::Decompressor) is created.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecompressOptions {
    /// Largest frame, in bytes, the decoder will accept. Zero selects
    /// [`DEFAULT_WINDOW_LIMIT`].
    ///
    /// The declared content size is checked against this exact byte value.
    /// The engine's window ceiling is the largest power of two not above it,
    /// so a value such as 3000 installs a 2 KiB engine window while frames of
    /// up to 3000 bytes still pass the size check.
    pub window_log_max: usize,
}

impl DecompressOptions {
    /// Creates options with the default ceiling.
    #[must_use]
    pub const fn new() -> Self {
        Self { window_log_max: 0 }
    }

    /// Sets the decompression ceiling in bytes.
    #[must_use]
    pub const fn with_window_log_max(mut self, window_log_max: usize) -> Self {
        self.window_log_max = window_log_max;
        self
    }

    /// Returns the effective ceiling in bytes.
    #[must_use]
    pub const fn window_limit(&self) -> usize {
        if self.window_log_max == 0 {
            DEFAULT_WINDOW_LIMIT
        } else {
            self.window_log_max
        }
    }

    /// Returns the window log to send to the engine, or `None` to keep its
    /// default. Ceilings that are not powers of two round down.
    #[must_use]
    pub const fn engine_window_log(&self) -> Option<u32> {
        if self.window_log_max == 0 {
            None
        } else {
            Some(self.window_log_max.ilog2())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_level_means_engine_default() {
        assert_eq!(CompressionLevel::from_numeric(0), CompressionLevel::Default);
        assert_eq!(CompressionLevel::Default.parameter(), None);
    }

    #[test]
    fn numeric_levels_pass_through_unvalidated() {
        assert_eq!(CompressionLevel::from_numeric(15).parameter(), Some(15));
        assert_eq!(CompressionLevel::from_numeric(99).parameter(), Some(99));
        assert_eq!(CompressionLevel::from_numeric(-5).parameter(), Some(-5));
    }

    #[test]
    fn named_levels() {
        assert_eq!(CompressionLevel::Fast.parameter(), Some(1));
        assert_eq!(CompressionLevel::Best.parameter(), Some(19));
    }

    #[test]
    fn compress_builder() {
        let options = CompressOptions::new()
            .with_level(CompressionLevel::from_numeric(15))
            .with_checksum(true);
        assert_eq!(options.level.parameter(), Some(15));
        assert!(options.checksum);
        assert_eq!(CompressOptions::default(), CompressOptions::new());
    }

    #[test]
    fn default_window_is_128_mib() {
        let options = DecompressOptions::new();
        assert_eq!(options.window_limit(), 128 * 1024 * 1024);
        assert_eq!(options.engine_window_log(), None);
    }

    #[test]
    fn explicit_window_converts_to_log() {
        let options = DecompressOptions::new().with_window_log_max(1 << 20);
        assert_eq!(options.window_limit(), 1 << 20);
        assert_eq!(options.engine_window_log(), Some(20));

        let uneven = DecompressOptions::new().with_window_log_max(3000);
        assert_eq!(uneven.window_limit(), 3000);
        assert_eq!(uneven.engine_window_log(), Some(11));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn options_round_trip_through_json() {
        let options = CompressOptions::new()
            .with_level(CompressionLevel::Best)
            .with_checksum(true);
        let json = serde_json::to_string(&options).expect("serialize");
        let parsed: CompressOptions = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, options);

        let partial: DecompressOptions = serde_json::from_str("{}").expect("defaults");
        assert_eq!(partial, DecompressOptions::new());
    }
}
