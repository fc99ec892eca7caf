//! Process-wide interning of the engine's stable error codes.
//!
//! Every failing engine call is translated into a `&'static ErrorCode`. The
//! first observation of a code allocates one entry and resolves its display
//! name from the engine's own error table; every later observation of the
//! same code returns the identical reference without allocating. The table is
//! append-only and keyed by the engine's small, fixed code space, so it never
//! grows beyond a few dozen entries.

use std::fmt;
use std::sync::{OnceLock, PoisonError, RwLock};

use rustc_hash::FxHashMap;

use crate::native;

/// Stable error code numbers published by the engine.
///
/// These values are part of the engine's stable ABI and can be compared
/// against [`ErrorCode::code`].
pub mod codes {
    /// Generic failure.
    pub const GENERIC: u32 = 1;
    /// Input does not start with a known frame magic number.
    pub const PREFIX_UNKNOWN: u32 = 10;
    /// Frame was produced by an unsupported format version.
    pub const VERSION_UNSUPPORTED: u32 = 12;
    /// Frame header requests an unsupported parameter.
    pub const FRAME_PARAMETER_UNSUPPORTED: u32 = 14;
    /// Frame requires a window larger than the decoder permits.
    pub const FRAME_PARAMETER_WINDOW_TOO_LARGE: u32 = 16;
    /// Compressed data is corrupted.
    pub const CORRUPTION_DETECTED: u32 = 20;
    /// Content checksum does not match the decoded data.
    pub const CHECKSUM_WRONG: u32 = 22;
    /// Dictionary content is corrupted.
    pub const DICTIONARY_CORRUPTED: u32 = 30;
    /// Frame was compressed with a different dictionary.
    pub const DICTIONARY_WRONG: u32 = 32;
    /// Dictionary training failed.
    pub const DICTIONARY_CREATION_FAILED: u32 = 34;
    /// Parameter is not supported by the engine.
    pub const PARAMETER_UNSUPPORTED: u32 = 40;
    /// Parameter value lies outside its permitted bounds.
    pub const PARAMETER_OUT_OF_BOUND: u32 = 42;
    /// Entropy table log is too large.
    pub const TABLE_LOG_TOO_LARGE: u32 = 44;
    /// Maximum symbol value is too large.
    pub const MAX_SYMBOL_VALUE_TOO_LARGE: u32 = 46;
    /// Maximum symbol value is too small.
    pub const MAX_SYMBOL_VALUE_TOO_SMALL: u32 = 48;
    /// Operation invoked at the wrong stage.
    pub const STAGE_WRONG: u32 = 60;
    /// Context was used before initialisation.
    pub const INIT_MISSING: u32 = 62;
    /// Engine could not allocate working memory.
    pub const MEMORY_ALLOCATION: u32 = 64;
    /// Supplied workspace is too small.
    pub const WORKSPACE_TOO_SMALL: u32 = 66;
    /// Destination buffer is too small for the output.
    pub const DST_SIZE_TOO_SMALL: u32 = 70;
    /// Source length does not match a whole number of frames.
    pub const SRC_SIZE_WRONG: u32 = 72;
    /// Destination buffer is null.
    pub const DST_BUFFER_NULL: u32 = 74;
}

/// An interned engine error code.
///
/// Exactly one instance exists per code for the lifetime of the process, so
/// values can be compared either by code or by reference.
#[derive(Debug, Eq, PartialEq, Hash)]
pub struct ErrorCode {
    code: u32,
    name: &'static str,
}

impl ErrorCode {
    /// Returns the engine's stable numeric code.
    #[inline]
    #[must_use]
    pub const fn code(&self) -> u32 {
        self.code
    }

    /// Returns the human-readable name from the engine's error table.
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Reports whether the engine rejected a parameter value or kind.
    #[must_use]
    pub const fn is_parameter_rejection(&self) -> bool {
        matches!(
            self.code,
            codes::PARAMETER_UNSUPPORTED | codes::PARAMETER_OUT_OF_BOUND
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl std::error::Error for ErrorCode {}

type Table = FxHashMap<u32, &'static ErrorCode>;

fn table() -> &'static RwLock<Table> {
    static TABLE: OnceLock<RwLock<Table>> = OnceLock::new();
    TABLE.get_or_init(|| RwLock::new(Table::default()))
}

/// Returns the interned [`ErrorCode`] for `code`, creating it on first use.
///
/// Callers check for success before reaching this function; a zero code is
/// still interned (as the engine's "no error" entry) rather than rejected.
pub fn code_for(code: u32) -> &'static ErrorCode {
    code_for_with(code, native::error_name_for_code)
}

/// Returns a previously interned code without inserting a new entry.
pub fn lookup(code: u32) -> Option<&'static ErrorCode> {
    table()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&code)
        .copied()
}

pub(crate) fn code_for_with(
    code: u32,
    name: impl FnOnce(u32) -> &'static str,
) -> &'static ErrorCode {
    if let Some(existing) = lookup(code) {
        return existing;
    }

    let mut table = table().write().unwrap_or_else(PoisonError::into_inner);
    *table.entry(code).or_insert_with(|| {
        Box::leak(Box::new(ErrorCode {
            code,
            name: name(code),
        }))
    })
}
