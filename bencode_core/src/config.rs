//! Decoder limits and strictness.

use serde::{Deserialize, Serialize};

/// Default maximum number of nested lists/dictionaries.
pub const DEFAULT_MAX_DEPTH: usize = 200;

/// Default maximum size for a single string value. Bounds the memory an
/// untrusted length prefix can make the decoder reserve.
pub const DEFAULT_MAX_STRING_LEN: usize = 16 * 1024 * 1024;

/// Settings applied by a [`crate::Decoder`].
///
/// Can be embedded in a host application's config file; missing fields fall
/// back to their defaults.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DecodeConfig {
    /// Maximum number of containers open at once. A top-level list counts as
    /// depth 1.
    pub max_depth: usize,
    /// Maximum length in bytes of any single string, including dictionary keys.
    pub max_string_len: usize,
    /// Reject input that is well-formed but not canonical: dictionary keys
    /// out of order and string lengths with leading zeros.
    pub strict: bool,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_string_len: DEFAULT_MAX_STRING_LEN,
            strict: false,
        }
    }
}

impl DecodeConfig {
    /// Default limits with canonical-form checks enabled.
    pub fn canonical() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_string_len(mut self, max_string_len: usize) -> Self {
        self.max_string_len = max_string_len;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DecodeConfig::default();
        assert_eq!(config.max_depth, 200);
        assert_eq!(config.max_string_len, 16 * 1024 * 1024);
        assert!(!config.strict);
    }

    #[test]
    fn test_builders() {
        let config = DecodeConfig::canonical()
            .with_max_depth(4)
            .with_max_string_len(10);
        assert!(config.strict);
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.max_string_len, 10);
        assert!(!config.with_strict(false).strict);
    }
}
