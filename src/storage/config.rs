//! Per-medium storage limits.
//!
//! Browser media are small and policy-bound: a cookie jar holds a few dozen
//! cookies of ~4 KB each, web storage a handful of megabytes. Each concrete
//! engine variant is the same engine with a different set of these limits,
//! fixed at construction and never mutated at runtime.

use crate::bridge::types::MediumKind;

/// Limits enforced by the storage engine before any write is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageConfig {
    /// Maximum number of distinct entry names. A write introducing a new
    /// name at this bound is rejected; overwriting is always allowed.
    pub max_entries_count: usize,

    /// Maximum byte length of `name` plus the encoded raw string.
    pub max_entry_size: usize,
}

impl StorageConfig {
    /// Creates a custom configuration.
    ///
    /// # Panics
    ///
    /// Panics if either bound is zero.
    pub fn new(max_entries_count: usize, max_entry_size: usize) -> Self {
        assert!(max_entries_count > 0, "max_entries_count must be positive");
        assert!(max_entry_size > 0, "max_entry_size must be positive");
        Self {
            max_entries_count,
            max_entry_size,
        }
    }

    /// Limits for cookie-backed storage: few entries, the classic ~4 KB
    /// per-cookie ceiling.
    pub fn cookie() -> Self {
        Self::new(20, 4096)
    }

    /// Limits for `localStorage`-backed storage.
    pub fn local() -> Self {
        Self::new(100, 5_000_000)
    }

    /// Limits for `sessionStorage`-backed storage.
    pub fn session() -> Self {
        Self::new(100, 5_000_000)
    }

    /// The default limits for a medium.
    pub fn for_medium(medium: MediumKind) -> Self {
        match medium {
            MediumKind::Cookie => Self::cookie(),
            MediumKind::Local => Self::local(),
            MediumKind::Session => Self::session(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_match_their_media() {
        assert_eq!(StorageConfig::for_medium(MediumKind::Cookie), StorageConfig::cookie());
        assert_eq!(StorageConfig::for_medium(MediumKind::Local), StorageConfig::local());
        assert_eq!(StorageConfig::for_medium(MediumKind::Session), StorageConfig::session());
    }

    #[test]
    fn test_cookie_limits_are_tighter_than_web_storage() {
        let cookie = StorageConfig::cookie();
        let local = StorageConfig::local();
        assert!(cookie.max_entries_count < local.max_entries_count);
        assert!(cookie.max_entry_size < local.max_entry_size);
    }

    #[test]
    #[should_panic(expected = "max_entries_count must be positive")]
    fn test_zero_entry_count_is_rejected() {
        StorageConfig::new(0, 1024);
    }
}
