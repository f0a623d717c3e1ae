//! Value Codec Module
//!
//! This module converts application values (plus an optional expiry instant)
//! to and from the single raw string a browser medium can hold per entry.
//!
//! ## Raw string format
//!
//! ```text
//! <json payload> '|' [<epoch seconds>]
//! ```
//!
//! Examples:
//! - `"hello"|` — the string `hello`, no expiry
//! - `["a", 1]|1712345678` — an array expiring at the given UTC epoch second
//! - `null|` — the absent sentinel a medium returns for a missing entry
//!
//! See [`raw`] for the encoding and decoding rules.

pub mod raw;

// Re-export commonly used items
pub use raw::{decode, encode, DecodedValue, EncodeError, ABSENT, DELIMITER};
