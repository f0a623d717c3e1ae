//! # browserkv - Key/Value Storage over Browser Media
//!
//! browserkv is a key/value storage abstraction layered over a
//! browser-resident medium — the cookie jar, `localStorage` or
//! `sessionStorage` — driven from a server-side context that cannot touch the
//! browser directly. All physical access goes through an asynchronous
//! request/response bridge; this crate owns everything on the near side of
//! it: the value representation, the expiry protocol and the storage
//! operations.
//!
//! ## Features
//!
//! - **Single-string codec**: values and their optional expiry travel as one
//!   raw string (`<json>|<epoch-seconds?>`) the medium can hold per entry
//! - **TTL Support**: durations become absolute UTC instants at write time
//! - **Lazy Expiry**: expired entries are purged before every read, so a
//!   logically-expired value is never observable
//! - **Bounded media**: per-medium entry-count and entry-size limits enforced
//!   before anything is sent
//! - **Async bridge**: one outstanding request per instance, correlated by
//!   per-instance unique keys
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                            browserkv                             │
//! │                                                                  │
//! │  ┌───────────────┐      ┌──────────────┐      ┌──────────────┐   │
//! │  │ StorageEngine │─────>│  Value Codec │      │ Correlation  │   │
//! │  │ set/get/...   │      │  encode/     │      │    Keys      │   │
//! │  │ expiry sweep  │      │  decode      │      └──────────────┘   │
//! │  └───────┬───────┘      └──────────────┘                         │
//! │          │                                                       │
//! │          ▼                                                       │
//! │  ┌───────────────┐       Request { action, name?, value?,        │
//! │  │ Bridge trait  │────     expires_at?, correlation_key }        │
//! │  └───────────────┘                                               │
//! └──────────│───────────────────────────────────────────────────────┘
//!            ▼
//!   browser-side runtime (cookies / localStorage / sessionStorage)
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use browserkv::bridge::MemoryBridge;
//! use browserkv::storage::StorageEngine;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), browserkv::StorageError> {
//! // An in-process medium; production code supplies a real Bridge instead.
//! let bridge = Arc::new(MemoryBridge::new());
//! let engine = StorageEngine::cookie("my-session", bridge);
//!
//! // Store a value with a 5-minute TTL
//! engine.set("token", "abc123", Some(Duration::from_secs(300))).await?;
//!
//! // Read it back (the value component only; expiry stays internal)
//! assert_eq!(engine.get("token").await?, Some("abc123".into()));
//!
//! // Remaining lifetime in whole seconds
//! let remaining = engine.expires_in("token").await?.unwrap();
//! assert!((299..=300).contains(&remaining));
//!
//! engine.delete("token").await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`codec`]: the raw-string value codec and the expiry suffix format
//! - [`bridge`]: the bridge contract (actions, requests, responses, the
//!   [`Bridge`] trait) and the in-process [`MemoryBridge`]
//! - [`storage`]: the storage engine, per-medium limits and the clock
//!   abstraction
//!
//! ## Design Highlights
//!
//! ### Expiry is an instant, not a duration
//!
//! A TTL is converted to an absolute UTC instant exactly once, at write
//! time. Whatever process later reads the entry interprets the same instant,
//! so expiry does not drift across independent calls.
//!
//! ### The sweep precedes every read
//!
//! Before `get`, `get_all`, `exists` or `expires_in` answer, every entry
//! whose instant has passed is deleted from the medium. The medium outlives
//! the process, so cleanup cannot be delegated to a background task; it has
//! to happen on the read path.
//!
//! ### One request in flight
//!
//! The bridge correlates responses by request identity. The engine issues a
//! single request at a time and suspends until the matching response
//! arrives; correlation keys are unique per instance and instance-scoped,
//! so two engines never misattribute each other's responses.

pub mod bridge;
pub mod codec;
pub mod storage;

// Re-export commonly used types for convenience
pub use bridge::{Action, Bridge, BridgeError, MediumKind, MemoryBridge, Request, Response};
pub use codec::{decode, encode, DecodedValue, EncodeError};
pub use storage::{Clock, ManualClock, StorageConfig, StorageEngine, StorageError, SystemClock};

/// Version of browserkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
