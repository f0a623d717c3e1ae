//! Storage Engine Module
//!
//! The storage engine implements the public key/value operations on top of a
//! single async bridge primitive, including the lazy expiry sweep that runs
//! before every read-affecting operation.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     StorageEngine                        │
//! │                                                          │
//! │  set / get / get_all / delete / exists / expires_in      │
//! │        │                                                 │
//! │        ▼                                                 │
//! │  validate ──> sweep expired ──> one bridge round trip    │
//! └──────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//!                   Bridge (async, external)
//! ```
//!
//! ## Example
//!
//! ```
//! use browserkv::bridge::MemoryBridge;
//! use browserkv::storage::StorageEngine;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), browserkv::StorageError> {
//! let engine = StorageEngine::local_storage("demo", Arc::new(MemoryBridge::new()));
//!
//! engine.set("greeting", "hello", None).await?;
//! assert_eq!(engine.get("greeting").await?, Some("hello".into()));
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod config;
pub mod engine;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::StorageConfig;
pub use engine::{StorageEngine, StorageError};
