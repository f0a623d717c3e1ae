//! Bridge Module
//!
//! The bridge is the asynchronous request/response channel between the
//! storage engine and the browser-side runtime that physically manipulates
//! cookies, local storage or session storage.
//!
//! ## Contract
//!
//! ```text
//! ┌───────────────┐   Request { action, name?, value?,    ┌──────────────┐
//! │ StorageEngine │──   expires_at?, correlation_key }  ──>│ Browser-side │
//! │               │<──  Response (on a later transaction) ─│   runtime    │
//! └───────────────┘                                        └──────────────┘
//! ```
//!
//! - One outstanding request per storage instance; the engine suspends until
//!   the matching response arrives. Pipelining is not supported because
//!   response correlation depends on request ordering.
//! - `GET` answers with the raw entry string (or the absent sentinel),
//!   `GET_ALL` with the full name→raw mapping, `SET`/`DELETE` with a bare
//!   acknowledgement.
//!
//! [`MemoryBridge`] is an in-process implementation faithful to the browser
//! runtime's observable behavior, used by the test suite and useful as a
//! stand-in medium.

pub mod memory;
pub mod types;

// Re-export commonly used types
pub use memory::MemoryBridge;
pub use types::{Action, Bridge, BridgeError, CorrelationKeys, MediumKind, Request, Response};
