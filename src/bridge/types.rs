//! Bridge request/response types and the transport trait.
//!
//! The action set is a closed discriminated union so every bridge
//! implementation can be checked for exhaustiveness; the wire names
//! (`SET`, `GET`, `GET_ALL`, `DELETE`) are fixed.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use thiserror::Error;

/// The operation a request asks the browser-side runtime to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Store a raw entry string under a name.
    Set,
    /// Fetch the raw entry string for one name.
    Get,
    /// Fetch the full name → raw-string mapping.
    GetAll,
    /// Remove one name (a no-op for absent names).
    Delete,
}

impl Action {
    /// The wire name of this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Set => "SET",
            Action::Get => "GET",
            Action::GetAll => "GET_ALL",
            Action::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The browser-side persistence mechanism a request addresses.
///
/// A single runtime can serve several media; every request carries the kind
/// so the runtime knows which one to touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediumKind {
    /// The cookie jar.
    Cookie,
    /// `window.localStorage`.
    Local,
    /// `window.sessionStorage`.
    Session,
}

impl MediumKind {
    /// The wire name of this medium.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediumKind::Cookie => "CookieStorage",
            MediumKind::Local => "LocalStorage",
            MediumKind::Session => "SessionStorage",
        }
    }
}

impl fmt::Display for MediumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One request sent across the bridge.
///
/// Only `SET` populates `value` and `expires_at`; `GET` and `DELETE` carry a
/// `name`; `GET_ALL` carries neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Which medium to address.
    pub medium: MediumKind,
    /// The operation to perform.
    pub action: Action,
    /// The entry name, for name-scoped actions.
    pub name: Option<String>,
    /// The encoded raw entry string, for `SET`.
    pub value: Option<String>,
    /// The expiry instant in RFC 3339 form, for `SET` (media such as cookies
    /// apply it natively in addition to the encoded suffix).
    pub expires_at: Option<String>,
    /// Unique identifier matching this request to its response.
    pub correlation_key: String,
}

impl Request {
    /// Builds a `SET` request.
    pub fn set(
        medium: MediumKind,
        correlation_key: String,
        name: &str,
        value: String,
        expires_at: Option<String>,
    ) -> Self {
        Self {
            medium,
            action: Action::Set,
            name: Some(name.to_string()),
            value: Some(value),
            expires_at,
            correlation_key,
        }
    }

    /// Builds a `GET` request.
    pub fn get(medium: MediumKind, correlation_key: String, name: &str) -> Self {
        Self {
            medium,
            action: Action::Get,
            name: Some(name.to_string()),
            value: None,
            expires_at: None,
            correlation_key,
        }
    }

    /// Builds a `GET_ALL` request.
    pub fn get_all(medium: MediumKind, correlation_key: String) -> Self {
        Self {
            medium,
            action: Action::GetAll,
            name: None,
            value: None,
            expires_at: None,
            correlation_key,
        }
    }

    /// Builds a `DELETE` request.
    pub fn delete(medium: MediumKind, correlation_key: String, name: &str) -> Self {
        Self {
            medium,
            action: Action::Delete,
            name: Some(name.to_string()),
            value: None,
            expires_at: None,
            correlation_key,
        }
    }
}

/// One response received across the bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Acknowledgement for `SET` and `DELETE`; content unused by the engine.
    Ack,
    /// Answer to `GET`: the raw entry string, or the absent sentinel
    /// ([`crate::codec::ABSENT`]) when the name is not present.
    Value(String),
    /// Answer to `GET_ALL`: the full mapping. Empty when the medium is empty,
    /// never absent.
    Entries(HashMap<String, String>),
}

/// Errors originating in the transport or the browser-side runtime.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The request could not be delivered or the response never arrived
    /// in a usable form.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The runtime answered with a response shape the action does not
    /// produce (e.g. an `Ack` for a `GET`).
    #[error("unexpected response for {action}")]
    UnexpectedResponse {
        /// The action whose response was malformed.
        action: Action,
    },
}

/// The asynchronous channel to a browser-side medium.
///
/// Implementations apply each `SET`/`DELETE` atomically, one request at a
/// time; the engine never assumes multiple entries change as a batch.
#[async_trait]
pub trait Bridge: Send + Sync {
    /// Delivers one request and resolves with its matched response.
    ///
    /// The core imposes no timeout; callers needing bounded latency must
    /// enforce it in their implementation.
    async fn send(&self, request: Request) -> Result<Response, BridgeError>;
}

#[async_trait]
impl<B: Bridge + ?Sized> Bridge for std::sync::Arc<B> {
    async fn send(&self, request: Request) -> Result<Response, BridgeError> {
        (**self).send(request).await
    }
}

/// Per-instance generator of request correlation keys.
///
/// Keys have the form `{instance}:{ACTION}:{seq}` with a monotonically
/// increasing sequence number, so every request within one storage instance
/// gets a distinct transport identifier. The instance prefix keeps two
/// engines addressing the same medium namespace from ever colliding. Nothing
/// is retained per key, so correlation state cannot grow without bound.
#[derive(Debug)]
pub struct CorrelationKeys {
    instance: String,
    next_seq: AtomicU64,
}

impl CorrelationKeys {
    /// Creates a generator scoped to one storage instance.
    pub fn new(instance: impl Into<String>) -> Self {
        Self {
            instance: instance.into(),
            next_seq: AtomicU64::new(1),
        }
    }

    /// The instance prefix this generator is scoped to.
    pub fn instance(&self) -> &str {
        &self.instance
    }

    /// Produces the next key for the given action.
    pub fn next(&self, action: Action) -> String {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        format!("{}:{}:{}", self.instance, action, seq)
    }
}
