//! The storage engine: five public operations over one bridge primitive.
//!
//! Every operation is a validation pass plus at most a handful of bridge
//! round trips. Read-affecting operations (`get`, `get_all`, `exists`,
//! `expires_in`) first run the expiry sweep: fetch everything, delete every
//! entry whose expiry instant has passed, and only then serve the read — so
//! no caller ever observes a logically-expired value.
//!
//! ## Failure policy
//!
//! Validation failures are raised before any request is sent; nothing is
//! partially applied. Transport failures on `GET`/`GET_ALL` degrade to
//! "absent" (a missing entry and a transport glitch are indistinguishable
//! without richer signaling from the medium), while failures on `SET` and
//! `DELETE` — including the deletes issued by the sweep — propagate, so data
//! loss is never silent.
//!
//! ## Concurrency
//!
//! One outstanding bridge request at a time per instance; each public
//! operation suspends on its round trip and is effectively synchronous from
//! the caller's perspective. Concurrent calls on one instance are not
//! composable; use one engine per logical caller.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::TimeDelta;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::bridge::types::{
    Action, Bridge, BridgeError, CorrelationKeys, MediumKind, Request, Response,
};
use crate::codec::{self, DecodedValue, EncodeError};
use crate::storage::clock::{Clock, SystemClock};
use crate::storage::config::StorageConfig;

/// Errors raised by storage operations.
///
/// All variants except [`Bridge`](StorageError::Bridge) are validation
/// failures: they are raised synchronously, before any request is sent, and
/// leave the medium untouched.
#[derive(Debug, Error)]
pub enum StorageError {
    /// `name` was empty.
    #[error("`name` must be a non-empty string")]
    EmptyName,

    /// `value` was null or an empty string. "No value" means delete, not
    /// store; use [`StorageEngine::delete`] to clear an entry.
    #[error("`value` must be non-empty; delete the entry instead")]
    EmptyValue,

    /// `value` has no JSON representation.
    #[error("`value` must be JSON-serializable: {0}")]
    NotSerializable(#[from] EncodeError),

    /// The medium already holds the maximum number of distinct names.
    #[error("allowed maximum of {max} entries exceeded; remove some before adding more")]
    TooManyEntries {
        /// The configured entry-count bound.
        max: usize,
    },

    /// `name` plus the encoded value exceed the per-entry size bound.
    #[error("`name` and encoded `value` are {size} bytes, exceeding the allowed maximum of {max}")]
    EntryTooLarge {
        /// The offending entry's byte size.
        size: usize,
        /// The configured size bound.
        max: usize,
    },

    /// A `SET` or `DELETE` could not be applied.
    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

impl StorageError {
    /// Returns true for validation failures (everything but transport).
    pub fn is_validation(&self) -> bool {
        !matches!(self, StorageError::Bridge(_))
    }
}

/// Key/value storage over one browser medium, addressed through a [`Bridge`].
///
/// The three media are thin configuration variants of the same engine; use
/// [`cookie`](StorageEngine::cookie), [`local_storage`](StorageEngine::local_storage)
/// or [`session_storage`](StorageEngine::session_storage).
///
/// # Example
///
/// ```
/// use browserkv::bridge::MemoryBridge;
/// use browserkv::storage::StorageEngine;
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), browserkv::StorageError> {
/// let engine = StorageEngine::cookie("session", Arc::new(MemoryBridge::new()));
///
/// engine.set("token", "abc123", Some(Duration::from_secs(3600))).await?;
/// assert!(engine.exists("token").await?);
/// assert!(engine.expires_in("token").await?.unwrap() <= 3600);
/// # Ok(())
/// # }
/// ```
pub struct StorageEngine<B> {
    bridge: B,
    medium: MediumKind,
    config: StorageConfig,
    keys: CorrelationKeys,
    clock: Arc<dyn Clock>,
}

impl<B: Bridge> StorageEngine<B> {
    /// Creates a cookie-backed engine with the cookie limits.
    pub fn cookie(instance: impl Into<String>, bridge: B) -> Self {
        Self::with_config(MediumKind::Cookie, instance, bridge, StorageConfig::cookie())
    }

    /// Creates a `localStorage`-backed engine with the local-storage limits.
    pub fn local_storage(instance: impl Into<String>, bridge: B) -> Self {
        Self::with_config(MediumKind::Local, instance, bridge, StorageConfig::local())
    }

    /// Creates a `sessionStorage`-backed engine with the session-storage limits.
    pub fn session_storage(instance: impl Into<String>, bridge: B) -> Self {
        Self::with_config(MediumKind::Session, instance, bridge, StorageConfig::session())
    }

    /// Creates an engine with explicit limits.
    ///
    /// `instance` scopes this engine's correlation keys; two engines
    /// addressing the same medium namespace must use distinct instances.
    pub fn with_config(
        medium: MediumKind,
        instance: impl Into<String>,
        bridge: B,
        config: StorageConfig,
    ) -> Self {
        Self {
            bridge,
            medium,
            config,
            keys: CorrelationKeys::new(instance),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the clock, for deterministic expiry in tests.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The medium this engine addresses.
    pub fn medium(&self) -> MediumKind {
        self.medium
    }

    /// The limits this engine enforces.
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// The underlying bridge.
    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    /// Stores `value` under `name`, optionally expiring after `ttl`.
    ///
    /// The TTL is converted to an absolute UTC instant once, at write time,
    /// and applied at whole-second precision. A zero TTL means no expiry.
    /// Overwriting an existing name replaces both its value and its expiry.
    ///
    /// # Errors
    ///
    /// Any [`StorageError`] validation variant, raised before a request is
    /// sent, or [`StorageError::Bridge`] if the medium rejects the write.
    pub async fn set<T: Serialize>(
        &self,
        name: &str,
        value: T,
        ttl: Option<Duration>,
    ) -> Result<(), StorageError> {
        if name.is_empty() {
            return Err(StorageError::EmptyName);
        }

        let value = serde_json::to_value(value).map_err(EncodeError::from)?;
        if is_no_value(&value) {
            return Err(StorageError::EmptyValue);
        }

        let now = self.clock.now();
        let expires_at = ttl
            .filter(|ttl| !ttl.is_zero())
            .map(|ttl| {
                now.checked_add_signed(TimeDelta::seconds(ttl.as_secs() as i64))
                    .unwrap_or(chrono::DateTime::<chrono::Utc>::MAX_UTC)
            });

        let raw = codec::encode(&value, expires_at)?;

        let live: Vec<String> = self
            .fetch_entries()
            .await
            .into_iter()
            .filter(|(_, entry)| !entry.is_expired_at(now))
            .map(|(name, _)| name)
            .collect();
        if !live.iter().any(|existing| existing == name)
            && live.len() >= self.config.max_entries_count
        {
            return Err(StorageError::TooManyEntries {
                max: self.config.max_entries_count,
            });
        }

        let size = name.len() + raw.len();
        if size > self.config.max_entry_size {
            return Err(StorageError::EntryTooLarge {
                size,
                max: self.config.max_entry_size,
            });
        }

        let request = Request::set(
            self.medium,
            self.keys.next(Action::Set),
            name,
            raw,
            expires_at.map(|at| at.to_rfc3339()),
        );
        self.bridge.send(request).await?;

        debug!(
            name,
            medium = %self.medium,
            expires_at = ?expires_at,
            "Entry stored"
        );
        Ok(())
    }

    /// Returns the value stored under `name`, or `None` if the entry is
    /// absent or expired.
    ///
    /// Runs the expiry sweep first; a transport failure on the read itself
    /// degrades to `None`.
    pub async fn get(&self, name: &str) -> Result<Option<Value>, StorageError> {
        self.sweep().await?;

        Ok(self.fetch_entry(name).await.and_then(|entry| match entry.value {
            Value::Null => None,
            value => Some(value),
        }))
    }

    /// Returns every live entry as a name → value mapping, expiry stripped.
    pub async fn get_all(&self) -> Result<HashMap<String, Value>, StorageError> {
        self.sweep().await?;

        let now = self.clock.now();
        Ok(self
            .fetch_entries()
            .await
            .into_iter()
            .filter(|(_, entry)| !entry.is_expired_at(now))
            .map(|(name, entry)| (name, entry.value))
            .collect())
    }

    /// Removes `name` from the medium. Deleting an absent name is not an
    /// error.
    pub async fn delete(&self, name: &str) -> Result<(), StorageError> {
        let request = Request::delete(self.medium, self.keys.next(Action::Delete), name);
        self.bridge.send(request).await?;

        trace!(name, medium = %self.medium, "Entry deleted");
        Ok(())
    }

    /// Removes every entry this engine can enumerate.
    pub async fn delete_all(&self) -> Result<(), StorageError> {
        let names: Vec<String> = self.fetch_entries().await.into_keys().collect();
        for name in &names {
            self.delete(name).await?;
        }

        debug!(count = names.len(), medium = %self.medium, "All entries deleted");
        Ok(())
    }

    /// Returns true if a live entry exists under `name`.
    pub async fn exists(&self, name: &str) -> Result<bool, StorageError> {
        Ok(self.get(name).await?.is_some())
    }

    /// Returns the whole seconds until `name` expires.
    ///
    /// `None` when the entry is absent or was stored without a TTL.
    pub async fn expires_in(&self, name: &str) -> Result<Option<i64>, StorageError> {
        self.sweep().await?;

        let Some(entry) = self.fetch_entry(name).await else {
            return Ok(None);
        };
        let Some(expires_at) = entry.expires_at else {
            return Ok(None);
        };

        Ok(Some(expires_at.timestamp() - self.clock.now().timestamp()))
    }

    /// The expiry sweep: deletes every entry whose expiry instant is at or
    /// before now.
    ///
    /// Each expired name gets its own `DELETE`, independently observable;
    /// all of them are awaited before the triggering read proceeds.
    async fn sweep(&self) -> Result<(), StorageError> {
        let now = self.clock.now();

        for (name, entry) in self.fetch_entries().await {
            if entry.is_expired_at(now) {
                debug!(name = %name, medium = %self.medium, "Purging expired entry");
                self.delete(&name).await?;
            }
        }
        Ok(())
    }

    /// Fetches and decodes one entry. Transport failures and malformed
    /// response shapes read as absent.
    async fn fetch_entry(&self, name: &str) -> Option<DecodedValue> {
        let request = Request::get(self.medium, self.keys.next(Action::Get), name);
        match self.bridge.send(request).await {
            Ok(Response::Value(raw)) => Some(codec::decode(&raw)),
            Ok(response) => {
                warn!(name, ?response, "GET answered with an unexpected shape; treating as absent");
                None
            }
            Err(error) => {
                warn!(name, %error, "GET failed; treating as absent");
                None
            }
        }
    }

    /// Fetches and decodes the full mapping. Transport failures and
    /// malformed response shapes read as an empty medium.
    async fn fetch_entries(&self) -> HashMap<String, DecodedValue> {
        let request = Request::get_all(self.medium, self.keys.next(Action::GetAll));
        match self.bridge.send(request).await {
            Ok(Response::Entries(entries)) => entries
                .into_iter()
                .map(|(name, raw)| {
                    let entry = codec::decode(&raw);
                    (name, entry)
                })
                .collect(),
            Ok(response) => {
                warn!(?response, "GET_ALL answered with an unexpected shape; treating as empty");
                HashMap::new()
            }
            Err(error) => {
                warn!(%error, "GET_ALL failed; treating as empty");
                HashMap::new()
            }
        }
    }
}

/// The emptiness policy: null and the empty string mean "no value" and are
/// rejected; `0`, `false`, `[]` and `{}` are legitimate values.
fn is_no_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
