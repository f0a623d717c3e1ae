//! In-process bridge backed by a plain map.
//!
//! `MemoryBridge` behaves exactly like the browser-side runtime as observed
//! through the bridge contract: `SET` stores the raw string, `GET` answers
//! with the raw string or the absent sentinel, `GET_ALL` answers with the
//! full mapping and `DELETE` is idempotent. It backs the test suite and
//! works as a stand-in medium wherever no browser is available.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::trace;

use crate::bridge::types::{Action, Bridge, BridgeError, Request, Response};
use crate::codec::ABSENT;

/// An in-memory medium implementing the [`Bridge`] contract.
#[derive(Debug, Default)]
pub struct MemoryBridge {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryBridge {
    /// Creates an empty in-memory medium.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw string stored under `name`, if any.
    ///
    /// This inspects the underlying store directly, bypassing the bridge
    /// contract; tests use it to observe what a sweep physically removed.
    pub fn raw(&self, name: &str) -> Option<String> {
        self.entries.read().unwrap().get(name).cloned()
    }

    /// Returns a copy of the full underlying store.
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.entries.read().unwrap().clone()
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn name_of(request: &Request) -> Result<&str, BridgeError> {
        request
            .name
            .as_deref()
            .ok_or_else(|| BridgeError::Transport(format!("{} without a name", request.action)))
    }
}

#[async_trait]
impl Bridge for MemoryBridge {
    async fn send(&self, request: Request) -> Result<Response, BridgeError> {
        trace!(
            action = %request.action,
            key = %request.correlation_key,
            "Memory bridge request"
        );

        match request.action {
            Action::Set => {
                let name = Self::name_of(&request)?.to_string();
                let value = request.value.ok_or_else(|| {
                    BridgeError::Transport("SET without a value".to_string())
                })?;
                self.entries.write().unwrap().insert(name, value);
                Ok(Response::Ack)
            }
            Action::Get => {
                let name = Self::name_of(&request)?;
                let raw = self
                    .entries
                    .read()
                    .unwrap()
                    .get(name)
                    .cloned()
                    .unwrap_or_else(|| ABSENT.to_string());
                Ok(Response::Value(raw))
            }
            Action::GetAll => Ok(Response::Entries(self.snapshot())),
            Action::Delete => {
                let name = Self::name_of(&request)?;
                self.entries.write().unwrap().remove(name);
                Ok(Response::Ack)
            }
        }
    }
}
