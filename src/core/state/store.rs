// Copyright (c) 2026 Maany
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Key-value store abstraction with ordered prefix scans and a write-buffering
//! cache used to make multi-step effects atomic.

use std::collections::BTreeMap;
use thiserror::Error;

/// State errors.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("db open")]
    DbOpen,
    #[error("db io")]
    DbIo,
    #[error("tx conflict")]
    TxConflict,
    #[error("corrupt value under key {0}")]
    Corrupt(String),
}

/// State operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KvOp {
    /// Put key/value.
    Put { key: Vec<u8>, value: Vec<u8> },
    /// Delete key.
    Del { key: Vec<u8> },
}

/// Byte-keyed store with deterministic (lexicographic) iteration order.
pub trait KvStore {
    /// Get value.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError>;

    /// Put value.
    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError>;

    /// Remove key (no-op when absent).
    fn delete(&mut self, key: &[u8]) -> Result<(), StateError>;

    /// Pairs whose key starts with `prefix` and is `>= start`, in ascending
    /// key order, truncated to `limit` entries when given.
    fn scan_prefix_from(
        &self,
        prefix: &[u8],
        start: &[u8],
        limit: Option<usize>,
    ) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StateError>;

    /// All pairs whose key starts with `prefix`, in ascending key order,
    /// truncated to `limit` entries when given.
    fn scan_prefix(
        &self,
        prefix: &[u8],
        limit: Option<usize>,
    ) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StateError> {
        self.scan_prefix_from(prefix, prefix, limit)
    }

    /// Key presence.
    fn has(&self, key: &[u8]) -> Result<bool, StateError> {
        Ok(self.get(key)?.is_some())
    }

    /// Apply a batch of operations. Backends with native transactions override this.
    fn apply(&mut self, ops: Vec<KvOp>) -> Result<(), StateError> {
        for op in ops {
            match op {
                KvOp::Put { key, value } => self.set(&key, &value)?,
                KvOp::Del { key } => self.delete(&key)?,
            }
        }
        Ok(())
    }
}

fn lower_bound(prefix: &[u8], start: &[u8]) -> Vec<u8> {
    if start > prefix { start } else { prefix }.to_vec()
}

/// In-memory ordered store.
#[derive(Clone, Debug, Default)]
pub struct MemStore {
    inner: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True when no key is stored.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl KvStore for MemStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        Ok(self.inner.get(key).cloned())
    }

    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError> {
        self.inner.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StateError> {
        self.inner.remove(key);
        Ok(())
    }

    fn scan_prefix_from(
        &self,
        prefix: &[u8],
        start: &[u8],
        limit: Option<usize>,
    ) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StateError> {
        let it = self
            .inner
            .range(lower_bound(prefix, start)..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()));
        Ok(match limit {
            Some(n) => it.take(n).collect(),
            None => it.collect(),
        })
    }
}

/// Write buffer over a parent store. Reads see buffered writes; nothing reaches
/// the parent until the caller applies [`CacheStore::into_ops`].
pub struct CacheStore<'p> {
    parent: &'p dyn KvStore,
    writes: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl<'p> CacheStore<'p> {
    /// Branch off `parent`.
    pub fn new(parent: &'p dyn KvStore) -> Self {
        Self {
            parent,
            writes: BTreeMap::new(),
        }
    }

    /// Buffered writes in key order, ready for an atomic commit.
    pub fn into_ops(self) -> Vec<KvOp> {
        self.writes
            .into_iter()
            .map(|(key, v)| match v {
                Some(value) => KvOp::Put { key, value },
                None => KvOp::Del { key },
            })
            .collect()
    }
}

impl KvStore for CacheStore<'_> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        match self.writes.get(key) {
            Some(v) => Ok(v.clone()),
            None => self.parent.get(key),
        }
    }

    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError> {
        self.writes.insert(key.to_vec(), Some(value.to_vec()));
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StateError> {
        self.writes.insert(key.to_vec(), None);
        Ok(())
    }

    fn scan_prefix_from(
        &self,
        prefix: &[u8],
        start: &[u8],
        limit: Option<usize>,
    ) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StateError> {
        let buffered: Vec<(&Vec<u8>, &Option<Vec<u8>>)> = self
            .writes
            .range(lower_bound(prefix, start)..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .collect();
        // Each buffered delete can hide one parent entry.
        let hidden = buffered.iter().filter(|(_, v)| v.is_none()).count();
        let mut merged: BTreeMap<Vec<u8>, Vec<u8>> = self
            .parent
            .scan_prefix_from(prefix, start, limit.map(|n| n + hidden))?
            .into_iter()
            .collect();
        for (k, v) in buffered {
            match v {
                Some(v) => {
                    merged.insert(k.clone(), v.clone());
                }
                None => {
                    merged.remove(k);
                }
            }
        }
        let it = merged.into_iter();
        Ok(match limit {
            Some(n) => it.take(n).collect(),
            None => it.collect(),
        })
    }
}
