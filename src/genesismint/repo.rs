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

//! Typed accessors over the module's key families.

use crate::core::state::store::{KvStore, StateError};
use crate::core::types::{decode_canonical_limited, encode_canonical, MAX_STORED_VALUE};
use crate::genesismint::keys;
use crate::genesismint::types::{ClaimId, Params};

const SENTINEL: &[u8] = &[1];

fn corrupt(key: &[u8]) -> StateError {
    StateError::Corrupt(hex::encode(key))
}

/// Claims whose mint has happened. Entries are never removed.
pub struct ClaimedIndex;

impl ClaimedIndex {
    /// Membership.
    pub fn contains(store: &dyn KvStore, id: &ClaimId) -> Result<bool, StateError> {
        store.has(&keys::claimed_key(id))
    }

    /// Record `id` as claimed.
    pub fn insert(store: &mut dyn KvStore, id: &ClaimId) -> Result<(), StateError> {
        store.set(&keys::claimed_key(id), SENTINEL)
    }

    /// All claimed ids in key order.
    pub fn all(store: &dyn KvStore) -> Result<Vec<ClaimId>, StateError> {
        store
            .scan_prefix(&[keys::CLAIMED_PREFIX], None)?
            .into_iter()
            .map(|(k, _)| keys::decode_claim_key(keys::CLAIMED_PREFIX, &k).ok_or_else(|| corrupt(&k)))
            .collect()
    }
}

/// Claims whose remote notification has not been delivered.
pub struct PendingQueue;

impl PendingQueue {
    /// Enqueue.
    pub fn insert(store: &mut dyn KvStore, id: &ClaimId) -> Result<(), StateError> {
        store.set(&keys::pending_key(id), SENTINEL)
    }

    /// Dequeue (no-op when absent).
    pub fn remove(store: &mut dyn KvStore, id: &ClaimId) -> Result<(), StateError> {
        store.delete(&keys::pending_key(id))
    }

    /// Membership.
    pub fn contains(store: &dyn KvStore, id: &ClaimId) -> Result<bool, StateError> {
        store.has(&keys::pending_key(id))
    }

    /// True when nothing is pending, including in-flight entries.
    pub fn is_empty(store: &dyn KvStore) -> Result<bool, StateError> {
        Ok(store.scan_prefix(&[keys::PENDING_PREFIX], Some(1))?.is_empty())
    }

    /// Pending ids in key order.
    pub fn list(store: &dyn KvStore, limit: Option<usize>) -> Result<Vec<ClaimId>, StateError> {
        store
            .scan_prefix(&[keys::PENDING_PREFIX], limit)?
            .into_iter()
            .map(|(k, _)| keys::decode_claim_key(keys::PENDING_PREFIX, &k).ok_or_else(|| corrupt(&k)))
            .collect()
    }

    /// Up to `max` pending ids in key order that are not awaiting an acknowledgement.
    ///
    /// Reads the queue in pages of `max` and stops as soon as enough are found.
    pub fn ready(store: &dyn KvStore, max: usize) -> Result<Vec<ClaimId>, StateError> {
        let mut out = Vec::with_capacity(max);
        if max == 0 {
            return Ok(out);
        }
        let prefix = [keys::PENDING_PREFIX];
        let mut cursor = prefix.to_vec();
        loop {
            let page = store.scan_prefix_from(&prefix, &cursor, Some(max))?;
            for (k, _) in &page {
                let id = keys::decode_claim_key(keys::PENDING_PREFIX, k).ok_or_else(|| corrupt(k))?;
                if InFlight::contains_claim(store, &id)? {
                    continue;
                }
                out.push(id);
                if out.len() == max {
                    return Ok(out);
                }
            }
            match page.last() {
                Some((k, _)) if page.len() == max => {
                    cursor = k.clone();
                    cursor.push(0);
                }
                _ => return Ok(out),
            }
        }
    }
}

/// Notifications sent and awaiting acknowledgement or timeout.
pub struct InFlight;

impl InFlight {
    /// Record that `id` went out as `sequence` on `channel_id`.
    pub fn mark(
        store: &mut dyn KvStore,
        channel_id: &str,
        sequence: u64,
        id: &ClaimId,
    ) -> Result<(), StateError> {
        store.set(&keys::inflight_key(channel_id, sequence), &keys::claim_body(id))?;
        store.set(
            &keys::inflight_claim_key(id),
            &keys::inflight_key(channel_id, sequence),
        )
    }

    /// Whether `id` is awaiting an acknowledgement.
    pub fn contains_claim(store: &dyn KvStore, id: &ClaimId) -> Result<bool, StateError> {
        store.has(&keys::inflight_claim_key(id))
    }

    /// Remove the record for `(channel_id, sequence)` and return its claim.
    pub fn resolve(
        store: &mut dyn KvStore,
        channel_id: &str,
        sequence: u64,
    ) -> Result<Option<ClaimId>, StateError> {
        let key = keys::inflight_key(channel_id, sequence);
        let Some(body) = store.get(&key)? else {
            return Ok(None);
        };
        let id = keys::decode_claim_body(&body).ok_or_else(|| corrupt(&key))?;
        store.delete(&key)?;
        store.delete(&keys::inflight_claim_key(&id))?;
        Ok(Some(id))
    }
}

/// Singleton configuration and workflow flags.
pub struct Config;

impl Config {
    /// Stored params.
    pub fn params(store: &dyn KvStore) -> Result<Option<Params>, StateError> {
        match store.get(keys::PARAMS_KEY)? {
            None => Ok(None),
            Some(raw) => decode_canonical_limited(&raw, MAX_STORED_VALUE)
                .map(Some)
                .map_err(|_| corrupt(keys::PARAMS_KEY)),
        }
    }

    /// Persist params.
    pub fn set_params(store: &mut dyn KvStore, params: &Params) -> Result<(), StateError> {
        let raw = encode_canonical(params).map_err(|_| corrupt(keys::PARAMS_KEY))?;
        store.set(keys::PARAMS_KEY, &raw)
    }

    /// Whether a registration handshake was started for `(connection, owner)`.
    pub fn ica_pending(store: &dyn KvStore, connection_id: &str, owner: &str) -> Result<bool, StateError> {
        store.has(&keys::ica_pending_key(connection_id, owner))
    }

    /// Set or clear the registration flag.
    pub fn set_ica_pending(
        store: &mut dyn KvStore,
        connection_id: &str,
        owner: &str,
        pending: bool,
    ) -> Result<(), StateError> {
        let k = keys::ica_pending_key(connection_id, owner);
        if pending {
            store.set(&k, SENTINEL)
        } else {
            store.delete(&k)
        }
    }

    /// One-shot completion flag.
    pub fn is_done(store: &dyn KvStore) -> Result<bool, StateError> {
        store.has(keys::DONE_KEY)
    }

    /// Set the completion flag.
    pub fn set_done(store: &mut dyn KvStore) -> Result<(), StateError> {
        store.set(keys::DONE_KEY, SENTINEL)
    }
}
