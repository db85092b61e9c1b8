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

//! Per-transaction execution context.
//!
//! Every entry point (genesis, begin-block, packet and channel callbacks) runs
//! to completion against one `Context`. The host's transaction boundary is the
//! only concurrency control; [`Context::atomic`] nests a sub-transaction whose
//! writes and events are kept only when the closure succeeds.

use crate::core::state::store::{CacheStore, KvStore, StateError};
use crate::core::types::Event;

/// Execution context handed to keepers and collaborators.
pub struct Context<'a> {
    store: &'a mut dyn KvStore,
    block_height: u64,
    chain_id: String,
    events: Vec<Event>,
}

impl<'a> Context<'a> {
    /// New context over `store` at `block_height`.
    pub fn new(store: &'a mut dyn KvStore, chain_id: impl Into<String>, block_height: u64) -> Self {
        Self {
            store,
            block_height,
            chain_id: chain_id.into(),
            events: Vec::new(),
        }
    }

    /// Read access to state.
    pub fn store(&self) -> &dyn KvStore {
        &*self.store
    }

    /// Write access to state.
    pub fn store_mut(&mut self) -> &mut dyn KvStore {
        &mut *self.store
    }

    /// Current block height.
    pub fn block_height(&self) -> u64 {
        self.block_height
    }

    /// Local chain id.
    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    /// Record an event.
    pub fn emit(&mut self, ev: Event) {
        self.events.push(ev);
    }

    /// Events emitted so far.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Drain emitted events.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Run `f` against a cached branch of this context. Writes and events are
    /// committed in one batch only if `f` returns `Ok`; otherwise they are
    /// discarded and state is untouched.
    pub fn atomic<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Context<'_>) -> Result<T, E>,
        E: From<StateError>,
    {
        let (res, ops, events) = {
            let mut cache = CacheStore::new(&*self.store);
            let mut branch = Context::new(&mut cache, self.chain_id.clone(), self.block_height);
            let res = f(&mut branch);
            let events = branch.take_events();
            drop(branch);
            (res, cache.into_ops(), events)
        };

        let out = res?;
        self.store.apply(ops)?;
        self.events.extend(events);
        Ok(out)
    }
}
