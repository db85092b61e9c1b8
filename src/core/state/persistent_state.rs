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

//! Persistent key-value state using sled, with deterministic Merkle roots and inclusion proofs.

use crate::core::state::merkle::{
    existence_proof_sorted, merkle_root_sorted, verify_existence, ExistenceProof, Hash32,
    STORE_SPEC,
};
use crate::core::state::store::{KvOp, KvStore, StateError};
use sled::transaction::ConflictableTransactionError;

/// Persistent state wrapper.
#[derive(Clone)]
pub struct PersistentState {
    db: sled::Db,
}

impl PersistentState {
    /// Open sled DB at path (directory).
    pub fn open(path: &str) -> Result<Self, StateError> {
        let db = sled::open(path).map_err(|_| StateError::DbOpen)?;
        Ok(Self { db })
    }

    /// Atomic commit using sled transactions.
    pub fn commit_atomic(&self, ops: Vec<KvOp>) -> Result<(), StateError> {
        let tree = &self.db;
        let res: Result<(), ConflictableTransactionError<StateError>> = (|| {
            tree.transaction(|t| {
                for op in ops.iter() {
                    match op {
                        KvOp::Put { key, value } => {
                            t.insert(key.as_slice(), value.as_slice()).map_err(|_| {
                                ConflictableTransactionError::Abort(StateError::DbIo)
                            })?;
                        }
                        KvOp::Del { key } => {
                            t.remove(key.as_slice()).map_err(|_| {
                                ConflictableTransactionError::Abort(StateError::DbIo)
                            })?;
                        }
                    }
                }
                Ok(())
            })
            .map_err(|e| match e {
                sled::transaction::TransactionError::Abort(se) => {
                    ConflictableTransactionError::Abort(se)
                }
                sled::transaction::TransactionError::Storage(_) => {
                    ConflictableTransactionError::Abort(StateError::DbIo)
                }
            })
        })();

        match res {
            Ok(()) => Ok(()),
            Err(ConflictableTransactionError::Abort(e)) => Err(e),
            Err(ConflictableTransactionError::Conflict) => Err(StateError::TxConflict),
            Err(ConflictableTransactionError::Storage(_)) => Err(StateError::DbIo),
        }
    }

    fn sorted_pairs(&self) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StateError> {
        let mut pairs: Vec<(Vec<u8>, Vec<u8>)> = Vec::new();
        for item in self.db.iter() {
            let kv = item.map_err(|_| StateError::DbIo)?;
            pairs.push((kv.0.to_vec(), kv.1.to_vec()));
        }
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(pairs)
    }

    /// Deterministic Merkle root over all KV pairs in DB.
    pub fn state_root(&self) -> Result<Hash32, StateError> {
        Ok(merkle_root_sorted(&STORE_SPEC, &self.sorted_pairs()?))
    }

    /// Produce an inclusion proof for a key, if it exists.
    pub fn prove_key(&self, key: &[u8]) -> Result<Option<(Hash32, ExistenceProof)>, StateError> {
        if self.get(key)?.is_none() {
            return Ok(None);
        }

        let pairs = self.sorted_pairs()?;
        let root = merkle_root_sorted(&STORE_SPEC, &pairs);
        let Some(i) = pairs.binary_search_by(|p| p.0.as_slice().cmp(key)).ok() else {
            return Ok(None);
        };

        Ok(existence_proof_sorted(&STORE_SPEC, &pairs, i).map(|p| (root, p)))
    }

    /// Verify a Merkle proof.
    pub fn verify_proof(root: Hash32, proof: &ExistenceProof) -> bool {
        verify_existence(&STORE_SPEC, root, proof)
    }

    /// Flush dirty pages to disk.
    pub fn flush(&self) -> Result<(), StateError> {
        self.db.flush().map(|_| ()).map_err(|_| StateError::DbIo)
    }
}

impl KvStore for PersistentState {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        let v = self.db.get(key).map_err(|_| StateError::DbIo)?;
        Ok(v.map(|iv| iv.to_vec()))
    }

    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError> {
        self.db.insert(key, value).map_err(|_| StateError::DbIo)?;
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StateError> {
        self.db.remove(key).map_err(|_| StateError::DbIo)?;
        Ok(())
    }

    fn scan_prefix_from(
        &self,
        prefix: &[u8],
        start: &[u8],
        limit: Option<usize>,
    ) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StateError> {
        let from = if start > prefix { start } else { prefix };
        let mut out = Vec::new();
        for item in self.db.range(from.to_vec()..) {
            if limit.is_some_and(|n| out.len() >= n) {
                break;
            }
            let (k, v) = item.map_err(|_| StateError::DbIo)?;
            if !k.starts_with(prefix) {
                break;
            }
            out.push((k.to_vec(), v.to_vec()));
        }
        Ok(out)
    }

    fn apply(&mut self, ops: Vec<KvOp>) -> Result<(), StateError> {
        self.commit_atomic(ops)
    }
}
