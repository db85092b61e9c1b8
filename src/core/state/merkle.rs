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

//! Deterministic Merkle tree over the local key/value state and its
//! existence proofs.
//!
//! leaf = H( spec.leaf_domain || H(key) || H(value) )
//! node = H( spec.node_domain || left || right )
//!
//! Proofs against a counterparty's committed state live in
//! `crate::ibc::commitment`.

use crate::core::types::serde_hex;
use ring::digest;
use serde::{Deserialize, Serialize};

/// Hash32 type.
pub type Hash32 = [u8; 32];

/// Hashing parameters for one tree layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProofSpec {
    /// Leaf domain separator.
    pub leaf_domain: &'static [u8],
    /// Inner node domain separator.
    pub node_domain: &'static [u8],
    /// Maximum accepted path length.
    pub max_depth: usize,
}

/// Spec of a single store's key/value tree.
pub const STORE_SPEC: ProofSpec = ProofSpec {
    leaf_domain: b"Maany-Store-Leaf-v1",
    node_domain: b"Maany-Store-Node-v1",
    max_depth: 64,
};

/// Side of sibling in proof.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Sibling is left.
    Left,
    /// Sibling is right.
    Right,
}

/// One proof item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofItem {
    /// Whether sibling is left or right of current hash.
    pub side: Side,
    /// Sibling hash.
    #[serde(with = "serde_hex::array32")]
    pub sibling: Hash32,
}

/// Proof that `key -> value` is a leaf of one tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistenceProof {
    /// Leaf key.
    #[serde(with = "serde_hex")]
    pub key: Vec<u8>,
    /// Leaf value.
    #[serde(with = "serde_hex")]
    pub value: Vec<u8>,
    /// Path items from leaf to root.
    pub path: Vec<ProofItem>,
}

fn h(data: &[u8]) -> Hash32 {
    let d = digest::digest(&digest::SHA256, data);
    let mut out = [0u8; 32];
    out.copy_from_slice(d.as_ref());
    out
}

impl ProofSpec {
    fn hash_leaf(&self, key: &[u8], value: &[u8]) -> Hash32 {
        let hk = h(key);
        let hv = h(value);
        let mut buf = Vec::with_capacity(self.leaf_domain.len() + 32 + 32);
        buf.extend_from_slice(self.leaf_domain);
        buf.extend_from_slice(&hk);
        buf.extend_from_slice(&hv);
        h(&buf)
    }

    fn hash_node(&self, left: Hash32, right: Hash32) -> Hash32 {
        let mut buf = Vec::with_capacity(self.node_domain.len() + 32 + 32);
        buf.extend_from_slice(self.node_domain);
        buf.extend_from_slice(&left);
        buf.extend_from_slice(&right);
        h(&buf)
    }

    fn next_level(&self, level: &[Hash32]) -> Vec<Hash32> {
        let mut next: Vec<Hash32> = Vec::with_capacity((level.len() + 1) / 2);
        let mut i = 0usize;
        while i < level.len() {
            let left = level[i];
            let right = if i + 1 < level.len() {
                level[i + 1]
            } else {
                level[i]
            };
            next.push(self.hash_node(left, right));
            i += 2;
        }
        next
    }
}

/// Build Merkle root from sorted (key,value) pairs.
/// If empty, returns ZERO hash.
pub fn merkle_root_sorted(spec: &ProofSpec, pairs: &[(Vec<u8>, Vec<u8>)]) -> Hash32 {
    if pairs.is_empty() {
        return [0u8; 32];
    }
    let mut level: Vec<Hash32> = pairs.iter().map(|(k, v)| spec.hash_leaf(k, v)).collect();
    while level.len() > 1 {
        level = spec.next_level(&level);
    }
    level[0]
}

/// Generate existence proof for the pair at `index` (pairs must be sorted).
pub fn existence_proof_sorted(
    spec: &ProofSpec,
    pairs: &[(Vec<u8>, Vec<u8>)],
    index: usize,
) -> Option<ExistenceProof> {
    if pairs.is_empty() || index >= pairs.len() {
        return None;
    }

    let mut level: Vec<Hash32> = pairs.iter().map(|(k, v)| spec.hash_leaf(k, v)).collect();
    let mut idx = index;
    let mut path: Vec<ProofItem> = Vec::new();

    while level.len() > 1 {
        let is_right = (idx % 2) == 1;
        let sib_idx = if is_right { idx - 1 } else { idx + 1 };

        let sibling = if sib_idx < level.len() {
            level[sib_idx]
        } else {
            level[idx]
        };

        path.push(ProofItem {
            side: if is_right { Side::Left } else { Side::Right },
            sibling,
        });

        level = spec.next_level(&level);
        idx /= 2;
    }

    let (key, value) = pairs[index].clone();
    Some(ExistenceProof { key, value, path })
}

impl ExistenceProof {
    /// Fold the path from the leaf up to the root it commits to.
    pub fn calculate_root(&self, spec: &ProofSpec) -> Hash32 {
        let mut cur = spec.hash_leaf(&self.key, &self.value);
        for item in self.path.iter() {
            cur = match item.side {
                Side::Left => spec.hash_node(item.sibling, cur),
                Side::Right => spec.hash_node(cur, item.sibling),
            };
        }
        cur
    }
}

/// Verify a single-layer existence proof against root.
pub fn verify_existence(spec: &ProofSpec, root: Hash32, proof: &ExistenceProof) -> bool {
    proof.path.len() <= spec.max_depth && proof.calculate_root(spec) == root
}
