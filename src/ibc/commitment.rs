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

//! ICS-23 membership proofs against a counterparty's app hash.
//!
//! A provider commits its state in two layers: every named store is an IAVL
//! tree, and the app hash is a simple Merkle map of `store_name -> store_root`.
//! A [`MerkleProof`] carries one ICS-23 existence proof per layer, innermost
//! first, and is checked against the [`MerklePath`] `[store_name, key]` under
//! [`sdk_specs`].

use crate::core::state::merkle::Hash32;
use ics23::commitment_proof::Proof;
use ics23::{CommitmentProof, ExistenceProof, HashOp, HostFunctionsManager, InnerOp, LeafOp, LengthOp, ProofSpec};
use ring::digest;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Proof specs of a committed SDK state, innermost layer first.
pub fn sdk_specs() -> [ProofSpec; 2] {
    [ics23::iavl_spec(), ics23::tendermint_spec()]
}

/// Membership verification errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProofError {
    #[error("empty proof")]
    EmptyProof,
    #[error("proof has {proofs} layers, specs {specs}, path {path}")]
    LayerMismatch {
        proofs: usize,
        specs: usize,
        path: usize,
    },
    #[error("layer {layer} is not an existence proof")]
    NotExistence { layer: usize },
    #[error("key mismatch at layer {layer}")]
    KeyMismatch { layer: usize },
    #[error("value mismatch at layer {layer}")]
    ValueMismatch { layer: usize },
    #[error("layer {layer}: cannot compute root: {reason}")]
    Calculate { layer: usize, reason: String },
    #[error("layer {layer} rejected under its proof spec")]
    Rejected { layer: usize },
    #[error("computed root {computed} does not match {expected}")]
    RootMismatch { computed: String, expected: String },
}

/// Layered ICS-23 proof. Serialized as base64 protobuf, one entry per layer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MerkleProof {
    /// One commitment proof per layer, innermost first.
    #[serde(with = "proto_base64")]
    pub proofs: Vec<CommitmentProof>,
}

impl Eq for MerkleProof {}

mod proto_base64 {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use ics23::CommitmentProof;
    use prost::Message;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &[CommitmentProof], s: S) -> Result<S::Ok, S::Error> {
        s.collect_seq(v.iter().map(|p| STANDARD.encode(p.encode_to_vec())))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<CommitmentProof>, D::Error> {
        Vec::<String>::deserialize(d)?
            .iter()
            .map(|s| {
                let raw = STANDARD.decode(s.trim()).map_err(D::Error::custom)?;
                CommitmentProof::decode(raw.as_slice()).map_err(D::Error::custom)
            })
            .collect()
    }
}

/// Key path through the layers, outermost first (`[store_name, key]`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerklePath {
    /// Path segments.
    pub key_path: Vec<Vec<u8>>,
}

impl MerklePath {
    /// Path for `key` inside the store named `store_name`.
    pub fn new(store_name: &str, key: &[u8]) -> Self {
        Self {
            key_path: vec![store_name.as_bytes().to_vec(), key.to_vec()],
        }
    }
}

/// Verify that `value` is stored at `path` under the app hash `root`.
///
/// Layer `i` is checked with `specs[i]` against segment `path.len() - 1 - i`;
/// each layer's root is the value proven by the next, and the outermost root
/// must equal `root`.
pub fn verify_membership(
    specs: &[ProofSpec],
    root: &Hash32,
    path: &MerklePath,
    value: &[u8],
    proof: &MerkleProof,
) -> Result<(), ProofError> {
    if proof.proofs.is_empty() {
        return Err(ProofError::EmptyProof);
    }
    let layers = proof.proofs.len();
    if specs.len() != layers || path.key_path.len() != layers {
        return Err(ProofError::LayerMismatch {
            proofs: layers,
            specs: specs.len(),
            path: path.key_path.len(),
        });
    }

    let mut expected: Vec<u8> = value.to_vec();
    for (layer, (cp, spec)) in proof.proofs.iter().zip(specs.iter()).enumerate() {
        let Some(Proof::Exist(ex)) = &cp.proof else {
            return Err(ProofError::NotExistence { layer });
        };
        let key = &path.key_path[layers - 1 - layer];
        if &ex.key != key {
            return Err(ProofError::KeyMismatch { layer });
        }
        if ex.value != expected {
            return Err(ProofError::ValueMismatch { layer });
        }
        let subroot = ics23::calculate_existence_root::<HostFunctionsManager>(ex).map_err(|e| {
            ProofError::Calculate {
                layer,
                reason: e.to_string(),
            }
        })?;
        if !ics23::verify_membership::<HostFunctionsManager>(cp, spec, &subroot, key, &expected) {
            return Err(ProofError::Rejected { layer });
        }
        expected = subroot;
    }

    if expected.as_slice() != root.as_slice() {
        return Err(ProofError::RootMismatch {
            computed: hex::encode(&expected),
            expected: hex::encode(root),
        });
    }
    Ok(())
}

// -- commitment building ---------------------------------------------------
//
// Builds the same trees a provider commits so that local tooling and tests
// can produce proofs the verifier above accepts.

/// Named stores, each a sorted key/value set.
pub type MultiStore = BTreeMap<String, BTreeMap<Vec<u8>, Vec<u8>>>;

const IAVL_VERSION: i64 = 1;
// IAVL length-prefixes both child hashes; the simple tree concatenates them.
const IAVL_CHILD_SEP: &[u8] = &[0x20];
const NO_SEP: &[u8] = &[];

#[derive(Clone, Copy)]
enum Layer {
    Iavl,
    Simple,
}

fn sha256(parts: &[&[u8]]) -> Hash32 {
    let mut ctx = digest::Context::new(&digest::SHA256);
    for p in parts {
        ctx.update(p);
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(ctx.finish().as_ref());
    out
}

fn put_uvarint(out: &mut Vec<u8>, mut v: u64) {
    while v >= 0x80 {
        out.push((v as u8) | 0x80);
        v >>= 7;
    }
    out.push(v as u8);
}

fn put_varint(out: &mut Vec<u8>, v: i64) {
    put_uvarint(out, ((v << 1) ^ (v >> 63)) as u64);
}

impl Layer {
    // height, size and version of an IAVL node
    fn iavl_header(height: i64, size: i64) -> Vec<u8> {
        let mut h = Vec::with_capacity(6);
        put_varint(&mut h, height);
        put_varint(&mut h, size);
        put_varint(&mut h, IAVL_VERSION);
        h
    }

    fn leaf_op(self) -> LeafOp {
        LeafOp {
            hash: HashOp::Sha256 as i32,
            prehash_key: HashOp::NoHash as i32,
            prehash_value: HashOp::Sha256 as i32,
            length: LengthOp::VarProto as i32,
            prefix: match self {
                Layer::Iavl => Self::iavl_header(0, 1),
                Layer::Simple => vec![0],
            },
        }
    }

    fn leaf_hash(self, key: &[u8], value: &[u8]) -> Hash32 {
        let mut body = self.leaf_op().prefix;
        put_uvarint(&mut body, key.len() as u64);
        body.extend_from_slice(key);
        put_uvarint(&mut body, 32);
        body.extend_from_slice(&sha256(&[value]));
        sha256(&[body.as_slice()])
    }

    // (prefix, separator) of an inner node
    fn inner_parts(self, height: i64, size: usize) -> (Vec<u8>, &'static [u8]) {
        match self {
            Layer::Iavl => (Self::iavl_header(height, size as i64), IAVL_CHILD_SEP),
            Layer::Simple => (vec![1], NO_SEP),
        }
    }

    // Returns (hash, height) of the subtree over `leaves`, appending the path
    // of `target` (leaf first) to `path`.
    fn subtree(
        self,
        leaves: &[(Vec<u8>, Vec<u8>)],
        target: Option<usize>,
        path: &mut Vec<InnerOp>,
    ) -> (Hash32, i64) {
        if leaves.len() == 1 {
            return (self.leaf_hash(&leaves[0].0, &leaves[0].1), 0);
        }
        let mut split = 1usize;
        while split * 2 < leaves.len() {
            split *= 2;
        }
        let left_target = target.filter(|t| *t < split);
        let right_target = target.and_then(|t| t.checked_sub(split));
        let (left, lh) = self.subtree(&leaves[..split], left_target, path);
        let (right, rh) = self.subtree(&leaves[split..], right_target, path);

        let height = lh.max(rh) + 1;
        let (header, sep) = self.inner_parts(height, leaves.len());
        let hash = sha256(&[header.as_slice(), sep, &left[..], sep, &right[..]]);
        if left_target.is_some() {
            path.push(InnerOp {
                hash: HashOp::Sha256 as i32,
                prefix: [header.as_slice(), sep].concat(),
                suffix: [sep, right.as_slice()].concat(),
            });
        } else if right_target.is_some() {
            path.push(InnerOp {
                hash: HashOp::Sha256 as i32,
                prefix: [header.as_slice(), sep, left.as_slice(), sep].concat(),
                suffix: Vec::new(),
            });
        }
        (hash, height)
    }

    fn root(self, leaves: &[(Vec<u8>, Vec<u8>)]) -> Hash32 {
        if leaves.is_empty() {
            return [0u8; 32];
        }
        self.subtree(leaves, None, &mut Vec::new()).0
    }

    fn prove(self, leaves: &[(Vec<u8>, Vec<u8>)], index: usize) -> Option<ExistenceProof> {
        let (key, value) = leaves.get(index)?.clone();
        let mut path = Vec::new();
        self.subtree(leaves, Some(index), &mut path);
        Some(ExistenceProof {
            key,
            value,
            leaf: Some(self.leaf_op()),
            path,
        })
    }
}

fn store_roots(stores: &MultiStore) -> Vec<(Vec<u8>, Vec<u8>)> {
    stores
        .iter()
        .filter(|(_, kv)| !kv.is_empty())
        .map(|(name, kv)| {
            let leaves: Vec<(Vec<u8>, Vec<u8>)> =
                kv.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
            (name.as_bytes().to_vec(), Layer::Iavl.root(&leaves).to_vec())
        })
        .collect()
}

fn exist(ex: ExistenceProof) -> CommitmentProof {
    CommitmentProof {
        proof: Some(Proof::Exist(ex)),
    }
}

/// App hash of `stores`.
pub fn multistore_root(stores: &MultiStore) -> Hash32 {
    Layer::Simple.root(&store_roots(stores))
}

/// Prove `key` inside `store_name`, returning the app hash and the two-layer
/// proof.
pub fn prove_multistore(
    stores: &MultiStore,
    store_name: &str,
    key: &[u8],
) -> Option<(Hash32, MerkleProof)> {
    let kv = stores.get(store_name)?;
    let leaves: Vec<(Vec<u8>, Vec<u8>)> = kv.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
    let idx = leaves.binary_search_by(|p| p.0.as_slice().cmp(key)).ok()?;
    let inner = Layer::Iavl.prove(&leaves, idx)?;

    let roots = store_roots(stores);
    let sidx = roots
        .binary_search_by(|p| p.0.as_slice().cmp(store_name.as_bytes()))
        .ok()?;
    let outer = Layer::Simple.prove(&roots, sidx)?;

    Some((
        Layer::Simple.root(&roots),
        MerkleProof {
            proofs: vec![exist(inner), exist(outer)],
        },
    ))
}
