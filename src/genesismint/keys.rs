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

//! Store key layout of the claim workflow.
//!
//! Composite keys length-prefix every variable segment except the last one
//! (`u32` big-endian), so distinct tuples never share an encoding and keys
//! decode back into their parts.

use crate::genesismint::types::ClaimId;

/// Claimed index: claim -> sentinel.
pub const CLAIMED_PREFIX: u8 = 0x11;
/// Pending notifications: claim -> sentinel.
pub const PENDING_PREFIX: u8 = 0x12;
/// Remote-account registration in progress: (connection, owner) -> sentinel.
pub const ICA_PENDING_PREFIX: u8 = 0x13;
/// One-shot completion flag.
pub const DONE_KEY: &[u8] = &[0x14];
/// Stored params.
pub const PARAMS_KEY: &[u8] = &[0x15];
/// Notifications awaiting acknowledgement: (channel, sequence) -> claim.
pub const INFLIGHT_PREFIX: u8 = 0x16;
/// Reverse in-flight index: claim -> (channel, sequence).
pub const INFLIGHT_CLAIM_PREFIX: u8 = 0x17;

/// Every prefix byte owned by this module.
pub const PREFIXES: [u8; 7] = [
    CLAIMED_PREFIX,
    PENDING_PREFIX,
    ICA_PENDING_PREFIX,
    DONE_KEY[0],
    PARAMS_KEY[0],
    INFLIGHT_PREFIX,
    INFLIGHT_CLAIM_PREFIX,
];

/// True when no byte appears twice in `set`.
pub const fn all_distinct(set: &[u8]) -> bool {
    let mut i = 0;
    while i < set.len() {
        let mut j = i + 1;
        while j < set.len() {
            if set[i] == set[j] {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const _: () = assert!(all_distinct(&PREFIXES));

fn push_segment(out: &mut Vec<u8>, seg: &[u8]) {
    out.extend_from_slice(&(seg.len() as u32).to_be_bytes());
    out.extend_from_slice(seg);
}

fn split_segment(raw: &[u8]) -> Option<(&[u8], &[u8])> {
    let len_bytes: [u8; 4] = raw.get(..4)?.try_into().ok()?;
    let len = u32::from_be_bytes(len_bytes) as usize;
    let rest = &raw[4..];
    if rest.len() < len {
        return None;
    }
    Some(rest.split_at(len))
}

/// `prefix | len(chain) | chain | escrow`.
pub fn claim_key(prefix: u8, id: &ClaimId) -> Vec<u8> {
    let mut k = Vec::with_capacity(1 + 4 + id.provider_chain_id.len() + id.escrow_id.len());
    k.push(prefix);
    push_segment(&mut k, id.provider_chain_id.as_bytes());
    k.extend_from_slice(id.escrow_id.as_bytes());
    k
}

/// Inverse of [`claim_key`] for keys under `prefix`.
pub fn decode_claim_key(prefix: u8, key: &[u8]) -> Option<ClaimId> {
    let (&p, rest) = key.split_first()?;
    if p != prefix {
        return None;
    }
    let (chain, escrow) = split_segment(rest)?;
    Some(ClaimId::new(
        std::str::from_utf8(chain).ok()?,
        std::str::from_utf8(escrow).ok()?,
    ))
}

/// Claimed-index key.
pub fn claimed_key(id: &ClaimId) -> Vec<u8> {
    claim_key(CLAIMED_PREFIX, id)
}

/// Pending-queue key.
pub fn pending_key(id: &ClaimId) -> Vec<u8> {
    claim_key(PENDING_PREFIX, id)
}

/// Registration flag key for `(connection, owner)`.
pub fn ica_pending_key(connection_id: &str, owner: &str) -> Vec<u8> {
    let mut k = vec![ICA_PENDING_PREFIX];
    push_segment(&mut k, connection_id.as_bytes());
    k.extend_from_slice(owner.as_bytes());
    k
}

/// In-flight key for a sent packet.
pub fn inflight_key(channel_id: &str, sequence: u64) -> Vec<u8> {
    let mut k = vec![INFLIGHT_PREFIX];
    push_segment(&mut k, channel_id.as_bytes());
    k.extend_from_slice(&sequence.to_be_bytes());
    k
}

/// Reverse in-flight key for a claim.
pub fn inflight_claim_key(id: &ClaimId) -> Vec<u8> {
    claim_key(INFLIGHT_CLAIM_PREFIX, id)
}

/// Claim key body without its prefix byte (stored as in-flight value).
pub fn claim_body(id: &ClaimId) -> Vec<u8> {
    claim_key(0, id).split_off(1)
}

/// Inverse of [`claim_body`].
pub fn decode_claim_body(body: &[u8]) -> Option<ClaimId> {
    let mut k = Vec::with_capacity(body.len() + 1);
    k.push(0);
    k.extend_from_slice(body);
    decode_claim_key(0, &k)
}
