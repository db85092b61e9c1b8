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

//! Store key layout of the bridge.

use crate::genesismint::keys::{all_distinct, PREFIXES as CLAIM_PREFIXES};

/// Stored params.
pub const PARAMS_KEY: &[u8] = &[0x21];
/// Allowlisted transfer channels: channel -> sentinel.
pub const ALLOWED_CHANNEL_PREFIX: u8 = 0x22;
/// Consumed packets: (port, channel, sequence) -> sentinel.
pub const PROOF_PREFIX: u8 = 0x23;
/// Mirrored supply (decimal string).
pub const MIRROR_SUPPLY_KEY: &[u8] = &[0x24];

/// Every prefix byte owned by this module.
pub const PREFIXES: [u8; 4] = [
    PARAMS_KEY[0],
    ALLOWED_CHANNEL_PREFIX,
    PROOF_PREFIX,
    MIRROR_SUPPLY_KEY[0],
];

const fn joined() -> [u8; 11] {
    let mut out = [0u8; 11];
    let mut i = 0;
    while i < CLAIM_PREFIXES.len() {
        out[i] = CLAIM_PREFIXES[i];
        i += 1;
    }
    let mut j = 0;
    while j < PREFIXES.len() {
        out[i + j] = PREFIXES[j];
        j += 1;
    }
    out
}

// Both modules share one namespace.
const _: () = assert!(all_distinct(&joined()));

/// Allowlist key.
pub fn allowed_channel_key(channel_id: &str) -> Vec<u8> {
    let mut k = Vec::with_capacity(1 + channel_id.len());
    k.push(ALLOWED_CHANNEL_PREFIX);
    k.extend_from_slice(channel_id.as_bytes());
    k
}

/// Replay key of a received packet.
pub fn proof_key(port_id: &str, channel_id: &str, sequence: u64) -> Vec<u8> {
    let mut k = Vec::with_capacity(1 + 4 + port_id.len() + 4 + channel_id.len() + 8);
    k.push(PROOF_PREFIX);
    k.extend_from_slice(&(port_id.len() as u32).to_be_bytes());
    k.extend_from_slice(port_id.as_bytes());
    k.extend_from_slice(&(channel_id.len() as u32).to_be_bytes());
    k.extend_from_slice(channel_id.as_bytes());
    k.extend_from_slice(&sequence.to_be_bytes());
    k
}
