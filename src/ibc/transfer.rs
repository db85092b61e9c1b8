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

//! Fungible-token transfer payloads, denomination traces and escrow accounts.

use crate::core::types::Address;
use ring::digest;
use serde::{Deserialize, Serialize};

/// Port bound by the fungible-token transfer application.
pub const TRANSFER_PORT: &str = "transfer";

/// Application version of the transfer channel.
pub const TRANSFER_VERSION: &str = "ics20-1";

/// Transfer packet payload (JSON on the wire).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FungibleTokenPacketData {
    /// Full denomination trace as known by the sender.
    pub denom: String,
    /// Decimal amount.
    pub amount: String,
    /// Sender address on the source chain.
    pub sender: String,
    /// Receiver address on the destination chain.
    pub receiver: String,
    /// Free-form memo.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub memo: String,
}

impl FungibleTokenPacketData {
    /// Parse packet bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// JSON wire bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).unwrap_or_default()
    }
}

/// Denomination split into its hop path and base denomination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DenomTrace {
    /// `port/channel` hops, outermost first; empty for native tokens.
    pub path: String,
    /// Base denomination on the origin chain.
    pub base_denom: String,
}

fn is_channel_id(s: &str) -> bool {
    s.strip_prefix("channel-")
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

/// Split `full` into hop path and base denom. Hops are consumed while the
/// second element of each pair is a channel identifier.
pub fn parse_denom_trace(full: &str) -> DenomTrace {
    let parts: Vec<&str> = full.split('/').collect();
    let mut hops: Vec<&str> = Vec::new();
    let mut i = 0usize;
    while i + 1 < parts.len() {
        if !is_channel_id(parts[i + 1]) || parts[i].is_empty() {
            break;
        }
        hops.push(parts[i]);
        hops.push(parts[i + 1]);
        i += 2;
    }
    if i >= parts.len() {
        // Nothing left after the hops; the whole string is the denom.
        return DenomTrace {
            path: String::new(),
            base_denom: full.to_string(),
        };
    }
    DenomTrace {
        path: hops.join("/"),
        base_denom: parts[i..].join("/"),
    }
}

/// Prefix a chain adds when it receives a token over `port/channel`.
pub fn denom_prefix(port: &str, channel: &str) -> String {
    format!("{port}/{channel}/")
}

/// True when the token in a received packet originated on the receiving chain
/// (it is coming home and its trace starts with the sender's port/channel).
pub fn receiver_chain_is_source(source_port: &str, source_channel: &str, denom: &str) -> bool {
    denom.starts_with(&denom_prefix(source_port, source_channel))
}

/// True when the sending chain is the token's origin for an outbound packet.
pub fn sender_chain_is_source(source_port: &str, source_channel: &str, denom: &str) -> bool {
    !receiver_chain_is_source(source_port, source_channel, denom)
}

/// The denomination of a received token when it is native to the sending
/// chain: the token is not coming home and its trace carries no hops.
/// Vouchers the sender itself received from elsewhere yield `None`.
pub fn sender_native_denom<'a>(source_port: &str, source_channel: &str, denom: &'a str) -> Option<&'a str> {
    if receiver_chain_is_source(source_port, source_channel, denom) {
        return None;
    }
    parse_denom_trace(denom).path.is_empty().then_some(denom)
}

/// Module account holding escrowed tokens for `port/channel`:
/// the first 20 bytes of `SHA256("ics20-1" || 0x00 || "port/channel")`.
pub fn escrow_address(port: &str, channel: &str) -> Address {
    let mut pre = Vec::with_capacity(TRANSFER_VERSION.len() + 1 + port.len() + 1 + channel.len());
    pre.extend_from_slice(TRANSFER_VERSION.as_bytes());
    pre.push(0);
    pre.extend_from_slice(format!("{port}/{channel}").as_bytes());
    let d = digest::digest(&digest::SHA256, &pre);
    Address(d.as_ref()[..20].to_vec())
}
