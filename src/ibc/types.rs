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

//! Channel, connection, client and packet types as seen by application modules.

use crate::core::state::merkle::Hash32;
use crate::core::types::Height;

/// Channel ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    /// Packets delivered in any order.
    Unordered,
    /// Packets delivered in send order.
    Ordered,
}

/// Channel handshake state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelState {
    /// `ChanOpenInit` executed.
    Init,
    /// `ChanOpenTry` executed.
    TryOpen,
    /// Handshake complete.
    Open,
    /// Closed.
    Closed,
}

/// Remote end of a channel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Counterparty {
    /// Remote port.
    pub port_id: String,
    /// Remote channel (empty until known).
    pub channel_id: String,
}

/// Locally stored channel end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelEnd {
    /// Handshake state.
    pub state: ChannelState,
    /// Ordering.
    pub order: Order,
    /// Remote end.
    pub counterparty: Counterparty,
    /// Connection hops; the first is the underlying connection.
    pub connection_hops: Vec<String>,
    /// Negotiated application version.
    pub version: String,
}

/// Remote end of a connection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConnectionCounterparty {
    /// Client on the remote chain tracking this chain.
    pub client_id: String,
    /// Connection id on the remote chain.
    pub connection_id: String,
}

/// Locally stored connection end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionEnd {
    /// Local light client tracking the remote chain.
    pub client_id: String,
    /// Remote end.
    pub counterparty: ConnectionCounterparty,
}

/// Light client state summary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientState {
    /// Chain id the client tracks.
    pub chain_id: String,
    /// Latest verified height.
    pub latest_height: Height,
}

/// Capability of a consensus state that commits to an application state root.
pub trait HasRoot {
    /// Commitment root.
    fn root(&self) -> Hash32;
}

/// Consensus state of a Tendermint-style light client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TendermintConsensusState {
    /// Block time in nanoseconds since UNIX epoch.
    pub timestamp_ns: u64,
    /// Application state root.
    pub root: Hash32,
    /// Hash of the next validator set.
    pub next_validators_hash: Hash32,
}

impl HasRoot for TendermintConsensusState {
    fn root(&self) -> Hash32 {
        self.root
    }
}

/// Packet as delivered to application callbacks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Packet {
    /// Per-channel send sequence.
    pub sequence: u64,
    /// Sending port.
    pub source_port: String,
    /// Sending channel.
    pub source_channel: String,
    /// Receiving port.
    pub destination_port: String,
    /// Receiving channel.
    pub destination_channel: String,
    /// Opaque application payload.
    pub data: Vec<u8>,
    /// Timeout height (zero disables).
    pub timeout_height: Height,
    /// Timeout timestamp in nanoseconds (zero disables).
    pub timeout_timestamp: u64,
}
