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

//! Collaborator interfaces consumed by the genesismint and mintburn modules.
//!
//! Implementations live in the host application. Every method receives the
//! current [`Context`] so collaborator state shares the caller's transaction
//! and rolls back with it.

use crate::core::context::Context;
use crate::core::state::merkle::Hash32;
use crate::core::state::store::StateError;
use crate::core::types::{Address, Coin, Height};
use crate::ibc::types::{ChannelEnd, ClientState, ConnectionEnd, HasRoot};
use thiserror::Error;

/// Value-transfer failures.
#[derive(Debug, Error)]
pub enum BankError {
    #[error("insufficient funds: {0}")]
    InsufficientFunds(String),
    #[error("module {0} lacks permission")]
    Unauthorized(String),
    #[error("send disabled for {0}")]
    SendDisabled(String),
    #[error("state: {0}")]
    State(#[from] StateError),
}

/// Address decoding failures.
#[derive(Debug, Error)]
#[error("invalid address {input}: {reason}")]
pub struct AddressError {
    /// Rejected input.
    pub input: String,
    /// Reason.
    pub reason: String,
}

/// Transport-level failures of the remote-control channel.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("no active channel")]
    NoActiveChannel,
    #[error("registration rejected: {0}")]
    Registration(String),
    #[error("send rejected: {0}")]
    Send(String),
    #[error("state: {0}")]
    State(#[from] StateError),
}

/// Fungible value movements.
pub trait BankKeeper: Send + Sync {
    /// Create `amt` in `module`'s account.
    fn mint_coins(&self, ctx: &mut Context<'_>, module: &str, amt: &Coin) -> Result<(), BankError>;

    /// Destroy `amt` held by `module`.
    fn burn_coins(&self, ctx: &mut Context<'_>, module: &str, amt: &Coin) -> Result<(), BankError>;

    /// Move `amt` from `module` to `recipient`.
    fn send_coins_from_module_to_account(
        &self,
        ctx: &mut Context<'_>,
        module: &str,
        recipient: &Address,
        amt: &Coin,
    ) -> Result<(), BankError>;

    /// Move `amt` from `sender` to `module`.
    fn send_coins_from_account_to_module(
        &self,
        ctx: &mut Context<'_>,
        sender: &Address,
        module: &str,
        amt: &Coin,
    ) -> Result<(), BankError>;
}

/// Converts external (human-readable) addresses to chain-native ones.
pub trait AddressCodec: Send + Sync {
    /// Decode `s`.
    fn decode(&self, s: &str) -> Result<Address, AddressError>;
}

/// Light-client store.
pub trait ClientKeeper: Send + Sync {
    /// Concrete consensus state type of the tracked client.
    type ConsensusState: HasRoot;

    /// Consensus state of `client_id` at `height`.
    fn consensus_state(
        &self,
        ctx: &Context<'_>,
        client_id: &str,
        height: Height,
    ) -> Option<Self::ConsensusState>;

    /// Client state of `client_id`.
    fn client_state(&self, ctx: &Context<'_>, client_id: &str) -> Option<ClientState>;
}

/// Source of remote commitment roots keyed by (client, height).
pub trait RemoteProofSource: Send + Sync {
    /// Root committed by `client_id` at `height`.
    fn commitment_root(&self, ctx: &Context<'_>, client_id: &str, height: Height)
        -> Option<Hash32>;
}

impl<K: ClientKeeper> RemoteProofSource for K {
    fn commitment_root(
        &self,
        ctx: &Context<'_>,
        client_id: &str,
        height: Height,
    ) -> Option<Hash32> {
        self.consensus_state(ctx, client_id, height)
            .map(|cs| cs.root())
    }
}

/// Channel and connection registry, including the remote-control (ICA)
/// controller's view of its channels.
pub trait ChannelRegistry: Send + Sync {
    /// Channel end for `port/channel`.
    fn channel(&self, ctx: &Context<'_>, port_id: &str, channel_id: &str) -> Option<ChannelEnd>;

    /// Connection end by id.
    fn connection(&self, ctx: &Context<'_>, connection_id: &str) -> Option<ConnectionEnd>;

    /// Open remote-control channel bound to `port_id` over `connection_id`.
    fn active_channel(&self, ctx: &Context<'_>, connection_id: &str, port_id: &str)
        -> Option<String>;

    /// Address of the remote account controlled through `port_id`.
    fn remote_account_address(
        &self,
        ctx: &Context<'_>,
        connection_id: &str,
        port_id: &str,
    ) -> Option<String>;
}

/// Remote-control send primitive.
pub trait RemoteSend: Send + Sync {
    /// Start the remote-account registration handshake.
    fn register_remote_account(
        &self,
        ctx: &mut Context<'_>,
        owner: &str,
        connection_id: &str,
        version: &str,
    ) -> Result<(), TransportError>;

    /// Send `payload` over the owner's active channel. Returns the packet sequence.
    fn send_payload(
        &self,
        ctx: &mut Context<'_>,
        owner: &str,
        connection_id: &str,
        payload: &[u8],
        relative_timeout_ns: u64,
    ) -> Result<u64, TransportError>;
}

/// Companion security module that knows which client tracks the provider.
pub trait ConsumerKeeper: Send + Sync {
    /// Local client id of the trusted provider chain.
    fn provider_client_id(&self, ctx: &Context<'_>) -> Option<String>;
}
