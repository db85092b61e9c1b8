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

//! Application callback surface shared by transport applications and the
//! middleware stacked in front of them.

use crate::core::context::Context;
use crate::core::state::store::StateError;
use crate::core::types::Address;
use crate::ibc::ack::Acknowledgement;
use crate::ibc::types::{Counterparty, Order, Packet};
use thiserror::Error;

/// Callback errors surfaced to the transport layer.
#[derive(Debug, Error)]
pub enum IbcError {
    #[error("channel {port}/{channel} not found")]
    ChannelNotFound { port: String, channel: String },
    #[error("connection {0} not found")]
    ConnectionNotFound(String),
    #[error("invalid version: {0}")]
    InvalidVersion(String),
    #[error("application: {0}")]
    App(String),
    #[error("state: {0}")]
    State(#[from] StateError),
}

/// Channel- and packet-lifecycle callbacks.
///
/// Middleware implements the same trait and forwards to the module it wraps.
pub trait IbcModule {
    /// First step of a locally initiated handshake. Returns the version.
    #[allow(clippy::too_many_arguments)]
    fn on_chan_open_init(
        &self,
        ctx: &mut Context<'_>,
        order: Order,
        connection_hops: &[String],
        port_id: &str,
        channel_id: &str,
        counterparty: &Counterparty,
        version: &str,
    ) -> Result<String, IbcError>;

    /// First step of a remotely initiated handshake. Returns the version.
    #[allow(clippy::too_many_arguments)]
    fn on_chan_open_try(
        &self,
        ctx: &mut Context<'_>,
        order: Order,
        connection_hops: &[String],
        port_id: &str,
        channel_id: &str,
        counterparty: &Counterparty,
        counterparty_version: &str,
    ) -> Result<String, IbcError>;

    /// Handshake completion on the initiating side.
    fn on_chan_open_ack(
        &self,
        ctx: &mut Context<'_>,
        port_id: &str,
        channel_id: &str,
        counterparty_channel_id: &str,
        counterparty_version: &str,
    ) -> Result<(), IbcError>;

    /// Handshake completion on the accepting side.
    fn on_chan_open_confirm(
        &self,
        ctx: &mut Context<'_>,
        port_id: &str,
        channel_id: &str,
    ) -> Result<(), IbcError>;

    /// Local close.
    fn on_chan_close_init(
        &self,
        ctx: &mut Context<'_>,
        port_id: &str,
        channel_id: &str,
    ) -> Result<(), IbcError>;

    /// Remote close.
    fn on_chan_close_confirm(
        &self,
        ctx: &mut Context<'_>,
        port_id: &str,
        channel_id: &str,
    ) -> Result<(), IbcError>;

    /// Inbound packet. The returned acknowledgement is written by the transport.
    fn on_recv_packet(
        &self,
        ctx: &mut Context<'_>,
        packet: &Packet,
        relayer: &Address,
    ) -> Acknowledgement;

    /// Acknowledgement for a packet this chain sent.
    fn on_acknowledgement_packet(
        &self,
        ctx: &mut Context<'_>,
        packet: &Packet,
        acknowledgement: &[u8],
        relayer: &Address,
    ) -> Result<(), IbcError>;

    /// Timeout for a packet this chain sent.
    fn on_timeout_packet(
        &self,
        ctx: &mut Context<'_>,
        packet: &Packet,
        relayer: &Address,
    ) -> Result<(), IbcError>;
}
