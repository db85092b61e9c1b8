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

//! Middleware on the remote-control controller stack that feeds packet
//! outcomes back into the notification queue. Every callback is delegated.

use crate::core::context::Context;
use crate::core::types::Address;
use crate::genesismint::keeper::Keeper;
use crate::ibc::ack::Acknowledgement;
use crate::ibc::module::{IbcError, IbcModule};
use crate::ibc::types::{Counterparty, Order, Packet};
use tracing::{error, info, warn};

/// Controller-side middleware.
pub struct IcaMiddleware<M> {
    app: M,
    keeper: Keeper,
}

impl<M: IbcModule> IcaMiddleware<M> {
    /// Wrap `app`.
    pub fn new(app: M, keeper: Keeper) -> Self {
        Self { app, keeper }
    }

    /// Wrapped module.
    pub fn inner(&self) -> &M {
        &self.app
    }
}

impl<M: IbcModule> IbcModule for IcaMiddleware<M> {
    fn on_chan_open_init(
        &self,
        ctx: &mut Context<'_>,
        order: Order,
        connection_hops: &[String],
        port_id: &str,
        channel_id: &str,
        counterparty: &Counterparty,
        version: &str,
    ) -> Result<String, IbcError> {
        self.app.on_chan_open_init(
            ctx,
            order,
            connection_hops,
            port_id,
            channel_id,
            counterparty,
            version,
        )
    }

    fn on_chan_open_try(
        &self,
        ctx: &mut Context<'_>,
        order: Order,
        connection_hops: &[String],
        port_id: &str,
        channel_id: &str,
        counterparty: &Counterparty,
        counterparty_version: &str,
    ) -> Result<String, IbcError> {
        self.app.on_chan_open_try(
            ctx,
            order,
            connection_hops,
            port_id,
            channel_id,
            counterparty,
            counterparty_version,
        )
    }

    fn on_chan_open_ack(
        &self,
        ctx: &mut Context<'_>,
        port_id: &str,
        channel_id: &str,
        counterparty_channel_id: &str,
        counterparty_version: &str,
    ) -> Result<(), IbcError> {
        self.app.on_chan_open_ack(
            ctx,
            port_id,
            channel_id,
            counterparty_channel_id,
            counterparty_version,
        )
    }

    fn on_chan_open_confirm(
        &self,
        ctx: &mut Context<'_>,
        port_id: &str,
        channel_id: &str,
    ) -> Result<(), IbcError> {
        self.app.on_chan_open_confirm(ctx, port_id, channel_id)
    }

    fn on_chan_close_init(
        &self,
        ctx: &mut Context<'_>,
        port_id: &str,
        channel_id: &str,
    ) -> Result<(), IbcError> {
        self.app.on_chan_close_init(ctx, port_id, channel_id)
    }

    fn on_chan_close_confirm(
        &self,
        ctx: &mut Context<'_>,
        port_id: &str,
        channel_id: &str,
    ) -> Result<(), IbcError> {
        self.app.on_chan_close_confirm(ctx, port_id, channel_id)
    }

    fn on_recv_packet(
        &self,
        ctx: &mut Context<'_>,
        packet: &Packet,
        relayer: &Address,
    ) -> Acknowledgement {
        self.app.on_recv_packet(ctx, packet, relayer)
    }

    fn on_acknowledgement_packet(
        &self,
        ctx: &mut Context<'_>,
        packet: &Packet,
        acknowledgement: &[u8],
        relayer: &Address,
    ) -> Result<(), IbcError> {
        let outcome = match Acknowledgement::from_bytes(acknowledgement) {
            Ok(ack) if ack.is_success() => {
                info!(module = "genesismint", channel = %packet.source_channel, sequence = packet.sequence, "remote-control ack success");
                self.keeper.handle_ack_success(ctx, packet).map(|_| ())
            }
            Ok(_) => {
                warn!(module = "genesismint", channel = %packet.source_channel, sequence = packet.sequence, "remote-control ack error");
                self.keeper.handle_ack_error(ctx, packet).map(|_| ())
            }
            Err(e) => {
                error!(module = "genesismint", error = %e, "cannot parse remote-control ack");
                Ok(())
            }
        };
        if let Err(e) = outcome {
            error!(module = "genesismint", error = %e, "queue update on ack failed");
        }
        self.app
            .on_acknowledgement_packet(ctx, packet, acknowledgement, relayer)
    }

    fn on_timeout_packet(
        &self,
        ctx: &mut Context<'_>,
        packet: &Packet,
        relayer: &Address,
    ) -> Result<(), IbcError> {
        error!(module = "genesismint", channel = %packet.source_channel, sequence = packet.sequence, "remote-control packet timeout");
        if let Err(e) = self.keeper.handle_timeout(ctx, packet) {
            error!(module = "genesismint", error = %e, "queue update on timeout failed");
        }
        self.app.on_timeout_packet(ctx, packet, relayer)
    }
}
