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

//! Transfer-stack middleware mirroring provider tokens.
//!
//! Channels become trusted only when their handshake completes over the
//! provider's light client. Packets on trusted channels carrying an allowed
//! base denom are mirrored (mint on receive, burn from escrow once the
//! outbound leg is acknowledged); everything else goes to the wrapped
//! transfer application unchanged.

use crate::core::context::Context;
use crate::core::types::{parse_amount, Address, Coin, Event};
use crate::ibc::ack::Acknowledgement;
use crate::ibc::module::{IbcError, IbcModule};
use crate::ibc::transfer::{
    escrow_address, parse_denom_trace, sender_chain_is_source, sender_native_denom,
    FungibleTokenPacketData,
};
use crate::ibc::types::{Counterparty, Order, Packet};
use crate::mintburn::keeper::{BridgeError, Keeper};
use alloy_primitives::U256;
use tracing::{debug, error, info, warn};

/// Emitted on every mirror mint.
pub const EVENT_MIRROR_MINT: &str = "mintburn_mirror_mint";
/// Emitted on every burn of an acknowledged outbound transfer.
pub const EVENT_BURN: &str = "mintburn_burn";

/// Bridge middleware wrapping a transfer application.
pub struct BridgeMiddleware<M> {
    app: M,
    keeper: Keeper,
}

impl<M: IbcModule> BridgeMiddleware<M> {
    /// Wrap `app`.
    pub fn new(app: M, keeper: Keeper) -> Self {
        Self { app, keeper }
    }

    /// Wrapped module.
    pub fn inner(&self) -> &M {
        &self.app
    }

    /// Keeper.
    pub fn keeper(&self) -> &Keeper {
        &self.keeper
    }

    fn count_passthrough(&self) {
        if let Some(m) = &self.keeper.metrics {
            m.passthrough_total.inc();
        }
    }

    // Handshake completion on either side.
    fn bind_channel(&self, ctx: &mut Context<'_>, port_id: &str, channel_id: &str) -> Result<(), IbcError> {
        if port_id != self.keeper.transfer_port {
            return Ok(());
        }
        if self.keeper.verify_channel_provenance(ctx, port_id, channel_id)? {
            self.keeper.allow_channel(ctx, channel_id)?;
            info!(module = "mintburn", channel = %channel_id, "channel allowlisted");
        } else {
            debug!(module = "mintburn", channel = %channel_id, "channel not from provider; left unbound");
        }
        Ok(())
    }

    fn unbind_channel(&self, ctx: &mut Context<'_>, port_id: &str, channel_id: &str) -> Result<(), IbcError> {
        if port_id != self.keeper.transfer_port {
            return Ok(());
        }
        if self.keeper.is_allowed_channel(ctx, channel_id)? {
            self.keeper.disallow_channel(ctx, channel_id)?;
            info!(module = "mintburn", channel = %channel_id, "channel removed from allowlist");
        }
        Ok(())
    }

    // Some(ack) when the packet is ours; None to delegate.
    fn mirror_inbound(&self, ctx: &mut Context<'_>, packet: &Packet) -> Option<Acknowledgement> {
        let data = match FungibleTokenPacketData::from_bytes(&packet.data) {
            Ok(d) => d,
            Err(e) => {
                warn!(module = "mintburn", channel = %packet.destination_channel, sequence = packet.sequence, error = %e, "bad transfer packet data");
                return Some(Acknowledgement::error(format!("cannot unmarshal transfer packet data: {e}")));
            }
        };

        let params = match self.keeper.params(ctx) {
            Ok(p) => p,
            Err(e) => return Some(Acknowledgement::error(e)),
        };
        let allowlisted = match self.keeper.is_allowed_channel(ctx, &packet.destination_channel) {
            Ok(b) => b,
            Err(e) => return Some(Acknowledgement::error(e)),
        };
        // Only the provider's own tokens are mirrored; vouchers it forwards
        // from other chains pass through even when their base name matches.
        let base = sender_native_denom(&packet.source_port, &packet.source_channel, &data.denom)
            .filter(|d| params.allows_denom(d))
            .filter(|_| allowlisted && packet.destination_port == self.keeper.transfer_port)?;

        if params.pause {
            warn!(module = "mintburn", channel = %packet.destination_channel, sequence = packet.sequence, "bridge paused");
            return Some(Acknowledgement::error("mintburn paused"));
        }

        let (port, channel, seq) = (
            packet.destination_port.as_str(),
            packet.destination_channel.as_str(),
            packet.sequence,
        );
        match self.keeper.is_proof_consumed(ctx, port, channel, seq) {
            Ok(false) => {}
            Ok(true) => {
                warn!(module = "mintburn", channel = %channel, sequence = seq, "replayed packet rejected");
                if let Some(m) = &self.keeper.metrics {
                    m.replays_rejected_total.inc();
                }
                return Some(Acknowledgement::error("proof already consumed"));
            }
            Err(e) => return Some(Acknowledgement::error(e)),
        }

        let receiver = match self.keeper.addresses.decode(&data.receiver) {
            Ok(a) => a,
            Err(e) => return Some(Acknowledgement::error(format!("invalid receiver: {e}"))),
        };
        let amount = match parse_amount(&data.amount) {
            Some(a) if a > U256::ZERO => a,
            _ => return Some(Acknowledgement::error(format!("invalid amount: {:?}", data.amount))),
        };
        let coin = Coin::new(params.dex_native_denom.clone(), amount);

        let minted = ctx.atomic(|c| -> Result<U256, BridgeError> {
            self.keeper.mint_tokens(c, &receiver, &coin)?;
            self.keeper.mark_proof_consumed(c, port, channel, seq)?;
            let supply = self.keeper.increase_mirror_supply(c, amount)?;
            c.emit(
                Event::new(EVENT_MIRROR_MINT)
                    .attr("receiver", &receiver)
                    .attr("amount", &coin)
                    .attr("base_denom", &base)
                    .attr("channel", channel)
                    .attr("sequence", seq),
            );
            Ok(supply)
        });
        match minted {
            Ok(supply) => {
                info!(module = "mintburn", receiver = %receiver, amount = %coin, channel = %channel, sequence = seq, supply = %supply, "mirror mint");
                if let Some(m) = &self.keeper.metrics {
                    m.mirror_mints_total.inc();
                }
                Some(Acknowledgement::success())
            }
            Err(e) => {
                error!(module = "mintburn", channel = %channel, sequence = seq, error = %e, "mirror mint failed");
                Some(Acknowledgement::error(format!("mint failed: {e}")))
            }
        }
    }

    // Burn the escrowed mirror tokens of an acknowledged outbound transfer.
    fn burn_outbound(&self, ctx: &mut Context<'_>, packet: &Packet, acknowledgement: &[u8]) {
        let Ok(ack) = Acknowledgement::from_bytes(acknowledgement) else {
            return;
        };
        if !ack.is_success() || packet.source_port != self.keeper.transfer_port {
            return;
        }
        let Ok(data) = FungibleTokenPacketData::from_bytes(&packet.data) else {
            return;
        };
        let params = match self.keeper.params(ctx) {
            Ok(p) => p,
            Err(e) => {
                error!(module = "mintburn", error = %e, "params unreadable; burn skipped");
                return;
            }
        };
        match self.keeper.is_allowed_channel(ctx, &packet.source_channel) {
            Ok(true) => {}
            Ok(false) => return,
            Err(e) => {
                error!(module = "mintburn", error = %e, "allowlist unreadable; burn skipped");
                return;
            }
        }
        if !sender_chain_is_source(&packet.source_port, &packet.source_channel, &data.denom) {
            return;
        }
        if parse_denom_trace(&data.denom).base_denom != params.dex_native_denom {
            return;
        }
        let Some(amount) = parse_amount(&data.amount).filter(|a| *a > U256::ZERO) else {
            warn!(module = "mintburn", amount = %data.amount, "outbound amount unparseable; burn skipped");
            return;
        };

        let escrow = escrow_address(&packet.source_port, &packet.source_channel);
        let coin = Coin::new(params.dex_native_denom.clone(), amount);
        let burned = ctx.atomic(|c| -> Result<U256, BridgeError> {
            self.keeper.burn_from(c, &escrow, &coin)?;
            let supply = self.keeper.decrease_mirror_supply(c, amount)?;
            c.emit(
                Event::new(EVENT_BURN)
                    .attr("escrow", &escrow)
                    .attr("amount", &coin)
                    .attr("channel", &packet.source_channel)
                    .attr("sequence", packet.sequence),
            );
            Ok(supply)
        });
        match burned {
            Ok(supply) => {
                info!(module = "mintburn", amount = %coin, channel = %packet.source_channel, sequence = packet.sequence, supply = %supply, "outbound burn");
                if let Some(m) = &self.keeper.metrics {
                    m.burns_total.inc();
                }
            }
            Err(e) => {
                error!(module = "mintburn", amount = %coin, channel = %packet.source_channel, sequence = packet.sequence, error = %e, "outbound burn failed");
                if let Some(m) = &self.keeper.metrics {
                    m.burn_failures_total.inc();
                }
            }
        }
    }
}

impl<M: IbcModule> IbcModule for BridgeMiddleware<M> {
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
        self.bind_channel(ctx, port_id, channel_id)?;
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
        self.bind_channel(ctx, port_id, channel_id)?;
        self.app.on_chan_open_confirm(ctx, port_id, channel_id)
    }

    fn on_chan_close_init(
        &self,
        ctx: &mut Context<'_>,
        port_id: &str,
        channel_id: &str,
    ) -> Result<(), IbcError> {
        self.unbind_channel(ctx, port_id, channel_id)?;
        self.app.on_chan_close_init(ctx, port_id, channel_id)
    }

    fn on_chan_close_confirm(
        &self,
        ctx: &mut Context<'_>,
        port_id: &str,
        channel_id: &str,
    ) -> Result<(), IbcError> {
        self.unbind_channel(ctx, port_id, channel_id)?;
        self.app.on_chan_close_confirm(ctx, port_id, channel_id)
    }

    fn on_recv_packet(
        &self,
        ctx: &mut Context<'_>,
        packet: &Packet,
        relayer: &Address,
    ) -> Acknowledgement {
        match self.mirror_inbound(ctx, packet) {
            Some(ack) => ack,
            None => {
                self.count_passthrough();
                self.app.on_recv_packet(ctx, packet, relayer)
            }
        }
    }

    fn on_acknowledgement_packet(
        &self,
        ctx: &mut Context<'_>,
        packet: &Packet,
        acknowledgement: &[u8],
        relayer: &Address,
    ) -> Result<(), IbcError> {
        self.burn_outbound(ctx, packet, acknowledgement);
        self.app
            .on_acknowledgement_packet(ctx, packet, acknowledgement, relayer)
    }

    fn on_timeout_packet(
        &self,
        ctx: &mut Context<'_>,
        packet: &Packet,
        relayer: &Address,
    ) -> Result<(), IbcError> {
        self.app.on_timeout_packet(ctx, packet, relayer)
    }
}
