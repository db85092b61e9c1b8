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

//! Outbound claim-notification queue.
//!
//! One round runs per block:
//!
//! ```text
//! Idle --register--> RegistrationPending --channel open--> ChannelActive
//!      --address known--> Draining --queue empty--> Done
//! ```
//!
//! All progress lives in the store; a round never blocks. Send failures leave
//! the claim queued for the next round. With [`RemovalPolicy::OnAcknowledgement`]
//! a sent claim is parked in the in-flight index until its acknowledgement or
//! timeout arrives; only a success acknowledgement dequeues it.

use crate::core::context::Context;
use crate::core::state::store::StateError;
use crate::genesismint::codec::{encode_notification, MsgNotifyClaim};
use crate::genesismint::keeper::Keeper;
use crate::genesismint::repo::{Config, InFlight, PendingQueue};
use crate::genesismint::types::ClaimId;
use crate::ibc::keepers::{ChannelRegistry, TransportError};
use crate::ibc::types::Packet;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Version string of interchain-account channels.
pub const ICS27_VERSION: &str = "ics27-1";

/// Prefix of controller ports; the owner id follows it.
pub const CONTROLLER_PORT_PREFIX: &str = "icacontroller-";

/// Relay errors. Only storage failures abort a round.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("state: {0}")]
    State(#[from] StateError),
}

/// When a sent notification leaves the pending queue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalPolicy {
    /// As soon as the transport accepts it.
    Optimistic,
    /// On a success acknowledgement.
    #[default]
    OnAcknowledgement,
}

/// Relay settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelayConfig {
    /// Connection to the provider.
    pub connection_id: String,
    /// Owner of the remote account.
    pub owner_id: String,
    /// Upper bound on sends per round.
    pub max_claims_per_block: usize,
    /// Packet timeout relative to the send time.
    pub relative_timeout_ns: u64,
    /// Dequeue policy.
    pub removal: RemovalPolicy,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            connection_id: "connection-0".to_string(),
            owner_id: crate::genesismint::types::MODULE_NAME.to_string(),
            max_claims_per_block: 10,
            relative_timeout_ns: 600 * 1_000_000_000,
            removal: RemovalPolicy::OnAcknowledgement,
        }
    }
}

impl RelayConfig {
    /// Controller port bound to the owner.
    pub fn controller_port(&self) -> String {
        format!("{CONTROLLER_PORT_PREFIX}{}", self.owner_id)
    }
}

/// Where a round stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelayState {
    /// No channel and no registration in progress (registration failed this round).
    Idle,
    /// Waiting for the registration handshake.
    RegistrationPending,
    /// Channel open, remote address not known yet.
    ChannelActive,
    /// Pending claims were processed.
    Draining,
    /// Nothing left to do, now or ever.
    Done,
}

/// Summary of one round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundReport {
    /// Final state.
    pub state: RelayState,
    /// Claims handed to the transport.
    pub attempted: usize,
    /// Accepted sends.
    pub sent: usize,
    /// Rejected sends.
    pub failed: usize,
}

impl RoundReport {
    fn at(state: RelayState) -> Self {
        Self {
            state,
            attempted: 0,
            sent: 0,
            failed: 0,
        }
    }
}

#[derive(Serialize)]
struct Ics27Metadata<'a> {
    version: &'a str,
    controller_connection_id: &'a str,
    host_connection_id: &'a str,
    address: &'a str,
    encoding: &'a str,
    tx_type: &'a str,
}

/// Channel version proposed when registering the remote account over
/// `connection_id`. Empty when the connection is unknown, which lets the
/// host pick its default.
pub fn channel_version(ctx: &Context<'_>, channels: &dyn ChannelRegistry, connection_id: &str) -> String {
    let Some(conn) = channels.connection(ctx, connection_id) else {
        return String::new();
    };
    let md = Ics27Metadata {
        version: ICS27_VERSION,
        controller_connection_id: connection_id,
        host_connection_id: &conn.counterparty.connection_id,
        address: "",
        encoding: "proto3",
        tx_type: "sdk_multi_msg",
    };
    serde_json::to_string(&md).unwrap_or_default()
}

impl Keeper {
    /// Per-block hook. Never fails; storage errors skip the round.
    pub fn begin_block(&self, ctx: &mut Context<'_>) -> RoundReport {
        match self.relay_round(ctx) {
            Ok(report) => report,
            Err(e) => {
                warn!(module = "genesismint", error = %e, "relay round skipped");
                RoundReport::at(RelayState::Idle)
            }
        }
    }

    fn relay_round(&self, ctx: &mut Context<'_>) -> Result<RoundReport, RelayError> {
        if Config::is_done(ctx.store())? {
            return Ok(RoundReport::at(RelayState::Done));
        }

        let cfg = &self.relay;
        let port = cfg.controller_port();
        let channels = self.deps.channels.as_ref();

        let Some(channel_id) = channels.active_channel(ctx, &cfg.connection_id, &port) else {
            if Config::ica_pending(ctx.store(), &cfg.connection_id, &cfg.owner_id)? {
                debug!(module = "genesismint", connection = %cfg.connection_id, "registration pending");
                return Ok(RoundReport::at(RelayState::RegistrationPending));
            }
            let version = channel_version(ctx, channels, &cfg.connection_id);
            let registered = ctx.atomic(|c| -> Result<(), TransportError> {
                self.deps
                    .remote
                    .register_remote_account(c, &cfg.owner_id, &cfg.connection_id, &version)?;
                Config::set_ica_pending(c.store_mut(), &cfg.connection_id, &cfg.owner_id, true)?;
                Ok(())
            });
            return Ok(match registered {
                Ok(()) => {
                    info!(
                        module = "genesismint",
                        connection = %cfg.connection_id,
                        owner = %cfg.owner_id,
                        "remote account registration started"
                    );
                    RoundReport::at(RelayState::RegistrationPending)
                }
                Err(e) => {
                    warn!(module = "genesismint", error = %e, "remote account registration failed");
                    RoundReport::at(RelayState::Idle)
                }
            });
        };

        if Config::ica_pending(ctx.store(), &cfg.connection_id, &cfg.owner_id)? {
            Config::set_ica_pending(ctx.store_mut(), &cfg.connection_id, &cfg.owner_id, false)?;
            info!(module = "genesismint", channel = %channel_id, "remote-control channel active");
        }

        let Some(remote_address) = channels.remote_account_address(ctx, &cfg.connection_id, &port)
        else {
            return Ok(RoundReport::at(RelayState::ChannelActive));
        };

        if PendingQueue::is_empty(ctx.store())? {
            Config::set_done(ctx.store_mut())?;
            info!(module = "genesismint", "all claim notifications delivered");
            return Ok(RoundReport::at(RelayState::Done));
        }

        let batch = PendingQueue::ready(ctx.store(), cfg.max_claims_per_block)?;
        let mut report = RoundReport::at(RelayState::Draining);
        for id in batch {
            report.attempted += 1;
            let payload = encode_notification(&MsgNotifyClaim {
                sender: remote_address.clone(),
                escrow_id: id.escrow_id.clone(),
                origin_chain_id: id.provider_chain_id.clone(),
            });
            let sent = ctx.atomic(|c| -> Result<u64, TransportError> {
                let seq = self.deps.remote.send_payload(
                    c,
                    &cfg.owner_id,
                    &cfg.connection_id,
                    &payload,
                    cfg.relative_timeout_ns,
                )?;
                match cfg.removal {
                    RemovalPolicy::Optimistic => PendingQueue::remove(c.store_mut(), &id)?,
                    RemovalPolicy::OnAcknowledgement => {
                        InFlight::mark(c.store_mut(), &channel_id, seq, &id)?
                    }
                }
                Ok(seq)
            });
            match sent {
                Ok(sequence) => {
                    report.sent += 1;
                    if let Some(m) = &self.metrics {
                        m.notifications_sent_total.inc();
                    }
                    info!(module = "genesismint", claim = %id, channel = %channel_id, sequence, "claim notification sent");
                }
                Err(e) => {
                    report.failed += 1;
                    if let Some(m) = &self.metrics {
                        m.notification_send_failures_total.inc();
                    }
                    warn!(module = "genesismint", claim = %id, error = %e, "claim notification send failed");
                }
            }
        }
        Ok(report)
    }

    /// Success acknowledgement for a notification packet: dequeue its claim.
    pub fn handle_ack_success(
        &self,
        ctx: &mut Context<'_>,
        packet: &Packet,
    ) -> Result<Option<ClaimId>, RelayError> {
        let resolved = InFlight::resolve(ctx.store_mut(), &packet.source_channel, packet.sequence)?;
        if let Some(id) = &resolved {
            PendingQueue::remove(ctx.store_mut(), id)?;
            if let Some(m) = &self.metrics {
                m.notifications_acked_total.inc();
            }
            info!(module = "genesismint", claim = %id, sequence = packet.sequence, "claim notification acknowledged");
        }
        Ok(resolved)
    }

    /// Error acknowledgement: release the claim for a resend next round.
    pub fn handle_ack_error(
        &self,
        ctx: &mut Context<'_>,
        packet: &Packet,
    ) -> Result<Option<ClaimId>, RelayError> {
        self.release(ctx, packet, "error acknowledgement")
    }

    /// Timeout: release the claim for a resend next round.
    pub fn handle_timeout(
        &self,
        ctx: &mut Context<'_>,
        packet: &Packet,
    ) -> Result<Option<ClaimId>, RelayError> {
        self.release(ctx, packet, "timeout")
    }

    fn release(
        &self,
        ctx: &mut Context<'_>,
        packet: &Packet,
        reason: &str,
    ) -> Result<Option<ClaimId>, RelayError> {
        let resolved = InFlight::resolve(ctx.store_mut(), &packet.source_channel, packet.sequence)?;
        if let Some(id) = &resolved {
            if let Some(m) = &self.metrics {
                m.notifications_retried_total.inc();
            }
            warn!(module = "genesismint", claim = %id, sequence = packet.sequence, reason, "claim notification requeued");
        }
        Ok(resolved)
    }
}
