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

//! Bridge keeper: params, channel allowlist, replay index and mirrored supply.

use std::sync::Arc;

use crate::core::context::Context;
use crate::core::state::store::StateError;
use crate::core::types::{
    decode_canonical_limited, encode_canonical, parse_amount, Address, Coin, MAX_STORED_VALUE,
};
use crate::ibc::keepers::{AddressCodec, BankError, BankKeeper, ChannelRegistry, ClientKeeper, ConsumerKeeper};
use crate::ibc::module::IbcError;
use crate::ibc::types::TendermintConsensusState;
use crate::mintburn::keys;
use crate::mintburn::types::{Params, MODULE_NAME};
use crate::monitoring::metrics::Metrics;
use alloy_primitives::U256;
use thiserror::Error;
use tracing::{debug, info, warn};

const SENTINEL: &[u8] = &[1];

/// Bridge errors.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("mint: {0}")]
    Mint(BankError),
    #[error("send: {0}")]
    Send(BankError),
    #[error("burn: {0}")]
    Burn(BankError),
    #[error("state: {0}")]
    State(#[from] StateError),
}

/// Light client handle used for handshake-time provenance checks.
pub type SharedClientKeeper = Arc<dyn ClientKeeper<ConsensusState = TendermintConsensusState>>;

/// Bridge keeper.
#[derive(Clone)]
pub struct Keeper {
    pub(super) bank: Arc<dyn BankKeeper>,
    pub(super) addresses: Arc<dyn AddressCodec>,
    pub(super) channels: Arc<dyn ChannelRegistry>,
    pub(super) clients: SharedClientKeeper,
    pub(super) consumer: Arc<dyn ConsumerKeeper>,
    pub(super) transfer_port: String,
    pub(super) metrics: Option<Metrics>,
}

impl Keeper {
    /// New keeper intercepting `transfer_port`.
    pub fn new(
        bank: Arc<dyn BankKeeper>,
        addresses: Arc<dyn AddressCodec>,
        channels: Arc<dyn ChannelRegistry>,
        clients: SharedClientKeeper,
        consumer: Arc<dyn ConsumerKeeper>,
        transfer_port: impl Into<String>,
    ) -> Self {
        Self {
            bank,
            addresses,
            channels,
            clients,
            consumer,
            transfer_port: transfer_port.into(),
            metrics: None,
        }
    }

    /// Attach metrics.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Intercepted port.
    pub fn transfer_port(&self) -> &str {
        &self.transfer_port
    }

    /// Stored params, or defaults when genesis never set them.
    pub fn params(&self, ctx: &Context<'_>) -> Result<Params, StateError> {
        match ctx.store().get(keys::PARAMS_KEY)? {
            None => Ok(Params::default()),
            Some(raw) => decode_canonical_limited(&raw, MAX_STORED_VALUE)
                .map_err(|_| StateError::Corrupt(hex::encode(keys::PARAMS_KEY))),
        }
    }

    /// Persist params.
    pub fn set_params(&self, ctx: &mut Context<'_>, params: &Params) -> Result<(), StateError> {
        let raw = encode_canonical(params)
            .map_err(|_| StateError::Corrupt(hex::encode(keys::PARAMS_KEY)))?;
        ctx.store_mut().set(keys::PARAMS_KEY, &raw)
    }

    // -- allowlist ---------------------------------------------------------

    /// Whether `channel_id` has been bound to the trusted provider.
    pub fn is_allowed_channel(&self, ctx: &Context<'_>, channel_id: &str) -> Result<bool, StateError> {
        ctx.store().has(&keys::allowed_channel_key(channel_id))
    }

    /// Allowlisted channels in key order.
    pub fn allowed_channels(&self, ctx: &Context<'_>) -> Result<Vec<String>, StateError> {
        Ok(ctx
            .store()
            .scan_prefix(&[keys::ALLOWED_CHANNEL_PREFIX], None)?
            .into_iter()
            .map(|(k, _)| String::from_utf8_lossy(&k[1..]).into_owned())
            .collect())
    }

    // Allowlist mutation is reachable only from the channel handshake hooks.
    pub(super) fn allow_channel(&self, ctx: &mut Context<'_>, channel_id: &str) -> Result<(), StateError> {
        ctx.store_mut()
            .set(&keys::allowed_channel_key(channel_id), SENTINEL)?;
        self.refresh_allowlist_gauge(ctx)
    }

    pub(super) fn disallow_channel(&self, ctx: &mut Context<'_>, channel_id: &str) -> Result<(), StateError> {
        ctx.store_mut().delete(&keys::allowed_channel_key(channel_id))?;
        self.refresh_allowlist_gauge(ctx)
    }

    fn refresh_allowlist_gauge(&self, ctx: &Context<'_>) -> Result<(), StateError> {
        if let Some(m) = &self.metrics {
            let n = ctx
                .store()
                .scan_prefix(&[keys::ALLOWED_CHANNEL_PREFIX], None)?
                .len();
            m.allowlisted_channels.set(n as i64);
        }
        Ok(())
    }

    /// Whether `port/channel` connects to the trusted provider: its connection's
    /// client must be the consumer's provider client and that client must track
    /// one of `params.provider_chain_ids`.
    pub fn verify_channel_provenance(
        &self,
        ctx: &Context<'_>,
        port_id: &str,
        channel_id: &str,
    ) -> Result<bool, IbcError> {
        let channel = self
            .channels
            .channel(ctx, port_id, channel_id)
            .ok_or_else(|| IbcError::ChannelNotFound {
                port: port_id.to_string(),
                channel: channel_id.to_string(),
            })?;
        let connection_id = channel
            .connection_hops
            .first()
            .ok_or_else(|| IbcError::ConnectionNotFound(String::new()))?;
        let connection = self
            .channels
            .connection(ctx, connection_id)
            .ok_or_else(|| IbcError::ConnectionNotFound(connection_id.clone()))?;

        let Some(provider_client) = self.consumer.provider_client_id(ctx) else {
            warn!(module = "mintburn", channel = %channel_id, "provider client unknown");
            return Ok(false);
        };
        if connection.client_id != provider_client {
            debug!(
                module = "mintburn",
                channel = %channel_id,
                client = %connection.client_id,
                provider_client = %provider_client,
                "channel not backed by provider client"
            );
            return Ok(false);
        }

        let params = self.params(ctx)?;
        let Some(client) = self.clients.client_state(ctx, &connection.client_id) else {
            warn!(module = "mintburn", client = %connection.client_id, "client state not found");
            return Ok(false);
        };
        if !params.allows_provider_chain(&client.chain_id) {
            warn!(module = "mintburn", chain_id = %client.chain_id, "provider client tracks a chain outside provider_chain_ids");
            return Ok(false);
        }
        Ok(true)
    }

    // -- replay index ------------------------------------------------------

    /// Whether the packet `(port, channel, sequence)` has already been mirrored.
    pub fn is_proof_consumed(
        &self,
        ctx: &Context<'_>,
        port_id: &str,
        channel_id: &str,
        sequence: u64,
    ) -> Result<bool, StateError> {
        ctx.store()
            .has(&keys::proof_key(port_id, channel_id, sequence))
    }

    pub(super) fn mark_proof_consumed(
        &self,
        ctx: &mut Context<'_>,
        port_id: &str,
        channel_id: &str,
        sequence: u64,
    ) -> Result<(), StateError> {
        ctx.store_mut()
            .set(&keys::proof_key(port_id, channel_id, sequence), SENTINEL)
    }

    // -- mirrored supply ---------------------------------------------------

    /// Outstanding mirrored supply.
    pub fn mirror_supply(&self, ctx: &Context<'_>) -> Result<U256, StateError> {
        match ctx.store().get(keys::MIRROR_SUPPLY_KEY)? {
            None => Ok(U256::ZERO),
            Some(raw) => std::str::from_utf8(&raw)
                .ok()
                .and_then(parse_amount)
                .ok_or_else(|| StateError::Corrupt(hex::encode(keys::MIRROR_SUPPLY_KEY))),
        }
    }

    fn set_mirror_supply(&self, ctx: &mut Context<'_>, v: U256) -> Result<(), StateError> {
        ctx.store_mut()
            .set(keys::MIRROR_SUPPLY_KEY, v.to_string().as_bytes())
    }

    pub(super) fn increase_mirror_supply(&self, ctx: &mut Context<'_>, by: U256) -> Result<U256, StateError> {
        let next = self.mirror_supply(ctx)?.saturating_add(by);
        self.set_mirror_supply(ctx, next)?;
        Ok(next)
    }

    /// Decrease, clamping at zero.
    pub(super) fn decrease_mirror_supply(&self, ctx: &mut Context<'_>, by: U256) -> Result<U256, StateError> {
        let cur = self.mirror_supply(ctx)?;
        if by > cur {
            warn!(module = "mintburn", supply = %cur, burn = %by, "burn exceeds mirrored supply; clamping");
        }
        let next = cur.saturating_sub(by);
        self.set_mirror_supply(ctx, next)?;
        Ok(next)
    }

    // -- value movements ---------------------------------------------------

    /// Mint `amount` to the module and hand it to `recipient`, atomically.
    pub fn mint_tokens(
        &self,
        ctx: &mut Context<'_>,
        recipient: &Address,
        amount: &Coin,
    ) -> Result<(), BridgeError> {
        ctx.atomic(|c| -> Result<(), BridgeError> {
            self.bank
                .mint_coins(c, MODULE_NAME, amount)
                .map_err(BridgeError::Mint)?;
            self.bank
                .send_coins_from_module_to_account(c, MODULE_NAME, recipient, amount)
                .map_err(BridgeError::Send)
        })
    }

    /// Pull `amount` out of `holder` into the module and destroy it, atomically.
    pub fn burn_from(
        &self,
        ctx: &mut Context<'_>,
        holder: &Address,
        amount: &Coin,
    ) -> Result<(), BridgeError> {
        ctx.atomic(|c| -> Result<(), BridgeError> {
            self.bank
                .send_coins_from_account_to_module(c, holder, MODULE_NAME, amount)
                .map_err(BridgeError::Send)?;
            self.bank
                .burn_coins(c, MODULE_NAME, amount)
                .map_err(BridgeError::Burn)?;
            info!(module = "mintburn", holder = %holder, amount = %amount, "burned");
            Ok(())
        })
    }
}
