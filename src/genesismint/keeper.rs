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

//! Claim-workflow keeper: collaborator wiring plus the verify-then-mint flow.

use std::sync::Arc;

use crate::core::context::Context;
use crate::core::state::store::StateError;
use crate::genesismint::ledger::{apply_claim, MintError};
use crate::genesismint::relay::RelayConfig;
use crate::genesismint::repo::{ClaimedIndex, Config, PendingQueue};
use crate::genesismint::types::{ClaimId, MintIntent, Params};
use crate::genesismint::verify::{verify_intent, Verdict, VerifyError};
use crate::ibc::keepers::{AddressCodec, BankKeeper, ChannelRegistry, RemoteProofSource, RemoteSend};
use crate::monitoring::metrics::Metrics;
use thiserror::Error;

/// Failure to process one claim.
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error(transparent)]
    Verify(#[from] VerifyError),
    #[error(transparent)]
    Mint(#[from] MintError),
}

/// Host-provided services the workflow depends on.
#[derive(Clone)]
pub struct Collaborators {
    /// Value transfer.
    pub bank: Arc<dyn BankKeeper>,
    /// External address decoding.
    pub addresses: Arc<dyn AddressCodec>,
    /// Provider commitment roots.
    pub roots: Arc<dyn RemoteProofSource>,
    /// Channel and connection registry.
    pub channels: Arc<dyn ChannelRegistry>,
    /// Remote-control send primitive.
    pub remote: Arc<dyn RemoteSend>,
}

/// Claim-workflow keeper.
#[derive(Clone)]
pub struct Keeper {
    pub(super) deps: Collaborators,
    pub(super) relay: RelayConfig,
    pub(super) metrics: Option<Metrics>,
}

impl Keeper {
    /// New keeper.
    pub fn new(deps: Collaborators, relay: RelayConfig) -> Self {
        Self {
            deps,
            relay,
            metrics: None,
        }
    }

    /// Attach metrics.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Relay configuration in use.
    pub fn relay_config(&self) -> &RelayConfig {
        &self.relay
    }

    /// Stored params.
    pub fn params(&self, ctx: &Context<'_>) -> Result<Option<Params>, StateError> {
        Config::params(ctx.store())
    }

    /// Persist params.
    pub fn set_params(&self, ctx: &mut Context<'_>, params: &Params) -> Result<(), StateError> {
        Config::set_params(ctx.store_mut(), params)
    }

    /// Whether the claim has been minted.
    pub fn is_claimed(&self, ctx: &Context<'_>, id: &ClaimId) -> Result<bool, StateError> {
        ClaimedIndex::contains(ctx.store(), id)
    }

    /// Mark a claim as already minted without minting (genesis import).
    pub fn set_claimed(&self, ctx: &mut Context<'_>, id: &ClaimId) -> Result<(), StateError> {
        ClaimedIndex::insert(ctx.store_mut(), id)
    }

    /// Every claimed id.
    pub fn claimed(&self, ctx: &Context<'_>) -> Result<Vec<ClaimId>, StateError> {
        ClaimedIndex::all(ctx.store())
    }

    /// Claims whose notification has not been delivered yet.
    pub fn pending(&self, ctx: &Context<'_>) -> Result<Vec<ClaimId>, StateError> {
        PendingQueue::list(ctx.store(), None)
    }

    /// Verify `intent` and, unless it was already claimed, mint it.
    /// Returns whether a mint happened. Callers count mints once the
    /// surrounding transaction commits.
    pub fn process_genesis_mint(
        &self,
        ctx: &mut Context<'_>,
        params: &Params,
        intent: &MintIntent,
        strict: bool,
    ) -> Result<bool, ClaimError> {
        match verify_intent(ctx, self.deps.roots.as_ref(), params, intent, strict)? {
            Verdict::AlreadyClaimed => Ok(false),
            Verdict::Verified(_) => {
                apply_claim(
                    ctx,
                    self.deps.bank.as_ref(),
                    self.deps.addresses.as_ref(),
                    params,
                    intent,
                )?;
                Ok(true)
            }
        }
    }
}
