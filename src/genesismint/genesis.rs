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

//! Genesis import and export.

use crate::core::context::Context;
use crate::core::state::store::StateError;
use crate::genesismint::keeper::{ClaimError, Keeper};
use crate::genesismint::types::{ClaimId, GenesisState, GenesisValidationError};
use thiserror::Error;
use tracing::info;

/// Genesis failures. Any of them must abort the chain's genesis load.
#[derive(Debug, Error)]
pub enum GenesisError {
    #[error("genesismint genesis validate: {0}")]
    Invalid(#[from] GenesisValidationError),
    #[error("genesismint: escrow_id={escrow_id}: {source}")]
    Claim {
        escrow_id: String,
        #[source]
        source: ClaimError,
    },
    #[error("state: {0}")]
    State(#[from] StateError),
}

/// Import `gs`: store params, mark imported ids as claimed and process every
/// mint intent. `strict` selects proof verification and should stay on
/// outside development chains.
///
/// Runs as one atomic unit: on error nothing is written.
pub fn init_genesis(
    keeper: &Keeper,
    ctx: &mut Context<'_>,
    gs: &GenesisState,
    strict: bool,
) -> Result<(), GenesisError> {
    gs.validate()?;
    let params = gs
        .params
        .as_ref()
        .ok_or(GenesisValidationError::ParamsMissing)?;

    let minted = ctx.atomic(|c| -> Result<usize, GenesisError> {
        keeper.set_params(c, params)?;
        for escrow_id in &gs.claimed_escrow_ids {
            keeper.set_claimed(c, &ClaimId::new(&params.provider_chain_id, escrow_id))?;
        }
        let mut minted = 0usize;
        for m in &gs.mints {
            let did_mint = keeper
                .process_genesis_mint(c, params, m, strict)
                .map_err(|source| GenesisError::Claim {
                    escrow_id: m.escrow_id.clone(),
                    source,
                })?;
            if did_mint {
                minted += 1;
            }
        }
        Ok(minted)
    })?;
    if let Some(m) = &keeper.metrics {
        m.claims_minted_total.inc_by(minted as u64);
    }

    info!(
        module = "genesismint",
        intents = gs.mints.len(),
        minted,
        strict,
        "genesis initialised"
    );
    Ok(())
}

/// Current params and claimed escrow ids. Mint intents are not exported:
/// every processed intent is represented by its claimed id.
pub fn export_genesis(keeper: &Keeper, ctx: &Context<'_>) -> Result<GenesisState, StateError> {
    Ok(GenesisState {
        params: Some(keeper.params(ctx)?.unwrap_or_default()),
        mints: Vec::new(),
        claimed_escrow_ids: keeper
            .claimed(ctx)?
            .into_iter()
            .map(|id| id.escrow_id)
            .collect(),
    })
}
