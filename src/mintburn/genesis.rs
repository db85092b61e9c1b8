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

//! Bridge genesis.

use crate::core::context::Context;
use crate::core::state::store::StateError;
use crate::mintburn::keeper::Keeper;
use crate::mintburn::types::{GenesisState, ParamsError};
use thiserror::Error;
use tracing::info;

/// Genesis failures.
#[derive(Debug, Error)]
pub enum GenesisError {
    #[error("mintburn genesis validate: {0}")]
    Invalid(#[from] ParamsError),
    #[error("state: {0}")]
    State(#[from] StateError),
}

/// Validate and store params.
pub fn init_genesis(keeper: &Keeper, ctx: &mut Context<'_>, gs: &GenesisState) -> Result<(), GenesisError> {
    gs.validate()?;
    keeper.set_params(ctx, &gs.params)?;
    info!(
        module = "mintburn",
        provider_chains = gs.params.provider_chain_ids.len(),
        denoms = gs.params.allowed_base_denoms.len(),
        native = %gs.params.dex_native_denom,
        "genesis initialised"
    );
    Ok(())
}

/// Stored params.
pub fn export_genesis(keeper: &Keeper, ctx: &Context<'_>) -> Result<GenesisState, StateError> {
    Ok(GenesisState {
        params: keeper.params(ctx)?,
    })
}
