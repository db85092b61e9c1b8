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

//! Mint-and-mark: the only place the claim workflow creates value.

use crate::core::context::Context;
use crate::core::state::store::StateError;
use crate::core::types::{parse_amount, Coin, Event};
use crate::genesismint::repo::{ClaimedIndex, PendingQueue};
use crate::genesismint::types::{MintIntent, Params, MODULE_NAME};
use crate::ibc::keepers::{AddressCodec, AddressError, BankError, BankKeeper};
use thiserror::Error;
use tracing::info;

/// Event emitted per minted claim.
pub const EVENT_MINTED: &str = "genesismint_minted";

/// Effect errors of the mint path. Nothing is written when one is returned.
#[derive(Debug, Error)]
pub enum MintError {
    #[error("bad amount_value: {0}")]
    InvalidAmount(String),
    #[error("recipient: {0}")]
    Recipient(#[from] AddressError),
    #[error("mint coins: {0}")]
    Mint(BankError),
    #[error("send to recipient: {0}")]
    Send(BankError),
    #[error("state: {0}")]
    State(#[from] StateError),
}

/// Mint `intent.amount_value` of `params.mint_denom` to the module, move it to
/// the recipient, then record the claim as claimed and pending.
///
/// Runs in one atomic branch, so a failed transfer also undoes the mint.
/// Callers must have verified the intent first.
pub fn apply_claim(
    ctx: &mut Context<'_>,
    bank: &dyn BankKeeper,
    addresses: &dyn AddressCodec,
    params: &Params,
    intent: &MintIntent,
) -> Result<Coin, MintError> {
    let amount = parse_amount(&intent.amount_value)
        .filter(|a| !a.is_zero())
        .ok_or_else(|| MintError::InvalidAmount(intent.amount_value.clone()))?;
    let coin = Coin::new(&params.mint_denom, amount);
    let recipient = addresses.decode(&intent.recipient)?;
    let id = intent.claim_id();

    ctx.atomic(|c| -> Result<(), MintError> {
        bank.mint_coins(c, MODULE_NAME, &coin).map_err(MintError::Mint)?;
        bank.send_coins_from_module_to_account(c, MODULE_NAME, &recipient, &coin)
            .map_err(MintError::Send)?;

        ClaimedIndex::insert(c.store_mut(), &id)?;
        PendingQueue::insert(c.store_mut(), &id)?;

        c.emit(
            Event::new(EVENT_MINTED)
                .attr("escrow_id", &intent.escrow_id)
                .attr("recipient", &intent.recipient)
                .attr("amount", &coin)
                .attr("proof_height", intent.proof_height()),
        );
        Ok(())
    })?;

    info!(
        module = "genesismint",
        escrow_id = %intent.escrow_id,
        recipient = %intent.recipient,
        amount = %coin,
        "claim minted"
    );
    Ok(coin)
}
