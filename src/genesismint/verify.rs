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

//! Escrow-claim verification.
//!
//! Checks run in a fixed order and each failure is distinct. Verification
//! only reads state; the mint itself belongs to the ledger.

use crate::core::context::Context;
use crate::core::state::store::StateError;
use crate::core::types::Height;
use crate::genesismint::repo::ClaimedIndex;
use crate::genesismint::types::{ClaimId, MintIntent, Params, ParamsError};
use crate::ibc::commitment::{sdk_specs, verify_membership, MerklePath, ProofError};
use crate::ibc::keepers::RemoteProofSource;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;
use tracing::debug;

/// Verification errors. Validation failures come first, proof failures last.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("params invalid: {0}")]
    Params(#[from] ParamsError),
    #[error("provider_chain_id mismatch: {got} != {expected}")]
    ChainMismatch { got: String, expected: String },
    #[error("amount_denom not allowed: {0}")]
    DenomNotAllowed(String),
    #[error("key_path must be [storeName, hexKey], got {0} segments")]
    KeyPath(usize),
    #[error("bad hex key: {0}")]
    BadKey(String),
    #[error("bad base64 value: {0}")]
    BadValue(String),
    #[error("no commitment root for client {client_id} at height {height}")]
    NoCommitmentRoot { client_id: String, height: Height },
    #[error("verify membership failed: {0}")]
    Proof(#[from] ProofError),
    #[error("state: {0}")]
    State(#[from] StateError),
}

/// Decoded escrow record location and contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifiedClaim {
    /// Claim identity.
    pub id: ClaimId,
    /// Provider store holding the record.
    pub store_name: String,
    /// Record key.
    pub key: Vec<u8>,
    /// Record bytes.
    pub value: Vec<u8>,
    /// Whether the record was proven against a root.
    pub proven: bool,
}

/// Outcome of a successful verification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Already minted; nothing to do.
    AlreadyClaimed,
    /// Checks passed; hand to the ledger.
    Verified(VerifiedClaim),
}

/// Verify `intent` under `params`.
///
/// With `strict` unset the membership proof is skipped entirely; that mode is
/// meant for development chains whose genesis has no provider client yet.
pub fn verify_intent(
    ctx: &Context<'_>,
    roots: &dyn RemoteProofSource,
    params: &Params,
    intent: &MintIntent,
    strict: bool,
) -> Result<Verdict, VerifyError> {
    let id = intent.claim_id();
    if ClaimedIndex::contains(ctx.store(), &id)? {
        debug!(module = "genesismint", claim = %id, "already claimed");
        return Ok(Verdict::AlreadyClaimed);
    }

    params.validate_basic()?;
    if intent.provider_chain_id != params.provider_chain_id {
        return Err(VerifyError::ChainMismatch {
            got: intent.provider_chain_id.clone(),
            expected: params.provider_chain_id.clone(),
        });
    }
    if intent.amount_denom != params.allowed_provider_denom {
        return Err(VerifyError::DenomNotAllowed(intent.amount_denom.clone()));
    }
    let [store_name, hex_key] = intent.key_path.as_slice() else {
        return Err(VerifyError::KeyPath(intent.key_path.len()));
    };
    let key = hex::decode(hex_key).map_err(|e| VerifyError::BadKey(e.to_string()))?;
    let value = STANDARD
        .decode(&intent.value)
        .map_err(|e| VerifyError::BadValue(e.to_string()))?;

    if strict {
        let height = intent.proof_height();
        let root = roots
            .commitment_root(ctx, &params.provider_client_id, height)
            .or_else(|| params.trusted_root_at(height))
            .ok_or_else(|| VerifyError::NoCommitmentRoot {
                client_id: params.provider_client_id.clone(),
                height,
            })?;
        let path = MerklePath::new(store_name, &key);
        verify_membership(&sdk_specs(), &root, &path, &value, &intent.merkle_proof)?;
    }

    Ok(Verdict::Verified(VerifiedClaim {
        id,
        store_name: store_name.clone(),
        key,
        value,
        proven: strict,
    }))
}
