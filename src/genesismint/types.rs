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

//! Genesis-supplied claim intents, module parameters and genesis state.

use crate::core::state::merkle::Hash32;
use crate::core::types::{serde_hex, Height};
use crate::ibc::commitment::MerkleProof;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Module name; also the name of the module account that mints.
pub const MODULE_NAME: &str = "genesismint";

/// Parameter validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamsError {
    #[error("provider client/chain id required")]
    MissingProviderIds,
    #[error("denoms required")]
    MissingDenoms,
    #[error("genesis trusted root enabled but not configured")]
    MissingTrustedRoot,
}

/// Genesis validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenesisValidationError {
    #[error("params missing")]
    ParamsMissing,
    #[error("params: {0}")]
    Params(#[from] ParamsError),
    #[error("mints[{index}]: {reason}")]
    Mint { index: usize, reason: String },
    #[error("claimed_escrow_ids[{0}]: empty")]
    EmptyClaimedId(usize),
}

/// Root accepted when no consensus state is stored for the proof height yet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisTrustedRoot {
    /// Revision number of the height the root was taken at.
    pub revision_number: u64,
    /// Block height the root was taken at.
    pub revision_height: u64,
    /// Commitment root.
    #[serde(with = "serde_hex::array32")]
    pub hash: Hash32,
}

impl GenesisTrustedRoot {
    /// Height the root commits to.
    pub fn height(&self) -> Height {
        Height::new(self.revision_number, self.revision_height)
    }
}

/// Chain-level configuration of the claim workflow.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    /// Chain id of the provider holding the escrows.
    pub provider_chain_id: String,
    /// Local light client tracking the provider.
    pub provider_client_id: String,
    /// Denomination escrowed on the provider.
    pub allowed_provider_denom: String,
    /// Denomination minted locally.
    pub mint_denom: String,
    /// Optional fallback root.
    #[serde(default)]
    pub genesis_trusted_root: Option<GenesisTrustedRoot>,
    /// Whether the fallback root may be used at all.
    #[serde(default)]
    pub use_genesis_trusted_root: bool,
}

impl Params {
    /// Structural checks; must pass before any claim is processed.
    pub fn validate_basic(&self) -> Result<(), ParamsError> {
        if self.provider_client_id.is_empty() || self.provider_chain_id.is_empty() {
            return Err(ParamsError::MissingProviderIds);
        }
        if self.allowed_provider_denom.is_empty() || self.mint_denom.is_empty() {
            return Err(ParamsError::MissingDenoms);
        }
        if self.use_genesis_trusted_root && self.genesis_trusted_root.is_none() {
            return Err(ParamsError::MissingTrustedRoot);
        }
        Ok(())
    }

    /// Fallback root for `height`, if enabled and recorded at exactly that height.
    pub fn trusted_root_at(&self, height: Height) -> Option<Hash32> {
        if !self.use_genesis_trusted_root {
            return None;
        }
        self.genesis_trusted_root
            .as_ref()
            .filter(|r| r.height() == height)
            .map(|r| r.hash)
    }
}

/// Identity of one claim.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClaimId {
    /// Provider chain id.
    pub provider_chain_id: String,
    /// Escrow id on the provider.
    pub escrow_id: String,
}

impl ClaimId {
    /// Construct.
    pub fn new(provider_chain_id: impl Into<String>, escrow_id: impl Into<String>) -> Self {
        Self {
            provider_chain_id: provider_chain_id.into(),
            escrow_id: escrow_id.into(),
        }
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.provider_chain_id, self.escrow_id)
    }
}

/// Assertion that the provider holds an escrow record, with a proof of it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintIntent {
    /// Provider chain id.
    pub provider_chain_id: String,
    /// Escrow id on the provider.
    pub escrow_id: String,
    /// `[store_name, hex_key]`.
    pub key_path: Vec<String>,
    /// Base64 escrow record bytes.
    pub value: String,
    /// Escrowed denomination.
    pub amount_denom: String,
    /// Decimal amount.
    pub amount_value: String,
    /// External form of the local recipient address.
    pub recipient: String,
    /// Revision number of the proof height.
    #[serde(default)]
    pub proof_height_revision_number: u64,
    /// Block height the proof was taken at.
    #[serde(default)]
    pub proof_height_revision_height: u64,
    /// ICS-23 membership proof of `value` at `key_path`, one layer per entry.
    #[serde(default)]
    pub merkle_proof: MerkleProof,
}

impl MintIntent {
    /// Claim identity.
    pub fn claim_id(&self) -> ClaimId {
        ClaimId::new(&self.provider_chain_id, &self.escrow_id)
    }

    /// Height the proof was taken at.
    pub fn proof_height(&self) -> Height {
        Height::new(
            self.proof_height_revision_number,
            self.proof_height_revision_height,
        )
    }

    fn check_shape(&self) -> Result<(), String> {
        if self.provider_chain_id.is_empty() {
            return Err("provider_chain_id required".into());
        }
        if self.key_path.len() != 2 {
            return Err("key_path must be [storeName, hexKey]".into());
        }
        hex::decode(&self.key_path[1]).map_err(|e| format!("key_path[1] not valid hex: {e}"))?;
        if self.value.is_empty() {
            return Err("value (base64) required".into());
        }
        STANDARD
            .decode(&self.value)
            .map_err(|e| format!("value not base64: {e}"))?;
        if self.amount_denom.is_empty() || self.amount_value.is_empty() {
            return Err("amount denom/value required".into());
        }
        if self.recipient.is_empty() {
            return Err("recipient required".into());
        }
        Ok(())
    }
}

/// Module genesis.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    /// Parameters.
    #[serde(default)]
    pub params: Option<Params>,
    /// Claims to process.
    #[serde(default)]
    pub mints: Vec<MintIntent>,
    /// Escrow ids already claimed (of `params.provider_chain_id`).
    #[serde(default)]
    pub claimed_escrow_ids: Vec<String>,
}

impl GenesisState {
    /// Empty genesis with default (unset) params.
    pub fn default_genesis() -> Self {
        Self {
            params: Some(Params::default()),
            mints: Vec::new(),
            claimed_escrow_ids: Vec::new(),
        }
    }

    /// Structural validation of the whole document.
    pub fn validate(&self) -> Result<(), GenesisValidationError> {
        let params = self
            .params
            .as_ref()
            .ok_or(GenesisValidationError::ParamsMissing)?;
        params.validate_basic()?;

        for (index, m) in self.mints.iter().enumerate() {
            m.check_shape()
                .map_err(|reason| GenesisValidationError::Mint { index, reason })?;
        }
        for (i, id) in self.claimed_escrow_ids.iter().enumerate() {
            if id.is_empty() {
                return Err(GenesisValidationError::EmptyClaimedId(i));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> Params {
        Params {
            provider_chain_id: "maany-mainnet".into(),
            provider_client_id: "07-tendermint-0".into(),
            allowed_provider_denom: "stake".into(),
            mint_denom: "umaany".into(),
            genesis_trusted_root: None,
            use_genesis_trusted_root: false,
        }
    }

    #[test]
    fn params_require_ids_and_denoms() {
        assert!(params().validate_basic().is_ok());
        let mut p = params();
        p.provider_client_id.clear();
        assert_eq!(p.validate_basic(), Err(ParamsError::MissingProviderIds));
        let mut p = params();
        p.mint_denom.clear();
        assert_eq!(p.validate_basic(), Err(ParamsError::MissingDenoms));
        let mut p = params();
        p.use_genesis_trusted_root = true;
        assert_eq!(p.validate_basic(), Err(ParamsError::MissingTrustedRoot));
    }

    #[test]
    fn trusted_root_needs_flag_and_exact_height() {
        let mut p = params();
        p.genesis_trusted_root = Some(GenesisTrustedRoot {
            revision_number: 0,
            revision_height: 50,
            hash: [7u8; 32],
        });
        assert_eq!(p.trusted_root_at(Height::new(0, 50)), None);
        p.use_genesis_trusted_root = true;
        assert_eq!(p.trusted_root_at(Height::new(0, 50)), Some([7u8; 32]));
        assert_eq!(p.trusted_root_at(Height::new(0, 51)), None);
        assert_eq!(p.trusted_root_at(Height::new(1, 50)), None);
    }

    #[test]
    fn genesis_validation_names_the_bad_mint() {
        let good = MintIntent {
            provider_chain_id: "maany-mainnet".into(),
            escrow_id: "e1".into(),
            key_path: vec!["mintburn".into(), "0a0b".into()],
            value: "AQID".into(),
            amount_denom: "stake".into(),
            amount_value: "10".into(),
            recipient: "maany1xyz".into(),
            ..Default::default()
        };
        let mut bad = good.clone();
        bad.key_path = vec!["mintburn".into(), "zz".into()];

        let gs = GenesisState {
            params: Some(params()),
            mints: vec![good.clone(), bad],
            claimed_escrow_ids: vec![],
        };
        match gs.validate() {
            Err(GenesisValidationError::Mint { index, .. }) => assert_eq!(index, 1),
            other => panic!("unexpected: {other:?}"),
        }

        let gs = GenesisState {
            params: None,
            mints: vec![good],
            claimed_escrow_ids: vec![],
        };
        assert_eq!(gs.validate(), Err(GenesisValidationError::ParamsMissing));

        let gs = GenesisState {
            params: Some(params()),
            mints: vec![],
            claimed_escrow_ids: vec!["".into()],
        };
        assert_eq!(gs.validate(), Err(GenesisValidationError::EmptyClaimedId(0)));
    }

    #[test]
    fn intent_json_accepts_missing_proof() {
        let raw = r#"{
            "provider_chain_id": "maany-mainnet",
            "escrow_id": "e1",
            "key_path": ["mintburn", "0a"],
            "value": "AQ==",
            "amount_denom": "stake",
            "amount_value": "5",
            "recipient": "r"
        }"#;
        let m: MintIntent = serde_json::from_str(raw).unwrap();
        assert!(m.merkle_proof.proofs.is_empty());
        assert_eq!(m.proof_height(), Height::new(0, 0));
        assert_eq!(m.claim_id().to_string(), "maany-mainnet/e1");
    }
}
