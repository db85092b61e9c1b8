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

//! Bridge parameters and genesis state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Module name; also the module account that mints and burns.
pub const MODULE_NAME: &str = "mintburn";

/// Parameter validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamsError {
    #[error("provider_chain_ids must not be empty")]
    NoProviderChains,
    #[error("invalid provider chain-id: {0:?}")]
    InvalidChainId(String),
    #[error("allowed_base_denoms must not be empty")]
    NoAllowedDenoms,
    #[error("empty denom in allowed_base_denoms")]
    EmptyDenom,
    #[error("dex_native_denom must not be empty")]
    NoNativeDenom,
}

/// Bridge parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    /// Account allowed to update params later.
    #[serde(default)]
    pub authority: String,
    /// Kill-switch for mirror mints.
    #[serde(default)]
    pub pause: bool,
    /// Base denoms mirrored when received from the provider.
    pub allowed_base_denoms: Vec<String>,
    /// Chain ids a trusted counterparty client may track.
    pub provider_chain_ids: Vec<String>,
    /// Denom minted on receive and burned on the outbound leg.
    pub dex_native_denom: String,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            authority: String::new(),
            pause: false,
            allowed_base_denoms: vec!["stake".to_string()],
            provider_chain_ids: vec!["maany-mainnet".to_string()],
            dex_native_denom: "umaany".to_string(),
        }
    }
}

/// `^[a-zA-Z][a-zA-Z0-9-]{2,64}$`
pub fn is_valid_chain_id(s: &str) -> bool {
    let b = s.as_bytes();
    (3..=65).contains(&b.len())
        && b[0].is_ascii_alphabetic()
        && b[1..].iter().all(|c| c.is_ascii_alphanumeric() || *c == b'-')
}

impl Params {
    /// Validate.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.provider_chain_ids.is_empty() {
            return Err(ParamsError::NoProviderChains);
        }
        if let Some(bad) = self
            .provider_chain_ids
            .iter()
            .find(|c| !is_valid_chain_id(c))
        {
            return Err(ParamsError::InvalidChainId(bad.clone()));
        }
        if self.allowed_base_denoms.is_empty() {
            return Err(ParamsError::NoAllowedDenoms);
        }
        if self.allowed_base_denoms.iter().any(|d| d.trim().is_empty()) {
            return Err(ParamsError::EmptyDenom);
        }
        if self.dex_native_denom.trim().is_empty() {
            return Err(ParamsError::NoNativeDenom);
        }
        Ok(())
    }

    /// Whether `base_denom` is mirrored.
    pub fn allows_denom(&self, base_denom: &str) -> bool {
        self.allowed_base_denoms.iter().any(|d| d == base_denom)
    }

    /// Whether a client tracking `chain_id` may be trusted.
    pub fn allows_provider_chain(&self, chain_id: &str) -> bool {
        self.provider_chain_ids.iter().any(|c| c == chain_id)
    }
}

/// Module genesis.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    /// Parameters.
    pub params: Params,
}

impl GenesisState {
    /// Validate.
    pub fn validate(&self) -> Result<(), ParamsError> {
        self.params.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Params::default().validate().is_ok());
        assert!(GenesisState::default().validate().is_ok());
    }

    #[test]
    fn chain_id_syntax() {
        assert!(is_valid_chain_id("maany-mainnet"));
        assert!(is_valid_chain_id("abc"));
        assert!(!is_valid_chain_id("ab"));
        assert!(!is_valid_chain_id("1abc"));
        assert!(!is_valid_chain_id("maany_mainnet"));
        assert!(!is_valid_chain_id(""));
        assert!(is_valid_chain_id(&format!("a{}", "b".repeat(64))));
        assert!(!is_valid_chain_id(&format!("a{}", "b".repeat(65))));
    }

    #[test]
    fn validation_errors() {
        let mut p = Params::default();
        p.provider_chain_ids = vec!["bad id".into()];
        assert_eq!(p.validate(), Err(ParamsError::InvalidChainId("bad id".into())));
        let mut p = Params::default();
        p.allowed_base_denoms = vec![" ".into()];
        assert_eq!(p.validate(), Err(ParamsError::EmptyDenom));
        let mut p = Params::default();
        p.dex_native_denom.clear();
        assert_eq!(p.validate(), Err(ParamsError::NoNativeDenom));
        let mut p = Params::default();
        p.provider_chain_ids.clear();
        assert_eq!(p.validate(), Err(ParamsError::NoProviderChains));
    }
}
