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

//! Application configuration (TOML).

use std::fs;
use std::path::Path;

use crate::genesismint::relay::{RelayConfig, RemovalPolicy};
use crate::ibc::transfer::TRANSFER_PORT;
use serde::Deserialize;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Log output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable single-line output.
    #[default]
    Compact,
    /// One JSON object per event.
    Json,
}

/// `[genesismint.relay]`
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RelaySection {
    /// Connection to the provider.
    pub connection_id: String,
    /// Remote account owner.
    pub owner_id: String,
    /// Sends per round.
    pub max_claims_per_block: usize,
    /// Packet timeout, seconds.
    pub relative_timeout_secs: u64,
    /// Dequeue policy.
    pub removal: RemovalPolicy,
}

impl Default for RelaySection {
    fn default() -> Self {
        let d = RelayConfig::default();
        Self {
            connection_id: d.connection_id,
            owner_id: d.owner_id,
            max_claims_per_block: d.max_claims_per_block,
            relative_timeout_secs: d.relative_timeout_ns / 1_000_000_000,
            removal: d.removal,
        }
    }
}

/// `[genesismint]`
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenesisMintSection {
    /// Verify proofs during genesis.
    pub strict_proofs: bool,
    /// Notification relay.
    pub relay: RelaySection,
}

impl Default for GenesisMintSection {
    fn default() -> Self {
        Self {
            strict_proofs: true,
            relay: RelaySection::default(),
        }
    }
}

/// `[mintburn]`
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MintBurnSection {
    /// Port whose packets the bridge intercepts.
    pub transfer_port: String,
}

impl Default for MintBurnSection {
    fn default() -> Self {
        Self {
            transfer_port: TRANSFER_PORT.to_string(),
        }
    }
}

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Log output format.
    pub log_format: LogFormat,
    /// State directory.
    pub data_dir: String,
    /// Genesis claims.
    pub genesismint: GenesisMintSection,
    /// Bridge.
    pub mintburn: MintBurnSection,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Compact,
            data_dir: "./data".to_string(),
            genesismint: GenesisMintSection::default(),
            mintburn: MintBurnSection::default(),
        }
    }
}

impl AppConfig {
    /// Semantic checks beyond the schema.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let relay = &self.genesismint.relay;
        if relay.connection_id.trim().is_empty() {
            return Err(ConfigError::Invalid("genesismint.relay.connection_id is empty".into()));
        }
        if relay.owner_id.trim().is_empty() {
            return Err(ConfigError::Invalid("genesismint.relay.owner_id is empty".into()));
        }
        if relay.max_claims_per_block == 0 {
            return Err(ConfigError::Invalid("genesismint.relay.max_claims_per_block must be > 0".into()));
        }
        if relay.relative_timeout_secs == 0 {
            return Err(ConfigError::Invalid("genesismint.relay.relative_timeout_secs must be > 0".into()));
        }
        if relay.relative_timeout_secs.checked_mul(1_000_000_000).is_none() {
            return Err(ConfigError::Invalid("genesismint.relay.relative_timeout_secs too large".into()));
        }
        if self.mintburn.transfer_port.trim().is_empty() {
            return Err(ConfigError::Invalid("mintburn.transfer_port is empty".into()));
        }
        Ok(())
    }

    /// Relay settings for the genesismint keeper.
    pub fn to_relay_config(&self) -> RelayConfig {
        let r = &self.genesismint.relay;
        RelayConfig {
            connection_id: r.connection_id.clone(),
            owner_id: r.owner_id.clone(),
            max_claims_per_block: r.max_claims_per_block,
            relative_timeout_ns: r.relative_timeout_secs.saturating_mul(1_000_000_000),
            removal: r.removal,
        }
    }
}

/// Parse and validate a config document.
///
/// Does not touch the filesystem; intended for tooling and fuzzing.
pub fn parse_app_config_toml(raw: &str) -> Result<AppConfig, ConfigError> {
    let cfg: AppConfig = toml::from_str(raw)?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load `path`.
pub fn load(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_app_config_toml(&raw)
}
