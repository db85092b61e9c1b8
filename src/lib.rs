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

//! Maany DEX chain modules.
//!
//! This crate provides:
//! - Genesis-time minting of provider escrow claims, gated by Merkle proofs
//!   against the provider's light-client commitment roots
//! - A claim-notification relay over an interchain-account channel
//! - A transfer middleware that mirrors trusted provider tokens
//! - Deterministic state storage (in-memory and sled) with atomic branches
//! - Prometheus metrics and structured logging

/// Application configuration.
pub mod config;
/// Core primitives (types, state, execution context).
pub mod core;
/// Genesis escrow claims and their notification relay.
pub mod genesismint;
/// Interchain packet types and collaborator interfaces.
pub mod ibc;
/// Provider-token bridge middleware.
pub mod mintburn;
/// Observability.
pub mod monitoring;
