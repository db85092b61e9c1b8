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

//! Genesis-time escrow claims: proof verification, exactly-once minting and
//! the remote notification relay.

/// Claim-notification wire codec.
pub mod codec;
/// Genesis import/export.
pub mod genesis;
/// Controller-stack middleware.
pub mod ica_middleware;
/// Keeper and collaborator wiring.
pub mod keeper;
/// Store key layout.
pub mod keys;
/// Mint-and-mark ledger.
pub mod ledger;
/// Notification queue state machine.
pub mod relay;
/// Typed repositories.
pub mod repo;
/// Intents, params and genesis state.
pub mod types;
/// Claim verification.
pub mod verify;

pub use keeper::{Collaborators, Keeper};
pub use relay::{RelayConfig, RelayState, RemovalPolicy, RoundReport};
pub use types::{ClaimId, GenesisState, MintIntent, Params};
