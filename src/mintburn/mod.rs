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


//! Provider-token bridge: trusted-channel allowlist, mirror mints on receive
//! and escrow burns on acknowledged outbound transfers.

/// Genesis import/export.
pub mod genesis;
/// Keeper.
pub mod keeper;
/// Store key layout.
pub mod keys;
/// Transfer-stack middleware.
pub mod middleware;
/// Params and genesis state.
pub mod types;

pub use keeper::{BridgeError, Keeper};
pub use middleware::BridgeMiddleware;
pub use types::{GenesisState, Params};
