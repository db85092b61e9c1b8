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

//! Inter-chain transport surface consumed by application modules.

/// Acknowledgement envelope.
pub mod ack;
/// ICS-23 proofs of counterparty state.
pub mod commitment;
/// Collaborator interfaces (bank, light client, registry, remote send).
pub mod keepers;
/// Application callback trait.
pub mod module;
/// Fungible-token transfer payloads and denomination traces.
pub mod transfer;
/// Channel, connection, client and packet types.
pub mod types;
