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

//! Acknowledgement envelope in its JSON wire form:
//! `{"result":"<base64>"}` or `{"error":"<message>"}`.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

/// Result payload of a successful fungible-token receive.
pub const SUCCESS_RESULT: &[u8] = &[0x01];

/// Packet acknowledgement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Acknowledgement {
    /// Success with base64-encoded result bytes.
    Result(String),
    /// Failure with a message.
    Error(String),
}

impl Acknowledgement {
    /// Success acknowledgement carrying `result`.
    pub fn result(result: &[u8]) -> Self {
        Acknowledgement::Result(STANDARD.encode(result))
    }

    /// Standard success acknowledgement (`0x01`).
    pub fn success() -> Self {
        Self::result(SUCCESS_RESULT)
    }

    /// Error acknowledgement.
    pub fn error(msg: impl std::fmt::Display) -> Self {
        Acknowledgement::Error(msg.to_string())
    }

    /// True for a result acknowledgement.
    pub fn is_success(&self) -> bool {
        matches!(self, Acknowledgement::Result(_))
    }

    /// JSON wire bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        // Serializing a two-variant string enum cannot fail.
        serde_json::to_vec(self).unwrap_or_default()
    }

    /// Parse JSON wire bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}
