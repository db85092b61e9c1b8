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

//! Claim-notification wire codec.
//!
//! Minimal protobuf-compatible encoding of the three messages the remote
//! account executes:
//!
//! ```text
//! MsgNotifyClaim               1: sender  2: escrow_id  3: origin_chain_id   (strings)
//! Any                          1: type_url (string)     2: value (bytes)
//! CosmosTx                     1: messages (repeated Any)
//! InterchainAccountPacketData  1: type (varint)  2: data (bytes)  3: memo (string)
//! ```
//!
//! Every field uses wire type 2 (length-delimited) except `type` (wire type 0).
//! Empty fields are omitted, as proto3 does. The message version is carried in
//! the type URL.

use thiserror::Error;

/// Type URL of the v1 notification.
pub const NOTIFY_CLAIM_TYPE_URL: &str = "/maany.mintburn.v1.MsgNotifyClaim";

/// `InterchainAccountPacketData.type` for transaction execution.
pub const EXECUTE_TX: u64 = 1;

const WIRE_VARINT: u8 = 0;
const WIRE_LEN: u8 = 2;

/// Decoding errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireError {
    #[error("truncated input")]
    Truncated,
    #[error("varint overflow")]
    VarintOverflow,
    #[error("field {field}: unexpected wire type {wire}")]
    WireType { field: u64, wire: u8 },
    #[error("unknown field {0}")]
    UnknownField(u64),
    #[error("field {0}: invalid utf-8")]
    Utf8(u64),
    #[error("type url {0} is not a claim notification")]
    TypeUrl(String),
    #[error("expected exactly one message, got {0}")]
    MessageCount(usize),
    #[error("unsupported packet type {0}")]
    PacketType(u64),
}

fn put_varint(out: &mut Vec<u8>, mut v: u64) {
    while v >= 0x80 {
        out.push((v as u8) | 0x80);
        v >>= 7;
    }
    out.push(v as u8);
}

fn put_tag(out: &mut Vec<u8>, field: u64, wire: u8) {
    put_varint(out, (field << 3) | wire as u64);
}

fn put_bytes(out: &mut Vec<u8>, field: u64, bytes: &[u8]) {
    if bytes.is_empty() {
        return;
    }
    put_tag(out, field, WIRE_LEN);
    put_varint(out, bytes.len() as u64);
    out.extend_from_slice(bytes);
}

enum FieldValue<'a> {
    Varint(u64),
    Bytes(&'a [u8]),
}

struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    fn varint(&mut self) -> Result<u64, WireError> {
        let mut v: u64 = 0;
        for i in 0..10 {
            let (&b, rest) = self.buf.split_first().ok_or(WireError::Truncated)?;
            self.buf = rest;
            if i == 9 && b > 1 {
                return Err(WireError::VarintOverflow);
            }
            v |= ((b & 0x7f) as u64) << (7 * i);
            if b & 0x80 == 0 {
                return Ok(v);
            }
        }
        Err(WireError::VarintOverflow)
    }

    fn next_field(&mut self) -> Result<Option<(u64, FieldValue<'a>)>, WireError> {
        if self.buf.is_empty() {
            return Ok(None);
        }
        let tag = self.varint()?;
        let field = tag >> 3;
        let wire = (tag & 0x7) as u8;
        match wire {
            WIRE_VARINT => Ok(Some((field, FieldValue::Varint(self.varint()?)))),
            WIRE_LEN => {
                let len = usize::try_from(self.varint()?).map_err(|_| WireError::Truncated)?;
                if self.buf.len() < len {
                    return Err(WireError::Truncated);
                }
                let (data, rest) = self.buf.split_at(len);
                self.buf = rest;
                Ok(Some((field, FieldValue::Bytes(data))))
            }
            _ => Err(WireError::WireType { field, wire }),
        }
    }
}

fn expect_bytes(field: u64, v: FieldValue<'_>) -> Result<&[u8], WireError> {
    match v {
        FieldValue::Bytes(b) => Ok(b),
        FieldValue::Varint(_) => Err(WireError::WireType {
            field,
            wire: WIRE_VARINT,
        }),
    }
}

fn expect_string(field: u64, v: FieldValue<'_>) -> Result<String, WireError> {
    let b = expect_bytes(field, v)?;
    std::str::from_utf8(b)
        .map(str::to_owned)
        .map_err(|_| WireError::Utf8(field))
}

/// Instruction telling the provider that an escrow has been claimed here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MsgNotifyClaim {
    /// Remote account executing the message.
    pub sender: String,
    /// Claimed escrow.
    pub escrow_id: String,
    /// Chain the escrow lives on.
    pub origin_chain_id: String,
}

impl MsgNotifyClaim {
    /// Wire bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            6 + self.sender.len() + self.escrow_id.len() + self.origin_chain_id.len(),
        );
        put_bytes(&mut out, 1, self.sender.as_bytes());
        put_bytes(&mut out, 2, self.escrow_id.as_bytes());
        put_bytes(&mut out, 3, self.origin_chain_id.as_bytes());
        out
    }

    /// Parse wire bytes.
    pub fn decode(buf: &[u8]) -> Result<Self, WireError> {
        let mut r = Reader { buf };
        let mut m = Self::default();
        while let Some((field, v)) = r.next_field()? {
            match field {
                1 => m.sender = expect_string(field, v)?,
                2 => m.escrow_id = expect_string(field, v)?,
                3 => m.origin_chain_id = expect_string(field, v)?,
                other => return Err(WireError::UnknownField(other)),
            }
        }
        Ok(m)
    }
}

/// Type-tagged message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Any {
    /// Message type URL.
    pub type_url: String,
    /// Encoded message.
    pub value: Vec<u8>,
}

impl Any {
    fn encode_into(&self, out: &mut Vec<u8>) {
        put_bytes(out, 1, self.type_url.as_bytes());
        put_bytes(out, 2, &self.value);
    }

    fn decode(buf: &[u8]) -> Result<Self, WireError> {
        let mut r = Reader { buf };
        let mut a = Self::default();
        while let Some((field, v)) = r.next_field()? {
            match field {
                1 => a.type_url = expect_string(field, v)?,
                2 => a.value = expect_bytes(field, v)?.to_vec(),
                other => return Err(WireError::UnknownField(other)),
            }
        }
        Ok(a)
    }
}

/// Multi-message transaction executed by the remote account.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CosmosTx {
    /// Messages in execution order.
    pub messages: Vec<Any>,
}

impl CosmosTx {
    /// Wire bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for m in &self.messages {
            let mut inner = Vec::new();
            m.encode_into(&mut inner);
            put_tag(&mut out, 1, WIRE_LEN);
            put_varint(&mut out, inner.len() as u64);
            out.extend_from_slice(&inner);
        }
        out
    }

    /// Parse wire bytes.
    pub fn decode(buf: &[u8]) -> Result<Self, WireError> {
        let mut r = Reader { buf };
        let mut tx = Self::default();
        while let Some((field, v)) = r.next_field()? {
            match field {
                1 => tx.messages.push(Any::decode(expect_bytes(field, v)?)?),
                other => return Err(WireError::UnknownField(other)),
            }
        }
        Ok(tx)
    }
}

/// Remote-control packet payload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InterchainAccountPacketData {
    /// Packet type.
    pub kind: u64,
    /// Encoded [`CosmosTx`].
    pub data: Vec<u8>,
    /// Memo.
    pub memo: String,
}

impl InterchainAccountPacketData {
    /// Wire bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 + self.data.len() + self.memo.len());
        if self.kind != 0 {
            put_tag(&mut out, 1, WIRE_VARINT);
            put_varint(&mut out, self.kind);
        }
        put_bytes(&mut out, 2, &self.data);
        put_bytes(&mut out, 3, self.memo.as_bytes());
        out
    }

    /// Parse wire bytes.
    pub fn decode(buf: &[u8]) -> Result<Self, WireError> {
        let mut r = Reader { buf };
        let mut p = Self::default();
        while let Some((field, v)) = r.next_field()? {
            match (field, v) {
                (1, FieldValue::Varint(k)) => p.kind = k,
                (1, FieldValue::Bytes(_)) => {
                    return Err(WireError::WireType {
                        field: 1,
                        wire: WIRE_LEN,
                    })
                }
                (2, v) => p.data = expect_bytes(2, v)?.to_vec(),
                (3, v) => p.memo = expect_string(3, v)?,
                (other, _) => return Err(WireError::UnknownField(other)),
            }
        }
        Ok(p)
    }
}

/// Full packet payload notifying the provider of one claim.
pub fn encode_notification(msg: &MsgNotifyClaim) -> Vec<u8> {
    let tx = CosmosTx {
        messages: vec![Any {
            type_url: NOTIFY_CLAIM_TYPE_URL.to_string(),
            value: msg.encode(),
        }],
    };
    InterchainAccountPacketData {
        kind: EXECUTE_TX,
        data: tx.encode(),
        memo: String::new(),
    }
    .encode()
}

/// Inverse of [`encode_notification`].
pub fn decode_notification(buf: &[u8]) -> Result<MsgNotifyClaim, WireError> {
    let packet = InterchainAccountPacketData::decode(buf)?;
    if packet.kind != EXECUTE_TX {
        return Err(WireError::PacketType(packet.kind));
    }
    let tx = CosmosTx::decode(&packet.data)?;
    let [any] = tx.messages.as_slice() else {
        return Err(WireError::MessageCount(tx.messages.len()));
    };
    if any.type_url != NOTIFY_CLAIM_TYPE_URL {
        return Err(WireError::TypeUrl(any.type_url.clone()));
    }
    MsgNotifyClaim::decode(&any.value)
}
