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


#![no_main]
#![forbid(unsafe_code)]

use libfuzzer_sys::fuzz_target;
use maany_dex::ibc::ack::Acknowledgement;
use maany_dex::ibc::transfer::{sender_native_denom, FungibleTokenPacketData};

fuzz_target!(|data: &[u8]| {
    let _ = Acknowledgement::from_bytes(data);
    if let Ok(p) = FungibleTokenPacketData::from_bytes(data) {
        if let Some(native) = sender_native_denom("transfer", "channel-0", &p.denom) {
            assert!(!native.starts_with("transfer/channel-0/"));
        }
        let _ = maany_dex::core::types::parse_amount(&p.amount);
    }
});
