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

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use maany_dex::ibc::commitment::{
    prove_multistore, sdk_specs, verify_membership, MerklePath, MultiStore,
};

#[derive(Clone, Debug, Arbitrary)]
struct Input {
    stores: Vec<(String, Vec<(Vec<u8>, Vec<u8>)>)>,
    store_index: u8,
    key_index: u16,
    forged_value: Option<Vec<u8>>,
}

fuzz_target!(|inp: Input| {
    let mut stores = MultiStore::new();
    for (name, pairs) in inp.stores {
        if name.is_empty() {
            continue;
        }
        stores
            .entry(name)
            .or_default()
            .extend(pairs.into_iter().filter(|(k, v)| !k.is_empty() && !v.is_empty()));
    }
    let names: Vec<String> = stores.keys().cloned().collect();
    if names.is_empty() {
        return;
    }
    let name = &names[inp.store_index as usize % names.len()];
    let kv = &stores[name];
    if kv.is_empty() {
        return;
    }
    let Some((key, value)) = kv.iter().nth(inp.key_index as usize % kv.len()) else {
        return;
    };
    let Some((root, proof)) = prove_multistore(&stores, name, key) else {
        return;
    };
    let path = MerklePath::new(name, key);
    assert!(verify_membership(&sdk_specs(), &root, &path, value, &proof).is_ok());
    if let Some(forged) = inp.forged_value {
        if &forged != value {
            assert!(verify_membership(&sdk_specs(), &root, &path, &forged, &proof).is_err());
        }
    }
});
