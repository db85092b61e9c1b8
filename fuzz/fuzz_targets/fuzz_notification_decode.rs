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
use maany_dex::genesismint::codec::{decode_notification, encode_notification};

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must re-encode to something that decodes the same.
    if let Ok(msg) = decode_notification(data) {
        let again = decode_notification(&encode_notification(&msg));
        assert_eq!(again.as_ref(), Ok(&msg));
    }
});
