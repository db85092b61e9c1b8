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

//! Offline genesis audit: checks every mint intent of a genesismint genesis
//! file against a commitment root without writing any state.
//!
//! Usage: `maany-genesis-audit <config.toml> <genesis.json> [root-hex]`
//!
//! Without `root-hex` only the genesis trusted root in params can back a
//! proof. Intents already present in the node's claimed index are reported
//! as such.

use anyhow::{anyhow, bail, Context as _, Result};
use maany_dex::config::{self, LogFormat};
use maany_dex::core::context::Context;
use maany_dex::core::state::merkle::Hash32;
use maany_dex::core::state::persistent_state::PersistentState;
use maany_dex::core::state::store::CacheStore;
use maany_dex::core::types::Height;
use maany_dex::genesismint::types::GenesisState;
use maany_dex::genesismint::verify::{verify_intent, Verdict};
use maany_dex::ibc::keepers::RemoteProofSource;
use tracing::{error, info, warn};

/// Serves one operator-supplied root for every height.
struct OperatorRoot(Option<Hash32>);

impl RemoteProofSource for OperatorRoot {
    fn commitment_root(&self, _ctx: &Context<'_>, _client_id: &str, _height: Height) -> Option<Hash32> {
        self.0
    }
}

fn parse_root(s: &str) -> Result<Hash32> {
    let raw = hex::decode(s.trim()).context("root is not hex")?;
    raw.as_slice()
        .try_into()
        .map_err(|_| anyhow!("root must be 32 bytes, got {}", raw.len()))
}

fn init_logging(format: LogFormat) {
    let builder = tracing_subscriber::fmt().with_target(false).with_level(true);
    let _ = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let (Some(cfg_path), Some(genesis_path)) = (args.next(), args.next()) else {
        bail!("usage: maany-genesis-audit <config.toml> <genesis.json> [root-hex]");
    };
    let root = args.next().map(|s| parse_root(&s)).transpose()?;

    let cfg = config::load(&cfg_path)?;
    init_logging(cfg.log_format);

    let raw = std::fs::read(&genesis_path).with_context(|| format!("read {genesis_path}"))?;
    let gs: GenesisState = serde_json::from_slice(&raw).context("parse genesis")?;
    gs.validate()?;
    let params = gs
        .params
        .as_ref()
        .ok_or_else(|| anyhow!("genesis has no params"))?;

    let db = PersistentState::open(&cfg.data_dir)?;
    // Writes go to a throwaway branch; the node's state is only read.
    let mut scratch = CacheStore::new(&db);
    let ctx = Context::new(&mut scratch, "audit", 0);
    let roots = OperatorRoot(root);

    let strict = cfg.genesismint.strict_proofs;
    let (mut ok, mut claimed, mut failed) = (0usize, 0usize, 0usize);
    for intent in &gs.mints {
        match verify_intent(&ctx, &roots, params, intent, strict) {
            Ok(Verdict::Verified(v)) => {
                ok += 1;
                info!(escrow_id = %intent.escrow_id, store = %v.store_name, proven = v.proven, recipient = %intent.recipient, amount = %intent.amount_value, "intent ok");
            }
            Ok(Verdict::AlreadyClaimed) => {
                claimed += 1;
                warn!(escrow_id = %intent.escrow_id, "already claimed on this node");
            }
            Err(e) => {
                failed += 1;
                error!(escrow_id = %intent.escrow_id, error = %e, "intent rejected");
            }
        }
    }

    info!(intents = gs.mints.len(), ok, claimed, failed, strict, "audit finished");
    println!("ok={ok} already_claimed={claimed} failed={failed}");
    if failed > 0 {
        bail!("{failed} intent(s) would abort genesis");
    }
    Ok(())
}
