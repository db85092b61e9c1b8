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

mod common;

use alloy_primitives::U256;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::*;
use maany_dex::core::context::Context;
use maany_dex::core::state::store::MemStore;
use maany_dex::genesismint::genesis::{export_genesis, init_genesis, GenesisError};
use maany_dex::genesismint::keeper::ClaimError;
use maany_dex::genesismint::ledger::{MintError, EVENT_MINTED};
use maany_dex::genesismint::types::{GenesisState, GenesisTrustedRoot, GenesisValidationError};
use maany_dex::genesismint::verify::VerifyError;
use maany_dex::genesismint::{ClaimId, MintIntent, RelayConfig};
use maany_dex::ibc::commitment::MerkleProof;
use maany_dex::monitoring::metrics::Metrics;

fn genesis(mints: Vec<MintIntent>) -> GenesisState {
    GenesisState {
        params: Some(claim_params()),
        mints,
        claimed_escrow_ids: Vec::new(),
    }
}

fn ids(list: &[ClaimId]) -> Vec<&str> {
    list.iter().map(|id| id.escrow_id.as_str()).collect()
}

#[test]
fn strict_genesis_mints_and_indexes_each_claim() {
    let fx = ClaimFixture::new(RelayConfig::default());
    let metrics = Metrics::new().unwrap();
    let keeper = fx.keeper.clone().with_metrics(metrics.clone());
    let (root, intents) = proven_intents(&[("escrow-1", 500), ("escrow-2", 700)], "maany1alice");
    fx.light.set_root(PROVIDER_CLIENT, PROOF_HEIGHT, root);

    let mut store = MemStore::new();
    let mut ctx = Context::new(&mut store, CHAIN_ID, 0);
    init_genesis(&keeper, &mut ctx, &genesis(intents), true).unwrap();

    let alice = addr("maany1alice");
    assert_eq!(balance(ctx.store(), &alice, "umaany"), U256::from(1200u64));
    assert_eq!(balance(ctx.store(), &module_address("genesismint"), "umaany"), U256::ZERO);
    assert_eq!(total_supply(ctx.store(), "umaany"), U256::from(1200u64));

    assert_eq!(ids(&keeper.claimed(&ctx).unwrap()), vec!["escrow-1", "escrow-2"]);
    assert_eq!(ids(&keeper.pending(&ctx).unwrap()), vec!["escrow-1", "escrow-2"]);
    assert!(keeper
        .is_claimed(&ctx, &ClaimId::new(PROVIDER_CHAIN, "escrow-1"))
        .unwrap());
    assert_eq!(keeper.params(&ctx).unwrap(), Some(claim_params()));

    let minted: Vec<&str> = ctx
        .events()
        .iter()
        .filter(|e| e.kind == EVENT_MINTED)
        .filter_map(|e| e.get("escrow_id"))
        .collect();
    assert_eq!(minted, vec!["escrow-1", "escrow-2"]);
    assert_eq!(metrics.claims_minted_total.get(), 2);
}

#[test]
fn replayed_genesis_mints_once() {
    let fx = ClaimFixture::new(RelayConfig::default());
    let (root, intents) = proven_intents(&[("escrow-1", 500)], "maany1alice");
    fx.light.set_root(PROVIDER_CLIENT, PROOF_HEIGHT, root);
    let gs = genesis(intents);

    let mut store = MemStore::new();
    {
        let mut ctx = Context::new(&mut store, CHAIN_ID, 0);
        init_genesis(&fx.keeper, &mut ctx, &gs, true).unwrap();
    }
    let mut ctx = Context::new(&mut store, CHAIN_ID, 0);
    init_genesis(&fx.keeper, &mut ctx, &gs, true).unwrap();

    assert_eq!(balance(ctx.store(), &addr("maany1alice"), "umaany"), U256::from(500u64));
    assert_eq!(fx.keeper.claimed(&ctx).unwrap().len(), 1);
    assert!(ctx.events().iter().all(|e| e.kind != EVENT_MINTED));
}

#[test]
fn duplicate_intent_in_one_genesis_mints_once() {
    let fx = ClaimFixture::new(RelayConfig::default());
    let (root, mut intents) = proven_intents(&[("escrow-1", 500)], "maany1alice");
    fx.light.set_root(PROVIDER_CLIENT, PROOF_HEIGHT, root);
    intents.push(intents[0].clone());

    let mut store = MemStore::new();
    let mut ctx = Context::new(&mut store, CHAIN_ID, 0);
    init_genesis(&fx.keeper, &mut ctx, &genesis(intents), true).unwrap();
    assert_eq!(total_supply(ctx.store(), "umaany"), U256::from(500u64));
}

#[test]
fn tampered_value_aborts_the_whole_genesis() {
    let fx = ClaimFixture::new(RelayConfig::default());
    let metrics = Metrics::new().unwrap();
    let keeper = fx.keeper.clone().with_metrics(metrics.clone());
    let (root, mut intents) = proven_intents(&[("escrow-1", 500), ("escrow-2", 700)], "maany1alice");
    fx.light.set_root(PROVIDER_CLIENT, PROOF_HEIGHT, root);
    intents[1].value = STANDARD.encode(escrow_record("escrow-2", 7_000_000));
    intents[1].amount_value = "7000000".into();

    let mut store = MemStore::new();
    let mut ctx = Context::new(&mut store, CHAIN_ID, 0);
    let err = init_genesis(&keeper, &mut ctx, &genesis(intents), true).unwrap_err();
    match err {
        GenesisError::Claim { escrow_id, source } => {
            assert_eq!(escrow_id, "escrow-2");
            assert!(matches!(source, ClaimError::Verify(VerifyError::Proof(_))));
        }
        other => panic!("unexpected {other:?}"),
    }

    // escrow-1 verified fine but nothing survives the aborted genesis.
    assert_eq!(total_supply(ctx.store(), "umaany"), U256::ZERO);
    assert!(fx.keeper.claimed(&ctx).unwrap().is_empty());
    assert!(fx.keeper.pending(&ctx).unwrap().is_empty());
    assert_eq!(fx.keeper.params(&ctx).unwrap(), None);
    assert!(ctx.events().is_empty());
    assert_eq!(metrics.claims_minted_total.get(), 0);
}

#[test]
fn proof_from_another_store_is_rejected() {
    let fx = ClaimFixture::new(RelayConfig::default());
    let (root, mut intents) = proven_intents(&[("escrow-1", 500)], "maany1alice");
    fx.light.set_root(PROVIDER_CLIENT, PROOF_HEIGHT, root);
    intents[0].key_path[0] = "bank".into();

    let mut store = MemStore::new();
    let mut ctx = Context::new(&mut store, CHAIN_ID, 0);
    assert!(init_genesis(&fx.keeper, &mut ctx, &genesis(intents), true).is_err());
    assert_eq!(total_supply(ctx.store(), "umaany"), U256::ZERO);
}

#[test]
fn missing_commitment_root_is_fatal_in_strict_mode() {
    let fx = ClaimFixture::new(RelayConfig::default());
    let (_root, intents) = proven_intents(&[("escrow-1", 500)], "maany1alice");

    let mut store = MemStore::new();
    let mut ctx = Context::new(&mut store, CHAIN_ID, 0);
    let err = init_genesis(&fx.keeper, &mut ctx, &genesis(intents), true).unwrap_err();
    assert!(matches!(
        err,
        GenesisError::Claim {
            source: ClaimError::Verify(VerifyError::NoCommitmentRoot { .. }),
            ..
        }
    ));
}

#[test]
fn trusted_root_backs_proofs_when_the_client_has_none() {
    let fx = ClaimFixture::new(RelayConfig::default());
    let (root, intents) = proven_intents(&[("escrow-1", 500)], "maany1alice");
    let mut gs = genesis(intents);
    let params = gs.params.as_mut().unwrap();
    params.genesis_trusted_root = Some(GenesisTrustedRoot {
        revision_number: PROOF_HEIGHT.revision_number,
        revision_height: PROOF_HEIGHT.revision_height,
        hash: root,
    });
    params.use_genesis_trusted_root = true;

    let mut store = MemStore::new();
    let mut ctx = Context::new(&mut store, CHAIN_ID, 0);
    init_genesis(&fx.keeper, &mut ctx, &gs, true).unwrap();
    assert_eq!(total_supply(ctx.store(), "umaany"), U256::from(500u64));
}

#[test]
fn trusted_root_at_another_height_does_not_apply() {
    let fx = ClaimFixture::new(RelayConfig::default());
    let (root, intents) = proven_intents(&[("escrow-1", 500)], "maany1alice");
    let mut gs = genesis(intents);
    let params = gs.params.as_mut().unwrap();
    params.genesis_trusted_root = Some(GenesisTrustedRoot {
        revision_number: PROOF_HEIGHT.revision_number,
        revision_height: PROOF_HEIGHT.revision_height + 1,
        hash: root,
    });
    params.use_genesis_trusted_root = true;

    let mut store = MemStore::new();
    let mut ctx = Context::new(&mut store, CHAIN_ID, 0);
    assert!(init_genesis(&fx.keeper, &mut ctx, &gs, true).is_err());
}

#[test]
fn lenient_genesis_skips_proofs() {
    let fx = ClaimFixture::new(RelayConfig::default());
    let (_root, mut intents) = proven_intents(&[("escrow-1", 500)], "maany1alice");
    intents[0].merkle_proof = MerkleProof::default();

    let mut store = MemStore::new();
    let mut ctx = Context::new(&mut store, CHAIN_ID, 0);
    init_genesis(&fx.keeper, &mut ctx, &genesis(intents), false).unwrap();
    assert_eq!(total_supply(ctx.store(), "umaany"), U256::from(500u64));
}

#[test]
fn static_checks_reject_foreign_chain_and_denom() {
    let fx = ClaimFixture::new(RelayConfig::default());
    let (root, intents) = proven_intents(&[("escrow-1", 500)], "maany1alice");
    fx.light.set_root(PROVIDER_CLIENT, PROOF_HEIGHT, root);

    let mut wrong_denom = intents[0].clone();
    wrong_denom.amount_denom = "uatom".into();
    let mut wrong_chain = intents[0].clone();
    wrong_chain.provider_chain_id = "other-chain".into();

    let mut store = MemStore::new();
    let mut ctx = Context::new(&mut store, CHAIN_ID, 0);
    let err = init_genesis(&fx.keeper, &mut ctx, &genesis(vec![wrong_denom]), true).unwrap_err();
    assert!(matches!(
        err,
        GenesisError::Claim {
            source: ClaimError::Verify(VerifyError::DenomNotAllowed(_)),
            ..
        }
    ));
    let err = init_genesis(&fx.keeper, &mut ctx, &genesis(vec![wrong_chain]), true).unwrap_err();
    assert!(matches!(
        err,
        GenesisError::Claim {
            source: ClaimError::Verify(VerifyError::ChainMismatch { .. }),
            ..
        }
    ));
}

#[test]
fn failed_transfer_undoes_the_mint() {
    let fx = ClaimFixture::new(RelayConfig::default());
    let (root, intents) = proven_intents(&[("escrow-1", 500)], "maany1alice");
    fx.light.set_root(PROVIDER_CLIENT, PROOF_HEIGHT, root);
    fx.bank
        .fail_send
        .store(true, std::sync::atomic::Ordering::SeqCst);

    let mut store = MemStore::new();
    let mut ctx = Context::new(&mut store, CHAIN_ID, 0);
    let err = init_genesis(&fx.keeper, &mut ctx, &genesis(intents), true).unwrap_err();
    assert!(matches!(
        err,
        GenesisError::Claim {
            source: ClaimError::Mint(MintError::Send(_)),
            ..
        }
    ));
    assert_eq!(total_supply(ctx.store(), "umaany"), U256::ZERO);
    assert_eq!(balance(ctx.store(), &module_address("genesismint"), "umaany"), U256::ZERO);
    assert!(fx.keeper.claimed(&ctx).unwrap().is_empty());
}

#[test]
fn zero_amount_and_bad_recipient_are_rejected() {
    let fx = ClaimFixture::new(RelayConfig::default());
    let (root, zero) = proven_intents(&[("escrow-0", 0)], "maany1alice");
    fx.light.set_root(PROVIDER_CLIENT, PROOF_HEIGHT, root);

    let mut store = MemStore::new();
    let mut ctx = Context::new(&mut store, CHAIN_ID, 0);
    let err = init_genesis(&fx.keeper, &mut ctx, &genesis(zero), true).unwrap_err();
    assert!(matches!(
        err,
        GenesisError::Claim {
            source: ClaimError::Mint(MintError::InvalidAmount(_)),
            ..
        }
    ));

    let (root, bad) = proven_intents(&[("escrow-1", 10)], "cosmos1bob");
    fx.light.set_root(PROVIDER_CLIENT, PROOF_HEIGHT, root);
    let err = init_genesis(&fx.keeper, &mut ctx, &genesis(bad), true).unwrap_err();
    assert!(matches!(
        err,
        GenesisError::Claim {
            source: ClaimError::Mint(MintError::Recipient(_)),
            ..
        }
    ));
}

#[test]
fn imported_claimed_ids_are_never_minted() {
    let fx = ClaimFixture::new(RelayConfig::default());
    let (root, intents) = proven_intents(&[("escrow-1", 500), ("escrow-2", 700)], "maany1alice");
    fx.light.set_root(PROVIDER_CLIENT, PROOF_HEIGHT, root);
    let mut gs = genesis(intents);
    gs.claimed_escrow_ids = vec!["escrow-1".into()];

    let mut store = MemStore::new();
    let mut ctx = Context::new(&mut store, CHAIN_ID, 0);
    init_genesis(&fx.keeper, &mut ctx, &gs, true).unwrap();

    assert_eq!(total_supply(ctx.store(), "umaany"), U256::from(700u64));
    assert_eq!(ids(&fx.keeper.claimed(&ctx).unwrap()), vec!["escrow-1", "escrow-2"]);
    assert_eq!(ids(&fx.keeper.pending(&ctx).unwrap()), vec!["escrow-2"]);
}

#[test]
fn export_returns_params_and_claimed_ids() {
    let fx = ClaimFixture::new(RelayConfig::default());
    let (root, intents) = proven_intents(&[("escrow-2", 5), ("escrow-1", 7)], "maany1alice");
    fx.light.set_root(PROVIDER_CLIENT, PROOF_HEIGHT, root);

    let mut store = MemStore::new();
    let mut ctx = Context::new(&mut store, CHAIN_ID, 0);
    init_genesis(&fx.keeper, &mut ctx, &genesis(intents), true).unwrap();

    let exported = export_genesis(&fx.keeper, &ctx).unwrap();
    assert_eq!(exported.params, Some(claim_params()));
    assert!(exported.mints.is_empty());
    assert_eq!(exported.claimed_escrow_ids, vec!["escrow-1", "escrow-2"]);
    assert!(exported.validate().is_ok());
}

#[test]
fn genesis_without_params_is_invalid() {
    let fx = ClaimFixture::new(RelayConfig::default());
    let mut store = MemStore::new();
    let mut ctx = Context::new(&mut store, CHAIN_ID, 0);
    let gs = GenesisState {
        params: None,
        mints: Vec::new(),
        claimed_escrow_ids: Vec::new(),
    };
    let err = init_genesis(&fx.keeper, &mut ctx, &gs, true).unwrap_err();
    assert!(matches!(
        err,
        GenesisError::Invalid(GenesisValidationError::ParamsMissing)
    ));
}

#[test]
fn genesis_json_round_trips_through_serde() {
    let (_root, intents) = proven_intents(&[("escrow-1", 500)], "maany1alice");
    let gs = genesis(intents);
    let raw = serde_json::to_string(&gs).unwrap();
    let back: GenesisState = serde_json::from_str(&raw).unwrap();
    assert_eq!(back, gs);
}
