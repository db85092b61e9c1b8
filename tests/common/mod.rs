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


//! In-memory collaborators shared by the integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use alloy_primitives::U256;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use maany_dex::core::context::Context;
use maany_dex::core::state::merkle::Hash32;
use maany_dex::core::state::store::{KvStore, StateError};
use maany_dex::core::types::{parse_amount, Address, Coin, Height};
use maany_dex::genesismint::{self, Collaborators, MintIntent, RelayConfig};
use maany_dex::ibc::ack::Acknowledgement;
use maany_dex::ibc::commitment::{prove_multistore, MultiStore};
use maany_dex::ibc::keepers::{
    AddressCodec, AddressError, BankError, BankKeeper, ChannelRegistry, ClientKeeper,
    ConsumerKeeper, RemoteSend, TransportError,
};
use maany_dex::ibc::module::{IbcError, IbcModule};
use maany_dex::ibc::transfer::{FungibleTokenPacketData, TRANSFER_PORT};
use maany_dex::ibc::types::{
    ChannelEnd, ChannelState, ClientState, ConnectionCounterparty, ConnectionEnd, Counterparty,
    Order, Packet, TendermintConsensusState,
};
use maany_dex::mintburn;
use maany_dex::monitoring::metrics::Metrics;

pub const CHAIN_ID: &str = "maany-dex-1";
pub const PROVIDER_CHAIN: &str = "maany-mainnet";
pub const PROVIDER_CLIENT: &str = "07-tendermint-0";
pub const PROVIDER_CONNECTION: &str = "connection-0";
pub const ESCROW_STORE: &str = "escrow";
pub const PROOF_HEIGHT: Height = Height {
    revision_number: 1,
    revision_height: 100,
};

// ---------------------------------------------------------------------------
// bank

const BALANCE_PREFIX: u8 = 0xB0;
const SUPPLY_PREFIX: u8 = 0xB1;

fn balance_key(addr: &Address, denom: &str) -> Vec<u8> {
    let mut k = vec![BALANCE_PREFIX];
    k.extend_from_slice(&(addr.as_bytes().len() as u32).to_be_bytes());
    k.extend_from_slice(addr.as_bytes());
    k.extend_from_slice(denom.as_bytes());
    k
}

fn supply_key(denom: &str) -> Vec<u8> {
    let mut k = vec![SUPPLY_PREFIX];
    k.extend_from_slice(denom.as_bytes());
    k
}

fn read_amount(store: &dyn KvStore, key: &[u8]) -> U256 {
    store
        .get(key)
        .ok()
        .flatten()
        .and_then(|raw| std::str::from_utf8(&raw).ok().and_then(parse_amount))
        .unwrap_or(U256::ZERO)
}

fn write_amount(store: &mut dyn KvStore, key: &[u8], v: U256) -> Result<(), StateError> {
    store.set(key, v.to_string().as_bytes())
}

/// Account of a named module.
pub fn module_address(module: &str) -> Address {
    Address(format!("module/{module}").into_bytes())
}

pub fn balance(store: &dyn KvStore, addr: &Address, denom: &str) -> U256 {
    read_amount(store, &balance_key(addr, denom))
}

pub fn total_supply(store: &dyn KvStore, denom: &str) -> U256 {
    read_amount(store, &supply_key(denom))
}

/// Seed `addr` with `amount` outside of any module flow.
pub fn fund(store: &mut dyn KvStore, addr: &Address, denom: &str, amount: u64) {
    let k = balance_key(addr, denom);
    let next = read_amount(store, &k) + U256::from(amount);
    write_amount(store, &k, next).unwrap();
    let s = supply_key(denom);
    let supply = read_amount(store, &s) + U256::from(amount);
    write_amount(store, &s, supply).unwrap();
}

/// Bank whose balances live in the context's store, so atomic branches
/// roll them back together with module state.
#[derive(Default)]
pub struct MockBank {
    pub fail_mint: AtomicBool,
    pub fail_send: AtomicBool,
    pub fail_burn: AtomicBool,
}

impl MockBank {
    fn debit(store: &mut dyn KvStore, addr: &Address, amt: &Coin) -> Result<(), BankError> {
        let k = balance_key(addr, &amt.denom);
        let cur = read_amount(store, &k);
        if cur < amt.amount {
            return Err(BankError::InsufficientFunds(format!("{addr} has {cur}, needs {amt}")));
        }
        write_amount(store, &k, cur - amt.amount)?;
        Ok(())
    }

    fn credit(store: &mut dyn KvStore, addr: &Address, amt: &Coin) -> Result<(), BankError> {
        let k = balance_key(addr, &amt.denom);
        let cur = read_amount(store, &k);
        write_amount(store, &k, cur + amt.amount)?;
        Ok(())
    }
}

impl BankKeeper for MockBank {
    fn mint_coins(&self, ctx: &mut Context<'_>, module: &str, amt: &Coin) -> Result<(), BankError> {
        if self.fail_mint.load(Ordering::SeqCst) {
            return Err(BankError::Unauthorized(module.to_string()));
        }
        let store = ctx.store_mut();
        Self::credit(store, &module_address(module), amt)?;
        let s = supply_key(&amt.denom);
        let supply = read_amount(store, &s);
        write_amount(store, &s, supply + amt.amount)?;
        Ok(())
    }

    fn burn_coins(&self, ctx: &mut Context<'_>, module: &str, amt: &Coin) -> Result<(), BankError> {
        if self.fail_burn.load(Ordering::SeqCst) {
            return Err(BankError::Unauthorized(module.to_string()));
        }
        let store = ctx.store_mut();
        Self::debit(store, &module_address(module), amt)?;
        let s = supply_key(&amt.denom);
        let supply = read_amount(store, &s);
        write_amount(store, &s, supply.saturating_sub(amt.amount))?;
        Ok(())
    }

    fn send_coins_from_module_to_account(
        &self,
        ctx: &mut Context<'_>,
        module: &str,
        recipient: &Address,
        amt: &Coin,
    ) -> Result<(), BankError> {
        if self.fail_send.load(Ordering::SeqCst) {
            return Err(BankError::SendDisabled(amt.denom.clone()));
        }
        let store = ctx.store_mut();
        Self::debit(store, &module_address(module), amt)?;
        Self::credit(store, recipient, amt)
    }

    fn send_coins_from_account_to_module(
        &self,
        ctx: &mut Context<'_>,
        sender: &Address,
        module: &str,
        amt: &Coin,
    ) -> Result<(), BankError> {
        if self.fail_send.load(Ordering::SeqCst) {
            return Err(BankError::SendDisabled(amt.denom.clone()));
        }
        let store = ctx.store_mut();
        Self::debit(store, sender, amt)?;
        Self::credit(store, &module_address(module), amt)
    }
}

// ---------------------------------------------------------------------------
// addresses

/// Accepts `maany1<lowercase alphanumerics>`; the native form is the suffix.
pub struct Bech32ish;

pub fn addr(external: &str) -> Address {
    Bech32ish.decode(external).unwrap()
}

impl AddressCodec for Bech32ish {
    fn decode(&self, s: &str) -> Result<Address, AddressError> {
        let bad = |reason: &str| AddressError {
            input: s.to_string(),
            reason: reason.to_string(),
        };
        let rest = s.strip_prefix("maany1").ok_or_else(|| bad("wrong prefix"))?;
        if rest.is_empty() {
            return Err(bad("empty"));
        }
        if !rest.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()) {
            return Err(bad("invalid character"));
        }
        Ok(Address(rest.as_bytes().to_vec()))
    }
}

// ---------------------------------------------------------------------------
// light client

#[derive(Default)]
pub struct MockLightClient {
    roots: Mutex<BTreeMap<(String, Height), Hash32>>,
    clients: Mutex<BTreeMap<String, ClientState>>,
}

impl MockLightClient {
    pub fn set_root(&self, client_id: &str, height: Height, root: Hash32) {
        self.roots
            .lock()
            .unwrap()
            .insert((client_id.to_string(), height), root);
    }

    pub fn set_client(&self, client_id: &str, chain_id: &str) {
        self.clients.lock().unwrap().insert(
            client_id.to_string(),
            ClientState {
                chain_id: chain_id.to_string(),
                latest_height: PROOF_HEIGHT,
            },
        );
    }
}

impl ClientKeeper for MockLightClient {
    type ConsensusState = TendermintConsensusState;

    fn consensus_state(
        &self,
        _ctx: &Context<'_>,
        client_id: &str,
        height: Height,
    ) -> Option<TendermintConsensusState> {
        self.roots
            .lock()
            .unwrap()
            .get(&(client_id.to_string(), height))
            .map(|root| TendermintConsensusState {
                timestamp_ns: 0,
                root: *root,
                next_validators_hash: [0u8; 32],
            })
    }

    fn client_state(&self, _ctx: &Context<'_>, client_id: &str) -> Option<ClientState> {
        self.clients.lock().unwrap().get(client_id).cloned()
    }
}

// ---------------------------------------------------------------------------
// channels

#[derive(Default)]
struct ChannelTables {
    channels: BTreeMap<(String, String), ChannelEnd>,
    connections: BTreeMap<String, ConnectionEnd>,
    active: BTreeMap<(String, String), String>,
    remote: BTreeMap<(String, String), String>,
}

#[derive(Default)]
pub struct MockChannels {
    t: Mutex<ChannelTables>,
}

impl MockChannels {
    pub fn add_connection(&self, connection_id: &str, client_id: &str, counterparty_connection: &str) {
        self.t.lock().unwrap().connections.insert(
            connection_id.to_string(),
            ConnectionEnd {
                client_id: client_id.to_string(),
                counterparty: ConnectionCounterparty {
                    client_id: "07-tendermint-99".to_string(),
                    connection_id: counterparty_connection.to_string(),
                },
            },
        );
    }

    pub fn add_channel(&self, port_id: &str, channel_id: &str, connection_id: &str) {
        self.t.lock().unwrap().channels.insert(
            (port_id.to_string(), channel_id.to_string()),
            ChannelEnd {
                state: ChannelState::Open,
                order: Order::Unordered,
                counterparty: Counterparty {
                    port_id: port_id.to_string(),
                    channel_id: "channel-100".to_string(),
                },
                connection_hops: vec![connection_id.to_string()],
                version: "ics20-1".to_string(),
            },
        );
    }

    pub fn activate(&self, connection_id: &str, port_id: &str, channel_id: &str) {
        self.t.lock().unwrap().active.insert(
            (connection_id.to_string(), port_id.to_string()),
            channel_id.to_string(),
        );
    }

    pub fn set_remote_address(&self, connection_id: &str, port_id: &str, address: &str) {
        self.t.lock().unwrap().remote.insert(
            (connection_id.to_string(), port_id.to_string()),
            address.to_string(),
        );
    }
}

impl ChannelRegistry for MockChannels {
    fn channel(&self, _ctx: &Context<'_>, port_id: &str, channel_id: &str) -> Option<ChannelEnd> {
        self.t
            .lock()
            .unwrap()
            .channels
            .get(&(port_id.to_string(), channel_id.to_string()))
            .cloned()
    }

    fn connection(&self, _ctx: &Context<'_>, connection_id: &str) -> Option<ConnectionEnd> {
        self.t.lock().unwrap().connections.get(connection_id).cloned()
    }

    fn active_channel(&self, _ctx: &Context<'_>, connection_id: &str, port_id: &str) -> Option<String> {
        self.t
            .lock()
            .unwrap()
            .active
            .get(&(connection_id.to_string(), port_id.to_string()))
            .cloned()
    }

    fn remote_account_address(
        &self,
        _ctx: &Context<'_>,
        connection_id: &str,
        port_id: &str,
    ) -> Option<String> {
        self.t
            .lock()
            .unwrap()
            .remote
            .get(&(connection_id.to_string(), port_id.to_string()))
            .cloned()
    }
}

// ---------------------------------------------------------------------------
// remote-control controller

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    pub owner: String,
    pub connection_id: String,
    pub version: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentPayload {
    pub sequence: u64,
    pub payload: Vec<u8>,
    pub relative_timeout_ns: u64,
}

#[derive(Default)]
struct IcaLog {
    registrations: Vec<Registration>,
    sent: Vec<SentPayload>,
    next_sequence: u64,
    fail_next_sends: usize,
}

#[derive(Default)]
pub struct MockIca {
    log: Mutex<IcaLog>,
    pub reject_registration: AtomicBool,
}

impl MockIca {
    pub fn registrations(&self) -> Vec<Registration> {
        self.log.lock().unwrap().registrations.clone()
    }

    pub fn sent(&self) -> Vec<SentPayload> {
        self.log.lock().unwrap().sent.clone()
    }

    /// The next `n` sends are rejected.
    pub fn fail_next_sends(&self, n: usize) {
        self.log.lock().unwrap().fail_next_sends = n;
    }
}

impl RemoteSend for MockIca {
    fn register_remote_account(
        &self,
        _ctx: &mut Context<'_>,
        owner: &str,
        connection_id: &str,
        version: &str,
    ) -> Result<(), TransportError> {
        if self.reject_registration.load(Ordering::SeqCst) {
            return Err(TransportError::Registration("connection closed".into()));
        }
        self.log.lock().unwrap().registrations.push(Registration {
            owner: owner.to_string(),
            connection_id: connection_id.to_string(),
            version: version.to_string(),
        });
        Ok(())
    }

    fn send_payload(
        &self,
        _ctx: &mut Context<'_>,
        _owner: &str,
        _connection_id: &str,
        payload: &[u8],
        relative_timeout_ns: u64,
    ) -> Result<u64, TransportError> {
        let mut log = self.log.lock().unwrap();
        if log.fail_next_sends > 0 {
            log.fail_next_sends -= 1;
            return Err(TransportError::Send("capability missing".into()));
        }
        log.next_sequence += 1;
        let sequence = log.next_sequence;
        log.sent.push(SentPayload {
            sequence,
            payload: payload.to_vec(),
            relative_timeout_ns,
        });
        Ok(sequence)
    }
}

// ---------------------------------------------------------------------------
// consumer

pub struct FixedConsumer(pub Option<String>);

impl ConsumerKeeper for FixedConsumer {
    fn provider_client_id(&self, _ctx: &Context<'_>) -> Option<String> {
        self.0.clone()
    }
}

// ---------------------------------------------------------------------------
// wrapped applications

/// Records which callbacks reached it. Clones share the log.
#[derive(Clone, Default)]
pub struct RecordingApp {
    calls: Arc<Mutex<Vec<String>>>,
}

impl RecordingApp {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

impl IbcModule for RecordingApp {
    fn on_chan_open_init(
        &self,
        _ctx: &mut Context<'_>,
        _order: Order,
        _connection_hops: &[String],
        _port_id: &str,
        channel_id: &str,
        _counterparty: &Counterparty,
        version: &str,
    ) -> Result<String, IbcError> {
        self.record(format!("open_init:{channel_id}"));
        Ok(version.to_string())
    }

    fn on_chan_open_try(
        &self,
        _ctx: &mut Context<'_>,
        _order: Order,
        _connection_hops: &[String],
        _port_id: &str,
        channel_id: &str,
        _counterparty: &Counterparty,
        counterparty_version: &str,
    ) -> Result<String, IbcError> {
        self.record(format!("open_try:{channel_id}"));
        Ok(counterparty_version.to_string())
    }

    fn on_chan_open_ack(
        &self,
        _ctx: &mut Context<'_>,
        _port_id: &str,
        channel_id: &str,
        _counterparty_channel_id: &str,
        _counterparty_version: &str,
    ) -> Result<(), IbcError> {
        self.record(format!("open_ack:{channel_id}"));
        Ok(())
    }

    fn on_chan_open_confirm(&self, _ctx: &mut Context<'_>, _port_id: &str, channel_id: &str) -> Result<(), IbcError> {
        self.record(format!("open_confirm:{channel_id}"));
        Ok(())
    }

    fn on_chan_close_init(&self, _ctx: &mut Context<'_>, _port_id: &str, channel_id: &str) -> Result<(), IbcError> {
        self.record(format!("close_init:{channel_id}"));
        Ok(())
    }

    fn on_chan_close_confirm(&self, _ctx: &mut Context<'_>, _port_id: &str, channel_id: &str) -> Result<(), IbcError> {
        self.record(format!("close_confirm:{channel_id}"));
        Ok(())
    }

    fn on_recv_packet(&self, _ctx: &mut Context<'_>, packet: &Packet, _relayer: &Address) -> Acknowledgement {
        self.record(format!("recv:{}", packet.sequence));
        Acknowledgement::success()
    }

    fn on_acknowledgement_packet(
        &self,
        _ctx: &mut Context<'_>,
        packet: &Packet,
        _acknowledgement: &[u8],
        _relayer: &Address,
    ) -> Result<(), IbcError> {
        self.record(format!("ack:{}", packet.sequence));
        Ok(())
    }

    fn on_timeout_packet(&self, _ctx: &mut Context<'_>, packet: &Packet, _relayer: &Address) -> Result<(), IbcError> {
        self.record(format!("timeout:{}", packet.sequence));
        Ok(())
    }
}

pub fn relayer() -> Address {
    Address(b"relayer".to_vec())
}

// ---------------------------------------------------------------------------
// genesismint fixture

pub struct ClaimFixture {
    pub bank: Arc<MockBank>,
    pub light: Arc<MockLightClient>,
    pub channels: Arc<MockChannels>,
    pub ica: Arc<MockIca>,
    pub keeper: genesismint::Keeper,
}

impl ClaimFixture {
    pub fn new(relay: RelayConfig) -> Self {
        let bank = Arc::new(MockBank::default());
        let light = Arc::new(MockLightClient::default());
        let channels = Arc::new(MockChannels::default());
        let ica = Arc::new(MockIca::default());
        channels.add_connection(PROVIDER_CONNECTION, PROVIDER_CLIENT, "connection-9");
        let keeper = genesismint::Keeper::new(
            Collaborators {
                bank: bank.clone(),
                addresses: Arc::new(Bech32ish),
                roots: light.clone(),
                channels: channels.clone(),
                remote: ica.clone(),
            },
            relay,
        );
        Self {
            bank,
            light,
            channels,
            ica,
            keeper,
        }
    }

    /// Make the remote-control channel and account available.
    pub fn open_remote_channel(&self, channel_id: &str) {
        let port = self.keeper.relay_config().controller_port();
        self.channels.add_channel(&port, channel_id, PROVIDER_CONNECTION);
        self.channels.activate(PROVIDER_CONNECTION, &port, channel_id);
        self.channels
            .set_remote_address(PROVIDER_CONNECTION, &port, "provider1remoteaccount");
    }
}

pub fn claim_params() -> genesismint::Params {
    genesismint::Params {
        provider_chain_id: PROVIDER_CHAIN.into(),
        provider_client_id: PROVIDER_CLIENT.into(),
        allowed_provider_denom: "stake".into(),
        mint_denom: "umaany".into(),
        genesis_trusted_root: None,
        use_genesis_trusted_root: false,
    }
}

pub fn escrow_key(escrow_id: &str) -> Vec<u8> {
    format!("escrow/{escrow_id}").into_bytes()
}

pub fn escrow_record(escrow_id: &str, amount: u64) -> Vec<u8> {
    format!("{{\"id\":\"{escrow_id}\",\"amount\":\"{amount}stake\"}}").into_bytes()
}

/// Provider state holding one escrow record per `(id, amount)` plus an
/// unrelated store, and proven intents for all of them.
pub fn proven_intents(escrows: &[(&str, u64)], recipient: &str) -> (Hash32, Vec<MintIntent>) {
    let mut stores = MultiStore::new();
    let escrow = stores.entry(ESCROW_STORE.to_string()).or_default();
    for (id, amount) in escrows {
        escrow.insert(escrow_key(id), escrow_record(id, *amount));
    }
    stores
        .entry("bank".to_string())
        .or_default()
        .insert(b"supply/stake".to_vec(), b"1000000".to_vec());

    let mut root = [0u8; 32];
    let mut intents = Vec::new();
    for (id, amount) in escrows {
        let (r, proof) = prove_multistore(&stores, ESCROW_STORE, &escrow_key(id)).unwrap();
        root = r;
        intents.push(MintIntent {
            provider_chain_id: PROVIDER_CHAIN.into(),
            escrow_id: (*id).into(),
            key_path: vec![ESCROW_STORE.into(), hex::encode(escrow_key(id))],
            value: STANDARD.encode(escrow_record(id, *amount)),
            amount_denom: "stake".into(),
            amount_value: amount.to_string(),
            recipient: recipient.into(),
            proof_height_revision_number: PROOF_HEIGHT.revision_number,
            proof_height_revision_height: PROOF_HEIGHT.revision_height,
            merkle_proof: proof,
        });
    }
    (root, intents)
}

// ---------------------------------------------------------------------------
// mintburn fixture

pub const TRUSTED_CHANNEL: &str = "channel-0";
pub const UNTRUSTED_CHANNEL: &str = "channel-7";

pub struct BridgeFixture {
    pub bank: Arc<MockBank>,
    pub light: Arc<MockLightClient>,
    pub channels: Arc<MockChannels>,
    pub app: RecordingApp,
    pub bridge: mintburn::BridgeMiddleware<RecordingApp>,
}

impl BridgeFixture {
    /// Provider connection over the consumer's client; a second connection
    /// over some other client.
    pub fn new() -> Self {
        Self::build(None, Some(PROVIDER_CLIENT))
    }

    pub fn with_metrics(metrics: Metrics) -> Self {
        Self::build(Some(metrics), Some(PROVIDER_CLIENT))
    }

    /// Consumer module that has not learnt its provider client yet.
    pub fn without_provider_client() -> Self {
        Self::build(None, None)
    }

    fn build(metrics: Option<Metrics>, provider_client: Option<&str>) -> Self {
        let bank = Arc::new(MockBank::default());
        let light = Arc::new(MockLightClient::default());
        let channels = Arc::new(MockChannels::default());
        let app = RecordingApp::default();

        light.set_client(PROVIDER_CLIENT, PROVIDER_CHAIN);
        light.set_client("07-tendermint-5", "other-chain");
        channels.add_connection(PROVIDER_CONNECTION, PROVIDER_CLIENT, "connection-9");
        channels.add_connection("connection-5", "07-tendermint-5", "connection-1");
        channels.add_channel(TRANSFER_PORT, TRUSTED_CHANNEL, PROVIDER_CONNECTION);
        channels.add_channel(TRANSFER_PORT, UNTRUSTED_CHANNEL, "connection-5");

        let mut keeper = mintburn::Keeper::new(
            bank.clone(),
            Arc::new(Bech32ish),
            channels.clone(),
            light.clone(),
            Arc::new(FixedConsumer(provider_client.map(str::to_string))),
            TRANSFER_PORT,
        );
        if let Some(m) = metrics {
            keeper = keeper.with_metrics(m);
        }
        let bridge = mintburn::BridgeMiddleware::new(app.clone(), keeper);
        Self {
            bank,
            light,
            channels,
            app,
            bridge,
        }
    }

    pub fn keeper(&self) -> &mintburn::Keeper {
        self.bridge.keeper()
    }

    /// Complete the handshake of `channel_id` as the initiating side.
    pub fn open(&self, ctx: &mut Context<'_>, channel_id: &str) {
        self.bridge
            .on_chan_open_ack(ctx, TRANSFER_PORT, channel_id, "channel-100", "ics20-1")
            .unwrap();
    }
}

pub fn transfer_data(denom: &str, amount: &str, receiver: &str) -> Vec<u8> {
    FungibleTokenPacketData {
        denom: denom.into(),
        amount: amount.into(),
        sender: "provider1alice".into(),
        receiver: receiver.into(),
        memo: String::new(),
    }
    .to_bytes()
}

/// Provider → DEX packet arriving on `channel_id`.
pub fn inbound(channel_id: &str, sequence: u64, data: Vec<u8>) -> Packet {
    Packet {
        sequence,
        source_port: TRANSFER_PORT.into(),
        source_channel: "channel-100".into(),
        destination_port: TRANSFER_PORT.into(),
        destination_channel: channel_id.into(),
        data,
        timeout_height: Height::new(1, 1000),
        timeout_timestamp: 0,
    }
}

/// DEX → provider packet sent on `channel_id`.
pub fn outbound(channel_id: &str, sequence: u64, data: Vec<u8>) -> Packet {
    Packet {
        sequence,
        source_port: TRANSFER_PORT.into(),
        source_channel: channel_id.into(),
        destination_port: TRANSFER_PORT.into(),
        destination_channel: "channel-100".into(),
        data,
        timeout_height: Height::new(1, 1000),
        timeout_timestamp: 0,
    }
}
