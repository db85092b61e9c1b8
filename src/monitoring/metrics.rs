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

use prometheus::{Encoder, IntCounter, IntGauge, Registry, TextEncoder};
use thiserror::Error;

/// Metrics errors.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("prometheus")]
    Prom,
}

/// Metrics container.
#[derive(Clone)]
pub struct Metrics {
    /// Registry.
    pub registry: Registry,

    /// Claims minted at genesis.
    pub claims_minted_total: IntCounter,
    /// Claim notifications handed to the remote-control channel.
    pub notifications_sent_total: IntCounter,
    /// Notification sends rejected by the transport.
    pub notification_send_failures_total: IntCounter,
    /// Notifications confirmed by a success acknowledgement.
    pub notifications_acked_total: IntCounter,
    /// Notifications returned to the queue after an error ack or timeout.
    pub notifications_retried_total: IntCounter,

    /// Mirror mints on inbound packets.
    pub mirror_mints_total: IntCounter,
    /// Burns on outbound acknowledgements.
    pub burns_total: IntCounter,
    /// Burns that failed and were skipped.
    pub burn_failures_total: IntCounter,
    /// Inbound packets rejected as replays.
    pub replays_rejected_total: IntCounter,
    /// Inbound packets handed to the wrapped transfer handler.
    pub passthrough_total: IntCounter,
    /// Allowlisted transfer channels.
    pub allowlisted_channels: IntGauge,
}

fn counter(registry: &Registry, name: &str, help: &str) -> Result<IntCounter, MetricsError> {
    let c = IntCounter::new(name, help).map_err(|_| MetricsError::Prom)?;
    registry
        .register(Box::new(c.clone()))
        .map_err(|_| MetricsError::Prom)?;
    Ok(c)
}

impl Metrics {
    /// Create and register metrics.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let claims_minted_total = counter(
            &registry,
            "maany_genesismint_claims_minted_total",
            "Claims minted at genesis",
        )?;
        let notifications_sent_total = counter(
            &registry,
            "maany_genesismint_notifications_sent_total",
            "Claim notifications sent",
        )?;
        let notification_send_failures_total = counter(
            &registry,
            "maany_genesismint_notification_send_failures_total",
            "Claim notification send failures",
        )?;
        let notifications_acked_total = counter(
            &registry,
            "maany_genesismint_notifications_acked_total",
            "Claim notifications acknowledged",
        )?;
        let notifications_retried_total = counter(
            &registry,
            "maany_genesismint_notifications_retried_total",
            "Claim notifications requeued after error ack or timeout",
        )?;

        let mirror_mints_total = counter(
            &registry,
            "maany_mintburn_mirror_mints_total",
            "Mirror mints on inbound transfers",
        )?;
        let burns_total = counter(
            &registry,
            "maany_mintburn_burns_total",
            "Burns on outbound acknowledgements",
        )?;
        let burn_failures_total = counter(
            &registry,
            "maany_mintburn_burn_failures_total",
            "Failed burns on outbound acknowledgements",
        )?;
        let replays_rejected_total = counter(
            &registry,
            "maany_mintburn_replays_rejected_total",
            "Inbound packets rejected as replays",
        )?;
        let passthrough_total = counter(
            &registry,
            "maany_mintburn_passthrough_total",
            "Inbound packets passed to the transfer handler",
        )?;

        let allowlisted_channels = IntGauge::new(
            "maany_mintburn_allowlisted_channels",
            "Allowlisted transfer channels",
        )
        .map_err(|_| MetricsError::Prom)?;
        registry
            .register(Box::new(allowlisted_channels.clone()))
            .map_err(|_| MetricsError::Prom)?;

        Ok(Self {
            registry,
            claims_minted_total,
            notifications_sent_total,
            notification_send_failures_total,
            notifications_acked_total,
            notifications_retried_total,
            mirror_mints_total,
            burns_total,
            burn_failures_total,
            replays_rejected_total,
            passthrough_total,
            allowlisted_channels,
        })
    }

    /// Text exposition of every registered metric.
    pub fn render(&self) -> Result<String, MetricsError> {
        let mut buf = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buf)
            .map_err(|_| MetricsError::Prom)?;
        String::from_utf8(buf).map_err(|_| MetricsError::Prom)
    }
}
